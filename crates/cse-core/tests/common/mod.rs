//! Shared fixtures for pipeline tests.
#![allow(dead_code)]

use cse_core::config::ExportConfig;
use cse_core::symbols::QualifiedName;
use cse_core::{export_symbols, CseError, ExportOutcome};

/// Builds a project buffer the way CoDeSys 2.3 lays one out: the signature,
/// then declaration texts separated by binary object headers.
pub fn project(declarations: &[&str]) -> Vec<u8> {
    project_with_header(&[0x00, 0x00, 0x02, 0x17, 0xFF, 0x80, 0x01], declarations)
}

/// Like [`project`], with caller-chosen bytes between the signature and the
/// first declaration.
pub fn project_with_header(header: &[u8], declarations: &[&str]) -> Vec<u8> {
    let mut buffer = b"CoDeSys+".to_vec();
    buffer.extend_from_slice(header);
    for text in declarations {
        buffer.extend_from_slice(&[0x14, 0x00, 0x00, 0x00, 0xC3, 0x28]);
        buffer.extend_from_slice(text.as_bytes());
        buffer.extend_from_slice(&[0x00, 0x0D, 0x0A, 0xFE]);
    }
    buffer
}

pub const PLC_PRG: &str = "PROGRAM PLC_PRG
VAR
    (* @EXPORT *)
    Counter : INT;
    Speed : REAL;
    Ready AT %QX0.0 : BOOL; (* @EXPORT *)
END_VAR
";

pub const GLOBALS: &str = "VAR_GLOBAL
    Alarm : BOOL; (* @EXPORT *)
    Heartbeat : BOOL;
END_VAR
";

pub const FB_MOTOR: &str = "FUNCTION_BLOCK FB_Motor
VAR_INPUT
    Enable : BOOL;
END_VAR
VAR_OUTPUT
    Running, Fault : BOOL; {@EXPORT}
END_VAR
";

pub const SYMBOL_HEADER: &str = "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\r
<Symbolconfiguration>\r
<Header><Version>1.0</Version><SymbolConfigObject>PLC</SymbolConfigObject></Header>\r
<SymbolVarList>\r
";

pub const SYMBOL_TRAILER: &str = "</SymbolVarList>\r
<TypeList>\r
<TypeSimple Name=\"INT\" Size=\"2\"/>\r
</TypeList>\r
</Symbolconfiguration>";

/// Body line in the shape CoDeSys writes.
pub fn entry(qualified: &str) -> String {
    format!("<SymbolVarEntry Type=\"INT\" Access=\"ReadWrite\">{qualified}</SymbolVarEntry>\r\n")
}

/// Full symbol file around the given body lines.
pub fn symbol_file(body: &[String]) -> String {
    let mut text = String::from(SYMBOL_HEADER);
    for line in body {
        text.push_str(line);
    }
    text.push_str(SYMBOL_TRAILER);
    text
}

/// Runs the pipeline with default configuration, collecting copy notices.
pub fn run(
    project: &[u8],
    symbols: &str,
) -> Result<(ExportOutcome, String, Vec<String>), CseError> {
    let mut output = Vec::new();
    let mut copied = Vec::new();
    let outcome = export_symbols(
        project,
        symbols.as_bytes(),
        &mut output,
        &ExportConfig::default(),
        &mut |name: &QualifiedName<'_>| copied.push(name.to_string()),
    )?;
    let output = String::from_utf8(output).expect("output is utf8");
    Ok((outcome, output, copied))
}
