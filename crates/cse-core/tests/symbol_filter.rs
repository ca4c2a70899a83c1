mod common;

use common::*;
use cse_core::config::SymbolFileFormat;
use cse_core::symbols::{QualifiedName, SymbolFilter};
use cse_core::{Pou, ProjectIndex, Variable};

fn sample_index() -> ProjectIndex {
    [
        Pou {
            name: "PLC_PRG".into(),
            variables: vec![Variable::new("Counter")],
        },
        Pou {
            name: "".into(),
            variables: vec![Variable::new("Alarm")],
        },
    ]
    .into_iter()
    .collect()
}

fn filter(input: &str, index: &mut ProjectIndex) -> (String, Vec<String>) {
    let format = SymbolFileFormat::default();
    let mut output = Vec::new();
    let mut copied = Vec::new();
    SymbolFilter::new(&format)
        .run(
            input.as_bytes(),
            index,
            &mut output,
            &mut |name: &QualifiedName<'_>| copied.push(name.to_string()),
        )
        .expect("filter");
    (String::from_utf8(output).expect("utf8"), copied)
}

#[test]
fn keeps_only_indexed_body_lines() {
    let mut index = sample_index();
    let input = symbol_file(&[
        entry("PLC_PRG.Counter"),
        entry("PLC_PRG.OtherVar"),
        entry("Alarm"),
    ]);
    let (output, copied) = filter(&input, &mut index);

    let expected = symbol_file(&[entry("PLC_PRG.Counter"), entry("Alarm")]);
    assert_eq!(output, expected);
    assert_eq!(
        copied,
        vec!["PLC_PRG.Counter", "<Global variables>.Alarm"]
    );
    assert_eq!(index.used_count(), 2);
}

#[test]
fn preamble_and_trailer_are_byte_identical() {
    let mut index = sample_index();
    let input = symbol_file(&[entry("Nothing.Here"), entry("PLC_PRG.Counter")]);
    let (output, _) = filter(&input, &mut index);

    assert!(output.starts_with(SYMBOL_HEADER));
    assert!(output.ends_with(SYMBOL_TRAILER));
    assert!(!output.ends_with('\n'));
    assert_eq!(output.len(), SYMBOL_HEADER.len() + entry("PLC_PRG.Counter").len() + SYMBOL_TRAILER.len());
}

#[test]
fn malformed_body_lines_are_dropped_quietly() {
    let mut index = sample_index();
    let input = symbol_file(&[
        "garbage without markup\r\n".to_string(),
        "<SymbolVarEntry>PLC_PRG.Counter\r\n".to_string(),
        "<SymbolVarEntry></SymbolVarEntry>\r\n".to_string(),
        "\r\n".to_string(),
    ]);
    let (output, copied) = filter(&input, &mut index);

    assert_eq!(output, symbol_file(&[]));
    assert!(copied.is_empty());
    assert_eq!(index.used_count(), 0);
}

#[test]
fn unknown_pou_or_symbol_is_dropped() {
    let mut index = sample_index();
    let input = symbol_file(&[
        entry("MAIN.Counter"),
        entry("PLC_PRG.counter"),
        entry("PLC_PRG.Counter.Sub"),
        entry("Counter"),
    ]);
    let (output, copied) = filter(&input, &mut index);
    assert_eq!(output, symbol_file(&[]));
    assert!(copied.is_empty());
}

#[test]
fn repeated_line_is_copied_each_time() {
    let mut index = sample_index();
    let input = symbol_file(&[entry("Alarm"), entry(".Alarm")]);
    let (output, copied) = filter(&input, &mut index);
    assert_eq!(output, input);
    assert_eq!(copied.len(), 2);
}

#[test]
fn duplicate_variables_only_first_is_marked() {
    let mut index: ProjectIndex = [Pou {
        name: "MAIN".into(),
        variables: vec![Variable::new("X"), Variable::new("X")],
    }]
    .into_iter()
    .collect();
    let input = symbol_file(&[entry("MAIN.X")]);
    let (output, _) = filter(&input, &mut index);
    assert_eq!(output, input);
    let flags: Vec<_> = index
        .pou("MAIN")
        .expect("MAIN")
        .variables
        .iter()
        .map(|variable| variable.used)
        .collect();
    assert_eq!(flags, vec![true, false]);
}

#[test]
fn custom_markers() {
    let format = SymbolFileFormat {
        block_start: "[vars]".into(),
        block_end: "[/vars]".into(),
        ..SymbolFileFormat::default()
    };
    let mut index = sample_index();
    let input = "head\n[vars]\n<v>PLC_PRG.Counter</v>\n<v>PLC_PRG.Nope</v>\n[/vars]\nfoot\n";
    let mut output = Vec::new();
    let report = SymbolFilter::new(&format)
        .run(input.as_bytes(), &mut index, &mut output, &mut |_: &QualifiedName<'_>| {})
        .expect("filter");
    assert_eq!(
        String::from_utf8(output).expect("utf8"),
        "head\n[vars]\n<v>PLC_PRG.Counter</v>\n[/vars]\nfoot\n"
    );
    assert_eq!(report.preamble_lines, 2);
    assert_eq!(report.copied_lines, 1);
    assert_eq!(report.dropped_lines, 1);
    assert_eq!(report.malformed_lines, 0);
    assert_eq!(report.trailer_lines, 2);
}

struct FailingWriter;

impl std::io::Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_failure_is_fatal() {
    let format = SymbolFileFormat::default();
    let mut index = sample_index();
    let input = symbol_file(&[entry("Alarm")]);
    let err = SymbolFilter::new(&format)
        .run(
            input.as_bytes(),
            &mut index,
            FailingWriter,
            &mut |_: &QualifiedName<'_>| {},
        )
        .expect_err("write fails");
    assert!(matches!(err, cse_core::CseError::Io(_)));
}
