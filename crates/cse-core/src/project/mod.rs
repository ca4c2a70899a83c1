//! Project file indexing.
//!
//! A CoDeSys 2.3 project is a binary container with the declaration text of
//! every POU and global variable list stored inline. The indexer checks the
//! signature, views the rest of the buffer as text and runs the export-tag
//! scanner over it.

mod lexer;
mod scanner;
mod tokens;

pub use lexer::{Lexer, Token};
pub use tokens::TokenKind;

use smol_str::SmolStr;
use tracing::debug;

use crate::config::ProjectFormat;
use crate::error::CseError;
use crate::index::ProjectIndex;

/// Fails with [`CseError::Format`] unless `buffer` starts with `signature`.
pub fn check_signature(buffer: &[u8], signature: &str) -> Result<(), CseError> {
    if buffer.starts_with(signature.as_bytes()) {
        Ok(())
    } else {
        Err(CseError::Format {
            expected: SmolStr::new(signature),
        })
    }
}

/// Builds the export index of a project buffer.
///
/// The signature is checked before anything is scanned. Past it the scan is
/// tolerant: unrecognized or binary content is skipped and never fails.
/// The buffer is not modified and every returned variable starts unused.
pub fn index_project(buffer: &[u8], format: &ProjectFormat) -> Result<ProjectIndex, CseError> {
    check_signature(buffer, &format.signature)?;
    let body = &buffer[format.signature.len()..];
    let text = String::from_utf8_lossy(body);
    let index = scanner::Scanner::new(&format.export_tag).scan(&text);
    debug!(
        pous = index.len(),
        variables = index.variable_count(),
        "project indexed"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_a_byte_prefix() {
        assert!(check_signature(b"CoDeSys+\x00\x01", "CoDeSys+").is_ok());
        assert!(check_signature(b"CoDeSys", "CoDeSys+").is_err());
        assert!(check_signature(b" CoDeSys+", "CoDeSys+").is_err());
        assert!(check_signature(b"codesys+", "CoDeSys+").is_err());
    }

    #[test]
    fn missing_signature_is_a_format_error() {
        let err = index_project(b"PROGRAM P", &ProjectFormat::default()).expect_err("no signature");
        assert!(err.is_format());
    }

    #[test]
    fn signature_bytes_are_not_scanned() {
        let format = ProjectFormat {
            signature: SmolStr::new("VAR_GLOBAL"),
            ..ProjectFormat::default()
        };
        let index = index_project(b"VAR_GLOBAL\nA : INT; (*@EXPORT*)\nEND_VAR", &format)
            .expect("index");
        assert!(index.pou("").is_none());
    }
}
