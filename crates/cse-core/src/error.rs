//! Errors raised while indexing projects and filtering symbol files.

use smol_str::SmolStr;
use thiserror::Error;

/// Fatal errors for an export run.
///
/// Malformed symbol lines and unused export tags are not errors: the former
/// are dropped by the filter, the latter are reported by [`crate::check`].
#[derive(Debug, Error)]
pub enum CseError {
    /// The project buffer does not start with the expected signature.
    #[error("not a valid CoDeSys project (expected signature '{expected}')")]
    Format {
        /// Signature the buffer was checked against.
        expected: SmolStr,
    },

    /// Read or write failure on one of the streams.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be read or is inconsistent.
    #[error("invalid config '{0}'")]
    InvalidConfig(SmolStr),
}

impl CseError {
    /// Returns true for a project signature mismatch.
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}
