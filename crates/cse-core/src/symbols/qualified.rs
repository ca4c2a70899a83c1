//! Qualified symbol names embedded in symbol-file lines.

use std::fmt;

use crate::index::GLOBAL_LABEL;

/// `POU.symbol`, with an empty POU for globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedName<'a> {
    /// POU part before the first `.`; empty for globals.
    pub pou: &'a str,
    /// Variable part, never empty.
    pub symbol: &'a str,
}

impl<'a> QualifiedName<'a> {
    /// Splits on the first `.`. Without one, or with a leading one as in
    /// `.Alarm`, the name is global. Returns `None` for an empty symbol.
    #[must_use]
    pub fn parse(full: &'a str) -> Option<Self> {
        let (pou, symbol) = full.split_once('.').unwrap_or(("", full));
        if symbol.is_empty() {
            return None;
        }
        Some(Self { pou, symbol })
    }

    /// Extracts the name carried by a symbol-file line: the text between the
    /// first `>` and the next `<`.
    ///
    /// Lines without that pair, with nothing in between, or whose name is not
    /// valid UTF-8 yield `None`.
    #[must_use]
    pub fn from_line(line: &'a [u8]) -> Option<Self> {
        let open = line.iter().position(|&byte| byte == b'>')? + 1;
        let rest = &line[open..];
        let close = rest.iter().position(|&byte| byte == b'<')?;
        let full = std::str::from_utf8(&rest[..close]).ok()?;
        Self::parse(full)
    }

    /// Returns true when the name has no POU part.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.pou.is_empty()
    }
}

impl fmt::Display for QualifiedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_global() {
            write!(f, "{GLOBAL_LABEL}.{}", self.symbol)
        } else {
            write!(f, "{}.{}", self.pou, self.symbol)
        }
    }
}
