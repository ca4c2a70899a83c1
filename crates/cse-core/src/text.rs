/// Byte substring search used for marker detection.
pub(crate) fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::contains;

    #[test]
    fn substring_search() {
        assert!(contains(b"  <SymbolVarList>\r\n", b"<SymbolVarList>"));
        assert!(!contains(b"<Symbol", b"<SymbolVarList>"));
        assert!(contains(b"", b""));
    }
}
