//! Lexer over the textual view of a project file.

use std::ops::Range;

use logos::Logos;

use super::tokens::TokenKind;

/// A token and the text it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    /// Token class.
    pub kind: TokenKind,
    /// Source text of the token.
    pub text: &'src str,
    /// Byte range in the scanned text.
    pub span: Range<usize>,
}

/// Iterator over the tokens of a project text. Unmatched input comes back as
/// `TokenKind::Error` rather than stopping the scan.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
}

impl<'src> Lexer<'src> {
    /// Starts lexing at the beginning of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.inner.next()?.unwrap_or(TokenKind::Error);
        Some(Token {
            kind,
            text: self.inner.slice(),
            span: self.inner.span(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token<'_>> {
        Lexer::new(source).collect()
    }

    #[test]
    fn tokens_carry_text_and_span() {
        let tokens: Vec<_> = lex("Counter : INT;")
            .into_iter()
            .filter(|token| !token.kind.is_whitespace())
            .collect();
        assert_eq!(tokens[0].text, "Counter");
        assert_eq!(tokens[0].span, 0..7);
        assert_eq!(tokens[1].kind, TokenKind::Colon);
        assert_eq!(tokens[3].kind, TokenKind::Semicolon);
    }

    #[test]
    fn lexing_never_stops_on_garbage() {
        let tokens = lex("\u{1}\u{2}PROGRAM\u{3}P");
        let kinds: Vec<_> = tokens.iter().map(|token| token.kind).collect();
        assert!(kinds.contains(&TokenKind::KwProgram));
        assert_eq!(tokens.last().map(|token| token.text), Some("P"));
    }
}
