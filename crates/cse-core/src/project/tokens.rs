//! Token kinds for the declaration text embedded in project files.
//!
//! Only the handful of keywords that delimit POUs and variable sections are
//! distinguished; everything else is an identifier, punctuation, trivia or an
//! error byte that the scanner skips.

use logos::Logos;

/// Control bytes that never occur in declaration text. A comment or pragma
/// opener followed by one of these came from binary object data.
fn is_binary_byte(byte: u8) -> bool {
    matches!(byte, 0x00..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F)
}

fn lex_block_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let bytes = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0usize;

    while i + 1 < bytes.len() && !is_binary_byte(bytes[i]) {
        match (bytes[i], bytes[i + 1]) {
            (b'(', b'*') => {
                depth += 1;
                i += 2;
            }
            (b'*', b')') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    lex.bump(i);
                    return true;
                }
            }
            _ => i += 1,
        }
    }

    // Unterminated: only the opener becomes an error token.
    false
}

fn lex_pragma(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let bytes = lex.remainder().as_bytes();
    for (i, &byte) in bytes.iter().enumerate() {
        match byte {
            b'}' => {
                lex.bump(i + 1);
                return true;
            }
            b'\n' | b'\r' => return false,
            byte if is_binary_byte(byte) => return false,
            _ => {}
        }
    }
    false
}

fn lex_string(lex: &mut logos::Lexer<TokenKind>) -> bool {
    // String literals never span lines in declaration text.
    let rest = lex.remainder();
    match rest.find(['\'', '\n', '\r']) {
        Some(end) if rest[end..].starts_with('\'') => {
            lex.bump(end + 1);
            true
        }
        _ => false,
    }
}

/// Tokens recognized inside a project file.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Spaces, tabs and form feeds.
    #[regex(r"[ \t\x0C]+")]
    Whitespace,

    /// Line break.
    #[regex(r"\r\n|\n|\r")]
    Newline,

    /// `(* ... *)`, nesting allowed. Never spans a binary control byte.
    #[token("(*", lex_block_comment)]
    BlockComment,

    /// `{ ... }` on one line.
    #[token("{", lex_pragma)]
    Pragma,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    /// `;`
    #[token(";")]
    Semicolon,

    /// `:`
    #[token(":")]
    Colon,

    /// `:=`
    #[token(":=")]
    Assign,

    /// `,`
    #[token(",")]
    Comma,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    /// `PROGRAM`
    #[token("PROGRAM", ignore(ascii_case))]
    KwProgram,

    /// `FUNCTION`
    #[token("FUNCTION", ignore(ascii_case))]
    KwFunction,

    /// `FUNCTION_BLOCK`
    #[token("FUNCTION_BLOCK", ignore(ascii_case))]
    KwFunctionBlock,

    /// `END_PROGRAM`, `END_FUNCTION`, `END_FUNCTION_BLOCK`
    #[token("END_PROGRAM", ignore(ascii_case))]
    #[token("END_FUNCTION", ignore(ascii_case))]
    #[token("END_FUNCTION_BLOCK", ignore(ascii_case))]
    KwEndPou,

    /// `VAR_GLOBAL`
    #[token("VAR_GLOBAL", ignore(ascii_case))]
    KwVarGlobal,

    /// Any section opener other than `VAR_GLOBAL`.
    #[token("VAR", ignore(ascii_case))]
    #[token("VAR_INPUT", ignore(ascii_case))]
    #[token("VAR_OUTPUT", ignore(ascii_case))]
    #[token("VAR_IN_OUT", ignore(ascii_case))]
    #[token("VAR_TEMP", ignore(ascii_case))]
    #[token("VAR_STAT", ignore(ascii_case))]
    #[token("VAR_EXTERNAL", ignore(ascii_case))]
    #[token("VAR_CONFIG", ignore(ascii_case))]
    #[token("VAR_ACCESS", ignore(ascii_case))]
    KwVar,

    /// `END_VAR`
    #[token("END_VAR", ignore(ascii_case))]
    KwEndVar,

    /// `TYPE`
    #[token("TYPE", ignore(ascii_case))]
    KwType,

    /// `END_TYPE`
    #[token("END_TYPE", ignore(ascii_case))]
    KwEndType,

    /// `AT`
    #[token("AT", ignore(ascii_case))]
    KwAt,

    /// Section qualifiers: `CONSTANT`, `RETAIN`, `PERSISTENT`.
    #[token("CONSTANT", ignore(ascii_case))]
    #[token("RETAIN", ignore(ascii_case))]
    #[token("PERSISTENT", ignore(ascii_case))]
    KwQualifier,

    // =========================================================================
    // LITERALS & IDENTIFIERS
    // =========================================================================
    /// Single-quoted string on one line.
    #[token("'", lex_string)]
    StringLiteral,

    /// Decimal integer.
    #[regex(r"[0-9][0-9_]*")]
    IntLiteral,

    /// `%IX0.1`, `%QW4`, `%MD12`, `%I*`
    #[regex(r"%[IQMiqm][XBWDLxbwdl]?[0-9]+(\.[0-9]+)*")]
    #[regex(r"%[IQMiqm]\*")]
    DirectAddress,

    /// Identifier.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    /// Text not matched by any rule (binary data, unsupported punctuation).
    Error,
}

impl TokenKind {
    /// Tokens with no meaning for declaration scanning, comments excluded.
    #[must_use]
    pub fn is_whitespace(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline)
    }

    /// Comments and pragmas, the only places an export tag is looked for.
    #[must_use]
    pub fn is_annotation(self) -> bool {
        matches!(self, Self::BlockComment | Self::Pragma)
    }

    /// Keywords that introduce a named POU.
    #[must_use]
    pub fn is_pou_header(self) -> bool {
        matches!(
            self,
            Self::KwProgram | Self::KwFunction | Self::KwFunctionBlock
        )
    }
}
