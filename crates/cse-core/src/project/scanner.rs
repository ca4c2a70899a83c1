//! Export-tag scanner: a state machine over project tokens.
//!
//! The scanner tracks the current POU scope, whether it is inside a variable
//! section, the declaration being read, and whether an export tag is waiting
//! for the next declaration. Nothing else of the project grammar is modeled.

use smol_str::SmolStr;
use tracing::{debug, trace};

use super::lexer::{Lexer, Token};
use super::tokens::TokenKind;
use crate::index::{pou_label, ProjectIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// POU bodies, headers and anything between declarations.
    Code,
    /// `VAR ... END_VAR` and friends.
    Vars,
    /// `TYPE ... END_TYPE`; structure members are never symbols.
    Types,
}

/// Progress through `name {, name} [AT address] : type [:= init] ;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decl {
    Idle,
    Names { expect_name: bool },
    Address,
    Type,
}

/// Declaration finished on the current line; a tag after its `;` applies to it.
#[derive(Debug)]
struct LineDecl {
    names: Vec<SmolStr>,
    exported: bool,
}

pub(crate) struct Scanner<'a> {
    tag: &'a str,
    index: ProjectIndex,
    scope: SmolStr,
    section: Section,
    awaiting_pou_name: bool,
    decl: Decl,
    names: Vec<SmolStr>,
    decl_tagged: bool,
    pending_tag: bool,
    line_decl: Option<LineDecl>,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(tag: &'a str) -> Self {
        Self {
            tag,
            index: ProjectIndex::new(),
            scope: SmolStr::default(),
            section: Section::Code,
            awaiting_pou_name: false,
            decl: Decl::Idle,
            names: Vec::new(),
            decl_tagged: false,
            pending_tag: false,
            line_decl: None,
        }
    }

    pub(crate) fn scan(mut self, source: &str) -> ProjectIndex {
        for token in Lexer::new(source) {
            self.token(&token);
        }
        self.index
    }

    fn token(&mut self, token: &Token<'_>) {
        if self.awaiting_pou_name && !token.kind.is_whitespace() && !token.kind.is_annotation()
        {
            self.awaiting_pou_name = false;
            if token.kind == TokenKind::Ident {
                self.enter_scope(token.text);
                return;
            }
        }

        match token.kind {
            TokenKind::Newline => self.line_decl = None,
            TokenKind::Whitespace => {}
            kind if kind.is_annotation() => {
                if token.text.contains(self.tag) {
                    self.tag_seen();
                }
            }
            kind if kind.is_pou_header() => {
                self.switch_section(Section::Code);
                self.awaiting_pou_name = true;
            }
            TokenKind::KwEndPou | TokenKind::KwEndVar | TokenKind::KwEndType => {
                self.switch_section(Section::Code);
            }
            TokenKind::KwVarGlobal => {
                self.enter_scope("");
                self.switch_section(Section::Vars);
            }
            TokenKind::KwVar => self.switch_section(Section::Vars),
            TokenKind::KwType => self.switch_section(Section::Types),
            _ if self.section == Section::Vars => self.declaration_token(token),
            _ => {}
        }
    }

    fn enter_scope(&mut self, name: &str) {
        debug!(pou = pou_label(name), "entering POU scope");
        self.scope = SmolStr::new(name);
        self.index.pou_entry(name);
    }

    fn switch_section(&mut self, section: Section) {
        self.section = section;
        self.reset_decl();
        self.pending_tag = false;
        self.line_decl = None;
    }

    fn reset_decl(&mut self) {
        self.decl = Decl::Idle;
        self.names.clear();
        self.decl_tagged = false;
    }

    fn tag_seen(&mut self) {
        if self.section != Section::Vars {
            trace!("export tag outside a variable section ignored");
            return;
        }
        if self.decl != Decl::Idle {
            self.decl_tagged = true;
            return;
        }
        match self.line_decl.take() {
            Some(line) if !line.exported => {
                self.export(&line.names);
                self.line_decl = Some(LineDecl {
                    names: line.names,
                    exported: true,
                });
            }
            line => {
                self.line_decl = line;
                self.pending_tag = true;
            }
        }
    }

    fn declaration_token(&mut self, token: &Token<'_>) {
        match (self.decl, token.kind) {
            (Decl::Names { expect_name: true }, TokenKind::Ident) => {
                self.names.push(SmolStr::new(token.text));
                self.decl = Decl::Names { expect_name: false };
            }
            // A name not preceded by a comma starts over: whatever came
            // before was not a declaration.
            (Decl::Idle | Decl::Names { expect_name: false }, TokenKind::Ident) => {
                self.names.clear();
                self.names.push(SmolStr::new(token.text));
                self.decl = Decl::Names { expect_name: false };
            }
            (Decl::Names { expect_name: false }, TokenKind::Comma) => {
                self.decl = Decl::Names { expect_name: true };
            }
            (Decl::Names { expect_name: false }, TokenKind::KwAt) => self.decl = Decl::Address,
            (Decl::Names { expect_name: false } | Decl::Address, TokenKind::Colon) => {
                self.decl = Decl::Type;
            }
            (Decl::Type, TokenKind::Semicolon) => self.complete_decl(),
            (Decl::Address | Decl::Type, _) | (Decl::Idle, TokenKind::KwQualifier) => {}
            _ => self.reset_decl(),
        }
    }

    fn complete_decl(&mut self) {
        let names = std::mem::take(&mut self.names);
        let exported = self.decl_tagged || self.pending_tag;
        self.pending_tag = false;
        self.reset_decl();
        if exported {
            self.export(&names);
        }
        self.line_decl = Some(LineDecl { names, exported });
    }

    fn export(&mut self, names: &[SmolStr]) {
        for name in names {
            debug!(pou = pou_label(&self.scope), variable = %name, "export tag found");
            self.index.push_variable(&self.scope, name.clone());
        }
    }
}
