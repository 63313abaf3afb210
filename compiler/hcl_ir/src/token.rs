//! Token types produced by the scanner.

use super::Span;
use std::fmt;

/// A token with its span in the source.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Token kinds for Hot Cocoa Lisp.
///
/// Numbers keep no value: the literal text is recovered from the source via
/// the token span so code generation can emit it verbatim.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `'`
    Quote,
    /// Number literal: `42`, `-3.5`
    Number,
    /// String literal with escapes already cooked.
    Str(String),
    /// Any other atom: `def`, `+`, `empty?`, `console.log`
    Symbol(String),
}

impl TokenKind {
    /// Short human-readable description used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Quote => "`'`",
            TokenKind::Number => "number",
            TokenKind::Str(_) => "string",
            TokenKind::Symbol(_) => "symbol",
        }
    }
}

/// The full token stream for one source file.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
    /// Span of end-of-input, used for "unexpected end of file" reports.
    eof: Span,
}

impl TokenList {
    pub fn new(tokens: Vec<Token>, source_len: u32) -> Self {
        TokenList {
            tokens,
            eof: Span::point(source_len),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Zero-length span at the end of the source.
    pub fn eof_span(&self) -> Span {
        self.eof
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
