//! Scanner for Hot Cocoa Lisp using logos.
//!
//! Produces a [`TokenList`] or the first lexical error. Whitespace and
//! `;` line comments are skipped; string escapes are cooked here so later
//! phases only ever see final string values.

use hcl_ir::{Diagnostic, ErrorCode, Span, Token, TokenKind, TokenList};
use logos::Logos;

/// Raw token from logos (before escape cooking).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r";[^\n]*")]
enum RawToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("'")]
    Quote,

    // Wins over Symbol on equal length so `-5` is a number and `-` a symbol.
    #[regex(r"-?[0-9]+(\.[0-9]+)?", priority = 10)]
    Number,

    // String literal (no unescaped newlines allowed)
    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    Str,

    // Opening quote with no closing quote on the same line
    #[regex(r#""([^"\\\n\r]|\\.)*"#)]
    UnterminatedStr,

    #[regex(r"[A-Za-z_+\-*/<>=!?%&.$][A-Za-z0-9_+\-*/<>=!?%&.$]*")]
    Symbol,
}

/// Scan source text into tokens.
///
/// Stops at the first lexical error.
pub fn scan(source: &str) -> Result<TokenList, Diagnostic> {
    let source_len = span_of(0..source.len())?.end;
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(raw) = lexer.next() {
        let span = span_of(lexer.span())?;
        let slice = lexer.slice();
        let kind = match raw {
            Ok(RawToken::LParen) => TokenKind::LParen,
            Ok(RawToken::RParen) => TokenKind::RParen,
            Ok(RawToken::LBracket) => TokenKind::LBracket,
            Ok(RawToken::RBracket) => TokenKind::RBracket,
            Ok(RawToken::Quote) => TokenKind::Quote,
            Ok(RawToken::Number) => TokenKind::Number,
            Ok(RawToken::Str) => TokenKind::Str(cook_string(slice, span)?),
            Ok(RawToken::Symbol) => TokenKind::Symbol(slice.to_string()),
            Ok(RawToken::UnterminatedStr) => {
                return Err(Diagnostic::error(
                    ErrorCode::E1002,
                    "unterminated string literal",
                    span,
                )
                .with_note("strings must close on the line they open"));
            }
            Err(()) => {
                return Err(Diagnostic::error(
                    ErrorCode::E1001,
                    format!("unexpected character `{}`", slice.escape_debug()),
                    span,
                ));
            }
        };
        tokens.push(Token::new(kind, span));
    }

    Ok(TokenList::new(tokens, source_len))
}

fn span_of(range: std::ops::Range<usize>) -> Result<Span, Diagnostic> {
    Span::try_from_range(range).map_err(|e| {
        Diagnostic::error(
            ErrorCode::E1001,
            format!("source file too large: {e}"),
            Span::DUMMY,
        )
    })
}

/// Strip the quotes from a string literal and resolve its escapes.
fn cook_string(literal: &str, span: Span) -> Result<String, Diagnostic> {
    let body = &literal[1..literal.len() - 1];
    let mut cooked = String::with_capacity(body.len());
    let mut chars = body.char_indices();

    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            cooked.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some((_, 'n')) => '\n',
            Some((_, 't')) => '\t',
            Some((_, 'r')) => '\r',
            Some((_, '0')) => '\0',
            Some((_, '"')) => '"',
            Some((_, '\\')) => '\\',
            other => {
                // +1 for the opening quote
                let start = span.start + u32::try_from(offset).unwrap_or(0) + 1;
                let width = other.map_or(1, |(_, c)| 1 + c.len_utf8());
                return Err(Diagnostic::error(
                    ErrorCode::E1003,
                    "invalid escape sequence",
                    Span::new(start, start + u32::try_from(width).unwrap_or(1)),
                )
                .with_note("valid escapes are \\n \\t \\r \\0 \\\" and \\\\"));
            }
        };
        cooked.push(escaped);
    }

    Ok(cooked)
}
