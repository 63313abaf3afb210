//! The default recursive-descent grammar.
//!
//! ```text
//! program := datum*
//! datum   := atom | '(' datum* ')' | '[' datum* ']' | '\'' datum
//! atom    := number | string | symbol
//! ```
//!
//! `'x` is sugar for `(quote x)`.

use crate::cursor::Cursor;
use crate::Grammar;
use hcl_ir::stack::ensure_sufficient_stack;
use hcl_ir::{Diagnostic, ErrorCode, Sexp, SexpKind, Span, Token, TokenKind, TokenList};

/// Recursive-descent s-expression grammar with a nesting limit.
#[derive(Clone, Debug)]
pub struct RecursiveDescent {
    max_depth: usize,
}

impl RecursiveDescent {
    pub const DEFAULT_MAX_DEPTH: usize = 512;

    pub fn new() -> Self {
        RecursiveDescent {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how deeply lists, vectors and quotes may nest.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for RecursiveDescent {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar for RecursiveDescent {
    fn name(&self) -> &'static str {
        "recursive-descent"
    }

    fn parse_program(&self, tokens: &TokenList) -> Result<Vec<Sexp>, Diagnostic> {
        let mut parser = Parser {
            cursor: Cursor::new(tokens),
            max_depth: self.max_depth,
        };
        let mut forms = Vec::new();
        while !parser.cursor.is_at_end() {
            forms.push(parser.datum(0)?);
        }
        Ok(forms)
    }
}

struct Parser<'a> {
    cursor: Cursor<'a>,
    max_depth: usize,
}

impl Parser<'_> {
    fn datum(&mut self, depth: usize) -> Result<Sexp, Diagnostic> {
        ensure_sufficient_stack(|| self.datum_inner(depth))
    }

    fn datum_inner(&mut self, depth: usize) -> Result<Sexp, Diagnostic> {
        let Some(token) = self.cursor.bump() else {
            return Err(Diagnostic::error(
                ErrorCode::E2001,
                "unexpected end of file",
                self.cursor.eof_span(),
            ));
        };

        if depth >= self.max_depth
            && matches!(
                token.kind,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::Quote
            )
        {
            return Err(Diagnostic::error(
                ErrorCode::E2003,
                format!("nesting deeper than {} levels", self.max_depth),
                token.span,
            ));
        }

        match &token.kind {
            TokenKind::Number => Ok(Sexp::new(SexpKind::Number, token.span)),
            TokenKind::Str(value) => Ok(Sexp::new(SexpKind::Str(value.clone()), token.span)),
            TokenKind::Symbol(name) => Ok(Sexp::new(SexpKind::Symbol(name.clone()), token.span)),
            TokenKind::LParen => {
                let (items, span) = self.sequence(token, &TokenKind::RParen, depth)?;
                Ok(Sexp::new(SexpKind::List(items), span))
            }
            TokenKind::LBracket => {
                let (items, span) = self.sequence(token, &TokenKind::RBracket, depth)?;
                Ok(Sexp::new(SexpKind::Vector(items), span))
            }
            TokenKind::Quote => self.quoted(token.span, depth),
            TokenKind::RParen | TokenKind::RBracket => Err(Diagnostic::error(
                ErrorCode::E2002,
                format!("unexpected closing {}", token.kind.describe()),
                token.span,
            )),
        }
    }

    /// Items up to and including `closer`. Returns the items and the span
    /// from `open` through the closer.
    fn sequence(
        &mut self,
        open: &Token,
        closer: &TokenKind,
        depth: usize,
    ) -> Result<(Vec<Sexp>, Span), Diagnostic> {
        let mut items = Vec::new();
        loop {
            match self.cursor.peek() {
                None => {
                    return Err(Diagnostic::error(
                        ErrorCode::E2001,
                        format!("unclosed {}", open.kind.describe()),
                        open.span,
                    )
                    .with_note(format!(
                        "expected {} before end of file",
                        closer.describe()
                    )));
                }
                Some(token) if token.kind == *closer => {
                    self.cursor.bump();
                    return Ok((items, open.span.merge(token.span)));
                }
                Some(token) if matches!(token.kind, TokenKind::RParen | TokenKind::RBracket) => {
                    return Err(Diagnostic::error(
                        ErrorCode::E2002,
                        format!(
                            "mismatched closing {}, expected {}",
                            token.kind.describe(),
                            closer.describe()
                        ),
                        token.span,
                    )
                    .with_note(format!("{} opened at {}", open.kind.describe(), open.span)));
                }
                Some(_) => items.push(self.datum(depth + 1)?),
            }
        }
    }

    fn quoted(&mut self, quote_span: Span, depth: usize) -> Result<Sexp, Diagnostic> {
        match self.cursor.peek().map(|t| &t.kind) {
            None | Some(TokenKind::RParen | TokenKind::RBracket) => {
                return Err(Diagnostic::error(
                    ErrorCode::E2004,
                    "nothing to quote after `'`",
                    quote_span,
                ));
            }
            Some(_) => {}
        }
        let datum = self.datum(depth + 1)?;
        let span = quote_span.merge(datum.span);
        let head = Sexp::new(SexpKind::Symbol("quote".to_string()), quote_span);
        Ok(Sexp::new(SexpKind::List(vec![head, datum]), span))
    }
}
