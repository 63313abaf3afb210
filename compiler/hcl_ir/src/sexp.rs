//! Raw s-expressions, the output of parsing.
//!
//! A `Sexp` is purely syntactic: `(def x 1)` is a list of three items, with
//! no knowledge yet that `def` is a special form.

use super::Span;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sexp {
    pub kind: SexpKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SexpKind {
    /// Number literal; text lives in the source under `span`.
    Number,
    Str(String),
    Symbol(String),
    /// `( ... )`
    List(Vec<Sexp>),
    /// `[ ... ]`
    Vector(Vec<Sexp>),
}

impl Sexp {
    pub fn new(kind: SexpKind, span: Span) -> Self {
        Sexp { kind, span }
    }

    /// The symbol name, if this is a symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match &self.kind {
            SexpKind::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// The list items, if this is a `( ... )` list.
    pub fn as_list(&self) -> Option<&[Sexp]> {
        match &self.kind {
            SexpKind::List(items) => Some(items),
            _ => None,
        }
    }
}
