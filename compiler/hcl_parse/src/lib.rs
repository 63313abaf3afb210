//! S-expression parser for Hot Cocoa Lisp.
//!
//! The parse stage is parameterised by a [`Grammar`]: the driver is handed a
//! grammar by its caller and passes it to [`parse`] alongside the tokens, so
//! no phase depends on a particular grammar implementation.
//! [`RecursiveDescent`] is the grammar shipped with the compiler.

mod cursor;
mod recursive_descent;

pub use recursive_descent::RecursiveDescent;

use hcl_ir::{Diagnostic, Sexp, TokenList};

/// A grammar turns a token stream into top-level s-expressions.
pub trait Grammar {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Parse every top-level form, failing on the first syntax error.
    fn parse_program(&self, tokens: &TokenList) -> Result<Vec<Sexp>, Diagnostic>;
}

/// Parse `tokens` with `grammar`.
pub fn parse(tokens: &TokenList, grammar: &dyn Grammar) -> Result<Vec<Sexp>, Diagnostic> {
    grammar.parse_program(tokens)
}
