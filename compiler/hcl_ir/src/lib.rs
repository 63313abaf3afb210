//! Intermediate representation shared by every phase of the Hot Cocoa Lisp
//! compiler.
//!
//! # Architecture
//!
//! ```text
//! source text
//!     │  hcl_lexer::scan
//!     ▼
//! TokenList
//!     │  hcl_parse::parse (with an injected Grammar)
//!     ▼
//! Vec<Sexp>            raw s-expressions
//!     │  hcl_analyze::analyze
//!     ▼
//! Module + ModuleInfo  special forms resolved
//!     │  hcl_codegen::generate (may re-enter the driver via ImportSink)
//!     ▼
//! JavaScript text
//! ```
//!
//! Every phase reports failure as a single [`Diagnostic`]; the pipeline does
//! not recover from errors.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod diagnostic;
mod error_code;
mod import;
pub mod sexp;
mod span;
pub mod stack;
mod token;

pub use ast::{BinaryOp, Expr, ExprKind, Module, ModuleInfo};
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use import::{GenerateError, ImportSink};
pub use sexp::{Sexp, SexpKind};
pub use span::{LineIndex, Span, SpanError};
pub use token::{Token, TokenKind, TokenList};
