//! Hot Cocoa Lisp Compiler Driver
//!
//! Compiles `.hcl` source files to sibling `.js` files, following imports.
//!
//! # Architecture
//!
//! ```text
//! Driver::compile(ctx, "main.hcl")
//!     │  normalize path, derive main.js, claim in ctx
//!     ▼
//! read source
//!     │
//!     ▼
//! scan ──► parse ──► analyze ──► generate ──► write main.js
//!                                   │
//!                                   ▼ (import "lib.hcl")
//!                     Driver::compile(ctx, "lib.hcl")   (same ctx)
//! ```
//!
//! The [`CompilationContext`] remembers every file claimed during the run,
//! so each file is compiled at most once and import cycles terminate.

pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod path;
pub mod pipeline;
pub mod reporting;
pub mod testing;
pub mod tracing_setup;

pub use config::CompilerConfig;
pub use context::{CompilationContext, CompiledFileRegistry};
pub use driver::{CompileOutcome, Driver};
pub use error::{CompileError, PipelineError, Stage};
pub use path::CanonicalPath;
pub use pipeline::{HclPipeline, Pipeline};

use hcl_parse::RecursiveDescent;
use std::path::Path;

/// Compile `path` with a fresh context, the default configuration and the
/// recursive descent grammar.
///
/// Returns the context so callers can see which files were compiled.
pub fn compile_file(path: impl AsRef<Path>) -> Result<CompilationContext, CompileError> {
    compile_file_with(path, CompilerConfig::default())
}

/// Like [`compile_file`], with an explicit configuration.
pub fn compile_file_with(
    path: impl AsRef<Path>,
    config: CompilerConfig,
) -> Result<CompilationContext, CompileError> {
    let grammar = RecursiveDescent::new();
    let driver = Driver::<HclPipeline>::new(HclPipeline::new(&config), &grammar, config);
    let mut ctx = CompilationContext::new();
    driver.compile(&mut ctx, path)?;
    Ok(ctx)
}
