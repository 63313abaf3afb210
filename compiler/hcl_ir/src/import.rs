//! The re-entry seam between code generation and the driver.
//!
//! Generating a module that imports another module must make sure the
//! imported file is compiled too. The generator does not know how; it asks
//! an [`ImportSink`], which the driver implements by recursing into its own
//! `compile` with the shared compilation context.

use super::Diagnostic;
use std::fmt;
use std::path::Path;

/// Receives the resolved path of every import met during generation.
pub trait ImportSink {
    type Error;

    /// Make sure `path` is (or has been) compiled.
    ///
    /// Called before the importing module's output is returned, so the
    /// imported file may be compiled, skipped as already claimed, or fail.
    fn compile_import(&mut self, path: &Path) -> Result<(), Self::Error>;
}

impl<F, E> ImportSink for F
where
    F: FnMut(&Path) -> Result<(), E>,
{
    type Error = E;

    fn compile_import(&mut self, path: &Path) -> Result<(), E> {
        self(path)
    }
}

/// Failure of the generate stage.
///
/// `Import` carries the sink's error untouched so a failure deep in an
/// import chain reaches the caller exactly as it was raised.
#[derive(Debug)]
pub enum GenerateError<E> {
    /// The generator itself rejected the module.
    Diagnostic(Diagnostic),
    /// Compiling an imported module failed.
    Import(E),
}

impl<E> From<Diagnostic> for GenerateError<E> {
    fn from(diag: Diagnostic) -> Self {
        GenerateError::Diagnostic(diag)
    }
}

impl<E: fmt::Display> fmt::Display for GenerateError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Diagnostic(diag) => diag.fmt(f),
            GenerateError::Import(err) => err.fmt(f),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for GenerateError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Diagnostic(diag) => Some(diag),
            GenerateError::Import(err) => Some(err),
        }
    }
}
