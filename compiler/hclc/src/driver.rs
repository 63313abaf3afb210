//! The compilation driver.
//!
//! `Driver::compile` turns one source file into its sibling output file and,
//! through the import sink handed to the generator, every file it imports.
//!
//! # Claiming
//!
//! A file is claimed in the [`CompilationContext`] *before* it is read. Any
//! later request for the same canonical path (a second import, a diamond, a
//! cycle back to a file still being compiled) returns
//! [`CompileOutcome::AlreadyClaimed`] without doing any work. Claims are
//! never released, not even when the compilation fails.
//!
//! # Errors
//!
//! Every failure is fatal and propagates unchanged through all enclosing
//! imports. Output files already written by finished imports stay on disk.

use std::fs;
use std::path::{Path, PathBuf};

use hcl_ir::stack::ensure_sufficient_stack;
use hcl_ir::{Diagnostic, GenerateError};

use crate::config::CompilerConfig;
use crate::context::CompilationContext;
use crate::error::{CompileError, PipelineError, Stage};
use crate::path::{base_directory, normalize, output_path, CanonicalPath};
use crate::pipeline::Pipeline;

/// What a call to [`Driver::compile`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileOutcome {
    /// The file was compiled and its output written.
    Written {
        source: CanonicalPath,
        output: PathBuf,
    },
    /// The file was claimed earlier in this context; nothing was done.
    AlreadyClaimed(CanonicalPath),
}

impl CompileOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, CompileOutcome::Written { .. })
    }

    pub fn source(&self) -> &CanonicalPath {
        match self {
            CompileOutcome::Written { source, .. } | CompileOutcome::AlreadyClaimed(source) => {
                source
            }
        }
    }

    /// The output file, if this call wrote one.
    pub fn output(&self) -> Option<&Path> {
        match self {
            CompileOutcome::Written { output, .. } => Some(output),
            CompileOutcome::AlreadyClaimed(_) => None,
        }
    }
}

/// Runs a [`Pipeline`] over files, recursing into imports.
///
/// The driver itself is immutable; all run state lives in the
/// [`CompilationContext`] passed to [`Driver::compile`].
pub struct Driver<'g, P: Pipeline> {
    pipeline: P,
    grammar: &'g P::Grammar,
    config: CompilerConfig,
}

impl<'g, P: Pipeline> Driver<'g, P> {
    pub fn new(pipeline: P, grammar: &'g P::Grammar, config: CompilerConfig) -> Self {
        Driver {
            pipeline,
            grammar,
            config,
        }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Compile `path` and, transitively, everything it imports.
    ///
    /// The output name is checked first: a path without the source
    /// extension fails with [`CompileError::InvalidExtension`] and claims
    /// nothing.
    pub fn compile(
        &self,
        ctx: &mut CompilationContext,
        path: impl AsRef<Path>,
    ) -> Result<CompileOutcome, CompileError> {
        self.compile_path(ctx, path.as_ref())
    }

    fn compile_path(
        &self,
        ctx: &mut CompilationContext,
        path: &Path,
    ) -> Result<CompileOutcome, CompileError> {
        // The canonical path is only the registry key. Reading, output naming
        // and import resolution go through `path` as given.
        let key = normalize(path);
        let output = output_path(path, &self.config)?;

        if !ctx.claim(key.clone()) {
            tracing::debug!(path = %key, "already claimed, skipping");
            return Ok(CompileOutcome::AlreadyClaimed(key));
        }

        let _span = tracing::debug_span!("compile", path = %key).entered();

        let source = fs::read_to_string(path).map_err(|source| CompileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = base_directory(path);

        let fail = |stage: Stage, diagnostic: Diagnostic| -> CompileError {
            PipelineError {
                stage,
                path: path.to_path_buf(),
                source_text: source.clone(),
                diagnostic,
            }
            .into()
        };

        let tokens = self
            .pipeline
            .scan(&source)
            .map_err(|diag| fail(Stage::Scan, diag))?;
        let raw = self
            .pipeline
            .parse(&tokens, self.grammar)
            .map_err(|diag| fail(Stage::Parse, diag))?;
        let (ast, metadata) = self
            .pipeline
            .analyze(raw)
            .map_err(|diag| fail(Stage::Analyze, diag))?;
        tracing::trace!(?metadata, "analyzed");

        let mut compile_import = |import: &Path| -> Result<(), CompileError> {
            tracing::debug!(import = %import.display(), "compiling import");
            ensure_sufficient_stack(|| self.compile_path(ctx, import)).map(|_| ())
        };
        let generated = match self
            .pipeline
            .generate(&ast, &source, &base_dir, &mut compile_import)
        {
            Ok(text) => text,
            Err(GenerateError::Diagnostic(diag)) => return Err(fail(Stage::Generate, diag)),
            Err(GenerateError::Import(err)) => return Err(err),
        };

        fs::write(&output, generated).map_err(|source| CompileError::Write {
            path: output.clone(),
            source,
        })?;
        tracing::debug!(output = %output.display(), "wrote");
        ctx.record_output(output.clone());

        Ok(CompileOutcome::Written { source: key, output })
    }
}

#[cfg(test)]
mod tests;
