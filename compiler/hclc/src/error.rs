//! Compilation failures.
//!
//! Every variant is fatal. The driver never recovers from an error, never
//! retries, and never un-claims a file whose compilation failed.

use std::fmt;
use std::io;
use std::path::PathBuf;

use hcl_ir::Diagnostic;

/// The pipeline stage a diagnostic came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Scan,
    Parse,
    Analyze,
    Generate,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Scan => "scan",
            Stage::Parse => "parse",
            Stage::Analyze => "analyze",
            Stage::Generate => "generate",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pipeline stage rejected a source file.
///
/// Keeps the source text so the failure can be rendered with a snippet
/// without reading the file again.
#[derive(Debug, thiserror::Error)]
#[error("{}: {stage} failed: {diagnostic}", .path.display())]
pub struct PipelineError {
    pub stage: Stage,
    pub path: PathBuf,
    pub source_text: String,
    pub diagnostic: Diagnostic,
}

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The source file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Scanning, parsing, analysis or generation failed.
    #[error(transparent)]
    Pipeline(Box<PipelineError>),

    /// The generated output could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The path does not name a source file, so no output name exists.
    #[error("{} is not a `.{expected}` source file", .path.display())]
    InvalidExtension { path: PathBuf, expected: String },
}

impl From<PipelineError> for CompileError {
    fn from(err: PipelineError) -> Self {
        CompileError::Pipeline(Box::new(err))
    }
}

impl CompileError {
    /// The pipeline failure, if this is one.
    pub fn as_pipeline(&self) -> Option<&PipelineError> {
        match self {
            CompileError::Pipeline(err) => Some(err),
            _ => None,
        }
    }
}
