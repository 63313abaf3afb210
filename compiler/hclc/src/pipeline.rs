//! The language pipeline the driver runs for each file.
//!
//! The driver only sequences stages; what a stage does is up to the
//! [`Pipeline`] implementation. [`HclPipeline`] wires the Hot Cocoa Lisp
//! crates together. Tests substitute [`crate::testing::ScriptedPipeline`].

use std::fmt;
use std::path::Path;

use hcl_codegen::CodegenOptions;
use hcl_ir::{Diagnostic, GenerateError, ImportSink, Module, ModuleInfo, Sexp, TokenList};

use crate::config::CompilerConfig;
use crate::error::CompileError;

/// Scan, parse, analyze and generate one source file.
///
/// Stages run in order; each consumes the previous stage's output. The
/// first failing stage ends the compilation of that file.
pub trait Pipeline {
    /// Grammar handed to [`Pipeline::parse`] by the driver's caller.
    type Grammar: ?Sized;
    type Tokens;
    /// Parse output, before analysis.
    type RawAst;
    /// Analyzed program, input to generation.
    type Ast;
    /// Analysis by-product. The driver only logs it.
    type Metadata: fmt::Debug;

    fn scan(&self, source: &str) -> Result<Self::Tokens, Diagnostic>;

    fn parse(
        &self,
        tokens: &Self::Tokens,
        grammar: &Self::Grammar,
    ) -> Result<Self::RawAst, Diagnostic>;

    fn analyze(&self, raw: Self::RawAst) -> Result<(Self::Ast, Self::Metadata), Diagnostic>;

    /// Produce the output text.
    ///
    /// Every import must be passed to `imports` before this returns; the
    /// driver compiles it re-entrantly with the same context.
    fn generate(
        &self,
        ast: &Self::Ast,
        source: &str,
        base_dir: &Path,
        imports: &mut dyn ImportSink<Error = CompileError>,
    ) -> Result<String, GenerateError<CompileError>>;
}

/// The Hot Cocoa Lisp pipeline: `hcl_lexer` → `hcl_parse` → `hcl_analyze`
/// → `hcl_codegen`.
#[derive(Clone, Debug, Default)]
pub struct HclPipeline {
    codegen: CodegenOptions,
}

impl HclPipeline {
    pub fn new(config: &CompilerConfig) -> Self {
        HclPipeline {
            codegen: config.codegen_options(),
        }
    }
}

impl Pipeline for HclPipeline {
    type Grammar = dyn hcl_parse::Grammar;
    type Tokens = TokenList;
    type RawAst = Vec<Sexp>;
    type Ast = Module;
    type Metadata = ModuleInfo;

    fn scan(&self, source: &str) -> Result<TokenList, Diagnostic> {
        hcl_lexer::scan(source)
    }

    fn parse(
        &self,
        tokens: &TokenList,
        grammar: &dyn hcl_parse::Grammar,
    ) -> Result<Vec<Sexp>, Diagnostic> {
        tracing::trace!(grammar = grammar.name(), tokens = tokens.len(), "parsing");
        hcl_parse::parse(tokens, grammar)
    }

    fn analyze(&self, raw: Vec<Sexp>) -> Result<(Module, ModuleInfo), Diagnostic> {
        hcl_analyze::analyze(raw)
    }

    fn generate(
        &self,
        ast: &Module,
        source: &str,
        base_dir: &Path,
        imports: &mut dyn ImportSink<Error = CompileError>,
    ) -> Result<String, GenerateError<CompileError>> {
        hcl_codegen::generate(ast, source, base_dir, &self.codegen, imports)
    }
}
