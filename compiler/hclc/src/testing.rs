//! Test support: a line-oriented pipeline with observable stage calls.
//!
//! [`ScriptedPipeline`] lets driver behavior (claiming, deduplication,
//! cycles, error propagation) be tested without going through the Hot Cocoa
//! Lisp front end. Each source line is one of:
//!
//! - `import <path>`: an import resolved against the file's directory
//! - `fail <stage>`: make that stage (`scan`, `parse`, `analyze`,
//!   `generate`) fail with a diagnostic pointing at the line
//! - anything else: copied to the output unchanged
//!
//! Generation reports every import to the sink first, then emits
//! `require <path>` for each import line and the copied text.

use std::cell::Cell;
use std::path::Path;

use hcl_ir::{Diagnostic, ErrorCode, GenerateError, ImportSink, Span};

use crate::error::{CompileError, Stage};
use crate::pipeline::Pipeline;

/// One scripted source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptLine {
    Import(String),
    Fail(Stage),
    Text(String),
}

/// A line with its byte span in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptItem {
    pub line: ScriptLine,
    pub span: Span,
}

/// Counts of stage invocations across every file a driver compiled.
#[derive(Debug, Default)]
pub struct ScriptedPipeline {
    scans: Cell<usize>,
    parses: Cell<usize>,
    analyses: Cell<usize>,
    generations: Cell<usize>,
}

impl ScriptedPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scans(&self) -> usize {
        self.scans.get()
    }

    pub fn parses(&self) -> usize {
        self.parses.get()
    }

    pub fn analyses(&self) -> usize {
        self.analyses.get()
    }

    pub fn generations(&self) -> usize {
        self.generations.get()
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

fn stage_failure(stage: Stage, span: Span) -> Diagnostic {
    let code = match stage {
        Stage::Scan => ErrorCode::E1001,
        Stage::Parse => ErrorCode::E2001,
        Stage::Analyze => ErrorCode::E3001,
        Stage::Generate => ErrorCode::E4001,
    };
    Diagnostic::error(code, format!("scripted {stage} failure"), span)
}

fn fails_at(items: &[ScriptItem], stage: Stage) -> Option<Span> {
    items
        .iter()
        .find(|item| item.line == ScriptLine::Fail(stage))
        .map(|item| item.span)
}

fn parse_stage(name: &str) -> Option<Stage> {
    match name {
        "scan" => Some(Stage::Scan),
        "parse" => Some(Stage::Parse),
        "analyze" => Some(Stage::Analyze),
        "generate" => Some(Stage::Generate),
        _ => None,
    }
}

impl Pipeline for ScriptedPipeline {
    type Grammar = ();
    type Tokens = Vec<ScriptItem>;
    type RawAst = Vec<ScriptItem>;
    type Ast = Vec<ScriptItem>;
    /// Number of imports.
    type Metadata = usize;

    fn scan(&self, source: &str) -> Result<Vec<ScriptItem>, Diagnostic> {
        bump(&self.scans);
        let mut items = Vec::new();
        let mut offset = 0usize;
        for raw in source.split_inclusive('\n') {
            let text = raw.trim_end_matches(['\n', '\r']);
            let start = u32::try_from(offset).unwrap_or(u32::MAX);
            let end = u32::try_from(offset + text.len()).unwrap_or(u32::MAX);
            let span = Span::new(start, end);
            offset += raw.len();

            let line = if let Some(path) = text.strip_prefix("import ") {
                ScriptLine::Import(path.trim().to_string())
            } else if let Some(stage) = text.strip_prefix("fail ").and_then(parse_stage) {
                ScriptLine::Fail(stage)
            } else {
                ScriptLine::Text(text.to_string())
            };
            items.push(ScriptItem { line, span });
        }

        match fails_at(&items, Stage::Scan) {
            Some(span) => Err(stage_failure(Stage::Scan, span)),
            None => Ok(items),
        }
    }

    fn parse(&self, tokens: &Vec<ScriptItem>, (): &()) -> Result<Vec<ScriptItem>, Diagnostic> {
        bump(&self.parses);
        match fails_at(tokens, Stage::Parse) {
            Some(span) => Err(stage_failure(Stage::Parse, span)),
            None => Ok(tokens.clone()),
        }
    }

    fn analyze(&self, raw: Vec<ScriptItem>) -> Result<(Vec<ScriptItem>, usize), Diagnostic> {
        bump(&self.analyses);
        if let Some(span) = fails_at(&raw, Stage::Analyze) {
            return Err(stage_failure(Stage::Analyze, span));
        }
        let imports = raw
            .iter()
            .filter(|item| matches!(item.line, ScriptLine::Import(_)))
            .count();
        Ok((raw, imports))
    }

    fn generate(
        &self,
        ast: &Vec<ScriptItem>,
        _source: &str,
        base_dir: &Path,
        imports: &mut dyn ImportSink<Error = CompileError>,
    ) -> Result<String, GenerateError<CompileError>> {
        bump(&self.generations);
        for item in ast {
            if let ScriptLine::Import(path) = &item.line {
                imports
                    .compile_import(&base_dir.join(path))
                    .map_err(GenerateError::Import)?;
            }
        }
        if let Some(span) = fails_at(ast, Stage::Generate) {
            return Err(GenerateError::Diagnostic(stage_failure(Stage::Generate, span)));
        }

        let mut out = String::new();
        for item in ast {
            match &item.line {
                ScriptLine::Import(path) => {
                    out.push_str("require ");
                    out.push_str(path);
                }
                ScriptLine::Text(text) => out.push_str(text),
                ScriptLine::Fail(_) => continue,
            }
            out.push('\n');
        }
        Ok(out)
    }
}
