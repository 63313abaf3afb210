#![allow(clippy::unwrap_used, reason = "test code")]

use super::*;
use crate::testing::ScriptedPipeline;
use pretty_assertions::assert_eq;

fn driver(pipeline: ScriptedPipeline) -> Driver<'static, ScriptedPipeline> {
    Driver::new(pipeline, &(), CompilerConfig::default())
}

#[test]
fn test_outcome_accessors() {
    let written = CompileOutcome::Written {
        source: normalize("a.hcl"),
        output: PathBuf::from("a.js"),
    };
    assert!(written.is_written());
    assert_eq!(written.output(), Some(Path::new("a.js")));
    assert_eq!(written.source(), &normalize("./a.hcl"));

    let skipped = CompileOutcome::AlreadyClaimed(normalize("b.hcl"));
    assert!(!skipped.is_written());
    assert_eq!(skipped.output(), None);
}

#[test]
fn test_invalid_extension_claims_nothing() {
    let driver = driver(ScriptedPipeline::new());
    let mut ctx = CompilationContext::new();
    let err = driver.compile(&mut ctx, "notes.txt").unwrap_err();
    assert!(matches!(err, CompileError::InvalidExtension { .. }));
    assert!(ctx.registry().is_empty());
    assert_eq!(driver.pipeline().scans(), 0);
}

#[test]
fn test_claimed_path_short_circuits() {
    let driver = driver(ScriptedPipeline::new());
    let mut ctx = CompilationContext::new();
    ctx.claim(normalize("pre/claimed.hcl"));

    let outcome = driver.compile(&mut ctx, "./pre/x/../claimed.hcl").unwrap();
    assert_eq!(outcome, CompileOutcome::AlreadyClaimed(normalize("pre/claimed.hcl")));
    assert_eq!(driver.pipeline().scans(), 0);
}

#[test]
fn test_missing_file_stays_claimed() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.hcl");
    let driver = driver(ScriptedPipeline::new());
    let mut ctx = CompilationContext::new();

    let err = driver.compile(&mut ctx, &missing).unwrap_err();
    assert!(matches!(err, CompileError::Read { .. }));
    assert!(ctx.is_claimed(&missing));

    let again = driver.compile(&mut ctx, &missing).unwrap();
    assert!(!again.is_written());
}

#[test]
fn test_stage_failure_is_tagged() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.hcl");
    std::fs::write(&file, "ok\nfail analyze\n").unwrap();
    let driver = driver(ScriptedPipeline::new());
    let mut ctx = CompilationContext::new();

    let err = driver.compile(&mut ctx, &file).unwrap_err();
    let pipeline = err.as_pipeline().unwrap();
    assert_eq!(pipeline.stage, Stage::Analyze);
    assert_eq!(pipeline.diagnostic.span, hcl_ir::Span::new(3, 15));
    assert_eq!(pipeline.source_text, "ok\nfail analyze\n");
    assert!(!dir.path().join("bad.js").exists());
    assert_eq!(driver.pipeline().generations(), 0);
}
