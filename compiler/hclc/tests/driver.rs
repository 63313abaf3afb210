//! Driver behavior over real files, using the scripted pipeline.
//!
//! Every test works in its own temporary directory with its own
//! `CompilationContext`, so tests can run in parallel.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests panic on setup failure"
)]

use std::fs;
use std::path::{Path, PathBuf};

use hclc::testing::ScriptedPipeline;
use hclc::{CompilationContext, CompileError, CompileOutcome, CompilerConfig, Driver, Stage};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    fn files(&self) -> Vec<String> {
        let mut names = Vec::new();
        collect(self.dir.path(), self.dir.path(), &mut names);
        names.sort();
        names
    }
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect(root, &path, out);
        } else {
            let rel = path.strip_prefix(root).unwrap();
            out.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }
}

fn driver() -> Driver<'static, ScriptedPipeline> {
    Driver::new(ScriptedPipeline::new(), &(), CompilerConfig::default())
}

#[test]
fn compiles_a_file_once_per_context() {
    let fx = Fixture::new();
    let file = fx.write("a.hcl", "hello\n");
    let driver = driver();
    let mut ctx = CompilationContext::new();

    let first = driver.compile(&mut ctx, &file).unwrap();
    assert!(first.is_written());
    let second = driver.compile(&mut ctx, &file).unwrap();
    assert!(matches!(second, CompileOutcome::AlreadyClaimed(_)));

    assert_eq!(driver.pipeline().scans(), 1);
    assert_eq!(driver.pipeline().generations(), 1);
    assert_eq!(fx.read("a.js"), "hello\n");
}

#[test]
fn equivalent_spellings_share_one_claim() {
    let fx = Fixture::new();
    fx.write("dir/a.hcl", "a\n");
    let root = fx.dir.path();
    let driver = driver();
    let mut ctx = CompilationContext::new();

    driver.compile(&mut ctx, root.join("./dir/a.hcl")).unwrap();
    let again = driver.compile(&mut ctx, root.join("dir/a.hcl")).unwrap();
    let sideways = driver
        .compile(&mut ctx, root.join("dir/../dir/./a.hcl"))
        .unwrap();

    assert!(!again.is_written());
    assert!(!sideways.is_written());
    assert_eq!(driver.pipeline().scans(), 1);
    assert_eq!(ctx.registry().len(), 1);
}

#[test]
fn imports_are_compiled_before_the_importer_is_written() {
    let fx = Fixture::new();
    let main = fx.write("main.hcl", "import lib/util.hcl\nmain body\n");
    fx.write("lib/util.hcl", "util body\n");
    let driver = driver();
    let mut ctx = CompilationContext::new();

    driver.compile(&mut ctx, &main).unwrap();

    assert_eq!(fx.read("main.js"), "require lib/util.hcl\nmain body\n");
    assert_eq!(fx.read("lib/util.js"), "util body\n");
    assert_eq!(ctx.written(), &[fx.path("lib/util.js"), fx.path("main.js")]);
}

#[test]
fn imports_resolve_against_the_importing_file() {
    let fx = Fixture::new();
    let main = fx.write("app/main.hcl", "import ../shared/a.hcl\n");
    fx.write("shared/a.hcl", "import b.hcl\n");
    fx.write("shared/b.hcl", "leaf\n");
    let driver = driver();
    let mut ctx = CompilationContext::new();

    driver.compile(&mut ctx, &main).unwrap();

    assert!(ctx.is_claimed(fx.path("shared/b.hcl")));
    assert_eq!(fx.read("shared/b.js"), "leaf\n");
    assert_eq!(driver.pipeline().scans(), 3);
}

#[test]
fn diamond_imports_compile_the_shared_file_once() {
    let fx = Fixture::new();
    let top = fx.write("top.hcl", "import left.hcl\nimport right.hcl\n");
    fx.write("left.hcl", "import base.hcl\n");
    fx.write("right.hcl", "import ./base.hcl\n");
    fx.write("base.hcl", "base\n");
    let driver = driver();
    let mut ctx = CompilationContext::new();

    driver.compile(&mut ctx, &top).unwrap();

    assert_eq!(driver.pipeline().scans(), 4);
    assert_eq!(ctx.written().len(), 4);
}

#[test]
fn import_cycle_terminates_with_each_file_written_once() {
    let fx = Fixture::new();
    let a = fx.write("a.hcl", "import b.hcl\nfrom a\n");
    fx.write("b.hcl", "import a.hcl\nfrom b\n");
    let driver = driver();
    let mut ctx = CompilationContext::new();

    let outcome = driver.compile(&mut ctx, &a).unwrap();

    assert!(outcome.is_written());
    assert_eq!(driver.pipeline().scans(), 2);
    assert_eq!(driver.pipeline().generations(), 2);
    assert_eq!(fx.read("a.js"), "require b.hcl\nfrom a\n");
    assert_eq!(fx.read("b.js"), "require a.hcl\nfrom b\n");
    // b finishes first: its import of a hit the claim.
    assert_eq!(ctx.written(), &[fx.path("b.js"), fx.path("a.js")]);
}

#[test]
fn self_import_terminates() {
    let fx = Fixture::new();
    let a = fx.write("self.hcl", "import self.hcl\n");
    let driver = driver();
    let mut ctx = CompilationContext::new();

    driver.compile(&mut ctx, &a).unwrap();
    assert_eq!(driver.pipeline().scans(), 1);
}

#[cfg(unix)]
#[test]
fn reads_and_writes_through_the_path_as_given() {
    let fx = Fixture::new();
    fx.write("real/sub/.keep", "");
    fx.write("real/m.hcl", "real\n");
    fx.write("m.hcl", "top\n");
    std::os::unix::fs::symlink(fx.path("real/sub"), fx.path("link")).unwrap();
    let driver = driver();
    let mut ctx = CompilationContext::new();

    // The OS resolves `link/..` to `real`, not to the fixture root.
    let outcome = driver.compile(&mut ctx, fx.path("link/../m.hcl")).unwrap();

    assert_eq!(outcome.output(), Some(fx.path("link/../m.js").as_path()));
    assert_eq!(fx.read("real/m.js"), "real\n");
    assert!(!fx.path("m.js").exists());
}

#[test]
fn output_is_a_sibling_with_the_extension_swapped() {
    let fx = Fixture::new();
    let module = fx.write("module.hcl", "x\n");
    let driver = driver();
    let mut ctx = CompilationContext::new();

    let outcome = driver.compile(&mut ctx, &module).unwrap();

    assert_eq!(outcome.output(), Some(fx.path("module.js").as_path()));
    assert_eq!(fx.files(), vec!["module.hcl", "module.js"]);
}

#[test]
fn existing_output_is_overwritten() {
    let fx = Fixture::new();
    let module = fx.write("module.hcl", "fresh\n");
    fx.write("module.js", "stale output that is much longer than the new one\n");
    let driver = driver();
    let mut ctx = CompilationContext::new();

    driver.compile(&mut ctx, &module).unwrap();
    assert_eq!(fx.read("module.js"), "fresh\n");
}

#[test]
fn parse_failure_writes_nothing() {
    let fx = Fixture::new();
    let bad = fx.write("bad.hcl", "fail parse\n");
    let driver = driver();
    let mut ctx = CompilationContext::new();

    let err = driver.compile(&mut ctx, &bad).unwrap_err();

    let pipeline = err.as_pipeline().expect("pipeline error");
    assert_eq!(pipeline.stage, Stage::Parse);
    assert_eq!(pipeline.path, bad);
    assert!(!fx.path("bad.js").exists());
    assert!(ctx.is_claimed(&bad));
    assert_eq!(driver.pipeline().analyses(), 0);
}

#[test]
fn failure_in_an_import_propagates_unchanged() {
    let fx = Fixture::new();
    let main = fx.write("main.hcl", "import ok.hcl\nimport broken.hcl\nmain\n");
    fx.write("ok.hcl", "fine\n");
    let broken = fx.write("broken.hcl", "fail scan\n");
    let driver = driver();
    let mut ctx = CompilationContext::new();

    let err = driver.compile(&mut ctx, &main).unwrap_err();

    let pipeline = err.as_pipeline().expect("pipeline error");
    assert_eq!(pipeline.stage, Stage::Scan);
    assert_eq!(pipeline.path, broken);
    // Finished imports keep their output; the importer never gets one.
    assert!(fx.path("ok.js").exists());
    assert!(!fx.path("broken.js").exists());
    assert!(!fx.path("main.js").exists());
}

#[test]
fn missing_import_is_a_read_error() {
    let fx = Fixture::new();
    let main = fx.write("main.hcl", "import nowhere.hcl\n");
    let driver = driver();
    let mut ctx = CompilationContext::new();

    let err = driver.compile(&mut ctx, &main).unwrap_err();

    match err {
        CompileError::Read { path, .. } => assert_eq!(path, fx.path("nowhere.hcl")),
        other => panic!("expected read error, got {other:?}"),
    }
    assert!(ctx.is_claimed(fx.path("nowhere.hcl")));
}

#[test]
fn missing_file_stays_claimed_after_failure() {
    let fx = Fixture::new();
    let missing = fx.path("missing.hcl");
    let driver = driver();
    let mut ctx = CompilationContext::new();

    assert!(matches!(
        driver.compile(&mut ctx, &missing),
        Err(CompileError::Read { .. })
    ));

    // Creating the file afterwards does not matter to this context.
    fx.write("missing.hcl", "late\n");
    let again = driver.compile(&mut ctx, &missing).unwrap();
    assert!(matches!(again, CompileOutcome::AlreadyClaimed(_)));
    assert!(!fx.path("missing.js").exists());
}

#[test]
fn invalid_extension_is_rejected_before_claiming() {
    let fx = Fixture::new();
    let notes = fx.write("notes.txt", "text\n");
    let driver = driver();
    let mut ctx = CompilationContext::new();

    let err = driver.compile(&mut ctx, &notes).unwrap_err();

    assert!(matches!(err, CompileError::InvalidExtension { .. }));
    assert!(ctx.registry().is_empty());
    assert_eq!(fx.files(), vec!["notes.txt"]);
}

#[test]
fn contexts_do_not_share_claims() {
    let fx = Fixture::new();
    let file = fx.write("a.hcl", "a\n");
    let driver = driver();

    let mut first = CompilationContext::new();
    let mut second = CompilationContext::new();
    assert!(driver.compile(&mut first, &file).unwrap().is_written());
    assert!(driver.compile(&mut second, &file).unwrap().is_written());
    assert_eq!(driver.pipeline().scans(), 2);
}

#[test]
fn long_import_chain_completes() {
    let fx = Fixture::new();
    let depth = 300;
    for i in 0..depth {
        fx.write(&format!("m{i}.hcl"), &format!("import m{}.hcl\n", i + 1));
    }
    fx.write(&format!("m{depth}.hcl"), "end\n");
    let driver = driver();
    let mut ctx = CompilationContext::new();

    driver.compile(&mut ctx, fx.path("m0.hcl")).unwrap();

    assert_eq!(ctx.written().len(), depth + 1);
    assert_eq!(ctx.written()[0], fx.path(&format!("m{depth}.js")));
}

#[test]
fn custom_extensions_drive_output_names() {
    let fx = Fixture::new();
    let main = fx.write("main.cocoa", "import dep.cocoa\n");
    fx.write("dep.cocoa", "dep\n");
    let config = CompilerConfig::default()
        .with_source_extension("cocoa")
        .with_target_extension(".mjs");
    let driver = Driver::new(ScriptedPipeline::new(), &(), config);
    let mut ctx = CompilationContext::new();

    driver.compile(&mut ctx, &main).unwrap();

    assert_eq!(
        fx.files(),
        vec!["dep.cocoa", "dep.mjs", "main.cocoa", "main.mjs"]
    );
}
