#![allow(clippy::unwrap_used, reason = "test code")]

use super::*;
use pretty_assertions::assert_eq;

fn norm(path: &str) -> PathBuf {
    normalize(path).into_path_buf()
}

#[test]
fn test_normalize_equivalent_spellings() {
    assert_eq!(normalize("./a.hcl"), normalize("a.hcl"));
    assert_eq!(normalize("./dir/a.hcl"), normalize("dir/a.hcl"));
    assert_eq!(normalize("dir//sub/../a.hcl"), normalize("dir/a.hcl"));
    assert_eq!(normalize("/x/./y/../z.hcl"), normalize("/x/z.hcl"));
}

#[test]
fn test_normalize_distinct_files_stay_distinct() {
    assert_ne!(normalize("a.hcl"), normalize("b.hcl"));
    assert_ne!(normalize("dir/a.hcl"), normalize("a.hcl"));
    assert_ne!(normalize("/a.hcl"), normalize("a.hcl"));
}

#[test]
fn test_normalize_leading_parent_dirs() {
    assert_eq!(norm("../a.hcl"), PathBuf::from("../a.hcl"));
    assert_eq!(norm("../../x/../a.hcl"), PathBuf::from("../../a.hcl"));
    assert_eq!(norm("a/../../b.hcl"), PathBuf::from("../b.hcl"));
}

#[test]
fn test_normalize_parent_of_root_is_root() {
    assert_eq!(norm("/../a.hcl"), PathBuf::from("/a.hcl"));
    assert_eq!(norm("/.."), PathBuf::from("/"));
}

#[test]
fn test_normalize_degenerate_inputs() {
    assert_eq!(norm(""), PathBuf::from("."));
    assert_eq!(norm("."), PathBuf::from("."));
    assert_eq!(norm("a/.."), PathBuf::from("."));
    assert_eq!(norm("./"), PathBuf::from("."));
}

#[test]
fn test_normalize_is_idempotent() {
    for input in ["./a/b/../c.hcl", "../x.hcl", "/r/./s", "", "q/.."] {
        let once = normalize(input);
        assert_eq!(normalize(once.as_path()), once);
    }
}

#[test]
fn test_canonical_path_display() {
    assert_eq!(normalize("./lib/a.hcl").to_string(), "lib/a.hcl");
}

#[test]
fn test_output_path_swaps_suffix() {
    let config = CompilerConfig::default();
    assert_eq!(
        output_path(Path::new("module.hcl"), &config).unwrap(),
        PathBuf::from("module.js")
    );
    assert_eq!(
        output_path(Path::new("./lib/a.b.hcl"), &config).unwrap(),
        PathBuf::from("./lib/a.b.js")
    );
}

#[test]
fn test_output_path_custom_extensions() {
    let config = CompilerConfig::default()
        .with_source_extension("lisp")
        .with_target_extension("mjs");
    assert_eq!(
        output_path(Path::new("x/y.lisp"), &config).unwrap(),
        PathBuf::from("x/y.mjs")
    );
}

#[test]
fn test_output_path_rejects_other_extensions() {
    let config = CompilerConfig::default();
    for bad in ["module.js", "module", "module.hcl.bak", "hcl"] {
        let err = output_path(Path::new(bad), &config).unwrap_err();
        assert!(
            matches!(err, CompileError::InvalidExtension { ref expected, .. } if expected == "hcl"),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn test_base_directory() {
    assert_eq!(base_directory(Path::new("a.hcl")), PathBuf::from("."));
    assert_eq!(base_directory(Path::new("./a.hcl")), PathBuf::from("."));
    assert_eq!(base_directory(Path::new("lib/a.hcl")), PathBuf::from("lib"));
    assert_eq!(base_directory(Path::new("/abs/a.hcl")), PathBuf::from("/abs"));
}
