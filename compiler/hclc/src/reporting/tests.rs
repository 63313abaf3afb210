#![allow(clippy::unwrap_used, reason = "test code")]

use super::*;
use crate::error::Stage;
use hcl_ir::{Diagnostic, ErrorCode, Span};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn render(err: &CompileError) -> String {
    let mut out = Vec::new();
    report_to(err, &mut out, false).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_pipeline_error_has_snippet() {
    let err = CompileError::from(PipelineError {
        stage: Stage::Parse,
        path: PathBuf::from("lib/broken.hcl"),
        source_text: "(def x 1)\n(def y\n".to_string(),
        diagnostic: Diagnostic::error(ErrorCode::E2001, "unclosed `(`", Span::new(10, 11))
            .with_note("the list opened here never closes"),
    });
    let text = render(&err);
    assert!(text.contains("E2001"), "{text}");
    assert!(text.contains("unclosed `(` (parse stage)"), "{text}");
    assert!(text.contains("lib/broken.hcl"), "{text}");
    assert!(text.contains("(def y"), "{text}");
    assert!(text.contains("the list opened here never closes"), "{text}");
}

#[test]
fn test_other_errors_are_one_line() {
    let err = CompileError::InvalidExtension {
        path: PathBuf::from("notes.txt"),
        expected: "hcl".to_string(),
    };
    assert_eq!(render(&err), "error: notes.txt is not a `.hcl` source file\n");
}

#[test]
fn test_char_range_ascii() {
    assert_eq!(char_range("abcdef", 1..4), 1..4);
}

#[test]
fn test_char_range_multibyte() {
    // "é" is two bytes.
    assert_eq!(char_range("éab", 2..3), 1..2);
    assert_eq!(char_range("éab", 1..3), 0..2);
}

#[test]
fn test_char_range_widens_empty() {
    assert_eq!(char_range("abc", 1..1), 1..2);
    // At the end there is nothing to widen over.
    assert_eq!(char_range("abc", 3..3), 3..3);
}

#[test]
fn test_char_range_clamps() {
    assert_eq!(char_range("abc", 2..99), 2..3);
}
