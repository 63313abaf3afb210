use super::*;

#[test]
fn test_display_includes_code() {
    let diag = Diagnostic::error(ErrorCode::E2001, "unclosed `(`", Span::new(0, 1));
    assert_eq!(diag.to_string(), "error[E2001]: unclosed `(`");
}

#[test]
fn test_notes_accumulate_in_order() {
    let diag = Diagnostic::error(ErrorCode::E3001, "bad arity", Span::DUMMY)
        .with_note("first")
        .with_note("second");
    assert_eq!(diag.notes, vec!["first".to_string(), "second".to_string()]);
}
