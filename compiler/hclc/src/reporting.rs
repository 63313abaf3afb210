//! Rendering compile errors for humans.
//!
//! Pipeline failures are rendered with a source snippet through `ariadne`;
//! everything else is a one-line `error:` message.

use std::io::{self, IsTerminal, Write};
use std::ops::Range;

use ariadne::{Config, Label, Report, ReportKind, Source};

use crate::error::{CompileError, PipelineError};

/// Print `err` to stderr, colored when stderr is a terminal.
pub fn report(err: &CompileError) {
    let stderr = io::stderr();
    let color = stderr.is_terminal();
    let mut lock = stderr.lock();
    if report_to(err, &mut lock, color).is_err() {
        // Nothing better to do if stderr itself is broken.
        let _ = writeln!(lock, "error: {err}");
    }
}

/// Render `err` into `out`.
pub fn report_to(err: &CompileError, out: &mut dyn Write, color: bool) -> io::Result<()> {
    match err {
        CompileError::Pipeline(pipeline) => render_pipeline(pipeline, out, color),
        _ => writeln!(out, "error: {err}"),
    }
}

fn render_pipeline(err: &PipelineError, out: &mut dyn Write, color: bool) -> io::Result<()> {
    let id = err.path.display().to_string();
    let text = err.source_text.as_str();
    let range = char_range(text, err.diagnostic.span.to_range());

    let mut report = Report::build(ReportKind::Error, id.clone(), range.start)
        .with_config(Config::default().with_color(color))
        .with_code(err.diagnostic.code)
        .with_message(format!("{} ({} stage)", err.diagnostic.message, err.stage))
        .with_label(Label::new((id.clone(), range)).with_message(&err.diagnostic.message));
    if !err.diagnostic.notes.is_empty() {
        report = report.with_note(err.diagnostic.notes.join("\n"));
    }
    report.finish().write((id, Source::from(text)), out)
}

/// Convert a byte range into the char range `ariadne` labels use.
///
/// Offsets are clamped to the text and snapped back to char boundaries. An
/// empty range is widened to cover one char when there is one to cover, so
/// the label stays visible.
fn char_range(text: &str, bytes: Range<usize>) -> Range<usize> {
    let to_chars = |byte: usize| {
        let mut byte = byte.min(text.len());
        while !text.is_char_boundary(byte) {
            byte -= 1;
        }
        text[..byte].chars().count()
    };
    let start = to_chars(bytes.start);
    let end = to_chars(bytes.end).max(start);
    if start == end && start < text.chars().count() {
        start..end + 1
    } else {
        start..end
    }
}

#[cfg(test)]
mod tests;
