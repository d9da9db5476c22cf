use std::io::{self, Write};

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use lox_common::Diagnostic;

/// Render one diagnostic as an annotated source snippet.
pub fn write_fancy<W: Write>(
    diag: &Diagnostic,
    source: &str,
    file_name: &str,
    color: bool,
    out: W,
) -> io::Result<()> {
    let Some(span) = diag.span else {
        return write_plain(diag, out);
    };

    // ariadne counts characters, spans count bytes.
    let start = char_index(source, span.start.offset as usize);
    let end = char_index(source, span.end.offset as usize).max(start + 1);

    let mut report = Report::build(ReportKind::Error, file_name, start)
        .with_config(Config::default().with_color(color))
        .with_message(format!("[line {}] {}", diag.line, diag.message))
        .with_label(
            Label::new((file_name, start..end))
                .with_message(&diag.message)
                .with_color(Color::Red),
        );

    if let Some(ref suggestion) = diag.suggestion {
        report = report.with_help(suggestion);
    }

    report.finish().write((file_name, Source::from(source)), out)
}

/// One `[line N] Error: message` line.
pub fn write_plain<W: Write>(diag: &Diagnostic, mut out: W) -> io::Result<()> {
    writeln!(out, "{}", diag)
}

fn char_index(source: &str, byte: usize) -> usize {
    let byte = byte.min(source.len());
    source
        .get(..byte)
        .map_or(byte, |prefix| prefix.chars().count())
}
