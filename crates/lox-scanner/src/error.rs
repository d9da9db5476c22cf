use std::fmt;

use lox_common::{Diagnostic, DiagnosticBag, Span};
use thiserror::Error;

/// A recoverable lexical error. Scanning always continues past one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("[line {line}] Error: unexpected character {found}")]
    UnexpectedCharacter { found: char, line: u32, span: Span },

    #[error("[line {line}] Error: unterminated string")]
    UnterminatedString { line: u32, span: Span },
}

impl ScanError {
    pub fn line(&self) -> u32 {
        match self {
            ScanError::UnexpectedCharacter { line, .. }
            | ScanError::UnterminatedString { line, .. } => *line,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ScanError::UnexpectedCharacter { span, .. }
            | ScanError::UnterminatedString { span, .. } => *span,
        }
    }

    /// The message without the `[line N] Error:` prefix.
    pub fn message(&self) -> String {
        match self {
            ScanError::UnexpectedCharacter { found, .. } => {
                format!("unexpected character {}", found)
            }
            ScanError::UnterminatedString { .. } => "unterminated string".to_string(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::new(self.message(), self.line()).with_span(self.span());
        match self {
            ScanError::UnterminatedString { .. } => {
                diag.with_suggestion("add a closing '\"' to end the string")
            }
            ScanError::UnexpectedCharacter { .. } => diag,
        }
    }
}

/// Every lexical error from one scan, in source order.
///
/// Only constructed when at least one error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanErrors {
    errors: Vec<ScanError>,
}

impl ScanErrors {
    pub(crate) fn new(errors: Vec<ScanError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self { errors }
    }

    pub fn errors(&self) -> &[ScanError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScanError> {
        self.errors.iter()
    }

    pub fn to_diagnostics(&self) -> DiagnosticBag {
        self.errors.iter().map(ScanError::to_diagnostic).collect()
    }
}

impl fmt::Display for ScanErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ScanErrors {}

impl<'a> IntoIterator for &'a ScanErrors {
    type Item = &'a ScanError;
    type IntoIter = std::slice::Iter<'a, ScanError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
