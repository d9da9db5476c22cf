//! Lexical analysis for Lox.
//!
//! [`Scanner`] turns a complete source string into a list of [`Token`]s in
//! one call, collecting every lexical error along the way:
//!
//! ```
//! use lox_scanner::{Scanner, TokenKind};
//!
//! let (tokens, result) = Scanner::new("print 1 + 2;").scan_tokens();
//! assert!(result.is_ok());
//! assert_eq!(tokens[0].kind, TokenKind::Print);
//! assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
//! ```

pub mod cursor;
pub mod error;
pub mod token;

mod scanner;

pub use error::{ScanError, ScanErrors};
pub use scanner::Scanner;
pub use token::{Literal, Token, TokenKind};

/// Scan `source` with a fresh [`Scanner`].
pub fn scan(source: &str) -> (Vec<Token>, Result<(), ScanErrors>) {
    Scanner::new(source).scan_tokens()
}
