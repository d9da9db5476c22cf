use lox_common::{Position, Span};

use crate::cursor::Cursor;
use crate::error::{ScanError, ScanErrors};
use crate::token::{Literal, Token, TokenKind};

/// Hand-written scanner for Lox source text.
///
/// A scanner is built for exactly one source and consumed by
/// [`Scanner::scan_tokens`]. Lexical errors never stop the scan: they are
/// collected and returned next to every token that was recognized.
pub struct Scanner<'src> {
    cursor: Cursor<'src>,
    /// Position of the first character of the token being recognized.
    start: Position,
    tokens: Vec<Token>,
    errors: Vec<ScanError>,
}

impl<'src> Scanner<'src> {
    /// Offsets are stored as `u32`, so `source` must be smaller than 4 GiB.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            start: Position::START,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Scan the entire source.
    ///
    /// The token list always ends with a single `Eof` token. The second
    /// element is `Err` when at least one lexical error was found.
    pub fn scan_tokens(mut self) -> (Vec<Token>, Result<(), ScanErrors>) {
        while !self.cursor.is_eof() {
            self.start = self.cursor.position();
            if let Err(err) = self.scan_token() {
                self.errors.push(err);
            }
        }

        let end = self.cursor.position();
        self.tokens.push(Token::eof(Span::new(end, end)));

        let result = if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ScanErrors::new(self.errors))
        };
        (self.tokens, result)
    }

    /// Consume one character and whatever token it starts.
    fn scan_token(&mut self) -> Result<(), ScanError> {
        let Some(ch) = self.cursor.advance() else {
            return Ok(());
        };

        match ch {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),

            '!' => self.add_either('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.add_either('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.add_either('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.add_either('=', TokenKind::GreaterEqual, TokenKind::Greater),

            '/' => {
                if self.cursor.eat('/') {
                    // Line comment; the newline is left for the next dispatch.
                    self.cursor.eat_while(|c| c != '\n');
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            // The cursor bumps the line on '\n'.
            ' ' | '\r' | '\t' | '\n' => {}

            '"' => return self.scan_string(),
            c if c.is_ascii_digit() => self.scan_number(),
            c if is_ident_start(c) => self.scan_identifier(),

            found => {
                return Err(ScanError::UnexpectedCharacter {
                    found,
                    line: self.cursor.line(),
                    span: self.cursor.span_from(self.start),
                });
            }
        }
        Ok(())
    }

    /// Emit `matched` if the next character is `expected`, otherwise `single`.
    fn add_either(&mut self, expected: char, matched: TokenKind, single: TokenKind) {
        let kind = if self.cursor.eat(expected) {
            matched
        } else {
            single
        };
        self.add_token(kind);
    }

    // ---------------------------------------------------------------
    // Literals
    // ---------------------------------------------------------------

    /// Scan a string after its opening `"`. Strings may span lines.
    fn scan_string(&mut self) -> Result<(), ScanError> {
        self.cursor.eat_while(|c| c != '"');

        if self.cursor.is_eof() {
            return Err(ScanError::UnterminatedString {
                line: self.cursor.line(),
                span: self.cursor.span_from(self.start),
            });
        }

        self.cursor.advance(); // closing "

        let lexeme = self.cursor.slice_from(self.start);
        let value = &lexeme[1..lexeme.len() - 1];
        self.add_token_literal(TokenKind::String, Some(Literal::String(value.to_string())));
        Ok(())
    }

    /// Scan an integer or `integer.fraction` number.
    ///
    /// A `.` is only part of the number when a digit follows it, so `1.`
    /// scans as `NUMBER DOT`.
    fn scan_number(&mut self) {
        self.cursor.eat_while(|c| c.is_ascii_digit());

        if self.cursor.peek() == Some('.')
            && self.cursor.peek_second().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.advance(); // .
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        let text = self.cursor.slice_from(self.start);
        self.add_token_literal(TokenKind::Number, Some(Literal::Number(text.to_string())));
    }

    fn scan_identifier(&mut self) {
        self.cursor.eat_while(is_ident_continue);

        let text = self.cursor.slice_from(self.start);
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    // ---------------------------------------------------------------
    // Emission
    // ---------------------------------------------------------------

    fn add_token(&mut self, kind: TokenKind) {
        self.add_token_literal(kind, None);
    }

    fn add_token_literal(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let lexeme = self.cursor.slice_from(self.start);
        let span = self.cursor.span_from(self.start);
        self.tokens.push(Token::new(kind, lexeme, literal, span));
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
