use lox_common::Span;
use serde::Serialize;
use std::fmt;

/// A single token produced by the scanner.
///
/// Tokens are plain values: once the scanner has built one it is never
/// modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Verbatim source text, quotes included for strings.
    pub lexeme: String,
    /// Decoded payload; only strings and numbers carry one.
    pub literal: Option<Literal>,
    /// 1-based line on which the token starts.
    pub line: u32,
    pub span: Span,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        literal: Option<Literal>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            line: span.start.line,
            span,
        }
    }

    pub fn eof(span: Span) -> Self {
        Self {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            literal: None,
            line: span.start.line,
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.kind, self.lexeme)?;
        if let Some(literal) = &self.literal {
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}

/// Payload carried by literal tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Literal {
    /// Text between the quotes of a string literal.
    String(String),
    /// Raw digit text of a number literal, e.g. `"1.5"`.
    Number(String),
}

impl Literal {
    /// The literal text as written, without quotes.
    pub fn as_str(&self) -> &str {
        match self {
            Literal::String(s) | Literal::Number(s) => s,
        }
    }

    /// Parse a number literal. `None` for strings.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Literal::Number(raw) => raw.parse().ok(),
            Literal::String(_) => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All token kinds in the Lox language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // === Single-character tokens ===
    LeftParen,  // (
    RightParen, // )
    LeftBrace,  // {
    RightBrace, // }
    Comma,      // ,
    Dot,        // .
    Minus,      // -
    Plus,       // +
    Semicolon,  // ;
    Slash,      // /
    Star,       // *

    // === One or two character tokens ===
    Bang,         // !
    BangEqual,    // !=
    Equal,        // =
    EqualEqual,   // ==
    Greater,      // >
    GreaterEqual, // >=
    Less,         // <
    LessEqual,    // <=

    // === Literals ===
    Identifier,
    String,
    Number,

    // === Keywords ===
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

/// Reserved words, in the order they are documented.
const KEYWORDS: [(&str, TokenKind); 16] = [
    ("and", TokenKind::And),
    ("class", TokenKind::Class),
    ("else", TokenKind::Else),
    ("false", TokenKind::False),
    ("fun", TokenKind::Fun),
    ("for", TokenKind::For),
    ("if", TokenKind::If),
    ("nil", TokenKind::Nil),
    ("or", TokenKind::Or),
    ("print", TokenKind::Print),
    ("return", TokenKind::Return),
    ("super", TokenKind::Super),
    ("this", TokenKind::This),
    ("true", TokenKind::True),
    ("var", TokenKind::Var),
    ("while", TokenKind::While),
];

impl TokenKind {
    /// Look up a reserved word. Exact, case-sensitive match.
    pub fn keyword(s: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|&&(text, _)| text == s)
            .map(|&(_, kind)| kind)
    }

    /// The full reserved-word table.
    pub fn keywords() -> &'static [(&'static str, TokenKind)] {
        &KEYWORDS
    }

    /// Upper-case name used when printing tokens.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Slash => "SLASH",
            TokenKind::Star => "STAR",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::And => "AND",
            TokenKind::Class => "CLASS",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::Fun => "FUN",
            TokenKind::For => "FOR",
            TokenKind::If => "IF",
            TokenKind::Nil => "NIL",
            TokenKind::Or => "OR",
            TokenKind::Print => "PRINT",
            TokenKind::Return => "RETURN",
            TokenKind::Super => "SUPER",
            TokenKind::This => "THIS",
            TokenKind::True => "TRUE",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_table_is_one_to_one() {
        let table = TokenKind::keywords();
        assert_eq!(table.len(), 16);
        for (i, &(text, kind)) in table.iter().enumerate() {
            assert_eq!(TokenKind::keyword(text), Some(kind));
            assert_eq!(kind.name(), text.to_ascii_uppercase());
            assert!(table[i + 1..].iter().all(|&(t, k)| t != text && k != kind));
        }
    }

    #[test]
    fn non_keyword_names_are_not_reserved() {
        let others = [
            TokenKind::LeftParen,
            TokenKind::BangEqual,
            TokenKind::Identifier,
            TokenKind::String,
            TokenKind::Number,
            TokenKind::Eof,
        ];
        for kind in others {
            assert_eq!(TokenKind::keyword(&kind.name().to_ascii_lowercase()), None);
        }
    }

    #[test]
    fn keyword_lookup_is_case_sensitive() {
        assert_eq!(TokenKind::keyword("class"), Some(TokenKind::Class));
        assert_eq!(TokenKind::keyword("Class"), None);
        assert_eq!(TokenKind::keyword("classy"), None);
        assert_eq!(TokenKind::keyword(""), None);
    }

    #[test]
    fn number_literal_parses_on_demand() {
        assert_eq!(Literal::Number("1.5".into()).as_number(), Some(1.5));
        assert_eq!(Literal::String("1.5".into()).as_number(), None);
    }

    #[test]
    fn token_display() {
        let span = Span::default();
        let tok = Token::new(
            TokenKind::String,
            "\"hi\"",
            Some(Literal::String("hi".into())),
            span,
        );
        assert_eq!(tok.to_string(), "STRING \"hi\" hi");
        let semi = Token::new(TokenKind::Semicolon, ";", None, span);
        assert_eq!(semi.to_string(), "SEMICOLON ; ");
        assert_eq!(Token::eof(span).to_string(), "EOF  ");
    }
}
