use lox_common::{Position, Span};

/// Low-level character reader over source text.
///
/// Tracks the position of the next unread character (line, column, byte
/// offset) and provides the peek/advance primitives the scanner is built on.
/// The cursor only ever moves forward. Byte offsets are `u32`, which caps
/// the source at 4 GiB.
pub struct Cursor<'src> {
    source: &'src str,
    chars: std::str::Chars<'src>,
    /// Byte offset of the *next* character to be consumed.
    offset: u32,
    line: u32,
    column: u32,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.chars(),
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Current position in the source.
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }

    /// Current 1-based line.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Peek at the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    /// Peek at the character after the next one.
    pub fn peek_second(&self) -> Option<char> {
        let mut iter = self.chars.clone();
        iter.next();
        iter.next()
    }

    /// Consume and return the next character.
    ///
    /// Consuming a `\n` moves the cursor to the start of the next line.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.offset += ch.len_utf8() as u32;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consume the next character if it matches `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// True if there are no more characters.
    pub fn is_eof(&self) -> bool {
        self.offset as usize >= self.source.len()
    }

    /// Slice the source from byte offset `start` to the current offset.
    pub fn slice_from(&self, start: Position) -> &'src str {
        &self.source[start.offset as usize..self.offset as usize]
    }

    /// Build a Span from a start position to the current position.
    pub fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.position())
    }

    /// Consume characters while `predicate` returns true.
    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if predicate(ch) {
                self.advance();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_consume() {
        let cursor = Cursor::new("ab");
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.peek_second(), Some('b'));
        assert_eq!(cursor.position(), Position::START);
    }

    #[test]
    fn lookahead_past_end_is_none() {
        let mut cursor = Cursor::new("x");
        assert_eq!(cursor.peek_second(), None);
        assert_eq!(cursor.advance(), Some('x'));
        assert!(cursor.is_eof());
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn eat_only_on_match() {
        let mut cursor = Cursor::new("=>");
        assert!(!cursor.eat('>'));
        assert_eq!(cursor.position().offset, 0);
        assert!(cursor.eat('='));
        assert!(cursor.eat('>'));
        assert!(!cursor.eat('>'));
    }

    #[test]
    fn newline_advances_line() {
        let mut cursor = Cursor::new("a\nbc");
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.position().column, 1);
        cursor.advance();
        assert_eq!(
            cursor.position(),
            Position {
                line: 2,
                column: 2,
                offset: 3
            }
        );
    }

    #[test]
    fn offsets_are_bytes() {
        let mut cursor = Cursor::new("é1");
        let start = cursor.position();
        cursor.advance();
        assert_eq!(cursor.position().offset, 2);
        assert_eq!(cursor.slice_from(start), "é");
    }

    #[test]
    fn eat_while_stops_at_predicate() {
        let mut cursor = Cursor::new("123abc");
        let start = cursor.position();
        cursor.eat_while(|c| c.is_ascii_digit());
        assert_eq!(cursor.slice_from(start), "123");
        assert_eq!(cursor.span_from(start).range(), 0..3);
    }
}
