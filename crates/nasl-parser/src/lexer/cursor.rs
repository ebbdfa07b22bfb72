/// A cursor over source text that tracks byte offset, line and column.
///
/// `\n`, `\r\n` and a lone `\r` each end one line.
pub struct Cursor<'src> {
    source: &'src str,
    /// Remaining source text, starting at the current position.
    rest: &'src str,
    offset: u32,
    line: u32,
    column: u32,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.rest.is_empty()
    }

    /// Peek at the current character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        let first = *self.rest.as_bytes().first()?;
        if first.is_ascii() {
            Some(first as char)
        } else {
            self.rest.chars().next()
        }
    }

    /// Peek at the nth character ahead (0 = current).
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    #[inline]
    pub fn check(&self, f: impl Fn(char) -> bool) -> bool {
        self.peek().is_some_and(f)
    }

    #[inline]
    pub fn check_str(&self, s: &str) -> bool {
        self.rest.starts_with(s)
    }

    /// Consume the current character, updating line and column.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        let width = ch.len_utf8();
        self.rest = &self.rest[width..];
        self.offset += width as u32;

        let ends_line = match ch {
            '\n' => true,
            '\r' => !self.rest.starts_with('\n'),
            _ => false,
        };
        if ends_line {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += width as u32;
        }

        Some(ch)
    }

    /// Consume `n` bytes. `n` must land on a character boundary.
    pub fn advance_bytes(&mut self, n: usize) {
        debug_assert!(self.rest.is_char_boundary(n));
        let target = self.offset as usize + n;
        while (self.offset as usize) < target && self.advance().is_some() {}
    }

    /// Consume if the current character matches.
    #[inline]
    pub fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters while the predicate matches, returning them.
    pub fn eat_while(&mut self, f: impl Fn(char) -> bool) -> &'src str {
        let start = self.offset;
        while self.check(&f) {
            self.advance();
        }
        self.slice_from(start)
    }

    #[inline]
    pub fn slice_from(&self, start: u32) -> &'src str {
        &self.source[start as usize..self.offset as usize]
    }
}

#[inline]
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_and_advance() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.peek_nth(0), Some('b'));
        assert_eq!(cursor.peek_nth(1), None);
        assert_eq!(cursor.offset(), 1);
        cursor.advance();
        assert!(cursor.is_eof());
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn eat_and_eat_while() {
        let mut cursor = Cursor::new("local_var x");
        assert!(!cursor.eat('x'));
        assert_eq!(cursor.eat_while(is_ident_continue), "local_var");
        assert!(cursor.eat(' '));
        assert!(cursor.check(is_ident_start));
    }

    #[test]
    fn newline_styles() {
        let mut cursor = Cursor::new("a\nb\r\nc\rd");
        cursor.eat_while(|_| true);
        assert_eq!(cursor.line(), 4);
        assert_eq!(cursor.column(), 2);
    }

    #[test]
    fn crlf_counts_once() {
        let mut cursor = Cursor::new("\r\n");
        cursor.advance();
        assert_eq!(cursor.line(), 1);
        cursor.advance();
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.column(), 1);
    }

    #[test]
    fn columns_count_bytes() {
        let mut cursor = Cursor::new("é#");
        cursor.advance();
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.column(), 3);
        assert_eq!(cursor.peek(), Some('#'));
    }

    #[test]
    fn advance_bytes_tracks_lines() {
        let mut cursor = Cursor::new("\u{FEFF}a\nb");
        cursor.advance_bytes(3);
        assert_eq!(cursor.peek(), Some('a'));
        cursor.advance_bytes(2);
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.slice_from(3), "a\n");
    }

    #[test]
    fn check_str_and_source() {
        let cursor = Cursor::new(">>>= 1");
        assert!(cursor.check_str(">>>"));
        assert!(!cursor.check_str(">!<"));
        assert_eq!(cursor.source(), ">>>= 1");
    }
}
