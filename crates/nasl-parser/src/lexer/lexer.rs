//! The NASL lexer.
//!
//! [`Lexer`] turns source text into [`Token`]s on demand, dispatching on the
//! first character of each token. Lexemes are copied into the arena so the
//! source buffer can be dropped once parsing is done.
//!
//! A lexical error is fatal for the file: the lexer records it, yields a
//! single [`TokenKind::Error`] token and then only [`TokenKind::Eof`].

use bumpalo::Bump;
use nasl_core::{LexError, Span};

use super::cursor::{Cursor, is_ident_continue, is_ident_start};
use super::token::{Token, TokenKind, lookup_keyword};

/// Pull-based lexer for NASL source code.
///
/// The `'src` lifetime is the source buffer; `'ast` is the arena that
/// receives the lexemes.
pub struct Lexer<'src, 'ast> {
    cursor: Cursor<'src>,
    arena: &'ast Bump,
    error: Option<LexError>,
    /// Set once an error token has been handed out.
    poisoned: bool,
    /// Set once the iterator has yielded its last item.
    exhausted: bool,
}

impl<'src, 'ast> Lexer<'src, 'ast> {
    pub fn new(source: &'src str, arena: &'ast Bump) -> Self {
        let mut cursor = Cursor::new(source);
        if cursor.check_str("\u{FEFF}") {
            cursor.advance_bytes('\u{FEFF}'.len_utf8());
        }
        Self {
            cursor,
            arena,
            error: None,
            poisoned: false,
            exhausted: false,
        }
    }

    /// The lexical error that stopped this lexer, if any.
    pub fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<LexError> {
        self.error.take()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Scan and return the next token.
    pub fn next_token(&mut self) -> Token<'ast> {
        if self.poisoned {
            return self.make_eof();
        }

        self.skip_trivia();

        let Some(first) = self.cursor.peek() else {
            return self.make_eof();
        };

        let start = Start {
            line: self.cursor.line(),
            col: self.cursor.column(),
            offset: self.cursor.offset(),
        };

        match first {
            '"' | '\'' => self.scan_string(first, start),
            c if c.is_ascii_digit() => self.scan_integer(start),
            c if is_ident_start(c) => self.scan_identifier(start),
            _ => self.scan_operator(start),
        }
    }

    // =========================================
    // Internal: token construction
    // =========================================

    /// Skip whitespace (newlines included) and `#` comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.peek() {
                Some(' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c') => {
                    self.cursor.advance();
                }
                Some('#') => {
                    self.cursor.eat_while(|c| c != '\n' && c != '\r');
                }
                _ => break,
            }
        }
    }

    fn make_eof(&self) -> Token<'ast> {
        let span = Span::point(self.cursor.line(), self.cursor.column());
        Token::new(TokenKind::Eof, "", span)
    }

    fn make_token(&self, kind: TokenKind, start: Start) -> Token<'ast> {
        let text = self.cursor.slice_from(start.offset);
        let lexeme = self.arena.alloc_str(text);
        Token::new(kind, lexeme, start.span(text.len() as u32))
    }

    fn make_error(&mut self, error: LexError, start: Start) -> Token<'ast> {
        let text = self.cursor.slice_from(start.offset);
        let lexeme = self.arena.alloc_str(text);
        let span = error.span();
        self.error = Some(error);
        self.poisoned = true;
        Token::new(TokenKind::Error, lexeme, span)
    }

    // =========================================
    // Scanning: literals and names
    // =========================================

    /// Scan a quoted string.
    ///
    /// A double-quoted string first closes at the next `"` on the same line,
    /// without escapes. When the line ends first it is rescanned escape-aware
    /// and may span lines. Single-quoted strings are always escape-aware.
    fn scan_string(&mut self, quote: char, start: Start) -> Token<'ast> {
        self.cursor.advance();

        if quote == '"' {
            let rest = &self.cursor.source()[self.cursor.offset() as usize..];
            if let Some(end) = rest.find(['"', '\n', '\r'])
                && rest[end..].starts_with('"')
            {
                self.cursor.advance_bytes(end + 1);
                return self.make_token(TokenKind::String, start);
            }
        }

        loop {
            match self.cursor.advance() {
                None => {
                    let error = LexError::UnterminatedString {
                        quote,
                        span: start.span(1),
                    };
                    return self.make_error(error, start);
                }
                Some('\\') => {
                    self.cursor.advance();
                }
                Some(c) if c == quote => {
                    return self.make_token(TokenKind::String, start);
                }
                Some(_) => {}
            }
        }
    }

    /// Scan a decimal or `0x` hexadecimal integer.
    fn scan_integer(&mut self, start: Start) -> Token<'ast> {
        let hex_prefix = self.cursor.peek() == Some('0')
            && matches!(self.cursor.peek_nth(1), Some('x' | 'X'))
            && self.cursor.peek_nth(2).is_some_and(|c| c.is_ascii_hexdigit());

        if hex_prefix {
            self.cursor.advance_bytes(2);
            self.cursor.eat_while(|c| c.is_ascii_hexdigit());
        } else {
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        self.make_token(TokenKind::Integer, start)
    }

    fn scan_identifier(&mut self, start: Start) -> Token<'ast> {
        let text = self.cursor.eat_while(is_ident_continue);
        let kind = lookup_keyword(text).unwrap_or(TokenKind::Ident);
        self.make_token(kind, start)
    }

    // =========================================
    // Scanning: operators
    // =========================================

    /// Scan an operator or punctuation token, longest match first.
    fn scan_operator(&mut self, start: Start) -> Token<'ast> {
        let Some(c) = self.cursor.advance() else {
            return self.make_eof();
        };
        let next = self.cursor.peek();

        let kind = match (c, next) {
            ('(', _) => TokenKind::LeftParen,
            (')', _) => TokenKind::RightParen,
            ('[', _) => TokenKind::LeftBracket,
            (']', _) => TokenKind::RightBracket,
            ('{', _) => TokenKind::LeftBrace,
            ('}', _) => TokenKind::RightBrace,
            (',', _) => TokenKind::Comma,
            (';', _) => TokenKind::Semicolon,
            (':', _) => TokenKind::Colon,
            ('.', _) => TokenKind::Dot,
            ('~', _) => TokenKind::Tilde,
            ('^', _) => TokenKind::Caret,

            ('+', Some('+')) => self.take(TokenKind::PlusPlus),
            ('+', Some('=')) => self.take(TokenKind::PlusEqual),
            ('+', _) => TokenKind::Plus,

            ('-', Some('-')) => self.take(TokenKind::MinusMinus),
            ('-', Some('=')) => self.take(TokenKind::MinusEqual),
            ('-', _) => TokenKind::Minus,

            ('*', Some('*')) => self.take(TokenKind::StarStar),
            ('*', Some('=')) => self.take(TokenKind::StarEqual),
            ('*', _) => TokenKind::Star,

            ('/', Some('=')) => self.take(TokenKind::SlashEqual),
            ('/', _) => TokenKind::Slash,

            ('%', Some('=')) => self.take(TokenKind::PercentEqual),
            ('%', _) => TokenKind::Percent,

            ('=', Some('=')) => self.take(TokenKind::EqualEqual),
            ('=', Some('~')) => self.take(TokenKind::ReMatch),
            ('=', Some('>')) => self.take(TokenKind::Arrow),
            ('=', _) => TokenKind::Equal,

            ('!', Some('=')) => self.take(TokenKind::BangEqual),
            ('!', Some('~')) => self.take(TokenKind::ReNoMatch),
            ('!', _) => TokenKind::Bang,

            ('&', Some('&')) => self.take(TokenKind::And),
            ('&', _) => TokenKind::Amp,

            ('|', Some('|')) => self.take(TokenKind::Or),
            ('|', _) => TokenKind::Pipe,

            ('<', Some('=')) => self.take(TokenKind::LessEqual),
            ('<', Some('<')) => {
                self.cursor.advance();
                if self.cursor.eat('=') {
                    TokenKind::LessLessEqual
                } else {
                    TokenKind::LessLess
                }
            }
            ('<', _) => TokenKind::Less,

            ('>', Some('=')) => self.take(TokenKind::GreaterEqual),
            ('>', Some('<')) => self.take(TokenKind::Match),
            ('>', Some('!')) if self.cursor.peek_nth(1) == Some('<') => {
                self.cursor.advance_bytes(2);
                TokenKind::NoMatch
            }
            ('>', Some('>')) => {
                self.cursor.advance();
                match self.cursor.peek() {
                    Some('>') => {
                        self.cursor.advance();
                        if self.cursor.eat('=') {
                            TokenKind::GreaterGreaterGreaterEqual
                        } else {
                            TokenKind::GreaterGreaterGreater
                        }
                    }
                    Some('=') => self.take(TokenKind::GreaterGreaterEqual),
                    _ => TokenKind::GreaterGreater,
                }
            }
            ('>', _) => TokenKind::Greater,

            _ => {
                let error = LexError::UnexpectedChar {
                    ch: c,
                    span: start.span(c.len_utf8() as u32),
                };
                return self.make_error(error, start);
            }
        };

        self.make_token(kind, start)
    }

    /// Consume the lookahead character and yield `kind`.
    #[inline]
    fn take(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }
}

/// Where the token being scanned began.
#[derive(Clone, Copy)]
struct Start {
    line: u32,
    col: u32,
    offset: u32,
}

impl Start {
    #[inline]
    fn span(self, len: u32) -> Span {
        Span::new(self.line, self.col, len)
    }
}

/// Yields tokens up to (not including) end of input, or the lexical error
/// that stopped the scan.
impl<'src, 'ast> Iterator for Lexer<'src, 'ast> {
    type Item = Result<Token<'ast>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let token = self.next_token();
        match token.kind {
            TokenKind::Eof => {
                self.exhausted = true;
                None
            }
            TokenKind::Error => {
                self.exhausted = true;
                self.take_error().map(Err)
            }
            _ => Some(Ok(token)),
        }
    }
}

/// Tokenize a whole buffer.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn tokenize<'ast>(source: &str, arena: &'ast Bump) -> Result<Vec<Token<'ast>>, LexError> {
    Lexer::new(source, arena).collect()
}
