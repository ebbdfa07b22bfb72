//! Error types for lexing and parsing NASL scripts.
//!
//! ```text
//! NaslError (what a parse call returns)
//! ├── Lex            - LexError, always fatal for the file
//! ├── Syntax         - ParseError, fatal unless the parse runs in recovery mode
//! └── Unimplemented  - ParseError for a construct the grammar knows but does not build
//! ```
//!
//! In recovery mode syntax errors are not returned. They are collected into
//! [`ParseErrors`] next to the best-effort tree.

use std::fmt;

use thiserror::Error;

use crate::Span;

// ============================================================================
// Lexer Errors
// ============================================================================

/// Errors raised while turning source text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that starts no token.
    #[error("illegal character '{ch}' at {span}")]
    UnexpectedChar { ch: char, span: Span },

    /// A string literal whose closing quote never appears.
    #[error("unterminated string starting with {quote} at {span}")]
    UnterminatedString { quote: char, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
            LexError::UnterminatedString { span, .. } => *span,
        }
    }

    /// The character the lexer stopped at.
    pub fn offending_char(&self) -> char {
        match self {
            LexError::UnexpectedChar { ch, .. } => *ch,
            LexError::UnterminatedString { quote, .. } => *quote,
        }
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Categories of syntax errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A specific token was expected but not found.
    ExpectedToken,
    /// A token that no rule accepts at this position.
    UnexpectedToken,
    /// Input ended inside a construct.
    UnexpectedEof,
    /// An expression was expected.
    ExpectedExpression,
    /// A name was expected.
    ExpectedIdentifier,
    /// An instruction was expected.
    ExpectedStatement,
    /// An assignment or increment applied to something that is not a name
    /// or an indexed element.
    InvalidAssignmentTarget,
    /// Two operators of the same non-associative level were chained.
    NonAssociative,
    /// `=~` or `!~` without a string literal pattern.
    ExpectedPattern,
    /// Input left over after a complete expression or instruction.
    TrailingInput,
    /// Blocks or expressions nested past the parser's depth limit.
    NestingTooDeep,
    /// A construct the grammar recognizes but the front end does not build.
    NotImplemented,
}

impl ParseErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::ExpectedToken => "expected token",
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::UnexpectedEof => "unexpected end of file",
            ParseErrorKind::ExpectedExpression => "expected expression",
            ParseErrorKind::ExpectedIdentifier => "expected identifier",
            ParseErrorKind::ExpectedStatement => "expected statement",
            ParseErrorKind::InvalidAssignmentTarget => "invalid assignment target",
            ParseErrorKind::NonAssociative => "non-associative operators chained",
            ParseErrorKind::ExpectedPattern => "expected string pattern",
            ParseErrorKind::TrailingInput => "trailing input",
            ParseErrorKind::NestingTooDeep => "nesting too deep",
            ParseErrorKind::NotImplemented => "not implemented",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The token a syntax error was raised at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FoundToken {
    /// Grammar symbol of the token, e.g. `SEMI` or `ID`.
    pub kind: &'static str,
    /// Source text of the token; empty at end of input.
    pub lexeme: String,
}

impl fmt::Display for FoundToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lexeme.is_empty() {
            f.write_str(self.kind)
        } else {
            write!(f, "{} '{}'", self.kind, self.lexeme)
        }
    }
}

/// A syntax error with its location and the token it was raised at.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {span}: {message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub message: String,
    /// The offending token, when the error was raised at one.
    pub found: Option<FoundToken>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
            found: None,
        }
    }

    /// Attach the offending token.
    pub fn with_found(mut self, kind: &'static str, lexeme: impl Into<String>) -> Self {
        self.found = Some(FoundToken {
            kind,
            lexeme: lexeme.into(),
        });
        self
    }

    pub fn expected_token(span: Span, expected: &str, found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExpectedToken,
            span,
            format!("expected {expected}, found {found}"),
        )
    }

    pub fn unexpected_token(span: Span, token: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken,
            span,
            format!("unexpected {token}"),
        )
    }

    pub fn unexpected_eof(span: Span, expected: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEof,
            span,
            format!("expected {expected}, found end of file"),
        )
    }

    pub fn expected_identifier(span: Span, found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExpectedIdentifier,
            span,
            format!("expected identifier, found {found}"),
        )
    }

    pub fn expected_expression(span: Span, found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExpectedExpression,
            span,
            format!("expected expression, found {found}"),
        )
    }

    /// The line the error was raised on.
    pub fn line(&self) -> u32 {
        self.span.line
    }

    /// Render the error with the offending source line and a caret under it.
    pub fn display_with_source(&self, source: &str) -> String {
        let mut output = format!("error at {}: {}\n", self.span, self.kind);
        if !self.message.is_empty() {
            output.push_str(&format!("  {}\n", self.message));
        }

        let line_text = (self.span.line as usize)
            .checked_sub(1)
            .and_then(|idx| source.lines().nth(idx));
        if let Some(line_text) = line_text {
            let indent = " ".repeat(self.span.col.saturating_sub(1) as usize);
            let underline = "~".repeat(self.span.len.saturating_sub(1) as usize);
            output.push_str("    |\n");
            output.push_str(&format!("{:>3} | {}\n", self.span.line, line_text));
            output.push_str(&format!("    | {indent}^{underline}\n"));
        }

        output
    }
}

/// Diagnostics collected by a parse in recovery mode, in the order they were
/// raised.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseErrors {
    errors: Vec<ParseError>,
}

impl ParseErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter()
    }

    pub fn first(&self) -> Option<&ParseError> {
        self.errors.first()
    }

    pub fn into_vec(self) -> Vec<ParseError> {
        self.errors
    }
}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl From<ParseError> for ParseErrors {
    fn from(error: ParseError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

// ============================================================================
// Top-level error
// ============================================================================

/// Why a parse call failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NaslError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] ParseError),

    #[error("unsupported construct: {0}")]
    Unimplemented(ParseError),
}

impl NaslError {
    pub fn is_lex(&self) -> bool {
        matches!(self, NaslError::Lex(_))
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, NaslError::Syntax(_))
    }

    pub fn is_unimplemented(&self) -> bool {
        matches!(self, NaslError::Unimplemented(_))
    }

    /// Errors that stop a parse even in recovery mode.
    pub fn is_fatal(&self) -> bool {
        !self.is_syntax()
    }

    pub fn span(&self) -> Span {
        match self {
            NaslError::Lex(err) => err.span(),
            NaslError::Syntax(err) | NaslError::Unimplemented(err) => err.span,
        }
    }

    /// Short category name, used to tally failures across many files.
    pub fn category(&self) -> &'static str {
        match self {
            NaslError::Lex(_) => "lexical",
            NaslError::Syntax(_) => "syntax",
            NaslError::Unimplemented(_) => "unimplemented",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_names_the_character() {
        let err = LexError::UnexpectedChar {
            ch: '@',
            span: Span::new(2, 4, 1),
        };
        assert_eq!(err.to_string(), "illegal character '@' at 2:4");
        assert_eq!(err.offending_char(), '@');
        assert_eq!(err.span(), Span::new(2, 4, 1));
    }

    #[test]
    fn unterminated_string_reports_quote() {
        let err = LexError::UnterminatedString {
            quote: '\'',
            span: Span::new(1, 9, 1),
        };
        assert_eq!(err.offending_char(), '\'');
        assert!(err.to_string().contains("unterminated string"));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::expected_token(Span::new(1, 10, 1), "';'", "'}'");
        assert_eq!(
            err.to_string(),
            "expected token at 1:10: expected ';', found '}'"
        );
        assert_eq!(err.line(), 1);
    }

    #[test]
    fn parse_error_carries_found_token() {
        let err = ParseError::unexpected_token(Span::new(3, 1, 4), "'else'")
            .with_found("ELSE", "else");
        let found = err.found.as_ref().map(ToString::to_string);
        assert_eq!(found.as_deref(), Some("ELSE 'else'"));
    }

    #[test]
    fn found_token_at_eof_has_no_lexeme() {
        let err = ParseError::unexpected_eof(Span::point(1, 9), "'}'").with_found("EOF", "");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEof);
        assert_eq!(err.found.map(|f| f.to_string()).as_deref(), Some("EOF"));
    }

    #[test]
    fn display_with_source_points_at_token() {
        let source = "a = 1;\nb = = 2;\n";
        let err = ParseError::expected_expression(Span::new(2, 5, 1), "'='");
        let rendered = err.display_with_source(source);
        assert!(rendered.contains("  2 | b = = 2;"));
        assert!(rendered.contains("    |     ^\n"));
    }

    #[test]
    fn display_with_source_out_of_range_line() {
        let err = ParseError::new(ParseErrorKind::UnexpectedEof, Span::point(0, 0), "");
        assert_eq!(err.display_with_source("x"), "error at 0:0: unexpected end of file\n");
    }

    #[test]
    fn parse_errors_keep_order() {
        let mut errors = ParseErrors::new();
        assert!(errors.is_empty());
        errors.push(ParseError::new(ParseErrorKind::ExpectedToken, Span::new(1, 1, 1), "first"));
        errors.push(ParseError::new(ParseErrorKind::UnexpectedToken, Span::new(4, 1, 1), "second"));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first().map(|e| e.message.as_str()), Some("first"));
        let lines: Vec<u32> = errors.iter().map(ParseError::line).collect();
        assert_eq!(lines, vec![1, 4]);
        assert_eq!(errors.to_string().lines().count(), 2);
    }

    #[test]
    fn nasl_error_classification() {
        let lex: NaslError = LexError::UnexpectedChar {
            ch: '$',
            span: Span::new(1, 1, 1),
        }
        .into();
        assert!(lex.is_lex() && lex.is_fatal());
        assert_eq!(lex.category(), "lexical");

        let syntax: NaslError = ParseError::unexpected_token(Span::new(5, 2, 1), "')'").into();
        assert!(syntax.is_syntax() && !syntax.is_fatal());
        assert_eq!(syntax.span().line, 5);

        let unimpl = NaslError::Unimplemented(ParseError::new(
            ParseErrorKind::NotImplemented,
            Span::new(1, 2, 5),
            "keyed array entries",
        ));
        assert!(unimpl.is_unimplemented() && unimpl.is_fatal());
        assert_eq!(unimpl.category(), "unimplemented");
    }
}
