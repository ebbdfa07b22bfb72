//! Shared types for the NASL front end.
//!
//! This crate holds what every stage of the front end agrees on: source
//! positions ([`Span`]) and the diagnostic types produced by the lexer and the
//! parser. The lexer, parser and tree types live in `nasl-parser`.

mod error;
mod span;

pub use error::{FoundToken, LexError, NaslError, ParseError, ParseErrorKind, ParseErrors};
pub use span::Span;
