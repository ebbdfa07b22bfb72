//! Lexical analysis for NASL.

mod cursor;
#[allow(clippy::module_inception)]
mod lexer;
mod token;

pub use lexer::{Lexer, tokenize};
pub use token::{Token, TokenKind, lookup_keyword};
