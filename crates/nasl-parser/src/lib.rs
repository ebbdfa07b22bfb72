//! NASL parser crate.
//!
//! This crate provides the lexer and parser for NASL, the scripting language
//! of vulnerability-check plugins. It includes:
//! - Lexical analysis (tokenization)
//! - Syntax tree definitions
//! - A parser with strict and error-recovering modes
//! - Open and exhaustive traversal of the tree
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use nasl_parser::Parser;
//!
//! let arena = Bump::new();
//! let source = r#"
//!     port = get_kb_item("Services/www");
//!     if (!port) port = 80;
//!     send(socket: soc, data: req) x 3;
//! "#;
//!
//! match Parser::parse(source, &arena) {
//!     Ok(script) => println!("{} instructions", script.instructions().len()),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

pub mod lexer;

pub mod ast;

pub use ast::{ParseOptions, Parser, Script};
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use nasl_core::{LexError, NaslError, ParseError, ParseErrorKind, ParseErrors, Span};
