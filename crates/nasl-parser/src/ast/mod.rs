//! Syntax tree for NASL scripts.
//!
//! This module provides:
//! - Node definitions for every NASL construct
//! - The parser that builds them
//! - Open ([`Visitor`]) and exhaustive ([`Translator`]) traversal
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use nasl_parser::ast::{Node, Parser};
//!
//! let arena = Bump::new();
//! let source = r#"
//!     include("http_func.inc");
//!
//!     function check(port) {
//!         local_var banner;
//!         banner = get_http_banner(port: port);
//!         if (banner =~ "Server: Apache") return 1;
//!         return 0;
//!     }
//! "#;
//!
//! let script = Parser::parse(source, &arena).unwrap();
//! assert_eq!(script.instructions().len(), 2);
//! assert!(matches!(script.instructions()[1], Node::FuncDecl(_)));
//! ```

pub mod node;
pub mod ops;

mod parser;

pub mod expr;
mod expr_parser;

pub mod stmt;
mod stmt_parser;

pub mod printer;
pub mod translate;
pub mod visitor;

pub use nasl_core::{NaslError, ParseError, ParseErrorKind, ParseErrors};

pub use expr::*;
pub use node::*;
pub use ops::*;
pub use parser::{ParseOptions, Parser};
pub use printer::AstPrinter;
pub use stmt::*;
pub use translate::Translator;
pub use visitor::{KindCounter, Visitor};
