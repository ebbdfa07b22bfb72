//! Front end for NASL, the scripting language of vulnerability-check
//! plugins.
//!
//! Source text goes through the lexer and the parser into an arena-allocated
//! syntax tree, which consumers walk with a [`Visitor`] (handle the kinds you
//! care about) or a [`Translator`] (handle every kind).
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use nasl::{KindCounter, NodeKind, Visitor};
//!
//! let arena = Bump::new();
//! let script = nasl::parse("if (port) send(socket: soc, data: req);", &arena).unwrap();
//!
//! let mut counter = KindCounter::new();
//! counter.visit_script(&script);
//! assert_eq!(counter.count(NodeKind::FuncCall), 1);
//! ```

use bumpalo::Bump;

pub use nasl_core::{FoundToken, LexError, NaslError, ParseError, ParseErrorKind, ParseErrors, Span};
pub use nasl_parser::ast::{self, *};
pub use nasl_parser::lexer::{self, Lexer, Token, TokenKind, tokenize};

/// Parse a script, failing on the first lexical or syntax error.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// match nasl::parse("display('hello');", &arena) {
///     Ok(script) => println!("{} instructions", script.instructions().len()),
///     Err(err) => eprintln!("{err}"),
/// }
/// ```
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn parse<'ast>(source: &str, arena: &'ast Bump) -> Result<Script<'ast>, NaslError> {
    Parser::parse(source, arena)
}

/// Parse a script, collecting syntax errors instead of stopping at the
/// first one.
///
/// The script holds every instruction that parsed; the diagnostics list the
/// rest. Lexical errors and unsupported constructs still fail the call.
///
/// ```
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let (script, errors) = nasl::parse_lenient("a = ; b = 2;", &arena).unwrap();
/// assert_eq!(script.instructions().len(), 1);
/// assert_eq!(errors.len(), 1);
/// ```
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn parse_lenient<'ast>(
    source: &str,
    arena: &'ast Bump,
) -> Result<(Script<'ast>, ParseErrors), NaslError> {
    Parser::parse_lenient(source, arena)
}

/// Parse a script with explicit [`ParseOptions`].
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn parse_with<'ast>(
    source: &str,
    arena: &'ast Bump,
    options: &ParseOptions,
) -> Result<(Script<'ast>, ParseErrors), NaslError> {
    Parser::parse_with(source, arena, options)
}

/// Parse a single expression, e.g. for tooling or tests.
///
/// ```
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let expr = nasl::parse_expression("1 + 2 * 3", &arena).unwrap();
/// assert_eq!(expr.to_string(), "Expression(Atom(1) + Expression(Atom(2) * Atom(3)))");
/// ```
pub fn parse_expression<'ast>(source: &str, arena: &'ast Bump) -> Result<Node<'ast>, NaslError> {
    Parser::expression(source, arena)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_and_lenient_agree_on_valid_input() {
        let source = "a = 1; if (a) b(); else c();";
        let strict_arena = Bump::new();
        let lenient_arena = Bump::new();

        let strict = parse(source, &strict_arena).unwrap();
        let (lenient, errors) = parse_lenient(source, &lenient_arena).unwrap();

        assert!(errors.is_empty());
        assert_eq!(strict.to_string(), lenient.to_string());
    }

    #[test]
    fn strict_reports_first_error() {
        let arena = Bump::new();
        let err = parse("a = ;\nb = ;", &arena).unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.span().line, 1);
    }

    #[test]
    fn options_select_mode() {
        let arena = Bump::new();
        let (script, errors) =
            parse_with("a = ;\nb = ;\nc();", &arena, &ParseOptions::recovering()).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.iter().map(|e| e.line()).collect::<Vec<_>>(), [1, 2]);
        assert_eq!(script.instructions().len(), 1);
    }
}
