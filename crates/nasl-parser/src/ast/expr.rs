//! Expression nodes.
//!
//! Operands are held as [`Node`]s because NASL does not separate
//! expressions from instructions: an assignment, a call or an increment is
//! valid in both positions.

use nasl_core::Span;

use crate::ast::{AssignOp, BinaryOp, Ident, IncrOp, Node, UnaryOp};

/// What kind of literal an [`Atom`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    Integer,
    String,
}

/// An integer or string literal, kept as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atom<'ast> {
    pub kind: AtomKind,
    /// Raw lexeme. String atoms keep their quotes.
    pub value: &'ast str,
    pub span: Span,
}

impl<'ast> Atom<'ast> {
    /// Numeric value of an integer atom, decimal or `0x` hexadecimal.
    pub fn as_integer(&self) -> Option<i64> {
        if self.kind != AtomKind::Integer {
            return None;
        }
        match self.value.get(..2) {
            Some("0x" | "0X") => i64::from_str_radix(&self.value[2..], 16).ok(),
            _ => self.value.parse().ok(),
        }
    }

    /// The quote character of a string atom.
    pub fn quote(&self) -> Option<char> {
        match self.kind {
            AtomKind::String => self.value.chars().next(),
            AtomKind::Integer => None,
        }
    }

    /// String contents without the surrounding quotes. Escapes are left as
    /// written.
    pub fn unquoted(&self) -> Option<&'ast str> {
        match self.kind {
            AtomKind::String if self.value.len() >= 2 => Some(&self.value[1..self.value.len() - 1]),
            _ => None,
        }
    }
}

/// A dotted-quad literal such as `192.168.0.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpAddr<'ast> {
    /// The four integer components, as written.
    pub octets: [&'ast str; 4],
    /// The components joined with dots.
    pub value: &'ast str,
    pub span: Span,
}

/// A reference to a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarName<'ast> {
    pub name: Ident<'ast>,
    pub span: Span,
}

/// `name[index]`; the index may be any expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayElem<'ast> {
    pub name: Ident<'ast>,
    pub index: Node<'ast>,
    pub span: Span,
}

/// A positional call argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arg<'ast> {
    pub value: Node<'ast>,
    pub span: Span,
}

/// A named call argument, `name: value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArgAttribute<'ast> {
    pub name: Ident<'ast>,
    pub value: Node<'ast>,
    pub span: Span,
}

/// Call arguments in source order. Holds [`Arg`] and [`ArgAttribute`]
/// nodes, freely mixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArgList<'ast> {
    pub args: &'ast [Node<'ast>],
    pub span: Span,
}

/// `name(args)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuncCall<'ast> {
    pub name: Ident<'ast>,
    /// An [`ArgList`], or [`Node::Empty`] for `name()`.
    pub args: Node<'ast>,
    pub span: Span,
}

impl<'ast> FuncCall<'ast> {
    /// The arguments in source order; empty for `name()`.
    pub fn arguments(&self) -> &'ast [Node<'ast>] {
        match self.args {
            Node::ArgList(list) => list.args,
            _ => &[],
        }
    }
}

/// Binary operator application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expression<'ast> {
    pub left: Node<'ast>,
    pub op: BinaryOp,
    /// The operator exactly as written, e.g. `and` or `&&`.
    pub operation: &'ast str,
    pub right: Node<'ast>,
    pub span: Span,
}

/// Prefix operator application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RExpression<'ast> {
    pub op: UnaryOp,
    pub operation: &'ast str,
    pub operand: Node<'ast>,
    pub span: Span,
}

/// Assignment, itself usable as an expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affectation<'ast> {
    /// A [`VarName`] or an [`ArrayElem`].
    pub lvalue: Node<'ast>,
    pub op: AssignOp,
    pub value: Node<'ast>,
    pub span: Span,
}

/// `++a` / `--a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreIncr<'ast> {
    pub op: IncrOp,
    pub lvalue: Node<'ast>,
    pub span: Span,
}

/// `a++` / `a--`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostIncr<'ast> {
    pub lvalue: Node<'ast>,
    pub op: IncrOp,
    pub span: Span,
}

/// Array literal elements in source order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayDataList<'ast> {
    pub elems: &'ast [Node<'ast>],
    pub span: Span,
}

/// `[elem, ...]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstArray<'ast> {
    pub data: &'ast ArrayDataList<'ast>,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(kind: AtomKind, value: &str) -> Atom<'_> {
        Atom {
            kind,
            value,
            span: Span::new(1, 1, value.len() as u32),
        }
    }

    #[test]
    fn integer_values() {
        assert_eq!(atom(AtomKind::Integer, "42").as_integer(), Some(42));
        assert_eq!(atom(AtomKind::Integer, "0x1F").as_integer(), Some(31));
        assert_eq!(atom(AtomKind::Integer, "0XfF").as_integer(), Some(255));
        assert_eq!(atom(AtomKind::String, "\"42\"").as_integer(), None);
    }

    #[test]
    fn overflowing_integer_has_no_value() {
        let big = atom(AtomKind::Integer, "99999999999999999999");
        assert_eq!(big.as_integer(), None);
        assert_eq!(big.value, "99999999999999999999");
    }

    #[test]
    fn string_quotes() {
        let double = atom(AtomKind::String, "\"abc\"");
        assert_eq!(double.quote(), Some('"'));
        assert_eq!(double.unquoted(), Some("abc"));

        let single = atom(AtomKind::String, r"'a\nb'");
        assert_eq!(single.quote(), Some('\''));
        assert_eq!(single.unquoted(), Some(r"a\nb"));

        assert_eq!(atom(AtomKind::String, "''").unquoted(), Some(""));
        assert_eq!(atom(AtomKind::Integer, "7").unquoted(), None);
    }
}
