//! Instruction and declaration nodes.

use nasl_core::Span;

use crate::ast::{FuncCall, Ident, Node, VarName};

/// An ordered sequence of instructions: a program body or a braced block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstrList<'ast> {
    pub instrs: &'ast [Node<'ast>],
    pub span: Span,
}

/// Declared names in source order: parameters, `local_var` or `global_var`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArgDeclList<'ast> {
    pub names: &'ast [Ident<'ast>],
    pub span: Span,
}

/// Names held by a declaration slot: an [`ArgDeclList`] or [`Node::Empty`].
fn declared<'ast>(slot: Node<'ast>) -> &'ast [Ident<'ast>] {
    match slot {
        Node::ArgDeclList(list) => list.names,
        _ => &[],
    }
}

/// `function name(params) { body }`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuncDecl<'ast> {
    pub name: Ident<'ast>,
    /// An [`ArgDeclList`], or [`Node::Empty`] when there are no parameters.
    pub params: Node<'ast>,
    pub body: &'ast InstrList<'ast>,
    pub span: Span,
}

impl<'ast> FuncDecl<'ast> {
    pub fn parameters(&self) -> &'ast [Ident<'ast>] {
        declared(self.params)
    }
}

/// `local_var a, b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalVar<'ast> {
    /// An [`ArgDeclList`], or [`Node::Empty`] for a bare `local_var`.
    pub decls: Node<'ast>,
    pub span: Span,
}

impl<'ast> LocalVar<'ast> {
    pub fn names(&self) -> &'ast [Ident<'ast>] {
        declared(self.decls)
    }
}

/// `global_var a, b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalVar<'ast> {
    pub decls: Node<'ast>,
    pub span: Span,
}

impl<'ast> GlobalVar<'ast> {
    pub fn names(&self) -> &'ast [Ident<'ast>] {
        declared(self.decls)
    }
}

/// `if (condition) then [else otherwise]`.
///
/// A missing else branch is `None`; `else ;` is `Some(Node::Empty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfBlock<'ast> {
    pub condition: Node<'ast>,
    pub then_branch: Node<'ast>,
    pub else_branch: Option<Node<'ast>>,
    pub span: Span,
}

/// `for (init; condition; step) body`.
///
/// `init` and `step` are [`Node::Empty`] when left out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForLoop<'ast> {
    pub init: Node<'ast>,
    pub condition: Node<'ast>,
    pub step: Node<'ast>,
    pub body: Node<'ast>,
    pub span: Span,
}

/// `foreach element (iterable) body`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForeachLoop<'ast> {
    pub element: &'ast VarName<'ast>,
    pub iterable: Node<'ast>,
    pub body: Node<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhileLoop<'ast> {
    pub condition: Node<'ast>,
    pub body: Node<'ast>,
    pub span: Span,
}

/// `repeat body until condition;`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatLoop<'ast> {
    pub body: Node<'ast>,
    pub condition: Node<'ast>,
    pub span: Span,
}

/// `call() x count`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repetition<'ast> {
    pub call: &'ast FuncCall<'ast>,
    pub count: Node<'ast>,
    pub span: Span,
}

/// `include("file.inc")`; the file name is kept quoted and unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Include<'ast> {
    pub filename: &'ast str,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakInstr {
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinueInstr {
    pub span: Span,
}

/// `return [value]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnInstr<'ast> {
    pub value: Option<Node<'ast>>,
    pub span: Span,
}

/// Explicit "nothing here": an empty argument or declaration list, an
/// omitted `for` clause, or a bare `;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Empty {
    pub span: Span,
}
