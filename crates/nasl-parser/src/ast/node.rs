//! The closed set of node kinds and the tree root.

use std::fmt;

use nasl_core::Span;

use crate::ast::expr::*;
use crate::ast::printer::AstPrinter;
use crate::ast::stmt::*;

/// An identifier with source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ident<'ast> {
    pub name: &'ast str,
    pub span: Span,
}

impl<'ast> Ident<'ast> {
    pub fn new(name: &'ast str, span: Span) -> Self {
        Self { name, span }
    }
}

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Any node of the tree.
///
/// Every variant points into the arena, so a `Node` is two words and
/// `Copy`. Nodes are never modified once their parent holds them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'ast> {
    Atom(&'ast Atom<'ast>),
    IpAddr(&'ast IpAddr<'ast>),
    VarName(&'ast VarName<'ast>),
    LocalVar(&'ast LocalVar<'ast>),
    GlobalVar(&'ast GlobalVar<'ast>),
    Arg(&'ast Arg<'ast>),
    ArgAttribute(&'ast ArgAttribute<'ast>),
    FuncCall(&'ast FuncCall<'ast>),
    FuncDecl(&'ast FuncDecl<'ast>),
    ArgList(&'ast ArgList<'ast>),
    ArgDeclList(&'ast ArgDeclList<'ast>),
    InstrList(&'ast InstrList<'ast>),
    IfBlock(&'ast IfBlock<'ast>),
    Affectation(&'ast Affectation<'ast>),
    Repetition(&'ast Repetition<'ast>),
    Include(&'ast Include<'ast>),
    Expression(&'ast Expression<'ast>),
    RExpression(&'ast RExpression<'ast>),
    PostIncr(&'ast PostIncr<'ast>),
    PreIncr(&'ast PreIncr<'ast>),
    ArrayElem(&'ast ArrayElem<'ast>),
    ArrayDataList(&'ast ArrayDataList<'ast>),
    ConstArray(&'ast ConstArray<'ast>),
    ForLoop(&'ast ForLoop<'ast>),
    ForeachLoop(&'ast ForeachLoop<'ast>),
    WhileLoop(&'ast WhileLoop<'ast>),
    RepeatLoop(&'ast RepeatLoop<'ast>),
    Break(&'ast BreakInstr),
    Continue(&'ast ContinueInstr),
    Return(&'ast ReturnInstr<'ast>),
    Empty(&'ast Empty),
}

/// The kind of a [`Node`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    Atom,
    IpAddr,
    VarName,
    LocalVar,
    GlobalVar,
    Arg,
    ArgAttribute,
    FuncCall,
    FuncDecl,
    ArgList,
    ArgDeclList,
    InstrList,
    IfBlock,
    Affectation,
    Repetition,
    Include,
    Expression,
    RExpression,
    PostIncr,
    PreIncr,
    ArrayElem,
    ArrayDataList,
    ConstArray,
    ForLoop,
    ForeachLoop,
    WhileLoop,
    RepeatLoop,
    Break,
    Continue,
    Return,
    Empty,
}

impl NodeKind {
    pub const ALL: [NodeKind; 31] = [
        NodeKind::Atom,
        NodeKind::IpAddr,
        NodeKind::VarName,
        NodeKind::LocalVar,
        NodeKind::GlobalVar,
        NodeKind::Arg,
        NodeKind::ArgAttribute,
        NodeKind::FuncCall,
        NodeKind::FuncDecl,
        NodeKind::ArgList,
        NodeKind::ArgDeclList,
        NodeKind::InstrList,
        NodeKind::IfBlock,
        NodeKind::Affectation,
        NodeKind::Repetition,
        NodeKind::Include,
        NodeKind::Expression,
        NodeKind::RExpression,
        NodeKind::PostIncr,
        NodeKind::PreIncr,
        NodeKind::ArrayElem,
        NodeKind::ArrayDataList,
        NodeKind::ConstArray,
        NodeKind::ForLoop,
        NodeKind::ForeachLoop,
        NodeKind::WhileLoop,
        NodeKind::RepeatLoop,
        NodeKind::Break,
        NodeKind::Continue,
        NodeKind::Return,
        NodeKind::Empty,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Atom => "Atom",
            NodeKind::IpAddr => "IpAddr",
            NodeKind::VarName => "VarName",
            NodeKind::LocalVar => "LocalVar",
            NodeKind::GlobalVar => "GlobalVar",
            NodeKind::Arg => "Arg",
            NodeKind::ArgAttribute => "ArgAttribute",
            NodeKind::FuncCall => "FuncCall",
            NodeKind::FuncDecl => "FuncDecl",
            NodeKind::ArgList => "ArgList",
            NodeKind::ArgDeclList => "ArgDeclList",
            NodeKind::InstrList => "InstrList",
            NodeKind::IfBlock => "IfBlock",
            NodeKind::Affectation => "Affectation",
            NodeKind::Repetition => "Repetition",
            NodeKind::Include => "Include",
            NodeKind::Expression => "Expression",
            NodeKind::RExpression => "RExpression",
            NodeKind::PostIncr => "PostIncr",
            NodeKind::PreIncr => "PreIncr",
            NodeKind::ArrayElem => "ArrayElem",
            NodeKind::ArrayDataList => "ArrayDataList",
            NodeKind::ConstArray => "ConstArray",
            NodeKind::ForLoop => "ForLoop",
            NodeKind::ForeachLoop => "ForeachLoop",
            NodeKind::WhileLoop => "WhileLoop",
            NodeKind::RepeatLoop => "RepeatLoop",
            NodeKind::Break => "BreakInstr",
            NodeKind::Continue => "ContinueInstr",
            NodeKind::Return => "ReturnInstr",
            NodeKind::Empty => "Empty",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'ast> Node<'ast> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Atom(_) => NodeKind::Atom,
            Node::IpAddr(_) => NodeKind::IpAddr,
            Node::VarName(_) => NodeKind::VarName,
            Node::LocalVar(_) => NodeKind::LocalVar,
            Node::GlobalVar(_) => NodeKind::GlobalVar,
            Node::Arg(_) => NodeKind::Arg,
            Node::ArgAttribute(_) => NodeKind::ArgAttribute,
            Node::FuncCall(_) => NodeKind::FuncCall,
            Node::FuncDecl(_) => NodeKind::FuncDecl,
            Node::ArgList(_) => NodeKind::ArgList,
            Node::ArgDeclList(_) => NodeKind::ArgDeclList,
            Node::InstrList(_) => NodeKind::InstrList,
            Node::IfBlock(_) => NodeKind::IfBlock,
            Node::Affectation(_) => NodeKind::Affectation,
            Node::Repetition(_) => NodeKind::Repetition,
            Node::Include(_) => NodeKind::Include,
            Node::Expression(_) => NodeKind::Expression,
            Node::RExpression(_) => NodeKind::RExpression,
            Node::PostIncr(_) => NodeKind::PostIncr,
            Node::PreIncr(_) => NodeKind::PreIncr,
            Node::ArrayElem(_) => NodeKind::ArrayElem,
            Node::ArrayDataList(_) => NodeKind::ArrayDataList,
            Node::ConstArray(_) => NodeKind::ConstArray,
            Node::ForLoop(_) => NodeKind::ForLoop,
            Node::ForeachLoop(_) => NodeKind::ForeachLoop,
            Node::WhileLoop(_) => NodeKind::WhileLoop,
            Node::RepeatLoop(_) => NodeKind::RepeatLoop,
            Node::Break(_) => NodeKind::Break,
            Node::Continue(_) => NodeKind::Continue,
            Node::Return(_) => NodeKind::Return,
            Node::Empty(_) => NodeKind::Empty,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Node::Atom(n) => n.span,
            Node::IpAddr(n) => n.span,
            Node::VarName(n) => n.span,
            Node::LocalVar(n) => n.span,
            Node::GlobalVar(n) => n.span,
            Node::Arg(n) => n.span,
            Node::ArgAttribute(n) => n.span,
            Node::FuncCall(n) => n.span,
            Node::FuncDecl(n) => n.span,
            Node::ArgList(n) => n.span,
            Node::ArgDeclList(n) => n.span,
            Node::InstrList(n) => n.span,
            Node::IfBlock(n) => n.span,
            Node::Affectation(n) => n.span,
            Node::Repetition(n) => n.span,
            Node::Include(n) => n.span,
            Node::Expression(n) => n.span,
            Node::RExpression(n) => n.span,
            Node::PostIncr(n) => n.span,
            Node::PreIncr(n) => n.span,
            Node::ArrayElem(n) => n.span,
            Node::ArrayDataList(n) => n.span,
            Node::ConstArray(n) => n.span,
            Node::ForLoop(n) => n.span,
            Node::ForeachLoop(n) => n.span,
            Node::WhileLoop(n) => n.span,
            Node::RepeatLoop(n) => n.span,
            Node::Break(n) => n.span,
            Node::Continue(n) => n.span,
            Node::Return(n) => n.span,
            Node::Empty(n) => n.span,
        }
    }

    pub fn is_empty_marker(&self) -> bool {
        matches!(self, Node::Empty(_))
    }

    /// View a loop or branch body as a sequence of instructions.
    ///
    /// A braced body is an [`InstrList`]; a bare one is a single
    /// instruction. Both read the same through this view.
    pub fn instructions(&'ast self) -> &'ast [Node<'ast>] {
        match self {
            Node::InstrList(list) => list.instrs,
            single => std::slice::from_ref(single),
        }
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&AstPrinter::new().print(*self))
    }
}

/// A parsed script: its top-level instructions and function declarations
/// in source order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Script<'ast> {
    pub body: &'ast InstrList<'ast>,
    pub span: Span,
}

impl<'ast> Script<'ast> {
    pub fn instructions(&self) -> &'ast [Node<'ast>] {
        self.body.instrs
    }

    pub fn root(&self) -> Node<'ast> {
        Node::InstrList(self.body)
    }

    pub fn is_empty(&self) -> bool {
        self.body.instrs.is_empty()
    }

    /// Function declarations in source order.
    pub fn functions(&self) -> impl Iterator<Item = &'ast FuncDecl<'ast>> + 'ast {
        self.body.instrs.iter().filter_map(|node| match node {
            Node::FuncDecl(decl) => Some(*decl),
            _ => None,
        })
    }
}

impl fmt::Display for Script<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root().fmt(f)
    }
}
