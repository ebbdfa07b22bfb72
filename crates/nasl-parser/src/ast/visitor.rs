//! Open traversal of the tree.
//!
//! [`Visitor`] has one `visit_*` method per node kind. Each default calls the
//! matching `walk_*` function, which visits the node's children in field
//! order. Override only the kinds you care about; everything else is walked
//! through generically. Every child, typed fields included, is reached
//! through [`Visitor::visit_node`]. To handle a node and still descend into
//! it, call the `walk_*` function from the override.
//!
//! ```
//! use bumpalo::Bump;
//! use nasl_parser::ast::{FuncCall, Parser, visitor::{self, Visitor}};
//!
//! #[derive(Default)]
//! struct Calls<'ast>(Vec<&'ast str>);
//!
//! impl<'ast> Visitor<'ast> for Calls<'ast> {
//!     fn visit_func_call(&mut self, call: &'ast FuncCall<'ast>) {
//!         self.0.push(call.name.name);
//!         visitor::walk_func_call(self, call);
//!     }
//! }
//!
//! let arena = Bump::new();
//! let script = Parser::parse("if (get_kb_item(\"k\")) security_message(port: 80);", &arena).unwrap();
//! let mut calls = Calls::default();
//! calls.visit_script(&script);
//! assert_eq!(calls.0, ["get_kb_item", "security_message"]);
//! ```
//!
//! For consumers that must handle every kind, see
//! [`Translator`](crate::ast::translate::Translator).

use rustc_hash::FxHashMap;

use crate::ast::expr::*;
use crate::ast::stmt::*;
use crate::ast::{Ident, Node, NodeKind, Script};

/// Depth-first traversal with per-kind hooks.
pub trait Visitor<'ast>: Sized {
    fn visit_script(&mut self, script: &Script<'ast>) {
        walk_script(self, script);
    }

    /// Dispatch on the node's kind.
    fn visit_node(&mut self, node: Node<'ast>) {
        walk_node(self, node);
    }

    fn visit_ident(&mut self, _ident: &Ident<'ast>) {}

    // === Literals and names ===

    fn visit_atom(&mut self, _atom: &'ast Atom<'ast>) {}

    fn visit_ip_addr(&mut self, _addr: &'ast IpAddr<'ast>) {}

    fn visit_var_name(&mut self, var: &'ast VarName<'ast>) {
        walk_var_name(self, var);
    }

    fn visit_array_elem(&mut self, elem: &'ast ArrayElem<'ast>) {
        walk_array_elem(self, elem);
    }

    fn visit_const_array(&mut self, array: &'ast ConstArray<'ast>) {
        walk_const_array(self, array);
    }

    fn visit_array_data_list(&mut self, list: &'ast ArrayDataList<'ast>) {
        walk_array_data_list(self, list);
    }

    // === Calls ===

    fn visit_func_call(&mut self, call: &'ast FuncCall<'ast>) {
        walk_func_call(self, call);
    }

    fn visit_arg_list(&mut self, list: &'ast ArgList<'ast>) {
        walk_arg_list(self, list);
    }

    fn visit_arg(&mut self, arg: &'ast Arg<'ast>) {
        walk_arg(self, arg);
    }

    fn visit_arg_attribute(&mut self, arg: &'ast ArgAttribute<'ast>) {
        walk_arg_attribute(self, arg);
    }

    // === Operators ===

    fn visit_expression(&mut self, expr: &'ast Expression<'ast>) {
        walk_expression(self, expr);
    }

    fn visit_r_expression(&mut self, expr: &'ast RExpression<'ast>) {
        walk_r_expression(self, expr);
    }

    fn visit_affectation(&mut self, aff: &'ast Affectation<'ast>) {
        walk_affectation(self, aff);
    }

    fn visit_pre_incr(&mut self, incr: &'ast PreIncr<'ast>) {
        walk_pre_incr(self, incr);
    }

    fn visit_post_incr(&mut self, incr: &'ast PostIncr<'ast>) {
        walk_post_incr(self, incr);
    }

    // === Declarations ===

    fn visit_func_decl(&mut self, decl: &'ast FuncDecl<'ast>) {
        walk_func_decl(self, decl);
    }

    fn visit_arg_decl_list(&mut self, list: &'ast ArgDeclList<'ast>) {
        walk_arg_decl_list(self, list);
    }

    fn visit_local_var(&mut self, decl: &'ast LocalVar<'ast>) {
        walk_local_var(self, decl);
    }

    fn visit_global_var(&mut self, decl: &'ast GlobalVar<'ast>) {
        walk_global_var(self, decl);
    }

    // === Instructions ===

    fn visit_instr_list(&mut self, list: &'ast InstrList<'ast>) {
        walk_instr_list(self, list);
    }

    fn visit_if_block(&mut self, block: &'ast IfBlock<'ast>) {
        walk_if_block(self, block);
    }

    fn visit_for_loop(&mut self, lp: &'ast ForLoop<'ast>) {
        walk_for_loop(self, lp);
    }

    fn visit_foreach_loop(&mut self, lp: &'ast ForeachLoop<'ast>) {
        walk_foreach_loop(self, lp);
    }

    fn visit_while_loop(&mut self, lp: &'ast WhileLoop<'ast>) {
        walk_while_loop(self, lp);
    }

    fn visit_repeat_loop(&mut self, lp: &'ast RepeatLoop<'ast>) {
        walk_repeat_loop(self, lp);
    }

    fn visit_repetition(&mut self, rep: &'ast Repetition<'ast>) {
        walk_repetition(self, rep);
    }

    fn visit_include(&mut self, _include: &'ast Include<'ast>) {}

    fn visit_return(&mut self, ret: &'ast ReturnInstr<'ast>) {
        walk_return(self, ret);
    }

    fn visit_break(&mut self, _instr: &'ast BreakInstr) {}

    fn visit_continue(&mut self, _instr: &'ast ContinueInstr) {}

    fn visit_empty(&mut self, _empty: &'ast Empty) {}
}

// ============================================================================
// Walk functions
// ============================================================================

pub fn walk_script<'ast, V: Visitor<'ast>>(visitor: &mut V, script: &Script<'ast>) {
    visitor.visit_node(script.root());
}

pub fn walk_node<'ast, V: Visitor<'ast>>(visitor: &mut V, node: Node<'ast>) {
    match node {
        Node::Atom(n) => visitor.visit_atom(n),
        Node::IpAddr(n) => visitor.visit_ip_addr(n),
        Node::VarName(n) => visitor.visit_var_name(n),
        Node::LocalVar(n) => visitor.visit_local_var(n),
        Node::GlobalVar(n) => visitor.visit_global_var(n),
        Node::Arg(n) => visitor.visit_arg(n),
        Node::ArgAttribute(n) => visitor.visit_arg_attribute(n),
        Node::FuncCall(n) => visitor.visit_func_call(n),
        Node::FuncDecl(n) => visitor.visit_func_decl(n),
        Node::ArgList(n) => visitor.visit_arg_list(n),
        Node::ArgDeclList(n) => visitor.visit_arg_decl_list(n),
        Node::InstrList(n) => visitor.visit_instr_list(n),
        Node::IfBlock(n) => visitor.visit_if_block(n),
        Node::Affectation(n) => visitor.visit_affectation(n),
        Node::Repetition(n) => visitor.visit_repetition(n),
        Node::Include(n) => visitor.visit_include(n),
        Node::Expression(n) => visitor.visit_expression(n),
        Node::RExpression(n) => visitor.visit_r_expression(n),
        Node::PostIncr(n) => visitor.visit_post_incr(n),
        Node::PreIncr(n) => visitor.visit_pre_incr(n),
        Node::ArrayElem(n) => visitor.visit_array_elem(n),
        Node::ArrayDataList(n) => visitor.visit_array_data_list(n),
        Node::ConstArray(n) => visitor.visit_const_array(n),
        Node::ForLoop(n) => visitor.visit_for_loop(n),
        Node::ForeachLoop(n) => visitor.visit_foreach_loop(n),
        Node::WhileLoop(n) => visitor.visit_while_loop(n),
        Node::RepeatLoop(n) => visitor.visit_repeat_loop(n),
        Node::Break(n) => visitor.visit_break(n),
        Node::Continue(n) => visitor.visit_continue(n),
        Node::Return(n) => visitor.visit_return(n),
        Node::Empty(n) => visitor.visit_empty(n),
    }
}

fn walk_nodes<'ast, V: Visitor<'ast>>(visitor: &mut V, nodes: &'ast [Node<'ast>]) {
    for node in nodes {
        visitor.visit_node(*node);
    }
}

pub fn walk_var_name<'ast, V: Visitor<'ast>>(visitor: &mut V, var: &'ast VarName<'ast>) {
    visitor.visit_ident(&var.name);
}

pub fn walk_array_elem<'ast, V: Visitor<'ast>>(visitor: &mut V, elem: &'ast ArrayElem<'ast>) {
    visitor.visit_ident(&elem.name);
    visitor.visit_node(elem.index);
}

pub fn walk_const_array<'ast, V: Visitor<'ast>>(visitor: &mut V, array: &'ast ConstArray<'ast>) {
    visitor.visit_node(Node::ArrayDataList(array.data));
}

pub fn walk_array_data_list<'ast, V: Visitor<'ast>>(
    visitor: &mut V,
    list: &'ast ArrayDataList<'ast>,
) {
    walk_nodes(visitor, list.elems);
}

pub fn walk_func_call<'ast, V: Visitor<'ast>>(visitor: &mut V, call: &'ast FuncCall<'ast>) {
    visitor.visit_ident(&call.name);
    visitor.visit_node(call.args);
}

pub fn walk_arg_list<'ast, V: Visitor<'ast>>(visitor: &mut V, list: &'ast ArgList<'ast>) {
    walk_nodes(visitor, list.args);
}

pub fn walk_arg<'ast, V: Visitor<'ast>>(visitor: &mut V, arg: &'ast Arg<'ast>) {
    visitor.visit_node(arg.value);
}

pub fn walk_arg_attribute<'ast, V: Visitor<'ast>>(visitor: &mut V, arg: &'ast ArgAttribute<'ast>) {
    visitor.visit_ident(&arg.name);
    visitor.visit_node(arg.value);
}

pub fn walk_expression<'ast, V: Visitor<'ast>>(visitor: &mut V, expr: &'ast Expression<'ast>) {
    visitor.visit_node(expr.left);
    visitor.visit_node(expr.right);
}

pub fn walk_r_expression<'ast, V: Visitor<'ast>>(visitor: &mut V, expr: &'ast RExpression<'ast>) {
    visitor.visit_node(expr.operand);
}

pub fn walk_affectation<'ast, V: Visitor<'ast>>(visitor: &mut V, aff: &'ast Affectation<'ast>) {
    visitor.visit_node(aff.lvalue);
    visitor.visit_node(aff.value);
}

pub fn walk_pre_incr<'ast, V: Visitor<'ast>>(visitor: &mut V, incr: &'ast PreIncr<'ast>) {
    visitor.visit_node(incr.lvalue);
}

pub fn walk_post_incr<'ast, V: Visitor<'ast>>(visitor: &mut V, incr: &'ast PostIncr<'ast>) {
    visitor.visit_node(incr.lvalue);
}

pub fn walk_func_decl<'ast, V: Visitor<'ast>>(visitor: &mut V, decl: &'ast FuncDecl<'ast>) {
    visitor.visit_ident(&decl.name);
    visitor.visit_node(decl.params);
    visitor.visit_node(Node::InstrList(decl.body));
}

pub fn walk_arg_decl_list<'ast, V: Visitor<'ast>>(visitor: &mut V, list: &'ast ArgDeclList<'ast>) {
    for name in list.names {
        visitor.visit_ident(name);
    }
}

pub fn walk_local_var<'ast, V: Visitor<'ast>>(visitor: &mut V, decl: &'ast LocalVar<'ast>) {
    visitor.visit_node(decl.decls);
}

pub fn walk_global_var<'ast, V: Visitor<'ast>>(visitor: &mut V, decl: &'ast GlobalVar<'ast>) {
    visitor.visit_node(decl.decls);
}

pub fn walk_instr_list<'ast, V: Visitor<'ast>>(visitor: &mut V, list: &'ast InstrList<'ast>) {
    walk_nodes(visitor, list.instrs);
}

pub fn walk_if_block<'ast, V: Visitor<'ast>>(visitor: &mut V, block: &'ast IfBlock<'ast>) {
    visitor.visit_node(block.condition);
    visitor.visit_node(block.then_branch);
    if let Some(otherwise) = block.else_branch {
        visitor.visit_node(otherwise);
    }
}

pub fn walk_for_loop<'ast, V: Visitor<'ast>>(visitor: &mut V, lp: &'ast ForLoop<'ast>) {
    visitor.visit_node(lp.init);
    visitor.visit_node(lp.condition);
    visitor.visit_node(lp.step);
    visitor.visit_node(lp.body);
}

pub fn walk_foreach_loop<'ast, V: Visitor<'ast>>(visitor: &mut V, lp: &'ast ForeachLoop<'ast>) {
    visitor.visit_node(Node::VarName(lp.element));
    visitor.visit_node(lp.iterable);
    visitor.visit_node(lp.body);
}

pub fn walk_while_loop<'ast, V: Visitor<'ast>>(visitor: &mut V, lp: &'ast WhileLoop<'ast>) {
    visitor.visit_node(lp.condition);
    visitor.visit_node(lp.body);
}

pub fn walk_repeat_loop<'ast, V: Visitor<'ast>>(visitor: &mut V, lp: &'ast RepeatLoop<'ast>) {
    visitor.visit_node(lp.body);
    visitor.visit_node(lp.condition);
}

pub fn walk_repetition<'ast, V: Visitor<'ast>>(visitor: &mut V, rep: &'ast Repetition<'ast>) {
    visitor.visit_node(Node::FuncCall(rep.call));
    visitor.visit_node(rep.count);
}

pub fn walk_return<'ast, V: Visitor<'ast>>(visitor: &mut V, ret: &'ast ReturnInstr<'ast>) {
    if let Some(value) = ret.value {
        visitor.visit_node(value);
    }
}

// ============================================================================
// Kind counter
// ============================================================================

/// Tallies how many nodes of each kind a tree holds.
#[derive(Debug, Default, Clone)]
pub struct KindCounter {
    counts: FxHashMap<NodeKind, usize>,
}

impl KindCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Non-zero counts, ordered by kind.
    pub fn sorted(&self) -> Vec<(NodeKind, usize)> {
        let mut counts: Vec<_> = self.counts.iter().map(|(k, n)| (*k, *n)).collect();
        counts.sort_unstable();
        counts
    }
}

impl<'ast> Visitor<'ast> for KindCounter {
    fn visit_node(&mut self, node: Node<'ast>) {
        *self.counts.entry(node.kind()).or_insert(0) += 1;
        walk_node(self, node);
    }
}
