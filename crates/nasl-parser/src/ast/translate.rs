//! Exhaustive traversal of the tree.
//!
//! A [`Translator`] must handle every node kind: each `translate_*` method is
//! required, so adding a node kind breaks every translator at compile time
//! instead of silently skipping the new kind. Implementations usually
//! translate children first through [`Translator::translate`] and then
//! combine the results.

use crate::ast::Node;
use crate::ast::expr::*;
use crate::ast::stmt::*;

/// A consumer that turns every kind of node into an `Output`.
pub trait Translator<'ast> {
    type Output;

    /// Dispatch on the node's kind.
    fn translate(&mut self, node: Node<'ast>) -> Self::Output
    where
        Self: Sized,
    {
        translate(self, node)
    }

    fn translate_atom(&mut self, atom: &'ast Atom<'ast>) -> Self::Output;
    fn translate_ip_addr(&mut self, addr: &'ast IpAddr<'ast>) -> Self::Output;
    fn translate_var_name(&mut self, var: &'ast VarName<'ast>) -> Self::Output;
    fn translate_local_var(&mut self, decl: &'ast LocalVar<'ast>) -> Self::Output;
    fn translate_global_var(&mut self, decl: &'ast GlobalVar<'ast>) -> Self::Output;
    fn translate_arg(&mut self, arg: &'ast Arg<'ast>) -> Self::Output;
    fn translate_arg_attribute(&mut self, arg: &'ast ArgAttribute<'ast>) -> Self::Output;
    fn translate_func_call(&mut self, call: &'ast FuncCall<'ast>) -> Self::Output;
    fn translate_func_decl(&mut self, decl: &'ast FuncDecl<'ast>) -> Self::Output;
    fn translate_arg_list(&mut self, list: &'ast ArgList<'ast>) -> Self::Output;
    fn translate_arg_decl_list(&mut self, list: &'ast ArgDeclList<'ast>) -> Self::Output;
    fn translate_instr_list(&mut self, list: &'ast InstrList<'ast>) -> Self::Output;
    fn translate_if_block(&mut self, block: &'ast IfBlock<'ast>) -> Self::Output;
    fn translate_affectation(&mut self, aff: &'ast Affectation<'ast>) -> Self::Output;
    fn translate_repetition(&mut self, rep: &'ast Repetition<'ast>) -> Self::Output;
    fn translate_include(&mut self, include: &'ast Include<'ast>) -> Self::Output;
    fn translate_expression(&mut self, expr: &'ast Expression<'ast>) -> Self::Output;
    fn translate_r_expression(&mut self, expr: &'ast RExpression<'ast>) -> Self::Output;
    fn translate_post_incr(&mut self, incr: &'ast PostIncr<'ast>) -> Self::Output;
    fn translate_pre_incr(&mut self, incr: &'ast PreIncr<'ast>) -> Self::Output;
    fn translate_array_elem(&mut self, elem: &'ast ArrayElem<'ast>) -> Self::Output;
    fn translate_array_data_list(&mut self, list: &'ast ArrayDataList<'ast>) -> Self::Output;
    fn translate_const_array(&mut self, array: &'ast ConstArray<'ast>) -> Self::Output;
    fn translate_for_loop(&mut self, lp: &'ast ForLoop<'ast>) -> Self::Output;
    fn translate_foreach_loop(&mut self, lp: &'ast ForeachLoop<'ast>) -> Self::Output;
    fn translate_while_loop(&mut self, lp: &'ast WhileLoop<'ast>) -> Self::Output;
    fn translate_repeat_loop(&mut self, lp: &'ast RepeatLoop<'ast>) -> Self::Output;
    fn translate_break(&mut self, instr: &'ast BreakInstr) -> Self::Output;
    fn translate_continue(&mut self, instr: &'ast ContinueInstr) -> Self::Output;
    fn translate_return(&mut self, ret: &'ast ReturnInstr<'ast>) -> Self::Output;
    fn translate_empty(&mut self, empty: &'ast Empty) -> Self::Output;
}

/// Route `node` to the handler for its kind.
pub fn translate<'ast, T: Translator<'ast>>(translator: &mut T, node: Node<'ast>) -> T::Output {
    match node {
        Node::Atom(n) => translator.translate_atom(n),
        Node::IpAddr(n) => translator.translate_ip_addr(n),
        Node::VarName(n) => translator.translate_var_name(n),
        Node::LocalVar(n) => translator.translate_local_var(n),
        Node::GlobalVar(n) => translator.translate_global_var(n),
        Node::Arg(n) => translator.translate_arg(n),
        Node::ArgAttribute(n) => translator.translate_arg_attribute(n),
        Node::FuncCall(n) => translator.translate_func_call(n),
        Node::FuncDecl(n) => translator.translate_func_decl(n),
        Node::ArgList(n) => translator.translate_arg_list(n),
        Node::ArgDeclList(n) => translator.translate_arg_decl_list(n),
        Node::InstrList(n) => translator.translate_instr_list(n),
        Node::IfBlock(n) => translator.translate_if_block(n),
        Node::Affectation(n) => translator.translate_affectation(n),
        Node::Repetition(n) => translator.translate_repetition(n),
        Node::Include(n) => translator.translate_include(n),
        Node::Expression(n) => translator.translate_expression(n),
        Node::RExpression(n) => translator.translate_r_expression(n),
        Node::PostIncr(n) => translator.translate_post_incr(n),
        Node::PreIncr(n) => translator.translate_pre_incr(n),
        Node::ArrayElem(n) => translator.translate_array_elem(n),
        Node::ArrayDataList(n) => translator.translate_array_data_list(n),
        Node::ConstArray(n) => translator.translate_const_array(n),
        Node::ForLoop(n) => translator.translate_for_loop(n),
        Node::ForeachLoop(n) => translator.translate_foreach_loop(n),
        Node::WhileLoop(n) => translator.translate_while_loop(n),
        Node::RepeatLoop(n) => translator.translate_repeat_loop(n),
        Node::Break(n) => translator.translate_break(n),
        Node::Continue(n) => translator.translate_continue(n),
        Node::Return(n) => translator.translate_return(n),
        Node::Empty(n) => translator.translate_empty(n),
    }
}
