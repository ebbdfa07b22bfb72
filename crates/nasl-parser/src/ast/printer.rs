//! One-line structural dump of a tree, for debugging and tests.
//!
//! ```text
//! a = 1 + 2 * 3;   =>   InstrList[Affectation(VarName(a) = Expression(Atom(1) + Expression(Atom(2) * Atom(3))))]
//! ```

use crate::ast::Node;
use crate::ast::expr::*;
use crate::ast::stmt::*;
use crate::ast::translate::Translator;

/// Renders nodes in a compact, fully parenthesized form.
#[derive(Debug, Default, Clone, Copy)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn new() -> Self {
        AstPrinter
    }

    pub fn print(&mut self, node: Node<'_>) -> String {
        self.translate(node)
    }

    fn join(&mut self, nodes: &[Node<'_>], sep: &str) -> String {
        nodes
            .iter()
            .map(|node| self.translate(*node))
            .collect::<Vec<_>>()
            .join(sep)
    }
}

impl<'ast> Translator<'ast> for AstPrinter {
    type Output = String;

    fn translate_atom(&mut self, atom: &'ast Atom<'ast>) -> String {
        format!("Atom({})", atom.value)
    }

    fn translate_ip_addr(&mut self, addr: &'ast IpAddr<'ast>) -> String {
        format!("IpAddr({})", addr.value)
    }

    fn translate_var_name(&mut self, var: &'ast VarName<'ast>) -> String {
        format!("VarName({})", var.name)
    }

    fn translate_local_var(&mut self, decl: &'ast LocalVar<'ast>) -> String {
        format!("LocalVar({})", self.translate(decl.decls))
    }

    fn translate_global_var(&mut self, decl: &'ast GlobalVar<'ast>) -> String {
        format!("GlobalVar({})", self.translate(decl.decls))
    }

    fn translate_arg(&mut self, arg: &'ast Arg<'ast>) -> String {
        format!("Arg({})", self.translate(arg.value))
    }

    fn translate_arg_attribute(&mut self, arg: &'ast ArgAttribute<'ast>) -> String {
        format!("ArgAttribute({}: {})", arg.name, self.translate(arg.value))
    }

    fn translate_func_call(&mut self, call: &'ast FuncCall<'ast>) -> String {
        format!("FuncCall({}, {})", call.name, self.translate(call.args))
    }

    fn translate_func_decl(&mut self, decl: &'ast FuncDecl<'ast>) -> String {
        let params = self.translate(decl.params);
        let body = self.translate_instr_list(decl.body);
        format!("FuncDecl({}, {params}, {body})", decl.name)
    }

    fn translate_arg_list(&mut self, list: &'ast ArgList<'ast>) -> String {
        format!("ArgList[{}]", self.join(list.args, ", "))
    }

    fn translate_arg_decl_list(&mut self, list: &'ast ArgDeclList<'ast>) -> String {
        let names: Vec<&str> = list.names.iter().map(|ident| ident.name).collect();
        format!("ArgDeclList[{}]", names.join(", "))
    }

    fn translate_instr_list(&mut self, list: &'ast InstrList<'ast>) -> String {
        format!("InstrList[{}]", self.join(list.instrs, "; "))
    }

    fn translate_if_block(&mut self, block: &'ast IfBlock<'ast>) -> String {
        let condition = self.translate(block.condition);
        let then_branch = self.translate(block.then_branch);
        match block.else_branch {
            Some(otherwise) => {
                let otherwise = self.translate(otherwise);
                format!("IfBlock({condition}, {then_branch}, else {otherwise})")
            }
            None => format!("IfBlock({condition}, {then_branch})"),
        }
    }

    fn translate_affectation(&mut self, aff: &'ast Affectation<'ast>) -> String {
        let lvalue = self.translate(aff.lvalue);
        let value = self.translate(aff.value);
        format!("Affectation({lvalue} {} {value})", aff.op)
    }

    fn translate_repetition(&mut self, rep: &'ast Repetition<'ast>) -> String {
        let call = self.translate_func_call(rep.call);
        format!("Repetition({call} x {})", self.translate(rep.count))
    }

    fn translate_include(&mut self, include: &'ast Include<'ast>) -> String {
        format!("Include({})", include.filename)
    }

    fn translate_expression(&mut self, expr: &'ast Expression<'ast>) -> String {
        let left = self.translate(expr.left);
        let right = self.translate(expr.right);
        format!("Expression({left} {} {right})", expr.operation)
    }

    fn translate_r_expression(&mut self, expr: &'ast RExpression<'ast>) -> String {
        format!("RExpression({} {})", expr.operation, self.translate(expr.operand))
    }

    fn translate_post_incr(&mut self, incr: &'ast PostIncr<'ast>) -> String {
        format!("PostIncr({}{})", self.translate(incr.lvalue), incr.op)
    }

    fn translate_pre_incr(&mut self, incr: &'ast PreIncr<'ast>) -> String {
        format!("PreIncr({}{})", incr.op, self.translate(incr.lvalue))
    }

    fn translate_array_elem(&mut self, elem: &'ast ArrayElem<'ast>) -> String {
        format!("ArrayElem({}[{}])", elem.name, self.translate(elem.index))
    }

    fn translate_array_data_list(&mut self, list: &'ast ArrayDataList<'ast>) -> String {
        format!("ArrayDataList[{}]", self.join(list.elems, ", "))
    }

    fn translate_const_array(&mut self, array: &'ast ConstArray<'ast>) -> String {
        format!("ConstArray({})", self.translate_array_data_list(array.data))
    }

    fn translate_for_loop(&mut self, lp: &'ast ForLoop<'ast>) -> String {
        let init = self.translate(lp.init);
        let condition = self.translate(lp.condition);
        let step = self.translate(lp.step);
        let body = self.translate(lp.body);
        format!("ForLoop({init}; {condition}; {step}; {body})")
    }

    fn translate_foreach_loop(&mut self, lp: &'ast ForeachLoop<'ast>) -> String {
        let element = self.translate_var_name(lp.element);
        let iterable = self.translate(lp.iterable);
        let body = self.translate(lp.body);
        format!("ForeachLoop({element} in {iterable}; {body})")
    }

    fn translate_while_loop(&mut self, lp: &'ast WhileLoop<'ast>) -> String {
        let condition = self.translate(lp.condition);
        format!("WhileLoop({condition}; {})", self.translate(lp.body))
    }

    fn translate_repeat_loop(&mut self, lp: &'ast RepeatLoop<'ast>) -> String {
        let body = self.translate(lp.body);
        format!("RepeatLoop({body}; until {})", self.translate(lp.condition))
    }

    fn translate_break(&mut self, _instr: &'ast BreakInstr) -> String {
        "BreakInstr".to_string()
    }

    fn translate_continue(&mut self, _instr: &'ast ContinueInstr) -> String {
        "ContinueInstr".to_string()
    }

    fn translate_return(&mut self, ret: &'ast ReturnInstr<'ast>) -> String {
        match ret.value {
            Some(value) => format!("ReturnInstr({})", self.translate(value)),
            None => "ReturnInstr".to_string(),
        }
    }

    fn translate_empty(&mut self, _empty: &'ast Empty) -> String {
        "Empty".to_string()
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use nasl_core::Span;

    use super::*;
    use crate::ast::{BinaryOp, Ident};

    #[test]
    fn hand_built_tree() {
        let arena = Bump::new();
        let span = Span::new(1, 1, 1);
        let one = Node::Atom(arena.alloc(Atom {
            kind: AtomKind::Integer,
            value: "1",
            span,
        }));
        let name = Node::VarName(arena.alloc(VarName {
            name: Ident::new("n", span),
            span,
        }));
        let sum = Node::Expression(arena.alloc(Expression {
            left: name,
            op: BinaryOp::Add,
            operation: "+",
            right: one,
            span,
        }));
        let ret = Node::Return(arena.alloc(ReturnInstr {
            value: Some(sum),
            span,
        }));
        let empty = Node::Empty(arena.alloc(Empty { span }));
        let list = Node::InstrList(arena.alloc(InstrList {
            instrs: arena.alloc_slice_copy(&[ret, empty]),
            span,
        }));

        assert_eq!(
            AstPrinter::new().print(list),
            "InstrList[ReturnInstr(Expression(VarName(n) + Atom(1))); Empty]"
        );
        assert_eq!(list.to_string(), AstPrinter::new().print(list));
    }
}
