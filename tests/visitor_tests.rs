// tests/visitor_tests.rs
//! Traversal tests: the open [`Visitor`] with generic fallback and the
//! exhaustive [`Translator`].

mod test_harness;

use bumpalo::Bump;
use nasl::*;
use test_harness::{TestHarness, count_nodes};

/// Records the kinds of visited nodes, in order.
#[derive(Default)]
struct Trace(Vec<NodeKind>);

impl<'ast> Visitor<'ast> for Trace {
    fn visit_node(&mut self, node: Node<'ast>) {
        self.0.push(node.kind());
        visitor::walk_node(self, node);
    }
}

fn trace(source: &str) -> Vec<NodeKind> {
    let arena = Bump::new();
    let script = parse(source, &arena).unwrap();
    let mut trace = Trace::default();
    trace.visit_script(&script);
    trace.0
}

#[test]
fn test_depth_first_field_order() {
    use NodeKind::*;
    assert_eq!(
        trace("if (a) b = f(1); else return;"),
        [
            InstrList, IfBlock, VarName, Affectation, VarName, FuncCall, ArgList, Arg, Atom,
            Return
        ]
    );
}

#[test]
fn test_handle_then_continue() {
    /// Collects assigned names, then keeps walking so nested assignments
    /// are found too.
    #[derive(Default)]
    struct Assigned<'ast>(Vec<&'ast str>);

    impl<'ast> Visitor<'ast> for Assigned<'ast> {
        fn visit_affectation(&mut self, aff: &'ast Affectation<'ast>) {
            if let Node::VarName(var) = aff.lvalue {
                self.0.push(var.name.name);
            }
            visitor::walk_affectation(self, aff);
        }
    }

    let arena = Bump::new();
    let script = parse("a = b = 1; function f() { for (i = 0; i < 2; i++) c = i; }", &arena)
        .unwrap();
    let mut assigned = Assigned::default();
    assigned.visit_script(&script);
    assert_eq!(assigned.0, ["a", "b", "i", "c"]);
}

#[test]
fn test_identifiers_are_visited() {
    #[derive(Default)]
    struct Names<'ast>(Vec<&'ast str>);

    impl<'ast> Visitor<'ast> for Names<'ast> {
        fn visit_ident(&mut self, ident: &Ident<'ast>) {
            self.0.push(ident.name);
        }
    }

    let arena = Bump::new();
    let script = parse("function f(p, q) { local_var r; return g(n: p[q]); }", &arena).unwrap();
    let mut names = Names::default();
    names.visit_script(&script);
    assert_eq!(names.0, ["f", "p", "q", "r", "g", "n", "p", "q"]);
}

#[test]
fn test_loop_bodies_equivalent_through_visitor() {
    let bare = trace("while (a) f();");
    let braced = trace("while (a) { f(); }");

    // The braced form only adds the sequence node around the body.
    let without_extra: Vec<NodeKind> = {
        let mut kinds = braced.clone();
        let body = kinds
            .iter()
            .rposition(|k| *k == NodeKind::InstrList)
            .unwrap();
        kinds.remove(body);
        kinds
    };
    assert_eq!(bare, without_extra);
}

/// Exhaustive consumer: nesting depth of the deepest node.
struct Depth;

impl Depth {
    fn max_of(&mut self, nodes: &[Node<'_>]) -> usize {
        nodes.iter().map(|n| self.translate(*n)).max().unwrap_or(0)
    }
}

impl<'ast> Translator<'ast> for Depth {
    type Output = usize;

    fn translate_atom(&mut self, _: &'ast Atom<'ast>) -> usize {
        1
    }
    fn translate_ip_addr(&mut self, _: &'ast IpAddr<'ast>) -> usize {
        1
    }
    fn translate_var_name(&mut self, _: &'ast VarName<'ast>) -> usize {
        1
    }
    fn translate_local_var(&mut self, decl: &'ast LocalVar<'ast>) -> usize {
        1 + self.translate(decl.decls)
    }
    fn translate_global_var(&mut self, decl: &'ast GlobalVar<'ast>) -> usize {
        1 + self.translate(decl.decls)
    }
    fn translate_arg(&mut self, arg: &'ast Arg<'ast>) -> usize {
        1 + self.translate(arg.value)
    }
    fn translate_arg_attribute(&mut self, arg: &'ast ArgAttribute<'ast>) -> usize {
        1 + self.translate(arg.value)
    }
    fn translate_func_call(&mut self, call: &'ast FuncCall<'ast>) -> usize {
        1 + self.translate(call.args)
    }
    fn translate_func_decl(&mut self, decl: &'ast FuncDecl<'ast>) -> usize {
        let params = self.translate(decl.params);
        let body = self.translate_instr_list(decl.body);
        1 + params.max(body)
    }
    fn translate_arg_list(&mut self, list: &'ast ArgList<'ast>) -> usize {
        1 + self.max_of(list.args)
    }
    fn translate_arg_decl_list(&mut self, _: &'ast ArgDeclList<'ast>) -> usize {
        1
    }
    fn translate_instr_list(&mut self, list: &'ast InstrList<'ast>) -> usize {
        1 + self.max_of(list.instrs)
    }
    fn translate_if_block(&mut self, block: &'ast IfBlock<'ast>) -> usize {
        let mut children = vec![block.condition, block.then_branch];
        children.extend(block.else_branch);
        1 + self.max_of(&children)
    }
    fn translate_affectation(&mut self, aff: &'ast Affectation<'ast>) -> usize {
        1 + self.max_of(&[aff.lvalue, aff.value])
    }
    fn translate_repetition(&mut self, rep: &'ast Repetition<'ast>) -> usize {
        let call = self.translate_func_call(rep.call);
        1 + call.max(self.translate(rep.count))
    }
    fn translate_include(&mut self, _: &'ast Include<'ast>) -> usize {
        1
    }
    fn translate_expression(&mut self, expr: &'ast Expression<'ast>) -> usize {
        1 + self.max_of(&[expr.left, expr.right])
    }
    fn translate_r_expression(&mut self, expr: &'ast RExpression<'ast>) -> usize {
        1 + self.translate(expr.operand)
    }
    fn translate_post_incr(&mut self, incr: &'ast PostIncr<'ast>) -> usize {
        1 + self.translate(incr.lvalue)
    }
    fn translate_pre_incr(&mut self, incr: &'ast PreIncr<'ast>) -> usize {
        1 + self.translate(incr.lvalue)
    }
    fn translate_array_elem(&mut self, elem: &'ast ArrayElem<'ast>) -> usize {
        1 + self.translate(elem.index)
    }
    fn translate_array_data_list(&mut self, list: &'ast ArrayDataList<'ast>) -> usize {
        1 + self.max_of(list.elems)
    }
    fn translate_const_array(&mut self, array: &'ast ConstArray<'ast>) -> usize {
        1 + self.translate_array_data_list(array.data)
    }
    fn translate_for_loop(&mut self, lp: &'ast ForLoop<'ast>) -> usize {
        1 + self.max_of(&[lp.init, lp.condition, lp.step, lp.body])
    }
    fn translate_foreach_loop(&mut self, lp: &'ast ForeachLoop<'ast>) -> usize {
        1 + self.max_of(&[Node::VarName(lp.element), lp.iterable, lp.body])
    }
    fn translate_while_loop(&mut self, lp: &'ast WhileLoop<'ast>) -> usize {
        1 + self.max_of(&[lp.condition, lp.body])
    }
    fn translate_repeat_loop(&mut self, lp: &'ast RepeatLoop<'ast>) -> usize {
        1 + self.max_of(&[lp.body, lp.condition])
    }
    fn translate_break(&mut self, _: &'ast BreakInstr) -> usize {
        1
    }
    fn translate_continue(&mut self, _: &'ast ContinueInstr) -> usize {
        1
    }
    fn translate_return(&mut self, ret: &'ast ReturnInstr<'ast>) -> usize {
        1 + ret.value.map_or(0, |value| self.translate(value))
    }
    fn translate_empty(&mut self, _: &'ast Empty) -> usize {
        1
    }
}

#[test]
fn test_translator_covers_every_kind() {
    let arena = Bump::new();
    let source = r#"
        include("x.inc");
        global_var g;
        function f(a) { local_var l; return a; }
        a = [1, "s"];
        b[0] = 10.0.0.1;
        if (!a) a++; else --a;
        for (;a;) break;
        foreach e (a) continue;
        while (0 + 0) ;
        repeat f(a: 1, 2); until 1;
        f() x 2;
    "#;
    let script = parse(source, &arena).unwrap();

    let counts = count_nodes(&script);
    let missing: Vec<NodeKind> = NodeKind::ALL
        .iter()
        .copied()
        .filter(|kind| counts.count(*kind) == 0)
        .collect();
    assert!(missing.is_empty(), "fixture does not cover {missing:?}");

    // InstrList > RepeatLoop > FuncCall > ArgList > ArgAttribute > Atom
    assert_eq!(Depth.translate(script.root()), 6);
}

#[test]
fn test_expression_depth() {
    let arena = Bump::new();
    let expr = parse_expression("1 + 2 * (3 - -4)", &arena).unwrap();
    // + > * > - > unary - > 4
    assert_eq!(Depth.translate(expr), 5);
}

#[test]
fn test_printer_is_a_translator() {
    let arena = Bump::new();
    let expr = parse_expression("a[i] += f(x: -1)", &arena).unwrap();
    let mut printer = AstPrinter::new();
    assert_eq!(
        printer.translate(expr),
        "Affectation(ArrayElem(a[VarName(i)]) += FuncCall(f, ArgList[ArgAttribute(x: RExpression(- Atom(1)))]))"
    );
}

#[test]
fn test_kind_counts_on_fixtures() {
    let harness = TestHarness::new();
    let fixture = harness.load("functions.nasl");
    let arena = Bump::new();
    let script = fixture.parse_ok(&arena);
    let counts = count_nodes(&script);

    assert_eq!(counts.count(NodeKind::FuncDecl), 3);
    assert_eq!(counts.count(NodeKind::Return), 4);
    assert_eq!(counts.count(NodeKind::GlobalVar), 1);
    assert_eq!(counts.count(NodeKind::LocalVar), 1);
    assert_eq!(
        counts.total(),
        counts.sorted().iter().map(|(_, n)| n).sum::<usize>()
    );
}
