//! Instruction and declaration parsing.

use bumpalo::collections::Vec as BVec;
use nasl_core::{ParseError, ParseErrorKind, Span};

use super::parser::{PResult, Parser};
use crate::ast::{
    ArgDeclList, BreakInstr, ContinueInstr, Empty, ForLoop, ForeachLoop, FuncDecl, GlobalVar,
    Ident, IfBlock, Include, InstrList, LocalVar, Node, RepeatLoop, Repetition, ReturnInstr,
    VarName, WhileLoop,
};
use crate::lexer::{Token, TokenKind};

impl<'src, 'ast> Parser<'src, 'ast> {
    /// A top-level entry: a function declaration or an instruction.
    pub(super) fn parse_instr_decl(&mut self) -> PResult<Node<'ast>> {
        if self.check(TokenKind::Function) {
            self.parse_func_decl()
        } else {
            self.parse_instr()
        }
    }

    /// An instruction: a block, a control-flow construct, or a simple
    /// instruction terminated by `;`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub(super) fn parse_instr(&mut self) -> PResult<Node<'ast>> {
        self.nested(Self::parse_instr_kind)
    }

    fn parse_instr_kind(&mut self) -> PResult<Node<'ast>> {
        let token = self.peek();
        match token.kind {
            TokenKind::LeftBrace => Ok(Node::InstrList(self.parse_block()?)),
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::Foreach => self.parse_foreach(),
            TokenKind::While => self.parse_while(),
            TokenKind::Repeat => self.parse_repeat(),
            TokenKind::Function => {
                let err = ParseError::unexpected_token(token.span, "function declaration")
                    .with_found(token.kind.name(), token.lexeme);
                Err(err.into())
            }
            _ => {
                let instr = self.parse_simple_instr()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(instr)
            }
        }
    }

    /// An instruction that needs a trailing `;`. The `;` is left for the
    /// caller.
    fn parse_simple_instr(&mut self) -> PResult<Node<'ast>> {
        let token = self.peek();
        match token.kind {
            TokenKind::Semicolon => Ok(self.empty(Span::point(token.span.line, token.span.col))),
            TokenKind::Break => {
                self.advance();
                Ok(Node::Break(self.arena.alloc(BreakInstr { span: token.span })))
            }
            TokenKind::Continue => {
                self.advance();
                Ok(Node::Continue(
                    self.arena.alloc(ContinueInstr { span: token.span }),
                ))
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.check(TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr(0)?)
                };
                Ok(Node::Return(self.arena.alloc(ReturnInstr {
                    value,
                    span: self.span_from(token.span),
                })))
            }
            TokenKind::Include => self.parse_include(),
            TokenKind::Local => {
                self.advance();
                let decls = self.parse_arg_decl()?;
                Ok(Node::LocalVar(self.arena.alloc(LocalVar {
                    decls,
                    span: self.span_from(token.span),
                })))
            }
            TokenKind::Global => {
                self.advance();
                let decls = self.parse_arg_decl()?;
                Ok(Node::GlobalVar(self.arena.alloc(GlobalVar {
                    decls,
                    span: self.span_from(token.span),
                })))
            }
            _ => {
                let expr = self.parse_expr(0)?;
                match expr {
                    Node::FuncCall(call) if self.eat(TokenKind::Rep).is_some() => {
                        let count = self.parse_expr(0)?;
                        Ok(Node::Repetition(self.arena.alloc(Repetition {
                            call,
                            count,
                            span: call.span.merge(count.span()),
                        })))
                    }
                    _ => self.instr_expr(expr, token),
                }
            }
        }
    }

    /// Accept `expr` as an instruction. Only assignments, increments and
    /// calls stand on their own; `first` is the token `expr` started at.
    fn instr_expr(&self, expr: Node<'ast>, first: Token<'ast>) -> PResult<Node<'ast>> {
        match expr {
            Node::Affectation(_) | Node::PostIncr(_) | Node::PreIncr(_) | Node::FuncCall(_) => {
                Ok(expr)
            }
            _ => {
                let err = ParseError::new(
                    ParseErrorKind::ExpectedStatement,
                    expr.span(),
                    format!("{} cannot be used as an instruction", expr.kind()),
                )
                .with_found(first.kind.name(), first.lexeme);
                Err(err.into())
            }
        }
    }

    /// `{ instr* }`. Function declarations are not allowed inside.
    pub(super) fn parse_block(&mut self) -> PResult<&'ast InstrList<'ast>> {
        let open = self.expect(TokenKind::LeftBrace)?;
        self.enter_block();
        let body = self.parse_block_body(open.span);
        self.exit_block();
        body
    }

    fn parse_block_body(&mut self, open: Span) -> PResult<&'ast InstrList<'ast>> {
        let mut instrs = BVec::new_in(self.arena);

        while !self.is_halted() && !self.check(TokenKind::RightBrace) && !self.is_eof() {
            let stmt_start = self.consumed();
            match self.parse_instr() {
                Ok(instr) => instrs.push(instr),
                Err(err) => {
                    if self.recover(err, stmt_start)?.is_break() {
                        break;
                    }
                }
            }
        }

        if !self.is_halted() {
            self.expect(TokenKind::RightBrace)?;
        }

        Ok(self.arena.alloc(InstrList {
            instrs: instrs.into_bump_slice(),
            span: self.span_from(open),
        }))
    }

    /// `function name(params) { body }`.
    fn parse_func_decl(&mut self) -> PResult<Node<'ast>> {
        let keyword = self.expect(TokenKind::Function)?;
        let name_token = self.expect_name()?;
        self.expect(TokenKind::LeftParen)?;
        let params = self.parse_arg_decl()?;
        self.expect(TokenKind::RightParen)?;
        let body = self.parse_block()?;

        Ok(Node::FuncDecl(self.arena.alloc(FuncDecl {
            name: Ident::new(name_token.lexeme, name_token.span),
            params,
            body,
            span: self.span_from(keyword.span),
        })))
    }

    /// Comma-separated names, or [`Node::Empty`] when none follow.
    fn parse_arg_decl(&mut self) -> PResult<Node<'ast>> {
        let start = self.peek().span;
        if !self.peek().kind.is_name() {
            return Ok(self.empty(Span::point(start.line, start.col)));
        }

        let mut names = BVec::new_in(self.arena);
        loop {
            let token = self.expect_name()?;
            names.push(Ident::new(token.lexeme, token.span));
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }

        Ok(Node::ArgDeclList(self.arena.alloc(ArgDeclList {
            names: names.into_bump_slice(),
            span: self.span_from(start),
        })))
    }

    /// `include("file.inc")`.
    fn parse_include(&mut self) -> PResult<Node<'ast>> {
        let keyword = self.expect(TokenKind::Include)?;
        self.expect(TokenKind::LeftParen)?;
        let filename = self.expect(TokenKind::String)?;
        self.expect(TokenKind::RightParen)?;
        Ok(Node::Include(self.arena.alloc(Include {
            filename: filename.lexeme,
            span: self.span_from(keyword.span),
        })))
    }

    /// `( expr )` around a condition.
    fn parse_condition(&mut self) -> PResult<Node<'ast>> {
        self.expect(TokenKind::LeftParen)?;
        let condition = self.parse_expr(0)?;
        self.expect(TokenKind::RightParen)?;
        Ok(condition)
    }

    /// `if (cond) instr [else instr]`. An `else` binds to the nearest `if`.
    fn parse_if(&mut self) -> PResult<Node<'ast>> {
        let keyword = self.expect(TokenKind::If)?;
        let condition = self.parse_condition()?;
        let then_branch = self.parse_instr()?;
        let else_branch = if self.eat(TokenKind::Else).is_some() {
            Some(self.parse_instr()?)
        } else {
            None
        };

        Ok(Node::IfBlock(self.arena.alloc(IfBlock {
            condition,
            then_branch,
            else_branch,
            span: self.span_from(keyword.span),
        })))
    }

    /// `for (init; cond; step) instr`. The condition is required; the
    /// other clauses may be left out.
    fn parse_for(&mut self) -> PResult<Node<'ast>> {
        let keyword = self.expect(TokenKind::For)?;
        self.expect(TokenKind::LeftParen)?;
        let init = self.parse_for_clause(TokenKind::Semicolon)?;
        self.expect(TokenKind::Semicolon)?;
        let condition = self.parse_expr(0)?;
        self.expect(TokenKind::Semicolon)?;
        let step = self.parse_for_clause(TokenKind::RightParen)?;
        self.expect(TokenKind::RightParen)?;
        let body = self.parse_instr()?;

        Ok(Node::ForLoop(self.arena.alloc(ForLoop {
            init,
            condition,
            step,
            body,
            span: self.span_from(keyword.span),
        })))
    }

    fn parse_for_clause(&mut self, terminator: TokenKind) -> PResult<Node<'ast>> {
        let token = self.peek();
        if token.kind == terminator {
            Ok(self.empty(Span::point(token.span.line, token.span.col)))
        } else {
            let expr = self.parse_expr(0)?;
            self.instr_expr(expr, token)
        }
    }

    /// `foreach name (iterable) instr`.
    fn parse_foreach(&mut self) -> PResult<Node<'ast>> {
        let keyword = self.expect(TokenKind::Foreach)?;
        let name_token = self.expect_name()?;
        let name = Ident::new(name_token.lexeme, name_token.span);
        let element = self.arena.alloc(VarName {
            name,
            span: name.span,
        });
        let iterable = self.parse_condition()?;
        let body = self.parse_instr()?;

        Ok(Node::ForeachLoop(self.arena.alloc(ForeachLoop {
            element,
            iterable,
            body,
            span: self.span_from(keyword.span),
        })))
    }

    fn parse_while(&mut self) -> PResult<Node<'ast>> {
        let keyword = self.expect(TokenKind::While)?;
        let condition = self.parse_condition()?;
        let body = self.parse_instr()?;

        Ok(Node::WhileLoop(self.arena.alloc(WhileLoop {
            condition,
            body,
            span: self.span_from(keyword.span),
        })))
    }

    /// `repeat instr until expr;`.
    fn parse_repeat(&mut self) -> PResult<Node<'ast>> {
        let keyword = self.expect(TokenKind::Repeat)?;
        let body = self.parse_instr()?;
        self.expect(TokenKind::Until)?;
        let condition = self.parse_expr(0)?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Node::RepeatLoop(self.arena.alloc(RepeatLoop {
            body,
            condition,
            span: self.span_from(keyword.span),
        })))
    }

    fn empty(&self, span: Span) -> Node<'ast> {
        Node::Empty(self.arena.alloc(Empty { span }))
    }
}
