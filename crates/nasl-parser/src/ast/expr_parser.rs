//! Expression parsing by precedence climbing.
//!
//! Binary operators go through [`Parser::parse_expr`], driven by the
//! binding powers in `ops.rs`. Assignment and `++`/`--` are not in the
//! infix loop: they bind to the lvalue that precedes them, so `1 + a = 2`
//! reads as `1 + (a = 2)`.

use bumpalo::collections::Vec as BVec;
use nasl_core::{NaslError, ParseError, ParseErrorKind};

use super::parser::{PResult, Parser};
use crate::ast::{
    Affectation, Arg, ArgAttribute, ArgList, ArrayDataList, ArrayElem, AssignOp, Associativity,
    Atom, AtomKind, BinaryOp, ConstArray, Empty, Expression, FuncCall, Ident, IncrOp, IpAddr,
    Node, PostIncr, PreIncr, Precedence, RExpression, UnaryOp, VarName,
};
use crate::lexer::{Token, TokenKind};

impl<'src, 'ast> Parser<'src, 'ast> {
    /// Parse an expression whose operators all bind at least as tightly as
    /// `min_bp`. `0` parses a full expression.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub(super) fn parse_expr(&mut self, min_bp: u8) -> PResult<Node<'ast>> {
        self.nested(|p| p.parse_binary(min_bp))
    }

    fn parse_binary(&mut self, min_bp: u8) -> PResult<Node<'ast>> {
        let mut lhs = self.parse_prefix()?;
        // Level of the last non-associative operator applied in this loop.
        let mut chained: Option<Precedence> = None;

        loop {
            let token = self.peek();

            if AssignOp::from_token(token.kind).is_some() {
                return Err(self.error(
                    token,
                    ParseErrorKind::InvalidAssignmentTarget,
                    format!("cannot assign to {}", lhs.kind()),
                ));
            }

            let Some(op) = BinaryOp::from_token(token.kind) else {
                break;
            };
            let precedence = op.precedence();
            let (l_bp, r_bp) = precedence.binding_power();
            if l_bp < min_bp {
                break;
            }
            if chained == Some(precedence) {
                return Err(self.error(
                    token,
                    ParseErrorKind::NonAssociative,
                    format!("'{}' cannot be chained; add parentheses", token.lexeme),
                ));
            }

            self.advance();
            let rhs = if op.takes_pattern() {
                self.parse_pattern()?
            } else {
                self.parse_expr(r_bp)?
            };

            lhs = Node::Expression(self.arena.alloc(Expression {
                left: lhs,
                op,
                operation: token.lexeme,
                right: rhs,
                span: lhs.span().merge(rhs.span()),
            }));
            chained = (precedence.associativity() == Associativity::NonAssoc).then_some(precedence);
        }

        Ok(lhs)
    }

    /// Prefix operators, then a primary.
    fn parse_prefix(&mut self) -> PResult<Node<'ast>> {
        let token = self.peek();

        if let Some(op) = UnaryOp::from_token(token.kind) {
            self.advance();
            let operand = self.parse_expr(op.precedence().prefix_operand_bp())?;
            return Ok(Node::RExpression(self.arena.alloc(RExpression {
                op,
                operation: token.lexeme,
                operand,
                span: token.span.merge(operand.span()),
            })));
        }

        if let Some(op) = IncrOp::from_token(token.kind) {
            self.advance();
            let lvalue = self.parse_lvalue()?;
            return Ok(Node::PreIncr(self.arena.alloc(PreIncr {
                op,
                lvalue,
                span: token.span.merge(lvalue.span()),
            })));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> PResult<Node<'ast>> {
        let token = self.peek();
        match token.kind {
            TokenKind::Integer if self.at_ip_address() => self.parse_ip_address(),
            TokenKind::Integer | TokenKind::String => {
                self.advance();
                Ok(self.atom(token))
            }
            kind if kind.is_name() => self.parse_named(),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expr(0)?;
                self.expect(TokenKind::RightParen)?;
                Ok(inner)
            }
            TokenKind::LeftBracket => self.parse_const_array(),
            _ => Err(self.expected_expression(token)),
        }
    }

    /// A variable, array element or call, with any assignment or postfix
    /// increment that applies to it.
    fn parse_named(&mut self) -> PResult<Node<'ast>> {
        let name_token = self.expect_name()?;
        let name = Ident::new(name_token.lexeme, name_token.span);

        let target = match self.peek().kind {
            TokenKind::LeftParen => return self.parse_call(name),
            TokenKind::LeftBracket => self.parse_array_elem(name)?,
            _ => Node::VarName(self.arena.alloc(VarName {
                name,
                span: name.span,
            })),
        };

        let token = self.peek();
        if let Some(op) = AssignOp::from_token(token.kind) {
            self.advance();
            let (_, r_bp) = Precedence::Assignment.binding_power();
            let value = self.parse_expr(r_bp)?;
            return Ok(Node::Affectation(self.arena.alloc(Affectation {
                lvalue: target,
                op,
                value,
                span: target.span().merge(value.span()),
            })));
        }
        if let Some(op) = IncrOp::from_token(token.kind) {
            self.advance();
            return Ok(Node::PostIncr(self.arena.alloc(PostIncr {
                lvalue: target,
                op,
                span: target.span().merge(token.span),
            })));
        }

        Ok(target)
    }

    /// The operand of a prefix `++`/`--`: a variable or array element.
    fn parse_lvalue(&mut self) -> PResult<Node<'ast>> {
        let name_token = self.expect_name()?;
        let name = Ident::new(name_token.lexeme, name_token.span);
        if self.check(TokenKind::LeftBracket) {
            self.parse_array_elem(name)
        } else {
            Ok(Node::VarName(self.arena.alloc(VarName {
                name,
                span: name.span,
            })))
        }
    }

    fn parse_array_elem(&mut self, name: Ident<'ast>) -> PResult<Node<'ast>> {
        self.expect(TokenKind::LeftBracket)?;
        let index = self.parse_expr(0)?;
        self.expect(TokenKind::RightBracket)?;
        Ok(Node::ArrayElem(self.arena.alloc(ArrayElem {
            name,
            index,
            span: self.span_from(name.span),
        })))
    }

    /// `name(args)`. The opening parenthesis is the current token.
    fn parse_call(&mut self, name: Ident<'ast>) -> PResult<Node<'ast>> {
        let open = self.expect(TokenKind::LeftParen)?;

        let args = if let Some(close) = self.eat(TokenKind::RightParen) {
            Node::Empty(self.arena.alloc(Empty {
                span: open.span.merge(close.span),
            }))
        } else {
            let mut args = BVec::new_in(self.arena);
            loop {
                args.push(self.parse_arg()?);
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
            self.expect(TokenKind::RightParen)?;
            Node::ArgList(self.arena.alloc(ArgList {
                args: args.into_bump_slice(),
                span: self.span_from(open.span),
            }))
        };

        Ok(Node::FuncCall(self.arena.alloc(FuncCall {
            name,
            args,
            span: self.span_from(name.span),
        })))
    }

    /// One call argument: `expr` or `name: expr`.
    fn parse_arg(&mut self) -> PResult<Node<'ast>> {
        let token = self.peek();
        if token.kind.is_name() && self.check_nth(1, TokenKind::Colon) {
            self.advance();
            self.advance();
            let value = self.parse_expr(0)?;
            return Ok(Node::ArgAttribute(self.arena.alloc(ArgAttribute {
                name: Ident::new(token.lexeme, token.span),
                value,
                span: token.span.merge(value.span()),
            })));
        }

        let value = self.parse_expr(0)?;
        Ok(Node::Arg(self.arena.alloc(Arg {
            value,
            span: value.span(),
        })))
    }

    /// The right operand of `=~` / `!~`: a string literal.
    fn parse_pattern(&mut self) -> PResult<Node<'ast>> {
        let token = self.peek();
        if token.kind != TokenKind::String {
            let message = format!("expected a string pattern, found {}", token.describe());
            return Err(self.error(token, ParseErrorKind::ExpectedPattern, message));
        }
        self.advance();
        Ok(self.atom(token))
    }

    fn at_ip_address(&mut self) -> bool {
        const SHAPE: [TokenKind; 7] = [
            TokenKind::Integer,
            TokenKind::Dot,
            TokenKind::Integer,
            TokenKind::Dot,
            TokenKind::Integer,
            TokenKind::Dot,
            TokenKind::Integer,
        ];
        SHAPE
            .iter()
            .enumerate()
            .all(|(n, kind)| self.check_nth(n, *kind))
    }

    /// `INT.INT.INT.INT`, already checked by [`Self::at_ip_address`].
    fn parse_ip_address(&mut self) -> PResult<Node<'ast>> {
        let first = self.expect(TokenKind::Integer)?;
        let mut octets = [first.lexeme; 4];
        for octet in octets.iter_mut().skip(1) {
            self.expect(TokenKind::Dot)?;
            *octet = self.expect(TokenKind::Integer)?.lexeme;
        }
        let value = self.arena.alloc_str(&octets.join("."));
        Ok(Node::IpAddr(self.arena.alloc(IpAddr {
            octets,
            value,
            span: self.span_from(first.span),
        })))
    }

    /// `[elem, ...]`. Elements are integer or string literals.
    fn parse_const_array(&mut self) -> PResult<Node<'ast>> {
        let open = self.expect(TokenKind::LeftBracket)?;
        let mut elems = BVec::new_in(self.arena);
        loop {
            elems.push(self.parse_array_data()?);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RightBracket)?;

        let span = self.span_from(open.span);
        let data = self.arena.alloc(ArrayDataList {
            elems: elems.into_bump_slice(),
            span,
        });
        Ok(Node::ConstArray(self.arena.alloc(ConstArray { data, span })))
    }

    fn parse_array_data(&mut self) -> PResult<Node<'ast>> {
        let token = self.peek();
        match token.kind {
            TokenKind::String if self.check_nth(1, TokenKind::Arrow) => {
                let err = ParseError::new(
                    ParseErrorKind::NotImplemented,
                    token.span,
                    "keyed array entries ('key => value') are not supported",
                )
                .with_found(token.kind.name(), token.lexeme);
                Err(NaslError::Unimplemented(err))
            }
            TokenKind::Integer | TokenKind::String => {
                self.advance();
                Ok(self.atom(token))
            }
            TokenKind::Eof => Err(self.expected(token, "integer or string literal")),
            _ => {
                let err = ParseError::expected_token(
                    token.span,
                    "integer or string literal",
                    &token.describe(),
                );
                Err(self.error_at(token, err))
            }
        }
    }

    fn atom(&self, token: Token<'ast>) -> Node<'ast> {
        let kind = match token.kind {
            TokenKind::String => AtomKind::String,
            _ => AtomKind::Integer,
        };
        Node::Atom(self.arena.alloc(Atom {
            kind,
            value: token.lexeme,
            span: token.span,
        }))
    }

    fn expected_expression(&mut self, token: Token<'ast>) -> NaslError {
        if token.kind == TokenKind::Eof {
            return self.expected(token, "expression");
        }
        let err = ParseError::expected_expression(token.span, &token.describe());
        self.error_at(token, err)
    }
}
