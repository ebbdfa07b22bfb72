//! Parser infrastructure: token navigation, error construction, recovery
//! and the public entry points.
//!
//! Expressions are parsed in `expr_parser.rs`, instructions in
//! `stmt_parser.rs`.

use std::collections::VecDeque;
use std::ops::ControlFlow;

use bumpalo::Bump;
use bumpalo::collections::Vec as BVec;
use nasl_core::{NaslError, ParseError, ParseErrorKind, ParseErrors, Span};

use crate::ast::{InstrList, Node, Script};
use crate::lexer::{Lexer, Token, TokenKind};

pub(super) type PResult<T> = Result<T, NaslError>;

/// How a parse reacts to syntax errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Report syntax errors as diagnostics and keep going instead of
    /// failing on the first one.
    pub recovery: bool,
    /// Stop a recovering parse after this many diagnostics. `0` means no
    /// limit.
    pub max_errors: usize,
    /// Deepest nesting of instructions and expressions accepted before the
    /// parse reports [`ParseErrorKind::NestingTooDeep`].
    pub max_depth: usize,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            recovery: false,
            ..Self::default()
        }
    }

    pub fn recovering() -> Self {
        Self {
            recovery: true,
            ..Self::default()
        }
    }

    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            recovery: false,
            max_errors: 100,
            max_depth: 128,
        }
    }
}

/// Recursive-descent parser for NASL.
///
/// Tokens are pulled from the lexer on demand into a short lookahead queue.
/// Nodes and lexemes are allocated in the `'ast` arena; the source buffer
/// only has to live as long as the parser.
pub struct Parser<'src, 'ast> {
    lexer: Lexer<'src, 'ast>,
    lookahead: VecDeque<Token<'ast>>,
    /// The last consumed token, used to close spans.
    previous: Option<Token<'ast>>,
    /// Tokens consumed so far; recovery uses it to tell whether it moved.
    consumed: usize,
    errors: ParseErrors,
    options: ParseOptions,
    /// Nesting depth of `{ }` blocks being parsed.
    block_depth: u32,
    /// Instructions and expressions currently being parsed, innermost
    /// included.
    depth: usize,
    /// Set when the diagnostic limit is reached.
    halted: bool,
    pub(super) arena: &'ast Bump,
}

impl<'src, 'ast> Parser<'src, 'ast> {
    pub fn new(source: &'src str, arena: &'ast Bump, options: ParseOptions) -> Self {
        Self {
            lexer: Lexer::new(source, arena),
            lookahead: VecDeque::with_capacity(8),
            previous: None,
            consumed: 0,
            errors: ParseErrors::new(),
            options,
            block_depth: 0,
            depth: 0,
            halted: false,
            arena,
        }
    }

    // ========================================================================
    // Entry points
    // ========================================================================

    /// Parse a whole script, failing on the first error.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn parse(source: &'src str, arena: &'ast Bump) -> Result<Script<'ast>, NaslError> {
        Self::parse_with(source, arena, &ParseOptions::strict()).map(|(script, _)| script)
    }

    /// Parse a whole script, collecting syntax errors instead of failing.
    ///
    /// The returned tree is best effort: instructions that failed to parse
    /// are missing from it. Lexical errors and unimplemented constructs
    /// still fail the parse.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn parse_lenient(
        source: &'src str,
        arena: &'ast Bump,
    ) -> Result<(Script<'ast>, ParseErrors), NaslError> {
        Self::parse_with(source, arena, &ParseOptions::recovering())
    }

    /// Parse a whole script with explicit options.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn parse_with(
        source: &'src str,
        arena: &'ast Bump,
        options: &ParseOptions,
    ) -> Result<(Script<'ast>, ParseErrors), NaslError> {
        tracing::debug!(
            recovery = options.recovery,
            bytes = source.len(),
            "parsing script"
        );

        let mut parser = Parser::new(source, arena, options.clone());
        match parser.parse_program() {
            Ok(script) => {
                tracing::debug!(
                    instructions = script.instructions().len(),
                    diagnostics = parser.errors.len(),
                    "parsed script"
                );
                Ok((script, parser.take_errors()))
            }
            Err(err) => {
                if err.is_fatal() {
                    tracing::error!(category = err.category(), at = %err.span(), "{err}");
                } else {
                    tracing::debug!(at = %err.span(), "parse failed: {err}");
                }
                Err(err)
            }
        }
    }

    /// Parse source holding exactly one expression.
    pub fn expression(source: &'src str, arena: &'ast Bump) -> Result<Node<'ast>, NaslError> {
        let mut parser = Parser::new(source, arena, ParseOptions::strict());
        let expr = parser.parse_expr(0)?;
        parser.expect_end()?;
        Ok(expr)
    }

    /// Parse source holding exactly one instruction or function declaration.
    pub fn statement(source: &'src str, arena: &'ast Bump) -> Result<Node<'ast>, NaslError> {
        let mut parser = Parser::new(source, arena, ParseOptions::strict());
        let instr = parser.parse_instr_decl()?;
        parser.expect_end()?;
        Ok(instr)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn take_errors(&mut self) -> ParseErrors {
        std::mem::take(&mut self.errors)
    }

    /// Parse the program: function declarations and instructions up to end
    /// of input.
    pub fn parse_program(&mut self) -> PResult<Script<'ast>> {
        let start = self.peek().span;
        let mut instrs = BVec::new_in(self.arena);

        while !self.halted && !self.is_eof() {
            let stmt_start = self.consumed;
            match self.parse_instr_decl() {
                Ok(instr) => instrs.push(instr),
                Err(err) => {
                    if self.recover(err, stmt_start)?.is_break() {
                        break;
                    }
                }
            }
        }

        let body = self.arena.alloc(InstrList {
            instrs: instrs.into_bump_slice(),
            span: self.span_from(start),
        });
        Ok(Script {
            body,
            span: body.span,
        })
    }

    // ========================================================================
    // Token navigation
    // ========================================================================

    fn fill(&mut self, needed: usize) {
        while self.lookahead.len() < needed {
            let token = self.lexer.next_token();
            self.lookahead.push_back(token);
        }
    }

    /// The current token.
    pub(super) fn peek(&mut self) -> Token<'ast> {
        self.peek_nth(0)
    }

    /// The token `n` places ahead of the current one.
    pub(super) fn peek_nth(&mut self, n: usize) -> Token<'ast> {
        self.fill(n + 1);
        self.lookahead[n]
    }

    /// Consume the current token. End of input and the lexer's error token
    /// are never consumed.
    pub(super) fn advance(&mut self) -> Token<'ast> {
        let token = self.peek();
        if matches!(token.kind, TokenKind::Eof | TokenKind::Error) {
            return token;
        }
        self.lookahead.pop_front();
        self.previous = Some(token);
        self.consumed += 1;
        token
    }

    pub(super) fn check(&mut self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(super) fn check_nth(&mut self, n: usize, kind: TokenKind) -> bool {
        self.peek_nth(n).kind == kind
    }

    pub(super) fn is_eof(&mut self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> Option<Token<'ast>> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    pub(super) fn expect(&mut self, kind: TokenKind) -> PResult<Token<'ast>> {
        let token = self.peek();
        if token.kind == kind {
            Ok(self.advance())
        } else {
            Err(self.expected(token, kind.description()))
        }
    }

    /// Expect a name. `x` lexes as the repetition keyword but is accepted
    /// here too.
    pub(super) fn expect_name(&mut self) -> PResult<Token<'ast>> {
        let token = self.peek();
        if token.kind.is_name() {
            Ok(self.advance())
        } else if token.kind == TokenKind::Eof {
            Err(self.expected(token, "identifier"))
        } else {
            let err = ParseError::expected_identifier(token.span, &token.describe());
            Err(self.error_at(token, err))
        }
    }

    fn expect_end(&mut self) -> PResult<()> {
        let token = self.peek();
        if token.kind == TokenKind::Eof {
            return Ok(());
        }
        let err = ParseError::new(
            ParseErrorKind::TrailingInput,
            token.span,
            format!("expected end of input, found {}", token.describe()),
        );
        Err(self.error_at(token, err))
    }

    /// Span from `start` to the end of the last consumed token.
    pub(super) fn span_from(&self, start: Span) -> Span {
        match self.previous {
            Some(prev) if !prev.span.precedes(&start) => start.merge(prev.span),
            _ => start,
        }
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// Attach `token` to `err`. A lexer error token turns into the lexical
    /// error it stands for.
    pub(super) fn error_at(&mut self, token: Token<'ast>, err: ParseError) -> NaslError {
        if token.kind == TokenKind::Error
            && let Some(lex) = self.lexer.error()
        {
            return NaslError::Lex(lex.clone());
        }
        NaslError::Syntax(err.with_found(token.kind.name(), token.lexeme))
    }

    /// "expected X, found <token>".
    pub(super) fn expected(&mut self, token: Token<'ast>, what: &str) -> NaslError {
        let err = if token.kind == TokenKind::Eof {
            ParseError::unexpected_eof(token.span, what)
        } else {
            ParseError::expected_token(token.span, what, &token.describe())
        };
        self.error_at(token, err)
    }

    pub(super) fn error(
        &mut self,
        token: Token<'ast>,
        kind: ParseErrorKind,
        message: impl Into<String>,
    ) -> NaslError {
        self.error_at(token, ParseError::new(kind, token.span, message))
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Handle an error raised while parsing one entry of an instruction list.
    ///
    /// Fatal errors, and every error in strict mode, are handed back. In
    /// recovery mode a syntax error is recorded and the parser skips to the
    /// next plausible instruction boundary.
    pub(super) fn recover(
        &mut self,
        error: NaslError,
        stmt_start: usize,
    ) -> PResult<ControlFlow<()>> {
        let NaslError::Syntax(err) = error else {
            return Err(error);
        };
        if !self.options.recovery {
            return Err(NaslError::Syntax(err));
        }
        if self.halted {
            return Ok(ControlFlow::Break(()));
        }

        tracing::warn!(
            line = err.span.line,
            col = err.span.col,
            kind = %err.kind,
            "syntax error: {}",
            err.message
        );
        self.errors.push(err);

        if self.options.max_errors != 0 && self.errors.len() >= self.options.max_errors {
            tracing::warn!(limit = self.options.max_errors, "too many syntax errors, giving up");
            self.halted = true;
            return Ok(ControlFlow::Break(()));
        }

        self.synchronize(stmt_start);
        Ok(ControlFlow::Continue(()))
    }

    /// Skip tokens until an instruction boundary.
    ///
    /// Stops just past a `;` or a balanced `{ }` group, before a keyword
    /// that starts an instruction, or before a `}` that closes the
    /// enclosing block. At least one token is consumed past `stmt_start`
    /// unless input is exhausted.
    fn synchronize(&mut self, stmt_start: usize) {
        loop {
            let token = self.peek();
            let progressed = self.consumed > stmt_start;
            match token.kind {
                TokenKind::Eof | TokenKind::Error => return,
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::LeftBrace => {
                    self.skip_braces();
                    return;
                }
                TokenKind::RightBrace if self.block_depth > 0 && progressed => return,
                TokenKind::RightBrace => {
                    self.advance();
                    if self.block_depth == 0 {
                        return;
                    }
                }
                kind if kind.starts_statement() && progressed => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Consume a `{ }` group and everything nested in it.
    fn skip_braces(&mut self) {
        let mut open = 0usize;
        loop {
            match self.peek().kind {
                TokenKind::Eof | TokenKind::Error => return,
                TokenKind::LeftBrace => open += 1,
                TokenKind::RightBrace => {
                    open = open.saturating_sub(1);
                    if open == 0 {
                        self.advance();
                        return;
                    }
                }
                _ => {}
            }
            self.advance();
        }
    }

    // ========================================================================
    // Nesting
    // ========================================================================

    /// Run `parse` one nesting level deeper, failing instead once
    /// `max_depth` levels are open.
    pub(super) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        if self.depth >= self.options.max_depth {
            let token = self.peek();
            return Err(self.error(
                token,
                ParseErrorKind::NestingTooDeep,
                format!("nesting exceeds {} levels", self.options.max_depth),
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // ========================================================================
    // Block bookkeeping
    // ========================================================================

    pub(super) fn enter_block(&mut self) {
        self.block_depth += 1;
    }

    pub(super) fn exit_block(&mut self) {
        self.block_depth = self.block_depth.saturating_sub(1);
    }

    pub(super) fn is_halted(&self) -> bool {
        self.halted
    }

    pub(super) fn consumed(&self) -> usize {
        self.consumed
    }
}
