//! Token types for the NASL lexer.

use std::fmt;

use nasl_core::Span;

/// A token from the source code.
///
/// The lexeme is copied into the arena, so tokens and the trees built from
/// them outlive the source buffer.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Token<'ast> {
    pub kind: TokenKind,
    pub lexeme: &'ast str,
    pub span: Span,
}

impl<'ast> Token<'ast> {
    #[inline]
    pub fn new(kind: TokenKind, lexeme: &'ast str, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    /// Human-readable form used in diagnostics: the lexeme when there is
    /// one, the kind description otherwise.
    pub fn describe(&self) -> String {
        if self.lexeme.is_empty() {
            self.kind.description().to_string()
        } else {
            format!("'{}'", self.lexeme)
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?} @ {:?})", self.kind.name(), self.lexeme, self.span)
    }
}

/// Every kind of token a NASL script can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================
    // Literals and names
    // =========================================
    /// Decimal or `0x` hexadecimal integer.
    Integer,
    /// Single- or double-quoted string, quotes included in the lexeme.
    String,
    Ident,

    // =========================================
    // Keywords
    // =========================================
    /// `x`, the repetition operator. Also accepted wherever a name is.
    Rep,
    /// `local_var`
    Local,
    /// `global_var`
    Global,
    /// `and` or `&&`
    And,
    /// `or` or `||`
    Or,
    If,
    Else,
    For,
    Foreach,
    While,
    Repeat,
    Until,
    Break,
    Continue,
    Function,
    Return,
    Include,

    // =========================================
    // Assignment
    // =========================================
    Equal,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    LessLessEqual,
    GreaterGreaterEqual,
    GreaterGreaterGreaterEqual,

    // =========================================
    // Comparison and matching
    // =========================================
    EqualEqual,
    BangEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    /// `><`, substring match.
    Match,
    /// `>!<`, substring mismatch.
    NoMatch,
    /// `=~`, regex match.
    ReMatch,
    /// `!~`, regex mismatch.
    ReNoMatch,

    // =========================================
    // Arithmetic and bitwise
    // =========================================
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Bang,
    LessLess,
    GreaterGreater,
    GreaterGreaterGreater,
    PlusPlus,
    MinusMinus,

    // =========================================
    // Punctuation
    // =========================================
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Semicolon,
    Colon,
    Dot,
    /// `=>`, only meaningful inside array literals.
    Arrow,

    // =========================================
    // Special
    // =========================================
    Eof,
    /// Produced once when the lexer hits an illegal character.
    Error,
}

impl TokenKind {
    /// The grammar symbol for this kind, as used in syntax diagnostics.
    pub fn name(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Integer => "INTEGER",
            String => "STRING",
            Ident => "ID",
            Rep => "REP",
            Local => "LOCAL",
            Global => "GLOBAL",
            And => "AND",
            Or => "OR",
            If => "IF",
            Else => "ELSE",
            For => "FOR",
            Foreach => "FOREACH",
            While => "WHILE",
            Repeat => "REPEAT",
            Until => "UNTIL",
            Break => "BREAK",
            Continue => "CONTINUE",
            Function => "FUNCTION",
            Return => "RETURN",
            Include => "INCLUDE",
            Equal => "EQUALS",
            PlusEqual => "PLUS_EQ",
            MinusEqual => "MINUS_EQ",
            StarEqual => "MULT_EQ",
            SlashEqual => "DIV_EQ",
            PercentEqual => "MODULO_EQ",
            LessLessEqual => "L_SHIFT_EQ",
            GreaterGreaterEqual => "R_SHIFT_EQ",
            GreaterGreaterGreaterEqual => "R_USHIFT_EQ",
            EqualEqual => "EQ",
            BangEqual => "NEQ",
            Less => "LT",
            LessEqual => "INFEQ",
            Greater => "GT",
            GreaterEqual => "SUPEQ",
            Match => "MATCH",
            NoMatch => "NOMATCH",
            ReMatch => "RE_MATCH",
            ReNoMatch => "RE_NOMATCH",
            Plus => "PLUS",
            Minus => "MINUS",
            Star => "TIMES",
            StarStar => "EXPO",
            Slash => "DIVIDE",
            Percent => "MOD",
            Amp => "BIT_AND",
            Pipe => "BIT_OR",
            Caret => "BIT_XOR",
            Tilde => "BIT_NOT",
            Bang => "LNOT",
            LessLess => "L_SHIFT",
            GreaterGreater => "R_SHIFT",
            GreaterGreaterGreater => "R_USHIFT",
            PlusPlus => "PLUS_PLUS",
            MinusMinus => "MINUS_MINUS",
            LeftParen => "LPAREN",
            RightParen => "RPAREN",
            LeftBracket => "LBRACKET",
            RightBracket => "RBRACKET",
            LeftBrace => "LBRACE",
            RightBrace => "RBRACE",
            Comma => "COMMA",
            Semicolon => "SEMI",
            Colon => "COLON",
            Dot => "DOT",
            Arrow => "ARROW",
            Eof => "EOF",
            Error => "ERROR",
        }
    }

    /// Human-readable description for error messages.
    pub fn description(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Integer => "integer literal",
            String => "string literal",
            Ident => "identifier",
            Rep => "'x'",
            Local => "'local_var'",
            Global => "'global_var'",
            And => "'&&'",
            Or => "'||'",
            If => "'if'",
            Else => "'else'",
            For => "'for'",
            Foreach => "'foreach'",
            While => "'while'",
            Repeat => "'repeat'",
            Until => "'until'",
            Break => "'break'",
            Continue => "'continue'",
            Function => "'function'",
            Return => "'return'",
            Include => "'include'",
            Equal => "'='",
            PlusEqual => "'+='",
            MinusEqual => "'-='",
            StarEqual => "'*='",
            SlashEqual => "'/='",
            PercentEqual => "'%='",
            LessLessEqual => "'<<='",
            GreaterGreaterEqual => "'>>='",
            GreaterGreaterGreaterEqual => "'>>>='",
            EqualEqual => "'=='",
            BangEqual => "'!='",
            Less => "'<'",
            LessEqual => "'<='",
            Greater => "'>'",
            GreaterEqual => "'>='",
            Match => "'><'",
            NoMatch => "'>!<'",
            ReMatch => "'=~'",
            ReNoMatch => "'!~'",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            StarStar => "'**'",
            Slash => "'/'",
            Percent => "'%'",
            Amp => "'&'",
            Pipe => "'|'",
            Caret => "'^'",
            Tilde => "'~'",
            Bang => "'!'",
            LessLess => "'<<'",
            GreaterGreater => "'>>'",
            GreaterGreaterGreater => "'>>>'",
            PlusPlus => "'++'",
            MinusMinus => "'--'",
            LeftParen => "'('",
            RightParen => "')'",
            LeftBracket => "'['",
            RightBracket => "']'",
            LeftBrace => "'{'",
            RightBrace => "'}'",
            Comma => "','",
            Semicolon => "';'",
            Colon => "':'",
            Dot => "'.'",
            Arrow => "'=>'",
            Eof => "end of file",
            Error => "invalid token",
        }
    }

    /// Whether a token of this kind can name a variable or function.
    ///
    /// `x` always lexes as [`TokenKind::Rep`], so the grammar accepts it as a
    /// name as well.
    #[inline]
    pub fn is_name(&self) -> bool {
        matches!(self, TokenKind::Ident | TokenKind::Rep)
    }

    /// Whether this kind starts an instruction that cannot start an
    /// expression. Used to resynchronize after a syntax error.
    pub fn starts_statement(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            If | For | Foreach | While | Repeat | Break | Continue | Return | Include | Local
                | Global | Function
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Resolve identifier text to a keyword kind.
///
/// Order matters: `x` is the repetition operator before anything else, then
/// the declaration keywords, then the reserved words. Matching is
/// case-sensitive.
pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    use TokenKind::*;
    let kind = match ident {
        "x" => Rep,
        "local_var" => Local,
        "global_var" => Global,
        "and" => And,
        "or" => Or,
        "if" => If,
        "else" => Else,
        "for" => For,
        "foreach" => Foreach,
        "while" => While,
        "repeat" => Repeat,
        "until" => Until,
        "break" => Break,
        "continue" => Continue,
        "function" => Function,
        "return" => Return,
        "include" => Include,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(lookup_keyword("if"), Some(TokenKind::If));
        assert_eq!(lookup_keyword("IF"), None);
        assert_eq!(lookup_keyword("Foreach"), None);
    }

    #[test]
    fn rep_and_declarations() {
        assert_eq!(lookup_keyword("x"), Some(TokenKind::Rep));
        assert_eq!(lookup_keyword("X"), None);
        assert_eq!(lookup_keyword("local_var"), Some(TokenKind::Local));
        assert_eq!(lookup_keyword("global_var"), Some(TokenKind::Global));
        assert_eq!(lookup_keyword("xx"), None);
    }

    #[test]
    fn word_operators() {
        assert_eq!(lookup_keyword("and"), Some(TokenKind::And));
        assert_eq!(lookup_keyword("or"), Some(TokenKind::Or));
        assert_eq!(lookup_keyword("not"), None);
    }

    #[test]
    fn names_match_grammar_symbols() {
        assert_eq!(TokenKind::Semicolon.name(), "SEMI");
        assert_eq!(TokenKind::Ident.name(), "ID");
        assert_eq!(TokenKind::GreaterGreaterGreaterEqual.name(), "R_USHIFT_EQ");
        assert_eq!(TokenKind::NoMatch.name(), "NOMATCH");
    }

    #[test]
    fn describe_token() {
        let tok = Token::new(TokenKind::Ident, "foo", Span::new(1, 1, 3));
        assert_eq!(tok.describe(), "'foo'");
        let eof = Token::new(TokenKind::Eof, "", Span::point(2, 1));
        assert_eq!(eof.describe(), "end of file");
        assert_eq!(TokenKind::Eof.to_string(), "end of file");
    }

    #[test]
    fn name_tokens() {
        assert!(TokenKind::Rep.is_name());
        assert!(TokenKind::Ident.is_name());
        assert!(!TokenKind::Local.is_name());
        assert!(TokenKind::Return.starts_statement());
        assert!(!TokenKind::Ident.starts_statement());
    }
}
