//! Operators and the precedence table that orders them.
//!
//! Levels are listed lowest first. The parser derives binding powers from
//! them: a level `n` operator binds at `2n` on the left and at `2n + 1`
//! (left and non-associative) or `2n` (right-associative) on the right.

use std::fmt;

use crate::lexer::TokenKind;

/// Precedence levels, lowest binding first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    /// `= += -= *= /= %= <<= >>= >>>=`
    Assignment = 1,
    /// `||` / `or`
    LogicalOr = 2,
    /// `&&` / `and`
    LogicalAnd = 3,
    /// `< > == != >= <= >< >!< =~ !~`
    Comparison = 4,
    /// `|`
    BitwiseOr = 5,
    /// `^`
    BitwiseXor = 6,
    /// `&`
    BitwiseAnd = 7,
    /// `<< >> >>>`
    Shift = 8,
    /// `+ -`
    Additive = 9,
    /// `* / %`
    Multiplicative = 10,
    /// prefix `!`
    LogicalNot = 11,
    /// prefix `-` and `~`
    Negate = 12,
    /// `**`
    Power = 13,
    /// `++ --`
    Increment = 14,
    /// `=>`
    Arrow = 15,
}

/// How operators of one level group when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    /// Chaining two operators of the level is a syntax error.
    NonAssoc,
}

impl Precedence {
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn associativity(self) -> Associativity {
        use Precedence::*;
        match self {
            Assignment | Power => Associativity::Right,
            LogicalOr | LogicalAnd | BitwiseOr | BitwiseXor | BitwiseAnd | Additive
            | Multiplicative => Associativity::Left,
            Comparison | Shift | LogicalNot | Negate | Increment | Arrow => {
                Associativity::NonAssoc
            }
        }
    }

    /// `(left, right)` binding power for an infix operator of this level.
    pub fn binding_power(self) -> (u8, u8) {
        let left = self.level() * 2;
        match self.associativity() {
            Associativity::Right => (left, left),
            Associativity::Left | Associativity::NonAssoc => (left, left + 1),
        }
    }

    /// Minimum binding power for the operand of a prefix operator of this
    /// level. Only operators of a higher level extend the operand.
    pub fn prefix_operand_bp(self) -> u8 {
        self.level() * 2 + 1
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `||` / `or`
    Or,
    /// `&&` / `and`
    And,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    /// `><`, substring contained.
    Match,
    /// `>!<`, substring not contained.
    NoMatch,
    /// `=~`, regex match. The right operand is always a string atom.
    ReMatch,
    /// `!~`
    ReNoMatch,
    BitOr,
    BitXor,
    BitAnd,
    ShiftLeft,
    ShiftRight,
    /// `>>>`
    ShiftRightUnsigned,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    /// `**`
    Pow,
}

impl BinaryOp {
    pub fn from_token(token: TokenKind) -> Option<Self> {
        use BinaryOp::*;
        let op = match token {
            TokenKind::Or => Or,
            TokenKind::And => And,
            TokenKind::EqualEqual => Equal,
            TokenKind::BangEqual => NotEqual,
            TokenKind::Less => Less,
            TokenKind::LessEqual => LessEqual,
            TokenKind::Greater => Greater,
            TokenKind::GreaterEqual => GreaterEqual,
            TokenKind::Match => Match,
            TokenKind::NoMatch => NoMatch,
            TokenKind::ReMatch => ReMatch,
            TokenKind::ReNoMatch => ReNoMatch,
            TokenKind::Pipe => BitOr,
            TokenKind::Caret => BitXor,
            TokenKind::Amp => BitAnd,
            TokenKind::LessLess => ShiftLeft,
            TokenKind::GreaterGreater => ShiftRight,
            TokenKind::GreaterGreaterGreater => ShiftRightUnsigned,
            TokenKind::Plus => Add,
            TokenKind::Minus => Sub,
            TokenKind::Star => Mul,
            TokenKind::Slash => Div,
            TokenKind::Percent => Mod,
            TokenKind::StarStar => Pow,
            _ => return None,
        };
        Some(op)
    }

    pub fn precedence(self) -> Precedence {
        use BinaryOp::*;
        match self {
            Or => Precedence::LogicalOr,
            And => Precedence::LogicalAnd,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual | Match | NoMatch
            | ReMatch | ReNoMatch => Precedence::Comparison,
            BitOr => Precedence::BitwiseOr,
            BitXor => Precedence::BitwiseXor,
            BitAnd => Precedence::BitwiseAnd,
            ShiftLeft | ShiftRight | ShiftRightUnsigned => Precedence::Shift,
            Add | Sub => Precedence::Additive,
            Mul | Div | Mod => Precedence::Multiplicative,
            Pow => Precedence::Power,
        }
    }

    /// Whether the right operand must be a string literal pattern.
    pub fn takes_pattern(self) -> bool {
        matches!(self, BinaryOp::ReMatch | BinaryOp::ReNoMatch)
    }

    /// Canonical spelling. `and`/`or` spell as `&&`/`||`.
    pub fn as_str(self) -> &'static str {
        use BinaryOp::*;
        match self {
            Or => "||",
            And => "&&",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Match => "><",
            NoMatch => ">!<",
            ReMatch => "=~",
            ReNoMatch => "!~",
            BitOr => "|",
            BitXor => "^",
            BitAnd => "&",
            ShiftLeft => "<<",
            ShiftRight => ">>",
            ShiftRightUnsigned => ">>>",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "**",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Negate,
    /// `~`
    BitNot,
}

impl UnaryOp {
    pub fn from_token(token: TokenKind) -> Option<Self> {
        match token {
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Negate),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            _ => None,
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            UnaryOp::Not => Precedence::LogicalNot,
            UnaryOp::Negate | UnaryOp::BitNot => Precedence::Negate,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Negate => "-",
            UnaryOp::BitNot => "~",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    ShlAssign,
    ShrAssign,
    /// `>>>=`
    UShrAssign,
}

impl AssignOp {
    pub fn from_token(token: TokenKind) -> Option<Self> {
        use AssignOp::*;
        let op = match token {
            TokenKind::Equal => Assign,
            TokenKind::PlusEqual => AddAssign,
            TokenKind::MinusEqual => SubAssign,
            TokenKind::StarEqual => MulAssign,
            TokenKind::SlashEqual => DivAssign,
            TokenKind::PercentEqual => ModAssign,
            TokenKind::LessLessEqual => ShlAssign,
            TokenKind::GreaterGreaterEqual => ShrAssign,
            TokenKind::GreaterGreaterGreaterEqual => UShrAssign,
            _ => return None,
        };
        Some(op)
    }

    pub fn precedence(self) -> Precedence {
        Precedence::Assignment
    }

    pub fn is_simple(self) -> bool {
        self == AssignOp::Assign
    }

    pub fn as_str(self) -> &'static str {
        use AssignOp::*;
        match self {
            Assign => "=",
            AddAssign => "+=",
            SubAssign => "-=",
            MulAssign => "*=",
            DivAssign => "/=",
            ModAssign => "%=",
            ShlAssign => "<<=",
            ShrAssign => ">>=",
            UShrAssign => ">>>=",
        }
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `++` or `--`, before or after an lvalue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncrOp {
    Increment,
    Decrement,
}

impl IncrOp {
    pub fn from_token(token: TokenKind) -> Option<Self> {
        match token {
            TokenKind::PlusPlus => Some(IncrOp::Increment),
            TokenKind::MinusMinus => Some(IncrOp::Decrement),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IncrOp::Increment => "++",
            IncrOp::Decrement => "--",
        }
    }
}

impl fmt::Display for IncrOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order() {
        assert!(Precedence::Assignment < Precedence::LogicalOr);
        assert!(Precedence::Comparison < Precedence::BitwiseOr);
        assert!(Precedence::Shift < Precedence::Additive);
        assert!(Precedence::LogicalNot < Precedence::Negate);
        assert!(Precedence::Power < Precedence::Increment);
        assert_eq!(Precedence::Arrow.level(), 15);
    }

    #[test]
    fn associativity() {
        assert_eq!(Precedence::Assignment.associativity(), Associativity::Right);
        assert_eq!(Precedence::Power.associativity(), Associativity::Right);
        assert_eq!(Precedence::Additive.associativity(), Associativity::Left);
        assert_eq!(Precedence::Comparison.associativity(), Associativity::NonAssoc);
        assert_eq!(Precedence::Shift.associativity(), Associativity::NonAssoc);
    }

    #[test]
    fn binding_powers() {
        assert_eq!(Precedence::Additive.binding_power(), (18, 19));
        assert_eq!(Precedence::Power.binding_power(), (26, 26));
        assert_eq!(Precedence::Comparison.binding_power(), (8, 9));
        // `-2 ** 2` keeps `**` inside the negation, `-a * b` does not.
        let operand = UnaryOp::Negate.precedence().prefix_operand_bp();
        assert!(BinaryOp::Pow.precedence().binding_power().0 >= operand);
        assert!(BinaryOp::Mul.precedence().binding_power().0 < operand);
    }

    #[test]
    fn binary_from_token() {
        assert_eq!(BinaryOp::from_token(TokenKind::And), Some(BinaryOp::And));
        assert_eq!(BinaryOp::from_token(TokenKind::NoMatch), Some(BinaryOp::NoMatch));
        assert_eq!(
            BinaryOp::from_token(TokenKind::GreaterGreaterGreater),
            Some(BinaryOp::ShiftRightUnsigned)
        );
        assert_eq!(BinaryOp::from_token(TokenKind::Equal), None);
        assert_eq!(BinaryOp::from_token(TokenKind::Bang), None);
    }

    #[test]
    fn comparison_family() {
        for kind in [
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::EqualEqual,
            TokenKind::BangEqual,
            TokenKind::GreaterEqual,
            TokenKind::LessEqual,
            TokenKind::Match,
            TokenKind::NoMatch,
            TokenKind::ReMatch,
            TokenKind::ReNoMatch,
        ] {
            let op = BinaryOp::from_token(kind).expect("comparison operator");
            assert_eq!(op.precedence(), Precedence::Comparison, "{kind:?}");
        }
        assert!(BinaryOp::ReMatch.takes_pattern());
        assert!(!BinaryOp::Match.takes_pattern());
    }

    #[test]
    fn nine_assignment_operators() {
        let kinds = [
            TokenKind::Equal,
            TokenKind::PlusEqual,
            TokenKind::MinusEqual,
            TokenKind::StarEqual,
            TokenKind::SlashEqual,
            TokenKind::PercentEqual,
            TokenKind::LessLessEqual,
            TokenKind::GreaterGreaterEqual,
            TokenKind::GreaterGreaterGreaterEqual,
        ];
        let spelled: Vec<&str> = kinds
            .iter()
            .filter_map(|k| AssignOp::from_token(*k))
            .map(AssignOp::as_str)
            .collect();
        assert_eq!(spelled, ["=", "+=", "-=", "*=", "/=", "%=", "<<=", ">>=", ">>>="]);
        assert!(AssignOp::Assign.is_simple());
        assert!(!AssignOp::UShrAssign.is_simple());
    }

    #[test]
    fn unary_and_incr() {
        assert_eq!(UnaryOp::from_token(TokenKind::Tilde), Some(UnaryOp::BitNot));
        assert_eq!(UnaryOp::Not.precedence(), Precedence::LogicalNot);
        assert_eq!(IncrOp::from_token(TokenKind::MinusMinus), Some(IncrOp::Decrement));
        assert_eq!(IncrOp::Increment.to_string(), "++");
        assert_eq!(BinaryOp::Or.to_string(), "||");
    }
}
