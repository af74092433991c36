use std::fmt;

/// Comparison operators usable inside an atomic predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// Equal (`==`)
    Eq,
    /// Not equal (`!=`)
    NotEq,
    /// Greater than or equal (`>=`)
    Gte,
    /// Less than or equal (`<=`)
    Lte,
    /// Greater than (`>`)
    Gt,
    /// Less than (`<`)
    Lt,
    /// Wildcard match (`~~`), `%` matches any run of characters
    Like,
    /// Negated wildcard match (`!~`)
    NotLike,
}

impl ComparisonOp {
    /// Every operator, in the order they are listed in error messages.
    pub const ALL: [ComparisonOp; 8] = [
        ComparisonOp::Eq,
        ComparisonOp::NotEq,
        ComparisonOp::Gte,
        ComparisonOp::Lte,
        ComparisonOp::Like,
        ComparisonOp::NotLike,
        ComparisonOp::Gt,
        ComparisonOp::Lt,
    ];

    /// Two-character operators, searched before the single-character ones.
    pub const TWO_CHAR: [ComparisonOp; 6] = [
        ComparisonOp::Eq,
        ComparisonOp::NotEq,
        ComparisonOp::Gte,
        ComparisonOp::Lte,
        ComparisonOp::Like,
        ComparisonOp::NotLike,
    ];

    pub const ONE_CHAR: [ComparisonOp; 2] = [ComparisonOp::Gt, ComparisonOp::Lt];

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "==",
            ComparisonOp::NotEq => "!=",
            ComparisonOp::Gte => ">=",
            ComparisonOp::Lte => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Lt => "<",
            ComparisonOp::Like => "~~",
            ComparisonOp::NotLike => "!~",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Short human description, used by the `operators` command.
    pub fn description(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "exact string equality",
            ComparisonOp::NotEq => "exact string inequality",
            ComparisonOp::Gte => "greater than or equal (numeric when both sides are numbers)",
            ComparisonOp::Lte => "less than or equal (numeric when both sides are numbers)",
            ComparisonOp::Gt => "greater than (numeric when both sides are numbers)",
            ComparisonOp::Lt => "less than (numeric when both sides are numbers)",
            ComparisonOp::Like => "full match against a pattern where % is any run of characters",
            ComparisonOp::NotLike => "negation of ~~",
        }
    }

    pub fn is_pattern(self) -> bool {
        matches!(self, ComparisonOp::Like | ComparisonOp::NotLike)
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Logical connectives joining two sub-expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    /// Logical AND (`&`)
    And,
    /// Logical OR (`|`)
    Or,
}

impl LogicalOp {
    pub fn symbol(self) -> &'static str {
        match self {
            LogicalOp::And => "&",
            LogicalOp::Or => "|",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "&" => Some(LogicalOp::And),
            "|" => Some(LogicalOp::Or),
            _ => None,
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[test]
fn test_symbol_round_trip() {
    for op in ComparisonOp::ALL {
        assert_eq!(ComparisonOp::from_symbol(op.symbol()), Some(op));
    }
    assert_eq!(ComparisonOp::from_symbol("="), None);
}

#[test]
fn test_connective_symbols() {
    assert_eq!(LogicalOp::from_symbol("&"), Some(LogicalOp::And));
    assert_eq!(LogicalOp::from_symbol("|"), Some(LogicalOp::Or));
    assert_eq!(LogicalOp::from_symbol("+"), None);
}
