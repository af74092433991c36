use std::{fmt, mem};

use regex::Regex;

use crate::{
    ast::{ComparisonOp, LogicalOp},
    evaluator::like_pattern,
    parser::ParseError,
};

/// A parsed filter expression.
///
/// Trees are built once by [`crate::parser::build`] and then evaluated
/// read-only against any number of records. A `Logical` node owns both of
/// its children; there is no sharing between branches.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    /// A single `field<op>literal` comparison.
    Atomic(Atomic),

    /// Two sub-expressions joined by `&` or `|`.
    Logical {
        op: LogicalOp,
        left: Box<FilterExpression>,
        right: Box<FilterExpression>,
    },
}

impl FilterExpression {
    pub fn logical(op: LogicalOp, left: FilterExpression, right: FilterExpression) -> Self {
        FilterExpression::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Returns the atomic predicate if this expression is a leaf.
    pub fn as_atomic(&self) -> Option<&Atomic> {
        match self {
            FilterExpression::Atomic(atomic) => Some(atomic),
            FilterExpression::Logical { .. } => None,
        }
    }

    /// Number of atomic predicates in the tree.
    pub fn predicate_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(expr) = pending.pop() {
            match expr {
                FilterExpression::Atomic(_) => count += 1,
                FilterExpression::Logical { left, right, .. } => {
                    pending.push(right);
                    pending.push(left);
                }
            }
        }
        count
    }
}

// Unlinks children onto a heap stack so dropping a long chain never recurses deeply.
impl Drop for FilterExpression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        take_children(self, &mut pending);
        while let Some(mut expr) = pending.pop() {
            take_children(&mut expr, &mut pending);
        }
    }
}

fn take_children(expr: &mut FilterExpression, pending: &mut Vec<FilterExpression>) {
    if let FilterExpression::Logical { left, right, .. } = expr {
        for child in [left, right] {
            if matches!(**child, FilterExpression::Logical { .. }) {
                pending.push(mem::replace(child.as_mut(), FilterExpression::Atomic(Atomic::empty())));
            }
        }
    }
}

impl From<Atomic> for FilterExpression {
    fn from(atomic: Atomic) -> Self {
        FilterExpression::Atomic(atomic)
    }
}

/// Writes the expression back in filter syntax. For trees produced by the
/// parser the output builds to an equal tree.
impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpression::Atomic(atomic) => write!(f, "{}", atomic),
            FilterExpression::Logical { .. } => {
                let mut current = self;
                while let FilterExpression::Logical { op, left, right } = current {
                    write!(f, "{}{}", left, op)?;
                    current = &**right;
                }
                write!(f, "{}", current)
            }
        }
    }
}

/// A leaf predicate: a dotted field path, an operator and a literal.
#[derive(Debug, Clone)]
pub struct Atomic {
    field: String,
    operator: ComparisonOp,
    literal: String,
    /// Anchored matcher for `~~` and `!~`, compiled from the literal.
    pattern: Option<Regex>,
}

impl Atomic {
    /// Creates a predicate, compiling the wildcard pattern for `~~`/`!~`.
    pub fn new(
        field: impl Into<String>,
        operator: ComparisonOp,
        literal: impl Into<String>,
    ) -> Result<Self, ParseError> {
        let literal = literal.into();
        let pattern = if operator.is_pattern() {
            Some(like_pattern(&literal)?)
        } else {
            None
        };

        Ok(Atomic {
            field: field.into(),
            operator,
            literal,
            pattern,
        })
    }

    /// Placeholder left behind when a subtree is moved out during drop.
    fn empty() -> Self {
        Atomic {
            field: String::new(),
            operator: ComparisonOp::Eq,
            literal: String::new(),
            pattern: None,
        }
    }

    /// The dotted path of the field being compared.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> ComparisonOp {
        self.operator
    }

    /// The operator as written in the filter string.
    pub fn operator_symbol(&self) -> &'static str {
        self.operator.symbol()
    }

    /// The literal on the right-hand side. May be empty.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub(crate) fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }
}

// The compiled pattern is derived from the literal, so it takes no part in equality.
impl PartialEq for Atomic {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
            && self.operator == other.operator
            && self.literal == other.literal
    }
}

impl fmt::Display for Atomic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.operator, self.literal)
    }
}
