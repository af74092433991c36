use std::str::FromStr;

use thiserror::Error;

use crate::{
    ast::{Atomic, ComparisonOp, FilterExpression, LogicalOp},
    lexer::Lexer,
};

/// Errors raised while building a filter expression.
///
/// Parsing either produces a complete tree or fails with one of these; no
/// partial result is ever returned.
#[derive(Error, Debug, Clone)]
pub enum ParseError {
    /// Operands and connectives do not alternate: an even token count or an
    /// empty operand next to a connective
    #[error("invalid syntax in logical expression: '{expression}'")]
    Syntax {
        /// The offending tokens, concatenated
        expression: String,
    },

    /// A connective position holds something other than `&` or `|`
    #[error("invalid logical operator: '{token}'")]
    UnknownConnective { token: String },

    /// No comparison operator found in a predicate fragment
    #[error(
        "error creating a filter from {fragment}: operator couldn't be determined, use one of [{allowed}]",
        allowed = allowed_operators()
    )]
    UnknownOperator { fragment: String },

    /// The wildcard literal of `~~`/`!~` could not be compiled
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

fn allowed_operators() -> String {
    ComparisonOp::ALL
        .iter()
        .map(|op| op.symbol())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds an expression from a raw filter string.
///
/// The string is split on `&` and `|`; a single fragment becomes an atomic
/// predicate, anything longer goes through [`build_tree`].
///
/// # Examples
///
/// ```
/// use rowfilter::parser::build;
///
/// let expr = build("status==active&age>=18").unwrap();
/// assert_eq!(expr.predicate_count(), 2);
///
/// assert!(build("status==active&").is_err());
/// ```
pub fn build(filter: &str) -> Result<FilterExpression, ParseError> {
    let tokens = Lexer::new(filter).tokenize();

    if tokens.len() == 1 {
        return parse_atomic(&tokens[0]).map(FilterExpression::Atomic);
    }

    build_tree(&tokens)
}

/// Builds a logical tree from an alternating operand/connective token list.
///
/// `|` is always the outer split, so `&` binds tighter. Splitting at the
/// leftmost connective of a kind leaves the left side free of it, which makes
/// every chain nest to the right: `a|b|c&d&e` becomes
/// `a | (b | (c & (d & e)))`. The tree is assembled with loops, so long
/// chains do not grow the call stack.
pub fn build_tree<S: AsRef<str>>(tokens: &[S]) -> Result<FilterExpression, ParseError> {
    let syntax_error = || ParseError::Syntax {
        expression: tokens.iter().map(AsRef::as_ref).collect(),
    };

    if tokens.len() % 2 == 0 {
        return Err(syntax_error());
    }

    if tokens.len() == 1 {
        return parse_atomic(tokens[0].as_ref()).map(FilterExpression::Atomic);
    }

    let mut connectives = Vec::with_capacity(tokens.len() / 2);
    for token in tokens.iter().skip(1).step_by(2) {
        let token = token.as_ref();
        let op = LogicalOp::from_symbol(token).ok_or_else(|| ParseError::UnknownConnective {
            token: token.to_string(),
        })?;
        connectives.push(op);
    }

    // A connective with nothing on one side, e.g. `a==0&` or `a==0&&b==1`
    if tokens.iter().step_by(2).any(|t| t.as_ref().is_empty()) {
        return Err(syntax_error());
    }

    // Runs of `&`-joined predicates, separated by `|`
    let mut runs: Vec<Vec<Atomic>> = vec![Vec::new()];
    for (i, operand) in tokens.iter().step_by(2).enumerate() {
        if i > 0 && connectives[i - 1] == LogicalOp::Or {
            runs.push(Vec::new());
        }
        if let Some(run) = runs.last_mut() {
            run.push(parse_atomic(operand.as_ref())?);
        }
    }

    log::debug!(
        "building {} predicates in {} '|' branch(es)",
        connectives.len() + 1,
        runs.len()
    );

    let mut branches = Vec::with_capacity(runs.len());
    for run in runs {
        let branch = fold_right(LogicalOp::And, run.into_iter().map(FilterExpression::Atomic))
            .ok_or_else(syntax_error)?;
        branches.push(branch);
    }

    fold_right(LogicalOp::Or, branches.into_iter()).ok_or_else(syntax_error)
}

/// Joins `items` with `op`, nesting to the right. `None` if there are no items.
fn fold_right<I>(op: LogicalOp, items: I) -> Option<FilterExpression>
where
    I: DoubleEndedIterator<Item = FilterExpression>,
{
    let mut items = items.rev();
    let last = items.next()?;
    Some(items.fold(last, |acc, item| FilterExpression::logical(op, item, acc)))
}

/// Parses a single `<field><operator><literal>` fragment.
///
/// Two-character operators are searched first; the leftmost occurrence in the
/// fragment wins. Only if none is present are `>` and `<` considered. The
/// fragment is split at the first occurrence of the chosen operator, so the
/// literal may itself contain operator characters.
pub fn parse_atomic(fragment: &str) -> Result<Atomic, ParseError> {
    let operator = find_operator(fragment, &ComparisonOp::TWO_CHAR)
        .or_else(|| find_operator(fragment, &ComparisonOp::ONE_CHAR))
        .ok_or_else(|| ParseError::UnknownOperator {
            fragment: fragment.to_string(),
        })?;

    let (field, literal) = fragment
        .split_once(operator.symbol())
        .ok_or_else(|| ParseError::UnknownOperator {
            fragment: fragment.to_string(),
        })?;

    Atomic::new(field, operator, literal)
}

fn find_operator(fragment: &str, candidates: &[ComparisonOp]) -> Option<ComparisonOp> {
    fragment.char_indices().find_map(|(i, _)| {
        let rest = &fragment[i..];
        candidates
            .iter()
            .copied()
            .find(|op| rest.starts_with(op.symbol()))
    })
}

impl FromStr for FilterExpression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        build(s)
    }
}
