use std::{cmp::Ordering, str::FromStr};

use regex::Regex;
use rust_decimal::Decimal;

use crate::{
    ast::{Atomic, ComparisonOp, FilterExpression, LogicalOp},
    record::{DEFAULT_SEPARATOR, Record},
};

impl FilterExpression {
    /// Tests a record against this expression, using `.` as path separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use rowfilter::build;
    /// use serde_json::json;
    ///
    /// let filter = build("a==b&c==d|e==f").unwrap();
    ///
    /// assert!(filter.matches(&json!({"a": "b", "c": "d", "e": "nope"})));
    /// assert!(filter.matches(&json!({"a": "b", "c": "nope", "e": "f"})));
    /// assert!(!filter.matches(&json!({"a": "b", "c": "nope", "e": "nope"})));
    /// ```
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.matches_with(record, DEFAULT_SEPARATOR)
    }

    /// Tests a record against this expression with a custom path separator.
    ///
    /// `&` and `|` short-circuit: the right branch is only evaluated when the
    /// left one does not decide the result.
    pub fn matches_with<R: Record + ?Sized>(&self, record: &R, separator: char) -> bool {
        // Walk right-nested chains in a loop; built trees only nest deeply on the right
        let mut current = self;
        loop {
            match current {
                FilterExpression::Atomic(atomic) => return atomic.matches_with(record, separator),
                FilterExpression::Logical { op, left, right } => {
                    let left = left.matches_with(record, separator);
                    match op {
                        LogicalOp::And if !left => return false,
                        LogicalOp::Or if left => return true,
                        _ => current = &**right,
                    }
                }
            }
        }
    }

    /// Keeps the records that match this expression.
    pub fn filter_records<'a, R: Record + 'a>(
        &'a self,
        records: impl IntoIterator<Item = &'a R> + 'a,
    ) -> impl Iterator<Item = &'a R> + 'a {
        records.into_iter().filter(move |record| self.matches(*record))
    }
}

/// Evaluates `expr` against `record`.
pub fn evaluate<R: Record + ?Sized>(expr: &FilterExpression, record: &R) -> bool {
    expr.matches(record)
}

impl Atomic {
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.matches_with(record, DEFAULT_SEPARATOR)
    }

    pub fn matches_with<R: Record + ?Sized>(&self, record: &R, separator: char) -> bool {
        let value = record.lookup(self.field(), separator);
        let result = self.compare(value.as_deref());
        log::trace!("{} against {:?} -> {}", self, value, result);
        result
    }

    /// Applies the operator to an already resolved value.
    ///
    /// `None` (a missing or null field) compares as the empty string, so
    /// `field==` matches it and `field!=` does not.
    pub fn compare(&self, value: Option<&str>) -> bool {
        let value = value.unwrap_or("");
        let literal = self.literal();

        match self.operator() {
            ComparisonOp::Eq => value == literal,
            ComparisonOp::NotEq => value != literal,
            ComparisonOp::Gte => loose_cmp(value, literal).is_ge(),
            ComparisonOp::Lte => loose_cmp(value, literal).is_le(),
            ComparisonOp::Gt => loose_cmp(value, literal).is_gt(),
            ComparisonOp::Lt => loose_cmp(value, literal).is_lt(),
            ComparisonOp::Like => self.is_like(value),
            ComparisonOp::NotLike => !self.is_like(value),
        }
    }

    fn is_like(&self, value: &str) -> bool {
        // Always compiled by `Atomic::new` for pattern operators
        self.pattern().is_some_and(|re| re.is_match(value))
    }
}

/// Compiles a wildcard literal into an anchored regex.
///
/// `%` matches any run of characters, including none and including line
/// breaks; everything else is matched literally.
pub fn like_pattern(literal: &str) -> Result<Regex, regex::Error> {
    let body = literal
        .split('%')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*?");
    Regex::new(&format!("^(?s:{})$", body))
}

/// Orders two strings numerically when both look like numbers, and
/// lexicographically otherwise.
pub fn loose_cmp(a: &str, b: &str) -> Ordering {
    if let Some(a_dec) = parse_decimal(a)
        && let Some(b_dec) = parse_decimal(b)
    {
        return a_dec.cmp(&b_dec);
    }

    // Magnitudes outside the decimal range
    if let Some(a_f) = parse_float(a)
        && let Some(b_f) = parse_float(b)
    {
        return a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal);
    }

    a.cmp(b)
}

/// Plain decimal notation with an optional sign and exponent, e.g. `-1.5`,
/// `.5`, `2e10`. Digit separators, hex and words like `inf` are rejected.
fn is_numeric(s: &str) -> bool {
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    if (int.is_empty() && frac.is_empty()) || !digits(int) || !digits(frac) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && digits(exp)
        }
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if !is_numeric(s) {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn parse_float(s: &str) -> Option<f64> {
    let s = s.trim();
    if !is_numeric(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}
