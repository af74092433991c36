//! Render the parsed tree of a filter

use std::fmt::Write;

use super::CliError;
use crate::{FilterExpression, LogicalOp, build};

/// Parses `filter` and renders its tree, one node per line.
///
/// ```text
/// OR
///   AND
///     a == b
///     c == d
///   e == f
/// ```
pub fn explain(filter: &str) -> Result<String, CliError> {
    let expr = build(filter)?;
    let mut out = String::new();
    write_node(&expr, 0, &mut out);
    Ok(out)
}

fn write_node(expr: &FilterExpression, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match expr {
        FilterExpression::Atomic(atomic) => {
            let _ = writeln!(
                out,
                "{}{} {} {:?}",
                indent,
                atomic.field(),
                atomic.operator(),
                atomic.literal()
            );
        }
        FilterExpression::Logical { op, left, right } => {
            let name = match op {
                LogicalOp::And => "AND",
                LogicalOp::Or => "OR",
            };
            let _ = writeln!(out, "{}{}", indent, name);
            write_node(left, depth + 1, out);
            write_node(right, depth + 1, out);
        }
    }
}
