//! # Rowfilter - Abstract Syntax Tree
//!
//! This module defines the tree produced by parsing a filter string such as
//! `status==active&age>=18|role==admin`.
//!
//! ## Architecture Overview
//!
//! - **[operators]** - Comparison operators (`==`, `~~`, ...) and logical connectives (`&`, `|`)
//! - **[expressions]** - The expression tree and its atomic predicates
//!
//! ## Core Concepts
//!
//! ### Atomic predicates
//!
//! A predicate is `<field><operator><literal>`:
//!
//! ```text
//! user.address.city==Prague
//! ```
//!
//! The field is a dotted path into the record; the literal is everything after
//! the operator and is always compared as a string (ordering operators compare
//! numerically when both sides are numbers).
//!
//! Record values are read as text before comparing: booleans as `true` and
//! `false`, numbers as written, with integral floats dropping the fraction
//! (`1.0` reads as `1`). Null and missing fields read as the empty string.
//!
//! ### Connectives
//!
//! Predicates are joined with `&` (AND) and `|` (OR). `&` binds tighter than
//! `|`, so
//!
//! ```text
//! a==b&c==d|e==f
//! ```
//!
//! reads as `(a==b AND c==d) OR e==f`. There is no grouping syntax.
//!
//! ### Operators
//!
//! | Operator | Meaning |
//! |----------|---------|
//! | `==` | equal |
//! | `!=` | not equal |
//! | `>=` `<=` `>` `<` | ordering |
//! | `~~` | wildcard match, `%` matches any run of characters |
//! | `!~` | negated wildcard match |
//!
//! ## Limitations
//!
//! Neither fields nor literals may contain `&` or `|`: the string is split on
//! connectives before predicates are parsed, and there is no escape syntax.
pub mod expressions;
pub mod operators;

pub use expressions::{Atomic, FilterExpression};
pub use operators::{ComparisonOp, LogicalOp};
