//! Compact boolean filters over structured records.
//!
//! ```
//! use serde_json::json;
//!
//! let filter = rowfilter::build("status==active&tags.0~~prod%|owner.name==ops").unwrap();
//! assert!(filter.matches(&json!({"status": "active", "tags": ["production"]})));
//! ```
pub mod ast;
pub mod cli;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod record;
pub mod value;

pub use ast::{Atomic, ComparisonOp, FilterExpression, LogicalOp};
pub use evaluator::evaluate;
pub use lexer::{Lexer, tokenize};
pub use parser::{ParseError, build, build_tree, parse_atomic};
pub use record::{DEFAULT_SEPARATOR, Record};
pub use value::Value;
