//! Run filters against JSON input

use super::CliError;
use crate::{DEFAULT_SEPARATOR, build};

/// Options for the check command
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// The filter to apply
    pub filter: String,
    /// JSON input: one document, an array, or a stream of documents
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
    /// Path separator used to resolve field names
    pub separator: char,
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions {
            filter: String::new(),
            input: None,
            pretty: false,
            syntax_only: false,
            separator: DEFAULT_SEPARATOR,
        }
    }
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Input was a single record; whether it matched
    Matched(bool),
    /// Input was an array; the elements that matched, in order
    Filtered(Vec<serde_json::Value>),
    /// Input was a stream of records; the ones that matched, in order.
    /// Rendered as compact JSON lines regardless of `pretty`.
    Stream(Vec<serde_json::Value>),
}

impl CheckResult {
    /// Renders the result the way the CLI prints it.
    ///
    /// `pretty` applies to single documents and arrays. Streamed records are
    /// always printed compact, one per line.
    pub fn render(&self, pretty: bool) -> Result<String, serde_json::Error> {
        let to_string = |v: &serde_json::Value| {
            if pretty {
                serde_json::to_string_pretty(v)
            } else {
                serde_json::to_string(v)
            }
        };

        match self {
            CheckResult::SyntaxValid => Ok("Syntax is valid".to_string()),
            CheckResult::Matched(matched) => Ok(matched.to_string()),
            CheckResult::Filtered(records) => {
                to_string(&serde_json::Value::Array(records.clone()))
            }
            CheckResult::Stream(records) => records
                .iter()
                .map(serde_json::to_string)
                .collect::<Result<Vec<_>, _>>()
                .map(|lines| lines.join("\n")),
        }
    }
}

/// Execute a rowfilter check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let filter = build(&options.filter)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;

    let mut documents = serde_json::Deserializer::from_str(json_str)
        .into_iter::<serde_json::Value>()
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "evaluating {} against {} input document(s)",
        filter,
        documents.len()
    );

    let result = match documents.len() {
        0 => return Err(CliError::NoInput),
        1 => match documents.remove(0) {
            serde_json::Value::Array(items) => CheckResult::Filtered(
                items
                    .into_iter()
                    .filter(|item| filter.matches_with(item, options.separator))
                    .collect(),
            ),
            record => CheckResult::Matched(filter.matches_with(&record, options.separator)),
        },
        _ => CheckResult::Stream(
            documents
                .into_iter()
                .filter(|record| filter.matches_with(record, options.separator))
                .collect(),
        ),
    };

    Ok(result)
}
