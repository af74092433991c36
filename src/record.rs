//! Field lookup on structured records.
//!
//! Filters address fields with dotted paths such as `user.address.city` or
//! `items.0.sku`. Each path segment selects an object key, or an array
//! element when the segment is a non-negative integer. A missing key, an
//! out-of-range index or a step into a scalar all resolve to "absent".

use std::borrow::Cow;

use crate::value::Value;

/// Separator used between path segments unless configured otherwise.
pub const DEFAULT_SEPARATOR: char = '.';

/// A record that filters can be evaluated against.
///
/// Implementors only describe one navigation step and how a resolved node
/// renders as text; path walking is provided.
pub trait Record {
    /// The child node addressed by a single path segment.
    fn child(&self, segment: &str) -> Option<&Self>;

    /// String form of this node, or `None` when it is null.
    fn text(&self) -> Option<Cow<'_, str>>;

    /// Resolves `path` and returns the string form of the value found there.
    ///
    /// Returns `None` both for missing fields and for explicit nulls.
    fn lookup(&self, path: &str, separator: char) -> Option<Cow<'_, str>> {
        let mut current = self;
        for segment in path.split(separator) {
            current = current.child(segment)?;
        }
        current.text()
    }
}

fn array_index(segment: &str) -> Option<usize> {
    segment.parse::<usize>().ok()
}

/// Text of a float as compared by filters: integral values drop the
/// fractional part, so `1.0` reads as `1`.
fn float_text(f: f64) -> String {
    f.to_string()
}

fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => float_text(f),
        _ => n.to_string(),
    }
}

impl Record for serde_json::Value {
    fn child(&self, segment: &str) -> Option<&Self> {
        match self {
            serde_json::Value::Object(map) => map.get(segment),
            serde_json::Value::Array(items) => items.get(array_index(segment)?),
            _ => None,
        }
    }

    fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(Cow::Borrowed(s)),
            serde_json::Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            serde_json::Value::Number(n) => Some(Cow::Owned(number_text(n))),
            // Nested structures compare by their compact JSON text
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

impl Record for Value {
    fn child(&self, segment: &str) -> Option<&Self> {
        match self {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => items.get(array_index(segment)?),
            _ => None,
        }
    }

    fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => None,
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Boolean(b) => Some(Cow::Owned(b.to_string())),
            Value::Integer(n) => Some(Cow::Owned(n.to_string())),
            Value::Float(f) => Some(Cow::Owned(float_text(*f))),
            Value::Array(_) | Value::Object(_) => {
                Some(Cow::Owned(serde_json::Value::from(self.clone()).to_string()))
            }
        }
    }
}
