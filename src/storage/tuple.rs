//! Row and Value types for LiteDB
//!
//! This module defines how data values are represented in memory.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A row: column name to value, in the table's column order
pub type Row = IndexMap<String, Value>;

/// A value in the database
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer value (64-bit)
    Integer(i64),
    /// Text value
    Text(String),
}

impl Value {
    /// Coerce literal text (quotes already stripped) into a value.
    ///
    /// All-digit text that fits in an `i64` becomes an integer; everything
    /// else is kept as text.
    pub fn from_literal(text: &str) -> Value {
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = text.parse::<i64>() {
                return Value::Integer(n);
            }
        }
        Value::Text(text.to_string())
    }

    /// Compare against literal text using string equality
    pub fn matches_text(&self, text: &str) -> bool {
        match self {
            Value::Text(s) => s == text,
            Value::Integer(i) => i.to_string() == text,
        }
    }

    /// String-equality comparison between two values
    pub fn matches(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (a, Value::Text(b)) => a.matches_text(b),
            (Value::Text(a), b) => b.matches_text(a),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}
