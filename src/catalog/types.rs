//! Data types for LiteDB
//!
//! This module defines the column type tags supported by the database.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared column type
///
/// Type tags are declarative: values are coerced by the shape of their
/// literal, not by the column they are bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// 64-bit signed integer
    Integer,
    /// Unlimited text
    Text,
}

impl DataType {
    /// Resolve a type name as written in a CREATE TABLE statement
    pub fn from_name(name: &str) -> Option<DataType> {
        match name.to_lowercase().as_str() {
            "int" | "integer" => Some(DataType::Integer),
            "text" | "str" | "string" | "varchar" => Some(DataType::Text),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Integer => write!(f, "INTEGER"),
            DataType::Text => write!(f, "TEXT"),
        }
    }
}
