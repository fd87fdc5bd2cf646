//! Primary-key hash index
//!
//! Maps each primary-key value to the position of its row in the owning
//! table's row sequence.

use super::tuple::{Row, Value};
use std::collections::HashMap;

/// Hash index over a table's primary-key column
#[derive(Debug, Clone, Default)]
pub struct PrimaryKeyIndex {
    /// Indexed column name
    column: String,
    /// Key value -> row position
    entries: HashMap<Value, usize>,
}

impl PrimaryKeyIndex {
    /// Create an empty index over `column`
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            entries: HashMap::new(),
        }
    }

    /// Build an index over `column` from existing rows
    pub fn build(column: impl Into<String>, rows: &[Row]) -> Self {
        let mut index = Self::new(column);
        index.rebuild(rows);
        index
    }

    /// Indexed column name
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Key value of a row for this index
    pub fn key_of<'r>(&self, row: &'r Row) -> Option<&'r Value> {
        row.get(&self.column)
    }

    /// Discard all entries and re-index `rows`
    pub fn rebuild(&mut self, rows: &[Row]) {
        self.entries.clear();
        for (pos, row) in rows.iter().enumerate() {
            if let Some(key) = row.get(&self.column) {
                self.entries.insert(key.clone(), pos);
            }
        }
    }

    /// Record `key` at row position `pos`
    pub fn insert(&mut self, key: Value, pos: usize) {
        self.entries.insert(key, pos);
    }

    /// Look up the row position for `key`
    pub fn get(&self, key: &Value) -> Option<usize> {
        self.entries.get(key).copied()
    }

    /// Check if `key` is indexed
    pub fn contains(&self, key: &Value) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
