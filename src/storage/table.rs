//! Table storage for LiteDB
//!
//! This module combines a schema, the ordered row sequence and the optional
//! primary-key index, and keeps the three consistent.

use super::index::PrimaryKeyIndex;
use super::tuple::{Row, Value};
use crate::catalog::Schema;
use crate::error::{Error, Result};

/// A table combining schema and storage
#[derive(Debug, Clone)]
pub struct Table {
    /// Table name
    name: String,
    /// Column schema and primary key
    schema: Schema,
    /// Rows in insertion order
    rows: Vec<Row>,
    /// Index over the primary key column, present iff the schema declares one
    index: Option<PrimaryKeyIndex>,
}

impl Table {
    /// Create a new empty table
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        let index = schema.primary_key().map(PrimaryKeyIndex::new);
        Self {
            name: name.into(),
            schema,
            rows: Vec::new(),
            index,
        }
    }

    /// Restore a table from previously persisted rows.
    ///
    /// Every row must carry exactly the schema's columns and primary-key
    /// values must be unique. The index is rebuilt from the restored rows.
    pub fn restore(name: impl Into<String>, schema: Schema, rows: Vec<Row>) -> Result<Self> {
        let mut table = Self::new(name, schema);
        for row in rows {
            if row.len() != table.schema.column_count()
                || !row.keys().all(|k| table.schema.has_column(k))
            {
                return Err(Error::CorruptCheckpoint(format!(
                    "row in table '{}' does not match its columns",
                    table.name
                )));
            }
            // Normalize field order to the column order
            let row: Row = table
                .schema
                .column_names()
                .into_iter()
                .filter_map(|c| row.get(c).map(|v| (c.to_string(), v.clone())))
                .collect();
            table.insert(row).map_err(|e| match e {
                Error::DuplicateKey(key) => Error::CorruptCheckpoint(format!(
                    "duplicate primary key '{}' in table '{}'",
                    key, table.name
                )),
                other => other,
            })?;
        }
        Ok(table)
    }

    /// Get table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get table schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// All rows in insertion order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Primary key index, if the table has a primary key
    pub fn index(&self) -> Option<&PrimaryKeyIndex> {
        self.index.as_ref()
    }

    /// Bind values positionally against the column order
    pub fn build_row(&self, values: Vec<Value>) -> Result<Row> {
        if values.len() != self.schema.column_count() {
            return Err(Error::SchemaMismatch {
                table: self.name.clone(),
                expected: self.schema.column_count(),
                found: values.len(),
            });
        }

        Ok(self
            .schema
            .column_names()
            .into_iter()
            .map(str::to_string)
            .zip(values)
            .collect())
    }

    /// Append a row, enforcing primary-key uniqueness.
    ///
    /// On error neither the rows nor the index are touched.
    pub fn insert(&mut self, row: Row) -> Result<usize> {
        let pos = self.rows.len();
        if let Some(index) = self.index.as_mut() {
            let key = index.key_of(&row).cloned().ok_or_else(|| {
                Error::ColumnNotFound(index.column().to_string(), self.name.clone())
            })?;
            if index.contains(&key) {
                return Err(Error::DuplicateKey(key.to_string()));
            }
            index.insert(key, pos);
        }
        self.rows.push(row);
        Ok(pos)
    }

    /// Find the row whose primary key equals `key` via the index
    pub fn lookup(&self, key: &Value) -> Option<&Row> {
        self.index
            .as_ref()
            .and_then(|index| index.get(key))
            .and_then(|pos| self.rows.get(pos))
    }

    /// Remove every row whose `column` value string-equals `literal`.
    ///
    /// Returns the number of removed rows. The index is rebuilt from the
    /// survivors whenever anything was removed, whatever the column.
    pub fn delete_where(&mut self, column: &str, literal: &str) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| {
            !row
                .get(column)
                .map(|v| v.matches_text(literal))
                .unwrap_or(false)
        });
        let removed = before - self.rows.len();

        if removed > 0 {
            if let Some(index) = self.index.as_mut() {
                index.rebuild(&self.rows);
            }
        }
        removed
    }
}
