//! Schema definitions for LiteDB
//!
//! This module defines table schemas: ordered columns and an optional
//! single-column primary key.

use super::types::DataType;
use crate::error::{Error, Result};
use indexmap::IndexMap;

/// Table schema - defines the structure of a table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    /// Column name to type, in declaration order
    columns: IndexMap<String, DataType>,
    /// Primary key column, if any
    primary_key: Option<String>,
}

impl Schema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a schema from `(name, type)` pairs and an optional primary key.
    ///
    /// Fails if a column is declared twice or the primary key names no column.
    pub fn from_columns(
        table_name: &str,
        columns: impl IntoIterator<Item = (String, DataType)>,
        primary_key: Option<String>,
    ) -> Result<Self> {
        let mut schema = Self::new();
        for (name, data_type) in columns {
            schema.add_column(name, data_type)?;
        }
        if let Some(pk) = primary_key {
            schema.set_primary_key(table_name, pk)?;
        }
        Ok(schema)
    }

    /// Add a column to the schema
    pub fn add_column(&mut self, name: impl Into<String>, data_type: DataType) -> Result<()> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(Error::DuplicateColumn(name));
        }
        self.columns.insert(name, data_type);
        Ok(())
    }

    /// Designate an existing column as the primary key
    pub fn set_primary_key(&mut self, table_name: &str, column: impl Into<String>) -> Result<()> {
        let column = column.into();
        if !self.columns.contains_key(&column) {
            return Err(Error::ColumnNotFound(column, table_name.to_string()));
        }
        self.primary_key = Some(column);
        Ok(())
    }

    /// Iterate over `(name, type)` in declaration order
    pub fn columns(&self) -> impl Iterator<Item = (&str, DataType)> {
        self.columns.iter().map(|(name, dt)| (name.as_str(), *dt))
    }

    /// Get number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Primary key column name
    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|c| c.as_str()).collect()
    }
}
