//! System Catalog for LiteDB
//!
//! This module owns the named collection of tables.

use crate::error::{Error, Result};
use crate::storage::Table;
use indexmap::IndexMap;

/// System Catalog - every table in the database, in creation order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Tables by name
    tables: IndexMap<String, Table>,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table under its own name
    pub fn insert_table(&mut self, table: Table) -> Result<()> {
        if self.tables.contains_key(table.name()) {
            return Err(Error::TableAlreadyExists(table.name().to_string()));
        }
        self.tables.insert(table.name().to_string(), table);
        Ok(())
    }

    /// Get a table by name
    pub fn get_table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    /// Get a table by name for mutation
    pub fn get_table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    /// Check if a table exists
    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// List all table names
    pub fn list_tables(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    /// Iterate over all tables in creation order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if the catalog has no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Get table schema info as a formatted string (for .schema command)
    pub fn get_table_info(&self, name: &str) -> Result<String> {
        let table = self.get_table(name)?;
        let mut info = format!("Table: {}\n", table.name());
        info.push_str("Columns:\n");

        let primary_key = table.schema().primary_key();
        for (col, data_type) in table.schema().columns() {
            let flags = if primary_key == Some(col) {
                " [PRIMARY KEY]"
            } else {
                ""
            };
            info.push_str(&format!("  {} {}{}\n", col, data_type, flags));
        }
        info.push_str(&format!("Rows: {}\n", table.row_count()));

        Ok(info)
    }
}
