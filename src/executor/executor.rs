//! Query Executor for LiteDB
//!
//! This module executes logical plans against the catalog and returns
//! results.

use serde::Serialize;
use tracing::{debug, info};

use super::LogicalPlan;
use crate::catalog::{Catalog, Schema};
use crate::error::{Error, Result};
use crate::sql::ast::{ColumnDef, Literal};
use crate::storage::{Row, Table};

/// Query result
///
/// SELECT produces rows; every other statement, and every statement that
/// fails at the statement level, produces a status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryResult {
    /// Result rows, in order
    Rows(Vec<Row>),
    /// Human-readable status
    Status { message: String, success: bool },
}

impl QueryResult {
    /// Create a successful status
    pub fn with_message(message: impl Into<String>) -> Self {
        QueryResult::Status {
            message: message.into(),
            success: true,
        }
    }

    /// Create a failed status
    pub fn failure(message: impl Into<String>) -> Self {
        QueryResult::Status {
            message: message.into(),
            success: false,
        }
    }

    /// Create a failed status from a statement-level error
    pub fn from_error(err: &Error) -> Self {
        Self::failure(format!("Error: {}", err))
    }

    /// Rows, if this is a row result
    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            QueryResult::Rows(rows) => Some(rows),
            QueryResult::Status { .. } => None,
        }
    }

    /// Status message, if this is a status result
    pub fn message(&self) -> Option<&str> {
        match self {
            QueryResult::Rows(_) => None,
            QueryResult::Status { message, .. } => Some(message),
        }
    }

    /// Rows are always a success; statuses carry their own flag
    pub fn is_success(&self) -> bool {
        match self {
            QueryResult::Rows(_) => true,
            QueryResult::Status { success, .. } => *success,
        }
    }

    /// Rows of the result; a status counts as no rows
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            QueryResult::Rows(rows) => rows,
            QueryResult::Status { .. } => Vec::new(),
        }
    }
}

/// Execution Engine
pub struct ExecutionEngine<'a> {
    /// Tables being read and written
    catalog: &'a mut Catalog,
    /// Set once a plan has changed catalog state
    modified: bool,
}

impl<'a> ExecutionEngine<'a> {
    /// Create a new execution engine over `catalog`
    pub fn new(catalog: &'a mut Catalog) -> Self {
        Self {
            catalog,
            modified: false,
        }
    }

    /// Whether any executed plan changed catalog state
    pub fn modified(&self) -> bool {
        self.modified
    }

    /// Execute a logical plan
    pub fn execute(&mut self, plan: LogicalPlan) -> Result<QueryResult> {
        match plan {
            LogicalPlan::CreateTable {
                table_name,
                columns,
                primary_key,
            } => self.execute_create_table(&table_name, columns, primary_key),
            LogicalPlan::Insert { table_name, values } => self.execute_insert(&table_name, values),
            LogicalPlan::Delete {
                table_name,
                column,
                value,
            } => self.execute_delete(&table_name, &column, &value),
            query => self.execute_query(&query).map(QueryResult::Rows),
        }
    }

    fn execute_create_table(
        &mut self,
        table_name: &str,
        columns: Vec<ColumnDef>,
        primary_key: Option<String>,
    ) -> Result<QueryResult> {
        if self.catalog.table_exists(table_name) {
            debug!(table = %table_name, "table exists, skipping creation");
            return Ok(QueryResult::with_message(format!(
                "Table '{}' already exists. Skipping creation.",
                table_name
            )));
        }

        let schema = Schema::from_columns(
            table_name,
            columns.into_iter().map(|c| (c.name, c.data_type)),
            primary_key,
        )?;
        self.catalog.insert_table(Table::new(table_name, schema))?;
        self.modified = true;

        info!(table = %table_name, "table created");
        Ok(QueryResult::with_message(format!(
            "Table '{}' created.",
            table_name
        )))
    }

    fn execute_insert(&mut self, table_name: &str, values: Vec<Literal>) -> Result<QueryResult> {
        let table = self.catalog.get_table_mut(table_name)?;

        let values = values.iter().map(Literal::to_value).collect();
        let row = table.build_row(values)?;
        table.insert(row)?;
        self.modified = true;

        debug!(table = %table_name, rows = table.row_count(), "row inserted");
        Ok(QueryResult::with_message("1 row inserted."))
    }

    fn execute_delete(
        &mut self,
        table_name: &str,
        column: &str,
        value: &Literal,
    ) -> Result<QueryResult> {
        let table = self.catalog.get_table_mut(table_name)?;

        let deleted = table.delete_where(column, value.text());
        self.modified = true;

        debug!(table = %table_name, column = %column, deleted, "rows deleted");
        Ok(QueryResult::with_message(format!(
            "{} rows deleted.",
            deleted
        )))
    }

    /// Evaluate a read-only plan into rows
    fn execute_query(&self, plan: &LogicalPlan) -> Result<Vec<Row>> {
        match plan {
            LogicalPlan::Scan { table_name } => {
                Ok(self.catalog.get_table(table_name)?.rows().to_vec())
            }
            LogicalPlan::IndexLookup { table_name, key } => {
                let table = self.catalog.get_table(table_name)?;
                Ok(table.lookup(key).cloned().into_iter().collect())
            }
            LogicalPlan::Filter {
                input,
                column,
                fallback_column,
                value,
            } => {
                let mut rows = self.execute_query(input)?;
                rows.retain(|row| {
                    row.get(column)
                        .or_else(|| row.get(fallback_column))
                        .map(|v| v.matches_text(value.text()))
                        .unwrap_or(false)
                });
                Ok(rows)
            }
            LogicalPlan::NestedLoopJoin {
                left,
                left_table,
                left_column,
                right_table,
                right_column,
            } => {
                let left_rows = self.execute_query(left)?;
                self.execute_nested_loop_join(
                    left_rows,
                    left_table,
                    left_column,
                    right_table,
                    right_column,
                )
            }
            _ => Err(Error::Internal(format!(
                "plan does not produce rows: {:?}",
                plan
            ))),
        }
    }

    /// Inner equi-join: every left row against every right row, emitting
    /// left fields plus right fields renamed `<right_table>_<field>`.
    fn execute_nested_loop_join(
        &self,
        left_rows: Vec<Row>,
        left_table: &str,
        left_column: &str,
        right_table: &str,
        right_column: &str,
    ) -> Result<Vec<Row>> {
        let left = self.catalog.get_table(left_table)?;
        let right = self.catalog.get_table(right_table)?;

        if !left.schema().has_column(left_column) {
            return Err(Error::ColumnNotFound(
                left_column.to_string(),
                left_table.to_string(),
            ));
        }
        if !right.schema().has_column(right_column) {
            return Err(Error::ColumnNotFound(
                right_column.to_string(),
                right_table.to_string(),
            ));
        }

        let mut joined = Vec::new();
        for left_row in &left_rows {
            let Some(left_value) = left_row.get(left_column) else {
                continue;
            };
            for right_row in right.rows() {
                let matches = right_row
                    .get(right_column)
                    .map(|right_value| left_value.matches(right_value))
                    .unwrap_or(false);
                if !matches {
                    continue;
                }

                let mut row = left_row.clone();
                for (field, value) in right_row {
                    row.insert(format!("{}_{}", right_table, field), value.clone());
                }
                joined.push(row);
            }
        }

        debug!(
            left = %left_table,
            right = %right_table,
            rows = joined.len(),
            "nested loop join"
        );
        Ok(joined)
    }
}
