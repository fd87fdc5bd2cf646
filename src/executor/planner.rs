//! Query Planner for LiteDB
//!
//! This module converts parsed SQL AST into logical plans. Selects always
//! come out as `Filter`/`NestedLoopJoin`/`Scan` trees; picking an index
//! lookup instead is left to the optimizer.

use crate::sql::ast::*;
use crate::storage::Value;

/// Logical plan node
#[derive(Debug, Clone, PartialEq)]
pub enum LogicalPlan {
    /// Scan a table in row order
    Scan { table_name: String },
    /// O(1) primary-key lookup
    IndexLookup { table_name: String, key: Value },
    /// Keep rows whose `column` (or `fallback_column`) string-equals `value`
    Filter {
        input: Box<LogicalPlan>,
        column: String,
        fallback_column: String,
        value: Literal,
    },
    /// Nested-loop equi-join of the input against every row of `right_table`
    NestedLoopJoin {
        left: Box<LogicalPlan>,
        left_table: String,
        left_column: String,
        right_table: String,
        right_column: String,
    },
    /// Create table
    CreateTable {
        table_name: String,
        columns: Vec<ColumnDef>,
        primary_key: Option<String>,
    },
    /// Insert one row
    Insert {
        table_name: String,
        values: Vec<Literal>,
    },
    /// Delete rows matching `column = value`
    Delete {
        table_name: String,
        column: String,
        value: Literal,
    },
}

impl LogicalPlan {
    /// Whether executing this plan can change database state
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            LogicalPlan::CreateTable { .. } | LogicalPlan::Insert { .. } | LogicalPlan::Delete { .. }
        )
    }
}

/// Query planner
#[derive(Debug, Default)]
pub struct Planner;

impl Planner {
    /// Create a new planner
    pub fn new() -> Self {
        Self
    }

    /// Plan a statement
    pub fn plan(&self, stmt: Statement) -> LogicalPlan {
        match stmt {
            Statement::CreateTable(create) => LogicalPlan::CreateTable {
                table_name: create.table_name,
                columns: create.columns,
                primary_key: create.primary_key,
            },
            Statement::Insert(insert) => LogicalPlan::Insert {
                table_name: insert.table_name,
                values: insert.values,
            },
            Statement::Delete(delete) => LogicalPlan::Delete {
                table_name: delete.table_name,
                column: delete.filter.column,
                value: delete.filter.value,
            },
            Statement::Select(select) => self.plan_select(select),
        }
    }

    fn plan_select(&self, select: SelectStatement) -> LogicalPlan {
        let mut plan = LogicalPlan::Scan {
            table_name: select.table_name.clone(),
        };

        if let Some(join) = select.join {
            plan = LogicalPlan::NestedLoopJoin {
                left: Box::new(plan),
                left_table: select.table_name.clone(),
                left_column: join.left.column,
                right_table: join.table_name,
                right_column: join.right.column,
            };
        }

        if let Some(filter) = select.filter {
            plan = LogicalPlan::Filter {
                input: Box::new(plan),
                fallback_column: format!("{}_{}", select.table_name, filter.column),
                column: filter.column,
                value: filter.value,
            };
        }

        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql;

    fn plan(sql: &str) -> LogicalPlan {
        Planner::new().plan(sql::parse(sql).unwrap())
    }

    #[test]
    fn test_plan_plain_select() {
        assert_eq!(
            plan("SELECT * FROM t"),
            LogicalPlan::Scan {
                table_name: "t".to_string()
            }
        );
    }

    #[test]
    fn test_plan_join_then_filter() {
        let plan = plan("SELECT * FROM e JOIN d ON e.dept=d.name WHERE location='A'");

        match plan {
            LogicalPlan::Filter {
                input,
                column,
                fallback_column,
                value,
            } => {
                assert_eq!(column, "location");
                assert_eq!(fallback_column, "e_location");
                assert_eq!(value, Literal::String("A".to_string()));
                assert!(matches!(
                    *input,
                    LogicalPlan::NestedLoopJoin { ref right_table, ref right_column, .. }
                        if right_table == "d" && right_column == "name"
                ));
            }
            other => panic!("Expected Filter, got {:?}", other),
        }
    }

    #[test]
    fn test_mutating_plans() {
        assert!(plan("CREATE TABLE t (id int)").is_mutating());
        assert!(plan("INSERT INTO t VALUES (1)").is_mutating());
        assert!(plan("DELETE FROM t WHERE id=1").is_mutating());
        assert!(!plan("SELECT * FROM t WHERE id=1").is_mutating());
    }
}
