use crate::catalog::Catalog;
use crate::executor::LogicalPlan;
use tracing::debug;

/// Heuristic-based query optimizer
///
/// The only rewrite is the index-vs-scan decision: an equality filter on a
/// table's primary key, applied directly to a scan of that table, becomes
/// an index lookup. Filters over a join always stay scans.
pub struct HeuristicOptimizer<'a> {
    /// Catalog, for primary-key metadata
    catalog: &'a Catalog,
}

impl<'a> HeuristicOptimizer<'a> {
    /// Create a new optimizer
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Optimize a logical plan
    pub fn optimize(&self, plan: LogicalPlan) -> LogicalPlan {
        match plan {
            LogicalPlan::Filter {
                input,
                column,
                fallback_column,
                value,
            } => {
                if let LogicalPlan::Scan { ref table_name } = *input {
                    if self.is_primary_key(table_name, &column) {
                        debug!(table = %table_name, column = %column, "using primary key index");
                        return LogicalPlan::IndexLookup {
                            table_name: table_name.clone(),
                            key: value.to_value(),
                        };
                    }
                }

                LogicalPlan::Filter {
                    input: Box::new(self.optimize(*input)),
                    column,
                    fallback_column,
                    value,
                }
            }
            LogicalPlan::NestedLoopJoin {
                left,
                left_table,
                left_column,
                right_table,
                right_column,
            } => LogicalPlan::NestedLoopJoin {
                left: Box::new(self.optimize(*left)),
                left_table,
                left_column,
                right_table,
                right_column,
            },
            // Other plans are returned as-is
            _ => plan,
        }
    }

    fn is_primary_key(&self, table_name: &str, column: &str) -> bool {
        self.catalog
            .get_table(table_name)
            .map(|table| table.schema().primary_key() == Some(column))
            .unwrap_or(false)
    }
}
