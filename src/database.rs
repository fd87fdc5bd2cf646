//! Database façade
//!
//! [`Database`] owns the catalog and the checkpoint store and runs each
//! statement through the parser, planner, optimizer and execution engine.
//! Every statement that changes state is followed by a full checkpoint.

use tracing::{debug, error, info, warn};

use crate::catalog::Catalog;
use crate::config::DatabaseConfig;
use crate::error::{Error, Result};
use crate::executor::{ExecutionEngine, HeuristicOptimizer, Planner, QueryResult};
use crate::sql;
use crate::storage::{CheckpointStore, Table};

/// Status returned for input that is not one of the supported statements
pub const SYNTAX_ERROR_MESSAGE: &str = "Syntax Error or Unknown Command";

/// An open database
pub struct Database {
    catalog: Catalog,
    store: CheckpointStore,
    /// Set when a checkpoint write failed; cleared by a successful `checkpoint()`
    halted: bool,
}

impl Database {
    /// Open the database described by `config`, restoring its checkpoint if
    /// one exists.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        let store = CheckpointStore::new(&config);
        let catalog = store.load()?;

        info!(
            path = %store.path().display(),
            tables = catalog.len(),
            "database opened"
        );
        Ok(Self {
            catalog,
            store,
            halted: false,
        })
    }

    /// Execute one statement.
    ///
    /// Statement-level problems (unknown syntax, missing tables, duplicate
    /// keys, ...) come back as a failed [`QueryResult::Status`]. `Err` means
    /// the checkpoint could not be written, or the database is halted and
    /// the statement would have changed state.
    pub fn execute(&mut self, statement: &str) -> Result<QueryResult> {
        let stmt = match sql::parse(statement) {
            Ok(stmt) => stmt,
            Err(e) => {
                warn!(error = %e, "rejected statement");
                return Ok(QueryResult::failure(SYNTAX_ERROR_MESSAGE));
            }
        };
        debug!(kind = stmt.kind(), table = %stmt.table_name(), "executing statement");

        let plan = Planner::new().plan(stmt);
        if plan.is_mutating() && self.halted {
            warn!("database halted, refusing mutating statement");
            return Err(Error::Halted);
        }
        let plan = HeuristicOptimizer::new(&self.catalog).optimize(plan);

        let mut engine = ExecutionEngine::new(&mut self.catalog);
        let result = match engine.execute(plan) {
            Ok(result) => result,
            Err(e) if e.is_statement_error() => {
                warn!(error = %e, "statement failed");
                return Ok(QueryResult::from_error(&e));
            }
            Err(e) => return Err(e),
        };

        if engine.modified() {
            self.persist()?;
        }
        Ok(result)
    }

    /// Write a full checkpoint now.
    ///
    /// This is also the way out of the halted state: once a snapshot has
    /// been written successfully, mutations are accepted again.
    pub fn checkpoint(&mut self) -> Result<()> {
        self.persist()?;
        if self.halted {
            info!("checkpoint succeeded, resuming");
            self.halted = false;
        }
        Ok(())
    }

    /// Whether a failed checkpoint write has halted mutations
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Names of all tables in creation order
    pub fn table_names(&self) -> Vec<String> {
        self.catalog.list_tables()
    }

    /// Look up a table by name
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.catalog.get_table(name).ok()
    }

    /// Human-readable description of a table's schema
    pub fn describe(&self, name: &str) -> Result<String> {
        self.catalog.get_table_info(name)
    }

    /// Checkpoint store backing this database
    pub fn store(&self) -> &CheckpointStore {
        &self.store
    }

    fn persist(&mut self) -> Result<()> {
        if let Err(e) = self.store.save(&self.catalog) {
            error!(
                path = %self.store.path().display(),
                error = %e,
                "checkpoint write failed, halting mutations"
            );
            self.halted = true;
            return Err(e);
        }
        Ok(())
    }
}
