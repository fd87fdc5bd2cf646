//! LiteDB - A minimal embedded relational data store written in Rust
//!
//! This library provides the components of a small checkpointed table engine:
//! - SQL parsing (lexer, parser, AST) for four statement shapes
//! - In-memory tables with a primary-key hash index
//! - Query execution (planner, optimizer, executor) with nested-loop joins
//! - JSON checkpoint persistence after every mutation
//!
//! ```no_run
//! use litedb::{Database, DatabaseConfig};
//!
//! # fn main() -> litedb::Result<()> {
//! let mut db = Database::open(DatabaseConfig::from_env())?;
//! db.execute("CREATE TABLE t (id int, name text) PRIMARY KEY id")?;
//! db.execute("INSERT INTO t VALUES (1, 'a')")?;
//! let rows = db.execute("SELECT * FROM t WHERE id=1")?.into_rows();
//! assert_eq!(rows.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod executor;
pub mod sql;
pub mod storage;

pub use config::DatabaseConfig;
pub use database::Database;
pub use error::{Error, Result};
pub use executor::QueryResult;
pub use storage::{Row, Value};
