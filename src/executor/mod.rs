//! Query execution module
//!
//! This module contains the query planner, the optimizer that picks index
//! lookups, and the executor.

pub mod executor;
pub mod planner;

pub mod optimizer;

pub use executor::{ExecutionEngine, QueryResult};
pub use optimizer::HeuristicOptimizer;
pub use planner::{LogicalPlan, Planner};
