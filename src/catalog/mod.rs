//! Catalog module
//!
//! This module contains the table catalog, schema definitions, and data types.

pub mod catalog;
pub mod schema;
pub mod types;

pub use catalog::Catalog;
pub use schema::Schema;
pub use types::DataType;
