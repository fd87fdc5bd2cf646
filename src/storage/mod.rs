//! Storage engine module
//!
//! This module contains the storage engine components:
//! - Values and rows
//! - Tables with their primary-key index
//! - JSON checkpoint persistence

pub mod checkpoint;
pub mod index;
pub mod table;
pub mod tuple;

pub use checkpoint::CheckpointStore;
pub use index::PrimaryKeyIndex;
pub use table::Table;
pub use tuple::{Row, Value};
