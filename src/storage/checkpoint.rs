//! Checkpoint store for LiteDB
//!
//! The whole database is serialized as one JSON document after every
//! mutating statement and read back at startup. Writes go to a temporary
//! sibling file that is renamed over the checkpoint, so the file on disk is
//! always either the previous or the new complete snapshot.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::table::Table;
use super::tuple::Row;
use crate::catalog::{Catalog, DataType, Schema};
use crate::config::DatabaseConfig;
use crate::error::{Error, Result};

/// On-disk form of one table
#[derive(Debug, Serialize, Deserialize)]
struct TableData {
    /// `[name, type]` pairs in column order
    columns: Vec<(String, DataType)>,
    primary_key: Option<String>,
    rows: Vec<Row>,
}

/// On-disk form of the database, keyed by table name
type CheckpointData = IndexMap<String, TableData>;

/// Reads and writes full database snapshots
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
    sync: bool,
    pretty: bool,
}

impl CheckpointStore {
    /// Create a store for the checkpoint file named in `config`
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            path: config.checkpoint_path.clone(),
            sync: config.sync,
            pretty: config.pretty,
        }
    }

    /// Checkpoint file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether a checkpoint has been written
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the catalog from the checkpoint.
    ///
    /// A missing file yields an empty catalog. Any parse or consistency
    /// failure fails the whole load.
    pub fn load(&self) -> Result<Catalog> {
        if !self.exists() {
            info!(path = %self.path.display(), "no checkpoint found, starting empty");
            return Ok(Catalog::new());
        }

        let json = fs::read_to_string(&self.path)?;
        let data: CheckpointData = serde_json::from_str(&json)
            .map_err(|e| Error::CorruptCheckpoint(e.to_string()))?;

        let mut catalog = Catalog::new();
        for (name, table_data) in data {
            let schema = Schema::from_columns(&name, table_data.columns, table_data.primary_key)
                .map_err(|e| Error::CorruptCheckpoint(e.to_string()))?;
            let table = Table::restore(name, schema, table_data.rows)?;
            debug!(table = %table.name(), rows = table.row_count(), "restored table");
            catalog.insert_table(table)?;
        }

        info!(
            path = %self.path.display(),
            tables = catalog.len(),
            "loaded checkpoint"
        );
        Ok(catalog)
    }

    /// Write a full snapshot of `catalog`, replacing the previous one
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        let data: CheckpointData = catalog
            .tables()
            .map(|table| {
                let columns = table
                    .schema()
                    .columns()
                    .map(|(name, dt)| (name.to_string(), dt))
                    .collect();
                let data = TableData {
                    columns,
                    primary_key: table.schema().primary_key().map(str::to_string),
                    rows: table.rows().to_vec(),
                };
                (table.name().to_string(), data)
            })
            .collect();

        let json = if self.pretty {
            serde_json::to_vec_pretty(&data)?
        } else {
            serde_json::to_vec(&data)?
        };

        self.write_atomic(&json)?;
        debug!(path = %self.path.display(), bytes = json.len(), "checkpoint written");
        Ok(())
    }

    fn write_atomic(&self, bytes: &[u8]) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "checkpoint".to_string());
        let tmp_path = parent.join(format!(".{}.tmp.{}", file_name, std::process::id()));

        let result = (|| -> Result<()> {
            let mut temp = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&tmp_path)?;
            temp.write_all(bytes)?;
            if self.sync {
                temp.sync_all()?;
            }
            fs::rename(&tmp_path, &self.path)?;
            Ok(())
        })();

        if let Err(e) = result {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    warn!(
                        path = %tmp_path.display(),
                        error = %cleanup,
                        "failed to remove temporary checkpoint file"
                    );
                }
            }
            return Err(e);
        }

        if self.sync {
            sync_dir(&parent)?;
        }

        Ok(())
    }
}

/// Persist the rename by syncing the containing directory
#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<()> {
    File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<()> {
    Ok(())
}
