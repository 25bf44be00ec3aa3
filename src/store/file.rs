//! File-backed storage.
//!
//! The whole table lives in one file and is rewritten on every write.
//! Every operation holds an advisory lock on a sibling `<file>.lock` for its
//! full load/modify/write cycle, so separate handles and separate processes
//! on the same path serialize. Writes go to a uniquely named temporary file
//! in the same directory and are renamed into place.

use super::{insert_into, update_in, OrderStore, StoreError, StoreResult, Table};
use crate::order::OrderRecord;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;
use uuid::Uuid;

/// On-disk encoding of a [`FileStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreFormat {
    /// Pretty-printed JSON via serde_json
    #[default]
    Json,
    /// Compact binary via bincode
    Binary,
}

/// Advisory lock held on the sibling lock file; released on drop.
struct TableLock {
    file: File,
}

impl Drop for TableLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Order store persisted to a single file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
    format: StoreFormat,
}

impl FileStore {
    /// Open (or lazily create) a store at `path`.
    pub fn new(path: impl Into<PathBuf>, format: StoreFormat) -> Self {
        let path = path.into();
        let mut lock_name = path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("orders"));
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);

        Self {
            path,
            lock_path,
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    pub fn format(&self) -> StoreFormat {
        self.format
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn acquire(&self, exclusive: bool) -> StoreResult<TableLock> {
        fs::create_dir_all(self.directory())?;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)?;

        if exclusive {
            FileExt::lock_exclusive(&file)?;
        } else {
            FileExt::lock_shared(&file)?;
        }
        Ok(TableLock { file })
    }

    fn load(&self) -> StoreResult<Table> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Table::new()),
            Err(e) => return Err(e.into()),
        };

        let records: Vec<OrderRecord> = match self.format {
            StoreFormat::Json => serde_json::from_slice(&bytes)?,
            StoreFormat::Binary => bincode::deserialize(&bytes)?,
        };

        Ok(records.into_iter().map(|r| (r.id, r)).collect())
    }

    fn write(&self, table: &Table) -> StoreResult<()> {
        let mut records: Vec<&OrderRecord> = table.values().collect();
        records.sort_by_key(|r| (r.created_at, r.id));

        let bytes = match self.format {
            StoreFormat::Json => serde_json::to_vec_pretty(&records)?,
            StoreFormat::Binary => bincode::serialize(&records)?,
        };

        let mut tmp = NamedTempFile::new_in(self.directory())?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), records = records.len(), "Order table written");
        Ok(())
    }

    fn modify<F>(&self, f: F) -> StoreResult<OrderRecord>
    where
        F: FnOnce(&mut Table) -> StoreResult<OrderRecord>,
    {
        let _lock = self.acquire(true)?;
        let mut table = self.load()?;
        let record = f(&mut table)?;
        self.write(&table)?;
        Ok(record)
    }
}

impl OrderStore for FileStore {
    fn insert(&self, record: OrderRecord) -> StoreResult<OrderRecord> {
        self.modify(|table| insert_into(table, record))
    }

    fn find(&self, id: Uuid) -> StoreResult<OrderRecord> {
        let _lock = self.acquire(false)?;
        self.load()?
            .remove(&id)
            .ok_or(StoreError::NotFound { id })
    }

    fn list(&self) -> StoreResult<Vec<OrderRecord>> {
        let _lock = self.acquire(false)?;
        Ok(self.load()?.into_values().collect())
    }

    fn update(&self, record: OrderRecord) -> StoreResult<OrderRecord> {
        self.modify(|table| update_in(table, record))
    }
}
