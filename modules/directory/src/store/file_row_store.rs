//! File-backed row store.


use std::{
  collections::BTreeMap,
  fs::{self, File, OpenOptions},
  io::{BufRead, BufReader, Write},
  path::{Path, PathBuf},
  sync::{Mutex, MutexGuard},
};

use super::{
  BatchOutcome, BoxFuture, RowData, RowFilter, RowKey, RowStore, RowWrite, StoreError, StoredRow, WriteCondition,
};
use crate::core::Etag;

type RowMap = BTreeMap<RowKey, (RowData, Etag)>;

/// Row store persisted as a JSON-lines snapshot.
///
/// The full row set is loaded at open time and rewritten atomically
/// (temp file + rename + `sync_all`) on every mutation, so a crash leaves
/// either the previous or the new snapshot on disk, never a torn one.
/// Suited to small directories; a cluster of any size wants a database-backed
/// adapter instead.
#[derive(Debug)]
pub struct FileRowStore {
  path: PathBuf,
  rows: Mutex<RowMap>,
}

impl FileRowStore {
  /// Opens the store, loading an existing snapshot when present.
  ///
  /// # Errors
  ///
  /// Returns [`StoreError::Io`] when the snapshot cannot be read and
  /// [`StoreError::Corrupted`] when a line fails to decode.
  pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
    let path = path.into();
    let rows = Self::load(&path)?;
    Ok(Self { path, rows: Mutex::new(rows) })
  }

  fn load(path: &Path) -> Result<RowMap, StoreError> {
    let mut rows = RowMap::new();
    if !path.exists() {
      return Ok(rows);
    }
    let reader = BufReader::new(File::open(path)?);
    for line in reader.lines() {
      let line = line?;
      if line.is_empty() {
        continue;
      }
      let row: StoredRow =
        serde_json::from_str(&line).map_err(|_| StoreError::Corrupted { key: path.display().to_string() })?;
      rows.insert(row.key, (row.data, row.etag));
    }
    Ok(rows)
  }

  fn persist(&self, rows: &RowMap) -> Result<(), StoreError> {
    let tmp_path = self.path.with_extension("tmp");
    let mut file = OpenOptions::new().write(true).create(true).truncate(true).open(&tmp_path)?;
    for (key, (data, etag)) in rows {
      let row = StoredRow::new(key.clone(), data.clone(), etag.clone());
      let line = serde_json::to_string(&row).map_err(|_| StoreError::Corrupted { key: key.to_string() })?;
      writeln!(file, "{line}")?;
    }
    file.sync_all()?;
    fs::rename(&tmp_path, &self.path)?;
    Ok(())
  }

  fn rows(&self) -> Result<MutexGuard<'_, RowMap>, StoreError> {
    self.rows.lock().map_err(|_| StoreError::Unavailable(String::from("row map mutex poisoned")))
  }
}

impl RowStore for FileRowStore {
  fn read<'a>(&'a self, key: &'a RowKey) -> BoxFuture<'a, Result<Option<StoredRow>, StoreError>> {
    Box::pin(async move {
      let rows = self.rows()?;
      Ok(rows.get(key).map(|(data, etag)| StoredRow::new(key.clone(), data.clone(), etag.clone())))
    })
  }

  fn read_range<'a>(&'a self, filter: &'a RowFilter) -> BoxFuture<'a, Result<Vec<StoredRow>, StoreError>> {
    Box::pin(async move {
      let rows = self.rows()?;
      let matched = rows
        .iter()
        .map(|(key, (data, etag))| StoredRow::new(key.clone(), data.clone(), etag.clone()))
        .filter(|row| filter.matches(row))
        .collect();
      Ok(matched)
    })
  }

  fn read_snapshot<'a>(
    &'a self,
    filter: &'a RowFilter,
    version_key: &'a RowKey,
  ) -> BoxFuture<'a, Result<(Vec<StoredRow>, Option<StoredRow>), StoreError>> {
    Box::pin(async move {
      let rows = self.rows()?;
      let matched = rows
        .iter()
        .map(|(key, (data, etag))| StoredRow::new(key.clone(), data.clone(), etag.clone()))
        .filter(|row| filter.matches(row))
        .collect();
      let version =
        rows.get(version_key).map(|(data, etag)| StoredRow::new(version_key.clone(), data.clone(), etag.clone()));
      Ok((matched, version))
    })
  }

  fn write_all(&self, writes: Vec<RowWrite>) -> BoxFuture<'_, Result<BatchOutcome, StoreError>> {
    Box::pin(async move {
      let mut rows = self.rows()?;
      for write in &writes {
        let current = rows.get(&write.key).map(|(_, etag)| etag);
        if !write.condition.holds(current) {
          return Ok(BatchOutcome::Conflict);
        }
      }

      // Stage on a copy so a failed persist leaves memory and disk agreeing.
      let mut staged = rows.clone();
      let mut etags = Vec::with_capacity(writes.len());
      for write in writes {
        let etag = Etag::generate();
        staged.insert(write.key, (write.data, etag.clone()));
        etags.push(etag);
      }
      self.persist(&staged)?;
      *rows = staged;
      Ok(BatchOutcome::Applied(etags))
    })
  }

  fn delete<'a>(&'a self, key: &'a RowKey, condition: WriteCondition) -> BoxFuture<'a, Result<bool, StoreError>> {
    Box::pin(async move {
      let mut rows = self.rows()?;
      let current = rows.get(key).map(|(_, etag)| etag);
      if current.is_none() || !condition.holds(current) {
        return Ok(false);
      }
      let mut staged = rows.clone();
      staged.remove(key);
      self.persist(&staged)?;
      *rows = staged;
      Ok(true)
    })
  }

  fn delete_range<'a>(&'a self, filter: &'a RowFilter) -> BoxFuture<'a, Result<u64, StoreError>> {
    Box::pin(async move {
      let mut rows = self.rows()?;
      let mut staged = rows.clone();
      staged.retain(|key, (data, etag)| {
        let row = StoredRow::new(key.clone(), data.clone(), etag.clone());
        !filter.matches(&row)
      });
      let removed = (rows.len() - staged.len()) as u64;
      if removed > 0 {
        self.persist(&staged)?;
        *rows = staged;
      }
      Ok(removed)
    })
  }
}
