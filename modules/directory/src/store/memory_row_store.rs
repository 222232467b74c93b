//! In-memory row store.


use std::{
  collections::BTreeMap,
  sync::{Mutex, MutexGuard},
};

use super::{
  BatchOutcome, BoxFuture, RowData, RowFilter, RowKey, RowStore, RowWrite, StoreError, StoredRow, WriteCondition,
};
use crate::core::Etag;

/// Row store backed by a process-local map.
///
/// One mutex spans the whole map, so every call observes and mutates a single
/// consistent view; that mutex is the row-level atomicity primitive the
/// directory components rely on. Intended for tests and single-process
/// deployments.
#[derive(Debug, Default)]
pub struct MemoryRowStore {
  rows: Mutex<BTreeMap<RowKey, (RowData, Etag)>>,
}

impl MemoryRowStore {
  /// Creates an empty store.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  fn rows(&self) -> Result<MutexGuard<'_, BTreeMap<RowKey, (RowData, Etag)>>, StoreError> {
    self.rows.lock().map_err(|_| StoreError::Unavailable(String::from("row map mutex poisoned")))
  }

  fn apply_batch(rows: &mut BTreeMap<RowKey, (RowData, Etag)>, writes: Vec<RowWrite>) -> BatchOutcome {
    for write in &writes {
      let current = rows.get(&write.key).map(|(_, etag)| etag);
      if !write.condition.holds(current) {
        return BatchOutcome::Conflict;
      }
    }

    let mut etags = Vec::with_capacity(writes.len());
    for write in writes {
      let etag = Etag::generate();
      rows.insert(write.key, (write.data, etag.clone()));
      etags.push(etag);
    }
    BatchOutcome::Applied(etags)
  }
}

impl RowStore for MemoryRowStore {
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
      Ok(Self::apply_batch(&mut rows, writes))
    })
  }

  fn delete<'a>(&'a self, key: &'a RowKey, condition: WriteCondition) -> BoxFuture<'a, Result<bool, StoreError>> {
    Box::pin(async move {
      let mut rows = self.rows()?;
      let current = rows.get(key).map(|(_, etag)| etag);
      if current.is_none() || !condition.holds(current) {
        return Ok(false);
      }
      rows.remove(key);
      Ok(true)
    })
  }

  fn delete_range<'a>(&'a self, filter: &'a RowFilter) -> BoxFuture<'a, Result<u64, StoreError>> {
    Box::pin(async move {
      let mut rows = self.rows()?;
      let before = rows.len();
      rows.retain(|key, (data, etag)| {
        let row = StoredRow::new(key.clone(), data.clone(), etag.clone());
        !filter.matches(&row)
      });
      Ok((before - rows.len()) as u64)
    })
  }
}
