//! Reminder catalog over a shared row store.


use std::sync::Arc;

use tracing::{debug, error};

use super::{ClusterConfig, DirectoryError};
use crate::{
  core::{ring_hash, Etag, ReminderEntry, ReminderRow, RingRange},
  store::{RowData, RowFilter, RowKey, RowStore, RowWrite, StoredRow, WriteCondition, WriteOutcome},
};

/// Separator between owner and name inside a reminder row key.
///
/// The ASCII unit separator cannot occur in either component, so per-owner
/// prefix reads never capture a neighbouring owner.
const KEY_SEPARATOR: char = '\u{1f}';

/// Reminder catalog scoped to one service id.
///
/// Rows are keyed by `(owner, name)` and carry the owner's ring hash as an
/// indexed column so that an owner range can be claimed without decoding
/// payloads. Writes are last-writer-wins; only removal is etag-checked.
#[derive(Debug)]
pub struct ReminderCatalog<S> {
  store:  Arc<S>,
  config: ClusterConfig,
}

impl<S> Clone for ReminderCatalog<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), config: self.config.clone() }
  }
}

impl<S: RowStore> ReminderCatalog<S> {
  /// Creates a catalog over the given store.
  #[must_use]
  pub const fn new(store: Arc<S>, config: ClusterConfig) -> Self {
    Self { store, config }
  }

  /// Returns the scoping configuration.
  #[must_use]
  pub const fn config(&self) -> &ClusterConfig {
    &self.config
  }

  /// Probes the store so an unreachable backend is reported at startup
  /// rather than on the first timer tick.
  ///
  /// # Errors
  ///
  /// Returns [`DirectoryError`] when the store cannot be reached.
  pub async fn initialize(&self) -> Result<(), DirectoryError> {
    let filter = RowFilter::table(self.reminders_table());
    let rows = self.store.read_range(&filter).await?;
    debug!(service_id = %self.config.service_id(), rows = rows.len(), "reminder catalog reachable");
    Ok(())
  }

  /// Reads one reminder row.
  ///
  /// # Errors
  ///
  /// Returns [`DirectoryError`] on store or codec failure.
  pub async fn read_row(&self, owner: &str, name: &str) -> Result<Option<ReminderRow>, DirectoryError> {
    let key = self.reminder_key(owner, name);
    match self.store.read(&key).await? {
      | Some(row) => Ok(Some(decode_reminder(&row)?)),
      | None => Ok(None),
    }
  }

  /// Reads every reminder belonging to one owner.
  ///
  /// # Errors
  ///
  /// Returns [`DirectoryError`] on store or codec failure.
  pub async fn read_rows(&self, owner: &str) -> Result<Vec<ReminderRow>, DirectoryError> {
    let prefix = format!("{owner}{KEY_SEPARATOR}");
    let filter = RowFilter::table(self.reminders_table()).with_key_prefix(prefix);
    let rows = self.store.read_range(&filter).await?;
    rows.iter().map(decode_reminder).collect()
  }

  /// Reads every reminder whose owner hash falls inside the given ring arc,
  /// wraparound included.
  ///
  /// # Errors
  ///
  /// Returns [`DirectoryError`] on store or codec failure.
  pub async fn read_hash_range(&self, range: RingRange) -> Result<Vec<ReminderRow>, DirectoryError> {
    let filter = RowFilter::table(self.reminders_table()).with_hash_range(range);
    let rows = self.store.read_range(&filter).await?;
    rows.iter().map(decode_reminder).collect()
  }

  /// Writes a reminder row, replacing any previous row for the same
  /// `(owner, name)`. Last writer wins; returns the etag of the written row,
  /// which a later [`Self::remove_row`] must present.
  ///
  /// # Errors
  ///
  /// Returns [`DirectoryError`] on store or codec failure.
  pub async fn upsert_row(&self, entry: &ReminderEntry) -> Result<Etag, DirectoryError> {
    let key = self.reminder_key(&entry.owner, &entry.name);
    let write = RowWrite::new(key.clone(), WriteCondition::Any, reminder_data(entry)?);
    match self.store.write(write).await {
      | Ok(WriteOutcome::Applied(etag)) => {
        debug!(service_id = %self.config.service_id(), key = %key, "reminder upserted");
        Ok(etag)
      },
      | Ok(WriteOutcome::Conflict) => {
        // Unconditional writes cannot conflict; a store reporting one is
        // broken.
        Err(DirectoryError::Codec { key: key.to_string(), message: String::from("conflict on unconditional write") })
      },
      | Err(source) => {
        error!(service_id = %self.config.service_id(), key = %key, error = %source, "reminder upsert failed");
        Err(source.into())
      },
    }
  }

  /// Removes a reminder row when its etag still matches; returns `false`
  /// when the row is gone or was rewritten since the etag was read.
  ///
  /// # Errors
  ///
  /// Returns [`DirectoryError`] on store failure.
  pub async fn remove_row(&self, owner: &str, name: &str, etag: &Etag) -> Result<bool, DirectoryError> {
    let key = self.reminder_key(owner, name);
    let removed = self.store.delete(&key, WriteCondition::Match(etag.clone())).await?;
    debug!(service_id = %self.config.service_id(), key = %key, removed, "reminder removal");
    Ok(removed)
  }

  /// Unconditionally wipes every reminder row of this service. Teardown and
  /// test use only.
  ///
  /// # Errors
  ///
  /// Returns [`DirectoryError`] on store failure.
  pub async fn clear_all(&self) -> Result<(), DirectoryError> {
    let filter = RowFilter::table(self.reminders_table());
    let removed = self.store.delete_range(&filter).await?;
    debug!(service_id = %self.config.service_id(), removed, "reminder table cleared");
    Ok(())
  }

  fn reminders_table(&self) -> String {
    format!("{}_reminders", self.config.service_id())
  }

  fn reminder_key(&self, owner: &str, name: &str) -> RowKey {
    RowKey::new(self.reminders_table(), format!("{owner}{KEY_SEPARATOR}{name}"))
  }
}

fn reminder_data(entry: &ReminderEntry) -> Result<RowData, DirectoryError> {
  let payload = serde_json::to_string(entry)
    .map_err(|source| DirectoryError::Codec { key: entry.owner.clone(), message: source.to_string() })?;
  Ok(RowData::new(payload).with_hash(ring_hash(&entry.owner)))
}

fn decode_reminder(row: &StoredRow) -> Result<ReminderRow, DirectoryError> {
  let entry = serde_json::from_str::<ReminderEntry>(&row.data.payload)
    .map_err(|source| DirectoryError::Codec { key: row.key.to_string(), message: source.to_string() })?;
  Ok(ReminderRow::new(entry, row.etag.clone()))
}
