//! Versioned membership directory over a shared row store.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::{ClusterConfig, DirectoryError};
use crate::{
  core::{Etag, MemberStatus, MembershipEntry, MembershipRow, MembershipSnapshot, NodeIdentity, TableVersion},
  store::{
    BatchOutcome, RowData, RowFilter, RowKey, RowStore, RowWrite, StoreError, StoredRow, WriteCondition, WriteOutcome,
  },
};

/// Logical table holding one version row per cluster id.
const VERSION_TABLE: &str = "table_version";

/// Payload of the version row; the CAS token is the row's own etag.
#[derive(Debug, Serialize, Deserialize)]
struct VersionPayload {
  version: u64,
}

/// Membership directory scoped to one cluster id.
///
/// Structural mutations (insert, update) touch the member row and the version
/// row as one atomic conditional batch; heartbeats are dirty writes that
/// touch neither etag discipline nor the table version. The only state held
/// here is the store handle and the immutable scoping config, so one value
/// can be shared freely across concurrent tasks.
#[derive(Debug)]
pub struct MembershipDirectory<S> {
  store:  Arc<S>,
  config: ClusterConfig,
}

impl<S> Clone for MembershipDirectory<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), config: self.config.clone() }
  }
}

impl<S: RowStore> MembershipDirectory<S> {
  /// Creates a directory over the given store.
  #[must_use]
  pub const fn new(store: Arc<S>, config: ClusterConfig) -> Self {
    Self { store, config }
  }

  /// Returns the scoping configuration.
  #[must_use]
  pub const fn config(&self) -> &ClusterConfig {
    &self.config
  }

  /// Idempotently seeds the version row for this cluster.
  ///
  /// A concurrent initializer losing the seeding race observes "already
  /// initialized" and succeeds.
  ///
  /// # Errors
  ///
  /// Returns [`DirectoryError`] when the store cannot be reached; silent
  /// failure here would corrupt every later CAS assumption.
  pub async fn initialize(&self) -> Result<(), DirectoryError> {
    let write = RowWrite::new(self.version_key(), WriteCondition::Absent, version_data(0)?);
    match self.store.write(write).await {
      | Ok(WriteOutcome::Applied(_)) => {
        debug!(cluster_id = %self.config.cluster_id(), "seeded membership version row");
        Ok(())
      },
      | Ok(WriteOutcome::Conflict) => {
        debug!(cluster_id = %self.config.cluster_id(), "membership version row already present");
        Ok(())
      },
      | Err(source) => {
        error!(cluster_id = %self.config.cluster_id(), error = %source, "membership initialization failed");
        Err(source.into())
      },
    }
  }

  /// Reads the row for one node together with the current table version.
  ///
  /// Fails closed: store trouble yields an empty snapshot with the sentinel
  /// version, logged rather than surfaced.
  pub async fn read_row(&self, identity: &NodeIdentity) -> MembershipSnapshot {
    // Prefix-filter at the store, then match the exact key: `a:1@1` is a
    // prefix of `a:1@10` and must not leak into the snapshot.
    let filter = RowFilter::table(self.members_table()).with_key_prefix(identity.key());
    let mut snapshot = self.read_filtered(&filter).await;
    snapshot.members.retain(|row| row.entry.identity == *identity);
    snapshot
  }

  /// Reads every member row together with the current table version.
  ///
  /// Fails closed like [`Self::read_row`].
  pub async fn read_all(&self) -> MembershipSnapshot {
    let filter = RowFilter::table(self.members_table());
    self.read_filtered(&filter).await
  }

  /// Atomically inserts a new member row and advances the table version.
  ///
  /// Returns `false` when a row already exists for the identity or the
  /// expected table version is stale; both are recoverable races and the
  /// caller re-reads before retrying. Passing the sentinel version seeds the
  /// version row instead of advancing it.
  ///
  /// # Errors
  ///
  /// Returns [`DirectoryError`] on store or codec failure.
  pub async fn insert_row(&self, entry: &MembershipEntry, expected: &TableVersion) -> Result<bool, DirectoryError> {
    let writes = vec![
      self.version_advance(expected)?,
      RowWrite::new(self.member_key(&entry.identity), WriteCondition::Absent, member_data(entry)?),
    ];
    self.apply_structural(writes, entry, "insert").await
  }

  /// Atomically replaces a member row and advances the table version.
  ///
  /// Succeeds only when the stored entry's etag matches `entry_etag` and the
  /// stored version row matches `expected`; returns `false` when either is
  /// stale.
  ///
  /// # Errors
  ///
  /// Returns [`DirectoryError`] on store or codec failure.
  pub async fn update_row(
    &self,
    entry: &MembershipEntry,
    entry_etag: &Etag,
    expected: &TableVersion,
  ) -> Result<bool, DirectoryError> {
    let writes = vec![
      self.version_advance(expected)?,
      RowWrite::new(self.member_key(&entry.identity), WriteCondition::Match(entry_etag.clone()), member_data(entry)?),
    ];
    self.apply_structural(writes, entry, "update").await
  }

  /// Refreshes only the heartbeat timestamp of an existing member row.
  ///
  /// This is a deliberate dirty write: no etag check, no version advance,
  /// and every stored field except the heartbeat is preserved as stored, not
  /// as passed in. Infrastructure failures are logged and swallowed because
  /// the next heartbeat tick corrects a missed write.
  ///
  /// # Errors
  ///
  /// Returns [`DirectoryError::MemberNotFound`] when no row exists for the
  /// entry's identity; that is a caller logic bug, not a race.
  pub async fn update_i_am_alive(&self, entry: &MembershipEntry) -> Result<(), DirectoryError> {
    let key = self.member_key(&entry.identity);
    let stored = match self.store.read(&key).await {
      | Ok(stored) => stored,
      | Err(source) => {
        warn!(cluster_id = %self.config.cluster_id(), key = %key, error = %source, "heartbeat read failed");
        return Ok(());
      },
    };
    let Some(row) = stored else {
      return Err(DirectoryError::MemberNotFound { identity: entry.identity.to_string() });
    };
    let Some(mut current) = decode_member(&row) else {
      return Ok(());
    };

    current.i_am_alive_at = entry.i_am_alive_at;
    let data = match member_data(&current) {
      | Ok(data) => data,
      | Err(source) => {
        error!(cluster_id = %self.config.cluster_id(), key = %key, error = %source, "heartbeat encode failed");
        return Ok(());
      },
    };
    if let Err(source) = self.store.write(RowWrite::new(key.clone(), WriteCondition::Any, data)).await {
      warn!(cluster_id = %self.config.cluster_id(), key = %key, error = %source, "heartbeat write failed");
    }
    Ok(())
  }

  /// Bulk-deletes rows that are `Dead` and whose heartbeat is older than
  /// `cutoff`. Best-effort: failures are logged and `0` is returned.
  pub async fn cleanup_defunct_entries(&self, cutoff: DateTime<Utc>) -> u64 {
    let filter =
      RowFilter::table(self.members_table()).with_status(MemberStatus::Dead.code()).with_older_than(cutoff);
    match self.store.delete_range(&filter).await {
      | Ok(removed) => {
        debug!(cluster_id = %self.config.cluster_id(), removed, "defunct membership cleanup");
        removed
      },
      | Err(source) => {
        warn!(cluster_id = %self.config.cluster_id(), error = %source, "defunct membership cleanup failed");
        0
      },
    }
  }

  /// Unconditionally wipes every member row and the version row of the given
  /// cluster. Teardown and test use only; failures are logged, not surfaced.
  pub async fn delete_all_entries(&self, cluster_id: &str) {
    let filter = RowFilter::table(format!("{cluster_id}_members"));
    if let Err(source) = self.store.delete_range(&filter).await {
      warn!(cluster_id, error = %source, "membership wipe failed");
      return;
    }
    let version_key = RowKey::new(VERSION_TABLE, cluster_id);
    if let Err(source) = self.store.delete(&version_key, WriteCondition::Any).await {
      warn!(cluster_id, error = %source, "version row wipe failed");
    }
  }

  async fn read_filtered(&self, filter: &RowFilter) -> MembershipSnapshot {
    let version_key = self.version_key();
    match self.store.read_snapshot(filter, &version_key).await {
      | Ok((rows, version_row)) => {
        let version = decode_version(version_row.as_ref());
        let members = rows.iter().filter_map(decode_member_row).collect();
        MembershipSnapshot::new(members, version)
      },
      | Err(source) => {
        warn!(cluster_id = %self.config.cluster_id(), error = %source, "membership read failed, failing closed");
        MembershipSnapshot::empty()
      },
    }
  }

  async fn apply_structural(
    &self,
    writes: Vec<RowWrite>,
    entry: &MembershipEntry,
    operation: &'static str,
  ) -> Result<bool, DirectoryError> {
    match self.store.write_all(writes).await {
      | Ok(BatchOutcome::Applied(_)) => {
        debug!(cluster_id = %self.config.cluster_id(), identity = %entry.identity, operation, "membership row applied");
        Ok(true)
      },
      | Ok(BatchOutcome::Conflict) => Ok(false),
      | Err(source) => {
        error!(
          cluster_id = %self.config.cluster_id(),
          identity = %entry.identity,
          operation,
          error = %source,
          "membership write failed"
        );
        Err(source.into())
      },
    }
  }

  fn version_advance(&self, expected: &TableVersion) -> Result<RowWrite, DirectoryError> {
    let (condition, version) = if expected.is_initial() {
      (WriteCondition::Absent, 0)
    } else {
      (WriteCondition::Match(expected.etag.clone()), expected.next_version())
    };
    Ok(RowWrite::new(self.version_key(), condition, version_data(version)?))
  }

  fn members_table(&self) -> String {
    format!("{}_members", self.config.cluster_id())
  }

  fn member_key(&self, identity: &NodeIdentity) -> RowKey {
    RowKey::new(self.members_table(), identity.key())
  }

  fn version_key(&self) -> RowKey {
    RowKey::new(VERSION_TABLE, self.config.cluster_id())
  }
}

fn version_data(version: u64) -> Result<RowData, DirectoryError> {
  let payload = serde_json::to_string(&VersionPayload { version })
    .map_err(|source| DirectoryError::Codec { key: VERSION_TABLE.to_string(), message: source.to_string() })?;
  Ok(RowData::new(payload))
}

fn member_data(entry: &MembershipEntry) -> Result<RowData, DirectoryError> {
  let payload = serde_json::to_string(entry)
    .map_err(|source| DirectoryError::Codec { key: entry.identity.to_string(), message: source.to_string() })?;
  Ok(RowData::new(payload).with_status(entry.status.code()).with_timestamp(entry.i_am_alive_at))
}

fn decode_version(row: Option<&StoredRow>) -> TableVersion {
  let Some(row) = row else {
    return TableVersion::initial();
  };
  match serde_json::from_str::<VersionPayload>(&row.data.payload) {
    | Ok(payload) => TableVersion::new(payload.version, row.etag.clone()),
    | Err(source) => {
      error!(key = %row.key, error = %source, "version payload undecodable, failing closed");
      TableVersion::initial()
    },
  }
}

fn decode_member(row: &StoredRow) -> Option<MembershipEntry> {
  match serde_json::from_str::<MembershipEntry>(&row.data.payload) {
    | Ok(entry) => Some(entry),
    | Err(source) => {
      let corrupted = StoreError::Corrupted { key: row.key.to_string() };
      error!(error = %corrupted, detail = %source, "skipping undecodable member row");
      None
    },
  }
}

fn decode_member_row(row: &StoredRow) -> Option<MembershipRow> {
  decode_member(row).map(|entry| MembershipRow::new(entry, row.etag.clone()))
}
