//! Payload and indexed columns written to a row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a caller writes to a row: the opaque serialized payload plus the
/// non-payload columns the store can filter on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowData {
  /// Opaque serialized payload.
  pub payload:   String,
  /// Ring hash column, set for reminder rows.
  pub hash:      Option<u32>,
  /// Status column, set for member rows.
  pub status:    Option<u8>,
  /// Timestamp column, set for member rows (heartbeat time).
  pub timestamp: Option<DateTime<Utc>>,
}

impl RowData {
  /// Creates row data with no indexed columns.
  #[must_use]
  pub fn new(payload: impl Into<String>) -> Self {
    Self { payload: payload.into(), hash: None, status: None, timestamp: None }
  }

  /// Sets the hash column.
  #[must_use]
  pub const fn with_hash(mut self, hash: u32) -> Self {
    self.hash = Some(hash);
    self
  }

  /// Sets the status column.
  #[must_use]
  pub const fn with_status(mut self, status: u8) -> Self {
    self.status = Some(status);
    self
  }

  /// Sets the timestamp column.
  #[must_use]
  pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
    self.timestamp = Some(timestamp);
    self
  }
}
