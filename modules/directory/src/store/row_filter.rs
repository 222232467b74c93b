//! Predicate over the non-payload columns of a logical table.


use chrono::{DateTime, Utc};

use super::StoredRow;
use crate::core::RingRange;

/// Filter for range reads and bulk deletes.
///
/// All set constraints must hold (conjunction). The payload is never
/// inspected; only the key and the indexed columns participate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
  /// Logical table to scan.
  pub table:      String,
  /// Row-key prefix constraint.
  pub key_prefix: Option<String>,
  /// Ring arc the hash column must fall into.
  pub hash_range: Option<RingRange>,
  /// Exact status column value.
  pub status:     Option<u8>,
  /// Timestamp column must be strictly older than this instant.
  pub older_than: Option<DateTime<Utc>>,
}

impl RowFilter {
  /// Creates a filter matching every row of a table.
  #[must_use]
  pub fn table(table: impl Into<String>) -> Self {
    Self { table: table.into(), key_prefix: None, hash_range: None, status: None, older_than: None }
  }

  /// Constrains the row key to a prefix.
  #[must_use]
  pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.key_prefix = Some(prefix.into());
    self
  }

  /// Constrains the hash column to a ring arc.
  #[must_use]
  pub const fn with_hash_range(mut self, range: RingRange) -> Self {
    self.hash_range = Some(range);
    self
  }

  /// Constrains the status column to an exact value.
  #[must_use]
  pub const fn with_status(mut self, status: u8) -> Self {
    self.status = Some(status);
    self
  }

  /// Constrains the timestamp column to values before `cutoff`.
  #[must_use]
  pub const fn with_older_than(mut self, cutoff: DateTime<Utc>) -> Self {
    self.older_than = Some(cutoff);
    self
  }

  /// Evaluates the filter against one stored row.
  #[must_use]
  pub fn matches(&self, row: &StoredRow) -> bool {
    if row.key.table != self.table {
      return false;
    }
    if let Some(prefix) = &self.key_prefix {
      if !row.key.row.starts_with(prefix.as_str()) {
        return false;
      }
    }
    if let Some(range) = &self.hash_range {
      match row.data.hash {
        | Some(hash) if range.contains(hash) => {},
        | _ => return false,
      }
    }
    if let Some(status) = self.status {
      if row.data.status != Some(status) {
        return false;
      }
    }
    if let Some(cutoff) = self.older_than {
      match row.data.timestamp {
        | Some(timestamp) if timestamp < cutoff => {},
        | _ => return false,
      }
    }
    true
  }
}
