//! Row as returned by store reads.

use serde::{Deserialize, Serialize};

use super::{RowData, RowKey};
use crate::core::Etag;

/// One row observed in the store, including the etag the store assigned to
/// its last applied write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRow {
  /// Key the row is stored under.
  pub key:  RowKey,
  /// Payload and indexed columns.
  pub data: RowData,
  /// Etag of the last applied write.
  pub etag: Etag,
}

impl StoredRow {
  /// Creates a stored row.
  #[must_use]
  pub const fn new(key: RowKey, data: RowData, etag: Etag) -> Self {
    Self { key, data, etag }
  }
}
