//! One conditional write in a batch.

use super::{RowData, RowKey, WriteCondition};

/// Conditional write of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWrite {
  /// Target row key.
  pub key:       RowKey,
  /// Precondition for the whole batch to apply.
  pub condition: WriteCondition,
  /// New row contents.
  pub data:      RowData,
}

impl RowWrite {
  /// Creates a conditional write.
  #[must_use]
  pub const fn new(key: RowKey, condition: WriteCondition, data: RowData) -> Self {
    Self { key, condition, data }
  }
}
