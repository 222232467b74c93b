//! Composite key addressing one stored row.

#[cfg(test)]
mod tests;

use core::fmt;

use serde::{Deserialize, Serialize};

/// Addresses a row as `(logical table, row key)`.
///
/// Logical tables are plain strings such as `myCluster_members`; the store
/// needs no schema knowledge beyond this pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowKey {
  /// Logical table name.
  pub table: String,
  /// Row key within the table.
  pub row:   String,
}

impl RowKey {
  /// Creates a row key.
  #[must_use]
  pub fn new(table: impl Into<String>, row: impl Into<String>) -> Self {
    Self { table: table.into(), row: row.into() }
  }
}

impl fmt::Display for RowKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.table, self.row)
  }
}
