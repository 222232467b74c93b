//! Monotonic version guarding structural membership mutations.


use core::fmt;

use serde::{Deserialize, Serialize};

/// Version of the membership directory as a whole.
///
/// Advances on every insert or update of a member row, never on heartbeats.
/// The etag is the CAS token against the stored version row; the sentinel
/// `(0, "0")` means the cluster's version row has not been seeded yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableVersion {
  /// Monotonically increasing version number.
  pub version: u64,
  /// Etag of the version row this value was read from.
  pub etag:    super::Etag,
}

impl TableVersion {
  /// Creates a version value.
  #[must_use]
  pub const fn new(version: u64, etag: super::Etag) -> Self {
    Self { version, etag }
  }

  /// Returns the "not yet initialized" sentinel.
  #[must_use]
  pub fn initial() -> Self {
    Self { version: 0, etag: super::Etag::new("0") }
  }

  /// Returns true when this is the uninitialized sentinel.
  #[must_use]
  pub fn is_initial(&self) -> bool {
    self.version == 0 && self.etag.as_str() == "0"
  }

  /// Returns the next version number; the new etag is assigned by the store.
  #[must_use]
  pub const fn next_version(&self) -> u64 {
    self.version.saturating_add(1)
  }
}

impl fmt::Display for TableVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}#{}", self.version, self.etag)
  }
}
