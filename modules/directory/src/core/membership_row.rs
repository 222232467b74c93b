//! Membership entry paired with its row etag.

use serde::{Deserialize, Serialize};

use super::{Etag, MembershipEntry};

/// One member row as observed in the store: the entry plus the etag guarding
/// its next conditional update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRow {
  /// Deserialized membership entry.
  pub entry: MembershipEntry,
  /// Row etag at the time of the read.
  pub etag:  Etag,
}

impl MembershipRow {
  /// Pairs an entry with its etag.
  #[must_use]
  pub const fn new(entry: MembershipEntry, etag: Etag) -> Self {
    Self { entry, etag }
  }
}
