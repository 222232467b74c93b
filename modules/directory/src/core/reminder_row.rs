//! Reminder entry paired with its row etag.

use serde::{Deserialize, Serialize};

use super::{Etag, ReminderEntry};

/// One reminder row as observed in the store: the entry plus the etag
/// required for an etag-checked removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderRow {
  /// Deserialized reminder entry.
  pub entry: ReminderEntry,
  /// Row etag at the time of the read.
  pub etag:  Etag,
}

impl ReminderRow {
  /// Pairs an entry with its etag.
  #[must_use]
  pub const fn new(entry: ReminderEntry, etag: Etag) -> Self {
    Self { entry, etag }
  }
}
