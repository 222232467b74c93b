//! Durable reminder owned by one entity.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One durable, named, periodic timer; the serialized form is the row
/// payload. Unique per `(owner, name)` within a service scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderEntry {
  /// Identity of the owning entity.
  pub owner:  String,
  /// Reminder name, unique per owner.
  pub name:   String,
  /// Next due time.
  pub due_at: DateTime<Utc>,
  /// Firing period.
  pub period: Duration,
}

impl ReminderEntry {
  /// Creates a reminder entry.
  #[must_use]
  pub fn new(owner: impl Into<String>, name: impl Into<String>, due_at: DateTime<Utc>, period: Duration) -> Self {
    Self { owner: owner.into(), name: name.into(), due_at, period }
  }

  /// Returns the ring hash of the owning entity.
  #[must_use]
  pub fn owner_hash(&self) -> u32 {
    super::ring_hash(&self.owner)
  }
}
