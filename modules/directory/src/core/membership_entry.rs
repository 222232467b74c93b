//! Membership entry stored for one cluster node.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MemberStatus, NodeIdentity};

/// Full membership record for one node; the serialized form is the row
/// payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipEntry {
  /// Identity of the node this entry describes.
  pub identity:      NodeIdentity,
  /// Current lifecycle status.
  pub status:        MemberStatus,
  /// Client-facing proxy port, 0 when the node accepts no client connections.
  pub proxy_port:    u16,
  /// Last "I am alive" heartbeat timestamp.
  pub i_am_alive_at: DateTime<Utc>,
  /// Process start time of this incarnation.
  pub started_at:    DateTime<Utc>,
}

impl MembershipEntry {
  /// Creates an entry whose heartbeat equals the start time.
  #[must_use]
  pub fn new(identity: NodeIdentity, status: MemberStatus, proxy_port: u16, started_at: DateTime<Utc>) -> Self {
    Self { identity, status, proxy_port, i_am_alive_at: started_at, started_at }
  }

  /// Returns a copy with a different status.
  #[must_use]
  pub fn with_status(mut self, status: MemberStatus) -> Self {
    self.status = status;
    self
  }

  /// Returns a copy with a refreshed heartbeat timestamp.
  #[must_use]
  pub fn with_i_am_alive_at(mut self, at: DateTime<Utc>) -> Self {
    self.i_am_alive_at = at;
    self
  }
}
