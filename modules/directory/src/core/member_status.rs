//! Membership status of a cluster node.


use serde::{Deserialize, Serialize};

/// Lifecycle status recorded for a member row.
///
/// Callers drive the forward progression
/// `Joining -> Active -> ShuttingDown -> Stopping -> Dead`; the directory only
/// records whatever status it is handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberStatus {
  /// Node requested to join and is not yet serving.
  Joining,
  /// Node is alive and participates in the cluster.
  Active,
  /// Node started a graceful shutdown.
  ShuttingDown,
  /// Node is tearing down its resources.
  Stopping,
  /// Node is gone and eligible for defunct cleanup.
  Dead,
}

impl MemberStatus {
  /// Returns the stable numeric code stored in the status column.
  #[must_use]
  pub const fn code(self) -> u8 {
    match self {
      | Self::Joining => 0,
      | Self::Active => 1,
      | Self::ShuttingDown => 2,
      | Self::Stopping => 3,
      | Self::Dead => 4,
    }
  }

  /// Decodes a status column value.
  #[must_use]
  pub const fn from_code(code: u8) -> Option<Self> {
    match code {
      | 0 => Some(Self::Joining),
      | 1 => Some(Self::Active),
      | 2 => Some(Self::ShuttingDown),
      | 3 => Some(Self::Stopping),
      | 4 => Some(Self::Dead),
      | _ => None,
    }
  }
}
