//! Node identity: endpoint plus incarnation generation.

#[cfg(test)]
mod tests;

use core::fmt;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// Identifies one process instance in the cluster.
///
/// The generation counter disambiguates successive processes bound to the
/// same endpoint after a restart. An identity is immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeIdentity {
  /// Dialable network endpoint of the node.
  pub endpoint:   SocketAddr,
  /// Incarnation counter for this endpoint.
  pub generation: u64,
}

impl NodeIdentity {
  /// Creates a new identity.
  #[must_use]
  pub const fn new(endpoint: SocketAddr, generation: u64) -> Self {
    Self { endpoint, generation }
  }

  /// Returns the row-key form, `ip:port@generation`.
  #[must_use]
  pub fn key(&self) -> String {
    self.to_string()
  }

  /// Returns the same identity with the endpoint port replaced.
  #[must_use]
  pub fn with_port(&self, port: u16) -> Self {
    let mut endpoint = self.endpoint;
    endpoint.set_port(port);
    Self { endpoint, generation: self.generation }
  }
}

impl fmt::Display for NodeIdentity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}@{}", self.endpoint, self.generation)
  }
}
