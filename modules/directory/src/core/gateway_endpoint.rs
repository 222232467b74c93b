//! Client-dialable endpoint projected from an active member.


use core::fmt;

use super::{MembershipEntry, NodeIdentity};

/// Externally reachable endpoint of a gateway node.
///
/// Built from an `Active` membership entry by substituting the advertised
/// port with the client-facing proxy port.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GatewayEndpoint {
  /// Node identity with the proxy port applied.
  pub identity: NodeIdentity,
}

impl GatewayEndpoint {
  /// Projects a membership entry to its gateway endpoint.
  ///
  /// The caller is responsible for filtering to entries with a proxy port.
  #[must_use]
  pub fn from_entry(entry: &MembershipEntry) -> Self {
    Self { identity: entry.identity.with_port(entry.proxy_port) }
  }

  /// Renders the gateway URI, `gwy.tcp://ip:port/generation`.
  #[must_use]
  pub fn to_uri(&self) -> String {
    format!("gwy.tcp://{}/{}", self.identity.endpoint, self.identity.generation)
  }
}

impl fmt::Display for GatewayEndpoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_uri())
  }
}
