//! Client-facing projection of the membership directory.


use std::time::Duration;

use tracing::debug;

use super::{GatewayViewConfig, MembershipDirectory};
use crate::{
  core::{GatewayEndpoint, MemberStatus},
  store::RowStore,
};

/// Read-only gateway list derived from live membership data.
///
/// A node qualifies as a gateway when it is `Active` and advertises a
/// non-zero proxy port. The view holds no cache of its own; each call reads
/// the directory, and the staleness bound tells consumers how often to call.
#[derive(Debug)]
pub struct GatewayView<S> {
  directory: MembershipDirectory<S>,
  config:    GatewayViewConfig,
}

impl<S> Clone for GatewayView<S> {
  fn clone(&self) -> Self {
    Self { directory: self.directory.clone(), config: self.config }
  }
}

impl<S: RowStore> GatewayView<S> {
  /// Creates a view over the given directory.
  #[must_use]
  pub const fn new(directory: MembershipDirectory<S>, config: GatewayViewConfig) -> Self {
    Self { directory, config }
  }

  /// Lists the gateway endpoints of every active, client-serving member.
  ///
  /// Inherits the directory's fail-closed reads: store trouble yields an
  /// empty list.
  pub async fn list_gateways(&self) -> Vec<GatewayEndpoint> {
    let snapshot = self.directory.read_all().await;
    let gateways: Vec<GatewayEndpoint> = snapshot
      .members
      .iter()
      .filter(|row| row.entry.status == MemberStatus::Active && row.entry.proxy_port > 0)
      .map(|row| GatewayEndpoint::from_entry(&row.entry))
      .collect();
    debug!(
      cluster_id = %self.directory.config().cluster_id(),
      members = snapshot.len(),
      gateways = gateways.len(),
      "gateway list projected"
    );
    gateways
  }

  /// Returns how stale a cached gateway list may get before a refresh.
  #[must_use]
  pub const fn max_staleness(&self) -> Duration {
    self.config.max_staleness()
  }

  /// Returns true: the backing directory always reflects membership changes,
  /// so periodic refreshes are worthwhile.
  #[must_use]
  pub const fn is_updatable(&self) -> bool {
    true
  }
}
