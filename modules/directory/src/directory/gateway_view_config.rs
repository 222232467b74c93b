//! Gateway view refresh configuration.


use std::time::Duration;

/// How consumers of the gateway list should refresh it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayViewConfig {
  max_staleness: Duration,
}

impl GatewayViewConfig {
  /// Default interval between refreshes of the gateway list.
  pub const DEFAULT_MAX_STALENESS: Duration = Duration::from_secs(60);

  /// Creates a configuration with the default staleness bound.
  #[must_use]
  pub const fn new() -> Self {
    Self { max_staleness: Self::DEFAULT_MAX_STALENESS }
  }

  /// Sets the staleness bound.
  #[must_use]
  pub const fn with_max_staleness(mut self, max_staleness: Duration) -> Self {
    self.max_staleness = max_staleness;
    self
  }

  /// Returns how stale a cached gateway list may get before a refresh.
  #[must_use]
  pub const fn max_staleness(&self) -> Duration {
    self.max_staleness
  }
}

impl Default for GatewayViewConfig {
  fn default() -> Self {
    Self::new()
  }
}
