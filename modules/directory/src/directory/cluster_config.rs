//! Cluster and service scoping configuration.

#[cfg(test)]
mod tests;

/// Immutable scoping for the directory components.
///
/// The cluster id scopes membership rows, the service id scopes reminder
/// rows; the service id defaults to the cluster id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterConfig {
  cluster_id: String,
  service_id: String,
}

impl ClusterConfig {
  /// Creates a configuration scoped to one cluster.
  #[must_use]
  pub fn new(cluster_id: impl Into<String>) -> Self {
    let cluster_id = cluster_id.into();
    let service_id = cluster_id.clone();
    Self { cluster_id, service_id }
  }

  /// Sets a service id distinct from the cluster id.
  #[must_use]
  pub fn with_service_id(mut self, service_id: impl Into<String>) -> Self {
    self.service_id = service_id.into();
    self
  }

  /// Returns the cluster id.
  #[must_use]
  pub fn cluster_id(&self) -> &str {
    &self.cluster_id
  }

  /// Returns the service id.
  #[must_use]
  pub fn service_id(&self) -> &str {
    &self.service_id
  }
}
