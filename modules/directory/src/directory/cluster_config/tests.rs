use super::ClusterConfig;

#[test]
fn service_id_defaults_to_cluster_id() {
  let config = ClusterConfig::new("orders");
  assert_eq!(config.cluster_id(), "orders");
  assert_eq!(config.service_id(), "orders");
}

#[test]
fn service_id_can_diverge() {
  let config = ClusterConfig::new("orders").with_service_id("orders-reminders");
  assert_eq!(config.cluster_id(), "orders");
  assert_eq!(config.service_id(), "orders-reminders");
}
