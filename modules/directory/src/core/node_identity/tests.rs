use super::NodeIdentity;

fn identity(port: u16, generation: u64) -> NodeIdentity {
  NodeIdentity::new(format!("127.0.0.1:{port}").parse().expect("endpoint"), generation)
}

#[test]
fn key_includes_endpoint_and_generation() {
  assert_eq!(identity(4050, 7).key(), "127.0.0.1:4050@7");
}

#[test]
fn with_port_keeps_host_and_generation() {
  let projected = identity(4050, 7).with_port(30000);
  assert_eq!(projected, identity(30000, 7));
}

#[test]
fn restarted_process_has_distinct_identity() {
  assert_ne!(identity(4050, 1), identity(4050, 2));
}
