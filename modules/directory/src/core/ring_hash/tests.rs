use super::ring_hash;

#[test]
fn hash_is_deterministic() {
  assert_eq!(ring_hash("timers/order-17"), ring_hash("timers/order-17"));
}

#[test]
fn distinct_owners_spread_over_the_ring() {
  let first = ring_hash("timers/order-17");
  let second = ring_hash("timers/order-18");
  assert_ne!(first, second);
}

#[test]
fn empty_owner_hashes_to_offset_basis_mix() {
  // Pinned value: the hash is persisted, a change here breaks redistribution.
  assert_eq!(ring_hash(""), 0x811c_9dc5 ^ (0x811c_9dc5 >> 16));
}
