//! Stable 32-bit hash placing reminder owners on the ring.

#[cfg(test)]
mod tests;

/// Hashes an owner identity onto the 32-bit ring.
///
/// FNV-1a with an extra mixing shift. The value is persisted in the hash
/// column and compared across processes, so it must stay stable; do not swap
/// in a seeded hasher.
#[must_use]
pub fn ring_hash(owner: &str) -> u32 {
  let mut hash = 0x811c_9dc5_u32;
  for byte in owner.as_bytes() {
    hash ^= u32::from(*byte);
    hash = hash.wrapping_mul(0x0100_0193);
  }
  hash ^ (hash >> 16)
}
