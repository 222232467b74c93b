//! Possibly-wrapping arc of the 32-bit hash ring.


use serde::{Deserialize, Serialize};

/// Half-open arc `(begin, end]` of the hash ring.
///
/// When `begin >= end` the arc wraps around zero and covers every hash that
/// is `> begin` or `<= end`. A range with `begin == end` therefore covers the
/// whole ring, which is what a single surviving owner must claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingRange {
  /// Exclusive lower bound.
  pub begin: u32,
  /// Inclusive upper bound.
  pub end:   u32,
}

impl RingRange {
  /// Creates a range.
  #[must_use]
  pub const fn new(begin: u32, end: u32) -> Self {
    Self { begin, end }
  }

  /// Returns true when `hash` falls inside this arc.
  #[must_use]
  pub const fn contains(&self, hash: u32) -> bool {
    if self.begin < self.end {
      hash > self.begin && hash <= self.end
    } else {
      hash > self.begin || hash <= self.end
    }
  }
}
