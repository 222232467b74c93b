//! Results of conditional writes.

use crate::core::Etag;

/// Result of a single conditional write.
///
/// A conflict is an expected race, not an error; callers re-read and retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
  /// The write applied; the row now carries this etag.
  Applied(Etag),
  /// The precondition did not hold; nothing was mutated.
  Conflict,
}

/// Result of an atomic multi-row conditional write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
  /// Every write applied; etags are in batch order.
  Applied(Vec<Etag>),
  /// At least one precondition did not hold; nothing was mutated.
  Conflict,
}
