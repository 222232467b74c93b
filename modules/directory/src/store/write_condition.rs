//! Precondition attached to a conditional write or delete.

use crate::core::Etag;

/// Condition the stored row must satisfy for a write or delete to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteCondition {
  /// No row may exist under the key (insert-only).
  Absent,
  /// The stored row's etag must match (compare-and-swap).
  Match(Etag),
  /// Apply regardless of the stored state (dirty write).
  Any,
}

impl WriteCondition {
  /// Evaluates the condition against the currently stored etag, if any.
  #[must_use]
  pub fn holds(&self, current: Option<&Etag>) -> bool {
    match self {
      | Self::Absent => current.is_none(),
      | Self::Match(expected) => current == Some(expected),
      | Self::Any => true,
    }
  }
}
