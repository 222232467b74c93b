//! Opaque per-row version token.


use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque per-row version token used for optimistic concurrency.
///
/// Two etags compare equal only when they were produced by the same write.
/// The textual content carries no meaning beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Etag(String);

impl Etag {
  /// Wraps an existing token.
  #[must_use]
  pub fn new(value: impl Into<String>) -> Self {
    Self(value.into())
  }

  /// Generates a fresh, globally unique token.
  #[must_use]
  pub fn generate() -> Self {
    Self(uuid::Uuid::new_v4().to_string())
  }

  /// Returns the token text.
  #[must_use]
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Etag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
