//! Store infrastructure failures.

/// Infrastructure failure reported by a row store.
///
/// Expected races (duplicate insert, etag mismatch) are not errors; they
/// surface as [`super::WriteOutcome::Conflict`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
  /// Underlying I/O failure.
  #[error("store io error: {0}")]
  Io(String),
  /// Stored bytes could not be decoded.
  #[error("corrupted row at {key}")]
  Corrupted {
    /// Key of the undecodable row.
    key: String,
  },
  /// Store unreachable or in a state where no call can proceed.
  #[error("store unavailable: {0}")]
  Unavailable(String),
}

impl From<std::io::Error> for StoreError {
  fn from(value: std::io::Error) -> Self {
    Self::Io(value.to_string())
  }
}
