//! Hard failures surfaced by the directory components.

use crate::store::StoreError;

/// Failure of a directory operation.
///
/// Expected races never surface here; they are `false`/`Conflict` return
/// values. This type covers infrastructure failures on paths that must not
/// fail silently, payload codec failures, and caller precondition bugs.
#[derive(thiserror::Error, Debug)]
pub enum DirectoryError {
  /// Backing store failure.
  #[error(transparent)]
  Store(#[from] StoreError),
  /// Row payload could not be encoded or decoded.
  #[error("payload codec error at {key}: {message}")]
  Codec {
    /// Row key whose payload failed to convert.
    key:     String,
    /// Codec failure description.
    message: String,
  },
  /// A row that the caller asserted to exist is missing.
  #[error("no membership entry for {identity}")]
  MemberNotFound {
    /// Identity whose entry was expected.
    identity: String,
  },
}
