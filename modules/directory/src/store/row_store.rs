//! Row store abstraction.

use std::{future::Future, pin::Pin};

use super::{BatchOutcome, RowFilter, RowKey, RowWrite, StoreError, StoredRow, WriteCondition, WriteOutcome};

/// Boxed future returned by store operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Conditionally-writable row store shared by all cluster nodes.
///
/// Implementations must make each call atomic with respect to concurrent
/// calls: of N racing writes whose conditions reference the same row, at most
/// one applies and the rest observe a conflict. `write_all` extends the same
/// guarantee over a batch, which is how an entry row and the version row are
/// mutated as one unit.
pub trait RowStore: Send + Sync {
  /// Reads one row.
  ///
  /// # Errors
  ///
  /// Returns [`StoreError`] on infrastructure failure.
  fn read<'a>(&'a self, key: &'a RowKey) -> BoxFuture<'a, Result<Option<StoredRow>, StoreError>>;

  /// Reads every row matching the filter, observed as one consistent view.
  ///
  /// # Errors
  ///
  /// Returns [`StoreError`] on infrastructure failure.
  fn read_range<'a>(&'a self, filter: &'a RowFilter) -> BoxFuture<'a, Result<Vec<StoredRow>, StoreError>>;

  /// Reads a filtered row set together with one version row, all observed as
  /// a single consistent view.
  ///
  /// A concurrent writer must never be visible "half applied" between the
  /// row set and the version row.
  ///
  /// # Errors
  ///
  /// Returns [`StoreError`] on infrastructure failure.
  fn read_snapshot<'a>(
    &'a self,
    filter: &'a RowFilter,
    version_key: &'a RowKey,
  ) -> BoxFuture<'a, Result<(Vec<StoredRow>, Option<StoredRow>), StoreError>>;

  /// Applies every write, or none when any precondition fails.
  ///
  /// # Errors
  ///
  /// Returns [`StoreError`] on infrastructure failure; a failed precondition
  /// is [`BatchOutcome::Conflict`], not an error.
  fn write_all(&self, writes: Vec<RowWrite>) -> BoxFuture<'_, Result<BatchOutcome, StoreError>>;

  /// Applies one conditional write.
  ///
  /// # Errors
  ///
  /// Returns [`StoreError`] on infrastructure failure.
  fn write(&self, write: RowWrite) -> BoxFuture<'_, Result<WriteOutcome, StoreError>> {
    Box::pin(async move {
      match self.write_all(vec![write]).await? {
        | BatchOutcome::Applied(mut etags) => match etags.pop() {
          | Some(etag) => Ok(WriteOutcome::Applied(etag)),
          | None => Err(StoreError::Unavailable(String::from("store applied a write without an etag"))),
        },
        | BatchOutcome::Conflict => Ok(WriteOutcome::Conflict),
      }
    })
  }

  /// Deletes one row when the condition holds; returns whether a row was
  /// removed.
  ///
  /// # Errors
  ///
  /// Returns [`StoreError`] on infrastructure failure.
  fn delete<'a>(&'a self, key: &'a RowKey, condition: WriteCondition) -> BoxFuture<'a, Result<bool, StoreError>>;

  /// Deletes every row matching the filter; returns the number removed.
  ///
  /// # Errors
  ///
  /// Returns [`StoreError`] on infrastructure failure.
  fn delete_range<'a>(&'a self, filter: &'a RowFilter) -> BoxFuture<'a, Result<u64, StoreError>>;
}
