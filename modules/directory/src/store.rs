//! Versioned row store primitive and adapters.
//!
//! The store is the only synchronization point between cluster nodes: a
//! conditional point write (insert-only, compare-and-swap, or unconditional),
//! a point read, a predicate-filtered range read, and an atomic multi-row
//! conditional write used to mutate an entry row and the version row as one
//! unit.

mod file_row_store;
mod memory_row_store;
mod row_data;
mod row_filter;
mod row_key;
mod row_store;
mod row_write;
mod store_error;
mod stored_row;
mod write_condition;
mod write_outcome;

pub use file_row_store::FileRowStore;
pub use memory_row_store::MemoryRowStore;
pub use row_data::RowData;
pub use row_filter::RowFilter;
pub use row_key::RowKey;
pub use row_store::{BoxFuture, RowStore};
pub use row_write::RowWrite;
pub use store_error::StoreError;
pub use stored_row::StoredRow;
pub use write_condition::WriteCondition;
pub use write_outcome::{BatchOutcome, WriteOutcome};
