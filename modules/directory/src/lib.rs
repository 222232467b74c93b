//! Cluster coordination directory over a shared, conditionally-writable store.
//!
//! Every process in a cluster agrees on which nodes exist, whether they are
//! alive, and which node owns a given durable reminder, using only the backing
//! store's row-level atomic conditional write as the synchronization point.
//! There is no node-to-node consensus protocol here.
//!
//! - [`core`] holds the pure domain types: node identities, membership
//!   entries, table versions, reminder entries and the hash ring arithmetic.
//! - [`store`] defines the versioned row store primitive and its adapters.
//! - [`directory`] builds the membership directory, reminder catalog and
//!   gateway view on top of a [`store::RowStore`].

pub mod core;
pub mod directory;
pub mod store;
