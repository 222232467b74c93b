use std::sync::Arc;

use chrono::{Duration, Utc};

use super::MembershipDirectory;
use crate::{
  core::{Etag, MemberStatus, MembershipEntry, NodeIdentity, TableVersion},
  directory::{ClusterConfig, DirectoryError},
  store::{
    BatchOutcome, BoxFuture, MemoryRowStore, RowFilter, RowKey, RowStore, RowWrite, StoreError, StoredRow,
    WriteCondition, WriteOutcome,
  },
};

fn identity(port: u16, generation: u64) -> NodeIdentity {
  NodeIdentity::new(format!("10.0.0.1:{port}").parse().expect("endpoint"), generation)
}

fn entry(port: u16, generation: u64, status: MemberStatus, proxy_port: u16) -> MembershipEntry {
  MembershipEntry::new(identity(port, generation), status, proxy_port, Utc::now())
}

fn directory() -> MembershipDirectory<MemoryRowStore> {
  MembershipDirectory::new(Arc::new(MemoryRowStore::new()), ClusterConfig::new("testCluster"))
}

async fn insert(directory: &MembershipDirectory<MemoryRowStore>, entry: &MembershipEntry) {
  let snapshot = directory.read_all().await;
  assert!(directory.insert_row(entry, &snapshot.version).await.expect("insert"));
}

#[tokio::test]
async fn initialize_is_idempotent() {
  let directory = directory();
  directory.initialize().await.expect("first initialize");
  directory.initialize().await.expect("second initialize");

  let snapshot = directory.read_all().await;
  assert_eq!(snapshot.version.version, 0);
  assert!(!snapshot.version.is_initial());
}

#[tokio::test]
async fn concurrent_initializers_agree_on_one_version_row() {
  let directory = directory();
  let tasks: Vec<_> = (0..4)
    .map(|_| {
      let directory = directory.clone();
      tokio::spawn(async move { directory.initialize().await })
    })
    .collect();
  for task in tasks {
    task.await.expect("join").expect("initialize");
  }

  let first = directory.read_all().await.version;
  let second = directory.read_all().await.version;
  assert_eq!(first, second);
  assert_eq!(first.version, 0);
}

#[tokio::test]
async fn insert_with_sentinel_seeds_the_version_row() {
  let directory = directory();
  let member = entry(4050, 1, MemberStatus::Joining, 0);

  assert!(directory.insert_row(&member, &TableVersion::initial()).await.expect("insert"));

  let snapshot = directory.read_all().await;
  assert_eq!(snapshot.len(), 1);
  assert_eq!(snapshot.version.version, 0);
  assert!(!snapshot.version.is_initial());
}

#[tokio::test]
async fn insert_advances_the_version_after_initialization() {
  let directory = directory();
  directory.initialize().await.expect("initialize");

  insert(&directory, &entry(4050, 1, MemberStatus::Joining, 0)).await;
  let snapshot = directory.read_all().await;
  assert_eq!(snapshot.version.version, 1);

  insert(&directory, &entry(4051, 1, MemberStatus::Joining, 0)).await;
  assert_eq!(directory.read_all().await.version.version, 2);
}

#[tokio::test]
async fn duplicate_insert_returns_false() {
  let directory = directory();
  directory.initialize().await.expect("initialize");
  let member = entry(4050, 1, MemberStatus::Joining, 0);
  insert(&directory, &member).await;

  let current = directory.read_all().await.version;
  assert!(!directory.insert_row(&member, &current).await.expect("insert"));
  assert_eq!(directory.read_all().await.len(), 1);
}

#[tokio::test]
async fn insert_with_stale_version_returns_false() {
  let directory = directory();
  directory.initialize().await.expect("initialize");
  let stale = directory.read_all().await.version;
  insert(&directory, &entry(4050, 1, MemberStatus::Joining, 0)).await;

  let outcome = directory.insert_row(&entry(4051, 1, MemberStatus::Joining, 0), &stale).await.expect("insert");
  assert!(!outcome);
  assert_eq!(directory.read_all().await.len(), 1);
}

#[tokio::test]
async fn at_most_one_racing_insert_wins() {
  let directory = directory();
  let member = entry(4050, 1, MemberStatus::Joining, 0);

  let tasks: Vec<_> = (0..8)
    .map(|_| {
      let directory = directory.clone();
      let member = member.clone();
      tokio::spawn(async move { directory.insert_row(&member, &TableVersion::initial()).await })
    })
    .collect();

  let mut wins = 0;
  for task in tasks {
    if task.await.expect("join").expect("insert") {
      wins += 1;
    }
  }
  assert_eq!(wins, 1);
  assert_eq!(directory.read_all().await.len(), 1);
}

#[tokio::test]
async fn update_succeeds_only_with_both_etags_fresh() {
  let directory = directory();
  directory.initialize().await.expect("initialize");
  let member = entry(4050, 1, MemberStatus::Joining, 0);
  insert(&directory, &member).await;

  let snapshot = directory.read_all().await;
  let row = snapshot.get(&member.identity).expect("row").clone();
  let activated = member.clone().with_status(MemberStatus::Active);

  // Stale entry etag.
  assert!(!directory.update_row(&activated, &Etag::generate(), &snapshot.version).await.expect("update"));
  // Stale table version.
  let stale_version = TableVersion::new(snapshot.version.version, Etag::generate());
  assert!(!directory.update_row(&activated, &row.etag, &stale_version).await.expect("update"));
  // Nothing was mutated by the failed attempts.
  let unchanged = directory.read_all().await;
  assert_eq!(unchanged.version, snapshot.version);
  assert_eq!(unchanged.get(&member.identity).expect("row"), &row);

  // Fresh etags apply the replacement and advance the version.
  assert!(directory.update_row(&activated, &row.etag, &snapshot.version).await.expect("update"));
  let updated = directory.read_all().await;
  assert_eq!(updated.version.version, snapshot.version.version + 1);
  let updated_row = updated.get(&member.identity).expect("row");
  assert_eq!(updated_row.entry.status, MemberStatus::Active);
  assert_ne!(updated_row.etag, row.etag);
}

#[tokio::test]
async fn heartbeat_touches_only_the_timestamp() {
  let directory = directory();
  directory.initialize().await.expect("initialize");
  let member = entry(4050, 1, MemberStatus::Active, 30000);
  insert(&directory, &member).await;
  let before = directory.read_all().await;

  // Status and proxy port on the passed-in entry must be ignored.
  let beat = member
    .clone()
    .with_status(MemberStatus::Dead)
    .with_i_am_alive_at(member.i_am_alive_at + Duration::seconds(30));
  directory.update_i_am_alive(&beat).await.expect("heartbeat");

  let after = directory.read_all().await;
  assert_eq!(after.version, before.version);
  let stored = after.get(&member.identity).expect("row");
  assert_eq!(stored.entry.status, MemberStatus::Active);
  assert_eq!(stored.entry.proxy_port, 30000);
  assert_eq!(stored.entry.started_at, member.started_at);
  assert_eq!(stored.entry.i_am_alive_at, beat.i_am_alive_at);
}

#[tokio::test]
async fn heartbeat_for_unknown_member_is_a_hard_error() {
  let directory = directory();
  directory.initialize().await.expect("initialize");

  let outcome = directory.update_i_am_alive(&entry(4050, 1, MemberStatus::Active, 0)).await;
  assert!(matches!(outcome, Err(DirectoryError::MemberNotFound { .. })));
}

#[tokio::test]
async fn cleanup_removes_only_dead_and_old_rows() {
  let directory = directory();
  directory.initialize().await.expect("initialize");
  let cutoff = Utc::now();

  let dead_old = entry(4050, 1, MemberStatus::Dead, 0).with_i_am_alive_at(cutoff - Duration::minutes(10));
  let dead_fresh = entry(4051, 1, MemberStatus::Dead, 0).with_i_am_alive_at(cutoff + Duration::minutes(10));
  let active_old = entry(4052, 1, MemberStatus::Active, 0).with_i_am_alive_at(cutoff - Duration::minutes(10));
  for member in [&dead_old, &dead_fresh, &active_old] {
    insert(&directory, member).await;
  }

  assert_eq!(directory.cleanup_defunct_entries(cutoff).await, 1);

  let snapshot = directory.read_all().await;
  assert!(snapshot.get(&dead_old.identity).is_none());
  assert!(snapshot.get(&dead_fresh.identity).is_some());
  assert!(snapshot.get(&active_old.identity).is_some());
}

#[tokio::test]
async fn wipe_removes_members_and_version_row() {
  let directory = directory();
  directory.initialize().await.expect("initialize");
  insert(&directory, &entry(4050, 1, MemberStatus::Active, 0)).await;

  directory.delete_all_entries("testCluster").await;

  let snapshot = directory.read_all().await;
  assert!(snapshot.is_empty());
  assert!(snapshot.version.is_initial());
}

#[tokio::test]
async fn read_row_matches_the_exact_identity() {
  let directory = directory();
  directory.initialize().await.expect("initialize");
  let short_generation = entry(4050, 1, MemberStatus::Active, 0);
  let long_generation = entry(4050, 10, MemberStatus::Active, 0);
  insert(&directory, &short_generation).await;
  insert(&directory, &long_generation).await;

  let snapshot = directory.read_row(&short_generation.identity).await;
  assert_eq!(snapshot.len(), 1);
  assert_eq!(snapshot.members[0].entry.identity, short_generation.identity);
}

/// Store whose every call fails, for exercising the fail-closed paths.
struct FailingRowStore;

impl FailingRowStore {
  fn err() -> StoreError {
    StoreError::Unavailable(String::from("injected failure"))
  }
}

impl RowStore for FailingRowStore {
  fn read<'a>(&'a self, _key: &'a RowKey) -> BoxFuture<'a, Result<Option<StoredRow>, StoreError>> {
    Box::pin(async { Err(Self::err()) })
  }

  fn read_range<'a>(&'a self, _filter: &'a RowFilter) -> BoxFuture<'a, Result<Vec<StoredRow>, StoreError>> {
    Box::pin(async { Err(Self::err()) })
  }

  fn read_snapshot<'a>(
    &'a self,
    _filter: &'a RowFilter,
    _version_key: &'a RowKey,
  ) -> BoxFuture<'a, Result<(Vec<StoredRow>, Option<StoredRow>), StoreError>> {
    Box::pin(async { Err(Self::err()) })
  }

  fn write_all(&self, _writes: Vec<RowWrite>) -> BoxFuture<'_, Result<BatchOutcome, StoreError>> {
    Box::pin(async { Err(Self::err()) })
  }

  fn write(&self, _write: RowWrite) -> BoxFuture<'_, Result<WriteOutcome, StoreError>> {
    Box::pin(async { Err(Self::err()) })
  }

  fn delete<'a>(&'a self, _key: &'a RowKey, _condition: WriteCondition) -> BoxFuture<'a, Result<bool, StoreError>> {
    Box::pin(async { Err(Self::err()) })
  }

  fn delete_range<'a>(&'a self, _filter: &'a RowFilter) -> BoxFuture<'a, Result<u64, StoreError>> {
    Box::pin(async { Err(Self::err()) })
  }
}

#[tokio::test]
async fn reads_fail_closed_on_store_failure() {
  let directory = MembershipDirectory::new(Arc::new(FailingRowStore), ClusterConfig::new("testCluster"));

  let snapshot = directory.read_all().await;
  assert!(snapshot.is_empty());
  assert!(snapshot.version.is_initial());
}

#[tokio::test]
async fn heartbeat_and_cleanup_swallow_store_failures() {
  let directory = MembershipDirectory::new(Arc::new(FailingRowStore), ClusterConfig::new("testCluster"));

  directory.update_i_am_alive(&entry(4050, 1, MemberStatus::Active, 0)).await.expect("heartbeat");
  assert_eq!(directory.cleanup_defunct_entries(Utc::now()).await, 0);
}

#[tokio::test]
async fn initialization_and_cas_writes_propagate_store_failures() {
  let directory = MembershipDirectory::new(Arc::new(FailingRowStore), ClusterConfig::new("testCluster"));

  assert!(matches!(directory.initialize().await, Err(DirectoryError::Store(_))));
  let outcome = directory.insert_row(&entry(4050, 1, MemberStatus::Joining, 0), &TableVersion::initial()).await;
  assert!(matches!(outcome, Err(DirectoryError::Store(_))));
}
