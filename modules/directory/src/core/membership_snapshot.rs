//! Consistent view of the membership directory.


use super::{MembershipRow, NodeIdentity, TableVersion};

/// Member rows paired with the table version they were read under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipSnapshot {
  /// Member rows, each with its own etag.
  pub members: Vec<MembershipRow>,
  /// Table version observed with the rows.
  pub version: TableVersion,
}

impl MembershipSnapshot {
  /// Creates a snapshot.
  #[must_use]
  pub const fn new(members: Vec<MembershipRow>, version: TableVersion) -> Self {
    Self { members, version }
  }

  /// Returns the fail-closed default: no members, sentinel version.
  #[must_use]
  pub fn empty() -> Self {
    Self { members: Vec::new(), version: TableVersion::initial() }
  }

  /// Looks up the row for one node.
  #[must_use]
  pub fn get(&self, identity: &NodeIdentity) -> Option<&MembershipRow> {
    self.members.iter().find(|row| row.entry.identity == *identity)
  }

  /// Returns the number of member rows.
  #[must_use]
  pub fn len(&self) -> usize {
    self.members.len()
  }

  /// Returns true when the snapshot holds no members.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.members.is_empty()
  }
}

impl Default for MembershipSnapshot {
  fn default() -> Self {
    Self::empty()
  }
}
