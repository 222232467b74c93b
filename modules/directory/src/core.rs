//! Domain types shared by the directory components.

mod etag;
mod gateway_endpoint;
mod member_status;
mod membership_entry;
mod membership_row;
mod membership_snapshot;
mod node_identity;
mod reminder_entry;
mod reminder_row;
mod ring_hash;
mod ring_range;
mod table_version;

pub use etag::Etag;
pub use gateway_endpoint::GatewayEndpoint;
pub use member_status::MemberStatus;
pub use membership_entry::MembershipEntry;
pub use membership_row::MembershipRow;
pub use membership_snapshot::MembershipSnapshot;
pub use node_identity::NodeIdentity;
pub use reminder_entry::ReminderEntry;
pub use reminder_row::ReminderRow;
pub use ring_hash::ring_hash;
pub use ring_range::RingRange;
pub use table_version::TableVersion;
