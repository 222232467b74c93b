//! Directory components built on a [`crate::store::RowStore`].

mod cluster_config;
mod directory_error;
mod gateway_view;
mod gateway_view_config;
mod membership_directory;
mod reminder_catalog;

pub use cluster_config::ClusterConfig;
pub use directory_error::DirectoryError;
pub use gateway_view::GatewayView;
pub use gateway_view_config::GatewayViewConfig;
pub use membership_directory::MembershipDirectory;
pub use reminder_catalog::ReminderCatalog;
