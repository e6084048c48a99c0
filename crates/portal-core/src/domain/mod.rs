//! # Portal Core - Domain Module
//! 
//! Domain entities for the admin portal.

pub mod topic;
pub mod navigation;
pub mod catalog;
pub mod user;

// Re-export all entities and enums
pub use topic::{TopicDraft, TopicNode, TopicRow};
pub use navigation::{NavigationEntry, NavigationLayout, SavedNavigationEntry};
pub use catalog::default_catalog;
pub use user::{User, UserRole};
