//! # Portal Core
//! 
//! Domain entities, tree reconciliation, services, and repository traits for the admin portal.

pub mod domain;
pub mod topic_tree;
pub mod navigation_layout;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
pub use navigation_layout::{apply_layout, apply_saved, serialize_layout, visible_subset};
pub use topic_tree::build_topic_tree;
