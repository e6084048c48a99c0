//! Request and response payloads

pub mod auth;
pub mod navigation;
pub mod topics;

pub use auth::{LoginRequest, LoginResponse, UserDto};
pub use navigation::{NavigationResponse, SaveNavigationRequest, SavedEntryDto};
pub use topics::{CreateTopicRequest, TopicTreeQuery};
