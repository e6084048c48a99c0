//! Domain services (business logic)

pub mod auth_service;
pub mod topic_service;
pub mod navigation_service;

pub use auth_service::{AuthService, LoginResult, UserInfo};
pub use topic_service::TopicService;
pub use navigation_service::NavigationService;
