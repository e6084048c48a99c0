//! Repository traits (ports)

pub mod user_repository;
pub mod topic_repository;
pub mod preference_repository;

pub use user_repository::UserRepository;
pub use topic_repository::TopicRepository;
pub use preference_repository::PreferenceRepository;

#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use topic_repository::MockTopicRepository;
#[cfg(test)]
pub use preference_repository::MockPreferenceRepository;
