//! PostgreSQL repository implementations

pub mod user_repo_impl;
pub mod topic_repo_impl;
pub mod preference_repo_impl;

pub use user_repo_impl::PgUserRepository;
pub use topic_repo_impl::PgTopicRepository;
pub use preference_repo_impl::PgPreferenceRepository;
