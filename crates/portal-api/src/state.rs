//! Shared application state handed to every handler

use std::sync::Arc;

use sqlx::PgPool;

use portal_core::repositories::{PreferenceRepository, TopicRepository, UserRepository};
use portal_core::services::{AuthService, NavigationService, TopicService};
use portal_security::{JwtService, LoginRateLimiter};

#[derive(Clone)]
pub struct AppState {
    pub topics: Arc<TopicService<dyn TopicRepository>>,
    pub navigation: Arc<NavigationService<dyn PreferenceRepository>>,
    pub auth: Arc<AuthService<dyn UserRepository>>,
    pub jwt: JwtService,
    pub login_limiter: Arc<LoginRateLimiter>,
    /// Pinged by the readiness probe; absent when running without a database
    pub db: Option<PgPool>,
}

impl AppState {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        topic_repo: Arc<dyn TopicRepository>,
        preference_repo: Arc<dyn PreferenceRepository>,
        jwt: JwtService,
        login_limiter: Arc<LoginRateLimiter>,
    ) -> Self {
        Self {
            topics: Arc::new(TopicService::new(topic_repo)),
            navigation: Arc::new(NavigationService::new(preference_repo)),
            auth: Arc::new(AuthService::new(user_repo, jwt.clone())),
            jwt,
            login_limiter,
            db: None,
        }
    }

    pub fn with_database(mut self, pool: PgPool) -> Self {
        self.db = Some(pool);
        self
    }
}
