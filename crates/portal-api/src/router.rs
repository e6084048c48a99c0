// ============================================================================
// Portal API - Router
// File: crates/portal-api/src/router.rs
// ============================================================================

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::warn;

use crate::handlers::{auth, health, navigation, topics};
use crate::middleware::login_rate_limit;
use crate::state::AppState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route(
            "/api/v1/auth/login",
            post(auth::login).layer(middleware::from_fn_with_state(state.clone(), login_rate_limit)),
        );

    // Bearer-protected routes
    let protected_routes = Router::new()
        .route("/api/v1/auth/me", get(auth::me))
        .route("/api/v1/topics/tree", get(topics::topic_tree))
        .route("/api/v1/topics", post(topics::create_topic))
        .route(
            "/api/v1/navigation",
            get(navigation::get_navigation)
                .put(navigation::save_navigation)
                .delete(navigation::reset_navigation),
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(cors_layer(cors_origin))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Invalid CORS origin '{}', cross-origin requests disabled", origin);
            layer
        }
    }
}
