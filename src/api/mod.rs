mod handlers;
pub use handlers::ErrorResponse;
pub mod middleware;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::db::Database;
use crate::service::InsightService;
use middleware::{rate_limit_middleware, SecurityConfig};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub insights: InsightService,
}

impl AppState {
    pub fn new(db: Database, insights: InsightService) -> Self {
        Self { db, insights }
    }
}

/// Router with rate limiting and CORS disabled (local use and tests).
pub fn create_router(state: AppState) -> Router {
    create_router_with_security(state, SecurityConfig::disabled())
}

pub fn create_router_with_security(state: AppState, security: SecurityConfig) -> Router {
    let mut insights = Router::new().route("/insights", post(handlers::generate_insights));
    if let Some(limiter) = security.rate_limiter.clone() {
        insights = insights.layer(from_fn_with_state(limiter, rate_limit_middleware));
    }

    let api = Router::new()
        .merge(insights)
        // History
        .route(
            "/history",
            get(handlers::list_history)
                .post(handlers::save_history)
                .delete(handlers::clear_history),
        )
        // Health
        .route("/health", get(handlers::health));

    let cors = match &security.cors_origins {
        Some(origins) => CorsLayer::new()
            .allow_origin(AllowOrigin::list(
                origins.iter().filter_map(|o| o.parse().ok()),
            ))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
        None => CorsLayer::permissive(),
    };

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
