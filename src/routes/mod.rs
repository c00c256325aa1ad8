//! HTTP routes
//! 
//! `create_router` assembles the whole API. Everything under `/api` except
//! registration and login sits behind the JWT middleware.

pub mod auth_routes;
pub mod event_routes;
pub mod job_routes;
pub mod log_routes;
pub mod user_routes;
pub mod vehicle_routes;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::auth::auth_middleware;
use crate::middleware::cors::cors_layer;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/auth/me", get(auth_routes::me))
        .nest("/api/users", user_routes::create_user_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/jobs", job_routes::create_job_router())
        .nest("/api/logs", log_routes::create_log_router())
        .nest("/api/events", event_routes::create_event_router())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes::create_auth_router())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "logitrack",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
