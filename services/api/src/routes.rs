//! API service routes

use axum::{
    Json, Router,
    extract::State,
    middleware,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::{error::ApiResult, middleware::auth_middleware, state::AppState};

mod analytics;
mod challenges;
mod chatbot;
mod dashboard;
mod gamification;
mod lessons;
mod onboarding;
mod profile;
mod scenarios;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .nest("/api/profile", profile::router())
        .nest("/api/onboarding", onboarding::router())
        .nest("/api/dashboard", dashboard::router())
        .nest("/api/lessons", lessons::router())
        .nest("/api/challenges", challenges::router())
        .nest("/api/gamification", gamification::router())
        .nest("/api/analytics", analytics::router())
        .nest("/api/scenarios", scenarios::router())
        .nest("/api/chatbot", chatbot::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "msg": "FinEd API is running"
    }))
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let database = common::database::health_check(&state.db_pool).await?;
    let status = if database { "ok" } else { "degraded" };

    Ok(Json(json!({
        "status": status,
        "service": "api-service",
        "database": database
    })))
}
