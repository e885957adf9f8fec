//! Challenge catalogue and progress

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use super::lessons::{parse_status, save_progress};
use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{
        content::Difficulty,
        progress::{ProgressRequest, ProgressTarget},
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_challenges))
        .route("/:id", get(get_challenge))
        .route("/:id/progress", post(record_challenge_progress))
}

async fn list_challenges(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let challenges = state
        .challenge_repository
        .list()
        .await
        .map_err(|e| ApiError::internal("Failed to list challenges", e))?;

    Ok(Json(challenges))
}

async fn get_challenge(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let challenge = state
        .challenge_repository
        .find(id)
        .await
        .map_err(|e| ApiError::internal("Failed to load challenge", e))?
        .ok_or_else(|| ApiError::NotFound("Challenge not found".to_string()))?;

    Ok(Json(challenge))
}

async fn record_challenge_progress(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProgressRequest>,
) -> ApiResult<impl IntoResponse> {
    let status = parse_status(&payload)?;

    let challenge = state
        .challenge_repository
        .find(id)
        .await
        .map_err(|e| ApiError::internal("Failed to load challenge", e))?
        .ok_or_else(|| ApiError::NotFound("Challenge not found".to_string()))?;

    let response = save_progress(
        &state,
        &user,
        ProgressTarget::Challenge(challenge.id),
        Difficulty::from_db(&challenge.difficulty),
        status,
    )
    .await?;

    Ok(Json(response))
}
