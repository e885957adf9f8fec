//! Lesson catalogue and progress

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{
        content::{Difficulty, LessonDetail},
        progress::{ProgressRequest, ProgressResponse, ProgressStatus, ProgressTarget},
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_lessons))
        .route("/:id", get(get_lesson))
        .route("/:id/progress", post(record_lesson_progress))
}

async fn list_lessons(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let lessons = state
        .lesson_repository
        .list()
        .await
        .map_err(|e| ApiError::internal("Failed to list lessons", e))?;

    Ok(Json(lessons))
}

async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let lesson = state
        .lesson_repository
        .find(id)
        .await
        .map_err(|e| ApiError::internal("Failed to load lesson", e))?
        .ok_or_else(|| ApiError::NotFound("Lesson not found".to_string()))?;

    Ok(Json(LessonDetail::from(lesson)))
}

async fn record_lesson_progress(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProgressRequest>,
) -> ApiResult<impl IntoResponse> {
    let status = parse_status(&payload)?;

    let lesson = state
        .lesson_repository
        .find(id)
        .await
        .map_err(|e| ApiError::internal("Failed to load lesson", e))?
        .ok_or_else(|| ApiError::NotFound("Lesson not found".to_string()))?;

    let response = save_progress(
        &state,
        &user,
        ProgressTarget::Lesson(lesson.id),
        Difficulty::from_db(&lesson.difficulty),
        status,
    )
    .await?;

    Ok(Json(response))
}

pub(super) fn parse_status(payload: &ProgressRequest) -> ApiResult<ProgressStatus> {
    ProgressStatus::parse(&payload.status).ok_or_else(|| {
        ApiError::BadRequest("Status must be 'completed' or 'in_progress'".to_string())
    })
}

/// Award points for `target` and append the progress row
///
/// Repeat completions are recorded but credited with 0 points.
pub(super) async fn save_progress(
    state: &AppState,
    user: &AuthUser,
    target: ProgressTarget,
    difficulty: Difficulty,
    status: ProgressStatus,
) -> ApiResult<ProgressResponse> {
    let points = state.catalog.points.points_for(target, difficulty, status);

    let points_earned = state
        .progress_repository
        .record(user.id, target, status, points)
        .await
        .map_err(|e| ApiError::internal("Failed to record progress", e))?;

    Ok(ProgressResponse {
        msg: "Progress saved".to_string(),
        status,
        points_earned,
    })
}
