//! First-run onboarding

use axum::{
    Extension, Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::budget::{ExpenseMap, validate_budget},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(complete_onboarding))
        .route("/status", get(onboarding_status))
}

#[derive(Debug, Deserialize)]
struct OnboardingRequest {
    income: f64,
    #[serde(default)]
    expenses: ExpenseMap,
}

async fn onboarding_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let completed = state
        .user_repository
        .onboarding_completed(user.id)
        .await
        .map_err(|e| ApiError::internal("Failed to read onboarding status", e))?;

    Ok(Json(json!({"onboarding_completed": completed})))
}

/// Save the first budget and flag the profile as onboarded
async fn complete_onboarding(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<OnboardingRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_budget(payload.income, &payload.expenses).map_err(ApiError::BadRequest)?;

    state
        .budget_repository
        .upsert(user.id, payload.income, &payload.expenses)
        .await
        .map_err(|e| ApiError::internal("Failed to save onboarding budget", e))?;

    state
        .user_repository
        .mark_onboarding_completed(user.id)
        .await
        .map_err(|e| ApiError::internal("Failed to update profile", e))?;

    Ok(Json(json!({"msg": "Onboarding completed"})))
}

#[cfg(test)]
mod tests {
    use crate::routes::tests::{access_token, send, test_state};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_negative_expense_is_rejected() {
        let state = test_state();
        let token = access_token(&state);

        let (status, body) = send(
            state,
            "POST",
            "/api/onboarding",
            Some(&token),
            json!({"income": 4000, "expenses": {"rent": -1}}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Expense 'rent' must be a non-negative number");
    }
}
