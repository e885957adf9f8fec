//! Advisor chat

use axum::{Extension, Json, Router, extract::State, response::IntoResponse, routing::post};

use crate::{
    advisor::{AdviceContext, ChatRequest},
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::budget::BudgetSummary,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}

async fn chat(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ChatRequest>,
) -> ApiResult<impl IntoResponse> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message is required".to_string()));
    }

    let (budget, goals) = tokio::try_join!(
        state.budget_repository.latest_for_user(user.id),
        state.goal_repository.list_active(user.id),
    )
    .map_err(|e| ApiError::internal("Failed to load advisor context", e))?;

    let context = AdviceContext {
        budget: budget.map(BudgetSummary::from).unwrap_or_default(),
        goals,
    };

    let advice = state
        .advisor
        .advise(message, &context)
        .await
        .map_err(|e| ApiError::internal("Advisor failed", e))?;

    Ok(Json(advice))
}

#[cfg(test)]
mod tests {
    use crate::routes::tests::{access_token, send, test_state};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let state = test_state();
        let token = access_token(&state);

        let (status, body) = send(
            state,
            "POST",
            "/api/chatbot/chat",
            Some(&token),
            json!({"message": "   "}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message is required");
    }
}
