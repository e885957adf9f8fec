//! Savings simulator and calculators

use axum::{Json, Router, response::IntoResponse, routing::post};

use crate::{
    error::{ApiError, ApiResult},
    models::scenario::{InvestmentRequest, LoanRequest, SimulationRequest},
    simulation,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/simulate", post(simulate))
        .route("/loan", post(loan))
        .route("/investment", post(investment))
}

async fn simulate(Json(payload): Json<SimulationRequest>) -> ApiResult<impl IntoResponse> {
    let response = simulation::simulate(payload).map_err(ApiError::BadRequest)?;

    Ok(Json(response))
}

async fn loan(Json(payload): Json<LoanRequest>) -> ApiResult<impl IntoResponse> {
    let response = simulation::quote_loan(&payload).map_err(ApiError::BadRequest)?;

    Ok(Json(response))
}

async fn investment(Json(payload): Json<InvestmentRequest>) -> ApiResult<impl IntoResponse> {
    let response = simulation::project_investment(&payload).map_err(ApiError::BadRequest)?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use crate::routes::tests::{access_token, send, test_state};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_simulate_with_defaults() {
        let state = test_state();
        let token = access_token(&state);

        let (status, body) = send(
            state,
            "POST",
            "/api/scenarios/simulate",
            Some(&token),
            json!({"currentSavings": "1000", "monthlyContribution": 0, "annualReturn": 0, "years": 3}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["finalAmount"], 1000.0);
        assert_eq!(
            body["message"],
            "After 3 years, your savings could be worth R 1000.00."
        );
    }

    #[tokio::test]
    async fn test_simulate_rejects_bad_input() {
        let state = test_state();
        let token = access_token(&state);

        let (status, body) = send(
            state.clone(),
            "POST",
            "/api/scenarios/simulate",
            Some(&token),
            json!({"years": "forever"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "years must be a number");

        let (status, _) = send(
            state,
            "POST",
            "/api/scenarios/simulate",
            Some(&token),
            json!({"years": 250}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_simulate_rejects_unrepresentable_result() {
        let state = test_state();
        let token = access_token(&state);

        let (status, body) = send(
            state,
            "POST",
            "/api/scenarios/simulate",
            Some(&token),
            json!({"currentSavings": 1000, "annualReturn": 1e300, "years": 100}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Inputs produce a result too large to represent");
    }

    #[tokio::test]
    async fn test_loan_and_investment() {
        let state = test_state();
        let token = access_token(&state);

        let (status, body) = send(
            state.clone(),
            "POST",
            "/api/scenarios/loan",
            Some(&token),
            json!({"principal": 12000, "annualRate": 0, "years": 1}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["monthlyPayment"], 1000.0);

        let (status, body) = send(
            state,
            "POST",
            "/api/scenarios/investment",
            Some(&token),
            json!({"principal": 1000, "annualRate": 0.12, "years": 1, "compoundsPerYear": 1}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!((body["futureValue"].as_f64().unwrap() - 1120.0).abs() < 1e-9);
    }
}
