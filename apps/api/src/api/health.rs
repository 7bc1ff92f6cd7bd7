//! Application-specific readiness checks with a real database probe.

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use serde_json::json;

/// Readiness check endpoint that actually probes the database connection.
///
/// Uses the generic `run_health_checks` utility from axum-helpers to verify
/// all service dependencies are healthy.
pub async fn ready_handler(State(state): State<AppState>) -> impl IntoResponse {
    let checks: Vec<HealthCheckFuture> = vec![Box::pin(async move {
        let result = database::postgres::check_health(&state.db)
            .await
            .map_err(|e| e.to_string());
        ("database", result)
    })];

    match run_health_checks(checks).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(failures) => {
            let details: serde_json::Map<String, serde_json::Value> = failures
                .into_iter()
                .map(|(name, reason)| (name, serde_json::Value::String(reason)))
                .collect();

            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "not ready", "checks": details })),
            )
        }
    }
}
