use axum::{Json, Router, extract::State, routing::get};
use core_config::AppInfo;
use serde::Serialize;
use std::pin::Pin;
use utoipa::ToSchema;

/// Health check response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status, "ok" when the process is up.
    #[schema(example = "ok")]
    pub status: String,
    /// Service name.
    #[schema(example = "catalog_api")]
    pub name: String,
    /// Service version from Cargo.toml.
    #[schema(example = "0.1.0")]
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = OK, description = "Service is alive", body = HealthResponse)
    )
)]
async fn health_handler(State(info): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        name: info.name.to_string(),
        version: info.version.to_string(),
    })
}

/// Router exposing the liveness endpoint at `/health`.
///
/// Liveness only reports that the process is running; readiness checks that
/// probe dependencies belong in an app-level `/ready` handler built on
/// [`run_health_checks`].
pub fn health_router(info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(info)
}

/// A named dependency probe used by readiness handlers.
pub type HealthCheckFuture =
    Pin<Box<dyn Future<Output = (&'static str, Result<(), String>)> + Send>>;

/// Runs dependency probes and collects the failures.
///
/// Returns `Ok(())` when every probe passed, otherwise the list of
/// `(name, reason)` pairs for the ones that failed. Probes run sequentially;
/// readiness is not latency sensitive.
pub async fn run_health_checks(checks: Vec<HealthCheckFuture>) -> Result<(), Vec<(String, String)>> {
    let mut failures = Vec::new();

    for check in checks {
        let (name, result) = check.await;
        if let Err(reason) = result {
            failures.push((name.to_string(), reason));
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = health_router(AppInfo {
            name: "test_service",
            version: "1.2.3",
        });

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["name"], "test_service");
        assert_eq!(parsed["version"], "1.2.3");
    }

    #[tokio::test]
    async fn test_run_health_checks_all_pass() {
        let checks: Vec<HealthCheckFuture> = vec![
            Box::pin(async { ("postgres", Ok(())) }),
            Box::pin(async { ("cache", Ok(())) }),
        ];

        assert!(run_health_checks(checks).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_health_checks_reports_failures() {
        let checks: Vec<HealthCheckFuture> = vec![
            Box::pin(async { ("postgres", Err("connection refused".to_string())) }),
            Box::pin(async { ("cache", Ok(())) }),
        ];

        let failures = run_health_checks(checks).await.unwrap_err();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "postgres");
        assert_eq!(failures[0].1, "connection refused");
    }
}
