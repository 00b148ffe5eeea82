//! Axum router for the keep-alive endpoint.
//!
//! `GET /` answers with a plain liveness line; `GET /health` reports the
//! responder's mode, uptime and block count as JSON.

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the keep-alive router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - `<name> awake. <UTC timestamp>`
async fn liveness(State(state): State<AppState>) -> String {
    format!(
        "{} awake. {}",
        state.config.name,
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// GET /health - Mode, uptime and block count.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    let report = state.status();
    axum::Json(serde_json::json!({
        "status": "ok",
        "mode": report.mode,
        "uptime_secs": report.uptime_secs,
        "blocked_count": report.blocked_count,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use batbot_types::config::PersonaConfig;
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::init(PersonaConfig::default(), None).unwrap()
    }

    async fn get_body(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_root_reports_awake() {
        let (status, body) = get_body(build_router(state()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("Batman awake. "));
        assert!(body.ends_with(" UTC"));
    }

    #[tokio::test]
    async fn test_health_reports_mode_and_blocks() {
        let state = state();
        state.mode.activate(state.awaken_window());

        let (status, body) = get_body(build_router(state), "/health").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["mode"], "awakened");
        assert_eq!(json["blocked_count"], 0);
        assert!(json["uptime_secs"].is_u64());
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let (status, _) = get_body(build_router(state()), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
