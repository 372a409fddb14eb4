//! Router configuration for the HTTP API.

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    // The read endpoint is public and consumed by the site's pages
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/availability", get(handlers::get_availability))
        .route(
            "/api/cron/scrape-availability",
            get(handlers::scrape_availability),
        )
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::auth::TriggerAuth;
    use crate::models::{Config, Snapshot};
    use crate::storage::LocalStorage;

    fn state(dir: &TempDir, secret: Option<&str>) -> AppState {
        AppState::new(
            Config::default(),
            Arc::new(LocalStorage::new(dir.path())),
            TriggerAuth::new(secret.map(str::to_string)),
        )
    }

    #[tokio::test]
    async fn test_availability_serves_bundled_with_cache_header() {
        let tmp = TempDir::new().unwrap();
        let app = create_router(state(&tmp, None));

        let response = app
            .oneshot(Request::get("/api/availability").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=900"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(Snapshot::from_json(&bytes).unwrap(), Snapshot::bundled());
    }

    #[tokio::test]
    async fn test_trigger_rejects_missing_secret() {
        let tmp = TempDir::new().unwrap();
        let app = create_router(state(&tmp, Some("s3cret")));

        let response = app
            .oneshot(
                Request::get("/api/cron/scrape-availability")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!tmp.path().join("availability.json").exists());
    }
}
