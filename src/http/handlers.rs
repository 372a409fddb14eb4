//! HTTP handlers for the availability API.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;

use super::state::AppState;
use crate::pipeline::run_scrape;
use crate::services::RunOptions;

/// Cache lifetime of the read endpoint, in seconds.
pub const AVAILABILITY_MAX_AGE: u32 = 900;

/// GET /health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/availability
///
/// Latest snapshot, or the bundled one when storage is unavailable.
/// Never fails.
pub async fn get_availability(State(state): State<AppState>) -> Response {
    let snapshot = state.reader.read().await;
    (
        [(
            header::CACHE_CONTROL,
            format!("public, max-age={AVAILABILITY_MAX_AGE}"),
        )],
        Json(snapshot),
    )
        .into_response()
}

/// GET /api/cron/scrape-availability
///
/// Runs a scrape and persists the result. Requires the shared secret when
/// one is configured.
pub async fn scrape_availability(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let query_secret = params.get("secret").map(String::as_str);

    if !state.auth.is_authorized(query_secret, authorization) {
        log::warn!("Rejected unauthorized scrape trigger");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        )
            .into_response();
    }

    let options = RunOptions {
        verbose: true,
        persist: true,
    };

    match run_scrape(&state.config, state.store.as_ref(), options).await {
        Ok(summary) => Json(json!({
            "success": true,
            "updated": summary.updated,
            "message": summary.message,
            "timestamp": Utc::now().to_rfc3339(),
        }))
        .into_response(),
        Err(e) => {
            log::error!("Scraper error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": e.to_string(),
                    "timestamp": Utc::now().to_rfc3339(),
                })),
            )
                .into_response()
        }
    }
}
