// src/lambda/mod.rs

//! AWS Lambda handler for the scrape trigger.
//!
//! This module provides the Lambda function entry point that:
//! 1. Checks the shared secret (query `secret` or bearer token)
//! 2. Loads the current snapshot from S3
//! 3. Scrapes every voyage in batches
//! 4. Writes the merged snapshot back to S3 when anything changed

use std::collections::HashMap;

use chrono::Utc;
use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::auth::TriggerAuth;
use crate::error::Result;
use crate::models::Config;
use crate::pipeline::run_scrape;
use crate::services::{RunOptions, RunSummary};
use crate::storage::s3::S3Storage;

/// Lambda invocation payload.
///
/// Accepts both scheduled invocations (no fields) and HTTP events from a
/// function URL or API Gateway.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRequest {
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,

    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,

    /// Log per-voyage progress at info level
    #[serde(default)]
    pub verbose: bool,

    /// Scrape without writing to S3
    #[serde(default)]
    pub dry_run: bool,
}

impl TriggerRequest {
    fn query_secret(&self) -> Option<&str> {
        self.query_string_parameters
            .as_ref()?
            .get("secret")
            .map(String::as_str)
    }

    fn authorization(&self) -> Option<&str> {
        self.headers
            .as_ref()?
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
            .map(|(_, value)| value.as_str())
    }
}

/// Lambda response payload.
#[derive(Debug, Default, Serialize)]
pub struct TriggerResponse {
    /// Whether the run completed
    pub success: bool,

    /// Whether any voyage was updated
    pub updated: bool,

    /// Number of voyages updated
    pub updated_count: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Error message if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Completion time, ISO 8601
    pub timestamp: String,

    /// Execution time in milliseconds
    pub execution_time_ms: u64,
}

impl TriggerResponse {
    fn from_summary(summary: &RunSummary) -> Self {
        Self {
            success: true,
            updated: summary.updated,
            updated_count: summary.updated_count,
            message: Some(summary.message.clone()),
            ..Default::default()
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

/// Main Lambda handler function.
#[instrument(skip(event))]
pub async fn handler(
    event: LambdaEvent<TriggerRequest>,
) -> std::result::Result<TriggerResponse, LambdaError> {
    let start = std::time::Instant::now();
    let (request, _context) = event.into_parts();

    let mut response = if !TriggerAuth::from_env()
        .is_authorized(request.query_secret(), request.authorization())
    {
        warn!("Rejected unauthorized scrape trigger");
        TriggerResponse::failure("Unauthorized")
    } else {
        info!(
            "Starting scrape: verbose={}, dry_run={}",
            request.verbose, request.dry_run
        );
        match run_trigger(&request).await {
            Ok(summary) => {
                info!("Scrape completed: {}", summary.message);
                TriggerResponse::from_summary(&summary)
            }
            Err(e) => {
                error!("Scrape failed: {}", e);
                TriggerResponse::failure(e.to_string())
            }
        }
    };

    response.timestamp = Utc::now().to_rfc3339();
    response.execution_time_ms = start.elapsed().as_millis() as u64;
    Ok(response)
}

/// Internal scrape logic.
async fn run_trigger(request: &TriggerRequest) -> Result<RunSummary> {
    let mut config = Config::default();
    config.apply_env();
    config.validate()?;

    let storage = S3Storage::from_env(&config.storage.snapshot_file).await?;
    let options = RunOptions {
        verbose: request.verbose,
        persist: !request.dry_run,
    };

    run_scrape(&config, &storage, options).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_request_defaults() {
        let req: TriggerRequest = serde_json::from_str("{}").unwrap();
        assert!(!req.verbose);
        assert!(!req.dry_run);
        assert!(req.query_secret().is_none());
        assert!(req.authorization().is_none());
    }

    #[test]
    fn test_trigger_request_from_http_event() {
        let json = r#"{
            "rawPath": "/",
            "queryStringParameters": {"secret": "abc"},
            "headers": {"Authorization": "Bearer xyz", "host": "example.lambda-url.aws"}
        }"#;
        let req: TriggerRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.query_secret(), Some("abc"));
        assert_eq!(req.authorization(), Some("Bearer xyz"));
    }

    #[test]
    fn test_failure_response_shape() {
        let value = serde_json::to_value(TriggerResponse::failure("Unauthorized")).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Unauthorized");
        assert!(value.get("message").is_none());
    }
}
