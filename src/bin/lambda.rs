//! AWS Lambda entry point for the availability scraper
//!
//! Deploy with `cargo lambda build --release --features lambda`.
//! Schedule it with EventBridge or expose it through a function URL.

use lambda_runtime::{Error as LambdaError, service_fn};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Availability Lambda starting...");
    lambda_runtime::run(service_fn(availability::lambda::handler)).await
}
