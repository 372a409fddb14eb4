// src/services/fetch.rs

//! Voyage page fetching.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ExternalVoyageRef, ScraperConfig};
use crate::utils::{http, voyage_url};

/// Source of raw voyage pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the raw page for one voyage.
    ///
    /// Timeouts, network errors and non-success statuses are all `Err`.
    async fn fetch(&self, reference: &ExternalVoyageRef) -> Result<String>;
}

/// Fetches voyage pages from the booking site over HTTP.
///
/// One GET per call, no retries.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    /// Create a fetcher with a client built from the scraper settings.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = http::create_async_client(config)?;
        Self::with_client(client, &config.base_url)
    }

    /// Create a fetcher around an existing client.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn url_for(&self, reference: &ExternalVoyageRef) -> Result<Url> {
        voyage_url(&self.base_url, reference)
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch(&self, reference: &ExternalVoyageRef) -> Result<String> {
        let url = self.url_for(reference)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::fetch(reference.to_string(), describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(
                reference.to_string(),
                format!("HTTP {}", status.as_u16()),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::fetch(reference.to_string(), describe(&e)))
    }
}

fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else {
        error.to_string()
    }
}
