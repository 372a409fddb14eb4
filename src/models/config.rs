//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{VoyageEntry, VoyageRegistry};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and extraction behavior settings
    #[serde(default)]
    pub scraper: ScraperConfig,

    /// Snapshot persistence settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Registry override; the built-in voyage table is used when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub voyages: Vec<VoyageEntry>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply overrides from environment variables.
    ///
    /// Used by the Lambda entry point, where no config file is shipped.
    pub fn apply_env(&mut self) {
        if let Some(secs) = env_parse("SCRAPE_TIMEOUT_SECS") {
            self.scraper.timeout_secs = secs;
        }
        if let Some(size) = env_parse("BATCH_SIZE") {
            self.scraper.batch_size = size;
        }
        if let Ok(strategy) = std::env::var("EXTRACT_STRATEGY") {
            match strategy.parse() {
                Ok(strategy) => self.scraper.strategy = strategy,
                Err(e) => log::warn!("Ignoring EXTRACT_STRATEGY: {}", e),
            }
        }
    }

    /// Voyage registry for this configuration.
    pub fn registry(&self) -> Result<VoyageRegistry> {
        if self.voyages.is_empty() {
            Ok(VoyageRegistry::default())
        } else {
            VoyageRegistry::new(self.voyages.clone())
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.scraper.user_agent.trim().is_empty() {
            return Err(AppError::validation("scraper.user_agent is empty"));
        }
        if self.scraper.timeout_secs == 0 {
            return Err(AppError::validation("scraper.timeout_secs must be > 0"));
        }
        if self.scraper.batch_size == 0 {
            return Err(AppError::validation("scraper.batch_size must be > 0"));
        }
        if self.storage.snapshot_file.trim().is_empty() {
            return Err(AppError::validation("storage.snapshot_file is empty"));
        }
        let base = url::Url::parse(&self.scraper.base_url)?;
        if !base.path().ends_with('/') {
            return Err(AppError::validation(
                "scraper.base_url must end with '/'",
            ));
        }
        self.registry()?;
        Ok(())
    }
}

/// HTTP client and extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Voyage pages live at `{base_url}{reference}/`
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Accept header for HTTP requests
    #[serde(default = "defaults::accept")]
    pub accept: String,

    /// Accept-Language header; the booking site is Japanese
    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Voyages fetched concurrently per batch
    #[serde(default = "defaults::batch_size")]
    pub batch_size: usize,

    /// Extraction strategy for the whole run
    #[serde(default)]
    pub strategy: ExtractStrategy,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            accept: defaults::accept(),
            accept_language: defaults::accept_language(),
            timeout_secs: defaults::timeout(),
            batch_size: defaults::batch_size(),
            strategy: ExtractStrategy::default(),
        }
    }
}

/// How availability is read out of a voyage page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractStrategy {
    /// Parse the embedded plan data JSON
    #[default]
    Structured,
    /// Scan the page for availability glyphs (deprecated)
    Glyph,
}

impl std::str::FromStr for ExtractStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "structured" => Ok(Self::Structured),
            "glyph" => Ok(Self::Glyph),
            other => Err(AppError::config(format!(
                "unknown extraction strategy '{other}'"
            ))),
        }
    }
}

/// Snapshot persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File (or object) name of the snapshot
    #[serde(default = "defaults::snapshot_file")]
    pub snapshot_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_file: defaults::snapshot_file(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

mod defaults {
    pub fn base_url() -> String {
        "https://plan.asukacruise.co.jp/asuka3/".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; VoyageJapan/1.0)".into()
    }
    pub fn accept() -> String {
        "text/html".into()
    }
    pub fn accept_language() -> String {
        "ja,en;q=0.9".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn batch_size() -> usize {
        10
    }
    pub fn snapshot_file() -> String {
        "availability.json".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.scraper.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_batch_size() {
        let mut config = Config::default();
        config.scraper.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_base_url_without_trailing_slash() {
        let mut config = Config::default();
        config.scraper.base_url = "https://plan.asukacruise.co.jp/asuka3".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [scraper]
            strategy = "glyph"
            batch_size = 4

            [[voyages]]
            slug = "winter-test"
            reference = "A3-2612"
            "#,
        )
        .unwrap();
        assert_eq!(config.scraper.strategy, ExtractStrategy::Glyph);
        assert_eq!(config.scraper.batch_size, 4);
        assert_eq!(config.scraper.timeout_secs, 10);
        assert_eq!(config.registry().unwrap().len(), 1);
    }

    #[test]
    fn empty_voyages_uses_builtin_registry() {
        let config = Config::default();
        assert_eq!(config.registry().unwrap().len(), 38);
    }

    #[test]
    fn strategy_from_str() {
        assert_eq!("Glyph".parse::<ExtractStrategy>().unwrap(), ExtractStrategy::Glyph);
        assert!("regex".parse::<ExtractStrategy>().is_err());
    }
}
