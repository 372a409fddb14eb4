// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::{Config, Snapshot};

/// Validate configuration, registry and the bundled snapshot.
pub fn run_validate(config: &Config) -> Result<()> {
    log::info!("Validating configuration...");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let registry = config.registry()?;
    log::info!("✓ Config OK");
    log::info!("    User agent: {}", config.scraper.user_agent);
    log::info!("    Timeout: {}s", config.scraper.timeout_secs);
    log::info!("    Batch size: {}", config.scraper.batch_size);
    log::info!("    Strategy: {:?}", config.scraper.strategy);
    log::info!("    Voyages: {}", registry.len());

    let bundled = Snapshot::bundled();
    let missing: Vec<_> = registry
        .iter()
        .filter(|entry| bundled.voyage(&entry.slug).is_none())
        .map(|entry| entry.slug.as_str())
        .collect();
    if missing.is_empty() {
        log::info!("✓ Bundled snapshot covers every voyage");
    } else {
        log::warn!(
            "Bundled snapshot has no data for {} voyage(s): {}",
            missing.len(),
            missing.join(", ")
        );
    }

    Ok(())
}
