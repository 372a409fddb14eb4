//! Pipeline entry points for scraper operations.
//!
//! - `run_scrape`: Fetch all voyages and merge into the snapshot
//! - `run_validate`: Check configuration and bundled data

pub mod scrape;
pub mod validate;

pub use scrape::run_scrape;
pub use validate::run_validate;
