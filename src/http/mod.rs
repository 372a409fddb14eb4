//! HTTP surface: the public read endpoint and the scrape trigger.
//!
//! - `GET /api/availability`: current snapshot, cacheable for 15 minutes
//! - `GET /api/cron/scrape-availability`: run a scrape (shared secret)
//! - `GET /health`

mod handlers;
mod router;
mod state;

pub use router::create_router;
pub use state::AppState;
