// src/config.rs
// =============================================================================
// Run configuration.
//
// The defaults cover the store's collection listings: 540 items fetched as
// five pages (4 x 120 + 60), ten requests at a time.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::error::{Result, ScrapeError};

pub const DEFAULT_ORIGIN: &str = "https://play.google.com";
pub const DEFAULT_TOTAL: usize = 540;
pub const DEFAULT_PAGE_SIZE: usize = 120;
pub const DEFAULT_CONCURRENCY: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub collection_url: String,
    pub output_path: PathBuf,
    /// Base used to resolve the relative app links found on listing pages.
    pub origin: String,
    pub total_estimate: usize,
    pub page_size: usize,
    /// Batch size for the detail-fetch and write stages.
    pub concurrency: usize,
    /// Maximum number of requests in flight at once.
    pub workers: usize,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl PipelineConfig {
    pub fn new(collection_url: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        PipelineConfig {
            collection_url: collection_url.into(),
            output_path: output_path.into(),
            origin: DEFAULT_ORIGIN.to_string(),
            total_estimate: DEFAULT_TOTAL,
            page_size: DEFAULT_PAGE_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
            workers: DEFAULT_CONCURRENCY,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Checks the numbers and returns the parsed origin.
    pub fn validate(&self) -> Result<Url> {
        if self.page_size == 0 {
            return Err(ScrapeError::Configuration("page size must be greater than zero".into()));
        }
        if self.concurrency == 0 {
            return Err(ScrapeError::Configuration("concurrency must be greater than zero".into()));
        }
        if self.workers == 0 {
            return Err(ScrapeError::Configuration("worker count must be greater than zero".into()));
        }
        if self.collection_url.trim().is_empty() {
            return Err(ScrapeError::Configuration("collection URL is empty".into()));
        }

        Url::parse(&self.origin)
            .map_err(|e| ScrapeError::Configuration(format!("invalid origin '{}': {}", self.origin, e)))
    }
}
