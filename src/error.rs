// src/error.rs
// =============================================================================
// Typed errors for every stage of the pipeline.
//
// Each variant names the stage that failed so the user can tell where a run
// stopped:
// - Configuration: bad pagination/concurrency parameters or origin URL
// - Fetch: the transport failed or the server answered with a non-2xx status
// - Parse: a payload could not be decoded as markup
// - Extraction: a required field (the contact email) is missing
// - Output: the CSV sink could not be written
//
// The binary wraps these in anyhow at the top level; inside the pipeline we
// keep them typed so main can pick an exit code.
// =============================================================================

use thiserror::Error;

/// Errors that can abort a scrape run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("could not parse markup from {source_url}: {reason}")]
    Parse { source_url: String, reason: String },

    #[error("extraction failed for {app}: {reason}")]
    Extraction { app: String, reason: String },

    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScrapeError {
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        ScrapeError::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// True when the error comes from bad input rather than a failed run.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ScrapeError::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
