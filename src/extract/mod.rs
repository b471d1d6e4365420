// src/extract/mod.rs
// =============================================================================
// Pure extraction over parsed markup. Nothing in here does I/O.
//
// Submodules:
// - links: finds app tiles on a listing page
// - contact: finds the developer email on a detail page
//
// parse_markup() is the only entry that can fail before extraction even
// starts: it rejects payloads that are not UTF-8.
// =============================================================================

mod contact;
mod links;

pub use contact::{extract_contact, ContactRecord};
pub use links::{extract_links, AppLink};

use scraper::Html;

use crate::error::{Result, ScrapeError};

/// Decodes a fetched payload and parses it into a queryable document.
///
/// `source_url` is only used to label the error.
pub fn parse_markup(bytes: &[u8], source_url: &str) -> Result<Html> {
    let text = std::str::from_utf8(bytes).map_err(|e| ScrapeError::Parse {
        source_url: source_url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(Html::parse_document(text))
}
