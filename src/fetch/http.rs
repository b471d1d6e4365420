// src/fetch/http.rs
// =============================================================================
// The HTTP transport: the only code that actually talks to the network.
//
// It sits behind the `Transport` trait so the pipeline can run against an
// in-memory fake in tests. The real implementation uses one reqwest Client
// for every request (connection pooling).
//
// Two requests are needed:
// - POST form body (start/num) to the collection URL for listing pages
// - GET for each app details page
//
// Anything other than a 2xx answer is a fetch error. We never retry.
// =============================================================================

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::pagination::PageRequest;

/// Capability to fetch raw bytes from a URL.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>>;

    async fn post_form(&self, url: &str, body: &PageRequest) -> Result<Vec<u8>>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| ScrapeError::Configuration(format!("could not build HTTP client: {e}")))?;

        Ok(HttpTransport { client })
    }

    async fn read_body(url: &str, response: reqwest::Response) -> Result<Vec<u8>> {
        check_status(url, response.status())?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ScrapeError::fetch(url, describe_error(&e)))?;
        debug!(url, bytes = bytes.len(), "response received");
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::fetch(url, describe_error(&e)))?;

        Self::read_body(url, response).await
    }

    async fn post_form(&self, url: &str, body: &PageRequest) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(url)
            .form(body)
            .send()
            .await
            .map_err(|e| ScrapeError::fetch(url, describe_error(&e)))?;

        Self::read_body(url, response).await
    }
}

// Only 2xx counts as success.
// Redirects are followed by the client, so a 3xx here means the limit was hit.
fn check_status(url: &str, status: StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ScrapeError::fetch(url, format!("HTTP {}", status.as_u16())))
    }
}

// Turns a reqwest error into a short human description
fn describe_error(error: &reqwest::Error) -> String {
    let error_string = error.to_string();

    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        if error_string.contains("dns") {
            "could not resolve hostname".to_string()
        } else {
            "connection failed".to_string()
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "SSL certificate error".to_string()
    } else {
        error_string
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is #[async_trait]?
//    - It lets a trait have async methods that can be used through dyn Transport
//    - Under the hood each method returns a boxed future
//
// 2. What does .form(body) send?
//    - body is serialized with serde as application/x-www-form-urlencoded
//    - PageRequest { offset: 120, count: 60 } becomes start=120&num=60
//
// 3. Why bytes() instead of text()?
//    - We want the raw payload and decide about UTF-8 ourselves when parsing
//      (see extract::parse_markup)
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status_passes() {
        assert!(check_status("https://example.com", StatusCode::OK).is_ok());
        assert!(check_status("https://example.com", StatusCode::NO_CONTENT).is_ok());
    }

    #[test]
    fn test_non_success_status_is_fetch_error() {
        for status in [StatusCode::NOT_FOUND, StatusCode::FOUND, StatusCode::BAD_GATEWAY] {
            let err = check_status("https://example.com/a", status).unwrap_err();
            match err {
                ScrapeError::Fetch { url, reason } => {
                    assert_eq!(url, "https://example.com/a");
                    assert_eq!(reason, format!("HTTP {}", status.as_u16()));
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_client_builds() {
        assert!(HttpTransport::new(Duration::from_secs(5), "app-contacts-test").is_ok());
    }
}
