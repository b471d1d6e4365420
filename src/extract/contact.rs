// src/extract/contact.rs
// =============================================================================
// Pulls the developer's contact email out of an app details page.
//
// The details page lists developer contact info as a mailto: anchor whose
// visible text is the address. We take the FIRST such anchor. If there is
// none, the extraction fails; we never return an empty email.
// =============================================================================

use scraper::{Html, Selector};

use crate::error::{Result, ScrapeError};

/// The row we persist for each app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub display_name: String,
    pub email: String,
}

/// Returns the visible text of the first `mailto:` anchor.
///
/// `app` labels the error when nothing usable is found.
pub fn extract_contact(document: &Html, app: &str) -> Result<String> {
    // Constant selector, known to be valid
    let selector = Selector::parse(r#"a[href^="mailto:"]"#).unwrap();

    let first = document
        .select(&selector)
        .next()
        .ok_or_else(|| ScrapeError::Extraction {
            app: app.to_string(),
            reason: "no mailto link on the details page".to_string(),
        })?;

    let email = first.text().collect::<String>().trim().to_string();
    if email.is_empty() {
        return Err(ScrapeError::Extraction {
            app: app.to_string(),
            reason: "mailto link has no visible text".to_string(),
        });
    }

    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(html: &str) -> Result<String> {
        extract_contact(&Html::parse_document(html), "Test App")
    }

    #[test]
    fn test_first_mailto_wins() {
        let html = r#"
            <a href="mailto:a@x.com">a@x.com</a>
            <a href="mailto:b@x.com">b@x.com</a>
        "#;
        assert_eq!(contact(html).unwrap(), "a@x.com");
    }

    #[test]
    fn test_ignores_non_mailto_anchors() {
        let html = r#"
            <a href="https://dev.example.com">website</a>
            <a href="mailto:dev@example.com"> dev@example.com </a>
        "#;
        assert_eq!(contact(html).unwrap(), "dev@example.com");
    }

    #[test]
    fn test_missing_mailto_fails_closed() {
        let err = contact(r#"<a href="https://example.com">site</a>"#).unwrap_err();
        assert!(matches!(err, ScrapeError::Extraction { ref app, .. } if app == "Test App"));
    }

    #[test]
    fn test_empty_mailto_text_fails() {
        let err = contact(r#"<a href="mailto:x@y.com"></a>"#).unwrap_err();
        assert!(matches!(err, ScrapeError::Extraction { .. }));
    }
}
