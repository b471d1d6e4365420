// src/extract/links.rs
// =============================================================================
// Finds app links on a listing page.
//
// A listing page has lots of anchors: navigation, footers, and two anchors
// per app tile (one visible, one aria-hidden duplicate around the icon).
// We keep an anchor only if:
// - its href points at an app details page (/store/apps/details?id=...)
// - it is not aria-hidden
// - it carries a non-blank aria-label (that label is the app's name)
// - resolved against the store origin, it still points at the store origin
//
// Anchors that fail any of these are dropped silently. That is not an error:
// most anchors on the page are not app tiles.
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Path fragment that marks an app details link.
pub const DETAILS_PATH: &str = "/store/apps/details?id=";

/// An app discovered on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLink {
    pub display_name: String,
    pub detail_url: String,
}

// Extracts app links in document order.
//
// Example:
//   <a href="/store/apps/details?id=x" aria-label=" App X ">
//   origin = "https://play.google.com"
//   result = [AppLink { "App X", "https://play.google.com/store/apps/details?id=x" }]
//
// Duplicates are kept; the caller decides what to do with them.
pub fn extract_links(document: &Html, origin: &Url) -> Vec<AppLink> {
    // Constant selector, known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|anchor| app_link(anchor, origin))
        .collect()
}

fn app_link(anchor: ElementRef<'_>, origin: &Url) -> Option<AppLink> {
    let element = anchor.value();
    let href = element.attr("href")?;

    if !href.contains(DETAILS_PATH) || is_aria_hidden(element.attr("aria-hidden")) {
        return None;
    }

    let display_name = element.attr("aria-label")?.trim();
    if display_name.is_empty() {
        return None;
    }

    // join() lets an absolute or protocol-relative href replace the host,
    // so anything that doesn't land back on the store origin is dropped
    let detail_url = origin.join(href).ok()?;
    if detail_url.scheme() != origin.scheme() || detail_url.host_str() != origin.host_str() {
        return None;
    }

    Some(AppLink {
        display_name: display_name.to_string(),
        detail_url: detail_url.to_string(),
    })
}

// aria-hidden="" and aria-hidden="false" leave the anchor visible
fn is_aria_hidden(value: Option<&str>) -> bool {
    match value {
        Some(v) => {
            let v = v.trim();
            !v.is_empty() && !v.eq_ignore_ascii_case("false")
        }
        None => false,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why filter_map?
//    - app_link() returns Option<AppLink>
//    - filter_map keeps the Some values and skips the Nones in one pass
//
// 2. What does ? do on an Option?
//    - element.attr("href")? returns None from app_link() early if the
//      attribute is missing, the same way ? returns early on an Err
//
// 3. What does Url::join do with different hrefs?
//    - "/store/..."              -> same host, new path
//    - "https://other.host/..."  -> replaces everything
//    - "//other.host/..."        -> keeps the scheme, replaces the host
//    - That's why we compare the host after joining
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://play.google.com").unwrap()
    }

    fn links(html: &str) -> Vec<AppLink> {
        extract_links(&Html::parse_document(html), &origin())
    }

    #[test]
    fn test_filters_to_visible_labelled_detail_links() {
        let html = r#"
            <a href="/store/apps/details?id=x" aria-label="App X">X</a>
            <a href="/other" aria-label="Y">Y</a>
            <a href="/store/apps/details?id=z" aria-hidden="true" aria-label="Z">Z</a>
        "#;
        assert_eq!(
            links(html),
            vec![AppLink {
                display_name: "App X".to_string(),
                detail_url: "https://play.google.com/store/apps/details?id=x".to_string(),
            }]
        );
    }

    #[test]
    fn test_label_is_trimmed() {
        let html = r#"<a href="/store/apps/details?id=a" aria-label="  Spaced  ">a</a>"#;
        assert_eq!(links(html)[0].display_name, "Spaced");
    }

    #[test]
    fn test_missing_or_blank_label_dropped() {
        let html = r#"
            <a href="/store/apps/details?id=a">no label</a>
            <a href="/store/apps/details?id=b" aria-label="   ">blank</a>
        "#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_anchor_without_href_dropped() {
        let html = r#"<a aria-label="Orphan">no href</a>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_aria_hidden_false_is_visible() {
        let html = r#"<a href="/store/apps/details?id=v" aria-hidden="false" aria-label="V">v</a>"#;
        assert_eq!(links(html).len(), 1);
    }

    #[test]
    fn test_links_off_the_store_origin_dropped() {
        let html = r#"
            <a href="https://evil.example/store/apps/details?id=x" aria-label="Absolute">x</a>
            <a href="//evil.example/store/apps/details?id=y" aria-label="Scheme-relative">y</a>
            <a href="https://play.google.com/store/apps/details?id=z" aria-label="Same origin">z</a>
        "#;
        let found = links(html);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].display_name, "Same origin");
        assert_eq!(found[0].detail_url, "https://play.google.com/store/apps/details?id=z");
    }

    #[test]
    fn test_duplicates_and_document_order_kept() {
        let html = r#"
            <a href="/store/apps/details?id=b" aria-label="B">b</a>
            <a href="/store/apps/details?id=a" aria-label="A">a</a>
            <a href="/store/apps/details?id=b" aria-label="B">b</a>
        "#;
        let names: Vec<_> = links(html).into_iter().map(|l| l.display_name).collect();
        assert_eq!(names, vec!["B", "A", "B"]);
    }
}
