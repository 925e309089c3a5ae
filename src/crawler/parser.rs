//! HTML parser for anchor extraction
//!
//! Only `<a href>` targets are of interest; the checker never interprets
//! page content beyond that.

use scraper::{Html, Selector};
use url::Url;

/// Extracts all checkable links from an HTML document
///
/// Keeps `href` values whose scheme is one of {empty/relative, http, https}
/// and resolves them against `page_url`. Anything else (`mailto:`,
/// `javascript:`, `tel:`, data URIs, ...) is dropped. Duplicates are kept;
/// the caller decides whether to deduplicate.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The URL the content was fetched from, for resolving
///   relative references
///
/// # Returns
///
/// A vector of absolute URLs found in the document
pub fn extract_links(html: &str, page_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut links = Vec::new();
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute) = resolve_link(href, page_url) {
                links.push(absolute);
            }
        }
    }

    links
}

/// Resolves an href to an absolute URL, filtering by scheme
///
/// Returns None for hrefs whose scheme is not empty, "http", or "https",
/// and for hrefs that fail to resolve against the page URL.
fn resolve_link(href: &str, page_url: &Url) -> Option<String> {
    if !scheme_allowed(href) {
        return None;
    }

    page_url.join(href).ok().map(|resolved| resolved.to_string())
}

/// Checks whether an href carries a checkable scheme
///
/// Relative references (no scheme) are allowed; absolute references must be
/// http or https.
fn scheme_allowed(href: &str) -> bool {
    match Url::parse(href) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}
