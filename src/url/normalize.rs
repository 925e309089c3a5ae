use url::Url;

/// Normalizes a URL for whitelist and state-store comparison
///
/// The normalized form is the lowercased host followed by the lowercased
/// path; scheme, query, and fragment are discarded. `https://GitHub.com/Foo`
/// and `http://github.com/foo?tab=readme` both normalize to
/// `github.com/foo`.
///
/// Normalization never fails: input that does not parse as a URL falls back
/// to the whole string lowercased. Callers must not rely on that case
/// matching anything.
///
/// # Examples
///
/// ```
/// use linktide::url::normalize_url;
///
/// assert_eq!(normalize_url("https://Example.COM/Page?q=1#top"), "example.com/page");
/// ```
pub fn normalize_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default().to_lowercase();
            format!("{}{}", host, parsed.path().to_lowercase())
        }
        Err(_) => url.to_lowercase(),
    }
}

/// Removes the fragment component from a URL string
///
/// URLs differing only by fragment identify the same page, so the crawl
/// dedup set is keyed on the fragment-stripped form.
pub fn strip_fragment(url: &str) -> String {
    match url.split_once('#') {
        Some((before, _)) => before.to_string(),
        None => url.to_string(),
    }
}
