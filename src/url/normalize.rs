use crate::UrlError;
use url::Url;

/// Normalizes a URL before it is used as a frontier key or record field
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject non-HTTP(S) schemes
/// 3. Reject URLs without a host
/// 4. Remove the fragment (everything after #)
/// 5. Remove the trailing slash from the path (except for the root /)
///
/// The host is lowercased by the parser itself, so two spellings of the
/// same page always normalize to the same string. Query strings are kept;
/// whether query-carrying URLs are crawled at all is a discovery policy
/// decision, not a normalization one.
///
/// # Examples
///
/// ```
/// use loupe::url::normalize_url;
///
/// let url = normalize_url("https://Example.com/docs/button/#props").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs/button");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/').to_string();
        url.set_path(&trimmed);
    }

    Ok(url)
}
