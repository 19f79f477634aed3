//! Destination building and page-location helpers.
//!
//! Selecting a result navigates to the document's url with the query carried
//! along as a parameter, and a page arriving with that parameter pre-fills
//! the input. Both ends of that round trip live here.

use url::form_urlencoded;
use url::Url;

/// The document's url with `param=query` appended, percent-encoded.
/// Document urls are typically site-relative (`/docs/intro`), so this works
/// on the raw string and only picks the separator from the existing shape.
pub fn destination(url: &str, query: &str, param: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{param}={encoded}")
}

/// Value of `param` in an absolute page location, if present.
pub fn query_from_location(location: &str, param: &str) -> Option<String> {
    let parsed = Url::parse(location).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_appends_query_param() {
        assert_eq!(destination("/docs/intro", "rust", "q"), "/docs/intro?q=rust");
    }

    #[test]
    fn test_destination_encodes_query() {
        assert_eq!(
            destination("/a", "rust & wasm", "q"),
            "/a?q=rust+%26+wasm"
        );
    }

    #[test]
    fn test_destination_uses_ampersand_when_url_has_query() {
        assert_eq!(destination("/a?lang=en", "rust", "q"), "/a?lang=en&q=rust");
    }

    #[test]
    fn test_query_from_location_found() {
        assert_eq!(
            query_from_location("https://example.org/search?q=rust", "q"),
            Some("rust".to_string())
        );
    }

    #[test]
    fn test_query_from_location_decodes() {
        assert_eq!(
            query_from_location("https://example.org/?q=rust%20%26%20wasm", "q"),
            Some("rust & wasm".to_string())
        );
    }

    #[test]
    fn test_query_from_location_absent_or_invalid() {
        assert_eq!(query_from_location("https://example.org/", "q"), None);
        assert_eq!(query_from_location("not a url", "q"), None);
    }
}
