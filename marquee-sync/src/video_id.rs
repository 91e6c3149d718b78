//! Video identifier extraction
//!
//! Derives the platform-native 11-character identifier from a video URL.
//! Matchers are tried in order; the first capture wins. Inputs that are
//! already a bare identifier pass through unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

use marquee_common::{Error, Result};

/// URL shapes recognized, in match order: short-link, watch-query,
/// embed-path, shorts-path.
static URL_MATCHERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"youtu\.be/([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"[?&]v=([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"/embed/([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"/shorts/([A-Za-z0-9_-]{11})").unwrap(),
    ]
});

/// Bare identifier: exactly 11 characters over `[A-Za-z0-9_-]`
static BARE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap());

/// Extract the platform-native video identifier from a URL.
///
/// # Errors
/// Returns [`Error::Extraction`] when no matcher succeeds and the input
/// is not already a bare 11-character identifier.
pub fn extract(url: &str) -> Result<String> {
    let trimmed = url.trim();

    for matcher in URL_MATCHERS.iter() {
        if let Some(captures) = matcher.captures(trimmed) {
            return Ok(captures[1].to_string());
        }
    }

    if BARE_ID.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    Err(Error::Extraction(format!(
        "unable to extract a video identifier from \"{trimmed}\""
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_short_link() {
        assert_eq!(extract("https://youtu.be/abc12345678").unwrap(), "abc12345678");
    }

    #[test]
    fn extracts_from_watch_query() {
        assert_eq!(
            extract("https://www.youtube.com/watch?v=abc12345678").unwrap(),
            "abc12345678"
        );
        // v need not be the first query parameter
        assert_eq!(
            extract("https://www.youtube.com/watch?list=PL123&v=abc12345678").unwrap(),
            "abc12345678"
        );
    }

    #[test]
    fn extracts_from_embed_path() {
        assert_eq!(
            extract("https://www.youtube.com/embed/abc12345678?rel=0").unwrap(),
            "abc12345678"
        );
    }

    #[test]
    fn extracts_from_shorts_path() {
        assert_eq!(
            extract("https://www.youtube.com/shorts/abc12345678").unwrap(),
            "abc12345678"
        );
    }

    #[test]
    fn bare_identifier_passes_through() {
        assert_eq!(extract("abc12345678").unwrap(), "abc12345678");
        assert_eq!(extract("a-b_c45678Z").unwrap(), "a-b_c45678Z");
    }

    #[test]
    fn rejects_everything_else() {
        assert!(matches!(extract("not a url"), Err(Error::Extraction(_))));
        assert!(matches!(extract(""), Err(Error::Extraction(_))));
        // wrong length for a bare identifier
        assert!(matches!(extract("abc123"), Err(Error::Extraction(_))));
        assert!(matches!(extract("abc123456789012"), Err(Error::Extraction(_))));
        // bare identifier with an illegal character
        assert!(matches!(extract("abc12345.78"), Err(Error::Extraction(_))));
    }
}
