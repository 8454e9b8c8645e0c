//! Slug validation.

use std::sync::LazyLock;

use regex::Regex;

/// Lowercase alphanumeric segments joined by single hyphens.
static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("invalid slug regex"));

/// Check whether `candidate` is a well-formed documentation slug.
///
/// The test is a closed character class, not a URL parser: anything with a
/// path separator, extension, scheme, fragment, uppercase letter, or stray
/// hyphen is rejected.
///
/// # Examples
///
/// ```
/// use folio_site::is_valid_slug;
///
/// assert!(is_valid_slug("intro-basics"));
/// assert!(!is_valid_slug("Intro"));
/// assert!(!is_valid_slug("guide/intro"));
/// ```
pub fn is_valid_slug(candidate: &str) -> bool {
    SLUG_PATTERN.is_match(candidate)
}
