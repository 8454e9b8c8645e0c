//! Shared utility functions for markdown rendering.

use pulldown_cmark::HeadingLevel;

/// Build an anchor id from heading text.
///
/// Lowercases the text, keeps alphanumerics, and turns runs of whitespace,
/// hyphens, and underscores into a single hyphen. Other punctuation is
/// dropped. Returns `"section"` when nothing usable is left.
///
/// # Examples
///
/// ```
/// use folio_renderer::heading_anchor;
///
/// assert_eq!(heading_anchor("Getting Started"), "getting-started");
/// assert_eq!(heading_anchor("What's new in v2.0?"), "whats-new-in-v20");
/// assert_eq!(heading_anchor("!!!"), "section");
/// ```
pub fn heading_anchor(text: &str) -> String {
    let mut anchor = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !anchor.is_empty() {
                anchor.push('-');
            }
            pending_hyphen = false;
            anchor.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
        }
    }

    if anchor.is_empty() {
        "section".to_owned()
    } else {
        anchor
    }
}

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
