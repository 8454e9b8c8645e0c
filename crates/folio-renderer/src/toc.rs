//! Table of contents types.

use std::collections::HashMap;

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TocEntry {
    /// Heading level (2-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor id written to the heading element.
    pub id: String,
}

/// Hands out unique anchor ids within one document.
///
/// The first use of an id is returned as is; later uses get `-1`, `-2`, ...
/// appended, skipping suffixed ids that are already taken.
#[derive(Debug, Default)]
pub(crate) struct AnchorRegistry {
    seen: HashMap<String, usize>,
}

impl AnchorRegistry {
    pub(crate) fn claim(&mut self, base: &str) -> String {
        let Some(count) = self.seen.get(base).copied() else {
            self.seen.insert(base.to_owned(), 0);
            return base.to_owned();
        };

        let mut n = count + 1;
        loop {
            let candidate = format!("{base}-{n}");
            if !self.seen.contains_key(&candidate) {
                self.seen.insert(base.to_owned(), n);
                self.seen.insert(candidate.clone(), 0);
                return candidate;
            }
            n += 1;
        }
    }
}
