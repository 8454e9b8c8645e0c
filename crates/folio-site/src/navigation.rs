//! Previous/next resolution over the flattened index.

use serde::Serialize;

use crate::index::{DocIndex, DocItem};

/// Neighbours of a document in reading order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Adjacent {
    /// Item before the document, possibly from an earlier section.
    pub prev: Option<DocItem>,
    /// Item after the document, possibly from a later section.
    pub next: Option<DocItem>,
}

/// Compute the previous and next items around `slug`.
///
/// Items are taken in section order, then item order, with section
/// boundaries ignored. There is no wraparound: the first item has no
/// previous item and the last has no next. An unknown slug has neither.
#[must_use]
pub fn adjacent(index: &DocIndex, slug: &str) -> Adjacent {
    let items: Vec<&DocItem> = index.items().collect();

    let Some(position) = items.iter().position(|item| item.slug == slug) else {
        return Adjacent::default();
    };

    Adjacent {
        prev: position
            .checked_sub(1)
            .and_then(|i| items.get(i))
            .map(|item| (*item).clone()),
        next: items.get(position + 1).map(|item| (*item).clone()),
    }
}
