//! Markup converter trait and the `pulldown-cmark` implementation.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::toc::{AnchorRegistry, TocEntry};
use crate::util::{heading_anchor, heading_level_to_num};

/// Result of converting one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderedContent {
    /// Rendered HTML content.
    pub html: String,
    /// Text of the first H1 heading.
    pub title: Option<String>,
    /// Table of contents entries (H2-H6).
    pub toc: Vec<TocEntry>,
    /// Link destinations in document order.
    pub links: Vec<String>,
}

/// Converts lightweight markup into renderable content.
///
/// Implementations are pure: the same input always yields the same output,
/// and conversion never fails (malformed markup still renders as text).
pub trait MarkupConverter: Send + Sync {
    /// Convert markup text.
    fn convert(&self, markup: &str) -> RenderedContent;
}

/// `pulldown-cmark` based converter.
///
/// GitHub Flavored Markdown is enabled by default. Raw HTML embedded in the
/// markup is passed through unless disabled with
/// [`with_raw_html`](Self::with_raw_html), in which case it is escaped and
/// shows up as literal text.
#[derive(Clone, Debug)]
pub struct CmarkConverter {
    gfm: bool,
    allow_raw_html: bool,
}

impl Default for CmarkConverter {
    fn default() -> Self {
        Self {
            gfm: true,
            allow_raw_html: true,
        }
    }
}

/// A heading found during the scan pass.
struct Heading {
    event_index: usize,
    level: u8,
    explicit_id: Option<String>,
    text: String,
}

impl CmarkConverter {
    /// Create a converter with GFM and raw HTML enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// When enabled, the parser supports tables, strikethrough, task lists,
    /// footnotes, and GFM alerts. Heading attributes (`{#id}`) are always on.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Allow or escape raw HTML in the markup.
    #[must_use]
    pub fn with_raw_html(mut self, allowed: bool) -> Self {
        self.allow_raw_html = allowed;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let base = Options::ENABLE_HEADING_ATTRIBUTES;
        if self.gfm {
            base | Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_GFM
        } else {
            base
        }
    }
}

impl MarkupConverter for CmarkConverter {
    fn convert(&self, markup: &str) -> RenderedContent {
        let mut events: Vec<Event<'_>> = Parser::new_ext(markup, self.parser_options()).collect();

        let mut links = Vec::new();
        let mut headings = Vec::new();
        let mut open: Option<Heading> = None;

        for (index, event) in events.iter().enumerate() {
            match event {
                Event::Start(Tag::Heading { level, id, .. }) => {
                    open = Some(Heading {
                        event_index: index,
                        level: heading_level_to_num(*level),
                        explicit_id: id.as_ref().map(ToString::to_string),
                        text: String::new(),
                    });
                }
                Event::End(TagEnd::Heading(_)) => headings.extend(open.take()),
                Event::Text(text) | Event::Code(text) => {
                    if let Some(heading) = open.as_mut() {
                        heading.text.push_str(text);
                    }
                }
                Event::Start(Tag::Link { dest_url, .. }) => links.push(dest_url.to_string()),
                _ => {}
            }
        }

        let mut anchors = AnchorRegistry::default();
        let mut title = None;
        let mut toc = Vec::new();

        for heading in headings {
            let text = heading.text.trim().to_owned();
            if heading.level == 1 && title.is_none() {
                title = Some(text.clone());
            }

            let base = heading
                .explicit_id
                .unwrap_or_else(|| heading_anchor(&text));
            let id = anchors.claim(&base);

            if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[heading.event_index] {
                *slot = Some(CowStr::from(id.clone()));
            }

            if heading.level >= 2 {
                toc.push(TocEntry {
                    level: heading.level,
                    title: text,
                    id,
                });
            }
        }

        let allow_raw_html = self.allow_raw_html;
        let events = events.into_iter().map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) if !allow_raw_html => Event::Text(raw),
            other => other,
        });

        let mut output = String::with_capacity(markup.len() * 3 / 2);
        html::push_html(&mut output, events);

        RenderedContent {
            html: output,
            title,
            toc,
            links,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn convert(markup: &str) -> RenderedContent {
        CmarkConverter::new().convert(markup)
    }

    #[test]
    fn test_title_from_first_h1() {
        let result = convert("Intro text\n\n# Welcome\n\n# Second");
        assert_eq!(result.title.as_deref(), Some("Welcome"));
    }

    #[test]
    fn test_no_title_without_h1() {
        let result = convert("## Only a subsection");
        assert_eq!(result.title, None);
    }

    #[test]
    fn test_heading_ids_written_to_html() {
        let result = convert("# Welcome\n\n## Getting Started");
        assert!(result.html.contains(r#"<h1 id="welcome">Welcome</h1>"#));
        assert!(
            result
                .html
                .contains(r#"<h2 id="getting-started">Getting Started</h2>"#)
        );
    }

    #[test]
    fn test_toc_excludes_h1_and_deduplicates() {
        let result = convert("# Title\n\n## Setup\n\n### Details\n\n## Setup");
        assert_eq!(
            result.toc,
            vec![
                TocEntry {
                    level: 2,
                    title: "Setup".to_owned(),
                    id: "setup".to_owned(),
                },
                TocEntry {
                    level: 3,
                    title: "Details".to_owned(),
                    id: "details".to_owned(),
                },
                TocEntry {
                    level: 2,
                    title: "Setup".to_owned(),
                    id: "setup-1".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_explicit_heading_id_kept() {
        let result = convert("## Setup {#custom-anchor}");
        assert_eq!(result.toc[0].id, "custom-anchor");
        assert!(result.html.contains(r#"id="custom-anchor""#));
    }

    #[test]
    fn test_heading_with_inline_code() {
        let result = convert("## The `load` call");
        assert_eq!(result.toc[0].title, "The load call");
        assert_eq!(result.toc[0].id, "the-load-call");
    }

    #[test]
    fn test_links_collected_in_order() {
        let result = convert(
            "See [install](install.md), [site](https://example.com) and [top](#top).",
        );
        assert_eq!(
            result.links,
            vec![
                "install.md".to_owned(),
                "https://example.com".to_owned(),
                "#top".to_owned(),
            ]
        );
        assert!(result.html.contains(r#"<a href="install.md">install</a>"#));
    }

    #[test]
    fn test_raw_html_passed_through_by_default() {
        let result = convert("<div class=\"note\">hi</div>\n");
        assert!(result.html.contains(r#"<div class="note">hi</div>"#));
    }

    #[test]
    fn test_raw_html_escaped_when_disabled() {
        let result = CmarkConverter::new()
            .with_raw_html(false)
            .convert("Click <script>alert(1)</script> here");
        assert!(!result.html.contains("<script>"));
        assert!(result.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_gfm_table() {
        let result = convert("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(result.html.contains("<table>"));
    }

    #[test]
    fn test_gfm_disabled_table_is_text() {
        let result = CmarkConverter::new()
            .with_gfm(false)
            .convert("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(!result.html.contains("<table>"));
    }
}
