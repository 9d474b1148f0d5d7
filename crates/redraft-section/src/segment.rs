//! Document segmenter: flat markup into ordered, addressable sections.

use crate::classify::classify;
use crate::markup::{first_image_src, HtmlParser, MarkupParser};
use crate::section::{Section, SectionId};
use crate::section_type::SectionType;

/// Deterministically partitions a rendered document into sections.
///
/// Each top-level markup node becomes at most one section; nested markup is
/// preserved verbatim inside `content`. Segmenting the same markup twice
/// yields an identical type/content/index sequence (ids differ).
#[derive(Debug, Clone)]
pub struct Segmenter<P: MarkupParser = HtmlParser> {
    parser: P,
}

impl Segmenter<HtmlParser> {
    /// Segmenter over the default HTML parser.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: HtmlParser::new(),
        }
    }
}

impl Default for Segmenter<HtmlParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: MarkupParser> Segmenter<P> {
    /// Segmenter over a custom markup parser.
    #[inline]
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    /// Partition `markup` into ordered sections.
    ///
    /// Skips whitespace-only nodes and text-empty nodes that carry no image
    /// (images are the only type allowed to be content-empty). Empty input
    /// yields an empty sequence; malformed fragments degrade to zero
    /// sections rather than an error.
    #[must_use]
    pub fn segment(&self, markup: &str) -> Vec<Section> {
        if markup.trim().is_empty() {
            return Vec::new();
        }

        let mut sections = Vec::new();
        for node in self.parser.parse_fragment(markup) {
            let outer = node.outer.trim();
            if outer.is_empty() {
                continue;
            }
            let kind = classify(node.tag.as_deref(), outer);
            if node.text.trim().is_empty() && kind != SectionType::Image {
                tracing::debug!(tag = ?node.tag, "skipping content-empty node");
                continue;
            }
            let image_url = (kind == SectionType::Image)
                .then(|| first_image_src(outer))
                .flatten();
            sections.push(Section {
                id: SectionId::new(),
                index: sections.len(),
                kind,
                content: outer.to_string(),
                image_url,
            });
        }

        tracing::debug!(count = sections.len(), "document segmented");
        sections
    }
}
