//! Element classifier: markup node to semantic section type.

use crate::markup::{first_image_src, strip_tags};
use crate::section_type::SectionType;

/// Classify a top-level node by tag name and markup.
///
/// Rules apply in priority order; the first match wins:
/// 1. heading tag, 2. image container/element/embedded image, 3. list,
/// 4. table, 5. blockquote, 6. non-empty text content, 7. other.
///
/// Deterministic and side-effect free. Malformed markup falls through to
/// `SectionType::Other` instead of raising.
#[must_use]
pub fn classify(tag: Option<&str>, markup: &str) -> SectionType {
    let tag = tag.unwrap_or("");
    if matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6") {
        return SectionType::Heading;
    }
    if tag == "figure" || tag == "img" || first_image_src(markup).is_some() {
        return SectionType::Image;
    }
    if matches!(tag, "ul" | "ol") {
        return SectionType::List;
    }
    if tag == "table" {
        return SectionType::Table;
    }
    if tag == "blockquote" {
        return SectionType::Quote;
    }
    if has_text_content(markup) {
        return SectionType::Paragraph;
    }
    SectionType::Other
}

/// Whether the markup carries real text once tags are stripped.
///
/// Stray tag delimiters left behind by malformed markup do not count as
/// text; they fall through to `Other` like any other content-empty node.
fn has_text_content(markup: &str) -> bool {
    strip_tags(markup)
        .chars()
        .any(|c| !c.is_whitespace() && c != '<' && c != '>')
}
