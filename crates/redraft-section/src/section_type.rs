//! Closed enumeration of semantic section types.
//!
//! Per-type editorial behavior (label, placeholder content, suggested edit
//! instructions) lives here as one table, instead of string-keyed lookups
//! duplicated across call sites.

use serde::{Deserialize, Serialize};

/// Semantic type of one document section.
///
/// The classifier never produces a value outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    /// Heading-level element (h1-h6).
    Heading,
    /// Prose paragraph or other text-bearing block.
    Paragraph,
    /// Ordered or unordered list.
    List,
    /// Table.
    Table,
    /// Blockquote-equivalent.
    Quote,
    /// Image container, image element, or image-bearing block.
    Image,
    /// Anything else (content-empty, unrecognized).
    Other,
}

impl SectionType {
    /// All section types, in classifier priority order.
    pub const ALL: [SectionType; 7] = [
        SectionType::Heading,
        SectionType::Image,
        SectionType::List,
        SectionType::Table,
        SectionType::Quote,
        SectionType::Paragraph,
        SectionType::Other,
    ];

    /// Wire/display name of this type.
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SectionType::Heading => "heading",
            SectionType::Paragraph => "paragraph",
            SectionType::List => "list",
            SectionType::Table => "table",
            SectionType::Quote => "quote",
            SectionType::Image => "image",
            SectionType::Other => "other",
        }
    }

    /// Editorial label shown to the operator and passed to the transform
    /// service as type context.
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SectionType::Heading => "제목",
            SectionType::Paragraph => "문단",
            SectionType::List => "리스트",
            SectionType::Table => "표",
            SectionType::Quote => "인용문",
            SectionType::Image => "이미지",
            SectionType::Other => "콘텐츠",
        }
    }

    /// Placeholder markup used when the operator inserts a fresh section.
    #[inline]
    #[must_use]
    pub fn default_content(self) -> &'static str {
        match self {
            SectionType::Heading => "<h2>새 섹션</h2>",
            SectionType::Paragraph => "<p>내용을 입력하세요.</p>",
            SectionType::List => "<ul><li>항목을 입력하세요.</li></ul>",
            SectionType::Table => {
                "<table><tbody><tr><td>내용을 입력하세요.</td></tr></tbody></table>"
            }
            SectionType::Quote => "<blockquote>인용문을 입력하세요.</blockquote>",
            SectionType::Image => "<figure></figure>",
            SectionType::Other => "<div></div>",
        }
    }

    /// Suggested edit-instruction presets for this type.
    #[must_use]
    pub fn suggested_instructions(self) -> &'static [&'static str] {
        match self {
            SectionType::Heading => &[
                "더 눈길을 끄는 제목으로 바꿔줘",
                "키워드를 포함한 제목으로 바꿔줘",
            ],
            SectionType::Paragraph => &[
                "좀 더 쉽게 설명해줘",
                "예시를 넣어줘",
                "더 자세히 설명해줘",
            ],
            SectionType::List => &["항목을 더 추가해줘", "각 항목에 설명을 붙여줘"],
            SectionType::Table => &["표에 열을 추가해줘", "표를 더 간단하게 정리해줘"],
            SectionType::Quote => &["인용문을 더 짧게 줄여줘"],
            SectionType::Image => &["이미지 설명을 바꿔줘"],
            SectionType::Other => &["내용을 다듬어줘"],
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_lowercase() {
        for kind in SectionType::ALL {
            assert_eq!(kind.as_str(), kind.as_str().to_lowercase());
        }
    }

    #[test]
    fn serde_round_trip_uses_wire_names() {
        let json = serde_json::to_string(&SectionType::Heading).unwrap();
        assert_eq!(json, "\"heading\"");
        let back: SectionType = serde_json::from_str("\"image\"").unwrap();
        assert_eq!(back, SectionType::Image);
    }

    #[test]
    fn every_type_has_behavior() {
        for kind in SectionType::ALL {
            assert!(!kind.label().is_empty());
            assert!(!kind.default_content().is_empty());
            assert!(!kind.suggested_instructions().is_empty());
        }
    }
}
