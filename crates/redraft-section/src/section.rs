//! Section: the atomic addressable unit of a document.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::markup;
use crate::section_type::SectionType;

/// Opaque section identifier, unique within one store instance.
///
/// Ids are minted fresh on every segmentation pass: stable across re-renders
/// of the same pass, but not across independent re-segmentations. Holders of
/// an id from a replaced store get a logged no-op, never a crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionId(Uuid);

impl SectionId {
    /// Mint a fresh id.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// One addressable, independently editable unit of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Unique id within the owning store.
    pub id: SectionId,
    /// Zero-based position; always equals the section's rank in the store.
    pub index: usize,
    /// Semantic type assigned by the classifier.
    pub kind: SectionType,
    /// Raw markup exactly as produced by the last write to this section.
    pub content: String,
    /// Source of the first image reference; present for image sections only.
    pub image_url: Option<String>,
}

impl Section {
    /// Create a section with a fresh id.
    ///
    /// `index` starts at 0; the owning store renumbers on insertion.
    #[must_use]
    pub fn new(kind: SectionType, content: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            id: SectionId::new(),
            index: 0,
            kind,
            content: content.into(),
            image_url,
        }
    }

    /// Placeholder section for operator-driven insertion.
    #[must_use]
    pub fn placeholder(kind: SectionType) -> Self {
        Self::new(kind, kind.default_content(), None)
    }

    /// Content with markup tags stripped (the length-metric view).
    #[must_use]
    pub fn plain_text(&self) -> String {
        markup::strip_tags(&self.content)
    }
}
