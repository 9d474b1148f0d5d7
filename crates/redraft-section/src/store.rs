//! Ordered section store: the single owner of a document's sections.
//!
//! Every mutation keeps `index` dense and zero-based; a mutation and its
//! renumbering are one logical step. Mutations against ids no longer present
//! degrade to logged no-ops. The document itself is derived on demand from
//! the sections, never cached.

use std::collections::HashSet;

use uuid::Uuid;

use crate::error::SectionError;
use crate::markup::strip_tags;
use crate::section::{Section, SectionId};
use crate::section_type::SectionType;

/// Token identifying one segmentation pass of a store.
///
/// Replaced whenever the store is wholesale-replaced, so responses issued
/// against an earlier pass can be fenced off by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Generation(Uuid);

impl Generation {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Ordered collection of sections with index-preserving mutations.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionStore {
    generation: Generation,
    sections: Vec<Section>,
}

impl SectionStore {
    /// Empty store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation: Generation::new(),
            sections: Vec::new(),
        }
    }

    /// Store seeded from a segmentation pass; indices are renumbered.
    #[must_use]
    pub fn from_sections(sections: Vec<Section>) -> Self {
        let mut store = Self {
            generation: Generation::new(),
            sections,
        };
        store.renumber();
        debug_assert!(store.check().is_ok());
        store
    }

    /// Segmentation pass this store was seeded from.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Sections in index order.
    #[inline]
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the store holds no sections.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section by id.
    #[must_use]
    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Current position of a section id.
    #[must_use]
    pub fn position(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Image-typed sections in document order.
    pub fn images(&self) -> impl Iterator<Item = &Section> {
        self.sections
            .iter()
            .filter(|s| s.kind == SectionType::Image)
    }

    /// The Nth image section, 1-based.
    #[must_use]
    pub fn nth_image(&self, ordinal: usize) -> Option<&Section> {
        ordinal.checked_sub(1).and_then(|n| self.images().nth(n))
    }

    /// Overwrite content, type, and image url of the section at `id`.
    ///
    /// `index` is unchanged. A stale id is a tolerated no-op (returns
    /// `false`, logs a warning) to absorb races with structural mutations.
    pub fn replace(
        &mut self,
        id: SectionId,
        content: impl Into<String>,
        kind: SectionType,
        image_url: Option<String>,
    ) -> bool {
        match self.sections.iter_mut().find(|s| s.id == id) {
            Some(section) => {
                section.content = content.into();
                section.kind = kind;
                section.image_url = image_url;
                true
            }
            None => {
                tracing::warn!(%id, "replace against stale section id ignored");
                false
            }
        }
    }

    /// Remove the section at `id` and renumber the remainder.
    ///
    /// A stale id is a tolerated no-op.
    pub fn delete(&mut self, id: SectionId) -> bool {
        let Some(pos) = self.position(id) else {
            tracing::warn!(%id, "delete against stale section id ignored");
            return false;
        };
        self.sections.remove(pos);
        self.renumber();
        debug_assert!(self.check().is_ok());
        true
    }

    /// Swap the section at `index` with its predecessor.
    ///
    /// No-op at the top boundary or out of range.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.sections.len() {
            return false;
        }
        self.sections.swap(index - 1, index);
        self.renumber();
        debug_assert!(self.check().is_ok());
        true
    }

    /// Swap the section at `index` with its successor.
    ///
    /// No-op at the bottom boundary or out of range.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.sections.len() {
            return false;
        }
        self.sections.swap(index, index + 1);
        self.renumber();
        debug_assert!(self.check().is_ok());
        true
    }

    /// Insert immediately after `anchor`, or append when the anchor is
    /// absent. A stale anchor appends with a warning.
    ///
    /// Returns the id of the inserted section.
    pub fn insert_after(&mut self, anchor: Option<SectionId>, section: Section) -> SectionId {
        let id = section.id;
        let at = match anchor {
            Some(anchor_id) => match self.position(anchor_id) {
                Some(pos) => pos + 1,
                None => {
                    tracing::warn!(id = %anchor_id, "insert anchor is stale; appending");
                    self.sections.len()
                }
            },
            None => self.sections.len(),
        };
        self.sections.insert(at, section);
        self.renumber();
        debug_assert!(self.check().is_ok());
        id
    }

    /// Wholesale replacement after a document-scoped edit.
    ///
    /// Discards all prior section identities and starts a new generation.
    pub fn replace_all(&mut self, sections: Vec<Section>) {
        self.sections = sections;
        self.generation = Generation::new();
        self.renumber();
        debug_assert!(self.check().is_ok());
        tracing::info!(
            generation = %self.generation,
            sections = self.sections.len(),
            "store replaced wholesale"
        );
    }

    /// The assembled document: section contents joined in index order.
    ///
    /// Pure derivation; callable at any point in the mutation history. This
    /// string is the sole payload handed to the publishing sink.
    #[must_use]
    pub fn assemble(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Plain-text character count over all sections, tags stripped.
    ///
    /// Always recomputed from scratch, never incrementally patched.
    #[must_use]
    pub fn character_count(&self) -> usize {
        self.sections
            .iter()
            .map(|s| strip_tags(&s.content).chars().count())
            .sum()
    }

    /// Check the index-density and id-uniqueness invariants.
    ///
    /// A violation indicates a programmer error, not an operator fault.
    pub fn verify_invariants(&self) -> Result<(), SectionError> {
        self.check()
    }

    fn check(&self) -> Result<(), SectionError> {
        let mut seen = HashSet::with_capacity(self.sections.len());
        for (i, section) in self.sections.iter().enumerate() {
            if section.index != i {
                return Err(SectionError::InvariantViolation(format!(
                    "index {} found at position {i}",
                    section.index
                )));
            }
            if !seen.insert(section.id) {
                return Err(SectionError::InvariantViolation(format!(
                    "duplicate section id {}",
                    section.id
                )));
            }
        }
        Ok(())
    }

    fn renumber(&mut self) {
        for (i, section) in self.sections.iter_mut().enumerate() {
            section.index = i;
        }
    }
}

impl Default for SectionStore {
    fn default() -> Self {
        Self::new()
    }
}
