//! Reconciler: merges transform outcomes back into the section store.
//!
//! Merges are surgical. A scoped outcome rewrites exactly one section and
//! leaves every other section's bytes untouched; only a document-scoped
//! outcome re-segments, because the replacement text has no stable mapping
//! back onto the old section set.

use redraft_section::{first_image_src, HtmlParser, MarkupParser, Section, SectionStore, SectionType, Segmenter};

use crate::plan::{Applied, EditOutcome};

/// Applies [`EditOutcome`]s to a [`SectionStore`].
pub struct Reconciler<P: MarkupParser = HtmlParser> {
    segmenter: Segmenter<P>,
}

impl Reconciler<HtmlParser> {
    /// Reconciler with the default HTML segmenter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            segmenter: Segmenter::new(),
        }
    }
}

impl Default for Reconciler<HtmlParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: MarkupParser> Reconciler<P> {
    /// Reconciler over a custom segmenter (used for document replacement).
    #[must_use]
    pub fn with_segmenter(segmenter: Segmenter<P>) -> Self {
        Self { segmenter }
    }

    /// Merge `outcome` into `store`.
    ///
    /// A stale section id (the section was deleted or the document was
    /// replaced while the transform was in flight) makes the merge a no-op
    /// with `applied == false`; the store is never left half-merged.
    pub fn apply(&self, outcome: EditOutcome, store: &mut SectionStore) -> Applied {
        let (applied, document_replaced) = match outcome {
            EditOutcome::SectionUpdated {
                section_id,
                content,
                kind_change,
            } => {
                let Some(existing) = store.get(section_id) else {
                    tracing::warn!(%section_id, "update target gone; dropping outcome");
                    return self.unapplied(store);
                };
                let kind = kind_change.unwrap_or(existing.kind);
                let image_url = (kind == SectionType::Image)
                    .then(|| first_image_src(&content))
                    .flatten();
                tracing::debug!(%section_id, %kind, "section updated");
                (store.replace(section_id, content, kind, image_url), false)
            }
            EditOutcome::ScreenshotCaptured {
                anchor,
                html,
                image_url,
            } => {
                let section = Section::new(SectionType::Image, html, Some(image_url));
                let id = store.insert_after(anchor, section);
                tracing::debug!(%id, ?anchor, "screenshot section inserted");
                (true, false)
            }
            EditOutcome::SectionDeleted { section_id } => {
                let removed = store.delete(section_id);
                if !removed {
                    tracing::warn!(%section_id, "delete target already gone");
                }
                (removed, false)
            }
            EditOutcome::DocumentReplaced { content } => {
                let sections = self.segmenter.segment(&content);
                tracing::debug!(sections = sections.len(), "document replaced");
                store.replace_all(sections);
                (true, true)
            }
        };

        Applied {
            applied,
            document_replaced,
            character_count: store.character_count(),
        }
    }

    fn unapplied(&self, store: &SectionStore) -> Applied {
        Applied {
            applied: false,
            document_replaced: false,
            character_count: store.character_count(),
        }
    }
}
