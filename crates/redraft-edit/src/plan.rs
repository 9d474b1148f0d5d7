//! Edit plans and outcomes flowing between router, services, and reconciler.

use redraft_section::{SectionId, SectionType};

/// Dispatch decision for one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPlan {
    /// One section with minimal context.
    Scoped(ScopedPlan),
    /// Change to the set/arrangement of sections.
    Structural(StructuralPlan),
    /// Whole document; success forces re-segmentation.
    DocumentScoped(DocumentPlan),
}

impl EditPlan {
    /// Section id this plan is keyed on for in-flight tracking, if any.
    ///
    /// `None` means the plan is keyed at document level.
    #[must_use]
    pub fn key_section(&self) -> Option<SectionId> {
        match self {
            EditPlan::Scoped(plan) => Some(plan.section_id),
            EditPlan::Structural(StructuralPlan::CaptureScreenshot { anchor, .. }) => *anchor,
            EditPlan::Structural(StructuralPlan::DeleteImage { section_id, .. })
            | EditPlan::Structural(StructuralPlan::ReplaceImage { section_id, .. }) => {
                Some(*section_id)
            }
            EditPlan::DocumentScoped(_) => None,
        }
    }
}

/// Section-scoped transform request context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedPlan {
    /// Target section.
    pub section_id: SectionId,
    /// Current markup of the target section.
    pub content: String,
    /// Current type of the target section.
    pub kind: SectionType,
    /// Document keyword, passed as context.
    pub keyword: String,
    /// Raw instruction text.
    pub instruction: String,
}

/// Structural action resolved against the current store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralPlan {
    /// Capture a screenshot and insert it after `anchor` (append when none).
    CaptureScreenshot {
        /// Insertion anchor.
        anchor: Option<SectionId>,
        /// Resolved capture url, when the matcher found one.
        url: Option<String>,
        /// Raw instruction text, for service-side resolution.
        query: String,
    },
    /// Delete the image section resolved from its ordinal.
    DeleteImage {
        /// Resolved target section.
        section_id: SectionId,
        /// Ordinal the operator named, kept for reporting.
        ordinal: usize,
    },
    /// Replace the image section resolved from its ordinal.
    ReplaceImage {
        /// Resolved target section.
        section_id: SectionId,
        /// Ordinal the operator named, kept for reporting.
        ordinal: usize,
        /// Raw instruction text.
        instruction: String,
        /// Document keyword, passed as context.
        keyword: String,
    },
}

/// Document-scoped transform request context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPlan {
    /// Full reconstructed document (all sections in order).
    pub document: String,
    /// Raw instruction text.
    pub instruction: String,
}

/// Transform result ready to be merged into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// A scoped edit returned replacement markup for one section.
    SectionUpdated {
        /// Target section.
        section_id: SectionId,
        /// Replacement markup.
        content: String,
        /// Explicit type change signaled by the response, e.g. a paragraph
        /// converted to a screenshot image.
        kind_change: Option<SectionType>,
    },
    /// A screenshot was captured and should become a new image section.
    ScreenshotCaptured {
        /// Insertion anchor (append when none).
        anchor: Option<SectionId>,
        /// Figure markup for the new section.
        html: String,
        /// Uploaded image url.
        image_url: String,
    },
    /// A structural delete resolved to this section.
    SectionDeleted {
        /// Target section.
        section_id: SectionId,
    },
    /// A document-scoped edit returned a full replacement document.
    DocumentReplaced {
        /// Replacement document markup.
        content: String,
    },
}

/// Result of merging an outcome into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// Whether the outcome landed (`false` when the target id went stale).
    pub applied: bool,
    /// Whether the whole store was replaced.
    pub document_replaced: bool,
    /// Plain-text character count after the merge.
    pub character_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_section_per_plan_kind() {
        let id = SectionId::new();

        let scoped = EditPlan::Scoped(ScopedPlan {
            section_id: id,
            content: String::new(),
            kind: SectionType::Paragraph,
            keyword: String::new(),
            instruction: String::new(),
        });
        assert_eq!(scoped.key_section(), Some(id));

        let document = EditPlan::DocumentScoped(DocumentPlan {
            document: String::new(),
            instruction: String::new(),
        });
        assert_eq!(document.key_section(), None);

        let screenshot = EditPlan::Structural(StructuralPlan::CaptureScreenshot {
            anchor: None,
            url: None,
            query: String::new(),
        });
        assert_eq!(screenshot.key_section(), None);
    }
}
