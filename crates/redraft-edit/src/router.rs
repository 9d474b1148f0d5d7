//! Edit router: instruction plus store state into a dispatch plan.

use redraft_section::SectionStore;

use crate::error::EditError;
use crate::instruction::EditInstruction;
use crate::intent::{IntentMatcher, KeywordIntentMatcher, StructuralIntent};
use crate::plan::{DocumentPlan, EditPlan, ScopedPlan, StructuralPlan};

/// Routes free-text instructions to section-scoped, structural, or
/// document-scoped plans.
///
/// Routing never mutates the store and never talks to a service; the plan
/// carries everything the caller needs to dispatch the external call.
pub struct EditRouter {
    matcher: Box<dyn IntentMatcher>,
}

impl EditRouter {
    /// Router with the default keyword matcher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            matcher: Box::new(KeywordIntentMatcher::new()),
        }
    }

    /// Router with a custom intent matcher.
    #[must_use]
    pub fn with_matcher(matcher: Box<dyn IntentMatcher>) -> Self {
        Self { matcher }
    }

    /// Decide how to dispatch `instruction` against the current store.
    ///
    /// Priority: explicit structural hint, then a valid section target, then
    /// detected structural intent, then document scope. A stale target id
    /// falls through to intent/document routing with a warning.
    ///
    /// # Errors
    ///
    /// - [`EditError::EmptyInstruction`] for blank text
    /// - [`EditError::NoSuchImage`] when an image ordinal cannot be resolved
    pub fn route(
        &self,
        instruction: &EditInstruction,
        store: &SectionStore,
        keyword: &str,
    ) -> Result<EditPlan, EditError> {
        let text = instruction.text.trim();
        if text.is_empty() {
            return Err(EditError::EmptyInstruction);
        }

        // An explicit hint wins even over a valid section target: the
        // operator pressed a structural control, and the selected section
        // becomes the anchor.
        if let Some(intent) = &instruction.hint {
            return self.structural_plan(intent.clone(), instruction, store, keyword, text);
        }

        if let Some(id) = instruction.target_section_id {
            if let Some(section) = store.get(id) {
                tracing::debug!(%id, kind = %section.kind, "scoped edit");
                return Ok(EditPlan::Scoped(ScopedPlan {
                    section_id: id,
                    content: section.content.clone(),
                    kind: section.kind,
                    keyword: keyword.to_string(),
                    instruction: text.to_string(),
                }));
            }
            tracing::warn!(%id, "target section id not in store; re-routing by intent");
        }

        if let Some(intent) = self.matcher.detect(text) {
            return self.structural_plan(intent, instruction, store, keyword, text);
        }

        tracing::debug!(chars = store.character_count(), "document-scoped edit");
        Ok(EditPlan::DocumentScoped(DocumentPlan {
            document: store.assemble(),
            instruction: text.to_string(),
        }))
    }

    fn structural_plan(
        &self,
        intent: StructuralIntent,
        instruction: &EditInstruction,
        store: &SectionStore,
        keyword: &str,
        text: &str,
    ) -> Result<EditPlan, EditError> {
        let plan = match intent {
            StructuralIntent::Screenshot { url } => StructuralPlan::CaptureScreenshot {
                anchor: instruction
                    .target_section_id
                    .filter(|id| store.get(*id).is_some()),
                url,
                query: text.to_string(),
            },
            StructuralIntent::DeleteImage { ordinal } => {
                let section = store.nth_image(ordinal).ok_or(EditError::NoSuchImage {
                    ordinal,
                    available: store.images().count(),
                })?;
                StructuralPlan::DeleteImage {
                    section_id: section.id,
                    ordinal,
                }
            }
            StructuralIntent::ReplaceImage { ordinal } => {
                let section = store.nth_image(ordinal).ok_or(EditError::NoSuchImage {
                    ordinal,
                    available: store.images().count(),
                })?;
                StructuralPlan::ReplaceImage {
                    section_id: section.id,
                    ordinal,
                    instruction: text.to_string(),
                    keyword: keyword.to_string(),
                }
            }
        };
        Ok(EditPlan::Structural(plan))
    }
}

impl Default for EditRouter {
    fn default() -> Self {
        Self::new()
    }
}
