//! Edit instructions issued by the operator.

use redraft_section::SectionId;

use crate::intent::StructuralIntent;

/// Ephemeral free-text edit request.
///
/// Consumed once by the router; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditInstruction {
    /// Raw instruction text.
    pub text: String,
    /// Section the operator had selected, if any.
    pub target_section_id: Option<SectionId>,
    /// Explicit structural intent (operator pressed a structural control);
    /// overrides text-based detection.
    pub hint: Option<StructuralIntent>,
}

impl EditInstruction {
    /// Instruction from raw text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_section_id: None,
            hint: None,
        }
    }

    /// Target a specific section.
    #[inline]
    #[must_use]
    pub fn with_target(mut self, id: SectionId) -> Self {
        self.target_section_id = Some(id);
        self
    }

    /// Attach an explicit structural intent.
    #[inline]
    #[must_use]
    pub fn with_hint(mut self, hint: StructuralIntent) -> Self {
        self.hint = Some(hint);
        self
    }
}
