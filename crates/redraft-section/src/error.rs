//! Error types for the section layer.
//!
//! Segmentation and classification never fail; the only fault this layer can
//! report is a broken store invariant, which is a programmer error.

/// Section layer errors.
#[derive(Debug, thiserror::Error)]
pub enum SectionError {
    /// Store invariant broken after a mutation (non-dense indices or
    /// duplicate ids). Must never be silently swallowed.
    #[error("store invariant violation: {0}")]
    InvariantViolation(String),
}
