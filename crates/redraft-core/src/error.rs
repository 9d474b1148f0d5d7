//! Editor-level error types.

use redraft_edit::EditError;
use redraft_services::ServiceError;

use crate::session::EditKey;

/// Failure surfaced by the editor session.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Instruction could not be routed.
    #[error(transparent)]
    Route(#[from] EditError),

    /// An external transform failed; the store was not modified.
    #[error("transform failed: {0}")]
    Transform(ServiceError),

    /// Document generation failed.
    #[error("generation failed: {0}")]
    Generate(ServiceError),

    /// Publishing failed; the document stays editable.
    #[error("publish failed: {0}")]
    Publish(ServiceError),

    /// An edit for the same key is already in flight.
    #[error("edit already in flight for {0}")]
    Busy(EditKey),

    /// The in-flight edit limit was reached.
    #[error("concurrent edit limit reached ({0})")]
    Saturated(usize),

    /// Operation requires a non-empty document.
    #[error("document is empty")]
    EmptyDocument,

    /// Article payload matched none of the known schemas.
    #[error("unrecognized article payload: {0}")]
    Payload(String),
}
