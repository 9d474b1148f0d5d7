//! Error types for edit routing and reconciliation.

/// Routing and reconciliation errors.
///
/// Transform/transport failures are not represented here: the router never
/// talks to a service, and the reconciler only ever sees successful
/// outcomes. Failed calls leave the store untouched by construction.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// Instruction text was empty or whitespace-only.
    #[error("empty edit instruction")]
    EmptyInstruction,

    /// A structural image edit named an ordinal with no matching image.
    #[error("no image at ordinal {ordinal} ({available} image sections present)")]
    NoSuchImage {
        /// 1-based ordinal the operator named.
        ordinal: usize,
        /// Image sections currently in the store.
        available: usize,
    },
}
