//! redraft-edit - Edit routing and reconciliation
//!
//! The decision layer between operator instructions and the section store:
//! - Detects structural intent (screenshots, image deletes/replacements) in
//!   free-text instructions
//! - Routes each instruction to a section-scoped, structural, or
//!   document-scoped plan against the current store state
//! - Reconciles transform outcomes back into the store, leaving untouched
//!   sections byte-for-byte intact
//!
//! # Example
//!
//! ```rust,ignore
//! use redraft_edit::{EditInstruction, EditRouter, Reconciler};
//! use redraft_section::{SectionStore, Segmenter};
//!
//! let store = SectionStore::from_sections(
//!     Segmenter::new().segment("<h2>Title</h2><p>Hello world</p>"),
//! );
//! let target = store.sections()[1].id;
//!
//! let plan = EditRouter::new()
//!     .route(&EditInstruction::new("더 자세히").with_target(target), &store, "연말정산")?;
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod error;
pub mod instruction;
pub mod intent;
pub mod plan;
pub mod reconcile;
pub mod router;

// Re-exports for convenience
pub use error::EditError;
pub use instruction::EditInstruction;
pub use intent::{IntentMatcher, KeywordIntentMatcher, StructuralIntent};
pub use plan::{Applied, DocumentPlan, EditOutcome, EditPlan, ScopedPlan, StructuralPlan};
pub use reconcile::Reconciler;
pub use router::EditRouter;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
