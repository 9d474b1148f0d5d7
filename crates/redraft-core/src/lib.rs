//! redraft-core - Editor session facade
//!
//! Ties the layers together for a caller:
//! - Normalizes stored article payloads across historical schemas
//! - Owns the section store for one document and its mutation surface
//! - Runs the route -> transform -> reconcile pipeline with per-key busy
//!   tracking, bounded external calls, and stale-response fencing
//! - Publishes the assembled document
//!
//! # Example
//!
//! ```rust,ignore
//! use redraft_core::{EditorConfig, EditorSession, ServiceSet};
//! use redraft_edit::EditInstruction;
//!
//! let session = EditorSession::new(
//!     EditorConfig::new().with_keyword("연말정산"),
//!     services,
//! );
//! session.load_document(&article.raw_content);
//! session.issue_edit(EditInstruction::new("더 자세히").with_target(id)).await?;
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod article;
pub mod config;
pub mod error;
pub mod session;

// Re-exports for convenience
pub use article::Article;
pub use config::EditorConfig;
pub use error::EditorError;
pub use session::{
    EditKey, EditorSession, LengthTarget, MoveDirection, ServiceSet, SubscriptionId,
};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::{Article, EditorConfig, EditorError, EditorSession, ServiceSet};
    pub use redraft_edit::{Applied, EditInstruction, StructuralIntent};
    pub use redraft_section::{Section, SectionId, SectionStore, SectionType, Segmenter};
    pub use redraft_services::{PublishStatus, ServiceError};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
