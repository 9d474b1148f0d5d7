//! redraft-services - External service capabilities and the HTTP backend
//!
//! The boundary between the editor core and the outside world:
//! - `async_trait` capabilities for generation, section/document transforms,
//!   screenshot capture, and publishing
//! - An HTTP/JSON backend implementing all of them against one base url
//! - Response sanitization (code fences, surrounding prose) so the editor
//!   only ever sees bare markup

#![warn(unreachable_pub)]

// Core modules
pub mod error;
pub mod http;
pub mod sanitize;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use error::ServiceError;
pub use http::HttpBackend;
pub use sanitize::sanitize_markup;
pub use traits::{
    ContentGenerator, DocumentTransformer, Publisher, ScreenshotService, SectionTransformer,
};
pub use types::{
    DocumentAction, DocumentTransformRequest, GenerateRequest, GeneratedDocument, PublishReceipt,
    PublishRequest, PublishStatus, ScreenshotCapture, ScreenshotRequest, SectionTransformRequest,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
