//! Abstract external service capabilities.
//!
//! The editor core is written against these traits; the HTTP backend is one
//! implementation and test fakes are another. Every call is fallible and
//! side-effect free from the store's point of view.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::types::{
    DocumentTransformRequest, GenerateRequest, GeneratedDocument, PublishReceipt, PublishRequest,
    ScreenshotCapture, ScreenshotRequest, SectionTransformRequest,
};

/// Generates a fresh document from a keyword.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate a titled document for the request's keyword.
    async fn generate(&self, request: GenerateRequest) -> Result<GeneratedDocument, ServiceError>;
}

/// Transforms one section's markup per an instruction.
#[async_trait]
pub trait SectionTransformer: Send + Sync {
    /// Returns replacement markup for the section, already sanitized.
    async fn transform_section(
        &self,
        request: SectionTransformRequest,
    ) -> Result<String, ServiceError>;
}

/// Transforms the whole document, or one section within document context.
#[async_trait]
pub trait DocumentTransformer: Send + Sync {
    /// Returns replacement markup, already sanitized.
    ///
    /// Replacement scope follows the request: the full document, or a single
    /// section when the request carries a target and action.
    async fn transform_document(
        &self,
        request: DocumentTransformRequest,
    ) -> Result<String, ServiceError>;
}

/// Captures page screenshots and uploads them.
#[async_trait]
pub trait ScreenshotService: Send + Sync {
    /// Capture a screenshot; resolves the url service-side when absent.
    async fn capture(&self, request: ScreenshotRequest) -> Result<ScreenshotCapture, ServiceError>;
}

/// Publishes an assembled document to the blog backend.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Push the document with the requested visibility.
    async fn publish(&self, request: PublishRequest) -> Result<PublishReceipt, ServiceError>;
}
