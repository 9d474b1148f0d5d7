//! Wire DTOs for the external service contracts.

use redraft_section::{SectionId, SectionType};
use serde::{Deserialize, Serialize};

/// Target state for a publish call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    /// Publicly visible.
    Publish,
    /// Saved but not visible.
    Draft,
}

impl PublishStatus {
    /// Wire name of the status.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Publish => "publish",
            PublishStatus::Draft => "draft",
        }
    }
}

/// Request for a fresh document generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Topic keyword driving the generation.
    pub keyword: String,
    /// Optional editorial category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Generated document returned by the content service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDocument {
    /// Document title.
    pub title: String,
    /// Rendered markup body.
    pub content: String,
}

/// Request to transform one section in isolation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTransformRequest {
    /// Current markup of the section.
    pub content: String,
    /// Operator instruction text.
    pub instruction: String,
    /// Document keyword, passed as context.
    pub keyword: String,
    /// Current section type, passed as context.
    pub kind: SectionType,
}

/// Action qualifier for a document-level transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentAction {
    /// Replace the image in the targeted section.
    ReplaceImage,
}

/// Request to transform the document, optionally narrowed to one section.
///
/// `target_section_id` plus an action narrows the transform: the response
/// content is then replacement markup for that section, not a new document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTransformRequest {
    /// Full assembled document.
    pub document: String,
    /// Operator instruction text.
    pub instruction: String,
    /// Document keyword, passed as context.
    pub keyword: String,
    /// Section the action is narrowed to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_section_id: Option<SectionId>,
    /// Action qualifier, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<DocumentAction>,
}

/// Request to capture a page screenshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotRequest {
    /// Explicit capture url, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Raw instruction text, for service-side url resolution.
    pub query: String,
}

/// Captured screenshot ready to become an image section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotCapture {
    /// Uploaded image url.
    pub image_url: String,
    /// Ready-to-insert figure markup with caption.
    pub figure_html: String,
}

/// Request to publish the assembled document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    /// Document title.
    pub title: String,
    /// Assembled document markup.
    pub content: String,
    /// Target visibility.
    pub status: PublishStatus,
}

/// Acknowledgement of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReceipt {
    /// Remote post identifier.
    pub post_id: u64,
    /// Public url, present for published (not draft) posts.
    pub url: Option<String>,
}
