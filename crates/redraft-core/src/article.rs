//! Article ingestion across historical payload schemas.
//!
//! Stored articles exist in several generations of shape: a flat
//! `raw_content` string, a flat `content` string, or pre-split `sections` /
//! `sections_v2` arrays whose items carry either `content` or `html`.
//! Everything normalizes to one canonical form here, before segmentation.

use serde_json::Value;

use crate::error::EditorError;

/// Canonical article, whatever schema it was stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Backend identifier, when the payload carried one.
    pub id: Option<u64>,
    /// Document title.
    pub title: String,
    /// Topic keyword.
    pub keyword: String,
    /// Rendered markup body, reassembled if the payload was pre-split.
    pub raw_content: String,
    /// Editorial category.
    pub category: Option<String>,
    /// Whether the article carries a promotion block.
    pub has_promotion: bool,
}

impl Article {
    /// Normalize a stored payload into a canonical article.
    ///
    /// Content resolution order: `raw_content`, `content`, `sections_v2`,
    /// `sections`. Pre-split arrays are rejoined with newlines, taking each
    /// item's `content` or `html` field.
    ///
    /// # Errors
    ///
    /// [`EditorError::Payload`] when no recognized content field is present.
    pub fn from_payload(payload: &Value) -> Result<Self, EditorError> {
        let raw_content = extract_content(payload).ok_or_else(|| {
            EditorError::Payload("no raw_content, content, or sections field".to_string())
        })?;

        Ok(Self {
            id: payload.get("id").and_then(Value::as_u64),
            title: string_field(payload, "title").unwrap_or_default(),
            keyword: string_field(payload, "keyword").unwrap_or_default(),
            raw_content,
            category: string_field(payload, "category"),
            has_promotion: payload
                .get("has_promotion")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
    }
}

fn string_field(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn extract_content(payload: &Value) -> Option<String> {
    for key in ["raw_content", "content"] {
        if let Some(text) = payload.get(key).and_then(Value::as_str) {
            if !text.trim().is_empty() {
                return Some(text.to_string());
            }
        }
    }
    for key in ["sections_v2", "sections"] {
        if let Some(items) = payload.get(key).and_then(Value::as_array) {
            let joined = join_sections(items);
            if !joined.is_empty() {
                tracing::debug!(schema = key, sections = items.len(), "pre-split payload");
                return Some(joined);
            }
        }
    }
    None
}

fn join_sections(items: &[Value]) -> String {
    items
        .iter()
        .filter_map(|item| {
            item.get("content")
                .or_else(|| item.get("html"))
                .and_then(Value::as_str)
        })
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn flat_raw_content_schema() {
        let article = Article::from_payload(&json!({
            "id": 7,
            "title": "연말정산 가이드",
            "keyword": "연말정산",
            "raw_content": "<h2>A</h2><p>B</p>",
            "category": "재테크",
            "has_promotion": true,
        }))
        .unwrap();

        assert_eq!(article.id, Some(7));
        assert_eq!(article.title, "연말정산 가이드");
        assert_eq!(article.raw_content, "<h2>A</h2><p>B</p>");
        assert_eq!(article.category.as_deref(), Some("재테크"));
        assert!(article.has_promotion);
    }

    #[test]
    fn flat_content_fallback() {
        let article = Article::from_payload(&json!({
            "title": "t",
            "keyword": "k",
            "content": "<p>body</p>",
        }))
        .unwrap();
        assert_eq!(article.raw_content, "<p>body</p>");
    }

    #[test]
    fn sections_v2_with_html_field() {
        let article = Article::from_payload(&json!({
            "title": "t",
            "keyword": "k",
            "sections_v2": [
                {"html": "<h2>A</h2>"},
                {"html": "<p>B</p>"},
            ],
        }))
        .unwrap();
        assert_eq!(article.raw_content, "<h2>A</h2>\n<p>B</p>");
    }

    #[test]
    fn legacy_sections_with_content_field() {
        let article = Article::from_payload(&json!({
            "title": "t",
            "keyword": "k",
            "sections": [
                {"content": "<p>one</p>"},
                {"content": "<p>two</p>"},
            ],
        }))
        .unwrap();
        assert_eq!(article.raw_content, "<p>one</p>\n<p>two</p>");
    }

    #[test]
    fn raw_content_wins_over_sections() {
        let article = Article::from_payload(&json!({
            "raw_content": "<p>flat</p>",
            "sections": [{"content": "<p>split</p>"}],
        }))
        .unwrap();
        assert_eq!(article.raw_content, "<p>flat</p>");
    }

    #[test]
    fn contentless_payload_is_rejected() {
        let err = Article::from_payload(&json!({"title": "t"})).unwrap_err();
        assert!(matches!(err, EditorError::Payload(_)));
    }

    #[test]
    fn missing_optional_fields_default() {
        let article = Article::from_payload(&json!({"content": "<p>x</p>"})).unwrap();
        assert_eq!(article.id, None);
        assert_eq!(article.title, "");
        assert!(!article.has_promotion);
        assert_eq!(article.category, None);
    }
}
