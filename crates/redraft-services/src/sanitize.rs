//! Sanitization of transform responses.
//!
//! Transform services answer with markup, but the raw text routinely arrives
//! wrapped in markdown code fences or padded with prose around the markup.
//! Everything the reconciler sees must be bare markup, so responses pass
//! through here first.

use once_cell::sync::Lazy;
use regex::Regex;

static FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:html)?\s*(.*?)\s*```").expect("valid fence regex")
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[a-zA-Z]").expect("valid tag regex"));

/// Reduce a transform response to bare markup.
///
/// In order: unwrap the first markdown code fence; slice from the first tag
/// to the last `>` to drop surrounding prose; wrap tag-free text in `<p>`.
/// Whitespace-only input stays empty.
#[must_use]
pub fn sanitize_markup(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(captures) = FENCE.captures(text) {
        if let Some(inner) = captures.get(1) {
            text = inner.as_str().trim();
        }
    }

    if text.is_empty() {
        return String::new();
    }

    match TAG.find(text) {
        Some(first_tag) => match text.rfind('>') {
            Some(last) if last > first_tag.start() => text[first_tag.start()..=last].to_string(),
            _ => text.to_string(),
        },
        None => format!("<p>{text}</p>"),
    }
}
