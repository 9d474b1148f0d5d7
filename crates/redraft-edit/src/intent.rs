//! Structural intent detection over free-text instructions.
//!
//! Detecting "turn this into a screenshot" or "delete the second image" from
//! Korean editorial phrasing is inherently heuristic product logic, so it
//! lives behind a trait: the keyword set can be swapped without touching the
//! router. The default matcher covers the production keyword set plus
//! English equivalents.

use once_cell::sync::Lazy;
use regex::Regex;

/// Structural action implied by an instruction, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralIntent {
    /// Capture a page screenshot and insert it as an image section.
    Screenshot {
        /// Resolved capture url: explicit in the text, or mapped from a
        /// known-site keyword. `None` leaves resolution to the service.
        url: Option<String>,
    },
    /// Delete the Nth image section (1-based).
    DeleteImage {
        /// 1-based ordinal over image-typed sections.
        ordinal: usize,
    },
    /// Replace the Nth image section (1-based).
    ReplaceImage {
        /// 1-based ordinal over image-typed sections.
        ordinal: usize,
    },
}

/// Capability to detect structural intent in instruction text.
pub trait IntentMatcher: Send + Sync {
    /// Structural intent of `text`, or `None` for a plain content edit.
    fn detect(&self, text: &str) -> Option<StructuralIntent>;
}

const SCREENSHOT_CUES: &[&str] = &["스크린샷", "스샷", "캡처", "캡쳐", "screenshot", "capture"];
const IMAGE_CUES: &[&str] = &["이미지", "사진", "그림", "image", "picture", "photo"];
const DELETE_CUES: &[&str] = &["삭제", "지워", "제거", "빼줘", "delete", "remove"];
const REPLACE_CUES: &[&str] = &["교체", "바꿔", "변경", "replace", "swap"];

static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s<>"']+"#).expect("valid url regex"));

static ORDINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)").expect("valid ordinal regex"));

/// Default matcher over the production keyword set.
#[derive(Debug, Clone)]
pub struct KeywordIntentMatcher {
    site_urls: Vec<(&'static str, &'static str)>,
}

impl KeywordIntentMatcher {
    /// Matcher with the built-in known-site mapping.
    #[must_use]
    pub fn new() -> Self {
        Self {
            site_urls: vec![
                ("홈택스", "https://hometax.go.kr"),
                ("국세청", "https://nts.go.kr"),
                ("정부24", "https://gov.kr"),
                ("국민연금", "https://nps.or.kr"),
                ("건강보험", "https://nhis.or.kr"),
                ("고용보험", "https://ei.go.kr"),
                ("근로복지공단", "https://kcomwel.or.kr"),
                ("청년도약계좌", "https://ylaccount.kinfa.or.kr"),
                ("주택청약", "https://apt2you.com"),
                ("위택스", "https://wetax.go.kr"),
                ("대법원", "https://scourt.go.kr"),
                ("법원", "https://scourt.go.kr"),
                ("한국장학재단", "https://kosaf.go.kr"),
            ],
        }
    }

    /// Replace the known-site mapping.
    #[must_use]
    pub fn with_sites(mut self, sites: Vec<(&'static str, &'static str)>) -> Self {
        self.site_urls = sites;
        self
    }

    fn capture_url(&self, text: &str) -> Option<String> {
        if let Some(found) = URL.find(text) {
            return Some(found.as_str().to_string());
        }
        self.site_urls
            .iter()
            .find(|(keyword, _)| text.contains(keyword))
            .map(|(_, url)| (*url).to_string())
    }
}

impl Default for KeywordIntentMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentMatcher for KeywordIntentMatcher {
    fn detect(&self, text: &str) -> Option<StructuralIntent> {
        let lower = text.to_lowercase();

        // Screenshot first: "스크린샷으로 변경해줘" must not read as a
        // replace-image intent.
        if contains_any(&lower, SCREENSHOT_CUES) {
            return Some(StructuralIntent::Screenshot {
                url: self.capture_url(text),
            });
        }

        if contains_any(&lower, IMAGE_CUES) {
            let ordinal = first_ordinal(text).unwrap_or(1);
            if contains_any(&lower, DELETE_CUES) {
                return Some(StructuralIntent::DeleteImage { ordinal });
            }
            if contains_any(&lower, REPLACE_CUES) {
                return Some(StructuralIntent::ReplaceImage { ordinal });
            }
        }

        None
    }
}

fn contains_any(text: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| text.contains(cue))
}

fn first_ordinal(text: &str) -> Option<usize> {
    ORDINAL
        .captures(text)
        .and_then(|c| c[1].parse::<usize>().ok())
        .filter(|n| *n > 0)
}
