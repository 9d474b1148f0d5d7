//! Editor session configuration.

use std::time::Duration;

/// Tunables for an [`crate::EditorSession`].
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Upper bound on any single external transform call.
    pub transform_timeout: Duration,
    /// Maximum number of edits in flight at once.
    pub max_concurrent_edits: usize,
    /// Topic keyword passed to transforms as context.
    pub keyword: String,
}

impl EditorConfig {
    /// Configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transform timeout.
    #[inline]
    #[must_use]
    pub fn with_transform_timeout(mut self, timeout: Duration) -> Self {
        self.transform_timeout = timeout;
        self
    }

    /// Set the in-flight edit limit.
    #[inline]
    #[must_use]
    pub fn with_max_concurrent_edits(mut self, max: usize) -> Self {
        self.max_concurrent_edits = max;
        self
    }

    /// Set the topic keyword.
    #[inline]
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            transform_timeout: Duration::from_secs(120),
            max_concurrent_edits: 4,
            keyword: String::new(),
        }
    }
}
