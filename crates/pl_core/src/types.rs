use serde::Deserialize;

/// Title shown for articles that arrive without one.
pub const UNTITLED: &str = "无标题";

/// Summary body substituted when summarization fails.
pub const SUMMARY_FAILED: &str = "总结失败";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl Article {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    /// The title used in prompts and headings; empty or missing titles fall back to [`UNTITLED`].
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => UNTITLED,
        }
    }

    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub title: String,
    pub summary: String,
    failed: bool,
}

impl Summary {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            failed: false,
        }
    }

    pub fn failed(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: SUMMARY_FAILED.to_string(),
            failed: true,
        }
    }

    /// Whether summarization failed, independent of the body text.
    pub fn is_failed(&self) -> bool {
        self.failed
    }
}
