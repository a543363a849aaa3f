use std::fmt;
use std::sync::Arc;
use pl_core::{Article, CompletionModel, Summary};
use tracing::{error, warn};
use crate::prompts;

pub struct Summarizer {
    model: Arc<dyn CompletionModel>,
}

impl fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Summarizer")
            .field("model", &self.model.name())
            .finish()
    }
}

impl Summarizer {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    /// Summarize the article in Chinese.
    ///
    /// Failures and blank replies yield [`Summary::failed`] so the article
    /// keeps its slot in the digest.
    pub async fn summarize(&self, article: &Article) -> Summary {
        let title = article.display_title();
        let prompt = prompts::summarization(article);
        match self.model.complete(&prompt).await {
            Ok(reply) if reply.trim().is_empty() => {
                warn!("⚠️ Empty summary returned for '{}'", title);
                Summary::failed(title)
            }
            Ok(reply) => Summary::new(title, reply),
            Err(e) => {
                error!("❌ Failed to summarize '{}': {}", title, e);
                Summary::failed(title)
            }
        }
    }
}
