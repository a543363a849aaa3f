use std::fmt;
use std::sync::Arc;
use pl_core::{Article, CompletionModel};
use tracing::{debug, error};
use crate::prompts;

/// Token whose presence in a normalized reply marks the article as relevant.
pub const AFFIRMATIVE: &str = "是";

pub struct Classifier {
    model: Arc<dyn CompletionModel>,
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("model", &self.model.name())
            .finish()
    }
}

impl Classifier {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    /// Ask the model whether the article concerns principles or laws.
    ///
    /// Any model error is logged and counts as "not relevant".
    pub async fn is_relevant(&self, article: &Article) -> bool {
        let prompt = prompts::classification(article);
        match self.model.complete(&prompt).await {
            Ok(reply) => {
                let relevant = is_affirmative(&reply);
                debug!("🏷️ '{}' -> {:?} (relevant: {})", article.display_title(), reply.trim(), relevant);
                relevant
            }
            Err(e) => {
                error!("❌ Failed to classify '{}': {}", article.display_title(), e);
                false
            }
        }
    }
}

pub fn is_affirmative(reply: &str) -> bool {
    reply.trim().to_lowercase().contains(AFFIRMATIVE)
}
