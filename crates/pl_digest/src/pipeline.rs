use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use pl_core::{Article, CompletionModel, Result, Summary};
use pl_inference::{Classifier, Summarizer};
use tracing::info;
use crate::document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestReport {
    pub total: usize,
    pub relevant: usize,
    pub failed_summaries: usize,
    pub output: PathBuf,
}

impl fmt::Display for DigestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} articles, {} relevant, {} summaries failed, saved to {}",
            self.total,
            self.relevant,
            self.failed_summaries,
            self.output.display()
        )
    }
}

/// Classify, summarize and write, one article at a time.
#[derive(Debug)]
pub struct DigestPipeline {
    classifier: Classifier,
    summarizer: Summarizer,
}

impl DigestPipeline {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self {
            classifier: Classifier::new(model.clone()),
            summarizer: Summarizer::new(model),
        }
    }

    /// Keep the articles the classifier marks relevant, in input order.
    pub async fn filter_relevant<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        let total = articles.len();
        let mut relevant = Vec::new();
        for (i, article) in articles.iter().enumerate() {
            info!("🔍 Classifying article {}/{}: {}", i + 1, total, article.display_title());
            if self.classifier.is_relevant(article).await {
                relevant.push(article);
            }
        }
        relevant
    }

    /// Summarize each article in order; every article yields exactly one summary.
    pub async fn summarize_all(&self, articles: &[&Article]) -> Vec<Summary> {
        let total = articles.len();
        let mut summaries = Vec::with_capacity(total);
        for (i, article) in articles.iter().enumerate() {
            info!("📝 Summarizing article {}/{}: {}", i + 1, total, article.display_title());
            summaries.push(self.summarizer.summarize(article).await);
        }
        summaries
    }

    /// Build the digest document in memory without touching the filesystem.
    pub async fn build(&self, articles: &[Article]) -> (String, Vec<Summary>) {
        info!("📚 Processing {} articles", articles.len());
        let relevant = self.filter_relevant(articles).await;
        info!("✨ Found {} relevant articles", relevant.len());

        let summaries = self.summarize_all(&relevant).await;
        (document::render(&summaries), summaries)
    }

    /// Run the whole job and write the document to `output` once, at the end.
    pub async fn run(&self, articles: &[Article], output: &Path) -> Result<DigestReport> {
        let (document, summaries) = self.build(articles).await;
        document::write(output, &document).await?;
        info!("💾 Digest saved to {}", output.display());

        Ok(DigestReport {
            total: articles.len(),
            relevant: summaries.len(),
            failed_summaries: summaries.iter().filter(|s| s.is_failed()).count(),
            output: output.to_path_buf(),
        })
    }
}
