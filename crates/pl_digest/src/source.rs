use std::path::Path;
use pl_core::{Article, Result};
use tracing::debug;

/// Load articles from a JSON array of `{ "title": ..., "content": ... }` objects.
pub async fn load_articles(path: &Path) -> Result<Vec<Article>> {
    let raw = tokio::fs::read_to_string(path).await?;
    let articles: Vec<Article> = serde_json::from_str(&raw)?;
    debug!("Loaded {} articles from {}", articles.len(), path.display());
    Ok(articles)
}
