use std::path::Path;
use pl_core::{Result, Summary};

pub const HEADER: &str = "# 原则与定律汇总";
pub const DEFAULT_OUTPUT: &str = "principles_and_laws_summary.md";

/// Render summaries as markdown, one `##` section per summary in the given order.
pub fn render(summaries: &[Summary]) -> String {
    let mut document = format!("{}\n\n", HEADER);
    for summary in summaries {
        document.push_str(&format!("## {}\n\n{}\n\n---\n\n", summary.title, summary.summary));
    }
    document
}

/// Write the document as UTF-8, replacing any existing file.
pub async fn write(path: &Path, document: &str) -> Result<()> {
    tokio::fs::write(path, document.as_bytes()).await?;
    Ok(())
}
