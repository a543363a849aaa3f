//! Prompt templates for relevance classification and Chinese summarization.

use pl_core::Article;

/// Maximum number of content characters shown to the classifier.
pub const CLASSIFY_CONTENT_LIMIT: usize = 1000;

/// Prompt asking for a strict 是/否 verdict on whether the article concerns principles or laws.
pub fn classification(article: &Article) -> String {
    format!(
        "请判断以下文章是否与原则、定律、法则、理论相关。\n\
         只回答\"是\"或\"否\"。\n\
         \n\
         文章标题: {}\n\
         文章内容: {}...\n",
        article.display_title(),
        truncate_chars(article.content(), CLASSIFY_CONTENT_LIMIT)
    )
}

/// Prompt asking for a 300-500 character Chinese summary of the full article.
pub fn summarization(article: &Article) -> String {
    format!(
        "请将以下文章总结为中文，保留关键信息和核心观点。\n\
         总结应该清晰、简洁，约300-500字。\n\
         \n\
         文章标题: {}\n\
         文章内容: {}\n",
        article.display_title(),
        article.content()
    )
}

/// Cut `text` after `limit` characters, never splitting a code point.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pl_core::UNTITLED;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("墨菲定律说", 2), "墨菲");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn test_classification_prompt_limits_content() {
        let content = "律".repeat(1500);
        let article = Article::new("墨菲定律", content);
        let prompt = classification(&article);

        assert!(prompt.contains("文章标题: 墨菲定律"));
        assert!(prompt.contains("只回答\"是\"或\"否\""));
        assert!(prompt.contains(&format!("文章内容: {}...", "律".repeat(1000))));
        assert!(!prompt.contains(&"律".repeat(1001)));
    }

    #[test]
    fn test_classification_prompt_defaults() {
        let prompt = classification(&Article::default());
        assert!(prompt.contains(&format!("文章标题: {}", UNTITLED)));
        assert!(prompt.contains("文章内容: ...\n"));
    }

    #[test]
    fn test_summarization_prompt_keeps_full_content() {
        let content = "字".repeat(3000);
        let article = Article::new("帕累托法则", content.clone());
        let prompt = summarization(&article);

        assert!(prompt.contains("约300-500字"));
        assert!(prompt.contains("文章标题: 帕累托法则"));
        assert!(prompt.contains(&content));
    }
}
