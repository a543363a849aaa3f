use async_trait::async_trait;
use std::fmt;
use crate::Result;

#[async_trait]
pub trait CompletionModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Send a single user prompt and return the assistant's reply text
    async fn complete(&self, prompt: &str) -> Result<String>;
}
