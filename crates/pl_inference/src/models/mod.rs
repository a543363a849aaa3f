use std::sync::Arc;
use pl_core::{CompletionModel, Result};
use tracing::info;
use crate::Config;

pub mod openrouter;
#[cfg(any(test, feature = "testing"))]
pub mod scripted;

pub use openrouter::OpenRouterModel;
#[cfg(any(test, feature = "testing"))]
pub use scripted::ScriptedModel;

/// Create the chat-completions model described by `config`.
pub fn create_model(config: Config) -> Result<Arc<dyn CompletionModel>> {
    let model = OpenRouterModel::new(config)?;
    info!(
        "🧠 Inference model ready: {} via {}",
        model.config().model_name,
        model
            .config()
            .proxy
            .as_ref()
            .map(|proxy| format!("proxy {}", proxy))
            .unwrap_or_else(|| "direct connection".to_string())
    );
    Ok(Arc::new(model))
}
