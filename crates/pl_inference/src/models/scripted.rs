use std::fmt;
use std::sync::Mutex;
use async_trait::async_trait;
use pl_core::{CompletionModel, Result};

type Responder = Box<dyn Fn(&str) -> Result<String> + Send + Sync>;

/// In-memory model that answers from a closure and records every prompt it receives.
pub struct ScriptedModel {
    responder: Responder,
    prompts: Mutex<Vec<String>>,
}

impl fmt::Debug for ScriptedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedModel")
            .field("calls", &self.call_count())
            .finish()
    }
}

impl ScriptedModel {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with the same text.
    pub fn replying(reply: impl Into<String>) -> Self {
        let reply = reply.into();
        Self::new(move |_| Ok(reply.clone()))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl CompletionModel for ScriptedModel {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(prompt.to_string());
        (self.responder)(prompt)
    }
}
