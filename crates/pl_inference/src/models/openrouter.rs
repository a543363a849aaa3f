use std::fmt;
use std::time::Duration;
use async_trait::async_trait;
use pl_core::{CompletionModel, Error, Result};
use reqwest::{Client, Proxy};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::Config;

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<Message>,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenRouterModel {
    client: Client,
    config: Config,
}

impl OpenRouterModel {
    pub fn new(config: Config) -> Result<Self> {
        let client = build_client(&config, config.request_timeout)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl fmt::Debug for OpenRouterModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRouterModel")
            .field("client", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

/// Build an HTTP client that routes through the configured proxy only.
///
/// Proxy variables in the environment are ignored here; `Config` has
/// already decided whether a proxy applies.
pub fn build_client(config: &Config, timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().no_proxy();
    if let Some(proxy) = &config.proxy {
        let proxy = Proxy::all(proxy.as_str())
            .map_err(|e| Error::Configuration(format!("Invalid proxy {}: {}", proxy, e)))?;
        builder = builder.proxy(proxy);
    }
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))
}

/// Pull the assistant reply out of a chat-completions body.
fn extract_reply(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(format!("Unparseable response body: {}", e)))?;

    let first_message = response
        .choices
        .as_ref()
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.message.as_ref());

    if let Some(message) = first_message {
        return message
            .content
            .clone()
            .ok_or_else(|| Error::MalformedResponse("First choice carries no message content".to_string()));
    }

    if let Some(error) = response.error {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(Error::Api(message));
    }

    warn!("Unexpected response shape: {}", body);
    Err(Error::MalformedResponse(
        "Could not extract content from response, the format may have changed".to_string(),
    ))
}

#[async_trait]
impl CompletionModel for OpenRouterModel {
    fn name(&self) -> &str {
        "OpenRouter"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model_name,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.config.max_tokens,
        };

        let response = self.client
            .post(self.config.endpoint.clone())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("HTTP-Referer", self.config.site_url.as_str())
            .header("X-Title", self.config.site_name.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status"),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::connection(e.to_string()))?;
        debug!("📨 Raw response from {}: {}", self.name(), body);

        extract_reply(&body)
    }
}
