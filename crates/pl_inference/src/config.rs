use std::fmt;
use std::time::Duration;
use pl_core::{Error, Result};
use url::Url;

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const PROXY_VAR: &str = "HTTPS_PROXY";

pub const DEFAULT_PROXY: &str = "http://127.0.0.1:7897";
pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "anthropic/claude-3-haiku";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Attribution headers sent with every request
pub const SITE_URL: &str = "https://yoursite.com";
pub const SITE_NAME: &str = "Your Site Name";

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub proxy: Option<Url>,
    pub endpoint: Url,
    pub model_name: String,
    pub max_tokens: u32,
    pub site_url: String,
    pub site_name: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("proxy", &self.proxy.as_ref().map(Url::as_str))
            .field("endpoint", &self.endpoint.as_str())
            .field("model_name", &self.model_name)
            .field("max_tokens", &self.max_tokens)
            .field("site_url", &self.site_url)
            .field("site_name", &self.site_name)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    /// A direct (unproxied) configuration pointing at the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Configuration(format!("{} must not be empty", API_KEY_VAR)));
        }
        Ok(Self {
            api_key,
            proxy: None,
            endpoint: parse_url(DEFAULT_ENDPOINT, "endpoint")?,
            model_name: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            site_url: SITE_URL.to_string(),
            site_name: SITE_NAME.to_string(),
            request_timeout: None,
        })
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// The API key is required. The proxy falls back to [`DEFAULT_PROXY`] when
    /// the variable is unset or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::Configuration(format!("Please set the {} environment variable", API_KEY_VAR))
            })?;

        let proxy = lookup(PROXY_VAR)
            .filter(|proxy| !proxy.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROXY.to_string());

        Ok(Self::new(api_key)?.with_proxy(Some(parse_url(proxy.trim(), "proxy")?)))
    }

    pub fn with_proxy(mut self, proxy: Option<Url>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_model(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// First five characters of the key, for log lines.
    pub fn key_preview(&self) -> String {
        let prefix: String = self.api_key.chars().take(5).collect();
        format!("{}...", prefix)
    }
}

pub fn parse_url(raw: &str, what: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::Configuration(format!("Invalid {} URL '{}': {}", what, raw, e)))
}
