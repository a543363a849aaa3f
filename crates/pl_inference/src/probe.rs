//! Connectivity self-test: checks the proxy route, then sends one short prompt.

use std::time::Duration;
use pl_core::{CompletionModel, Error, Result};
use tracing::{error, info, warn};
use url::Url;
use crate::models::openrouter::build_client;
use crate::Config;

pub const PROBE_TARGET: &str = "https://www.google.com";
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
pub const PROBE_PROMPT: &str = "你好，请用中文回答：今天天气怎么样？";

#[derive(Debug)]
pub struct ProbeReport {
    /// Status code of the proxy check, or why it failed
    pub proxy: Result<u16>,
    pub completion: Result<String>,
}

impl ProbeReport {
    pub fn succeeded(&self) -> bool {
        self.completion.is_ok()
    }
}

/// GET `target` through the configured proxy with a 5 second timeout.
pub async fn check_proxy(config: &Config, target: &Url) -> Result<u16> {
    check_proxy_with_timeout(config, target, PROBE_TIMEOUT).await
}

pub async fn check_proxy_with_timeout(config: &Config, target: &Url, timeout: Duration) -> Result<u16> {
    let client = build_client(config, Some(timeout))?;
    let response = client
        .get(target.clone())
        .send()
        .await
        .map_err(|e| Error::connection(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        Ok(status.as_u16())
    } else {
        Err(Error::http_status(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status"),
        ))
    }
}

/// Run the proxy check and the API check. A failed proxy check does not stop the API check.
pub async fn run_probe(config: &Config, target: &Url, model: &dyn CompletionModel) -> ProbeReport {
    let route = config
        .proxy
        .as_ref()
        .map(|proxy| proxy.to_string())
        .unwrap_or_else(|| "direct".to_string());

    info!("🔌 Testing connection to {} (route: {})", target, route);
    let proxy = check_proxy(config, target).await;
    match &proxy {
        Ok(status) => info!("✅ Connection check succeeded, status {}", status),
        Err(e) => warn!("⚠️ Connection check failed, the API check will likely fail too: {}", e),
    }

    info!("🧠 Testing the {} API (route: {})", model.name(), route);
    let completion = model.complete(PROBE_PROMPT).await;
    match &completion {
        Ok(reply) => info!("✅ API replied:\n{}", reply),
        Err(e) => {
            error!("❌ API check failed: {}", e);
            error!("Check the {} key and proxy settings", crate::config::API_KEY_VAR);
        }
    }

    ProbeReport { proxy, completion }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScriptedModel;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn target_returning(status: u16) -> (MockServer, Url) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
        let target = Url::parse(&server.uri()).unwrap();
        (server, target)
    }

    #[tokio::test]
    async fn test_check_proxy_success() {
        let (_server, target) = target_returning(200).await;
        let config = Config::new("sk-or-test").unwrap();
        assert_eq!(check_proxy(&config, &target).await.unwrap(), 200);
    }

    #[tokio::test]
    async fn test_check_proxy_failure_status() {
        let (_server, target) = target_returning(503).await;
        let config = Config::new("sk-or-test").unwrap();
        assert!(matches!(
            check_proxy(&config, &target).await,
            Err(Error::Transport { status: Some(503), .. })
        ));
    }

    #[tokio::test]
    async fn test_check_proxy_gives_up_on_slow_target() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;
        let target = Url::parse(&server.uri()).unwrap();
        let config = Config::new("sk-or-test").unwrap();

        let result = check_proxy_with_timeout(&config, &target, Duration::from_millis(200)).await;
        assert!(matches!(result, Err(Error::Transport { status: None, .. })));
    }

    #[tokio::test]
    async fn test_probe_runs_api_check_after_proxy_failure() {
        let (_server, target) = target_returning(502).await;
        let config = Config::new("sk-or-test").unwrap();
        let model = ScriptedModel::replying("今天天气晴朗。");

        let report = run_probe(&config, &target, &model).await;
        assert!(report.proxy.is_err());
        assert!(report.succeeded());
        assert_eq!(model.prompts(), vec![PROBE_PROMPT.to_string()]);
    }

    #[tokio::test]
    async fn test_probe_reports_api_failure() {
        let (_server, target) = target_returning(200).await;
        let config = Config::new("sk-or-test").unwrap();
        let model = ScriptedModel::new(|_| Err(Error::Api("User not found.".to_string())));

        let report = run_probe(&config, &target, &model).await;
        assert!(report.proxy.is_ok());
        assert!(!report.succeeded());
    }
}
