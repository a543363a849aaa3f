mod logging;

use std::path::PathBuf;
use std::time::Duration;
use anyhow::Context;
use clap::Parser;
use pl_digest::{load_articles, DigestPipeline, DEFAULT_OUTPUT};
use pl_inference::config::{parse_url, Config};
use pl_inference::models::OpenRouterModel;
use pl_inference::probe::{self, PROBE_TARGET};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Pick out articles about principles and laws and summarize them in Chinese", long_about = None)]
pub struct Cli {
    /// Connect directly instead of through a proxy
    #[arg(long, global = true, conflicts_with = "proxy")]
    no_proxy: bool,
    /// Proxy URL; overrides HTTPS_PROXY
    #[arg(long, global = true)]
    proxy: Option<String>,
    /// Chat-completions endpoint
    #[arg(long, global = true)]
    endpoint: Option<String>,
    #[arg(long, global = true, help = "Model identifier, e.g. anthropic/claude-3-haiku")]
    model: Option<String>,
    /// Abort any single request after this many seconds (no limit by default)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Classify every article, summarize the relevant ones and write the digest
    Run {
        /// JSON array of { "title", "content" } objects
        #[arg(long, default_value = "articles.json")]
        input: PathBuf,
        #[arg(long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
    },
    /// Check the proxy route and the API key with one short request
    Probe,
}

fn build_config<F>(cli: &Cli, lookup: F) -> pl_core::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::from_lookup(lookup)?;
    if cli.no_proxy {
        config = config.with_proxy(None);
    } else if let Some(proxy) = &cli.proxy {
        config = config.with_proxy(Some(parse_url(proxy, "proxy")?));
    }
    if let Some(endpoint) = &cli.endpoint {
        config = config.with_endpoint(parse_url(endpoint, "endpoint")?);
    }
    if let Some(model) = &cli.model {
        config = config.with_model(model.clone());
    }
    Ok(config.with_timeout(cli.timeout_secs.map(Duration::from_secs)))
}

/// Pre-flight failures come back as `Err`; failures once the job is running are logged only.
async fn run<F>(cli: Cli, lookup: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let config = build_config(&cli, lookup).context("configuration check failed")?;
    info!(
        "🔑 API key loaded ({} chars, starts with {})",
        config.api_key.chars().count(),
        config.key_preview()
    );

    let command = cli.command.unwrap_or(Commands::Run {
        input: PathBuf::from("articles.json"),
        output: PathBuf::from(DEFAULT_OUTPUT),
    });

    match command {
        Commands::Run { input, output } => {
            let articles = load_articles(&input)
                .await
                .with_context(|| format!("failed to load articles from {}", input.display()))?;
            let model = pl_inference::create_model(config)?;
            let pipeline = DigestPipeline::new(model);

            match pipeline.run(&articles, &output).await {
                Ok(report) => info!("✅ Done: {}", report),
                Err(e) => error!("❌ Failed to process articles: {}", e),
            }
        }
        Commands::Probe => {
            let target = parse_url(PROBE_TARGET, "probe")?;
            let model = OpenRouterModel::new(config.clone())?;
            let report = probe::run_probe(&config, &target, &model).await;
            if report.succeeded() {
                info!("✅ API probe succeeded");
            } else {
                warn!("❌ API probe failed");
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(cli, |name| std::env::var(name).ok()).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{any, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn write_articles(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("articles.json");
        std::fs::write(
            &path,
            r#"[{"title": "墨菲定律", "content": "会出错的终将出错。"}]"#,
        )
        .unwrap();
        path
    }

    fn cli_for(server: &MockServer, input: &std::path::Path, output: &std::path::Path) -> Cli {
        let endpoint = format!("{}/api/v1/chat/completions", server.uri());
        Cli::parse_from([
            "pl",
            "--no-proxy",
            "--endpoint",
            endpoint.as_str(),
            "run",
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
    }

    #[tokio::test]
    async fn test_missing_api_key_stops_before_network() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let input = write_articles(dir.path());
        let output = dir.path().join("out.md");

        let err = run(cli_for(&server, &input, &output), |_| None).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<pl_core::Error>(),
            Some(pl_core::Error::Configuration(_))
        ));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_run_writes_digest() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "是"}}]
            })))
            .expect(2)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let input = write_articles(dir.path());
        let output = dir.path().join("out.md");
        let lookup = |name: &str| (name == "OPENROUTER_API_KEY").then(|| "sk-or-test".to_string());

        run(cli_for(&server, &input, &output), lookup).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "# 原则与定律汇总\n\n## 墨菲定律\n\n是\n\n---\n\n"
        );
    }

    #[tokio::test]
    async fn test_unreadable_input_is_preflight_error() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.md");
        let lookup = |name: &str| (name == "OPENROUTER_API_KEY").then(|| "sk-or-test".to_string());

        let result = run(cli_for(&server, &dir.path().join("missing.json"), &output), lookup).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_write_failure_is_logged_not_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "否"}}]
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let input = write_articles(dir.path());
        let output = dir.path().join("no-such-dir").join("out.md");
        let lookup = |name: &str| (name == "OPENROUTER_API_KEY").then(|| "sk-or-test".to_string());

        assert!(run(cli_for(&server, &input, &output), lookup).await.is_ok());
        assert!(!output.exists());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "pl",
            "--proxy",
            "http://10.1.1.1:8080",
            "--model",
            "google/gemini-pro",
            "--timeout-secs",
            "30",
            "probe",
        ]);
        let lookup = |name: &str| (name == "OPENROUTER_API_KEY").then(|| "sk-or-test".to_string());
        let config = build_config(&cli, lookup).unwrap();

        assert_eq!(config.proxy.unwrap().as_str(), "http://10.1.1.1:8080/");
        assert_eq!(config.model_name, "google/gemini-pro");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert!(matches!(cli.command, Some(Commands::Probe)));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["pl", "--timeout-secs", "0", "run"]).is_err());

        let cli = Cli::try_parse_from(["pl", "--timeout-secs", "1", "run"]).unwrap();
        assert_eq!(cli.timeout_secs, Some(1));
    }

    #[test]
    fn test_no_proxy_conflicts_with_proxy() {
        let result = Cli::try_parse_from(["pl", "--no-proxy", "--proxy", "http://10.1.1.1:8080"]);
        assert!(result.is_err());
    }
}
