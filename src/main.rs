use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use laposte_sdk::{ensure_success, ApiClient, ApiFamily, HttpSession, SdkConfig};
use reqwest::Method;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Api {
    Laposte,
    Digiposte,
}

impl From<Api> for ApiFamily {
    fn from(api: Api) -> Self {
        match api {
            Api::Laposte => ApiFamily::Laposte,
            Api::Digiposte => ApiFamily::Digiposte,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// Issue a single request against a La Poste Open API.
#[derive(Debug, Parser)]
#[command(name = "laposte-sdk", version)]
struct Cli {
    /// API family whose base URL and access token are used
    #[arg(long, value_enum, default_value = "laposte")]
    api: Api,

    /// Override the configured base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Accept any TLS certificate (test servers only)
    #[arg(long)]
    insecure: bool,

    /// TOML config file used instead of the environment
    #[arg(long)]
    config: Option<String>,

    /// HTTP method
    #[arg(value_enum, ignore_case = true)]
    method: HttpMethod,

    /// Request path, resolved against the base URL
    path: String,

    /// JSON request body
    #[arg(long)]
    data: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "laposte_sdk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load .env for local dev (if present)
    if dotenvy::dotenv().is_ok() {
        tracing::info!("Loaded .env");
    }

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SdkConfig::from_file(path)?,
        None => SdkConfig::from_env()?,
    };
    let strict_tls = cli.insecure.then_some(false);
    let session = HttpSession::configure(strict_tls, &config)?;

    let family = ApiFamily::from(cli.api);
    let client = match &cli.base_url {
        Some(base_url) => {
            let client = ApiClient::new(base_url, session.clone())?;
            match config.bearer_token(family) {
                Some(token) => client.with_bearer_auth(token),
                None => client,
            }
        }
        None => ApiClient::for_family(family, &config, session.clone())?,
    };

    let mut request = client.request(cli.method.into(), &cli.path)?;
    if let Some(data) = &cli.data {
        let body: serde_json::Value =
            serde_json::from_str(data).context("--data is not valid JSON")?;
        request = request.json(&body);
    }

    let response = request.send().context("request failed")?;
    let status = response.status();
    let response = ensure_success(response)?;
    let body = response.text().context("failed to read response body")?;

    println!("{}", status);
    if !body.is_empty() {
        println!("{}", body);
    }

    drop(client);
    session.shutdown();
    Ok(())
}
