//! Configured HTTP session and per-API request builders.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, Url};

use crate::config::{ApiFamily, SdkConfig};
use crate::error::{Result, SdkError};
use crate::url::{build_api_url, parse_base_url};
use crate::version;

/// Certificate verification policy of an [`HttpSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    Strict,
    /// Accepts any server certificate chain and host name. Only meant for test
    /// servers with self-signed certificates.
    InsecureAcceptAll,
}

impl TlsMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            TlsMode::Strict
        } else {
            TlsMode::InsecureAcceptAll
        }
    }
}

/// Shared blocking HTTP client with the SDK's default headers.
#[derive(Debug, Clone)]
pub struct HttpSession {
    http: Client,
    tls_mode: TlsMode,
    user_agent: String,
}

impl HttpSession {
    /// Build the session. `strict_tls` overrides `config.strict_ssl()` when set.
    pub fn configure(strict_tls: Option<bool>, config: &SdkConfig) -> Result<Self> {
        let tls_mode = TlsMode::from_strict(strict_tls.unwrap_or_else(|| config.strict_ssl()));
        let user_agent = version::user_agent();

        let mut builder = Client::builder().user_agent(user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if tls_mode == TlsMode::InsecureAcceptAll {
            tracing::warn!("TLS certificate verification is disabled; do not use outside tests");
            builder = builder
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true);
        }
        let http = builder.build()?;

        tracing::info!("HTTP session configured: tls={:?}, user_agent={}", tls_mode, user_agent);
        Ok(Self {
            http,
            tls_mode,
            user_agent,
        })
    }

    pub fn tls_mode(&self) -> TlsMode {
        self.tls_mode
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Release this handle's pooled connections. Clones held elsewhere keep
    /// the pool alive until they are dropped too.
    pub fn shutdown(self) {
        tracing::info!("HTTP session shut down");
        drop(self.http);
    }
}

/// Request builder bound to one API provider base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    session: HttpSession,
    bearer_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: HttpSession) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        tracing::debug!("baseUrl: {}", base_url);
        Ok(Self {
            base_url,
            session,
            bearer_token: None,
        })
    }

    /// Client for `family`, using the configured base URL override if any and
    /// the family's access token for bearer auth.
    pub fn for_family(family: ApiFamily, config: &SdkConfig, session: HttpSession) -> Result<Self> {
        let client = Self::new(config.base_url(family), session)?;
        Ok(match config.bearer_token(family) {
            Some(token) => client.with_bearer_auth(token),
            None => client,
        })
    }

    pub fn laposte(config: &SdkConfig, session: HttpSession) -> Result<Self> {
        Self::for_family(ApiFamily::Laposte, config, session)
    }

    pub fn digiposte(config: &SdkConfig, session: HttpSession) -> Result<Self> {
        Self::for_family(ApiFamily::Digiposte, config, session)
    }

    /// Send `Authorization: Bearer <token>` with every request built here.
    pub fn with_bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &HttpSession {
        &self.session
    }

    /// Full request URL for `path`.
    pub fn url(&self, path: &str) -> Result<String> {
        build_api_url(&self.base_url, path)
    }

    pub fn get(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::PUT, path)
    }

    pub fn delete(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::DELETE, path)
    }

    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let api_url = self.url(path)?;
        tracing::debug!("{} {}", method, api_url);
        let builder = self.session.http.request(method, api_url);
        Ok(match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }
}

/// Pass 2xx responses through; anything else becomes [`SdkError::Api`] with
/// the response body as the message.
pub fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    tracing::debug!("API call failed with status {}", status);
    let message = match response.text() {
        Ok(body) => Some(body).filter(|b| !b.trim().is_empty()),
        Err(e) => {
            tracing::debug!("Failed to read error response body: {}", e);
            None
        }
    };
    Err(SdkError::api(Some(status.as_u16()), message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env;

    fn session() -> HttpSession {
        HttpSession::configure(None, &SdkConfig::default()).unwrap()
    }

    #[test]
    fn strict_by_default() {
        assert_eq!(session().tls_mode(), TlsMode::Strict);
    }

    #[test]
    fn explicit_flag_wins_over_config() {
        let config = SdkConfig::from_vars([(env::LAPOSTE_API_STRICT_SSL, "false")]).unwrap();
        assert_eq!(
            HttpSession::configure(None, &config).unwrap().tls_mode(),
            TlsMode::InsecureAcceptAll
        );
        assert_eq!(
            HttpSession::configure(Some(true), &config).unwrap().tls_mode(),
            TlsMode::Strict
        );
        assert_eq!(
            HttpSession::configure(Some(false), &SdkConfig::default())
                .unwrap()
                .tls_mode(),
            TlsMode::InsecureAcceptAll
        );
    }

    #[test]
    fn user_agent_carries_version() {
        assert_eq!(session().user_agent(), version::user_agent());
    }

    #[test]
    fn builds_method_and_url() {
        let client = ApiClient::new("https://api.example.com/v1/", session()).unwrap();
        let cases = [
            (client.get("users/42").unwrap(), Method::GET),
            (client.post("users").unwrap(), Method::POST),
            (client.put("/users/42/").unwrap(), Method::PUT),
            (client.delete("users/42/../7").unwrap(), Method::DELETE),
        ];
        let urls = [
            "https://api.example.com/v1/users/42",
            "https://api.example.com/v1/users",
            "https://api.example.com/v1/users/42/",
            "https://api.example.com/v1/users/7",
        ];
        for ((builder, method), url) in cases.into_iter().zip(urls) {
            let request = builder.build().unwrap();
            assert_eq!(request.method(), &method);
            assert_eq!(request.url().as_str(), url);
        }
    }

    #[test]
    fn bearer_token_is_attached() {
        let client = ApiClient::new("https://api.example.com/", session())
            .unwrap()
            .with_bearer_auth("abc");
        let request = client.get("me").unwrap().build().unwrap();
        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer abc"
        );
    }

    #[test]
    fn family_clients_use_configured_base_and_token() {
        let config = SdkConfig::from_vars([
            (env::DIGIPOSTE_API_BASE_URL, "https://sandbox.example.com/digiposte/"),
            (env::DIGIPOSTE_API_ACCESS_TOKEN, "dp"),
        ])
        .unwrap();
        let digiposte = ApiClient::digiposte(&config, session()).unwrap();
        assert_eq!(
            digiposte.url("documents").unwrap(),
            "https://sandbox.example.com/digiposte/documents"
        );
        let request = digiposte.get("documents").unwrap().build().unwrap();
        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer dp"
        );

        let laposte = ApiClient::laposte(&config, session()).unwrap();
        assert_eq!(laposte.base_url().as_str(), "https://api.laposte.fr/");
        let request = laposte.get("suivi").unwrap().build().unwrap();
        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn invalid_base_url_fails_construction() {
        let err = ApiClient::new("not a url", session()).unwrap_err();
        assert!(matches!(err, SdkError::InvalidUrl { .. }));
    }
}
