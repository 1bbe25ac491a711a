use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default base URLs of the supported API families.
pub mod defaults {
    pub const LAPOSTE_API_BASE_URL: &str = "https://api.laposte.fr/";
    pub const DIGIPOSTE_API_BASE_URL: &str = "https://api.laposte.fr/digiposte/1.0";
}

/// Environment variables read by [`SdkConfig::from_env`].
pub mod env {
    pub const LAPOSTE_API_STRICT_SSL: &str = "LAPOSTE_API_STRICT_SSL";
    pub const LAPOSTE_API_TIMEOUT_SECS: &str = "LAPOSTE_API_TIMEOUT_SECS";
    pub const LAPOSTE_API_BASE_URL: &str = "LAPOSTE_API_BASE_URL";
    pub const LAPOSTE_API_CONSUMER_KEY: &str = "LAPOSTE_API_CONSUMER_KEY";
    pub const LAPOSTE_API_CONSUMER_SECRET: &str = "LAPOSTE_API_CONSUMER_SECRET";
    pub const LAPOSTE_API_USERNAME: &str = "LAPOSTE_API_USERNAME";
    pub const LAPOSTE_API_PASSWORD: &str = "LAPOSTE_API_PASSWORD";
    pub const LAPOSTE_API_ACCESS_TOKEN: &str = "LAPOSTE_API_ACCESS_TOKEN";
    pub const LAPOSTE_API_REFRESH_TOKEN: &str = "LAPOSTE_API_REFRESH_TOKEN";
    pub const DIGIPOSTE_API_BASE_URL: &str = "DIGIPOSTE_API_BASE_URL";
    pub const DIGIPOSTE_API_ACCESS_TOKEN: &str = "DIGIPOSTE_API_ACCESS_TOKEN";
    pub const DIGIPOSTE_API_REFRESH_TOKEN: &str = "DIGIPOSTE_API_REFRESH_TOKEN";
    pub const DIGIPOSTE_API_USERNAME: &str = "DIGIPOSTE_API_USERNAME";
    pub const DIGIPOSTE_API_PASSWORD: &str = "DIGIPOSTE_API_PASSWORD";

    pub const ALL: &[&str] = &[
        LAPOSTE_API_STRICT_SSL,
        LAPOSTE_API_TIMEOUT_SECS,
        LAPOSTE_API_BASE_URL,
        LAPOSTE_API_CONSUMER_KEY,
        LAPOSTE_API_CONSUMER_SECRET,
        LAPOSTE_API_USERNAME,
        LAPOSTE_API_PASSWORD,
        LAPOSTE_API_ACCESS_TOKEN,
        LAPOSTE_API_REFRESH_TOKEN,
        DIGIPOSTE_API_BASE_URL,
        DIGIPOSTE_API_ACCESS_TOKEN,
        DIGIPOSTE_API_REFRESH_TOKEN,
        DIGIPOSTE_API_USERNAME,
        DIGIPOSTE_API_PASSWORD,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiFamily {
    Laposte,
    Digiposte,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    /// `None` means strict.
    pub strict_ssl: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub laposte: LaposteConfig,
    pub digiposte: DigiposteConfig,
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LaposteConfig {
    pub base_url: Option<String>,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DigiposteConfig {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

fn redact(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| "<redacted>")
}

impl fmt::Debug for LaposteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaposteConfig")
            .field("base_url", &self.base_url)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &redact(&self.consumer_secret))
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .finish()
    }
}

impl fmt::Debug for DigiposteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigiposteConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .finish()
    }
}

impl LaposteConfig {
    pub fn bearer_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

impl DigiposteConfig {
    pub fn bearer_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

impl SdkConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            env::ALL
                .iter()
                .filter_map(|&name| std::env::var(name).ok().map(|value| (name, value))),
        )
    }

    /// Build a configuration from `(name, value)` pairs. Unknown names are
    /// ignored and absent names leave the setting unset.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();

        for (name, value) in vars {
            let value = value.into();
            match name.as_ref() {
                env::LAPOSTE_API_STRICT_SSL => config.strict_ssl = Some(value != "false"),
                env::LAPOSTE_API_TIMEOUT_SECS => {
                    config.timeout_secs = Some(value.trim().parse().map_err(|_| {
                        SdkError::config_error(format!(
                            "Invalid {}: {value}",
                            env::LAPOSTE_API_TIMEOUT_SECS
                        ))
                    })?);
                }
                env::LAPOSTE_API_BASE_URL => config.laposte.base_url = Some(value),
                env::LAPOSTE_API_CONSUMER_KEY => config.laposte.consumer_key = Some(value),
                env::LAPOSTE_API_CONSUMER_SECRET => config.laposte.consumer_secret = Some(value),
                env::LAPOSTE_API_USERNAME => config.laposte.username = Some(value),
                env::LAPOSTE_API_PASSWORD => config.laposte.password = Some(value),
                env::LAPOSTE_API_ACCESS_TOKEN => config.laposte.access_token = Some(value),
                env::LAPOSTE_API_REFRESH_TOKEN => config.laposte.refresh_token = Some(value),
                env::DIGIPOSTE_API_BASE_URL => config.digiposte.base_url = Some(value),
                env::DIGIPOSTE_API_ACCESS_TOKEN => config.digiposte.access_token = Some(value),
                env::DIGIPOSTE_API_REFRESH_TOKEN => config.digiposte.refresh_token = Some(value),
                env::DIGIPOSTE_API_USERNAME => config.digiposte.username = Some(value),
                env::DIGIPOSTE_API_PASSWORD => config.digiposte.password = Some(value),
                _ => {}
            }
        }

        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SdkError::config_error(format!("Failed to read config file: {}", e)))?;

        let config: SdkConfig = toml::from_str(&content)
            .map_err(|e| SdkError::config_error(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Strict TLS unless explicitly disabled.
    pub fn strict_ssl(&self) -> bool {
        self.strict_ssl.unwrap_or(true)
    }

    pub fn laposte_base_url(&self) -> &str {
        self.laposte
            .base_url
            .as_deref()
            .unwrap_or(defaults::LAPOSTE_API_BASE_URL)
    }

    pub fn digiposte_base_url(&self) -> &str {
        self.digiposte
            .base_url
            .as_deref()
            .unwrap_or(defaults::DIGIPOSTE_API_BASE_URL)
    }

    pub fn base_url(&self, family: ApiFamily) -> &str {
        match family {
            ApiFamily::Laposte => self.laposte_base_url(),
            ApiFamily::Digiposte => self.digiposte_base_url(),
        }
    }

    pub fn bearer_token(&self, family: ApiFamily) -> Option<&str> {
        match family {
            ApiFamily::Laposte => self.laposte.bearer_token(),
            ApiFamily::Digiposte => self.digiposte.bearer_token(),
        }
    }
}
