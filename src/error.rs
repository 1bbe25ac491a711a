use thiserror::Error;

pub type Result<T> = std::result::Result<T, SdkError>;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Non-2xx response or API-level failure. `status_code` is `None` when no
    /// HTTP status applies.
    #[error("API error (status: {}): {}", display_status(.status_code), .message.as_deref().unwrap_or("no message"))]
    Api {
        status_code: Option<u16>,
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn display_status(status_code: &Option<u16>) -> String {
    match status_code {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}

impl SdkError {
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        SdkError::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn api(status_code: Option<u16>, message: Option<String>) -> Self {
        SdkError::Api {
            status_code,
            message,
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        SdkError::Config(msg.into())
    }

    /// HTTP status carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SdkError::Api { status_code, .. } => *status_code,
            SdkError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
