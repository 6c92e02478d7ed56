use thiserror::Error;

use crate::domain::outcome::FailureKind;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Invalid search query: {reason}")]
    InvalidQuery { reason: String },

    #[error("Upstream authentication failed: {reason}")]
    Auth { reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned HTTP {status}: {body}")]
    UpstreamStatus {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Upstream error: {reason}")]
    Upstream { reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl ResolverError {
    /// Classify an adapter error into the outcome taxonomy the orchestrator logs.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Auth { .. } => FailureKind::AuthFailure,
            Self::Http(_) | Self::Io(_) => FailureKind::NetworkError,
            _ => FailureKind::UpstreamError,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolverError>;
