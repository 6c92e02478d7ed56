use crate::domain::raw::RawStay;
use crate::error::Result;

/// Why a provider call did not produce results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    AuthFailure,
    NetworkError,
    UpstreamError,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::AuthFailure => "auth_failure",
            Self::NetworkError => "network_error",
            Self::UpstreamError => "upstream_error",
        })
    }
}

/// Result of one provider call. `EmptySuccess` and `Failure` both send the
/// orchestrator to the next layer but are reported differently.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    Success(Vec<RawStay>),
    EmptySuccess,
    Failure { kind: FailureKind, message: String },
}

impl ProviderOutcome {
    pub fn from_result(result: Result<Vec<RawStay>>) -> Self {
        match result {
            Ok(stays) if stays.is_empty() => Self::EmptySuccess,
            Ok(stays) => Self::Success(stays),
            Err(e) => Self::Failure {
                kind: e.failure_kind(),
                message: e.to_string(),
            },
        }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Success(stays) => stays.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
