use reqwest::Response;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ResolverError, Result};

pub const USER_AGENT: &str = concat!("inventory-resolver/", env!("CARGO_PKG_VERSION"));

const SNIPPET_CHARS: usize = 200;

/// Read a provider response: non-2xx becomes `UpstreamStatus`, a body that is
/// not JSON becomes `Upstream`.
pub async fn read_json(response: Response, provider: &'static str) -> Result<Value> {
    let status = response.status();
    let body = response.text().await.map_err(ResolverError::Http)?;
    debug!(
        provider,
        status = status.as_u16(),
        body_len = body.len(),
        "Provider response received"
    );
    trace!(provider, body = %body, "Provider raw response");

    if !status.is_success() {
        return Err(ResolverError::UpstreamStatus {
            provider,
            status: status.as_u16(),
            body: snippet(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| ResolverError::Upstream {
        reason: format!("{provider} returned malformed JSON: {e}"),
    })
}

/// Join a base URL and a path without doubling or dropping the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// First characters of a body, for error messages.
pub fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= SNIPPET_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(SNIPPET_CHARS).collect();
    format!("{cut}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_handles_slashes() {
        assert_eq!(join_url("http://a/api/", "/hotels"), "http://a/api/hotels");
        assert_eq!(join_url("http://a/api", "hotels"), "http://a/api/hotels");
    }

    #[test]
    fn snippet_truncates_long_bodies() {
        let long = "x".repeat(500);
        let s = snippet(&long);
        assert!(s.ends_with('…'));
        assert_eq!(s.chars().count(), SNIPPET_CHARS + 1);
        assert_eq!(snippet("  short  "), "short");
    }

    #[tokio::test]
    async fn read_json_maps_status_and_body() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::path("/bad"))
            .respond_with(wiremock::ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;
        wiremock::Mock::given(wiremock::matchers::path("/garbage"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let http = reqwest::Client::new();
        let resp = http.get(format!("{}/bad", server.uri())).send().await.unwrap();
        let err = read_json(resp, "aggregator").await.unwrap_err();
        assert!(matches!(
            err,
            ResolverError::UpstreamStatus { status: 503, .. }
        ));

        let resp = http.get(format!("{}/garbage", server.uri())).send().await.unwrap();
        let err = read_json(resp, "aggregator").await.unwrap_err();
        assert!(err.to_string().contains("malformed JSON"));
    }
}
