pub mod types;

use std::path::Path;

use crate::error::{ResolverError, Result};
use types::Config;

pub const ENV_UPSTREAM_CLIENT_ID: &str = "UPSTREAM_CLIENT_ID";
pub const ENV_UPSTREAM_CLIENT_SECRET: &str = "UPSTREAM_CLIENT_SECRET";
pub const ENV_AGGREGATOR_API_KEY: &str = "AGGREGATOR_API_KEY";

/// Load `config.yaml`, apply credential overrides from the environment and validate.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = read_config_file(path)?;
    apply_overrides(&mut config, |key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ResolverError::Config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yml::from_str(&content)?;
    Ok(config)
}

/// Secrets are usually injected through the environment rather than the file.
fn apply_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    if let Some(id) = non_empty(ENV_UPSTREAM_CLIENT_ID) {
        config.upstream.client_id = id;
    }
    if let Some(secret) = non_empty(ENV_UPSTREAM_CLIENT_SECRET) {
        config.upstream.client_secret = secret;
    }
    if let Some(key) = non_empty(ENV_AGGREGATOR_API_KEY) {
        config.aggregator.api_key = Some(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn load_config_missing_file_returns_defaults() {
        let config =
            read_config_file(Path::new("/tmp/nonexistent_inventory_config_12345.yaml")).unwrap();
        assert_eq!(config.synthetic.max_count, 8);
    }

    #[test]
    fn load_config_valid_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            "aggregator:\n  base_url: \"http://agg.local/api\"\n  request_timeout_secs: 9\nupstream:\n  radius_km: 12\n  client_id: \"abc\""
        )
        .unwrap();
        let config = read_config_file(tmp.path()).unwrap();
        assert_eq!(config.aggregator.base_url, "http://agg.local/api");
        assert_eq!(config.aggregator.request_timeout_secs, 9);
        assert_eq!(config.upstream.radius_km, 12);
        assert_eq!(config.upstream.client_id, "abc");
    }

    #[test]
    fn load_config_partial_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "quality:\n  brand_keywords: [\"acme\"]").unwrap();
        let config = read_config_file(tmp.path()).unwrap();
        assert_eq!(config.quality.brand_keywords, vec!["acme"]);
        // untouched sections get defaults
        assert_eq!(config.quality.category_bonus, 10);
        assert_eq!(config.upstream.priced_subset, 5);
    }

    #[test]
    fn load_config_empty_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp).unwrap();
        let config = read_config_file(tmp.path()).unwrap();
        assert_eq!(config.synthetic.min_count, 5);
    }

    #[test]
    fn load_config_invalid_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "{{{{invalid yaml: [[[").unwrap();
        assert!(read_config_file(tmp.path()).is_err());
    }

    #[test]
    fn load_config_rejects_invalid_values() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "synthetic:\n  min_count: 10\n  max_count: 3").unwrap();
        let err = load_config(tmp.path()).unwrap_err();
        assert!(matches!(err, ResolverError::Config(_)));
    }

    #[test]
    fn env_overrides_credentials() {
        let mut config = Config::default();
        apply_overrides(&mut config, |key| match key {
            ENV_UPSTREAM_CLIENT_ID => Some("env-id".into()),
            ENV_UPSTREAM_CLIENT_SECRET => Some("env-secret".into()),
            ENV_AGGREGATOR_API_KEY => Some("   ".into()),
            _ => None,
        });
        assert_eq!(config.upstream.client_id, "env-id");
        assert_eq!(config.upstream.client_secret, "env-secret");
        assert!(config.aggregator.api_key.is_none());
    }
}
