//! Harness configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{E2eError, E2eResult};

/// Environment variable naming the target server. Its presence is also the
/// opt-in signal for running the suite at all.
pub const BASE_URL_ENV: &str = "STUDIOFLOW_E2E_BASE_URL";
pub const TIMEOUT_ENV: &str = "STUDIOFLOW_E2E_TIMEOUT_SECS";
pub const API_PREFIX_ENV: &str = "STUDIOFLOW_E2E_API_PREFIX";

/// Harness configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Target server, scheme and authority only
    pub base_url: String,

    /// Canonical path prefix of the API surface
    pub api_prefix: String,

    /// Per-request timeout; a single slow call fails its scenario
    pub timeout_secs: u64,

    /// Directory for the JSON suite report
    pub output_dir: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            api_prefix: "/api".to_string(),
            timeout_secs: 30,
            output_dir: PathBuf::from("suite-results"),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file is absent.
    pub fn load(path: &Path) -> E2eResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)
                .map_err(|e| E2eError::Config(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            debug!("no config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Apply `STUDIOFLOW_E2E_*` environment overrides.
    pub fn apply_env(&mut self) -> E2eResult<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary lookup (separated from the process
    /// environment so it can be driven in tests).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> E2eResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BASE_URL_ENV) {
            self.base_url = url;
        }
        if let Some(prefix) = lookup(API_PREFIX_ENV) {
            self.api_prefix = prefix;
        }
        if let Some(secs) = lookup(TIMEOUT_ENV) {
            self.timeout_secs = secs
                .parse()
                .map_err(|_| E2eError::Config(format!("{TIMEOUT_ENV} must be an integer: {secs}")))?;
        }
        Ok(())
    }

    /// Per-request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_observed_contract() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = HarnessConfig::load(Path::new("/nonexistent/harness.toml")).unwrap();
        assert_eq!(config.base_url, HarnessConfig::default().base_url);
    }

    #[test]
    fn overrides_replace_fields() {
        let mut config = HarnessConfig::default();
        config
            .apply_overrides(|name| match name {
                BASE_URL_ENV => Some("http://staging.example.com:8080".to_string()),
                TIMEOUT_ENV => Some("5".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.base_url, "http://staging.example.com:8080");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.api_prefix, "/api");
    }

    #[test]
    fn non_numeric_timeout_is_a_config_error() {
        let mut config = HarnessConfig::default();
        let err = config
            .apply_overrides(|name| (name == TIMEOUT_ENV).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, E2eError::Config(_)));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = HarnessConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: HarnessConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.base_url, config.base_url);
        assert_eq!(parsed.timeout_secs, config.timeout_secs);
    }
}
