//! Recorder configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! environment variables (a `.env` file is honored), then command-line
//! flags. The resolved value is handed to the recorder at construction.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Host whose traffic is recorded by default.
pub const DEFAULT_TARGET_HOST: &str = "www.beeminder.com";
/// Default fixture tree root.
pub const DEFAULT_OUTPUT_ROOT: &str = "tests/fixtures/recorded";

/// Environment variable overriding the target host.
pub const ENV_TARGET_HOST: &str = "FIXTURECAP_TARGET_HOST";
/// Environment variable overriding the output root.
pub const ENV_OUTPUT_ROOT: &str = "FIXTURECAP_OUTPUT_DIR";
/// Any non-empty value suppresses danger-category recording.
pub const ENV_SKIP_DANGER: &str = "SKIP_DANGER";
/// Comma-separated query keys to redact.
pub const ENV_REDACT_QUERY: &str = "FIXTURECAP_REDACT_QUERY";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The config file is not valid YAML for [`RecorderConfig`].
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        /// File that was requested.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
}

/// Settings consumed by [`crate::fixture::recorder::FixtureRecorder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Only exchanges addressed to this host are recorded.
    pub target_host: String,
    /// Fixtures land in `<output_root>/<category>/`.
    pub output_root: PathBuf,
    /// Skip `danger` endpoints (charges, step-downs, ...).
    pub skip_danger: bool,
    /// Query keys whose values are replaced with `REDACTED` in `_meta.query`.
    pub redact_query: Vec<String>,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            target_host: DEFAULT_TARGET_HOST.to_string(),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            skip_danger: false,
            redact_query: Vec::new(),
        }
    }
}

impl RecorderConfig {
    /// Loads a YAML config file; missing keys fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_yaml_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Applies overrides from the process environment, after loading `.env`.
    #[must_use]
    pub fn with_env(self) -> Self {
        // A missing `.env` file is the common case.
        let _ = dotenvy::dotenv();
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    #[must_use]
    pub fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = lookup(ENV_TARGET_HOST).filter(|v| !v.is_empty()) {
            self.target_host = host;
        }
        if let Some(root) = lookup(ENV_OUTPUT_ROOT).filter(|v| !v.is_empty()) {
            self.output_root = PathBuf::from(root);
        }
        if lookup(ENV_SKIP_DANGER).is_some_and(|v| !v.is_empty()) {
            self.skip_danger = true;
        }
        if let Some(keys) = lookup(ENV_REDACT_QUERY) {
            self.redact_query = keys
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_target_the_api_host() {
        let config = RecorderConfig::default();
        assert_eq!(config.target_host, "www.beeminder.com");
        assert_eq!(config.output_root, PathBuf::from("tests/fixtures/recorded"));
        assert!(!config.skip_danger);
        assert!(config.redact_query.is_empty());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = RecorderConfig::from_yaml_str("skip_danger: true\n").unwrap();
        assert!(config.skip_danger);
        assert_eq!(config.target_host, DEFAULT_TARGET_HOST);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(RecorderConfig::from_yaml_str("").unwrap(), RecorderConfig::default());
    }

    #[test]
    fn malformed_yaml_is_rejected() {
        assert!(RecorderConfig::from_yaml_str("skip_danger: [nope").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = RecorderConfig::from_yaml_file(Path::new("/definitely/not/here.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }

    #[test]
    fn variables_override_file_values() {
        let config = RecorderConfig::default().with_vars(vars(&[
            (ENV_TARGET_HOST, "api.example.test"),
            (ENV_OUTPUT_ROOT, "/tmp/fixtures"),
            (ENV_SKIP_DANGER, "1"),
            (ENV_REDACT_QUERY, "auth_token, access_token,,"),
        ]));

        assert_eq!(config.target_host, "api.example.test");
        assert_eq!(config.output_root, PathBuf::from("/tmp/fixtures"));
        assert!(config.skip_danger);
        assert_eq!(config.redact_query, vec!["auth_token", "access_token"]);
    }

    #[test]
    fn empty_skip_danger_does_not_enable_it() {
        let config = RecorderConfig::default().with_vars(vars(&[(ENV_SKIP_DANGER, "")]));
        assert!(!config.skip_danger);
    }
}
