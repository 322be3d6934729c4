//! Matchmaker configuration.
//!
//! Loaded from YAML files and environment variables, then passed explicitly
//! to `MatchMaker::new`.

mod registry;

pub use registry::{
    RegistryConfig, DEFAULT_REGISTRY_HOST, DEFAULT_REGISTRY_PORT, DEFAULT_TIMEOUT_SECS,
};

use serde::Deserialize;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "matchmaker.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "MATCHMAKER_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "MATCHMAKER";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "MATCHMAKER_LOG";

/// Error types for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Main matchmaker configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MatchmakerConfig {
    /// Service registry connection.
    pub registry: RegistryConfig,
}

impl MatchmakerConfig {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `matchmaker.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix, e.g.
    ///    `MATCHMAKER__REGISTRY__PORT=8501`
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: MatchmakerConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that can never reach a registry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let registry = &self.registry;
        if registry.host.trim().is_empty() {
            return Err(ConfigError::Invalid("registry.host is empty".to_string()));
        }
        if registry.port == 0 {
            return Err(ConfigError::Invalid("registry.port must be non-zero".to_string()));
        }
        if registry.scheme != "http" && registry.scheme != "https" {
            return Err(ConfigError::Invalid(format!(
                "registry.scheme must be http or https, got '{}'",
                registry.scheme
            )));
        }
        if registry.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "registry.timeout_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;

    use super::*;

    fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_config_default() {
        let config = MatchmakerConfig::default();
        assert_eq!(config.registry.host, "127.0.0.1");
        assert_eq!(config.registry.port, 8500);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_without_sources_uses_defaults() {
        let config = MatchmakerConfig::load(None).unwrap();
        assert_eq!(config, MatchmakerConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let file = yaml_file(
            "registry:\n  host: consul.internal\n  port: 8501\n  datacenter: dc2\n",
        );

        let config = MatchmakerConfig::load(file.path().to_str()).unwrap();

        assert_eq!(config.registry.host, "consul.internal");
        assert_eq!(config.registry.port, 8501);
        assert_eq!(config.registry.datacenter.as_deref(), Some("dc2"));
        assert_eq!(config.registry.scheme, "http");
    }

    #[test]
    #[serial]
    fn test_load_env_overrides_file() {
        let file = yaml_file("registry:\n  host: consul.internal\n  port: 8501\n");
        std::env::set_var("MATCHMAKER__REGISTRY__PORT", "9500");

        let result = MatchmakerConfig::load(file.path().to_str());
        std::env::remove_var("MATCHMAKER__REGISTRY__PORT");

        let config = result.unwrap();
        assert_eq!(config.registry.host, "consul.internal");
        assert_eq!(config.registry.port, 9500);
    }

    #[test]
    #[serial]
    fn test_load_from_config_env_var() {
        let file = yaml_file("registry:\n  host: from-env-file\n");
        std::env::set_var(CONFIG_ENV_VAR, file.path());

        let result = MatchmakerConfig::load(None);
        std::env::remove_var(CONFIG_ENV_VAR);

        assert_eq!(result.unwrap().registry.host, "from-env-file");
    }

    #[test]
    #[serial]
    fn test_load_missing_required_file_fails() {
        let result = MatchmakerConfig::load(Some("/nonexistent/matchmaker.yaml"));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    #[serial]
    fn test_load_rejects_zero_port() {
        let file = yaml_file("registry:\n  port: 0\n");
        let result = MatchmakerConfig::load(file.path().to_str());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let config = MatchmakerConfig {
            registry: RegistryConfig {
                scheme: "ftp".to_string(),
                ..Default::default()
            },
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
