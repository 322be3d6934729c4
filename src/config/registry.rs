//! Registry connection configuration.

use std::time::Duration;

use serde::Deserialize;

/// Default Consul agent host.
pub const DEFAULT_REGISTRY_HOST: &str = "127.0.0.1";
/// Default Consul HTTP port.
pub const DEFAULT_REGISTRY_PORT: u16 = 8500;
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Where and how to reach the service registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Agent host to connect to.
    pub host: String,
    /// Agent HTTP port.
    pub port: u16,
    /// `http` or `https`.
    pub scheme: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Datacenter to query (agent's own if unset).
    pub datacenter: Option<String>,
    /// ACL token sent with every query.
    pub token: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_REGISTRY_HOST.to_string(),
            port: DEFAULT_REGISTRY_PORT,
            scheme: "http".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            datacenter: None,
            token: None,
        }
    }
}

impl RegistryConfig {
    /// Agent at `host:port` with all other settings defaulted.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// `scheme://host:port`, with IPv6 literals bracketed.
    pub fn base_url(&self) -> String {
        let host = self.host.trim();
        if host.contains(':') && !host.starts_with('[') {
            format!("{}://[{}]:{}", self.scheme, host, self.port)
        } else {
            format!("{}://{}:{}", self.scheme, host, self.port)
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Set the datacenter.
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    /// Set the ACL token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}
