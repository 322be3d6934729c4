//! Registry boundary - instance health as reported by the service catalog.

use async_trait::async_trait;
use serde::Deserialize;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Error types for registry queries.
///
/// All of these mean the registry could not answer; none are retried here.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Registry request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Registry returned {status} for service '{service}': {body}")]
    Status {
        service: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode registry response for service '{service}': {source}")]
    Decode {
        service: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid registry address '{address}': {message}")]
    InvalidAddress { address: String, message: String },

    #[error("Registry unavailable: {0}")]
    Unavailable(String),
}

/// Status reported by a single health check.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum CheckStatus {
    Passing,
    Warning,
    Critical,
    Maintenance,
    /// Anything the catalog reports that we don't recognize.
    Other(String),
}

impl CheckStatus {
    pub fn is_passing(&self) -> bool {
        matches!(self, CheckStatus::Passing)
    }
}

impl From<String> for CheckStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "passing" => CheckStatus::Passing,
            "warning" => CheckStatus::Warning,
            "critical" => CheckStatus::Critical,
            "maintenance" => CheckStatus::Maintenance,
            _ => CheckStatus::Other(status),
        }
    }
}

impl From<&str> for CheckStatus {
    fn from(status: &str) -> Self {
        CheckStatus::from(status.to_string())
    }
}

/// Node an instance runs on.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodeInfo {
    /// Node name; used as the node id in routing targets.
    pub node: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub datacenter: Option<String>,
}

/// Service registration on a node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceInfo {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// One health check attached to an instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HealthCheck {
    #[serde(rename = "CheckID", default)]
    pub check_id: String,
    #[serde(default)]
    pub name: String,
    pub status: CheckStatus,
}

/// One entry of a catalog health query: an instance and all its checks.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceHealth {
    pub node: NodeInfo,
    #[serde(default)]
    pub service: Option<ServiceInfo>,
    #[serde(default)]
    pub checks: Vec<HealthCheck>,
}

impl InstanceHealth {
    /// Instance on `node` with no checks attached.
    pub fn new(node: impl Into<String>) -> Self {
        Self {
            node: NodeInfo {
                node: node.into(),
                ..Default::default()
            },
            service: None,
            checks: Vec::new(),
        }
    }

    /// Instance on `node` whose single check is passing.
    pub fn passing(node: impl Into<String>) -> Self {
        Self::new(node).with_check(CheckStatus::Passing)
    }

    /// Instance on `node` whose single check is critical.
    pub fn critical(node: impl Into<String>) -> Self {
        Self::new(node).with_check(CheckStatus::Critical)
    }

    /// Attach a check with the given status.
    pub fn with_check(mut self, status: impl Into<CheckStatus>) -> Self {
        let index = self.checks.len();
        self.checks.push(HealthCheck {
            check_id: format!("check-{}", index),
            name: String::new(),
            status: status.into(),
        });
        self
    }

    pub fn node_id(&self) -> &str {
        &self.node.node
    }

    /// Healthy iff every check is passing. One failing check excludes the
    /// instance; an instance without checks is healthy.
    pub fn is_healthy(&self) -> bool {
        self.checks.iter().all(|check| check.status.is_passing())
    }
}

/// Node id and health verdict derived from an `InstanceHealth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInstance {
    pub node_id: String,
    pub healthy: bool,
}

impl From<&InstanceHealth> for ServiceInstance {
    fn from(instance: &InstanceHealth) -> Self {
        Self {
            node_id: instance.node_id().to_string(),
            healthy: instance.is_healthy(),
        }
    }
}

impl From<InstanceHealth> for ServiceInstance {
    fn from(instance: InstanceHealth) -> Self {
        let healthy = instance.is_healthy();
        Self {
            node_id: instance.node.node,
            healthy,
        }
    }
}

/// Client for a service-discovery catalog.
///
/// Implementations must be safe to call concurrently; the matchmaker shares
/// one client across every resolve call.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// List every registered instance of `service` together with its checks.
    async fn list_instances(&self, service: &str) -> Result<Vec<InstanceHealth>>;
}
