//! Service discovery for topic resolution.
//!
//! Provides the registry boundary the exchanges query:
//! - `RegistryClient` trait: "list instances of service X with their checks"
//! - `ConsulRegistry`: Consul HTTP health API (`/v1/health/service/<name>`)
//! - `MockRegistry`: in-memory registry with a call log, for tests and embedding

pub mod consul;
pub mod mock;
pub mod registry;

pub use consul::ConsulRegistry;
pub use mock::MockRegistry;
pub use registry::{
    CheckStatus, HealthCheck, InstanceHealth, NodeInfo, RegistryClient, RegistryError,
    ServiceInfo, ServiceInstance,
};
