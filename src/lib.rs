//! matchmaker-consul - topic resolution backed by a Consul health catalog
//!
//! Resolves logical message-bus topics into concrete routing targets by
//! querying a live service registry for healthy instances. The host
//! messaging layer owns connections and delivery; this crate only answers
//! "where should a message for this topic go".

pub mod config;
pub mod discovery;
pub mod error;
pub mod exchange;
pub mod matchmaker;
pub mod topic;
pub mod utils;

pub use config::{ConfigError, MatchmakerConfig, RegistryConfig};
pub use discovery::{
    CheckStatus, ConsulRegistry, InstanceHealth, MockRegistry, RegistryClient, RegistryError,
    ServiceInstance,
};
pub use error::{MatchmakerError, Result};
pub use exchange::{Exchange, FanoutExchange, RoutingTarget, TopicExchange};
pub use matchmaker::{Binding, MatchMaker};
pub use topic::AddressingMode;
