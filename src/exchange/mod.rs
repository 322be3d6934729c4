//! Exchanges - one resolution strategy per addressing mode.
//!
//! Each exchange turns a topic into the list of routing targets the host
//! should address. An empty list is a normal answer meaning "no healthy
//! hosts right now".

mod direct;
mod fanout;
mod topic;

use std::fmt;

use crate::discovery::{InstanceHealth, ServiceInstance};
use crate::error::Result;

pub use fanout::FanoutExchange;
pub use topic::TopicExchange;

/// Resolved address handed back to the host messaging layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutingTarget {
    /// Key the host publishes to.
    pub routing_key: String,
    /// Node the message is delivered to.
    pub node_id: String,
}

impl RoutingTarget {
    pub fn new(routing_key: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            routing_key: routing_key.into(),
            node_id: node_id.into(),
        }
    }

    pub fn into_pair(self) -> (String, String) {
        (self.routing_key, self.node_id)
    }
}

impl From<RoutingTarget> for (String, String) {
    fn from(target: RoutingTarget) -> Self {
        target.into_pair()
    }
}

impl fmt::Display for RoutingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.routing_key, self.node_id)
    }
}

/// Resolution strategy, one variant per addressing mode.
pub enum Exchange {
    /// Topic is already an address; returned as-is.
    Direct,
    /// One random healthy instance.
    Topic(TopicExchange),
    /// Every healthy instance.
    Fanout(FanoutExchange),
}

impl Exchange {
    pub async fn resolve(&self, topic: &str) -> Result<Vec<RoutingTarget>> {
        match self {
            Exchange::Direct => Ok(direct::resolve(topic)),
            Exchange::Topic(exchange) => exchange.resolve(topic).await,
            Exchange::Fanout(exchange) => exchange.resolve(topic).await,
        }
    }

    /// Whether resolving through this exchange contacts the registry.
    pub fn queries_registry(&self) -> bool {
        !matches!(self, Exchange::Direct)
    }
}

impl fmt::Debug for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exchange::Direct => f.write_str("Exchange::Direct"),
            Exchange::Topic(_) => f.write_str("Exchange::Topic"),
            Exchange::Fanout(_) => f.write_str("Exchange::Fanout"),
        }
    }
}

/// Node ids of healthy instances, one per instance, in registry order.
///
/// A node registering the same service twice contributes two entries.
pub(crate) fn healthy_nodes(instances: Vec<InstanceHealth>) -> Vec<String> {
    instances
        .into_iter()
        .map(ServiceInstance::from)
        .filter(|instance| instance.healthy)
        .map(|instance| instance.node_id)
        .collect()
}
