//! Topic exchange - cast to one healthy instance of a service.
//!
//! `compute` resolves to `compute.<node>` on a node chosen uniformly at
//! random among the healthy instances of `compute`.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, warn};

use super::{healthy_nodes, RoutingTarget};
use crate::discovery::RegistryClient;
use crate::error::Result;
use crate::topic::{service_name, TOPIC_SEPARATOR};

pub struct TopicExchange {
    registry: Arc<dyn RegistryClient>,
}

impl TopicExchange {
    pub fn new(registry: Arc<dyn RegistryClient>) -> Self {
        Self { registry }
    }

    /// Resolve to at most one target.
    ///
    /// The registry is queried with the service portion of the topic (before
    /// the first `.`), so `compute.host1` looks up `compute`.
    pub async fn resolve(&self, topic: &str) -> Result<Vec<RoutingTarget>> {
        let service = service_name(topic);
        let instances = self.registry.list_instances(service).await?;
        let mut nodes = healthy_nodes(instances);

        if nodes.is_empty() {
            warn!(topic = %topic, "No active hosts for the topic");
            return Ok(Vec::new());
        }

        let index = rand::rng().random_range(0..nodes.len());
        let node = nodes.swap_remove(index);
        let routing_key = format!("{}{}{}", service, TOPIC_SEPARATOR, node);

        debug!(topic = %topic, node = %node, "Casting to {}", routing_key);

        Ok(vec![RoutingTarget::new(routing_key, node)])
    }
}
