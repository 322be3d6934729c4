//! Fanout exchange - broadcast to every healthy instance of a service.

use std::sync::Arc;

use tracing::debug;

use super::{healthy_nodes, RoutingTarget};
use crate::discovery::RegistryClient;
use crate::error::Result;
use crate::topic::fanout_service;

pub struct FanoutExchange {
    registry: Arc<dyn RegistryClient>,
}

impl FanoutExchange {
    pub fn new(registry: Arc<dyn RegistryClient>) -> Self {
        Self { registry }
    }

    /// Resolve `fanout~<service>` to one target per healthy node. Each
    /// target's routing key is the bare node id.
    pub async fn resolve(&self, topic: &str) -> Result<Vec<RoutingTarget>> {
        let service = fanout_service(topic)?;
        let instances = self.registry.list_instances(service).await?;
        let nodes = healthy_nodes(instances);

        debug!(service = %service, nodes = ?nodes, "Fanout for topic");

        Ok(nodes
            .into_iter()
            .map(|node| RoutingTarget::new(node.clone(), node))
            .collect())
    }
}
