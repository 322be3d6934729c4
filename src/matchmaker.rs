//! MatchMaker - resolves host topics through an ordered list of bindings.
//!
//! Bindings are registered once, in a fixed order, and the first binding
//! whose addressing mode accepts a topic handles it:
//!
//! ```text
//! fanout~compute  -> Fanout -> every healthy `compute` node
//! compute.host1   -> Direct -> compute.host1, no registry call
//! compute         -> Topic  -> one random healthy `compute` node
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::MatchmakerConfig;
use crate::discovery::{ConsulRegistry, RegistryClient};
use crate::error::{MatchmakerError, Result};
use crate::exchange::{Exchange, FanoutExchange, RoutingTarget, TopicExchange};
use crate::topic::AddressingMode;

/// An addressing mode paired with the exchange that serves it.
#[derive(Debug)]
pub struct Binding {
    mode: AddressingMode,
    exchange: Exchange,
}

impl Binding {
    pub fn new(mode: AddressingMode, exchange: Exchange) -> Self {
        Self { mode, exchange }
    }

    pub fn mode(&self) -> AddressingMode {
        self.mode
    }

    pub fn exchange(&self) -> &Exchange {
        &self.exchange
    }

    pub fn matches(&self, topic: &str) -> bool {
        self.mode.matches(topic)
    }
}

/// Process-wide topic resolver.
///
/// Holds no mutable state: every `resolve` is a fresh registry query, so a
/// single instance can be shared across tasks.
pub struct MatchMaker {
    bindings: Vec<Binding>,
}

impl MatchMaker {
    /// Create a matchmaker backed by the Consul agent in `config`.
    pub fn new(config: &MatchmakerConfig) -> Result<Self> {
        let registry = ConsulRegistry::new(config.registry.clone())?;
        info!(
            registry = %registry.address(),
            "MatchMaker initialized with Consul registry"
        );
        Ok(Self::with_registry(Arc::new(registry)))
    }

    /// Create a matchmaker over any registry client.
    pub fn with_registry(registry: Arc<dyn RegistryClient>) -> Self {
        let bindings = vec![
            Binding::new(
                AddressingMode::Fanout,
                Exchange::Fanout(FanoutExchange::new(Arc::clone(&registry))),
            ),
            Binding::new(AddressingMode::Direct, Exchange::Direct),
            Binding::new(
                AddressingMode::Topic,
                Exchange::Topic(TopicExchange::new(registry)),
            ),
        ];
        Self { bindings }
    }

    /// Registered bindings in match order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Resolve a topic to the targets the host should address.
    ///
    /// `Ok(vec![])` means no healthy hosts; the caller decides whether to
    /// drop the message or report it undeliverable.
    pub async fn resolve(&self, topic: &str) -> Result<Vec<RoutingTarget>> {
        let binding = self
            .bindings
            .iter()
            .find(|binding| binding.matches(topic))
            .ok_or_else(|| MatchmakerError::malformed(topic, "no binding accepts it"))?;

        debug!(topic = %topic, mode = %binding.mode, "Resolving topic");

        binding.exchange.resolve(topic).await
    }

    /// `resolve`, flattened to `(routing_key, node_id)` pairs.
    pub async fn resolve_pairs(&self, topic: &str) -> Result<Vec<(String, String)>> {
        Ok(self
            .resolve(topic)
            .await?
            .into_iter()
            .map(RoutingTarget::into_pair)
            .collect())
    }
}
