//! Pass-through exchange for already qualified addresses.

use super::RoutingTarget;

/// The topic is both routing key and node; no registry interaction.
pub(super) fn resolve(topic: &str) -> Vec<RoutingTarget> {
    vec![RoutingTarget::new(topic, topic)]
}
