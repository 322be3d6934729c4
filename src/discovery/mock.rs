//! Mock registry implementation for testing.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::registry::{InstanceHealth, RegistryClient, RegistryError, Result};

/// In-memory registry that records every service it is asked about.
#[derive(Default)]
pub struct MockRegistry {
    services: RwLock<HashMap<String, Vec<InstanceHealth>>>,
    calls: RwLock<Vec<String>>,
    fail_on_query: RwLock<bool>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `set_service` for constructing fixtures.
    pub fn with_service(mut self, service: &str, instances: Vec<InstanceHealth>) -> Self {
        self.services
            .get_mut()
            .insert(service.to_string(), instances);
        self
    }

    pub async fn set_service(&self, service: &str, instances: Vec<InstanceHealth>) {
        self.services
            .write()
            .await
            .insert(service.to_string(), instances);
    }

    pub async fn set_fail_on_query(&self, fail: bool) {
        *self.fail_on_query.write().await = fail;
    }

    /// Service names queried so far, in call order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

#[async_trait]
impl RegistryClient for MockRegistry {
    async fn list_instances(&self, service: &str) -> Result<Vec<InstanceHealth>> {
        self.calls.write().await.push(service.to_string());

        if *self.fail_on_query.read().await {
            return Err(RegistryError::Unavailable(
                "Mock registry failure".to_string(),
            ));
        }

        Ok(self
            .services
            .read()
            .await
            .get(service)
            .cloned()
            .unwrap_or_default())
    }
}
