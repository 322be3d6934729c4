//! Consul-backed registry client.
//!
//! Queries the agent's health endpoint and returns every instance with its
//! checks; filtering on health happens in the exchanges. One request per
//! call, no caching and no retry.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use super::registry::{InstanceHealth, RegistryClient, RegistryError, Result};
use crate::config::RegistryConfig;

/// Header carrying the ACL token.
const TOKEN_HEADER: &str = "X-Consul-Token";

/// Registry client for the Consul HTTP API.
pub struct ConsulRegistry {
    client: Client,
    base: Url,
    config: RegistryConfig,
}

impl ConsulRegistry {
    /// Create a client for the agent described by `config`.
    ///
    /// Does not contact the agent; the first request does.
    pub fn new(config: RegistryConfig) -> Result<Self> {
        let address = config.base_url();
        let base = Url::parse(&address).map_err(|e| RegistryError::InvalidAddress {
            address: address.clone(),
            message: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(RegistryError::InvalidAddress {
                address,
                message: "not a base URL".to_string(),
            });
        }

        let client = Client::builder().timeout(config.timeout()).build()?;

        debug!(address = %base, "Consul registry client created");

        Ok(Self {
            client,
            base,
            config,
        })
    }

    /// Base URL of the agent.
    pub fn address(&self) -> &str {
        self.base.as_str()
    }

    /// URL of the health endpoint for `service`, with the name percent-encoded
    /// as a single path segment.
    pub fn health_url(&self, service: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| RegistryError::InvalidAddress {
                address: self.base.to_string(),
                message: "not a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(["v1", "health", "service", service]);
        Ok(url)
    }
}

#[async_trait]
impl RegistryClient for ConsulRegistry {
    async fn list_instances(&self, service: &str) -> Result<Vec<InstanceHealth>> {
        let url = self.health_url(service)?;

        let mut request = self.client.get(url);
        if let Some(dc) = &self.config.datacenter {
            request = request.query(&[("dc", dc.as_str())]);
        }
        if let Some(token) = &self.config.token {
            request = request.header(TOKEN_HEADER, token);
        }

        let response = request.send().await.map_err(|e| {
            warn!(service = %service, error = %e, "Consul health query failed");
            RegistryError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                service = %service,
                status = %status,
                "Consul health query returned error status"
            );
            return Err(RegistryError::Status {
                service: service.to_string(),
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let bytes = response.bytes().await?;
        let instances: Vec<InstanceHealth> =
            serde_json::from_slice(&bytes).map_err(|source| RegistryError::Decode {
                service: service.to_string(),
                source,
            })?;

        debug!(
            service = %service,
            instances = instances.len(),
            "Consul health query returned"
        );

        Ok(instances)
    }
}
