//! Blocking transport that executes `HttpRequest`s against the registry.

use std::time::Duration;

use serde_json::Value;

use crate::client::RegistryClient;
use crate::error::RegistryError;
use crate::http::{HttpRequest, HttpResponse};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can answer a registry GET.
///
/// The front end only depends on this trait, so tests can stand in a fake
/// without opening a socket.
pub trait Registry: Send + Sync {
    fn request(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value, RegistryError>;
}

/// `Registry` backed by a real HTTP round trip through `ureq`.
#[derive(Clone)]
pub struct HttpRegistry {
    client: RegistryClient,
    agent: ureq::Agent,
}

impl HttpRegistry {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        // Non-2xx statuses come back as data so `parse_response` can classify them.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self {
            client: RegistryClient::new(base_url),
            agent,
        }
    }

    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, RegistryError> {
        let mut builder = self.agent.get(&req.url);
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder
            .query_pairs(req.query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .call()
            .map_err(|e| RegistryError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| RegistryError::Transport(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

impl Registry for HttpRegistry {
    fn request(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value, RegistryError> {
        let req = self.client.build_request(endpoint, params);
        tracing::debug!(url = %req.url, params = req.query.len(), "registry request");
        let response = self.execute(&req)?;
        tracing::debug!(url = %req.url, status = response.status, "registry response");
        self.client.parse_response(response)
    }
}
