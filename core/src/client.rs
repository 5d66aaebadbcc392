//! URL joining, request assembly and reply classification for the registry.
//!
//! Nothing here does I/O. `build_request` pins the `Accept` header the
//! registry's JSON:API expects; `parse_response` decides between data and
//! `RegistryError` from the status alone.

use serde_json::Value;

use crate::error::RegistryError;
use crate::http::{HttpRequest, HttpResponse};

pub const GLEIF_BASE_URL: &str = "https://api.gleif.org/api/v1";

const ACCEPT: &str = "application/vnd.api+json";

pub mod endpoints {
    use crate::types::Lei;

    pub const LEI_RECORDS: &str = "/lei-records";
    pub const FUZZY_COMPLETIONS: &str = "/lei-records/fuzzy-completions";
    pub const COUNTRIES: &str = "/countries";

    pub fn lei_record(lei: &Lei) -> String {
        format!("{LEI_RECORDS}/{lei}")
    }
}

/// Join a base URL and an endpoint with exactly one `/` between them.
pub fn build_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: String,
}

impl RegistryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_request(&self, endpoint: &str, params: &[(String, String)]) -> HttpRequest {
        HttpRequest {
            url: build_url(&self.base_url, endpoint),
            query: params.to_vec(),
            headers: vec![("accept".to_string(), ACCEPT.to_string())],
        }
    }

    /// Any 2xx is success; everything else keeps its status and body text.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, RegistryError> {
        if !response.is_success() {
            return Err(RegistryError::Upstream {
                status: response.status,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body)
            .map_err(|e| RegistryError::Deserialization(e.to_string()))
    }
}
