//! Registry GETs and their replies as plain values.
//!
//! `RegistryClient` turns an endpoint plus query pairs into an `HttpRequest`
//! and classifies an `HttpResponse`; only `HttpRegistry` opens sockets. The
//! query pairs are kept apart from the URL, unencoded.

/// An upstream GET request described as plain data.
///
/// Built by `RegistryClient::build_request`. The registry never mutates state,
/// so GET is the only method this adapter issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

/// Status and body text of a registry reply, headers dropped.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
