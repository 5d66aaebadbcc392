//! Error types for the registry adapter and input validation.
//!
//! # Design
//! `RegistryError` covers everything that can go wrong once a request has been
//! accepted and sent upstream. `ValidationError` covers everything rejected
//! before that point. The two never overlap: a `ValidationError` guarantees no
//! network traffic happened.

use thiserror::Error;

/// Failures talking to the upstream registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced a response (timeout, DNS, refused connection).
    #[error("request error: {0}")]
    Transport(String),

    /// A 2xx response whose body was not valid JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

/// Inputs rejected before any upstream call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid LEI format: {0:?} (expected 20 uppercase alphanumeric characters)")]
    InvalidLei(String),

    #[error("page must be an integer >= 1, got {0:?}")]
    InvalidPage(String),

    #[error("size must be an integer between 1 and {max}, got {value:?}")]
    InvalidSize { value: String, max: u32 },

    #[error("malformed filter key {0:?} (expected filter[<field>])")]
    MalformedFilterKey(String),

    #[error("missing required query parameter {0:?}")]
    MissingParameter(&'static str),
}
