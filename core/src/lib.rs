//! Adapter between the proxy front end and the GLEIF LEI registry.
//!
//! Incoming query values are checked into `Lei`, `Pagination`, `Filters` and
//! `FuzzyQuery` first; nothing reaches the registry otherwise. A `Registry`
//! turns an endpoint and its query pairs into the registry's JSON, with
//! `HttpRegistry` doing it over `ureq` and tests supplying their own.
//! Non-2xx replies, transport failures and non-JSON bodies each map to a
//! `RegistryError` variant. Records and envelopes are never typed here.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{build_url, endpoints, RegistryClient, GLEIF_BASE_URL};
pub use error::{RegistryError, ValidationError};
pub use http::{HttpRequest, HttpResponse};
pub use transport::{HttpRegistry, Registry, DEFAULT_TIMEOUT};
pub use types::{Filters, FuzzyQuery, Lei, Pagination, MAX_PAGE_SIZE};
