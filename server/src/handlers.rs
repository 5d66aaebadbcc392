//! Route handlers. Each one validates its inputs, then makes at most one
//! registry call.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use gleif_core::{endpoints, Filters, FuzzyQuery, Lei, Pagination};
use serde_json::{json, Value};

use crate::{error::ApiError, AppState};

pub const SERVICE_ID: &str = "gleif-mcp-server";
pub const SERVICE_NAME: &str = "GLEIF MCP Server";

type Params = Vec<(String, String)>;

pub async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": SERVICE_ID}))
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Proxy for the GLEIF LEI registry API",
    }))
}

pub async fn list_lei_records(
    State(state): State<AppState>,
    query: Result<Query<Params>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(raw) = query?;
    let pagination = pagination(&raw)?;
    let filters = Filters::from_pairs(raw.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;

    let mut params = pagination.to_query();
    params.extend(filters.to_query());
    forward(&state, endpoints::LEI_RECORDS.to_string(), params).await
}

pub async fn get_lei_record(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(lei) = path?;
    let lei: Lei = lei.parse()?;
    forward(&state, endpoints::lei_record(&lei), Vec::new()).await
}

pub async fn fuzzy_completions(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(raw) = query?;
    let query = FuzzyQuery::new(
        raw.get("field").map(String::as_str),
        raw.get("q").map(String::as_str),
    )?;
    forward(&state, endpoints::FUZZY_COMPLETIONS.to_string(), query.to_query()).await
}

pub async fn list_countries(
    State(state): State<AppState>,
    query: Result<Query<Params>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(raw) = query?;
    let params = pagination(&raw)?.to_query();
    forward(&state, endpoints::COUNTRIES.to_string(), params).await
}

fn pagination(raw: &Params) -> Result<Pagination, ApiError> {
    let value = |name: &str| raw.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str());
    Ok(Pagination::from_raw(value("page"), value("size"))?)
}

/// Run the blocking registry call off the async executor.
async fn forward(state: &AppState, endpoint: String, params: Params) -> Result<Json<Value>, ApiError> {
    tracing::debug!(%endpoint, params = params.len(), "forwarding to registry");
    let registry = Arc::clone(&state.registry);
    let result = tokio::task::spawn_blocking(move || registry.request(&endpoint, &params))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "registry task failed");
            ApiError::Internal
        })?;
    Ok(Json(result?))
}
