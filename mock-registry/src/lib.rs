use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LeiRecord {
    pub lei: String,
    pub entity: Entity,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub legal_name: String,
    pub jurisdiction: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct Fixtures {
    pub records: Vec<LeiRecord>,
    pub countries: Vec<Country>,
}

pub type Db = Arc<Fixtures>;

const DEFAULT_PAGE_SIZE: usize = 10;

fn record(lei: &str, legal_name: &str, jurisdiction: &str) -> LeiRecord {
    LeiRecord {
        lei: lei.to_string(),
        entity: Entity {
            legal_name: legal_name.to_string(),
            jurisdiction: jurisdiction.to_string(),
        },
    }
}

fn country(code: &str, name: &str) -> Country {
    Country {
        code: code.to_string(),
        name: name.to_string(),
    }
}

impl Fixtures {
    /// A handful of records and countries, enough to exercise paging and filters.
    pub fn sample() -> Self {
        Self {
            records: vec![
                record("HWUPKR0MPOU8FGXBT394", "Apple Inc.", "US-CA"),
                record("529900T8BM49AURSDO55", "Test Entity Inc.", "US"),
                record("549300XQFX8FNB77HY47", "Apple Computer Trading Co.", "CN"),
                record("213800WAVVOPS85N2205", "Pineapple Holdings Ltd", "GB"),
                record("5299000J2N45DDNE4Y28", "Example Gesellschaft mbH", "DE"),
            ],
            countries: vec![
                country("DE", "Germany"),
                country("FR", "France"),
                country("GB", "United Kingdom"),
                country("US", "United States"),
            ],
        }
    }
}

pub fn app() -> Router {
    app_with(Fixtures::sample())
}

pub fn app_with(fixtures: Fixtures) -> Router {
    let db: Db = Arc::new(fixtures);
    Router::new()
        .route("/lei-records", get(list_lei_records))
        .route("/lei-records/fuzzy-completions", get(fuzzy_completions))
        .route("/lei-records/{lei}", get(get_lei_record))
        .route("/countries", get(list_countries))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Matches GLEIF's `*` wildcard loosely: `*foo*` is a case-insensitive
/// substring test, anything else is a case-insensitive equality test.
fn matches_pattern(pattern: &str, value: &str) -> bool {
    let value = value.to_lowercase();
    let needle = pattern.trim_matches('*').to_lowercase();
    if pattern.contains('*') {
        value.contains(&needle)
    } else {
        value == needle
    }
}

fn record_matches(record: &LeiRecord, key: &str, pattern: &str) -> bool {
    match key {
        "filter[lei]" => matches_pattern(pattern, &record.lei),
        "filter[entity.legalName]" => matches_pattern(pattern, &record.entity.legal_name),
        "filter[entity.jurisdiction]" => matches_pattern(pattern, &record.entity.jurisdiction),
        _ => true,
    }
}

fn page_of<T: Serialize>(items: &[T], params: &[(String, String)]) -> Result<Value, StatusCode> {
    let lookup = |name: &str| {
        params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.parse::<usize>().map_err(|_| StatusCode::BAD_REQUEST))
            .transpose()
    };
    let number = lookup("page[number]")?.unwrap_or(1).max(1);
    let size = lookup("page[size]")?.unwrap_or(DEFAULT_PAGE_SIZE);
    let offset = (number - 1)
        .checked_mul(size)
        .ok_or(StatusCode::BAD_REQUEST)?;
    let data: Vec<&T> = items.iter().skip(offset).take(size).collect();
    Ok(json!({
        "data": data,
        "meta": { "totalCount": items.len() },
    }))
}

async fn list_lei_records(
    State(db): State<Db>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, StatusCode> {
    let matching: Vec<LeiRecord> = db
        .records
        .iter()
        .filter(|r| {
            params
                .iter()
                .filter(|(k, _)| k.starts_with("filter["))
                .all(|(k, v)| record_matches(r, k, v))
        })
        .cloned()
        .collect();
    page_of(&matching, &params).map(Json)
}

async fn get_lei_record(
    State(db): State<Db>,
    Path(lei): Path<String>,
) -> Result<Json<LeiRecord>, (StatusCode, Json<Value>)> {
    db.records
        .iter()
        .find(|r| r.lei == lei)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            tracing::debug!(%lei, "no fixture for lei");
            (
                StatusCode::NOT_FOUND,
                Json(json!({"errors": [{"status": "404", "title": "Not Found"}]})),
            )
        })
}

async fn fuzzy_completions(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    let (Some(field), Some(q)) = (params.get("field"), params.get("q")) else {
        return Err(StatusCode::BAD_REQUEST);
    };
    if field != "entity.legalName" && field != "fulltext" {
        return Err(StatusCode::BAD_REQUEST);
    }
    let q = q.to_lowercase();
    let data: Vec<Value> = db
        .records
        .iter()
        .filter(|r| r.entity.legal_name.to_lowercase().contains(&q))
        .map(|r| {
            json!({
                "type": "fuzzycompletions",
                "attributes": { "value": r.entity.legal_name },
                "relationships": { "lei-records": { "data": { "type": "lei-records", "id": r.lei } } },
            })
        })
        .collect();
    let total = data.len();
    Ok(Json(json!({ "data": data, "meta": { "totalCount": total } })))
}

async fn list_countries(
    State(db): State<Db>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, StatusCode> {
    page_of(&db.countries, &params).map(Json)
}
