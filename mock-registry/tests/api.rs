use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_registry::{app, LeiRecord};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- lei-records ---

#[tokio::test]
async fn list_lei_records_default_page() {
    let resp = app().oneshot(get("/lei-records")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["meta"]["totalCount"], 5);
}

#[tokio::test]
async fn list_lei_records_paginates() {
    let resp = app()
        .oneshot(get("/lei-records?page%5Bnumber%5D=2&page%5Bsize%5D=2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["lei"], "549300XQFX8FNB77HY47");
    assert_eq!(body["meta"]["totalCount"], 5);
}

#[tokio::test]
async fn list_lei_records_filters_by_legal_name() {
    let resp = app()
        .oneshot(get("/lei-records?filter%5Bentity.legalName%5D=*Apple*"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    // Pineapple matches too: the wildcard is a case-insensitive substring.
    assert_eq!(body["meta"]["totalCount"], 3);
}

#[tokio::test]
async fn list_lei_records_bad_page_size_returns_400() {
    let resp = app()
        .oneshot(get("/lei-records?page%5Bsize%5D=lots"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_lei_record_found() {
    let resp = app()
        .oneshot(get("/lei-records/HWUPKR0MPOU8FGXBT394"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let record: LeiRecord = body_json(resp).await;
    assert_eq!(record.entity.legal_name, "Apple Inc.");
}

#[tokio::test]
async fn get_lei_record_not_found() {
    let resp = app()
        .oneshot(get("/lei-records/00000000000000000000"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- fuzzy-completions ---

#[tokio::test]
async fn fuzzy_completions_matches_names() {
    let resp = app()
        .oneshot(get("/lei-records/fuzzy-completions?field=entity.legalName&q=apple"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    let values: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["attributes"]["value"].as_str().unwrap())
        .collect();
    assert_eq!(
        values,
        ["Apple Inc.", "Apple Computer Trading Co.", "Pineapple Holdings Ltd"]
    );
}

#[tokio::test]
async fn fuzzy_completions_missing_q_returns_400() {
    let resp = app()
        .oneshot(get("/lei-records/fuzzy-completions?field=entity.legalName"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- countries ---

#[tokio::test]
async fn list_countries_respects_page_size() {
    let resp = app()
        .oneshot(get("/countries?page%5Bsize%5D=3"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["code"], "DE");
    assert_eq!(data[0]["name"], "Germany");
    assert_eq!(body["meta"]["totalCount"], 4);
}
