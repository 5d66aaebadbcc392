//! Front end wired to a real `HttpRegistry` that talks to the mock registry.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{Request, StatusCode};
use gleif_core::HttpRegistry;
use gleif_server::{app, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

fn spawn_mock_registry() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_registry::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, Value) {
    let resp = app(state.clone())
        .oneshot(Request::builder().uri(uri).body(String::new()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn proxies_the_registry_end_to_end() {
    let base = spawn_mock_registry();
    let state = AppState::new(Arc::new(HttpRegistry::new(&base, Duration::from_secs(5))));

    let (status, body) = get(&state, "/lei-records?size=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["totalCount"], 5);

    let (status, body) = get(&state, "/lei-records?filter%5Bentity.jurisdiction%5D=US").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["totalCount"], 1);
    assert_eq!(body["data"][0]["lei"], "529900T8BM49AURSDO55");

    let (status, body) = get(&state, "/lei-records/HWUPKR0MPOU8FGXBT394").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entity"]["legalName"], "Apple Inc.");

    let (status, body) = get(
        &state,
        "/lei-records/fuzzy-completions?field=entity.legalName&q=Pine",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"][0]["attributes"]["value"],
        "Pineapple Holdings Ltd"
    );

    let (status, body) = get(&state, "/countries?page=2&size=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["code"], "GB");

    // Well-formed but unknown: the registry's 404 is not passed through.
    let (status, body) = get(&state, "/lei-records/00000000000000000000").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Internal server error");
}
