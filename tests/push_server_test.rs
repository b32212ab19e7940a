//! Push endpoint served over a real socket.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use common::logged_in;
use orbdeck::driver::start_push_server;
use orbdeck::state::StateStore;

async fn start() -> (Arc<StateStore>, String) {
    let store = Arc::new(StateStore::new());
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    let (_handle, bound) = start_push_server(addr, Arc::clone(&store)).await.unwrap();
    (store, format!("http://{}", bound))
}

#[tokio::test]
async fn test_post_snapshot_replaces_state() {
    let (store, url) = start().await;
    let body = serde_json::to_string(&logged_in(42, 99)).unwrap();

    let response = reqwest::Client::new()
        .post(format!("{}/", url))
        .header("Content-Type", "application/json")
        .body(body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let current = store.current();
    assert!(current.is_logged_in());
    assert_eq!(current.hp.map(|hp| hp.current), Some(42));
}

#[tokio::test]
async fn test_post_without_content_type_is_accepted() {
    let (store, url) = start().await;

    let response = reqwest::Client::new()
        .post(&url)
        .body(r#"{"player": {"name": "a"}, "runEnergy": 10000}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(store.current().run_energy, Some(10000));
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let (store, url) = start().await;
    store.replace(logged_in(10, 99));

    let response = reqwest::Client::new()
        .post(&url)
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(store.current().hp.map(|hp| hp.current), Some(10));
}

#[tokio::test]
async fn test_other_methods_and_paths_are_not_found() {
    let (store, url) = start().await;
    let client = reqwest::Client::new();

    let get = client.get(&url).send().await.unwrap();
    assert_eq!(get.status().as_u16(), 404);

    let other_path = client
        .post(format!("{}/state", url))
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(other_path.status().as_u16(), 404);
    assert!(!store.current().is_logged_in());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (_store, url) = start().await;

    let response = reqwest::Client::new()
        .post(&url)
        .header("Origin", "http://example.com")
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
