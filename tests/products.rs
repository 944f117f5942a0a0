//! Product CRUD endpoints over HTTP.

use std::sync::Arc;

use booster::reload::MemoryConfigSource;
use serde_json::{json, Value};

mod common;

async fn start() -> common::TestApp {
    common::spawn_app(common::test_config(), Arc::new(MemoryConfigSource::default())).await
}

#[tokio::test]
async fn test_empty_list() {
    let app = start().await;
    let res = app.get("/api/products").await;
    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Value>().await.unwrap(), json!([]));
    app.shutdown.trigger();
}

#[tokio::test]
async fn test_create_read_update_delete() {
    let app = start().await;

    let res = app
        .client
        .post(app.url("/api/products"))
        .json(&json!({"name": "iphone", "stock": 5}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    let location = res.headers()["location"].to_str().unwrap().to_string();
    let created: Value = res.json().await.unwrap();
    let id = created["id"].as_u64().unwrap();
    assert_eq!(location, format!("/api/products/{}", id));
    assert_eq!(created["name"], "iphone");
    assert_eq!(created["stock"], 5);

    let fetched: Value = app.get(&location).await.json().await.unwrap();
    assert_eq!(fetched, created);

    let res = app
        .client
        .put(app.url(&location))
        .json(&json!({"name": "android", "stock": 10}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated, json!({"id": id, "name": "android", "stock": 10}));

    let list: Value = app.get("/api/products").await.json().await.unwrap();
    assert_eq!(list, json!([{"id": id, "name": "android", "stock": 10}]));

    let res = app.client.delete(app.url(&location)).send().await.unwrap();
    assert_eq!(res.status(), 204);
    let res = app.client.delete(app.url(&location)).send().await.unwrap();
    assert_eq!(res.status(), 404);

    let list: Value = app.get("/api/products").await.json().await.unwrap();
    assert_eq!(list, json!([]));

    app.shutdown.trigger();
}

#[tokio::test]
async fn test_invalid_create_payloads() {
    let app = start().await;
    let post = |body: String| {
        app.client
            .post(app.url("/api/products"))
            .header("content-type", "application/json")
            .body(body)
            .send()
    };

    let res = post(json!({"stock": 5}).to_string()).await.unwrap();
    assert_eq!(res.status(), 422);
    let body: Value = res.json().await.unwrap();
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert_eq!(body["path"], "/api/products");

    let res = post(json!({"id": 2456, "name": "iphone", "stock": 5}).to_string()).await.unwrap();
    assert_eq!(res.status(), 422);

    let res = post(String::new()).await.unwrap();
    assert_eq!(res.status(), 415);
    assert_eq!(res.json::<Value>().await.unwrap()["path"], "/api/products");

    let res = post("<name>iphone</name><stock>22</stock>".to_string()).await.unwrap();
    assert_eq!(res.status(), 415);

    app.shutdown.trigger();
}

#[tokio::test]
async fn test_invalid_updates() {
    let app = start().await;

    let res = app
        .client
        .put(app.url("/api/products/22222222"))
        .json(&json!({"name": "android", "stock": 10}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(res.json::<Value>().await.unwrap()["path"], "/api/products/22222222");

    let created: Value = app
        .client
        .post(app.url("/api/products"))
        .json(&json!({"name": "iphone", "stock": 5}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_u64().unwrap();
    let path = format!("/api/products/{}", id);

    let res = app
        .client
        .put(app.url(&path))
        .body(r#"{"name":"android", "stock":"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 415);
    assert_eq!(res.json::<Value>().await.unwrap()["path"], path);

    let res = app
        .client
        .put(app.url(&path))
        .json(&json!({"id": id + 1, "name": "android", "stock": 5}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 422);

    let res = app.get("/api/products/not-a-number").await;
    assert_eq!(res.status(), 404);

    app.shutdown.trigger();
}
