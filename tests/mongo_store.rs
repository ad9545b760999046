//! MongoDB Store Tests
//!
//! Runs the collection flow against a live MongoDB. Ignored by default:
//!
//! ```text
//! MONGO_URI=mongodb://localhost:27017 cargo test --test mongo_store -- --ignored
//! ```
//!
//! Each test works in uniquely named collections and drops them again.

mod common;

use std::sync::Arc;

use bson::oid::ObjectId;
use docdash::store::{DocumentStore, MongoStore, StoreError};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn connect() -> Option<MongoStore> {
    let Ok(uri) = std::env::var("MONGO_URI") else {
        eprintln!("MONGO_URI not set, skipping");
        return None;
    };
    Some(MongoStore::connect(&uri, None).await.unwrap())
}

fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, ObjectId::new().to_hex())
}

#[tokio::test]
#[ignore]
async fn test_mongo_document_lifecycle() {
    let Some(store) = connect().await else { return };
    let collection = unique("docdash_users");

    let doc = store
        .insert(&collection, json!({"name": "Alice", "age": 30}))
        .await
        .unwrap();
    let id = doc["_id"].as_str().unwrap().to_string();
    assert!(ObjectId::parse_str(&id).is_ok());

    let docs = store.find_all(&collection).await.unwrap();
    assert_eq!(docs, vec![json!({"_id": id, "name": "Alice", "age": 30})]);
    assert!(store.list_collections().await.unwrap().contains(&collection));

    let replaced = store
        .replace(&collection, &id, json!({"_id": "ignored", "name": "Alicia"}))
        .await
        .unwrap();
    assert_eq!(replaced, Some(json!({"_id": id, "name": "Alicia"})));

    let missing = ObjectId::new().to_hex();
    let none = store
        .replace(&collection, &missing, json!({"name": "Nobody"}))
        .await
        .unwrap();
    assert!(none.is_none());

    assert!(store.delete(&collection, &id).await.unwrap());
    assert!(!store.delete(&collection, &id).await.unwrap());
    assert!(store.find_all(&collection).await.unwrap().is_empty());

    store.drop_collection(&collection).await.unwrap();
    assert!(!store.list_collections().await.unwrap().contains(&collection));
}

#[tokio::test]
#[ignore]
async fn test_mongo_supplied_hex_id_is_an_object_id() {
    let Some(store) = connect().await else { return };
    let collection = unique("docdash_ids");
    let oid = ObjectId::new();

    let doc = store
        .insert(&collection, json!({"_id": oid.to_hex(), "n": 1}))
        .await
        .unwrap();
    assert_eq!(doc["_id"], json!(oid.to_hex()));

    // Found again through an ObjectId filter
    let replaced = store
        .replace(&collection, &oid.to_hex(), json!({"n": 2}))
        .await
        .unwrap();
    assert_eq!(replaced, Some(json!({"_id": oid.to_hex(), "n": 2})));

    let malformed = store.insert(&collection, json!({"_id": "user-1"})).await;
    assert!(matches!(malformed, Err(StoreError::InvalidId(_))));
    let malformed = store.delete(&collection, "5").await;
    assert!(matches!(malformed, Err(StoreError::InvalidId(_))));

    store.drop_collection(&collection).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_mongo_drop_absent_collection() {
    let Some(store) = connect().await else { return };
    store.drop_collection(&unique("docdash_absent")).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_mongo_api_flow() {
    let Some(store) = connect().await else { return };
    let base = common::spawn_server_with(Arc::new(store)).await;
    let collection = unique("docdash_api");
    let client = reqwest::Client::new();
    let data_url = format!("{}/data/{}", base, collection);

    let inserted: Value = client
        .post(&data_url)
        .json(&json!({"title": "first"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = inserted["_id"].as_str().unwrap().to_string();

    let docs: Value = client.get(&data_url).send().await.unwrap().json().await.unwrap();
    assert_eq!(docs, json!([{"_id": id, "title": "first"}]));

    let unknown = client
        .put(format!("{}/{}", data_url, ObjectId::new().to_hex()))
        .json(&json!({"title": "nobody"}))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.json::<Value>().await.unwrap(), Value::Null);

    let malformed = client
        .put(format!("{}/not-an-oid", data_url))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(malformed.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let deleted = client
        .delete(format!("{}/{}", data_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.json::<Value>().await.unwrap(), json!({"success": true}));

    let dropped = client
        .delete(format!("{}/collection/{}", base, collection))
        .send()
        .await
        .unwrap();
    assert_eq!(dropped.status(), StatusCode::OK);

    let names: Vec<String> = client
        .get(format!("{}/collections", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!names.contains(&collection));
}
