//! Dashboard Flow Tests
//!
//! Drives the dashboard against a live API backed by the in-memory store.

mod common;

use docdash::dashboard::{
    document_id, ApiClient, Dashboard, DashboardError, Filter, FilterOperator, NO_MATCHES_NOTICE,
};
use docdash::store::DocumentStore;
use serde_json::{json, Value};

async fn open(base: &str) -> Dashboard {
    Dashboard::new(ApiClient::new(base).unwrap())
}

#[tokio::test]
async fn test_load_and_filter_case_insensitive() {
    let (base, store) = common::spawn_server().await;
    store.insert("users", json!({"name": "Alice", "age": 30})).await.unwrap();
    store.insert("users", json!({"name": "bob", "age": 25})).await.unwrap();
    store.insert("users", json!({"name": "Malik"})).await.unwrap();

    let mut dashboard = open(&base).await;
    assert_eq!(dashboard.refresh_collections().await.unwrap(), ["users"]);

    dashboard.load("users").await.unwrap();
    assert_eq!(dashboard.fields(), ["age", "name"]);
    assert_eq!(dashboard.summary(), "3 documents");

    dashboard.set_filter(Filter::new("name", FilterOperator::Contains, "LI"));
    let names: Vec<&Value> = dashboard.filtered().iter().map(|doc| &doc["name"]).collect();
    assert_eq!(names, [&json!("Alice"), &json!("Malik")]);

    dashboard.set_filter(Filter::new("age", FilterOperator::GreaterThan, "26"));
    assert_eq!(dashboard.filtered().len(), 1);
    assert_eq!(dashboard.summary(), "1 of 3 documents");
}

#[tokio::test]
async fn test_load_resets_filter() {
    let (base, store) = common::spawn_server().await;
    store.insert("users", json!({"name": "Alice"})).await.unwrap();

    let mut dashboard = open(&base).await;
    dashboard.load("users").await.unwrap();
    dashboard.set_filter(Filter::new("name", FilterOperator::Equals, "nobody"));
    assert!(dashboard.filtered().is_empty());
    assert_eq!(dashboard.empty_view_notice(), Some(NO_MATCHES_NOTICE));

    dashboard.load("users").await.unwrap();
    assert!(!dashboard.filter().is_active());
    assert_eq!(dashboard.filtered().len(), 1);
}

#[tokio::test]
async fn test_mutations_refetch() {
    let (base, _store) = common::spawn_server().await;
    let mut dashboard = open(&base).await;
    dashboard.select("notes");

    dashboard.add_document(r#"{"title": "first"}"#).await.unwrap();
    dashboard.add_document(r#"{"title": "second"}"#).await.unwrap();
    assert_eq!(dashboard.documents().len(), 2);

    let id = document_id(&dashboard.documents()[0]).unwrap();
    let text = dashboard.begin_edit(&id).unwrap();
    let edited = text.replace("first", "edited");
    dashboard.save_edit(&id, &edited).await.unwrap();
    assert_eq!(dashboard.documents()[0]["title"], json!("edited"));

    dashboard.delete_document(&id).await.unwrap();
    assert_eq!(dashboard.documents().len(), 1);
    assert_eq!(dashboard.documents()[0]["title"], json!("second"));
}

#[tokio::test]
async fn test_mutation_resets_filter() {
    let (base, store) = common::spawn_server().await;
    store.insert("notes", json!({"title": "keep me"})).await.unwrap();

    let mut dashboard = open(&base).await;
    dashboard.load("notes").await.unwrap();
    dashboard.set_filter(Filter::new("title", FilterOperator::StartsWith, "keep"));
    assert_eq!(dashboard.filtered().len(), 1);

    dashboard.add_document(r#"{"title": "other"}"#).await.unwrap();
    assert_eq!(dashboard.filter(), &Filter::default());
    assert!(!dashboard.filter().is_active());
    assert_eq!(dashboard.documents().len(), 2);
    assert_eq!(dashboard.filtered().len(), 2);
    assert_eq!(dashboard.summary(), "2 documents");
}

#[tokio::test]
async fn test_invalid_json_leaves_collection_untouched() {
    let (base, store) = common::spawn_server().await;
    let mut dashboard = open(&base).await;
    dashboard.select("notes");

    let err = dashboard.add_document("{title: nope}").await.unwrap_err();
    assert!(matches!(err, DashboardError::InvalidJson(_)));
    assert!(store.find_all("notes").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_non_object_reports_notice() {
    let (base, _store) = common::spawn_server().await;
    let mut dashboard = open(&base).await;
    dashboard.select("notes");

    let err = dashboard.add_document("[1, 2]").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid JSON or server error");
}

#[tokio::test]
async fn test_drop_clears_selection() {
    let (base, store) = common::spawn_server().await;
    store.insert("users", json!({"name": "Alice"})).await.unwrap();
    store.insert("logs", json!({"line": 1})).await.unwrap();

    let mut dashboard = open(&base).await;
    dashboard.load("users").await.unwrap();
    dashboard.drop_collection().await.unwrap();

    assert_eq!(dashboard.selected(), None);
    assert!(dashboard.documents().is_empty());
    assert_eq!(dashboard.collections(), ["logs"]);
}

#[tokio::test]
async fn test_unreachable_api_reports_notice() {
    let mut dashboard = open("http://127.0.0.1:9").await;

    let err = dashboard.refresh_collections().await.unwrap_err();
    assert_eq!(err.to_string(), "Error fetching collections");
}

#[tokio::test]
async fn test_export_empty_view() {
    let (base, _store) = common::spawn_server().await;
    let mut dashboard = open(&base).await;
    dashboard.load("empty").await.unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    let err = dashboard.export(dir.path()).unwrap_err();
    assert_eq!(err.to_string(), "No data to export.");
}

#[tokio::test]
async fn test_export_writes_filtered_rows() {
    let (base, store) = common::spawn_server().await;
    store.insert("users", json!({"name": "Alice", "tags": ["a"]})).await.unwrap();
    store.insert("users", json!({"name": "Bob"})).await.unwrap();

    let mut dashboard = open(&base).await;
    dashboard.load("users").await.unwrap();
    dashboard.set_filter(Filter::new("name", FilterOperator::Equals, "alice"));

    let dir = tempfile::TempDir::new().unwrap();
    let path = dashboard.export(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("users.xlsx"));
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}
