//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use docdash::http_server::{HttpServer, HttpServerConfig};
use docdash::store::{DocumentStore, MemoryStore};
use tokio::net::TcpListener;

/// Serve the API over a fresh in-memory store on an ephemeral port
///
/// Returns the base URL and the store behind it.
pub async fn spawn_server() -> (String, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let base = spawn_server_with(store.clone()).await;
    (base, store)
}

/// Serve the API over the given store on an ephemeral port
pub async fn spawn_server_with(store: Arc<dyn DocumentStore>) -> String {
    let router = HttpServer::with_store(HttpServerConfig::default(), store).router();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}
