//! Collection HTTP Routes
//!
//! Raw collection and document endpoints. Collection names and ids are
//! forwarded to the store uninterpreted.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use super::errors::ApiResult;
use crate::store::DocumentStore;

// ==================
// Shared State
// ==================

/// Store handle shared across handlers
pub struct CollectionState {
    pub store: Arc<dyn DocumentStore>,
}

impl CollectionState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

/// Acknowledgement body for delete and drop
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

// ==================
// Collection Routes
// ==================

/// Create collection routes
pub fn collection_routes(state: Arc<CollectionState>) -> Router {
    Router::new()
        .route("/collections", get(list_collections_handler))
        .route(
            "/data/:collection",
            get(list_documents_handler).post(insert_document_handler),
        )
        .route(
            "/data/:collection/:id",
            put(replace_document_handler).delete(delete_document_handler),
        )
        .route("/collection/:collection", delete(drop_collection_handler))
        .with_state(state)
}

async fn list_collections_handler(
    State(state): State<Arc<CollectionState>>,
) -> ApiResult<Json<Vec<String>>> {
    let names = state.store.list_collections().await?;
    Ok(Json(names))
}

async fn list_documents_handler(
    State(state): State<Arc<CollectionState>>,
    Path(collection): Path<String>,
) -> ApiResult<Json<Vec<Value>>> {
    let docs = state.store.find_all(&collection).await?;
    tracing::debug!(%collection, count = docs.len(), "documents fetched");
    Ok(Json(docs))
}

async fn insert_document_handler(
    State(state): State<Arc<CollectionState>>,
    Path(collection): Path<String>,
    Json(document): Json<Value>,
) -> ApiResult<Json<Value>> {
    let stored = state.store.insert(&collection, document).await?;
    tracing::info!(%collection, id = %stored["_id"], "document inserted");
    Ok(Json(stored))
}

/// Responds with the replaced document, or `null` when nothing matched
async fn replace_document_handler(
    State(state): State<Arc<CollectionState>>,
    Path((collection, id)): Path<(String, String)>,
    Json(document): Json<Value>,
) -> ApiResult<Json<Option<Value>>> {
    let replaced = state.store.replace(&collection, &id, document).await?;
    tracing::info!(%collection, %id, matched = replaced.is_some(), "document replaced");
    Ok(Json(replaced))
}

async fn delete_document_handler(
    State(state): State<Arc<CollectionState>>,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult<Json<SuccessResponse>> {
    let deleted = state.store.delete(&collection, &id).await?;
    tracing::info!(%collection, %id, deleted, "document deleted");
    Ok(SuccessResponse::ok())
}

async fn drop_collection_handler(
    State(state): State<Arc<CollectionState>>,
    Path(collection): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    state.store.drop_collection(&collection).await?;
    tracing::info!(%collection, "collection dropped");
    Ok(SuccessResponse::ok())
}
