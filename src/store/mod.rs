//! # Document Store
//!
//! The seam between the HTTP layer and the database. Every operation takes
//! a collection name as an uninterpreted string and works on schema-less
//! JSON documents.
//!
//! Two backends are provided:
//! - [`MemoryStore`] keeps collections in process memory
//! - [`MongoStore`] forwards to a MongoDB deployment

pub mod convert;
pub mod errors;
pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Name of the identifier attribute every stored document carries
pub const ID_FIELD: &str = "_id";

/// Generic collection operations over a document database
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List the names of all collections
    async fn list_collections(&self) -> StoreResult<Vec<String>>;

    /// Fetch every document in a collection
    ///
    /// An unknown collection yields an empty list.
    async fn find_all(&self, collection: &str) -> StoreResult<Vec<Value>>;

    /// Insert one document, assigning `_id` if it has none
    ///
    /// Returns the document as stored.
    async fn insert(&self, collection: &str, document: Value) -> StoreResult<Value>;

    /// Replace the document with the given id
    ///
    /// The id is taken from the argument; any `_id` inside `document` is
    /// ignored. Returns `None` when no document matched. Never upserts.
    async fn replace(
        &self,
        collection: &str,
        id: &str,
        document: Value,
    ) -> StoreResult<Option<Value>>;

    /// Delete the document with the given id
    ///
    /// Returns whether a document was removed.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool>;

    /// Drop a collection and all of its documents
    ///
    /// Dropping a collection that does not exist succeeds.
    async fn drop_collection(&self, collection: &str) -> StoreResult<()>;
}

/// Store connection settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// MongoDB connection string. When absent the in-memory store is used.
    #[serde(default)]
    pub mongo_uri: Option<String>,

    /// Database name used when the URI names none
    #[serde(default)]
    pub database: Option<String>,
}

impl StoreConfig {
    /// Open the configured backend
    pub async fn connect(&self) -> StoreResult<Arc<dyn DocumentStore>> {
        match &self.mongo_uri {
            Some(uri) => {
                let store = MongoStore::connect(uri, self.database.as_deref()).await?;
                Ok(Arc::new(store))
            }
            None => {
                tracing::warn!("no MongoDB URI configured, using in-memory store");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}

/// Remove the identifier from a replacement body
///
/// Non-object bodies are rejected; documents must be JSON objects.
pub(crate) fn strip_id(document: Value) -> StoreResult<serde_json::Map<String, Value>> {
    match document {
        Value::Object(mut map) => {
            map.remove(ID_FIELD);
            Ok(map)
        }
        _ => Err(StoreError::NotAnObject),
    }
}
