//! # MongoDB Store
//!
//! Forwards every operation to the MongoDB driver using an untyped
//! `Collection<Document>` handle per collection name.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use futures_util::TryStreamExt;
use mongodb::options::{ClientOptions, FindOneAndReplaceOptions, ReturnDocument};
use mongodb::{Client, Collection, Database};
use serde_json::Value;

use super::convert::{document_to_json, id_filter, json_to_document};
use super::errors::{StoreError, StoreResult};
use super::{strip_id, DocumentStore, ID_FIELD};

/// Database used when neither the URI nor the configuration names one
pub const DEFAULT_DATABASE: &str = "test";

/// MongoDB-backed document store
#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect to a MongoDB deployment
    ///
    /// The database is the one named in the URI, else `database`, else
    /// [`DEFAULT_DATABASE`].
    pub async fn connect(uri: &str, database: Option<&str>) -> StoreResult<Self> {
        let options = ClientOptions::parse(uri).await?;
        let name = resolve_database(&options, database);
        let client = Client::with_options(options)?;
        let db = client.database(&name);

        tracing::info!(database = %name, "MongoDB connected");
        Ok(Self { db })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

fn resolve_database(options: &ClientOptions, configured: Option<&str>) -> String {
    options
        .default_database
        .as_deref()
        .or(configured)
        .unwrap_or(DEFAULT_DATABASE)
        .to_string()
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        Ok(self.db.list_collection_names(None).await?)
    }

    async fn find_all(&self, collection: &str) -> StoreResult<Vec<Value>> {
        let cursor = self.collection(collection).find(None, None).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(document_to_json).collect())
    }

    async fn insert(&self, collection: &str, document: Value) -> StoreResult<Value> {
        let Value::Object(map) = document else {
            return Err(StoreError::NotAnObject);
        };

        let mut doc = json_to_document(&map)?;
        if !doc.contains_key(ID_FIELD) {
            doc.insert(ID_FIELD, Bson::ObjectId(ObjectId::new()));
        }

        self.collection(collection).insert_one(&doc, None).await?;
        Ok(document_to_json(doc))
    }

    async fn replace(
        &self,
        collection: &str,
        id: &str,
        document: Value,
    ) -> StoreResult<Option<Value>> {
        let replacement = json_to_document(&strip_id(document)?)?;
        let options = FindOneAndReplaceOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let replaced = self
            .collection(collection)
            .find_one_and_replace(id_filter(id)?, &replacement, options)
            .await?;

        Ok(replaced.map(document_to_json))
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let result = self
            .collection(collection)
            .delete_one(id_filter(id)?, None)
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn drop_collection(&self, collection: &str) -> StoreResult<()> {
        self.collection(collection).drop(None).await?;
        Ok(())
    }
}
