//! # In-Memory Store
//!
//! Process-local document store. Collections are kept in name order and
//! documents in insertion order. Collections come into existence on first
//! insert, like they do in MongoDB. Ids are ObjectIds kept as lower-case
//! hex strings.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use super::convert::{parse_id, parse_id_value};
use super::errors::{StoreError, StoreResult};
use super::{strip_id, DocumentStore, ID_FIELD};

type Collection = Vec<Map<String, Value>>;

/// In-memory document store
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, Collection>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn matches_id(doc: &Map<String, Value>, id: &ObjectId) -> bool {
        matches!(doc.get(ID_FIELD), Some(Value::String(s)) if *s == id.to_hex())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        Ok(self.collections.read().keys().cloned().collect())
    }

    async fn find_all(&self, collection: &str) -> StoreResult<Vec<Value>> {
        let collections = self.collections.read();
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default())
    }

    async fn insert(&self, collection: &str, document: Value) -> StoreResult<Value> {
        let Value::Object(mut doc) = document else {
            return Err(StoreError::NotAnObject);
        };

        let oid = match doc.remove(ID_FIELD) {
            Some(id) => parse_id_value(&id)?,
            None => ObjectId::new(),
        };
        let id = Value::String(oid.to_hex());
        let mut with_id = Map::with_capacity(doc.len() + 1);
        with_id.insert(ID_FIELD.to_string(), id.clone());
        with_id.extend(doc);
        let doc = with_id;

        let mut collections = self.collections.write();
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|existing| existing.get(ID_FIELD) == Some(&id)) {
            return Err(StoreError::DuplicateId {
                collection: collection.to_string(),
                id: oid.to_hex(),
            });
        }

        docs.push(doc.clone());
        Ok(Value::Object(doc))
    }

    async fn replace(
        &self,
        collection: &str,
        id: &str,
        document: Value,
    ) -> StoreResult<Option<Value>> {
        let oid = parse_id(id)?;
        let body = strip_id(document)?;

        let mut collections = self.collections.write();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(slot) = docs.iter_mut().find(|doc| Self::matches_id(doc, &oid)) else {
            return Ok(None);
        };

        let mut replaced = Map::with_capacity(body.len() + 1);
        replaced.insert(ID_FIELD.to_string(), Value::String(oid.to_hex()));
        replaced.extend(body);
        *slot = replaced.clone();

        Ok(Some(Value::Object(replaced)))
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let oid = parse_id(id)?;
        let mut collections = self.collections.write();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };

        match docs.iter().position(|doc| Self::matches_id(doc, &oid)) {
            Some(index) => {
                docs.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn drop_collection(&self, collection: &str) -> StoreResult<()> {
        self.collections.write().remove(collection);
        Ok(())
    }
}
