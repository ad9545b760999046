//! Conversion between JSON documents and BSON documents
//!
//! On the way out, ObjectIds become their hex string and dates become
//! RFC 3339 strings. Everything else without a plain JSON form is written
//! as relaxed Extended JSON.
//!
//! Ids are always ObjectIds. Anything else in an id position is rejected
//! with [`StoreError::InvalidId`].

use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use serde_json::{Map, Value};

use super::errors::{StoreError, StoreResult};
use super::ID_FIELD;

/// Convert a BSON value to JSON
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Convert a BSON document to a JSON object
pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

/// Parse a document id
pub fn parse_id(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Parse the `_id` attribute of a JSON document
///
/// Only ObjectId hex strings are ids; numbers, objects and other strings
/// are rejected.
pub fn parse_id_value(value: &Value) -> StoreResult<ObjectId> {
    match value {
        Value::String(id) => parse_id(id),
        other => Err(StoreError::InvalidId(other.to_string())),
    }
}

/// Convert a JSON object to a BSON document
///
/// A supplied `_id` must be ObjectId hex and is stored as an ObjectId.
pub fn json_to_document(map: &Map<String, Value>) -> StoreResult<Document> {
    let oid = map.get(ID_FIELD).map(parse_id_value).transpose()?;

    let mut doc = bson::to_document(map)?;
    if let Some(oid) = oid {
        doc.insert(ID_FIELD, oid);
    }

    Ok(doc)
}

/// Build a filter matching the given id
pub fn id_filter(id: &str) -> StoreResult<Document> {
    let oid = parse_id(id)?;
    Ok(doc! { "_id": oid })
}
