//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Documents must be JSON objects
    #[error("Document must be a JSON object")]
    NotAnObject,

    /// An id that is not a 24-digit hex ObjectId
    #[error("Invalid document id '{0}'")]
    InvalidId(String),

    /// A document with the same `_id` already exists
    #[error("Duplicate _id {id} in collection '{collection}'")]
    DuplicateId { collection: String, id: String },

    /// Failure reported by the MongoDB driver
    #[error("Database error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// JSON value could not be encoded as BSON
    #[error("BSON encoding error: {0}")]
    Encode(#[from] bson::ser::Error),
}
