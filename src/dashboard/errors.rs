//! Dashboard error types
//!
//! Display strings are the notices shown to the user.

use thiserror::Error;

use super::client::ClientError;
use super::export::ExportError;

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Dashboard errors
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Error fetching collections")]
    FetchCollections(#[source] ClientError),

    #[error("Error loading data")]
    LoadData(#[source] ClientError),

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid JSON or server error")]
    AddDocument(#[source] ClientError),

    #[error("Invalid JSON format or server error")]
    SaveEdit(#[source] ClientError),

    #[error("Error deleting document")]
    DeleteDocument(#[source] ClientError),

    #[error("Error dropping collection")]
    DropCollection(#[source] ClientError),

    #[error("No collection selected")]
    NoSelection,

    #[error("No document with id {0} in the current view")]
    UnknownDocument(String),

    #[error("Unknown filter operator '{0}'")]
    UnknownOperator(String),

    #[error(transparent)]
    Export(#[from] ExportError),
}
