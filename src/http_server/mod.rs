//! # HTTP Server Module
//!
//! REST API over the document store. Every endpoint is a direct pass-through
//! to a [`DocumentStore`](crate::store::DocumentStore) operation.
//!
//! # Endpoints
//!
//! - `GET /collections` - List collection names
//! - `GET /data/:collection` - Fetch all documents in a collection
//! - `POST /data/:collection` - Insert a document
//! - `PUT /data/:collection/:id` - Replace a document
//! - `DELETE /data/:collection/:id` - Delete a document
//! - `DELETE /collection/:collection` - Drop a collection
//! - `GET /health` - Health check

pub mod collection_routes;
pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
