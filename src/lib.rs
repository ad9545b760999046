//! docdash - administrative dashboard for a document database
//!
//! A REST API passing collection and document operations straight through
//! to a document store, and a client that browses, filters and exports
//! what the API returns.

pub mod cli;
pub mod dashboard;
pub mod http_server;
pub mod observability;
pub mod store;
