//! Observability for docdash
//!
//! Logging goes through `tracing`. The subscriber is installed once at
//! process start by the CLI.

mod logger;

pub use logger::{init_tracing, LogTarget};
