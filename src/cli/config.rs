//! Server configuration file
//!
//! ```json
//! {
//!   "host": "0.0.0.0",
//!   "port": 3001,
//!   "cors_origins": ["http://localhost:5173"],
//!   "mongo_uri": "mongodb://localhost:27017/admin",
//!   "database": "admin"
//! }
//! ```
//!
//! Every key is optional. Command line flags and their environment
//! variables override the file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::args::ServeArgs;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::store::StoreConfig;

/// Configuration for `docdash serve`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub server: HttpServerConfig,

    #[serde(flatten)]
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Load the file named by `--config`, if any, then apply the flags
    pub fn resolve(args: &ServeArgs) -> CliResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(args);
        Ok(config)
    }

    fn apply(&mut self, args: &ServeArgs) {
        if let Some(host) = &args.host {
            self.server.host = host.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if !args.cors_origins.is_empty() {
            self.server.cors_origins = args.cors_origins.clone();
        }
        if let Some(uri) = &args.mongo_uri {
            self.store.mongo_uri = Some(uri.clone());
        }
        if let Some(database) = &args.database {
            self.store.database = Some(database.clone());
        }
    }
}
