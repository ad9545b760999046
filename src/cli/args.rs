//! CLI argument definitions using clap
//!
//! Commands:
//! - docdash serve [--config <path>] [--port <port>] [--mongo-uri <uri>]
//! - docdash collections
//! - docdash fields <collection>
//! - docdash show <collection> [--field <f> --op <op> --value <v>]
//! - docdash add <collection> <json>
//! - docdash edit <collection> <id> <json>
//! - docdash delete <collection> <id>
//! - docdash drop <collection>
//! - docdash export <collection> [--out-dir <dir>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::dashboard::DEFAULT_API_URL;

/// docdash - administrative dashboard for a document database
#[derive(Parser, Debug)]
#[command(name = "docdash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the API lives
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Base URL of the docdash API
    #[arg(long, env = "DOCDASH_API", default_value = DEFAULT_API_URL)]
    pub api: String,
}

/// Client-side filter over the loaded collection
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Field to filter on
    #[arg(long)]
    pub field: Option<String>,

    /// equals, contains, startsWith, endsWith, greaterThan or lessThan
    #[arg(long = "op", default_value = "equals")]
    pub operator: String,

    /// Value to compare against
    #[arg(long)]
    pub value: Option<String>,
}

/// Server settings; flags override the config file
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// MongoDB connection string; the in-memory store is used without one
    #[arg(long, env = "MONGO_URI")]
    pub mongo_uri: Option<String>,

    /// Database name when the URI names none
    #[arg(long)]
    pub database: Option<String>,

    /// Allowed CORS origin (repeatable); any origin when none given
    #[arg(long = "cors-origin")]
    pub cors_origins: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the API server
    Serve(ServeArgs),

    /// List collections
    Collections {
        #[command(flatten)]
        api: ApiArgs,
    },

    /// List the filterable fields of a collection
    Fields {
        collection: String,

        #[command(flatten)]
        api: ApiArgs,
    },

    /// Show the documents of a collection
    Show {
        collection: String,

        #[command(flatten)]
        filter: FilterArgs,

        /// Print the documents as one JSON array
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        api: ApiArgs,
    },

    /// Insert a document given as JSON text
    Add {
        collection: String,
        document: String,

        #[command(flatten)]
        api: ApiArgs,
    },

    /// Replace a document with JSON text
    Edit {
        collection: String,
        id: String,
        document: String,

        #[command(flatten)]
        api: ApiArgs,
    },

    /// Delete a document
    Delete {
        collection: String,
        id: String,

        #[command(flatten)]
        api: ApiArgs,
    },

    /// Drop a collection
    Drop {
        collection: String,

        #[command(flatten)]
        api: ApiArgs,
    },

    /// Export the (filtered) documents of a collection to an .xlsx file
    Export {
        collection: String,

        #[command(flatten)]
        filter: FilterArgs,

        /// Directory to write `<collection>.xlsx` into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        #[command(flatten)]
        api: ApiArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
