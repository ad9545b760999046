//! CLI command implementations
//!
//! `serve` boots the API server. Every other command is a thin client:
//! it drives a [`Dashboard`] against a running API, prints the result and
//! exits. Failures surface as the dashboard's one-line notices.

use std::path::Path;

use serde_json::Value;
use tokio::runtime::Runtime;

use crate::dashboard::{ApiClient, Dashboard, Filter, FilterOperator};
use crate::http_server::HttpServer;
use crate::observability::{init_tracing, LogTarget};

use super::args::{ApiArgs, Cli, Command, FilterArgs, ServeArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_documents, write_json, write_lines, write_notice};

/// Parse the command line and run it
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let target = match cli.command {
        Command::Serve(_) => LogTarget::Server,
        _ => LogTarget::Client,
    };
    init_tracing(target);

    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(&args),
        Command::Collections { api } => collections(&api),
        Command::Fields { collection, api } => fields(&api, &collection),
        Command::Show {
            collection,
            filter,
            json,
            api,
        } => show(&api, &collection, &filter, json),
        Command::Add {
            collection,
            document,
            api,
        } => add(&api, &collection, &document),
        Command::Edit {
            collection,
            id,
            document,
            api,
        } => edit(&api, &collection, &id, &document),
        Command::Delete {
            collection,
            id,
            api,
        } => delete(&api, &collection, &id),
        Command::Drop { collection, api } => drop_collection(&api, &collection),
        Command::Export {
            collection,
            filter,
            out_dir,
            api,
        } => export(&api, &collection, &filter, &out_dir),
    }
}

fn runtime() -> CliResult<Runtime> {
    Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to create tokio runtime: {}", e)))
}

fn open_dashboard(api: &ApiArgs) -> CliResult<Dashboard> {
    let client = ApiClient::new(&api.api).map_err(|e| CliError::invalid_argument(e.to_string()))?;
    Ok(Dashboard::new(client))
}

/// Turn filter flags into a filter; missing field or value leaves it inactive
pub fn build_filter(args: &FilterArgs) -> CliResult<Filter> {
    let operator: FilterOperator = args.operator.parse()?;
    Ok(Filter::new(
        args.field.clone().unwrap_or_default(),
        operator,
        args.value.clone().unwrap_or_default(),
    ))
}

/// Start the HTTP API server
///
/// 1. Resolve configuration (file, then flags and environment)
/// 2. Connect the document store
/// 3. Serve until the process is stopped
pub fn serve(args: &ServeArgs) -> CliResult<()> {
    let config = Config::resolve(args)?;
    let rt = runtime()?;

    rt.block_on(async move {
        let store = config
            .store
            .connect()
            .await
            .map_err(|e| CliError::boot_failed(format!("Failed to connect to store: {}", e)))?;

        HttpServer::with_store(config.server, store)
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print collection names, one per line
pub fn collections(api: &ApiArgs) -> CliResult<()> {
    let mut dashboard = open_dashboard(api)?;
    let rt = runtime()?;

    let names = rt.block_on(dashboard.refresh_collections())?;
    write_lines(names)
}

/// Print the filterable fields of a collection
pub fn fields(api: &ApiArgs, collection: &str) -> CliResult<()> {
    let mut dashboard = open_dashboard(api)?;
    let rt = runtime()?;

    rt.block_on(dashboard.load(collection))?;
    write_lines(dashboard.fields())
}

/// Print the documents of a collection that pass the filter
pub fn show(api: &ApiArgs, collection: &str, filter: &FilterArgs, json: bool) -> CliResult<()> {
    let filter = build_filter(filter)?;
    let mut dashboard = open_dashboard(api)?;
    let rt = runtime()?;

    rt.block_on(dashboard.load(collection))?;
    dashboard.set_filter(filter);

    let docs = dashboard.filtered();
    if json {
        write_json(&Value::Array(docs.into_iter().cloned().collect()))?;
    } else {
        write_documents(&docs)?;
    }

    if let Some(notice) = dashboard.empty_view_notice() {
        write_notice(notice)?;
    }
    if dashboard.filter().is_active() {
        write_notice(&format!("Active filter: {}", dashboard.filter()))?;
    }
    write_notice(&format!("{}: {}", collection, dashboard.summary()))
}

/// Insert a document
pub fn add(api: &ApiArgs, collection: &str, document: &str) -> CliResult<()> {
    let mut dashboard = open_dashboard(api)?;
    let rt = runtime()?;

    dashboard.select(collection);
    rt.block_on(dashboard.add_document(document))?;
    write_notice(&format!("Document added. {}: {}", collection, dashboard.summary()))
}

/// Replace a document
pub fn edit(api: &ApiArgs, collection: &str, id: &str, document: &str) -> CliResult<()> {
    let mut dashboard = open_dashboard(api)?;
    let rt = runtime()?;

    dashboard.select(collection);
    rt.block_on(dashboard.save_edit(id, document))?;
    write_notice(&format!("Document {} saved.", id))
}

/// Delete a document
pub fn delete(api: &ApiArgs, collection: &str, id: &str) -> CliResult<()> {
    let mut dashboard = open_dashboard(api)?;
    let rt = runtime()?;

    dashboard.select(collection);
    rt.block_on(dashboard.delete_document(id))?;
    write_notice(&format!("Document {} deleted. {}: {}", id, collection, dashboard.summary()))
}

/// Drop a collection
pub fn drop_collection(api: &ApiArgs, collection: &str) -> CliResult<()> {
    let mut dashboard = open_dashboard(api)?;
    let rt = runtime()?;

    dashboard.select(collection);
    rt.block_on(dashboard.drop_collection())?;
    write_notice(&format!("Collection {} dropped.", collection))?;
    write_lines(dashboard.collections())
}

/// Export the filtered documents of a collection to `<out_dir>/<collection>.xlsx`
pub fn export(api: &ApiArgs, collection: &str, filter: &FilterArgs, out_dir: &Path) -> CliResult<()> {
    let filter = build_filter(filter)?;
    let mut dashboard = open_dashboard(api)?;
    let rt = runtime()?;

    rt.block_on(dashboard.load(collection))?;
    dashboard.set_filter(filter);

    let path = dashboard.export(out_dir)?;
    write_lines([path.display().to_string()])
}
