//! Terminal output for client commands
//!
//! Results go to stdout; notices go to stderr.

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;
use crate::dashboard::document_id;

/// Write a value as pretty JSON to stdout
pub fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write one line per item to stdout
pub fn write_lines<I, S>(lines: I) -> CliResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{}", line.as_ref())?;
    }
    stdout.flush()?;

    Ok(())
}

/// Write documents as `id` headers followed by pretty JSON bodies
pub fn write_documents(docs: &[&Value]) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    for doc in docs {
        let id = document_id(doc).unwrap_or_else(|| "-".to_string());
        writeln!(stdout, "── {}", id)?;
        writeln!(stdout, "{}", serde_json::to_string_pretty(doc)?)?;
    }
    stdout.flush()?;

    Ok(())
}

/// Write a user notice to stderr
pub fn write_notice(message: &str) -> CliResult<()> {
    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{}", message)?;

    Ok(())
}
