//! # Spreadsheet Export
//!
//! Writes the filtered view to an `.xlsx` file. Each document becomes one
//! row; nested objects and arrays are written as their JSON text.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, XlsxError};
use serde_json::{Map, Value};
use thiserror::Error;

/// Excel's limit on worksheet name length
const MAX_SHEET_NAME_LEN: usize = 31;

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing passed the filter
    #[error("No data to export.")]
    NoRows,

    /// The view does not fit in a worksheet
    #[error("Too many {0} for one worksheet")]
    TooLarge(&'static str),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),
}

/// One spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Empty,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
            Value::String(s) => Cell::Text(s.clone()),
            nested => Cell::Text(nested.to_string()),
        }
    }
}

/// A header row plus data rows
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Lay out documents as rows
    ///
    /// Columns are the union of top-level keys in first-seen order.
    pub fn from_documents(docs: &[&Value]) -> ExportResult<Self> {
        if docs.is_empty() {
            return Err(ExportError::NoRows);
        }

        let empty = Map::new();
        let objects: Vec<&Map<String, Value>> = docs
            .iter()
            .map(|doc| doc.as_object().unwrap_or(&empty))
            .collect();

        let mut headers: Vec<String> = Vec::new();
        for obj in &objects {
            for key in obj.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }

        let rows = objects
            .iter()
            .map(|obj| {
                headers
                    .iter()
                    .map(|h| obj.get(h).map(Cell::from).unwrap_or(Cell::Empty))
                    .collect()
            })
            .collect();

        Ok(Self { headers, rows })
    }
}

/// Worksheet name for a collection, following Excel's naming rules
pub fn sheet_name(collection: Option<&str>) -> String {
    let cleaned: String = collection
        .unwrap_or_default()
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim_matches('\'');

    if cleaned.is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Output file name for a collection
pub fn file_name(collection: Option<&str>) -> String {
    match collection {
        Some(name) if !name.is_empty() => {
            let safe: String = name
                .chars()
                .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
                .collect();
            format!("{}.xlsx", safe)
        }
        _ => "export.xlsx".to_string(),
    }
}

/// Write documents to `<dir>/<collection>.xlsx`
///
/// Returns the path written. Zero documents is rejected before anything
/// touches the filesystem.
pub fn write_xlsx(docs: &[&Value], collection: Option<&str>, dir: &Path) -> ExportResult<PathBuf> {
    let sheet = Sheet::from_documents(docs)?;
    let path = dir.join(file_name(collection));

    let mut workbook = Workbook::new();
    {
        let header_format = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name(collection))?;

        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col_num(col)?, header, &header_format)?;
        }

        for (i, row) in sheet.rows.iter().enumerate() {
            let row_num = row_num(i + 1)?;
            for (col, cell) in row.iter().enumerate() {
                let col = col_num(col)?;
                match cell {
                    Cell::Empty => {}
                    Cell::Text(s) => {
                        worksheet.write_string(row_num, col, s)?;
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(row_num, col, *n)?;
                    }
                    Cell::Bool(b) => {
                        worksheet.write_boolean(row_num, col, *b)?;
                    }
                }
            }
        }
    }

    workbook.save(&path)?;
    tracing::info!(path = %path.display(), rows = sheet.rows.len(), "exported spreadsheet");
    Ok(path)
}

fn row_num(index: usize) -> ExportResult<RowNum> {
    RowNum::try_from(index).map_err(|_| ExportError::TooLarge("rows"))
}

fn col_num(index: usize) -> ExportResult<ColNum> {
    ColNum::try_from(index).map_err(|_| ExportError::TooLarge("columns"))
}
