//! Export of the currently loaded audit log page
//!
//! Supports:
//! - Column specs addressing entry fields by dotted wire path (`admin.email`)
//! - CSV output via the `csv` crate
//! - JSON output as an array of header → cell objects
//!
//! Only the entries already fetched for the current page are exported, not
//! the full server-side result set.

use std::str::FromStr;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::AuditLogEntry;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {} (use csv or json)", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Formats a cell from the raw JSON value at the column's path
pub type CellFormatter = fn(&Value) -> String;

/// One exported column
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    /// Dotted path into the entry's wire representation, e.g. `admin.name`
    pub key: String,
    pub header: String,
    pub formatter: Option<CellFormatter>,
}

impl ColumnSpec {
    pub fn new(key: &str, header: &str) -> Self {
        Self {
            key: key.to_string(),
            header: header.to_string(),
            formatter: None,
        }
    }

    pub fn with_formatter(mut self, formatter: CellFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    fn cell(&self, entry: &Value) -> String {
        let value = lookup(entry, &self.key);
        match (value, self.formatter) {
            (Some(v), Some(format)) => format(v),
            (Some(v), None) => plain_cell(v),
            (None, _) => String::new(),
        }
    }
}

/// Headers plus one row of cells per entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| Error::InvalidData(format!("Failed to flush CSV: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| Error::InvalidData(format!("CSV output is not UTF-8: {}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        let records: Vec<Value> = self
            .rows
            .iter()
            .map(|row| {
                let object = self
                    .headers
                    .iter()
                    .zip(row)
                    .map(|(h, c)| (h.clone(), Value::String(c.clone())))
                    .collect::<serde_json::Map<_, _>>();
                Value::Object(object)
            })
            .collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }

    pub fn render(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Csv => self.to_csv(),
            ExportFormat::Json => self.to_json(),
        }
    }
}

/// Columns used when the caller does not supply its own
pub fn default_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("createdAt", "Date").with_formatter(format_timestamp),
        ColumnSpec::new("admin.name", "Admin"),
        ColumnSpec::new("admin.email", "Email"),
        ColumnSpec::new("actionType", "Action").with_formatter(format_label),
        ColumnSpec::new("targetType", "Target Type").with_formatter(format_label),
        ColumnSpec::new("targetId", "Target ID"),
        ColumnSpec::new("description", "Description"),
    ]
}

/// Build export rows for the loaded entries
pub fn export_rows(columns: &[ColumnSpec], entries: &[AuditLogEntry]) -> Result<ExportTable> {
    let headers = columns.iter().map(|c| c.header.clone()).collect();
    let rows = entries
        .iter()
        .map(|entry| -> Result<Vec<String>> {
            let value = serde_json::to_value(entry)?;
            Ok(columns.iter().map(|c| c.cell(&value)).collect())
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ExportTable { headers, rows })
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, segment| current.get(segment))
        .filter(|v| !v.is_null())
}

fn plain_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn format_timestamp(value: &Value) -> String {
    value
        .as_str()
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| crate::time::format_absolute(&dt.with_timezone(&chrono::Utc)))
        .unwrap_or_else(|| plain_cell(value))
}

fn format_label(value: &Value) -> String {
    value
        .as_str()
        .map(crate::taxonomy::humanize)
        .unwrap_or_else(|| plain_cell(value))
}
