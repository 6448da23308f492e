//! Conversion between CSV layout tables and schemas.
//!
//! A layout table lists one field per row. Rows are converted into the same
//! raw entries the YAML loader sees, so both paths share one validator.

use std::path::Path;

use fwconv_model::Schema;
use serde_yaml::{Mapping, Value};

use crate::error::{Result, SchemaError};
use crate::loader::{LoadOptions, validate_entries};

/// Column names used to read a layout table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLayout {
    pub start: String,
    pub end: String,
    pub output_field: String,
    /// Optional; when the column is absent every row omits `keep`.
    pub keep: String,
    /// Optional column holding a preferred output name. An absent column or
    /// an empty cell falls back to the `output_field` column.
    pub mapped_name: Option<String>,
    /// Clean up `output_field` text (dash variants, embedded line breaks).
    pub normalize_names: bool,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            start: "start".to_string(),
            end: "end".to_string(),
            output_field: "output_field".to_string(),
            keep: "keep".to_string(),
            mapped_name: None,
            normalize_names: false,
        }
    }
}

impl CsvLayout {
    /// Layout reading positions and names from custom column headers.
    pub fn with_columns(
        start: impl Into<String>,
        end: impl Into<String>,
        output_field: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            output_field: output_field.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_keep_column(mut self, keep: impl Into<String>) -> Self {
        self.keep = keep.into();
        self
    }

    #[must_use]
    pub fn with_mapped_name_column(mut self, column: Option<String>) -> Self {
        self.mapped_name = column;
        self
    }

    #[must_use]
    pub fn with_normalized_names(mut self, enable: bool) -> Self {
        self.normalize_names = enable;
        self
    }
}

/// Converts a canonical `start,end,output_field,keep` table into a schema.
pub fn csv_to_schema(path: &Path) -> Result<Schema> {
    csv_to_schema_with(path, &CsvLayout::default(), &LoadOptions::default())
}

/// Converts a layout table into a schema using explicit column names.
pub fn csv_to_schema_with(path: &Path, layout: &CsvLayout, options: &LoadOptions) -> Result<Schema> {
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    csv_str_to_schema(&content, &path.display().to_string(), layout, options)
}

/// Converts an in-memory layout table into a schema.
pub fn csv_str_to_schema(
    content: &str,
    source_name: &str,
    layout: &CsvLayout,
    options: &LoadOptions,
) -> Result<Schema> {
    let csv_error = |e: csv::Error| SchemaError::CsvParse {
        source_name: source_name.to_string(),
        source: e,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());
    let headers = reader.headers().map_err(csv_error)?.clone();

    let find = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim_start_matches('\u{feff}').trim() == name)
    };
    let required = |name: &str| {
        find(name).ok_or_else(|| SchemaError::Format {
            source_name: source_name.to_string(),
            reason: format!("missing column '{name}'"),
        })
    };
    let start_idx = required(&layout.start)?;
    let end_idx = required(&layout.end)?;
    let name_idx = required(&layout.output_field)?;
    let keep_idx = find(&layout.keep);
    let mapped_idx = layout.mapped_name.as_deref().and_then(find);

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let mut entry = Mapping::new();
        if let Some(value) = integer_cell(record.get(start_idx)) {
            entry.insert(Value::from("start"), value);
        }
        if let Some(value) = integer_cell(record.get(end_idx)) {
            entry.insert(Value::from("end"), value);
        }
        let mapped = mapped_idx
            .and_then(|idx| record.get(idx))
            .filter(|cell| !cell.trim().is_empty());
        if let Some(name) = mapped.or_else(|| record.get(name_idx)) {
            let name = if layout.normalize_names {
                normalize_output_field(name)
            } else {
                name.to_string()
            };
            entry.insert(Value::from("output_field"), Value::String(name));
        }
        if let Some(value) = keep_idx.and_then(|idx| keep_cell(record.get(idx))) {
            entry.insert(Value::from("keep"), value);
        }
        entries.push(Value::Mapping(entry));
    }

    let schema = validate_entries(&entries, options).map_err(|error| SchemaError::Validation {
        source_name: source_name.to_string(),
        error,
    })?;
    tracing::debug!(
        source = source_name,
        fields = schema.len(),
        "layout table converted"
    );
    Ok(schema)
}

/// Normalises a published field title: dash variants become `-`, line
/// breaks are dropped, surrounding whitespace is trimmed.
pub fn normalize_output_field(value: &str) -> String {
    value
        .replace('\u{2013}', "-")
        .replace(['\r', '\n'], "")
        .trim()
        .to_string()
}

fn integer_cell(cell: Option<&str>) -> Option<Value> {
    let raw = cell?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(value) = raw.parse::<i64>() {
        return Some(Value::from(value));
    }
    // Integral floats such as "12.0".
    match raw.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
            Some(Value::from(value as i64))
        }
        _ => Some(Value::String(raw.to_string())),
    }
}

fn keep_cell(cell: Option<&str>) -> Option<Value> {
    let raw = cell?.trim();
    match raw.to_ascii_lowercase().as_str() {
        "" => None,
        "true" | "yes" | "y" | "1" => Some(Value::Bool(true)),
        "false" | "no" | "n" | "0" => Some(Value::Bool(false)),
        _ => Some(Value::String(raw.to_string())),
    }
}

/// Renders a schema as a canonical `start,end,output_field,keep` table.
pub fn schema_to_csv(schema: &Schema) -> Result<String> {
    let serialize_error = |reason: String| SchemaError::Serialize { reason };
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["start", "end", "output_field", "keep"])
        .map_err(|e| serialize_error(e.to_string()))?;
    for field in schema.fields() {
        writer
            .write_record([
                field.start.to_string(),
                field.end.to_string(),
                field.output_field.clone(),
                field.keep.to_string(),
            ])
            .map_err(|e| serialize_error(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| serialize_error(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| serialize_error(e.to_string()))
}

/// Writes a schema as a canonical layout table at `path`.
pub fn write_schema_csv(schema: &Schema, path: &Path) -> Result<()> {
    let table = schema_to_csv(schema)?;
    std::fs::write(path, table).map_err(|e| SchemaError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
