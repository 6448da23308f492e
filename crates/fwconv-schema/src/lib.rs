//! Schema loading and conversion for fixed-width layouts.
//!
//! This crate turns external schema documents into validated
//! [`fwconv_model::Schema`] values.
//!
//! # Features
//!
//! - **YAML Loading**: Parse `fields` documents with exhaustive validation
//! - **CSV Layouts**: Convert `start,end,output_field,keep` tables to schemas and back
//! - **Templates**: Built-in canonical schemas that can be exported to disk
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use fwconv_schema::{load_schema, export_templates};
//!
//! export_templates(Path::new("schemas"))?;
//! let schema = load_schema(Path::new("schemas/staar/staar_2024.yaml"))?;
//! println!("{} kept columns", schema.kept_indices().len());
//! ```

mod csv_layout;
mod document;
mod error;
mod loader;
mod templates;

// === Error Types ===
pub use error::{Result, SchemaError};

// === Loading ===
pub use loader::{
    LoadOptions, MissingKeep, is_schema_file, load_schema, load_schema_str,
    load_schema_with_options,
};

// === Serialisation ===
pub use document::{schema_to_yaml, write_schema_yaml};

// === CSV Layouts ===
pub use csv_layout::{
    CsvLayout, csv_str_to_schema, csv_to_schema, csv_to_schema_with, normalize_output_field,
    schema_to_csv, write_schema_csv,
};

// === Templates ===
pub use templates::{Template, export_templates, template, templates};
