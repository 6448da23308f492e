//! Fixed-width field extraction and file processing.
//!
//! # Features
//!
//! - **Column Planning**: Resolve output column names, disambiguating duplicates
//! - **Extraction**: Slice, trim, and filter the fields of one line
//! - **Schema Resolution**: Pick the schema that applies to an input file
//! - **Processing**: Read an input file, extract every line, write CSV atomically
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use fwconv_core::process_file;
//!
//! let table = process_file(Path::new("SF_0524.txt"), None, Some(Path::new("schemas")))?;
//! println!("{} rows", table.len());
//! ```

mod columns;
mod error;
mod extract;
mod processor;
mod reader;
mod resolve;
mod writer;

// === Error Types ===
pub use error::{ProcessError, Result};

// === Extraction ===
pub use columns::{ColumnPlan, ColumnSelection, disambiguate};
pub use extract::{Extractor, extract};

// === Schema Resolution ===
pub use resolve::{
    Administration, ResolutionRule, ResolvedSchema, list_schema_files, parse_administration,
    read_administration, resolve_schema,
};

// === Processing ===
pub use processor::{
    AdministrationColumns, ProcessOptions, ProcessOutcome, default_output_path, process_file,
    process_file_with_options,
};
pub use writer::{table_to_csv, write_csv};
