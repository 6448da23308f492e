use std::path::PathBuf;

use fwconv_core::{ProcessOutcome, ResolutionRule};

/// What the `convert` command did, for the summary table.
#[derive(Debug)]
pub struct ConversionSummary {
    pub input: PathBuf,
    pub schema: PathBuf,
    pub rule: ResolutionRule,
    pub columns: Vec<String>,
    pub rows: usize,
    pub short_lines: usize,
    pub output: Option<PathBuf>,
}

impl ConversionSummary {
    pub fn new(input: PathBuf, outcome: &ProcessOutcome) -> Self {
        Self {
            input,
            schema: outcome.schema.path.clone(),
            rule: outcome.schema.rule,
            columns: outcome.table.columns().to_vec(),
            rows: outcome.table.len(),
            short_lines: outcome.short_lines,
            output: outcome.output_path.clone(),
        }
    }
}

/// A schema written by `csv-to-schema`.
#[derive(Debug)]
pub struct SchemaConversion {
    pub output: PathBuf,
    pub fields: usize,
    pub kept: usize,
}

/// One row of the `templates` listing.
#[derive(Debug)]
pub struct TemplateInfo {
    pub path: &'static str,
    pub fields: usize,
    pub kept: usize,
}
