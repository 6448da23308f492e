//! End-to-end conversion of one fixed-width file.

use std::path::{Path, PathBuf};
use std::time::Instant;

use fwconv_model::OutputTable;
use fwconv_schema::{LoadOptions, load_schema_with_options};
use tracing::{info, info_span, warn};

use crate::columns::{ColumnPlan, ColumnSelection};
use crate::error::{ProcessError, Result};
use crate::extract::Extractor;
use crate::reader::for_each_line;
use crate::resolve::{
    Administration, ResolutionRule, ResolvedSchema, read_administration, resolve_schema,
};
use crate::writer::write_csv;

/// When the `school_year` and `test_name` columns are appended to the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdministrationColumns {
    /// Only when the administration header selected the schema.
    #[default]
    Auto,
    /// Always; the input must start with an administration header.
    Always,
    Never,
}

/// Options for [`process_file_with_options`].
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Destination CSV; defaults to [`default_output_path`].
    pub output_path: Option<PathBuf>,
    /// Schema file to use, bypassing resolution.
    pub schema_path: Option<PathBuf>,
    /// Folder searched for schemas; defaults to the current directory.
    pub schema_folder: Option<PathBuf>,
    pub load: LoadOptions,
    pub selection: ColumnSelection,
    pub administration_columns: AdministrationColumns,
    /// Drop the first input line before extraction.
    pub skip_header: bool,
    /// Build the table without writing the CSV.
    pub dry_run: bool,
}

impl ProcessOptions {
    #[must_use]
    pub fn with_output_path(mut self, path: Option<PathBuf>) -> Self {
        self.output_path = path;
        self
    }

    #[must_use]
    pub fn with_schema_path(mut self, path: Option<PathBuf>) -> Self {
        self.schema_path = path;
        self
    }

    #[must_use]
    pub fn with_schema_folder(mut self, folder: Option<PathBuf>) -> Self {
        self.schema_folder = folder;
        self
    }

    #[must_use]
    pub fn with_load_options(mut self, load: LoadOptions) -> Self {
        self.load = load;
        self
    }

    #[must_use]
    pub fn with_selection(mut self, selection: ColumnSelection) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub fn with_administration_columns(mut self, mode: AdministrationColumns) -> Self {
        self.administration_columns = mode;
        self
    }

    #[must_use]
    pub fn with_skip_header(mut self, enable: bool) -> Self {
        self.skip_header = enable;
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, enable: bool) -> Self {
        self.dry_run = enable;
        self
    }
}

/// Result of converting one file.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub table: OutputTable,
    pub schema: ResolvedSchema,
    /// Where the CSV was written; `None` on a dry run.
    pub output_path: Option<PathBuf>,
    /// Lines read from the input, including skipped ones.
    pub lines_read: usize,
    /// Lines shorter than the schema's record width.
    pub short_lines: usize,
}

/// Output path used when none is given: `<dir>/<stem>_output.csv`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    input.with_file_name(format!("{stem}_output.csv"))
}

/// Converts `input` to CSV using the schema resolved from `schema_folder`.
///
/// Writes to `output` (or [`default_output_path`]) and returns the table.
pub fn process_file(
    input: &Path,
    output: Option<&Path>,
    schema_folder: Option<&Path>,
) -> Result<OutputTable> {
    let options = ProcessOptions::default()
        .with_output_path(output.map(Path::to_path_buf))
        .with_schema_folder(schema_folder.map(Path::to_path_buf));
    process_file_with_options(input, &options).map(|outcome| outcome.table)
}

/// Converts `input` to CSV.
///
/// The whole input is extracted before the output is opened, and the output
/// is written atomically. Administration columns, when enabled, follow the
/// schema fields.
///
/// # Errors
///
/// [`ProcessError::NoOutputColumns`] when the selection keeps no fields;
/// nothing is read or written in that case.
pub fn process_file_with_options(input: &Path, options: &ProcessOptions) -> Result<ProcessOutcome> {
    let span = info_span!("process_file", input = %input.display());
    let _guard = span.enter();
    let started = Instant::now();

    let resolved = match &options.schema_path {
        Some(path) => ResolvedSchema::new(path.clone(), ResolutionRule::Explicit),
        None => {
            let folder = options
                .schema_folder
                .clone()
                .unwrap_or_else(|| PathBuf::from("."));
            resolve_schema(input, &folder)?
        }
    };
    let schema = load_schema_with_options(&resolved.path, &options.load)?;
    info!(
        schema = %resolved.path.display(),
        rule = %resolved.rule,
        fields = schema.len(),
        "schema resolved"
    );

    if options.selection == ColumnSelection::Kept && schema.kept_indices().is_empty() {
        return Err(ProcessError::NoOutputColumns {
            schema: resolved.path,
        });
    }

    let constants = administration(input, &resolved, options.administration_columns)?
        .map(|administration| administration.columns())
        .into_iter()
        .flatten();
    let extractor = Extractor::with_plan(ColumnPlan::with_constants(
        &schema,
        options.selection,
        constants,
    ));
    let record_width = schema.record_width();
    let mut table = OutputTable::new(extractor.plan().column_names());
    let mut short_lines = 0usize;
    let lines_read = for_each_line(input, |number, line| {
        if (options.skip_header && number == 1) || line.is_empty() {
            return;
        }
        if line.chars().count() < record_width {
            short_lines += 1;
        }
        table.push(extractor.extract(line));
    })?;

    if short_lines > 0 {
        warn!(
            short_lines,
            record_width,
            "lines shorter than the schema; missing positions left empty"
        );
    }

    let output_path = if options.dry_run {
        None
    } else {
        let path = options
            .output_path
            .clone()
            .unwrap_or_else(|| default_output_path(input));
        write_csv(&table, &path)?;
        Some(path)
    };

    info!(
        rows = table.len(),
        columns = table.columns().len(),
        lines_read,
        duration_ms = started.elapsed().as_millis(),
        "file processed"
    );
    Ok(ProcessOutcome {
        table,
        schema: resolved,
        output_path,
        lines_read,
        short_lines,
    })
}

/// Administration whose columns are appended under `mode`.
fn administration(
    input: &Path,
    resolved: &ResolvedSchema,
    mode: AdministrationColumns,
) -> Result<Option<Administration>> {
    match mode {
        AdministrationColumns::Never => Ok(None),
        AdministrationColumns::Auto => Ok(resolved.administration),
        AdministrationColumns::Always => resolved
            .administration
            .or_else(|| read_administration(input))
            .map(Some)
            .ok_or_else(|| ProcessError::FileFormat {
                path: input.to_path_buf(),
                reason: "first line does not start with an MMYY administration code".to_string(),
            }),
    }
}
