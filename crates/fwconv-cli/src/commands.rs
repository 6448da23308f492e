use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use fwconv_core::{
    AdministrationColumns, ColumnSelection, ProcessOptions, process_file_with_options,
};
use fwconv_schema::{
    CsvLayout, LoadOptions, MissingKeep, csv_to_schema_with, export_templates, templates,
    write_schema_yaml,
};

use crate::cli::{AdminColumnsArg, ConvertArgs, CsvToSchemaArgs};
use crate::types::{ConversionSummary, SchemaConversion, TemplateInfo};

/// Result of the `convert` command.
#[derive(Debug)]
pub enum ConvertResult {
    Converted(ConversionSummary),
    Exported(Vec<PathBuf>),
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    if let Some(destination) = &args.export_templates {
        let written = export_templates(destination)
            .with_context(|| format!("export templates to {}", destination.display()))?;
        return Ok(ConvertResult::Exported(written));
    }

    let input = args
        .input
        .clone()
        .context("an input file is required unless --export-templates is given")?;
    let options = process_options(args);
    let outcome = process_file_with_options(&input, &options)
        .with_context(|| format!("convert {}", input.display()))?;
    Ok(ConvertResult::Converted(ConversionSummary::new(input, &outcome)))
}

pub fn process_options(args: &ConvertArgs) -> ProcessOptions {
    ProcessOptions::default()
        .with_output_path(args.output_file.clone())
        .with_schema_path(args.schema.clone())
        .with_schema_folder(args.schema_folder.clone())
        .with_load_options(load_options(args.strict_keep))
        .with_selection(if args.all_columns {
            ColumnSelection::All
        } else {
            ColumnSelection::Kept
        })
        .with_administration_columns(match args.admin_columns {
            AdminColumnsArg::Auto => AdministrationColumns::Auto,
            AdminColumnsArg::Always => AdministrationColumns::Always,
            AdminColumnsArg::Never => AdministrationColumns::Never,
        })
        .with_skip_header(args.skip_header)
        .with_dry_run(args.dry_run)
}

pub fn run_csv_to_schema(args: &CsvToSchemaArgs) -> Result<SchemaConversion> {
    let layout = CsvLayout::with_columns(&args.start_column, &args.end_column, &args.name_column)
        .with_keep_column(&args.keep_column)
        .with_mapped_name_column(args.mapped_name_column.clone())
        .with_normalized_names(!args.raw_names);
    let schema = csv_to_schema_with(&args.csv, &layout, &load_options(args.strict_keep))
        .with_context(|| format!("read layout {}", args.csv.display()))?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_schema_path(&args.csv));
    write_schema_yaml(&schema, &output)
        .with_context(|| format!("write schema {}", output.display()))?;
    info!(fields = schema.len(), output = %output.display(), "schema written");

    Ok(SchemaConversion {
        output,
        fields: schema.len(),
        kept: schema.kept_indices().len(),
    })
}

pub fn run_templates() -> Result<Vec<TemplateInfo>> {
    templates()
        .map(|template| {
            let schema = template
                .schema()
                .with_context(|| format!("load built-in template {}", template.path))?;
            Ok(TemplateInfo {
                path: template.path,
                fields: schema.len(),
                kept: schema.kept_indices().len(),
            })
        })
        .collect()
}

/// `<dir>/<stem>_schema.yaml` next to a CSV layout.
pub fn default_schema_path(csv: &Path) -> PathBuf {
    let stem = csv
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "layout".to_string());
    csv.with_file_name(format!("{stem}_schema.yaml"))
}

fn load_options(strict_keep: bool) -> LoadOptions {
    let policy = if strict_keep {
        MissingKeep::Reject
    } else {
        MissingKeep::DefaultTrue
    };
    LoadOptions::default().with_missing_keep(policy)
}
