//! Integration tests for argument parsing and command execution.

use std::fs;
use std::path::Path;

use clap::{CommandFactory, Parser};
use fwconv_cli::cli::{Cli, Command};
use fwconv_cli::commands::{
    ConvertResult, default_schema_path, process_options, run_convert, run_csv_to_schema,
    run_templates,
};
use fwconv_cli::logging::LogFormat;
use fwconv_cli::summary::{summary_table, templates_table};
use fwconv_core::{AdministrationColumns, ColumnSelection, ResolutionRule};
use fwconv_schema::{MissingKeep, load_schema};
use tempfile::TempDir;
use tracing::level_filters::LevelFilter;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("fwconv").chain(args.iter().copied())).unwrap()
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn subcommands_are_listed() {
    let names: Vec<String> = Cli::command()
        .get_subcommands()
        .map(|command| command.get_name().to_string())
        .filter(|name| name != "help")
        .collect();
    insta::assert_debug_snapshot!(names, @r#"
    [
        "convert",
        "csv-to-schema",
        "templates",
    ]
    "#);
}

#[test]
fn convert_flags_map_to_options() {
    let cli = parse(&[
        "convert",
        "data.txt",
        "--schema",
        "layout.yaml",
        "-o",
        "out.csv",
        "--all-columns",
        "--skip-header",
        "--strict-keep",
        "--admin-columns",
        "always",
        "--dry-run",
    ]);
    let Command::Convert(args) = cli.command else {
        panic!("expected convert");
    };

    let options = process_options(&args);
    assert_eq!(options.schema_path.as_deref(), Some(Path::new("layout.yaml")));
    assert_eq!(options.output_path.as_deref(), Some(Path::new("out.csv")));
    assert_eq!(options.selection, ColumnSelection::All);
    assert_eq!(options.load.missing_keep, MissingKeep::Reject);
    assert_eq!(options.administration_columns, AdministrationColumns::Always);
    assert!(options.skip_header);
    assert!(options.dry_run);

    let Command::Convert(args) = parse(&["convert", "data.txt"]).command else {
        panic!("expected convert");
    };
    assert_eq!(
        process_options(&args).administration_columns,
        AdministrationColumns::Auto
    );
}

#[test]
fn log_flags_build_config() {
    let config = parse(&["--log-level", "debug", "--log-format", "json", "templates"]).log_config();
    assert_eq!(config.level_filter, LevelFilter::DEBUG);
    assert!(!config.use_env_filter);
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.log_file.is_none());

    let config = parse(&["-v", "--color", "never", "templates"]).log_config();
    assert_eq!(config.level_filter, LevelFilter::INFO);
    assert!(!config.use_env_filter);
    assert!(!config.with_ansi);

    let config = parse(&["templates", "--log-file", "run.log"]).log_config();
    assert_eq!(config.level_filter, LevelFilter::WARN);
    assert!(config.use_env_filter);
    assert_eq!(config.log_file.as_deref(), Some(Path::new("run.log")));
}

#[test]
fn convert_requires_input_or_export() {
    assert!(Cli::try_parse_from(["fwconv", "convert"]).is_err());
    assert!(
        Cli::try_parse_from(["fwconv", "convert", "in.txt", "--export-templates", "out"]).is_err()
    );
    assert!(Cli::try_parse_from(["fwconv", "convert", "--export-templates", "out"]).is_ok());
}

#[test]
fn convert_writes_csv_and_summarises() {
    let dir = TempDir::new().unwrap();
    let schema = dir.path().join("layout.yaml");
    fs::write(
        &schema,
        "fields:\n  - {start: 1, end: 3, output_field: ID, keep: true}\n  - {start: 4, end: 6, output_field: Val, keep: false}\n",
    )
    .unwrap();
    let input = dir.path().join("data.txt");
    fs::write(&input, "AB1XYZ\nCD2UVW\n").unwrap();

    let cli = parse(&[
        "convert",
        input.to_str().unwrap(),
        "--schema",
        schema.to_str().unwrap(),
    ]);
    let Command::Convert(args) = cli.command else {
        panic!("expected convert");
    };
    let ConvertResult::Converted(summary) = run_convert(&args).unwrap() else {
        panic!("expected conversion");
    };

    assert_eq!(summary.rule, ResolutionRule::Explicit);
    assert_eq!(summary.columns, vec!["ID"]);
    assert_eq!(summary.rows, 2);
    let output = dir.path().join("data_output.csv");
    assert_eq!(summary.output.as_deref(), Some(output.as_path()));
    assert_eq!(fs::read_to_string(output).unwrap(), "ID\nAB1\nCD2\n");
    assert!(summary_table(&summary).to_string().contains("explicit"));
}

#[test]
fn convert_reports_missing_schema_folder() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data.txt");
    fs::write(&input, "AB1\n").unwrap();
    let missing = dir.path().join("nowhere");

    let cli = parse(&[
        "convert",
        input.to_str().unwrap(),
        "--schema-folder",
        missing.to_str().unwrap(),
    ]);
    let Command::Convert(args) = cli.command else {
        panic!("expected convert");
    };
    let error = run_convert(&args).unwrap_err();

    assert!(format!("{error:#}").contains("does not exist"), "{error:#}");
    assert!(!dir.path().join("data_output.csv").exists());
}

#[test]
fn export_flag_writes_templates() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("a").join("b");

    let cli = parse(&["convert", "--export-templates", target.to_str().unwrap()]);
    let Command::Convert(args) = cli.command else {
        panic!("expected convert");
    };
    let ConvertResult::Exported(written) = run_convert(&args).unwrap() else {
        panic!("expected export");
    };

    assert_eq!(written.len(), 2);
    assert!(target.join("staar").join("staar_2024.yaml").is_file());
}

#[test]
fn csv_layout_becomes_yaml_schema() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("layout.csv");
    fs::write(
        &csv,
        "Begin,Stop,Field Name,Include,Mapped Field Title\n\
         1,2,\"Admin \u{2013} Month\",no,\n\
         3,10,Student Name,yes,student_name\n",
    )
    .unwrap();

    let cli = parse(&[
        "csv-to-schema",
        csv.to_str().unwrap(),
        "--start-column",
        "Begin",
        "--end-column",
        "Stop",
        "--name-column",
        "Field Name",
        "--keep-column",
        "Include",
        "--mapped-name-column",
        "Mapped Field Title",
    ]);
    let Command::CsvToSchema(args) = cli.command else {
        panic!("expected csv-to-schema");
    };
    let conversion = run_csv_to_schema(&args).unwrap();

    assert_eq!(conversion.output, default_schema_path(&csv));
    assert_eq!((conversion.fields, conversion.kept), (2, 1));
    let schema = load_schema(&conversion.output).unwrap();
    assert_eq!(schema.fields()[0].output_field, "Admin - Month");
    assert!(!schema.fields()[0].keep);
    assert_eq!(schema.fields()[1].output_field, "student_name");
}

#[test]
fn templates_are_listed() {
    let templates = run_templates().unwrap();
    let paths: Vec<&str> = templates.iter().map(|template| template.path).collect();

    assert_eq!(
        paths,
        vec!["staar/staar_2024.yaml", "staar_eoc/staar_eoc_2024.yaml"]
    );
    assert!(templates_table(&templates).to_string().contains("staar_eoc"));
}
