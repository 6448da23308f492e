//! Fixed-width to CSV converter CLI.

use clap::Parser;
use fwconv_cli::cli::{Cli, Command};
use fwconv_cli::commands::{ConvertResult, run_convert, run_csv_to_schema, run_templates};
use fwconv_cli::logging::init_logging;
use fwconv_cli::summary::{print_exported, print_schema_conversion, print_summary, templates_table};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Convert(args) => match run_convert(args) {
            Ok(ConvertResult::Converted(summary)) => {
                print_summary(&summary);
                0
            }
            Ok(ConvertResult::Exported(written)) => {
                print_exported(&written);
                0
            }
            Err(error) => report(&error),
        },
        Command::CsvToSchema(args) => match run_csv_to_schema(args) {
            Ok(conversion) => {
                print_schema_conversion(&conversion);
                0
            }
            Err(error) => report(&error),
        },
        Command::Templates => match run_templates() {
            Ok(templates) => {
                println!("{}", templates_table(&templates));
                0
            }
            Err(error) => report(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}
