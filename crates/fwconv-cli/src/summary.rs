use std::path::{Path, PathBuf};

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{ConversionSummary, SchemaConversion, TemplateInfo};

pub fn print_summary(summary: &ConversionSummary) {
    println!("{}", summary_table(summary));
}

pub fn summary_table(summary: &ConversionSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    table.add_row(vec![label_cell("Input"), path_cell(&summary.input)]);
    table.add_row(vec![label_cell("Schema"), path_cell(&summary.schema)]);
    table.add_row(vec![label_cell("Resolved by"), Cell::new(summary.rule)]);
    table.add_row(vec![
        label_cell("Columns"),
        Cell::new(format!(
            "{} ({})",
            summary.columns.len(),
            summary.columns.join(", ")
        )),
    ]);
    table.add_row(vec![
        label_cell("Rows"),
        Cell::new(summary.rows).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![label_cell("Short lines"), count_cell(summary.short_lines)]);
    table.add_row(vec![label_cell("Output"), output_cell(summary.output.as_ref())]);
    table
}

pub fn print_exported(written: &[PathBuf]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Exported template")]);
    apply_table_style(&mut table);
    for path in written {
        table.add_row(vec![path_cell(path)]);
    }
    println!("{table}");
}

pub fn print_schema_conversion(conversion: &SchemaConversion) {
    println!(
        "Schema: {} ({} fields, {} kept)",
        conversion.output.display(),
        conversion.fields,
        conversion.kept
    );
}

pub fn templates_table(templates: &[TemplateInfo]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Template"),
        header_cell("Fields"),
        header_cell("Kept"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for template in templates {
        table.add_row(vec![
            Cell::new(template.path)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(template.fields),
            Cell::new(template.kept),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn output_cell(path: Option<&PathBuf>) -> Cell {
    match path {
        Some(path) => path_cell(path).fg(Color::Green),
        None => dim_cell("not written (dry run)"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn path_cell(path: &Path) -> Cell {
    Cell::new(path.display())
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
