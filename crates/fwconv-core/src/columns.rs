//! Output column planning.
//!
//! The plan is computed once per schema, before any line is extracted: it
//! fixes which fields are emitted, their character ranges, and their final
//! (disambiguated) column names.

use std::collections::HashSet;

use fwconv_model::Schema;

/// Which schema fields become output columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnSelection {
    /// Only fields with `keep = true`.
    #[default]
    Kept,
    /// Every field, ignoring `keep`.
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlannedColumn {
    pub(crate) name: String,
    /// 0-based inclusive character offset.
    pub(crate) start: usize,
    /// 0-based exclusive character offset.
    pub(crate) end: usize,
}

/// Output columns of a schema, in schema order, followed by any constant
/// columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    columns: Vec<PlannedColumn>,
    /// Final name and value of each constant column.
    constants: Vec<(String, String)>,
}

impl ColumnPlan {
    pub fn new(schema: &Schema, selection: ColumnSelection) -> Self {
        Self::with_constants(schema, selection, Vec::new())
    }

    /// Plan that appends a fixed value to every record after the schema
    /// columns.
    ///
    /// Constant names are disambiguated together with the field names, so a
    /// clash with a schema field suffixes the constant.
    pub fn with_constants(
        schema: &Schema,
        selection: ColumnSelection,
        constants: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let selected: Vec<_> = schema
            .fields()
            .iter()
            .filter(|field| selection == ColumnSelection::All || field.keep)
            .collect();
        let constants: Vec<(String, String)> = constants.into_iter().collect();
        let mut names = disambiguate(
            selected
                .iter()
                .map(|field| field.output_field.as_str())
                .chain(constants.iter().map(|(name, _)| name.as_str())),
        );
        let constant_names = names.split_off(selected.len());

        let columns = selected
            .into_iter()
            .zip(names)
            .map(|(field, name)| PlannedColumn {
                name,
                start: field.start - 1,
                end: field.end,
            })
            .collect();
        let constants = constant_names
            .into_iter()
            .zip(constants)
            .map(|(name, (_, value))| (name, value))
            .collect();
        Self { columns, constants }
    }

    /// Final column names, in output order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .map(|column| column.name.as_str())
            .chain(self.constants.iter().map(|(name, _)| name.as_str()))
    }

    pub fn column_names(&self) -> Vec<String> {
        self.names().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len() + self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn columns(&self) -> &[PlannedColumn] {
        &self.columns
    }

    pub(crate) fn constants(&self) -> &[(String, String)] {
        &self.constants
    }
}

/// Makes column names unique, preserving order.
///
/// The first occurrence of a name keeps it. Later occurrences get the
/// smallest suffix `_2`, `_3`, ... that is neither already assigned nor
/// used literally by another column, so `[Score, Score, Score_2]` becomes
/// `[Score, Score_3, Score_2]`.
pub fn disambiguate<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let names: Vec<&str> = names.into_iter().collect();
    let literal: HashSet<&str> = names.iter().copied().collect();
    let mut assigned: HashSet<String> = HashSet::with_capacity(names.len());
    let mut result = Vec::with_capacity(names.len());

    for name in names {
        if !assigned.contains(name) {
            assigned.insert(name.to_string());
            result.push(name.to_string());
            continue;
        }
        let mut suffix = 2usize;
        let unique = loop {
            let candidate = format!("{name}_{suffix}");
            if !literal.contains(candidate.as_str()) && !assigned.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        assigned.insert(unique.clone());
        result.push(unique);
    }
    result
}
