//! Field extraction for a single line.

use fwconv_model::{ExtractedRecord, Schema};

use crate::columns::{ColumnPlan, ColumnSelection};

/// Extracts records from lines according to a precomputed [`ColumnPlan`].
///
/// Positions are character offsets. A line shorter than a field yields the
/// available part of the field, or an empty value when the field starts past
/// the end of the line.
#[derive(Debug, Clone)]
pub struct Extractor {
    plan: ColumnPlan,
}

impl Extractor {
    /// Extractor emitting the kept fields of `schema`.
    pub fn new(schema: &Schema) -> Self {
        Self::with_selection(schema, ColumnSelection::Kept)
    }

    pub fn with_selection(schema: &Schema, selection: ColumnSelection) -> Self {
        Self::with_plan(ColumnPlan::new(schema, selection))
    }

    pub fn with_plan(plan: ColumnPlan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &ColumnPlan {
        &self.plan
    }

    /// Extracts and trims every planned column from `line`, then appends the
    /// plan's constant columns.
    pub fn extract(&self, line: &str) -> ExtractedRecord {
        // Byte offset of every character boundary, including the end of the line.
        let boundaries: Vec<usize> = line
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(line.len()))
            .collect();
        let char_count = boundaries.len() - 1;

        let mut record = ExtractedRecord::with_capacity(self.plan.len());
        for column in self.plan.columns() {
            let start = column.start.min(char_count);
            let end = column.end.min(char_count);
            let value = line[boundaries[start]..boundaries[end]].trim();
            record.insert(column.name.as_str(), value);
        }
        for (name, value) in self.plan.constants() {
            record.insert(name.as_str(), value.as_str());
        }
        record
    }
}

/// Extracts the kept fields of `schema` from one line.
///
/// Builds the column plan on every call; use [`Extractor`] for many lines.
pub fn extract(schema: &Schema, line: &str) -> ExtractedRecord {
    Extractor::new(schema).extract(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fwconv_model::FieldDefinition;

    fn schema(fields: Vec<FieldDefinition>) -> Schema {
        Schema::new(fields).unwrap()
    }

    #[test]
    fn test_dropped_fields_are_excluded() {
        let schema = schema(vec![
            FieldDefinition::new(1, 3, "ID", true),
            FieldDefinition::new(4, 6, "Val", false),
        ]);
        let record = extract(&schema, "AB1XYZ");
        assert_eq!(record.iter().collect::<Vec<_>>(), vec![("ID", "AB1")]);
    }

    #[test]
    fn test_duplicate_names_are_suffixed() {
        let schema = schema(vec![
            FieldDefinition::new(1, 2, "Score", true),
            FieldDefinition::new(3, 4, "Score", true),
        ]);
        let record = extract(&schema, "ABCD");
        assert_eq!(record.get("Score"), Some("AB"));
        assert_eq!(record.get("Score_2"), Some("CD"));
    }

    #[test]
    fn test_short_line_truncates_without_error() {
        let schema = schema(vec![
            FieldDefinition::new(1, 4, "A", true),
            FieldDefinition::new(5, 8, "B", true),
            FieldDefinition::new(20, 25, "C", true),
        ]);
        let record = extract(&schema, "abcdef");
        assert_eq!(record.get("A"), Some("abcd"));
        assert_eq!(record.get("B"), Some("ef"));
        assert_eq!(record.get("C"), Some(""));
    }

    #[test]
    fn test_empty_line_yields_empty_values() {
        let schema = schema(vec![
            FieldDefinition::new(1, 2, "A", true),
            FieldDefinition::new(3, 4, "B", true),
        ]);
        let record = extract(&schema, "");
        assert_eq!(record.values().collect::<Vec<_>>(), vec!["", ""]);
    }

    #[test]
    fn test_values_are_trimmed() {
        let schema = schema(vec![
            FieldDefinition::new(1, 6, "Name", true),
            FieldDefinition::new(7, 10, "Score", true),
        ]);
        let record = extract(&schema, " Ann   042");
        assert_eq!(record.get("Name"), Some("Ann"));
        assert_eq!(record.get("Score"), Some("042"));
    }

    #[test]
    fn test_positions_count_characters_not_bytes() {
        let schema = schema(vec![
            FieldDefinition::new(1, 4, "Name", true),
            FieldDefinition::new(5, 6, "Code", true),
        ]);
        let record = extract(&schema, "Jos\u{e9}AB");
        assert_eq!(record.get("Name"), Some("Jos\u{e9}"));
        assert_eq!(record.get("Code"), Some("AB"));
    }

    #[test]
    fn test_constant_columns_are_appended() {
        let schema = schema(vec![FieldDefinition::new(1, 2, "A", true)]);
        let extractor = Extractor::with_plan(ColumnPlan::with_constants(
            &schema,
            ColumnSelection::Kept,
            [("test_name".to_string(), "staar".to_string())],
        ));
        let record = extractor.extract("xy");
        assert_eq!(
            record.iter().collect::<Vec<_>>(),
            vec![("A", "xy"), ("test_name", "staar")]
        );
    }
}
