//! Field definitions and the validated schema that owns them.

use serde::{Deserialize, Serialize};

use crate::validation::{SchemaValidationError, Violation, ViolationKind};

/// One positional slice of a fixed-width line.
///
/// `start` and `end` are 1-based, inclusive character positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub start: usize,
    pub end: usize,
    pub output_field: String,
    pub keep: bool,
}

impl FieldDefinition {
    pub fn new(start: usize, end: usize, output_field: impl Into<String>, keep: bool) -> Self {
        Self {
            start,
            end,
            output_field: output_field.into(),
            keep,
        }
    }

    /// Number of characters covered by the field.
    pub fn width(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    /// Semantic checks for an already typed definition.
    ///
    /// `position` is the 1-based index of the field inside its schema.
    pub fn violations(&self, position: usize) -> Vec<Violation> {
        let name = non_empty(&self.output_field);
        let mut violations = Vec::new();
        if self.start == 0 {
            violations.push(Violation::field(
                position,
                name,
                ViolationKind::NotPositive {
                    key: "start",
                    value: 0,
                },
            ));
        }
        if self.end == 0 {
            violations.push(Violation::field(
                position,
                name,
                ViolationKind::NotPositive { key: "end", value: 0 },
            ));
        }
        if self.start > self.end {
            violations.push(Violation::field(
                position,
                name,
                ViolationKind::StartAfterEnd {
                    start: self.start,
                    end: self.end,
                },
            ));
        }
        if name.is_none() {
            violations.push(Violation::field(
                position,
                None,
                ViolationKind::EmptyOutputField,
            ));
        }
        violations
    }
}

/// An ordered, validated list of field definitions.
///
/// Field order defines output column order. The kept-field index is
/// computed once on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldDefinition>,
    kept: Vec<usize>,
}

impl Schema {
    /// Validates `fields` and builds a schema.
    ///
    /// All violations are reported together.
    pub fn new(fields: Vec<FieldDefinition>) -> Result<Self, SchemaValidationError> {
        let mut violations = Vec::new();
        if fields.is_empty() {
            violations.push(Violation::schema(ViolationKind::NoFields));
        }
        for (index, field) in fields.iter().enumerate() {
            violations.extend(field.violations(index + 1));
        }
        if !violations.is_empty() {
            return Err(SchemaValidationError::new(violations));
        }

        let kept = fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.keep)
            .map(|(index, _)| index)
            .collect();
        Ok(Self { fields, kept })
    }

    /// All field definitions in schema order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Fields with `keep = true`, in schema order.
    pub fn kept_fields(&self) -> impl ExactSizeIterator<Item = &FieldDefinition> + '_ {
        self.kept.iter().map(|&index| &self.fields[index])
    }

    /// Schema positions (0-based) of the kept fields.
    pub fn kept_indices(&self) -> &[usize] {
        &self.kept
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false for a constructed schema.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Largest `end` position across all fields.
    pub fn record_width(&self) -> usize {
        self.fields.iter().map(|field| field.end).max().unwrap_or(0)
    }

    pub fn into_fields(self) -> Vec<FieldDefinition> {
        self.fields
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kept_fields_follow_schema_order() {
        let schema = Schema::new(vec![
            FieldDefinition::new(1, 3, "ID", true),
            FieldDefinition::new(4, 6, "Val", false),
            FieldDefinition::new(7, 9, "Name", true),
        ])
        .unwrap();

        let kept: Vec<&str> = schema
            .kept_fields()
            .map(|field| field.output_field.as_str())
            .collect();
        assert_eq!(kept, vec!["ID", "Name"]);
        assert_eq!(schema.kept_indices(), &[0, 2]);
        assert_eq!(schema.record_width(), 9);
    }

    #[test]
    fn test_start_after_end_is_rejected_with_position() {
        let err = Schema::new(vec![
            FieldDefinition::new(1, 3, "ID", true),
            FieldDefinition::new(8, 4, "Score", true),
        ])
        .unwrap_err();

        assert_eq!(err.len(), 1);
        let violation = &err.violations[0];
        assert_eq!(violation.position, Some(2));
        assert_eq!(violation.output_field.as_deref(), Some("Score"));
        assert!(err.to_string().contains("field 2 ('Score')"));
    }

    #[test]
    fn test_all_violations_are_collected() {
        let err = Schema::new(vec![
            FieldDefinition::new(0, 3, "A", true),
            FieldDefinition::new(5, 2, " ", true),
        ])
        .unwrap_err();

        assert_eq!(err.len(), 3);
        assert_eq!(err.for_position(1).count(), 1);
        assert_eq!(err.for_position(2).count(), 2);
    }

    #[test]
    fn test_empty_schema_is_rejected() {
        let err = Schema::new(Vec::new()).unwrap_err();
        assert_eq!(err.violations, vec![Violation::schema(ViolationKind::NoFields)]);
    }

    #[test]
    fn test_width() {
        assert_eq!(FieldDefinition::new(4, 6, "Val", true).width(), 3);
        assert_eq!(FieldDefinition::new(5, 5, "X", true).width(), 1);
    }
}
