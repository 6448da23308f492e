//! Schema document loading with exhaustive validation.
//!
//! Documents are parsed into a [`serde_yaml::Value`] tree and each `fields`
//! entry is checked explicitly, so every problem in the document is reported
//! in a single [`SchemaError::Validation`].

use std::path::Path;

use fwconv_model::{FieldDefinition, Schema, SchemaValidationError, Violation, ViolationKind};
use serde_yaml::{Mapping, Value};

use crate::error::{Result, SchemaError};

/// Policy applied when a field definition omits `keep`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingKeep {
    /// Treat the field as kept.
    #[default]
    DefaultTrue,
    /// Report the omission as a violation.
    Reject,
}

/// Options controlling schema validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub missing_keep: MissingKeep,
}

impl LoadOptions {
    #[must_use]
    pub fn with_missing_keep(mut self, policy: MissingKeep) -> Self {
        self.missing_keep = policy;
        self
    }
}

/// Returns true if `path` has a schema document extension (`.yaml`/`.yml`).
pub fn is_schema_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

/// Loads and validates a schema file with default options.
pub fn load_schema(path: &Path) -> Result<Schema> {
    load_schema_with_options(path, &LoadOptions::default())
}

/// Loads and validates a schema file.
pub fn load_schema_with_options(path: &Path, options: &LoadOptions) -> Result<Schema> {
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_schema_str(&content, &path.display().to_string(), options)
}

/// Parses and validates a schema document held in memory.
///
/// `source_name` is only used in error messages.
pub fn load_schema_str(content: &str, source_name: &str, options: &LoadOptions) -> Result<Schema> {
    let document: Value = serde_yaml::from_str(content).map_err(|e| SchemaError::Format {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })?;
    let entries = fields_sequence(&document).map_err(|reason| SchemaError::Format {
        source_name: source_name.to_string(),
        reason: reason.to_string(),
    })?;

    let schema = validate_entries(entries, options).map_err(|error| SchemaError::Validation {
        source_name: source_name.to_string(),
        error,
    })?;
    tracing::debug!(
        source = source_name,
        fields = schema.len(),
        kept = schema.kept_indices().len(),
        "schema loaded"
    );
    Ok(schema)
}

fn fields_sequence(document: &Value) -> std::result::Result<&[Value], &'static str> {
    let Value::Mapping(root) = document else {
        return Err("top level must be a mapping");
    };
    match root.get("fields") {
        None => Err("missing required key 'fields'"),
        Some(Value::Sequence(entries)) => Ok(entries.as_slice()),
        Some(_) => Err("key 'fields' must be a sequence"),
    }
}

/// Validates raw `fields` entries and builds a schema.
///
/// Shared by the YAML loader and the CSV layout converter.
pub(crate) fn validate_entries(
    entries: &[Value],
    options: &LoadOptions,
) -> std::result::Result<Schema, SchemaValidationError> {
    let mut fields = Vec::with_capacity(entries.len());
    let mut violations = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let position = index + 1;
        let Value::Mapping(entry) = entry else {
            violations.push(Violation::field(position, None, ViolationKind::NotAMapping));
            continue;
        };
        if let Some(field) = check_entry(entry, position, options, &mut violations) {
            fields.push(field);
        }
    }

    if !violations.is_empty() {
        return Err(SchemaValidationError::new(violations));
    }
    Schema::new(fields)
}

fn check_entry(
    entry: &Mapping,
    position: usize,
    options: &LoadOptions,
    violations: &mut Vec<Violation>,
) -> Option<FieldDefinition> {
    let before = violations.len();

    let output_field = match entry.get("output_field") {
        None => {
            violations.push(Violation::field(
                position,
                None,
                ViolationKind::MissingKey { key: "output_field" },
            ));
            None
        }
        Some(Value::String(name)) if name.trim().is_empty() => {
            violations.push(Violation::field(
                position,
                None,
                ViolationKind::EmptyOutputField,
            ));
            None
        }
        Some(Value::String(name)) => Some(name.as_str()),
        Some(other) => {
            violations.push(Violation::field(
                position,
                None,
                ViolationKind::NotAString {
                    key: "output_field",
                    found: describe(other),
                },
            ));
            None
        }
    };

    let start = position_value(entry, "start", position, output_field, violations);
    let end = position_value(entry, "end", position, output_field, violations);
    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        violations.push(Violation::field(
            position,
            output_field,
            ViolationKind::StartAfterEnd { start, end },
        ));
    }

    let keep = match entry.get("keep") {
        None | Some(Value::Null) => match options.missing_keep {
            MissingKeep::DefaultTrue => Some(true),
            MissingKeep::Reject => {
                violations.push(Violation::field(
                    position,
                    output_field,
                    ViolationKind::MissingKey { key: "keep" },
                ));
                None
            }
        },
        Some(Value::Bool(keep)) => Some(*keep),
        Some(other) => {
            violations.push(Violation::field(
                position,
                output_field,
                ViolationKind::NotABoolean {
                    key: "keep",
                    found: describe(other),
                },
            ));
            None
        }
    };

    if violations.len() > before {
        return None;
    }
    Some(FieldDefinition::new(start?, end?, output_field?, keep?))
}

fn position_value(
    entry: &Mapping,
    key: &'static str,
    position: usize,
    output_field: Option<&str>,
    violations: &mut Vec<Violation>,
) -> Option<usize> {
    let kind = match entry.get(key) {
        None => ViolationKind::MissingKey { key },
        Some(Value::Number(number)) => match number.as_i64() {
            Some(value) if value > 0 => match usize::try_from(value) {
                Ok(value) => return Some(value),
                Err(_) => ViolationKind::NotAnInteger {
                    key,
                    found: value.to_string(),
                },
            },
            Some(value) => ViolationKind::NotPositive { key, value },
            None => ViolationKind::NotAnInteger {
                key,
                found: number.to_string(),
            },
        },
        Some(other) => ViolationKind::NotAnInteger {
            key,
            found: describe(other),
        },
    };
    violations.push(Violation::field(position, output_field, kind));
    None
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(value) => value.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => format!("\"{text}\""),
        Value::Sequence(_) => "a sequence".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        Value::Tagged(_) => "a tagged value".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(content: &str) -> Result<Schema> {
        load_schema_str(content, "test.yaml", &LoadOptions::default())
    }

    #[test]
    fn test_load_valid_schema() {
        let schema = load(
            "fields:\n  - {start: 1, end: 3, output_field: ID, keep: true}\n  - {start: 4, end: 6, output_field: Val, keep: false}\n",
        )
        .unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.fields()[1], FieldDefinition::new(4, 6, "Val", false));
        assert_eq!(schema.kept_indices(), &[0]);
    }

    #[test]
    fn test_missing_keep_defaults_to_true() {
        let schema = load("fields:\n  - {start: 1, end: 2, output_field: A}\n").unwrap();
        assert!(schema.fields()[0].keep);
    }

    #[test]
    fn test_missing_keep_rejected_by_policy() {
        let options = LoadOptions::default().with_missing_keep(MissingKeep::Reject);
        let err = load_schema_str(
            "fields:\n  - {start: 1, end: 2, output_field: A}\n",
            "test.yaml",
            &options,
        )
        .unwrap_err();
        let validation = err.validation().unwrap();
        assert_eq!(
            validation.violations[0].kind,
            ViolationKind::MissingKey { key: "keep" }
        );
    }

    #[test]
    fn test_not_a_mapping_is_format_error() {
        assert!(matches!(load("- 1\n- 2\n"), Err(SchemaError::Format { .. })));
        assert!(matches!(load("name: x\n"), Err(SchemaError::Format { .. })));
        assert!(matches!(load("fields: 3\n"), Err(SchemaError::Format { .. })));
        assert!(matches!(load("fields: [\n"), Err(SchemaError::Format { .. })));
    }

    #[test]
    fn test_violations_are_collected_across_fields() {
        let err = load(
            "fields:\n\
             \x20 - {start: 5, end: 2, output_field: Score}\n\
             \x20 - {start: \"a\", output_field: \"\", keep: yes please}\n\
             \x20 - 42\n",
        )
        .unwrap_err();
        let validation = err.validation().unwrap();

        let first: Vec<_> = validation.for_position(1).collect();
        assert_eq!(first.len(), 1);
        assert_eq!(
            first[0].kind,
            ViolationKind::StartAfterEnd { start: 5, end: 2 }
        );
        assert_eq!(first[0].output_field.as_deref(), Some("Score"));

        // empty name, non-integer start, missing end, non-boolean keep
        assert_eq!(validation.for_position(2).count(), 4);
        assert_eq!(validation.for_position(3).count(), 1);
    }

    #[test]
    fn test_non_positive_and_float_positions() {
        let err = load("fields:\n  - {start: 0, end: 2.5, output_field: A}\n").unwrap_err();
        let kinds: Vec<_> = err
            .validation()
            .unwrap()
            .violations
            .iter()
            .map(|v| v.kind.clone())
            .collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::NotPositive {
                    key: "start",
                    value: 0
                },
                ViolationKind::NotAnInteger {
                    key: "end",
                    found: "2.5".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_empty_fields_list_is_invalid() {
        let err = load("fields: []\n").unwrap_err();
        assert_eq!(
            err.validation().unwrap().violations,
            vec![Violation::schema(ViolationKind::NoFields)]
        );
    }

    #[test]
    fn test_is_schema_file() {
        assert!(is_schema_file(Path::new("staar_2024.yaml")));
        assert!(is_schema_file(Path::new("layout.YML")));
        assert!(!is_schema_file(Path::new("layout.csv")));
        assert!(!is_schema_file(Path::new("yaml")));
    }
}
