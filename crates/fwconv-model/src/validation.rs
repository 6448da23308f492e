//! Validation violations for schema definitions.

use std::fmt;

use thiserror::Error;

/// What is wrong with a field definition (or with the schema as a whole).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// The schema declares no fields at all.
    NoFields,
    /// A `fields` entry is not a key/value mapping.
    NotAMapping,
    /// A required key is absent.
    MissingKey { key: &'static str },
    /// A position key holds something other than an integer.
    NotAnInteger { key: &'static str, found: String },
    /// A position key holds zero or a negative integer.
    NotPositive { key: &'static str, value: i64 },
    /// `start` lies after `end`.
    StartAfterEnd { start: usize, end: usize },
    /// `output_field` is not a string.
    NotAString { key: &'static str, found: String },
    /// `output_field` is empty or whitespace.
    EmptyOutputField,
    /// `keep` holds something other than a boolean.
    NotABoolean { key: &'static str, found: String },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFields => write!(f, "schema defines no fields"),
            Self::NotAMapping => write!(f, "entry is not a mapping"),
            Self::MissingKey { key } => write!(f, "missing required key '{key}'"),
            Self::NotAnInteger { key, found } => {
                write!(f, "key '{key}' must be an integer (found {found})")
            }
            Self::NotPositive { key, value } => {
                write!(f, "key '{key}' must be a positive integer (found {value})")
            }
            Self::StartAfterEnd { start, end } => {
                write!(f, "start {start} is greater than end {end}")
            }
            Self::NotAString { key, found } => {
                write!(f, "key '{key}' must be a string (found {found})")
            }
            Self::EmptyOutputField => write!(f, "key 'output_field' must not be empty"),
            Self::NotABoolean { key, found } => {
                write!(f, "key '{key}' must be a boolean (found {found})")
            }
        }
    }
}

/// A single problem found while validating a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// 1-based position of the offending field; `None` for schema-level problems.
    pub position: Option<usize>,
    /// The field's `output_field`, when it could be read.
    pub output_field: Option<String>,
    pub kind: ViolationKind,
}

impl Violation {
    /// Violation attached to the field at `position` (1-based).
    pub fn field(position: usize, output_field: Option<&str>, kind: ViolationKind) -> Self {
        Self {
            position: Some(position),
            output_field: output_field.map(str::to_string),
            kind,
        }
    }

    /// Violation concerning the schema as a whole.
    pub fn schema(kind: ViolationKind) -> Self {
        Self {
            position: None,
            output_field: None,
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.position, &self.output_field) {
            (Some(position), Some(name)) => write!(f, "field {position} ('{name}'): {}", self.kind),
            (Some(position), None) => write!(f, "field {position}: {}", self.kind),
            (None, _) => write!(f, "{}", self.kind),
        }
    }
}

/// Every violation found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema validation failed: {}", join_violations(.violations))]
pub struct SchemaValidationError {
    pub violations: Vec<Violation>,
}

impl SchemaValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Number of violations collected.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations attached to the field at `position` (1-based).
    pub fn for_position(&self, position: usize) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(move |violation| violation.position == Some(position))
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
