//! Data model for schema-driven fixed-width conversion.
//!
//! # Module Organization
//!
//! - [`schema`]: Field definitions and the validated, immutable [`Schema`]
//! - [`record`]: Extracted records and the [`OutputTable`] they are collected into
//! - [`validation`]: Structured validation violations reported by schema loaders
//!
//! A [`Schema`] can only be obtained through [`Schema::new`], which rejects
//! invalid field definitions, so every live instance is valid.

pub mod record;
pub mod schema;
pub mod validation;

pub use record::{ExtractedRecord, OutputTable};
pub use schema::{FieldDefinition, Schema};
pub use validation::{SchemaValidationError, Violation, ViolationKind};
