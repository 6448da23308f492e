//! YAML rendering of schemas.

use std::path::Path;

use fwconv_model::{FieldDefinition, Schema};
use serde::Serialize;

use crate::error::{Result, SchemaError};

#[derive(Serialize)]
struct SchemaDocument<'a> {
    fields: &'a [FieldDefinition],
}

/// Renders a schema as a `fields` YAML document.
pub fn schema_to_yaml(schema: &Schema) -> Result<String> {
    let document = SchemaDocument {
        fields: schema.fields(),
    };
    serde_yaml::to_string(&document).map_err(|e| SchemaError::Serialize {
        reason: e.to_string(),
    })
}

/// Writes a schema as a YAML document at `path`.
pub fn write_schema_yaml(schema: &Schema, path: &Path) -> Result<()> {
    let yaml = schema_to_yaml(schema)?;
    std::fs::write(path, yaml).map_err(|e| SchemaError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), fields = schema.len(), "schema written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{LoadOptions, load_schema_str};

    #[test]
    fn test_yaml_round_trip() {
        let schema = Schema::new(vec![
            FieldDefinition::new(1, 3, "ID", true),
            FieldDefinition::new(4, 6, "Reading: Raw Score", false),
        ])
        .unwrap();

        let yaml = schema_to_yaml(&schema).unwrap();
        assert!(yaml.starts_with("fields:"));
        let loaded = load_schema_str(&yaml, "round-trip", &LoadOptions::default()).unwrap();
        assert_eq!(loaded, schema);
    }
}
