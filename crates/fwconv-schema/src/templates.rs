//! Built-in schema templates.
//!
//! Templates are embedded at compile time using `include_str!()` and
//! exposed through a read-only registry built on first use.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use fwconv_model::Schema;

use crate::error::{Result, SchemaError};
use crate::loader::{LoadOptions, load_schema_str};

/// An embedded schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Path relative to the template root, using `/` separators.
    pub path: &'static str,
    pub content: &'static str,
}

impl Template {
    /// File stem of the template (e.g. `staar_2024`).
    pub fn name(&self) -> &'static str {
        let file = self.path.rsplit('/').next().unwrap_or(self.path);
        file.split_once('.').map_or(file, |(stem, _)| stem)
    }

    /// Parses and validates the template.
    pub fn schema(&self) -> Result<Schema> {
        load_schema_str(self.content, self.path, &LoadOptions::default())
    }
}

const EMBEDDED: &[Template] = &[
    Template {
        path: "staar/staar_2024.yaml",
        content: include_str!("../templates/staar/staar_2024.yaml"),
    },
    Template {
        path: "staar_eoc/staar_eoc_2024.yaml",
        content: include_str!("../templates/staar_eoc/staar_eoc_2024.yaml"),
    },
];

static REGISTRY: LazyLock<BTreeMap<&'static str, Template>> = LazyLock::new(|| {
    EMBEDDED
        .iter()
        .map(|template| (template.path, *template))
        .collect()
});

/// All built-in templates, ordered by path.
pub fn templates() -> impl Iterator<Item = &'static Template> {
    REGISTRY.values()
}

/// Looks up a built-in template by relative path.
pub fn template(path: &str) -> Option<&'static Template> {
    REGISTRY.get(path)
}

/// Writes every built-in template under `destination`, preserving the
/// template sub-directories.
///
/// Missing directories, including intermediate ones, are created. Existing
/// files with the same name are overwritten. Returns the written paths.
pub fn export_templates(destination: &Path) -> Result<Vec<PathBuf>> {
    create_dir(destination)?;

    let mut written = Vec::with_capacity(REGISTRY.len());
    for template in templates() {
        let target = template
            .path
            .split('/')
            .fold(destination.to_path_buf(), |path, part| path.join(part));
        if let Some(parent) = target.parent() {
            create_dir(parent)?;
        }
        std::fs::write(&target, template.content).map_err(|e| SchemaError::Write {
            path: target.clone(),
            source: e,
        })?;
        tracing::debug!(path = %target.display(), "template exported");
        written.push(target);
    }

    tracing::info!(
        destination = %destination.display(),
        count = written.len(),
        "templates exported"
    );
    Ok(written)
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| SchemaError::Directory {
        path: path.to_path_buf(),
        source: e,
    })
}
