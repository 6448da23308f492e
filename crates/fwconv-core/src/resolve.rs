//! Schema resolution for input files.
//!
//! Rules are tried in a fixed order:
//!
//! 1. a schema file whose stem equals the input file stem
//! 2. the `<test>_<year>` schema named by an administration header on the
//!    first input line
//! 3. the only schema file in the folder
//!
//! Anything else is a [`ProcessError::SchemaResolution`].

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use fwconv_schema::is_schema_file;
use walkdir::WalkDir;

use crate::error::{ProcessError, Result};

/// Which rule selected the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionRule {
    /// The caller named the schema file.
    Explicit,
    /// Schema stem equals the input stem.
    ExactStem,
    /// Derived from the administration header of the input.
    AdministrationHeader,
    /// The folder holds exactly one schema.
    SingleSchema,
}

impl fmt::Display for ResolutionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Explicit => "explicit",
            Self::ExactStem => "exact stem",
            Self::AdministrationHeader => "administration header",
            Self::SingleSchema => "single schema",
        };
        f.write_str(label)
    }
}

/// A selected schema file and the rule that selected it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchema {
    pub path: PathBuf,
    pub rule: ResolutionRule,
    /// Set when the administration header selected the schema.
    pub administration: Option<Administration>,
}

impl ResolvedSchema {
    pub fn new(path: PathBuf, rule: ResolutionRule) -> Self {
        Self {
            path,
            rule,
            administration: None,
        }
    }
}

/// Test administration decoded from a data file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Administration {
    pub test_name: &'static str,
    pub school_year: u16,
}

impl Administration {
    /// Stem of the schema describing this administration, e.g. `staar_2024`.
    pub fn schema_stem(&self) -> String {
        format!("{}_{}", self.test_name, self.school_year)
    }

    /// `school_year` and `test_name` output columns with their values.
    pub fn columns(&self) -> [(String, String); 2] {
        [
            ("school_year".to_string(), self.school_year.to_string()),
            ("test_name".to_string(), self.test_name.to_string()),
        ]
    }
}

/// Decodes a `MMYY` administration code at the start of a header line.
///
/// Months below 10 are grade-level `staar` administrations. Later months
/// are `staar_eoc`; months 10 through 14 belong to the following school
/// year.
pub fn parse_administration(header: &str) -> Option<Administration> {
    let code = header.trim_start_matches('\u{feff}').get(..4)?;
    if !code.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let month: u16 = code[..2].parse().ok()?;
    let year: u16 = code[2..].parse().ok()?;
    let mut school_year = 2000 + year;

    let test_name = if month < 10 {
        "staar"
    } else {
        if month < 15 {
            school_year += 1;
        }
        "staar_eoc"
    };
    Some(Administration {
        test_name,
        school_year,
    })
}

/// Deepest level searched below the schema folder: `<test>/<test>_<year>.yaml`.
const MAX_SCHEMA_DEPTH: usize = 2;

/// Lists schema documents in `folder` and its immediate sub-directories,
/// sorted by path.
///
/// Hidden files and directories (names starting with `.`) are skipped.
pub fn list_schema_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(folder)
        .follow_links(true)
        .max_depth(MAX_SCHEMA_DEPTH)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));
    for entry in walker {
        let entry = entry.map_err(|e| ProcessError::FileRead {
            path: e.path().unwrap_or(folder).to_path_buf(),
            source: e.into(),
        })?;
        if entry.file_type().is_file() && is_schema_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Picks the schema in `schema_folder` that applies to `input`.
pub fn resolve_schema(input: &Path, schema_folder: &Path) -> Result<ResolvedSchema> {
    let resolution_error = |reason: String| ProcessError::SchemaResolution {
        input: input.to_path_buf(),
        reason,
    };
    if !schema_folder.is_dir() {
        return Err(resolution_error(format!(
            "schema folder {} does not exist",
            schema_folder.display()
        )));
    }

    let candidates = list_schema_files(schema_folder)?;
    if candidates.is_empty() {
        return Err(resolution_error(format!(
            "no schema files in {}",
            schema_folder.display()
        )));
    }

    if let Some(stem) = file_stem(input)
        && let Some(path) = unique_by_stem(&candidates, stem, input)?
    {
        tracing::debug!(schema = %path.display(), "schema matched input file name");
        return Ok(ResolvedSchema::new(path, ResolutionRule::ExactStem));
    }

    if let Some(administration) = read_administration(input)
        && let Some(path) = unique_by_stem(&candidates, &administration.schema_stem(), input)?
    {
        tracing::debug!(
            schema = %path.display(),
            test_name = administration.test_name,
            school_year = administration.school_year,
            "schema matched administration header"
        );
        return Ok(ResolvedSchema {
            path,
            rule: ResolutionRule::AdministrationHeader,
            administration: Some(administration),
        });
    }

    if let [only] = candidates.as_slice() {
        tracing::debug!(schema = %only.display(), "using the only schema in folder");
        return Ok(ResolvedSchema::new(only.clone(), ResolutionRule::SingleSchema));
    }

    Err(resolution_error(format!(
        "{} schema files in {} and none matches the input name",
        candidates.len(),
        schema_folder.display()
    )))
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|name| name.starts_with('.'))
}

fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|stem| stem.to_str())
}

fn unique_by_stem(candidates: &[PathBuf], stem: &str, input: &Path) -> Result<Option<PathBuf>> {
    let matches: Vec<&PathBuf> = candidates
        .iter()
        .filter(|path| file_stem(path) == Some(stem))
        .collect();
    match matches.as_slice() {
        [] => Ok(None),
        [path] => Ok(Some((*path).clone())),
        _ => Err(ProcessError::SchemaResolution {
            input: input.to_path_buf(),
            reason: format!(
                "schema name '{stem}' is ambiguous: {}",
                matches
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }),
    }
}

/// Decodes the administration code on the first line of `input`, if any.
pub fn read_administration(input: &Path) -> Option<Administration> {
    read_header(input).as_deref().and_then(parse_administration)
}

/// First line of `input`, if it can be read as text.
fn read_header(input: &Path) -> Option<String> {
    let file = File::open(input).ok()?;
    let mut line = String::new();
    BufReader::new(file).read_line(&mut line).ok()?;
    Some(line)
}
