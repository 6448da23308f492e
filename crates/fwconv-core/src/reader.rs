//! Line reading for fixed-width inputs.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::error::{ProcessError, Result};

/// Opens `path` for line reading after rejecting UTF-16 byte order marks.
pub(crate) fn open_lines(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| ProcessError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);
    let head = reader.fill_buf().map_err(|e| ProcessError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let encoding = match head {
        [0xFF, 0xFE, ..] => Some("UTF-16 LE"),
        [0xFE, 0xFF, ..] => Some("UTF-16 BE"),
        _ => None,
    };
    if let Some(encoding) = encoding {
        return Err(ProcessError::FileFormat {
            path: path.to_path_buf(),
            reason: format!("{encoding} encoding is not supported"),
        });
    }
    Ok(reader)
}

/// Calls `visit` with the 1-based line number and text of every line.
///
/// Line terminators (`\n`, `\r\n`) and a leading UTF-8 BOM are removed.
pub(crate) fn for_each_line<F>(path: &Path, mut visit: F) -> Result<usize>
where
    F: FnMut(usize, &str),
{
    let reader = open_lines(path)?;
    let mut count = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            if e.kind() == ErrorKind::InvalidData {
                ProcessError::FileFormat {
                    path: path.to_path_buf(),
                    reason: format!("line {} is not valid UTF-8", index + 1),
                }
            } else {
                ProcessError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        let text = if index == 0 {
            line.strip_prefix('\u{feff}').unwrap_or(&line)
        } else {
            &line
        };
        visit(index + 1, text);
        count += 1;
    }
    Ok(count)
}
