//! Whitespace-delimited matrix text format.
//!
//! One line per row, values separated by single spaces, no header; the
//! matrix shape is inferred from the content. The same format is used for
//! generated inputs and multiplication results.

use std::fs;
use std::path::Path;

use crate::error::{GridmulError, Result};
use crate::matrix::Matrix;

/// Render `matrix` in the text format, one trailing newline per row.
pub fn to_text(matrix: &Matrix) -> String {
    let mut out = String::new();
    for i in 0..matrix.rows() {
        let line: Vec<String> = matrix.row(i).iter().map(i64::to_string).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// Parse matrix text, reporting failures against `path` with 1-based line
/// numbers.
///
/// Empty files, blank interior lines, ragged rows, and non-integer tokens
/// are all rejected.
pub fn parse_text(path: &Path, content: &str) -> Result<Matrix> {
    let mut rows: Vec<Vec<i64>> = Vec::new();
    let mut width: Option<usize> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let mut values = Vec::new();
        for token in raw.split_whitespace() {
            let value = token.parse::<i64>().map_err(|e| GridmulError::Parse {
                path: path.to_path_buf(),
                line,
                reason: format!("invalid integer {token:?}: {e}"),
            })?;
            values.push(value);
        }
        if values.is_empty() {
            return Err(GridmulError::Parse {
                path: path.to_path_buf(),
                line,
                reason: "blank line inside matrix data".to_string(),
            });
        }
        match width {
            None => width = Some(values.len()),
            Some(w) if w != values.len() => {
                return Err(GridmulError::Parse {
                    path: path.to_path_buf(),
                    line,
                    reason: format!("row has {} values, expected {w}", values.len()),
                });
            }
            Some(_) => {}
        }
        rows.push(values);
    }

    if rows.is_empty() {
        return Err(GridmulError::Parse {
            path: path.to_path_buf(),
            line: 1,
            reason: "file contains no matrix data".to_string(),
        });
    }
    Matrix::from_rows(rows)
}

/// Write `matrix` to `path`, replacing any existing file.
pub fn save_matrix(path: &Path, matrix: &Matrix) -> Result<()> {
    fs::write(path, to_text(matrix))?;
    Ok(())
}

/// Load a matrix from the text file at `path`.
pub fn load_matrix(path: &Path) -> Result<Matrix> {
    let content = fs::read_to_string(path)?;
    parse_text(path, &content)
}
