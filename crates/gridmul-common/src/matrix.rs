//! Dense row-major integer matrix.

use crate::error::{GridmulError, Result};

/// Dense matrix of `i64` values in row-major order.
///
/// Matrices are never empty: `rows >= 1` and `cols >= 1` hold for every
/// constructed value, and `data.len() == rows * cols`. Multiplication
/// inputs are only ever read; the product is assembled through [`set`]
/// by a single owner.
///
/// Arithmetic is plain `i64` with no overflow checking. For the value
/// ranges this workspace generates (small bounded integers) products stay
/// far below the limit; larger inputs are the caller's responsibility.
///
/// [`set`]: Matrix::set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<i64>,
}

impl Matrix {
    /// Build a matrix from a flat row-major vector.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<i64>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GridmulError::InvalidArgument(format!(
                "matrix dimensions must be at least 1x1, got {rows}x{cols}"
            )));
        }
        if data.len() != rows * cols {
            return Err(GridmulError::InvalidArgument(format!(
                "expected {} values for a {rows}x{cols} matrix, got {}",
                rows * cols,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from nested row vectors, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map(Vec::len).unwrap_or(0);
        if row_count == 0 || col_count == 0 {
            return Err(GridmulError::InvalidArgument(
                "matrix must have at least one row and one column".to_string(),
            ));
        }
        let mut data = Vec::with_capacity(row_count * col_count);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != col_count {
                return Err(GridmulError::InvalidArgument(format!(
                    "row {idx} has {} values, expected {col_count}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Ok(Self { rows: row_count, cols: col_count, data })
    }

    /// All-zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::from_vec(rows, cols, vec![0; rows * cols])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at (`row`, `col`). Panics on out-of-bounds indices.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.cols + col]
    }

    /// Store `value` at (`row`, `col`). Panics on out-of-bounds indices.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        self.data[row * self.cols + col] = value;
    }

    /// Row `row` as a slice. Panics on an out-of-bounds index.
    pub fn row(&self, row: usize) -> &[i64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Flat row-major view of all values.
    pub fn as_slice(&self) -> &[i64] {
        &self.data
    }
}
