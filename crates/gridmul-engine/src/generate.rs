//! Random matrix generation.

use rand::Rng;

use gridmul_common::{GridmulError, Matrix, Result};

/// Generate a `rows`x`cols` matrix of integers drawn uniformly from
/// `min..=max`.
///
/// Generic over the RNG so callers can seed for reproducible output.
pub fn random_matrix<R: Rng>(
    rows: usize,
    cols: usize,
    min: i64,
    max: i64,
    rng: &mut R,
) -> Result<Matrix> {
    if min > max {
        return Err(GridmulError::InvalidArgument(format!("empty value range {min}..={max}")));
    }
    let data: Vec<i64> = (0..rows * cols).map(|_| rng.gen_range(min..=max)).collect();
    Matrix::from_vec(rows, cols, data)
}

/// Generate a square `size`x`size` matrix of integers in `min..=max`.
pub fn random_square<R: Rng>(size: usize, min: i64, max: i64, rng: &mut R) -> Result<Matrix> {
    random_matrix(size, size, min, max, rng)
}
