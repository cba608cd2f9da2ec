//! Working-folder layout for matrix and log files.

use std::fs;
use std::path::{Path, PathBuf};

use gridmul_common::Result;

/// First input matrix of the one-shot run.
pub const MATRIX_A_FILE: &str = "matrix1.txt";
/// Second input matrix of the one-shot run.
pub const MATRIX_B_FILE: &str = "matrix2.txt";
/// Result matrix of the one-shot run.
pub const RESULT_FILE: &str = "result_matrix.txt";
/// Shared per-cell log, written by one-shot and background runs alike.
pub const INTERMEDIATE_FILE: &str = "intermediate_results.txt";

/// Path helpers for the folder holding all run artifacts.
#[derive(Debug, Clone)]
pub struct Workdir {
    root: PathBuf,
}

impl Workdir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the folder (and any missing parents).
    pub fn ensure_exists(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn matrix_a(&self) -> PathBuf {
        self.root.join(MATRIX_A_FILE)
    }

    pub fn matrix_b(&self) -> PathBuf {
        self.root.join(MATRIX_B_FILE)
    }

    pub fn result(&self) -> PathBuf {
        self.root.join(RESULT_FILE)
    }

    pub fn intermediate(&self) -> PathBuf {
        self.root.join(INTERMEDIATE_FILE)
    }

    /// First input matrix of background iteration `iteration` (1-based).
    pub fn matrix_a_iter(&self, iteration: u64) -> PathBuf {
        self.root.join(format!("matrix1_iter{iteration}.txt"))
    }

    /// Second input matrix of background iteration `iteration` (1-based).
    pub fn matrix_b_iter(&self, iteration: u64) -> PathBuf {
        self.root.join(format!("matrix2_iter{iteration}.txt"))
    }

    /// Result matrix of background iteration `iteration` (1-based).
    pub fn result_iter(&self, iteration: u64) -> PathBuf {
        self.root.join(format!("result_matrix_iter{iteration}.txt"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_reference_layout() {
        let workdir = Workdir::new("matrix_files");
        assert_eq!(workdir.matrix_a(), Path::new("matrix_files/matrix1.txt"));
        assert_eq!(workdir.matrix_b(), Path::new("matrix_files/matrix2.txt"));
        assert_eq!(workdir.result(), Path::new("matrix_files/result_matrix.txt"));
        assert_eq!(
            workdir.intermediate(),
            Path::new("matrix_files/intermediate_results.txt")
        );
    }

    #[test]
    fn iteration_files_embed_the_iteration_number() {
        let workdir = Workdir::new("matrix_files");
        assert_eq!(
            workdir.matrix_a_iter(1),
            Path::new("matrix_files/matrix1_iter1.txt")
        );
        assert_eq!(
            workdir.matrix_b_iter(12),
            Path::new("matrix_files/matrix2_iter12.txt")
        );
        assert_eq!(
            workdir.result_iter(3),
            Path::new("matrix_files/result_matrix_iter3.txt")
        );
    }

    #[test]
    fn ensure_exists_creates_nested_folders() {
        let dir = tempfile::tempdir().unwrap();
        let workdir = Workdir::new(dir.path().join("a/b/matrix_files"));

        workdir.ensure_exists().unwrap();
        assert!(workdir.root().is_dir());

        // Idempotent on an existing folder.
        workdir.ensure_exists().unwrap();
    }
}
