//! End-to-end multiplication tests over the file-backed sink.

use gridmul_common::textfmt::{load_matrix, save_matrix};
use gridmul_common::{GridmulError, Matrix};
use gridmul_engine::{multiply, CellRecord, FileCellSink};
use std::fs;

fn read_records(path: &std::path::Path) -> Vec<CellRecord> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| CellRecord::parse(line).expect("malformed log line"))
        .collect()
}

// ---------------------------------------------------------------------------
// log completeness
// ---------------------------------------------------------------------------

#[test]
fn file_sink_holds_one_record_per_cell() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("intermediate_results.txt");
    let sink = FileCellSink::new(&log);

    let a = Matrix::from_vec(5, 5, (0..25).collect()).unwrap();
    let b = Matrix::from_vec(5, 5, (25..50).collect()).unwrap();
    let out = multiply(&a, &b, 4, &sink).unwrap();

    let records = read_records(&log);
    assert_eq!(records.len(), 25);
    for record in &records {
        assert_eq!(record.value, out.get(record.row, record.col));
    }

    let mut seen: Vec<(usize, usize)> = records.iter().map(|r| (r.row, r.col)).collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 25, "every cell must appear exactly once");
}

#[test]
fn known_2x2_log_contents() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("intermediate_results.txt");
    let sink = FileCellSink::new(&log);

    let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]]).unwrap();
    multiply(&a, &b, 2, &sink).unwrap();

    let mut records = read_records(&log);
    records.sort_by_key(|r| (r.row, r.col));
    assert_eq!(
        records,
        vec![
            CellRecord { row: 0, col: 0, value: 19 },
            CellRecord { row: 0, col: 1, value: 22 },
            CellRecord { row: 1, col: 0, value: 43 },
            CellRecord { row: 1, col: 1, value: 50 },
        ]
    );
}

#[test]
fn runs_accumulate_until_reset() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("intermediate_results.txt");
    let sink = FileCellSink::new(&log);

    let a = Matrix::from_rows(vec![vec![1, 0], vec![0, 1]]).unwrap();

    multiply(&a, &a, 2, &sink).unwrap();
    multiply(&a, &a, 2, &sink).unwrap();
    assert_eq!(read_records(&log).len(), 8, "two runs share one log");

    sink.reset().unwrap();
    multiply(&a, &a, 2, &sink).unwrap();
    assert_eq!(read_records(&log).len(), 4, "reset starts an empty log");
}

// ---------------------------------------------------------------------------
// failure behavior
// ---------------------------------------------------------------------------

#[test]
fn dimension_mismatch_leaves_no_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("intermediate_results.txt");
    let sink = FileCellSink::new(&log);

    let a = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap(); // 2x3
    let b = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap(); // 2x2

    let err = multiply(&a, &b, 2, &sink).unwrap_err();

    assert!(matches!(err, GridmulError::DimensionMismatch { .. }));
    assert!(!log.exists(), "no file writes on a rejected multiply");
}

#[test]
fn unwritable_log_fails_the_multiply() {
    let dir = tempfile::tempdir().unwrap();
    // A sink whose path is a directory cannot open its log file.
    let sink = FileCellSink::new(dir.path());

    let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    let err = multiply(&a, &a, 2, &sink).unwrap_err();

    assert!(matches!(err, GridmulError::Io(_)));
}

// ---------------------------------------------------------------------------
// pipeline round trip through the text format
// ---------------------------------------------------------------------------

#[test]
fn saved_inputs_multiply_to_saved_result() {
    let dir = tempfile::tempdir().unwrap();
    let a_path = dir.path().join("matrix1.txt");
    let b_path = dir.path().join("matrix2.txt");
    let out_path = dir.path().join("result_matrix.txt");
    let sink = FileCellSink::new(dir.path().join("intermediate_results.txt"));

    let a = Matrix::from_rows(vec![vec![2, 0, 1], vec![1, 3, 2], vec![0, 1, 4]]).unwrap();
    let b = Matrix::from_rows(vec![vec![1, 1, 0], vec![2, 0, 1], vec![3, 2, 2]]).unwrap();
    save_matrix(&a_path, &a).unwrap();
    save_matrix(&b_path, &b).unwrap();

    let loaded_a = load_matrix(&a_path).unwrap();
    let loaded_b = load_matrix(&b_path).unwrap();
    let out = multiply(&loaded_a, &loaded_b, 3, &sink).unwrap();
    save_matrix(&out_path, &out).unwrap();

    assert_eq!(load_matrix(&out_path).unwrap(), out);
    assert_eq!(out.get(0, 0), 5); // 2*1 + 0*2 + 1*3
    assert_eq!(out.get(2, 2), 9); // 0*0 + 1*1 + 4*2
}
