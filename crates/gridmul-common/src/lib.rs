//! Common types and utilities for gridmul
//!
//! This crate provides the foundational types used across the gridmul
//! workspace: the matrix type, the whitespace text format, configuration,
//! and error handling.

pub mod config;
pub mod error;
pub mod matrix;
pub mod textfmt;

pub use config::*;
pub use error::*;
pub use matrix::*;
