//! Errors raised by the driver.
//!
//! The classifier itself never fails; everything here comes from reading
//! input, writing output, or configuring a simulation.

use std::io;
use std::path::PathBuf;

use gds_core::Point;
use gds_dst::DstError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A token that is not the number the format requires.
    #[error("line {line}: expected {expected}, found `{token}`")]
    InvalidToken {
        line: usize,
        token: String,
        expected: &'static str,
    },

    /// A method code other than 1 (insert) or 2 (remove).
    #[error("line {line}: unknown method code {code} (expected 1 = insert, 2 = remove)")]
    UnknownMethod { line: usize, code: i64 },

    /// A coordinate outside the contract bounds while bounds are enforced.
    #[error("line {line}: point {point} is outside [{min}, {max}]")]
    OutOfBounds {
        line: usize,
        point: Point,
        min: i32,
        max: i32,
    },

    /// Input ended in the middle of a trace.
    #[error("trace {trace}: input ended after {read} of {expected} operations")]
    UnexpectedEof {
        trace: usize,
        read: usize,
        expected: usize,
    },

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Simulation(#[from] DstError),
}
