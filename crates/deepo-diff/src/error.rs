//! Error types for the diff crate.

use std::fmt;

use serde::Serialize;

/// Which input of a pairwise comparison an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Errors that can occur before a diff is computed.
///
/// The differs themselves are total over their inputs; only decoding the
/// untrusted JSON text can fail.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// One side of a JSON pair is not valid JSON.
    #[error("{side} input is not valid JSON (line {line}, column {column}): {message}")]
    InvalidJson {
        side: Side,
        line: usize,
        column: usize,
        message: String,
    },
}

impl DiffError {
    pub(crate) fn invalid_json(side: Side, err: &serde_json::Error) -> Self {
        // serde_json reports column 0 for errors located before the first
        // character of a line; positions are 1-based everywhere else.
        DiffError::InvalidJson {
            side,
            line: err.line().max(1),
            column: err.column().max(1),
            message: err.to_string(),
        }
    }

    /// The side whose input was rejected.
    pub fn side(&self) -> Side {
        match self {
            DiffError::InvalidJson { side, .. } => *side,
        }
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
