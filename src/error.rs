use thiserror::Error;

// Unified error type for coomat

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CooError {
    #[error("invalid matrix dimensions [{rows},{cols}]: both must be positive")]
    Dimension { rows: usize, cols: usize },
    #[error("index ({row},{col}) out of range for matrix [{rows},{cols}]")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("invalid value {0}: NaN and infinity cannot be stored")]
    InvalidValue(f64),
    #[error("symmetric matrix stores only the upper triangle, got ({row},{col}) with row > col")]
    AsymmetryViolation { row: usize, col: usize },
    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("parse error at line {line} `{content}`: {reason}")]
    Parse {
        line: usize,
        content: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, CooError>;
