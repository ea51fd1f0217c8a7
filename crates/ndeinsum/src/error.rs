//! Error types for ndeinsum.

use thiserror::Error;

use crate::labels::Label;

/// Errors that can occur while planning or running a contraction.
///
/// Every contraction error is raised during planning, before any element of
/// the output buffer is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TensorError {
    /// A shared label is bound to conflicting extents.
    #[error("dimension mismatch for label {label}: bound to extent {expected}, found {actual}")]
    DimensionMismatch {
        label: Label,
        expected: usize,
        actual: usize,
    },

    /// A label sequence does not have one label per axis of its operand.
    #[error("rank mismatch for operand {operand}: tensor has rank {expected}, got {actual} labels")]
    RankMismatch {
        operand: usize,
        expected: usize,
        actual: usize,
    },

    /// A label appears more than twice across the operands.
    #[error("label {label} appears {occurrences} times; contraction is strictly pairwise")]
    OverContraction { label: Label, occurrences: usize },

    /// An axis has zero extent.
    #[error("label {label} is bound to an axis of extent 0")]
    InvalidExtent { label: Label },

    /// A character in label notation is not an ASCII letter.
    #[error("invalid label symbol {symbol:?}: expected an ASCII letter")]
    InvalidLabel { symbol: char },

    /// The requested notation does not apply to the operands.
    #[error("invalid notation: {reason}")]
    InvalidNotation { reason: String },

    /// Only unary and binary contractions are supported.
    #[error("unsupported operand count {count}: expected 1 or 2 operands with one label set each")]
    UnsupportedOperandCount { count: usize },

    /// Shape mismatch between data length and expected size.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Index out of bounds.
    #[error("index out of bounds: index {index} is out of range for dimension {dim_size}")]
    IndexOutOfBounds { index: usize, dim_size: usize },

    /// Wrong number of indices provided.
    #[error("wrong number of indices: expected {expected}, got {actual}")]
    WrongNumberOfIndices { expected: usize, actual: usize },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TensorError>;
