//! Error type for precondition violations.

use thiserror::Error;

/// Convenience alias used by every fallible operation in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A violated precondition.
///
/// Every variant means the operation refused to produce a result; nothing is partially written.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Attempted to create a vector or matrix without any elements.
    #[error("attempt to create an empty vector or matrix")]
    Empty,

    /// A matrix dimension was zero.
    #[error("invalid matrix dimensions {rows}x{cols}")]
    ZeroDimension { rows: usize, cols: usize },

    /// Two operands (or a buffer and a requested size) disagree in length.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Two matrices have incompatible shapes for the requested operation.
    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// The element count of a matrix shape does not fit in a `usize`.
    #[error("matrix dimensions {rows}x{cols} are too large")]
    DimensionOverflow { rows: usize, cols: usize },

    /// An element index was out of range.
    #[error("index {index} out of bounds (len: {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A sub-matrix region does not fit in the matrix.
    #[error("block of size {size:?} at {origin:?} does not fit in a {shape:?} matrix")]
    BlockOutOfBounds {
        origin: (usize, usize),
        size: (usize, usize),
        shape: (usize, usize),
    },

    /// The operation is only defined on square matrices.
    #[error("operation requires a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// A flat buffer without explicit shape must have a square length.
    #[error("cannot infer a square matrix from {len} elements")]
    NotPerfectSquare { len: usize },

    /// Attempted to invert a matrix whose determinant is (close to) zero.
    #[error("attempt to invert a singular matrix (determinant: {det})")]
    Singular { det: f64 },

    /// A divisor was zero, or smaller in magnitude than the zero threshold.
    #[error("attempt to divide by zero (divisor: {divisor})")]
    DivisionByZero { divisor: f64 },

    /// The operation needs a vector with non-zero length.
    #[error("vector has zero length")]
    ZeroLength,

    /// The vector has the wrong number of elements for this operation.
    #[error("unsupported vector size {actual} (expected {expected})")]
    UnsupportedSize { expected: &'static str, actual: usize },

    /// The matrix has the wrong order for this operation.
    #[error("unsupported matrix order {actual} (expected {expected})")]
    UnsupportedOrder { expected: &'static str, actual: usize },

    /// Projection parameters describe a degenerate volume.
    #[error("invalid projection parameters: {0}")]
    InvalidProjection(&'static str),
}

/// Unwraps the result of a `checked_*` method inside an operator impl.
///
/// Operators have no error channel, so a violated precondition panics with the error's message.
#[track_caller]
pub(crate) fn unwrap_op<T>(res: Result<T>) -> T {
    match res {
        Ok(value) => value,
        Err(e) => panic!("{e}"),
    }
}
