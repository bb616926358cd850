use crate::shape::Shape;
use thiserror::Error;

/// Result alias used throughout the engine.
pub type EvalResult<T> = Result<T, EvalError>;

/// Typed failures raised by the dispatch engine.
///
/// Division by zero is not an error; it propagates as `±inf` or `NaN`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Wrong number of arguments in function {function} ({actual} provided, {expected} expected)")]
    Arity {
        function: &'static str,
        expected: String,
        actual: usize,
    },

    #[error("Cannot calculate {function} of an empty {container}")]
    EmptyInput {
        function: &'static str,
        container: &'static str,
    },

    #[error("Dimension mismatch in function {function}: {expected} != {actual}")]
    ShapeMismatch {
        function: &'static str,
        expected: Shape,
        actual: Shape,
    },

    #[error("Cannot calculate {function} of a rank {rank} value, at most 2 dimensions are supported")]
    UnsupportedRank { function: &'static str, rank: usize },

    #[error("Unsupported type of argument in function {function}: {kind}")]
    UnsupportedType { function: &'static str, kind: String },

    #[error("Ragged data at index {index}: expected element shape {expected}, found {actual}")]
    Ragged {
        index: usize,
        expected: Shape,
        actual: Shape,
    },

    #[error("Invalid range: {reason}")]
    InvalidRange { reason: &'static str },

    #[error("Unknown function: {name}")]
    UnknownFunction { name: String },
}

impl EvalError {
    /// Stable tag for the error class, suitable for surfacing across an FFI boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            EvalError::Arity { .. } => "ArityError",
            EvalError::EmptyInput { .. } => "EmptyInputError",
            EvalError::ShapeMismatch { .. } => "ShapeMismatchError",
            EvalError::UnsupportedRank { .. } => "UnsupportedRankError",
            EvalError::UnsupportedType { .. } => "UnsupportedTypeError",
            EvalError::Ragged { .. } => "RaggedError",
            EvalError::InvalidRange { .. } => "InvalidRangeError",
            EvalError::UnknownFunction { .. } => "UnknownFunctionError",
        }
    }

    pub(crate) fn unsupported(function: &'static str, kind: impl Into<String>) -> Self {
        EvalError::UnsupportedType {
            function,
            kind: kind.into(),
        }
    }
}
