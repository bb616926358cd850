//! Value classification.
//!
//! Every operation starts here: an operand is resolved to one of the closed set
//! of kinds together with its shape descriptor. Opaque wrappers are unwrapped
//! through [`AsPrimitive`](crate::traits::AsPrimitive) at most once.

use std::borrow::Cow;
use std::fmt;

use tracing::trace;

use crate::error::{EvalError, EvalResult};
use crate::value::Value;

/// Rank and per-axis extent of a value. Scalars have rank 0 and no dims.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    pub fn scalar() -> Self {
        Self { dims: Vec::new() }
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Total number of leaf elements.
    pub fn len(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(rows, cols)` for rank-2 shapes.
    pub fn as_matrix(&self) -> Option<(usize, usize)> {
        match self.dims.as_slice() {
            [rows, cols] => Some((*rows, *cols)),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dims.is_empty() {
            return write!(f, "scalar");
        }
        write!(f, "[")?;
        for (i, dim) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{dim}")?;
        }
        write!(f, "]")
    }
}

/// Runtime kind of a classified operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Real,
    Complex,
    Unit,
    Sequence,
    Matrix,
    Range,
}

impl Kind {
    pub fn is_scalar(self) -> bool {
        matches!(self, Kind::Real | Kind::Complex | Kind::Unit)
    }

    pub fn is_container(self) -> bool {
        !self.is_scalar()
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Real => "number",
            Kind::Complex => "complex",
            Kind::Unit => "unit",
            Kind::Sequence => "array",
            Kind::Matrix => "matrix",
            Kind::Range => "range",
        }
    }
}

/// An operand after classification. `value` is the operand itself, or the
/// primitive it unwrapped to when it was opaque.
#[derive(Debug, Clone)]
pub struct Classified<'a> {
    pub kind: Kind,
    pub shape: Shape,
    pub value: Cow<'a, Value>,
}

impl Classified<'_> {
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }
}

/// Classify `value` for use by `function`.
pub fn classify<'a>(value: &'a Value, function: &'static str) -> EvalResult<Classified<'a>> {
    match value {
        Value::Opaque(inner) => {
            let primitive = inner.primitive();
            if matches!(primitive, Value::Opaque(_)) {
                return Err(EvalError::unsupported(function, inner.type_name()));
            }
            let (kind, shape) = describe(&primitive, function)?;
            trace!(function, from = inner.type_name(), kind = kind.name(), "unwrapped opaque operand");
            Ok(Classified {
                kind,
                shape,
                value: Cow::Owned(primitive),
            })
        }
        other => {
            let (kind, shape) = describe(other, function)?;
            Ok(Classified {
                kind,
                shape,
                value: Cow::Borrowed(other),
            })
        }
    }
}

fn describe(value: &Value, function: &'static str) -> EvalResult<(Kind, Shape)> {
    let described = match value {
        Value::Real(_) => (Kind::Real, Shape::scalar()),
        Value::Complex(_) => (Kind::Complex, Shape::scalar()),
        Value::Unit(_) => (Kind::Unit, Shape::scalar()),
        Value::Sequence(items) => (Kind::Sequence, Shape::new(measure(items)?)),
        Value::Matrix(matrix) => (Kind::Matrix, matrix.shape()),
        Value::Range(range) => (Kind::Range, Shape::new(vec![range.len()])),
        Value::Opaque(inner) => return Err(EvalError::unsupported(function, inner.type_name())),
    };
    Ok(described)
}

/// Compute the dims of nested sequence data, checking rectangularity at every depth.
pub(crate) fn measure(items: &[Value]) -> EvalResult<Vec<usize>> {
    let mut inner: Option<Vec<usize>> = None;
    for (index, item) in items.iter().enumerate() {
        let dims = match item {
            Value::Sequence(row) => measure(row)?,
            _ => Vec::new(),
        };
        match &inner {
            None => inner = Some(dims),
            Some(expected) if *expected != dims => {
                return Err(EvalError::Ragged {
                    index,
                    expected: Shape::new(expected.clone()),
                    actual: Shape::new(dims),
                });
            }
            Some(_) => {}
        }
    }

    let mut dims = vec![items.len()];
    dims.extend(inner.unwrap_or_default());
    Ok(dims)
}

/// Resolve a container leaf to a scalar, unwrapping an opaque leaf once.
pub(crate) fn resolve_scalar<'a>(
    value: &'a Value,
    function: &'static str,
) -> EvalResult<Cow<'a, Value>> {
    let classified = classify(value, function)?;
    if classified.kind.is_scalar() {
        Ok(classified.value)
    } else {
        Err(EvalError::unsupported(function, classified.kind.name()))
    }
}

/// Reject containers the engine cannot walk.
pub(crate) fn ensure_supported_rank(classified: &Classified<'_>, function: &'static str) -> EvalResult<()> {
    let rank = classified.rank();
    if rank > 2 {
        return Err(EvalError::UnsupportedRank { function, rank });
    }
    Ok(())
}
