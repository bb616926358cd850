//! Value types handled by the engine.
//!
//! All values are immutable once built; operations always produce new values.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use num_complex::Complex64;

use crate::error::{EvalError, EvalResult};
use crate::shape::{measure, Shape};
use crate::traits::AsPrimitive;

/// A numeric magnitude tagged with a unit of measure.
///
/// The unit tag is opaque here; conversion between units lives elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

impl Quantity {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Same unit, magnitude multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.value * factor, self.unit.clone())
    }

    /// Same unit, magnitude divided by `divisor` (IEEE-754 semantics).
    pub fn divided(&self, divisor: f64) -> Self {
        Self::new(self.value / divisor, self.unit.clone())
    }

    pub fn same_unit(&self, other: &Quantity) -> bool {
        self.unit == other.unit
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Ranges longer than this are rejected at construction.
pub const MAX_RANGE_LEN: usize = u32::MAX as usize;

/// Arithmetic progression `start, start + step, ...` bounded by `stop`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub start: f64,
    pub step: f64,
    pub stop: f64,
    pub inclusive: bool,
}

/// Number of elements in the progression, or `None` if it does not fit in
/// `MAX_RANGE_LEN`. A zero step, or a step pointing away from `stop`, gives 0.
fn element_count(start: f64, step: f64, stop: f64, inclusive: bool) -> Option<usize> {
    if step == 0.0 || (stop - start) * step < 0.0 {
        return Some(0);
    }
    let span = (stop - start) / step;
    let count = if inclusive { span.floor() + 1.0 } else { span.ceil() };
    if !count.is_finite() || count > MAX_RANGE_LEN as f64 {
        return None;
    }
    Some(count.max(0.0) as usize)
}

impl Range {
    /// Range with an inclusive `stop`.
    pub fn new(start: f64, step: f64, stop: f64) -> EvalResult<Self> {
        Self::with_bounds(start, step, stop, true)
    }

    pub fn with_bounds(start: f64, step: f64, stop: f64, inclusive: bool) -> EvalResult<Self> {
        if !(start.is_finite() && step.is_finite() && stop.is_finite()) {
            return Err(EvalError::InvalidRange {
                reason: "start, step and stop must be finite",
            });
        }
        if element_count(start, step, stop, inclusive).is_none() {
            return Err(EvalError::InvalidRange {
                reason: "too many elements",
            });
        }
        Ok(Self {
            start,
            step,
            stop,
            inclusive,
        })
    }

    /// Iterate the progression. A zero step, or a step pointing away from
    /// `stop`, yields nothing.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.start + i as f64 * self.step)
    }

    pub fn len(&self) -> usize {
        element_count(self.start, self.step, self.stop, self.inclusive).unwrap_or(MAX_RANGE_LEN)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materialize as plain sequence elements.
    pub fn realize(&self) -> Vec<Value> {
        self.iter().map(Value::Real).collect()
    }
}

/// Rectangular nested data that remembers it was built as a matrix.
///
/// Usually rank 2, but reductions and vector inputs produce rank-1 matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<Value>,
    dims: Vec<usize>,
}

impl Matrix {
    /// Wrap nested row data, rejecting ragged input.
    pub fn new(data: Vec<Value>) -> EvalResult<Self> {
        let dims = measure(&data)?;
        Ok(Self { data, dims })
    }

    /// Build from rows of reals.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> EvalResult<Self> {
        Self::new(rows.into_iter().map(Value::from).collect())
    }

    /// Caller guarantees `dims` describes `data`.
    pub(crate) fn from_parts(data: Vec<Value>, dims: Vec<usize>) -> Self {
        debug_assert_eq!(data.len(), dims.first().copied().unwrap_or(0));
        Self { data, dims }
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.dims.clone())
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn data(&self) -> &[Value] {
        &self.data
    }
}

/// Closed set of operand kinds.
#[derive(Debug, Clone)]
pub enum Value {
    Real(f64),
    Complex(Complex64),
    Unit(Quantity),
    Sequence(Vec<Value>),
    Matrix(Matrix),
    Range(Range),
    /// A foreign value that can only be used through its primitive form.
    Opaque(Arc<dyn AsPrimitive>),
}

impl Value {
    pub fn complex(re: f64, im: f64) -> Self {
        Value::Complex(Complex64::new(re, im))
    }

    pub fn unit(value: f64, unit: impl Into<String>) -> Self {
        Value::Unit(Quantity::new(value, unit))
    }

    /// Name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Real(_) => "number",
            Value::Complex(_) => "complex",
            Value::Unit(_) => "unit",
            Value::Sequence(_) => "array",
            Value::Matrix(_) => "matrix",
            Value::Range(_) => "range",
            Value::Opaque(inner) => inner.type_name(),
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<Complex64> {
        match self {
            Value::Complex(z) => Some(*z),
            _ => None,
        }
    }

    /// Top-level elements of a container; ranges are realized.
    pub fn elements(&self) -> Option<Cow<'_, [Value]>> {
        match self {
            Value::Sequence(items) => Some(Cow::Borrowed(items.as_slice())),
            Value::Matrix(matrix) => Some(Cow::Borrowed(matrix.data())),
            Value::Range(range) => Some(Cow::Owned(range.realize())),
            _ => None,
        }
    }

    pub fn shape(&self) -> EvalResult<Shape> {
        crate::shape::classify(self, "size").map(|classified| classified.shape)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Real(a), Value::Real(b)) => a == b,
            (Value::Complex(a), Value::Complex(b)) => a == b,
            (Value::Unit(a), Value::Unit(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Matrix(a), Value::Matrix(b)) => a == b,
            (Value::Range(a), Value::Range(b)) => a == b,
            (Value::Opaque(a), Value::Opaque(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<Complex64> for Value {
    fn from(value: Complex64) -> Self {
        Value::Complex(value)
    }
}

impl From<Quantity> for Value {
    fn from(value: Quantity) -> Self {
        Value::Unit(value)
    }
}

impl From<Matrix> for Value {
    fn from(value: Matrix) -> Self {
        Value::Matrix(value)
    }
}

impl From<Range> for Value {
    fn from(value: Range) -> Self {
        Value::Range(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}
