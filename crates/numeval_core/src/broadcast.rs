//! Operand pairing for binary elementwise operations.
//!
//! Three pairing modes are supported:
//! - scalar with scalar: the kernel is called once;
//! - scalar with container: the scalar is paired with every leaf and the
//!   container's shape and representation are kept;
//! - container with container: shapes must be identical, leaves are paired
//!   positionally in row-major order.
//!
//! When two containers of different representation meet, a matrix on either
//! side makes the result a matrix; otherwise the result is a plain sequence.

use std::borrow::Cow;

use tracing::trace;

use crate::error::{EvalError, EvalResult};
use crate::map::map_container;
use crate::shape::{classify, ensure_supported_rank, resolve_scalar, Classified, Kind};
use crate::value::{Matrix, Value};

pub fn zip_binary<F>(lhs: &Value, rhs: &Value, function: &'static str, kernel: F) -> EvalResult<Value>
where
    F: Fn(&Value, &Value) -> EvalResult<Value>,
{
    let left = classify(lhs, function)?;
    let right = classify(rhs, function)?;
    ensure_supported_rank(&left, function)?;
    ensure_supported_rank(&right, function)?;

    match (left.kind.is_scalar(), right.kind.is_scalar()) {
        (true, true) => kernel(&left.value, &right.value),
        (false, true) => {
            trace!(function, shape = %left.shape, "broadcasting right scalar");
            let scalar = &*right.value;
            map_container(&left, function, &|x: &Value| kernel(x, scalar))
        }
        (true, false) => {
            trace!(function, shape = %right.shape, "broadcasting left scalar");
            let scalar = &*left.value;
            map_container(&right, function, &|x: &Value| kernel(scalar, x))
        }
        (false, false) => zip_containers(&left, &right, function, &kernel),
    }
}

fn zip_containers<F>(
    left: &Classified<'_>,
    right: &Classified<'_>,
    function: &'static str,
    kernel: &F,
) -> EvalResult<Value>
where
    F: Fn(&Value, &Value) -> EvalResult<Value>,
{
    if left.shape != right.shape {
        return Err(EvalError::ShapeMismatch {
            function,
            expected: left.shape.clone(),
            actual: right.shape.clone(),
        });
    }
    trace!(function, shape = %left.shape, "pairing containers");

    let lhs = container_items(left);
    let rhs = container_items(right);
    let data = zip_items(&lhs, &rhs, function, kernel)?;

    if left.kind == Kind::Matrix || right.kind == Kind::Matrix {
        Ok(Value::Matrix(Matrix::from_parts(data, left.shape.dims().to_vec())))
    } else {
        Ok(Value::Sequence(data))
    }
}

fn container_items<'a>(classified: &'a Classified<'_>) -> Cow<'a, [Value]> {
    classified
        .value
        .elements()
        .unwrap_or(Cow::Borrowed(&[]))
}

fn zip_items<F>(
    lhs: &[Value],
    rhs: &[Value],
    function: &'static str,
    kernel: &F,
) -> EvalResult<Vec<Value>>
where
    F: Fn(&Value, &Value) -> EvalResult<Value>,
{
    lhs.iter()
        .zip(rhs)
        .map(|pair| match pair {
            (Value::Sequence(a), Value::Sequence(b)) => {
                zip_items(a, b, function, kernel).map(Value::Sequence)
            }
            (a, b) => {
                let a = resolve_scalar(a, function)?;
                let b = resolve_scalar(b, function)?;
                kernel(&a, &b)
            }
        })
        .collect()
}
