//! Elementwise mapping of unary kernels over containers.

use tracing::trace;

use crate::error::EvalResult;
use crate::shape::{classify, ensure_supported_rank, resolve_scalar, Classified};
use crate::value::{Matrix, Value};

/// Apply `kernel` to a scalar, or to every leaf of a container.
///
/// The output keeps the input's shape and representation: a matrix maps to a
/// matrix and a sequence to a sequence. A range maps to a realized sequence.
/// The first failing leaf aborts the whole mapping.
pub fn map_unary<F>(value: &Value, function: &'static str, kernel: F) -> EvalResult<Value>
where
    F: Fn(&Value) -> EvalResult<Value>,
{
    let classified = classify(value, function)?;
    if classified.kind.is_scalar() {
        return kernel(&classified.value);
    }
    map_container(&classified, function, &kernel)
}

pub(crate) fn map_container<F>(
    classified: &Classified<'_>,
    function: &'static str,
    kernel: &F,
) -> EvalResult<Value>
where
    F: Fn(&Value) -> EvalResult<Value>,
{
    ensure_supported_rank(classified, function)?;
    trace!(function, kind = classified.kind.name(), shape = %classified.shape, "mapping container");

    match &*classified.value {
        Value::Sequence(items) => map_items(items, function, kernel).map(Value::Sequence),
        Value::Matrix(matrix) => {
            let data = map_items(matrix.data(), function, kernel)?;
            Ok(Value::Matrix(Matrix::from_parts(data, matrix.dims().to_vec())))
        }
        Value::Range(range) => range
            .iter()
            .map(|x| kernel(&Value::Real(x)))
            .collect::<EvalResult<Vec<_>>>()
            .map(Value::Sequence),
        scalar => kernel(scalar),
    }
}

/// Row-major walk over nested sequence data.
fn map_items<F>(items: &[Value], function: &'static str, kernel: &F) -> EvalResult<Vec<Value>>
where
    F: Fn(&Value) -> EvalResult<Value>,
{
    items
        .iter()
        .map(|item| match item {
            Value::Sequence(row) => map_items(row, function, kernel).map(Value::Sequence),
            leaf => {
                let scalar = resolve_scalar(leaf, function)?;
                kernel(&scalar)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::map_unary;
    use crate::error::{EvalError, EvalResult};
    use crate::kernels;
    use crate::traits::AsPrimitive;
    use crate::value::{Matrix, Range, Value};
    use std::cell::RefCell;
    use std::sync::Arc;

    fn double(x: &Value) -> EvalResult<Value> {
        match x {
            Value::Real(x) => Ok(Value::Real(2.0 * x)),
            _ => Err(EvalError::unsupported("double", "non-real")),
        }
    }

    #[derive(Debug)]
    struct Meters(f64);

    impl AsPrimitive for Meters {
        fn primitive(&self) -> Value {
            Value::Real(self.0)
        }
    }

    #[test]
    fn scalars_go_straight_to_the_kernel() {
        assert_eq!(map_unary(&Value::Real(3.0), "double", double).expect("scalar"), Value::Real(6.0));
    }

    #[test]
    fn matrix_maps_to_matrix() {
        let matrix = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).expect("matrix");
        let mapped = map_unary(&Value::Matrix(matrix), "double", double).expect("mapped");
        let expected = Matrix::from_rows(vec![vec![2.0, 4.0], vec![6.0, 8.0]]).expect("matrix");
        assert_eq!(mapped, Value::Matrix(expected));
    }

    #[test]
    fn sequence_maps_to_sequence() {
        let mapped = map_unary(&Value::from(vec![vec![1.0], vec![2.0]]), "double", double)
            .expect("mapped");
        assert_eq!(mapped, Value::from(vec![vec![2.0], vec![4.0]]));
    }

    #[test]
    fn range_maps_to_realized_sequence() {
        let range = Range::new(2.0, 2.0, 6.0).expect("range");
        let mapped = map_unary(&Value::Range(range), "double", double).expect("mapped");
        assert_eq!(mapped, Value::from(vec![4.0, 8.0, 12.0]));
    }

    #[test]
    fn empty_containers_stay_empty() {
        let mapped = map_unary(&Value::Sequence(Vec::new()), "double", double).expect("mapped");
        assert_eq!(mapped, Value::Sequence(Vec::new()));
    }

    #[test]
    fn leaves_are_visited_once_in_row_major_order() {
        let seen = RefCell::new(Vec::new());
        let value = Value::from(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        map_unary(&value, "record", |x| {
            seen.borrow_mut().push(x.as_real().expect("real"));
            Ok(x.clone())
        })
        .expect("mapped");
        assert_eq!(seen.into_inner(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn first_failure_aborts_the_mapping() {
        let calls = RefCell::new(0);
        let value = Value::Sequence(vec![Value::Real(1.0), Value::unit(1.0, "m"), Value::Real(2.0)]);
        let err = map_unary(&value, "atan", |x| {
            *calls.borrow_mut() += 1;
            kernels::atan(x)
        })
        .expect_err("unit leaf");
        assert_eq!(err.kind(), "UnsupportedTypeError");
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn rank_three_is_rejected() {
        let value = Value::from(vec![vec![vec![1.0]]]);
        let err = map_unary(&value, "atan", kernels::atan).expect_err("rank 3");
        assert_eq!(err, EvalError::UnsupportedRank { function: "atan", rank: 3 });
    }

    #[test]
    fn opaque_leaves_are_unwrapped() {
        let value = Value::Sequence(vec![Value::Opaque(Arc::new(Meters(1.5))), Value::Real(2.0)]);
        let mapped = map_unary(&value, "double", double).expect("mapped");
        assert_eq!(mapped, Value::from(vec![3.0, 4.0]));
    }

    #[test]
    fn nested_containers_are_not_leaves() {
        let inner = Matrix::from_rows(vec![vec![1.0]]).expect("matrix");
        let value = Value::Sequence(vec![Value::Matrix(inner)]);
        let err = map_unary(&value, "double", double).expect_err("matrix leaf");
        assert!(err.to_string().contains("matrix"));
    }
}
