//! Fold reductions driven by an injected comparator.

use std::borrow::Cow;

use tracing::trace;

use crate::error::{EvalError, EvalResult};
use crate::shape::{classify, resolve_scalar, Kind};
use crate::traits::Smaller;
use crate::value::{Matrix, Value};

/// Fold scalars left to right, keeping the element the comparator ranks first.
///
/// An element replaces the accumulator only when it is strictly smaller, so
/// ties keep the earliest occurrence.
pub(crate) fn fold_extreme<'a, I>(
    mut items: I,
    smaller: &dyn Smaller,
    function: &'static str,
) -> EvalResult<Option<Value>>
where
    I: Iterator<Item = &'a Value>,
{
    let Some(first) = items.next() else {
        return Ok(None);
    };
    let mut best: Cow<'a, Value> = resolve_scalar(first, function)?;
    for item in items {
        let candidate = resolve_scalar(item, function)?;
        if smaller.smaller(&candidate, &best)? {
            best = candidate;
        }
    }
    Ok(Some(best.into_owned()))
}

/// Reduce a container with `smaller`.
///
/// Rank 1 collapses to a single scalar. Rank 2 `(rows, cols)` collapses each
/// column independently, giving a rank-1 result of length `cols` in the same
/// representation as the input.
pub fn reduce(value: &Value, function: &'static str, smaller: &dyn Smaller) -> EvalResult<Value> {
    let classified = classify(value, function)?;
    if classified.kind.is_scalar() {
        return Err(EvalError::unsupported(function, classified.kind.name()));
    }

    let items = classified.value.elements().unwrap_or(Cow::Borrowed(&[]));
    match classified.rank() {
        1 => {
            trace!(function, len = items.len(), "reducing vector");
            fold_extreme(items.iter(), smaller, function)?.ok_or(EvalError::EmptyInput {
                function,
                container: "vector",
            })
        }
        2 => {
            let (rows, cols) = classified
                .shape
                .as_matrix()
                .unwrap_or((0, 0));
            if rows == 0 || cols == 0 {
                return Err(EvalError::EmptyInput {
                    function,
                    container: "matrix",
                });
            }
            trace!(function, rows, cols, "reducing matrix columns");

            let mut result = Vec::with_capacity(cols);
            for col in 0..cols {
                let column = items.iter().map(|row| column_entry(row, col));
                let best = fold_extreme(column, smaller, function)?.ok_or(EvalError::EmptyInput {
                    function,
                    container: "matrix",
                })?;
                result.push(best);
            }

            if classified.kind == Kind::Matrix {
                Ok(Value::Matrix(Matrix::from_parts(result, vec![cols])))
            } else {
                Ok(Value::Sequence(result))
            }
        }
        rank => Err(EvalError::UnsupportedRank { function, rank }),
    }
}

fn column_entry(row: &Value, col: usize) -> &Value {
    match row {
        Value::Sequence(entries) => &entries[col],
        other => other,
    }
}
