//! Serde wire format shared with JavaScript callers.
//!
//! Plain numbers and arrays pass through as-is; the other kinds are objects
//! distinguished by their field names:
//!
//! ```text
//! 1.5                                  number
//! {"re": 0, "im": 1}                   complex
//! {"value": 5, "unit": "m"}            unit
//! {"start": 2, "step": 2, "stop": 6}   range
//! {"matrix": [[1, 2], [3, 4]]}         matrix
//! [1, [2, 3]]                          array
//! ```

use anyhow::{anyhow, bail, Result};
use num_complex::Complex64;
use numeval_core::value::{Matrix, Range, Value};
use numeval_core::{EvalError, EvalSettings};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    Number(f64),
    // Ahead of the object variants, which would otherwise accept short arrays.
    Array(Vec<WireValue>),
    Complex { re: f64, im: f64 },
    Unit { value: f64, unit: String },
    Range { start: f64, step: f64, stop: f64 },
    Matrix { matrix: Vec<WireValue> },
}

/// Fold a core error into a message that keeps its kind tag.
pub(crate) fn describe_error(err: EvalError) -> anyhow::Error {
    anyhow!("{}: {}", err.kind(), err)
}

impl WireValue {
    pub fn into_value(self, settings: &EvalSettings) -> Result<Value> {
        Ok(match self {
            WireValue::Number(x) => Value::Real(x),
            WireValue::Complex { re, im } => Value::Complex(Complex64::new(re, im)),
            WireValue::Unit { value, unit } => Value::unit(value, unit),
            WireValue::Range { start, step, stop } => {
                let range = Range::with_bounds(start, step, stop, settings.inclusive_ranges)
                    .map_err(describe_error)?;
                Value::Range(range)
            }
            WireValue::Matrix { matrix } => {
                let rows = decode_items(matrix, settings)?;
                Value::Matrix(Matrix::new(rows).map_err(describe_error)?)
            }
            WireValue::Array(items) => Value::Sequence(decode_items(items, settings)?),
        })
    }

    pub fn from_value(value: &Value) -> Result<WireValue> {
        Ok(match value {
            Value::Real(x) => WireValue::Number(*x),
            Value::Complex(z) => WireValue::Complex { re: z.re, im: z.im },
            Value::Unit(q) => WireValue::Unit {
                value: q.value,
                unit: q.unit.clone(),
            },
            Value::Sequence(items) => WireValue::Array(encode_items(items)?),
            Value::Matrix(matrix) => WireValue::Matrix {
                matrix: encode_items(matrix.data())?,
            },
            Value::Range(range) => WireValue::Array(range.iter().map(WireValue::Number).collect()),
            Value::Opaque(inner) => match inner.primitive() {
                Value::Opaque(_) => bail!("opaque value of type {} has no wire encoding", inner.type_name()),
                primitive => WireValue::from_value(&primitive)?,
            },
        })
    }
}

fn decode_items(items: Vec<WireValue>, settings: &EvalSettings) -> Result<Vec<Value>> {
    items.into_iter().map(|item| item.into_value(settings)).collect()
}

fn encode_items(items: &[Value]) -> Result<Vec<WireValue>> {
    items.iter().map(WireValue::from_value).collect()
}

/// Decode a variadic argument list into core values.
pub fn normalize_args(args: Vec<WireValue>, settings: &EvalSettings) -> Result<Vec<Value>> {
    decode_items(args, settings)
}
