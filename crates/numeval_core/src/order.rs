//! Comparators for reductions.
//!
//! Complex numbers have no natural total order. [`NumericOrder`] refuses to
//! compare them; [`MagnitudeOrder`] ranks them by modulus, then by argument.

use crate::error::{EvalError, EvalResult};
use crate::traits::Smaller;
use crate::value::Value;

/// Ordinary numeric ordering over reals and same-unit quantities.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericOrder;

impl Smaller for NumericOrder {
    fn smaller(&self, a: &Value, b: &Value) -> EvalResult<bool> {
        match (a, b) {
            (Value::Real(a), Value::Real(b)) => Ok(a < b),
            (Value::Unit(a), Value::Unit(b)) if a.same_unit(b) => Ok(a.value < b.value),
            (Value::Unit(a), Value::Unit(b)) => Err(EvalError::unsupported(
                "smaller",
                format!("units {} and {} are not comparable", a.unit, b.unit),
            )),
            (Value::Complex(_), _) | (_, Value::Complex(_)) => Err(EvalError::unsupported(
                "smaller",
                "complex numbers have no natural ordering",
            )),
            _ => Err(EvalError::unsupported(
                "smaller",
                format!("{} and {}", a.type_name(), b.type_name()),
            )),
        }
    }
}

/// Numeric ordering, extended to complex operands.
///
/// When either operand is complex both are ranked by `(|z|, arg z)`; reals take
/// part as complex numbers with a zero imaginary part.
#[derive(Debug, Clone, Copy, Default)]
pub struct MagnitudeOrder;

impl Smaller for MagnitudeOrder {
    fn smaller(&self, a: &Value, b: &Value) -> EvalResult<bool> {
        let polar = |value: &Value| match value {
            Value::Complex(z) => Some(z.to_polar()),
            Value::Real(x) => Some((x.abs(), if *x < 0.0 { std::f64::consts::PI } else { 0.0 })),
            _ => None,
        };
        match (a, b) {
            (Value::Complex(_), _) | (_, Value::Complex(_)) => match (polar(a), polar(b)) {
                (Some(pa), Some(pb)) => Ok(pa < pb),
                _ => Err(EvalError::unsupported(
                    "smaller",
                    format!("{} and {}", a.type_name(), b.type_name()),
                )),
            },
            _ => NumericOrder.smaller(a, b),
        }
    }
}
