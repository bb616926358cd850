//! Scalar kernels.
//!
//! Each kernel handles exactly one pair of resolved scalars (real, complex or
//! unit). Containers never reach this module; the mapper and broadcaster walk
//! them and call in per leaf.

use num_complex::Complex64;
use num_traits::Zero;

use crate::error::{EvalError, EvalResult};
use crate::value::Value;

fn unsupported_pair(function: &'static str, a: &Value, b: &Value) -> EvalError {
    EvalError::unsupported(function, format!("{} and {}", a.type_name(), b.type_name()))
}

/// Inverse tangent of a complex number on the principal branch.
///
/// `atan(z) = i/2 * (ln(1 - iz) - ln(1 + iz))`, folded into a single logarithm
/// of `(1 - iz) / (1 + iz)`.
pub fn complex_atan(z: Complex64) -> Complex64 {
    let (re, im) = (z.re, z.im);
    let den = re * re + (1.0 - im) * (1.0 - im);
    let t = Complex64::new((1.0 - im * im - re * re) / den, (-2.0 * re) / den);
    let l = t.ln();
    Complex64::new(-0.5 * l.im, 0.5 * l.re)
}

pub fn atan(x: &Value) -> EvalResult<Value> {
    match x {
        Value::Real(x) => Ok(Value::Real(x.atan())),
        Value::Complex(z) => Ok(Value::Complex(complex_atan(*z))),
        other => Err(EvalError::unsupported("atan", other.type_name())),
    }
}

pub fn tan(x: &Value) -> EvalResult<Value> {
    match x {
        Value::Real(x) => Ok(Value::Real(x.tan())),
        Value::Complex(z) => Ok(Value::Complex(z.tan())),
        other => Err(EvalError::unsupported("tan", other.type_name())),
    }
}

fn real_as_complex(x: f64) -> Complex64 {
    Complex64::new(x, Zero::zero())
}

/// `a / b` for one pair of scalars.
///
/// Reals follow IEEE-754: `x / 0` is a signed infinity and `0 / 0` is NaN.
/// A unit may be divided by a plain number, never the reverse.
pub fn divide(a: &Value, b: &Value) -> EvalResult<Value> {
    match (a, b) {
        (Value::Real(a), Value::Real(b)) => Ok(Value::Real(a / b)),
        (Value::Real(a), Value::Complex(b)) => Ok(Value::Complex(real_as_complex(*a) / *b)),
        (Value::Complex(a), Value::Real(b)) => Ok(Value::Complex(*a / *b)),
        (Value::Complex(a), Value::Complex(b)) => Ok(Value::Complex(*a / *b)),
        (Value::Unit(q), Value::Real(b)) => Ok(Value::Unit(q.divided(*b))),
        (Value::Real(_), Value::Unit(q)) => Err(EvalError::unsupported(
            "edivide",
            format!("unit {} cannot divide a plain number", q.unit),
        )),
        _ => Err(unsupported_pair("edivide", a, b)),
    }
}

/// `a * b` for one pair of scalars. Units scale by plain numbers on either side.
pub fn multiply(a: &Value, b: &Value) -> EvalResult<Value> {
    match (a, b) {
        (Value::Real(a), Value::Real(b)) => Ok(Value::Real(a * b)),
        (Value::Real(a), Value::Complex(b)) => Ok(Value::Complex(real_as_complex(*a) * *b)),
        (Value::Complex(a), Value::Real(b)) => Ok(Value::Complex(*a * *b)),
        (Value::Complex(a), Value::Complex(b)) => Ok(Value::Complex(*a * *b)),
        (Value::Unit(q), Value::Real(k)) | (Value::Real(k), Value::Unit(q)) => {
            Ok(Value::Unit(q.scaled(*k)))
        }
        _ => Err(unsupported_pair("emultiply", a, b)),
    }
}

#[cfg(test)]
mod tests {
    use super::{atan, complex_atan, divide, multiply, tan};
    use crate::value::Value;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex64;

    fn real(value: Value) -> f64 {
        value.as_real().expect("real result")
    }

    fn complex(value: Value) -> Complex64 {
        value.as_complex().expect("complex result")
    }

    #[test]
    fn real_division_follows_ieee() {
        let div = |a: f64, b: f64| real(divide(&Value::Real(a), &Value::Real(b)).expect("divide"));
        assert_eq!(div(4.0, 2.0), 2.0);
        assert_eq!(div(-4.0, 2.0), -2.0);
        assert_eq!(div(4.0, -2.0), -2.0);
        assert_eq!(div(-4.0, -2.0), 2.0);
        assert_eq!(div(4.0, 0.0), f64::INFINITY);
        assert_eq!(div(-4.0, 0.0), f64::NEG_INFINITY);
        assert_eq!(div(4.0, -0.0), f64::NEG_INFINITY);
        assert_eq!(div(0.0, -5.0), 0.0);
        assert!(div(0.0, 0.0).is_nan());
    }

    #[test]
    fn complex_division() {
        let z = complex(divide(&Value::complex(2.0, 3.0), &Value::Real(2.0)).expect("divide"));
        assert_eq!(z, Complex64::new(1.0, 1.5));

        let z = complex(divide(&Value::complex(2.0, 3.0), &Value::complex(0.0, 4.0)).expect("divide"));
        assert_eq!(z, Complex64::new(0.75, -0.5));

        let z = complex(divide(&Value::complex(0.0, 2.0), &Value::complex(0.0, 4.0)).expect("divide"));
        assert_eq!(z, Complex64::new(0.5, 0.0));

        let z = complex(divide(&Value::Real(4.0), &Value::complex(1.0, 2.0)).expect("divide"));
        assert_abs_diff_eq!(z.re, 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(z.im, -1.6, epsilon = 1e-12);
    }

    #[test]
    fn unit_division() {
        let q = divide(&Value::unit(5.0, "m"), &Value::Real(10.0)).expect("unit / number");
        assert_eq!(q, Value::unit(0.5, "m"));

        let err = divide(&Value::Real(10.0), &Value::unit(5.0, "m")).expect_err("number / unit");
        assert_eq!(err.kind(), "UnsupportedTypeError");

        let err = divide(&Value::unit(1.0, "m"), &Value::unit(1.0, "s")).expect_err("unit / unit");
        assert!(err.to_string().contains("unit and unit"));
    }

    #[test]
    fn unit_multiplication_commutes() {
        let left = multiply(&Value::unit(2.0, "kg"), &Value::Real(3.0)).expect("unit * number");
        let right = multiply(&Value::Real(3.0), &Value::unit(2.0, "kg")).expect("number * unit");
        assert_eq!(left, Value::unit(6.0, "kg"));
        assert_eq!(left, right);
    }

    #[test]
    fn atan_of_reals() {
        assert_abs_diff_eq!(
            real(atan(&Value::Real(1.0)).expect("atan")),
            std::f64::consts::FRAC_PI_4,
            epsilon = 1e-15
        );
        assert_eq!(real(atan(&Value::Real(0.0)).expect("atan")), 0.0);
    }

    #[test]
    fn atan_of_complex_zero_is_zero() {
        let z = complex_atan(Complex64::new(0.0, 0.0));
        assert_eq!(z.re, 0.0);
        assert_eq!(z.im, 0.0);
    }

    #[test]
    fn atan_matches_library_and_inverts_tan() {
        for (re, im) in [(2.0, 3.0), (-2.0, 3.0), (0.5, -0.25), (-1.5, -0.75), (1.0, 0.0)] {
            let z = Complex64::new(re, im);
            let w = complex_atan(z);
            let expected = z.atan();
            assert_abs_diff_eq!(w.re, expected.re, epsilon = 1e-12);
            assert_abs_diff_eq!(w.im, expected.im, epsilon = 1e-12);

            let back = complex(tan(&Value::Complex(w)).expect("tan"));
            assert_abs_diff_eq!(back.re, re, epsilon = 1e-10);
            assert_abs_diff_eq!(back.im, im, epsilon = 1e-10);
        }
    }

    #[test]
    fn atan_of_i_over_two() {
        // atan(i/2) = i * atanh(1/2)
        let w = complex_atan(Complex64::i() * 0.5);
        assert_abs_diff_eq!(w.re, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(w.im, 0.5_f64.atanh(), epsilon = 1e-12);
    }

    #[test]
    fn kernels_reject_units() {
        let err = atan(&Value::unit(1.0, "m")).expect_err("atan of unit");
        assert!(err.to_string().contains("atan"));
        assert!(err.to_string().contains("unit"));
        assert!(tan(&Value::unit(1.0, "m")).is_err());
    }
}
