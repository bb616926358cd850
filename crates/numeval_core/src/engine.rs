//! Typed entry points for every operation in the catalogue.
//!
//! An [`Engine`] carries the evaluation settings and the comparator used by
//! reductions. It holds no mutable state and can be shared across threads.

use std::sync::Arc;

use tracing::debug;

use crate::broadcast::zip_binary;
use crate::error::{EvalError, EvalResult};
use crate::kernels;
use crate::map::map_unary;
use crate::reduce::{fold_extreme, reduce};
use crate::settings::EvalSettings;
use crate::shape::classify;
use crate::traits::{Reversed, Smaller};
use crate::value::{Range, Value};

#[derive(Clone)]
pub struct Engine {
    settings: EvalSettings,
    smaller: Arc<dyn Smaller>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EvalSettings::default())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Engine {
    pub fn new(settings: EvalSettings) -> Self {
        let smaller = settings.comparator();
        Self { settings, smaller }
    }

    /// Use a caller-supplied comparator instead of the one `settings` selects.
    pub fn with_comparator(settings: EvalSettings, smaller: Arc<dyn Smaller>) -> Self {
        Self { settings, smaller }
    }

    pub fn settings(&self) -> &EvalSettings {
        &self.settings
    }

    /// Build a range honoring `inclusive_ranges`.
    pub fn range(&self, start: f64, step: f64, stop: f64) -> EvalResult<Value> {
        Range::with_bounds(start, step, stop, self.settings.inclusive_ranges).map(Value::Range)
    }

    pub fn atan(&self, x: &Value) -> EvalResult<Value> {
        map_unary(x, "atan", kernels::atan)
    }

    pub fn tan(&self, x: &Value) -> EvalResult<Value> {
        map_unary(x, "tan", kernels::tan)
    }

    /// Elementwise `a / b`.
    pub fn edivide(&self, a: &Value, b: &Value) -> EvalResult<Value> {
        zip_binary(a, b, "edivide", kernels::divide)
    }

    /// Elementwise `a * b`.
    pub fn emultiply(&self, a: &Value, b: &Value) -> EvalResult<Value> {
        zip_binary(a, b, "emultiply", kernels::multiply)
    }

    /// Minimum of one container: a scalar for vectors, one entry per column for matrices.
    pub fn min(&self, container: &Value) -> EvalResult<Value> {
        reduce(container, "min", self.smaller.as_ref())
    }

    /// Minimum of one or more scalars.
    pub fn min_of(&self, scalars: &[Value]) -> EvalResult<Value> {
        self.extreme_of(scalars, "min", self.smaller.as_ref())
    }

    pub fn max(&self, container: &Value) -> EvalResult<Value> {
        reduce(container, "max", &Reversed(self.smaller.as_ref()))
    }

    pub fn max_of(&self, scalars: &[Value]) -> EvalResult<Value> {
        self.extreme_of(scalars, "max", &Reversed(self.smaller.as_ref()))
    }

    /// Dimensions of a value as a sequence; empty for scalars.
    pub fn size(&self, x: &Value) -> EvalResult<Value> {
        let classified = classify(x, "size")?;
        let dims = classified.shape.dims().iter().map(|&d| Value::Real(d as f64)).collect();
        Ok(Value::Sequence(dims))
    }

    fn extreme_of(&self, scalars: &[Value], function: &'static str, smaller: &dyn Smaller) -> EvalResult<Value> {
        for value in scalars {
            if classify(value, function)?.kind.is_container() {
                return Err(EvalError::Arity {
                    function,
                    expected: "1 matrix or multiple scalars".to_string(),
                    actual: scalars.len(),
                });
            }
        }
        debug!(function, count = scalars.len(), "folding scalar arguments");
        fold_extreme(scalars.iter(), smaller, function)?.ok_or_else(|| EvalError::Arity {
            function,
            expected: "one or more".to_string(),
            actual: 0,
        })
    }
}
