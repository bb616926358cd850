use std::fmt::Debug;

use crate::error::EvalResult;
use crate::value::Value;

/// Implemented by wrapper types that have no kind of their own but can be
/// represented as a plain value (a number, a complex number, an array...).
///
/// The classifier calls `primitive` at most once per operand; a primitive that is
/// itself opaque is rejected.
pub trait AsPrimitive: Debug + Send + Sync {
    fn primitive(&self) -> Value;

    /// Name used in error messages.
    fn type_name(&self) -> &'static str {
        "opaque"
    }
}

/// Strict less-than over two scalars.
///
/// Reductions receive the comparator as a parameter; `min` folds with it
/// directly and `max` folds with its arguments swapped.
pub trait Smaller: Send + Sync {
    fn smaller(&self, a: &Value, b: &Value) -> EvalResult<bool>;
}

/// Swaps the comparator's operands, turning "smaller" into "larger".
pub struct Reversed<'a>(pub &'a dyn Smaller);

impl Smaller for Reversed<'_> {
    fn smaller(&self, a: &Value, b: &Value) -> EvalResult<bool> {
        self.0.smaller(b, a)
    }
}
