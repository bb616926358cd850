//! The `numeval_core` crate evaluates numeric functions over scalars and
//! containers through one uniform dispatch path.
//!
//! Key components:
//! - **Values**: `Value` (real, complex, unit, sequence, matrix, range, opaque) and its shape.
//! - **Kernels**: scalar `atan`, `tan`, division and multiplication.
//! - **Dispatch**: elementwise mapping, binary broadcasting and comparator-driven reductions.
//! - **Engine**: typed entry points plus a name-based catalogue with arity checks.
pub mod broadcast;
pub mod engine;
pub mod error;
pub mod functions;
pub mod kernels;
pub mod map;
pub mod order;
pub mod reduce;
pub mod settings;
pub mod shape;
pub mod traits;
pub mod value;

pub use engine::Engine;
pub use error::{EvalError, EvalResult};
pub use settings::{ComplexOrder, EvalSettings};
pub use value::{Matrix, Quantity, Range, Value};
