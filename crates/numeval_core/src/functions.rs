//! Named function catalogue with variadic argument lists.
//!
//! Callers that only know a function by name hand over a slice of arguments;
//! the catalogue checks the arity contract before anything is evaluated and
//! routes to the typed [`Engine`] method.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::engine::Engine;
use crate::error::{EvalError, EvalResult};
use crate::shape::classify;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Atan,
    Tan,
    Min,
    Max,
    Edivide,
    Emultiply,
    Size,
}

/// How many arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    /// One container, or one or more scalars.
    ContainerOrScalars,
}

impl Arity {
    /// Reject an argument count that cannot satisfy this contract.
    ///
    /// Whether a container/scalar mix is valid depends on the arguments
    /// themselves; see [`normalize_reduce_args`].
    pub fn check(self, function: &'static str, actual: usize) -> EvalResult<()> {
        match self {
            Arity::Exactly(n) if actual != n => Err(EvalError::Arity {
                function,
                expected: n.to_string(),
                actual,
            }),
            _ => Ok(()),
        }
    }
}

impl Function {
    pub const ALL: [Function; 7] = [
        Function::Atan,
        Function::Tan,
        Function::Min,
        Function::Max,
        Function::Edivide,
        Function::Emultiply,
        Function::Size,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::Atan => "atan",
            Function::Tan => "tan",
            Function::Min => "min",
            Function::Max => "max",
            Function::Edivide => "edivide",
            Function::Emultiply => "emultiply",
            Function::Size => "size",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Function::Atan | Function::Tan | Function::Size => Arity::Exactly(1),
            Function::Edivide | Function::Emultiply => Arity::Exactly(2),
            Function::Min | Function::Max => Arity::ContainerOrScalars,
        }
    }

    /// Check the arity contract, then evaluate.
    pub fn call(self, engine: &Engine, args: &[Value]) -> EvalResult<Value> {
        let function = self.name();
        debug!(function, args = args.len(), "calling function");
        self.arity().check(function, args.len())?;

        match self {
            Function::Atan => engine.atan(&args[0]),
            Function::Tan => engine.tan(&args[0]),
            Function::Size => engine.size(&args[0]),
            Function::Edivide => engine.edivide(&args[0], &args[1]),
            Function::Emultiply => engine.emultiply(&args[0], &args[1]),
            Function::Min => match normalize_reduce_args(function, args)? {
                ReduceArgs::Container(container) => engine.min(container),
                ReduceArgs::Scalars(scalars) => engine.min_of(scalars),
            },
            Function::Max => match normalize_reduce_args(function, args)? {
                ReduceArgs::Container(container) => engine.max(container),
                ReduceArgs::Scalars(scalars) => engine.max_of(scalars),
            },
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Function {
    type Err = EvalError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        lookup(name)
    }
}

/// Arguments of a fold-reduction after normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReduceArgs<'a> {
    Container(&'a Value),
    Scalars(&'a [Value]),
}

/// Split a reduction's argument list into one container or a run of scalars.
///
/// A single container argument is reduced by shape; anything else must be
/// scalars only. Mixing a container with other arguments is an arity error.
pub fn normalize_reduce_args<'a>(function: &'static str, args: &'a [Value]) -> EvalResult<ReduceArgs<'a>> {
    let arity_error = || EvalError::Arity {
        function,
        expected: "1 matrix or multiple scalars".to_string(),
        actual: args.len(),
    };
    match args {
        [] => Err(arity_error()),
        [single] if classify(single, function)?.kind.is_container() => Ok(ReduceArgs::Container(single)),
        _ => {
            for arg in args {
                if classify(arg, function)?.kind.is_container() {
                    return Err(arity_error());
                }
            }
            Ok(ReduceArgs::Scalars(args))
        }
    }
}

pub fn lookup(name: &str) -> EvalResult<Function> {
    Function::ALL
        .into_iter()
        .find(|function| function.name() == name)
        .ok_or_else(|| EvalError::UnknownFunction { name: name.to_string() })
}

/// Look up `name` and evaluate it with `args`.
pub fn call(engine: &Engine, name: &str, args: &[Value]) -> EvalResult<Value> {
    lookup(name)?.call(engine, args)
}

#[cfg(test)]
mod tests {
    use super::{call, lookup, normalize_reduce_args, Arity, Function, ReduceArgs};
    use crate::engine::Engine;
    use crate::error::EvalError;
    use crate::value::{Matrix, Range, Value};

    fn assert_err_contains<T: std::fmt::Debug>(result: Result<T, EvalError>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    fn eval(name: &str, args: &[Value]) -> Result<Value, EvalError> {
        call(&Engine::default(), name, args)
    }

    #[test]
    fn lookup_finds_every_function() {
        for function in Function::ALL {
            assert_eq!(lookup(function.name()).expect("known"), function);
            assert_eq!(function.to_string().parse::<Function>().expect("parse"), function);
        }
        let err = lookup("sqrt").expect_err("unknown");
        assert_eq!(err.kind(), "UnknownFunctionError");
    }

    #[test]
    fn arity_contracts() {
        assert_eq!(Function::Atan.arity(), Arity::Exactly(1));
        assert_eq!(Function::Edivide.arity(), Arity::Exactly(2));
        assert_eq!(Function::Min.arity(), Arity::ContainerOrScalars);
    }

    #[test]
    fn arity_message_reports_the_exact_count() {
        assert!(Arity::Exactly(3).check("clamp", 3).is_ok());
        let err = Arity::Exactly(3).check("clamp", 2).expect_err("two of three");
        assert_eq!(err, EvalError::Arity { function: "clamp", expected: "3".to_string(), actual: 2 });
        assert!(err.to_string().contains("2 provided, 3 expected"));
        assert!(Arity::ContainerOrScalars.check("min", 5).is_ok());
    }

    #[test]
    fn unary_functions_take_exactly_one_argument() {
        let err = eval("atan", &[]).expect_err("no args");
        assert_eq!(err, EvalError::Arity { function: "atan", expected: "1".to_string(), actual: 0 });
        assert_err_contains(eval("atan", &[Value::Real(1.0), Value::Real(2.0)]), "2 provided");
        assert_err_contains(eval("size", &[]), "function size");
    }

    #[test]
    fn binary_functions_take_exactly_two_arguments() {
        assert_err_contains(eval("edivide", &[Value::Real(1.0)]), "1 provided");
        assert_err_contains(
            eval("emultiply", &[Value::Real(1.0), Value::Real(2.0), Value::Real(3.0)]),
            "3 provided",
        );
    }

    #[test]
    fn reductions_reject_empty_and_mixed_argument_lists() {
        assert_eq!(eval("min", &[]).expect_err("no args").kind(), "ArityError");
        let err = eval("min", &[Value::from(vec![1.0, 2.0]), Value::Real(3.0)]).expect_err("mixed");
        assert_eq!(err.kind(), "ArityError");
        assert_err_contains(
            eval("max", &[Value::Real(3.0), Value::from(vec![1.0])]),
            "1 matrix or multiple scalars",
        );
    }

    #[test]
    fn normalize_separates_container_from_scalars() {
        let container = [Value::from(vec![1.0, 2.0])];
        assert_eq!(
            normalize_reduce_args("min", &container).expect("container"),
            ReduceArgs::Container(&container[0])
        );
        let scalars = [Value::Real(1.0), Value::complex(0.0, 1.0)];
        assert_eq!(
            normalize_reduce_args("min", &scalars).expect("scalars"),
            ReduceArgs::Scalars(&scalars)
        );
        let single = [Value::Real(4.0)];
        assert_eq!(
            normalize_reduce_args("min", &single).expect("single scalar"),
            ReduceArgs::Scalars(&single)
        );
    }

    #[test]
    fn min_by_name() {
        assert_eq!(eval("min", &[Value::from(vec![3.0, 1.0, 2.0])]).expect("min"), Value::Real(1.0));
        assert_eq!(
            eval("min", &[Value::Real(3.0), Value::Real(1.0), Value::Real(2.0)]).expect("min"),
            Value::Real(1.0)
        );
        assert_eq!(
            eval("min", &[Value::from(vec![vec![1.0, 4.0], vec![3.0, 0.0], vec![-1.0, 9.0]])]).expect("min"),
            Value::from(vec![-1.0, 0.0])
        );
        assert_eq!(eval("max", &[Value::Real(3.0), Value::Real(8.0)]).expect("max"), Value::Real(8.0));
    }

    #[test]
    fn edivide_by_name() {
        let range = Value::Range(Range::new(2.0, 2.0, 6.0).expect("range"));
        assert_eq!(
            eval("edivide", &[range, Value::Real(2.0)]).expect("divide"),
            Value::from(vec![1.0, 2.0, 3.0])
        );

        let denominators = Value::Matrix(Matrix::from_rows(vec![vec![1.0, 4.0], vec![2.0, 0.0]]).expect("matrix"));
        let quotient = eval("edivide", &[Value::Real(1.0), denominators]).expect("divide");
        let expected = Matrix::from_rows(vec![vec![1.0, 0.25], vec![0.5, f64::INFINITY]]).expect("matrix");
        assert_eq!(quotient, Value::Matrix(expected));

        assert_err_contains(
            eval("edivide", &[Value::from(vec![vec![1.0, 2.0]]), Value::from(vec![vec![1.0]])]),
            "Dimension mismatch in function edivide",
        );
    }

    #[test]
    fn size_by_name() {
        assert_eq!(
            eval("size", &[Value::from(vec![1.0, 2.0, 3.0])]).expect("size"),
            Value::from(vec![3.0])
        );
    }

    #[test]
    fn kernel_errors_pass_through_unchanged() {
        let err = eval("atan", &[Value::unit(1.0, "m")]).expect_err("unit");
        assert_eq!(err, EvalError::UnsupportedType { function: "atan", kind: "unit".to_string() });
    }
}
