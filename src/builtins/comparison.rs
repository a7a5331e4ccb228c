//! Comparison operations: =, <, >, <=, >=
//!
//! `=` and `<` are the required binary numeric comparisons (§4.F); `>`,
//! `<=`, `>=` are carried over from the teacher as a natural, side-effect
//! free companion set.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn binary_numbers(args: &[Value], func: &str) -> Result<(f64, f64), EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity(func, 2, args.len()));
    }
    let a = match &args[0] {
        Value::Integer(n) => *n as f64,
        Value::Float(n) => *n,
        other => return Err(EvalError::type_error(func, "number", other.type_name(), 1)),
    };
    let b = match &args[1] {
        Value::Integer(n) => *n as f64,
        Value::Float(n) => *n,
        other => return Err(EvalError::type_error(func, "number", other.type_name(), 2)),
    };
    Ok((a, b))
}

pub fn builtin_eq(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let (a, b) = binary_numbers(args, "=")?;
    Ok(Value::Bool(a == b))
}

pub fn builtin_lt(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let (a, b) = binary_numbers(args, "<")?;
    Ok(Value::Bool(a < b))
}

pub fn builtin_gt(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let (a, b) = binary_numbers(args, ">")?;
    Ok(Value::Bool(a > b))
}

pub fn builtin_le(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let (a, b) = binary_numbers(args, "<=")?;
    Ok(Value::Bool(a <= b))
}

pub fn builtin_ge(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let (a, b) = binary_numbers(args, ">=")?;
    Ok(Value::Bool(a >= b))
}

pub fn register(env: &Rc<Environment>) {
    env.bind("=", Value::Builtin { name: "=", func: builtin_eq });
    env.bind("<", Value::Builtin { name: "<", func: builtin_lt });
    env.bind(">", Value::Builtin { name: ">", func: builtin_gt });
    env.bind("<=", Value::Builtin { name: "<=", func: builtin_le });
    env.bind(">=", Value::Builtin { name: ">=", func: builtin_ge });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Rc<Environment> {
        Environment::new()
    }

    #[test]
    fn equal_numbers() {
        let r = builtin_eq(&[Value::Integer(5), Value::Integer(5)], &env());
        assert!(matches!(r, Ok(Value::Bool(true))));
    }

    #[test]
    fn less_than() {
        let r = builtin_lt(&[Value::Integer(1), Value::Integer(2)], &env());
        assert!(matches!(r, Ok(Value::Bool(true))));
    }

    #[test]
    fn wrong_arity_is_value_error() {
        let r = builtin_eq(&[Value::Integer(1)], &env());
        assert_eq!(r.unwrap_err().kind_name(), "ValueError");
    }
}
