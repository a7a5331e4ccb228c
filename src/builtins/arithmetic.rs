//! Arithmetic operations: +, -, *, /
//!
//! `+`/`*` are n-ary with identities 0/1; `-`/`/` fold the first argument
//! over the rest (or negate/invert a single argument). If any operand is a
//! Float the result is Float; otherwise Integer. `/` yields a Float whenever
//! the division is not exact.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(n) => n,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Num::Int(n) => n == 0,
            Num::Float(n) => n == 0.0,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Num::Int(n) => Value::Integer(n),
            Num::Float(n) => Value::Float(n),
        }
    }
}

fn to_num(v: &Value, func: &str, position: usize) -> Result<Num, EvalError> {
    match v {
        Value::Integer(n) => Ok(Num::Int(*n)),
        Value::Float(n) => Ok(Num::Float(*n)),
        other => Err(EvalError::type_error(func, "number", other.type_name(), position)),
    }
}

fn add(a: Num, b: Num) -> Num {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => Num::Int(x.wrapping_add(y)),
        _ => Num::Float(a.as_f64() + b.as_f64()),
    }
}

fn sub(a: Num, b: Num) -> Num {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => Num::Int(x.wrapping_sub(y)),
        _ => Num::Float(a.as_f64() - b.as_f64()),
    }
}

fn mul(a: Num, b: Num) -> Num {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => Num::Int(x.wrapping_mul(y)),
        _ => Num::Float(a.as_f64() * b.as_f64()),
    }
}

fn div(a: Num, b: Num, func: &str) -> Result<Num, EvalError> {
    if b.is_zero() {
        return Err(EvalError::value(format!("{func}: division by zero")));
    }
    Ok(match (a, b) {
        (Num::Int(x), Num::Int(y)) if x % y == 0 => Num::Int(x / y),
        _ => Num::Float(a.as_f64() / b.as_f64()),
    })
}

/// `(+ ...)`: sum of all arguments; `(+)` is 0.
pub fn builtin_add(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut acc = Num::Int(0);
    for (i, arg) in args.iter().enumerate() {
        acc = add(acc, to_num(arg, "+", i + 1)?);
    }
    Ok(acc.into_value())
}

/// `(- ...)`: subtract the rest from the first, or negate a single argument.
pub fn builtin_sub(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity("-", "at least 1", 0));
    }
    let first = to_num(&args[0], "-", 1)?;
    if args.len() == 1 {
        return Ok(sub(Num::Int(0), first).into_value());
    }
    let mut acc = first;
    for (i, arg) in args[1..].iter().enumerate() {
        acc = sub(acc, to_num(arg, "-", i + 2)?);
    }
    Ok(acc.into_value())
}

/// `(* ...)`: product of all arguments; `(*)` is 1.
pub fn builtin_mul(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut acc = Num::Int(1);
    for (i, arg) in args.iter().enumerate() {
        acc = mul(acc, to_num(arg, "*", i + 1)?);
    }
    Ok(acc.into_value())
}

/// `(/ ...)`: divide the first by the rest, or invert a single argument.
pub fn builtin_div(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity("/", "at least 1", 0));
    }
    let first = to_num(&args[0], "/", 1)?;
    if args.len() == 1 {
        return Ok(div(Num::Int(1), first, "/")?.into_value());
    }
    let mut acc = first;
    for (i, arg) in args[1..].iter().enumerate() {
        acc = div(acc, to_num(arg, "/", i + 2)?, "/")?;
    }
    Ok(acc.into_value())
}

pub fn register(env: &Rc<Environment>) {
    env.bind("+", Value::Builtin { name: "+", func: builtin_add });
    env.bind("-", Value::Builtin { name: "-", func: builtin_sub });
    env.bind("*", Value::Builtin { name: "*", func: builtin_mul });
    env.bind("/", Value::Builtin { name: "/", func: builtin_div });
}
