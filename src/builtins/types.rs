//! Type predicates: number?, string?, symbol?, boolean?, pair?, null?, procedure?
//!
//! The canonical list model has no separate nil/pair types: `pair?` and
//! `null?` both classify `Value::Combination` by whether it is empty.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn unary(args: &[Value], func: &str) -> Result<&Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity(func, 1, args.len()));
    }
    Ok(&args[0])
}

pub fn builtin_number_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let v = unary(args, "number?")?;
    Ok(Value::Bool(matches!(v, Value::Integer(_) | Value::Float(_))))
}

pub fn builtin_string_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let v = unary(args, "string?")?;
    Ok(Value::Bool(matches!(v, Value::Str(_))))
}

pub fn builtin_symbol_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let v = unary(args, "symbol?")?;
    Ok(Value::Bool(matches!(v, Value::Name(_))))
}

pub fn builtin_boolean_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let v = unary(args, "boolean?")?;
    Ok(Value::Bool(matches!(v, Value::Bool(_))))
}

pub fn builtin_pair_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let v = unary(args, "pair?")?;
    Ok(Value::Bool(matches!(v, Value::Combination(items) if !items.is_empty())))
}

pub fn builtin_null_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let v = unary(args, "null?")?;
    Ok(Value::Bool(matches!(v, Value::Combination(items) if items.is_empty())))
}

pub fn builtin_procedure_p(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    let v = unary(args, "procedure?")?;
    Ok(Value::Bool(v.is_callable()))
}

pub fn register(env: &Rc<Environment>) {
    env.bind("number?", Value::Builtin { name: "number?", func: builtin_number_p });
    env.bind("string?", Value::Builtin { name: "string?", func: builtin_string_p });
    env.bind("symbol?", Value::Builtin { name: "symbol?", func: builtin_symbol_p });
    env.bind("boolean?", Value::Builtin { name: "boolean?", func: builtin_boolean_p });
    env.bind("pair?", Value::Builtin { name: "pair?", func: builtin_pair_p });
    env.bind("null?", Value::Builtin { name: "null?", func: builtin_null_p });
    env.bind("procedure?", Value::Builtin { name: "procedure?", func: builtin_procedure_p });
}
