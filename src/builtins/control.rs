//! Control and meta operations: apply, eval, exit, load, force
//!
//! These builtins reach into `eval`, `lexer`, and `parser` directly, unlike
//! the pure data builtins in `arithmetic`/`lists`/etc.

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval;
use crate::lexer;
use crate::parser;
use crate::value::Value;
use std::rc::Rc;

/// `(apply proc arg-list)`: calls `proc` with the elements of `arg-list` as
/// its arguments.
pub fn builtin_apply(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("apply", 2, args.len()));
    }
    let operator = &args[0];
    let operands = match &args[1] {
        Value::Combination(items) => items.clone(),
        other => return Err(EvalError::type_error("apply", "list", other.type_name(), 2)),
    };
    eval::apply(operator, operands, env)
}

/// `(eval expr)`: evaluates an already-constructed expression value in the
/// calling environment.
pub fn builtin_eval(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("eval", 1, args.len()));
    }
    eval::eval(&args[0], env)
}

/// `(exit)`: ends the process immediately with status 0.
pub fn builtin_exit(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if !args.is_empty() {
        return Err(EvalError::arity("exit", 0, args.len()));
    }
    std::process::exit(0);
}

/// `(force promise)`: forces a `delay`/`cons-stream` promise, or passes
/// through any other value unchanged.
pub fn builtin_force(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("force", 1, args.len()));
    }
    eval::force(&args[0])
}

/// `(load name)`: reads, parses and evaluates a file's expressions in order,
/// into `env`. `name` may be a bare symbol or a quoted string.
pub fn builtin_load(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("load", 1, args.len()));
    }
    let stem = match &args[0] {
        Value::Name(name) => name.clone(),
        Value::Str(s) => s.clone(),
        other => return Err(EvalError::type_error("load", "name or string", other.type_name(), 1)),
    };
    let path = format!("{stem}.scm");
    let source = std::fs::read_to_string(&path).map_err(|e| EvalError::io(format!("load: {path}: {e}")))?;
    let tokens = lexer::lex(&source)?;
    let exprs = parser::parse(&tokens)?;
    let mut result = Value::Undefined;
    for expr in &exprs {
        result = eval::eval(expr, env)?;
    }
    Ok(result)
}

pub fn register(env: &Rc<Environment>) {
    env.bind("apply", Value::Builtin { name: "apply", func: builtin_apply });
    env.bind("eval", Value::Builtin { name: "eval", func: builtin_eval });
    env.bind("exit", Value::Builtin { name: "exit", func: builtin_exit });
    env.bind("force", Value::Builtin { name: "force", func: builtin_force });
    env.bind("load", Value::Builtin { name: "load", func: builtin_load });
}
