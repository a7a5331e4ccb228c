//! Logic operations: not
//!
//! `and`/`or` are short-circuiting special forms implemented in `eval`, not
//! builtins -- an eager-argument builtin couldn't honor
//! `(and #f (undefined-name))` => `#f` without evaluating `undefined-name`.
//! `not` has no such requirement and lives here as an ordinary procedure.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

/// Returns `#t` if the argument is `#f`, otherwise `#f`. Only `#f` is falsy.
pub fn builtin_not(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("not", 1, args.len()));
    }
    Ok(Value::Bool(args[0].is_false()))
}

pub fn register(env: &Rc<Environment>) {
    env.bind("not", Value::Builtin { name: "not", func: builtin_not });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Rc<Environment> {
        Environment::new()
    }

    #[test]
    fn not_false_is_true() {
        assert!(matches!(builtin_not(&[Value::Bool(false)], &env()), Ok(Value::Bool(true))));
    }

    #[test]
    fn not_anything_else_is_false() {
        assert!(matches!(builtin_not(&[Value::Integer(0)], &env()), Ok(Value::Bool(false))));
        assert!(matches!(
            builtin_not(&[Value::Combination(vec![])], &env()),
            Ok(Value::Bool(false))
        ));
    }
}
