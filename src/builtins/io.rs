//! Console output: display
//!
//! `display` prints a value's human-facing rendering (no quotes around
//! strings) with no trailing newline, and returns `Value::Undefined`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::printer;
use crate::value::Value;
use std::io::Write;
use std::rc::Rc;

pub fn builtin_display(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("display", 1, args.len()));
    }
    print!("{}", printer::display_string(&args[0]));
    let _ = std::io::stdout().flush();
    Ok(Value::Undefined)
}

pub fn register(env: &Rc<Environment>) {
    env.bind("display", Value::Builtin { name: "display", func: builtin_display });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Rc<Environment> {
        Environment::new()
    }

    #[test]
    fn display_returns_undefined() {
        let r = builtin_display(&[Value::Str("hi".to_string())], &env());
        assert!(matches!(r, Ok(Value::Undefined)));
    }

    #[test]
    fn display_requires_exactly_one_argument() {
        let err = builtin_display(&[], &env()).unwrap_err();
        assert_eq!(err.kind_name(), "ValueError");
    }
}
