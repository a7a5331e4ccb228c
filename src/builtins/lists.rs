//! List operations: cons, car, cdr, list, length
//!
//! Lists are `Value::Combination` -- there is no separate pair/nil type.
//! `cons` flattens its second argument's items onto the front rather than
//! nesting a two-element structure, so `(cons 1 (list 2 3))` yields the
//! three-element list `(1 2 3)`, not `(1 (2 3))`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

/// Prepends `elem` onto `list`'s items. `list` must itself be a list.
pub fn builtin_cons(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("cons", 2, args.len()));
    }
    let items = match &args[1] {
        Value::Combination(items) => items,
        other => return Err(EvalError::type_error("cons", "list", other.type_name(), 2)),
    };
    let mut result = Vec::with_capacity(items.len() + 1);
    result.push(args[0].clone());
    result.extend(items.iter().cloned());
    Ok(Value::Combination(result))
}

/// Returns the first element of a non-empty list.
pub fn builtin_car(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("car", 1, args.len()));
    }
    match &args[0] {
        Value::Combination(items) if !items.is_empty() => Ok(items[0].clone()),
        Value::Combination(_) => Err(EvalError::value("car of empty list")),
        other => Err(EvalError::type_error("car", "list", other.type_name(), 1)),
    }
}

/// Returns all elements but the first of a non-empty list.
pub fn builtin_cdr(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("cdr", 1, args.len()));
    }
    match &args[0] {
        Value::Combination(items) if !items.is_empty() => {
            Ok(Value::Combination(items[1..].to_vec()))
        }
        Value::Combination(_) => Err(EvalError::value("cdr of empty list")),
        other => Err(EvalError::type_error("cdr", "list", other.type_name(), 1)),
    }
}

/// Builds a list out of its arguments, in order.
pub fn builtin_list(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::Combination(args.to_vec()))
}

/// Returns the number of elements in a list.
pub fn builtin_length(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("length", 1, args.len()));
    }
    match &args[0] {
        Value::Combination(items) => Ok(Value::Integer(items.len() as i64)),
        other => Err(EvalError::type_error("length", "list", other.type_name(), 1)),
    }
}

pub fn register(env: &Rc<Environment>) {
    env.bind("cons", Value::Builtin { name: "cons", func: builtin_cons });
    env.bind("car", Value::Builtin { name: "car", func: builtin_car });
    env.bind("cdr", Value::Builtin { name: "cdr", func: builtin_cdr });
    env.bind("list", Value::Builtin { name: "list", func: builtin_list });
    env.bind("length", Value::Builtin { name: "length", func: builtin_length });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Rc<Environment> {
        Environment::new()
    }

    #[test]
    fn cons_flattens_onto_existing_items() {
        let list = Value::Combination(vec![Value::Integer(2), Value::Integer(3)]);
        let r = builtin_cons(&[Value::Integer(1), list], &env());
        match r {
            Ok(Value::Combination(items)) => {
                assert_eq!(items.len(), 3);
                assert!(matches!(items[0], Value::Integer(1)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn car_and_cdr_on_empty_list_are_value_errors() {
        let empty = Value::Combination(vec![]);
        assert_eq!(builtin_car(&[empty.clone()], &env()).unwrap_err().kind_name(), "ValueError");
        assert_eq!(builtin_cdr(&[empty], &env()).unwrap_err().kind_name(), "ValueError");
    }

    #[test]
    fn car_and_cdr_split_a_nonempty_list() {
        let list = Value::Combination(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
        assert!(matches!(builtin_car(&[list.clone()], &env()), Ok(Value::Integer(1))));
        match builtin_cdr(&[list], &env()) {
            Ok(Value::Combination(items)) => assert_eq!(items.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn length_counts_items() {
        let list = Value::Combination(vec![Value::Integer(1), Value::Integer(2)]);
        assert!(matches!(builtin_length(&[list], &env()), Ok(Value::Integer(2))));
    }

    #[test]
    fn list_builds_a_combination_from_its_arguments() {
        let r = builtin_list(&[Value::Integer(1), Value::Integer(2)], &env());
        match r {
            Ok(Value::Combination(items)) => assert_eq!(items.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }
}
