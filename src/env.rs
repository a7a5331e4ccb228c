// ABOUTME: Chained environments for variable bindings and lexical scoping

use crate::error::EvalError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates the distinguished global environment (no parent).
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a child environment with an empty bindings map.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// `extend`: a child environment seeded with the given bindings, used on
    /// every procedure call. Each call gets its own fresh map -- environments
    /// are never constructed sharing a bindings map.
    pub fn extend(parent: Rc<Environment>, bindings: HashMap<String, Value>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(bindings),
            parent: Some(parent),
        })
    }

    /// `bind`: writes only to this environment's own frame.
    pub fn bind(&self, name: &str, value: Value) {
        self.bindings.borrow_mut().insert(name.to_string(), value);
    }

    /// `lookup`: walks the parent chain; fails with NameError on a global miss.
    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Ok(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.lookup(name),
            None => Err(EvalError::unbound(name)),
        }
    }

    /// `set!`: finds the nearest frame that already binds `name` and replaces
    /// its value there. Distinct from `bind`, which always writes local.
    pub fn set(&self, name: &str, value: Value) -> Result<(), EvalError> {
        if self.bindings.borrow().contains_key(name) {
            self.bindings.borrow_mut().insert(name.to_string(), value);
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.set(name, value),
            None => Err(EvalError::unbound(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_and_lookup() {
        let env = Environment::new();
        env.bind("x", Value::Integer(42));
        match env.lookup("x") {
            Ok(Value::Integer(n)) => assert_eq!(n, 42),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unbound_is_name_error() {
        let env = Environment::new();
        let err = env.lookup("missing").unwrap_err();
        assert_eq!(err.kind_name(), "NameError");
    }

    #[test]
    fn child_shadows_parent() {
        let parent = Environment::new();
        parent.bind("x", Value::Integer(1));
        let child = Environment::with_parent(parent);
        child.bind("x", Value::Integer(2));
        match child.lookup("x") {
            Ok(Value::Integer(n)) => assert_eq!(n, 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn child_sees_parent_bindings() {
        let parent = Environment::new();
        parent.bind("x", Value::Integer(1));
        let child = Environment::with_parent(parent);
        match child.lookup("x") {
            Ok(Value::Integer(n)) => assert_eq!(n, 1),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn set_walks_parent_chain_and_mutates_in_place() {
        let parent = Environment::new();
        parent.bind("x", Value::Integer(1));
        let child = Environment::with_parent(parent.clone());

        child.set("x", Value::Integer(99)).unwrap();

        match parent.lookup("x") {
            Ok(Value::Integer(n)) => assert_eq!(n, 99),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn set_on_unbound_name_fails() {
        let env = Environment::new();
        let err = env.set("missing", Value::Integer(1)).unwrap_err();
        assert_eq!(err.kind_name(), "NameError");
    }

    #[test]
    fn define_is_always_local_even_when_parent_has_same_name() {
        let parent = Environment::new();
        parent.bind("x", Value::Integer(1));
        let child = Environment::with_parent(parent.clone());
        child.bind("x", Value::Integer(2));
        assert!(matches!(parent.lookup("x"), Ok(Value::Integer(1))));
        assert!(matches!(child.lookup("x"), Ok(Value::Integer(2))));
    }

    #[test]
    fn extend_creates_fresh_map_each_call() {
        let parent = Environment::new();
        let mut b1 = HashMap::new();
        b1.insert("n".to_string(), Value::Integer(1));
        let c1 = Environment::extend(parent.clone(), b1);

        let mut b2 = HashMap::new();
        b2.insert("n".to_string(), Value::Integer(2));
        let c2 = Environment::extend(parent, b2);

        assert!(matches!(c1.lookup("n"), Ok(Value::Integer(1))));
        assert!(matches!(c2.lookup("n"), Ok(Value::Integer(2))));
    }
}
