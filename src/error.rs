// ABOUTME: Error types for lexing, parsing and evaluation failures

use thiserror::Error;

/// The four error kinds recognized by the REPL boundary. None of these are
/// ever caught or converted within a single expression; the REPL prints
/// `<Kind>: <message>` and keeps going.
#[derive(Error, Debug, Clone)]
pub enum EvalError {
    /// Malformed tokens, unbalanced parens, bad special-form shape, missing
    /// operand after `'`/`` ` ``/`,`.
    #[error("{0}")]
    Syntax(String),

    /// Unbound name in lookup; `set!` target not found in any frame.
    #[error("{0}")]
    Name(String),

    /// Non-callable in operator position, arity mismatch, bad argument type
    /// to a builtin, bad `define` target.
    #[error("{0}")]
    Value(String),

    /// `load` cannot open or read its file.
    #[error("{0}")]
    Io(String),
}

impl EvalError {
    pub fn kind_name(&self) -> &'static str {
        match self {
            EvalError::Syntax(_) => "SyntaxError",
            EvalError::Name(_) => "NameError",
            EvalError::Value(_) => "ValueError",
            EvalError::Io(_) => "IOError",
        }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        EvalError::Syntax(message.into())
    }

    pub fn name(message: impl Into<String>) -> Self {
        EvalError::Name(message.into())
    }

    pub fn value(message: impl Into<String>) -> Self {
        EvalError::Value(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        EvalError::Io(message.into())
    }

    pub fn unbound(name: &str) -> Self {
        EvalError::Name(format!("Unbound name: {name}"))
    }

    pub fn not_callable(kind: &str) -> Self {
        EvalError::Value(format!("{kind} not callable"))
    }

    pub fn arity(name: &str, expected: impl std::fmt::Display, actual: usize) -> Self {
        EvalError::Value(format!(
            "mismatching arguments for {name}: expected {expected}, got {actual}"
        ))
    }

    pub fn type_error(function: &str, expected: &str, actual: &str, position: usize) -> Self {
        EvalError::Value(format!(
            "{function}: expected {expected}, got {actual} at argument {position}"
        ))
    }

    /// The REPL-visible rendering: `<Kind>: <message>`.
    pub fn repl_message(&self) -> String {
        format!("{}: {}", self.kind_name(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_match_spec() {
        assert_eq!(EvalError::syntax("x").kind_name(), "SyntaxError");
        assert_eq!(EvalError::name("x").kind_name(), "NameError");
        assert_eq!(EvalError::value("x").kind_name(), "ValueError");
        assert_eq!(EvalError::io("x").kind_name(), "IOError");
    }

    #[test]
    fn repl_message_format() {
        let e = EvalError::unbound("foo");
        assert_eq!(e.repl_message(), "NameError: Unbound name: foo");
    }
}
