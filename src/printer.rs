// ABOUTME: Printer module for rendering values back to source-form text

//! Two renderings are distinguished throughout the interpreter: `repr`, the
//! read-back form used at the REPL and by `(error ...)`-style diagnostics,
//! and `display`, the human-facing form used by the `display` builtin. The
//! only difference is string quoting -- `repr` surrounds a string with `"`,
//! `display` does not.

use crate::value::Value;
use std::fmt;

/// The `repr` rendering: every value, including strings, round-trips as
/// something that could be read back in.
pub fn repr_string(value: &Value) -> String {
    render(value, true)
}

/// The `display` rendering: strings print their bare contents.
pub fn display_string(value: &Value) -> String {
    render(value, false)
}

fn render(value: &Value, quote_strings: bool) -> String {
    match value {
        Value::Name(s) => s.clone(),
        Value::Integer(n) => n.to_string(),
        Value::Float(n) => format_float(*n),
        Value::Str(s) => {
            if quote_strings {
                format!("\"{s}\"")
            } else {
                s.clone()
            }
        }
        Value::Bool(true) => "#t".to_string(),
        Value::Bool(false) => "#f".to_string(),
        Value::Undefined => "undefined".to_string(),
        Value::Combination(items) => {
            let parts: Vec<String> = items.iter().map(|v| render(v, quote_strings)).collect();
            format!("({})", parts.join(" "))
        }
        Value::Lambda { params, rest, .. } => format!("(lambda ({}) ...)", format_params(params, rest)),
        Value::Mu { params, rest, .. } => format!("(mu ({}) ...)", format_params(params, rest)),
        Value::Macro { params, rest, .. } => format!("(define-macro (...) ({}) ...)", format_params(params, rest)),
        Value::Builtin { name, .. } => format!("#[builtin {name}]"),
        Value::Promise(_) => "#[promise]".to_string(),
    }
}

fn format_params(params: &[String], rest: &Option<String>) -> String {
    match rest {
        Some(rest) if params.is_empty() => rest.clone(),
        Some(rest) => format!("{} . {}", params.join(" "), rest),
        None => params.join(" "),
    }
}

fn format_float(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{n:.1}")
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", repr_string(self))
    }
}
