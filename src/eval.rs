// ABOUTME: Evaluator module for executing parsed Scheme expressions

//! Dispatch is exhaustive over [`Value`]'s variants rather than a
//! keyword-lookup-with-fallback: a `Combination` whose first element is a
//! `Name` naming one of the special forms below is handled by a dedicated
//! branch; anything else is an ordinary call. No tail-call optimization --
//! deep recursion exhausts the native stack, an accepted failure mode.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{PromiseCell, Value};
use std::collections::HashMap;
use std::rc::Rc;

/// Evaluates `expr` in `env`.
pub fn eval(expr: &Value, env: &Rc<Environment>) -> Result<Value, EvalError> {
    match expr {
        Value::Name(name) => env.lookup(name),
        Value::Integer(_)
        | Value::Float(_)
        | Value::Str(_)
        | Value::Bool(_)
        | Value::Undefined
        | Value::Lambda { .. }
        | Value::Mu { .. }
        | Value::Macro { .. }
        | Value::Builtin { .. }
        | Value::Promise(_) => Ok(expr.clone()),
        Value::Combination(items) => eval_combination(items, env),
    }
}

fn eval_combination(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.is_empty() {
        return Err(EvalError::value("cannot apply empty combination"));
    }

    if let Value::Name(keyword) = &items[0] {
        match keyword.as_str() {
            "quote" => return eval_quote(items),
            "if" => return eval_if(items, env),
            "define" => return eval_define(items, env),
            "set!" => return eval_set(items, env),
            "lambda" => return eval_lambda(items, env),
            "mu" => return eval_mu(items),
            "begin" => return eval_begin(&items[1..], env),
            "and" => return eval_and(&items[1..], env),
            "or" => return eval_or(&items[1..], env),
            "let" => return eval_let(items, env),
            "define-macro" => return eval_define_macro(items, env),
            "quasiquote" => return eval_quasiquote_form(items, env),
            "unquote" | "unquote-splicing" => {
                return Err(EvalError::syntax(format!("{keyword} not valid outside quasiquote")));
            }
            "delay" => return eval_delay(items, env),
            "cons-stream" => return eval_cons_stream(items, env),
            _ => {}
        }
    }

    eval_call(items, env)
}

fn eval_quote(items: &[Value]) -> Result<Value, EvalError> {
    if items.len() != 2 {
        return Err(EvalError::syntax("quote: expected exactly one operand"));
    }
    Ok(items[1].clone())
}

fn eval_if(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() != 3 && items.len() != 4 {
        return Err(EvalError::syntax("if: expected (if test then [else])"));
    }
    let test = eval(&items[1], env)?;
    if !test.is_false() {
        eval(&items[2], env)
    } else if items.len() == 4 {
        eval(&items[3], env)
    } else {
        Ok(Value::Undefined)
    }
}

/// Parses a formal parameter list, recognizing the dotted-rest convention
/// `(a b . rest)`: a bare `.` followed by exactly one more name collects any
/// remaining call arguments into a list bound to that name. A trailing `.` or
/// more than one name after it is a syntax error.
fn parse_params(expr: &Value) -> Result<(Vec<String>, Option<String>), EvalError> {
    let items = match expr {
        Value::Combination(items) => items,
        other => return Err(EvalError::syntax(format!("expected a parameter list, got {}", other.type_name()))),
    };

    let mut fixed = Vec::new();
    let mut rest = None;
    let mut i = 0;
    while i < items.len() {
        match &items[i] {
            Value::Name(name) if name == "." => {
                if rest.is_some() || i + 2 != items.len() {
                    return Err(EvalError::syntax("malformed dotted parameter list"));
                }
                match &items[i + 1] {
                    Value::Name(name) => rest = Some(name.clone()),
                    other => return Err(EvalError::syntax(format!("expected a rest parameter name, got {}", other.type_name()))),
                }
                i += 2;
            }
            Value::Name(name) => {
                fixed.push(name.clone());
                i += 1;
            }
            other => return Err(EvalError::syntax(format!("expected a parameter name, got {}", other.type_name()))),
        }
    }
    Ok((fixed, rest))
}

/// Binds `args` to `params`/`rest` in a fresh bindings map for a call.
fn bind_params(
    params: &[String],
    rest: &Option<String>,
    args: Vec<Value>,
    kind: &str,
) -> Result<HashMap<String, Value>, EvalError> {
    if rest.is_none() && params.len() != args.len() {
        return Err(EvalError::arity(kind, params.len(), args.len()));
    }
    if rest.is_some() && args.len() < params.len() {
        return Err(EvalError::arity(kind, format!("at least {}", params.len()), args.len()));
    }
    let mut args = args.into_iter();
    let mut bindings: HashMap<String, Value> = params
        .iter()
        .cloned()
        .zip(args.by_ref())
        .collect();
    if let Some(rest_name) = rest {
        bindings.insert(rest_name.clone(), Value::Combination(args.collect()));
    }
    Ok(bindings)
}

fn wrap_body(body: &[Value]) -> Value {
    if body.len() == 1 {
        body[0].clone()
    } else {
        let mut items = Vec::with_capacity(body.len() + 1);
        items.push(Value::Name("begin".to_string()));
        items.extend(body.iter().cloned());
        Value::Combination(items)
    }
}

fn eval_define(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() < 2 {
        return Err(EvalError::syntax("define: expected a name or signature"));
    }
    match &items[1] {
        Value::Name(name) => {
            if items.len() != 3 {
                return Err(EvalError::syntax("define: expected (define name expr)"));
            }
            let value = eval(&items[2], env)?;
            env.bind(name, value);
            Ok(Value::Name(name.clone()))
        }
        Value::Combination(signature) => {
            let name = match signature.first() {
                Some(Value::Name(name)) => name.clone(),
                _ => return Err(EvalError::syntax("define: expected a procedure name")),
            };
            let (params, rest) = parse_params(&Value::Combination(signature[1..].to_vec()))?;
            if items.len() < 3 {
                return Err(EvalError::syntax("define: procedure body is empty"));
            }
            let body = Rc::new(wrap_body(&items[2..]));
            env.bind(&name, Value::Lambda { params, rest, body, env: env.clone() });
            Ok(Value::Name(name))
        }
        other => Err(EvalError::syntax(format!("define: expected a name or signature, got {}", other.type_name()))),
    }
}

fn eval_set(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() != 3 {
        return Err(EvalError::syntax("set!: expected (set! name expr)"));
    }
    let name = match &items[1] {
        Value::Name(name) => name,
        other => return Err(EvalError::syntax(format!("set!: expected a name, got {}", other.type_name()))),
    };
    let value = eval(&items[2], env)?;
    env.set(name, value)?;
    Ok(Value::Undefined)
}

fn eval_lambda(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() < 3 {
        return Err(EvalError::syntax("lambda: expected (lambda (params...) body...)"));
    }
    let (params, rest) = parse_params(&items[1])?;
    let body = Rc::new(wrap_body(&items[2..]));
    Ok(Value::Lambda { params, rest, body, env: env.clone() })
}

fn eval_mu(items: &[Value]) -> Result<Value, EvalError> {
    if items.len() < 3 {
        return Err(EvalError::syntax("mu: expected (mu (params...) body...)"));
    }
    let (params, rest) = parse_params(&items[1])?;
    let body = Rc::new(wrap_body(&items[2..]));
    Ok(Value::Mu { params, rest, body })
}

fn eval_begin(body: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut result = Value::Undefined;
    for expr in body {
        result = eval(expr, env)?;
    }
    Ok(result)
}

fn eval_and(operands: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut result = Value::Bool(true);
    for operand in operands {
        result = eval(operand, env)?;
        if result.is_false() {
            return Ok(result);
        }
    }
    Ok(result)
}

fn eval_or(operands: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    for operand in operands {
        let result = eval(operand, env)?;
        if !result.is_false() {
            return Ok(result);
        }
    }
    Ok(Value::Bool(false))
}

fn eval_let(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() < 2 {
        return Err(EvalError::syntax("let: expected (let ((var val)...) body...)"));
    }
    let bindings_expr = match &items[1] {
        Value::Combination(bindings) => bindings,
        other => return Err(EvalError::syntax(format!("let: expected a binding list, got {}", other.type_name()))),
    };

    let mut bindings = HashMap::new();
    for binding in bindings_expr {
        let pair = match binding {
            Value::Combination(pair) if pair.len() == 2 => pair,
            _ => return Err(EvalError::syntax("let: each binding must be (name expr)")),
        };
        let name = match &pair[0] {
            Value::Name(name) => name.clone(),
            other => return Err(EvalError::syntax(format!("let: expected a name, got {}", other.type_name()))),
        };
        let value = eval(&pair[1], env)?;
        bindings.insert(name, value);
    }

    if items.len() < 3 {
        return Err(EvalError::syntax("let: body is empty"));
    }
    let body = wrap_body(&items[2..]);
    let child = Environment::extend(env.clone(), bindings);
    eval(&body, &child)
}

fn eval_define_macro(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() < 3 {
        return Err(EvalError::syntax("define-macro: expected (define-macro (name params...) body...)"));
    }
    let signature = match &items[1] {
        Value::Combination(signature) => signature,
        other => return Err(EvalError::syntax(format!("define-macro: expected a signature, got {}", other.type_name()))),
    };
    let name = match signature.first() {
        Some(Value::Name(name)) => name.clone(),
        _ => return Err(EvalError::syntax("define-macro: expected a macro name")),
    };
    let (params, rest) = parse_params(&Value::Combination(signature[1..].to_vec()))?;
    let body = Rc::new(wrap_body(&items[2..]));
    env.bind(&name, Value::Macro { params, rest, body, env: env.clone() });
    Ok(Value::Name(name))
}

fn eval_quasiquote_form(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() != 2 {
        return Err(EvalError::syntax("quasiquote: expected exactly one operand"));
    }
    eval_quasiquote(&items[1], env)
}

/// Walks `expr`, evaluating `unquote`d sub-expressions and splicing
/// `unquote-splicing` results into the surrounding list. No nesting-depth
/// counter is kept: every `unquote` found anywhere inside is evaluated,
/// matching this dialect's (deliberately non-hygienic) quasiquote.
fn eval_quasiquote(expr: &Value, env: &Rc<Environment>) -> Result<Value, EvalError> {
    let items = match expr {
        Value::Combination(items) => items,
        other => return Ok(other.clone()),
    };

    if let Some(Value::Name(keyword)) = items.first() {
        if keyword == "unquote" {
            if items.len() != 2 {
                return Err(EvalError::syntax("unquote: expected exactly one operand"));
            }
            return eval(&items[1], env);
        }
    }

    let mut result = Vec::with_capacity(items.len());
    for item in items {
        if let Value::Combination(inner) = item {
            if let Some(Value::Name(keyword)) = inner.first() {
                if keyword == "unquote-splicing" {
                    if inner.len() != 2 {
                        return Err(EvalError::syntax("unquote-splicing: expected exactly one operand"));
                    }
                    let spliced = eval(&inner[1], env)?;
                    match spliced {
                        Value::Combination(items) => {
                            result.extend(items);
                            continue;
                        }
                        other => return Err(EvalError::type_error("unquote-splicing", "list", other.type_name(), 1)),
                    }
                }
            }
        }
        result.push(eval_quasiquote(item, env)?);
    }
    Ok(Value::Combination(result))
}

fn eval_delay(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() != 2 {
        return Err(EvalError::syntax("delay: expected exactly one operand"));
    }
    Ok(Value::Promise(Rc::new(PromiseCell {
        body: items[1].clone(),
        env: env.clone(),
        forced: std::cell::RefCell::new(None),
    })))
}

fn eval_cons_stream(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() != 3 {
        return Err(EvalError::syntax("cons-stream: expected (cons-stream head tail)"));
    }
    let head = eval(&items[1], env)?;
    let tail = Value::Promise(Rc::new(PromiseCell {
        body: items[2].clone(),
        env: env.clone(),
        forced: std::cell::RefCell::new(None),
    }));
    Ok(Value::Combination(vec![head, tail]))
}

fn eval_call(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let operator = eval(&items[0], env)?;

    if let Value::Macro { params, rest, body, env: closure_env } = &operator {
        let operands = items[1..].to_vec();
        let bindings = bind_params(params, rest, operands, "macro")?;
        let macro_env = Environment::extend(closure_env.clone(), bindings);
        let expansion = eval(body, &macro_env)?;
        return eval(&expansion, env);
    }

    let mut args = Vec::with_capacity(items.len() - 1);
    for operand in &items[1..] {
        args.push(eval(operand, env)?);
    }
    apply(&operator, args, env)
}

/// Applies an already-evaluated operator to already-evaluated arguments.
/// Shared by ordinary calls and the `apply` builtin.
pub fn apply(operator: &Value, args: Vec<Value>, env: &Rc<Environment>) -> Result<Value, EvalError> {
    match operator {
        Value::Builtin { func, .. } => func(&args, env),
        Value::Lambda { params, rest, body, env: closure_env } => {
            let bindings = bind_params(params, rest, args, "lambda")?;
            let child = Environment::extend(closure_env.clone(), bindings);
            eval(body, &child)
        }
        Value::Mu { params, rest, body } => {
            let bindings = bind_params(params, rest, args, "mu")?;
            let child = Environment::extend(env.clone(), bindings);
            eval(body, &child)
        }
        Value::Macro { .. } => Err(EvalError::not_callable("Macro")),
        other => Err(EvalError::not_callable(other.type_name())),
    }
}

/// Forces a promise, caching the result so repeated forcing is idempotent.
pub fn force(value: &Value) -> Result<Value, EvalError> {
    match value {
        Value::Promise(cell) => {
            if let Some(forced) = cell.forced.borrow().as_ref() {
                return Ok(forced.clone());
            }
            let result = eval(&cell.body, &cell.env)?;
            *cell.forced.borrow_mut() = Some(result.clone());
            Ok(result)
        }
        other => Ok(other.clone()),
    }
}
