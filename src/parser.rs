// ABOUTME: Parser module for folding a token stream into the expression tree

//! A recursive-descent reader over the `Vec<String>` produced by [`crate::lexer`].
//! `)` encountered at a read position is a syntax error; `(` consumes a
//! balanced run of sub-expressions; the reader sugar markers `'`, `` ` ``,
//! `,`, `,@` each wrap the following expression in `(quote x)`,
//! `(quasiquote x)`, `(unquote x)`, `(unquote-splicing x)` respectively.
//! Anything else is classified as a literal (integer, then float, then
//! boolean, then string) and failing all of those, a `Name`.

use crate::error::EvalError;
use crate::value::Value;

/// Parses every top-level expression out of `tokens`.
pub fn parse(tokens: &[String]) -> Result<Vec<Value>, EvalError> {
    let mut pos = 0;
    let mut exprs = Vec::new();
    while pos < tokens.len() {
        let (expr, next) = parse_one(tokens, pos)?;
        exprs.push(expr);
        pos = next;
    }
    Ok(exprs)
}

fn parse_one(tokens: &[String], pos: usize) -> Result<(Value, usize), EvalError> {
    let token = tokens.get(pos).ok_or_else(|| EvalError::syntax("unexpected end of input"))?;

    match token.as_str() {
        "(" => parse_combination(tokens, pos + 1),
        ")" => Err(EvalError::syntax("unexpected ')'")),
        "'" => wrap_sugar(tokens, pos + 1, "quote"),
        "`" => wrap_sugar(tokens, pos + 1, "quasiquote"),
        "," => wrap_sugar(tokens, pos + 1, "unquote"),
        ",@" => wrap_sugar(tokens, pos + 1, "unquote-splicing"),
        _ => Ok((classify_atom(token), pos + 1)),
    }
}

fn wrap_sugar(tokens: &[String], pos: usize, keyword: &str) -> Result<(Value, usize), EvalError> {
    let (inner, next) = parse_one(tokens, pos)?;
    Ok((Value::Combination(vec![Value::Name(keyword.to_string()), inner]), next))
}

fn parse_combination(tokens: &[String], mut pos: usize) -> Result<(Value, usize), EvalError> {
    let mut items = Vec::new();
    loop {
        match tokens.get(pos) {
            None => return Err(EvalError::syntax("unterminated combination, missing ')'")),
            Some(t) if t == ")" => return Ok((Value::Combination(items), pos + 1)),
            _ => {
                let (expr, next) = parse_one(tokens, pos)?;
                items.push(expr);
                pos = next;
            }
        }
    }
}

fn classify_atom(token: &str) -> Value {
    if let Ok(n) = token.parse::<i64>() {
        return Value::Integer(n);
    }
    if let Ok(n) = token.parse::<f64>() {
        if token.chars().any(|c| c.is_ascii_digit()) {
            return Value::Float(n);
        }
    }
    match token {
        "#t" | "true" => return Value::Bool(true),
        "#f" | "false" => return Value::Bool(false),
        _ => {}
    }
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        return Value::Str(token[1..token.len() - 1].to_string());
    }
    Value::Name(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn parse_str(src: &str) -> Vec<Value> {
        parse(&lex(src).unwrap()).unwrap()
    }

    #[test]
    fn parses_a_simple_combination() {
        let exprs = parse_str("(+ 1 2)");
        assert_eq!(exprs.len(), 1);
        match &exprs[0] {
            Value::Combination(items) => assert_eq!(items.len(), 3),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unmatched_close_paren_is_syntax_error() {
        let err = parse(&lex(")").unwrap()).unwrap_err();
        assert_eq!(err.kind_name(), "SyntaxError");
    }

    #[test]
    fn unterminated_combination_is_syntax_error() {
        let err = parse(&lex("(+ 1 2").unwrap()).unwrap_err();
        assert_eq!(err.kind_name(), "SyntaxError");
    }

    #[test]
    fn quote_sugar_wraps_next_expr() {
        let exprs = parse_str("'(a b)");
        match &exprs[0] {
            Value::Combination(items) => {
                assert_eq!(items.len(), 2);
                assert!(matches!(&items[0], Value::Name(n) if n == "quote"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unquote_splicing_is_distinct_from_unquote() {
        let exprs = parse_str("`(a ,@b ,c)");
        match &exprs[0] {
            Value::Combination(items) => {
                assert!(matches!(&items[0], Value::Name(n) if n == "quasiquote"));
                match &items[1] {
                    Value::Combination(inner) => {
                        assert!(matches!(&inner[1], Value::Combination(us) if matches!(&us[0], Value::Name(n) if n == "unquote-splicing")));
                        assert!(matches!(&inner[2], Value::Combination(u) if matches!(&u[0], Value::Name(n) if n == "unquote")));
                    }
                    other => panic!("unexpected {other:?}"),
                }
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn classifies_numeric_string_and_boolean_literals() {
        let exprs = parse_str(r#"(1 2.5 "hi" #t #f foo)"#);
        match &exprs[0] {
            Value::Combination(items) => {
                assert!(matches!(items[0], Value::Integer(1)));
                assert!(matches!(items[1], Value::Float(n) if n == 2.5));
                assert!(matches!(&items[2], Value::Str(s) if s == "hi"));
                assert!(matches!(items[3], Value::Bool(true)));
                assert!(matches!(items[4], Value::Bool(false)));
                assert!(matches!(&items[5], Value::Name(n) if n == "foo"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn minus_sign_alone_is_a_symbol_not_a_number() {
        let exprs = parse_str("(- x)");
        match &exprs[0] {
            Value::Combination(items) => assert!(matches!(&items[0], Value::Name(n) if n == "-")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_combination_parses_as_an_empty_list() {
        let exprs = parse_str("()");
        assert!(matches!(&exprs[0], Value::Combination(items) if items.is_empty()));
    }
}
