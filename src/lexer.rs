// ABOUTME: Lexer module for splitting Scheme source text into tokens

//! A pure tokenizer -- it does not build any tree structure, does not
//! classify tokens beyond recognizing the syntactic markers `(`, `)`, `'`,
//! `` ` ``, `,`, `,@`, and does not interpret string escapes. A string
//! literal's contents pass through verbatim between its opening and closing
//! `"`; only an unterminated string is a lexical error.

use crate::error::EvalError;

/// Characters a symbol may contain, beyond alphanumerics.
const SYMBOL_PUNCTUATION: &[char] = &['!', '$', '%', '&', '*', '/', ':', '<', '=', '>', '?', '@', '^', '_', '~', '+', '-', '.'];

fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric() || SYMBOL_PUNCTUATION.contains(&c)
}

/// Splits `source` into tokens. `;` begins a line comment running to the
/// next newline.
pub fn lex(source: &str) -> Result<Vec<String>, EvalError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == ';' {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }

        if c == '(' || c == ')' || c == '\'' || c == '`' {
            tokens.push(c.to_string());
            i += 1;
            continue;
        }

        if c == ',' {
            if i + 1 < chars.len() && chars[i + 1] == '@' {
                tokens.push(",@".to_string());
                i += 2;
            } else {
                tokens.push(",".to_string());
                i += 1;
            }
            continue;
        }

        if c == '"' {
            let start = i;
            i += 1;
            while i < chars.len() && chars[i] != '"' {
                i += 1;
            }
            if i >= chars.len() {
                return Err(EvalError::syntax("unterminated string literal"));
            }
            i += 1;
            let literal: String = chars[start..i].iter().collect();
            tokens.push(literal);
            continue;
        }

        if c == '#' {
            let next = chars.get(i + 1).ok_or_else(|| EvalError::syntax("unterminated '#' token"))?;
            let literal: String = [c, *next].iter().collect();
            tokens.push(literal);
            i += 2;
            continue;
        }

        if is_symbol_char(c) {
            let start = i;
            while i < chars.len() && is_symbol_char(chars[i]) {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            tokens.push(literal.to_lowercase());
            continue;
        }

        return Err(EvalError::syntax(format!("unexpected character '{c}'")));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_a_combination_into_parens_and_atoms() {
        let tokens = lex("(+ 1 2)").unwrap();
        assert_eq!(tokens, vec!["(", "+", "1", "2", ")"]);
    }

    #[test]
    fn recognizes_sugar_markers() {
        let tokens = lex("'(a ,b ,@c `d)").unwrap();
        assert_eq!(tokens, vec!["'", "(", "a", ",", "b", ",@", "c", "`", "d", ")"]);
    }

    #[test]
    fn string_literal_passes_through_without_escape_processing() {
        let tokens = lex(r#""hello\nworld""#).unwrap();
        assert_eq!(tokens, vec![r#""hello\nworld""#]);
    }

    #[test]
    fn unterminated_string_is_a_syntax_error() {
        let err = lex("\"unterminated").unwrap_err();
        assert_eq!(err.kind_name(), "SyntaxError");
    }

    #[test]
    fn semicolon_comments_run_to_end_of_line() {
        let tokens = lex("(+ 1 2) ; a comment\n(+ 3 4)").unwrap();
        assert_eq!(tokens, vec!["(", "+", "1", "2", ")", "(", "+", "3", "4", ")"]);
    }

    #[test]
    fn symbol_charset_includes_scheme_punctuation() {
        let tokens = lex("set! <=? list->vector").unwrap();
        assert_eq!(tokens, vec!["set!", "<=?", "list->vector"]);
    }

    #[test]
    fn pound_prefixed_tokens_are_two_characters() {
        let tokens = lex("#t #f #x").unwrap();
        assert_eq!(tokens, vec!["#t", "#f", "#x"]);
    }

    #[test]
    fn unterminated_pound_token_is_a_syntax_error() {
        let err = lex("#").unwrap_err();
        assert_eq!(err.kind_name(), "SyntaxError");
    }

    #[test]
    fn symbols_are_case_normalized_to_lowercase() {
        let tokens = lex("Define FACT Cons").unwrap();
        assert_eq!(tokens, vec!["define", "fact", "cons"]);
    }
}
