//! Value of a rendered expression, for grading.
//!
//! The tree parser is authoritative. A flat token evaluator backs it up:
//! it resolves parenthesised groups first, then folds `*`/`/` and finally
//! `+`/`-` left to right, which is the same reading the tree parser uses,
//! so the two agree on every input both accept.

use tracing::debug;

use crate::arithmetic_engine::{
    error::{EngineError, EngineResult},
    models::Operator,
    parser::{normalize_operators, parse_expression},
    rational::Rational,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Number(Rational),
    Op(Operator),
    Open,
    Close,
}

/// `None` when the text cannot be graded.
pub fn calculate_expression(text: &str) -> Option<Rational> {
    try_calculate_expression(text).ok()
}

pub fn try_calculate_expression(text: &str) -> EngineResult<Rational> {
    if text.trim().is_empty() {
        return Err(EngineError::parse(text, "empty expression"));
    }
    parse_expression(text)
        .and_then(|tree| tree.try_evaluate())
        .or_else(|err| {
            debug!(%err, text, "tree evaluation failed, using token evaluator");
            evaluate_tokens(text)
        })
}

/// Flat evaluation without building a tree.
pub fn evaluate_tokens(text: &str) -> EngineResult<Rational> {
    let normalized = normalize_operators(text);
    let tokens = tokenize(&normalized)?;
    evaluate_sequence(&tokens, &normalized)
}

fn tokenize(text: &str) -> EngineResult<Vec<Token>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b' ' | b'\t' => i += 1,
            b'(' => {
                tokens.push(Token::Open);
                i += 1;
            }
            b')' => {
                tokens.push(Token::Close);
                i += 1;
            }
            b'+' | b'-' | b'*' | b'/' => {
                if let Some(op) = Operator::from_symbol(b as char) {
                    tokens.push(Token::Op(op));
                }
                i += 1;
            }
            b'0'..=b'9' => {
                let end = literal_end(bytes, i);
                tokens.push(Token::Number(text[i..end].parse()?));
                i = end;
            }
            _ => return Err(EngineError::parse(text, "unexpected character")),
        }
    }
    Ok(tokens)
}

/// End of the literal starting at `start`: digits, optionally followed by
/// `/digits` or `'digits/digits` with no spaces in between.
fn literal_end(bytes: &[u8], start: usize) -> usize {
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };
    let next_is_digit = |i: usize| i < bytes.len() && bytes[i].is_ascii_digit();

    let mut end = digits_from(start);
    if end < bytes.len() && bytes[end] == b'\'' {
        // Let the literal parser report a malformed mixed number.
        end = digits_from(end + 1);
        if end < bytes.len() && bytes[end] == b'/' {
            end = digits_from(end + 1);
        }
    } else if end < bytes.len() && bytes[end] == b'/' && next_is_digit(end + 1) {
        end = digits_from(end + 1);
    }
    end
}

fn evaluate_sequence(tokens: &[Token], text: &str) -> EngineResult<Rational> {
    // Collapse parenthesised groups into values, checking that values and
    // operators alternate.
    let mut values: Vec<Rational> = Vec::new();
    let mut ops: Vec<Operator> = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let expecting_value = values.len() == ops.len();
        match tokens[i] {
            Token::Number(v) if expecting_value => {
                values.push(v);
                i += 1;
            }
            Token::Open if expecting_value => {
                let close = matching_close(tokens, i)
                    .ok_or_else(|| EngineError::UnbalancedParentheses(text.to_string()))?;
                values.push(evaluate_sequence(&tokens[i + 1..close], text)?);
                i = close + 1;
            }
            Token::Op(op) if !expecting_value => {
                ops.push(op);
                i += 1;
            }
            Token::Close => return Err(EngineError::UnbalancedParentheses(text.to_string())),
            _ => return Err(EngineError::parse(text, "operators and operands out of order")),
        }
    }
    if values.is_empty() || values.len() != ops.len() + 1 {
        return Err(EngineError::parse(text, "missing operand"));
    }

    // `*` and `/` first...
    let mut terms = vec![values[0]];
    let mut additive = Vec::new();
    for (&op, &value) in ops.iter().zip(&values[1..]) {
        if op.precedence() == 2 {
            let last = terms.pop().unwrap_or_else(Rational::zero);
            terms.push(op.apply(last, value)?);
        } else {
            additive.push(op);
            terms.push(value);
        }
    }

    // ...then `+` and `-`.
    let mut total = terms[0];
    for (&op, &term) in additive.iter().zip(&terms[1..]) {
        total = op.apply(total, term)?;
    }
    Ok(total)
}

fn matching_close(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::Open => depth += 1,
            Token::Close => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
