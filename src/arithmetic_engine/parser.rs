//! Rebuild an [`Expr`] from rendered text.
//!
//! The parser splits at the loosest-binding operator outside parentheses.
//! Among operators of equal precedence the rightmost one wins, which makes
//! `a - b - c` parse as `(a - b) - c`, the same reading the renderer assumes
//! when it omits parentheses.

use crate::arithmetic_engine::{
    error::{EngineError, EngineResult},
    expression::is_fraction_slash,
    models::{Expr, Operator},
    rational::Rational,
};

/// Parse a rendered expression such as `"(1/2 + 3) × 2'1/4"`.
///
/// Both display (`×`, `÷`) and internal (`*`, `/`) operator symbols are
/// accepted.
pub fn parse_expression(text: &str) -> EngineResult<Expr> {
    let normalized = normalize_operators(text);
    check_balance(&normalized)?;
    parse_node(&normalized)
}

pub(crate) fn normalize_operators(text: &str) -> String {
    text.replace('×', "*").replace('÷', "/")
}

fn check_balance(text: &str) -> EngineResult<()> {
    let mut depth: i64 = 0;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return Err(EngineError::UnbalancedParentheses(text.to_string()));
        }
    }
    if depth != 0 {
        return Err(EngineError::UnbalancedParentheses(text.to_string()));
    }
    Ok(())
}

fn parse_node(text: &str) -> EngineResult<Expr> {
    let text = strip_outer_parentheses(text.trim());
    if text.is_empty() {
        return Err(EngineError::parse(text, "missing operand"));
    }
    if is_fraction_literal(text) {
        return Ok(Expr::leaf(text));
    }

    match split_point(text) {
        Some((index, op)) => {
            let left = parse_node(&text[..index])?;
            let right = parse_node(&text[index + 1..])?;
            Ok(Expr::binary(op, left, right))
        }
        None => {
            // No operator left: must be a plain literal.
            text.parse::<Rational>()?;
            Ok(Expr::leaf(text))
        }
    }
}

/// Peel `( ... )` while the parentheses enclose the whole text.
fn strip_outer_parentheses(mut text: &str) -> &str {
    while text.starts_with('(') && text.ends_with(')') && encloses_all(text) {
        text = text[1..text.len() - 1].trim();
    }
    text
}

/// True when the opening parenthesis at 0 is closed by the final character.
fn encloses_all(text: &str) -> bool {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return i == text.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

/// `n/d` or `w'n/d`, digits only.
fn is_fraction_literal(text: &str) -> bool {
    let fraction = match text.split_once('\'') {
        Some((whole, fraction)) => {
            if !all_digits(whole) {
                return false;
            }
            fraction
        }
        None => text,
    };
    matches!(fraction.split_once('/'), Some((n, d)) if all_digits(n) && all_digits(d))
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Byte index and operator of the rightmost lowest-precedence operator at
/// parenthesis depth zero.
fn split_point(text: &str) -> Option<(usize, Operator)> {
    let bytes = text.as_bytes();
    let mut depth = 0i64;
    let mut best: Option<(usize, Operator)> = None;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ if depth == 0 && b.is_ascii() => {
                let Some(op) = Operator::from_symbol(b as char) else { continue };
                if is_fraction_slash(bytes, i) {
                    continue;
                }
                if best.map_or(true, |(_, current)| op.precedence() <= current.precedence()) {
                    best = Some((i, op));
                }
            }
            _ => {}
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(text: &str) -> String {
        parse_expression(text).unwrap().evaluate().unwrap().to_string()
    }

    #[test]
    fn respects_precedence_and_parentheses() {
        assert_eq!(value("(3 + 4) * 2 - 3"), "11");
        assert_eq!(value("20 / (3 + 1)"), "5");
        assert_eq!(value("1 + 1/2"), "1'1/2");
        assert_eq!(value("2 + 3 × 4"), "14");
        assert_eq!(value("((2 + 3)) × 4"), "20");
    }

    #[test]
    fn equal_precedence_is_left_associative() {
        assert_eq!(value("9 - 3 - 1"), "5");
        assert_eq!(value("8 ÷ 4 ÷ 2"), "1");
        assert_eq!(value("8 ÷ 4 × 2"), "4");
    }

    #[test]
    fn fraction_slash_is_not_division() {
        assert_eq!(value("1/2 ÷ 3/4"), "2/3");
        assert_eq!(value("2'1/2 × 2"), "5");
        assert_eq!(value("1/2 / 1/4"), "2");

        let tree = parse_expression("3/4").unwrap();
        assert_eq!(tree, Expr::leaf("3/4"));
        let tree = parse_expression("(2'3/5)").unwrap();
        assert_eq!(tree, Expr::leaf("2'3/5"));
    }

    #[test]
    fn builds_the_expected_shape() {
        let tree = parse_expression("1 - (2 + 3) × 4").unwrap();
        let expected = Expr::binary(
            Operator::Sub,
            Expr::leaf("1"),
            Expr::binary(
                Operator::Mul,
                Expr::binary(Operator::Add, Expr::leaf("2"), Expr::leaf("3")),
                Expr::leaf("4"),
            ),
        );
        assert_eq!(tree, expected);
        assert_eq!(tree.render(), "1 - (2 + 3) × 4");
    }

    #[test]
    fn outer_parentheses_only_stripped_when_they_enclose_everything() {
        assert_eq!(strip_outer_parentheses("(1 + 2) × (3 + 4)"), "(1 + 2) × (3 + 4)");
        assert_eq!(strip_outer_parentheses("((1 + 2))"), "1 + 2");
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(matches!(parse_expression("(1 + 2"), Err(EngineError::UnbalancedParentheses(_))));
        assert!(matches!(parse_expression("1 + 2)"), Err(EngineError::UnbalancedParentheses(_))));
        assert!(matches!(parse_expression(")1 + 2("), Err(EngineError::UnbalancedParentheses(_))));
        assert!(matches!(parse_expression(""), Err(EngineError::Parse { .. })));
        assert!(matches!(parse_expression("1 +"), Err(EngineError::Parse { .. })));
        assert!(matches!(parse_expression("1 % 2"), Err(EngineError::Parse { .. })));
        assert!(matches!(parse_expression("two + 2"), Err(EngineError::Parse { .. })));
        assert!(matches!(parse_expression("-3 + 1"), Err(EngineError::Parse { .. })));
    }
}
