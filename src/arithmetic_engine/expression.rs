//! Evaluation, rendering and canonical forms for [`Expr`] trees.

use std::fmt;

use crate::arithmetic_engine::{
    error::{EngineError, EngineResult},
    models::{Expr, Operator},
    rational::Rational,
};

impl Operator {
    pub fn apply(self, left: Rational, right: Rational) -> EngineResult<Rational> {
        match self {
            Operator::Add => left.checked_add(&right),
            Operator::Sub => left.checked_sub(&right),
            Operator::Mul => left.checked_mul(&right),
            Operator::Div => left.divide(&right),
        }
    }

    /// Drill-sheet legality: subtraction never goes negative and division
    /// always lands on a positive proper fraction.
    pub fn check_operands(self, left: &Rational, right: &Rational) -> EngineResult<()> {
        match self {
            Operator::Sub if left < right => Err(EngineError::IllegalOperation {
                op: self,
                reason: "difference would be negative",
            }),
            Operator::Div => {
                let quotient = left.divide(right)?;
                if quotient.numerator() > 0 && quotient.is_proper_fraction() {
                    Ok(())
                } else {
                    Err(EngineError::IllegalOperation {
                        op: self,
                        reason: "quotient is not a proper fraction",
                    })
                }
            }
            _ => Ok(()),
        }
    }
}

impl Expr {
    pub fn leaf(token: impl Into<String>) -> Expr {
        Expr::Leaf(token.into())
    }

    pub fn binary(op: Operator, left: Expr, right: Expr) -> Expr {
        Expr::Binary { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Expr::Leaf(_))
    }

    pub fn operator(&self) -> Option<Operator> {
        match self {
            Expr::Leaf(_) => None,
            Expr::Binary { op, .. } => Some(*op),
        }
    }

    pub fn operator_count(&self) -> usize {
        match self {
            Expr::Leaf(_) => 0,
            Expr::Binary { left, right, .. } => 1 + left.operator_count() + right.operator_count(),
        }
    }

    /// True if any literal is a fraction or mixed number.
    pub fn has_fraction(&self) -> bool {
        match self {
            Expr::Leaf(token) => token.contains('/'),
            Expr::Binary { left, right, .. } => left.has_fraction() || right.has_fraction(),
        }
    }

    /// Exact value of the tree. Illegal-by-policy operations (negative
    /// differences, improper quotients) are still computed here; only
    /// malformed literals, division by zero and overflow fail.
    pub fn try_evaluate(&self) -> EngineResult<Rational> {
        match self {
            Expr::Leaf(token) => token.parse(),
            Expr::Binary { op, left, right } => op.apply(left.try_evaluate()?, right.try_evaluate()?),
        }
    }

    /// `None` when the tree has no value.
    pub fn evaluate(&self) -> Option<Rational> {
        self.try_evaluate().ok()
    }

    /// Student-facing text with the minimum parentheses and `×`/`÷`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Expr::Leaf(token) => out.push_str(token),
            Expr::Binary { op, left, right } => {
                render_operand(left, *op, false, out);
                out.push(' ');
                out.push(op.display_symbol());
                out.push(' ');
                render_operand(right, *op, true, out);
            }
        }
    }

    /// Deduplication key, invariant under reordering the operands of `+`
    /// and `*` chains.
    ///
    /// A maximal run of the same commutative operator is flattened and its
    /// operands sorted, so `(1 + 2) + 3`, `1 + (2 + 3)` and `3 + 2 + 1` share
    /// a key. Compound operands are bracketed, which keeps `a - (b - c)` and
    /// `(a - b) - c` apart.
    pub fn canonical_form(&self) -> String {
        match self {
            Expr::Leaf(token) => token.clone(),
            Expr::Binary { op, .. } if op.is_commutative() => {
                let mut operands = Vec::new();
                self.collect_chain(*op, &mut operands);
                let mut keys: Vec<String> = operands.into_iter().map(Expr::canonical_operand).collect();
                keys.sort();
                let separator = format!(" {} ", op);
                keys.join(separator.as_str())
            }
            Expr::Binary { op, left, right } => {
                format!("{} {} {}", left.canonical_operand(), op, right.canonical_operand())
            }
        }
    }

    fn canonical_operand(&self) -> String {
        if self.is_leaf() {
            self.canonical_form()
        } else {
            format!("({})", self.canonical_form())
        }
    }

    fn collect_chain<'a>(&'a self, chain_op: Operator, operands: &mut Vec<&'a Expr>) {
        match self {
            Expr::Binary { op, left, right } if *op == chain_op => {
                left.collect_chain(chain_op, operands);
                right.collect_chain(chain_op, operands);
            }
            _ => operands.push(self),
        }
    }

    /// Every `-` node has `left >= right`.
    pub fn all_subtractions_non_negative(&self) -> bool {
        self.all_nodes_legal(Operator::Sub)
    }

    /// Every `/` node yields a positive proper fraction.
    pub fn all_divisions_proper(&self) -> bool {
        self.all_nodes_legal(Operator::Div)
    }

    fn all_nodes_legal(&self, target: Operator) -> bool {
        match self {
            Expr::Leaf(_) => true,
            Expr::Binary { op, left, right } => {
                let here = *op != target
                    || match (left.try_evaluate(), right.try_evaluate()) {
                        (Ok(l), Ok(r)) => op.check_operands(&l, &r).is_ok(),
                        _ => false,
                    };
                here && left.all_nodes_legal(target) && right.all_nodes_legal(target)
            }
        }
    }
}

fn render_operand(child: &Expr, parent: Operator, is_right: bool, out: &mut String) {
    let wrap = match child.operator() {
        None => false,
        Some(op) => {
            op.precedence() < parent.precedence()
                || (op.precedence() == parent.precedence() && is_right && !parent.is_commutative())
        }
    };
    if wrap {
        out.push('(');
        child.render_into(out);
        out.push(')');
    } else {
        child.render_into(out);
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Count `+ - × ÷ * /` in rendered text, skipping the `/` inside fraction
/// literals such as `3/4` or `1'3/4`.
pub fn count_operators(text: &str) -> usize {
    let bytes = text.as_bytes();
    text.char_indices()
        .filter(|&(i, c)| Operator::from_symbol(c).is_some() && !is_fraction_slash(bytes, i))
        .count()
}

/// A `/` directly between a digit (or `'`) and a digit belongs to a literal.
pub(crate) fn is_fraction_slash(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b'/'
        && i > 0
        && i + 1 < bytes.len()
        && (bytes[i - 1].is_ascii_digit() || bytes[i - 1] == b'\'')
        && bytes[i + 1].is_ascii_digit()
}
