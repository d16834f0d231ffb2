//! Exact fraction value type.
//!
//! Every value the engine computes goes through [`Rational`]. It is a thin
//! wrapper over `num_rational::Ratio<i64>`, which keeps the value reduced with
//! the sign on the numerator, plus the three literal forms the drills use:
//!
//! | Form     | Example  | Meaning        |
//! |----------|----------|----------------|
//! | integer  | `5`      | 5              |
//! | fraction | `3/5`    | 3 / 5          |
//! | mixed    | `2'3/5`  | 2 + 3 / 5      |
//!
//! Arithmetic is checked: a result that does not fit in `i64` is reported as
//! [`EngineError::Overflow`] instead of panicking or wrapping.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Signed, Zero};

use crate::arithmetic_engine::error::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational(Ratio<i64>);

impl Rational {
    /// Build `numerator / denominator` in lowest terms.
    pub fn new(numerator: i64, denominator: i64) -> EngineResult<Self> {
        if denominator == 0 {
            return Err(EngineError::ZeroDenominator);
        }
        // `i64::MIN` cannot be negated when the sign moves to the numerator.
        if numerator == i64::MIN || denominator == i64::MIN {
            return Err(EngineError::Overflow);
        }
        Ok(Rational(Ratio::new(numerator, denominator)))
    }

    pub fn from_integer(n: i64) -> Self {
        Rational(Ratio::from_integer(n))
    }

    pub fn zero() -> Self {
        Rational(Ratio::zero())
    }

    pub fn numerator(&self) -> i64 {
        *self.0.numer()
    }

    /// Always positive.
    pub fn denominator(&self) -> i64 {
        *self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    /// `|numerator| < denominator`.
    pub fn is_proper_fraction(&self) -> bool {
        self.numerator().unsigned_abs() < self.denominator().unsigned_abs()
    }

    pub fn checked_add(&self, rhs: &Rational) -> EngineResult<Rational> {
        self.0.checked_add(&rhs.0).map(Rational).ok_or(EngineError::Overflow)
    }

    pub fn checked_sub(&self, rhs: &Rational) -> EngineResult<Rational> {
        self.0.checked_sub(&rhs.0).map(Rational).ok_or(EngineError::Overflow)
    }

    pub fn checked_mul(&self, rhs: &Rational) -> EngineResult<Rational> {
        self.0.checked_mul(&rhs.0).map(Rational).ok_or(EngineError::Overflow)
    }

    /// Fails with `DivisionByZero` when `rhs` is zero.
    pub fn divide(&self, rhs: &Rational) -> EngineResult<Rational> {
        if rhs.is_zero() {
            return Err(EngineError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Rational::zero());
        }
        self.0.checked_div(&rhs.0).map(Rational).ok_or(EngineError::Overflow)
    }

    pub fn reciprocal(&self) -> EngineResult<Rational> {
        Rational::from_integer(1).divide(self)
    }

    /// Plain `n/d` (or `n`) form, without mixed-number grouping.
    pub fn to_computable_string(&self) -> String {
        if self.denominator() == 1 {
            self.numerator().to_string()
        } else {
            format!("{}/{}", self.numerator(), self.denominator())
        }
    }
}

// Cross-multiplied in i128 so the comparison itself can never overflow.
impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator() as i128 * other.denominator() as i128;
        let rhs = other.numerator() as i128 * self.denominator() as i128;
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Display form used for answers: `0`, `7`, `3/4`, `2'1/3`, `-1'1/2`.
impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n, d) = (self.numerator(), self.denominator());
        if d == 1 {
            return write!(f, "{}", n);
        }
        if n.unsigned_abs() >= d.unsigned_abs() {
            // Truncating division keeps the sign on the integer part only.
            return write!(f, "{}'{}/{}", n / d, n.unsigned_abs() % d.unsigned_abs(), d);
        }
        write!(f, "{}/{}", n, d)
    }
}

impl FromStr for Rational {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let literal = s.trim();
        if literal.is_empty() {
            return Err(EngineError::parse(s, "empty literal"));
        }
        let (negative, body) = match literal.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, literal),
        };

        let magnitude = if let Some((whole, fraction)) = body.split_once('\'') {
            let (n, d) = fraction
                .split_once('/')
                .ok_or_else(|| EngineError::parse(s, "mixed number without fraction part"))?;
            let (whole, n, d) = (digits(whole, s)?, digits(n, s)?, digits(d, s)?);
            if d == 0 {
                return Err(EngineError::ZeroDenominator);
            }
            Rational::from_integer(whole).checked_add(&Rational::new(n, d)?)?
        } else if let Some((n, d)) = body.split_once('/') {
            Rational::new(digits(n, s)?, digits(d, s)?)?
        } else {
            Rational::from_integer(digits(body, s)?)
        };

        if negative {
            Rational::zero().checked_sub(&magnitude)
        } else {
            Ok(magnitude)
        }
    }
}

fn digits(part: &str, input: &str) -> EngineResult<i64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EngineError::parse(input, "expected a non-negative integer"));
    }
    part.parse::<i64>()
        .map_err(|_| EngineError::parse(input, "number out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn construction_reduces_and_normalises_sign() {
        let x = r(6, -8);
        assert_eq!((x.numerator(), x.denominator()), (-3, 4));
        let zero = r(0, 5);
        assert_eq!((zero.numerator(), zero.denominator()), (0, 1));
        assert_eq!(Rational::new(1, 0), Err(EngineError::ZeroDenominator));
    }

    #[test]
    fn arithmetic_matches_hand_computation() {
        assert_eq!(r(1, 6).checked_add(&r(1, 8)).unwrap().to_string(), "7/24");
        assert_eq!(r(3, 4).checked_sub(&r(1, 4)).unwrap().to_string(), "1/2");
        assert_eq!(r(2, 3).checked_mul(&r(9, 4)).unwrap().to_string(), "1'1/2");
        assert_eq!(r(1, 2).divide(&r(3, 4)).unwrap().to_string(), "2/3");
        assert_eq!(r(1, 2).divide(&Rational::zero()), Err(EngineError::DivisionByZero));
        assert_eq!(Rational::zero().reciprocal(), Err(EngineError::DivisionByZero));
    }

    #[test]
    fn compare_uses_exact_ordering() {
        assert!(r(1, 3) < r(1, 2));
        assert!(r(-1, 2) < r(1, 3));
        assert_eq!(r(2, 4).cmp(&r(1, 2)), Ordering::Equal);
    }

    #[test]
    fn display_forms() {
        assert_eq!(Rational::zero().to_string(), "0");
        assert_eq!(r(12, 3).to_string(), "4");
        assert_eq!(r(3, 4).to_string(), "3/4");
        assert_eq!(r(7, 3).to_string(), "2'1/3");
        assert_eq!(r(-7, 2).to_string(), "-3'1/2");
        assert_eq!(r(-1, 2).to_string(), "-1/2");
        assert_eq!(r(7, 3).to_computable_string(), "7/3");
    }

    #[test]
    fn parses_all_literal_forms() {
        assert_eq!("5".parse::<Rational>().unwrap(), Rational::from_integer(5));
        assert_eq!(" 3/5 ".parse::<Rational>().unwrap(), r(3, 5));
        assert_eq!("2'3/5".parse::<Rational>().unwrap(), r(13, 5));
        assert_eq!("-3'1/2".parse::<Rational>().unwrap(), r(-7, 2));
        assert_eq!("4/8".parse::<Rational>().unwrap(), r(1, 2));
    }

    #[test]
    fn rejects_malformed_literals() {
        for bad in ["", "   ", "abc", "1/", "/2", "1'2", "1'/2", "1.5", "+3", "2'3/x"] {
            assert!(
                matches!(bad.parse::<Rational>(), Err(EngineError::Parse { .. })),
                "expected a parse error for {bad:?}"
            );
        }
        assert_eq!("3/0".parse::<Rational>(), Err(EngineError::ZeroDenominator));
        assert_eq!("1'1/0".parse::<Rational>(), Err(EngineError::ZeroDenominator));
    }

    #[test]
    fn overflow_is_an_error_not_a_panic() {
        let big = Rational::from_integer(i64::MAX);
        assert_eq!(big.checked_add(&Rational::from_integer(1)), Err(EngineError::Overflow));
        assert_eq!(Rational::from_integer(i64::MIN + 1).checked_sub(&r(2, 1)), Err(EngineError::Overflow));
        assert_eq!(big.checked_mul(&r(2, 1)), Err(EngineError::Overflow));
        assert_eq!(big.divide(&r(1, 2)), Err(EngineError::Overflow));
        assert_eq!(r(1, 3).checked_add(&r(1, i64::MAX)), Err(EngineError::Overflow));
        assert_eq!(Rational::new(i64::MIN, -1), Err(EngineError::Overflow));

        assert_eq!("9223372036854775807'1/2".parse::<Rational>(), Err(EngineError::Overflow));
        assert_eq!("9223372036854775807".parse::<Rational>().unwrap(), big);
        assert_eq!("-9223372036854775807".parse::<Rational>().unwrap().to_string(), "-9223372036854775807");
    }

    #[test]
    fn display_handles_extreme_numerators() {
        let half = r(i64::MIN + 1, 2);
        assert_eq!(half.to_string(), "-4611686018427387903'1/2");

        let min = Rational::from_integer(i64::MIN + 1).checked_sub(&r(1, 1)).unwrap();
        assert_eq!(min.to_string(), "-9223372036854775808");
        assert!(!min.is_proper_fraction());
        assert_eq!(min.reciprocal(), Err(EngineError::Overflow));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for x in [r(7, 24), r(5, 2), r(-7, 2), r(9, 1), Rational::zero()] {
            assert_eq!(x.to_string().parse::<Rational>().unwrap(), x);
        }
    }
}
