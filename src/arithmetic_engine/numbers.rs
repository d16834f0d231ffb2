use rand::Rng;

use crate::arithmetic_engine::models::GenerationConfig;

/// Draw one literal for a leaf: a natural number, a proper fraction or a
/// mixed number.
///
/// Naturals come from `1..range`, denominators from `2..range` and
/// numerators from `1..denominator`. Ranges too small to hold a fraction
/// (`range < 3`) only produce naturals, and `range == 1` always yields `1`.
pub fn random_number<R: Rng>(rng: &mut R, range: u32, config: &GenerationConfig) -> String {
    if range >= 3 && rng.gen_bool(config.fraction_probability) {
        let denominator = rng.gen_range(2..range);
        let numerator = rng.gen_range(1..denominator);

        // Only fractions above one half are promoted, matching how mixed
        // numbers look on a hand-written sheet.
        if rng.gen_bool(config.mixed_probability) && numerator > denominator - numerator {
            let whole_max = (range / config.integer_part_divisor.max(1)).max(1);
            let whole = rng.gen_range(1..=whole_max);
            return format!("{}'{}/{}", whole, numerator, denominator);
        }
        return format!("{}/{}", numerator, denominator);
    }

    let natural_max = range.saturating_sub(1).max(1);
    rng.gen_range(1..=natural_max).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic_engine::rational::Rational;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn numbers_stay_inside_the_range() {
        let config = GenerationConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..2_000 {
            let token = random_number(&mut rng, 10, &config);
            let value: Rational = token.parse().unwrap();
            assert!(!value.is_negative() && !value.is_zero(), "non-positive literal {token}");

            let fraction = token.rsplit('\'').next().unwrap();
            match fraction.split_once('/') {
                Some((n, d)) => {
                    let (n, d): (u32, u32) = (n.parse().unwrap(), d.parse().unwrap());
                    assert!((2..10).contains(&d), "denominator out of range in {token}");
                    assert!(n >= 1 && n < d, "numerator not proper in {token}");
                }
                None => {
                    let v: u32 = token.parse().unwrap();
                    assert!((1..10).contains(&v), "natural out of range: {token}");
                }
            }
        }
    }

    #[test]
    fn produces_every_literal_kind() {
        let config = GenerationConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let tokens: Vec<String> = (0..500).map(|_| random_number(&mut rng, 20, &config)).collect();
        assert!(tokens.iter().any(|t| t.contains('\'')), "no mixed numbers");
        assert!(tokens.iter().any(|t| t.contains('/') && !t.contains('\'')), "no fractions");
        assert!(tokens.iter().any(|t| !t.contains('/')), "no naturals");
    }

    #[test]
    fn tiny_ranges_fall_back_to_naturals() {
        let config = GenerationConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(random_number(&mut rng, 1, &config), "1");
            assert_eq!(random_number(&mut rng, 2, &config), "1");
        }
    }

    #[test]
    fn widest_range_draws_valid_literals() {
        let config = GenerationConfig {
            fraction_probability: 1.0,
            mixed_probability: 1.0,
            ..GenerationConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            let token = random_number(&mut rng, u32::MAX, &config);
            let value: Rational = token.parse().unwrap();
            assert!(!value.is_negative() && !value.is_zero(), "non-positive literal {token}");
        }
    }

    #[test]
    fn fraction_probability_zero_disables_fractions() {
        let config = GenerationConfig { fraction_probability: 0.0, ..GenerationConfig::default() };
        let mut rng = StdRng::seed_from_u64(3);
        assert!((0..200).all(|_| !random_number(&mut rng, 50, &config).contains('/')));
    }
}
