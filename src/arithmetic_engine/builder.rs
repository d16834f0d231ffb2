//! Random construction of legal expression trees.
//!
//! Trees are built bottom-up. Each operator node is checked against the
//! drill-sheet rules (no negative differences, every quotient a proper
//! fraction) as soon as both children exist; an illegal node is thrown away
//! and rebuilt from the same operator budget. All rebuilds in one tree draw
//! from a shared retry allowance so construction always terminates.

use rand::Rng;
use tracing::debug;

use crate::arithmetic_engine::{
    error::{EngineError, EngineResult},
    models::{Expr, GenerationConfig, Operator},
    numbers::random_number,
};

/// Build a tree with exactly `operators` operator nodes.
pub fn generate_tree<R: Rng>(
    rng: &mut R,
    operators: usize,
    range: u32,
    config: &GenerationConfig,
) -> EngineResult<Expr> {
    TreeBuilder { rng, range, config, retries_left: config.node_retry_limit }.build(operators)
}

struct TreeBuilder<'a, R: Rng> {
    rng: &'a mut R,
    range: u32,
    config: &'a GenerationConfig,
    retries_left: usize,
}

impl<R: Rng> TreeBuilder<'_, R> {
    fn build(&mut self, budget: usize) -> EngineResult<Expr> {
        if budget == 0 {
            return Ok(Expr::leaf(random_number(&mut *self.rng, self.range, self.config)));
        }
        loop {
            match self.candidate(budget) {
                Ok(node) => return Ok(node),
                Err(err @ EngineError::RetriesExhausted { .. }) => return Err(err),
                Err(err) => {
                    debug!(budget, %err, "rejected candidate node");
                    if self.retries_left == 0 {
                        return Err(EngineError::RetriesExhausted { budget });
                    }
                    self.retries_left -= 1;
                }
            }
        }
    }

    fn candidate(&mut self, budget: usize) -> EngineResult<Expr> {
        let op = Operator::ALL[self.rng.gen_range(0..Operator::ALL.len())];
        let (left_budget, right_budget) = if budget == 1 {
            (0, 0)
        } else {
            let left = self.rng.gen_range(0..budget);
            (left, budget - 1 - left)
        };

        let left = self.build(left_budget)?;
        let right = self.build(right_budget)?;
        op.check_operands(&left.try_evaluate()?, &right.try_evaluate()?)?;
        Ok(Expr::binary(op, left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SEEDS: [u64; 5] = [1, 42, 999, 0xDEAD_BEEF, 7];

    #[test]
    fn zero_budget_is_a_single_literal() {
        let mut rng = StdRng::seed_from_u64(5);
        let tree = generate_tree(&mut rng, 0, 10, &GenerationConfig::default()).unwrap();
        assert!(tree.is_leaf());
    }

    #[test]
    fn trees_use_the_exact_budget_and_obey_the_rules() {
        let config = GenerationConfig::default();
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            for budget in 1..=3 {
                for _ in 0..50 {
                    let tree = generate_tree(&mut rng, budget, 10, &config).unwrap();
                    assert_eq!(tree.operator_count(), budget, "budget mismatch: {tree}");
                    assert!(tree.all_subtractions_non_negative(), "negative difference: {tree}");
                    assert!(tree.all_divisions_proper(), "improper quotient: {tree}");
                    assert!(!tree.evaluate().unwrap().is_negative(), "negative value: {tree}");
                }
            }
        }
    }

    #[test]
    fn same_seed_builds_the_same_tree() {
        let config = GenerationConfig::default();
        let build = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            generate_tree(&mut rng, 3, 20, &config).unwrap()
        };
        assert_eq!(build(99), build(99));
    }

    #[test]
    fn retry_allowance_bounds_hopeless_requests() {
        // With range 2 every literal is `1`; a three-operator tree is still
        // possible, but a zero allowance gives up on the first illegal node.
        let config = GenerationConfig { node_retry_limit: 0, ..GenerationConfig::default() };
        let mut failures = 0;
        for seed in 0..50u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            match generate_tree(&mut rng, 3, 2, &config) {
                Ok(tree) => assert!(tree.all_divisions_proper()),
                Err(err) => {
                    assert!(matches!(err, EngineError::RetriesExhausted { .. }));
                    failures += 1;
                }
            }
        }
        assert!(failures > 0, "expected at least one exhausted build");
    }
}
