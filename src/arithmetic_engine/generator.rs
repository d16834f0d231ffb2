use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::arithmetic_engine::{
    builder::generate_tree,
    error::{EngineError, EngineResult},
    expression::count_operators,
    helpers::{answer_line, exercise_line, ANSWER_LABEL, EXERCISE_LABEL},
    models::{BatchRequest, Problem, ProblemSet, MAX_BATCH, MAX_OPERATORS},
};

impl BatchRequest {
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |msg: String| Err(EngineError::InvalidRequest(msg));
        let config = &self.config;

        if self.count == 0 || self.count > MAX_BATCH {
            return invalid(format!("count must be in 1..={}, got {}", MAX_BATCH, self.count));
        }
        if self.range == 0 {
            return invalid("range must be at least 1".into());
        }
        if config.max_operators == 0 || config.max_operators > MAX_OPERATORS {
            return invalid(format!(
                "max_operators must be in 1..={}, got {}",
                MAX_OPERATORS, config.max_operators
            ));
        }
        for (name, p) in [
            ("fraction_probability", config.fraction_probability),
            ("mixed_probability", config.mixed_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(format!("{} must be within 0..=1, got {}", name, p));
            }
        }
        if config.integer_part_divisor == 0 || config.attempt_factor == 0 {
            return invalid("integer_part_divisor and attempt_factor must be positive".into());
        }
        Ok(())
    }
}

/// Generate a batch of distinct problems.
///
/// Seeds a `StdRng` from `rng_seed` (or from entropy) and delegates to
/// [`generate_batch_with`].
pub fn generate_batch(request: &BatchRequest) -> EngineResult<ProblemSet> {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    generate_batch_with(&mut rng, request)
}

/// Generate a batch drawing all randomness from `rng`.
///
/// Each attempt draws an operator budget from `1..=max_operators`, builds a
/// legal tree and keeps it unless its canonical form was already used. The
/// run stops after `count` problems or `count * attempt_factor` attempts,
/// whichever comes first; a short batch is not an error, see
/// [`ProblemSet::is_exhausted`].
pub fn generate_batch_with<R: Rng>(rng: &mut R, request: &BatchRequest) -> EngineResult<ProblemSet> {
    request.validate()?;
    let config = &request.config;
    let count = request.count;
    let max_attempts = count.saturating_mul(config.attempt_factor);

    let mut set = ProblemSet { requested: count, ..ProblemSet::default() };
    let mut with_fraction = 0usize;

    while set.problems.len() < count && set.attempts < max_attempts {
        set.attempts += 1;

        let budget = rng.gen_range(1..=config.max_operators);
        let tree = match generate_tree(rng, budget, request.range, config) {
            Ok(tree) => tree,
            Err(err) => {
                debug!(budget, %err, "candidate abandoned");
                continue;
            }
        };
        let Some(value) = tree.evaluate() else { continue };

        let expression = tree.render();
        let operator_count = count_operators(&expression);
        if operator_count > config.max_operators {
            continue;
        }

        let has_fraction = tree.has_fraction();
        let accepted = set.problems.len();
        if config.balance_fractions
            && !has_fraction
            && accepted * 2 >= count
            && with_fraction * 2 < accepted
        {
            debug!(accepted, with_fraction, "holding out for a fraction problem");
            continue;
        }

        let canonical = tree.canonical_form();
        if !set.canonical_forms.insert(canonical.clone()) {
            debug!(%canonical, "duplicate problem");
            continue;
        }

        if has_fraction {
            with_fraction += 1;
        }
        set.problems.push(Problem {
            index: accepted + 1,
            expression,
            answer: value.to_string(),
            canonical,
            operator_count,
            has_fraction,
            tree,
        });
    }

    if set.is_exhausted() {
        warn!(
            requested = count,
            generated = set.problems.len(),
            attempts = set.attempts,
            "attempt limit reached, returning a short batch"
        );
    }
    info!(generated = set.problems.len(), attempts = set.attempts, range = request.range, "batch generated");
    Ok(set)
}

impl ProblemSet {
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Problems requested but not produced.
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.problems.len())
    }

    /// True when the attempt limit cut the batch short.
    pub fn is_exhausted(&self) -> bool {
        self.shortfall() > 0
    }

    /// `(expression, answer)` pairs in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.problems.iter().map(|p| (p.expression.as_str(), p.answer.as_str()))
    }

    pub fn exercise_lines(&self) -> Vec<String> {
        self.problems.iter().map(|p| exercise_line(EXERCISE_LABEL, p.index, &p.expression)).collect()
    }

    pub fn answer_lines(&self) -> Vec<String> {
        self.problems.iter().map(|p| answer_line(ANSWER_LABEL, p.index, &p.answer)).collect()
    }
}
