use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Operators and expression trees
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    /// Internal token, as used by the parser and canonical forms.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Symbol shown to students.
    pub fn display_symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '×',
            Operator::Div => '÷',
        }
    }

    /// Accepts both internal and display symbols.
    pub fn from_symbol(c: char) -> Option<Operator> {
        match c {
            '+'       => Some(Operator::Add),
            '-'       => Some(Operator::Sub),
            '*' | '×' => Some(Operator::Mul),
            '/' | '÷' => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
        }
    }

    pub fn is_commutative(self) -> bool {
        matches!(self, Operator::Add | Operator::Mul)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Immutable binary expression tree.
///
/// Leaves keep the literal token exactly as generated or parsed (`7`, `3/5`,
/// `2'3/5`) so rendering reproduces it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    Leaf(String),
    Binary {
        op: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

// ---------------------------------------------------------------------------
// Generation request / configuration
// ---------------------------------------------------------------------------

/// Tuning knobs for generation. The defaults reproduce the classic drill
/// sheet: up to three operators, half the numbers fractional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Upper bound on operators per problem; each attempt draws `1..=max`.
    pub max_operators: usize,
    /// Chance that a generated number is a fraction rather than a natural.
    pub fraction_probability: f64,
    /// Extra chance that a large-enough fraction becomes a mixed number.
    pub mixed_probability: f64,
    /// Mixed-number integer parts are drawn from `1..=max(1, range / divisor)`.
    pub integer_part_divisor: u32,
    /// A batch of `count` gives up after `count * attempt_factor` attempts.
    pub attempt_factor: usize,
    /// Rejected nodes are rebuilt at most this many times per tree.
    pub node_retry_limit: usize,
    /// Past the half-way mark, refuse fraction-free problems while fewer
    /// than half of the accepted ones contain a fraction.
    pub balance_fractions: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            max_operators: 3,
            fraction_probability: 0.5,
            mixed_probability: 0.3,
            integer_part_divisor: 3,
            attempt_factor: 100,
            node_retry_limit: 1_000,
            balance_fractions: true,
        }
    }
}

/// Largest batch the engine accepts.
pub const MAX_BATCH: usize = 10_000;

/// Largest `max_operators` the engine accepts; trees are built recursively.
pub const MAX_OPERATORS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    pub count: usize,
    /// Natural numbers are drawn from `1..range`, denominators from `2..range`.
    pub range: u32,
    pub rng_seed: Option<u64>,
    #[serde(default)]
    pub config: GenerationConfig,
}

impl BatchRequest {
    /// Entropy-seeded request with the default configuration.
    pub fn new(count: usize, range: u32) -> Self {
        BatchRequest { count, range, rng_seed: None, config: GenerationConfig::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// 1-based position in the batch.
    pub index: usize,
    /// Rendered expression, e.g. `"1/2 × (3 + 4)"`.
    pub expression: String,
    /// Display form of the exact value, e.g. `"3'1/2"`.
    pub answer: String,
    /// Deduplication key.
    pub canonical: String,
    pub operator_count: usize,
    pub has_fraction: bool,
    /// The tree the expression was rendered from.
    pub tree: Expr,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProblemSet {
    pub problems: Vec<Problem>,
    /// Canonical forms already used in this run.
    pub canonical_forms: BTreeSet<String>,
    pub requested: usize,
    pub attempts: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeReport {
    /// 1-based indices of correctly answered problems.
    pub correct: Vec<usize>,
    pub wrong: Vec<usize>,
}
