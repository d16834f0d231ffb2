//! Core arithmetic engine: problem generation, exact evaluation and grading.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: operators, expression trees, requests, results |
//! | `error`      | `EngineError`, the single error type of the engine |
//! | `rational`   | Exact fractions with the `I'N/D` display form |
//! | `expression` | Tree evaluation, rendering, canonical forms, legality rules |
//! | `numbers`    | Random literals: naturals, proper fractions, mixed numbers |
//! | `builder`    | Random construction of legal trees with bounded retries |
//! | `parser`     | Rendered text back into a tree |
//! | `evaluator`  | Value of rendered text, with a flat token fallback |
//! | `helpers`    | Exercise / answer line format |
//! | `generator`  | Batch entry point `generate_batch()` with deduplication |
//! | `grading`    | `grade_one()` and whole-sheet grading |

pub mod builder;
pub mod error;
pub mod evaluator;
pub mod expression;
pub mod generator;
pub mod grading;
pub mod helpers;
pub mod models;
pub mod numbers;
pub mod parser;
pub mod rational;

// Re-export the public API surface so callers can use
// `arithmetic_engine::generate_batch` without reaching into sub-modules.
pub use error::{EngineError, EngineResult};
pub use evaluator::{calculate_expression, try_calculate_expression};
pub use expression::count_operators;
pub use generator::{generate_batch, generate_batch_with};
pub use grading::{grade_lines, grade_one};
pub use models::{
    BatchRequest, Expr, GenerationConfig, GradeReport, Operator, Problem, ProblemSet,
};
pub use parser::parse_expression;
pub use rational::Rational;
