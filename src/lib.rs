//! # arithmetic_drill_gen
//!
//! An offline, deterministic generator and grader for primary-school
//! arithmetic drills over natural numbers and fractions.
//!
//! The engine builds random four-operation expressions, computes their exact
//! values, guarantees that no two problems in a batch are the same up to
//! reordering of `+` and `×` operands, and renders them for a worksheet. It
//! can also read a rendered expression back and re-derive its value to grade
//! a submitted answer.
//!
//! ## How it works
//!
//! 1. Create a [`BatchRequest`] with a problem count, a number range and an
//!    optional RNG seed.
//! 2. Call [`generate_batch`]. The engine draws an operator budget, builds a
//!    tree bottom-up while rejecting negative differences and improper
//!    quotients, and keeps the tree unless its canonical form was already
//!    used in this batch.
//! 3. The returned [`ProblemSet`] holds `(expression, answer)` pairs, ready
//!    to be written as exercise and answer sheets.
//! 4. Later, [`grade_one`] / [`grade_lines`] parse each exercise back,
//!    evaluate it and compare against the submitted answer text.
//!
//! ## Number formats
//!
//! Values print as a bare integer (`7`), a proper fraction (`3/5`) or a mixed
//! number (`2'3/5`). Multiplication and division display as `×` and `÷`.
//!
//! ## Quick start
//!
//! ```rust
//! use arithmetic_drill_gen::{generate_batch, grade_one, BatchRequest};
//!
//! let set = generate_batch(&BatchRequest::new(10, 10).with_seed(42)).unwrap();
//! for (expression, answer) in set.pairs() {
//!     println!("{expression} = {answer}");
//!     assert!(grade_one(&format!("{expression} ="), answer));
//! }
//!
//! assert!(grade_one("3 + 5 =", "8"));
//! assert!(!grade_one("3 + 5 =", "7"));
//! ```

pub mod arithmetic_engine;
pub mod json_adapter;

// Convenience re-exports so callers can use `arithmetic_drill_gen::generate_batch`
// directly without reaching into `arithmetic_engine::`.
pub use arithmetic_engine::{
    calculate_expression, generate_batch, generate_batch_with, grade_lines, grade_one,
    parse_expression, BatchRequest, EngineError, Expr, GenerationConfig, GradeReport, Operator,
    Problem, ProblemSet, Rational,
};
pub use json_adapter::{config_from_json, grade_report_json, to_json};
