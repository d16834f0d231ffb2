//! End-to-end demo: generate a seeded drill sheet, grade it, then grade a
//! sheet with a few wrong answers.
//!
//! Run with: `cargo run --example demo`
//!
//! ## Key concepts demonstrated
//!
//! - `BatchRequest::new(count, range)`: minimal constructor, entropy seed
//!   and the default configuration.
//! - `.with_seed(u64)` makes the batch fully deterministic.
//! - `ProblemSet::exercise_lines()` / `answer_lines()` produce the sheet
//!   text; writing it to disk is up to the caller.
//! - `grade_lines()` re-evaluates every exercise from its text.

use arithmetic_drill_gen::{
    generate_batch, grade_lines, grade_one, to_json, BatchRequest, GenerationConfig,
};

fn print_sheet(title: &str, lines: &[String]) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {}", title);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for line in lines {
        println!("  {}", line);
    }
    println!();
}

fn main() {
    // ── Seeded batch ───────────────────────────────────────────────────────
    let request = BatchRequest::new(10, 10).with_seed(2024);
    let set = match generate_batch(&request) {
        Ok(set) => set,
        Err(err) => {
            eprintln!("cannot generate: {err}");
            return;
        }
    };

    let exercises = set.exercise_lines();
    let answers = set.answer_lines();
    print_sheet("Exercises (range 10, seed 2024)", &exercises);
    print_sheet("Answers", &answers);

    // ── Grading the answer key ─────────────────────────────────────────────
    match grade_lines(&exercises, &answers) {
        Ok(report) => print_sheet("Grade (answer key)", &report.summary_lines()),
        Err(err) => eprintln!("cannot grade: {err}"),
    }

    // ── Grading a student sheet with mistakes ──────────────────────────────
    let mut student = answers.clone();
    student[1] = "Answer2: 0".to_string();
    student[6] = "Answer7: 1/1".to_string();
    if let Ok(report) = grade_lines(&exercises, &student) {
        print_sheet("Grade (student)", &report.summary_lines());
    }

    // ── One-off checks ─────────────────────────────────────────────────────
    for (exercise, answer) in [("3 + 5 =", "8"), ("3 + 5 =", "7"), ("1 + 1/2 =", "1'1/2")] {
        let mark = if grade_one(exercise, answer) { "✓" } else { "✗" };
        println!("  {mark} {exercise} {answer}");
    }
    println!();

    // ── Custom configuration ───────────────────────────────────────────────
    // Naturals only, at most two operators.
    let mut plain = BatchRequest::new(5, 20).with_seed(7);
    plain.config = GenerationConfig {
        max_operators: 2,
        fraction_probability: 0.0,
        balance_fractions: false,
        ..GenerationConfig::default()
    };
    if let Ok(set) = generate_batch(&plain) {
        println!("{}", serde_json_pretty(&to_json(&set, true)));
    }
}

fn serde_json_pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
