//! Text helpers for the exercise / answer sheet line format.
//!
//! ```text
//! Exercise3: 1/2 × (3 + 4) =
//! Answer3: 3'1/2
//! ```
//!
//! Reading and writing the sheets themselves is left to the caller; these
//! helpers only build and take apart single lines.

pub const EXERCISE_LABEL: &str = "Exercise";
pub const ANSWER_LABEL: &str = "Answer";

/// `"<label><index>: <expression> ="`
pub fn exercise_line(label: &str, index: usize, expression: &str) -> String {
    format!("{}{}: {} =", label, index, expression)
}

/// `"<label><index>: <answer>"`
pub fn answer_line(label: &str, index: usize, answer: &str) -> String {
    format!("{}{}: {}", label, index, answer)
}

/// Expression part of an exercise line: drops an optional `label:` prefix
/// and the trailing `=`.
pub fn exercise_body(line: &str) -> &str {
    let body = strip_label(line);
    body.strip_suffix('=').unwrap_or(body).trim()
}

/// Value part of an answer line: drops an optional `label:` prefix.
pub fn answer_body(line: &str) -> &str {
    strip_label(line)
}

fn strip_label(line: &str) -> &str {
    line.split_once(':').map_or(line, |(_, rest)| rest).trim()
}

/// `1, 4, 7`
pub fn join_indices(indices: &[usize]) -> String {
    indices.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}
