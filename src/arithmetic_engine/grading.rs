use tracing::{info, warn};

use crate::arithmetic_engine::{
    error::{EngineError, EngineResult},
    evaluator::try_calculate_expression,
    helpers::{answer_body, exercise_body, join_indices},
    models::GradeReport,
};

/// Grade one submitted answer against an exercise line.
///
/// The exercise is re-evaluated from its text; the answer is correct only if
/// it matches the display form of that value exactly (`"3/4"`, not `"6/8"`).
/// Exercises that cannot be evaluated are graded wrong.
pub fn grade_one(exercise: &str, submitted: &str) -> bool {
    match try_calculate_expression(exercise_body(exercise)) {
        Ok(value) => value.to_string() == answer_body(submitted),
        Err(err) => {
            warn!(%err, exercise, "cannot grade exercise");
            false
        }
    }
}

/// Grade two sheets line by line. Blank lines are skipped on both sides.
pub fn grade_lines<E, A>(exercises: &[E], answers: &[A]) -> EngineResult<GradeReport>
where
    E: AsRef<str>,
    A: AsRef<str>,
{
    let exercises: Vec<&str> = non_blank(exercises);
    let answers: Vec<&str> = non_blank(answers);
    if exercises.len() != answers.len() {
        return Err(EngineError::InvalidRequest(format!(
            "{} exercises but {} answers",
            exercises.len(),
            answers.len()
        )));
    }

    let mut report = GradeReport::default();
    for (i, (exercise, answer)) in exercises.iter().zip(&answers).enumerate() {
        if grade_one(exercise, answer) {
            report.correct.push(i + 1);
        } else {
            report.wrong.push(i + 1);
        }
    }
    info!(correct = report.correct.len(), wrong = report.wrong.len(), "graded answer sheet");
    Ok(report)
}

fn non_blank<S: AsRef<str>>(lines: &[S]) -> Vec<&str> {
    lines.iter().map(|l| l.as_ref().trim()).filter(|l| !l.is_empty()).collect()
}

impl GradeReport {
    pub fn total(&self) -> usize {
        self.correct.len() + self.wrong.len()
    }

    /// `["Correct: 2 (1, 3)", "Wrong: 1 (2)"]`
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Correct: {} ({})", self.correct.len(), join_indices(&self.correct)),
            format!("Wrong: {} ({})", self.wrong.len(), join_indices(&self.wrong)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grades_single_answers() {
        assert!(grade_one("3 + 5 =", "8"));
        assert!(!grade_one("3 + 5 =", "7"));
        assert!(grade_one("Exercise1: 1/2 + 1 =", "Answer1: 1'1/2"));
        assert!(!grade_one("1/2 + 1 =", "3/2"), "only the display form counts");
        assert!(!grade_one("1 ÷ 0 =", "0"));
        assert!(!grade_one("(1 + 2 =", "3"));
    }

    #[test]
    fn grades_whole_sheets() {
        let exercises = ["Exercise1: 3 + 5 =", "", "Exercise2: 1/2 × 4 =", "Exercise3: 9 - 3 - 1 ="];
        let answers = vec!["Answer1: 8".to_string(), "Answer2: 3".into(), "Answer3: 5".into()];
        let report = grade_lines(&exercises, &answers).unwrap();
        assert_eq!(report.correct, vec![1, 3]);
        assert_eq!(report.wrong, vec![2]);
        assert_eq!(report.total(), 3);
        assert_eq!(report.summary_lines(), vec!["Correct: 2 (1, 3)", "Wrong: 1 (2)"]);
    }

    #[test]
    fn mismatched_sheets_are_rejected() {
        let err = grade_lines(&["1 + 1 ="], &["2", "3"]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequest(_)));
    }
}
