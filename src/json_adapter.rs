use serde_json::{json, Value};

use crate::arithmetic_engine::{
    error::{EngineError, EngineResult},
    models::{GenerationConfig, GradeReport, Problem, ProblemSet},
};

/// One problem as the client sees it. The answer is only included when
/// `with_answer` is set, so a quiz page can be served without leaking it.
fn problem_entry(problem: &Problem, with_answer: bool) -> Value {
    let mut entry = json!({
        "index": problem.index,
        "expression": problem.expression,
        "operators": problem.operator_count,
        "hasFraction": problem.has_fraction,
    });
    if with_answer {
        entry["answer"] = Value::String(problem.answer.clone());
    }
    entry
}

/// Map a [`ProblemSet`] to the JSON document served to the client.
pub fn to_json(set: &ProblemSet, with_answers: bool) -> Value {
    let problems: Vec<Value> = set.problems.iter().map(|p| problem_entry(p, with_answers)).collect();
    json!({
        "requested": set.requested,
        "generated": set.len(),
        "attempts": set.attempts,
        "exhausted": set.is_exhausted(),
        "problems": problems,
    })
}

pub fn grade_report_json(report: &GradeReport) -> Value {
    json!({
        "total": report.total(),
        "correct": { "count": report.correct.len(), "indices": report.correct },
        "wrong": { "count": report.wrong.len(), "indices": report.wrong },
    })
}

/// Load a [`GenerationConfig`] from JSON; missing fields keep their defaults.
pub fn config_from_json(text: &str) -> EngineResult<GenerationConfig> {
    serde_json::from_str(text).map_err(|err| EngineError::InvalidRequest(format!("bad config: {err}")))
}
