use thiserror::Error;

use crate::arithmetic_engine::models::Operator;

/// Everything that can go wrong inside the engine.
///
/// Generation treats `IllegalOperation`, `DivisionByZero`, `Overflow` and
/// `ZeroDenominator` as "reject and retry"; grading treats any variant as
/// "cannot grade this line".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("fraction denominator must not be zero")]
    ZeroDenominator,

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    Overflow,

    #[error("cannot parse `{input}`: {reason}")]
    Parse { input: String, reason: &'static str },

    #[error("unbalanced parentheses in `{0}`")]
    UnbalancedParentheses(String),

    #[error("illegal `{op}` node: {reason}")]
    IllegalOperation { op: Operator, reason: &'static str },

    #[error("no legal expression found for operator budget {budget}")]
    RetriesExhausted { budget: usize },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl EngineError {
    pub(crate) fn parse(input: &str, reason: &'static str) -> Self {
        EngineError::Parse { input: input.to_string(), reason }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
