use thiserror::Error;

/// Compile-time formula errors. These are operator-configuration errors:
/// they must reach the settings surface that let the formula be entered,
/// not be swallowed into a degraded ranking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaSyntaxError {
    #[error("empty formula")]
    EmptyFormula,

    #[error("invalid variable \"{token}\"")]
    InvalidToken { token: String },

    #[error("mismatched parentheses")]
    MismatchedParentheses,

    #[error("malformed expression: {reason}")]
    Malformed { reason: &'static str },
}

/// Evaluate-time stack errors. Compiled formulas are arity-checked at
/// compile time, so these only surface for a hand-built RPN sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaEvalError {
    #[error("insufficient values in formula")]
    InsufficientValues,

    #[error("too many values in formula")]
    TooManyValues,
}
