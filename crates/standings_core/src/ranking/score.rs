//! Record-to-score reduction strategy.

use std::collections::HashMap;
use std::sync::Arc;

use crate::formula::{compile_cached, CompiledFormula, FormulaSyntaxError};
use crate::models::RecordLine;

/// Variable names a points formula may reference: wins, losses, ties and
/// overtime losses.
pub const FORMULA_VARIABLES: [&str; 4] = ["W", "L", "T", "OTL"];

/// Reduces a four-count record to one comparable number, either via plain
/// win percentage or via a compiled points formula from league
/// configuration.
#[derive(Debug, Clone)]
pub enum ScoreProvider {
    WinPercentage,
    PointsFormula(Arc<CompiledFormula>),
}

impl ScoreProvider {
    /// Compile a points formula through the shared cache. A broken
    /// formula surfaces here, at configuration time, not mid-ranking.
    pub fn from_formula(text: &str) -> Result<Self, FormulaSyntaxError> {
        Ok(Self::PointsFormula(compile_cached(text, &FORMULA_VARIABLES)?))
    }

    pub fn score(&self, line: &RecordLine) -> f64 {
        match self {
            Self::WinPercentage => line.win_percentage(),
            Self::PointsFormula(formula) => {
                let values = HashMap::from([
                    ("W".to_string(), line.won as f64),
                    ("L".to_string(), line.lost as f64),
                    ("T".to_string(), line.tied as f64),
                    ("OTL".to_string(), line.otl as f64),
                ]);
                // Arity was validated at compile time; replay cannot fail
                // for a formula built through from_formula.
                formula.evaluate(&values).unwrap_or(0.0)
            }
        }
    }
}

impl Default for ScoreProvider {
    fn default() -> Self {
        Self::WinPercentage
    }
}
