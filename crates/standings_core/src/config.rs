//! League ranking configuration.
//!
//! The shape league settings store and edit. Validation lives here so a
//! broken points formula is rejected when the operator saves the
//! setting, not silently degraded into a wrong ranking later.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::formula::FormulaSyntaxError;
use crate::models::{HeadToHeadTable, TeamId};
use crate::ranking::{RankingOptions, ScoreProvider, Tiebreaker};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Tiebreaker criteria in application order.
    pub tiebreakers: Vec<Tiebreaker>,
    /// Custom points formula text, e.g. `"2*W + OTL + T"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_formula: Option<String>,
    /// Score by the points formula instead of win percentage.
    #[serde(default)]
    pub use_points_formula: bool,
    /// Guaranteed top seeds per division, when the league rewards
    /// division leaders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division_leader_slots: Option<u32>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            tiebreakers: Self::default_tiebreakers(),
            points_formula: None,
            use_points_formula: false,
            division_leader_slots: None,
        }
    }
}

impl RankingConfig {
    /// The published default criterion order.
    pub fn default_tiebreakers() -> Vec<Tiebreaker> {
        vec![
            Tiebreaker::DivWinner,
            Tiebreaker::HeadToHead,
            Tiebreaker::DivRecordIfSame,
            Tiebreaker::CommonOpponents,
            Tiebreaker::ConfRecordIfSame,
            Tiebreaker::StrengthOfVictory,
            Tiebreaker::StrengthOfSchedule,
            Tiebreaker::CoinFlip,
        ]
    }

    /// Build the configured score provider, compiling the points formula
    /// through the shared cache. Fails on a broken formula.
    pub fn score_provider(&self) -> Result<ScoreProvider, FormulaSyntaxError> {
        match &self.points_formula {
            Some(text) if self.use_points_formula => ScoreProvider::from_formula(text),
            _ => Ok(ScoreProvider::WinPercentage),
        }
    }

    /// Settings-save validation: currently the formula is the only part
    /// that can be malformed.
    pub fn validate(&self) -> Result<(), FormulaSyntaxError> {
        self.score_provider().map(|_| ())
    }

    /// Whether any configured criterion reads the head-to-head matrix,
    /// so callers can skip loading it when none does.
    pub fn needs_head_to_head(&self) -> bool {
        self.tiebreakers.iter().any(|t| {
            matches!(
                t,
                Tiebreaker::HeadToHead
                    | Tiebreaker::CommonOpponents
                    | Tiebreaker::StrengthOfVictory
                    | Tiebreaker::StrengthOfSchedule
            )
        })
    }
}

impl RankingOptions {
    /// Assemble one ranking pass's options from league configuration and
    /// the caller's snapshots.
    pub fn from_config(
        config: &RankingConfig,
        season: u32,
        division_winners: HashSet<TeamId>,
        head_to_head: Option<HeadToHeadTable>,
    ) -> Result<Self, FormulaSyntaxError> {
        Ok(Self {
            tiebreakers: config.tiebreakers.clone(),
            division_winners,
            season,
            score: config.score_provider()?,
            head_to_head,
            division_leader_slots: config.division_leader_slots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(RankingConfig::default().validate().is_ok());
    }

    #[test]
    fn broken_formula_blocks_validation() {
        let config = RankingConfig {
            points_formula: Some("2*W + (OTL".to_string()),
            use_points_formula: true,
            ..RankingConfig::default()
        };
        assert_eq!(config.validate(), Err(FormulaSyntaxError::MismatchedParentheses));
    }

    #[test]
    fn unused_formula_is_not_compiled() {
        // A stored but disabled formula must not block settings.
        let config = RankingConfig {
            points_formula: Some("totally (broken".to_string()),
            use_points_formula: false,
            ..RankingConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = RankingConfig {
            tiebreakers: vec![Tiebreaker::ConfRecordIfSame, Tiebreaker::CoinFlip],
            points_formula: Some("2*W + OTL + T".to_string()),
            use_points_formula: true,
            division_leader_slots: Some(1),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("confRecordIfSame"));
        let back: RankingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tiebreakers, config.tiebreakers);
        assert_eq!(back.points_formula, config.points_formula);
        assert_eq!(back.division_leader_slots, Some(1));
    }

    #[test]
    fn head_to_head_requirement_follows_the_criteria() {
        let mut config = RankingConfig::default();
        assert!(config.needs_head_to_head());
        config.tiebreakers = vec![Tiebreaker::ConfRecordIfSame, Tiebreaker::CoinFlip];
        assert!(!config.needs_head_to_head());
    }
}
