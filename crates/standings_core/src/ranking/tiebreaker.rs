//! The tiebreaker registry: a closed criterion set, each mapping to an
//! ordered list of (scoring, direction) stages.
//!
//! Criteria are a closed enum rather than a string-keyed table so that
//! adding or renaming one is a compile-checked change; the serde names
//! are the strings league configuration stores.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{TeamId, TeamRecord};

use super::aggregates::{ScoredLine, TieContext};
use super::coin_flip::coin_flip;
use super::RankingOptions;

/// A named tie-break criterion, in the order leagues publish them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tiebreaker {
    /// Designated division winners rank first outright.
    DivWinner,
    /// Aggregated results of games among the tied teams.
    HeadToHead,
    /// Divisional record; requires all tied teams to share a division.
    DivRecordIfSame,
    /// Conference record; requires all tied teams to share a conference.
    ConfRecordIfSame,
    /// Record against the opponents every tied team played.
    CommonOpponents,
    /// Combined record of beaten opponents.
    StrengthOfVictory,
    /// Combined record of all opponents.
    StrengthOfSchedule,
    /// Per-game point margin, then fewest points allowed per game.
    MarginOfVictory,
    /// Deterministic pseudo-random last resort.
    CoinFlip,
}

/// Sort direction of one stage. `Asc` means the smallest value wins the
/// round (the stage value is negated before comparison).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// The scoring function behind one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    DivisionWinner,
    HeadToHeadScore,
    DivisionScore,
    ConferenceScore,
    CommonOpponentScore,
    StrengthOfVictoryScore,
    StrengthOfScheduleScore,
    PointMarginPerGame,
    PointsAgainstPerGame,
    CoinFlip,
}

#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub kind: StageKind,
    pub order: SortOrder,
}

const fn desc(kind: StageKind) -> Stage {
    Stage { kind, order: SortOrder::Desc }
}

// The static stage table behind each criterion.
const DIV_WINNER_STAGES: [Stage; 1] = [desc(StageKind::DivisionWinner)];
const HEAD_TO_HEAD_STAGES: [Stage; 1] = [desc(StageKind::HeadToHeadScore)];
const DIV_RECORD_STAGES: [Stage; 1] = [desc(StageKind::DivisionScore)];
const CONF_RECORD_STAGES: [Stage; 1] = [desc(StageKind::ConferenceScore)];
const COMMON_OPPONENTS_STAGES: [Stage; 1] = [desc(StageKind::CommonOpponentScore)];
const STRENGTH_OF_VICTORY_STAGES: [Stage; 1] = [desc(StageKind::StrengthOfVictoryScore)];
const STRENGTH_OF_SCHEDULE_STAGES: [Stage; 1] = [desc(StageKind::StrengthOfScheduleScore)];
const MARGIN_OF_VICTORY_STAGES: [Stage; 2] = [
    desc(StageKind::PointMarginPerGame),
    Stage { kind: StageKind::PointsAgainstPerGame, order: SortOrder::Asc },
];
const COIN_FLIP_STAGES: [Stage; 1] = [desc(StageKind::CoinFlip)];

impl Tiebreaker {
    /// The ordered stages this criterion runs.
    pub fn stages(&self) -> &'static [Stage] {
        match self {
            Tiebreaker::DivWinner => &DIV_WINNER_STAGES,
            Tiebreaker::HeadToHead => &HEAD_TO_HEAD_STAGES,
            Tiebreaker::DivRecordIfSame => &DIV_RECORD_STAGES,
            Tiebreaker::ConfRecordIfSame => &CONF_RECORD_STAGES,
            Tiebreaker::CommonOpponents => &COMMON_OPPONENTS_STAGES,
            Tiebreaker::StrengthOfVictory => &STRENGTH_OF_VICTORY_STAGES,
            Tiebreaker::StrengthOfSchedule => &STRENGTH_OF_SCHEDULE_STAGES,
            Tiebreaker::MarginOfVictory => &MARGIN_OF_VICTORY_STAGES,
            Tiebreaker::CoinFlip => &COIN_FLIP_STAGES,
        }
    }

    /// Canonical configuration-string name, for annotations and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Tiebreaker::DivWinner => "divWinner",
            Tiebreaker::HeadToHead => "headToHead",
            Tiebreaker::DivRecordIfSame => "divRecordIfSame",
            Tiebreaker::ConfRecordIfSame => "confRecordIfSame",
            Tiebreaker::CommonOpponents => "commonOpponents",
            Tiebreaker::StrengthOfVictory => "strengthOfVictory",
            Tiebreaker::StrengthOfSchedule => "strengthOfSchedule",
            Tiebreaker::MarginOfVictory => "marginOfVictory",
            Tiebreaker::CoinFlip => "coinFlip",
        }
    }
}

impl StageKind {
    /// The comparison value of one team for this stage, before the sort
    /// direction is applied. `NEG_INFINITY` marks a stage that cannot
    /// discriminate here (missing table, failed same-division
    /// precondition): it never wins a round and never eliminates anyone.
    pub fn evaluate(
        &self,
        team: &TeamRecord,
        ctx: &TieContext,
        options: &RankingOptions,
    ) -> f64 {
        match self {
            StageKind::DivisionWinner => {
                if options.division_winners.contains(&team.team_id) {
                    1.0
                } else {
                    0.0
                }
            }
            StageKind::HeadToHeadScore => table_score(&ctx.head_to_head, team),
            StageKind::DivisionScore => {
                if ctx.same_division {
                    options.score.score(&team.div_record)
                } else {
                    f64::NEG_INFINITY
                }
            }
            StageKind::ConferenceScore => {
                if ctx.same_conference {
                    options.score.score(&team.conf_record)
                } else {
                    f64::NEG_INFINITY
                }
            }
            StageKind::CommonOpponentScore => match &ctx.common_opponents {
                Some(table) => table_score(table, team),
                None => f64::NEG_INFINITY,
            },
            StageKind::StrengthOfVictoryScore => table_score(&ctx.strength_of_victory, team),
            StageKind::StrengthOfScheduleScore => table_score(&ctx.strength_of_schedule, team),
            StageKind::PointMarginPerGame => team.point_margin_per_game(),
            StageKind::PointsAgainstPerGame => team.points_against_per_game(),
            StageKind::CoinFlip => coin_flip(team, options.season),
        }
    }
}

fn table_score(table: &HashMap<TeamId, ScoredLine>, team: &TeamRecord) -> f64 {
    table.get(&team.team_id).map(|scored| scored.score).unwrap_or(f64::NEG_INFINITY)
}
