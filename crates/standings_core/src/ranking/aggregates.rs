//! Derived per-team tables for one tied group.
//!
//! Rebuilt on every `break_ties` invocation: the head-to-head and
//! common-opponent aggregates depend on exactly which teams are still
//! tied, and the strength tables on the whole league. Scores are folded
//! in once here so the comparator stages are O(1) lookups.

use std::collections::{HashMap, HashSet};

use crate::models::{HeadToHeadTable, RecordLine, TeamId, TeamRecord};

use super::score::ScoreProvider;

/// A folded record plus its precomputed score.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoredLine {
    pub line: RecordLine,
    pub score: f64,
}

/// Everything the tiebreaker stages need about the current tied group.
#[derive(Debug, Default)]
pub struct TieContext {
    /// Aggregated results against the other group members.
    pub head_to_head: HashMap<TeamId, ScoredLine>,
    /// Records restricted to opponents every group member played.
    /// `None` when the common set is empty or no table was supplied:
    /// the criterion is then neutral.
    pub common_opponents: Option<HashMap<TeamId, ScoredLine>>,
    /// Opponent quality weighted by games played against each opponent.
    pub strength_of_schedule: HashMap<TeamId, ScoredLine>,
    /// Opponent quality weighted by wins achieved against each opponent.
    pub strength_of_victory: HashMap<TeamId, ScoredLine>,
    /// Whether every group member shares one division / conference;
    /// the divisional and conference record criteria require it.
    pub same_division: bool,
    pub same_conference: bool,
}

impl TieContext {
    pub fn build(
        group: &[TeamRecord],
        all_teams: &[TeamRecord],
        table: Option<&HeadToHeadTable>,
        score: &ScoreProvider,
    ) -> Self {
        let mut ctx = TieContext {
            same_division: all_share(group, |t| t.division_id),
            same_conference: all_share(group, |t| t.conference_id),
            ..TieContext::default()
        };

        let Some(table) = table else {
            // No head-to-head input: every table-backed criterion is
            // neutral and falls through to the next configured one.
            return ctx;
        };

        let by_id: HashMap<TeamId, &TeamRecord> =
            all_teams.iter().map(|t| (t.team_id, t)).collect();
        let group_ids: HashSet<TeamId> = group.iter().map(|t| t.team_id).collect();

        ctx.head_to_head = head_to_head_table(group, &group_ids, table, score);
        ctx.common_opponents = common_opponent_table(group, &group_ids, table, score);
        ctx.strength_of_schedule = strength_table(group, &by_id, table, score, Weight::Games);
        ctx.strength_of_victory = strength_table(group, &by_id, table, score, Weight::Wins);
        ctx
    }
}

fn all_share<F: Fn(&TeamRecord) -> u32>(group: &[TeamRecord], key: F) -> bool {
    group.windows(2).all(|pair| key(&pair[0]) == key(&pair[1]))
}

// Sum each group member's results against every *other* group member,
// reversing stored orientation as needed, then score the fold.
fn head_to_head_table(
    group: &[TeamRecord],
    group_ids: &HashSet<TeamId>,
    table: &HeadToHeadTable,
    score: &ScoreProvider,
) -> HashMap<TeamId, ScoredLine> {
    group
        .iter()
        .map(|team| {
            let mut folded = RecordLine::default();
            for &opponent in group_ids {
                if opponent == team.team_id {
                    continue;
                }
                if let Some(line) = table.get(team.team_id, opponent) {
                    folded.won += line.wins();
                    folded.lost += line.lost;
                    folded.tied += line.tied;
                    folded.otl += line.otl;
                }
            }
            (team.team_id, ScoredLine { line: folded, score: score.score(&folded) })
        })
        .collect()
}

// Opponents played by *every* group member (the group itself excluded).
// An empty intersection leaves the criterion neutral.
fn common_opponent_table(
    group: &[TeamRecord],
    group_ids: &HashSet<TeamId>,
    table: &HeadToHeadTable,
    score: &ScoreProvider,
) -> Option<HashMap<TeamId, ScoredLine>> {
    let mut common: Option<HashSet<TeamId>> = None;
    for team in group {
        let played: HashSet<TeamId> = table
            .opponents_of(team.team_id)
            .filter(|id| !group_ids.contains(id))
            .collect();
        common = Some(match common {
            None => played,
            Some(set) => set.intersection(&played).copied().collect(),
        });
    }
    let common = common.filter(|set| !set.is_empty())?;

    let scored = group
        .iter()
        .map(|team| {
            let mut folded = RecordLine::default();
            for &opponent in &common {
                if let Some(line) = table.get(team.team_id, opponent) {
                    folded.won += line.wins();
                    folded.lost += line.lost;
                    folded.tied += line.tied;
                    folded.otl += line.otl;
                }
            }
            (team.team_id, ScoredLine { line: folded, score: score.score(&folded) })
        })
        .collect();
    Some(scored)
}

#[derive(Clone, Copy)]
enum Weight {
    /// Games played against the opponent: strength of schedule.
    Games,
    /// Wins achieved against the opponent: strength of victory.
    Wins,
}

// Fold every opponent's own season record, weighted per the metric, over
// the full league — how good were the teams you played (or beat).
fn strength_table(
    group: &[TeamRecord],
    by_id: &HashMap<TeamId, &TeamRecord>,
    table: &HeadToHeadTable,
    score: &ScoreProvider,
    weight: Weight,
) -> HashMap<TeamId, ScoredLine> {
    group
        .iter()
        .map(|team| {
            let mut folded = RecordLine::default();
            for opponent in table.opponents_of(team.team_id) {
                let Some(opponent_record) = by_id.get(&opponent) else {
                    continue;
                };
                let Some(line) = table.get(team.team_id, opponent) else {
                    continue;
                };
                let factor = match weight {
                    Weight::Games => line.games(),
                    Weight::Wins => line.wins(),
                };
                folded.add_weighted(&opponent_record.record, factor);
            }
            (team.team_id, ScoredLine { line: folded, score: score.score(&folded) })
        })
        .collect()
}
