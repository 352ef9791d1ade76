//! League-wide ordering: primary sort, tied-run detection, division
//! leader boosts.
//!
//! The division-leader boost and the ranking itself are mutually
//! dependent ("rank teams" needs "each division's leader", which needs a
//! ranking). That cycle is broken as an explicit two-phase computation:
//! phase 1 orders each division in isolation with the boost structurally
//! off, phase 2 orders the full input consuming phase-1 ranks. No flag is
//! threaded through call sites and termination is obvious.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::models::{TeamId, TeamRecord};

use super::break_ties::break_ties;
use super::RankingOptions;

// Primary sort key. Compared descending, exactly: every component
// derives from integer counts and ratios of integers, so identical
// inputs produce identical floats and epsilon comparison would only
// blur genuinely distinct keys together.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PrimaryKey {
    boost: u32,
    score: f64,
    diff: i64,
}

impl PrimaryKey {
    fn cmp_desc(&self, other: &Self) -> std::cmp::Ordering {
        other
            .boost
            .cmp(&self.boost)
            .then_with(|| other.score.total_cmp(&self.score))
            .then_with(|| other.diff.cmp(&self.diff))
    }
}

/// Order every team in `teams` by primary score, resolving tied runs
/// through the configured tiebreakers.
///
/// `all_teams` is the full league snapshot; the strength-of-schedule and
/// strength-of-victory aggregates read it, and division partitions are
/// taken from it when the leader boost is configured.
pub fn order_teams(
    teams: &[TeamRecord],
    all_teams: &[TeamRecord],
    options: &RankingOptions,
) -> Vec<TeamRecord> {
    let boosts = division_leader_boosts(teams, all_teams, options);
    order_with_boosts(teams, all_teams, options, &boosts)
}

/// 1-based rank of each team inside its own division.
///
/// Only meaningful when the input spans more than one division; a
/// single-division input returns an empty map immediately, skipping the
/// per-division ordering entirely.
pub fn division_ranks(
    teams: &[TeamRecord],
    all_teams: &[TeamRecord],
    options: &RankingOptions,
) -> HashMap<TeamId, u32> {
    let divisions: HashSet<u32> = teams.iter().map(|t| t.division_id).collect();
    if divisions.len() <= 1 {
        return HashMap::new();
    }

    let mut sorted_divisions: Vec<u32> = divisions.into_iter().collect();
    sorted_divisions.sort_unstable();

    let mut ranks = HashMap::new();
    for division in sorted_divisions {
        let members: Vec<TeamRecord> = all_teams
            .iter()
            .filter(|t| t.division_id == division)
            .cloned()
            .collect();
        // Phase 1: order the division with the leader boost off.
        let ordered = order_with_boosts(&members, all_teams, options, &HashMap::new());
        for (position, team) in ordered.iter().enumerate() {
            ranks.insert(team.team_id, position as u32 + 1);
        }
    }
    ranks
}

fn division_leader_boosts(
    teams: &[TeamRecord],
    all_teams: &[TeamRecord],
    options: &RankingOptions,
) -> HashMap<TeamId, u32> {
    let Some(slots) = options.division_leader_slots else {
        return HashMap::new();
    };
    division_ranks(teams, all_teams, options)
        .into_iter()
        .filter(|&(_, rank)| rank <= slots)
        .map(|(team_id, rank)| (team_id, slots - rank + 1))
        .collect()
}

// Phase 2: sort by (boost, primary score, win-loss differential), find
// contiguous runs with identical keys over the sorted arena, and hand
// each run to break_ties. Unique teams pass through untouched.
fn order_with_boosts(
    teams: &[TeamRecord],
    all_teams: &[TeamRecord],
    options: &RankingOptions,
    boosts: &HashMap<TeamId, u32>,
) -> Vec<TeamRecord> {
    let mut keyed: Vec<(PrimaryKey, TeamRecord)> = teams
        .iter()
        .map(|team| {
            let key = PrimaryKey {
                boost: boosts.get(&team.team_id).copied().unwrap_or(0),
                score: options.score.score(&team.record),
                diff: team.record.diff(),
            };
            let mut record = team.clone();
            // Annotations belong to this pass; stale ones from a
            // previous pass would survive on uncontested teams.
            record.decided_by = None;
            (key, record)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.cmp_desc(&b.0));

    let mut ordered: Vec<TeamRecord> = Vec::with_capacity(keyed.len());
    let mut start = 0;
    while start < keyed.len() {
        let mut end = start + 1;
        while end < keyed.len() && keyed[end].0 == keyed[start].0 {
            end += 1;
        }
        if end - start > 1 {
            debug!(len = end - start, "resolving tied run");
            let group: Vec<TeamRecord> = keyed[start..end].iter().map(|(_, t)| t.clone()).collect();
            ordered.extend(break_ties(&group, all_teams, options));
        } else {
            ordered.push(keyed[start].1.clone());
        }
        start = end;
    }
    ordered
}
