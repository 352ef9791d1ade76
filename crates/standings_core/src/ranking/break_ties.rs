//! Multi-stage elimination over one tied group.

use tracing::{debug, trace};

use crate::models::TeamRecord;

use super::aggregates::TieContext;
use super::coin_flip::coin_flip;
use super::tiebreaker::{SortOrder, Stage, StageKind, Tiebreaker};
use super::RankingOptions;

/// Resolve one tied group into a total order using the configured
/// tiebreakers.
///
/// Each pass over the criteria isolates exactly one winner, which is
/// annotated with the deciding criterion and removed; the remainder is
/// re-resolved against freshly rebuilt aggregate tables (head-to-head
/// and common-opponent records change once a team leaves the group).
/// The deterministic coin flip backstops every pass, so the candidate
/// set strictly shrinks and the loop always terminates.
///
/// The output is a permutation of the input: no team is created, dropped
/// or duplicated.
pub fn break_ties(
    group: &[TeamRecord],
    all_teams: &[TeamRecord],
    options: &RankingOptions,
) -> Vec<TeamRecord> {
    if group.len() <= 1 {
        return group.to_vec();
    }

    let mut resolved: Vec<TeamRecord> = Vec::with_capacity(group.len());
    let mut remaining: Vec<TeamRecord> = group.to_vec();

    while remaining.len() > 1 {
        let (winner_idx, criterion) = isolate_winner(&remaining, all_teams, options);
        let mut winner = remaining.remove(winner_idx);
        winner.decided_by = Some(criterion);
        debug!(
            team_id = winner.team_id,
            criterion = criterion.name(),
            remaining = remaining.len(),
            "tie resolved"
        );
        resolved.push(winner);
    }

    // The last team stands alone; nothing decided its position.
    resolved.extend(remaining);
    resolved
}

// One elimination pass: run the configured criteria in order, each
// criterion's stages in order, until a stage produces a unique maximum.
// Teams beaten in an earlier stage are masked out of later ones. The
// coin flip is the guaranteed backstop when every criterion exhausts.
fn isolate_winner(
    remaining: &[TeamRecord],
    all_teams: &[TeamRecord],
    options: &RankingOptions,
) -> (usize, Tiebreaker) {
    let ctx = TieContext::build(
        remaining,
        all_teams,
        options.head_to_head.as_ref(),
        &options.score,
    );
    let mut eliminated = vec![false; remaining.len()];

    for &criterion in &options.tiebreakers {
        for stage in criterion.stages() {
            match run_stage(remaining, &eliminated, stage, &ctx, options) {
                StageOutcome::Winner(idx) => return (idx, criterion),
                StageOutcome::Narrowed(at_max) => {
                    for (idx, keep) in at_max.iter().enumerate() {
                        if !keep {
                            eliminated[idx] = true;
                        }
                    }
                }
                StageOutcome::Neutral => {}
            }
        }
    }

    // Every configured criterion exhausted: fall back to the coin flip.
    // Its value is treated as always unique; on a hash collision the
    // first team at the maximum wins, i.e. colliding teams keep input
    // order.
    let mut best = f64::NEG_INFINITY;
    let mut winner = 0;
    for (idx, team) in remaining.iter().enumerate() {
        if eliminated[idx] {
            continue;
        }
        let value = coin_flip(team, options.season);
        if value > best {
            best = value;
            winner = idx;
        }
    }
    (winner, Tiebreaker::CoinFlip)
}

enum StageOutcome {
    /// A unique maximum: this index wins the round.
    Winner(usize),
    /// Several teams share the maximum; everyone else is provably worse
    /// on this stage. `true` marks the indices still in contention.
    Narrowed(Vec<bool>),
    /// The stage could not discriminate at all.
    Neutral,
}

fn run_stage(
    remaining: &[TeamRecord],
    eliminated: &[bool],
    stage: &Stage,
    ctx: &TieContext,
    options: &RankingOptions,
) -> StageOutcome {
    let mut best = f64::NEG_INFINITY;
    let mut at_max = vec![false; remaining.len()];
    let mut count = 0usize;

    for (idx, team) in remaining.iter().enumerate() {
        if eliminated[idx] {
            continue;
        }
        let raw = stage.kind.evaluate(team, ctx, options);
        // A neutral marker must stay neutral under the ascending
        // negation, or a non-discriminating stage would crown a winner.
        let value = if raw == f64::NEG_INFINITY {
            raw
        } else {
            match stage.order {
                SortOrder::Desc => raw,
                SortOrder::Asc => -raw,
            }
        };
        trace!(team_id = team.team_id, ?stage.kind, value, "stage value");
        // Exact comparison on purpose: every stage value derives from
        // integer counts and ratios of integers, identical inputs give
        // identical floats.
        if value > best {
            best = value;
            at_max.fill(false);
            at_max[idx] = true;
            count = 1;
        } else if value == best {
            at_max[idx] = true;
            count += 1;
        }
    }

    // A stage where no team scored above -inf contributes nothing.
    if best == f64::NEG_INFINITY {
        return StageOutcome::Neutral;
    }

    if count == 1 {
        let winner = at_max.iter().position(|&flag| flag).unwrap_or(0);
        return StageOutcome::Winner(winner);
    }

    // The coin flip never narrows: it is defined to isolate a winner,
    // collisions resolving to input order.
    if stage.kind == StageKind::CoinFlip {
        let winner = at_max.iter().position(|&flag| flag).unwrap_or(0);
        return StageOutcome::Winner(winner);
    }

    StageOutcome::Narrowed(at_max)
}
