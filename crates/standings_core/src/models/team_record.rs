use serde::{Deserialize, Serialize};

use crate::ranking::Tiebreaker;

/// Team identifier, as assigned by the league store.
pub type TeamId = u32;

/// One four-count slice of a team's results: the overall season, the
/// divisional or conference sub-record, or an aggregate folded together
/// from head-to-head lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLine {
    pub won: u32,
    pub lost: u32,
    pub tied: u32,
    pub otl: u32,
}

impl RecordLine {
    pub fn new(won: u32, lost: u32, tied: u32, otl: u32) -> Self {
        Self { won, lost, tied, otl }
    }

    pub fn games(&self) -> u32 {
        self.won + self.lost + self.tied + self.otl
    }

    /// Win percentage with ties worth half a win.
    ///
    /// Zero games played yields 0.0, never NaN: an undefined comparison
    /// value would break the total-order invariant downstream.
    pub fn win_percentage(&self) -> f64 {
        let games = self.games();
        if games == 0 {
            return 0.0;
        }
        (self.won as f64 + 0.5 * self.tied as f64) / games as f64
    }

    /// Win-minus-loss differential; overtime losses count against.
    pub fn diff(&self) -> i64 {
        self.won as i64 - self.lost as i64 - self.otl as i64
    }

    /// Fold in another line `weight` times. Used by the strength tables,
    /// where each opponent's record is weighted by games played or wins.
    pub fn add_weighted(&mut self, other: &RecordLine, weight: u32) {
        self.won += other.won * weight;
        self.lost += other.lost * weight;
        self.tied += other.tied * weight;
        self.otl += other.otl * weight;
    }
}

/// One team's standing inputs for a season, snapshotted by the caller
/// from the league store. Read-only here except for the `decided_by`
/// annotation written during tie resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRecord {
    pub team_id: TeamId,
    pub division_id: u32,
    pub conference_id: u32,
    /// Overall season record.
    pub record: RecordLine,
    /// Record against divisional opponents only.
    #[serde(default)]
    pub div_record: RecordLine,
    /// Record against conference opponents only.
    #[serde(default)]
    pub conf_record: RecordLine,
    #[serde(default)]
    pub points_for: u32,
    #[serde(default)]
    pub points_against: u32,
    #[serde(default)]
    pub games_played: u32,
    /// Name of the tiebreaker criterion that decided this team's
    /// position, when a tie had to be broken. Diagnostic only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<Tiebreaker>,
}

impl TeamRecord {
    pub fn win_percentage(&self) -> f64 {
        self.record.win_percentage()
    }

    /// Average point margin per game; 0.0 when no games were played.
    pub fn point_margin_per_game(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        (self.points_for as f64 - self.points_against as f64) / self.games_played as f64
    }

    /// Average points allowed per game; 0.0 when no games were played.
    pub fn points_against_per_game(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.points_against as f64 / self.games_played as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_percentage_counts_ties_as_half() {
        let line = RecordLine::new(5, 4, 2, 1);
        assert_eq!(line.win_percentage(), 6.0 / 12.0);
    }

    #[test]
    fn win_percentage_of_empty_record_is_zero_not_nan() {
        let line = RecordLine::default();
        assert_eq!(line.win_percentage(), 0.0);
    }

    #[test]
    fn diff_subtracts_losses_and_overtime_losses() {
        let line = RecordLine::new(10, 3, 0, 2);
        assert_eq!(line.diff(), 5);
    }

    #[test]
    fn per_game_metrics_are_zero_without_games() {
        let team = TeamRecord {
            team_id: 1,
            division_id: 0,
            conference_id: 0,
            record: RecordLine::default(),
            div_record: RecordLine::default(),
            conf_record: RecordLine::default(),
            points_for: 0,
            points_against: 0,
            games_played: 0,
            decided_by: None,
        };
        assert_eq!(team.point_margin_per_game(), 0.0);
        assert_eq!(team.points_against_per_game(), 0.0);
    }
}
