//! Aggregated head-to-head results between team pairs.
//!
//! The table is built externally from the season's game log and handed in
//! as a read-only snapshot. Each pair's counts are stored once, from the
//! perspective of the lower team id; queries in the other direction
//! reverse the counts on the way out.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::team_record::TeamId;

/// Pair results from the perspective of one team: regulation wins and
/// losses, ties, and overtime wins and losses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct H2hLine {
    pub won: u32,
    pub lost: u32,
    pub tied: u32,
    pub otw: u32,
    pub otl: u32,
}

impl H2hLine {
    pub fn new(won: u32, lost: u32, tied: u32, otw: u32, otl: u32) -> Self {
        Self { won, lost, tied, otw, otl }
    }

    pub fn games(&self) -> u32 {
        self.won + self.lost + self.tied + self.otw + self.otl
    }

    /// Wins of any kind, regulation or overtime.
    pub fn wins(&self) -> u32 {
        self.won + self.otw
    }

    /// The same results seen from the other team: won and lost swap, as
    /// do overtime wins and losses. Ties stay put.
    pub fn reversed(&self) -> Self {
        Self {
            won: self.lost,
            lost: self.won,
            tied: self.tied,
            otw: self.otl,
            otl: self.otw,
        }
    }

    pub fn accumulate(&mut self, other: &H2hLine) {
        self.won += other.won;
        self.lost += other.lost;
        self.tied += other.tied;
        self.otw += other.otw;
        self.otl += other.otl;
    }
}

/// One externally-built head-to-head row: results between `team` and
/// `opponent`, from `team`'s perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct H2hEntry {
    pub team: TeamId,
    pub opponent: TeamId,
    #[serde(flatten)]
    pub line: H2hLine,
}

/// Season head-to-head matrix over every pair of teams that met.
#[derive(Debug, Clone, Default)]
pub struct HeadToHeadTable {
    // Keyed by (low id, high id); the stored line is from the low id's
    // perspective.
    lines: HashMap<(TeamId, TeamId), H2hLine>,
}

impl HeadToHeadTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = H2hEntry>,
    {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry.team, entry.opponent, entry.line);
        }
        table
    }

    /// Record results between `a` and `b` from `a`'s perspective.
    /// Repeated inserts for the same pair accumulate.
    pub fn insert(&mut self, a: TeamId, b: TeamId, line: H2hLine) {
        let (key, oriented) = if a <= b { ((a, b), line) } else { ((b, a), line.reversed()) };
        self.lines.entry(key).or_default().accumulate(&oriented);
    }

    /// Results between `a` and `b` from `a`'s perspective, if they met.
    pub fn get(&self, a: TeamId, b: TeamId) -> Option<H2hLine> {
        if a <= b {
            self.lines.get(&(a, b)).copied()
        } else {
            self.lines.get(&(b, a)).map(|line| line.reversed())
        }
    }

    pub fn games_between(&self, a: TeamId, b: TeamId) -> u32 {
        self.get(a, b).map(|line| line.games()).unwrap_or(0)
    }

    /// Every opponent `team` has a line against.
    pub fn opponents_of(&self, team: TeamId) -> impl Iterator<Item = TeamId> + '_ {
        self.lines.keys().filter_map(move |&(low, high)| {
            if low == team {
                Some(high)
            } else if high == team {
                Some(low)
            } else {
                None
            }
        })
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_reverses_orientation_for_the_higher_id() {
        let mut table = HeadToHeadTable::new();
        table.insert(3, 7, H2hLine::new(2, 1, 0, 1, 0));

        let forward = table.get(3, 7).unwrap();
        assert_eq!(forward, H2hLine::new(2, 1, 0, 1, 0));

        let backward = table.get(7, 3).unwrap();
        assert_eq!(backward, H2hLine::new(1, 2, 0, 0, 1));
    }

    #[test]
    fn insert_from_higher_id_perspective_is_canonicalized() {
        let mut table = HeadToHeadTable::new();
        table.insert(9, 2, H2hLine::new(3, 0, 1, 0, 0));

        let from_two = table.get(2, 9).unwrap();
        assert_eq!(from_two, H2hLine::new(0, 3, 1, 0, 0));
    }

    #[test]
    fn repeated_inserts_accumulate() {
        let mut table = HeadToHeadTable::new();
        table.insert(1, 2, H2hLine::new(1, 0, 0, 0, 0));
        table.insert(2, 1, H2hLine::new(1, 0, 0, 0, 0));

        let line = table.get(1, 2).unwrap();
        assert_eq!(line, H2hLine::new(1, 1, 0, 0, 0));
        assert_eq!(table.games_between(1, 2), 2);
    }

    #[test]
    fn from_entries_builds_the_table_from_store_rows() {
        let rows = serde_json::json!([
            { "team": 4, "opponent": 1, "won": 1, "lost": 0, "tied": 0, "otw": 0, "otl": 1 }
        ]);
        let entries: Vec<H2hEntry> = serde_json::from_value(rows).unwrap();
        let table = HeadToHeadTable::from_entries(entries);
        assert_eq!(table.get(1, 4).unwrap(), H2hLine::new(0, 1, 0, 1, 0));
    }

    #[test]
    fn opponents_of_sees_both_orientations() {
        let mut table = HeadToHeadTable::new();
        table.insert(1, 2, H2hLine::new(1, 0, 0, 0, 0));
        table.insert(3, 1, H2hLine::new(0, 1, 0, 0, 0));

        let mut opponents: Vec<TeamId> = table.opponents_of(1).collect();
        opponents.sort_unstable();
        assert_eq!(opponents, vec![2, 3]);
    }
}
