//! # standings_core - Deterministic League Standings Engine
//!
//! Computes a total, reproducible ranking of the teams in a season-long
//! competition from caller-supplied record snapshots and a configurable,
//! ordered list of tie-break rules (head-to-head, divisional and
//! conference records, common opponents, strength of schedule and
//! victory, division-winner precedence, and a deterministic coin flip).
//! Also ships the small arithmetic formula compiler that lets a league
//! score teams by a custom points formula instead of win percentage.
//!
//! ## Properties
//! - 100% deterministic: same snapshots, same order — rankings feed
//!   playoff seeding and must not flicker between invocations
//! - Pure: no I/O, no stored state mutated, everything built per call
//! - Total: the coin-flip backstop guarantees a strict order
//!
//! The caller owns persistence and snapshotting; this crate never reads
//! the league store itself.

pub mod config;
pub mod formula;
pub mod models;
pub mod ranking;

// Re-export the main API surface
pub use config::RankingConfig;
pub use formula::{compile, compile_cached, CompiledFormula, FormulaEvalError, FormulaSyntaxError};
pub use models::{H2hEntry, H2hLine, HeadToHeadTable, RecordLine, TeamId, TeamRecord};
pub use ranking::{
    break_ties, division_ranks, order_teams, RankingOptions, ScoreProvider, Tiebreaker,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
