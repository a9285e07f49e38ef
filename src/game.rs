//! Game layer for Muster.
//!
//! Implements the war-game rules:
//! - Rank ladder with power multipliers and promotion thresholds
//! - Soldiers as rank/experience state machines
//! - Armies as ordered rosters of live soldiers
//! - Generals who recruit, train, and command
//! - Battle resolution with loot transfer and draw culling

mod army;
mod battle;
mod general;
mod invariants;
mod rank;
mod soldier;

pub use army::Army;
pub use battle::{BattleOutcome, resolve_battle};
pub use general::General;
pub use invariants::{
    InvariantViolation, SANITY_MAX_EXPERIENCE, assert_invariants, check_invariants,
};
pub use rank::Rank;
pub use soldier::Soldier;
