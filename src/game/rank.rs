//! The rank ladder: power multipliers, costs, and promotion succession.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Multiplier applied to a rank's power to get its promotion threshold.
/// A soldier promotes upon reaching `power * PROMOTION_FACTOR` experience.
const PROMOTION_FACTOR: u32 = 5;

/// Multiplier applied to a rank's power to get its recruiting price.
const RECRUIT_COST_FACTOR: u32 = 10;

/// The ordered ladder of soldier ranks.
///
/// The discriminant is the rank's power multiplier; it also scales
/// recruiting and training costs and doubles as the wire code in
/// snapshots. `Major` is terminal and has no successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    /// Lowest rank, power 1.
    Private = 1,
    /// Power 2.
    Corporal = 2,
    /// Power 3, the highest directly recruitable rank.
    Captain = 3,
    /// Terminal rank, power 4; reachable only through promotion.
    Major = 4,
}

impl Rank {
    /// All ranks, in ascending order.
    pub const ALL: [Rank; 4] = [Rank::Private, Rank::Corporal, Rank::Captain, Rank::Major];

    /// Power multiplier for strength and cost scaling.
    #[must_use]
    pub const fn power(self) -> u32 {
        self as u32
    }

    /// The next rank up, or `None` at the terminal rank.
    #[must_use]
    pub const fn successor(self) -> Option<Rank> {
        match self {
            Rank::Private => Some(Rank::Corporal),
            Rank::Corporal => Some(Rank::Captain),
            Rank::Captain => Some(Rank::Major),
            Rank::Major => None,
        }
    }

    /// Experience at which a soldier of this rank promotes.
    ///
    /// Meaningful for non-terminal ranks only: a `Major` accumulates
    /// experience past this value without promoting.
    #[must_use]
    pub const fn promotion_threshold(self) -> u32 {
        self.power() * PROMOTION_FACTOR
    }

    /// Gold price to recruit a fresh soldier of this rank.
    #[must_use]
    pub const fn recruit_cost(self) -> u32 {
        self.power() * RECRUIT_COST_FACTOR
    }

    /// Gold price to train one soldier of this rank once.
    #[must_use]
    pub const fn training_cost(self) -> u32 {
        self.power()
    }

    /// Whether this rank can be recruited directly.
    #[must_use]
    pub const fn is_recruitable(self) -> bool {
        !matches!(self, Rank::Major)
    }

    /// Single-byte code used in the snapshot wire format.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a snapshot wire code back into a rank.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Rank> {
        match code {
            1 => Some(Rank::Private),
            2 => Some(Rank::Corporal),
            3 => Some(Rank::Captain),
            4 => Some(Rank::Major),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rank::Private => "Private",
            Rank::Corporal => "Corporal",
            Rank::Captain => "Captain",
            Rank::Major => "Major",
        };
        f.write_str(name)
    }
}
