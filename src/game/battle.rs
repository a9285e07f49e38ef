//! Battle resolution between two generals.
//!
//! The resolver compares aggregate army strengths once, up front, then
//! applies the outcome in place: loot and an experience sweep for the
//! winner's side, attrition and casualty burial for the loser's, or a
//! random culling of one soldier per side on a draw. It never creates
//! soldiers, and gold only moves on a decisive outcome.

use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::{Army, General, invariants};

/// Divisor applied to the loser's gold to compute the winner's loot.
/// At 10, a defeat forfeits a tenth of the treasury, rounded down.
const LOOT_DIVISOR: u32 = 10;

/// Outcome of a single battle, as reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// The attacker's army was stronger.
    AttackerVictory {
        /// Gold transferred from the defender to the attacker.
        loot: u32,
        /// Defender soldiers removed after losing their last experience.
        defender_casualties: usize,
    },
    /// The defender's army was stronger.
    DefenderVictory {
        /// Gold transferred from the attacker to the defender.
        loot: u32,
        /// Attacker soldiers removed after losing their last experience.
        attacker_casualties: usize,
    },
    /// Equal strength: each non-empty army loses one soldier, chosen
    /// uniformly at random; no gold changes hands.
    Draw {
        /// Whether the attacker's army lost a soldier.
        attacker_culled: bool,
        /// Whether the defender's army lost a soldier.
        defender_culled: bool,
    },
}

/// Resolve a battle between two generals, mutating both in place.
///
/// The random generator is the injected uniform-selection service; it is
/// consulted only on a draw, attacker side first, and each side's pick is
/// independent of the other's.
pub fn resolve_battle<R: Rng>(
    attacker: &mut General,
    defender: &mut General,
    rng: &mut R,
) -> BattleOutcome {
    let outcome = match attacker.army_strength().cmp(&defender.army_strength()) {
        Ordering::Greater => {
            let (loot, defender_casualties) = claim_victory(attacker, defender);
            BattleOutcome::AttackerVictory {
                loot,
                defender_casualties,
            }
        }
        Ordering::Less => {
            let (loot, attacker_casualties) = claim_victory(defender, attacker);
            BattleOutcome::DefenderVictory {
                loot,
                attacker_casualties,
            }
        }
        Ordering::Equal => BattleOutcome::Draw {
            attacker_culled: cull_random(attacker.army_mut(), rng),
            defender_culled: cull_random(defender.army_mut(), rng),
        },
    };

    invariants::assert_invariants(attacker);
    invariants::assert_invariants(defender);
    outcome
}

/// Apply victory effects: loot transfer, an experience sweep over the
/// winner's army, attrition and burial over the loser's.
///
/// Returns the loot taken and the loser's casualty count.
fn claim_victory(winner: &mut General, loser: &mut General) -> (u32, usize) {
    let loot = loser.gold() / LOOT_DIVISOR;
    loser.debit_gold(loot);
    winner.credit_gold(loot);

    for soldier in winner.army_mut() {
        soldier.gain_experience();
    }
    for soldier in loser.army_mut() {
        soldier.lose_experience();
    }
    let casualties = loser.army_mut().bury_dead();

    (loot, casualties)
}

/// Remove one uniformly random soldier from a non-empty army.
///
/// Returns whether a soldier was removed.
fn cull_random<R: Rng>(army: &mut Army, rng: &mut R) -> bool {
    if army.is_empty() {
        return false;
    }
    let index = rng.gen_range(0..army.len());
    army.remove(index);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Rank, Soldier};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn test_attacker_victory_effects() {
        let mut attacker = General::from_parts(
            "A".to_owned(),
            100,
            vec![Soldier::with_experience(Rank::Major, 10)],
        );
        let mut defender = General::from_parts(
            "D".to_owned(),
            95,
            vec![Soldier::with_experience(Rank::Private, 4)],
        );

        let outcome = resolve_battle(&mut attacker, &mut defender, &mut rng());

        assert_eq!(
            outcome,
            BattleOutcome::AttackerVictory {
                loot: 9,
                defender_casualties: 0,
            }
        );
        assert_eq!(attacker.gold(), 109);
        assert_eq!(defender.gold(), 86);
        // The winning Major gains a point; the losing Private loses one.
        assert_eq!(attacker.army().get(0).unwrap().experience(), 11);
        assert_eq!(defender.army().get(0).unwrap().experience(), 3);
    }

    #[test]
    fn test_defender_victory_mirrors_attacker_victory() {
        let mut attacker = General::from_parts(
            "A".to_owned(),
            990,
            vec![Soldier::new(Rank::Private)],
        );
        let mut defender = General::from_parts(
            "D".to_owned(),
            970,
            vec![Soldier::new(Rank::Captain)],
        );

        let outcome = resolve_battle(&mut attacker, &mut defender, &mut rng());

        assert_eq!(
            outcome,
            BattleOutcome::DefenderVictory {
                loot: 99,
                attacker_casualties: 1,
            }
        );
        assert_eq!(attacker.gold(), 891);
        assert_eq!(defender.gold(), 1069);
        assert!(attacker.army().is_empty());
        assert_eq!(defender.army().get(0).unwrap().experience(), 2);
    }

    #[test]
    fn test_loot_rounds_down_and_can_be_zero() {
        let mut attacker = General::from_parts(
            "A".to_owned(),
            50,
            vec![Soldier::new(Rank::Private)],
        );
        let mut defender = General::from_parts("D".to_owned(), 9, Vec::new());

        let outcome = resolve_battle(&mut attacker, &mut defender, &mut rng());

        assert_eq!(
            outcome,
            BattleOutcome::AttackerVictory {
                loot: 0,
                defender_casualties: 0,
            }
        );
        assert_eq!(attacker.gold(), 50);
        assert_eq!(defender.gold(), 9);
    }

    #[test]
    fn test_casualties_are_buried() {
        let mut attacker = General::from_parts(
            "A".to_owned(),
            0,
            vec![Soldier::with_experience(Rank::Major, 5)],
        );
        let mut defender = General::from_parts(
            "D".to_owned(),
            0,
            vec![
                Soldier::with_experience(Rank::Private, 1),
                Soldier::with_experience(Rank::Private, 2),
                Soldier::with_experience(Rank::Corporal, 1),
            ],
        );

        let outcome = resolve_battle(&mut attacker, &mut defender, &mut rng());

        assert_eq!(
            outcome,
            BattleOutcome::AttackerVictory {
                loot: 0,
                defender_casualties: 2,
            }
        );
        // Only the 2-experience Private survives, at 1 experience.
        assert_eq!(defender.army().len(), 1);
        let survivor = defender.army().get(0).unwrap();
        assert_eq!(survivor.rank(), Rank::Private);
        assert_eq!(survivor.experience(), 1);
    }

    #[test]
    fn test_victory_sweep_can_promote() {
        let mut attacker = General::from_parts(
            "A".to_owned(),
            0,
            vec![Soldier::with_experience(Rank::Private, 4)],
        );
        let mut defender = General::from_parts("D".to_owned(), 0, Vec::new());

        resolve_battle(&mut attacker, &mut defender, &mut rng());

        let veteran = attacker.army().get(0).unwrap();
        assert_eq!(veteran.rank(), Rank::Corporal);
        assert_eq!(veteran.experience(), 1);
    }

    #[test]
    fn test_draw_culls_one_from_each_side() {
        let mut attacker = General::from_parts(
            "A".to_owned(),
            500,
            vec![Soldier::new(Rank::Private), Soldier::new(Rank::Private)],
        );
        let mut defender = General::from_parts(
            "D".to_owned(),
            700,
            vec![Soldier::new(Rank::Corporal)],
        );

        let outcome = resolve_battle(&mut attacker, &mut defender, &mut rng());

        assert_eq!(
            outcome,
            BattleOutcome::Draw {
                attacker_culled: true,
                defender_culled: true,
            }
        );
        assert_eq!(attacker.army().len(), 1);
        assert!(defender.army().is_empty());
        // No gold moves on a draw.
        assert_eq!(attacker.gold(), 500);
        assert_eq!(defender.gold(), 700);
        // Survivors keep their experience untouched.
        assert_eq!(attacker.army().get(0).unwrap().experience(), 1);
    }

    #[test]
    fn test_draw_between_empty_armies() {
        let mut attacker = General::new("A", 100);
        let mut defender = General::new("D", 200);

        let outcome = resolve_battle(&mut attacker, &mut defender, &mut rng());

        assert_eq!(
            outcome,
            BattleOutcome::Draw {
                attacker_culled: false,
                defender_culled: false,
            }
        );
        assert_eq!(attacker.gold(), 100);
        assert_eq!(defender.gold(), 200);
    }

    #[test]
    fn test_draw_is_deterministic_per_seed() {
        let build = || {
            (
                General::from_parts(
                    "A".to_owned(),
                    0,
                    vec![
                        Soldier::new(Rank::Private),
                        Soldier::new(Rank::Private),
                        Soldier::new(Rank::Private),
                        Soldier::new(Rank::Private),
                    ],
                ),
                General::from_parts(
                    "D".to_owned(),
                    0,
                    vec![
                        Soldier::new(Rank::Corporal),
                        Soldier::new(Rank::Corporal),
                    ],
                ),
            )
        };

        let (mut a1, mut d1) = build();
        let (mut a2, mut d2) = build();

        let out1 = resolve_battle(&mut a1, &mut d1, &mut SmallRng::seed_from_u64(7));
        let out2 = resolve_battle(&mut a2, &mut d2, &mut SmallRng::seed_from_u64(7));

        assert_eq!(out1, out2);
        assert_eq!(a1, a2);
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_outcome_serializes_for_front_ends() {
        let outcome = BattleOutcome::AttackerVictory {
            loot: 99,
            defender_casualties: 1,
        };
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "AttackerVictory": { "loot": 99, "defender_casualties": 1 }
            })
        );

        let back: BattleOutcome = serde_json::from_value(json).unwrap();
        assert_eq!(back, outcome);
    }
}
