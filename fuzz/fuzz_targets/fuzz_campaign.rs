#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use muster::game::check_invariants;
use muster::{General, Rank};
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// One campaign command.
#[derive(Arbitrary, Debug)]
enum Op {
    /// Recruit a soldier; out-of-range codes exercise the error path.
    Recruit { attacker_side: bool, rank_code: u8 },
    /// Train a selection of roster indices, valid or not.
    Train {
        attacker_side: bool,
        selection: Vec<u8>,
    },
    /// Resolve a battle in either direction.
    Attack { attacker_side: bool },
    /// Round-trip the attacker through the snapshot wire format.
    Roundtrip,
}

/// Structured input for campaign fuzzing.
#[derive(Arbitrary, Debug)]
struct CampaignInput {
    gold_a: u16,
    gold_b: u16,
    seed: u64,
    ops: Vec<Op>,
}

fuzz_target!(|input: CampaignInput| {
    let mut a = General::new("A", u32::from(input.gold_a));
    let mut b = General::new("B", u32::from(input.gold_b));
    let mut rng = SmallRng::seed_from_u64(input.seed);

    for op in input.ops.iter().take(64) {
        match op {
            Op::Recruit {
                attacker_side,
                rank_code,
            } => {
                if let Some(rank) = Rank::from_code(rank_code % 6) {
                    let general = if *attacker_side { &mut a } else { &mut b };
                    // Errors are expected here; panics are not.
                    let _ = general.recruit(rank);
                }
            }
            Op::Train {
                attacker_side,
                selection,
            } => {
                let indices: Vec<usize> =
                    selection.iter().take(16).map(|&i| usize::from(i)).collect();
                let general = if *attacker_side { &mut a } else { &mut b };
                let _ = general.train(&indices);
            }
            Op::Attack { attacker_side } => {
                if *attacker_side {
                    a.attack(&mut b, &mut rng);
                } else {
                    b.attack(&mut a, &mut rng);
                }
            }
            Op::Roundtrip => {
                let bytes = muster::snapshot::encode(&a);
                let restored =
                    muster::snapshot::decode(&bytes).expect("live state must round-trip");
                assert_eq!(a, restored);
            }
        }

        // Invariants hold after every single command.
        let violations_a = check_invariants(&a);
        assert!(violations_a.is_empty(), "invariants violated: {violations_a:?}");
        let violations_b = check_invariants(&b);
        assert!(violations_b.is_empty(), "invariants violated: {violations_b:?}");
    }
});
