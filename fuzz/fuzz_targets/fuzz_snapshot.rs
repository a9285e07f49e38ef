#![no_main]

use libfuzzer_sys::fuzz_target;
use muster::snapshot;

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes must never panic: it either yields a
    // general or a corrupt-snapshot error.
    if let Ok(general) = snapshot::decode(data) {
        // Whatever decodes must re-encode to an equivalent snapshot.
        let bytes = snapshot::encode(&general);
        let reloaded = snapshot::decode(&bytes).expect("re-encoded snapshot must decode");
        assert_eq!(general, reloaded);

        // A decoded army is live by definition.
        for soldier in general.army() {
            assert!(soldier.is_alive(), "dead soldier escaped the decoder");
        }
    }
});
