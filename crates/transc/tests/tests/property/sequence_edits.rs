//! Property tests: a sequence tweak rewrites exactly
//! `clamp(ceil(|delta|), 1, len)` positions and keeps the length.

use proptest::prelude::*;
use transc_params::{Parameter, Sequence};

fn arb_sequence() -> impl Strategy<Value = Sequence> {
    "[ACGTN]{1,80}".prop_map(|s| s.parse::<Sequence>().unwrap())
}

fn expected_edits(delta: f64, len: usize) -> usize {
    (delta.abs().ceil() as usize).clamp(1, len)
}

proptest! {
    #[test]
    fn tweak_edits_exact_positions(
        seq in arb_sequence(),
        seed in any::<u64>(),
        delta in -100.0f64..100.0,
    ) {
        let mut p = Parameter::sequence("s", "Gene", seq.clone());
        p.set_seed(seed);
        p.tweak(delta);

        let now = p.value().as_sequence().unwrap();
        prop_assert_eq!(now.len(), seq.len());
        let changed = now
            .bases()
            .iter()
            .zip(seq.bases())
            .filter(|(a, b)| a != b)
            .count();
        prop_assert_eq!(changed, expected_edits(delta, seq.len()));
        prop_assert_eq!(p.previous().as_sequence(), Some(&seq));
    }

    #[test]
    fn same_seed_same_edits(seq in arb_sequence(), seed in any::<u64>(), delta in 0.0f64..20.0) {
        let mut a = Parameter::sequence("a", "Gene", seq.clone());
        let mut b = Parameter::sequence("b", "Gene", seq);
        a.set_seed(seed);
        b.set_seed(seed);
        a.tweak(delta);
        b.tweak(delta);
        prop_assert_eq!(a.value(), b.value());
    }

    #[test]
    fn scramble_keeps_length_and_alphabet(seq in arb_sequence(), u in 0.0f64..1.0) {
        let mut p = Parameter::sequence("s", "Gene", seq.clone());
        p.scramble(u).unwrap();
        let text = p.value().as_sequence().unwrap().to_string();
        prop_assert_eq!(text.len(), seq.len());
        prop_assert!(text.chars().all(|c| "ACGT".contains(c)));
        prop_assert_eq!(p.seed(), (u * 100_000.0).floor() as u64);
    }
}
