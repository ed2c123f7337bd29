//! Property tests: after a read, the bounds flag agrees with the limits.

use proptest::prelude::*;
use transc_params::{ParamKind, Parameter};
use transc_tests::scalar_node;

proptest! {
    #[test]
    fn real_flag_matches_limits(
        value in -100.0f64..100.0,
        low in -50.0f64..0.0,
        high in 0.0f64..50.0,
        anneal in any::<bool>(),
    ) {
        let node = scalar_node("X", value, low, high, anneal).into_ref();
        let mut p = Parameter::from_node(ParamKind::Real, &node, "x", "Test").unwrap();
        let outside = value < low || value > high;
        prop_assert_eq!(p.is_out_of_bounds(), outside);
        prop_assert_eq!(p.check_limits(), outside);
        prop_assert_eq!(p.is_annealed(), anneal);
        prop_assert_eq!(p.previous(), p.value());
    }

    #[test]
    fn int_flag_matches_limits(value in -100i64..100, low in -50i64..0, high in 0i64..50) {
        let node = scalar_node("N", value as f64, low as f64, high as f64, true).into_ref();
        let mut p = Parameter::from_node(ParamKind::Int, &node, "n", "Test").unwrap();
        let outside = value < low || value > high;
        prop_assert_eq!(p.check_limits(), outside);
    }

    #[test]
    fn tweak_flag_is_never_clamped(value in 0.0f64..10.0, delta in -30.0f64..30.0) {
        let node = scalar_node("X", value, 0.0, 10.0, true).into_ref();
        let mut p = Parameter::from_node(ParamKind::Real, &node, "x", "Test").unwrap();
        p.tweak(delta);
        let now = value + delta;
        prop_assert_eq!(p.as_f64(), Some(now));
        prop_assert_eq!(p.is_out_of_bounds(), !(0.0..=10.0).contains(&now));
    }

    #[test]
    fn scramble_lands_within_limits(low in -50.0f64..0.0, high in 0.0f64..50.0, u in 0.0f64..0.999) {
        let node = scalar_node("X", 0.0, low, high, true).into_ref();
        let mut p = Parameter::from_node(ParamKind::Real, &node, "x", "Test").unwrap();
        prop_assert!(p.scramble(u).is_ok());
        let v = p.as_f64().unwrap();
        prop_assert!(v >= low && v <= high);
        prop_assert!(node.borrow().attr("value").is_some());
    }
}
