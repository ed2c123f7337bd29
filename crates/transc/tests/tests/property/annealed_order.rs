//! Property tests: collecting annealed parameters returns exactly the
//! flagged subset in enumeration order.

use proptest::prelude::*;
use transc_params::{handle, Parameter, ParameterCollection, ParameterSource};

fn collection(flags: &[bool]) -> ParameterCollection {
    flags
        .iter()
        .enumerate()
        .map(|(i, &anneal)| {
            let mut p = Parameter::real(format!("p{}", i), "Test", i as f64);
            p.set_annealed(anneal);
            handle(p)
        })
        .collect()
}

proptest! {
    #[test]
    fn annealed_subset_in_order(flags in prop::collection::vec(any::<bool>(), 0..40)) {
        let all = collection(&flags);
        let expected: Vec<String> = flags
            .iter()
            .enumerate()
            .filter(|(_, &anneal)| anneal)
            .map(|(i, _)| format!("p{}", i))
            .collect();
        prop_assert_eq!(all.annealed_parameters().names(), expected);
        prop_assert_eq!(all.all_parameters().len(), flags.len());
    }

    #[test]
    fn collecting_appends_without_clearing(
        first in prop::collection::vec(any::<bool>(), 0..20),
        second in prop::collection::vec(any::<bool>(), 0..20),
    ) {
        let mut out = ParameterCollection::new();
        collection(&first).collect_annealed(&mut out);
        let before = out.len();
        collection(&second).collect_annealed(&mut out);
        let added = second.iter().filter(|&&a| a).count();
        prop_assert_eq!(out.len(), before + added);
    }

    #[test]
    fn collecting_never_mutates(flags in prop::collection::vec(any::<bool>(), 1..20)) {
        let all = collection(&flags);
        let _ = all.annealed_parameters();
        for (i, p) in all.iter().enumerate() {
            prop_assert_eq!(p.borrow().as_f64(), Some(i as f64));
            prop_assert_eq!(p.borrow().is_annealed(), flags[i]);
        }
    }
}
