//! End-to-end test: load a model document, bind promoters and competition,
//! write everything back and reload it unchanged.

use std::rc::Rc;
use transc_kinetics::{Aggregation, Competition, Mode, PromoterContainer, RateFunctionKind};
use transc_params::{ConfigNode, NodeRef, ParameterSource};
use transc_tests::{init_tracing, MODEL_JSON};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn mode() -> Rc<Mode> {
    let json = r#"{"window": 90.0, "shift": 3.0, "n": 2.0, "t": 0.6, "precision": 6}"#;
    Rc::new(Mode::from_json(json).unwrap())
}

fn load(root: &NodeRef) -> (PromoterContainer, Competition) {
    let promoters = PromoterContainer::read(root, mode()).unwrap();
    let competition = Competition::read(root, mode()).unwrap();
    (promoters, competition)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn load_binds_every_entity() {
    init_tracing();
    let root = ConfigNode::from_json(MODEL_JSON).unwrap();
    let (promoters, competition) = load(&root);

    assert_eq!(promoters.len(), 2);
    let eve = promoters.get("eve").unwrap();
    assert_eq!(eve.kind(), RateFunctionKind::Linear);
    assert_eq!(eve.rate(4.0), 11.0);

    let hb = promoters.get("hb").unwrap();
    assert_eq!(hb.param("Q").unwrap().borrow().move_func(), "Tweak");
    assert_eq!(hb.param("Rmax").unwrap().borrow().move_func(), "ResetAll");
    let half = hb.rate(4.0 / 1.5);
    assert!((half - 127.5).abs() < 1e-9);

    assert_eq!(competition.window(), 120.0);
    assert_eq!(competition.threshold(), 0.4);
    assert_eq!(competition.shift(), 3.0);
    assert_eq!(competition.specificity(), 2.0);
    assert_eq!(competition.background(), 0.0);
    assert_eq!(competition.aggregation(), Aggregation::Product);
}

#[test]
fn annealed_parameters_follow_owner_order() {
    let root = ConfigNode::from_json(MODEL_JSON).unwrap();
    let (promoters, competition) = load(&root);

    let mut annealed = promoters.annealed_parameters();
    competition.collect_annealed(&mut annealed);
    assert_eq!(
        annealed.names(),
        vec!["eve A", "hb Q", "hb Theta", "Window", "CompThreshold"]
    );

    let mut all = promoters.all_parameters();
    competition.collect_all(&mut all);
    assert_eq!(all.len(), 5 + 7);
}

#[test]
fn write_then_reload_is_stable() {
    init_tracing();
    let root = ConfigNode::from_json(MODEL_JSON).unwrap();
    let (promoters, competition) = load(&root);

    let out = ConfigNode::new("System").into_ref();
    promoters.write(&out).unwrap();
    competition.write(&out).unwrap();

    let json = out.borrow().to_json().unwrap();
    let reloaded = ConfigNode::from_json(&json).unwrap();
    let (promoters2, competition2) = load(&reloaded);

    for m in [0.0, 0.5, 2.0, 7.5] {
        for name in ["eve", "hb"] {
            assert_eq!(
                promoters.get(name).unwrap().rate(m),
                promoters2.get(name).unwrap().rate(m)
            );
        }
    }
    assert_eq!(competition2.window(), competition.window());
    assert_eq!(competition2.interaction_strength(), 1.0);
    assert_eq!(competition2.aggregation(), Aggregation::Product);
    assert_eq!(
        competition2.annealed_parameters().names(),
        competition.annealed_parameters().names()
    );
}
