//! End-to-end test: malformed documents abort the load with a typed error.

use std::rc::Rc;
use transc_kinetics::{Competition, KineticsError, Mode, PromoterContainer};
use transc_params::{ConfigNode, ParamError};
use transc_tests::{init_tracing, promoter_node};

fn system(section: ConfigNode) -> transc_params::NodeRef {
    ConfigNode::new("System").with_child(section).into_ref()
}

#[test]
fn unknown_rate_function() {
    let root = system(
        ConfigNode::new("Promoters")
            .with_child(promoter_node("eve", "Hill", &[("A", 1.0, true), ("B", 0.0, false)])),
    );
    let err = PromoterContainer::read(&root, Rc::new(Mode::default())).unwrap_err();
    assert!(matches!(err, KineticsError::UnknownRateFunction(ref f) if f == "Hill"));
    assert!(err.to_string().contains("Hill"));
}

#[test]
fn missing_rate_parameter() {
    let root = system(
        ConfigNode::new("Promoters").with_child(promoter_node(
            "hb",
            "Exponential",
            &[("Q", 1.0, true), ("Theta", 0.0, false)],
        )),
    );
    assert!(matches!(
        PromoterContainer::read(&root, Rc::new(Mode::default())),
        Err(KineticsError::Param(ParamError::MissingChild { .. }))
    ));
}

#[test]
fn unparsable_value() {
    let mut bad = promoter_node("eve", "Linear", &[("A", 1.0, true), ("B", 0.0, false)]);
    bad.children[0].borrow_mut().set_attr("value", "fast");
    let root = system(ConfigNode::new("Promoters").with_child(bad));
    assert!(matches!(
        PromoterContainer::read(&root, Rc::new(Mode::default())),
        Err(KineticsError::Param(ParamError::InvalidAttribute { .. }))
    ));
}

#[test]
fn unknown_proportionality() {
    init_tracing();
    let root = system(
        ConfigNode::new("Competition")
            .with_child(ConfigNode::new("NProportionality").with_attr("value", "average")),
    );
    assert!(matches!(
        Competition::read(&root, Rc::new(Mode::default())),
        Err(KineticsError::UnknownProportionality(_))
    ));
}

#[test]
fn invalid_mode_json() {
    assert!(matches!(
        Mode::from_json("{ window: 1 }"),
        Err(KineticsError::InvalidMode(_))
    ));
}
