//! Shared fixtures for the transc integration suites.
//!
//! Builders for the configuration documents the property and end-to-end
//! tests load, and a log subscriber for watching them run. Nothing here is
//! used outside of tests.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transc_params::{ConfigNode, POSITION_TAG};

/// Install a test-friendly subscriber once per test binary. Honours
/// `RUST_LOG`, defaulting to `debug` for the transc crates.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transc_params=debug,transc_kinetics=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .without_time(),
        )
        .try_init();
}

/// A scalar parameter node with the full attribute contract.
pub fn scalar_node(tag: &str, value: f64, low: f64, high: f64, anneal: bool) -> ConfigNode {
    ConfigNode::new(tag)
        .with_attr("value", value.to_string())
        .with_attr("lim_low", low.to_string())
        .with_attr("lim_high", high.to_string())
        .with_attr("anneal", anneal.to_string())
}

/// A `Promoter` node whose sub-parameters are given as `(tag, value, anneal)`
/// and share the limits `[-50, 50]`.
pub fn promoter_node(name: &str, function: &str, params: &[(&str, f64, bool)]) -> ConfigNode {
    params.iter().fold(
        ConfigNode::new("Promoter")
            .with_attr("name", name)
            .with_attr("function", function),
        |node, &(tag, value, anneal)| node.with_child(scalar_node(tag, value, -50.0, 50.0, anneal)),
    )
}

/// A matrix node with one `position` entry per row.
pub fn matrix_node(rows: &[[f64; 4]]) -> ConfigNode {
    rows.iter().fold(
        ConfigNode::new("PWM").with_attr("type", "PWM"),
        |node, row| {
            let text = row
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(";");
            node.with_child(ConfigNode::new(POSITION_TAG).with_text(text))
        },
    )
}

/// JSON for a small model: two promoters and a partial competition
/// section that leaves the remaining fields to the mode defaults.
pub const MODEL_JSON: &str = r#"{
  "name": "System",
  "children": [
    {
      "name": "Promoters",
      "children": [
        {
          "name": "Promoter",
          "attributes": { "name": "eve", "function": "Linear" },
          "children": [
            { "name": "A", "attributes": { "value": "2", "lim_low": "0", "lim_high": "10", "anneal": "true" } },
            { "name": "B", "attributes": { "value": "3", "lim_low": "0", "lim_high": "10", "anneal": "false" } }
          ]
        },
        {
          "name": "Promoter",
          "attributes": { "name": "hb", "function": "Arrhenius2" },
          "children": [
            { "name": "Q", "attributes": { "value": "1.5", "lim_low": "0", "lim_high": "5", "anneal": "1", "move": "Tweak" } },
            { "name": "Rmax", "attributes": { "value": "255", "lim_low": "100", "lim_high": "400", "anneal": "0" } },
            { "name": "Theta", "attributes": { "value": "4", "lim_low": "-10", "lim_high": "10", "anneal": "1" } }
          ]
        }
      ]
    },
    {
      "name": "Competition",
      "children": [
        { "name": "Window", "attributes": { "value": "120", "lim_low": "50", "lim_high": "300", "anneal": "true" } },
        { "name": "Threshold", "attributes": { "value": "0.4", "lim_low": "0", "lim_high": "1", "anneal": "true" } },
        { "name": "NProportionality", "attributes": { "value": "product" } }
      ]
    }
  ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_json_parses() {
        let root = ConfigNode::from_json(MODEL_JSON).unwrap();
        assert!(root.borrow().has_child("Promoters"));
        assert!(root.borrow().has_child("Competition"));
    }

    #[test]
    fn matrix_fixture_has_one_entry_per_row() {
        let node = matrix_node(&[[1.0, 2.0, 3.0, 4.0], [0.0; 4]]);
        assert_eq!(node.children_named(POSITION_TAG).len(), 2);
    }
}
