//! Promoter competition parameters.

use crate::error::{KineticsError, KineticsResult};
use crate::mode::Mode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use tracing::warn;
use transc_params::{
    handle, NodeRef, ParamHandle, ParamKind, Parameter, ParameterCollection, ParameterSource,
};

pub const COMPETITION_TAG: &str = "Competition";
const PROPORTIONALITY_TAG: &str = "NProportionality";
const OWNER: &str = "Competition";

/// How contributions of several competitors are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Sum,
    Product,
}

impl Aggregation {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Product => "product",
        }
    }
}

impl FromStr for Aggregation {
    type Err = KineticsError;

    fn from_str(s: &str) -> KineticsResult<Self> {
        match s {
            "sum" => Ok(Self::Sum),
            "product" => Ok(Self::Product),
            other => Err(KineticsError::UnknownProportionality(other.to_string())),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One field of the competition section: its tag in the document, its
/// display name, and where its default comes from.
struct Field {
    tag: &'static str,
    display: &'static str,
    default: fn(&Mode) -> f64,
}

static FIELDS: [Field; 7] = [
    Field {
        tag: "Window",
        display: "Window",
        default: Mode::window,
    },
    Field {
        tag: "Shift",
        display: "Shift",
        default: Mode::shift,
    },
    Field {
        tag: "Specificity",
        display: "Specificity",
        default: Mode::n,
    },
    Field {
        tag: "Threshold",
        display: "CompThreshold",
        default: Mode::t,
    },
    Field {
        tag: "Background",
        display: "CompBackground",
        default: zero,
    },
    Field {
        tag: "S",
        display: "S",
        default: one,
    },
    Field {
        tag: "InteractionStrength",
        display: "InteractionStrength",
        default: one,
    },
];

fn zero(_: &Mode) -> f64 {
    0.0
}

fn one(_: &Mode) -> f64 {
    1.0
}

/// The seven real parameters governing competition between binding
/// sites inside one promoter window, plus the aggregation mode.
#[derive(Debug)]
pub struct Competition {
    window: ParamHandle,
    shift: ParamHandle,
    specificity: ParamHandle,
    threshold: ParamHandle,
    background: ParamHandle,
    s: ParamHandle,
    interaction_strength: ParamHandle,
    aggregation: Aggregation,
    mode: Rc<Mode>,
}

impl Competition {
    /// Build from the `Competition` section under `parent`.
    ///
    /// A missing section, or any missing field inside it, falls back to
    /// `mode` (window, shift, specificity, threshold) or to the constants
    /// background 0, S 1, interaction strength 1.
    pub fn read(parent: &NodeRef, mode: Rc<Mode>) -> KineticsResult<Self> {
        let section = parent.borrow().child(COMPETITION_TAG);
        if section.is_none() {
            warn!(
                window = mode.window(),
                shift = mode.shift(),
                "No competition section, using mode defaults"
            );
        }

        let field = |i: usize| read_field(section.as_ref(), &FIELDS[i], &mode);
        let window = field(0)?;
        let shift = field(1)?;
        let specificity = field(2)?;
        let threshold = field(3)?;
        let background = field(4)?;
        let s = field(5)?;
        let interaction_strength = field(6)?;
        let aggregation = read_aggregation(section.as_ref())?;

        Ok(Self {
            window,
            shift,
            specificity,
            threshold,
            background,
            s,
            interaction_strength,
            aggregation,
            mode,
        })
    }

    /// Append a `Competition` section under `parent` holding all seven
    /// parameters and the aggregation mode.
    pub fn write(&self, parent: &NodeRef) -> KineticsResult<NodeRef> {
        let section = parent.borrow_mut().add_child(COMPETITION_TAG);
        for (field, param) in FIELDS.iter().zip(self.fields()) {
            let node = section.borrow_mut().add_child(field.tag);
            param.borrow().write(&node, self.mode.precision())?;
        }
        section
            .borrow_mut()
            .add_child(PROPORTIONALITY_TAG)
            .borrow_mut()
            .set_attr("value", self.aggregation.name());
        Ok(section)
    }

    fn fields(&self) -> [&ParamHandle; 7] {
        [
            &self.window,
            &self.shift,
            &self.specificity,
            &self.threshold,
            &self.background,
            &self.s,
            &self.interaction_strength,
        ]
    }

    pub fn window(&self) -> f64 {
        live(&self.window)
    }

    pub fn shift(&self) -> f64 {
        live(&self.shift)
    }

    pub fn specificity(&self) -> f64 {
        live(&self.specificity)
    }

    pub fn threshold(&self) -> f64 {
        live(&self.threshold)
    }

    pub fn background(&self) -> f64 {
        live(&self.background)
    }

    pub fn s(&self) -> f64 {
        live(&self.s)
    }

    pub fn interaction_strength(&self) -> f64 {
        live(&self.interaction_strength)
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Handle to a field by its document tag.
    pub fn param(&self, tag: &str) -> Option<&ParamHandle> {
        FIELDS
            .iter()
            .zip(self.fields())
            .find(|(field, _)| field.tag == tag)
            .map(|(_, param)| param)
    }

    /// Aggregate competitor contributions. An empty slice yields the
    /// identity of the mode (0 for sum, 1 for product).
    pub fn combine(&self, contributions: &[f64]) -> f64 {
        match self.aggregation {
            Aggregation::Sum => contributions.iter().sum(),
            Aggregation::Product => contributions.iter().product(),
        }
    }
}

impl ParameterSource for Competition {
    fn collect_annealed(&self, into: &mut ParameterCollection) {
        for param in self.fields() {
            param.collect_annealed(into);
        }
    }

    fn collect_all(&self, into: &mut ParameterCollection) {
        for param in self.fields() {
            param.collect_all(into);
        }
    }
}

fn read_field(
    section: Option<&NodeRef>,
    field: &Field,
    mode: &Mode,
) -> KineticsResult<ParamHandle> {
    let node = section.and_then(|s| s.borrow().child(field.tag));
    let param = match node {
        Some(node) => Parameter::from_node(ParamKind::Real, &node, field.display, OWNER)?,
        None => {
            let value = (field.default)(mode);
            if section.is_some() {
                warn!(field = field.tag, value, "Competition field missing, using default");
            }
            Parameter::real(field.display, OWNER, value)
        }
    };
    Ok(handle(param))
}

fn read_aggregation(section: Option<&NodeRef>) -> KineticsResult<Aggregation> {
    let Some(node) = section.and_then(|s| s.borrow().child(PROPORTIONALITY_TAG)) else {
        return Ok(Aggregation::Sum);
    };
    let value = node
        .borrow()
        .attr("value")
        .unwrap_or(Aggregation::Sum.name())
        .to_string();
    value.parse()
}

fn live(param: &ParamHandle) -> f64 {
    param.borrow().as_f64().unwrap_or(f64::NAN)
}
