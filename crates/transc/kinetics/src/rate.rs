//! Rate function registry.
//!
//! Each kinetic formula maps an occupancy `M` to a transcription rate using
//! a fixed set of named parameters. [`bind`] closes a formula over the live
//! parameter handles of a promoter, so the callable always evaluates with
//! whatever values the parameters hold at call time.

use crate::error::{KineticsError, KineticsResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use transc_params::ParamHandle;

/// Occupancy-to-rate callable.
pub type RateFn = Box<dyn Fn(f64) -> f64>;

const EXPONENTIAL_PARAMS: &[&str] = &["Q", "Rmax", "Theta"];
const LINEAR_PARAMS: &[&str] = &["A", "B"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateFunctionKind {
    /// `max·e^(QM−θ) / (1 + e^(QM−θ))`. Overflows for large `QM−θ`.
    Arrhenius,
    /// `max / (1 + e^(θ−QM))`. Same curve as `Arrhenius`, numerically stable.
    Arrhenius2,
    /// `min(max, e^(QM−θ))`.
    Exponential,
    /// `M·A + B`.
    Linear,
}

impl RateFunctionKind {
    pub const ALL: [Self; 4] = [
        Self::Arrhenius,
        Self::Arrhenius2,
        Self::Exponential,
        Self::Linear,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Arrhenius => "Arrhenius",
            Self::Arrhenius2 => "Arrhenius2",
            Self::Exponential => "Exponential",
            Self::Linear => "Linear",
        }
    }

    /// Sub-parameters this formula needs, in the order `evaluate` expects.
    pub fn parameter_names(self) -> &'static [&'static str] {
        match self {
            Self::Linear => LINEAR_PARAMS,
            _ => EXPONENTIAL_PARAMS,
        }
    }

    /// Evaluate with explicit arguments ordered as `parameter_names`.
    /// Missing arguments read as NaN.
    pub fn evaluate(self, m: f64, args: &[f64]) -> f64 {
        let arg = |i: usize| args.get(i).copied().unwrap_or(f64::NAN);
        match self {
            Self::Linear => linear(m, arg(0), arg(1)),
            Self::Arrhenius => arrhenius(m, arg(1), arg(2), arg(0)),
            Self::Arrhenius2 => arrhenius2(m, arg(1), arg(2), arg(0)),
            Self::Exponential => exponential(m, arg(1), arg(2), arg(0)),
        }
    }
}

impl FromStr for RateFunctionKind {
    type Err = KineticsError;

    fn from_str(s: &str) -> KineticsResult<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| KineticsError::UnknownRateFunction(s.to_string()))
    }
}

impl fmt::Display for RateFunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn arrhenius(m: f64, max: f64, theta: f64, q: f64) -> f64 {
    let e = (q * m - theta).exp();
    max * e / (1.0 + e)
}

pub fn arrhenius2(m: f64, max: f64, theta: f64, q: f64) -> f64 {
    max / (1.0 + (theta - q * m).exp())
}

pub fn exponential(m: f64, max: f64, theta: f64, q: f64) -> f64 {
    let e = (q * m - theta).exp();
    if e > max {
        max
    } else {
        e
    }
}

pub fn linear(m: f64, a: f64, b: f64) -> f64 {
    m * a + b
}

/// Close `kind` over the handles in `params`. Values are read on every
/// call, never captured.
pub fn bind(
    kind: RateFunctionKind,
    promoter: &str,
    params: &BTreeMap<String, ParamHandle>,
) -> KineticsResult<RateFn> {
    let lookup = |name: &str| {
        params
            .get(name)
            .map(ParamHandle::clone)
            .ok_or_else(|| KineticsError::MissingParameter {
                promoter: promoter.to_string(),
                param: name.to_string(),
            })
    };

    let rate: RateFn = match kind {
        RateFunctionKind::Linear => {
            let (a, b) = (lookup("A")?, lookup("B")?);
            Box::new(move |m| linear(m, live(&a), live(&b)))
        }
        RateFunctionKind::Arrhenius
        | RateFunctionKind::Arrhenius2
        | RateFunctionKind::Exponential => {
            let formula: fn(f64, f64, f64, f64) -> f64 = match kind {
                RateFunctionKind::Arrhenius => arrhenius,
                RateFunctionKind::Arrhenius2 => arrhenius2,
                _ => exponential,
            };
            let (q, rmax, theta) = (lookup("Q")?, lookup("Rmax")?, lookup("Theta")?);
            Box::new(move |m| formula(m, live(&rmax), live(&theta), live(&q)))
        }
    };
    Ok(rate)
}

fn live(param: &ParamHandle) -> f64 {
    param.borrow().as_f64().unwrap_or(f64::NAN)
}
