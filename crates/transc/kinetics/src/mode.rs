use crate::error::KineticsResult;
use serde::{Deserialize, Serialize};

/// Run-wide settings shared by every promoter and competition group.
///
/// Competition parameters absent from the input default from here, and
/// `precision` sets the significant digits used when values are written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mode {
    /// Competition window width (bp).
    pub window: f64,
    /// Offset of the competition window (bp).
    pub shift: f64,
    /// Competition specificity.
    pub n: f64,
    /// Competition threshold.
    pub t: f64,
    /// Significant digits for persisted values.
    pub precision: usize,
}

impl Default for Mode {
    fn default() -> Self {
        Self {
            window: 100.0,
            shift: 0.0,
            n: 1.0,
            t: 0.5,
            precision: 8,
        }
    }
}

impl Mode {
    pub fn from_json(json: &str) -> KineticsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn window(&self) -> f64 {
        self.window
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }

    pub fn n(&self) -> f64 {
        self.n
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn precision(&self) -> usize {
        self.precision
    }
}
