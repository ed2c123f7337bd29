//! Typed, bounded, annealable parameter cells.
//!
//! A [`Parameter`] wraps one value of a closed set of kinds (integer, real,
//! sequence, weight matrix) behind a single handle type so an optimizer can
//! perturb, validate, roll back and persist it without knowing the kind.
//!
//! Perturbation never clamps. A tweak that leaves the admissible range only
//! raises the `out_of_bounds` flag; rejecting the move is the caller's job.

use crate::document::NodeRef;
use crate::error::{ParamError, ParamResult};
use crate::format::{format_fixed_width, format_general};
use crate::pwm::{cell_in_range, Pwm, POSITION_TAG, PWM_CELL_LIMIT};
use crate::sequence::{Base, Sequence};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Move strategy assumed when a node does not name one.
pub const DEFAULT_MOVE: &str = "ResetAll";

/// Significant digits used when `scramble` persists a scalar.
pub const SCRAMBLE_PRECISION: usize = 5;

/// Uniform draws are scaled by this factor to reseed a parameter's stream.
const SEED_SCALE: f64 = 100_000.0;

const DEFAULT_SEED: u64 = 1;

/// Field width of one cell in a persisted matrix row.
const MATRIX_CELL_WIDTH: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    Int,
    Real,
    Sequence,
    Matrix,
}

impl ParamKind {
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Real => "double",
            Self::Sequence => "Sequence",
            Self::Matrix => "PWM",
        }
    }

    fn empty_value(self) -> ParamValue {
        match self {
            Self::Int => ParamValue::Int(0),
            Self::Real => ParamValue::Real(0.0),
            Self::Sequence => ParamValue::Sequence(Sequence::default()),
            Self::Matrix => ParamValue::Matrix(Pwm::default()),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// The value held by a parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Real(f64),
    Sequence(Sequence),
    Matrix(Pwm),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Int(_) => ParamKind::Int,
            Self::Real(_) => ParamKind::Real,
            Self::Sequence(_) => ParamKind::Sequence,
            Self::Matrix(_) => ParamKind::Matrix,
        }
    }

    /// Numeric view of scalar values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Pwm> {
        match self {
            Self::Matrix(m) => Some(m),
            _ => None,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<Sequence> for ParamValue {
    fn from(v: Sequence) -> Self {
        Self::Sequence(v)
    }
}

impl From<Pwm> for ParamValue {
    fn from(v: Pwm) -> Self {
        Self::Matrix(v)
    }
}

/// A single annealable value with one level of undo.
#[derive(Clone, Debug)]
pub struct Parameter {
    value: ParamValue,
    previous: ParamValue,
    lim_low: f64,
    lim_high: f64,
    anneal: bool,
    move_func: String,
    out_of_bounds: bool,
    seed: u64,
    rng: StdRng,
    owner: String,
    name: String,
    node: Option<NodeRef>,
}

impl Parameter {
    /// A non-annealed parameter whose limits collapse onto its scalar value.
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Self {
        let value = value.into();
        let pin = value.as_f64().unwrap_or(0.0);
        Self {
            previous: value.clone(),
            value,
            lim_low: pin,
            lim_high: pin,
            anneal: false,
            move_func: DEFAULT_MOVE.to_string(),
            out_of_bounds: false,
            seed: DEFAULT_SEED,
            rng: StdRng::seed_from_u64(DEFAULT_SEED),
            owner: owner.into(),
            name: name.into(),
            node: None,
        }
    }

    pub fn int(name: impl Into<String>, owner: impl Into<String>, value: i64) -> Self {
        Self::new(name, owner, value)
    }

    pub fn real(name: impl Into<String>, owner: impl Into<String>, value: f64) -> Self {
        Self::new(name, owner, value)
    }

    pub fn sequence(name: impl Into<String>, owner: impl Into<String>, value: Sequence) -> Self {
        Self::new(name, owner, value)
    }

    pub fn matrix(name: impl Into<String>, owner: impl Into<String>, value: Pwm) -> Self {
        Self::new(name, owner, value)
    }

    /// Construct a parameter of `kind` from a configuration node.
    pub fn from_node(
        kind: ParamKind,
        node: &NodeRef,
        name: impl Into<String>,
        owner: impl Into<String>,
    ) -> ParamResult<Self> {
        let mut param = Self::new(name, owner, kind.empty_value());
        param.read(node)?;
        Ok(param)
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn value(&self) -> &ParamValue {
        &self.value
    }

    pub fn previous(&self) -> &ParamValue {
        &self.previous
    }

    /// Current scalar value, `None` for sequences and matrices.
    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_f64()
    }

    pub fn kind(&self) -> ParamKind {
        self.value.kind()
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    pub fn lim_low(&self) -> f64 {
        self.lim_low
    }

    pub fn lim_high(&self) -> f64 {
        self.lim_high
    }

    pub fn is_annealed(&self) -> bool {
        self.anneal
    }

    pub fn move_func(&self) -> &str {
        &self.move_func
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.out_of_bounds
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn node(&self) -> Option<&NodeRef> {
        self.node.as_ref()
    }

    // ── Setters ──────────────────────────────────────────────────────

    /// Replace the current value. The kind cannot change.
    pub fn set(&mut self, value: impl Into<ParamValue>) -> ParamResult<()> {
        let value = value.into();
        if value.kind() != self.kind() {
            return Err(ParamError::KindMismatch {
                expected: self.kind(),
                found: value.kind(),
            });
        }
        self.value = value;
        Ok(())
    }

    pub fn set_limits(&mut self, low: f64, high: f64) {
        self.lim_low = low;
        self.lim_high = high;
    }

    pub fn set_annealed(&mut self, anneal: bool) {
        self.anneal = anneal;
    }

    /// Restart this parameter's private random stream.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Bind the node that `scramble` persists into. Used by owners that
    /// decode sequence or matrix nodes themselves.
    pub fn attach_node(&mut self, node: NodeRef) {
        self.node = Some(node);
    }

    // ── I/O ──────────────────────────────────────────────────────────

    /// Populate value, limits, anneal flag and move tag from `node`.
    ///
    /// Only scalar kinds can be read here; sequence and matrix nodes have a
    /// nested layout decoded by their owning entity.
    pub fn read(&mut self, node: &NodeRef) -> ParamResult<()> {
        let kind = self.kind();
        let (value, anneal, lim_low, lim_high, move_func) = {
            let n = node.borrow();
            let value = match kind {
                ParamKind::Int => ParamValue::Int(n.parse_attr("value")?),
                ParamKind::Real => ParamValue::Real(n.parse_attr("value")?),
                ParamKind::Sequence | ParamKind::Matrix => {
                    return Err(ParamError::Unsupported {
                        operation: "read",
                        kind,
                    })
                }
            };
            (
                value,
                n.parse_flag("anneal")?,
                n.parse_attr::<f64>("lim_low")?,
                n.parse_attr::<f64>("lim_high")?,
                n.parse_attr_or("move", DEFAULT_MOVE.to_string())?,
            )
        };

        self.previous = value.clone();
        self.value = value;
        self.anneal = anneal;
        self.lim_low = lim_low;
        self.lim_high = lim_high;
        self.move_func = move_func;
        self.node = Some(NodeRef::clone(node));
        self.check_limits();
        Ok(())
    }

    /// Emit value, limits, anneal flag and move tag onto `node`.
    pub fn write(&self, node: &NodeRef, precision: usize) -> ParamResult<()> {
        let value = match &self.value {
            ParamValue::Int(v) => v.to_string(),
            ParamValue::Real(v) => format_general(*v, precision),
            other => {
                return Err(ParamError::Unsupported {
                    operation: "write",
                    kind: other.kind(),
                })
            }
        };
        let mut n = node.borrow_mut();
        n.set_attr("value", value);
        n.set_attr("lim_low", format_general(self.lim_low, precision));
        n.set_attr("lim_high", format_general(self.lim_high, precision));
        n.set_attr("anneal", self.anneal.to_string());
        n.set_attr("move", self.move_func.as_str());
        Ok(())
    }

    // ── Annealing moves ──────────────────────────────────────────────

    /// Local perturbation by `delta`. The previous value is saved first.
    ///
    /// - scalars: `value += delta`, then the bounds check runs.
    /// - sequences: `clamp(ceil(|delta|), 1, len)` distinct positions are
    ///   each rewritten to a different base drawn from the private stream.
    /// - matrices: one random cell receives `delta`; the flag reports whether
    ///   that cell left `[-10, 10]`.
    pub fn tweak(&mut self, delta: f64) {
        self.previous = self.value.clone();
        match &mut self.value {
            ParamValue::Int(v) => {
                *v = (*v as f64 + delta).trunc() as i64;
                self.check_limits();
            }
            ParamValue::Real(v) => {
                *v += delta;
                self.check_limits();
            }
            ParamValue::Sequence(seq) => {
                let len = seq.len();
                if len > 0 {
                    let edits = sequence_edit_count(delta, len);
                    let bases = seq.bases_mut();
                    for pos in index::sample(&mut self.rng, len, edits) {
                        let offset = self.rng.gen_range(1..4);
                        let current = bases[pos].index() % 4;
                        bases[pos] = Base::ACGT[(current + offset) % 4];
                    }
                }
            }
            ParamValue::Matrix(pwm) => {
                if !pwm.is_empty() {
                    let row = self.rng.gen_range(0..pwm.len());
                    let col = self.rng.gen_range(0..4);
                    let cell = pwm.add_to_cell(row, col, delta);
                    self.out_of_bounds = !cell_in_range(cell);
                }
            }
        }
        debug!(
            param = %self.name,
            kind = %self.kind(),
            delta,
            out_of_bounds = self.out_of_bounds,
            "Parameter tweaked"
        );
    }

    /// Full re-randomization from a uniform draw `u` in `[0, 1)`.
    ///
    /// The new value is persisted into the backing node immediately, so a
    /// later checkpoint of the document reflects it without an explicit
    /// `write`. A scalar landing outside its limits is an error.
    pub fn scramble(&mut self, u: f64) -> ParamResult<()> {
        let next = match &self.value {
            ParamValue::Int(_) => {
                ParamValue::Int((self.lim_low + u * (self.lim_high - self.lim_low)).trunc() as i64)
            }
            ParamValue::Real(_) => {
                ParamValue::Real(self.lim_low + u * (self.lim_high - self.lim_low))
            }
            ParamValue::Sequence(seq) => {
                let len = seq.len();
                self.reseed(u);
                let bases = (0..len)
                    .map(|_| Base::ACGT[self.rng.gen_range(0..4)])
                    .collect();
                ParamValue::Sequence(Sequence::new(bases))
            }
            ParamValue::Matrix(pwm) => {
                let len = pwm.len();
                self.ensure_position_entries(len)?;
                self.reseed(u);
                let lim = PWM_CELL_LIMIT as i64;
                let rows = (0..len)
                    .map(|_| {
                        let mut cells = [0.0; 4];
                        for cell in cells.iter_mut() {
                            *cell = self.rng.gen_range(-lim..lim) as f64;
                        }
                        cells
                    })
                    .collect();
                ParamValue::Matrix(Pwm::from_rows(rows))
            }
        };

        self.previous = std::mem::replace(&mut self.value, next);
        self.persist();
        let out = self.check_limits();
        debug!(
            param = %self.name,
            kind = %self.kind(),
            seed = self.seed,
            "Parameter scrambled"
        );

        if out && matches!(self.kind(), ParamKind::Int | ParamKind::Real) {
            return Err(ParamError::ScrambleOutOfBounds {
                name: self.name.clone(),
                value: self.as_f64().unwrap_or(f64::NAN),
                low: self.lim_low,
                high: self.lim_high,
            });
        }
        Ok(())
    }

    /// Bounds check. Returns `true` when the value is out of bounds and
    /// records the result in the `out_of_bounds` flag on every kind.
    pub fn check_limits(&mut self) -> bool {
        self.out_of_bounds = match &self.value {
            ParamValue::Int(_) | ParamValue::Real(_) => {
                let v = self.as_f64().unwrap_or(0.0);
                v < self.lim_low || v > self.lim_high
            }
            ParamValue::Sequence(_) => false,
            ParamValue::Matrix(pwm) => pwm.is_out_of_range(),
        };
        self.out_of_bounds
    }

    /// Revert the most recent tweak or scramble. Only one level is kept;
    /// calling this twice leaves the value where the first call put it.
    pub fn restore(&mut self) {
        self.value = self.previous.clone();
        self.check_limits();
        debug!(param = %self.name, "Parameter restored");
    }

    // ── Checkpointing ────────────────────────────────────────────────

    /// Checkpoint footprint in bytes.
    pub fn size(&self) -> ParamResult<usize> {
        match &self.value {
            ParamValue::Int(_) => Ok(std::mem::size_of::<i64>()),
            ParamValue::Real(_) => Ok(std::mem::size_of::<f64>()),
            ParamValue::Sequence(seq) => Ok(seq.byte_size()),
            ParamValue::Matrix(_) => Err(ParamError::Unsupported {
                operation: "size",
                kind: ParamKind::Matrix,
            }),
        }
    }

    /// Write the current value into `buf`, returning the bytes used.
    pub fn serialize(&self, buf: &mut [u8]) -> ParamResult<usize> {
        match &self.value {
            ParamValue::Int(v) => write_fixed(buf, &v.to_le_bytes()),
            ParamValue::Real(v) => write_fixed(buf, &v.to_le_bytes()),
            ParamValue::Sequence(seq) => seq.encode_into(buf),
            ParamValue::Matrix(_) => Err(ParamError::Unsupported {
                operation: "serialize",
                kind: ParamKind::Matrix,
            }),
        }
    }

    /// Load the current value from `buf`, returning the bytes consumed.
    pub fn deserialize(&mut self, buf: &[u8]) -> ParamResult<usize> {
        match &mut self.value {
            ParamValue::Int(v) => {
                *v = i64::from_le_bytes(read_fixed(buf)?);
                Ok(8)
            }
            ParamValue::Real(v) => {
                *v = f64::from_le_bytes(read_fixed(buf)?);
                Ok(8)
            }
            ParamValue::Sequence(seq) => {
                let (decoded, used) = Sequence::decode_from(buf)?;
                *seq = decoded;
                Ok(used)
            }
            ParamValue::Matrix(_) => Err(ParamError::Unsupported {
                operation: "deserialize",
                kind: ParamKind::Matrix,
            }),
        }
    }

    // ── Display ──────────────────────────────────────────────────────

    /// Column header matching the rows rendered by `Display`.
    pub fn table_header() -> String {
        format!(
            "{:>10}{:>18}{:>12}{:>6}{:>12}{:>12}",
            "TF", "type", "value", "tweak", "lim_low", "lim_high"
        )
    }

    // ── Internals ────────────────────────────────────────────────────

    fn reseed(&mut self, u: f64) {
        self.set_seed((u * SEED_SCALE).floor() as u64);
    }

    fn ensure_position_entries(&self, rows: usize) -> ParamResult<()> {
        if let Some(node) = &self.node {
            let entries = node.borrow().children_named(POSITION_TAG).len();
            if entries != rows {
                return Err(ParamError::PositionCountMismatch { rows, entries });
            }
        }
        Ok(())
    }

    /// Write the current value into the backing node, if one is bound.
    fn persist(&self) {
        let Some(node) = &self.node else {
            return;
        };
        match &self.value {
            ParamValue::Int(v) => node.borrow_mut().set_attr("value", v.to_string()),
            ParamValue::Real(v) => node
                .borrow_mut()
                .set_attr("value", format_general(*v, SCRAMBLE_PRECISION)),
            ParamValue::Sequence(seq) => node.borrow_mut().set_attr("sequence", seq.to_string()),
            ParamValue::Matrix(pwm) => {
                node.borrow_mut().set_attr("type", "PSSM");
                let entries = node.borrow().children_named(POSITION_TAG);
                for (entry, row) in entries.iter().zip(pwm.rows()) {
                    let text = row
                        .iter()
                        .map(|&c| format_fixed_width(c, MATRIX_CELL_WIDTH))
                        .collect::<Vec<_>>()
                        .join(";");
                    entry.borrow_mut().set_text(text);
                }
            }
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            ParamValue::Sequence(seq) => write!(f, "    {}", seq),
            ParamValue::Matrix(pwm) => write!(
                f,
                "{:>10}{:>18}{:>12}{:>6}{:>12}{:>12}",
                self.owner,
                self.name,
                format!("[4x{}]", pwm.len()),
                u8::from(self.anneal),
                "NA",
                "NA"
            ),
            scalar => write!(
                f,
                "{:>10}{:>18}{:>12}{:>6}{:>12}{:>12}",
                self.owner,
                self.name,
                format_general(scalar.as_f64().unwrap_or(0.0), 4),
                u8::from(self.anneal),
                format_general(self.lim_low, 4),
                format_general(self.lim_high, 4)
            ),
        }
    }
}

/// Number of bases a sequence tweak rewrites.
pub fn sequence_edit_count(delta: f64, len: usize) -> usize {
    let wanted = delta.abs().ceil();
    if wanted.is_nan() || wanted < 1.0 {
        1.min(len)
    } else if wanted >= len as f64 {
        len
    } else {
        wanted as usize
    }
}

fn write_fixed(buf: &mut [u8], bytes: &[u8; 8]) -> ParamResult<usize> {
    let available = buf.len();
    let slot = buf.get_mut(..8).ok_or(ParamError::BufferTooShort {
        needed: 8,
        available,
    })?;
    slot.copy_from_slice(bytes);
    Ok(8)
}

fn read_fixed(buf: &[u8]) -> ParamResult<[u8; 8]> {
    let mut out = [0u8; 8];
    let slot = buf.get(..8).ok_or(ParamError::BufferTooShort {
        needed: 8,
        available: buf.len(),
    })?;
    out.copy_from_slice(slot);
    Ok(out)
}
