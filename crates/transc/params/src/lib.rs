#![deny(unsafe_code)]
//! # transc-params
//!
//! The parameter substrate of the transcription model: bounded, annealable,
//! persistable value cells over integers, reals, DNA sequences and position
//! weight matrices, plus the collections an optimizer gathers them into.
//!
//! Everything here is single-threaded. Each parameter carries its own seeded
//! random stream, so perturbations of different parameters never interact
//! and replay deterministically from their seeds.

pub mod collection;
pub mod document;
pub mod error;
pub mod format;
pub mod parameter;
pub mod pwm;
pub mod sequence;

pub use collection::{handle, ParamHandle, ParameterCollection, ParameterSource};
pub use document::{ConfigNode, NodeRef};
pub use error::{ParamError, ParamResult};
pub use format::format_general;
pub use parameter::{ParamKind, ParamValue, Parameter, DEFAULT_MOVE, SCRAMBLE_PRECISION};
pub use pwm::{Pwm, POSITION_TAG, PWM_CELL_LIMIT};
pub use sequence::{Base, Sequence};
