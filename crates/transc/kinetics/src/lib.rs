#![deny(unsafe_code)]
//! # transc-kinetics
//!
//! Kinetic entities of the transcription model built on `transc-params`:
//! promoters that map binding occupancy to a transcription rate, and the
//! competition group that governs interference between binding sites.
//!
//! Both read their parameters from the shared configuration tree and keep
//! the resulting parameter handles. Rates and competition values are
//! always computed from the handles' current contents, so an optimizer
//! mutating parameters through a collection never needs to rebind them.
//!
//! ```
//! use std::rc::Rc;
//! use transc_kinetics::{Mode, Promoter};
//! use transc_params::ConfigNode;
//!
//! let scalar = |tag: &str, v: &str| {
//!     ConfigNode::new(tag)
//!         .with_attr("value", v)
//!         .with_attr("anneal", "true")
//!         .with_attr("lim_low", "0")
//!         .with_attr("lim_high", "10")
//! };
//! let node = ConfigNode::new("Promoter")
//!     .with_attr("name", "eve")
//!     .with_attr("function", "Linear")
//!     .with_child(scalar("A", "2"))
//!     .with_child(scalar("B", "3"))
//!     .into_ref();
//!
//! let promoter = Promoter::read(&node, Rc::new(Mode::default())).unwrap();
//! assert_eq!(promoter.rate(4.0), 11.0);
//! ```

pub mod competition;
pub mod error;
pub mod mode;
pub mod promoter;
pub mod rate;

pub use competition::{Aggregation, Competition, COMPETITION_TAG};
pub use error::{KineticsError, KineticsResult};
pub use mode::Mode;
pub use promoter::{Promoter, PromoterContainer, PROMOTERS_TAG, PROMOTER_TAG};
pub use rate::{RateFn, RateFunctionKind};
