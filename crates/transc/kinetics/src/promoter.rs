//! Promoters convert binding occupancy into a transcription rate.

use crate::error::{KineticsError, KineticsResult};
use crate::mode::Mode;
use crate::rate::{self, RateFn, RateFunctionKind};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, warn};
use transc_params::{
    handle, NodeRef, ParamHandle, ParamKind, Parameter, ParameterCollection, ParameterSource,
};

/// Tag of a promoter node.
pub const PROMOTER_TAG: &str = "Promoter";
/// Tag of the section holding all promoters.
pub const PROMOTERS_TAG: &str = "Promoters";

/// A named rate function bound to its own parameters.
///
/// The kinetic formula is fixed at construction. Parameters live in a
/// name-ordered map; the rate callable holds handles into that map and
/// sees every later tweak or scramble without being rebuilt.
pub struct Promoter {
    name: String,
    kind: RateFunctionKind,
    params: BTreeMap<String, ParamHandle>,
    rate: RateFn,
    mode: Rc<Mode>,
}

impl Promoter {
    /// Build a promoter from a `Promoter` node.
    pub fn read(node: &NodeRef, mode: Rc<Mode>) -> KineticsResult<Self> {
        let n = node.borrow();
        let name = n.require_attr("name")?.to_string();
        let kind: RateFunctionKind = n.require_attr("function")?.parse()?;

        let mut params = BTreeMap::new();
        for &param in kind.parameter_names() {
            let child = n.require_child(param)?;
            let value = Parameter::from_node(
                ParamKind::Real,
                &child,
                format!("{} {}", name, param),
                PROMOTER_TAG,
            )?;
            params.insert(param.to_string(), handle(value));
        }

        let rate = rate::bind(kind, &name, &params)?;
        debug!(promoter = %name, function = %kind, "Promoter bound to rate function");

        Ok(Self {
            name,
            kind,
            params,
            rate,
            mode,
        })
    }

    /// Append a `Promoter` node under `parent` and return it.
    pub fn write(&self, parent: &NodeRef) -> KineticsResult<NodeRef> {
        let node = parent.borrow_mut().add_child(PROMOTER_TAG);
        {
            let mut n = node.borrow_mut();
            n.set_attr("name", self.name.as_str());
            n.set_attr("function", self.kind.name());
        }
        for &param in self.kind.parameter_names() {
            let handle = self.param(param).ok_or_else(|| KineticsError::MissingParameter {
                promoter: self.name.clone(),
                param: param.to_string(),
            })?;
            let child = node.borrow_mut().add_child(param);
            handle.borrow().write(&child, self.mode.precision())?;
        }
        Ok(node)
    }

    /// Transcription rate at occupancy `m`, using current parameter values.
    pub fn rate(&self, m: f64) -> f64 {
        (self.rate)(m)
    }

    pub fn rate_fn(&self) -> &dyn Fn(f64) -> f64 {
        &*self.rate
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> RateFunctionKind {
        self.kind
    }

    pub fn param(&self, name: &str) -> Option<&ParamHandle> {
        self.params.get(name)
    }

    pub fn params(&self) -> &BTreeMap<String, ParamHandle> {
        &self.params
    }
}

impl ParameterSource for Promoter {
    fn collect_annealed(&self, into: &mut ParameterCollection) {
        for param in self.params.values() {
            param.collect_annealed(into);
        }
    }

    fn collect_all(&self, into: &mut ParameterCollection) {
        for param in self.params.values() {
            param.collect_all(into);
        }
    }
}

impl fmt::Debug for Promoter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promoter")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// All promoters of a model, keyed and enumerated by name.
#[derive(Debug)]
pub struct PromoterContainer {
    promoters: BTreeMap<String, Promoter>,
}

impl PromoterContainer {
    /// Read every `Promoter` child of the `Promoters` section under `parent`.
    /// A repeated name replaces the earlier promoter.
    pub fn read(parent: &NodeRef, mode: Rc<Mode>) -> KineticsResult<Self> {
        let section = parent.borrow().require_child(PROMOTERS_TAG)?;
        let nodes = section.borrow().children_named(PROMOTER_TAG);

        let mut promoters = BTreeMap::new();
        for node in &nodes {
            let promoter = Promoter::read(node, Rc::clone(&mode))?;
            let name = promoter.name().to_string();
            if promoters.insert(name.clone(), promoter).is_some() {
                warn!(promoter = %name, "Duplicate promoter name, keeping the last definition");
            }
        }
        info!(count = promoters.len(), "Promoters loaded");

        Ok(Self { promoters })
    }

    /// Append a `Promoters` section under `parent` and return it.
    pub fn write(&self, parent: &NodeRef) -> KineticsResult<NodeRef> {
        let section = parent.borrow_mut().add_child(PROMOTERS_TAG);
        for promoter in self.promoters.values() {
            promoter.write(&section)?;
        }
        Ok(section)
    }

    pub fn get(&self, name: &str) -> Option<&Promoter> {
        self.promoters.get(name)
    }

    pub fn len(&self) -> usize {
        self.promoters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.promoters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Promoter> {
        self.promoters.values()
    }
}

impl ParameterSource for PromoterContainer {
    fn collect_annealed(&self, into: &mut ParameterCollection) {
        for promoter in self.promoters.values() {
            promoter.collect_annealed(into);
        }
    }

    fn collect_all(&self, into: &mut ParameterCollection) {
        for promoter in self.promoters.values() {
            promoter.collect_all(into);
        }
    }
}
