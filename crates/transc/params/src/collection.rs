//! Parameter collections.
//!
//! Owning entities expose their parameters as shared handles gathered into
//! a [`ParameterCollection`]. Order is the owner's enumeration order and is
//! stable run to run; the same parameter may appear in several collections.

use crate::parameter::Parameter;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a parameter. The owning entity holds one; collections
/// hold clones for the duration of a traversal.
pub type ParamHandle = Rc<RefCell<Parameter>>;

/// Wrap a parameter in a shared handle.
pub fn handle(param: Parameter) -> ParamHandle {
    Rc::new(RefCell::new(param))
}

/// Ordered list of parameter handles.
#[derive(Clone, Debug, Default)]
pub struct ParameterCollection {
    params: Vec<ParamHandle>,
}

impl ParameterCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, param: ParamHandle) {
        self.params.push(param);
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ParamHandle> {
        self.params.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParamHandle> {
        self.params.iter()
    }

    /// Display names, in collection order.
    pub fn names(&self) -> Vec<String> {
        self.params
            .iter()
            .map(|p| p.borrow().name().to_string())
            .collect()
    }

    /// True if any member's last bounds check failed.
    pub fn any_out_of_bounds(&self) -> bool {
        self.params.iter().any(|p| p.borrow().is_out_of_bounds())
    }
}

impl<'a> IntoIterator for &'a ParameterCollection {
    type Item = &'a ParamHandle;
    type IntoIter = std::slice::Iter<'a, ParamHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

impl IntoIterator for ParameterCollection {
    type Item = ParamHandle;
    type IntoIter = std::vec::IntoIter<ParamHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

impl FromIterator<ParamHandle> for ParameterCollection {
    fn from_iter<I: IntoIterator<Item = ParamHandle>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

impl Extend<ParamHandle> for ParameterCollection {
    fn extend<I: IntoIterator<Item = ParamHandle>>(&mut self, iter: I) {
        self.params.extend(iter);
    }
}

/// Anything that owns parameters and can enumerate them.
///
/// Both methods append to `into` without clearing it and never change
/// parameter state.
pub trait ParameterSource {
    /// Append only the parameters flagged for annealing.
    fn collect_annealed(&self, into: &mut ParameterCollection);

    /// Append every parameter regardless of its anneal flag.
    fn collect_all(&self, into: &mut ParameterCollection);

    fn annealed_parameters(&self) -> ParameterCollection {
        let mut out = ParameterCollection::new();
        self.collect_annealed(&mut out);
        out
    }

    fn all_parameters(&self) -> ParameterCollection {
        let mut out = ParameterCollection::new();
        self.collect_all(&mut out);
        out
    }
}

impl ParameterSource for ParamHandle {
    fn collect_annealed(&self, into: &mut ParameterCollection) {
        if self.borrow().is_annealed() {
            into.push(Rc::clone(self));
        }
    }

    fn collect_all(&self, into: &mut ParameterCollection) {
        into.push(Rc::clone(self));
    }
}

impl ParameterSource for ParameterCollection {
    fn collect_annealed(&self, into: &mut ParameterCollection) {
        for param in &self.params {
            param.collect_annealed(into);
        }
    }

    fn collect_all(&self, into: &mut ParameterCollection) {
        into.extend(self.params.iter().cloned());
    }
}
