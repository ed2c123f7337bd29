//! Attributed configuration tree.
//!
//! Model documents are hierarchical, attributed trees. Nodes are shared
//! through [`NodeRef`] so that a parameter can keep a live handle to the node
//! it was read from and persist randomized values into it later.

use crate::error::{ParamError, ParamResult};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::str::FromStr;

/// Shared, mutable handle to a node in a configuration tree.
pub type NodeRef = Rc<RefCell<ConfigNode>>;

/// One element of a configuration document.
///
/// Attributes are kept sorted by key, so a written node always lists them
/// in the same order regardless of how they were set. Children keep
/// document order.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeRef>,
}

impl ConfigNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: ConfigNode) -> Self {
        self.children.push(child.into_ref());
        self
    }

    /// Wrap this node in a shared handle.
    pub fn into_ref(self) -> NodeRef {
        Rc::new(RefCell::new(self))
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// First child with the given tag.
    pub fn child(&self, name: &str) -> Option<NodeRef> {
        self.children
            .iter()
            .find(|c| c.borrow().name == name)
            .map(Rc::clone)
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.children.iter().any(|c| c.borrow().name == name)
    }

    /// All children with the given tag, in document order.
    pub fn children_named(&self, name: &str) -> Vec<NodeRef> {
        self.children
            .iter()
            .filter(|c| c.borrow().name == name)
            .map(Rc::clone)
            .collect()
    }

    pub fn require_child(&self, name: &str) -> ParamResult<NodeRef> {
        self.child(name).ok_or_else(|| ParamError::MissingChild {
            node: self.name.clone(),
            child: name.to_string(),
        })
    }

    /// Append a new empty child and return a handle to it.
    pub fn add_child(&mut self, name: impl Into<String>) -> NodeRef {
        let child = ConfigNode::new(name).into_ref();
        self.children.push(Rc::clone(&child));
        child
    }

    pub fn require_attr(&self, key: &str) -> ParamResult<&str> {
        self.attr(key).ok_or_else(|| ParamError::MissingAttribute {
            node: self.name.clone(),
            attr: key.to_string(),
        })
    }

    /// Parse a required attribute.
    pub fn parse_attr<T: FromStr>(&self, key: &str) -> ParamResult<T> {
        let raw = self.require_attr(key)?;
        self.parse_raw(key, raw)
    }

    /// Parse an optional attribute, falling back to `default` when absent.
    /// A present but unparsable value is still an error.
    pub fn parse_attr_or<T: FromStr>(&self, key: &str, default: T) -> ParamResult<T> {
        match self.attr(key) {
            Some(raw) => self.parse_raw(key, raw),
            None => Ok(default),
        }
    }

    /// Parse a required boolean attribute. Accepts `true`/`false` and `1`/`0`.
    pub fn parse_flag(&self, key: &str) -> ParamResult<bool> {
        let raw = self.require_attr(key)?;
        match raw.trim() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            _ => Err(self.invalid(key, raw)),
        }
    }

    fn parse_raw<T: FromStr>(&self, key: &str, raw: &str) -> ParamResult<T> {
        raw.trim().parse().map_err(|_| self.invalid(key, raw))
    }

    fn invalid(&self, key: &str, raw: &str) -> ParamError {
        ParamError::InvalidAttribute {
            node: self.name.clone(),
            attr: key.to_string(),
            value: raw.to_string(),
        }
    }

    /// Load a tree from its JSON transport form.
    pub fn from_json(json: &str) -> ParamResult<NodeRef> {
        let node: ConfigNode = serde_json::from_str(json)?;
        Ok(node.into_ref())
    }

    pub fn to_json(&self) -> ParamResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
