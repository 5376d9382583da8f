//! Accessibility snapshot node types.
//!
//! An [`AxNode`] tree is built once from a host element tree and is
//! immutable afterwards: it is a snapshot, not a live view. All fields
//! serialize with stable names so a dumped tree can be diffed or replayed
//! by external tooling.

use std::collections::BTreeMap;

use axon_lumen::CompactString;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in viewport coordinates at build time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Zero-area box for hosts without layout information
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A toggleable ARIA state: either a real boolean (native property) or a
/// raw attribute token such as `"mixed"`, passed through unvalidated.
///
/// Serializes untagged, so a native boolean becomes JSON `true`/`false`
/// and a token stays a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToggleState {
    Flag(bool),
    Token(CompactString),
}

/// The ten-field ARIA state bag attached to every node.
///
/// Boolean fields fold the native property together with the
/// corresponding `aria-*` attribute; tri-state fields pass the raw
/// attribute through. Every key is serialized even when unset so the
/// output shape is fixed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxState {
    pub disabled: bool,
    pub hidden: bool,
    pub expanded: Option<CompactString>,
    pub checked: Option<ToggleState>,
    pub selected: Option<CompactString>,
    pub pressed: Option<CompactString>,
    pub readonly: bool,
    pub required: bool,
    pub busy: bool,
    pub invalid: bool,
}

/// One node of the reconstructed accessibility tree.
///
/// `role`, `name`, `description`, and `value` are always present; absence
/// of a source collapses to the empty string at this boundary, never to
/// null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxNode {
    /// Lowercase tag identity of the source element
    pub tag: CompactString,
    /// Computed role; empty when no role applies
    pub role: CompactString,
    /// Computed accessible name
    pub name: CompactString,
    /// Computed accessible description
    pub description: CompactString,
    /// Current form value or `aria-valuenow`
    pub value: CompactString,
    pub state: AxState,
    pub location: Rect,
    /// Allow-listed attributes present on the source element
    pub attributes: BTreeMap<CompactString, CompactString>,
    /// Child nodes in document order
    pub children: Vec<AxNode>,
}

impl AxNode {
    /// Create an empty node for the given tag
    pub fn new(tag: impl Into<CompactString>) -> Self {
        Self {
            tag: tag.into(),
            role: CompactString::default(),
            name: CompactString::default(),
            description: CompactString::default(),
            value: CompactString::default(),
            state: AxState::default(),
            location: Rect::ZERO,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Lazy pre-order traversal over this node and all descendants.
    ///
    /// The iterator is restartable (call `iter()` again) and never
    /// recurses, so arbitrarily deep trees cannot exhaust the stack
    /// during a query.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }
}

impl<'a> IntoIterator for &'a AxNode {
    type Item = &'a AxNode;
    type IntoIter = PreOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over an [`AxNode`] tree.
#[derive(Debug)]
pub struct PreOrder<'a> {
    stack: Vec<&'a AxNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a AxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reverse so the first child is popped next
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> AxNode {
        let mut root = AxNode::new("div");
        let mut list = AxNode::new("ul");
        list.children.push(AxNode::new("li"));
        list.children.push(AxNode::new("li"));
        root.children.push(AxNode::new("h1"));
        root.children.push(list);
        root
    }

    #[test]
    fn test_pre_order_visits_parent_before_children() {
        let tree = sample_tree();
        let tags: Vec<&str> = tree.iter().map(|n| n.tag.as_str()).collect();
        assert_eq!(tags, vec!["div", "h1", "ul", "li", "li"]);
    }

    #[test]
    fn test_iter_is_restartable() {
        let tree = sample_tree();
        assert_eq!(tree.iter().count(), 5);
        assert_eq!(tree.iter().count(), 5);
    }

    #[test]
    fn test_leaf_has_empty_children() {
        let node = AxNode::new("img");
        assert!(node.children.is_empty());
        assert_eq!(node.iter().count(), 1);
    }

    #[test]
    fn test_toggle_state_serializes_untagged() {
        let flag = serde_json::to_string(&ToggleState::Flag(true)).unwrap();
        assert_eq!(flag, "true");
        let token = serde_json::to_string(&ToggleState::Token("mixed".into())).unwrap();
        assert_eq!(token, "\"mixed\"");
    }

    #[test]
    fn test_state_serializes_all_keys() {
        let json = serde_json::to_value(AxState::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 10);
        assert_eq!(obj["checked"], serde_json::Value::Null);
        assert_eq!(obj["disabled"], serde_json::Value::Bool(false));
    }
}
