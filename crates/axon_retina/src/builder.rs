//! Accessibility tree building.
//!
//! Walks the host element tree depth-first, pre-order, resolving role,
//! name, description, value, and state for every element. The result is
//! an owned [`AxNode`] snapshot; later mutations of the host are not
//! reflected.
//!
//! The input must be a tree. A graph with back-edges recurses without
//! bound.

use std::collections::BTreeMap;

use axon_figure::{AxNode, ElementView};
use axon_lumen::{CompactString, CAPTURED_ATTRIBUTES};

use crate::name::{resolve_description, resolve_name};
use crate::role::resolve_role;
use crate::state::extract_state;

/// Options for tree building
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Attribute names captured in addition to the standard allow-list
    pub extra_attributes: Vec<CompactString>,
}

/// Builds [`AxNode`] snapshots from any [`ElementView`] host
#[derive(Debug, Default)]
pub struct TreeBuilder {
    options: BuildOptions,
}

impl TreeBuilder {
    /// Create a builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom options
    pub fn with_options(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Build the whole accessibility tree from the document root
    pub fn build<V: ElementView>(&self, root: &V) -> AxNode {
        let tree = self.build_node(root);
        tracing::debug!(root = tree.tag.as_str(), "built accessibility tree");
        tree
    }

    /// Build the subtree rooted at a single element
    pub fn build_node<V: ElementView>(&self, el: &V) -> AxNode {
        let mut attributes = BTreeMap::new();
        for &name in CAPTURED_ATTRIBUTES {
            if let Some(value) = el.attr(name) {
                attributes.insert(CompactString::from(name), CompactString::from(value));
            }
        }
        for name in &self.options.extra_attributes {
            if let Some(value) = el.attr(name.as_str()) {
                attributes.insert(name.clone(), CompactString::from(value));
            }
        }

        // A non-empty form value wins; aria-valuenow fills in otherwise
        let value = match el.value() {
            Some(v) if !v.is_empty() => v,
            _ => el
                .attr("aria-valuenow")
                .map(CompactString::from)
                .unwrap_or_default(),
        };

        AxNode {
            tag: CompactString::from(el.tag()),
            role: resolve_role(el),
            name: resolve_name(el),
            description: resolve_description(el),
            value,
            state: extract_state(el),
            location: el.bounds(),
            attributes,
            children: el
                .children()
                .iter()
                .map(|child| self.build_node(child))
                .collect(),
        }
    }
}

/// Build the accessibility tree with default options
pub fn build<V: ElementView>(root: &V) -> AxNode {
    TreeBuilder::new().build(root)
}

/// Build a single element's subtree with default options
pub fn build_node<V: ElementView>(el: &V) -> AxNode {
    TreeBuilder::new().build_node(el)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_loom::Document;

    fn build_source(source: &str) -> AxNode {
        let (doc, _) = Document::parse(source);
        build(&doc.root_element().unwrap())
    }

    #[test]
    fn test_tree_mirrors_document_order() {
        let tree = build_source("<main><h1>T</h1><p>a</p><p>b</p></main>");
        assert_eq!(tree.tag, "main");
        assert_eq!(tree.role, "main");
        let tags: Vec<&str> = tree.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["h1", "p", "p"]);
    }

    #[test]
    fn test_leaf_children_is_empty_not_absent() {
        let tree = build_source("<div></div>");
        assert!(tree.children.is_empty());
    }

    #[test]
    fn test_attribute_capture_allow_list() {
        let tree = build_source(
            r#"<div id="x" class="c" data-test="dropped" aria-live="polite" role="status"></div>"#,
        );
        assert_eq!(tree.attributes.get("id").map(|v| v.as_str()), Some("x"));
        assert_eq!(tree.attributes.get("class").map(|v| v.as_str()), Some("c"));
        assert_eq!(
            tree.attributes.get("aria-live").map(|v| v.as_str()),
            Some("polite")
        );
        // Outside the allow-list: dropped from the bag
        assert!(!tree.attributes.contains_key("data-test"));
        assert!(!tree.attributes.contains_key("role"));
        // ...but still fed the role resolver
        assert_eq!(tree.role, "status");
    }

    #[test]
    fn test_extra_attributes_option() {
        let (doc, _) = Document::parse(r#"<div data-test="kept"></div>"#);
        let builder = TreeBuilder::with_options(BuildOptions {
            extra_attributes: vec![CompactString::from("data-test")],
        });
        let tree = builder.build(&doc.root_element().unwrap());
        assert_eq!(
            tree.attributes.get("data-test").map(|v| v.as_str()),
            Some("kept")
        );
    }

    #[test]
    fn test_value_prefers_form_value() {
        let tree = build_source(r#"<input value="typed" aria-valuenow="42">"#);
        assert_eq!(tree.value, "typed");
    }

    #[test]
    fn test_value_falls_back_to_aria_valuenow() {
        let tree = build_source(r#"<div role="slider" aria-valuenow="42"></div>"#);
        assert_eq!(tree.value, "42");
        // An empty form value does not shadow aria-valuenow
        let tree = build_source(r#"<input value="" aria-valuenow="7">"#);
        assert_eq!(tree.value, "7");
    }

    #[test]
    fn test_build_is_idempotent() {
        let (doc, _) = Document::parse(
            r#"<form><label for="n">Name</label><input id="n" required><button>Send</button></form>"#,
        );
        let root = doc.root_element().unwrap();
        assert_eq!(build(&root), build(&root));
    }

    #[test]
    fn test_build_node_keeps_descendants() {
        let (doc, _) = Document::parse("<div><section><h2>Inner</h2></section></div>");
        let root = doc.root_element().unwrap();
        let section = root.children()[0];
        let subtree = build_node(&section);
        assert_eq!(subtree.tag, "section");
        assert_eq!(subtree.children.len(), 1);
        assert_eq!(subtree.children[0].name, "Inner");
    }

    #[test]
    fn test_full_resolution_composes() {
        let tree = build_source(
            r#"<form><label for="q">Query</label><input id="q" type="search" placeholder="Type here" aria-invalid="true"></form>"#,
        );
        let input = &tree.children[1];
        assert_eq!(input.role, "searchbox");
        assert_eq!(input.name, "Query");
        assert!(input.state.invalid);
    }
}
