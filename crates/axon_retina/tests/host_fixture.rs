//! Host-contract tests with a hand-built fixture.
//!
//! The resolution engine only sees elements through the capability
//! trait, so a fixture host with geometry must work exactly like a
//! parsed document, including referenced-id resolution and bounding
//! boxes, which the static markup host cannot supply.

use std::rc::Rc;

use axon_figure::{ElementView, Rect};
use axon_lumen::CompactString;
use axon_retina::{build, find_by_role};

#[derive(Debug)]
struct FixtureNode {
    tag: &'static str,
    attrs: Vec<(&'static str, &'static str)>,
    text: &'static str,
    bounds: Rect,
    children: Vec<Rc<FixtureNode>>,
}

impl FixtureNode {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            text: "",
            bounds: Rect::ZERO,
            children: Vec::new(),
        }
    }
}

/// Handle pairing a node with its document root for id lookup
#[derive(Clone)]
struct FixtureRef {
    root: Rc<FixtureNode>,
    node: Rc<FixtureNode>,
}

impl FixtureRef {
    fn document(root: Rc<FixtureNode>) -> Self {
        Self {
            root: root.clone(),
            node: root,
        }
    }

    fn find_by_id(node: &Rc<FixtureNode>, id: &str) -> Option<Rc<FixtureNode>> {
        if node.attrs.iter().any(|(n, v)| *n == "id" && *v == id) {
            return Some(node.clone());
        }
        node.children.iter().find_map(|c| Self::find_by_id(c, id))
    }

    fn collect_text(node: &FixtureNode, out: &mut String) {
        out.push_str(node.text);
        for child in &node.children {
            Self::collect_text(child, out);
        }
    }
}

impl ElementView for FixtureRef {
    fn tag(&self) -> &str {
        self.node.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.node
            .attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    fn children(&self) -> Vec<Self> {
        self.node
            .children
            .iter()
            .map(|child| FixtureRef {
                root: self.root.clone(),
                node: child.clone(),
            })
            .collect()
    }

    fn text_content(&self) -> CompactString {
        let mut out = String::new();
        Self::collect_text(&self.node, &mut out);
        CompactString::from(out)
    }

    fn element_by_id(&self, id: &str) -> Option<Self> {
        Self::find_by_id(&self.root, id).map(|node| FixtureRef {
            root: self.root.clone(),
            node,
        })
    }

    fn bounds(&self) -> Rect {
        self.node.bounds
    }
}

fn fixture() -> FixtureRef {
    let label = Rc::new(FixtureNode {
        attrs: vec![("id", "lbl")],
        text: "Close dialog",
        ..FixtureNode::new("span")
    });
    let button = Rc::new(FixtureNode {
        attrs: vec![("aria-labelledby", "lbl")],
        bounds: Rect::new(10.0, 20.0, 80.0, 24.0),
        ..FixtureNode::new("button")
    });
    let root = Rc::new(FixtureNode {
        children: vec![label, button],
        ..FixtureNode::new("div")
    });
    FixtureRef::document(root)
}

#[test]
fn fixture_host_drives_the_builder() {
    let tree = build(&fixture());
    assert_eq!(tree.tag, "div");

    let buttons = find_by_role(&tree, "button");
    assert_eq!(buttons.len(), 1);
    // aria-labelledby resolved through the fixture's own id lookup
    assert_eq!(buttons[0].name, "Close dialog");
}

#[test]
fn fixture_geometry_is_snapshotted() {
    let tree = build(&fixture());
    let button = &tree.children[1];
    assert_eq!(button.location, Rect::new(10.0, 20.0, 80.0, 24.0));
}

#[test]
fn fixture_without_form_capabilities_uses_defaults() {
    let tree = build(&fixture());
    let button = &tree.children[1];
    assert!(!button.state.disabled);
    assert_eq!(button.state.checked, None);
    assert_eq!(button.value, "");
}
