//! Owned document tree and element handles.
//!
//! Nodes live in one `Vec` indexed by [`NodeId`]; [`ElementRef`] is a
//! copyable `(document, id)` handle. Handles implement
//! [`ElementView`], which is how the resolution engine and the query
//! engine see the document.

use axon_figure::{ElementView, ParseError, Rect};
use axon_lumen::{
    is_disableable_tag, is_labelable_tag, is_readonly_capable_tag, is_required_capable_tag,
    CompactString, SmallVec,
};

use crate::parser::Parser;

/// Index of a node within its [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) u32);

impl NodeId {
    /// The synthetic document node
    pub(crate) const DOCUMENT: Self = Self(0);

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub(crate) enum NodeKind {
    /// Synthetic container for top-level nodes
    Document,
    Element {
        tag: CompactString,
        /// First occurrence wins; names are lowercase
        attrs: SmallVec<[(CompactString, CompactString); 4]>,
    },
    Text(CompactString),
    Comment(#[allow(dead_code)] CompactString),
}

#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// A parsed markup document
#[derive(Debug)]
pub struct Document {
    pub(crate) nodes: Vec<NodeData>,
}

impl Document {
    /// Parse markup into a document, collecting recoverable errors.
    ///
    /// Parsing never fails; a best-effort tree is always returned.
    pub fn parse(source: &str) -> (Self, Vec<ParseError>) {
        Parser::new(source).parse()
    }

    /// The first top-level element, taken as the document root for tree building
    pub fn root_element(&self) -> Option<ElementRef<'_>> {
        self.top_level_elements().into_iter().next()
    }

    /// All top-level elements in document order
    pub fn top_level_elements(&self) -> Vec<ElementRef<'_>> {
        self.nodes[NodeId::DOCUMENT.index()]
            .children
            .iter()
            .filter(|id| matches!(self.nodes[id.index()].kind, NodeKind::Element { .. }))
            .map(|&id| ElementRef { doc: self, id })
            .collect()
    }

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    /// Pre-order walk over every element node in the document
    fn each_element(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        // Node ids are assigned in creation order, which is pre-order
        (0..self.nodes.len() as u32)
            .map(NodeId)
            .filter(|id| matches!(self.nodes[id.index()].kind, NodeKind::Element { .. }))
            .map(|id| ElementRef { doc: self, id })
    }
}

/// Copyable handle to one element of a [`Document`]
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'doc> {
    doc: &'doc Document,
    id: NodeId,
}

impl<'doc> ElementRef<'doc> {
    fn data(&self) -> &'doc NodeData {
        self.doc.node(self.id)
    }

    fn attrs(&self) -> &'doc [(CompactString, CompactString)] {
        match &self.data().kind {
            NodeKind::Element { attrs, .. } => attrs,
            _ => &[],
        }
    }

    /// Parent element, if any
    pub fn parent(&self) -> Option<ElementRef<'doc>> {
        let mut current = self.data().parent;
        while let Some(id) = current {
            match self.doc.node(id).kind {
                NodeKind::Element { .. } => return Some(ElementRef { doc: self.doc, id }),
                _ => current = self.doc.node(id).parent,
            }
        }
        None
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let node = self.doc.node(id);
        match &node.kind {
            NodeKind::Text(text) => out.push_str(text),
            _ => {
                for &child in &node.children {
                    self.collect_text(child, out);
                }
            }
        }
    }
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl<'doc> ElementView for ElementRef<'doc> {
    fn tag(&self) -> &str {
        match &self.data().kind {
            NodeKind::Element { tag, .. } => tag.as_str(),
            _ => "",
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs()
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v.as_str())
    }

    fn children(&self) -> Vec<Self> {
        self.data()
            .children
            .iter()
            .filter(|id| matches!(self.doc.node(**id).kind, NodeKind::Element { .. }))
            .map(|&id| ElementRef { doc: self.doc, id })
            .collect()
    }

    fn text_content(&self) -> CompactString {
        let mut out = String::new();
        self.collect_text(self.id, &mut out);
        CompactString::from(out)
    }

    fn element_by_id(&self, id: &str) -> Option<Self> {
        self.doc
            .each_element()
            .find(|el| el.attr("id") == Some(id))
    }

    fn is_disabled(&self) -> bool {
        is_disableable_tag(self.tag()) && self.has_attr("disabled")
    }

    fn is_hidden(&self) -> bool {
        self.has_attr("hidden")
    }

    fn is_read_only(&self) -> bool {
        is_readonly_capable_tag(self.tag()) && self.has_attr("readonly")
    }

    fn is_required(&self) -> bool {
        is_required_capable_tag(self.tag()) && self.has_attr("required")
    }

    fn checked(&self) -> Option<bool> {
        if self.tag() == "input" && matches!(self.input_type(), Some("checkbox") | Some("radio")) {
            Some(self.has_attr("checked"))
        } else {
            None
        }
    }

    fn value(&self) -> Option<CompactString> {
        match self.tag() {
            "input" => self.attr("value").map(CompactString::from),
            "textarea" => Some(self.text_content()),
            _ => None,
        }
    }

    fn label_text(&self) -> Option<CompactString> {
        if !is_labelable_tag(self.tag()) {
            return None;
        }

        // label[for] association, first in document order
        if let Some(own_id) = self.attr("id") {
            if let Some(label) = self
                .doc
                .each_element()
                .find(|el| el.tag() == "label" && el.attr("for") == Some(own_id))
            {
                return Some(CompactString::from(label.text_content().trim()));
            }
        }

        // Wrapping label ancestor
        let mut ancestor = self.parent();
        while let Some(el) = ancestor {
            if el.tag() == "label" {
                return Some(CompactString::from(el.text_content().trim()));
            }
            ancestor = el.parent();
        }
        None
    }

    fn bounds(&self) -> Rect {
        Rect::ZERO
    }
}
