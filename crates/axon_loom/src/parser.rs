//! Markup tree parser.
//!
//! Drives the tokenizer and assembles the node arena. Recovery follows
//! the usual markup rules: void tags never open a scope, a close tag pops
//! back to its matching open tag, and anything left open at the end of
//! input is closed implicitly with a diagnostic.

use axon_figure::{ErrorCode, ParseError};
use axon_lumen::{is_void_tag, CompactString, SmallVec};
use htmlize::unescape;

use crate::document::{Document, NodeData, NodeId, NodeKind};
use crate::tokenizer::{Callbacks, QuoteType, Tokenizer};

/// Attribute list under construction
type AttrList = SmallVec<[(CompactString, CompactString); 4]>;

/// Element whose open tag is still being read
struct PendingElement {
    tag: CompactString,
    attrs: AttrList,
}

/// Attribute whose value is still being read
struct PendingAttr {
    name: CompactString,
    value_span: Option<(usize, usize)>,
}

/// Markup parser building a [`Document`]
pub struct Parser<'s> {
    source: &'s str,
    nodes: Vec<NodeData>,
    /// Open element scopes, innermost last
    stack: Vec<NodeId>,
    current_element: Option<PendingElement>,
    current_attr: Option<PendingAttr>,
    errors: Vec<ParseError>,
}

impl<'s> Parser<'s> {
    /// Create a new parser
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
            stack: Vec::new(),
            current_element: None,
            current_attr: None,
            errors: Vec::new(),
        }
    }

    /// Parse the source and return the document with collected errors
    pub fn parse(mut self) -> (Document, Vec<ParseError>) {
        let source = self.source;
        let mut tokenizer = Tokenizer::new(source, Sink { parser: &mut self });
        tokenizer.tokenize();

        // Close anything still open at end of input
        for _ in self.stack.drain(..) {
            self.errors
                .push(ParseError::new(ErrorCode::MissingEndTag, source.len()));
        }

        (Document { nodes: self.nodes }, self.errors)
    }

    fn get_source(&self, start: usize, end: usize) -> &'s str {
        &self.source[start..end]
    }

    /// Parent for the next node: innermost open element, else the document
    fn parent(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(NodeId::DOCUMENT)
    }

    /// Append a node under the given parent and return its id
    fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Finalize the pending attribute, if any
    fn flush_attr(&mut self) {
        let Some(attr) = self.current_attr.take() else {
            return;
        };
        let Some(element) = self.current_element.as_mut() else {
            return;
        };

        // First occurrence wins, as in HTML
        if element.attrs.iter().any(|(n, _)| *n == attr.name) {
            return;
        }

        let value = match attr.value_span {
            Some((start, end)) => CompactString::from(unescape(&self.source[start..end]).as_ref()),
            None => CompactString::default(),
        };
        element.attrs.push((attr.name, value));
    }

    /// Finalize the pending element's open tag
    fn finish_open_tag(&mut self, self_closing: bool) {
        let Some(pending) = self.current_element.take() else {
            return;
        };

        let parent = self.parent();
        let is_void = is_void_tag(&pending.tag);
        let id = self.append(
            parent,
            NodeKind::Element {
                tag: pending.tag,
                attrs: pending.attrs,
            },
        );

        if !self_closing && !is_void {
            self.stack.push(id);
        }
    }

    fn tag_name_at(&self, id: NodeId) -> &str {
        match &self.nodes[id.index()].kind {
            NodeKind::Element { tag, .. } => tag.as_str(),
            _ => "",
        }
    }
}

/// Callback sink wiring the tokenizer to the parser
struct Sink<'p, 's> {
    parser: &'p mut Parser<'s>,
}

impl Callbacks for Sink<'_, '_> {
    fn on_text(&mut self, start: usize, end: usize) {
        let parent = self.parser.parent();
        let text = CompactString::from(unescape(self.parser.get_source(start, end)).as_ref());
        self.parser.append(parent, NodeKind::Text(text));
    }

    fn on_open_tag_name(&mut self, start: usize, end: usize) {
        let tag = self.parser.get_source(start, end).to_ascii_lowercase();
        self.parser.current_element = Some(PendingElement {
            tag: CompactString::from(tag),
            attrs: AttrList::new(),
        });
    }

    fn on_open_tag_end(&mut self, _end: usize) {
        self.parser.flush_attr();
        self.parser.finish_open_tag(false);
    }

    fn on_self_closing_tag(&mut self, _end: usize) {
        self.parser.flush_attr();
        self.parser.finish_open_tag(true);
    }

    fn on_close_tag(&mut self, start: usize, end: usize) {
        let tag = self.parser.get_source(start, end).to_ascii_lowercase();

        // Find the matching open tag, innermost first
        let matching = self
            .parser
            .stack
            .iter()
            .rposition(|&id| self.parser.tag_name_at(id) == tag);

        match matching {
            Some(position) => {
                // Elements skipped over were left unclosed
                for _ in position + 1..self.parser.stack.len() {
                    self.parser
                        .errors
                        .push(ParseError::new(ErrorCode::MissingEndTag, start));
                }
                self.parser.stack.truncate(position);
            }
            None => {
                self.parser
                    .errors
                    .push(ParseError::new(ErrorCode::InvalidEndTag, start));
            }
        }
    }

    fn on_attrib_name(&mut self, start: usize, end: usize) {
        // An unfinished attribute without a value ends when the next name starts
        self.parser.flush_attr();
        let name = self.parser.get_source(start, end).to_ascii_lowercase();
        self.parser.current_attr = Some(PendingAttr {
            name: CompactString::from(name),
            value_span: None,
        });
    }

    fn on_attrib_data(&mut self, start: usize, end: usize) {
        if let Some(attr) = self.parser.current_attr.as_mut() {
            attr.value_span = Some((start, end));
        }
    }

    fn on_attrib_end(&mut self, _quote: QuoteType, _end: usize) {
        self.parser.flush_attr();
    }

    fn on_comment(&mut self, start: usize, end: usize) {
        let parent = self.parser.parent();
        let body = CompactString::from(self.parser.get_source(start, end));
        self.parser.append(parent, NodeKind::Comment(body));
    }

    fn on_processing_instruction(&mut self, _start: usize, _end: usize) {}

    fn on_end(&mut self) {}

    fn on_error(&mut self, code: ErrorCode, index: usize) {
        self.parser.errors.push(ParseError::new(code, index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_figure::ElementView;

    fn parse(source: &str) -> (Document, Vec<ParseError>) {
        Document::parse(source)
    }

    #[test]
    fn test_nested_structure() {
        let (doc, errors) = parse("<html><body><main><p>hi</p></main></body></html>");
        assert!(errors.is_empty());
        let html = doc.root_element().unwrap();
        let body = html.children()[0];
        let main = body.children()[0];
        assert_eq!(main.tag(), "main");
        assert_eq!(main.children()[0].tag(), "p");
    }

    #[test]
    fn test_void_tags_take_no_children() {
        let (doc, errors) = parse("<div><br><img src=x><span>s</span></div>");
        assert!(errors.is_empty());
        let div = doc.root_element().unwrap();
        let children = div.children();
        let tags: Vec<&str> = children.iter().map(|c| c.tag()).collect();
        assert_eq!(tags, vec!["br", "img", "span"]);
    }

    #[test]
    fn test_unclosed_tag_recovers() {
        let (doc, errors) = parse("<div><p>one<p>two</div>");
        // Both <p> elements are recovered when </div> closes the scope
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.code == ErrorCode::MissingEndTag)
                .count(),
            2
        );
        // The second <p> nests under the first since <p> does not auto-close
        let div = doc.root_element().unwrap();
        let children = div.children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].text_content(), "onetwo");
        assert_eq!(children[0].children()[0].text_content(), "two");
    }

    #[test]
    fn test_stray_close_tag_reported() {
        let (doc, errors) = parse("<div></span></div>");
        assert!(errors.iter().any(|e| e.code == ErrorCode::InvalidEndTag));
        assert_eq!(doc.root_element().unwrap().tag(), "div");
    }

    #[test]
    fn test_entities_decoded() {
        let (doc, _) = parse("<p title=\"a &amp; b\">x &lt; y</p>");
        let p = doc.root_element().unwrap();
        assert_eq!(p.attr("title"), Some("a & b"));
        assert_eq!(p.text_content(), "x < y");
    }

    #[test]
    fn test_duplicate_attribute_first_wins() {
        let (doc, _) = parse(r#"<div id="first" id="second"></div>"#);
        let div = doc.root_element().unwrap();
        assert_eq!(div.attr("id"), Some("first"));
    }

    #[test]
    fn test_attribute_names_lowercased() {
        let (doc, _) = parse(r#"<div DATA-Kind="x" ID="a"></div>"#);
        let div = doc.root_element().unwrap();
        assert_eq!(div.attr("data-kind"), Some("x"));
        assert_eq!(div.attr("id"), Some("a"));
    }

    #[test]
    fn test_tags_lowercased_and_close_case_insensitive() {
        let (doc, errors) = parse("<DIV><SPAN>x</span></div>");
        assert!(errors.is_empty());
        let div = doc.root_element().unwrap();
        assert_eq!(div.tag(), "div");
        assert_eq!(div.children()[0].tag(), "span");
    }

    #[test]
    fn test_boolean_attribute_has_empty_value() {
        let (doc, _) = parse("<input disabled>");
        let input = doc.root_element().unwrap();
        assert_eq!(input.attr("disabled"), Some(""));
    }

    #[test]
    fn test_unclosed_at_eof_reported() {
        let (doc, errors) = parse("<div><span>text");
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.code == ErrorCode::MissingEndTag)
                .count(),
            2
        );
        let div = doc.root_element().unwrap();
        assert_eq!(div.children()[0].text_content(), "text");
    }

    #[test]
    fn test_multiple_top_level_elements() {
        let (doc, _) = parse("<header></header><main></main>");
        let tops = doc.top_level_elements();
        assert_eq!(tops.len(), 2);
        assert_eq!(doc.root_element().unwrap().tag(), "header");
    }
}
