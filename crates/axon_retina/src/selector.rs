//! CSS-like selector parsing and matching.
//!
//! Supports the subset structural queries need: selector lists,
//! descendant and child combinators, and compound selectors made of a
//! tag (or `*`), `#id`, `.class`, attribute tests (`[a]`, `[a=v]`,
//! `[a^=v]`, `[a$=v]`, `[a*=v]`), and `:nth-child(n)`. Anything else is
//! a [`SelectorError`]; the query boundary turns that into an empty
//! result.

use axon_figure::ElementView;
use axon_lumen::CompactString;
use thiserror::Error;

/// Selector parse failure with the byte offset of the problem
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected character `{ch}` at byte {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    #[error("unterminated attribute selector at byte {offset}")]
    UnterminatedAttribute { offset: usize },
    #[error("unterminated string at byte {offset}")]
    UnterminatedString { offset: usize },
    #[error("unsupported pseudo-class `:{name}` at byte {offset}")]
    UnsupportedPseudo { name: CompactString, offset: usize },
    #[error("invalid :nth-child argument at byte {offset}")]
    InvalidNthChild { offset: usize },
    #[error("dangling combinator at byte {offset}")]
    DanglingCombinator { offset: usize },
}

/// How an attribute test compares its value
#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrMatch {
    Exists,
    Equals(CompactString),
    Prefix(CompactString),
    Suffix(CompactString),
    Contains(CompactString),
}

/// One simple selector within a compound
#[derive(Debug, Clone, PartialEq, Eq)]
enum SimpleSelector {
    Id(CompactString),
    Class(CompactString),
    Attr { name: CompactString, test: AttrMatch },
    NthChild(usize),
}

/// A compound selector: optional tag plus simple selectors
#[derive(Debug, Clone, Default)]
struct Compound {
    /// `None` matches any tag (`*` or no tag given)
    tag: Option<CompactString>,
    simples: Vec<SimpleSelector>,
}

/// How a compound relates to the compound on its left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    /// First compound of a complex selector
    None,
    Descendant,
    Child,
}

/// A complex selector: compounds joined by combinators, left-to-right
#[derive(Debug, Clone)]
struct ComplexSelector {
    parts: Vec<(Combinator, Compound)>,
}

/// A parsed selector list
#[derive(Debug, Clone)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Parse a selector string
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        Parser::new(input).parse_list()
    }

    /// Test an element against every selector in the list.
    ///
    /// `nth` is the element's 1-based position among its element
    /// siblings; `ancestors` are `(element, nth)` pairs from the
    /// traversal root down to the element's parent.
    pub fn matches<V: ElementView>(&self, el: &V, nth: usize, ancestors: &[(V, usize)]) -> bool {
        self.selectors
            .iter()
            .any(|complex| complex.matches(el, nth, ancestors))
    }
}

impl ComplexSelector {
    fn matches<V: ElementView>(&self, el: &V, nth: usize, ancestors: &[(V, usize)]) -> bool {
        let last = self.parts.len() - 1;
        if !self.parts[last].1.matches(el, nth) {
            return false;
        }
        self.matches_left(last, ancestors.len(), ancestors)
    }

    /// Match everything left of compound `pi`, given that `pi` matched
    /// and `ancestors[..limit]` are the candidates above it.
    fn matches_left<V: ElementView>(
        &self,
        pi: usize,
        limit: usize,
        ancestors: &[(V, usize)],
    ) -> bool {
        if pi == 0 {
            return true;
        }
        let left = &self.parts[pi - 1].1;
        match self.parts[pi].0 {
            Combinator::None => true,
            Combinator::Child => {
                limit > 0 && {
                    let (parent, parent_nth) = &ancestors[limit - 1];
                    left.matches(parent, *parent_nth)
                        && self.matches_left(pi - 1, limit - 1, ancestors)
                }
            }
            Combinator::Descendant => (0..limit).rev().any(|ai| {
                let (ancestor, ancestor_nth) = &ancestors[ai];
                left.matches(ancestor, *ancestor_nth) && self.matches_left(pi - 1, ai, ancestors)
            }),
        }
    }
}

impl Compound {
    fn matches<V: ElementView>(&self, el: &V, nth: usize) -> bool {
        if let Some(tag) = &self.tag {
            if tag.as_str() != el.tag() {
                return false;
            }
        }
        self.simples.iter().all(|simple| match simple {
            SimpleSelector::Id(id) => el.attr("id") == Some(id.as_str()),
            SimpleSelector::Class(class) => el
                .attr("class")
                .map(|classes| classes.split_whitespace().any(|c| c == class.as_str()))
                .unwrap_or(false),
            SimpleSelector::Attr { name, test } => {
                let value = el.attr(name.as_str());
                match (value, test) {
                    (Some(_), AttrMatch::Exists) => true,
                    (Some(v), AttrMatch::Equals(want)) => v == want.as_str(),
                    (Some(v), AttrMatch::Prefix(want)) => v.starts_with(want.as_str()),
                    (Some(v), AttrMatch::Suffix(want)) => v.ends_with(want.as_str()),
                    (Some(v), AttrMatch::Contains(want)) => v.contains(want.as_str()),
                    (None, _) => false,
                }
            }
            SimpleSelector::NthChild(want) => nth == *want,
        })
    }
}

/// Hand-written recursive-descent selector parser
struct Parser<'s> {
    input: &'s [u8],
    pos: usize,
}

impl<'s> Parser<'s> {
    fn new(input: &'s str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn parse_list(mut self) -> Result<SelectorList, SelectorError> {
        let mut selectors = Vec::new();
        loop {
            selectors.push(self.parse_complex()?);
            self.skip_whitespace();
            if self.eat(b',') {
                continue;
            }
            break;
        }
        if self.pos < self.input.len() {
            return Err(self.unexpected());
        }
        Ok(SelectorList { selectors })
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        self.skip_whitespace();
        let first = self.parse_compound()?;
        let mut parts = vec![(Combinator::None, first)];

        loop {
            let had_space = self.skip_whitespace();
            if self.eat(b'>') {
                self.skip_whitespace();
                if self.at_compound_start() {
                    parts.push((Combinator::Child, self.parse_compound()?));
                } else {
                    return Err(SelectorError::DanglingCombinator { offset: self.pos });
                }
            } else if had_space && self.at_compound_start() {
                parts.push((Combinator::Descendant, self.parse_compound()?));
            } else {
                break;
            }
        }
        Ok(ComplexSelector { parts })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        let mut matched_anything = false;

        if self.eat(b'*') {
            matched_anything = true;
        } else if let Some(ident) = self.parse_ident() {
            compound.tag = Some(lower(ident));
            matched_anything = true;
        }

        loop {
            if self.eat(b'#') {
                let ident = self.expect_ident()?;
                compound.simples.push(SimpleSelector::Id(ident.into()));
            } else if self.eat(b'.') {
                let ident = self.expect_ident()?;
                compound.simples.push(SimpleSelector::Class(ident.into()));
            } else if self.eat(b'[') {
                compound.simples.push(self.parse_attr()?);
            } else if self.eat(b':') {
                compound.simples.push(self.parse_pseudo()?);
            } else {
                break;
            }
            matched_anything = true;
        }

        if !matched_anything {
            return Err(if self.pos >= self.input.len() {
                SelectorError::Empty
            } else {
                self.unexpected()
            });
        }
        Ok(compound)
    }

    fn parse_attr(&mut self) -> Result<SimpleSelector, SelectorError> {
        let open = self.pos - 1;
        self.skip_whitespace();
        let name = lower(self.expect_ident()?);
        self.skip_whitespace();

        let test = if self.eat(b']') {
            return Ok(SimpleSelector::Attr {
                name,
                test: AttrMatch::Exists,
            });
        } else if self.eat_seq(b"^=") {
            AttrMatch::Prefix(self.parse_attr_value()?)
        } else if self.eat_seq(b"$=") {
            AttrMatch::Suffix(self.parse_attr_value()?)
        } else if self.eat_seq(b"*=") {
            AttrMatch::Contains(self.parse_attr_value()?)
        } else if self.eat(b'=') {
            AttrMatch::Equals(self.parse_attr_value()?)
        } else {
            return Err(SelectorError::UnterminatedAttribute { offset: open });
        };

        self.skip_whitespace();
        if !self.eat(b']') {
            return Err(SelectorError::UnterminatedAttribute { offset: open });
        }
        Ok(SimpleSelector::Attr { name, test })
    }

    fn parse_attr_value(&mut self) -> Result<CompactString, SelectorError> {
        self.skip_whitespace();
        if let Some(quote) = self.peek().filter(|c| *c == b'"' || *c == b'\'') {
            let open = self.pos;
            self.pos += 1;
            let start = self.pos;
            while let Some(c) = self.peek() {
                if c == quote {
                    let value = self.slice(start, self.pos);
                    self.pos += 1;
                    return Ok(value.into());
                }
                self.pos += 1;
            }
            Err(SelectorError::UnterminatedString { offset: open })
        } else {
            // Bare value: everything up to `]` or whitespace
            let start = self.pos;
            while let Some(c) = self.peek() {
                if c == b']' || c.is_ascii_whitespace() {
                    break;
                }
                self.pos += 1;
            }
            Ok(self.slice(start, self.pos).into())
        }
    }

    fn parse_pseudo(&mut self) -> Result<SimpleSelector, SelectorError> {
        let colon = self.pos - 1;
        let name = self.expect_ident()?;
        if name != "nth-child" {
            return Err(SelectorError::UnsupportedPseudo {
                name: name.into(),
                offset: colon,
            });
        }
        if !self.eat(b'(') {
            return Err(SelectorError::InvalidNthChild { offset: self.pos });
        }
        self.skip_whitespace();
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits = self.slice(start, self.pos);
        self.skip_whitespace();
        if digits.is_empty() || !self.eat(b')') {
            return Err(SelectorError::InvalidNthChild { offset: colon });
        }
        let n: usize = digits
            .parse()
            .map_err(|_| SelectorError::InvalidNthChild { offset: colon })?;
        if n == 0 {
            return Err(SelectorError::InvalidNthChild { offset: colon });
        }
        Ok(SimpleSelector::NthChild(n))
    }

    // ========== Cursor helpers ==========

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn eat(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_seq(&mut self, seq: &[u8]) -> bool {
        if self.input[self.pos..].starts_with(seq) {
            self.pos += seq.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn at_compound_start(&self) -> bool {
        matches!(
            self.peek(),
            Some(c) if c == b'*' || c == b'#' || c == b'.' || c == b'[' || c == b':' || is_ident_char(c)
        )
    }

    fn parse_ident(&mut self) -> Option<&'s str> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        (self.pos > start).then(|| self.slice_str(start, self.pos))
    }

    fn expect_ident(&mut self) -> Result<&'s str, SelectorError> {
        self.parse_ident().ok_or_else(|| self.unexpected())
    }

    fn slice(&self, start: usize, end: usize) -> &'s str {
        self.slice_str(start, end)
    }

    fn slice_str(&self, start: usize, end: usize) -> &'s str {
        // The cursor only stops on ASCII boundaries
        std::str::from_utf8(&self.input[start..end]).unwrap_or_default()
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(c) => SelectorError::UnexpectedChar {
                ch: c as char,
                offset: self.pos,
            },
            None => SelectorError::Empty,
        }
    }
}

#[inline]
fn is_ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_'
}

fn lower(s: &str) -> CompactString {
    CompactString::from(s.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_loom::Document;

    fn matches(selector: &str, source: &str, target_id: &str) -> bool {
        let list = SelectorList::parse(selector).expect("selector parses");
        let (doc, _) = Document::parse(source);
        let root = doc.root_element().unwrap();

        // Walk with ancestry to find the target and evaluate it
        fn walk<'d>(
            el: axon_loom::ElementRef<'d>,
            nth: usize,
            ancestors: &mut Vec<(axon_loom::ElementRef<'d>, usize)>,
            list: &SelectorList,
            target_id: &str,
            found: &mut Option<bool>,
        ) {
            if el.attr("id") == Some(target_id) {
                *found = Some(list.matches(&el, nth, ancestors));
                return;
            }
            ancestors.push((el, nth));
            for (i, child) in el.children().into_iter().enumerate() {
                walk(child, i + 1, ancestors, list, target_id, found);
            }
            ancestors.pop();
        }

        let mut found = None;
        walk(root, 1, &mut Vec::new(), &list, target_id, &mut found);
        found.expect("target element present")
    }

    #[test]
    fn test_tag_selector() {
        assert!(matches("p", r#"<div><p id="t"></p></div>"#, "t"));
        assert!(!matches("span", r#"<div><p id="t"></p></div>"#, "t"));
    }

    #[test]
    fn test_universal_selector() {
        assert!(matches("*", r#"<div><p id="t"></p></div>"#, "t"));
    }

    #[test]
    fn test_id_and_class() {
        let source = r#"<div><p id="t" class="note warn"></p></div>"#;
        assert!(matches("#t", source, "t"));
        assert!(matches("p#t", source, "t"));
        assert!(matches(".note", source, "t"));
        assert!(matches(".warn", source, "t"));
        assert!(!matches(".missing", source, "t"));
        // Class matching is token-wise, not substring
        assert!(!matches(".no", source, "t"));
    }

    #[test]
    fn test_attribute_tests() {
        let source = r#"<div><input id="t" type="checkbox" name="opt-in"></div>"#;
        assert!(matches("[type]", source, "t"));
        assert!(matches("[type=checkbox]", source, "t"));
        assert!(matches(r#"[type="checkbox"]"#, source, "t"));
        assert!(matches("[name^=opt]", source, "t"));
        assert!(matches("[name$=in]", source, "t"));
        assert!(matches("[name*=t-i]", source, "t"));
        assert!(!matches("[type=radio]", source, "t"));
        assert!(!matches("[missing]", source, "t"));
    }

    #[test]
    fn test_descendant_combinator() {
        let source = r#"<main><section><p id="t"></p></section></main>"#;
        assert!(matches("main p", source, "t"));
        assert!(matches("section p", source, "t"));
        assert!(matches("main section p", source, "t"));
        assert!(!matches("article p", source, "t"));
    }

    #[test]
    fn test_child_combinator() {
        let source = r#"<main><section><p id="t"></p></section></main>"#;
        assert!(matches("section > p", source, "t"));
        assert!(matches("main > section > p", source, "t"));
        assert!(!matches("main > p", source, "t"));
    }

    #[test]
    fn test_nth_child() {
        let source = r#"<ul><li>a</li><li id="t">b</li></ul>"#;
        assert!(matches("li:nth-child(2)", source, "t"));
        assert!(!matches("li:nth-child(1)", source, "t"));
    }

    #[test]
    fn test_selector_list() {
        let source = r#"<div><p id="t"></p></div>"#;
        assert!(matches("span, p", source, "t"));
        assert!(!matches("span, em", source, "t"));
    }

    #[test]
    fn test_tag_matching_is_case_insensitive_on_selector_side() {
        assert!(matches("P", r#"<div><p id="t"></p></div>"#, "t"));
    }

    #[test]
    fn test_malformed_selectors_are_errors() {
        assert!(SelectorList::parse("").is_err());
        assert!(SelectorList::parse("  ").is_err());
        assert!(SelectorList::parse("div >").is_err());
        assert!(SelectorList::parse("[name").is_err());
        assert!(SelectorList::parse("[name='x]").is_err());
        assert!(SelectorList::parse(":hover").is_err());
        assert!(SelectorList::parse("p:nth-child(0)").is_err());
        assert!(SelectorList::parse("p:nth-child(x)").is_err());
        assert!(SelectorList::parse("p ~ q").is_err());
        assert!(SelectorList::parse("p,,q").is_err());
    }

    #[test]
    fn test_error_messages_name_the_problem() {
        let err = SelectorList::parse(":hover").unwrap_err();
        assert_eq!(err.to_string(), "unsupported pseudo-class `:hover` at byte 0");
    }
}
