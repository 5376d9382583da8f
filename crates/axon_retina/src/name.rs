//! Accessible name and description computation.
//!
//! The name is resolved from a strict priority ladder of sources; the
//! first *present* source wins, even when its value is empty (an
//! explicitly empty `alt` is a deliberate "no name"). Internally each
//! rung yields `Option<_>`; the absence of every source collapses to the
//! empty string only at the public boundary.
//!
//! Referenced-id joins (`aria-labelledby`, `aria-describedby`) are
//! normalized: unresolved ids and empty referents are dropped and the
//! surviving texts joined with a single space.

use axon_figure::ElementView;
use axon_lumen::{is_text_bearing_tag, CompactString};

/// Resolve the accessible name of an element
pub fn resolve_name<V: ElementView>(el: &V) -> CompactString {
    compute_name(el).unwrap_or_default()
}

/// Resolve the accessible description of an element
pub fn resolve_description<V: ElementView>(el: &V) -> CompactString {
    if let Some(ids) = el.attr("aria-describedby") {
        return join_referenced_text(el, ids);
    }
    el.attr("aria-description")
        .map(CompactString::from)
        .unwrap_or_default()
}

fn compute_name<V: ElementView>(el: &V) -> Option<CompactString> {
    // 1. aria-labelledby: id list, resolved in this element's document
    if let Some(ids) = el.attr("aria-labelledby") {
        return Some(join_referenced_text(el, ids));
    }

    // 2. aria-label, raw
    if let Some(label) = el.attr("aria-label") {
        return Some(CompactString::from(label));
    }

    // 3. Associated label element
    if let Some(label) = el.label_text() {
        return Some(label);
    }

    // 4. alt: presence terminates the search even when empty
    if let Some(alt) = el.attr("alt") {
        return Some(CompactString::from(alt));
    }

    // 5. title, raw
    if let Some(title) = el.attr("title") {
        return Some(CompactString::from(title));
    }

    // 6. placeholder, only while the element holds no value
    if let Some(placeholder) = el.attr("placeholder") {
        if el.value().map_or(true, |v| v.is_empty()) {
            return Some(CompactString::from(placeholder));
        }
    }

    // 7. Own text, for text-bearing roles only
    if is_text_bearing_tag(el.tag()) {
        return Some(CompactString::from(el.text_content().trim()));
    }

    None
}

/// Resolve a whitespace-separated id list to the joined, trimmed text of
/// the referenced elements. Unresolved ids contribute nothing.
fn join_referenced_text<V: ElementView>(scope: &V, ids: &str) -> CompactString {
    let mut out = String::new();
    for id in ids.split_whitespace() {
        let Some(referenced) = scope.element_by_id(id) else {
            continue;
        };
        let text = referenced.text_content();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(text);
    }
    CompactString::from(out)
}
