//! ARIA state extraction.
//!
//! Each field is independent: a native property wins where the host has
//! one, the matching `aria-*` attribute fills in otherwise. Enumerated
//! tri-states pass through verbatim: `aria-checked="mixed"` stays the
//! string `"mixed"`.

use axon_figure::{AxState, ElementView, ToggleState};
use axon_lumen::CompactString;

/// Extract the state bag of an element
pub fn extract_state<V: ElementView>(el: &V) -> AxState {
    AxState {
        disabled: el.is_disabled() || aria_true(el, "aria-disabled"),
        hidden: el.is_hidden() || aria_true(el, "aria-hidden"),
        expanded: aria_token(el, "aria-expanded"),
        checked: checked_state(el),
        selected: aria_token(el, "aria-selected"),
        pressed: aria_token(el, "aria-pressed"),
        readonly: el.is_read_only() || aria_true(el, "aria-readonly"),
        required: el.is_required() || aria_true(el, "aria-required"),
        busy: aria_true(el, "aria-busy"),
        invalid: aria_true(el, "aria-invalid"),
    }
}

#[inline]
fn aria_true<V: ElementView>(el: &V, attr: &str) -> bool {
    el.attr(attr) == Some("true")
}

#[inline]
fn aria_token<V: ElementView>(el: &V, attr: &str) -> Option<CompactString> {
    el.attr(attr).map(CompactString::from)
}

/// A checked native property wins; otherwise the raw `aria-checked`
/// token flows through, unvalidated.
fn checked_state<V: ElementView>(el: &V) -> Option<ToggleState> {
    match el.checked() {
        Some(true) => Some(ToggleState::Flag(true)),
        _ => el
            .attr("aria-checked")
            .map(|token| ToggleState::Token(CompactString::from(token))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_loom::Document;

    fn state_of_root(source: &str) -> AxState {
        let (doc, _) = Document::parse(source);
        extract_state(&doc.root_element().unwrap())
    }

    #[test]
    fn test_native_disabled() {
        let state = state_of_root("<button disabled>x</button>");
        assert!(state.disabled);
    }

    #[test]
    fn test_aria_disabled_fallback() {
        let state = state_of_root(r#"<div aria-disabled="true"></div>"#);
        assert!(state.disabled);
        // Anything but the literal "true" is not disabled
        let state = state_of_root(r#"<div aria-disabled="yes"></div>"#);
        assert!(!state.disabled);
    }

    #[test]
    fn test_hidden_sources() {
        assert!(state_of_root("<div hidden></div>").hidden);
        assert!(state_of_root(r#"<div aria-hidden="true"></div>"#).hidden);
        assert!(!state_of_root("<div></div>").hidden);
    }

    #[test]
    fn test_readonly_and_required() {
        let state = state_of_root("<input readonly required>");
        assert!(state.readonly);
        assert!(state.required);

        let state = state_of_root(r#"<div aria-readonly="true" aria-required="true"></div>"#);
        assert!(state.readonly);
        assert!(state.required);
    }

    #[test]
    fn test_aria_only_booleans() {
        let state = state_of_root(r#"<div aria-busy="true" aria-invalid="true"></div>"#);
        assert!(state.busy);
        assert!(state.invalid);
        assert!(!state_of_root("<div></div>").busy);
    }

    #[test]
    fn test_native_checked_wins() {
        let state = state_of_root(r#"<input type="checkbox" checked aria-checked="false">"#);
        assert_eq!(state.checked, Some(ToggleState::Flag(true)));
    }

    #[test]
    fn test_unchecked_falls_back_to_aria_token() {
        let state = state_of_root(r#"<input type="checkbox" aria-checked="mixed">"#);
        assert_eq!(
            state.checked,
            Some(ToggleState::Token(CompactString::from("mixed")))
        );
    }

    #[test]
    fn test_checked_absent_when_no_source() {
        let state = state_of_root("<div></div>");
        assert_eq!(state.checked, None);
    }

    #[test]
    fn test_tri_state_passthrough() {
        let state = state_of_root(
            r#"<div aria-expanded="false" aria-selected="true" aria-pressed="mixed"></div>"#,
        );
        assert_eq!(state.expanded.as_deref(), Some("false"));
        assert_eq!(state.selected.as_deref(), Some("true"));
        assert_eq!(state.pressed.as_deref(), Some("mixed"));
    }
}
