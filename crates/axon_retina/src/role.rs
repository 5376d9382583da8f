//! Role resolution.
//!
//! An explicit `role` attribute wins unvalidated; otherwise the static
//! rule table in `axon_lumen` decides. Always returns a string; an
//! unmapped element resolves to the empty role.

use axon_figure::ElementView;
use axon_lumen::{implicit_role_rule, input_type_role, CompactString, RoleRule};

/// Resolve the accessibility role of an element
pub fn resolve_role<V: ElementView>(el: &V) -> CompactString {
    if let Some(role) = el.attr("role") {
        // An empty role attribute does not name a role; fall through to
        // the implicit mapping
        if !role.is_empty() {
            return CompactString::from(role);
        }
    }

    match implicit_role_rule(el.tag()) {
        Some(RoleRule::Tag(role)) => CompactString::from(*role),
        Some(RoleRule::AnchorWithHref) => {
            if el.has_attr("href") {
                CompactString::from("link")
            } else {
                CompactString::default()
            }
        }
        Some(RoleRule::ByInputType) => CompactString::from(input_type_role(el.input_type())),
        None => CompactString::default(),
    }
}
