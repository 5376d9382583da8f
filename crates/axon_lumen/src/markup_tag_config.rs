//! Static markup and ARIA configuration tables.
//!
//! Every table here is a compile-time perfect hash table so lookups during
//! tree building are branch-free and allocation-free.

use phf::{phf_map, phf_set};

/// HTML void elements. These never take children and never push onto the
/// parser's open-element stack.
static VOID_TAGS: phf::Set<&'static str> = phf_set! {
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link",
    "meta", "param", "source", "track", "wbr",
};

/// Check if a tag is a void element
#[inline]
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(tag)
}

/// How an element's implicit ARIA role is derived when no explicit `role`
/// attribute is present.
///
/// The table below is the whole mapping; a tag missing from it has no
/// implicit role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRule {
    /// The tag always maps to this role.
    Tag(&'static str),
    /// Anchors: `link` only when an `href` attribute is present.
    AnchorWithHref,
    /// Inputs: sub-keyed by the `type` attribute, see [`input_type_role`].
    ByInputType,
}

/// Implicit role rules keyed by lowercase tag name.
static IMPLICIT_ROLES: phf::Map<&'static str, RoleRule> = phf_map! {
    "a" => RoleRule::AnchorWithHref,
    "button" => RoleRule::Tag("button"),
    "input" => RoleRule::ByInputType,
    "img" => RoleRule::Tag("img"),
    "nav" => RoleRule::Tag("navigation"),
    "main" => RoleRule::Tag("main"),
    "header" => RoleRule::Tag("banner"),
    "footer" => RoleRule::Tag("contentinfo"),
    "aside" => RoleRule::Tag("complementary"),
    "section" => RoleRule::Tag("region"),
    "article" => RoleRule::Tag("article"),
    "h1" => RoleRule::Tag("heading"),
    "h2" => RoleRule::Tag("heading"),
    "h3" => RoleRule::Tag("heading"),
    "h4" => RoleRule::Tag("heading"),
    "h5" => RoleRule::Tag("heading"),
    "h6" => RoleRule::Tag("heading"),
    "ul" => RoleRule::Tag("list"),
    "ol" => RoleRule::Tag("list"),
    "li" => RoleRule::Tag("listitem"),
    "table" => RoleRule::Tag("table"),
    "form" => RoleRule::Tag("form"),
    "select" => RoleRule::Tag("combobox"),
    "textarea" => RoleRule::Tag("textbox"),
    "dialog" => RoleRule::Tag("dialog"),
    "hr" => RoleRule::Tag("separator"),
    "progress" => RoleRule::Tag("progressbar"),
    "meter" => RoleRule::Tag("meter"),
};

/// Look up the implicit role rule for a lowercase tag name
#[inline]
pub fn implicit_role_rule(tag: &str) -> Option<&'static RoleRule> {
    IMPLICIT_ROLES.get(tag)
}

/// Roles for `<input>` sub-keyed by the `type` attribute.
static INPUT_TYPE_ROLES: phf::Map<&'static str, &'static str> = phf_map! {
    "checkbox" => "checkbox",
    "radio" => "radio",
    "button" => "button",
    "submit" => "button",
    "reset" => "button",
    "range" => "slider",
    "search" => "searchbox",
    "email" => "textbox",
    "tel" => "textbox",
    "url" => "textbox",
    "text" => "textbox",
};

/// Role for an `<input>` with the given `type` attribute value.
/// Unknown and absent types fall back to `textbox`.
#[inline]
pub fn input_type_role(input_type: Option<&str>) -> &'static str {
    input_type
        .and_then(|t| INPUT_TYPE_ROLES.get(t).copied())
        .unwrap_or("textbox")
}

/// Tags whose accessible name may come from their own text content
/// (the last resort of the name computation).
static TEXT_BEARING_TAGS: phf::Set<&'static str> = phf_set! {
    "button", "a", "h1", "h2", "h3", "h4", "h5", "h6",
};

/// Check if a tag may take its accessible name from text content
#[inline]
pub fn is_text_bearing_tag(tag: &str) -> bool {
    TEXT_BEARING_TAGS.contains(tag)
}

/// Attribute names captured verbatim onto the built node, in capture order.
/// Attributes outside this list still drive role/name/state resolution;
/// they are only dropped from the serialized attribute bag.
pub static CAPTURED_ATTRIBUTES: &[&str] = &[
    "id",
    "class",
    "type",
    "href",
    "src",
    "alt",
    "title",
    "placeholder",
    "aria-live",
    "aria-atomic",
    "aria-relevant",
];

/// Tags that participate in `<label>` association.
static LABELABLE_TAGS: phf::Set<&'static str> = phf_set! {
    "button", "input", "meter", "output", "progress", "select", "textarea",
};

/// Check if a tag is a labelable form control
#[inline]
pub fn is_labelable_tag(tag: &str) -> bool {
    LABELABLE_TAGS.contains(tag)
}

/// Tags on which the `disabled` boolean attribute is honored.
static DISABLEABLE_TAGS: phf::Set<&'static str> = phf_set! {
    "button", "fieldset", "input", "optgroup", "option", "select", "textarea",
};

/// Check if a tag honors the `disabled` attribute
#[inline]
pub fn is_disableable_tag(tag: &str) -> bool {
    DISABLEABLE_TAGS.contains(tag)
}

/// Tags on which the `readonly` boolean attribute is honored.
static READONLY_TAGS: phf::Set<&'static str> = phf_set! {
    "input", "textarea",
};

/// Check if a tag honors the `readonly` attribute
#[inline]
pub fn is_readonly_capable_tag(tag: &str) -> bool {
    READONLY_TAGS.contains(tag)
}

/// Tags on which the `required` boolean attribute is honored.
static REQUIRED_TAGS: phf::Set<&'static str> = phf_set! {
    "input", "select", "textarea",
};

/// Check if a tag honors the `required` attribute
#[inline]
pub fn is_required_capable_tag(tag: &str) -> bool {
    REQUIRED_TAGS.contains(tag)
}
