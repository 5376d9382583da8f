//! Host capability contract.
//!
//! Anything that can show axon a markup element (a parsed document, a
//! remote page snapshot, a hand-built test fixture) implements
//! [`ElementView`]. The resolution engine reads elements exclusively
//! through this trait, so it never learns which host it is running
//! against.
//!
//! Implementations are lightweight handles (a copyable reference into a
//! document, an `Rc`-backed node): `children` and `element_by_id` hand out
//! new handles by value.

use axon_lumen::CompactString;

use crate::ax::Rect;

/// Read-only view over a single markup element.
///
/// Native-property accessors default to "not applicable" so hosts without
/// form semantics only implement the structural methods. Attribute reads
/// must distinguish a present-but-empty attribute from an absent one;
/// name computation depends on that difference.
pub trait ElementView: Sized + Clone {
    /// Lowercase tag identity
    fn tag(&self) -> &str;

    /// Attribute value by (lowercase) name; `Some("")` when the attribute
    /// is present with an empty value
    fn attr(&self, name: &str) -> Option<&str>;

    /// Element children in document order
    fn children(&self) -> Vec<Self>;

    /// Concatenated text of all descendant text nodes, untrimmed
    fn text_content(&self) -> CompactString;

    /// First element with the given id in this element's document
    fn element_by_id(&self, id: &str) -> Option<Self>;

    /// Attribute presence; presence alone carries meaning for `alt`
    #[inline]
    fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Native disabled state
    fn is_disabled(&self) -> bool {
        false
    }

    /// Native hidden state
    fn is_hidden(&self) -> bool {
        false
    }

    /// Native readonly state
    fn is_read_only(&self) -> bool {
        false
    }

    /// Native required state
    fn is_required(&self) -> bool {
        false
    }

    /// Native checkedness; `None` when the element is not checkable
    fn checked(&self) -> Option<bool> {
        None
    }

    /// Current form value; `None` when the element has no value concept
    fn value(&self) -> Option<CompactString> {
        None
    }

    /// Form-control type discriminator
    fn input_type(&self) -> Option<&str> {
        self.attr("type")
    }

    /// Trimmed text of the first associated label element
    fn label_text(&self) -> Option<CompactString> {
        None
    }

    /// Bounding box at snapshot time
    fn bounds(&self) -> Rect {
        Rect::ZERO
    }
}
