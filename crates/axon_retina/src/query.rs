//! Structural queries over elements and built trees.
//!
//! Selector queries run against the element source and rebuild each
//! match into a fresh snapshot subtree. Role and name searches are
//! filters over the lazy pre-order iterator of an already-built tree.
//! All of this is pure: re-querying never mutates anything.

use axon_figure::{AxNode, ElementView};

use crate::builder::TreeBuilder;
use crate::selector::SelectorList;

/// Find all elements matching a selector, each rebuilt as a fresh
/// accessibility subtree.
///
/// A malformed selector is reported as an empty result; the cause is
/// logged for diagnostics.
pub fn query<V: ElementView>(root: &V, selector: &str) -> Vec<AxNode> {
    collect_matches(root, selector, None)
}

/// Find the first element matching a selector
pub fn query_one<V: ElementView>(root: &V, selector: &str) -> Option<AxNode> {
    collect_matches(root, selector, Some(1)).into_iter().next()
}

fn collect_matches<V: ElementView>(
    root: &V,
    selector: &str,
    limit: Option<usize>,
) -> Vec<AxNode> {
    let list = match SelectorList::parse(selector) {
        Ok(list) => list,
        Err(cause) => {
            tracing::warn!(selector, %cause, "rejected malformed selector");
            return Vec::new();
        }
    };

    let builder = TreeBuilder::new();
    let mut out = Vec::new();
    let mut ancestors = Vec::new();
    walk(
        root, 1, &mut ancestors, &list, &builder, limit, &mut out,
    );
    out
}

/// Depth-first walk carrying the ancestor chain for combinator matching.
/// Returns `true` once the match limit is reached.
fn walk<V: ElementView>(
    el: &V,
    nth: usize,
    ancestors: &mut Vec<(V, usize)>,
    list: &SelectorList,
    builder: &TreeBuilder,
    limit: Option<usize>,
    out: &mut Vec<AxNode>,
) -> bool {
    if list.matches(el, nth, ancestors) {
        out.push(builder.build_node(el));
        if limit.is_some_and(|l| out.len() >= l) {
            return true;
        }
    }

    ancestors.push((el.clone(), nth));
    for (i, child) in el.children().iter().enumerate() {
        if walk(child, i + 1, ancestors, list, builder, limit, out) {
            ancestors.pop();
            return true;
        }
    }
    ancestors.pop();
    false
}

/// Find every node whose computed role equals `role`, in pre-order
pub fn find_by_role<'t>(tree: &'t AxNode, role: &str) -> Vec<&'t AxNode> {
    tree.iter().filter(|node| node.role == role).collect()
}

/// Find every node whose name matches, in pre-order.
///
/// With `exact` the name must equal `name`; otherwise substring
/// containment is enough.
pub fn find_by_name<'t>(tree: &'t AxNode, name: &str, exact: bool) -> Vec<&'t AxNode> {
    tree.iter()
        .filter(|node| {
            if exact {
                node.name == name
            } else {
                node.name.contains(name)
            }
        })
        .collect()
}
