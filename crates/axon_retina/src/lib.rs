//! # axon_retina
//!
//! Retina - Accessibility tree reconstruction and queries for axon.
//!
//! ## Name Origin
//!
//! The **retina** is where raw light becomes perception. `axon_retina`
//! is where a raw markup tree becomes a semantic one: for every element
//! it computes the accessible role, name, description, value, and state,
//! assembling the immutable [`AxNode`](axon_figure::AxNode) snapshot and
//! answering structural queries over it.
//!
//! ## Pipeline
//!
//! ```text
//! ElementView host ──▶ TreeBuilder ──▶ AxNode snapshot ──▶ TreeIndex / queries
//!                      (role, name,
//!                       state per node)
//! ```
//!
//! Everything here is synchronous and pure: building and querying are
//! side-effect-free reads over an immutable input, so independent trees
//! may be built in parallel freely.
//!
//! # Example
//!
//! ```
//! use axon_loom::Document;
//! use axon_retina::{build, find_by_role};
//!
//! let (doc, _) = Document::parse(r#"<main><button>Save</button></main>"#);
//! let tree = build(&doc.root_element().unwrap());
//! let buttons = find_by_role(&tree, "button");
//! assert_eq!(buttons[0].name, "Save");
//! ```

mod builder;
mod index;
mod name;
mod query;
mod role;
mod selector;
mod state;

pub use builder::{build, build_node, BuildOptions, TreeBuilder};
pub use index::{build_index, TreeIndex, ROOT_PATH};
pub use name::{resolve_description, resolve_name};
pub use query::{find_by_name, find_by_role, query, query_one};
pub use role::resolve_role;
pub use selector::{SelectorError, SelectorList};
pub use state::extract_state;
