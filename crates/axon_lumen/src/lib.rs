//! Lumen - The shared toolbox for axon.
//!
//! This crate provides the foundational utilities and static configuration
//! tables for the axon accessibility toolchain, the way a lumen is the
//! channel a vessel carries everything through.
//!
//! # Modules
//!
//! - **Markup tables**: void-tag set, implicit ARIA role rules, captured
//!   attribute allow-list, form-control tag sets
//! - **Shared re-exports**: string, hash-map, and small-vector types used
//!   across the workspace
//!
//! # Example
//!
//! ```
//! use axon_lumen::{implicit_role_rule, is_void_tag, RoleRule};
//!
//! assert!(is_void_tag("img"));
//! assert_eq!(implicit_role_rule("nav"), Some(&RoleRule::Tag("navigation")));
//! ```

pub mod markup_tag_config;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;
pub use compact_str::CompactString as String;

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};

// Re-export phf for compile-time perfect hash functions
pub use phf::{phf_map, phf_set, Map as PhfMap, Set as PhfSet};

// Re-export smallvec for stack-optimized collections
pub use smallvec::{smallvec, SmallVec};

pub use markup_tag_config::*;
