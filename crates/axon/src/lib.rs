//! # Axon
//!
//! Accessibility tree reconstruction toolchain for markup, written in Rust.
//!
//! This crate re-exports all axon sub-crates for unified documentation.
//!
//! ## Crates
//!
//! - [`lumen`] - Shared toolbox: string types and static markup/ARIA tables
//! - [`figure`] - The accessibility node model and host capability trait
//! - [`loom`] - Static markup parser and host document
//! - [`retina`] - Role/name/state resolution, tree building, and queries

/// Shared toolbox: string types and static markup/ARIA tables.
pub use axon_lumen as lumen;

/// The accessibility node model and host capability trait.
pub use axon_figure as figure;

/// Static markup parser and host document.
pub use axon_loom as loom;

/// Role/name/state resolution, tree building, and queries.
pub use axon_retina as retina;
