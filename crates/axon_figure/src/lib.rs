//! # axon_figure
//!
//! Figure - The accessibility node model for axon.
//!
//! ## Name Origin
//!
//! A **figure** is the form a study captures: not the sitter, the
//! rendering of the sitter. `axon_figure` defines the rendered form of a
//! markup element, the [`AxNode`] snapshot tree, together with the
//! [`ElementView`] capability contract any host must satisfy to be drawn.
//!
//! ## Contents
//!
//! - [`ax`] - the immutable accessibility snapshot types ([`AxNode`],
//!   [`AxState`], [`ToggleState`], [`Rect`]) and pre-order iteration
//! - [`element_view`] - the host capability trait
//! - [`errors`] - markup parse diagnostics shared with host parsers

pub mod ax;
pub mod element_view;
pub mod errors;

pub use ax::{AxNode, AxState, PreOrder, Rect, ToggleState};
pub use element_view::ElementView;
pub use errors::{ErrorCode, ParseError};
