//! # axon_loom
//!
//! Loom - Static markup parser and host document for axon.
//!
//! ## Name Origin
//!
//! A **loom** turns loose thread into cloth. `axon_loom` turns raw markup
//! text into a woven [`Document`] tree that the rest of the toolchain can
//! inspect through the [`ElementView`](axon_figure::ElementView)
//! capability contract.
//!
//! The parser is tolerant the way markup parsers must be: mismatched and
//! unclosed tags are recovered from and recorded as
//! [`ParseError`](axon_figure::ParseError) diagnostics, never raised.
//!
//! # Example
//!
//! ```
//! use axon_figure::ElementView;
//! use axon_loom::Document;
//!
//! let (doc, errors) = Document::parse("<main><h1>Title</h1></main>");
//! assert!(errors.is_empty());
//! assert_eq!(doc.root_element().unwrap().tag(), "main");
//! ```

mod document;
mod parser;
pub mod tokenizer;

pub use document::{Document, ElementRef};
pub use parser::Parser;
