//! Markup parse diagnostics.
//!
//! Host parsers recover rather than fail: problems are recorded as
//! [`ParseError`] values alongside the best-effort tree.

use serde::Serialize;
use thiserror::Error;

/// Recoverable markup parse error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    #[error("missing end tag")]
    MissingEndTag,
    #[error("invalid end tag")]
    InvalidEndTag,
    #[error("missing end tag name")]
    MissingEndTagName,
    #[error("unexpected end of input in tag")]
    EofInTag,
    #[error("unexpected end of input in comment")]
    EofInComment,
}

/// A recoverable parse error with its byte offset in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[error("{code} at byte {offset}")]
pub struct ParseError {
    pub code: ErrorCode,
    pub offset: usize,
}

impl ParseError {
    pub const fn new(code: ErrorCode, offset: usize) -> Self {
        Self { code, offset }
    }
}
