//! Crate error type.
//!
//! The core is error-free by construction: reconciliation and cell
//! assignment cannot fail. The only fatal conditions are building a clock
//! without a face and formatting a duration with an unknown token.

use thiserror::Error;

/// Errors surfaced by the clock controller and its collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// A [`FlipClock`](crate::FlipClock) was built without a face.
    #[error("a clock face is required")]
    MissingFace,

    /// A duration format pattern contained an unrecognized token.
    #[error("invalid duration format token: {0}")]
    InvalidFormatToken(String),
}
