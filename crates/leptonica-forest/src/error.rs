//! Error types for leptonica-forest

use thiserror::Error;

/// Errors that can occur while configuring or running the forest primitives.
#[derive(Debug, Error)]
pub enum ForestError {
    /// `NodeComplexityStop`'s tau parameter was outside the open interval `(0, 1)`.
    #[error("invalid tau: {0} (must be in (0.0, 1.0))")]
    InvalidTau(f64),

    /// An options builder was given an unrecognised policy tag.
    #[error("invalid option: {0}")]
    InvalidOption(String),
}

/// Result type for forest primitives.
pub type ForestResult<T> = Result<T, ForestError>;
