//! Error types for leptonica-morph

use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] leptonica_core::Error),

    /// Structuring element radius was negative
    #[error("invalid radius: {0} (must be >= 0)")]
    InvalidRadius(i32),

    /// Rank was outside the closed unit interval
    #[error("invalid rank: {0} (must be in [0.0, 1.0])")]
    InvalidRank(f32),

    /// A source pixel fell outside the 0..=255 domain the sliding
    /// histogram is built for.
    #[error("pixel value {0} out of domain 0..=255")]
    ValueOutOfDomain(u32),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
