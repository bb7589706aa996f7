//! Leptonica - Image processing library for Rust
//!
//! This is a Rust port of a slice of the [Leptonica](http://www.leptonica.org/)
//! image processing library: flat (disc) rank-order morphology, plus the
//! random-forest training primitives used to classify image regions.
//!
//! # Overview
//!
//! - Morphological operations: disc erosion, median, and dilation filters,
//!   with masked variants for operating on a region of interest.
//! - Random forest training primitives: split scorers, stop predicates, and
//!   option validation for growing a single decision tree. Ensemble
//!   orchestration (bagging, parallel tree building, serialization) is out
//!   of scope for this crate.
//!
//! # Example
//!
//! ```
//! use leptonica::{Pix, PixelDepth, disc_median};
//!
//! let src = Pix::new(5, 5, PixelDepth::Bit8).unwrap();
//! let mut dst = Pix::new(5, 5, PixelDepth::Bit8).unwrap();
//! disc_median(&src, &mut dst, 2).unwrap();
//! assert_eq!(dst.width(), 5);
//! ```

pub use leptonica_core::*;
pub use leptonica_morph::*;
pub use leptonica_forest::*;
