//! leptonica-morph - Disc (flat) rank-order morphology
//!
//! This crate provides minimum, median, and maximum filtering with a disc
//! structuring element, via a sliding histogram that updates in O(radius)
//! per output pixel instead of rebuilding the window from scratch. Masked
//! variants restrict which source pixels may contribute to the running
//! histogram, for operating on a region of interest.

pub mod disc;
mod error;

pub use disc::{
    DiscGeometry, PixDiscMorphology, SlidingHistogram, disc_dilation, disc_dilation_masked,
    disc_erosion, disc_erosion_masked, disc_median, disc_median_masked, disc_rank_order,
    disc_rank_order_masked,
};
pub use error::{MorphError, MorphResult};
