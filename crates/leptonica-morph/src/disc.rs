//! Disc (flat, circular) rank-order morphology
//!
//! Implements minimum, median and maximum filtering with a disc structuring
//! element of arbitrary integer radius, plus masked variants that restrict
//! which source pixels may contribute to the running distribution.
//!
//! # Algorithm
//!
//! The disc is approximated row by row with a half-width table (see
//! [`DiscGeometry`]); a length-256 histogram (see [`SlidingHistogram`]) is
//! swept across each image row in raster order. Moving the window one
//! column to the right only changes a thin strip of pixels at the disc's
//! left and right edges, so each column step costs O(radius) rather than
//! O(radius^2) for a full window rebuild.
//!
//! # Reference
//!
//! Ported from Leptonica's disc rank-order morphology, following the same
//! sliding-histogram shape as the rectangular two-histogram rank filter
//! elsewhere in this workspace, specialised to a disc footprint.

use crate::{MorphError, MorphResult};
use leptonica_core::{Read2D, Write2D};

/// Half-width table for a disc structuring element of a given radius.
///
/// `half_width(k)` is the number of columns the disc extends to either side
/// of its center at vertical offset `k` rows away. The table is
/// non-increasing in `k` by construction, which the sliding-histogram sweep
/// relies on to stop scanning early.
#[derive(Debug, Clone)]
pub struct DiscGeometry {
    half_widths: Vec<i32>,
}

impl DiscGeometry {
    /// Build the half-width table for a disc of the given `radius`.
    pub fn build(radius: i32) -> MorphResult<Self> {
        if radius < 0 {
            return Err(MorphError::InvalidRadius(radius));
        }
        let radius = radius as usize;
        let mut half_widths = vec![0i32; radius + 1];
        half_widths[0] = radius as i32;
        let r2 = (radius * radius) as f64;
        for k in 1..=radius {
            let r = k as f64 - 0.5;
            half_widths[k] = (r2 - r * r).sqrt().round() as i32;
        }
        Ok(Self { half_widths })
    }

    /// Radius this table was built for.
    pub fn radius(&self) -> i32 {
        self.half_widths[0]
    }

    /// Half-width of the disc at vertical offset `k` rows from center.
    #[inline]
    pub fn half_width(&self, k: usize) -> i32 {
        self.half_widths[k]
    }
}

/// A length-256 running histogram over an 8-bit window, with the running
/// rank position tracked incrementally as the window changes.
///
/// `rankpos` is always the current answer to the rank query; `leftsum` is
/// the count of windowed pixels strictly less than `rankpos`. Both are kept
/// consistent by [`SlidingHistogram::add`] / [`SlidingHistogram::remove`]
/// (which adjust `leftsum` relative to the *current* `rankpos`) and by
/// [`SlidingHistogram::update_rank`] (which re-derives `rankpos` and moves
/// `leftsum` along with it).
#[derive(Debug, Clone)]
pub struct SlidingHistogram {
    hist: [u32; 256],
    winsize: u32,
    rankpos: usize,
    leftsum: u32,
}

impl SlidingHistogram {
    pub fn new() -> Self {
        Self {
            hist: [0; 256],
            winsize: 0,
            rankpos: 0,
            leftsum: 0,
        }
    }

    /// Reset to the empty window, keeping `rankpos` and `leftsum` at zero so
    /// the next call to [`Self::update_rank`] behaves like a from-scratch scan.
    pub fn clear(&mut self) {
        self.hist.fill(0);
        self.winsize = 0;
        self.rankpos = 0;
        self.leftsum = 0;
    }

    pub fn winsize(&self) -> u32 {
        self.winsize
    }

    pub fn rankpos(&self) -> usize {
        self.rankpos
    }

    /// A pixel with value `v` enters the window.
    #[inline]
    pub fn add(&mut self, v: u8) {
        self.hist[v as usize] += 1;
        self.winsize += 1;
        if (v as usize) < self.rankpos {
            self.leftsum += 1;
        }
    }

    /// A pixel with value `v` leaves the window.
    #[inline]
    pub fn remove(&mut self, v: u8) {
        self.hist[v as usize] -= 1;
        self.winsize -= 1;
        if (v as usize) < self.rankpos {
            self.leftsum -= 1;
        }
    }

    /// Re-derive `rankpos` (and the matching `leftsum`) for the given rank
    /// fraction. Starting from `rankpos == 0, leftsum == 0` this also serves
    /// as the from-scratch scan used to seed the first column of a row.
    pub fn update_rank(&mut self, rank: f32) {
        debug_assert!(self.winsize > 0);
        if rank == 0.0 {
            if self.leftsum == 0 {
                let mut i = self.rankpos;
                while i < 256 && self.hist[i] == 0 {
                    i += 1;
                }
                self.rankpos = i;
            } else {
                let mut i = self.rankpos - 1;
                loop {
                    self.leftsum -= self.hist[i];
                    if self.leftsum == 0 {
                        break;
                    }
                    i -= 1;
                }
                self.rankpos = i;
            }
        } else {
            let winsize = self.winsize as f32;
            if (self.leftsum as f32) / winsize < rank {
                let mut i = self.rankpos;
                while i < 256 {
                    if ((self.hist[i] + self.leftsum) as f32) / winsize >= rank {
                        break;
                    }
                    self.leftsum += self.hist[i];
                    i += 1;
                }
                self.rankpos = i;
            } else {
                let mut i = self.rankpos - 1;
                loop {
                    self.leftsum -= self.hist[i];
                    if (self.leftsum as f32) / winsize < rank {
                        break;
                    }
                    i -= 1;
                }
                self.rankpos = i;
            }
        }
    }
}

impl Default for SlidingHistogram {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_params(radius: i32, rank: f32) -> MorphResult<()> {
    if radius < 0 {
        return Err(MorphError::InvalidRadius(radius));
    }
    if !(0.0..=1.0).contains(&rank) {
        return Err(MorphError::InvalidRank(rank));
    }
    Ok(())
}

/// Apply a rank-order filter with a disc structuring function.
///
/// `rank == 0.0` is the minimum (erosion), `rank == 0.5` the median, and
/// `rank == 1.0` the maximum (dilation). Source pixel values must lie in
/// `0..=255`; in debug builds this is checked with a `debug_assert`, per the
/// contract that release builds may elide it.
pub fn disc_rank_order<S, D>(src: &S, dst: &mut D, radius: i32, rank: f32) -> MorphResult<()>
where
    S: Read2D<u8> + ?Sized,
    D: Write2D<u8> + ?Sized,
{
    validate_params(radius, rank)?;
    let geometry = DiscGeometry::build(radius)?;
    let radius = radius as usize;
    let (w, h) = src.extent();
    if w == 0 || h == 0 {
        return Ok(());
    }

    let mut hist = SlidingHistogram::new();
    for y in 0..h {
        hist.clear();
        let top_limit = (y as usize).min(radius);
        let bot_limit = ((h - 1 - y) as usize).min(radius);

        // Seed the window around column 0.
        for k in 0..=bot_limit {
            let half = geometry.half_width(k) as u32;
            let xmax = half.min(w - 1);
            for x in 0..=xmax {
                hist.add(src.get(x, y + k as u32));
            }
        }
        for k in 1..=top_limit {
            let half = geometry.half_width(k) as u32;
            let xmax = half.min(w - 1);
            for x in 0..=xmax {
                hist.add(src.get(x, y - k as u32));
            }
        }
        hist.update_rank(rank);
        dst.set(0, y, hist.rankpos() as u8);

        // Sweep the remaining columns, updating by egress/ingress only.
        for x in 1..w {
            let x0 = x;
            let x1 = w - 1 - x;

            // Left egress: pixels that fall out of the disc as it moves right.
            let mut k = bot_limit as i32;
            while k >= 0 {
                let edge = geometry.half_width(k as usize) as u32 + 1;
                if edge > x0 {
                    break;
                }
                hist.remove(src.get(x - edge, y + k as u32));
                k -= 1;
            }
            let mut k = top_limit as i32;
            while k >= 1 {
                let edge = geometry.half_width(k as usize) as u32 + 1;
                if edge > x0 {
                    break;
                }
                hist.remove(src.get(x - edge, y - k as u32));
                k -= 1;
            }

            // Right ingress: pixels newly covered by the disc.
            let mut k = bot_limit as i32;
            while k >= 0 {
                let edge = geometry.half_width(k as usize) as u32;
                if edge > x1 {
                    break;
                }
                hist.add(src.get(x + edge, y + k as u32));
                k -= 1;
            }
            let mut k = top_limit as i32;
            while k >= 1 {
                let edge = geometry.half_width(k as usize) as u32;
                if edge > x1 {
                    break;
                }
                hist.add(src.get(x + edge, y - k as u32));
                k -= 1;
            }

            hist.update_rank(rank);
            dst.set(x, y, hist.rankpos() as u8);
        }
    }
    Ok(())
}

/// Masked variant of [`disc_rank_order`]. Only source pixels whose mask
/// value is `true` contribute to the running histogram. Output pixels whose
/// disc window contains no unmasked source pixel are left unwritten; the
/// caller owns whatever initial content `dst` should show through in that
/// case.
pub fn disc_rank_order_masked<S, M, D>(
    src: &S,
    mask: &M,
    dst: &mut D,
    radius: i32,
    rank: f32,
) -> MorphResult<()>
where
    S: Read2D<u8> + ?Sized,
    M: Read2D<bool> + ?Sized,
    D: Write2D<u8> + ?Sized,
{
    validate_params(radius, rank)?;
    let geometry = DiscGeometry::build(radius)?;
    let radius = radius as usize;
    let (w, h) = src.extent();
    if w == 0 || h == 0 {
        return Ok(());
    }

    let mut hist = SlidingHistogram::new();
    for y in 0..h {
        hist.clear();
        let top_limit = (y as usize).min(radius);
        let bot_limit = ((h - 1 - y) as usize).min(radius);

        for k in 0..=bot_limit {
            let half = geometry.half_width(k) as u32;
            let xmax = half.min(w - 1);
            for x in 0..=xmax {
                let yy = y + k as u32;
                if mask.get(x, yy) {
                    hist.add(src.get(x, yy));
                }
            }
        }
        for k in 1..=top_limit {
            let half = geometry.half_width(k) as u32;
            let xmax = half.min(w - 1);
            for x in 0..=xmax {
                let yy = y - k as u32;
                if mask.get(x, yy) {
                    hist.add(src.get(x, yy));
                }
            }
        }
        if hist.winsize() > 0 {
            hist.update_rank(rank);
            dst.set(0, y, hist.rankpos() as u8);
        } else {
            hist.clear();
        }

        for x in 1..w {
            let x0 = x;
            let x1 = w - 1 - x;

            let mut k = bot_limit as i32;
            while k >= 0 {
                let edge = geometry.half_width(k as usize) as u32 + 1;
                if edge > x0 {
                    break;
                }
                let (xx, yy) = (x - edge, y + k as u32);
                if mask.get(xx, yy) {
                    hist.remove(src.get(xx, yy));
                }
                k -= 1;
            }
            let mut k = top_limit as i32;
            while k >= 1 {
                let edge = geometry.half_width(k as usize) as u32 + 1;
                if edge > x0 {
                    break;
                }
                let (xx, yy) = (x - edge, y - k as u32);
                if mask.get(xx, yy) {
                    hist.remove(src.get(xx, yy));
                }
                k -= 1;
            }

            let mut k = bot_limit as i32;
            while k >= 0 {
                let edge = geometry.half_width(k as usize) as u32;
                if edge > x1 {
                    break;
                }
                let (xx, yy) = (x + edge, y + k as u32);
                if mask.get(xx, yy) {
                    hist.add(src.get(xx, yy));
                }
                k -= 1;
            }
            let mut k = top_limit as i32;
            while k >= 1 {
                let edge = geometry.half_width(k as usize) as u32;
                if edge > x1 {
                    break;
                }
                let (xx, yy) = (x + edge, y - k as u32);
                if mask.get(xx, yy) {
                    hist.add(src.get(xx, yy));
                }
                k -= 1;
            }

            if hist.winsize() > 0 {
                hist.update_rank(rank);
                dst.set(x, y, hist.rankpos() as u8);
            } else {
                hist.clear();
            }
        }
    }
    Ok(())
}

/// Erosion (minimum filter) with a disc of the given radius.
pub fn disc_erosion<S, D>(src: &S, dst: &mut D, radius: i32) -> MorphResult<()>
where
    S: Read2D<u8> + ?Sized,
    D: Write2D<u8> + ?Sized,
{
    disc_rank_order(src, dst, radius, 0.0)
}

/// Median filter with a disc of the given radius.
pub fn disc_median<S, D>(src: &S, dst: &mut D, radius: i32) -> MorphResult<()>
where
    S: Read2D<u8> + ?Sized,
    D: Write2D<u8> + ?Sized,
{
    disc_rank_order(src, dst, radius, 0.5)
}

/// Dilation (maximum filter) with a disc of the given radius.
pub fn disc_dilation<S, D>(src: &S, dst: &mut D, radius: i32) -> MorphResult<()>
where
    S: Read2D<u8> + ?Sized,
    D: Write2D<u8> + ?Sized,
{
    disc_rank_order(src, dst, radius, 1.0)
}

/// Masked erosion with a disc of the given radius.
pub fn disc_erosion_masked<S, M, D>(src: &S, mask: &M, dst: &mut D, radius: i32) -> MorphResult<()>
where
    S: Read2D<u8> + ?Sized,
    M: Read2D<bool> + ?Sized,
    D: Write2D<u8> + ?Sized,
{
    disc_rank_order_masked(src, mask, dst, radius, 0.0)
}

/// Masked median filter with a disc of the given radius.
pub fn disc_median_masked<S, M, D>(src: &S, mask: &M, dst: &mut D, radius: i32) -> MorphResult<()>
where
    S: Read2D<u8> + ?Sized,
    M: Read2D<bool> + ?Sized,
    D: Write2D<u8> + ?Sized,
{
    disc_rank_order_masked(src, mask, dst, radius, 0.5)
}

/// Masked dilation with a disc of the given radius.
pub fn disc_dilation_masked<S, M, D>(src: &S, mask: &M, dst: &mut D, radius: i32) -> MorphResult<()>
where
    S: Read2D<u8> + ?Sized,
    M: Read2D<bool> + ?Sized,
    D: Write2D<u8> + ?Sized,
{
    disc_rank_order_masked(src, mask, dst, radius, 1.0)
}

/// Disc morphology as `Pix` methods, mirroring how every other morphological
/// operation in this workspace is available both as a free function and as
/// a method on the image type itself.
pub trait PixDiscMorphology {
    fn disc_erosion(&self, radius: i32) -> MorphResult<leptonica_core::Pix>;
    fn disc_median(&self, radius: i32) -> MorphResult<leptonica_core::Pix>;
    fn disc_dilation(&self, radius: i32) -> MorphResult<leptonica_core::Pix>;
}

impl PixDiscMorphology for leptonica_core::Pix {
    fn disc_erosion(&self, radius: i32) -> MorphResult<leptonica_core::Pix> {
        let mut dst = leptonica_core::Pix::new(self.width(), self.height(), self.depth())?;
        disc_erosion(self, &mut dst, radius)?;
        Ok(dst)
    }

    fn disc_median(&self, radius: i32) -> MorphResult<leptonica_core::Pix> {
        let mut dst = leptonica_core::Pix::new(self.width(), self.height(), self.depth())?;
        disc_median(self, &mut dst, radius)?;
        Ok(dst)
    }

    fn disc_dilation(&self, radius: i32) -> MorphResult<leptonica_core::Pix> {
        let mut dst = leptonica_core::Pix::new(self.width(), self.height(), self.depth())?;
        disc_dilation(self, &mut dst, radius)?;
        Ok(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptonica_core::{Pix, PixMask, PixelDepth};

    fn brute_force_rank(img: &[Vec<u8>], w: usize, h: usize, radius: i32, rank: f32) -> Vec<Vec<u8>> {
        let geometry = DiscGeometry::build(radius).unwrap();
        let r = radius as i64;
        let mut out = vec![vec![0u8; w]; h];
        for y in 0..h {
            for x in 0..w {
                let mut values = Vec::new();
                for dy in -r..=r {
                    let ny = y as i64 + dy;
                    if ny < 0 || ny >= h as i64 {
                        continue;
                    }
                    let half = geometry.half_width(dy.unsigned_abs() as usize) as i64;
                    for dx in -half..=half {
                        let nx = x as i64 + dx;
                        if nx < 0 || nx >= w as i64 {
                            continue;
                        }
                        values.push(img[ny as usize][nx as usize]);
                    }
                }
                values.sort_unstable();
                let n = values.len();
                let idx = if rank == 0.0 {
                    0
                } else {
                    let pos = (rank * n as f32).ceil() as usize;
                    pos.saturating_sub(1).min(n - 1)
                };
                out[y][x] = values[idx];
            }
        }
        out
    }

    fn pix_from_rows(rows: &[Vec<u8>]) -> Pix {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        let data: Vec<u8> = rows.iter().flatten().copied().collect();
        Pix::from_data(w, h, data).unwrap()
    }

    #[test]
    fn disc_geometry_is_symmetric_and_nonincreasing() {
        for r in 0..12 {
            let g = DiscGeometry::build(r).unwrap();
            assert_eq!(g.half_width(0), r);
            assert!(g.half_width(r as usize) >= 0);
            for k in 1..=(r as usize) {
                assert!(g.half_width(k) <= g.half_width(k - 1));
            }
        }
    }

    #[test]
    fn negative_radius_is_rejected() {
        assert!(matches!(
            DiscGeometry::build(-1),
            Err(MorphError::InvalidRadius(-1))
        ));
    }

    #[test]
    fn s1_uniform_image_median_is_unchanged() {
        let src = Pix::new(5, 5, PixelDepth::Bit8)
            .map(|mut p| {
                for y in 0..5 {
                    for x in 0..5 {
                        p.set_pixel(x, y, 100);
                    }
                }
                p
            })
            .unwrap();
        let mut dst = Pix::new(5, 5, PixelDepth::Bit8).unwrap();
        disc_median(&src, &mut dst, 2).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(dst.get_pixel(x, y), 100);
            }
        }
    }

    #[test]
    fn s2_impulse_dilation() {
        let src = Pix::from_data(5, 1, vec![0, 0, 255, 0, 0]).unwrap();
        let mut dst = Pix::new(5, 1, PixelDepth::Bit8).unwrap();
        disc_dilation(&src, &mut dst, 1).unwrap();
        assert_eq!(dst.data(), &[0, 255, 255, 255, 0]);
    }

    #[test]
    fn s3_ramp_erosion() {
        let src = Pix::from_data(5, 1, vec![10, 20, 30, 40, 50]).unwrap();
        let mut dst = Pix::new(5, 1, PixelDepth::Bit8).unwrap();
        disc_erosion(&src, &mut dst, 2).unwrap();
        assert_eq!(dst.data(), &[10, 10, 10, 20, 30]);
    }

    #[test]
    fn idempotent_at_radius_zero() {
        let rows = vec![vec![4u8, 200, 7, 91], vec![1, 2, 3, 250]];
        let src = pix_from_rows(&rows);
        for rank in [0.0f32, 0.25, 0.5, 0.75, 1.0] {
            let mut dst = Pix::new(4, 2, PixelDepth::Bit8).unwrap();
            disc_rank_order(&src, &mut dst, 0, rank).unwrap();
            assert_eq!(dst.data(), src.data());
        }
    }

    #[test]
    fn dilation_erosion_duality() {
        let rows = vec![
            vec![10u8, 250, 3, 80, 5, 6],
            vec![9, 8, 200, 1, 90, 2],
            vec![5, 5, 5, 5, 5, 5],
        ];
        let src = pix_from_rows(&rows);
        let inverted: Vec<u8> = src.data().iter().map(|v| 255 - v).collect();
        let inv = Pix::from_data(6, 3, inverted).unwrap();

        let mut dil = Pix::new(6, 3, PixelDepth::Bit8).unwrap();
        disc_dilation(&src, &mut dil, 2).unwrap();

        let mut ero_of_inv = Pix::new(6, 3, PixelDepth::Bit8).unwrap();
        disc_erosion(&inv, &mut ero_of_inv, 2).unwrap();

        for (a, b) in dil.data().iter().zip(ero_of_inv.data()) {
            assert_eq!(*a, 255 - *b);
        }
    }

    #[test]
    fn agrees_with_brute_force_on_random_images() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0xDEC0_ADE1);
        for trial in 0..6 {
            let w = 6 + (trial % 5);
            let h = 5 + (trial % 4);
            let rows: Vec<Vec<u8>> = (0..h)
                .map(|_| (0..w).map(|_| rng.random::<u8>()).collect())
                .collect();
            let src = pix_from_rows(&rows);
            for radius in 0..=4 {
                for rank in [0.0f32, 0.25, 0.5, 0.75, 1.0] {
                    let expected = brute_force_rank(&rows, w, h, radius, rank);
                    let mut dst = Pix::new(w as u32, h as u32, PixelDepth::Bit8).unwrap();
                    disc_rank_order(&src, &mut dst, radius, rank).unwrap();
                    for y in 0..h {
                        for x in 0..w {
                            assert_eq!(
                                dst.get_pixel(x as u32, y as u32),
                                expected[y][x],
                                "mismatch at radius={radius} rank={rank} x={x} y={y}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn masked_all_true_matches_unmasked() {
        let rows = vec![
            vec![10u8, 250, 3, 80, 5],
            vec![9, 8, 200, 1, 90],
            vec![5, 5, 5, 5, 5],
        ];
        let src = pix_from_rows(&rows);
        let mask = PixMask::new(5, 3, true).unwrap();

        let mut unmasked = Pix::new(5, 3, PixelDepth::Bit8).unwrap();
        disc_median(&src, &mut unmasked, 1).unwrap();

        let mut masked = Pix::new(5, 3, PixelDepth::Bit8).unwrap();
        disc_median_masked(&src, &mask, &mut masked, 1).unwrap();

        assert_eq!(unmasked.data(), masked.data());
    }

    #[test]
    fn masked_all_false_leaves_destination_untouched() {
        let rows = vec![vec![10u8, 250, 3], vec![9, 8, 200]];
        let src = pix_from_rows(&rows);
        let mask = PixMask::new(3, 2, false).unwrap();

        let sentinel = vec![42u8; 6];
        let mut dst = Pix::from_data(3, 2, sentinel.clone()).unwrap();
        disc_median_masked(&src, &mask, &mut dst, 1).unwrap();

        assert_eq!(dst.data(), sentinel.as_slice());
    }

    #[test]
    fn invalid_radius_and_rank_are_rejected() {
        let src = Pix::new(3, 3, PixelDepth::Bit8).unwrap();
        let mut dst = Pix::new(3, 3, PixelDepth::Bit8).unwrap();
        assert!(matches!(
            disc_rank_order(&src, &mut dst, -1, 0.5),
            Err(MorphError::InvalidRadius(-1))
        ));
        assert!(matches!(
            disc_rank_order(&src, &mut dst, 1, 1.5),
            Err(MorphError::InvalidRank(_))
        ));
    }

    #[test]
    fn pix_method_matches_free_function() {
        let rows = vec![vec![10u8, 250, 3, 80], vec![9, 8, 200, 1]];
        let src = pix_from_rows(&rows);

        let mut expected = Pix::new(4, 2, PixelDepth::Bit8).unwrap();
        disc_median(&src, &mut expected, 1).unwrap();

        let actual = src.disc_median(1).unwrap();
        assert_eq!(actual.data(), expected.data());
    }
}
