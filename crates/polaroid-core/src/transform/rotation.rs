//! Crop-and-rotate rasterization with bilinear interpolation.
//!
//! # Algorithm
//!
//! The output canvas is the axis-aligned bounding box of the rotated crop
//! rectangle. Rasterization uses inverse mapping: each output pixel center is
//! moved to the canvas center, rotated back by θ, and offset into the crop
//! rectangle:
//!
//! ```text
//! px = dst_x + 0.5 - W / 2          py = dst_y + 0.5 - H / 2
//! lx =  px * cos(θ) + py * sin(θ)   ly = -px * sin(θ) + py * cos(θ)
//! src_x = region.x + lx + w / 2 - 0.5
//! src_y = region.y + ly + h / 2 - 0.5
//! ```
//!
//! Output pixels whose preimage falls outside the crop rectangle are
//! transparent. Quarter turns use exact basis vectors, so every sample lands
//! on a source pixel center and 0/90/180/270 degree crops are lossless.

use log::debug;

use super::crop::{check_surface, CropError, CropRegion};
use crate::decode::{Bitmap, CHANNELS};

/// Rotations closer than this to a quarter turn are treated as exact.
const QUARTER_TURN_TOLERANCE: f64 = 0.001;

/// `(cos θ, sin θ)` for an angle in degrees, exact at quarter turns.
fn rotation_basis(angle_degrees: f64) -> (f64, f64) {
    let normalized = angle_degrees.rem_euclid(360.0);
    let quarter = (normalized / 90.0).round();
    if (normalized - quarter * 90.0).abs() < QUARTER_TURN_TOLERANCE {
        return match quarter as u32 % 4 {
            0 => (1.0, 0.0),
            1 => (0.0, 1.0),
            2 => (-1.0, 0.0),
            _ => (0.0, -1.0),
        };
    }
    let rad = angle_degrees.to_radians();
    (rad.cos(), rad.sin())
}

/// Compute the dimensions of the bounding box for a rotated rectangle.
///
/// ```text
/// new_w = |cos θ| * w + |sin θ| * h
/// new_h = |sin θ| * w + |cos θ| * h
/// ```
///
/// Results are rounded to the nearest pixel and never below 1x1.
///
/// # Example
///
/// ```
/// use polaroid_core::transform::compute_rotated_bounds;
///
/// // 90-degree rotation swaps dimensions
/// assert_eq!(compute_rotated_bounds(50, 30, 90.0), (30, 50));
///
/// // No rotation preserves dimensions
/// assert_eq!(compute_rotated_bounds(50, 30, 0.0), (50, 30));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let (cos, sin) = rotation_basis(angle_degrees);
    let (cos, sin) = (cos.abs(), sin.abs());

    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Crop a region out of `source` and rotate it onto a fresh canvas.
///
/// The canvas is sized to the rotated bounding box so no corner content is
/// clipped. `source` is not modified.
///
/// # Errors
///
/// - [`CropError::InvalidRegion`] if the region is empty, exceeds the source
///   bounds, or has a non-finite rotation
/// - [`CropError::SourceBuffer`] if `source.pixels` does not hold
///   `width * height * 4` bytes
/// - [`CropError::RenderSurface`] if the output canvas would be too large
///
/// # Example
///
/// ```ignore
/// use polaroid_core::transform::{crop_and_rotate, CropRegion};
///
/// let region = CropRegion::new(10, 10, 50, 30, 90.0);
/// let rotated = crop_and_rotate(&image, &region)?;
/// assert_eq!((rotated.width, rotated.height), (30, 50));
/// ```
pub fn crop_and_rotate(source: &Bitmap, region: &CropRegion) -> Result<Bitmap, CropError> {
    if source.pixels.len() != source.expected_len() {
        return Err(CropError::SourceBuffer {
            expected: source.expected_len(),
            actual: source.pixels.len(),
        });
    }
    region.validate(source.width, source.height)?;

    let (dst_w, dst_h) =
        compute_rotated_bounds(region.width, region.height, region.rotation_degrees);
    check_surface(dst_w, dst_h)?;
    debug!(
        "crop {}x{} at ({}, {}) rotated {} -> {}x{}",
        region.width, region.height, region.x, region.y, region.rotation_degrees, dst_w, dst_h
    );

    let sampler = RegionSampler::new(source, region, dst_w, dst_h);
    let row_len = dst_w as usize * CHANNELS;
    let mut output = vec![0u8; row_len * dst_h as usize];

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        output
            .par_chunks_exact_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| sampler.fill_row(row, y));
    }
    #[cfg(not(feature = "parallel"))]
    for (y, row) in output.chunks_exact_mut(row_len).enumerate() {
        sampler.fill_row(row, y);
    }

    Ok(Bitmap {
        width: dst_w,
        height: dst_h,
        pixels: output,
    })
}

/// Inverse mapping from output pixels into one crop rectangle of a source.
struct RegionSampler<'a> {
    source: &'a Bitmap,
    region: CropRegion,
    cos: f64,
    sin: f64,
    dst_cx: f64,
    dst_cy: f64,
    half_w: f64,
    half_h: f64,
}

impl<'a> RegionSampler<'a> {
    fn new(source: &'a Bitmap, region: &CropRegion, dst_w: u32, dst_h: u32) -> Self {
        let (cos, sin) = rotation_basis(region.rotation_degrees);
        Self {
            source,
            region: *region,
            cos,
            sin,
            dst_cx: dst_w as f64 / 2.0,
            dst_cy: dst_h as f64 / 2.0,
            half_w: region.width as f64 / 2.0,
            half_h: region.height as f64 / 2.0,
        }
    }

    fn fill_row(&self, row: &mut [u8], dst_y: usize) {
        let py = dst_y as f64 + 0.5 - self.dst_cy;
        for (dst_x, out) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let px = dst_x as f64 + 0.5 - self.dst_cx;

            // Position relative to the crop rectangle's center
            let lx = px * self.cos + py * self.sin;
            let ly = -px * self.sin + py * self.cos;

            if lx < -self.half_w || lx >= self.half_w || ly < -self.half_h || ly >= self.half_h {
                // Left transparent
                continue;
            }

            let pixel = self.sample_bilinear(lx + self.half_w - 0.5, ly + self.half_h - 0.5);
            out.copy_from_slice(&pixel);
        }
    }

    /// Get a pixel as [f64; 4] at region-local coordinates.
    #[inline]
    fn get_pixel_f64(&self, x: usize, y: usize) -> [f64; 4] {
        let sx = self.region.x as usize + x;
        let sy = self.region.y as usize + y;
        let idx = (sy * self.source.width as usize + sx) * CHANNELS;
        let p = &self.source.pixels[idx..idx + CHANNELS];
        [p[0] as f64, p[1] as f64, p[2] as f64, p[3] as f64]
    }

    /// Sample the crop rectangle using bilinear interpolation.
    ///
    /// Coordinates are region-local pixel centers. Neighbors are clamped to
    /// the region so content outside the crop never bleeds in.
    fn sample_bilinear(&self, x: f64, y: f64) -> [u8; 4] {
        let max_x = self.region.width as usize - 1;
        let max_y = self.region.height as usize - 1;

        let fx0 = x.floor();
        let fy0 = y.floor();
        let fx = x - fx0;
        let fy = y - fy0;

        // Both neighbors clamp on their own, so the half-pixel margins on
        // every side collapse onto the edge pixel
        let x0 = clamp_index(fx0, max_x);
        let y0 = clamp_index(fy0, max_y);
        let x1 = clamp_index(fx0 + 1.0, max_x);
        let y1 = clamp_index(fy0 + 1.0, max_y);

        let p00 = self.get_pixel_f64(x0, y0);
        let p10 = self.get_pixel_f64(x1, y0);
        let p01 = self.get_pixel_f64(x0, y1);
        let p11 = self.get_pixel_f64(x1, y1);

        let mut result = [0u8; 4];
        for i in 0..CHANNELS {
            let v = p00[i] * (1.0 - fx) * (1.0 - fy)
                + p10[i] * fx * (1.0 - fy)
                + p01[i] * (1.0 - fx) * fy
                + p11[i] * fx * fy;
            result[i] = v.clamp(0.0, 255.0).round() as u8;
        }
        result
    }
}

/// Clamp a floored coordinate to `0..=max`.
#[inline]
fn clamp_index(v: f64, max: usize) -> usize {
    (v.max(0.0) as usize).min(max)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
