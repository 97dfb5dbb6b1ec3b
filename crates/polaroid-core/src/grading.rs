//! Color grading pipeline.
//!
//! Applies an [`Adjustments`] vector to RGBA pixel data.
//!
//! ## Stage Order
//! 1. Brightness
//! 2. Contrast
//! 3. Saturation
//! 4. Hue rotation
//! 5. Noise
//! 6. Glare (once per image, after every pixel is graded)
//!
//! Channels are held as bytes between stages: each stage's result is clamped
//! to [0, 255] and rounded half to even (as a clamped byte array stores it)
//! before the next one reads it. Stages whose
//! parameter sits at its identity value are skipped, which keeps the identity
//! vector an exact no-op.

use log::{debug, trace, warn};
use nanorand::WyRand;

use crate::decode::{Bitmap, CHANNELS};
use crate::glare::{apply_glare, unit_f32, GlareSpot};
use crate::luma::luma;
use crate::Adjustments;

/// Apply a grading to a bitmap, returning a new bitmap.
///
/// `seed` drives the grain and glare placement. For vectors with
/// `noise == 0 && glare == 0` the seed is irrelevant and the output is fully
/// reproducible.
///
/// # Example
/// ```
/// use polaroid_core::{apply_color_grading, Adjustments, Bitmap};
///
/// let source = Bitmap::filled(4, 4, [100, 100, 100, 255]);
/// let mut adj = Adjustments::default();
/// adj.brightness = 2.0;
///
/// let graded = apply_color_grading(&source, &adj, 0);
/// assert_eq!(graded.pixel(0, 0), [200, 200, 200, 255]);
/// ```
pub fn apply_color_grading(source: &Bitmap, adjustments: &Adjustments, seed: u64) -> Bitmap {
    let mut output = source.clone();
    grade_pixels(
        &mut output.pixels,
        output.width,
        output.height,
        adjustments,
        seed,
    );
    output
}

/// Apply a grading to RGBA pixel data in place.
///
/// Only whole rows present in `pixels` are graded. A buffer shorter than
/// `width * height * 4` is logged and left untouched past its last full row.
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` / `height` - Image dimensions in pixels
/// * `adjustments` - The grading to apply
/// * `seed` - Seed for the grain and glare random streams
pub fn grade_pixels(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    adjustments: &Adjustments,
    seed: u64,
) {
    // Early exit if nothing to do
    if adjustments.is_identity() || width == 0 || height == 0 {
        return;
    }
    debug!(
        "grading {}x{} image with {:?} (seed {})",
        width, height, adjustments, seed
    );

    let kernel = PixelKernel::new(adjustments);
    let row_len = width as usize * CHANNELS;
    let expected = row_len * height as usize;
    if pixels.len() != expected {
        warn!(
            "pixel buffer is {} bytes, expected {} for {}x{}",
            pixels.len(),
            expected,
            width,
            height
        );
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        pixels
            .par_chunks_exact_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| kernel.grade_row(row, row_seed(seed, y)));
    }
    #[cfg(not(feature = "parallel"))]
    for (y, row) in pixels.chunks_exact_mut(row_len).enumerate() {
        kernel.grade_row(row, row_seed(seed, y));
    }

    if adjustments.glare > 0.0 {
        let mut rng = WyRand::new_seed(seed.rotate_left(32) ^ GLARE_STREAM);
        let spot = GlareSpot::random(width, height, adjustments.glare, &mut rng);
        trace!("glare at ({:.1}, {:.1}) r={:.1}", spot.center_x, spot.center_y, spot.radius);
        apply_glare(pixels, width, &spot);
    }
}

const GLARE_STREAM: u64 = 0x6C61_7265_5F67_6C61;

/// Each row gets its own grain stream so rows can be graded in any order.
#[inline]
fn row_seed(seed: u64, row: usize) -> u64 {
    seed ^ (row as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Per-call precomputed state for the pixel loop.
struct PixelKernel {
    adjustments: Adjustments,
    hue_matrix: Option<[[f32; 3]; 3]>,
}

impl PixelKernel {
    fn new(adjustments: &Adjustments) -> Self {
        Self {
            adjustments: *adjustments,
            hue_matrix: (adjustments.hue != 0.0).then(|| hue_rotation_matrix(adjustments.hue)),
        }
    }

    fn grade_row(&self, row: &mut [u8], seed: u64) {
        let noise = self.adjustments.noise;
        let mut rng = (noise > 0.0).then(|| WyRand::new_seed(seed));

        for chunk in row.chunks_exact_mut(CHANNELS) {
            let mut rgb = [chunk[0] as f32, chunk[1] as f32, chunk[2] as f32];

            rgb = apply_brightness(rgb, self.adjustments.brightness);
            rgb = apply_contrast(rgb, self.adjustments.contrast);
            rgb = apply_saturation(rgb, self.adjustments.saturation);
            if let Some(matrix) = &self.hue_matrix {
                rgb = apply_hue_matrix(rgb, matrix);
            }
            if let Some(rng) = rng.as_mut() {
                rgb = apply_noise(rgb, noise, unit_f32(rng));
            }

            // Alpha (chunk[3]) passes through
            chunk[0] = rgb[0] as u8;
            chunk[1] = rgb[1] as u8;
            chunk[2] = rgb[2] as u8;
        }
    }
}

/// Store channels back to byte precision, rounding ties to even.
#[inline]
fn quantize(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(|v| v.clamp(0.0, 255.0).round_ties_even())
}

/// Multiply every channel by `brightness`.
#[inline]
fn apply_brightness(rgb: [f32; 3], brightness: f32) -> [f32; 3] {
    if brightness == 1.0 {
        return rgb;
    }
    quantize(rgb.map(|v| v * brightness))
}

/// Remap each channel around the 0.5 midpoint.
///
/// Formula: `output = ((input / 255 - 0.5) * contrast + 0.5) * 255`
#[inline]
fn apply_contrast(rgb: [f32; 3], contrast: f32) -> [f32; 3] {
    if contrast == 1.0 {
        return rgb;
    }
    quantize(rgb.map(|v| ((v / 255.0 - 0.5) * contrast + 0.5) * 255.0))
}

/// Interpolate between the pixel's luma and its color.
///
/// 0 gives grayscale, values above 1 push colors away from gray.
#[inline]
fn apply_saturation(rgb: [f32; 3], saturation: f32) -> [f32; 3] {
    if saturation == 1.0 {
        return rgb;
    }
    let gray = luma(rgb[0], rgb[1], rgb[2]);
    quantize(rgb.map(|v| gray * (1.0 - saturation) + v * saturation))
}

/// Luma-preserving YIQ hue rotation matrix for an angle in degrees.
pub fn hue_rotation_matrix(degrees: f32) -> [[f32; 3]; 3] {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [
            0.299 + 0.701 * cos + 0.168 * sin,
            0.587 - 0.587 * cos + 0.330 * sin,
            0.114 - 0.114 * cos - 0.497 * sin,
        ],
        [
            0.299 - 0.299 * cos - 0.328 * sin,
            0.587 + 0.413 * cos + 0.035 * sin,
            0.114 - 0.114 * cos + 0.292 * sin,
        ],
        [
            0.299 - 0.300 * cos + 1.250 * sin,
            0.587 - 0.588 * cos - 1.050 * sin,
            0.114 + 0.886 * cos - 0.203 * sin,
        ],
    ]
}

#[inline]
fn apply_hue_matrix(rgb: [f32; 3], m: &[[f32; 3]; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    quantize([
        m[0][0] * r + m[0][1] * g + m[0][2] * b,
        m[1][0] * r + m[1][1] * g + m[1][2] * b,
        m[2][0] * r + m[2][1] * g + m[2][2] * b,
    ])
}

/// Add one shared offset to all three channels (grain, not color noise).
///
/// `unit` is a uniform sample in [0, 1); the offset lies in
/// `[-noise * 127.5, noise * 127.5)`.
#[inline]
fn apply_noise(rgb: [f32; 3], noise: f32, unit: f32) -> [f32; 3] {
    let offset = (unit - 0.5) * noise * 255.0;
    quantize(rgb.map(|v| v + offset))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
