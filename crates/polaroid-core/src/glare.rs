//! Synthetic light-leak overlay.
//!
//! A glare is a white radial gradient that fades from `intensity` alpha at its
//! center to fully transparent at `radius`. It is composited with a screen
//! blend, so it can only ever brighten the image:
//!
//! ```text
//! out = 1 - (1 - base) * (1 - alpha)      (normalized channels)
//! ```
//!
//! The alpha channel of the image is left untouched.

use nanorand::Rng;
use serde::{Deserialize, Serialize};

use crate::decode::CHANNELS;

/// Gradient radius as a fraction of the shorter image side.
pub const GLARE_RADIUS_FRACTION: f32 = 0.4;

/// Peak overlay alpha per unit of the `glare` adjustment.
pub const GLARE_INTENSITY_SCALE: f32 = 0.7;

/// A placed glare highlight in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlareSpot {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    /// Overlay alpha at the center (0.0 to 1.0)
    pub intensity: f32,
}

impl GlareSpot {
    pub fn new(center_x: f32, center_y: f32, radius: f32, intensity: f32) -> Self {
        Self {
            center_x,
            center_y,
            radius: radius.max(0.0),
            intensity: intensity.clamp(0.0, 1.0),
        }
    }

    /// Place a glare for the given `glare` amount at a random point of the canvas.
    pub fn random<R: Rng<8>>(width: u32, height: u32, glare: f32, rng: &mut R) -> Self {
        let center_x = unit_f32(rng) * width as f32;
        let center_y = unit_f32(rng) * height as f32;
        Self::sized(center_x, center_y, width, height, glare)
    }

    /// Place a glare at the canvas center. Useful for reproducible renders.
    pub fn centered(width: u32, height: u32, glare: f32) -> Self {
        Self::sized(width as f32 / 2.0, height as f32 / 2.0, width, height, glare)
    }

    fn sized(center_x: f32, center_y: f32, width: u32, height: u32, glare: f32) -> Self {
        let radius = width.min(height) as f32 * GLARE_RADIUS_FRACTION;
        Self::new(center_x, center_y, radius, glare * GLARE_INTENSITY_SCALE)
    }

    /// Overlay alpha at a point, falling off linearly with distance.
    #[inline]
    pub fn alpha_at(&self, x: f32, y: f32) -> f32 {
        if self.radius <= 0.0 {
            return 0.0;
        }
        let dist = ((x - self.center_x).powi(2) + (y - self.center_y).powi(2)).sqrt();
        let t = dist / self.radius;
        if t >= 1.0 {
            0.0
        } else {
            self.intensity * (1.0 - t)
        }
    }
}

/// Screen-blend a glare over RGBA pixel data in place.
///
/// Only the rows and columns inside the gradient's bounding square are
/// visited; everything outside has zero overlay alpha.
pub fn apply_glare(pixels: &mut [u8], width: u32, spot: &GlareSpot) {
    if width == 0 || spot.intensity <= 0.0 || spot.radius <= 0.0 {
        return;
    }
    let row_len = width as usize * CHANNELS;
    let height = pixels.len() / row_len;

    let x_range = span(spot.center_x, spot.radius, width as usize);
    let y_range = span(spot.center_y, spot.radius, height);

    for y in y_range {
        let row = &mut pixels[y * row_len..(y + 1) * row_len];
        for x in x_range.clone() {
            // Sample at the pixel center
            let alpha = spot.alpha_at(x as f32 + 0.5, y as f32 + 0.5);
            if alpha <= 0.0 {
                continue;
            }
            let px = &mut row[x * CHANNELS..x * CHANNELS + 3];
            for c in px.iter_mut() {
                let base = *c as f32;
                *c = (base + alpha * (255.0 - base)).clamp(0.0, 255.0).round_ties_even() as u8;
            }
        }
    }
}

/// Pixel index range covered by `[center - radius, center + radius]`.
fn span(center: f32, radius: f32, len: usize) -> std::ops::Range<usize> {
    let start = (center - radius).floor().max(0.0) as usize;
    let end = ((center + radius).ceil().max(0.0) as usize).min(len);
    start.min(end)..end
}

/// Uniform value in [0, 1) from the top 24 bits of a random word.
#[inline]
pub(crate) fn unit_f32<R: Rng<8>>(rng: &mut R) -> f32 {
    (rng.generate::<u32>() >> 8) as f32 / 16_777_216.0
}
