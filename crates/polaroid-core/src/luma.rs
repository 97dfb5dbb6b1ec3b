//! Luma weights shared by the saturation stage and grayscale conversion.
//!
//! These are the Rec. 601 weights as the grading pipeline has always used
//! them (0.2989 rather than 0.299 for red), so they sum to 0.9999.

/// Red weight in the luma sum.
pub const LUMA_R: f32 = 0.2989;

/// Green weight in the luma sum.
pub const LUMA_G: f32 = 0.5870;

/// Blue weight in the luma sum.
pub const LUMA_B: f32 = 0.1140;

/// Luma of channel values in byte scale (0.0 to 255.0).
#[inline]
pub fn luma(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Luma of byte channel values, rounded to the nearest byte (ties to even).
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    luma(r as f32, g as f32, b as f32).clamp(0.0, 255.0).round_ties_even() as u8
}
