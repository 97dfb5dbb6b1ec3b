//! Polaroid Core - Color grading and crop rasterization
//!
//! This crate provides the pixel-level core of the Polaroid editor: the color
//! grading pipeline behind the filter presets and tweak sliders, the crop and
//! rotate rasterizer, and the decode/encode adapters at the browser boundary.

pub mod decode;
pub mod encode;
pub mod glare;
pub mod grading;
pub mod luma;
pub mod presets;
pub mod preview;
pub mod session;
pub mod transform;

pub use decode::{decode_image, Bitmap, DecodeError};
pub use encode::{encode, EncodeError, OutputFormat};
pub use glare::{apply_glare, GlareSpot};
pub use grading::apply_color_grading;
pub use presets::{find_preset, preset_adjustments, Preset, PRESETS};
pub use preview::{preset_preview, preset_previews, PREVIEW_SIZE};
pub use session::{EditError, EditSession};
pub use transform::{compute_rotated_bounds, crop_and_rotate, CropError, CropRegion};

/// One color grading configuration.
///
/// Presets hold one of these, and the tweak sliders edit a copy of it. Values
/// outside the typical ranges are accepted; the pipeline clamps its output.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Adjustments {
    /// Channel multiplier (0 to 2, 1 = unchanged)
    pub brightness: f32,
    /// Spread around mid-gray (0 to 2, 1 = unchanged)
    pub contrast: f32,
    /// Mix factor away from grayscale (0 to 2, 0 = grayscale, 1 = unchanged)
    pub saturation: f32,
    /// Hue rotation in degrees (-180 to 180)
    pub hue: f32,
    /// Film grain intensity (0 to 1)
    pub noise: f32,
    /// Light leak intensity (0 to 1)
    pub glare: f32,
}

impl Adjustments {
    /// The no-op grading.
    pub const IDENTITY: Adjustments = Adjustments::new(1.0, 1.0, 1.0, 0.0, 0.0, 0.0);

    pub const fn new(
        brightness: f32,
        contrast: f32,
        saturation: f32,
        hue: f32,
        noise: f32,
        glare: f32,
    ) -> Self {
        Self {
            brightness,
            contrast,
            saturation,
            hue,
            noise,
            glare,
        }
    }

    /// Check if applying these values leaves an image unchanged
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Whether the output depends only on the input pixels (no grain, no glare).
    pub fn is_deterministic(&self) -> bool {
        self.noise <= 0.0 && self.glare <= 0.0
    }
}

impl Default for Adjustments {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let adj = Adjustments::default();
        assert!(adj.is_identity());
        assert!(adj.is_deterministic());
    }

    #[test]
    fn test_not_identity() {
        let mut adj = Adjustments::default();
        adj.hue = 15.0;
        assert!(!adj.is_identity());
        assert!(adj.is_deterministic());
    }

    #[test]
    fn test_grain_is_not_deterministic() {
        let mut adj = Adjustments::default();
        adj.noise = 0.1;
        assert!(!adj.is_deterministic());

        let mut adj = Adjustments::default();
        adj.glare = 0.3;
        assert!(!adj.is_deterministic());
    }

    #[test]
    fn test_missing_fields_default_to_identity() {
        let adj: Adjustments = serde_json::from_str(r#"{"saturation":0.0}"#).unwrap();
        assert_eq!(adj.saturation, 0.0);
        assert_eq!(adj.brightness, 1.0);
        assert_eq!(adj.contrast, 1.0);
        assert_eq!(adj.hue, 0.0);
    }

    #[test]
    fn test_serializes_camel_case_fields() {
        let json = serde_json::to_value(Adjustments::IDENTITY).unwrap();
        assert_eq!(json["brightness"], 1.0);
        assert_eq!(json["glare"], 0.0);
    }
}
