//! Preset picker thumbnails.
//!
//! The filter picker shows every preset applied to a small square copy of
//! the working image. The image is scaled once to `size x size` (stretched,
//! like drawing it into a square canvas) and then graded per preset.

use image::imageops::{self, FilterType};
use log::debug;

use crate::decode::{Bitmap, DecodeError};
use crate::grading::apply_color_grading;
use crate::presets::{Preset, PRESETS};
use crate::Adjustments;

/// Edge length of a picker thumbnail, in pixels.
pub const PREVIEW_SIZE: u32 = 100;

/// Scale a bitmap to exactly `size x size` with bilinear filtering.
///
/// # Errors
///
/// - [`DecodeError::InvalidDimensions`] if `size` is 0 or the source is empty
/// - [`DecodeError::BufferSizeMismatch`] if the source buffer does not match
///   its dimensions
pub fn scale_to_square(source: &Bitmap, size: u32) -> Result<Bitmap, DecodeError> {
    if size == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: size,
            height: size,
        });
    }
    if source.width == 0 || source.height == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: source.width,
            height: source.height,
        });
    }
    if source.pixels.len() != source.expected_len() {
        return Err(DecodeError::BufferSizeMismatch {
            expected: source.expected_len(),
            actual: source.pixels.len(),
        });
    }

    // Fast path: already the right size
    if source.dimensions() == (size, size) {
        return Ok(source.clone());
    }

    let rgba = source.to_rgba_image().ok_or_else(|| {
        DecodeError::CorruptedFile("Failed to create RgbaImage".to_string())
    })?;
    let scaled = imageops::resize(&rgba, size, size, FilterType::Triangle);
    Ok(Bitmap::from_rgba_image(scaled))
}

/// Render one thumbnail: scale `source` to `size x size`, then grade it.
///
/// # Example
/// ```
/// use polaroid_core::preview::{preset_preview, PREVIEW_SIZE};
/// use polaroid_core::{preset_adjustments, Bitmap};
///
/// let photo = Bitmap::filled(640, 480, [180, 120, 90, 255]);
/// let thumb = preset_preview(&photo, PREVIEW_SIZE, &preset_adjustments("vintage"), 7).unwrap();
/// assert_eq!(thumb.dimensions(), (100, 100));
/// ```
pub fn preset_preview(
    source: &Bitmap,
    size: u32,
    adjustments: &Adjustments,
    seed: u64,
) -> Result<Bitmap, DecodeError> {
    let scaled = scale_to_square(source, size)?;
    Ok(apply_color_grading(&scaled, adjustments, seed))
}

/// Render a thumbnail for every preset in catalog order.
///
/// The source is scaled once and shared by all presets.
pub fn preset_previews(
    source: &Bitmap,
    size: u32,
    seed: u64,
) -> Result<Vec<(&'static Preset, Bitmap)>, DecodeError> {
    let scaled = scale_to_square(source, size)?;
    debug!(
        "rendering {} preset previews at {}x{}",
        PRESETS.len(),
        size,
        size
    );
    Ok(PRESETS
        .iter()
        .map(|preset| {
            let graded = apply_color_grading(&scaled, &preset.adjustments, seed);
            (preset, graded)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{find_preset, preset_adjustments};

    fn gradient(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[
                    (x * 255 / width) as u8,
                    (y * 255 / height) as u8,
                    90,
                    255,
                ]);
            }
        }
        Bitmap::from_raw(width, height, pixels).unwrap()
    }

    #[test]
    fn test_scale_to_square_dimensions() {
        let out = scale_to_square(&gradient(320, 200), 100).unwrap();
        assert_eq!(out.dimensions(), (100, 100));
        assert_eq!(out.pixels.len(), 100 * 100 * 4);
    }

    #[test]
    fn test_scale_to_square_upscales_small_sources() {
        let out = scale_to_square(&gradient(10, 20), 100).unwrap();
        assert_eq!(out.dimensions(), (100, 100));
    }

    #[test]
    fn test_scale_to_square_keeps_flat_color() {
        let src = Bitmap::filled(250, 130, [200, 100, 50, 255]);
        let out = scale_to_square(&src, 64).unwrap();
        for p in out.pixels.chunks_exact(4) {
            assert!((p[0] as i32 - 200).abs() <= 1, "{:?}", p);
            assert!((p[1] as i32 - 100).abs() <= 1, "{:?}", p);
            assert!((p[2] as i32 - 50).abs() <= 1, "{:?}", p);
            assert_eq!(p[3], 255);
        }
    }

    #[test]
    fn test_scale_to_square_same_size_is_copy() {
        let src = gradient(100, 100);
        assert_eq!(scale_to_square(&src, 100).unwrap(), src);
    }

    #[test]
    fn test_zero_size_rejected() {
        let result = scale_to_square(&gradient(10, 10), 0);
        assert!(matches!(result, Err(DecodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_empty_source_rejected() {
        let src = Bitmap {
            width: 0,
            height: 0,
            pixels: vec![],
        };
        let result = scale_to_square(&src, 100);
        assert!(matches!(result, Err(DecodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_short_source_buffer_rejected() {
        let mut src = gradient(10, 10);
        src.pixels.truncate(40);
        let result = scale_to_square(&src, 100);
        assert!(matches!(
            result,
            Err(DecodeError::BufferSizeMismatch {
                expected: 400,
                actual: 40
            })
        ));
    }

    #[test]
    fn test_preset_preview_applies_grading() {
        let src = gradient(300, 200);
        let thumb = preset_preview(&src, PREVIEW_SIZE, &preset_adjustments("blackAndWhite"), 3)
            .unwrap();
        assert_eq!(thumb.dimensions(), (PREVIEW_SIZE, PREVIEW_SIZE));
        // Zero saturation with shared grain leaves every pixel gray
        for p in thumb.pixels.chunks_exact(4) {
            assert_eq!(p[0], p[1]);
            assert_eq!(p[1], p[2]);
        }
    }

    #[test]
    fn test_identity_preview_is_scaled_copy() {
        let src = gradient(150, 150);
        let thumb = preset_preview(&src, 50, &Adjustments::IDENTITY, 9).unwrap();
        assert_eq!(thumb, scale_to_square(&src, 50).unwrap());
    }

    #[test]
    fn test_preset_previews_cover_catalog() {
        let src = gradient(120, 80);
        let previews = preset_previews(&src, 32, 5).unwrap();
        assert_eq!(previews.len(), PRESETS.len());
        for ((preset, thumb), expected) in previews.iter().zip(PRESETS) {
            assert_eq!(preset.name, expected.name);
            assert_eq!(thumb.dimensions(), (32, 32));
        }
    }

    #[test]
    fn test_preset_previews_match_single_preview() {
        let src = gradient(90, 60);
        let previews = preset_previews(&src, 40, 11).unwrap();
        let vintage = find_preset("vintage").unwrap();
        let (_, from_batch) = previews
            .iter()
            .find(|(p, _)| p.name == vintage.name)
            .unwrap();
        let single = preset_preview(&src, 40, &vintage.adjustments, 11).unwrap();
        assert_eq!(from_batch, &single);
    }
}
