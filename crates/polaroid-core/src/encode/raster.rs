//! JPEG and PNG encoding for export.
//!
//! Both encoders use the `image` crate. JPEG has no alpha channel, so
//! transparent pixels are composited over black first, matching what a
//! browser canvas does when asked for `image/jpeg`.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;
use thiserror::Error;

use crate::decode::{Bitmap, CHANNELS};

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec rejected the image
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: &'static str,
        message: String,
    },
}

fn check_bitmap(bitmap: &Bitmap) -> Result<(), EncodeError> {
    let (width, height) = bitmap.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let expected = width as usize * height as usize * CHANNELS;
    if bitmap.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: bitmap.pixels.len(),
        });
    }
    Ok(())
}

/// Flatten RGBA onto a black background, dropping alpha.
fn composite_over_black(pixels: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixels.len() / CHANNELS * 3);
    for px in pixels.chunks_exact(CHANNELS) {
        let alpha = px[3] as u32;
        for &c in &px[..3] {
            rgb.push(((c as u32 * alpha + 127) / 255) as u8);
        }
    }
    rgb
}

/// Encode a bitmap to JPEG bytes.
///
/// # Arguments
///
/// * `bitmap` - Source image (RGBA)
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Example
///
/// ```
/// use polaroid_core::decode::Bitmap;
/// use polaroid_core::encode::encode_jpeg;
///
/// let bitmap = Bitmap::filled(100, 100, [128, 128, 128, 255]);
/// let jpeg = encode_jpeg(&bitmap, 95).unwrap();
///
/// // Verify JPEG magic bytes
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode_jpeg(bitmap: &Bitmap, quality: u8) -> Result<Vec<u8>, EncodeError> {
    check_bitmap(bitmap)?;

    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);
    let rgb = composite_over_black(&bitmap.pixels);

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, bitmap.width, bitmap.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: "JPEG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

/// Encode a bitmap to lossless PNG bytes, keeping alpha.
pub fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>, EncodeError> {
    check_bitmap(bitmap)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(
            &bitmap.pixels,
            bitmap.width,
            bitmap.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed {
            format: "PNG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;

    fn gradient(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[
                    (x * 255 / width) as u8,
                    (y * 255 / height) as u8,
                    128,
                    255,
                ]);
            }
        }
        Bitmap::from_raw(width, height, pixels).unwrap()
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let jpeg = encode_jpeg(&Bitmap::filled(100, 100, [128, 128, 128, 255]), 90).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        let len = jpeg.len();
        assert_eq!(&jpeg[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_affects_size() {
        let img = gradient(64, 64);
        let low_q = encode_jpeg(&img, 10).unwrap();
        let high_q = encode_jpeg(&img, 100).unwrap();
        assert!(high_q.len() > low_q.len());
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let img = Bitmap::filled(10, 10, [1, 2, 3, 255]);
        assert!(encode_jpeg(&img, 0).is_ok());
        assert!(encode_jpeg(&img, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_transparent_becomes_black() {
        let img = Bitmap::filled(16, 16, [255, 255, 255, 0]);
        let jpeg = encode_jpeg(&img, 95).unwrap();
        let decoded = decode_image(&jpeg).unwrap();
        let [r, g, b, a] = decoded.pixel(8, 8);
        assert!(r < 5 && g < 5 && b < 5, "expected black, got {:?}", [r, g, b]);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_composite_over_black() {
        let rgb = composite_over_black(&[200, 100, 50, 255, 200, 100, 50, 128, 9, 9, 9, 0]);
        assert_eq!(rgb, vec![200, 100, 50, 100, 50, 25, 0, 0, 0]);
    }

    #[test]
    fn test_encode_png_is_lossless() {
        let mut img = gradient(23, 11);
        img.pixels[3] = 0;
        img.pixels[7] = 77;
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        assert_eq!(decode_image(&png).unwrap(), img);
    }

    #[test]
    fn test_mismatched_buffer_rejected() {
        let img = Bitmap {
            width: 10,
            height: 10,
            pixels: vec![0; 10 * 9 * 4],
        };
        assert!(matches!(
            encode_jpeg(&img, 90),
            Err(EncodeError::InvalidPixelData { .. })
        ));
        assert!(matches!(
            encode_png(&img),
            Err(EncodeError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let img = Bitmap {
            width: 0,
            height: 5,
            pixels: vec![],
        };
        assert!(matches!(
            encode_png(&img),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: valid bitmaps always produce a well-formed JPEG.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in (1u32..=40, 1u32..=40),
            quality in 0u8..=255,
            rgba in any::<[u8; 4]>(),
        ) {
            let jpeg = encode_jpeg(&Bitmap::filled(width, height, rgba), quality).unwrap();
            let len = jpeg.len();
            prop_assert!(len >= 4);
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg[len - 2..], &[0xFF, 0xD9]);
        }

        /// Property: the same bitmap always encodes to the same bytes.
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=20, 1u32..=20),
            quality in 1u8..=100,
        ) {
            let img = Bitmap::filled(width, height, [100, 150, 200, 255]);
            prop_assert_eq!(encode_jpeg(&img, quality).unwrap(), encode_jpeg(&img, quality).unwrap());
            prop_assert_eq!(encode_png(&img).unwrap(), encode_png(&img).unwrap());
        }
    }
}
