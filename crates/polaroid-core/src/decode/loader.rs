//! Image decoding for uploads and camera captures.
//!
//! Phone cameras store the sensor orientation in EXIF rather than rotating the
//! pixels, so the orientation tag is applied before handing the bitmap over.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use log::debug;

use super::{Bitmap, DecodeError, Orientation};

/// Decode an encoded image (JPEG or PNG) into an RGBA bitmap, applying EXIF
/// orientation correction.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized.
/// Returns `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    let oriented = apply_orientation(img, orientation);

    let bitmap = Bitmap::from_rgba_image(oriented.into_rgba8());
    debug!(
        "decoded {}x{} image (orientation {:?})",
        bitmap.width, bitmap.height, orientation
    );
    Ok(bitmap)
}

/// Decode an encoded image without applying EXIF orientation.
///
/// Use this when the image was already oriented by the acquisition layer.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    let img = decode_dynamic(bytes)?;
    Ok(Bitmap::from_rgba_image(img.into_rgba8()))
}

/// Extract the EXIF orientation from encoded image bytes.
///
/// Returns `Orientation::Normal` when no EXIF data is present.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: img.width(),
            height: img.height(),
        });
    }
    Ok(img)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
