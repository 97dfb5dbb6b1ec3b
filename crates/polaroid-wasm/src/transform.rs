//! WASM bindings for crop and rotate.

use crate::to_js_error;
use crate::types::JsBitmap;
use polaroid_core::transform::{self, CropRegion};
use wasm_bindgen::prelude::*;

/// Crop a pixel rectangle out of an image and rotate it.
///
/// The output grows to the rotated bounding box; uncovered area is
/// transparent. Errors if the rectangle leaves the image.
///
/// # Arguments
///
/// * `image` - Source image
/// * `x`, `y` - Top-left corner of the crop in source pixels
/// * `width`, `height` - Crop size in source pixels
/// * `rotation_degrees` - Clockwise rotation (the rotate button uses steps of 90)
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = crop_and_rotate(image, 10, 10, 50, 30, 90); // 30x50
/// ```
#[wasm_bindgen]
pub fn crop_and_rotate(
    image: &JsBitmap,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    rotation_degrees: f64,
) -> Result<JsBitmap, JsValue> {
    let region = CropRegion::new(x, y, width, height, rotation_degrees);
    crop_region(image, &region).map_err(to_js_error)
}

fn crop_region(image: &JsBitmap, region: &CropRegion) -> Result<JsBitmap, transform::CropError> {
    transform::crop_and_rotate(image.bitmap(), region).map(JsBitmap::from_bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polaroid_core::decode::Bitmap;

    fn test_image(width: u32, height: u32) -> JsBitmap {
        let pixels: Vec<u8> = (0..(width * height * 4) as usize)
            .map(|i| (i % 256) as u8)
            .collect();
        JsBitmap::from_bitmap(Bitmap::from_raw(width, height, pixels).unwrap())
    }

    #[test]
    fn test_crop_without_rotation() {
        let img = test_image(100, 100);
        let result = crop_region(&img, &CropRegion::new(10, 10, 50, 50, 0.0)).unwrap();
        assert_eq!((result.width(), result.height()), (50, 50));
    }

    #[test]
    fn test_crop_90_degrees_swaps() {
        let img = test_image(100, 100);
        let result = crop_region(&img, &CropRegion::new(0, 0, 50, 30, 90.0)).unwrap();
        assert_eq!((result.width(), result.height()), (30, 50));
    }

    #[test]
    fn test_crop_45_degrees_expands() {
        let img = test_image(100, 100);
        let result = crop_region(&img, &CropRegion::new(0, 0, 100, 100, 45.0)).unwrap();
        assert!(result.width() > 100 && result.height() > 100);
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let img = test_image(20, 20);
        assert!(crop_region(&img, &CropRegion::new(10, 10, 11, 5, 0.0)).is_err());
    }
}
