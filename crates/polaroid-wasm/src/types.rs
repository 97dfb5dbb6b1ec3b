//! WASM-compatible wrapper types for image data.

use polaroid_core::decode::Bitmap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::ImageData;

use crate::to_js_error;

/// An RGBA image handle for JavaScript.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` and `to_image_data()`
/// copy it out to JavaScript. Chain core operations on `JsBitmap` values
/// and only copy the final result.
#[wasm_bindgen]
pub struct JsBitmap {
    inner: Bitmap,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a bitmap from RGBA pixel data (4 bytes per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsBitmap, JsValue> {
        Bitmap::from_raw(width, height, pixels)
            .map(Self::from_bitmap)
            .map_err(to_js_error)
    }

    /// Wrap the contents of a canvas `ImageData`.
    pub fn from_image_data(data: &ImageData) -> Result<JsBitmap, JsValue> {
        Self::new(data.width(), data.height(), data.data().0)
    }

    /// Copy into a new `ImageData`, ready for `putImageData`.
    pub fn to_image_data(&self) -> Result<ImageData, JsValue> {
        ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(&self.inner.pixels),
            self.inner.width,
            self.inner.height,
        )
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns RGBA pixel data as a `Uint8Array` copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer releases it otherwise.
    pub fn free(self) {}
}

impl JsBitmap {
    pub(crate) fn from_bitmap(inner: Bitmap) -> Self {
        Self { inner }
    }

    pub(crate) fn bitmap(&self) -> &Bitmap {
        &self.inner
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_image_data_round_trip() {
        let img = JsBitmap::new(3, 2, (0..24).collect()).unwrap();
        let data = img.to_image_data().unwrap();
        assert_eq!(data.width(), 3);

        let back = JsBitmap::from_image_data(&data).unwrap();
        assert_eq!(back.pixels(), img.pixels());
    }

    #[wasm_bindgen_test]
    fn test_constructor_rejects_rgb_buffer() {
        assert!(JsBitmap::new(2, 2, vec![0; 12]).is_err());
    }
}
