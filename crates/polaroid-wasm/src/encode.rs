//! Image encoding WASM bindings.
//!
//! The export button and the preview `<img>` use these to turn a processed
//! image into bytes or a data URL.
//!
//! # Example
//!
//! ```typescript
//! import { encode_jpeg, to_data_url } from '@polaroid/wasm';
//!
//! const jpeg = encode_jpeg(processed, 95);
//! await writable.write(new Blob([jpeg], { type: 'image/jpeg' }));
//!
//! img.src = to_data_url(processed, false);
//! ```

use crate::to_js_error;
use crate::types::JsBitmap;
use polaroid_core::encode::{self, OutputFormat, DEFAULT_JPEG_QUALITY};
use wasm_bindgen::prelude::*;

/// Encode an image to JPEG bytes.
///
/// Transparent areas become black. `quality` is clamped to 1-100; the
/// product default is 95.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsBitmap, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(image.bitmap(), quality).map_err(to_js_error)
}

/// Encode an image to lossless PNG bytes, keeping transparency.
#[wasm_bindgen]
pub fn encode_png(image: &JsBitmap) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(image.bitmap()).map_err(to_js_error)
}

/// Encode an image as a `data:` URL: PNG when `lossless`, else JPEG at 95.
#[wasm_bindgen]
pub fn to_data_url(image: &JsBitmap, lossless: bool) -> Result<String, JsValue> {
    encode::to_data_url(image.bitmap(), output_format(lossless)).map_err(to_js_error)
}

fn output_format(lossless: bool) -> OutputFormat {
    if lossless {
        OutputFormat::Png
    } else {
        OutputFormat::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Tests for encode bindings.
///
/// Functions returning `Result<T, JsValue>` only run on wasm32 targets; the
/// underlying encoders are covered in `polaroid_core::encode`.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_selection() {
        assert_eq!(output_format(true), OutputFormat::Png);
        assert_eq!(output_format(false), OutputFormat::default());
    }
}
