//! Image decoding WASM bindings.
//!
//! Uploads and camera captures arrive as encoded bytes (JPEG or PNG). EXIF
//! orientation is applied so portrait phone shots come out upright.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@polaroid/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::to_js_error;
use crate::types::JsBitmap;
use polaroid_core::decode;
use wasm_bindgen::prelude::*;

/// Decode JPEG or PNG bytes into an RGBA image.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not a recognized image format
/// - The image is corrupted or truncated
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    decode::decode_image(bytes)
        .map(JsBitmap::from_bitmap)
        .map_err(to_js_error)
}

/// Read the EXIF orientation tag (1-8); 1 when absent.
#[wasm_bindgen]
pub fn image_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}
