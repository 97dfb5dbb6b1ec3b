//! Polaroid WASM - WebAssembly bindings for the Polaroid editor
//!
//! This crate exposes polaroid-core to the browser UI: the editor screen
//! decodes uploads, grades previews on slider changes, crops, and exports
//! through these functions.
//!
//! # Module Structure
//!
//! - `types` - `JsBitmap`, the RGBA image handle shared with JavaScript
//! - `adjustments` - Grading values, presets, `apply_grading` and picker thumbnails
//! - `decode` - Upload and camera capture decoding
//! - `transform` - Crop and rotate
//! - `encode` - JPEG/PNG export and data URLs
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, preset_adjustments, apply_grading } from '@polaroid/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const graded = apply_grading(image, preset_adjustments('vintage'));
//! ctx.putImageData(graded.to_image_data(), 0, 0);
//! ```

use log::info;
use wasm_bindgen::prelude::*;

mod adjustments;
mod decode;
mod encode;
mod transform;
mod types;

// Re-export public types
pub use adjustments::{
    apply_grading, list_presets, preset_adjustments, preset_preview, JsAdjustments,
};
pub use decode::{decode_image, image_orientation};
pub use encode::{encode_jpeg, encode_png, to_data_url};
pub use transform::crop_and_rotate;
pub use types::JsBitmap;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    info!("polaroid-wasm {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert any displayable error into a JavaScript error value.
pub(crate) fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
