//! Grading WASM bindings.
//!
//! Exposes the grading values edited by the tweak sliders, the preset
//! catalog behind the filter picker, and the grading pipeline itself.

use crate::to_js_error;
use crate::types::JsBitmap;
use polaroid_core::presets::{self, PRESETS};
use polaroid_core::preview;
use polaroid_core::{apply_color_grading, Adjustments};
use wasm_bindgen::prelude::*;

/// Grading values wrapper for JavaScript
#[wasm_bindgen]
pub struct JsAdjustments {
    inner: Adjustments,
}

#[wasm_bindgen]
impl JsAdjustments {
    /// Create the identity grading
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: Adjustments::IDENTITY,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f32 {
        self.inner.brightness
    }

    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f32) {
        self.inner.brightness = value;
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast
    }

    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f32) {
        self.inner.contrast = value;
    }

    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f32 {
        self.inner.saturation
    }

    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: f32) {
        self.inner.saturation = value;
    }

    /// Hue rotation in degrees
    #[wasm_bindgen(getter)]
    pub fn hue(&self) -> f32 {
        self.inner.hue
    }

    #[wasm_bindgen(setter)]
    pub fn set_hue(&mut self, value: f32) {
        self.inner.hue = value;
    }

    #[wasm_bindgen(getter)]
    pub fn noise(&self) -> f32 {
        self.inner.noise
    }

    #[wasm_bindgen(setter)]
    pub fn set_noise(&mut self, value: f32) {
        self.inner.noise = value;
    }

    #[wasm_bindgen(getter)]
    pub fn glare(&self) -> f32 {
        self.inner.glare
    }

    #[wasm_bindgen(setter)]
    pub fn set_glare(&mut self, value: f32) {
        self.inner.glare = value;
    }

    /// Check if these values leave an image unchanged
    pub fn is_identity(&self) -> bool {
        self.inner.is_identity()
    }

    /// Serialize to a plain object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(to_js_error)
    }

    /// Deserialize from a plain object; missing fields take identity values
    pub fn from_json(value: JsValue) -> Result<JsAdjustments, JsValue> {
        let inner: Adjustments = serde_wasm_bindgen::from_value(value).map_err(to_js_error)?;
        Ok(Self { inner })
    }
}

impl Default for JsAdjustments {
    fn default() -> Self {
        Self::new()
    }
}

impl JsAdjustments {
    pub(crate) fn inner(&self) -> &Adjustments {
        &self.inner
    }
}

/// Adjustments for a preset by name; unknown names give the identity.
#[wasm_bindgen]
pub fn preset_adjustments(name: &str) -> JsAdjustments {
    JsAdjustments {
        inner: presets::preset_adjustments(name),
    }
}

/// The preset catalog as an array of `{ name, label, adjustments }` objects.
#[wasm_bindgen]
pub fn list_presets() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(PRESETS).map_err(to_js_error)
}

/// Grade an image, returning a new image.
///
/// `seed` drives grain and glare placement. When omitted, a fresh seed is
/// drawn so each call looks different, as in a real print.
///
/// # Example (TypeScript)
/// ```typescript
/// const adj = preset_adjustments('dreamy');
/// adj.glare = 0;
/// const graded = apply_grading(image, adj);
/// ```
#[wasm_bindgen]
pub fn apply_grading(image: &JsBitmap, adjustments: &JsAdjustments, seed: Option<u64>) -> JsBitmap {
    let seed = seed.unwrap_or_else(random_seed);
    JsBitmap::from_bitmap(apply_color_grading(
        image.bitmap(),
        adjustments.inner(),
        seed,
    ))
}

/// Render a filter picker thumbnail: the image squeezed to `size x size`
/// and graded with `adjustments`.
///
/// `size` defaults to 100. `seed` behaves as in [`apply_grading`].
///
/// # Example (TypeScript)
/// ```typescript
/// const thumb = preset_preview(image, 100, preset_adjustments('vintage'));
/// ctx.putImageData(thumb.to_image_data(), 0, 0);
/// ```
#[wasm_bindgen]
pub fn preset_preview(
    image: &JsBitmap,
    size: Option<u32>,
    adjustments: &JsAdjustments,
    seed: Option<u64>,
) -> Result<JsBitmap, JsValue> {
    let seed = seed.unwrap_or_else(random_seed);
    render_preview(image, size, adjustments, seed).map_err(to_js_error)
}

fn render_preview(
    image: &JsBitmap,
    size: Option<u32>,
    adjustments: &JsAdjustments,
    seed: u64,
) -> Result<JsBitmap, polaroid_core::DecodeError> {
    let size = size.unwrap_or(preview::PREVIEW_SIZE);
    preview::preset_preview(image.bitmap(), size, adjustments.inner(), seed)
        .map(JsBitmap::from_bitmap)
}

fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}
