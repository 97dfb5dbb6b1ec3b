//! Editing state for one photo.
//!
//! An [`EditSession`] holds what the editor screen works with: the decoded
//! original, the current (possibly cropped) working image, and the current
//! grading. Nothing re-renders on its own; the caller decides when to call
//! [`EditSession::render`], e.g. after a slider is released.

use log::debug;
use thiserror::Error;

use crate::decode::{decode_image, Bitmap, DecodeError};
use crate::encode::{encode, EncodeError, OutputFormat};
use crate::grading::apply_color_grading;
use crate::presets::{preset_adjustments, Preset};
use crate::preview::preset_previews;
use crate::transform::{crop_and_rotate, CropError, CropRegion};
use crate::Adjustments;

/// Any failure of a single editing operation.
#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Crop(#[from] CropError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[derive(Debug, Clone)]
pub struct EditSession {
    original: Bitmap,
    working: Bitmap,
    adjustments: Adjustments,
    active_preset: Option<String>,
}

impl EditSession {
    pub fn new(original: Bitmap) -> Self {
        Self {
            working: original.clone(),
            original,
            adjustments: Adjustments::IDENTITY,
            active_preset: None,
        }
    }

    /// Start a session from uploaded or captured image bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EditError> {
        Ok(Self::new(decode_image(bytes)?))
    }

    pub fn original(&self) -> &Bitmap {
        &self.original
    }

    /// The image grading is applied to (the original after any crops).
    pub fn working(&self) -> &Bitmap {
        &self.working
    }

    pub fn adjustments(&self) -> Adjustments {
        self.adjustments
    }

    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }

    /// Copy a preset's grading into the current adjustments.
    ///
    /// Unknown names select the identity grading.
    pub fn select_preset(&mut self, name: &str) {
        self.adjustments = preset_adjustments(name);
        self.active_preset = Some(name.to_string());
    }

    /// Replace the current adjustments (manual slider edits).
    ///
    /// The active preset stays recorded so the picker keeps its highlight.
    pub fn set_adjustments(&mut self, adjustments: Adjustments) {
        self.adjustments = adjustments;
    }

    /// Back to the identity grading with no preset selected.
    pub fn reset_adjustments(&mut self) {
        self.adjustments = Adjustments::IDENTITY;
        self.active_preset = None;
    }

    /// Crop and rotate the working image.
    ///
    /// On error the working image is left as it was.
    pub fn crop(&mut self, region: &CropRegion) -> Result<(), EditError> {
        let cropped = crop_and_rotate(&self.working, region)?;
        debug!(
            "working image {}x{} -> {}x{}",
            self.working.width, self.working.height, cropped.width, cropped.height
        );
        self.working = cropped;
        Ok(())
    }

    /// Discard crops, restoring the original as the working image.
    pub fn revert(&mut self) {
        self.working = self.original.clone();
    }

    /// Grade the working image with the current adjustments.
    pub fn render(&self, seed: u64) -> Bitmap {
        apply_color_grading(&self.working, &self.adjustments, seed)
    }

    /// Picker thumbnails of the working image, one per preset.
    pub fn preset_previews(
        &self,
        size: u32,
        seed: u64,
    ) -> Result<Vec<(&'static Preset, Bitmap)>, EditError> {
        Ok(preset_previews(&self.working, size, seed)?)
    }

    /// Render and encode in one step.
    pub fn export(&self, seed: u64, format: OutputFormat) -> Result<Vec<u8>, EditError> {
        Ok(encode(&self.render(seed), format)?)
    }
}
