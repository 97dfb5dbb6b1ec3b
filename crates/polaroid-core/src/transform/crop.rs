//! Crop regions and their validation.
//!
//! A [`CropRegion`] is a rectangle in source pixel coordinates plus a rotation
//! angle. The interactive crop UI resolves drag, zoom and rotate gestures into
//! one of these; this crate only rasterizes the final region.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left pixel of the source
//! - `x + width <= source width`, `y + height <= source height`
//! - Rotation is in degrees, positive = clockwise on screen

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::Bitmap;

/// Largest render surface side, in pixels.
pub const MAX_SURFACE_DIMENSION: u32 = 32_767;

/// Largest render surface area, in pixels.
pub const MAX_SURFACE_AREA: u64 = 268_435_456;

/// Error types for crop rasterization.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CropError {
    /// The region is empty, out of source bounds, or has a non-finite angle.
    #[error("Invalid crop region: {0}")]
    InvalidRegion(String),

    /// The source pixel buffer does not match its declared dimensions.
    #[error("Source buffer is {actual} bytes, expected {expected}")]
    SourceBuffer { expected: usize, actual: usize },

    /// The output would not fit a render surface.
    #[error("Cannot create a {width}x{height} render surface")]
    RenderSurface { width: u32, height: u32 },
}

/// A source-space rectangle plus rotation describing one crop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Rotation in degrees (the UI uses 90 degree steps)
    #[serde(default)]
    pub rotation_degrees: f64,
}

impl CropRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32, rotation_degrees: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation_degrees,
        }
    }

    /// The whole bitmap, unrotated.
    pub fn full(bitmap: &Bitmap) -> Self {
        Self::new(0, 0, bitmap.width, bitmap.height, 0.0)
    }

    /// Check the region against source dimensions.
    ///
    /// Regions are rejected rather than clamped: a silently shrunk crop would
    /// not be what the user framed.
    pub fn validate(&self, source_width: u32, source_height: u32) -> Result<(), CropError> {
        if self.width == 0 || self.height == 0 {
            return Err(CropError::InvalidRegion(format!(
                "region is empty ({}x{})",
                self.width, self.height
            )));
        }
        if !self.rotation_degrees.is_finite() {
            return Err(CropError::InvalidRegion(format!(
                "rotation must be finite, got {}",
                self.rotation_degrees
            )));
        }

        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        match (right, bottom) {
            (Some(r), Some(b)) if r <= source_width && b <= source_height => Ok(()),
            _ => Err(CropError::InvalidRegion(format!(
                "region {}x{} at ({}, {}) exceeds {}x{} source",
                self.width, self.height, self.x, self.y, source_width, source_height
            ))),
        }
    }
}

/// Check that a `width` x `height` surface can be allocated.
pub(crate) fn check_surface(width: u32, height: u32) -> Result<(), CropError> {
    let area = width as u64 * height as u64;
    if width == 0
        || height == 0
        || width > MAX_SURFACE_DIMENSION
        || height > MAX_SURFACE_DIMENSION
        || area > MAX_SURFACE_AREA
    {
        return Err(CropError::RenderSurface { width, height });
    }
    Ok(())
}
