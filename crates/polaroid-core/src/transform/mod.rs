//! Crop and rotate rasterization.
//!
//! Produces a new bitmap from a resolved [`CropRegion`]: the pixel rectangle
//! the user framed plus the rotation applied with the rotate button.
//!
//! # Coordinate System
//!
//! - Crop coordinates are integer pixels in the source image
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Origin is top-left corner
//!
//! The output canvas grows to the rotated bounding box; area not covered by
//! the rotated crop is transparent.

mod crop;
mod rotation;

pub use crop::{CropError, CropRegion, MAX_SURFACE_AREA, MAX_SURFACE_DIMENSION};
pub use rotation::{compute_rotated_bounds, crop_and_rotate};
