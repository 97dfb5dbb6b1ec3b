//! Image acquisition boundary.
//!
//! This module turns what the UI hands over (file uploads, camera captures,
//! raw canvas buffers) into [`Bitmap`] values:
//! - Decoding JPEG and PNG bytes with EXIF orientation correction
//! - Validating raw RGBA buffers against their declared dimensions
//!
//! All operations are synchronous. Decoding is the only step of an edit that
//! can fail because of the input bytes themselves.
//!
//! # Examples
//!
//! ```ignore
//! use polaroid_core::decode::decode_image;
//!
//! let bytes = std::fs::read("snapshot.jpg").unwrap();
//! let bitmap = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", bitmap.width, bitmap.height);
//! ```

mod loader;
mod types;

pub use loader::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{Bitmap, DecodeError, Orientation, CHANNELS};
