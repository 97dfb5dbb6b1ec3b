//! Export boundary.
//!
//! This module provides functionality for:
//! - Encoding bitmaps to JPEG (the product default, quality 95) or PNG
//! - Wrapping encoded bytes in a `data:` URL for `<img>` sources and downloads
//!
//! # Examples
//!
//! ```ignore
//! use polaroid_core::encode::{to_data_url, OutputFormat};
//!
//! let url = to_data_url(&bitmap, OutputFormat::Png)?;
//! assert!(url.starts_with("data:image/png;base64,"));
//! ```

mod raster;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::decode::Bitmap;

pub use raster::{encode_jpeg, encode_png, EncodeError};

/// JPEG quality used when the caller does not choose one.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "camelCase")]
pub enum OutputFormat {
    /// Lossy, alpha flattened over black
    Jpeg { quality: u8 },
    /// Lossless RGBA
    Png,
}

impl OutputFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg { .. } => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Encode a bitmap in the requested format.
pub fn encode(bitmap: &Bitmap, format: OutputFormat) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpeg { quality } => encode_jpeg(bitmap, quality),
        OutputFormat::Png => encode_png(bitmap),
    }
}

/// Encode a bitmap and wrap it as a base64 `data:` URL.
pub fn to_data_url(bitmap: &Bitmap, format: OutputFormat) -> Result<String, EncodeError> {
    let bytes = encode(bitmap, format)?;
    Ok(format!(
        "data:{};base64,{}",
        format.mime_type(),
        STANDARD.encode(bytes)
    ))
}
