//! Built-in filter presets.
//!
//! Presets are read-only. Selecting one copies its [`Adjustments`] into the
//! caller's editing state; the grading pipeline itself never sees a name.

use log::debug;
use serde::Serialize;

use crate::Adjustments;

/// A named, labeled grading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    /// Stable identifier used by the UI (e.g. `"blackAndWhite"`)
    pub name: &'static str,
    /// Display label
    pub label: &'static str,
    pub adjustments: Adjustments,
}

const fn preset(
    name: &'static str,
    label: &'static str,
    adjustments: [f32; 6],
) -> Preset {
    let [brightness, contrast, saturation, hue, noise, glare] = adjustments;
    Preset {
        name,
        label,
        adjustments: Adjustments::new(brightness, contrast, saturation, hue, noise, glare),
    }
}

/// The preset catalog, in display order.
///
/// Values are `[brightness, contrast, saturation, hue, noise, glare]`.
pub static PRESETS: &[Preset] = &[
    preset("original", "Natural", [1.0, 1.0, 1.0, 0.0, 0.0, 0.0]),
    preset("vintage", "Retro", [1.1, 0.9, 1.2, 15.0, 0.1, 0.3]),
    preset("blackAndWhite", "Mono", [1.0, 1.2, 0.0, 0.0, 0.05, 0.0]),
    preset("warm", "Sunny", [1.05, 1.05, 1.3, 10.0, 0.0, 0.0]),
    preset("cool", "Fresh", [1.0, 1.05, 0.9, -10.0, 0.0, 0.0]),
    preset("dreamy", "Dreamy", [1.1, 0.85, 0.9, 5.0, 0.15, 0.4]),
    preset("vibrant", "Vibrant", [1.1, 1.2, 1.4, 0.0, 0.0, 0.1]),
    preset("night", "Night", [0.9, 1.1, 0.8, -15.0, 0.2, 0.1]),
    preset("dramatic", "Dramatic", [1.05, 1.3, 0.9, 0.0, 0.1, 0.2]),
    preset("sepia", "Sepia", [1.1, 1.1, 0.8, 30.0, 0.05, 0.1]),
    preset("spring", "Spring", [1.05, 1.0, 1.2, -10.0, 0.0, 0.2]),
    preset("autumn", "Autumn", [1.0, 1.1, 1.3, 20.0, 0.05, 0.1]),
    preset("winter", "Winter", [1.1, 0.9, 0.7, -15.0, 0.1, 0.3]),
    preset("hdr", "HDR", [1.1, 1.3, 1.2, 0.0, 0.0, 0.2]),
];

/// Look up a preset by its identifier.
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name == name)
}

/// Adjustments for a preset, or the identity for unknown names.
pub fn preset_adjustments(name: &str) -> Adjustments {
    match find_preset(name) {
        Some(p) => p.adjustments,
        None => {
            debug!("unknown preset {:?}, using identity", name);
            Adjustments::IDENTITY
        }
    }
}
