use serde::{Deserialize, Serialize};

use crate::bars::SlotColor;

/// RGB palette for bar colors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Resting bars (steelblue).
    pub default: [f32; 3],
    /// Bars under comparison (yellow).
    pub comparing: [f32; 3],
    /// Swap, shift or write in progress (red).
    pub active: [f32; 3],
    /// Quick sort pivot (red).
    pub pivot: [f32; 3],
    /// Selection sort minimum candidate (orange).
    pub minimum: [f32; 3],
    /// Quick sort partition exchange (purple).
    pub exchanged: [f32; 3],
    /// Sorted bars (green).
    pub sorted: [f32; 3],
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            default: [0.275, 0.510, 0.706],
            comparing: [1.0, 1.0, 0.0],
            active: [1.0, 0.0, 0.0],
            pivot: [1.0, 0.0, 0.0],
            minimum: [1.0, 0.647, 0.0],
            exchanged: [0.502, 0.0, 0.502],
            sorted: [0.0, 0.502, 0.0],
        }
    }
}

impl ColorOptions {
    /// RGB for a slot color.
    #[must_use]
    pub fn rgb(&self, color: SlotColor) -> [f32; 3] {
        match color {
            SlotColor::Default => self.default,
            SlotColor::Comparing => self.comparing,
            SlotColor::Active => self.active,
            SlotColor::Pivot => self.pivot,
            SlotColor::Minimum => self.minimum,
            SlotColor::Exchanged => self.exchanged,
            SlotColor::Sorted => self.sorted,
        }
    }

    /// RGB for a slot color as 8-bit channels.
    #[must_use]
    pub fn rgb8(&self, color: SlotColor) -> [u8; 3] {
        self.rgb(color)
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}
