pub mod chart;
pub mod cloud;

use egui::Color32;

use crate::render::chart::ChartStyle;

/// Explicit render configuration, passed into each render call instead of
/// being read from ambient UI state.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub top_n: usize,
    pub show_word_cloud: bool,
    pub show_chart: bool,
    pub chart_style: ChartStyle,
    pub cloud_background: Color32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            top_n: 20,
            show_word_cloud: true,
            show_chart: true,
            chart_style: ChartStyle::Pie,
            cloud_background: Color32::BLACK,
        }
    }
}

/// Dark, saturated series colors for light backgrounds
pub const PALETTE_DARK: &[Color32] = &[
    Color32::from_rgb(191, 31, 31),  // Dark Red
    Color32::from_rgb(20, 77, 179),  // Dark Blue
    Color32::from_rgb(166, 128, 0),  // Dark Gold
    Color32::from_rgb(20, 128, 56),  // Dark Green
    Color32::from_rgb(128, 31, 166), // Dark Purple
    Color32::from_rgb(191, 77, 0),   // Dark Orange
    Color32::from_rgb(0, 115, 128),  // Dark Cyan
    Color32::from_rgb(166, 46, 89),  // Dark Pink
];

/// Lifted variants for dark backgrounds
pub const PALETTE_BRIGHT: &[Color32] = &[
    Color32::from_rgb(235, 87, 87),
    Color32::from_rgb(86, 144, 235),
    Color32::from_rgb(235, 196, 70),
    Color32::from_rgb(94, 201, 124),
    Color32::from_rgb(186, 104, 224),
    Color32::from_rgb(240, 140, 66),
    Color32::from_rgb(72, 201, 212),
    Color32::from_rgb(235, 110, 160),
];

/// Pick the palette that stays readable over the given background.
pub fn palette_for(background: Color32) -> &'static [Color32] {
    if is_dark(background) {
        PALETTE_BRIGHT
    } else {
        PALETTE_DARK
    }
}

/// Perceived-luminance check
pub fn is_dark(color: Color32) -> bool {
    let [r, g, b, _] = color.to_array();
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * (b as f32) < 128.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_gets_the_bright_palette() {
        assert!(is_dark(Color32::BLACK));
        assert_eq!(palette_for(Color32::BLACK), PALETTE_BRIGHT);
    }

    #[test]
    fn white_gets_the_dark_palette() {
        assert!(!is_dark(Color32::WHITE));
        assert_eq!(palette_for(Color32::WHITE), PALETTE_DARK);
    }
}
