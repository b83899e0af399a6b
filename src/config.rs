// Rendering configuration and physical unit conversion

use plotters::style::RGBColor;

/// Gap between a main panel and its colorbar, in centimetres.
pub const COLORBAR_SPACING_CM: f64 = 1.5;

/// Padding between neighbouring tiles, in centimetres.
pub const TILE_PADDING_CM: f64 = 1.0;

const CM_PER_INCH: f64 = 2.54;
const POINTS_PER_INCH: f64 = 72.0;

/// Settings shared by every panel drawn onto one surface.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Pixels per inch used to turn physical sizes into pixels.
    pub dpi: f64,
    pub font_family: String,
    pub title_font_size: u32,
    pub label_font_size: u32,
    pub tick_font_size: u32,
    /// Blank border around each chart, in pixels.
    pub chart_margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
    pub background: RGBColor,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            dpi: 96.0,
            font_family: "sans-serif".to_string(),
            title_font_size: 20,
            label_font_size: 16,
            tick_font_size: 12,
            chart_margin: 10,
            x_label_area: 40,
            y_label_area: 50,
            background: RGBColor(255, 255, 255),
        }
    }
}

impl RenderConfig {
    pub fn cm_to_px(&self, cm: f64) -> u32 {
        cm_to_px(cm, self.dpi)
    }

    pub fn pt_to_px(&self, pt: f64) -> f64 {
        pt_to_px(pt, self.dpi)
    }

    /// Height of the title band above a chart, in pixels.
    pub fn caption_height(&self) -> u32 {
        self.title_font_size * 9 / 5
    }
}

/// Convert centimetres to whole pixels at the given resolution.
pub fn cm_to_px(cm: f64, dpi: f64) -> u32 {
    (cm / CM_PER_INCH * dpi).round().max(0.0) as u32
}

/// Convert typographic points to (fractional) pixels.
pub fn pt_to_px(pt: f64, dpi: f64) -> f64 {
    pt * dpi / POINTS_PER_INCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cm_to_px_at_96_dpi() {
        assert_eq!(cm_to_px(2.54, 96.0), 96);
        assert_eq!(cm_to_px(10.0, 96.0), 378);
        assert_eq!(cm_to_px(0.0, 96.0), 0);
    }

    #[test]
    fn test_pt_to_px() {
        assert_eq!(pt_to_px(72.0, 96.0), 96.0);
        assert_eq!(pt_to_px(1.5, 96.0), 2.0);
    }

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.dpi, 96.0);
        assert_eq!(config.font_family, "sans-serif");
        assert_eq!(config.cm_to_px(2.54), 96);
        assert_eq!(config.caption_height(), 36);
    }
}
