// Per-layer configuration: documented defaults, overridden by with_* calls

use plotters::style::RGBColor;
use tracing::warn;

use crate::colorscale::Gradient;
use crate::palette::{named_color, LineStyle, MarkerShape};

/// Where a colorbar sits relative to its main panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// To the right of the panel.
    Vertical,
    /// Below the panel.
    Horizontal,
}

/// Options for [`Plot::add_line`](crate::plot::Plot::add_line).
///
/// | field            | default            |
/// |------------------|--------------------|
/// | `color`          | next palette color |
/// | `width`          | 1.5 pt             |
/// | `style`          | solid              |
/// | `marker`         | none               |
/// | `marker_size`    | 3 pt               |
/// | `marker_spacing` | every point        |
#[derive(Debug, Clone, PartialEq)]
pub struct LineOptions {
    pub color: Option<RGBColor>,
    pub width: f64,
    pub style: LineStyle,
    pub marker: Option<MarkerShape>,
    pub marker_size: f64,
    pub marker_spacing: usize,
}

impl Default for LineOptions {
    fn default() -> Self {
        LineOptions {
            color: None,
            width: 1.5,
            style: LineStyle::Solid,
            marker: None,
            marker_size: 3.0,
            marker_spacing: 1,
        }
    }
}

impl LineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: RGBColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Pick a color from the line palette by name. Unknown names leave the
    /// color unchanged.
    pub fn with_named_color(mut self, name: &str) -> Self {
        match named_color(name) {
            Some(color) => self.color = Some(color),
            None => warn!(name, "unknown color name ignored"),
        }
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the style from `-`, `--`, `:` or `-.`; anything else is ignored.
    pub fn with_style_symbol(mut self, symbol: &str) -> Self {
        if let Some(style) = LineStyle::from_symbol(symbol) {
            self.style = style;
        }
        self
    }

    pub fn with_marker(mut self, marker: MarkerShape) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Set the marker from `o`, `s`, `p`, `+` or `x`; anything else is ignored.
    pub fn with_marker_symbol(mut self, symbol: &str) -> Self {
        if let Some(marker) = MarkerShape::from_symbol(symbol) {
            self.marker = Some(marker);
        }
        self
    }

    pub fn with_marker_size(mut self, size: f64) -> Self {
        self.marker_size = size;
        self
    }

    /// Draw a marker on every `spacing`-th point. Zero behaves like one.
    pub fn with_marker_spacing(mut self, spacing: usize) -> Self {
        self.marker_spacing = spacing.max(1);
        self
    }
}

/// Options shared by contour lines and filled contours.
///
/// | field        | default                                      |
/// |--------------|----------------------------------------------|
/// | `levels`     | 10                                           |
/// | `gradient`   | none (lines: black; filled: Viridis)         |
/// | `show_lines` | false (filled only: overlay black lines)     |
/// | `line_width` | 1 pt                                         |
/// | `line_style` | solid                                        |
/// | `colorbar`   | none                                         |
#[derive(Debug, Clone)]
pub struct ContourOptions {
    pub levels: usize,
    pub gradient: Option<Gradient>,
    pub show_lines: bool,
    pub line_width: f64,
    pub line_style: LineStyle,
    pub colorbar: Option<Orientation>,
}

impl Default for ContourOptions {
    fn default() -> Self {
        ContourOptions {
            levels: 10,
            gradient: None,
            show_lines: false,
            line_width: 1.0,
            line_style: LineStyle::Solid,
            colorbar: None,
        }
    }
}

impl ContourOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of thresholds. Zero behaves like one.
    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels.max(1);
        self
    }

    pub fn with_gradient(mut self, gradient: impl Into<Gradient>) -> Self {
        self.gradient = Some(gradient.into());
        self
    }

    pub fn with_contour_lines(mut self) -> Self {
        self.show_lines = true;
        self
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_line_style(mut self, style: LineStyle) -> Self {
        self.line_style = style;
        self
    }

    pub fn with_colorbar(mut self, orientation: Orientation) -> Self {
        self.colorbar = Some(orientation);
        self
    }
}

/// Options for [`Plot::add_scatter`](crate::plot::Plot::add_scatter).
///
/// `color` applies when no per-point values are given; `gradient` colors
/// points by value otherwise.
#[derive(Debug, Clone)]
pub struct ScatterOptions {
    pub color: RGBColor,
    pub gradient: Gradient,
    pub marker: MarkerShape,
    pub marker_size: f64,
    pub colorbar: Option<Orientation>,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        ScatterOptions {
            color: RGBColor(0, 0, 255),
            gradient: Gradient::viridis(),
            marker: MarkerShape::Circle,
            marker_size: 3.0,
            colorbar: None,
        }
    }
}

impl ScatterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: RGBColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_gradient(mut self, gradient: impl Into<Gradient>) -> Self {
        self.gradient = gradient.into();
        self
    }

    pub fn with_marker(mut self, marker: MarkerShape) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_marker_size(mut self, size: f64) -> Self {
        self.marker_size = size;
        self
    }

    pub fn with_colorbar(mut self, orientation: Orientation) -> Self {
        self.colorbar = Some(orientation);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_defaults() {
        let opts = LineOptions::default();
        assert_eq!(opts.color, None);
        assert_eq!(opts.width, 1.5);
        assert_eq!(opts.style, LineStyle::Solid);
        assert_eq!(opts.marker, None);
        assert_eq!(opts.marker_size, 3.0);
        assert_eq!(opts.marker_spacing, 1);
    }

    #[test]
    fn test_line_overrides_apply_in_order() {
        let opts = LineOptions::new()
            .with_named_color("red")
            .with_color(RGBColor(1, 2, 3))
            .with_width(4.0)
            .with_style_symbol("--")
            .with_marker_symbol("s")
            .with_marker_spacing(0);
        assert_eq!(opts.color, Some(RGBColor(1, 2, 3)));
        assert_eq!(opts.width, 4.0);
        assert_eq!(opts.style, LineStyle::Dashed);
        assert_eq!(opts.marker, Some(MarkerShape::Square));
        assert_eq!(opts.marker_spacing, 1);
    }

    #[test]
    fn test_unknown_names_keep_previous_values() {
        let opts = LineOptions::new()
            .with_named_color("blue")
            .with_named_color("not-a-color")
            .with_style_symbol("?")
            .with_marker_symbol("?");
        assert_eq!(opts.color, Some(RGBColor(0, 0, 255)));
        assert_eq!(opts.style, LineStyle::Solid);
        assert_eq!(opts.marker, None);
    }

    #[test]
    fn test_contour_defaults_and_overrides() {
        let opts = ContourOptions::default();
        assert_eq!(opts.levels, 10);
        assert!(opts.gradient.is_none());
        assert!(!opts.show_lines);
        assert_eq!(opts.colorbar, None);

        let opts = ContourOptions::new()
            .with_levels(0)
            .with_gradient(Gradient::magma())
            .with_contour_lines()
            .with_line_style(LineStyle::Dotted)
            .with_colorbar(Orientation::Horizontal);
        assert_eq!(opts.levels, 1);
        assert!(opts.gradient.is_some());
        assert!(opts.show_lines);
        assert_eq!(opts.line_style, LineStyle::Dotted);
        assert_eq!(opts.colorbar, Some(Orientation::Horizontal));
    }

    #[test]
    fn test_scatter_defaults() {
        let opts = ScatterOptions::default();
        assert_eq!(opts.color, RGBColor(0, 0, 255));
        assert_eq!(opts.marker, MarkerShape::Circle);
        assert_eq!(opts.marker_size, 3.0);
        assert_eq!(opts.colorbar, None);
    }
}
