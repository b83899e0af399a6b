// Read-only style tables: line colors, dash patterns and marker glyphs

use plotters::style::RGBColor;
use tracing::warn;

/// Colors handed out to lines without an explicit color, in assignment order.
pub const LINE_PALETTE: [(&str, RGBColor); 9] = [
    ("black", RGBColor(0, 0, 0)),
    ("red", RGBColor(255, 0, 0)),
    ("blue", RGBColor(0, 0, 255)),
    ("green", RGBColor(0, 128, 0)),
    ("cyan", RGBColor(0, 255, 255)),
    ("magenta", RGBColor(255, 0, 255)),
    ("orange", RGBColor(255, 165, 0)),
    ("purple", RGBColor(128, 0, 128)),
    ("yellow", RGBColor(255, 255, 0)),
];

/// Look up a palette color by name (case-insensitive).
pub fn named_color(name: &str) -> Option<RGBColor> {
    LINE_PALETTE
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, c)| c)
}

/// Per-chart automatic color assignment.
///
/// Walks `LINE_PALETTE` cyclically and skips colors already taken in this
/// chart, either by an earlier automatic pick or by an explicit palette
/// color. Once every entry is taken the bookkeeping resets and the walk
/// continues, so colors repeat only after the palette is exhausted.
#[derive(Debug, Clone, Default)]
pub struct ColorCycle {
    cursor: usize,
    used: [bool; LINE_PALETTE.len()],
}

impl ColorCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_color(&mut self) -> RGBColor {
        if self.used.iter().all(|&u| u) {
            self.used = [false; LINE_PALETTE.len()];
        }
        loop {
            let index = self.cursor;
            self.cursor = (self.cursor + 1) % LINE_PALETTE.len();
            if !self.used[index] {
                self.used[index] = true;
                return LINE_PALETTE[index].1;
            }
        }
    }

    /// Record an explicitly chosen color. Colors outside the palette are ignored.
    pub fn mark_used(&mut self, color: RGBColor) {
        if let Some(index) = LINE_PALETTE.iter().position(|&(_, c)| c == color) {
            self.used[index] = true;
        }
    }
}

/// Stroke dash pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    /// Parse the matplotlib-like symbols `-`, `--`, `:` and `-.`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(LineStyle::Solid),
            "--" => Some(LineStyle::Dashed),
            ":" => Some(LineStyle::Dotted),
            "-." => Some(LineStyle::DashDot),
            _ => {
                warn!(symbol, "unknown line style symbol");
                None
            }
        }
    }

    /// Alternating on/off lengths in points; empty means a continuous stroke.
    pub fn dashes(&self) -> &'static [f64] {
        match self {
            LineStyle::Solid => &[],
            LineStyle::Dashed => &[5.0],
            LineStyle::Dotted => &[1.0],
            LineStyle::DashDot => &[6.0, 3.0, 1.0, 3.0],
        }
    }
}

/// Glyph drawn at a data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerShape {
    #[default]
    Circle,
    Square,
    Triangle,
    Plus,
    Cross,
}

impl MarkerShape {
    /// Parse the symbols `o`, `s`, `p`, `+` and `x`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "o" => Some(MarkerShape::Circle),
            "s" => Some(MarkerShape::Square),
            "p" => Some(MarkerShape::Triangle),
            "+" => Some(MarkerShape::Plus),
            "x" => Some(MarkerShape::Cross),
            _ => {
                warn!(symbol, "unknown marker symbol");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_color_lookup() {
        assert_eq!(named_color("red"), Some(RGBColor(255, 0, 0)));
        assert_eq!(named_color("Orange"), Some(RGBColor(255, 165, 0)));
        assert_eq!(named_color("chartreuse"), None);
    }

    #[test]
    fn test_color_cycle_palette_order() {
        let mut cycle = ColorCycle::new();
        for (_, expected) in LINE_PALETTE.iter() {
            assert_eq!(cycle.next_color(), *expected);
        }
    }

    #[test]
    fn test_color_cycle_wraps_after_exhaustion() {
        let mut cycle = ColorCycle::new();
        for _ in 0..LINE_PALETTE.len() {
            cycle.next_color();
        }
        assert_eq!(cycle.next_color(), LINE_PALETTE[0].1);
        assert_eq!(cycle.next_color(), LINE_PALETTE[1].1);
    }

    #[test]
    fn test_color_cycle_skips_explicit_colors() {
        let mut cycle = ColorCycle::new();
        cycle.mark_used(RGBColor(255, 0, 0));
        assert_eq!(cycle.next_color(), RGBColor(0, 0, 0));
        assert_eq!(cycle.next_color(), RGBColor(0, 0, 255));
    }

    #[test]
    fn test_mark_used_ignores_foreign_colors() {
        let mut cycle = ColorCycle::new();
        cycle.mark_used(RGBColor(1, 2, 3));
        assert_eq!(cycle.next_color(), LINE_PALETTE[0].1);
    }

    #[test]
    fn test_line_style_symbols() {
        assert_eq!(LineStyle::from_symbol("--"), Some(LineStyle::Dashed));
        assert_eq!(LineStyle::from_symbol("-."), Some(LineStyle::DashDot));
        assert_eq!(LineStyle::from_symbol("~"), None);
        assert!(LineStyle::Solid.dashes().is_empty());
        assert_eq!(LineStyle::DashDot.dashes(), &[6.0, 3.0, 1.0, 3.0]);
    }

    #[test]
    fn test_marker_symbols() {
        assert_eq!(MarkerShape::from_symbol("o"), Some(MarkerShape::Circle));
        assert_eq!(MarkerShape::from_symbol("p"), Some(MarkerShape::Triangle));
        assert_eq!(MarkerShape::from_symbol("*"), None);
    }
}
