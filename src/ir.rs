use image::{Rgb, RgbImage};
use ndarray::Array2;
use plotters::style::RGBColor;

use crate::colorscale::{ColorMap, ColorScale, Gradient};
use crate::error::{PlotError, PlotResult};
use crate::options::Orientation;
use crate::palette::{LineStyle, MarkerShape};
use crate::scale::{min_max, Extent};

// =============================================================================
// Styles
// =============================================================================

/// Resolved stroke: color plus width and dash pattern in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: RGBColor,
    pub width: f64,
    pub style: LineStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Markers {
    pub shape: MarkerShape,
    /// Glyph radius in points.
    pub size: f64,
    /// Every `spacing`-th point carries a glyph, starting at index 0.
    pub spacing: usize,
}

impl Markers {
    pub fn indices(&self, len: usize) -> Vec<usize> {
        (0..len).step_by(self.spacing.max(1)).collect()
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// A 2-D scalar field sampled on a rectilinear grid.
///
/// `z` has one row per `ys` entry and one column per `xs` entry, so
/// `z[[j, i]]` is the value at `(xs[i], ys[j])`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub z: Array2<f64>,
}

impl Field {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, z: Array2<f64>) -> PlotResult<Self> {
        let expected = (ys.len(), xs.len());
        if z.dim() != expected {
            return Err(PlotError::shape(
                "scalar field",
                format!("{}x{} grid (rows = y, cols = x)", expected.0, expected.1),
                format!("{}x{} grid", z.nrows(), z.ncols()),
            ));
        }
        Ok(Field { xs, ys, z })
    }

    /// Observed value range, ignoring non-finite samples.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        min_max(self.z.iter().copied())
    }

    pub fn x_extent(&self) -> Extent {
        extent_of(&self.xs)
    }

    pub fn y_extent(&self) -> Extent {
        extent_of(&self.ys)
    }

    /// Boundaries of the cells centred on each x coordinate.
    pub fn x_edges(&self) -> Vec<f64> {
        cell_edges(&self.xs)
    }

    /// Boundaries of the cells centred on each y coordinate.
    pub fn y_edges(&self) -> Vec<f64> {
        cell_edges(&self.ys)
    }
}

fn extent_of(values: &[f64]) -> Extent {
    let mut extent = Extent::empty();
    for &v in values {
        extent.include(v);
    }
    extent
}

/// Midpoints between neighbouring coordinates, with the outer edges mirrored
/// half a step beyond the first and last coordinate.
pub fn cell_edges(coords: &[f64]) -> Vec<f64> {
    match coords.len() {
        0 => Vec::new(),
        1 => vec![coords[0] - 0.5, coords[0] + 0.5],
        n => {
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(coords[0] - (coords[1] - coords[0]) / 2.0);
            for pair in coords.windows(2) {
                edges.push((pair[0] + pair[1]) / 2.0);
            }
            edges.push(coords[n - 1] + (coords[n - 1] - coords[n - 2]) / 2.0);
            edges
        }
    }
}

// =============================================================================
// Layers
// =============================================================================

#[derive(Debug, Clone)]
pub struct LineLayer {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub stroke: Stroke,
    pub markers: Option<Markers>,
}

impl LineLayer {
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.xs.iter().copied().zip(self.ys.iter().copied()).collect()
    }

    /// The points that receive a marker glyph, if markers are enabled.
    pub fn marker_points(&self) -> Vec<(f64, f64)> {
        match &self.markers {
            Some(markers) => markers
                .indices(self.xs.len())
                .into_iter()
                .map(|i| (self.xs[i], self.ys[i]))
                .collect(),
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum PointColors {
    Fixed(RGBColor),
    /// One value per point, colored through the gradient over the values' range.
    Mapped { values: Vec<f64>, gradient: Gradient },
}

#[derive(Debug, Clone)]
pub struct ScatterLayer {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub colors: PointColors,
    pub shape: MarkerShape,
    pub size: f64,
}

impl ScatterLayer {
    /// Continuous scale over the point values, when points are value-colored.
    pub fn value_scale(&self) -> Option<ColorScale> {
        match &self.colors {
            PointColors::Fixed(_) => None,
            PointColors::Mapped { values, gradient } => {
                let (min, max) = min_max(values.iter().copied()).unwrap_or((0.0, 0.0));
                Some(ColorScale::new(*gradient, values.len(), min, max))
            }
        }
    }

    /// Resolved color of every point.
    pub fn point_colors(&self) -> Vec<RGBColor> {
        match (&self.colors, self.value_scale()) {
            (PointColors::Mapped { values, .. }, Some(scale)) => {
                values.iter().map(|&v| scale.at(v)).collect()
            }
            (PointColors::Fixed(color), _) => vec![*color; self.xs.len()],
            (PointColors::Mapped { .. }, None) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContourLayer {
    pub field: Field,
    pub levels: usize,
    /// Lines are colored per level when set, otherwise drawn with `stroke.color`.
    pub gradient: Option<Gradient>,
    pub stroke: Stroke,
}

impl ContourLayer {
    /// Discrete per-level scale bound to the field's current range.
    pub fn color_scale(&self) -> Option<ColorScale> {
        let gradient = self.gradient?;
        let (min, max) = self.field.value_range()?;
        Some(ColorScale::new(gradient, self.levels, min, max))
    }
}

#[derive(Debug, Clone)]
pub struct FilledContourLayer {
    pub field: Field,
    pub levels: usize,
    pub gradient: Gradient,
    /// Overlay contour lines drawn with this stroke.
    pub lines: Option<Stroke>,
}

impl FilledContourLayer {
    pub fn color_scale(&self) -> Option<ColorScale> {
        let (min, max) = self.field.value_range()?;
        Some(ColorScale::new(self.gradient, self.levels, min, max))
    }
}

#[derive(Debug, Clone)]
pub struct RasterLayer {
    pub image: RgbImage,
}

impl RasterLayer {
    /// Build from one grayscale plane or three red/green/blue planes of
    /// 0-255 values. Pixel (row, col) reads `plane[[row, col]]`.
    pub fn from_planes(planes: &[Array2<f64>]) -> PlotResult<Self> {
        if planes.len() != 1 && planes.len() != 3 {
            return Err(PlotError::shape("raster image", "1 or 3 planes", planes.len()));
        }
        let dim = planes[0].dim();
        for plane in &planes[1..] {
            if plane.dim() != dim {
                return Err(PlotError::shape(
                    "raster image",
                    format!("{}x{} plane", dim.0, dim.1),
                    format!("{}x{} plane", plane.nrows(), plane.ncols()),
                ));
            }
        }

        let (rows, cols) = dim;
        let channel = |plane: &Array2<f64>, row: usize, col: usize| -> u8 {
            let v = plane[[row, col]];
            if v.is_nan() {
                0
            } else {
                v.round().clamp(0.0, 255.0) as u8
            }
        };
        let image = RgbImage::from_fn(cols as u32, rows as u32, |x, y| {
            let (row, col) = (y as usize, x as usize);
            match planes {
                [gray] => {
                    let v = channel(gray, row, col);
                    Rgb([v, v, v])
                }
                [r, g, b] => Rgb([channel(r, row, col), channel(g, row, col), channel(b, row, col)]),
                _ => Rgb([0, 0, 0]),
            }
        });
        Ok(RasterLayer { image })
    }

    pub fn rows(&self) -> u32 {
        self.image.height()
    }

    pub fn cols(&self) -> u32 {
        self.image.width()
    }
}

/// One drawable element of a chart.
#[derive(Debug, Clone)]
pub enum Layer {
    Line(LineLayer),
    Scatter(ScatterLayer),
    Contour(ContourLayer),
    FilledContour(FilledContourLayer),
    Raster(RasterLayer),
    /// Reference lines at the axis ticks; always drawn beneath everything else.
    Grid,
}

impl Layer {
    pub fn kind(&self) -> &'static str {
        match self {
            Layer::Line(_) => "line",
            Layer::Scatter(_) => "scatter",
            Layer::Contour(_) => "contour",
            Layer::FilledContour(_) => "filled-contour",
            Layer::Raster(_) => "raster",
            Layer::Grid => "grid",
        }
    }

    /// Lines and scatter series can carry a legend entry.
    pub fn legend_eligible(&self) -> bool {
        matches!(self, Layer::Line(_) | Layer::Scatter(_))
    }

    /// Whether auto-fit pads this layer's range (point data) or uses it exactly.
    pub fn padded(&self) -> bool {
        matches!(self, Layer::Line(_) | Layer::Scatter(_))
    }

    /// Data-space extent along x and y.
    pub fn extent(&self) -> (Extent, Extent) {
        match self {
            Layer::Line(l) => (extent_of(&l.xs), extent_of(&l.ys)),
            Layer::Scatter(s) => (extent_of(&s.xs), extent_of(&s.ys)),
            Layer::Contour(c) => (c.field.x_extent(), c.field.y_extent()),
            Layer::FilledContour(f) => (extent_of(&f.field.x_edges()), extent_of(&f.field.y_edges())),
            Layer::Raster(r) => (
                extent_of(&[0.0, r.cols() as f64]),
                extent_of(&[0.0, r.rows() as f64]),
            ),
            Layer::Grid => (Extent::empty(), Extent::empty()),
        }
    }

    /// Continuous scale a colorbar for this layer would show.
    pub fn value_scale(&self) -> Option<ColorScale> {
        match self {
            Layer::Contour(c) => c.color_scale(),
            Layer::FilledContour(f) => f.color_scale(),
            Layer::Scatter(s) => s.value_scale(),
            _ => None,
        }
    }
}

// =============================================================================
// Chart furniture
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    /// Index into the plot's layer list.
    pub layer: usize,
}

/// A colorbar resolved against its source layer.
#[derive(Debug, Clone, Copy)]
pub struct ColorBar {
    pub scale: ColorScale,
    pub orientation: Orientation,
}
