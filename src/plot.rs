// The chart builder: layers and chart furniture accumulated before rendering

use std::path::Path;

use ndarray::Array2;
use plotters::style::RGBColor;
use tracing::{debug, warn};

use crate::colorscale::Gradient;
use crate::error::{PlotError, PlotResult};
use crate::graph;
use crate::ir::{
    ColorBar, ContourLayer, Field, FilledContourLayer, Layer, LegendEntry, LineLayer, Markers,
    PointColors, RasterLayer, ScatterLayer, Stroke,
};
use crate::options::{ContourOptions, LineOptions, Orientation, ScatterOptions};
use crate::palette::ColorCycle;
use crate::scale::{non_degenerate, pad_range, Extent};

const NEUTRAL: RGBColor = RGBColor(0, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy)]
struct ColorBarRequest {
    layer: usize,
    orientation: Orientation,
}

/// One logical chart.
#[derive(Debug, Clone, Default)]
pub struct Plot {
    title: String,
    x_label: String,
    y_label: String,
    x_limit: Option<(f64, f64)>,
    y_limit: Option<(f64, f64)>,
    layers: Vec<Layer>,
    legend: Vec<LegendEntry>,
    colors: ColorCycle,
    colorbar: Option<ColorBarRequest>,
}

impl Plot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_x_label(&mut self, label: impl Into<String>) {
        self.x_label = label.into();
    }

    pub fn set_y_label(&mut self, label: impl Into<String>) {
        self.y_label = label.into();
    }

    /// Fix one axis to `[min, max]`.
    ///
    /// Limits with `min >= max` (or non-finite bounds) are ignored and the
    /// axis keeps its previous setting.
    pub fn set_axis_limit(&mut self, axis: Axis, min: f64, max: f64) {
        if !(min.is_finite() && max.is_finite() && min < max) {
            warn!(?axis, min, max, "ignoring invalid axis limit");
            return;
        }
        match axis {
            Axis::X => self.x_limit = Some((min, max)),
            Axis::Y => self.y_limit = Some((min, max)),
        }
    }

    pub fn set_x_limit(&mut self, min: f64, max: f64) {
        self.set_axis_limit(Axis::X, min, max);
    }

    pub fn set_y_limit(&mut self, min: f64, max: f64) {
        self.set_axis_limit(Axis::Y, min, max);
    }

    /// Add a polyline through `(xs[i], ys[i])`.
    pub fn add_line(&mut self, xs: &[f64], ys: &[f64], options: LineOptions) -> PlotResult<()> {
        check_lengths("line", xs, ys)?;

        let color = match options.color {
            Some(color) => {
                self.colors.mark_used(color);
                color
            }
            None => self.colors.next_color(),
        };
        let markers = options.marker.map(|shape| Markers {
            shape,
            size: options.marker_size,
            spacing: options.marker_spacing.max(1),
        });

        debug!(points = xs.len(), ?color, "adding line layer");
        self.layers.push(Layer::Line(LineLayer {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            stroke: Stroke {
                color,
                width: options.width,
                style: options.style,
            },
            markers,
        }));
        Ok(())
    }

    /// Add iso-lines of `z` over the grid `xs` × `ys`.
    ///
    /// `z` must have `ys.len()` rows and `xs.len()` columns. Without a
    /// gradient the lines are black and no colorbar can be attached.
    pub fn add_contour_lines(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        z: &Array2<f64>,
        options: ContourOptions,
    ) -> PlotResult<()> {
        let field = Field::new(xs.to_vec(), ys.to_vec(), z.clone())?;
        let levels = options.levels.max(1);

        debug!(rows = ys.len(), cols = xs.len(), levels, "adding contour layer");
        self.layers.push(Layer::Contour(ContourLayer {
            field,
            levels,
            gradient: options.gradient,
            stroke: Stroke {
                color: NEUTRAL,
                width: options.line_width,
                style: options.line_style,
            },
        }));

        if let Some(orientation) = options.colorbar {
            if options.gradient.is_some() {
                self.request_colorbar(orientation);
            } else {
                warn!("colorbar requested for contour lines without a gradient; ignored");
            }
        }
        Ok(())
    }

    /// Add filled color bands of `z`, optionally overlaid with black
    /// contour lines at the same levels.
    pub fn add_filled_contour(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        z: &Array2<f64>,
        options: ContourOptions,
    ) -> PlotResult<()> {
        let field = Field::new(xs.to_vec(), ys.to_vec(), z.clone())?;
        let levels = options.levels.max(1);
        let lines = options.show_lines.then(|| Stroke {
            color: NEUTRAL,
            width: options.line_width,
            style: options.line_style,
        });

        debug!(rows = ys.len(), cols = xs.len(), levels, "adding filled contour layer");
        self.layers.push(Layer::FilledContour(FilledContourLayer {
            field,
            levels,
            gradient: options.gradient.unwrap_or_else(Gradient::viridis),
            lines,
        }));

        if let Some(orientation) = options.colorbar {
            self.request_colorbar(orientation);
        }
        Ok(())
    }

    /// Add scatter points. An empty `zs` draws every point in
    /// `options.color`; otherwise `zs` must match `xs` in length and colors
    /// each point through `options.gradient`.
    pub fn add_scatter(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        zs: &[f64],
        options: ScatterOptions,
    ) -> PlotResult<()> {
        check_lengths("scatter", xs, ys)?;
        if !zs.is_empty() && zs.len() != xs.len() {
            return Err(PlotError::shape(
                "scatter values",
                format!("0 or {} values", xs.len()),
                format!("{} values", zs.len()),
            ));
        }

        let colors = if zs.is_empty() {
            PointColors::Fixed(options.color)
        } else {
            PointColors::Mapped {
                values: zs.to_vec(),
                gradient: options.gradient,
            }
        };

        debug!(points = xs.len(), mapped = !zs.is_empty(), "adding scatter layer");
        self.layers.push(Layer::Scatter(ScatterLayer {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            colors,
            shape: options.marker,
            size: options.marker_size,
        }));

        if let Some(orientation) = options.colorbar {
            if zs.is_empty() {
                warn!("colorbar requested for scatter without values; ignored");
            } else {
                self.request_colorbar(orientation);
            }
        }
        Ok(())
    }

    /// Add an image from one grayscale plane or red, green and blue planes.
    pub fn add_raster_image(&mut self, planes: &[Array2<f64>]) -> PlotResult<()> {
        let raster = RasterLayer::from_planes(planes)?;
        debug!(rows = raster.rows(), cols = raster.cols(), "adding raster layer");
        self.layers.push(Layer::Raster(raster));
        Ok(())
    }

    /// Show reference lines at the axis ticks, beneath all other layers.
    pub fn add_grid(&mut self) {
        debug!("adding grid layer");
        self.layers.push(Layer::Grid);
    }

    /// Label the line and scatter layers added so far, in insertion order.
    ///
    /// Replaces any earlier legend. Fewer labels than layers leaves the rest
    /// unlabelled; more labels than layers is an error.
    pub fn add_legend(&mut self, labels: &[&str]) -> PlotResult<()> {
        let eligible: Vec<usize> = self
            .layers
            .iter()
            .enumerate()
            .filter(|(_, layer)| layer.legend_eligible())
            .map(|(i, _)| i)
            .collect();
        if labels.len() > eligible.len() {
            return Err(PlotError::LegendOverflow {
                labels: labels.len(),
                eligible: eligible.len(),
            });
        }

        self.legend = labels
            .iter()
            .zip(eligible)
            .map(|(label, layer)| LegendEntry {
                label: label.to_string(),
                layer,
            })
            .collect();
        Ok(())
    }

    fn request_colorbar(&mut self, orientation: Orientation) {
        let layer = self.layers.len() - 1;
        debug!(layer, ?orientation, "attaching colorbar");
        self.colorbar = Some(ColorBarRequest { layer, orientation });
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn x_limit(&self) -> Option<(f64, f64)> {
        self.x_limit
    }

    pub fn y_limit(&self) -> Option<(f64, f64)> {
        self.y_limit
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    pub fn legend_label(&self, layer: usize) -> Option<&str> {
        self.legend
            .iter()
            .find(|entry| entry.layer == layer)
            .map(|entry| entry.label.as_str())
    }

    pub fn has_grid(&self) -> bool {
        self.layers.iter().any(|layer| matches!(layer, Layer::Grid))
    }

    /// The attached colorbar, bound to its layer's current value range.
    pub fn colorbar(&self) -> Option<ColorBar> {
        let request = self.colorbar?;
        let scale = self.layers.get(request.layer)?.value_scale()?;
        Some(ColorBar {
            scale,
            orientation: request.orientation,
        })
    }

    /// Axis ranges used for drawing: explicit limits where set, otherwise
    /// the union of layer extents. Point data is padded by 5%, fields and
    /// images are fitted exactly; an empty plot spans `0..1`.
    pub fn data_ranges(&self) -> ((f64, f64), (f64, f64)) {
        let mut points = (Extent::empty(), Extent::empty());
        let mut exact = (Extent::empty(), Extent::empty());
        for layer in &self.layers {
            let (x, y) = layer.extent();
            let target = if layer.padded() { &mut points } else { &mut exact };
            target.0.merge(&x);
            target.1.merge(&y);
        }

        let x = self.x_limit.unwrap_or_else(|| fit_axis(&points.0, &exact.0));
        let y = self.y_limit.unwrap_or_else(|| fit_axis(&points.1, &exact.1));
        (x, y)
    }

    /// Render at the given physical size and write the image to `path`.
    pub fn save(&self, path: impl AsRef<Path>, width_cm: f64, height_cm: f64) -> PlotResult<()> {
        graph::render(self, width_cm, height_cm)?.save(path)
    }
}

fn fit_axis(points: &Extent, exact: &Extent) -> (f64, f64) {
    let mut extent = *exact;
    if let Some((min, max)) = points.bounds() {
        let (min, max) = pad_range(min, max);
        extent.include(min);
        extent.include(max);
    }
    match extent.bounds() {
        Some((min, max)) => non_degenerate(min, max),
        None => (0.0, 1.0),
    }
}

fn check_lengths(context: &str, xs: &[f64], ys: &[f64]) -> PlotResult<()> {
    if xs.len() != ys.len() {
        return Err(PlotError::shape(
            context,
            format!("{} y values", xs.len()),
            format!("{} y values", ys.len()),
        ));
    }
    Ok(())
}
