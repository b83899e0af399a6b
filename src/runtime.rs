// Drawing a Plot onto a plotters drawing area

use anyhow::{Context, Result};
use plotters::chart::SeriesAnno;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::trace;

use crate::colorscale::ColorMap;
use crate::config::RenderConfig;
use crate::contour::{band_cells, contour_lines};
use crate::ir::{
    ContourLayer, Field, FilledContourLayer, Layer, LineLayer, RasterLayer, ScatterLayer, Stroke,
};
use crate::options::Orientation;
use crate::palette::MarkerShape;
use crate::plot::Plot;
use crate::scale::{levels, non_degenerate};

pub type Area<'b> = DrawingArea<BitMapBackend<'b>, Shift>;

type Chart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Length of the line sample in a legend entry, in pixels.
const LEGEND_SAMPLE: i32 = 20;

/// Visible data window of a chart and its pixel density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: (f64, f64),
    pub y: (f64, f64),
    /// Pixels per data unit along x and y.
    pub scale: (f64, f64),
}

impl Viewport {
    /// The visible dash pieces of a polyline.
    pub fn strokes(&self, points: &[(f64, f64)], pattern: &[f64]) -> Vec<Vec<(f64, f64)>> {
        clip_polyline(points, self.x, self.y)
            .iter()
            .flat_map(|run| dash_polyline(run, pattern, self.scale))
            .collect()
    }
}

/// Draw one chart (axes, layers, legend) filling `area`.
///
/// The title band is reserved when the plot has a title or `caption` is
/// set, so charts sharing a row keep their plotting areas level.
pub fn draw_plot(area: &Area<'_>, plot: &Plot, caption: bool, config: &RenderConfig) -> Result<()> {
    let ((x0, x1), (y0, y1)) = plot.data_ranges();
    let font = config.font_family.as_str();

    let (_, height) = area.dim_in_pixel();
    let band = if caption || !plot.title().is_empty() {
        config.caption_height().min(height)
    } else {
        0
    };
    let (title_area, chart_area) = area.split_vertically(band);
    if band > 0 && !plot.title().is_empty() {
        let style = (font, config.title_font_size)
            .into_text_style(&title_area)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let (w, h) = title_area.dim_in_pixel();
        title_area
            .draw_text(plot.title(), &style, (w as i32 / 2, h as i32 / 2))
            .context("Failed to draw title")?;
    }

    let mut chart = ChartBuilder::on(&chart_area)
        .margin(config.chart_margin)
        .x_label_area_size(config.x_label_area)
        .y_label_area_size(config.y_label_area)
        .build_cartesian_2d(x0..x1, y0..y1)
        .context("Failed to build chart")?;

    // Grid lines are part of the mesh, so they sit beneath every layer.
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(plot.x_label())
        .y_desc(plot.y_label())
        .label_style((font, config.tick_font_size))
        .axis_desc_style((font, config.label_font_size));
    if !plot.has_grid() {
        mesh.disable_mesh();
    }
    mesh.draw().context("Failed to draw mesh")?;

    let (px, py) = chart.plotting_area().get_pixel_range();
    let view = Viewport {
        x: (x0, x1),
        y: (y0, y1),
        scale: (
            f64::from(px.end - px.start) / (x1 - x0),
            f64::from(py.end - py.start) / (y1 - y0),
        ),
    };

    for (index, layer) in plot.layers().iter().enumerate() {
        trace!(index, kind = layer.kind(), "drawing layer");
        let label = plot.legend_label(index);
        match layer {
            Layer::Line(line) => draw_line(&mut chart, line, label, &view, config)?,
            Layer::Scatter(scatter) => draw_scatter(&mut chart, scatter, label, config)?,
            Layer::Contour(contour) => draw_contour(&mut chart, contour, &view, config)?,
            Layer::FilledContour(filled) => draw_filled_contour(&mut chart, filled, &view, config)?,
            Layer::Raster(raster) => draw_raster(&mut chart, raster)?,
            Layer::Grid => {}
        }
    }

    if !plot.legend().is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font((font, config.label_font_size))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .context("Failed to draw legend")?;
    }

    Ok(())
}

fn stroke_px(width_pt: f64, config: &RenderConfig) -> u32 {
    config.pt_to_px(width_pt).round().max(1.0) as u32
}

fn radius_px(size_pt: f64, config: &RenderConfig) -> i32 {
    config.pt_to_px(size_pt).round().max(1.0) as i32
}

fn dash_pattern(stroke: &Stroke, config: &RenderConfig) -> Vec<f64> {
    stroke
        .style
        .dashes()
        .iter()
        .map(|&d| config.pt_to_px(d))
        .collect()
}

/// Clip a polyline to the rectangle `x × y`, returning the runs that lie
/// inside it.
pub fn clip_polyline(
    points: &[(f64, f64)],
    x: (f64, f64),
    y: (f64, f64),
) -> Vec<Vec<(f64, f64)>> {
    let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut open = false;
    for pair in points.windows(2) {
        let Some((a, b, exits)) = clip_segment(pair[0], pair[1], x, y) else {
            open = false;
            continue;
        };
        match runs.last_mut() {
            Some(run) if open && run.last() == Some(&a) => run.push(b),
            _ => runs.push(vec![a, b]),
        }
        open = !exits;
    }
    runs
}

/// Liang-Barsky clipping of `p -> q`; the flag is set when the segment
/// leaves the rectangle before reaching `q`.
fn clip_segment(
    p: (f64, f64),
    q: (f64, f64),
    x: (f64, f64),
    y: (f64, f64),
) -> Option<((f64, f64), (f64, f64), bool)> {
    let (dx, dy) = (q.0 - p.0, q.1 - p.1);
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    for (edge, dist) in [(-dx, p.0 - x.0), (dx, x.1 - p.0), (-dy, p.1 - y.0), (dy, y.1 - p.1)] {
        if !(edge.is_finite() && dist.is_finite()) {
            return None;
        }
        if edge == 0.0 {
            if dist < 0.0 {
                return None;
            }
            continue;
        }
        let t = dist / edge;
        if edge < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }
    let at = |t: f64| (p.0 + t * dx, p.1 + t * dy);
    let a = if t0 == 0.0 { p } else { at(t0) };
    let b = if t1 == 1.0 { q } else { at(t1) };
    Some((a, b, t1 < 1.0))
}

/// Split a polyline into its visible dash pieces.
///
/// `pattern` alternates on and off lengths in pixels, starting with "on" and
/// repeating; `scale` is pixels per data unit along x and y. An empty or
/// all-zero pattern returns the polyline whole.
pub fn dash_polyline(
    points: &[(f64, f64)],
    pattern: &[f64],
    scale: (f64, f64),
) -> Vec<Vec<(f64, f64)>> {
    if points.len() < 2 {
        return Vec::new();
    }
    if pattern.iter().all(|&d| d <= 0.0) {
        return vec![points.to_vec()];
    }

    let mut pieces = Vec::new();
    let mut current = vec![points[0]];
    let mut index = 0;
    let mut on = true;
    let mut remaining = pattern[0].max(0.0);

    for pair in points.windows(2) {
        let (p, q) = (pair[0], pair[1]);
        let length = ((q.0 - p.0) * scale.0).hypot((q.1 - p.1) * scale.1);
        if !length.is_finite() {
            continue;
        }
        let mut travelled = 0.0;
        while length - travelled > remaining {
            travelled += remaining;
            let t = travelled / length;
            let cut = (p.0 + t * (q.0 - p.0), p.1 + t * (q.1 - p.1));
            if on {
                current.push(cut);
                pieces.push(std::mem::take(&mut current));
            } else {
                current = vec![cut];
            }
            on = !on;
            index = (index + 1) % pattern.len();
            remaining = pattern[index].max(0.0);
        }
        remaining -= length - travelled;
        if on {
            current.push(q);
        }
    }
    if on && current.len() >= 2 {
        pieces.push(current);
    }
    pieces
}

fn draw_line<'a, 'b: 'a>(
    chart: &mut Chart<'a, 'b>,
    line: &LineLayer,
    label: Option<&str>,
    view: &Viewport,
    config: &RenderConfig,
) -> Result<()> {
    let style = line.stroke.color.stroke_width(stroke_px(line.stroke.width, config));
    let pieces = view.strokes(&line.points(), &dash_pattern(&line.stroke, config));
    let series = chart
        .draw_series(pieces.into_iter().map(|piece| PathElement::new(piece, style)))
        .context("Failed to draw line series")?;

    let glyph = line
        .markers
        .map(|m| (m.shape, radius_px(m.size, config)));
    if let Some(label) = label {
        add_legend_entry(series, label, Some(style), glyph, line.stroke.color);
    }

    if let Some((shape, radius)) = glyph {
        let color = line.stroke.color;
        let points = line.marker_points().into_iter().map(|p| (p, color)).collect();
        draw_glyphs(chart, shape, radius, points, style.stroke_width)?;
    }
    Ok(())
}

fn draw_scatter<'a, 'b: 'a>(
    chart: &mut Chart<'a, 'b>,
    scatter: &ScatterLayer,
    label: Option<&str>,
    config: &RenderConfig,
) -> Result<()> {
    let radius = radius_px(scatter.size, config);
    let colors = scatter.point_colors();
    let swatch = colors.first().copied().unwrap_or(BLACK);
    let points = scatter
        .xs
        .iter()
        .zip(&scatter.ys)
        .zip(colors)
        .map(|((&x, &y), color)| ((x, y), color))
        .collect();

    let series = draw_glyphs(chart, scatter.shape, radius, points, 1)?;
    if let Some(label) = label {
        add_legend_entry(series, label, None, Some((scatter.shape, radius)), swatch);
    }
    Ok(())
}

/// Draw one glyph per point as a single series.
fn draw_glyphs<'c, 'a, 'b>(
    chart: &'c mut Chart<'a, 'b>,
    shape: MarkerShape,
    radius: i32,
    points: Vec<((f64, f64), RGBColor)>,
    stroke: u32,
) -> Result<&'c mut SeriesAnno<'a, BitMapBackend<'b>>> {
    let r = radius;
    let points = points.into_iter();
    let series = match shape {
        MarkerShape::Circle => {
            chart.draw_series(points.map(|(p, c)| Circle::new(p, r, c.filled())))
        }
        MarkerShape::Square => chart.draw_series(
            points.map(|(p, c)| EmptyElement::at(p) + Rectangle::new([(-r, -r), (r, r)], c.filled())),
        ),
        MarkerShape::Triangle => {
            chart.draw_series(points.map(|(p, c)| TriangleMarker::new(p, r, c.filled())))
        }
        MarkerShape::Plus => chart.draw_series(points.map(|(p, c)| {
            EmptyElement::at(p)
                + PathElement::new(vec![(-r, 0), (r, 0)], c.stroke_width(stroke))
                + PathElement::new(vec![(0, -r), (0, r)], c.stroke_width(stroke))
        })),
        MarkerShape::Cross => {
            chart.draw_series(points.map(|(p, c)| Cross::new(p, r, c.stroke_width(stroke))))
        }
    };
    series.context("Failed to draw markers")
}

fn legend_sample(line: Option<ShapeStyle>, color: RGBColor) -> PathElement<(i32, i32)> {
    match line {
        Some(style) => PathElement::new(vec![(0, 0), (LEGEND_SAMPLE, 0)], style),
        None => PathElement::new(Vec::new(), color.stroke_width(1)),
    }
}

/// Label a series; its thumbnail is an optional line sample with an
/// optional glyph at its centre.
fn add_legend_entry<'a, 'b: 'a>(
    series: &mut SeriesAnno<'a, BitMapBackend<'b>>,
    label: &str,
    line: Option<ShapeStyle>,
    glyph: Option<(MarkerShape, i32)>,
    color: RGBColor,
) {
    let c = LEGEND_SAMPLE / 2;
    let series = series.label(label);
    match glyph {
        None => series.legend(move |at| EmptyElement::at(at) + legend_sample(line, color)),
        Some((MarkerShape::Circle, r)) => series.legend(move |at| {
            EmptyElement::at(at) + legend_sample(line, color) + Circle::new((c, 0), r, color.filled())
        }),
        Some((MarkerShape::Square, r)) => series.legend(move |at| {
            EmptyElement::at(at)
                + legend_sample(line, color)
                + Rectangle::new([(c - r, -r), (c + r, r)], color.filled())
        }),
        Some((MarkerShape::Triangle, r)) => series.legend(move |at| {
            EmptyElement::at(at)
                + legend_sample(line, color)
                + TriangleMarker::new((c, 0), r, color.filled())
        }),
        Some((MarkerShape::Plus, r)) => series.legend(move |at| {
            EmptyElement::at(at)
                + legend_sample(line, color)
                + PathElement::new(
                    vec![(c - r, 0), (c + r, 0), (c, 0), (c, -r), (c, r)],
                    color.stroke_width(1),
                )
        }),
        Some((MarkerShape::Cross, r)) => series.legend(move |at| {
            EmptyElement::at(at) + legend_sample(line, color) + Cross::new((c, 0), r, color.stroke_width(1))
        }),
    };
}

/// Iso-lines of `field` at every level, each level in its own color.
fn draw_iso_lines(
    chart: &mut Chart<'_, '_>,
    field: &Field,
    thresholds: &[f64],
    colors: &[RGBColor],
    stroke: &Stroke,
    view: &Viewport,
    config: &RenderConfig,
) -> Result<()> {
    let width = stroke_px(stroke.width, config);
    let pattern = dash_pattern(stroke, config);

    let mut paths = Vec::new();
    for (&level, &color) in thresholds.iter().zip(colors) {
        for line in contour_lines(field, level) {
            for piece in view.strokes(&line, &pattern) {
                paths.push(PathElement::new(piece, color.stroke_width(width)));
            }
        }
    }
    chart
        .draw_series(paths)
        .context("Failed to draw contour lines")?;
    Ok(())
}

fn draw_contour(
    chart: &mut Chart<'_, '_>,
    layer: &ContourLayer,
    view: &Viewport,
    config: &RenderConfig,
) -> Result<()> {
    let Some((min, max)) = layer.field.value_range() else {
        return Ok(());
    };
    let thresholds = levels(min, max, layer.levels);
    let colors = match layer.color_scale() {
        Some(color_scale) => color_scale.discrete_colors(layer.levels),
        None => vec![layer.stroke.color; layer.levels],
    };
    draw_iso_lines(chart, &layer.field, &thresholds, &colors, &layer.stroke, view, config)
}

fn draw_filled_contour(
    chart: &mut Chart<'_, '_>,
    layer: &FilledContourLayer,
    view: &Viewport,
    config: &RenderConfig,
) -> Result<()> {
    let Some(color_scale) = layer.color_scale() else {
        return Ok(());
    };
    let colors = color_scale.discrete_colors(layer.levels);
    chart
        .draw_series(band_cells(&layer.field, layer.levels).into_iter().map(|cell| {
            Rectangle::new([(cell.x0, cell.y0), (cell.x1, cell.y1)], colors[cell.band].filled())
        }))
        .context("Failed to draw filled contour")?;

    if let Some(stroke) = &layer.lines {
        let thresholds = levels(color_scale.min(), color_scale.max(), layer.levels);
        let colors = vec![stroke.color; layer.levels];
        draw_iso_lines(chart, &layer.field, &thresholds, &colors, stroke, view, config)?;
    }
    Ok(())
}

fn draw_raster(chart: &mut Chart<'_, '_>, raster: &RasterLayer) -> Result<()> {
    let rows = f64::from(raster.rows());
    chart
        .draw_series(raster.image.enumerate_pixels().map(|(col, row, pixel)| {
            let left = f64::from(col);
            let top = rows - f64::from(row);
            Rectangle::new(
                [(left, top), (left + 1.0, top - 1.0)],
                RGBColor(pixel[0], pixel[1], pixel[2]).filled(),
            )
        }))
        .context("Failed to draw raster image")?;
    Ok(())
}

/// Draw a colorbar for `scale` filling `area`.
///
/// The bar paints the continuous view of the scale one pixel step at a
/// time; tick labels run along its long side.
pub fn draw_colorbar<M: ColorMap>(
    area: &Area<'_>,
    scale: &M,
    orientation: Orientation,
    config: &RenderConfig,
) -> Result<()> {
    let (min, max) = non_degenerate(scale.min(), scale.max());
    let (width, height) = area.dim_in_pixel();
    let font = config.font_family.as_str();
    let mut builder = ChartBuilder::on(area);

    match orientation {
        Orientation::Vertical => {
            builder.set_label_area_size(LabelAreaPosition::Right, width * 3 / 5);
            let mut chart = builder
                .build_cartesian_2d(0.0..1.0, min..max)
                .context("Failed to build colorbar")?;
            chart
                .configure_mesh()
                .disable_mesh()
                .disable_x_axis()
                .label_style((font, config.tick_font_size))
                .draw()
                .context("Failed to draw colorbar axis")?;

            let steps = height.max(1);
            let delta = (max - min) / f64::from(steps);
            chart
                .draw_series((0..steps).map(|step| {
                    let v0 = min + delta * f64::from(step);
                    let v1 = v0 + delta;
                    Rectangle::new([(0.0, v0), (1.0, v1)], scale.at((v0 + v1) / 2.0).filled())
                }))
                .context("Failed to paint colorbar")?;
        }
        Orientation::Horizontal => {
            builder.set_label_area_size(LabelAreaPosition::Bottom, height * 9 / 20);
            let mut chart = builder
                .build_cartesian_2d(min..max, 0.0..1.0)
                .context("Failed to build colorbar")?;
            chart
                .configure_mesh()
                .disable_mesh()
                .disable_y_axis()
                .label_style((font, config.tick_font_size))
                .draw()
                .context("Failed to draw colorbar axis")?;

            let steps = width.max(1);
            let delta = (max - min) / f64::from(steps);
            chart
                .draw_series((0..steps).map(|step| {
                    let v0 = min + delta * f64::from(step);
                    let v1 = v0 + delta;
                    Rectangle::new([(v0, 0.0), (v1, 1.0)], scale.at((v0 + v1) / 2.0).filled())
                }))
                .context("Failed to paint colorbar")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{LineOptions, ScatterOptions};
    use crate::palette::LineStyle;
    use ndarray::Array2;

    /// Draw `plot` onto a white `width × height` bitmap.
    fn draw_to_buffer(plot: &Plot, width: u32, height: u32) -> Vec<u8> {
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).unwrap();
            draw_plot(&root, plot, false, &RenderConfig::default()).unwrap();
            root.present().unwrap();
        }
        buffer
    }

    #[test]
    fn test_dash_polyline_solid() {
        let points = vec![(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)];
        assert_eq!(dash_polyline(&points, &[], (10.0, 10.0)), vec![points.clone()]);
        assert!(dash_polyline(&points[..1], &[5.0], (1.0, 1.0)).is_empty());
    }

    #[test]
    fn test_dash_polyline_even_dashes() {
        let points = vec![(0.0, 0.0), (20.0, 0.0)];
        let pieces = dash_polyline(&points, &[5.0], (1.0, 1.0));
        assert_eq!(
            pieces,
            vec![vec![(0.0, 0.0), (5.0, 0.0)], vec![(10.0, 0.0), (15.0, 0.0)]]
        );
    }

    #[test]
    fn test_dash_polyline_uses_pixel_scale() {
        let points = vec![(0.0, 0.0), (20.0, 0.0)];
        let pieces = dash_polyline(&points, &[5.0], (2.0, 1.0));
        assert_eq!(pieces.len(), 4);
        assert_eq!(pieces[1], vec![(5.0, 0.0), (7.5, 0.0)]);
    }

    #[test]
    fn test_dash_polyline_spans_vertices() {
        let points = vec![(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)];
        let pieces = dash_polyline(&points, &[5.0, 1.0], (1.0, 1.0));
        assert_eq!(pieces[0], vec![(0.0, 0.0), (3.0, 0.0), (3.0, 2.0)]);
        assert_eq!(pieces[1], vec![(3.0, 3.0), (3.0, 4.0)]);
    }

    #[test]
    fn test_clip_polyline() {
        let points = vec![(-1.0, 0.5), (0.5, 0.5), (0.5, 2.0), (0.8, 0.5)];
        let runs = clip_polyline(&points, (0.0, 1.0), (0.0, 1.0));
        assert_eq!(
            runs,
            vec![
                vec![(0.0, 0.5), (0.5, 0.5), (0.5, 1.0)],
                vec![(0.7, 1.0), (0.8, 0.5)],
            ]
        );
        assert!(clip_polyline(&[(2.0, 2.0), (3.0, 3.0)], (0.0, 1.0), (0.0, 1.0)).is_empty());
        assert!(clip_polyline(&[(0.5, f64::NAN), (0.5, 0.5)], (0.0, 1.0), (0.0, 1.0)).is_empty());
    }

    #[test]
    fn test_dashing_far_outside_limits_stays_bounded() {
        let view = Viewport {
            x: (0.0, 1.0),
            y: (0.0, 1.0),
            scale: (400.0, 300.0),
        };
        let pieces = view.strokes(&[(0.0, 0.5), (1e12, 0.5)], &[1.0, 2.0]);
        // 400 visible pixels at a 3 px period
        assert!(pieces.len() <= 134);
        assert!(pieces.iter().flatten().all(|&(x, _)| (0.0..=1.0).contains(&x)));
    }

    #[test]
    fn test_draw_dotted_line_beyond_limits() {
        let mut plot = Plot::new();
        plot.set_x_limit(0.0, 1.0);
        plot.set_y_limit(0.0, 1.0);
        plot.add_line(
            &[0.0, 1e10],
            &[0.5, 0.5],
            LineOptions::new().with_style(LineStyle::Dotted),
        )
        .unwrap();
        let buffer = draw_to_buffer(&plot, 300, 200);
        assert!(buffer.iter().any(|&b| b != 255));
    }

    #[test]
    fn test_draw_legended_scatter() {
        let mut plot = Plot::new();
        plot.add_scatter(
            &[0.0, 1.0, 2.0],
            &[1.0, 0.0, 1.0],
            &[],
            ScatterOptions::default(),
        )
        .unwrap();
        plot.add_line(
            &[0.0, 2.0],
            &[0.0, 1.0],
            LineOptions::new().with_marker_symbol("s"),
        )
        .unwrap();
        plot.add_legend(&["points", "trend"]).unwrap();
        let buffer = draw_to_buffer(&plot, 240, 180);
        assert!(buffer.iter().any(|&b| b != 255));
    }

    #[test]
    fn test_grid_stays_beneath_layers_added_before_it() {
        let red = Array2::from_elem((4, 4), 255.0);
        let zero = Array2::from_elem((4, 4), 0.0);
        let mut plot = Plot::new();
        plot.add_raster_image(&[red, zero.clone(), zero]).unwrap();
        plot.add_grid();

        let (width, height) = (240u32, 180u32);
        let buffer = draw_to_buffer(&plot, width, height);
        let is_red = |x: u32, y: u32| {
            let i = ((y * width + x) * 3) as usize;
            buffer[i..i + 3] == [255, 0, 0]
        };
        let red_pixels: Vec<(u32, u32)> = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter(|&(x, y)| is_red(x, y))
            .collect();
        assert!(!red_pixels.is_empty());

        let x0 = red_pixels.iter().map(|p| p.0).min().unwrap();
        let x1 = red_pixels.iter().map(|p| p.0).max().unwrap();
        let y0 = red_pixels.iter().map(|p| p.1).min().unwrap();
        let y1 = red_pixels.iter().map(|p| p.1).max().unwrap();
        for y in y0..=y1 {
            for x in x0..=x1 {
                assert!(is_red(x, y), "grid pixel over the image at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_draw_plot_on_bitmap() {
        let (width, height) = (200u32, 150u32);
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        let mut plot = Plot::new();
        plot.set_title("line");
        plot.add_grid();
        plot.add_line(
            &[0.0, 1.0, 2.0],
            &[0.0, 1.0, 0.0],
            LineOptions::new().with_style(LineStyle::DashDot).with_marker_symbol("x"),
        )
        .unwrap();
        plot.add_legend(&["zigzag"]).unwrap();

        let config = RenderConfig::default();
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).unwrap();
            draw_plot(&root, &plot, false, &config).unwrap();
            root.present().unwrap();
        }
        assert!(buffer.iter().any(|&b| b != 255));
    }
}
