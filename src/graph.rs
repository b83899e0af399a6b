use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use image::ImageEncoder;
use plotters::prelude::*;
use tracing::debug;

use crate::config::{RenderConfig, COLORBAR_SPACING_CM};
use crate::error::{PlotError, PlotResult};
use crate::options::Orientation;
use crate::plot::Plot;
use crate::runtime::{self, Area};

/// A rendered RGB8 image.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// A surface filled with `background`.
    pub fn new(width: u32, height: u32, background: RGBColor) -> Self {
        let pixels = (0..width as usize * height as usize)
            .flat_map(|_| [background.0, background.1, background.2])
            .collect();
        Surface {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw pixel data, three bytes per pixel, row-major from the top-left.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }

    /// Run drawing commands against the whole surface.
    pub fn draw<F>(&mut self, draw: F) -> PlotResult<()>
    where
        F: FnOnce(&Area<'_>) -> anyhow::Result<()>,
    {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }
        let root = BitMapBackend::with_buffer(&mut self.pixels, (self.width, self.height))
            .into_drawing_area();
        draw(&root)?;
        root.present().context("Failed to present drawing")?;
        Ok(())
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> PlotResult<Vec<u8>> {
        let mut png_bytes = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder.write_image(
            &self.pixels,
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )?;
        Ok(png_bytes)
    }

    /// Write the image to `path`; the format follows the file extension.
    ///
    /// The surface is left untouched on failure, so a save can be retried
    /// with another destination.
    pub fn save(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        let path = path.as_ref();
        let format = image::ImageFormat::from_path(path)?;
        let io_error = |source| PlotError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        image::write_buffer_with_format(
            &mut writer,
            &self.pixels,
            self.width,
            self.height,
            image::ColorType::Rgb8,
            format,
        )?;
        writer.flush().map_err(io_error)?;
        debug!(path = %path.display(), ?format, "saved surface");
        Ok(())
    }
}

/// A pixel rectangle within a surface; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region {
            x,
            y,
            width,
            height,
        }
    }

    /// Region spanning `[x0, x1) × [y0, y1)`, rounded to whole pixels.
    pub fn from_bounds(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let (x0, y0) = (x0.round().max(0.0), y0.round().max(0.0));
        let (x1, y1) = (x1.round().max(x0), y1.round().max(y0));
        Region::new(x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn intersects(&self, other: &Region) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// The part of `area` covered by this region.
    pub fn within<'b>(&self, area: &Area<'b>) -> Area<'b> {
        area.clone().shrink(
            (self.x as i32, self.y as i32),
            (self.width as i32, self.height as i32),
        )
    }
}

/// Space a panel sets aside whether or not it uses it, so that panels
/// sharing a row or column keep their plotting areas aligned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reserve {
    /// Title band above the chart.
    pub caption: bool,
    /// Colorbar strip on the right.
    pub vertical_bar: bool,
    /// Colorbar strip along the bottom.
    pub horizontal_bar: bool,
}

/// Where the main chart and its optional colorbar sit inside one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub main: Region,
    pub colorbar: Option<Region>,
}

/// Split a `width × height` pixel panel into the main chart and a colorbar
/// strip.
///
/// With a vertical colorbar the main chart gives up `1.35 s` of width on
/// the right, with a horizontal one `s` of height at the bottom, where `s`
/// is [`COLORBAR_SPACING_CM`]. The bar is inset within its strip. A strip
/// named in `reserve` is set aside even when the panel has no colorbar.
pub fn panel_layout(
    width: u32,
    height: u32,
    colorbar: Option<Orientation>,
    reserve: Reserve,
    dpi: f64,
) -> PanelLayout {
    let cm = dpi / 2.54;
    let s = COLORBAR_SPACING_CM * cm;
    let (w, h) = (f64::from(width), f64::from(height));

    let vertical = reserve.vertical_bar || colorbar == Some(Orientation::Vertical);
    let horizontal = reserve.horizontal_bar || colorbar == Some(Orientation::Horizontal);
    let main_w = if vertical { (w - 1.35 * s).max(0.0) } else { w };
    let main_h = if horizontal { (h - s).max(0.0) } else { h };

    let colorbar = colorbar.map(|orientation| match orientation {
        Orientation::Vertical => Region::from_bounds(
            main_w + 0.3 * s,
            0.07 * h,
            (main_w + 1.3 * s).min(w),
            h - cm,
        ),
        Orientation::Horizontal => {
            Region::from_bounds(cm, (h - 1.2 * cm).max(main_h), 0.99 * w, h)
        }
    });
    PanelLayout {
        main: Region::from_bounds(0.0, 0.0, main_w, main_h),
        colorbar,
    }
}

/// Draw `plot` and its colorbar, if any, filling `area`.
pub fn compose(
    area: &Area<'_>,
    plot: &Plot,
    reserve: Reserve,
    config: &RenderConfig,
) -> anyhow::Result<()> {
    let (width, height) = area.dim_in_pixel();
    let colorbar = plot.colorbar();
    let orientation = colorbar.as_ref().map(|c| c.orientation);
    let layout = panel_layout(width, height, orientation, reserve, config.dpi);

    if !layout.main.is_empty() {
        runtime::draw_plot(&layout.main.within(area), plot, reserve.caption, config)?;
    }
    if let (Some(bar), Some(region)) = (colorbar, layout.colorbar) {
        if !region.is_empty() {
            runtime::draw_colorbar(&region.within(area), &bar.scale, bar.orientation, config)?;
        }
    }
    Ok(())
}

/// Render one plot at `width_cm × height_cm`.
pub fn render(plot: &Plot, width_cm: f64, height_cm: f64) -> PlotResult<Surface> {
    render_with_config(plot, width_cm, height_cm, &RenderConfig::default())
}

pub fn render_with_config(
    plot: &Plot,
    width_cm: f64,
    height_cm: f64,
    config: &RenderConfig,
) -> PlotResult<Surface> {
    let width = config.cm_to_px(width_cm);
    let height = config.cm_to_px(height_cm);
    debug!(width, height, layers = plot.layers().len(), "rendering plot");

    let mut surface = Surface::new(width, height, config.background);
    surface.draw(|root| compose(root, plot, Reserve::default(), config))?;
    debug!(width, height, "plot rendered");
    Ok(surface)
}
