// Multi-panel layouts rendered side by side onto one surface

use std::path::Path;

use tracing::debug;

use crate::config::{RenderConfig, TILE_PADDING_CM};
use crate::error::{PlotError, PlotResult};
use crate::graph::{compose, Region, Reserve, Surface};
use crate::options::Orientation;
use crate::plot::Plot;

#[derive(Debug, Clone)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Plot>>,
}

impl TileGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        TileGrid {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Gap between neighbouring tiles, in centimetres.
    pub fn padding_cm(&self) -> f64 {
        TILE_PADDING_CM
    }

    fn index(&self, row: usize, col: usize) -> PlotResult<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(PlotError::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    /// The plot at `(row, col)`, created empty on first access.
    pub fn cell(&mut self, row: usize, col: usize) -> PlotResult<&mut Plot> {
        let index = self.index(row, col)?;
        Ok(self.cells[index].get_or_insert_with(|| {
            debug!(row, col, "creating tile");
            Plot::new()
        }))
    }

    /// The plot at `(row, col)` if one has been created.
    pub fn get(&self, row: usize, col: usize) -> PlotResult<Option<&Plot>> {
        let index = self.index(row, col)?;
        Ok(self.cells[index].as_ref())
    }

    /// Pixel regions of every cell, row-major from the top-left.
    pub fn tile_regions(&self, width: u32, height: u32, padding: f64) -> Vec<Region> {
        let span = |total: u32, count: usize| {
            if count == 0 {
                return 0.0;
            }
            let gaps = padding * (count as f64 - 1.0);
            ((f64::from(total) - gaps) / count as f64).max(0.0)
        };
        let cell_w = span(width, self.cols);
        let cell_h = span(height, self.rows);

        let mut regions = Vec::with_capacity(self.rows * self.cols);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let x0 = col as f64 * (cell_w + padding);
                let y0 = row as f64 * (cell_h + padding);
                regions.push(Region::from_bounds(x0, y0, x0 + cell_w, y0 + cell_h));
            }
        }
        regions
    }

    /// Space each cell sets aside so that axes line up: a title anywhere
    /// in a row reserves the title band across that row, a vertical
    /// colorbar reserves its strip down the column and a horizontal one
    /// along the row.
    pub fn reserves(&self) -> Vec<Reserve> {
        let mut caption = vec![false; self.rows];
        let mut horizontal = vec![false; self.rows];
        let mut vertical = vec![false; self.cols];
        for (index, plot) in self.cells.iter().enumerate() {
            let Some(plot) = plot else { continue };
            let (row, col) = (index / self.cols, index % self.cols);
            caption[row] |= !plot.title().is_empty();
            match plot.colorbar().map(|bar| bar.orientation) {
                Some(Orientation::Vertical) => vertical[col] = true,
                Some(Orientation::Horizontal) => horizontal[row] = true,
                None => {}
            }
        }
        (0..self.rows * self.cols)
            .map(|index| {
                let (row, col) = (index / self.cols, index % self.cols);
                Reserve {
                    caption: caption[row],
                    vertical_bar: vertical[col],
                    horizontal_bar: horizontal[row],
                }
            })
            .collect()
    }

    /// Render every created cell at `width_cm × height_cm` in total.
    pub fn render(&self, width_cm: f64, height_cm: f64) -> PlotResult<Surface> {
        self.render_with_config(width_cm, height_cm, &RenderConfig::default())
    }

    pub fn render_with_config(
        &self,
        width_cm: f64,
        height_cm: f64,
        config: &RenderConfig,
    ) -> PlotResult<Surface> {
        let width = config.cm_to_px(width_cm);
        let height = config.cm_to_px(height_cm);
        let padding = f64::from(config.cm_to_px(self.padding_cm()));
        let regions = self.tile_regions(width, height, padding);
        let reserves = self.reserves();
        debug!(
            width,
            height,
            rows = self.rows,
            cols = self.cols,
            tiles = self.cells.iter().flatten().count(),
            "rendering tile grid"
        );

        let mut surface = Surface::new(width, height, config.background);
        surface.draw(|root| {
            for ((plot, region), reserve) in self.cells.iter().zip(&regions).zip(&reserves) {
                let Some(plot) = plot else { continue };
                if region.is_empty() {
                    continue;
                }
                compose(&region.within(root), plot, *reserve, config)?;
            }
            Ok(())
        })?;
        debug!(width, height, "tile grid rendered");
        Ok(surface)
    }

    /// Render and write the image to `path`.
    pub fn save(&self, path: impl AsRef<Path>, width_cm: f64, height_cm: f64) -> PlotResult<()> {
        self.render(width_cm, height_cm)?.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_out_of_range() {
        let mut grid = TileGrid::new(2, 3);
        let err = grid.cell(2, 0).unwrap_err();
        assert!(matches!(
            err,
            PlotError::IndexOutOfRange { row: 2, col: 0, rows: 2, cols: 3 }
        ));
        assert!(grid.cell(0, 3).is_err());
        assert!(grid.get(5, 5).is_err());
    }

    #[test]
    fn test_cell_is_created_once() {
        let mut grid = TileGrid::new(2, 2);
        assert!(grid.get(1, 1).unwrap().is_none());
        grid.cell(1, 1).unwrap().set_title("kept");
        grid.cell(1, 1).unwrap();
        assert_eq!(grid.get(1, 1).unwrap().map(|p| p.title()), Some("kept"));
        assert!(grid.get(0, 0).unwrap().is_none());
    }

    #[test]
    fn test_tile_regions_layout() {
        let grid = TileGrid::new(2, 3);
        let regions = grid.tile_regions(320, 210, 10.0);
        assert_eq!(regions.len(), 6);
        assert_eq!(regions[0], Region::new(0, 0, 100, 100));
        assert_eq!(regions[1], Region::new(110, 0, 100, 100));
        assert_eq!(regions[2], Region::new(220, 0, 100, 100));
        assert_eq!(regions[4], Region::new(110, 110, 100, 100));
        for pair in regions.windows(2) {
            assert!(!pair[0].intersects(&pair[1]));
        }
    }

    #[test]
    fn test_reserves_follow_rows_and_columns() {
        let mut grid = TileGrid::new(2, 2);
        grid.cell(0, 0).unwrap().set_title("titled");
        grid.cell(1, 1).unwrap();
        let z = ndarray::Array2::from_shape_fn((3, 3), |(r, c)| (r + c) as f64);
        grid.cell(1, 0)
            .unwrap()
            .add_filled_contour(
                &[0.0, 1.0, 2.0],
                &[0.0, 1.0, 2.0],
                &z,
                crate::options::ContourOptions::new().with_colorbar(Orientation::Vertical),
            )
            .unwrap();

        let reserves = grid.reserves();
        assert!(reserves[0].caption && reserves[1].caption);
        assert!(!reserves[2].caption && !reserves[3].caption);
        assert!(reserves[0].vertical_bar && reserves[2].vertical_bar);
        assert!(!reserves[1].vertical_bar && !reserves[3].vertical_bar);
        assert!(reserves.iter().all(|r| !r.horizontal_bar));
    }

    /// Top row of pure red pixels within `[x0, x1)`.
    fn first_red_row(surface: &Surface, x0: u32, x1: u32) -> Option<u32> {
        (0..surface.height()).find(|&y| (x0..x1).any(|x| surface.pixel(x, y) == Some([255, 0, 0])))
    }

    #[test]
    fn test_title_in_one_tile_keeps_row_aligned() {
        let red = |_: (usize, usize)| 255.0;
        let zero = |_: (usize, usize)| 0.0;
        let planes = [
            ndarray::Array2::from_shape_fn((4, 4), red),
            ndarray::Array2::from_shape_fn((4, 4), zero),
            ndarray::Array2::from_shape_fn((4, 4), zero),
        ];
        let mut grid = TileGrid::new(1, 2);
        grid.cell(0, 0).unwrap().set_title("left only");
        grid.cell(0, 0).unwrap().add_raster_image(&planes).unwrap();
        grid.cell(0, 1).unwrap().add_raster_image(&planes).unwrap();

        let surface = grid.render(16.0, 8.0).unwrap();
        let config = RenderConfig::default();
        let padding = f64::from(config.cm_to_px(grid.padding_cm()));
        let regions = grid.tile_regions(surface.width(), surface.height(), padding);

        let left = first_red_row(&surface, regions[0].x, regions[0].right());
        let right = first_red_row(&surface, regions[1].x, regions[1].right());
        assert!(left.is_some());
        assert_eq!(left, right);
    }

    #[test]
    fn test_empty_grid_renders_background() {
        let grid = TileGrid::new(1, 2);
        let surface = grid.render(5.0, 2.54).unwrap();
        assert_eq!(surface.height(), 96);
        assert!(surface.pixels().iter().all(|&b| b == 255));
    }
}
