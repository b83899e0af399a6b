// Library exports for gramplot

pub mod colorscale;
pub mod config;
pub mod contour;
pub mod error;
pub mod graph;
pub mod ir;
pub mod options;
pub mod palette;
pub mod plot;
pub mod runtime;
pub mod scale;
pub mod tiles;

pub use colorscale::{ColorMap, ColorScale, Gradient};
pub use config::RenderConfig;
pub use error::{PlotError, PlotResult};
pub use graph::{render, render_with_config, Surface};
pub use options::{ContourOptions, LineOptions, Orientation, ScatterOptions};
pub use palette::{LineStyle, MarkerShape};
pub use plot::{Axis, Plot};
pub use scale::levels;
pub use tiles::TileGrid;
