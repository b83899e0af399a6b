// Error types for figure construction and output

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used across the crate.
pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Error, Debug)]
pub enum PlotError {
    /// Input arrays or grids of one layer disagree in size.
    #[error("shape mismatch in {context}: expected {expected}, found {found}")]
    ShapeMismatch {
        context: String,
        expected: String,
        found: String,
    },

    /// A tile coordinate lies outside the grid.
    #[error("tile ({row}, {col}) is outside a {rows}x{cols} grid")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// More legend labels than layers that can carry one.
    #[error("{labels} legend labels supplied but only {eligible} layers accept a legend entry")]
    LegendOverflow { labels: usize, eligible: usize },

    #[error("failed to create '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode surface: {0}")]
    Encode(#[from] image::ImageError),

    /// The drawing backend rejected an operation.
    #[error(transparent)]
    Render(#[from] anyhow::Error),
}

impl PlotError {
    pub(crate) fn shape(
        context: impl Into<String>,
        expected: impl ToString,
        found: impl ToString,
    ) -> Self {
        PlotError::ShapeMismatch {
            context: context.into(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}
