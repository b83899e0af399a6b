// Continuous gradients adapted into discrete palettes and bounded lookups

use std::fmt;

use plotters::style::RGBColor;

use crate::scale::levels;

/// A continuous mapping from `[0, 1]` to a color.
#[derive(Clone, Copy)]
pub struct Gradient {
    kind: GradientKind,
}

#[derive(Clone, Copy)]
enum GradientKind {
    Preset(colorous::Gradient),
    Solid(RGBColor),
}

impl Gradient {
    pub fn viridis() -> Self {
        colorous::VIRIDIS.into()
    }

    pub fn plasma() -> Self {
        colorous::PLASMA.into()
    }

    pub fn inferno() -> Self {
        colorous::INFERNO.into()
    }

    pub fn magma() -> Self {
        colorous::MAGMA.into()
    }

    pub fn turbo() -> Self {
        colorous::TURBO.into()
    }

    /// A gradient that evaluates to the same color everywhere.
    pub fn solid(color: RGBColor) -> Self {
        Gradient {
            kind: GradientKind::Solid(color),
        }
    }

    /// Evaluate at `t`, clamped into `[0, 1]`. NaN evaluates as 0.
    pub fn eval(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self.kind {
            GradientKind::Preset(gradient) => {
                let c = gradient.eval_continuous(t);
                RGBColor(c.r, c.g, c.b)
            }
            GradientKind::Solid(color) => color,
        }
    }
}

impl From<colorous::Gradient> for Gradient {
    fn from(gradient: colorous::Gradient) -> Self {
        Gradient {
            kind: GradientKind::Preset(gradient),
        }
    }
}

impl fmt::Debug for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            GradientKind::Preset(_) => f.write_str("Gradient::Preset"),
            GradientKind::Solid(c) => write!(f, "Gradient::Solid({}, {}, {})", c.0, c.1, c.2),
        }
    }
}

/// Capability interface consumed by every renderer that colors by value.
pub trait ColorMap {
    /// `n` colors sampled at the evenly spaced levels of the domain.
    fn discrete_colors(&self, n: usize) -> Vec<RGBColor>;
    /// Color for a value; values outside the domain clamp to the nearest end.
    fn at(&self, v: f64) -> RGBColor;
    fn min(&self) -> f64;
    fn max(&self) -> f64;
}

/// A gradient bound to `[min, max]` with a default sample count.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    gradient: Gradient,
    samples: usize,
    min: f64,
    max: f64,
}

impl ColorScale {
    /// `samples` below 1 is raised to 1. When `min == max` every lookup
    /// returns the gradient's start color.
    pub fn new(gradient: Gradient, samples: usize, min: f64, max: f64) -> Self {
        ColorScale {
            gradient,
            samples: samples.max(1),
            min,
            max,
        }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// The `samples` discrete colors; entry 0 is the domain minimum.
    pub fn discrete(&self) -> Vec<RGBColor> {
        self.discrete_colors(self.samples)
    }

    fn normalize(&self, v: f64) -> f64 {
        if !(self.max > self.min) {
            return 0.0;
        }
        (v.clamp(self.min, self.max) - self.min) / (self.max - self.min)
    }
}

impl ColorMap for ColorScale {
    fn discrete_colors(&self, n: usize) -> Vec<RGBColor> {
        // Sampling through `at` keeps the discrete and continuous views in
        // exact agreement at every level.
        levels(self.min, self.max, n.max(1))
            .into_iter()
            .map(|v| self.at(v))
            .collect()
    }

    fn at(&self, v: f64) -> RGBColor {
        self.gradient.eval(self.normalize(v))
    }

    fn min(&self) -> f64 {
        self.min
    }

    fn max(&self) -> f64 {
        self.max
    }
}
