// Level generation and axis range fitting

/// Evenly spaced thresholds from `min` to `max`, both inclusive.
///
/// `n == 1` yields `[min]`; a degenerate span yields `n` copies of `min`.
/// Contour lines and filled bands both take their thresholds from here.
pub fn levels(min: f64, max: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![min];
    }
    let step = (max - min) / (n as f64 - 1.0);
    (0..n).map(|i| min + i as f64 * step).collect()
}

/// Smallest and largest finite value, or `None` if there are none.
pub fn min_max<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut extent = Extent::empty();
    for v in values {
        extent.include(v);
    }
    extent.bounds()
}

/// Running min/max accumulator over one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    min: f64,
    max: f64,
}

impl Extent {
    pub fn empty() -> Self {
        Extent {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn include(&mut self, v: f64) {
        if !v.is_finite() {
            return;
        }
        if v < self.min {
            self.min = v;
        }
        if v > self.max {
            self.max = v;
        }
    }

    pub fn merge(&mut self, other: &Extent) {
        if let Some((min, max)) = other.bounds() {
            self.include(min);
            self.include(max);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn bounds(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            None
        } else {
            Some((self.min, self.max))
        }
    }
}

/// Widen a data range by 5% on each side, or by one unit if it is a single value.
pub fn pad_range(min: f64, max: f64) -> (f64, f64) {
    if min == max {
        (min - 1.0, max + 1.0)
    } else {
        let padding = (max - min) * 0.05;
        (min - padding, max + padding)
    }
}

/// Make a range drawable: a degenerate span is opened up by one unit.
pub fn non_degenerate(min: f64, max: f64) -> (f64, f64) {
    if min < max {
        (min, max)
    } else {
        (min - 1.0, max + 1.0)
    }
}
