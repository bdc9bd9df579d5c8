//! Linear data-space/pixel-space scales and extent helpers.

use super::Dimensions;

/// An affine map from a data domain to a pixel range.
///
/// Scales are value types: zoom and restore build new scales via
/// [`LinearScale::with_domain`] instead of mutating shared state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> LinearScale {
        LinearScale { domain, range }
    }

    /// Map a data value to pixels. A zero-width domain maps everything to
    /// the middle of the range.
    pub fn scale(&self, value: f64) -> f64 {
        let span = self.domain[1] - self.domain[0];
        if span == 0.0 {
            return (self.range[0] + self.range[1]) / 2.0;
        }
        let t = (value - self.domain[0]) / span;
        self.range[0] + t * (self.range[1] - self.range[0])
    }

    /// Map a pixel position back to a data value.
    pub fn invert(&self, pixel: f64) -> f64 {
        let span = self.range[1] - self.range[0];
        if span == 0.0 {
            return (self.domain[0] + self.domain[1]) / 2.0;
        }
        let t = (pixel - self.range[0]) / span;
        self.domain[0] + t * (self.domain[1] - self.domain[0])
    }

    /// The same scale with a new domain.
    pub fn with_domain(self, domain: [f64; 2]) -> LinearScale {
        LinearScale { domain, ..self }
    }

    /// Round tick positions covering the domain, at most roughly `count`,
    /// stepping by 1/2/5·10ⁿ.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain[0] <= self.domain[1] {
            (self.domain[0], self.domain[1])
        } else {
            (self.domain[1], self.domain[0])
        };
        if !(lo.is_finite() && hi.is_finite()) {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }
        let step = tick_step(lo, hi, count.max(1));
        if step <= 0.0 || !step.is_finite() {
            return vec![lo];
        }
        let start = (lo / step).ceil();
        let stop = (hi / step).floor();
        let mut ticks = Vec::new();
        let mut i = start;
        while i <= stop {
            ticks.push(i * step);
            i += 1.0;
        }
        ticks
    }
}

/// Tick step for a span and count, snapped to a 1/2/5 decade ladder.
pub fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count as f64;
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    base * factor
}

/// Min/max of the finite values of an iterator, `[0, 0]` when there are
/// none. Non-finite entries are skipped so NaN never reaches a scale.
pub fn extent_or_zero(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let mut extent: Option<[f64; 2]> = None;
    for value in values {
        if !value.is_finite() {
            continue;
        }
        extent = Some(match extent {
            None => [value, value],
            Some([lo, hi]) => [lo.min(value), hi.max(value)],
        });
    }
    extent.unwrap_or([0.0, 0.0])
}

/// Padding for value axes: 5% of the extent width.
pub fn margin_value(extent: [f64; 2]) -> f64 {
    0.05 * (extent[1] - extent[0])
}

/// Padding for time/delay axes: 2% of the extent width.
pub fn margin_time(extent: [f64; 2]) -> f64 {
    0.02 * (extent[1] - extent[0])
}

/// Horizontal scale over the plot width, domain padded by `margin`.
pub fn x_scale(extent: [f64; 2], margin: f64, dimensions: &Dimensions) -> LinearScale {
    LinearScale::new(
        [extent[0] - margin, extent[1] + margin],
        [0.0, dimensions.width],
    )
}

/// Vertical scale over the plot height, pixel-inverted, domain padded by
/// `margin`.
pub fn y_scale(extent: [f64; 2], margin: f64, dimensions: &Dimensions) -> LinearScale {
    LinearScale::new(
        [extent[0] - margin, extent[1] + margin],
        [dimensions.height, 0.0],
    )
}
