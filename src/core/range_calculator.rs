use crate::core::types::{RangeExtendDirection, ValueRange};

/// Relative span below which an all-negative (or all-positive) range is
/// snapped to zero instead of being pushed out by half its gap.
const DELTA_PERCENT: f64 = 16.667 / 100.0;
const EXTEND_FACTOR: f64 = 0.05;
const REMAINDER_TOLERANCE: f64 = 1e-9;

/// Auto-range extension and step rounding for numerical axes.
///
/// The extension follows the heuristic spreadsheet tools use for auto-ranged
/// value axes: ranges that sit entirely on one side of zero are anchored at
/// zero when the data spread is large relative to its magnitude, otherwise
/// each free bound moves outward by a fraction of the span. User-fixed bounds
/// are never moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeCalculator {
    range: ValueRange<f64>,
    extend_direction: RangeExtendDirection,
    user_min: bool,
    user_max: bool,
    minimum: f64,
    maximum: f64,
}

impl RangeCalculator {
    #[must_use]
    pub fn new(
        range: ValueRange<f64>,
        extend_direction: RangeExtendDirection,
        user_min: bool,
        user_max: bool,
    ) -> Self {
        Self {
            range,
            extend_direction,
            user_min,
            user_max,
            minimum: range.minimum,
            maximum: range.maximum,
        }
    }

    /// Current (possibly extended and rounded) bounds.
    #[must_use]
    pub fn current(&self) -> ValueRange<f64> {
        ValueRange::new(self.minimum, self.maximum)
    }

    pub fn extend(&mut self) -> ValueRange<f64> {
        if self.extend_direction.extends_negative() && !self.user_min {
            self.extend_negative();
        }
        if self.extend_direction.extends_positive() && !self.user_max {
            self.extend_positive();
        }
        self.current()
    }

    /// Rounds free bounds outward to the nearest multiple of `step`.
    pub fn round_to_major_step(&mut self, step: f64) -> ValueRange<f64> {
        if !step.is_finite() || step <= 0.0 {
            return self.current();
        }

        if !self.user_max {
            let remainder = self.maximum % step;
            if !is_negligible_remainder(remainder, step) {
                if remainder > 0.0 {
                    self.maximum += step - remainder;
                } else {
                    self.maximum -= remainder;
                }
            }
        }

        if !self.user_min {
            let remainder = self.minimum % step;
            if !is_negligible_remainder(remainder, step) {
                if remainder > 0.0 {
                    self.minimum -= remainder;
                } else {
                    self.minimum -= step + remainder;
                }
            }
        }

        self.current()
    }

    fn extend_positive(&mut self) {
        let delta = self.range.delta();
        if self.range.minimum <= 0.0 && self.range.maximum <= 0.0 {
            if delta > DELTA_PERCENT * -self.range.minimum {
                self.maximum = 0.0;
            } else {
                self.maximum =
                    self.range.maximum - (self.range.minimum - self.range.maximum) / 2.0;
            }
        } else {
            self.maximum = self.range.maximum + EXTEND_FACTOR * delta;
        }
    }

    fn extend_negative(&mut self) {
        let delta = self.range.delta();
        if self.range.minimum >= 0.0 && self.range.maximum >= 0.0 {
            if delta > DELTA_PERCENT * self.range.maximum {
                self.minimum = 0.0;
            } else {
                self.minimum = self.range.minimum - delta / 2.0;
            }
        } else {
            self.minimum =
                self.range.minimum + EXTEND_FACTOR * (self.range.minimum - self.range.maximum);
        }
    }
}

// `%` on floats can return a value a hair below `step` for exact multiples.
pub(crate) fn is_negligible_remainder(remainder: f64, step: f64) -> bool {
    let ratio = (remainder / step).abs();
    ratio < REMAINDER_TOLERANCE || (1.0 - ratio) < REMAINDER_TOLERANCE
}
