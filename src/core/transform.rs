use serde::{Deserialize, Serialize};

use crate::core::types::AxisValue;

pub const FULL_CIRCLE_DEGREES: f64 = 360.0;
pub const DEFAULT_RADIAL_STEP_DEGREES: f64 = 30.0;

const LEADING_DIGIT_TOLERANCE: f64 = 1e-9;

/// Numerical axis flavours, each carrying its own value transform.
///
/// Every plotting, range and tick computation runs in the transformed ("plot")
/// space; only label content and inverse mapping go back to raw values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum NumericalAxisKind {
    /// Identity transform.
    #[default]
    Linear,
    /// `log_base(value)`; non-positive values have no plot position.
    Logarithmic { base: f64 },
    /// Radius axis of a polar chart: `|value|`, minimum pinned to zero.
    Polar,
    /// Angle axis of a polar chart: degrees normalized into `[0, 360)`.
    Radial,
}

impl NumericalAxisKind {
    /// Maps a raw value into plot space. `NaN` means "unavailable".
    #[must_use]
    pub fn transform(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Logarithmic { base } => {
                if value <= 0.0 || value.is_nan() {
                    f64::NAN
                } else {
                    value.ln() / base.ln()
                }
            }
            Self::Polar => value.abs(),
            Self::Radial => {
                let angle = value % FULL_CIRCLE_DEGREES;
                if angle < 0.0 {
                    angle + FULL_CIRCLE_DEGREES
                } else {
                    angle
                }
            }
        }
    }

    #[must_use]
    pub fn inverse_transform(self, value: f64) -> f64 {
        match self {
            Self::Logarithmic { base } => base.powf(value),
            Self::Linear | Self::Polar | Self::Radial => value,
        }
    }

    /// Transforms every component of a numeric axis value.
    ///
    /// Returns `None` for values this axis cannot position (date-times).
    #[must_use]
    pub fn transform_value(self, value: AxisValue) -> Option<AxisValue> {
        match value {
            AxisValue::Scalar(scalar) => Some(AxisValue::Scalar(self.transform(scalar))),
            AxisValue::Ohlc(ohlc) => Some(AxisValue::Ohlc(ohlc.map(|v| self.transform(v)))),
            AxisValue::Range(range) => Some(AxisValue::Range(range.map(|v| self.transform(v)))),
            AxisValue::DateTime(_) => None,
        }
    }

    #[must_use]
    pub fn is_radial(self) -> bool {
        matches!(self, Self::Radial)
    }
}

/// Rounds a raw step up to the nearest `{1, 2, 5, 10} x 10^n`.
#[must_use]
pub fn normalize_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }

    let magnitude = step.log10().floor();
    let power = 10_f64.powf(magnitude);
    let raw_digit = step / power;
    let digit = if (raw_digit - raw_digit.round()).abs() < LEADING_DIGIT_TOLERANCE {
        raw_digit.round()
    } else {
        raw_digit.ceil()
    };

    let nice = if digit > 5.0 {
        10.0
    } else if digit > 2.0 {
        5.0
    } else if digit > 1.0 {
        2.0
    } else {
        1.0
    };
    nice * power
}

#[cfg(test)]
mod tests {
    use super::{NumericalAxisKind, normalize_step};
    use crate::core::types::{AxisValue, RangeValue};

    #[test]
    fn normalize_step_picks_smallest_nice_value_not_below_raw_step() {
        assert_eq!(normalize_step(1.0), 1.0);
        assert_eq!(normalize_step(1.49), 2.0);
        assert_eq!(normalize_step(2.3), 5.0);
        assert_eq!(normalize_step(5.0), 5.0);
        assert_eq!(normalize_step(7.1), 10.0);
        assert!((normalize_step(0.037) - 0.05).abs() <= 1e-15);
        assert_eq!(normalize_step(1_400.0), 2_000.0);
    }

    #[test]
    fn normalize_step_rejects_degenerate_input() {
        assert_eq!(normalize_step(0.0), 0.0);
        assert_eq!(normalize_step(-3.0), 0.0);
        assert_eq!(normalize_step(f64::NAN), 0.0);
    }

    #[test]
    fn logarithm_of_non_positive_value_is_unavailable() {
        let kind = NumericalAxisKind::Logarithmic { base: 10.0 };
        assert!(kind.transform(0.0).is_nan());
        assert!(kind.transform(-5.0).is_nan());
        assert!((kind.transform(1_000.0) - 3.0).abs() <= 1e-12);
        assert!((kind.inverse_transform(2.0) - 100.0).abs() <= 1e-9);
    }

    #[test]
    fn radial_transform_wraps_angles() {
        let kind = NumericalAxisKind::Radial;
        assert_eq!(kind.transform(370.0), 10.0);
        assert_eq!(kind.transform(-30.0), 330.0);
    }

    #[test]
    fn polar_transform_uses_magnitude_for_ranges() {
        let transformed = NumericalAxisKind::Polar
            .transform_value(AxisValue::Range(RangeValue::new(-4.0, 2.0)))
            .expect("numeric value");
        assert_eq!(transformed, AxisValue::Range(RangeValue::new(4.0, 2.0)));
    }
}
