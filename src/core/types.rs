use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::AxisResult;

/// Closed `[minimum, maximum]` interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange<T> {
    pub minimum: T,
    pub maximum: T,
}

impl<T: Copy + PartialOrd> ValueRange<T> {
    #[must_use]
    pub fn new(minimum: T, maximum: T) -> Self {
        Self { minimum, maximum }
    }

    /// Returns a copy where `maximum >= minimum` holds.
    #[must_use]
    pub fn clamped(self) -> Self {
        if self.maximum < self.minimum {
            Self {
                minimum: self.minimum,
                maximum: self.minimum,
            }
        } else {
            self
        }
    }

    #[must_use]
    pub fn contains(self, value: T) -> bool {
        value >= self.minimum && value <= self.maximum
    }
}

impl ValueRange<f64> {
    /// Sentinel used before the first update pass.
    pub const EMPTY: Self = Self {
        minimum: 0.0,
        maximum: 0.0,
    };

    #[must_use]
    pub fn delta(self) -> f64 {
        self.maximum - self.minimum
    }
}

/// Direction(s) in which an auto-range may grow past the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RangeExtendDirection {
    None,
    Positive,
    Negative,
    #[default]
    Both,
}

impl RangeExtendDirection {
    #[must_use]
    pub fn extends_positive(self) -> bool {
        matches!(self, Self::Positive | Self::Both)
    }

    #[must_use]
    pub fn extends_negative(self) -> bool {
        matches!(self, Self::Negative | Self::Both)
    }
}

/// Open/high/low/close quadruple as consumed by financial series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlc {
    #[must_use]
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    pub fn from_decimal(
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> AxisResult<Self> {
        Ok(Self::new(
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        ))
    }

    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.open), f(self.high), f(self.low), f(self.close))
    }
}

/// Low/high pair as consumed by range bar/area series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeValue {
    pub low: f64,
    pub high: f64,
}

impl RangeValue {
    #[must_use]
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.low), f(self.high))
    }
}

/// Raw value a data point exposes for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AxisValue {
    Scalar(f64),
    Ohlc(Ohlc),
    Range(RangeValue),
    DateTime(DateTime<Utc>),
}

impl AxisValue {
    pub fn from_decimal(value: Decimal) -> AxisResult<Self> {
        Ok(Self::Scalar(decimal_to_f64(value, "value")?))
    }

    #[must_use]
    pub fn as_scalar(self) -> Option<f64> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date_time(self) -> Option<DateTime<Utc>> {
        match self {
            Self::DateTime(value) => Some(value),
            _ => None,
        }
    }
}

impl From<f64> for AxisValue {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Ohlc> for AxisValue {
    fn from(value: Ohlc) -> Self {
        Self::Ohlc(value)
    }
}

impl From<RangeValue> for AxisValue {
    fn from(value: RangeValue) -> Self {
        Self::Range(value)
    }
}

impl From<DateTime<Utc>> for AxisValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

/// How points are positioned relative to the ticks of a date-time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisPlotMode {
    /// Points sit in the middle of the interval between two ticks.
    #[default]
    BetweenTicks,
    /// Points sit exactly on ticks.
    OnTicks,
    /// Points sit on ticks, with half an interval of padding at both ends.
    OnTicksPadded,
}

/// Length policy for points plotted on a date-time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DateTimePlotStretchMode {
    /// Each point gets an equal share of the axis.
    Uniform,
    /// Each point gets a share proportional to its time slot.
    #[default]
    TickSlot,
}
