use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Plot result for a scalar value on a numerical axis.
///
/// All positions are normalized to `[0, 1]` along the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericalPlotInfo {
    /// Where the bar/segment for this point starts. Equals the axis origin
    /// for normal plots and the previous segment end for stacked plots.
    pub plot_origin_offset: f64,
    pub normalized_value: f64,
    pub normalized_origin: f64,
    /// Major tick the value sits exactly on, if any.
    pub snap_tick_index: Option<usize>,
}

/// Plot result for an open/high/low/close value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcPlotInfo {
    pub plot_origin_offset: f64,
    pub normalized_high: f64,
    pub normalized_low: f64,
    pub normalized_open: f64,
    pub normalized_close: f64,
    pub normalized_origin: f64,
    /// Open as a fraction of the high-low span, measured down from the high.
    pub relative_open: f64,
    /// Close as a fraction of the high-low span, measured down from the high.
    pub relative_close: f64,
    pub snap_tick_index: Option<usize>,
    pub snap_base_tick_index: Option<usize>,
    pub snap_open_tick_index: Option<usize>,
    pub snap_close_tick_index: Option<usize>,
}

impl OhlcPlotInfo {
    #[must_use]
    pub(crate) fn new(
        normalized_origin: f64,
        normalized_high: f64,
        normalized_low: f64,
        normalized_open: f64,
        normalized_close: f64,
    ) -> Self {
        let span = normalized_high - normalized_low;
        let (relative_open, relative_close) = if span == 0.0 {
            (0.0, 0.0)
        } else {
            (
                (normalized_high - normalized_open) / span,
                (normalized_high - normalized_close) / span,
            )
        };

        Self {
            plot_origin_offset: normalized_origin,
            normalized_high,
            normalized_low,
            normalized_open,
            normalized_close,
            normalized_origin,
            relative_open,
            relative_close,
            snap_tick_index: None,
            snap_base_tick_index: None,
            snap_open_tick_index: None,
            snap_close_tick_index: None,
        }
    }

    /// Returns `true` when the candle closes at or above its open.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.normalized_close >= self.normalized_open
    }
}

/// Plot result for a low/high range value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangePlotInfo {
    pub plot_origin_offset: f64,
    pub normalized_high: f64,
    pub normalized_low: f64,
    pub normalized_origin: f64,
    pub snap_tick_index: Option<usize>,
    pub snap_base_tick_index: Option<usize>,
}

/// Plot result on a date-time axis: the point's slot on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoricalPlotInfo {
    pub category_key: DateTime<Utc>,
    /// Normalized start of a slot-wide footprint centered on the point.
    pub slot_position: f64,
    /// Normalized center of the point.
    pub position: f64,
    /// Normalized length the point may occupy.
    pub length: f64,
}

/// Per-point, per-update result written back through the data point handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlotInfo {
    Numerical(NumericalPlotInfo),
    Ohlc(OhlcPlotInfo),
    Range(RangePlotInfo),
    Categorical(CategoricalPlotInfo),
}

impl PlotInfo {
    #[must_use]
    pub fn as_numerical(&self) -> Option<&NumericalPlotInfo> {
        match self {
            Self::Numerical(info) => Some(info),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_ohlc(&self) -> Option<&OhlcPlotInfo> {
        match self {
            Self::Ohlc(info) => Some(info),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_range(&self) -> Option<&RangePlotInfo> {
        match self {
            Self::Range(info) => Some(info),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_categorical(&self) -> Option<&CategoricalPlotInfo> {
        match self {
            Self::Categorical(info) => Some(info),
            _ => None,
        }
    }
}
