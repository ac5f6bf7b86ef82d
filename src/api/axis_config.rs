use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{
    AxisPlotMode, DateTimePlotStretchMode, NumericalAxisKind, RangeExtendDirection, TimeInterval,
};
use crate::error::{AxisError, AxisResult};

use super::validation::{validate_date_time_axis_config, validate_numerical_axis_config};

pub const DEFAULT_DESIRED_TICK_COUNT: usize = 8;
pub const DEFAULT_GAP_LENGTH: f64 = 0.3;
pub const DEFAULT_MAXIMUM_TICKS: usize = 31;

/// Serializable setup of a numerical axis.
///
/// `None` means "auto" for every override. The model setters also accept the
/// classic sentinels (`-inf` minimum, `+inf` maximum, `0` step, tick count
/// below 2) and store them as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct NumericalAxisConfig {
    #[serde(default)]
    pub kind: NumericalAxisKind,
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
    /// Step in plot space (an exponent step on logarithmic axes).
    #[serde(default)]
    pub major_step: Option<f64>,
    #[serde(default)]
    pub desired_tick_count: Option<usize>,
    #[serde(default)]
    pub extend_direction: RangeExtendDirection,
    #[serde(default)]
    pub is_inverse: bool,
}

impl NumericalAxisConfig {
    #[must_use]
    pub fn new(kind: NumericalAxisKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Tick count used by auto-step computation.
    #[must_use]
    pub fn effective_tick_count(&self) -> usize {
        self.desired_tick_count.unwrap_or(DEFAULT_DESIRED_TICK_COUNT)
    }

    pub fn to_json_pretty(&self) -> AxisResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            AxisError::InvalidConfig(format!("failed to serialize numerical axis config: {e}"))
        })
    }

    /// Parses and validates a config produced by [`Self::to_json_pretty`].
    pub fn from_json_str(input: &str) -> AxisResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            AxisError::InvalidConfig(format!("failed to parse numerical axis config: {e}"))
        })?;
        validate_numerical_axis_config(config)
    }
}

/// Serializable setup of a continuous date-time axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateTimeAxisConfig {
    #[serde(default)]
    pub minimum: Option<DateTime<Utc>>,
    #[serde(default)]
    pub maximum: Option<DateTime<Utc>>,
    /// User step, counted in `major_step_unit`.
    #[serde(default)]
    pub major_step: Option<f64>,
    #[serde(default)]
    pub major_step_unit: TimeInterval,
    #[serde(default = "default_gap_length")]
    pub gap_length: f64,
    /// Explicit placement; `None` selects one from the series hints.
    #[serde(default)]
    pub plot_mode: Option<AxisPlotMode>,
    #[serde(default)]
    pub plot_stretch_mode: DateTimePlotStretchMode,
    /// Tick cap; `None` uses [`DEFAULT_MAXIMUM_TICKS`] and keeps calendar
    /// month/year detection enabled.
    #[serde(default)]
    pub maximum_ticks: Option<usize>,
    #[serde(default)]
    pub is_inverse: bool,
}

impl Default for DateTimeAxisConfig {
    fn default() -> Self {
        Self {
            minimum: None,
            maximum: None,
            major_step: None,
            major_step_unit: TimeInterval::default(),
            gap_length: default_gap_length(),
            plot_mode: None,
            plot_stretch_mode: DateTimePlotStretchMode::default(),
            maximum_ticks: None,
            is_inverse: false,
        }
    }
}

impl DateTimeAxisConfig {
    #[must_use]
    pub fn effective_maximum_ticks(&self) -> usize {
        self.maximum_ticks.unwrap_or(DEFAULT_MAXIMUM_TICKS)
    }

    pub fn to_json_pretty(&self) -> AxisResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            AxisError::InvalidConfig(format!("failed to serialize date-time axis config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> AxisResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            AxisError::InvalidConfig(format!("failed to parse date-time axis config: {e}"))
        })?;
        validate_date_time_axis_config(config)
    }
}

fn default_gap_length() -> f64 {
    DEFAULT_GAP_LENGTH
}
