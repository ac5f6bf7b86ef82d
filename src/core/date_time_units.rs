use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::primitives::{
    MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND, add_months_to_ticks,
};

const AVERAGE_DAYS_PER_MONTH: f64 = 365.0 / 12.0;
const DAYS_PER_YEAR: f64 = 365.0;
const MONTHS_PER_QUARTER: f64 = 3.0;
const MONTHS_PER_YEAR: i64 = 12;

/// Minimum-delta bands (in days) that read as "1, 2, 3, 4 or 6 months".
const MONTH_DAY_BANDS: [(f64, f64); 5] = [
    (28.0, 31.0),
    (59.0, 62.0),
    (89.0, 92.0),
    (120.0, 122.0),
    (181.0, 184.0),
];
/// Minimum-delta bands (in days) that read as "1 or 2 years".
const YEAR_DAY_BANDS: [(f64, f64); 2] = [(365.0, 366.0), (730.0, 731.0)];

/// Unit of a user-supplied date-time major step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeInterval {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    #[default]
    Year,
}

/// Tick spacing selected for one update pass.
///
/// When `month_step` or `year_step` is set, consecutive ticks are produced with
/// calendar arithmetic so they stay aligned with variable-length months.
/// Otherwise ticks are `major_step` milliseconds apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickUnits {
    pub major_step: f64,
    pub month_step: Option<i64>,
    pub year_step: Option<i64>,
    pub tick_zoom_factor: f64,
}

impl Default for TickUnits {
    fn default() -> Self {
        Self {
            major_step: 0.0,
            month_step: None,
            year_step: None,
            tick_zoom_factor: 1.0,
        }
    }
}

impl TickUnits {
    /// Tick that follows `current` at the given zoom factor.
    ///
    /// Calendar overflow saturates to `+inf`, which ends every tick walk.
    #[must_use]
    pub fn next_ticks(&self, current: f64, zoom_factor: f64) -> f64 {
        match self.calendar_months(zoom_factor) {
            Some(months) => add_months_to_ticks(current, months).unwrap_or(f64::INFINITY),
            None => current + self.major_step / zoom_factor,
        }
    }

    #[must_use]
    pub fn previous_ticks(&self, current: f64, zoom_factor: f64) -> f64 {
        match self.calendar_months(zoom_factor) {
            Some(months) => add_months_to_ticks(current, -months).unwrap_or(f64::NEG_INFINITY),
            None => current - self.major_step / zoom_factor,
        }
    }

    #[must_use]
    pub fn is_calendar_based(&self) -> bool {
        self.month_step.is_some() || self.year_step.is_some()
    }

    fn calendar_months(&self, zoom_factor: f64) -> Option<i64> {
        if let Some(month_step) = self.month_step {
            return Some(zoomed_count(month_step, zoom_factor));
        }
        self.year_step
            .map(|year_step| zoomed_count(year_step, zoom_factor) * MONTHS_PER_YEAR)
    }
}

// Truncating division, never below one unit.
fn zoomed_count(step: i64, zoom_factor: f64) -> i64 {
    ((step as f64 / zoom_factor) as i64).max(1)
}

/// Inputs to [`select_tick_units`], all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitRequest {
    /// Span of the actual range.
    pub range: f64,
    /// Smallest gap between two distinct timestamps.
    pub min_delta: f64,
    pub user_step: Option<f64>,
    pub step_unit: TimeInterval,
    pub maximum_ticks: usize,
    /// A user-set tick cap disables the calendar band detection.
    pub maximum_ticks_is_user: bool,
    pub zoom: f64,
}

/// Picks the tick interval (and calendar unit, if any) for a date-time axis.
#[must_use]
pub fn select_tick_units(request: UnitRequest) -> TickUnits {
    let mut units = TickUnits::default();

    let tick_interval = match request.user_step {
        Some(step) => user_step_interval(step, request.step_unit, &mut units).min(request.range),
        None => {
            let mut interval = request.min_delta;
            if !request.maximum_ticks_is_user {
                let days = interval / MILLIS_PER_DAY;
                if in_bands(days, &MONTH_DAY_BANDS) {
                    units.month_step = Some(1);
                } else if in_bands(days, &YEAR_DAY_BANDS) {
                    units.year_step = Some(1);
                }
            }

            if interval > 0.0 {
                let tick_count = (request.range / interval / request.zoom).floor();
                let tick_cap = request.maximum_ticks.saturating_sub(1).max(1) as f64;
                if tick_count > tick_cap {
                    interval = request.range / tick_cap;
                }
            }
            interval
        }
    };

    units.major_step = tick_interval;
    // Duplicate timestamps leave no usable interval.
    if units.major_step == 0.0 {
        units.month_step = Some(1);
    }

    units.tick_zoom_factor = tick_zoom_factor(tick_interval, request.min_delta, request.zoom);

    trace!(
        major_step = units.major_step,
        month_step = ?units.month_step,
        year_step = ?units.year_step,
        tick_zoom_factor = units.tick_zoom_factor,
        "select date-time tick units"
    );
    units
}

/// Converts a user step into milliseconds, recording calendar units on the way.
fn user_step_interval(step: f64, unit: TimeInterval, units: &mut TickUnits) -> f64 {
    match unit {
        TimeInterval::Millisecond => step,
        TimeInterval::Second => step * MILLIS_PER_SECOND,
        TimeInterval::Minute => step * MILLIS_PER_MINUTE,
        TimeInterval::Hour => step * MILLIS_PER_HOUR,
        TimeInterval::Day => step * MILLIS_PER_DAY,
        TimeInterval::Week => step * 7.0 * MILLIS_PER_DAY,
        TimeInterval::Month => {
            units.month_step = Some(step as i64);
            AVERAGE_DAYS_PER_MONTH * step * MILLIS_PER_DAY
        }
        TimeInterval::Quarter => {
            units.month_step = Some((step * MONTHS_PER_QUARTER) as i64);
            AVERAGE_DAYS_PER_MONTH * MONTHS_PER_QUARTER * step * MILLIS_PER_DAY
        }
        TimeInterval::Year => {
            units.year_step = Some(step as i64);
            DAYS_PER_YEAR * step * MILLIS_PER_DAY
        }
    }
}

fn in_bands(days: f64, bands: &[(f64, f64)]) -> bool {
    bands.iter().any(|&(low, high)| days >= low && days <= high)
}

/// Zoom factor applied to tick spacing.
///
/// The zoomed interval may not drop below the minimum delta; otherwise the
/// zoom is rounded down to an even number. Never below 1.
#[must_use]
pub fn tick_zoom_factor(tick_interval: f64, min_delta: f64, zoom: f64) -> f64 {
    let factor = if min_delta > 0.0 && tick_interval / zoom < min_delta {
        tick_interval / min_delta
    } else {
        zoom - zoom % 2.0
    };
    factor.max(1.0)
}
