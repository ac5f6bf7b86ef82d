use chrono::{DateTime, Months, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{AxisError, AxisResult};

/// Tolerance used by `is_zero`/`are_close` when comparing axis math results.
pub const EPSILON: f64 = 1e-10;

pub const MILLIS_PER_SECOND: f64 = 1_000.0;
pub const MILLIS_PER_MINUTE: f64 = 60.0 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: f64 = 60.0 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: f64 = 24.0 * MILLIS_PER_HOUR;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> AxisResult<f64> {
    value.to_f64().ok_or_else(|| {
        AxisError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Scaled comparison: the tolerance grows with the magnitude of the operands.
#[must_use]
pub fn are_close(lhs: f64, rhs: f64) -> bool {
    if lhs == rhs {
        return true;
    }
    let eps = (lhs.abs() + rhs.abs() + 10.0) * EPSILON;
    let delta = lhs - rhs;
    -eps < delta && eps > delta
}

/// Date-time axis "ticks" are milliseconds since the Unix epoch.
#[must_use]
pub fn datetime_to_ticks(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

#[must_use]
pub fn ticks_to_datetime(ticks: f64) -> Option<DateTime<Utc>> {
    if !ticks.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ticks.round() as i64)
}

/// Adds (or subtracts, for negative `months`) calendar months to a tick value.
///
/// Day-of-month is clamped to the target month length, so Jan 31 + 1 month
/// lands on the last day of February.
#[must_use]
pub fn add_months_to_ticks(ticks: f64, months: i64) -> Option<f64> {
    let date = ticks_to_datetime(ticks)?;
    let magnitude = u32::try_from(months.unsigned_abs()).ok()?;
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(magnitude))?
    } else {
        date.checked_sub_months(Months::new(magnitude))?
    };
    Some(datetime_to_ticks(shifted))
}
