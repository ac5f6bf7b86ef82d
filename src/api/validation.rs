use crate::core::NumericalAxisKind;
use crate::error::{AxisError, AxisResult};

use super::{DateTimeAxisConfig, NumericalAxisConfig};

/// Validates a numerical axis config, folding "auto" sentinels into `None`.
pub fn validate_numerical_axis_config(
    mut config: NumericalAxisConfig,
) -> AxisResult<NumericalAxisConfig> {
    validate_axis_kind(config.kind)?;
    config.minimum = config.minimum.map(validate_bound).transpose()?.flatten();
    config.maximum = config.maximum.map(validate_bound).transpose()?.flatten();
    config.major_step = validate_numerical_major_step(config.major_step.unwrap_or(0.0))?;
    config.desired_tick_count = config.desired_tick_count.filter(|count| *count >= 2);
    Ok(config)
}

pub fn validate_date_time_axis_config(
    mut config: DateTimeAxisConfig,
) -> AxisResult<DateTimeAxisConfig> {
    config.major_step = match config.major_step {
        Some(step) => validate_date_time_major_step(step)?,
        None => None,
    };
    validate_gap_length(config.gap_length)?;
    if let Some(maximum_ticks) = config.maximum_ticks {
        validate_maximum_ticks(maximum_ticks)?;
    }
    Ok(config)
}

pub(crate) fn validate_axis_kind(kind: NumericalAxisKind) -> AxisResult<NumericalAxisKind> {
    if let NumericalAxisKind::Logarithmic { base } = kind {
        if !base.is_finite() || base <= 0.0 || base == 1.0 {
            return Err(AxisError::InvalidConfig(
                "logarithm base must be finite, > 0 and != 1".to_owned(),
            ));
        }
    }
    Ok(kind)
}

/// Accepts a finite bound; infinite values clear the override.
pub(crate) fn validate_bound(value: f64) -> AxisResult<Option<f64>> {
    if value.is_nan() {
        return Err(AxisError::InvalidConfig(
            "axis minimum/maximum must not be NaN".to_owned(),
        ));
    }
    Ok(value.is_finite().then_some(value))
}

/// Numerical step: `0` clears the override; negative or non-finite is rejected.
pub(crate) fn validate_numerical_major_step(step: f64) -> AxisResult<Option<f64>> {
    if !step.is_finite() || step < 0.0 {
        return Err(AxisError::InvalidConfig(
            "major step must be finite and >= 0".to_owned(),
        ));
    }
    Ok((step > 0.0).then_some(step))
}

/// Date-time step: infinities clear the override; negative or NaN is rejected.
pub(crate) fn validate_date_time_major_step(step: f64) -> AxisResult<Option<f64>> {
    if step.is_infinite() {
        return Ok(None);
    }
    if step.is_nan() || step < 0.0 {
        return Err(AxisError::InvalidConfig(
            "major step must be >= 0 and not NaN".to_owned(),
        ));
    }
    Ok(Some(step))
}

pub(crate) fn validate_gap_length(gap_length: f64) -> AxisResult<f64> {
    if !gap_length.is_finite() || !(0.0..=1.0).contains(&gap_length) {
        return Err(AxisError::InvalidConfig(
            "gap length must be within [0, 1]".to_owned(),
        ));
    }
    Ok(gap_length)
}

pub(crate) fn validate_maximum_ticks(maximum_ticks: usize) -> AxisResult<usize> {
    if maximum_ticks < 2 {
        return Err(AxisError::InvalidConfig(
            "maximum ticks must be >= 2".to_owned(),
        ));
    }
    Ok(maximum_ticks)
}

pub(crate) fn validate_zoom(zoom: f64) -> AxisResult<f64> {
    if !zoom.is_finite() || zoom <= 0.0 {
        return Err(AxisError::InvalidConfig(
            "zoom factor must be finite and > 0".to_owned(),
        ));
    }
    Ok(zoom)
}

pub(crate) fn validate_relative_position(position: f64) -> AxisResult<f64> {
    if !position.is_finite() {
        return Err(AxisError::InvalidData(
            "relative position must be finite".to_owned(),
        ));
    }
    Ok(position)
}
