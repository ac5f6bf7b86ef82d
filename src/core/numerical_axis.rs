use tracing::{debug, trace, warn};

use crate::api::NumericalAxisConfig;
use crate::api::validation::{
    validate_axis_kind, validate_bound, validate_numerical_axis_config,
    validate_numerical_major_step, validate_relative_position, validate_zoom,
};
use crate::core::context::{
    AxisDataPoint, AxisUpdateContext, CombineGroup, CombineStack, SeriesModel,
};
use crate::core::numerical_ticks::{LinearTickIter, NumericalTicks, RadialTickIter};
use crate::core::plot_info::{NumericalPlotInfo, OhlcPlotInfo, PlotInfo, RangePlotInfo};
use crate::core::primitives::{are_close, is_zero};
use crate::core::range_calculator::{RangeCalculator, is_negligible_remainder};
use crate::core::tick::{AxisTick, LabelContent};
use crate::core::transform::{
    DEFAULT_RADIAL_STEP_DEGREES, FULL_CIRCLE_DEGREES, NumericalAxisKind, normalize_step,
};
use crate::core::types::{AxisValue, Ohlc, RangeExtendDirection, RangeValue, ValueRange};
use crate::error::AxisResult;

/// Raw value the plot origin corresponds to.
const DEFAULT_ORIGIN: f64 = 0.0;
/// Step of a logarithmic axis, in exponents, when no tick count is requested.
const DEFAULT_LOGARITHMIC_STEP: f64 = 1.0;
/// Major step above which a radial axis spans arcs wider than a half circle.
const LARGE_ARC_DEGREES: f64 = 180.0;

/// Running raw sums of one stack, as accumulated by a combine strategy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StackSums {
    pub positive: f64,
    pub negative: f64,
}

/// Result of [`NumericalAxisModel::try_get_stack_sum_value`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackSumValue {
    /// Transformed running sum of the side the point landed on.
    pub transformed_sum: f64,
    /// `true` when the point extends the positive side of the stack.
    pub positive: bool,
}

/// Range, step and plotting engine of a numerical axis.
///
/// One `update` pass computes the actual range, major step and plot origin;
/// `plot` then writes a fresh plot info into every point of the context.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericalAxisModel {
    config: NumericalAxisConfig,
    actual_range: ValueRange<f64>,
    point_min_max: ValueRange<f64>,
    major_step: f64,
    normalized_origin: f64,
    is_stacked100: bool,
    zoom: f64,
    is_updated: bool,
}

impl Default for NumericalAxisModel {
    fn default() -> Self {
        Self::from_valid_config(NumericalAxisConfig::default())
    }
}

impl NumericalAxisModel {
    pub fn new(kind: NumericalAxisKind) -> AxisResult<Self> {
        Self::with_config(NumericalAxisConfig::new(kind))
    }

    pub fn with_config(config: NumericalAxisConfig) -> AxisResult<Self> {
        let config = validate_numerical_axis_config(config)?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: NumericalAxisConfig) -> Self {
        Self {
            config,
            actual_range: ValueRange::EMPTY,
            point_min_max: ValueRange::EMPTY,
            major_step: 0.0,
            normalized_origin: 0.0,
            is_stacked100: false,
            zoom: 1.0,
            is_updated: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> NumericalAxisConfig {
        self.config
    }

    #[must_use]
    pub fn kind(&self) -> NumericalAxisKind {
        self.config.kind
    }

    /// Range in plot (transformed) space used by the last update pass.
    #[must_use]
    pub fn actual_range(&self) -> ValueRange<f64> {
        self.actual_range
    }

    /// Data range before user bounds, extension and rounding were applied.
    #[must_use]
    pub fn point_min_max(&self) -> ValueRange<f64> {
        self.point_min_max
    }

    #[must_use]
    pub fn major_step(&self) -> f64 {
        self.major_step
    }

    #[must_use]
    pub fn normalized_origin(&self) -> f64 {
        self.normalized_origin
    }

    /// Bar baseline as seen by series, flipped on inverse axes.
    #[must_use]
    pub fn plot_origin(&self) -> f64 {
        if self.config.is_inverse {
            1.0 - self.normalized_origin
        } else {
            self.normalized_origin
        }
    }

    #[must_use]
    pub fn is_updated(&self) -> bool {
        self.is_updated
    }

    #[must_use]
    pub fn is_stacked100(&self) -> bool {
        self.is_stacked100
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// `true` for radial axes whose ticks are more than half a circle apart.
    #[must_use]
    pub fn is_large_arc(&self) -> bool {
        self.config.kind.is_radial() && self.major_step > LARGE_ARC_DEGREES
    }

    pub fn set_config(&mut self, config: NumericalAxisConfig) -> AxisResult<()> {
        self.config = validate_numerical_axis_config(config)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_kind(&mut self, kind: NumericalAxisKind) -> AxisResult<()> {
        self.config.kind = validate_axis_kind(kind)?;
        self.invalidate();
        Ok(())
    }

    /// Fixes the minimum; `-inf` restores the automatic minimum.
    pub fn set_minimum(&mut self, minimum: f64) -> AxisResult<()> {
        self.config.minimum = validate_bound(minimum)?;
        self.invalidate();
        Ok(())
    }

    /// Fixes the maximum; `+inf` restores the automatic maximum.
    pub fn set_maximum(&mut self, maximum: f64) -> AxisResult<()> {
        self.config.maximum = validate_bound(maximum)?;
        self.invalidate();
        Ok(())
    }

    /// Fixes the major step; `0` restores the automatic step.
    pub fn set_major_step(&mut self, step: f64) -> AxisResult<()> {
        self.config.major_step = validate_numerical_major_step(step)?;
        self.invalidate();
        Ok(())
    }

    /// Requests an exact tick count; values below 2 restore the default.
    pub fn set_desired_tick_count(&mut self, count: usize) {
        self.config.desired_tick_count = (count >= 2).then_some(count);
        self.invalidate();
    }

    pub fn set_extend_direction(&mut self, direction: RangeExtendDirection) {
        self.config.extend_direction = direction;
        self.invalidate();
    }

    pub fn set_inverse(&mut self, is_inverse: bool) {
        self.config.is_inverse = is_inverse;
        self.invalidate();
    }

    /// Zoom only affects tick density, so the current range stays valid.
    pub fn set_zoom(&mut self, zoom: f64) -> AxisResult<()> {
        self.zoom = validate_zoom(zoom)?;
        Ok(())
    }

    /// Drops all state computed by previous update passes.
    pub fn reset(&mut self) {
        self.actual_range = ValueRange::EMPTY;
        self.point_min_max = ValueRange::EMPTY;
        self.major_step = 0.0;
        self.normalized_origin = 0.0;
        self.is_stacked100 = false;
        self.is_updated = false;
    }

    fn invalidate(&mut self) {
        self.is_updated = false;
    }

    /// Recomputes range, step and plot origin from the context.
    ///
    /// Also writes the plot origin into every series of the context.
    pub fn update<P: AxisDataPoint>(&mut self, context: &mut AxisUpdateContext<P>) {
        self.update_actual_range(context);
        self.update_plot_origin(&mut context.series);
        self.is_stacked100 = context.is_stacked100();
        self.is_updated = true;

        debug!(
            minimum = self.actual_range.minimum,
            maximum = self.actual_range.maximum,
            major_step = self.major_step,
            normalized_origin = self.normalized_origin,
            series_count = context.series.len(),
            "update numerical axis"
        );
    }

    fn update_actual_range<P: AxisDataPoint>(&mut self, context: &AxisUpdateContext<P>) {
        let kind = self.config.kind;
        let mut point_range = self.calculate_range(context);

        if kind.is_radial() {
            self.point_min_max = point_range;
            self.actual_range = ValueRange::new(0.0, FULL_CIRCLE_DEGREES);
            self.major_step = self
                .config
                .major_step
                .unwrap_or(DEFAULT_RADIAL_STEP_DEGREES);
            return;
        }
        if kind == NumericalAxisKind::Polar {
            point_range.minimum = 0.0;
            point_range.maximum = point_range.maximum.max(0.0);
        }
        self.point_min_max = point_range;

        let user_min = self.transformed_user_bound(self.config.minimum, "minimum");
        let user_max = self.transformed_user_bound(self.config.maximum, "maximum");

        let mut range = point_range;
        if let Some(minimum) = user_min {
            range.minimum = minimum;
        }
        if let Some(maximum) = user_max {
            range.maximum = maximum;
        }
        range = range.clamped();

        let mut calculator = RangeCalculator::new(
            range,
            self.config.extend_direction,
            user_min.is_some(),
            user_max.is_some(),
        );
        // 100% stacks always occupy their own fixed bounds.
        if !context.is_stacked100() {
            range = calculator.extend();
        }

        self.major_step = match self.config.major_step {
            // A user step is already in plot space (exponents on log axes).
            Some(step) => step,
            None => self.auto_step(range),
        };

        range = calculator.round_to_major_step(self.major_step);
        if let (Some(count), None) = (self.config.desired_tick_count, self.config.major_step) {
            let (step, rounded) = round_to_user_ticks(range, self.major_step, count);
            self.major_step = step;
            range = rounded;
        }
        self.actual_range = range;
    }

    fn transformed_user_bound(&self, bound: Option<f64>, name: &str) -> Option<f64> {
        let value = bound?;
        let transformed = self.config.kind.transform(value);
        if transformed.is_nan() {
            warn!(bound = name, value, "ignoring user bound with no plot position");
            return None;
        }
        Some(transformed)
    }

    fn auto_step(&self, range: ValueRange<f64>) -> f64 {
        if matches!(self.config.kind, NumericalAxisKind::Logarithmic { .. })
            && self.config.desired_tick_count.is_none()
        {
            return DEFAULT_LOGARITHMIC_STEP;
        }
        let tick_count = self.config.effective_tick_count();
        normalize_step(range.delta() / (tick_count - 1) as f64)
    }

    fn calculate_range<P: AxisDataPoint>(
        &self,
        context: &AxisUpdateContext<P>,
    ) -> ValueRange<f64> {
        if context.is_stacked() {
            let non_combined =
                self.calculate_normal_range(context, context.visible_non_combined());
            let range = ValueRange::new(
                context.minimum_stack_sum.min(non_combined.minimum),
                context.maximum_stack_sum.max(non_combined.maximum),
            );
            trace!(
                minimum = range.minimum,
                maximum = range.maximum,
                "stacked range"
            );
            range
        } else if context.is_stacked100() {
            stacked100_range(context)
        } else {
            let visible = context
                .series
                .iter()
                .enumerate()
                .filter(|(_, series)| series.visible)
                .map(|(index, _)| index);
            self.calculate_normal_range(context, visible)
        }
    }

    fn calculate_normal_range<P: AxisDataPoint>(
        &self,
        context: &AxisUpdateContext<P>,
        series: impl Iterator<Item = usize>,
    ) -> ValueRange<f64> {
        // The maximum starts at zero, so all-negative data keeps zero in range.
        let mut range = ValueRange::new(f64::INFINITY, 0.0);

        for index in series {
            let Some(model) = context.series.get(index) else {
                continue;
            };
            for point in &model.points {
                let Some(value) = point
                    .axis_value()
                    .and_then(|value| self.config.kind.transform_value(value))
                else {
                    continue;
                };
                adjust_range(&mut range, value);
            }
        }

        if range.minimum == f64::INFINITY {
            range.minimum = 0.0;
        } else if range.minimum == range.maximum {
            if range.minimum != 0.0 {
                range.minimum = 0.0;
            } else {
                range.maximum = 1.0;
            }
        }
        range
    }

    fn update_plot_origin<P>(&mut self, series: &mut [SeriesModel<P>]) {
        let range = self.actual_range;
        self.normalized_origin = if DEFAULT_ORIGIN >= range.maximum {
            1.0
        } else if DEFAULT_ORIGIN > range.minimum {
            (DEFAULT_ORIGIN - range.minimum) / range.delta()
        } else {
            0.0
        };

        let plot_origin = self.plot_origin();
        for model in series {
            model.plot_origin = plot_origin;
        }
    }

    /// Writes a fresh plot info into every point of the context.
    ///
    /// Does nothing before the first update pass.
    pub fn plot<P: AxisDataPoint>(&self, context: &mut AxisUpdateContext<P>) {
        if !self.is_updated {
            return;
        }

        let is_stacked = context.is_stacked();
        let is_stacked100 = context.is_stacked100();
        let AxisUpdateContext {
            series,
            combined_series,
            non_combined_series,
            ..
        } = context;

        if is_stacked {
            for combined in combined_series.iter() {
                for group in &combined.groups {
                    self.plot_combine_group(group, series, |_, value| value);
                }
            }
            self.plot_normal(series, non_combined_series);
        } else if is_stacked100 {
            // 100% stacks cannot be mixed with stand-alone series.
            for combined in combined_series.iter() {
                for group in &combined.groups {
                    self.plot_combine_group(group, series, |stack, value| {
                        let magnitude = stack.total_magnitude();
                        if is_zero(magnitude) {
                            f64::NAN
                        } else {
                            value / magnitude
                        }
                    });
                }
            }
        } else {
            let all: Vec<usize> = (0..series.len()).collect();
            self.plot_normal(series, &all);
        }
    }

    fn plot_normal<P: AxisDataPoint>(&self, series: &mut [SeriesModel<P>], indices: &[usize]) {
        for &index in indices {
            let Some(model) = series.get_mut(index) else {
                continue;
            };
            if !model.visible {
                continue;
            }
            for point in &mut model.points {
                let info = point
                    .axis_value()
                    .and_then(|value| self.config.kind.transform_value(value))
                    .and_then(|value| self.plot_info_for(value));
                point.set_plot_info(info);
            }
        }
    }

    fn plot_info_for(&self, transformed: AxisValue) -> Option<PlotInfo> {
        match transformed {
            AxisValue::Scalar(value) => value
                .is_finite()
                .then(|| PlotInfo::Numerical(self.scalar_plot_info(value))),
            AxisValue::Ohlc(ohlc) => [ohlc.open, ohlc.high, ohlc.low, ohlc.close]
                .iter()
                .all(|component| component.is_finite())
                .then(|| PlotInfo::Ohlc(self.ohlc_plot_info(ohlc))),
            AxisValue::Range(range) => (range.low.is_finite() && range.high.is_finite())
                .then(|| PlotInfo::Range(self.range_plot_info(range))),
            AxisValue::DateTime(_) => None,
        }
    }

    fn normalize(&self, value: f64) -> f64 {
        let delta = self.actual_range.delta();
        if delta == 0.0 {
            0.0
        } else {
            (value - self.actual_range.minimum) / delta
        }
    }

    fn scalar_plot_info(&self, value: f64) -> NumericalPlotInfo {
        self.oriented_plot_info(self.normalized_origin, self.normalize(value), value)
    }

    fn oriented_plot_info(
        &self,
        plot_origin_offset: f64,
        normalized_value: f64,
        snap_value: f64,
    ) -> NumericalPlotInfo {
        let snap_tick_index = self.snap_tick_index(snap_value);
        if self.config.is_inverse {
            NumericalPlotInfo {
                plot_origin_offset: 1.0 - plot_origin_offset,
                normalized_value: 1.0 - normalized_value,
                normalized_origin: 1.0 - self.normalized_origin,
                snap_tick_index,
            }
        } else {
            NumericalPlotInfo {
                plot_origin_offset,
                normalized_value,
                normalized_origin: self.normalized_origin,
                snap_tick_index,
            }
        }
    }

    fn ohlc_plot_info(&self, value: Ohlc) -> OhlcPlotInfo {
        let mut info = OhlcPlotInfo::new(
            self.normalized_origin,
            self.normalize(value.high),
            self.normalize(value.low),
            self.normalize(value.open),
            self.normalize(value.close),
        );
        info.snap_tick_index = self.snap_tick_index(value.high);
        info.snap_base_tick_index = self.snap_tick_index(value.low);
        info.snap_open_tick_index = self.snap_tick_index(value.open);
        info.snap_close_tick_index = self.snap_tick_index(value.close);
        info
    }

    fn range_plot_info(&self, value: RangeValue) -> RangePlotInfo {
        let normalized_high = self.normalize(value.high);
        let normalized_low = self.normalize(value.low).min(normalized_high);
        RangePlotInfo {
            plot_origin_offset: self.normalized_origin,
            normalized_high,
            normalized_low,
            normalized_origin: self.normalized_origin,
            snap_tick_index: self.snap_tick_index(value.high),
            snap_base_tick_index: self.snap_tick_index(value.low),
        }
    }

    fn plot_combine_group<P: AxisDataPoint>(
        &self,
        group: &CombineGroup,
        series: &mut [SeriesModel<P>],
        process: impl Fn(&CombineStack, f64) -> f64,
    ) {
        for stack in &group.stacks {
            let mut sums = StackSums::default();
            let mut positive_position = self.normalized_origin;
            let mut negative_position = self.normalized_origin;

            for at in &stack.points {
                let Some(point) = series
                    .get_mut(at.series)
                    .and_then(|model| model.points.get_mut(at.point))
                else {
                    continue;
                };
                let Some(value) = point
                    .axis_value()
                    .and_then(AxisValue::as_scalar)
                    .filter(|value| value.is_finite())
                else {
                    point.set_plot_info(None);
                    continue;
                };

                let positive = value >= DEFAULT_ORIGIN;
                let (running_sum, plot_origin_offset) = if positive {
                    (sums.positive, positive_position)
                } else {
                    (sums.negative, negative_position)
                };
                let running_sum = running_sum + value;

                let stack_sum = self.config.kind.transform(process(stack, running_sum));
                if !stack_sum.is_finite() {
                    point.set_plot_info(None);
                    continue;
                }
                let normalized_value = self.normalize(stack_sum);
                point.set_plot_info(Some(PlotInfo::Numerical(self.oriented_plot_info(
                    plot_origin_offset,
                    normalized_value,
                    stack_sum,
                ))));

                if positive {
                    sums.positive = running_sum;
                    positive_position = normalized_value;
                } else {
                    sums.negative = running_sum;
                    negative_position = normalized_value;
                }
            }
        }
    }

    /// Plot info for an arbitrary raw value against the current state.
    ///
    /// `None` for non-finite input or values the transform cannot position.
    #[must_use]
    pub fn create_plot_info(&self, value: f64) -> Option<PlotInfo> {
        if !value.is_finite() {
            return None;
        }
        let transformed = self.config.kind.transform(value);
        if transformed.is_nan() {
            return None;
        }
        Some(PlotInfo::Numerical(self.scalar_plot_info(transformed)))
    }

    /// Adds a point to the running sums of its stack and returns the new
    /// transformed sum of the side it landed on.
    ///
    /// Empty points and range values count as the origin. Returns `None` when
    /// the point's value has no plot position; the sums are left untouched.
    pub fn try_get_stack_sum_value(
        &self,
        value: Option<AxisValue>,
        sums: &mut StackSums,
    ) -> Option<StackSumValue> {
        let raw = value
            .and_then(AxisValue::as_scalar)
            .unwrap_or(DEFAULT_ORIGIN);
        let transformed = self.config.kind.transform(raw);
        if transformed.is_nan() {
            return None;
        }

        let positive = transformed >= DEFAULT_ORIGIN;
        let side = if positive {
            &mut sums.positive
        } else {
            &mut sums.negative
        };
        *side += raw;
        Some(StackSumValue {
            transformed_sum: self.config.kind.transform(*side),
            positive,
        })
    }

    /// Tick index `value` (in plot space) sits exactly on, if any.
    #[must_use]
    pub fn snap_tick_index(&self, value: f64) -> Option<usize> {
        let step = self.major_step;
        if !step.is_finite() || step <= 0.0 {
            return None;
        }
        if value.is_nan() || value < self.actual_range.minimum {
            return None;
        }
        if !is_negligible_remainder(value % step, step) {
            return None;
        }

        let ratio = (value - self.actual_range.minimum) / step;
        let nearest = ratio.round();
        let index = if are_close(ratio, nearest) {
            nearest
        } else {
            ratio.floor()
        };
        Some(index as usize)
    }

    /// Maps a relative position along the axis back to a raw value.
    ///
    /// `Ok(None)` until the first update pass has completed.
    pub fn convert_relative_to_data(&self, relative_position: f64) -> AxisResult<Option<f64>> {
        let relative_position = validate_relative_position(relative_position)?;
        if !self.is_updated {
            return Ok(None);
        }
        let relative_position = if self.config.is_inverse {
            1.0 - relative_position
        } else {
            relative_position
        };
        let value = relative_position * self.actual_range.delta() + self.actual_range.minimum;
        Ok(Some(self.config.kind.inverse_transform(value)))
    }

    /// Major ticks for the normalized `visible` window.
    #[must_use]
    pub fn ticks(&self, visible: ValueRange<f64>) -> NumericalTicks {
        let inverse = self.config.is_inverse;
        if !self.is_updated {
            return NumericalTicks::Linear(LinearTickIter::new(
                self.config.kind,
                ValueRange::EMPTY,
                0.0,
                visible,
                inverse,
            ));
        }
        if self.config.kind.is_radial() {
            let step = self.major_step / self.zoom;
            return NumericalTicks::Radial(RadialTickIter::new(step, visible, inverse));
        }

        let step = if self.zoom == 1.0 {
            self.major_step
        } else {
            normalize_step(self.major_step / self.zoom)
        };
        NumericalTicks::Linear(LinearTickIter::new(
            self.config.kind,
            self.actual_range,
            step,
            visible,
            inverse,
        ))
    }

    #[must_use]
    pub fn label_content(&self, tick: &AxisTick) -> LabelContent {
        LabelContent::Number(tick.value)
    }
}

fn adjust_range(range: &mut ValueRange<f64>, value: AxisValue) {
    let (low, high) = match value {
        AxisValue::Scalar(value) => (value, value),
        AxisValue::Ohlc(ohlc) => (ohlc.low, ohlc.high),
        AxisValue::Range(range) => (range.low, range.high),
        AxisValue::DateTime(_) => return,
    };
    // Infinite or unavailable components have no place on the axis.
    if high.is_finite() && high > range.maximum {
        range.maximum = high;
    }
    if low.is_finite() && low < range.minimum {
        range.minimum = low;
    }
}

/// Bounds of 100%-stacked data, derived from the final sums of every stack.
fn stacked100_range<P>(context: &AxisUpdateContext<P>) -> ValueRange<f64> {
    let mut range = ValueRange::new(f64::INFINITY, f64::NEG_INFINITY);

    let stacks = context
        .combined_series
        .iter()
        .flat_map(|combined| &combined.groups)
        .flat_map(|group| &group.stacks);
    for stack in stacks {
        let (positive, negative) = (stack.positive_sum, stack.negative_sum);
        if positive == 0.0 && negative == 0.0 {
            continue;
        }

        if positive == 0.0 {
            range.maximum = range.maximum.max(0.0);
            range.minimum = range.minimum.min(-1.0);
        } else if negative == 0.0 {
            range.maximum = range.maximum.max(1.0);
            range.minimum = range.minimum.min(0.0);
        } else {
            let magnitude = stack.total_magnitude();
            range.maximum = range.maximum.max(positive / magnitude);
            range.minimum = range.minimum.min(negative / magnitude);
        }

        if range.minimum == -1.0 && range.maximum == 1.0 {
            break;
        }
    }

    if range.minimum == f64::INFINITY {
        range.minimum = 0.0;
    }
    if range.maximum == f64::NEG_INFINITY {
        range.maximum = 0.0;
    }
    trace!(
        minimum = range.minimum,
        maximum = range.maximum,
        "stacked100 range"
    );
    range
}

/// Re-derives step and maximum so the range holds exactly `tick_count` ticks,
/// keeping the decimal precision of the current step.
fn round_to_user_ticks(
    range: ValueRange<f64>,
    step: f64,
    tick_count: usize,
) -> (f64, ValueRange<f64>) {
    let mut fractional_digits = 0;
    let mut scaled = step;
    while scaled > 0.0 && scaled < 1.0 {
        fractional_digits += 1;
        scaled *= 10.0;
    }

    let multiplier = 10_f64.powi(fractional_digits);
    let intervals = (tick_count - 1) as f64;
    let new_step = (range.delta() / intervals * multiplier).ceil() / multiplier;
    let maximum = intervals * new_step + range.minimum;
    (new_step, ValueRange::new(range.minimum, maximum))
}

#[cfg(test)]
mod tests {
    use super::{NumericalAxisModel, StackSums};
    use crate::core::context::{AxisUpdateContext, ChartPoint, SeriesModel};
    use crate::core::plot_info::PlotInfo;
    use crate::core::transform::NumericalAxisKind;
    use crate::core::types::{AxisValue, Ohlc, RangeValue, ValueRange};

    fn context_of(values: &[f64]) -> AxisUpdateContext<ChartPoint> {
        let points = values.iter().map(|&value| ChartPoint::new(value)).collect();
        AxisUpdateContext::new(vec![SeriesModel::new(points)])
    }

    fn updated(
        kind: NumericalAxisKind,
        values: &[f64],
    ) -> (NumericalAxisModel, AxisUpdateContext<ChartPoint>) {
        let mut axis = NumericalAxisModel::new(kind).expect("valid kind");
        let mut context = context_of(values);
        axis.update(&mut context);
        axis.plot(&mut context);
        (axis, context)
    }

    #[test]
    fn auto_range_extends_and_rounds_to_nice_step() {
        let (axis, _) = updated(NumericalAxisKind::Linear, &[1.0, 2.0, 3.0, 10.0]);
        assert_eq!(axis.major_step(), 2.0);
        assert_eq!(axis.actual_range().minimum, 0.0);
        assert!((axis.actual_range().maximum - 12.0).abs() <= 1e-9);
        assert_eq!(axis.point_min_max(), ValueRange::new(1.0, 10.0));
    }

    #[test]
    fn single_value_and_all_zero_data_get_unit_span() {
        let (axis, _) = updated(NumericalAxisKind::Linear, &[0.0, 0.0]);
        assert_eq!(axis.point_min_max(), ValueRange::new(0.0, 1.0));

        let (axis, _) = updated(NumericalAxisKind::Linear, &[5.0]);
        assert_eq!(axis.point_min_max(), ValueRange::new(0.0, 5.0));
    }

    #[test]
    fn empty_axis_still_produces_a_valid_range() {
        let (axis, _) = updated(NumericalAxisKind::Linear, &[]);
        assert_eq!(axis.point_min_max(), ValueRange::new(0.0, 0.0));
        assert_eq!(axis.actual_range(), ValueRange::new(0.0, 0.0));
        assert_eq!(axis.ticks(ValueRange::new(0.0, 1.0)).count(), 0);
    }

    #[test]
    fn user_tick_count_divides_range_evenly() {
        let mut axis = NumericalAxisModel::default();
        axis.set_desired_tick_count(5);
        let mut context = context_of(&[0.0, 10.0]);
        axis.update(&mut context);
        assert_eq!(axis.major_step(), 4.0);
        assert_eq!(axis.actual_range(), ValueRange::new(0.0, 16.0));
        assert_eq!(axis.ticks(ValueRange::new(0.0, 1.0)).count(), 5);
    }

    #[test]
    fn user_bounds_are_kept_exactly() {
        let mut axis = NumericalAxisModel::default();
        axis.set_minimum(-3.0).expect("finite minimum");
        axis.set_maximum(7.0).expect("finite maximum");
        let mut context = context_of(&[1.0, 2.0]);
        axis.update(&mut context);
        assert_eq!(axis.actual_range(), ValueRange::new(-3.0, 7.0));
        assert!((axis.normalized_origin() - 0.3).abs() <= 1e-12);
    }

    #[test]
    fn logarithm_of_zero_gets_no_plot_info() {
        let (axis, context) =
            updated(NumericalAxisKind::Logarithmic { base: 10.0 }, &[0.0, 10.0, 1_000.0]);
        assert_eq!(axis.major_step(), 1.0);
        let points = &context.series[0].points;
        assert!(points[0].plot_info.is_none());
        assert!(points[1].plot_info.is_some());
        assert!(axis.create_plot_info(-1.0).is_none());
    }

    #[test]
    fn radial_axis_uses_full_circle() {
        let (axis, _) = updated(NumericalAxisKind::Radial, &[15.0, 200.0]);
        assert_eq!(axis.actual_range(), ValueRange::new(0.0, 360.0));
        assert_eq!(axis.major_step(), 30.0);
        assert!(!axis.is_large_arc());
        assert_eq!(axis.ticks(ValueRange::new(0.0, 1.0)).count(), 12);
    }

    #[test]
    fn polar_axis_pins_minimum_to_zero() {
        let (axis, _) = updated(NumericalAxisKind::Polar, &[-8.0, 4.0]);
        assert_eq!(axis.actual_range().minimum, 0.0);
        assert!(axis.actual_range().maximum >= 8.0);
    }

    #[test]
    fn inverse_axis_flips_scalar_positions() {
        let mut axis = NumericalAxisModel::default();
        axis.set_inverse(true);
        let mut context = context_of(&[0.0, 10.0]);
        axis.update(&mut context);
        axis.plot(&mut context);
        let info = context.series[0].points[0]
            .plot_info
            .and_then(|info| info.as_numerical().copied())
            .expect("numerical plot info");
        assert_eq!(info.normalized_value, 1.0);
        assert_eq!(info.normalized_origin, 1.0);
        assert_eq!(context.series[0].plot_origin, 1.0);
    }

    #[test]
    fn ohlc_and_range_values_use_their_extremes() {
        let points = vec![
            ChartPoint::new(Ohlc::new(4.0, 8.0, 2.0, 6.0)),
            ChartPoint::new(RangeValue::new(5.0, 3.0)),
            ChartPoint::empty(),
        ];
        let mut context = AxisUpdateContext::new(vec![SeriesModel::new(points)]);
        let mut axis = NumericalAxisModel::default();
        axis.update(&mut context);
        axis.plot(&mut context);

        let ohlc = context.series[0].points[0]
            .plot_info
            .and_then(|info| info.as_ohlc().copied())
            .expect("ohlc plot info");
        assert!(ohlc.normalized_high > ohlc.normalized_low);
        assert_eq!(ohlc.snap_tick_index, Some(4));

        let range = context.series[0].points[1]
            .plot_info
            .and_then(|info| info.as_range().copied())
            .expect("range plot info");
        assert_eq!(range.normalized_low, range.normalized_high);
        assert!(context.series[0].points[2].plot_info.is_none());
    }

    #[test]
    fn snap_index_requires_exact_multiple() {
        let (axis, _) = updated(NumericalAxisKind::Linear, &[1.0, 2.0, 3.0, 10.0]);
        assert_eq!(axis.snap_tick_index(6.0), Some(3));
        assert_eq!(axis.snap_tick_index(5.0), None);
        assert_eq!(axis.snap_tick_index(-2.0), None);
    }

    #[test]
    fn relative_positions_map_back_to_data() {
        let axis = NumericalAxisModel::default();
        assert_eq!(axis.convert_relative_to_data(0.5), Ok(None));
        assert!(axis.convert_relative_to_data(f64::NAN).is_err());

        let (axis, _) = updated(NumericalAxisKind::Logarithmic { base: 10.0 }, &[1.0, 100.0]);
        let value = axis
            .convert_relative_to_data(1.0)
            .expect("finite position")
            .expect("updated axis");
        assert!((value - 10_f64.powf(axis.actual_range().maximum)).abs() <= 1e-6);
    }

    #[test]
    fn stack_sum_helper_tracks_sides_separately() {
        let axis = NumericalAxisModel::default();
        let mut sums = StackSums::default();
        let first = axis
            .try_get_stack_sum_value(Some(AxisValue::Scalar(3.0)), &mut sums)
            .expect("available");
        let second = axis
            .try_get_stack_sum_value(Some(AxisValue::Scalar(-2.0)), &mut sums)
            .expect("available");
        let third = axis
            .try_get_stack_sum_value(None, &mut sums)
            .expect("empty counts as origin");
        assert!(first.positive && !second.positive && third.positive);
        assert_eq!(first.transformed_sum, 3.0);
        assert_eq!(second.transformed_sum, -2.0);
        assert_eq!(sums, StackSums { positive: 3.0, negative: -2.0 });

        let log_axis = NumericalAxisModel::new(NumericalAxisKind::Logarithmic { base: 10.0 })
            .expect("valid base");
        assert!(log_axis.try_get_stack_sum_value(None, &mut sums).is_none());
    }

    #[test]
    fn create_plot_info_matches_plotted_points() {
        let (axis, context) = updated(NumericalAxisKind::Linear, &[2.0, 9.0]);
        let created = axis.create_plot_info(9.0).expect("finite value");
        assert_eq!(Some(created), context.series[0].points[1].plot_info);
        assert!(matches!(created, PlotInfo::Numerical(_)));
        assert!(axis.create_plot_info(f64::INFINITY).is_none());
    }

    #[test]
    fn setters_reject_invalid_values_and_invalidate() {
        let (mut axis, _) = updated(NumericalAxisKind::Linear, &[1.0]);
        assert!(axis.is_updated());
        assert!(axis.set_major_step(-1.0).is_err());
        assert!(axis.set_zoom(0.0).is_err());
        assert!(axis.set_kind(NumericalAxisKind::Logarithmic { base: 0.0 }).is_err());
        axis.set_major_step(0.5).expect("positive step");
        assert!(!axis.is_updated());
        axis.reset();
        assert_eq!(axis.actual_range(), ValueRange::new(0.0, 0.0));
    }
}
