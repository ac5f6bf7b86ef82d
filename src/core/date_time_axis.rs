use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use tracing::{debug, trace, warn};

use crate::api::DateTimeAxisConfig;
use crate::api::validation::{
    validate_date_time_axis_config, validate_date_time_major_step, validate_gap_length,
    validate_maximum_ticks, validate_relative_position, validate_zoom,
};
use crate::core::context::{AxisDataPoint, AxisUpdateContext, PointRef, SeriesModel};
use crate::core::date_time_units::{TickUnits, TimeInterval, UnitRequest, select_tick_units};
use crate::core::plot_info::{CategoricalPlotInfo, PlotInfo};
use crate::core::primitives::{MILLIS_PER_DAY, are_close, datetime_to_ticks, ticks_to_datetime};
use crate::core::tick::{AxisTick, LabelContent};
use crate::core::types::{AxisPlotMode, DateTimePlotStretchMode, ValueRange};
use crate::error::{AxisError, AxisResult};

/// Contiguous bucket of the timeline shared by chronologically adjacent points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSlot {
    pub start_ticks: f64,
    /// Slot width in ticks (milliseconds).
    pub ticks: f64,
    pub point_count: usize,
}

/// A collected point: its timestamp, where it lives, and the slot it got.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateTimePoint {
    pub date: DateTime<Utc>,
    pub ticks: f64,
    pub point: PointRef,
    /// Index into the slot arena of the current update pass.
    pub slot: Option<usize>,
}

/// Plot domain in ticks. `extend` is the extra interval appended after the
/// last timestamp by the between-ticks and padded placements.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DateTimePlotRange {
    pub minimum: f64,
    pub maximum: f64,
    pub extend: f64,
}

impl DateTimePlotRange {
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.maximum - self.minimum
    }
}

/// Engine of a continuous date-time axis.
///
/// Each update collects all dated points, sorts them, picks a tick unit and
/// distributes the points into time slots. Slots live in an arena that is
/// rebuilt every pass; points refer to them by index.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeContinuousAxisModel {
    config: DateTimeAxisConfig,
    values: Vec<DateTimePoint>,
    time_slots: Vec<TimeSlot>,
    actual_range: Option<ValueRange<f64>>,
    actual_plot_mode: AxisPlotMode,
    min_delta: f64,
    units: TickUnits,
    plot_range: Option<DateTimePlotRange>,
    visible_ticks: Option<ValueRange<f64>>,
    zoom: f64,
    is_updated: bool,
    is_plot_valid: bool,
}

impl Default for DateTimeContinuousAxisModel {
    fn default() -> Self {
        Self::from_valid_config(DateTimeAxisConfig::default())
    }
}

impl DateTimeContinuousAxisModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DateTimeAxisConfig) -> AxisResult<Self> {
        let config = validate_date_time_axis_config(config)?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: DateTimeAxisConfig) -> Self {
        Self {
            config,
            values: Vec::new(),
            time_slots: Vec::new(),
            actual_range: None,
            actual_plot_mode: AxisPlotMode::BetweenTicks,
            min_delta: 0.0,
            units: TickUnits::default(),
            plot_range: None,
            visible_ticks: None,
            zoom: 1.0,
            is_updated: false,
            is_plot_valid: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> DateTimeAxisConfig {
        self.config
    }

    /// Points collected by the last update, in chronological order.
    #[must_use]
    pub fn values(&self) -> &[DateTimePoint] {
        &self.values
    }

    #[must_use]
    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    /// Slot assigned to the `index`-th collected value.
    pub fn time_slot(&self, index: usize) -> AxisResult<TimeSlot> {
        self.values
            .get(index)
            .and_then(|value| value.slot)
            .and_then(|slot| self.time_slots.get(slot))
            .copied()
            .ok_or(AxisError::MissingTimeSlot { index })
    }

    /// Smallest gap between two distinct timestamps, in milliseconds.
    #[must_use]
    pub fn min_delta(&self) -> f64 {
        self.min_delta
    }

    #[must_use]
    pub fn actual_range(&self) -> Option<ValueRange<DateTime<Utc>>> {
        let range = self.actual_range?;
        Some(ValueRange::new(
            ticks_to_datetime(range.minimum)?,
            ticks_to_datetime(range.maximum)?,
        ))
    }

    #[must_use]
    pub fn actual_plot_mode(&self) -> AxisPlotMode {
        self.actual_plot_mode
    }

    #[must_use]
    pub fn tick_units(&self) -> TickUnits {
        self.units
    }

    /// Tick interval in milliseconds.
    #[must_use]
    pub fn major_step(&self) -> f64 {
        self.units.major_step
    }

    #[must_use]
    pub fn tick_zoom_factor(&self) -> f64 {
        self.units.tick_zoom_factor
    }

    #[must_use]
    pub fn plot_range(&self) -> Option<DateTimePlotRange> {
        self.plot_range
    }

    /// Window of tick values kept between tick requests.
    #[must_use]
    pub fn visible_ticks(&self) -> Option<ValueRange<f64>> {
        self.visible_ticks
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn is_updated(&self) -> bool {
        self.is_updated
    }

    /// `false` after a zoom change moved point positions; plot again.
    #[must_use]
    pub fn is_plot_valid(&self) -> bool {
        self.is_plot_valid
    }

    #[must_use]
    pub fn can_plot(&self) -> bool {
        !self.values.is_empty() && self.min_delta > 0.0
    }

    pub fn set_config(&mut self, config: DateTimeAxisConfig) -> AxisResult<()> {
        self.config = validate_date_time_axis_config(config)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_minimum(&mut self, minimum: Option<DateTime<Utc>>) {
        self.config.minimum = minimum;
        self.invalidate();
    }

    pub fn set_maximum(&mut self, maximum: Option<DateTime<Utc>>) {
        self.config.maximum = maximum;
        self.invalidate();
    }

    /// Fixes the step, counted in the configured unit; `±inf` clears it.
    pub fn set_major_step(&mut self, step: f64) -> AxisResult<()> {
        self.config.major_step = validate_date_time_major_step(step)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_major_step_unit(&mut self, unit: TimeInterval) {
        self.config.major_step_unit = unit;
        self.invalidate();
    }

    pub fn set_gap_length(&mut self, gap_length: f64) -> AxisResult<()> {
        self.config.gap_length = validate_gap_length(gap_length)?;
        self.invalidate();
        Ok(())
    }

    /// `None` selects the placement from the series hints.
    pub fn set_plot_mode(&mut self, mode: Option<AxisPlotMode>) {
        self.config.plot_mode = mode;
        self.invalidate();
    }

    pub fn set_plot_stretch_mode(&mut self, mode: DateTimePlotStretchMode) {
        self.config.plot_stretch_mode = mode;
        self.invalidate();
    }

    pub fn set_maximum_ticks(&mut self, maximum_ticks: Option<usize>) -> AxisResult<()> {
        self.config.maximum_ticks = maximum_ticks.map(validate_maximum_ticks).transpose()?;
        self.invalidate();
        Ok(())
    }

    pub fn set_inverse(&mut self, is_inverse: bool) {
        self.config.is_inverse = is_inverse;
        self.invalidate();
    }

    /// Applies a new zoom; ticks get denser without re-bucketing points.
    pub fn set_zoom(&mut self, zoom: f64) -> AxisResult<()> {
        self.zoom = validate_zoom(zoom)?;
        if !self.can_plot() {
            return Ok(());
        }

        let old_factor = self.units.tick_zoom_factor;
        self.update_units();
        if old_factor != self.units.tick_zoom_factor {
            self.visible_ticks = None;
            if self.actual_plot_mode == AxisPlotMode::BetweenTicks {
                self.update_plot_range();
                self.is_plot_valid = false;
            }
            trace!(
                old_factor,
                new_factor = self.units.tick_zoom_factor,
                "date-time tick zoom factor changed"
            );
        }
        Ok(())
    }

    /// Clears collected values, slots and the visible tick window.
    pub fn reset(&mut self) {
        self.values.clear();
        self.time_slots.clear();
        self.actual_range = None;
        self.min_delta = 0.0;
        self.units = TickUnits::default();
        self.plot_range = None;
        self.visible_ticks = None;
        self.is_updated = false;
        self.is_plot_valid = false;
    }

    fn invalidate(&mut self) {
        self.is_updated = false;
        self.is_plot_valid = false;
    }

    pub fn update<P: AxisDataPoint>(&mut self, context: &AxisUpdateContext<P>) {
        self.time_slots.clear();
        self.actual_range = None;
        self.plot_range = None;
        self.visible_ticks = None;
        self.min_delta = 0.0;
        self.units = TickUnits::default();
        self.is_plot_valid = false;
        self.is_updated = true;

        self.build_values(context);
        if self.values.is_empty() {
            debug!("update date-time axis without values");
            return;
        }

        self.actual_plot_mode = self
            .config
            .plot_mode
            .unwrap_or_else(|| select_plot_mode(&context.series));
        self.update_actual_range();
        self.min_delta = find_min_delta(&self.values);
        if !self.can_plot() {
            return;
        }

        self.update_units();
        self.update_plot_range();
        self.build_time_slots();

        debug!(
            value_count = self.values.len(),
            slot_count = self.time_slots.len(),
            min_delta = self.min_delta,
            major_step = self.units.major_step,
            plot_mode = ?self.actual_plot_mode,
            "update date-time axis"
        );
    }

    fn build_values<P: AxisDataPoint>(&mut self, context: &AxisUpdateContext<P>) {
        self.values.clear();
        for (series_index, series) in context.series.iter().enumerate() {
            if !series.visible {
                continue;
            }
            for (point_index, point) in series.points.iter().enumerate() {
                let Some(date) = point.axis_value().and_then(|value| value.as_date_time()) else {
                    continue;
                };
                self.values.push(DateTimePoint {
                    date,
                    ticks: datetime_to_ticks(date),
                    point: PointRef::new(series_index, point_index),
                    slot: None,
                });
            }
        }
        // Stable, so equal timestamps keep series order.
        self.values.sort_by_key(|value| OrderedFloat(value.ticks));
    }

    fn update_actual_range(&mut self) {
        let (Some(first), Some(last)) = (self.values.first(), self.values.last()) else {
            return;
        };
        let mut range = ValueRange::new(first.ticks, last.ticks);
        if let Some(minimum) = self.config.minimum {
            range.minimum = datetime_to_ticks(minimum);
        }
        if let Some(maximum) = self.config.maximum {
            range.maximum = datetime_to_ticks(maximum);
        }
        self.actual_range = Some(range.clamped());
    }

    fn update_units(&mut self) {
        let range = self.actual_range.map_or(0.0, ValueRange::delta);
        self.units = select_tick_units(UnitRequest {
            range,
            min_delta: self.min_delta,
            user_step: self.config.major_step,
            step_unit: self.config.major_step_unit,
            maximum_ticks: self.config.effective_maximum_ticks(),
            maximum_ticks_is_user: self.config.maximum_ticks.is_some(),
            zoom: self.zoom,
        });
    }

    fn update_plot_range(&mut self) {
        let Some(range) = self.actual_range else {
            return;
        };
        let zoom_factor = self.units.tick_zoom_factor;
        let mut plot = DateTimePlotRange {
            minimum: range.minimum,
            maximum: range.maximum,
            extend: 0.0,
        };

        match self.actual_plot_mode {
            AxisPlotMode::BetweenTicks | AxisPlotMode::OnTicksPadded => {
                let next = self.units.next_ticks(plot.maximum, zoom_factor);
                plot.extend = next - plot.maximum;
                plot.maximum += plot.extend;
            }
            AxisPlotMode::OnTicks => {
                if plot.minimum == plot.maximum {
                    plot.maximum = self.units.next_ticks(plot.minimum, zoom_factor);
                }
            }
        }
        self.plot_range = Some(plot);
    }

    fn build_time_slots(&mut self) {
        self.time_slots.clear();
        let (Some(first), Some(last)) = (self.values.first(), self.values.last()) else {
            return;
        };
        let (start, end) = (first.ticks, last.ticks);

        if start == end {
            self.build_single_time_slot();
            return;
        }

        let mut index = 0;
        let mut current = start;
        while current <= end {
            let next = self.units.next_ticks(current, 1.0);
            if next <= current {
                warn!(current, next, "date-time tick step does not advance");
                break;
            }

            if self.values.get(index).is_some_and(|value| value.ticks < next) {
                let slot_index = self.time_slots.len();
                let mut slot = TimeSlot {
                    start_ticks: current,
                    ticks: next - current,
                    point_count: 0,
                };
                while let Some(value) = self.values.get_mut(index) {
                    if value.ticks >= next {
                        break;
                    }
                    value.slot = Some(slot_index);
                    slot.point_count += 1;
                    index += 1;
                }
                self.time_slots.push(slot);
            }
            current = next;
        }

        trace!(slot_count = self.time_slots.len(), "build date-time slots");
    }

    fn build_single_time_slot(&mut self) {
        let Some(range) = self.actual_range else {
            return;
        };
        let start = range.minimum;
        let slot = TimeSlot {
            start_ticks: start,
            ticks: self.units.next_ticks(start, 1.0) - start,
            point_count: self.values.len(),
        };
        self.time_slots.push(slot);
        for value in &mut self.values {
            value.slot = Some(0);
        }
    }

    /// Writes a categorical plot info into every collected point.
    ///
    /// Points of visible series that carry no date lose their previous plot info.
    pub fn plot<P: AxisDataPoint>(&mut self, context: &mut AxisUpdateContext<P>) {
        clear_undated_points(context);
        if !self.can_plot() {
            return;
        }
        let Some(plot) = self.plot_range else {
            return;
        };
        let delta = plot.delta();
        if delta == 0.0 {
            warn!("skipping date-time plot pass over an empty domain");
            return;
        }

        let half_extend = plot.extend / 2.0;
        let gap_factor = 1.0 - self.config.gap_length;
        let uniform = self.config.plot_stretch_mode == DateTimePlotStretchMode::Uniform;

        for (index, value) in self.values.iter().enumerate() {
            let slot = match self.time_slot(index) {
                Ok(slot) => slot,
                Err(err) => {
                    debug_assert!(false, "{err}");
                    warn!(error = %err, "skipping date-time point");
                    continue;
                }
            };

            let position = (value.ticks - plot.minimum + half_extend) / delta;
            let slot_length = slot.ticks / delta;
            let slot_position = position - slot_length / 2.0;
            let length = if uniform {
                let point_count = context
                    .series
                    .get(value.point.series)
                    .map_or(1, |series| series.points.len().max(1));
                gap_factor / point_count as f64
            } else {
                gap_factor * slot_length
            };

            let info = CategoricalPlotInfo {
                category_key: value.date,
                slot_position,
                position: self.oriented(position),
                length,
            };
            if let Some(point) = context.point_mut(value.point) {
                point.set_plot_info(Some(PlotInfo::Categorical(info)));
            }
        }
        self.is_plot_valid = true;
    }

    fn oriented(&self, position: f64) -> f64 {
        if self.config.is_inverse {
            1.0 - position
        } else {
            position
        }
    }

    /// Position of an arbitrary date against the current plot domain.
    #[must_use]
    pub fn create_plot_info(&self, date: DateTime<Utc>) -> Option<PlotInfo> {
        let plot = self.plot_range?;
        let delta = plot.delta();
        if delta == 0.0 {
            return None;
        }
        let position = (datetime_to_ticks(date) - plot.minimum + plot.extend / 2.0) / delta;
        Some(PlotInfo::Categorical(CategoricalPlotInfo {
            category_key: date,
            slot_position: position,
            position: self.oriented(position),
            length: 0.0,
        }))
    }

    /// Maps a relative position along the axis back to the nearest whole tick.
    ///
    /// `Ok(None)` until an update pass has produced a plot domain.
    pub fn convert_relative_to_data(
        &self,
        relative_position: f64,
    ) -> AxisResult<Option<DateTime<Utc>>> {
        let relative_position = validate_relative_position(relative_position)?;
        if !self.is_updated {
            return Ok(None);
        }
        let Some(plot) = self.plot_range else {
            return Ok(None);
        };
        let relative_position = self.oriented(relative_position);
        let ticks = relative_position * plot.delta() + plot.minimum - plot.extend / 2.0;
        Ok(ticks_to_datetime(ticks))
    }

    /// Major ticks for the normalized `visible` window.
    ///
    /// Moves the persistent visible tick window so it brackets `visible`.
    pub fn ticks(&mut self, visible: ValueRange<f64>) -> DateTimeTickIter {
        let Some(plot) = self.plot_range else {
            return DateTimeTickIter::empty();
        };
        if !self.can_plot() || plot.minimum >= plot.maximum {
            return DateTimeTickIter::empty();
        }

        let window = self.update_visible_ticks(visible, plot);
        let delta = plot.delta();
        let zoom_factor = self.units.tick_zoom_factor;

        let start = ((window.minimum - plot.minimum) / delta).max(0.0);
        let end = ((window.maximum - plot.minimum) / delta).min(1.0);
        let mut padded = start;
        if self.actual_plot_mode == AxisPlotMode::OnTicksPadded {
            let next = self.units.next_ticks(plot.minimum, zoom_factor);
            padded += (next - plot.minimum) / delta / 2.0;
        }

        DateTimeTickIter {
            units: self.units,
            zoom_factor,
            minimum: plot.minimum,
            delta,
            current: start,
            padded,
            end,
            virtual_index: (start * self.values.len() as f64) as usize,
            inverse: self.config.is_inverse,
            done: false,
        }
    }

    fn update_visible_ticks(
        &mut self,
        visible: ValueRange<f64>,
        plot: DateTimePlotRange,
    ) -> ValueRange<f64> {
        let delta = plot.delta();
        let visible_start = plot.minimum + visible.minimum * delta;
        let visible_end = plot.minimum + visible.maximum * delta;
        let zoom_factor = self.units.tick_zoom_factor;
        let units = self.units;
        let next = |ticks: f64| units.next_ticks(ticks, zoom_factor);
        let previous = |ticks: f64| units.previous_ticks(ticks, zoom_factor);

        let mut window = self
            .visible_ticks
            .unwrap_or(ValueRange::new(plot.minimum, plot.maximum));

        window.minimum = walk_down_to(window.minimum, visible_start, &previous);
        window.minimum = walk_up_to(window.minimum, visible_start, &next);
        window.maximum = walk_up_to(window.maximum, visible_end, &next);
        window.maximum = walk_down_to(window.maximum, visible_end, &previous);

        // One extra tick on each side.
        window.minimum = previous(window.minimum);
        window.maximum = next(window.maximum);

        self.visible_ticks = Some(window);
        window
    }

    #[must_use]
    pub fn label_content(&self, tick: &AxisTick) -> Option<LabelContent> {
        ticks_to_datetime(tick.value).map(LabelContent::DateTime)
    }
}

/// Steps `ticks` forward until it reaches `target`.
fn walk_up_to(mut ticks: f64, target: f64, next: &impl Fn(f64) -> f64) -> f64 {
    while ticks < target {
        let stepped = next(ticks);
        if stepped <= ticks {
            break;
        }
        ticks = stepped;
    }
    ticks
}

/// Steps `ticks` backward until it is no longer above `target`.
fn walk_down_to(mut ticks: f64, target: f64, previous: &impl Fn(f64) -> f64) -> f64 {
    while ticks > target {
        let stepped = previous(ticks);
        if stepped >= ticks {
            break;
        }
        ticks = stepped;
    }
    ticks
}

/// Placement requested by the series: any between-ticks series wins, then
/// any padded one; with no series at all the axis plots between ticks.
fn select_plot_mode<P>(series: &[SeriesModel<P>]) -> AxisPlotMode {
    if series.is_empty() {
        return AxisPlotMode::BetweenTicks;
    }
    let has = |mode| series.iter().any(|model| model.plot_mode_hint == mode);
    if has(AxisPlotMode::BetweenTicks) {
        AxisPlotMode::BetweenTicks
    } else if has(AxisPlotMode::OnTicksPadded) {
        AxisPlotMode::OnTicksPadded
    } else {
        AxisPlotMode::OnTicks
    }
}

/// Smallest gap between adjacent distinct timestamps of a sorted list.
///
/// With a single distinct timestamp the timestamp's own tick value is used,
/// or one day at the epoch itself.
fn find_min_delta(values: &[DateTimePoint]) -> f64 {
    let min_delta = values
        .windows(2)
        .map(|pair| pair[1].ticks - pair[0].ticks)
        .filter(|gap| *gap > 0.0)
        .min_by_key(|gap| OrderedFloat(*gap));

    match (min_delta, values.first()) {
        (Some(delta), _) => delta,
        (None, Some(first)) if first.ticks != 0.0 => first.ticks.abs(),
        (None, Some(_)) => MILLIS_PER_DAY,
        (None, None) => 0.0,
    }
}

/// Lazy tick sequence of a date-time axis.
///
/// Each step asks the tick units for the next tick, so calendar-based ticks
/// follow the actual month lengths.
#[derive(Debug, Clone)]
pub struct DateTimeTickIter {
    units: TickUnits,
    zoom_factor: f64,
    minimum: f64,
    delta: f64,
    current: f64,
    padded: f64,
    end: f64,
    virtual_index: usize,
    inverse: bool,
    done: bool,
}

impl DateTimeTickIter {
    fn empty() -> Self {
        Self {
            units: TickUnits::default(),
            zoom_factor: 1.0,
            minimum: 0.0,
            delta: 0.0,
            current: 0.0,
            padded: 0.0,
            end: 0.0,
            virtual_index: 0,
            inverse: false,
            done: true,
        }
    }
}

impl Iterator for DateTimeTickIter {
    type Item = AxisTick;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || !(self.padded < self.end || are_close(self.padded, self.end)) {
            return None;
        }

        let value = self.minimum + self.current * self.delta;
        let tick = AxisTick {
            value,
            normalized_value: if self.inverse {
                1.0 - self.padded
            } else {
                self.padded
            },
            virtual_index: self.virtual_index,
        };

        let step = (self.units.next_ticks(value, self.zoom_factor) - value) / self.delta;
        if step.is_finite() && step > 0.0 {
            self.current += step;
            self.padded += step;
            self.virtual_index += 1;
        } else {
            self.done = true;
        }
        Some(tick)
    }
}

fn clear_undated_points<P: AxisDataPoint>(context: &mut AxisUpdateContext<P>) {
    for series in context.series.iter_mut().filter(|series| series.visible) {
        for point in &mut series.points {
            if point.axis_value().and_then(|value| value.as_date_time()).is_none() {
                point.set_plot_info(None);
            }
        }
    }
}
