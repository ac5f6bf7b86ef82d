use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{
    AxisDataPoint, AxisTick, AxisUpdateContext, AxisValue, DateTimeContinuousAxisModel,
    LabelContent, NumericalAxisKind, NumericalAxisModel, PlotInfo, ValueRange,
};
use crate::error::AxisResult;

use super::{DateTimeAxisConfig, NumericalAxisConfig};

/// An axis of either family behind one dispatch point.
///
/// Hosts that mix value and time axes drive them through this type; every
/// call forwards to the wrapped engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartAxis {
    Numerical(NumericalAxisModel),
    DateTime(DateTimeContinuousAxisModel),
}

impl ChartAxis {
    pub fn numerical(kind: NumericalAxisKind) -> AxisResult<Self> {
        NumericalAxisModel::new(kind).map(Self::Numerical)
    }

    pub fn numerical_with_config(config: NumericalAxisConfig) -> AxisResult<Self> {
        NumericalAxisModel::with_config(config).map(Self::Numerical)
    }

    #[must_use]
    pub fn date_time() -> Self {
        Self::DateTime(DateTimeContinuousAxisModel::new())
    }

    pub fn date_time_with_config(config: DateTimeAxisConfig) -> AxisResult<Self> {
        DateTimeContinuousAxisModel::with_config(config).map(Self::DateTime)
    }

    #[must_use]
    pub fn as_numerical(&self) -> Option<&NumericalAxisModel> {
        match self {
            Self::Numerical(axis) => Some(axis),
            Self::DateTime(_) => None,
        }
    }

    #[must_use]
    pub fn as_date_time(&self) -> Option<&DateTimeContinuousAxisModel> {
        match self {
            Self::DateTime(axis) => Some(axis),
            Self::Numerical(_) => None,
        }
    }

    #[must_use]
    pub fn is_updated(&self) -> bool {
        match self {
            Self::Numerical(axis) => axis.is_updated(),
            Self::DateTime(axis) => axis.is_updated(),
        }
    }

    #[must_use]
    pub fn is_inverse(&self) -> bool {
        match self {
            Self::Numerical(axis) => axis.config().is_inverse,
            Self::DateTime(axis) => axis.config().is_inverse,
        }
    }

    pub fn update<P: AxisDataPoint>(&mut self, context: &mut AxisUpdateContext<P>) {
        match self {
            Self::Numerical(axis) => axis.update(context),
            Self::DateTime(axis) => axis.update(context),
        }
    }

    pub fn plot<P: AxisDataPoint>(&mut self, context: &mut AxisUpdateContext<P>) {
        match self {
            Self::Numerical(axis) => axis.plot(context),
            Self::DateTime(axis) => axis.plot(context),
        }
    }

    /// Runs an update followed by a plot pass.
    pub fn layout<P: AxisDataPoint>(&mut self, context: &mut AxisUpdateContext<P>) {
        self.update(context);
        self.plot(context);
        debug!(series_count = context.series.len(), "layout axis");
    }

    /// Collects the major ticks of the normalized `visible` window.
    pub fn ticks(&mut self, visible: ValueRange<f64>) -> Vec<AxisTick> {
        match self {
            Self::Numerical(axis) => axis.ticks(visible).collect(),
            Self::DateTime(axis) => axis.ticks(visible).collect(),
        }
    }

    #[must_use]
    pub fn label_content(&self, tick: &AxisTick) -> Option<LabelContent> {
        match self {
            Self::Numerical(axis) => Some(axis.label_content(tick)),
            Self::DateTime(axis) => axis.label_content(tick),
        }
    }

    /// Plot info for a value against the current state; `None` when the axis
    /// family cannot position that kind of value.
    #[must_use]
    pub fn create_plot_info(&self, value: AxisValue) -> Option<PlotInfo> {
        match (self, value) {
            (Self::Numerical(axis), AxisValue::Scalar(scalar)) => axis.create_plot_info(scalar),
            (Self::DateTime(axis), AxisValue::DateTime(date)) => axis.create_plot_info(date),
            _ => None,
        }
    }

    pub fn convert_relative_to_data(
        &self,
        relative_position: f64,
    ) -> AxisResult<Option<AxisValue>> {
        match self {
            Self::Numerical(axis) => Ok(axis
                .convert_relative_to_data(relative_position)?
                .map(AxisValue::Scalar)),
            Self::DateTime(axis) => Ok(axis
                .convert_relative_to_data(relative_position)?
                .map(AxisValue::DateTime)),
        }
    }

    /// Like [`Self::convert_relative_to_data`] for date-time axes only.
    pub fn convert_relative_to_date(
        &self,
        relative_position: f64,
    ) -> AxisResult<Option<DateTime<Utc>>> {
        Ok(self
            .convert_relative_to_data(relative_position)?
            .and_then(AxisValue::as_date_time))
    }

    pub fn set_zoom(&mut self, zoom: f64) -> AxisResult<()> {
        match self {
            Self::Numerical(axis) => axis.set_zoom(zoom),
            Self::DateTime(axis) => axis.set_zoom(zoom),
        }
    }

    pub fn set_inverse(&mut self, is_inverse: bool) {
        match self {
            Self::Numerical(axis) => axis.set_inverse(is_inverse),
            Self::DateTime(axis) => axis.set_inverse(is_inverse),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Self::Numerical(axis) => axis.reset(),
            Self::DateTime(axis) => axis.reset(),
        }
    }
}

impl From<NumericalAxisModel> for ChartAxis {
    fn from(axis: NumericalAxisModel) -> Self {
        Self::Numerical(axis)
    }
}

impl From<DateTimeContinuousAxisModel> for ChartAxis {
    fn from(axis: DateTimeContinuousAxisModel) -> Self {
        Self::DateTime(axis)
    }
}
