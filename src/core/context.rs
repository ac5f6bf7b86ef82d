use smallvec::SmallVec;

use crate::core::plot_info::PlotInfo;
use crate::core::types::{AxisPlotMode, AxisValue};

/// Handle through which an axis reads a point's value and writes its layout.
///
/// The axis never owns points; it reads them during `update` and writes plot
/// info back during `plot`.
pub trait AxisDataPoint {
    /// Raw value for this axis, or `None` for an empty point.
    fn axis_value(&self) -> Option<AxisValue>;

    fn set_plot_info(&mut self, info: Option<PlotInfo>);
}

/// Minimal point implementation used by hosts without their own point type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChartPoint {
    pub value: Option<AxisValue>,
    pub plot_info: Option<PlotInfo>,
}

impl ChartPoint {
    #[must_use]
    pub fn new(value: impl Into<AxisValue>) -> Self {
        Self {
            value: Some(value.into()),
            plot_info: None,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

impl AxisDataPoint for ChartPoint {
    fn axis_value(&self) -> Option<AxisValue> {
        self.value
    }

    fn set_plot_info(&mut self, info: Option<PlotInfo>) {
        self.plot_info = info;
    }
}

/// One series as seen by an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesModel<P> {
    pub points: Vec<P>,
    pub visible: bool,
    /// Placement this series prefers on a date-time axis.
    pub plot_mode_hint: AxisPlotMode,
    /// Normalized bar baseline written by the numerical axis after each update.
    pub plot_origin: f64,
}

impl<P> SeriesModel<P> {
    #[must_use]
    pub fn new(points: Vec<P>) -> Self {
        Self {
            points,
            visible: true,
            plot_mode_hint: AxisPlotMode::BetweenTicks,
            plot_origin: 0.0,
        }
    }

    #[must_use]
    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_plot_mode_hint(mut self, mode: AxisPlotMode) -> Self {
        self.plot_mode_hint = mode;
        self
    }
}

/// Address of a point inside an [`AxisUpdateContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointRef {
    pub series: usize,
    pub point: usize,
}

impl PointRef {
    #[must_use]
    pub fn new(series: usize, point: usize) -> Self {
        Self { series, point }
    }
}

/// Points that share one category and are summed cumulatively.
///
/// `positive_sum`/`negative_sum` are the final raw totals of the stack as
/// computed by the host's combine strategy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CombineStack {
    pub points: SmallVec<[PointRef; 4]>,
    pub positive_sum: f64,
    pub negative_sum: f64,
}

impl CombineStack {
    #[must_use]
    pub fn new(
        points: impl IntoIterator<Item = PointRef>,
        positive_sum: f64,
        negative_sum: f64,
    ) -> Self {
        Self {
            points: points.into_iter().collect(),
            positive_sum,
            negative_sum,
        }
    }

    /// Sum magnitude used to normalize a 100%-stacked stack.
    #[must_use]
    pub fn total_magnitude(&self) -> f64 {
        self.positive_sum - self.negative_sum
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CombineGroup {
    pub stacks: Vec<CombineStack>,
}

/// Series combined into stacks, with their stack groups.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CombinedSeries {
    pub series: Vec<usize>,
    pub groups: Vec<CombineGroup>,
}

/// How series sharing an axis are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombineMode {
    #[default]
    None,
    Stack,
    Stack100,
}

/// Everything an axis needs for one layout pass.
///
/// Built by the owning chart pipeline; the grouping of points into stacks and
/// the pre-aggregated stack sums are supplied, never computed by the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisUpdateContext<P> {
    pub series: Vec<SeriesModel<P>>,
    pub combined_series: Vec<CombinedSeries>,
    pub non_combined_series: Vec<usize>,
    pub combine_mode: CombineMode,
    pub minimum_stack_sum: f64,
    pub maximum_stack_sum: f64,
}

impl<P: AxisDataPoint> AxisUpdateContext<P> {
    /// Context where every series is plotted on its own.
    #[must_use]
    pub fn new(series: Vec<SeriesModel<P>>) -> Self {
        let non_combined_series = (0..series.len()).collect();
        Self {
            series,
            combined_series: Vec::new(),
            non_combined_series,
            combine_mode: CombineMode::None,
            minimum_stack_sum: 0.0,
            maximum_stack_sum: 0.0,
        }
    }

    /// Context with stacked series. Series not listed in any combined entry are
    /// plotted normally.
    #[must_use]
    pub fn stacked(
        series: Vec<SeriesModel<P>>,
        combined_series: Vec<CombinedSeries>,
        mode: CombineMode,
        minimum_stack_sum: f64,
        maximum_stack_sum: f64,
    ) -> Self {
        let non_combined_series = (0..series.len())
            .filter(|index| {
                !combined_series
                    .iter()
                    .any(|combined| combined.series.contains(index))
            })
            .collect();
        Self {
            series,
            combined_series,
            non_combined_series,
            combine_mode: mode,
            minimum_stack_sum,
            maximum_stack_sum,
        }
    }

    /// Additive stacking. `false` for 100% stacking, see [`Self::is_stacked100`].
    #[must_use]
    pub fn is_stacked(&self) -> bool {
        self.combine_mode == CombineMode::Stack
    }

    #[must_use]
    pub fn is_stacked100(&self) -> bool {
        self.combine_mode == CombineMode::Stack100
    }

    #[must_use]
    pub fn point(&self, at: PointRef) -> Option<&P> {
        self.series.get(at.series)?.points.get(at.point)
    }

    pub fn point_mut(&mut self, at: PointRef) -> Option<&mut P> {
        self.series.get_mut(at.series)?.points.get_mut(at.point)
    }

    /// Raw value of a point; `None` for empty or missing points.
    #[must_use]
    pub fn point_value(&self, at: PointRef) -> Option<AxisValue> {
        self.point(at)?.axis_value()
    }

    /// Indices of visible series that are not part of any stack.
    pub fn visible_non_combined(&self) -> impl Iterator<Item = usize> + '_ {
        self.non_combined_series
            .iter()
            .copied()
            .filter(|&index| self.series.get(index).is_some_and(|series| series.visible))
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisUpdateContext, ChartPoint, CombineMode, CombinedSeries, PointRef, SeriesModel};

    #[test]
    fn stacked_context_excludes_combined_series_from_normal_plotting() {
        let series = vec![
            SeriesModel::new(vec![ChartPoint::new(1.0)]),
            SeriesModel::new(vec![ChartPoint::new(2.0)]),
            SeriesModel::new(vec![ChartPoint::new(3.0)]),
        ];
        let combined = CombinedSeries {
            series: vec![0, 2],
            groups: Vec::new(),
        };
        let context =
            AxisUpdateContext::stacked(series, vec![combined], CombineMode::Stack, 0.0, 4.0);
        assert_eq!(context.non_combined_series, vec![1]);
        assert!(context.is_stacked());
        assert!(!context.is_stacked100());
    }

    #[test]
    fn hidden_series_are_not_visited() {
        let series = vec![
            SeriesModel::new(vec![ChartPoint::new(1.0)]).with_visibility(false),
            SeriesModel::new(vec![ChartPoint::new(2.0)]),
        ];
        let context = AxisUpdateContext::new(series);
        assert_eq!(context.visible_non_combined().collect::<Vec<_>>(), vec![1]);
        assert!(context.point_value(PointRef::new(5, 0)).is_none());
    }
}
