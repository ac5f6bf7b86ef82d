pub mod context;
pub mod date_time_axis;
pub mod date_time_units;
pub mod numerical_axis;
pub mod numerical_ticks;
pub mod plot_info;
pub mod primitives;
pub mod range_calculator;
pub mod tick;
pub mod transform;
pub mod types;

pub use context::{
    AxisDataPoint, AxisUpdateContext, ChartPoint, CombineGroup, CombineMode, CombineStack,
    CombinedSeries, PointRef, SeriesModel,
};
pub use date_time_axis::{
    DateTimeContinuousAxisModel, DateTimePlotRange, DateTimePoint, DateTimeTickIter, TimeSlot,
};
pub use date_time_units::{TickUnits, TimeInterval};
pub use numerical_axis::{NumericalAxisModel, StackSumValue, StackSums};
pub use numerical_ticks::NumericalTicks;
pub use plot_info::{CategoricalPlotInfo, NumericalPlotInfo, OhlcPlotInfo, PlotInfo, RangePlotInfo};
pub use range_calculator::RangeCalculator;
pub use tick::{AxisTick, LabelContent};
pub use transform::{NumericalAxisKind, normalize_step};
pub use types::{
    AxisPlotMode, AxisValue, DateTimePlotStretchMode, Ohlc, RangeExtendDirection, RangeValue,
    ValueRange,
};
