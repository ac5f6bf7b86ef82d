pub mod axis;
pub mod axis_config;
pub mod validation;

pub use axis::ChartAxis;
pub use axis_config::{
    DEFAULT_DESIRED_TICK_COUNT, DEFAULT_GAP_LENGTH, DEFAULT_MAXIMUM_TICKS, DateTimeAxisConfig,
    NumericalAxisConfig,
};
