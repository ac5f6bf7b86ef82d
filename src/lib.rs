//! chart-axis: axis computation engine for charts.
//!
//! Numerical axes (linear, logarithmic, polar radius and radial angle) derive
//! a range and a "nice" major step from the plotted data, support additive and
//! 100% stacking, and map every point to normalized plot positions. Date-time
//! axes bucket timestamps into calendar-aware time slots. Both produce major
//! ticks for the visible window and map relative positions back to data.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{ChartAxis, DateTimeAxisConfig, NumericalAxisConfig};
pub use error::{AxisError, AxisResult};
