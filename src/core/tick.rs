use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One major tick produced for the visible part of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    /// Raw value: inverse-transformed number, or epoch milliseconds on a
    /// date-time axis.
    pub value: f64,
    /// Position along the axis in `[0, 1]` (already flipped for inverse axes).
    pub normalized_value: f64,
    /// Index of the tick as if ticks were generated from the axis start.
    pub virtual_index: usize,
}

/// Raw label content for a tick; formatting is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LabelContent {
    Number(f64),
    DateTime(DateTime<Utc>),
}
