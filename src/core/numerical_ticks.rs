use crate::core::primitives::are_close;
use crate::core::tick::AxisTick;
use crate::core::transform::{FULL_CIRCLE_DEGREES, NumericalAxisKind};
use crate::core::types::ValueRange;

/// Walks major ticks across a visible window of a linear or logarithmic axis.
///
/// Tick `i` sits at `minimum + i * step`; positions are computed from the
/// index instead of accumulated, so long walks do not drift.
#[derive(Debug, Clone)]
pub struct LinearTickIter {
    kind: NumericalAxisKind,
    minimum: f64,
    step: f64,
    normalized_step: f64,
    end: f64,
    index: usize,
    inverse: bool,
}

impl LinearTickIter {
    /// `range` and `step` are in plot space; `visible` is a normalized window.
    #[must_use]
    pub fn new(
        kind: NumericalAxisKind,
        range: ValueRange<f64>,
        step: f64,
        visible: ValueRange<f64>,
        inverse: bool,
    ) -> Self {
        let delta = range.delta();
        let start = visible.minimum.max(0.0);
        let end = visible.maximum.min(1.0);

        let usable = delta > 0.0 && step > 0.0 && delta.is_finite() && step.is_finite();
        let normalized_step = if usable { step / delta } else { 0.0 };
        let (index, end) = if usable && start <= end {
            (first_index(start, normalized_step), end)
        } else {
            // Empty walk: the first position already lies past the end.
            (1, -1.0)
        };

        Self {
            kind,
            minimum: range.minimum,
            step,
            normalized_step,
            end,
            index,
            inverse,
        }
    }
}

fn first_index(start: f64, normalized_step: f64) -> usize {
    let ratio = start / normalized_step;
    let nearest = ratio.round();
    let index = if are_close(ratio, nearest) {
        nearest
    } else {
        ratio.floor()
    };
    index.max(0.0) as usize
}

impl Iterator for LinearTickIter {
    type Item = AxisTick;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.index as f64 * self.normalized_step;
        if position > self.end && !are_close(position, self.end) {
            return None;
        }

        let tick = AxisTick {
            value: self
                .kind
                .inverse_transform(self.minimum + self.index as f64 * self.step),
            normalized_value: if self.inverse {
                1.0 - position
            } else {
                position
            },
            virtual_index: self.index,
        };
        self.index += 1;
        Some(tick)
    }
}

/// Ticks of an angle axis: every `step` degrees from 0, excluding 360,
/// restricted to the normalized `visible` window.
#[derive(Debug, Clone)]
pub struct RadialTickIter {
    step: f64,
    visible: ValueRange<f64>,
    index: usize,
    inverse: bool,
}

impl RadialTickIter {
    #[must_use]
    pub fn new(step: f64, visible: ValueRange<f64>, inverse: bool) -> Self {
        let visible = ValueRange::new(visible.minimum.max(0.0), visible.maximum.min(1.0));
        let index = if step.is_finite() && step > 0.0 {
            first_index(visible.minimum * FULL_CIRCLE_DEGREES, step)
        } else {
            0
        };
        Self {
            step,
            visible,
            index,
            inverse,
        }
    }
}

impl Iterator for RadialTickIter {
    type Item = AxisTick;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return None;
        }

        loop {
            let value = self.index as f64 * self.step;
            // The tick at 360 coincides with the one at 0.
            if value >= FULL_CIRCLE_DEGREES || are_close(value, FULL_CIRCLE_DEGREES) {
                return None;
            }

            let position = value / FULL_CIRCLE_DEGREES;
            let index = self.index;
            self.index += 1;
            if position > self.visible.maximum && !are_close(position, self.visible.maximum) {
                return None;
            }
            if !self.visible.contains(position) && !are_close(position, self.visible.minimum) {
                continue;
            }

            return Some(AxisTick {
                value,
                normalized_value: if self.inverse {
                    1.0 - position
                } else {
                    position
                },
                virtual_index: index,
            });
        }
    }
}

/// Tick sequence of a numerical axis, dispatched on the axis kind.
#[derive(Debug, Clone)]
pub enum NumericalTicks {
    Linear(LinearTickIter),
    Radial(RadialTickIter),
}

impl Iterator for NumericalTicks {
    type Item = AxisTick;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Linear(iter) => iter.next(),
            Self::Radial(iter) => iter.next(),
        }
    }
}
