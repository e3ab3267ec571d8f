// Copyright 2026 the Gantry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-axis optional translation boundaries.

use kurbo::{Point, Rect};

/// Optional lower/upper bounds for a single world axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisLimits {
    /// Lower bound, or `None` when the axis is open below.
    pub min: Option<f64>,
    /// Upper bound, or `None` when the axis is open above.
    pub max: Option<f64>,
}

impl AxisLimits {
    /// Limits leaving the axis fully unconstrained.
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    /// Creates axis limits, swapping the bounds when both are present and
    /// inverted.
    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => Self {
                min: Some(hi),
                max: Some(lo),
            },
            _ => Self { min, max },
        }
    }

    /// Returns `true` when `value` satisfies every defined bound.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    /// Clamps `value` against the defined bounds.
    ///
    /// An undefined bound leaves that side open.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        let mut value = value;
        if let Some(min) = self.min {
            value = value.max(min);
        }
        if let Some(max) = self.max {
            value = value.min(max);
        }
        value
    }
}

/// World-space region the camera position must stay within.
///
/// Each axis is constrained independently and every bound is optional, so a
/// half-open region such as "anywhere right of `x = 0`" is expressible. The
/// default is fully unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Boundaries {
    /// Horizontal limits.
    pub x: AxisLimits,
    /// Vertical limits.
    pub y: AxisLimits,
}

impl Boundaries {
    /// Boundaries leaving both axes unconstrained.
    pub const UNBOUNDED: Self = Self {
        x: AxisLimits::UNBOUNDED,
        y: AxisLimits::UNBOUNDED,
    };

    /// Creates boundaries from per-axis limits.
    #[must_use]
    pub fn new(x: AxisLimits, y: AxisLimits) -> Self {
        Self { x, y }
    }

    /// Builds fully closed boundaries from a world-space rectangle.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self {
            x: AxisLimits::new(Some(rect.min_x()), Some(rect.max_x())),
            y: AxisLimits::new(Some(rect.min_y()), Some(rect.max_y())),
        }
    }

    /// Returns `true` when no bound is defined on either axis.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        *self == Self::UNBOUNDED
    }

    /// Returns `true` when `point` satisfies the bounds on both axes.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y)
    }

    /// Clamps `point` onto the region, axis by axis.
    #[must_use]
    pub fn clamp(&self, point: Point) -> Point {
        Point::new(self.x.clamp(point.x), self.y.clamp(point.y))
    }
}
