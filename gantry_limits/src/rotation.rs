// Copyright 2026 the Gantry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angular-arc rotation limits.

use crate::{angle_span, normalize_angle};

/// Arc width below which [`RotationLimits`] is degenerate and rotation is
/// unbounded.
///
/// Guards against `start` and `end` drifting apart by rounding when a caller
/// meant a full circle.
pub const DEGENERATE_ARC_EPSILON: f64 = 0.01;

/// Angular arc the camera rotation must stay within.
///
/// The arc runs from `start` to `end`, traversed counter-clockwise when `ccw`
/// is set and clockwise otherwise. Endpoints are inclusive. When `start` and
/// `end` coincide (mod 2π, within [`DEGENERATE_ARC_EPSILON`]) the limits are
/// degenerate and every rotation is allowed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationLimits {
    /// Arc start angle, normalized to `[0, 2π)`.
    pub start: f64,
    /// Arc end angle, normalized to `[0, 2π)`.
    pub end: f64,
    /// Whether the arc is traversed counter-clockwise from `start` to `end`.
    pub ccw: bool,
    /// Which endpoint wins when a clamped angle is exactly equidistant from
    /// both.
    pub start_as_tie_breaker: bool,
}

impl RotationLimits {
    /// Creates rotation limits with both endpoints normalized to `[0, 2π)`.
    ///
    /// Clamping ties resolve toward `start`; set `start_as_tie_breaker` to
    /// `false` to resolve toward `end` instead.
    #[must_use]
    pub fn new(start: f64, end: f64, ccw: bool) -> Self {
        Self {
            start: normalize_angle(start),
            end: normalize_angle(end),
            ccw,
            start_as_tie_breaker: true,
        }
    }

    /// Returns `true` when the arc covers the full circle.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        angle_span(self.start, self.end).abs() < DEGENERATE_ARC_EPSILON
    }

    /// Returns `true` when `angle` lies on the arc.
    #[must_use]
    pub fn contains(&self, angle: f64) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let angle = normalize_angle(angle);
        let from_start = angle_span(self.start, angle);
        let from_end = angle_span(self.end, angle);
        let out_of_range = if self.ccw {
            from_start < 0.0 || from_end > 0.0
        } else {
            from_start > 0.0 || from_end < 0.0
        };
        !out_of_range
    }

    /// Clamps `angle` onto the arc.
    ///
    /// Angles already on the arc pass through unchanged; angles outside snap
    /// to whichever endpoint is closer by absolute angular span, with an exact
    /// tie resolved by `start_as_tie_breaker`.
    #[must_use]
    pub fn clamp(&self, angle: f64) -> f64 {
        if self.contains(angle) {
            return angle;
        }
        let angle = normalize_angle(angle);
        let to_start = angle_span(angle, self.start).abs();
        let to_end = angle_span(angle, self.end).abs();
        if to_start < to_end {
            self.start
        } else if to_end < to_start {
            self.end
        } else if self.start_as_tie_breaker {
            self.start
        } else {
            self.end
        }
    }
}
