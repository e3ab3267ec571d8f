// Copyright 2026 the Gantry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angle normalization and signed span helpers.

use core::f64::consts::{PI, TAU};

/// Normalizes an angle in radians to `[0, 2π)`.
///
/// The double modulo keeps the result non-negative for negative input.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    ((angle % TAU) + TAU) % TAU
}

/// Returns the signed shortest angular distance from `from` to `to`.
///
/// The result lies in `(-π, π]`; a positive span is counter-clockwise.
#[must_use]
pub fn angle_span(from: f64, to: f64) -> f64 {
    let span = normalize_angle(to - from);
    if span > PI { span - TAU } else { span }
}
