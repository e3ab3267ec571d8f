// Copyright 2026 the Gantry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera state, guarded mutation, and the cached device transform.

use alloc::boxed::Box;
use core::ops::ControlFlow;

use gantry_limits::{Boundaries, RotationLimits, ZoomLimits, angle_span, normalize_angle};
use gantry_notify::{CameraEvent, CameraNotifier, CameraSnapshot, EventFilter, SubscriptionId};
use gantry_transform::{DecomposeError, Trs, decompose_camera, decompose_trs};
use kurbo::{Affine, Point, Rect, Vec2};

/// Rotates `v` counter-clockwise by `angle` radians.
pub(crate) fn rotate_vec(v: Vec2, angle: f64) -> Vec2 {
    let (sin_a, cos_a) = libm::sincos(angle);
    Vec2::new(cos_a * v.x - sin_a * v.y, sin_a * v.x + cos_a * v.y)
}

/// Exact inputs a cached transform was computed from.
#[derive(Clone, Copy, Debug, PartialEq)]
struct TransformInputs {
    dpr: f64,
    align: bool,
    position: Point,
    rotation: f64,
    zoom_level: f64,
    view_port_width: f64,
    view_port_height: f64,
}

#[derive(Clone, Copy, Debug)]
struct CachedTransform {
    inputs: TransformInputs,
    matrix: Affine,
}

/// A 2D camera over a world-space plane.
///
/// The camera tracks the world position of its viewport center, a rotation
/// normalized to `[0, 2π)`, a strictly positive zoom factor, and the viewport
/// size in CSS pixels. Every mutation goes through a guarded setter that
/// checks the configured limits and returns whether the change committed;
/// committed changes raise events into the embedded [`CameraNotifier`].
///
/// The world → device transform is cached per instance together with the
/// exact inputs it was computed from, so repeated [`Self::transform`] calls
/// between mutations are free.
#[derive(Debug)]
pub struct Camera {
    position: Point,
    rotation: f64,
    zoom_level: f64,
    view_port_width: f64,
    view_port_height: f64,
    boundaries: Boundaries,
    zoom_limits: ZoomLimits,
    rotation_limits: Option<RotationLimits>,
    cache: Option<CachedTransform>,
    notifier: CameraNotifier,
}

impl Camera {
    /// Creates a camera over a viewport of the given size, centered on the
    /// world origin with zoom `1.0`, no rotation, and no limits.
    ///
    /// # Panics
    ///
    /// Panics if either viewport dimension is not strictly positive.
    #[must_use]
    pub fn new(view_port_width: f64, view_port_height: f64) -> Self {
        assert!(
            view_port_width > 0.0 && view_port_height > 0.0,
            "viewport dimensions must be strictly positive"
        );
        Self {
            position: Point::ZERO,
            rotation: 0.0,
            zoom_level: 1.0,
            view_port_width,
            view_port_height,
            boundaries: Boundaries::UNBOUNDED,
            zoom_limits: ZoomLimits::UNBOUNDED,
            rotation_limits: None,
            cache: None,
            notifier: CameraNotifier::new(),
        }
    }

    /// Returns the world-space position of the viewport center.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the rotation in radians, normalized to `[0, 2π)`.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Returns the uniform zoom factor.
    #[must_use]
    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    /// Returns the viewport width in CSS pixels.
    #[must_use]
    pub fn view_port_width(&self) -> f64 {
        self.view_port_width
    }

    /// Returns the viewport height in CSS pixels.
    #[must_use]
    pub fn view_port_height(&self) -> f64 {
        self.view_port_height
    }

    /// Returns the translation boundaries.
    #[must_use]
    pub fn boundaries(&self) -> Boundaries {
        self.boundaries
    }

    /// Returns the zoom limits.
    #[must_use]
    pub fn zoom_limits(&self) -> ZoomLimits {
        self.zoom_limits
    }

    /// Returns the rotation limits, if any.
    #[must_use]
    pub fn rotation_limits(&self) -> Option<RotationLimits> {
        self.rotation_limits
    }

    fn snapshot(&self) -> CameraSnapshot {
        CameraSnapshot {
            position: self.position,
            rotation: self.rotation,
            zoom_level: self.zoom_level,
        }
    }

    /// Moves the viewport center to `destination`.
    ///
    /// The move is rejected (`false`, no mutation, no event) when the
    /// destination lies outside the boundaries, or when the displacement is
    /// smaller than `max(1e-9, 1/zoom)`. The latter is one device pixel at
    /// the current zoom; dropping sub-pixel moves suppresses floating-point
    /// jitter from rapid small inputs at high zoom.
    pub fn set_position(&mut self, destination: Point) -> bool {
        if !self.boundaries.contains(destination) {
            return false;
        }
        let diff = destination - self.position;
        if diff.hypot() < (1.0 / self.zoom_level).max(1e-9) {
            return false;
        }
        self.position = destination;
        let snapshot = self.snapshot();
        self.notifier.raise(CameraEvent::Pan { diff, snapshot });
        true
    }

    /// Sets the zoom factor.
    ///
    /// Rejected when `zoom_level` falls outside the zoom limits, and also
    /// when the request clamps to the same bound the camera already sits at,
    /// so a gesture pushing past a limit does not keep firing no-op change
    /// events.
    pub fn set_zoom_level(&mut self, zoom_level: f64) -> bool {
        if !self.zoom_limits.contains(zoom_level) {
            return false;
        }
        let clamped = self.zoom_limits.clamp(zoom_level);
        let pinned =
            |bound: Option<f64>| bound.is_some_and(|b| clamped == b && self.zoom_level == b);
        if pinned(self.zoom_limits.min) || pinned(self.zoom_limits.max) {
            return false;
        }
        let delta_zoom_amount = zoom_level - self.zoom_level;
        self.zoom_level = zoom_level;
        let snapshot = self.snapshot();
        self.notifier.raise(CameraEvent::Zoom {
            delta_zoom_amount,
            snapshot,
        });
        true
    }

    /// Sets the rotation, normalizing the angle to `[0, 2π)` first.
    ///
    /// Rejected when the normalized angle falls outside the rotation limits,
    /// or when it equals the arc endpoint the camera already occupies (the
    /// rotational analogue of the zoom no-op guard).
    pub fn set_rotation(&mut self, rotation: f64) -> bool {
        let normalized = normalize_angle(rotation);
        if let Some(limits) = self.rotation_limits {
            if !limits.contains(normalized) {
                return false;
            }
            let clamped = limits.clamp(normalized);
            let pinned = |endpoint: f64| clamped == endpoint && self.rotation == endpoint;
            if pinned(limits.start) || pinned(limits.end) {
                return false;
            }
        }
        let delta_rotation = angle_span(self.rotation, normalized);
        self.rotation = normalized;
        let snapshot = self.snapshot();
        self.notifier.raise(CameraEvent::Rotate {
            delta_rotation,
            snapshot,
        });
        true
    }

    /// Raises the minimum zoom bound.
    ///
    /// Rejected when the new minimum would invert the zoom range. When the
    /// current zoom falls below the new minimum it is pulled up to meet it.
    /// This is deliberately asymmetric with [`Self::set_max_zoom_level`],
    /// which only rejects.
    pub fn set_min_zoom_level(&mut self, min_zoom_level: f64) -> bool {
        if self.zoom_limits.max.is_some_and(|max| min_zoom_level > max) {
            return false;
        }
        self.zoom_limits.min = Some(min_zoom_level);
        if self.zoom_level < min_zoom_level {
            let _ = self.set_zoom_level(min_zoom_level);
        }
        true
    }

    /// Lowers the maximum zoom bound.
    ///
    /// Rejected when the new maximum would invert the zoom range or cut off
    /// the current zoom; the current zoom is never dragged down.
    pub fn set_max_zoom_level(&mut self, max_zoom_level: f64) -> bool {
        if self.zoom_limits.min.is_some_and(|min| max_zoom_level < min) {
            return false;
        }
        if self.zoom_level > max_zoom_level {
            return false;
        }
        self.zoom_limits.max = Some(max_zoom_level);
        true
    }

    /// Replaces the translation boundaries.
    ///
    /// A current position outside the new region is pulled onto it.
    pub fn set_boundaries(&mut self, boundaries: Boundaries) {
        self.boundaries = boundaries;
        let clamped = boundaries.clamp(self.position);
        if clamped != self.position {
            let diff = clamped - self.position;
            self.position = clamped;
            let snapshot = self.snapshot();
            self.notifier.raise(CameraEvent::Pan { diff, snapshot });
        }
    }

    /// Replaces the zoom limits, normalizing an inverted pair by swapping.
    ///
    /// The current zoom is clamped into the new range.
    pub fn set_zoom_limits(&mut self, limits: ZoomLimits) {
        self.zoom_limits = ZoomLimits::new(limits.min, limits.max);
        let clamped = self.zoom_limits.clamp(self.zoom_level);
        if clamped != self.zoom_level {
            let delta_zoom_amount = clamped - self.zoom_level;
            self.zoom_level = clamped;
            let snapshot = self.snapshot();
            self.notifier.raise(CameraEvent::Zoom {
                delta_zoom_amount,
                snapshot,
            });
        }
    }

    /// Replaces the rotation limits.
    ///
    /// A current rotation off the new arc is clamped onto it.
    pub fn set_rotation_limits(&mut self, limits: Option<RotationLimits>) {
        self.rotation_limits = limits;
        if let Some(limits) = limits {
            let clamped = normalize_angle(limits.clamp(self.rotation));
            if clamped != self.rotation {
                let delta_rotation = angle_span(self.rotation, clamped);
                self.rotation = clamped;
                let snapshot = self.snapshot();
                self.notifier.raise(CameraEvent::Rotate {
                    delta_rotation,
                    snapshot,
                });
            }
        }
    }

    /// Resizes the viewport.
    ///
    /// Returns `false` and changes nothing when either dimension is not
    /// strictly positive.
    pub fn set_view_port_size(&mut self, width: f64, height: f64) -> bool {
        if width <= 0.0 || height <= 0.0 {
            return false;
        }
        self.view_port_width = width;
        self.view_port_height = height;
        true
    }

    /// Returns the world → device-pixel transform.
    ///
    /// The result is cached together with the exact inputs it was computed
    /// from (`dpr`, `align`, position, rotation, zoom, viewport size); a call
    /// with unchanged inputs returns the cached matrix, any field mismatch
    /// recomputes. `align` selects the coordinate convention: `true` for
    /// y-up (math), `false` for y-down (screen), which flips the sign used
    /// for the rotation and for the vertical part of the position
    /// translation.
    pub fn transform(&mut self, dpr: f64, align: bool) -> Affine {
        let inputs = TransformInputs {
            dpr,
            align,
            position: self.position,
            rotation: self.rotation,
            zoom_level: self.zoom_level,
            view_port_width: self.view_port_width,
            view_port_height: self.view_port_height,
        };
        if let Some(cache) = &self.cache {
            if cache.inputs == inputs {
                return cache.matrix;
            }
        }
        let matrix = self.compute_transform(dpr, align);
        self.cache = Some(CachedTransform { inputs, matrix });
        matrix
    }

    // Closed form of `gantry_transform::camera_affine`; the per-frame path
    // skips the affine multiplication chain.
    fn compute_transform(&self, dpr: f64, align: bool) -> Affine {
        let s = dpr * self.zoom_level;
        let angle = if align { -self.rotation } else { self.rotation };
        let (sin_a, cos_a) = libm::sincos(angle);
        let a = s * cos_a;
        let b = s * sin_a;
        let c = -s * sin_a;
        let d = s * cos_a;
        let px = self.position.x;
        let py = if align {
            self.position.y
        } else {
            -self.position.y
        };
        let e = dpr * self.view_port_width / 2.0 - (a * px + c * py);
        let f = dpr * self.view_port_height / 2.0 - (b * px + d * py);
        Affine::new([a, b, c, d, e, f])
    }

    /// Returns the device transform decomposed into translation, rotation,
    /// and scale.
    ///
    /// # Errors
    ///
    /// Propagates [`DecomposeError`] from the decomposition; a valid camera
    /// transform is never singular, so an error indicates corrupted state.
    pub fn trs(&mut self, dpr: f64, align: bool) -> Result<Trs, DecomposeError> {
        decompose_trs(self.transform(dpr, align))
    }

    /// Reinterprets an externally produced transform as camera parameters
    /// and re-applies them through the guarded setters, so every limit still
    /// holds. Assumes the y-up convention, matching
    /// [`gantry_transform::decompose_camera`].
    ///
    /// Returns whether any component committed.
    ///
    /// # Errors
    ///
    /// Returns [`DecomposeError::Singular`] for singular input; nothing is
    /// applied.
    pub fn set_from_transform(
        &mut self,
        matrix: Affine,
        dpr: f64,
    ) -> Result<bool, DecomposeError> {
        let pose = decompose_camera(matrix, dpr, self.view_port_width, self.view_port_height)?;
        let zoom_applied = self.set_zoom_level(pose.zoom);
        let rotation_applied = self.set_rotation(pose.rotation);
        let position_applied = self.set_position(pose.position);
        Ok(zoom_applied || rotation_applied || position_applied)
    }

    /// Converts a viewport-space point (origin at the viewport center) into
    /// world space.
    #[must_use]
    pub fn view_port_to_world(&self, point: Point) -> Point {
        self.position + rotate_vec(point.to_vec2(), self.rotation) / self.zoom_level
    }

    /// Converts a world-space point into viewport space.
    #[must_use]
    pub fn world_to_view_port(&self, point: Point) -> Point {
        let rotated = rotate_vec(point - self.position, -self.rotation);
        (rotated * self.zoom_level).to_point()
    }

    /// Returns the four viewport corners in world space, accounting for
    /// rotation.
    ///
    /// Corners are listed counter-clockwise starting from the viewport's
    /// `(-w/2, -h/2)` corner. With `align = false` the viewport y offset and
    /// the rotation direction flip, keeping both conventions centered on the
    /// camera position and identical at zero rotation.
    #[must_use]
    pub fn view_port_corners_in_world(&self, align: bool) -> [Point; 4] {
        let half_w = self.view_port_width / 2.0;
        let half_h = self.view_port_height / 2.0;
        let (y_sign, angle) = if align {
            (1.0, self.rotation)
        } else {
            (-1.0, -self.rotation)
        };
        [
            Vec2::new(-half_w, -half_h),
            Vec2::new(half_w, -half_h),
            Vec2::new(half_w, half_h),
            Vec2::new(-half_w, half_h),
        ]
        .map(|corner| {
            let corner = Vec2::new(corner.x, y_sign * corner.y);
            self.position + rotate_vec(corner, angle) / self.zoom_level
        })
    }

    /// Returns the axis-aligned world-space bounding box of the viewport.
    #[must_use]
    pub fn view_port_aabb(&self, align: bool) -> Rect {
        let corners = self.view_port_corners_in_world(align);
        let mut min_x = corners[0].x;
        let mut min_y = corners[0].y;
        let mut max_x = corners[0].x;
        let mut max_y = corners[0].y;
        for corner in &corners[1..] {
            min_x = min_x.min(corner.x);
            min_y = min_y.min(corner.y);
            max_x = max_x.max(corner.x);
            max_y = max_y.max(corner.y);
        }
        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Subscribes `callback` to committed state changes.
    ///
    /// Events are delivered at the next [`Self::flush_events`]; see
    /// `gantry_notify` for ordering and cancellation semantics.
    pub fn on<F>(&mut self, filter: EventFilter, callback: F) -> SubscriptionId
    where
        F: FnMut(&CameraEvent) -> ControlFlow<()> + 'static,
    {
        self.notifier.subscribe(filter, Box::new(callback))
    }

    /// Removes a subscription made with [`Self::on`].
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Delivers every queued change event in raise order; returns how many
    /// were delivered.
    pub fn flush_events(&mut self) -> usize {
        self.notifier.flush()
    }

    /// Shared access to the embedded notifier.
    #[must_use]
    pub fn notifier(&self) -> &CameraNotifier {
        &self.notifier
    }

    /// Exclusive access to the embedded notifier.
    pub fn notifier_mut(&mut self) -> &mut CameraNotifier {
        &mut self.notifier
    }

    /// Snapshot of the camera state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> CameraDebugInfo {
        CameraDebugInfo {
            position: self.position,
            rotation: self.rotation,
            zoom_level: self.zoom_level,
            view_port_width: self.view_port_width,
            view_port_height: self.view_port_height,
            boundaries: self.boundaries,
            zoom_limits: self.zoom_limits,
            rotation_limits: self.rotation_limits,
            has_cached_transform: self.cache.is_some(),
            pending_events: self.notifier.pending_events(),
            subscriber_count: self.notifier.subscriber_count(),
        }
    }
}

/// Debug snapshot of a [`Camera`] state.
#[derive(Clone, Copy, Debug)]
pub struct CameraDebugInfo {
    /// World-space position of the viewport center.
    pub position: Point,
    /// Rotation in radians, normalized to `[0, 2π)`.
    pub rotation: f64,
    /// Uniform zoom factor.
    pub zoom_level: f64,
    /// Viewport width in CSS pixels.
    pub view_port_width: f64,
    /// Viewport height in CSS pixels.
    pub view_port_height: f64,
    /// Translation boundaries.
    pub boundaries: Boundaries,
    /// Zoom limits.
    pub zoom_limits: ZoomLimits,
    /// Rotation limits, if any.
    pub rotation_limits: Option<RotationLimits>,
    /// Whether a cached transform is currently held.
    pub has_cached_transform: bool,
    /// Events queued in the notifier.
    pub pending_events: usize,
    /// Live subscriptions on the notifier.
    pub subscriber_count: usize,
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::RefCell;
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};
    use core::ops::ControlFlow;

    use gantry_limits::{AxisLimits, Boundaries, RotationLimits, ZoomLimits};
    use gantry_notify::{CameraEvent, EventFilter};
    use gantry_transform::camera_affine;
    use kurbo::{Affine, Point};

    use super::Camera;

    fn assert_affine_close(lhs: Affine, rhs: Affine) {
        for (l, r) in lhs.as_coeffs().iter().zip(rhs.as_coeffs()) {
            assert!((l - r).abs() < 1e-9, "coefficient mismatch: {lhs:?} vs {rhs:?}");
        }
    }

    fn assert_point_close(lhs: Point, rhs: Point) {
        assert!(
            (lhs - rhs).hypot() < 1e-9,
            "points differ: {lhs:?} vs {rhs:?}"
        );
    }

    #[test]
    #[should_panic(expected = "viewport dimensions must be strictly positive")]
    fn zero_viewport_is_rejected_at_construction() {
        let _ = Camera::new(0.0, 600.0);
    }

    #[test]
    fn new_camera_defaults() {
        let camera = Camera::new(800.0, 600.0);
        assert_eq!(camera.position(), Point::ZERO);
        assert_eq!(camera.rotation(), 0.0);
        assert_eq!(camera.zoom_level(), 1.0);
        assert!(camera.boundaries().is_unbounded());
        assert!(!camera.debug_info().has_cached_transform);
    }

    #[test]
    fn set_position_rejects_out_of_bounds_destinations() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.set_boundaries(Boundaries::new(
            AxisLimits::new(Some(-100.0), Some(100.0)),
            AxisLimits::new(Some(-50.0), Some(50.0)),
        ));
        assert!(!camera.set_position(Point::new(150.0, 0.0)));
        assert_eq!(camera.position(), Point::ZERO);
        assert!(camera.set_position(Point::new(99.0, -49.0)));
        assert_eq!(camera.position(), Point::new(99.0, -49.0));
    }

    #[test]
    fn set_position_deadband_is_one_device_pixel() {
        // At zoom 1 the deadband is one world unit.
        let mut camera = Camera::new(800.0, 600.0);
        assert!(!camera.set_position(Point::new(0.5, 0.0)));
        assert_eq!(camera.position(), Point::ZERO);
        assert!(camera.set_position(Point::new(2.0, 0.0)));

        // At zoom 100 it shrinks to a hundredth of a world unit.
        assert!(camera.set_zoom_level(100.0));
        assert!(!camera.set_position(Point::new(2.005, 0.0)));
        assert!(camera.set_position(Point::new(2.02, 0.0)));
    }

    #[test]
    fn set_zoom_level_rejects_outside_limits() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.set_zoom_limits(ZoomLimits::new(Some(0.5), Some(4.0)));
        assert!(!camera.set_zoom_level(5.0));
        assert!(!camera.set_zoom_level(0.0));
        assert!(!camera.set_zoom_level(-1.0));
        assert_eq!(camera.zoom_level(), 1.0);
        assert!(camera.set_zoom_level(4.0));
    }

    #[test]
    fn zoom_rejection_is_idempotent_at_a_bound() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.set_zoom_limits(ZoomLimits::new(Some(0.5), Some(4.0)));
        assert!(camera.set_zoom_level(4.0));
        // Sitting at the max: re-requesting anything that clamps to it is a no-op.
        assert!(!camera.set_zoom_level(4.0));
        assert!(!camera.set_zoom_level(7.0));
        assert_eq!(camera.zoom_level(), 4.0);

        assert!(camera.set_zoom_level(0.5));
        assert!(!camera.set_zoom_level(0.5));
        assert_eq!(camera.zoom_level(), 0.5);
    }

    #[test]
    fn set_rotation_normalizes_and_guards_the_arc() {
        let mut camera = Camera::new(800.0, 600.0);
        assert!(camera.set_rotation(TAU + 1.0));
        assert!((camera.rotation() - 1.0).abs() < 1e-12);

        camera.set_rotation_limits(Some(RotationLimits::new(0.0, FRAC_PI_4, true)));
        // The current rotation was off the arc and snapped to the closer endpoint.
        assert!((camera.rotation() - FRAC_PI_4).abs() < 1e-12);
        assert!(!camera.set_rotation(PI));
        assert!(camera.set_rotation(0.3));

        // Re-requesting an endpoint while sitting on it is a no-op.
        assert!(camera.set_rotation(FRAC_PI_4));
        assert!(!camera.set_rotation(FRAC_PI_4));
    }

    #[test]
    fn min_zoom_pulls_current_zoom_up_but_max_only_rejects() {
        // Characterization: the bound-setter asymmetry is intentional.
        let mut camera = Camera::new(800.0, 600.0);
        assert!(camera.set_min_zoom_level(2.0));
        assert_eq!(camera.zoom_level(), 2.0);

        assert!(!camera.set_max_zoom_level(1.5));
        assert_eq!(camera.zoom_level(), 2.0);
        assert_eq!(camera.zoom_limits().max, None);

        assert!(camera.set_max_zoom_level(8.0));
        assert!(!camera.set_min_zoom_level(9.0));
    }

    #[test]
    fn transform_matches_the_compositional_form() {
        let mut camera = Camera::new(800.0, 600.0);
        assert!(camera.set_position(Point::new(40.0, -25.0)));
        assert!(camera.set_zoom_level(1.5));
        assert!(camera.set_rotation(0.35));

        let closed_form = camera.transform(2.0, true);
        let composed = camera_affine(camera.position(), 1.5, 0.35, 2.0, 800.0, 600.0);
        assert_affine_close(closed_form, composed);
    }

    #[test]
    fn transform_is_cached_until_an_input_changes() {
        let mut camera = Camera::new(800.0, 600.0);
        let first = camera.transform(1.0, true);
        assert!(camera.debug_info().has_cached_transform);
        assert_eq!(first.as_coeffs(), camera.transform(1.0, true).as_coeffs());

        // A different dpr misses the cache.
        let scaled = camera.transform(2.0, true);
        assert!((scaled.as_coeffs()[0] - 2.0 * first.as_coeffs()[0]).abs() < 1e-12);

        // A committed mutation changes the keyed inputs.
        assert!(camera.set_position(Point::new(10.0, 0.0)));
        let moved = camera.transform(2.0, true);
        assert!(moved.as_coeffs()[4] != scaled.as_coeffs()[4]);
    }

    #[test]
    fn align_flips_rotation_and_vertical_translation() {
        let mut camera = Camera::new(800.0, 600.0);
        assert!(camera.set_position(Point::new(30.0, 20.0)));
        assert!(camera.set_rotation(0.25));

        let up = camera.transform(1.0, true);
        let down = camera.transform(1.0, false);

        // y-up maps the position to the viewport center.
        assert_point_close(up * Point::new(30.0, 20.0), Point::new(400.0, 300.0));
        // y-down maps the y-negated position there instead.
        assert_point_close(down * Point::new(30.0, -20.0), Point::new(400.0, 300.0));
        // The rotation sign flips between the two conventions.
        assert!((up.as_coeffs()[1] + down.as_coeffs()[1]).abs() < 1e-12);
    }

    #[test]
    fn conversions_round_trip() {
        let mut camera = Camera::new(800.0, 600.0);
        assert!(camera.set_position(Point::new(12.0, -7.0)));
        assert!(camera.set_zoom_level(2.5));
        assert!(camera.set_rotation(1.2));

        assert_point_close(camera.view_port_to_world(Point::ZERO), camera.position());

        let view_point = Point::new(133.0, -41.0);
        let world = camera.view_port_to_world(view_point);
        assert_point_close(camera.world_to_view_port(world), view_point);
    }

    #[test]
    fn corners_and_aabb_follow_zoom_and_rotation() {
        let mut camera = Camera::new(800.0, 600.0);
        assert!(camera.set_position(Point::new(10.0, 20.0)));
        assert!(camera.set_zoom_level(2.0));

        // No rotation: half extents are half the viewport over the zoom.
        let aabb = camera.view_port_aabb(true);
        assert!((aabb.min_x() - (10.0 - 200.0)).abs() < 1e-9);
        assert!((aabb.max_x() - (10.0 + 200.0)).abs() < 1e-9);
        assert!((aabb.min_y() - (20.0 - 150.0)).abs() < 1e-9);
        assert!((aabb.max_y() - (20.0 + 150.0)).abs() < 1e-9);

        // A quarter turn swaps the half extents.
        assert!(camera.set_rotation(FRAC_PI_2));
        let rotated = camera.view_port_aabb(true);
        assert!((rotated.max_x() - (10.0 + 150.0)).abs() < 1e-9);
        assert!((rotated.max_y() - (20.0 + 200.0)).abs() < 1e-9);

        for corner in camera.view_port_corners_in_world(true) {
            assert!((corner - camera.position()).hypot() <= 250.0 + 1e-9);
        }
    }

    #[test]
    fn corners_agree_across_conventions_at_zero_rotation() {
        let mut camera = Camera::new(400.0, 200.0);
        assert!(camera.set_position(Point::new(5.0, 6.0)));
        let up = camera.view_port_corners_in_world(true);
        let down = camera.view_port_corners_in_world(false);
        for corner in down {
            assert!(
                up.iter().any(|u| (*u - corner).hypot() < 1e-9),
                "corner {corner:?} missing from {up:?}"
            );
        }
    }

    #[test]
    fn set_from_transform_applies_through_the_guards() {
        let mut camera = Camera::new(800.0, 600.0);
        let target = camera_affine(Point::new(50.0, 80.0), 2.0, 0.5, 1.0, 800.0, 600.0);
        let applied = camera.set_from_transform(target, 1.0).unwrap();
        assert!(applied);
        assert_point_close(camera.position(), Point::new(50.0, 80.0));
        assert!((camera.zoom_level() - 2.0).abs() < 1e-9);
        assert!((camera.rotation() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn set_from_transform_respects_limits() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.set_zoom_limits(ZoomLimits::new(None, Some(1.5)));
        let target = camera_affine(Point::new(50.0, 80.0), 4.0, 0.0, 1.0, 800.0, 600.0);
        // Zoom is rejected by the limit, position still lands.
        let applied = camera.set_from_transform(target, 1.0).unwrap();
        assert!(applied);
        assert_eq!(camera.zoom_level(), 1.0);
        assert_point_close(camera.position(), Point::new(50.0, 80.0));
    }

    #[test]
    fn set_from_transform_reports_singular_input() {
        let mut camera = Camera::new(800.0, 600.0);
        let singular = Affine::new([0.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
        assert!(camera.set_from_transform(singular, 1.0).is_err());
        assert_eq!(camera.position(), Point::ZERO);
    }

    #[test]
    fn committed_mutations_raise_deferred_events() {
        let mut camera = Camera::new(800.0, 600.0);
        let seen = Rc::new(RefCell::new(alloc::vec::Vec::new()));
        let sink = seen.clone();
        camera.on(EventFilter::All, move |event| {
            let tag = match event {
                CameraEvent::Pan { diff, .. } => ("pan", diff.x),
                CameraEvent::Zoom {
                    delta_zoom_amount, ..
                } => ("zoom", *delta_zoom_amount),
                CameraEvent::Rotate { delta_rotation, .. } => ("rotate", *delta_rotation),
            };
            sink.borrow_mut().push(tag);
            ControlFlow::Continue(())
        });

        assert!(camera.set_position(Point::new(10.0, 0.0)));
        assert!(camera.set_zoom_level(2.0));
        assert!(camera.set_rotation(0.5));
        // A rejected mutation raises nothing.
        assert!(!camera.set_position(Point::new(10.0, 0.0)));

        assert!(seen.borrow().is_empty());
        assert_eq!(camera.flush_events(), 3);
        let events = seen.borrow();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].0, "pan");
        assert!((events[0].1 - 10.0).abs() < 1e-12);
        assert_eq!(events[1], ("zoom", 1.0));
        assert_eq!(events[2].0, "rotate");
        assert!((events[2].1 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn event_snapshots_carry_the_post_change_state() {
        let mut camera = Camera::new(800.0, 600.0);
        let snapshots = Rc::new(RefCell::new(alloc::vec::Vec::new()));
        let sink = snapshots.clone();
        camera.on(EventFilter::Zoom, move |event| {
            sink.borrow_mut().push(event.snapshot());
            ControlFlow::Continue(())
        });

        assert!(camera.set_zoom_level(3.0));
        camera.flush_events();
        assert_eq!(snapshots.borrow()[0].zoom_level, 3.0);
    }

    #[test]
    fn unsubscribing_stops_delivery() {
        let mut camera = Camera::new(800.0, 600.0);
        let count = Rc::new(RefCell::new(0_usize));
        let sink = count.clone();
        let id = camera.on(EventFilter::All, move |_| {
            *sink.borrow_mut() += 1;
            ControlFlow::Continue(())
        });
        assert!(camera.off(id));
        assert!(camera.set_zoom_level(2.0));
        camera.flush_events();
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn viewport_resize_guards_non_positive_sizes() {
        let mut camera = Camera::new(800.0, 600.0);
        assert!(!camera.set_view_port_size(0.0, 100.0));
        assert!(!camera.set_view_port_size(100.0, -5.0));
        assert!(camera.set_view_port_size(1024.0, 768.0));
        assert_eq!(camera.view_port_width(), 1024.0);
        assert_eq!(camera.view_port_height(), 768.0);
    }

    #[test]
    fn trs_reflects_camera_parameters() {
        let mut camera = Camera::new(800.0, 600.0);
        assert!(camera.set_zoom_level(2.0));
        assert!(camera.set_rotation(0.3));
        let trs = camera.trs(1.5, true).unwrap();
        // The linear part is dpr·zoom · R(-rotation).
        assert!((trs.scale.x - 3.0).abs() < 1e-9);
        assert!((trs.scale.y - 3.0).abs() < 1e-9);
        assert!((trs.rotation + 0.3).abs() < 1e-9);
    }
}
