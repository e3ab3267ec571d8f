// Copyright 2026 the Gantry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Restriction policy and invariant-preserving camera operations.

use kurbo::{Point, Vec2};

use crate::base::{Camera, rotate_vec};

/// Restriction flags consulted by [`CameraRig`] operations.
///
/// All flags default to off. `restrict_x_translation` /
/// `restrict_y_translation` pin the world axes; the `relative` variants pin
/// the rotated viewport axes instead. The flags are independent and compose,
/// since each removes a different projection of the same pan delta.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RigConfig {
    /// Drop the world-space x component of pans.
    pub restrict_x_translation: bool,
    /// Drop the world-space y component of pans.
    pub restrict_y_translation: bool,
    /// Drop the pan component along the rotated viewport horizontal axis.
    pub restrict_relative_x_translation: bool,
    /// Drop the pan component along the rotated viewport vertical axis.
    pub restrict_relative_y_translation: bool,
    /// Turn [`CameraRig::rotate_by`] / [`CameraRig::rotate_to`] into no-ops.
    pub restrict_rotation: bool,
    /// Keep all four viewport corners inside the camera boundaries, not just
    /// the center.
    pub limit_entire_view_port: bool,
}

/// Partial update for [`RigConfig`].
///
/// Fields left as `None` keep their current value when the patch is applied
/// through [`CameraRig::configure`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RigConfigPatch {
    /// New value for [`RigConfig::restrict_x_translation`], if any.
    pub restrict_x_translation: Option<bool>,
    /// New value for [`RigConfig::restrict_y_translation`], if any.
    pub restrict_y_translation: Option<bool>,
    /// New value for [`RigConfig::restrict_relative_x_translation`], if any.
    pub restrict_relative_x_translation: Option<bool>,
    /// New value for [`RigConfig::restrict_relative_y_translation`], if any.
    pub restrict_relative_y_translation: Option<bool>,
    /// New value for [`RigConfig::restrict_rotation`], if any.
    pub restrict_rotation: Option<bool>,
    /// New value for [`RigConfig::limit_entire_view_port`], if any.
    pub limit_entire_view_port: Option<bool>,
}

impl RigConfigPatch {
    /// Creates an empty patch that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets [`RigConfig::restrict_x_translation`].
    #[must_use]
    pub fn restrict_x_translation(mut self, restrict: bool) -> Self {
        self.restrict_x_translation = Some(restrict);
        self
    }

    /// Sets [`RigConfig::restrict_y_translation`].
    #[must_use]
    pub fn restrict_y_translation(mut self, restrict: bool) -> Self {
        self.restrict_y_translation = Some(restrict);
        self
    }

    /// Sets [`RigConfig::restrict_relative_x_translation`].
    #[must_use]
    pub fn restrict_relative_x_translation(mut self, restrict: bool) -> Self {
        self.restrict_relative_x_translation = Some(restrict);
        self
    }

    /// Sets [`RigConfig::restrict_relative_y_translation`].
    #[must_use]
    pub fn restrict_relative_y_translation(mut self, restrict: bool) -> Self {
        self.restrict_relative_y_translation = Some(restrict);
        self
    }

    /// Sets [`RigConfig::restrict_rotation`].
    #[must_use]
    pub fn restrict_rotation(mut self, restrict: bool) -> Self {
        self.restrict_rotation = Some(restrict);
        self
    }

    /// Sets [`RigConfig::limit_entire_view_port`].
    #[must_use]
    pub fn limit_entire_view_port(mut self, limit: bool) -> Self {
        self.limit_entire_view_port = Some(limit);
        self
    }

    fn apply_to(self, config: &mut RigConfig) {
        if let Some(v) = self.restrict_x_translation {
            config.restrict_x_translation = v;
        }
        if let Some(v) = self.restrict_y_translation {
            config.restrict_y_translation = v;
        }
        if let Some(v) = self.restrict_relative_x_translation {
            config.restrict_relative_x_translation = v;
        }
        if let Some(v) = self.restrict_relative_y_translation {
            config.restrict_relative_y_translation = v;
        }
        if let Some(v) = self.restrict_rotation {
            config.restrict_rotation = v;
        }
        if let Some(v) = self.limit_entire_view_port {
            config.limit_entire_view_port = v;
        }
    }
}

/// Policy layer solving higher-level intents against a [`Camera`].
///
/// The rig holds only its [`RigConfig`]; every operation takes the camera as
/// a mutable argument and reads/writes exclusively through the camera's
/// guarded interface, so a rig never holds stale camera state. Several rigs
/// may drive one camera; the last guarded mutation wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct CameraRig {
    config: RigConfig,
}

impl CameraRig {
    /// Creates a rig with every restriction off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rig with the given configuration.
    #[must_use]
    pub fn with_config(config: RigConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Exclusive access to the configuration.
    pub fn config_mut(&mut self) -> &mut RigConfig {
        &mut self.config
    }

    /// Shallow-merges `patch` into the configuration; unset fields keep
    /// their value.
    pub fn configure(&mut self, patch: RigConfigPatch) {
        patch.apply_to(&mut self.config);
    }

    /// Pans by a viewport-space displacement.
    ///
    /// The displacement is converted into world space (rotated and divided
    /// by zoom), the restriction flags drop their projections of it, and the
    /// destination is clamped against the boundaries before the guarded
    /// position setter runs: against the center point normally, or via the
    /// worst-corner correction when [`RigConfig::limit_entire_view_port`] is
    /// set. Returns whether the position changed.
    pub fn pan_by_view_port(&self, camera: &mut Camera, delta: Vec2) -> bool {
        let world_delta = rotate_vec(delta, camera.rotation()) / camera.zoom_level();
        let world_delta = self.restrict_delta(world_delta, camera.rotation());
        let destination = camera.position() + world_delta;
        let destination = if self.config.limit_entire_view_port {
            destination + worst_corner_correction(camera, destination)
        } else {
            camera.boundaries().clamp(destination)
        };
        camera.set_position(destination)
    }

    /// Changes the zoom by `delta` while keeping the world point currently
    /// under the viewport-space `anchor` fixed on screen.
    ///
    /// The requested zoom is clamped into the camera's zoom limits first, so
    /// the applied change can be smaller than `delta`. If the zoom setter
    /// rejects (already pinned at a bound), the position is left untouched
    /// and `false` is returned.
    pub fn zoom_by_at(&self, camera: &mut Camera, delta: f64, anchor: Point) -> bool {
        let old_zoom = camera.zoom_level();
        let target = camera.zoom_limits().clamp(old_zoom + delta);
        if !camera.set_zoom_level(target) {
            return false;
        }
        let new_zoom = camera.zoom_level();
        let shift =
            rotate_vec(anchor.to_vec2(), camera.rotation()) * (1.0 / old_zoom - 1.0 / new_zoom);
        let _ = camera.set_position(camera.position() + shift);
        true
    }

    /// Changes the zoom by `delta` while keeping the world-space `anchor`
    /// projected onto the same viewport position.
    ///
    /// Same clamping and rejection behavior as [`Self::zoom_by_at`].
    pub fn zoom_by_at_world(&self, camera: &mut Camera, delta: f64, anchor: Point) -> bool {
        let old_zoom = camera.zoom_level();
        let target = camera.zoom_limits().clamp(old_zoom + delta);
        if !camera.set_zoom_level(target) {
            return false;
        }
        let new_zoom = camera.zoom_level();
        let destination = anchor - (anchor - camera.position()) * (old_zoom / new_zoom);
        let _ = camera.set_position(destination);
        true
    }

    /// Rotates by `delta` radians. No-op when rotation is restricted.
    pub fn rotate_by(&self, camera: &mut Camera, delta: f64) -> bool {
        self.rotate_to(camera, camera.rotation() + delta)
    }

    /// Rotates to `angle` (radians, any winding).
    ///
    /// No-op when rotation is restricted. When
    /// [`RigConfig::limit_entire_view_port`] is set and the rotation
    /// actually changed, the position is corrected by the worst-corner
    /// displacement so all four corners at the new rotation satisfy the
    /// boundaries; if no corner exceeds them the position stays put.
    pub fn rotate_to(&self, camera: &mut Camera, angle: f64) -> bool {
        if self.config.restrict_rotation {
            return false;
        }
        let before = camera.rotation();
        if !camera.set_rotation(angle) {
            return false;
        }
        if self.config.limit_entire_view_port && camera.rotation() != before {
            let correction = worst_corner_correction(camera, camera.position());
            if correction != Vec2::ZERO {
                let _ = camera.set_position(camera.position() + correction);
            }
        }
        true
    }

    fn restrict_delta(&self, delta: Vec2, rotation: f64) -> Vec2 {
        let mut delta = delta;
        if self.config.restrict_x_translation {
            delta.x = 0.0;
        }
        if self.config.restrict_y_translation {
            delta.y = 0.0;
        }
        if self.config.restrict_relative_x_translation {
            let axis = rotate_vec(Vec2::new(1.0, 0.0), rotation);
            delta -= axis * delta.dot(axis);
        }
        if self.config.restrict_relative_y_translation {
            let axis = rotate_vec(Vec2::new(0.0, 1.0), rotation);
            delta -= axis * delta.dot(axis);
        }
        delta
    }
}

/// Worst-corner boundary correction for a candidate camera position.
///
/// Evaluates the four viewport corners as they would sit at `position`,
/// clamps each against the camera boundaries, and keeps, independently per
/// axis, the correction of greatest magnitude. Adding the result to
/// `position` brings every corner inside the boundaries when the viewport
/// fits them.
fn worst_corner_correction(camera: &Camera, position: Point) -> Vec2 {
    let shift = position - camera.position();
    let mut dx = 0.0_f64;
    let mut dy = 0.0_f64;
    for corner in camera.view_port_corners_in_world(true) {
        let corner = corner + shift;
        let correction = camera.boundaries().clamp(corner) - corner;
        if correction.x.abs() > dx.abs() {
            dx = correction.x;
        }
        if correction.y.abs() > dy.abs() {
            dy = correction.y;
        }
    }
    Vec2::new(dx, dy)
}
