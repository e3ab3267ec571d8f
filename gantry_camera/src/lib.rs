// Copyright 2026 the Gantry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=gantry_camera --heading-base-level=0

//! Gantry Camera: a boundary-constrained 2D camera and its rig.
//!
//! This crate provides the two stateful pieces of Gantry:
//! - [`Camera`]: owns viewport position, rotation, and zoom; guards every
//!   mutation against the limit types from `gantry_limits`; caches the
//!   world → device transform; converts between viewport and world space;
//!   and raises change events into an embedded `gantry_notify` notifier.
//! - [`CameraRig`]: a non-owning policy layer over a camera. It applies
//!   restriction flags and solves for the state change that satisfies a
//!   higher-level intent: zoom without moving the point under the cursor,
//!   pan with an axis pinned, or rotate while keeping the whole viewport
//!   inside the world boundaries.
//!
//! Guarded setters return `bool` rather than erroring: hitting a boundary
//! during a drag is routine, and the caller checks the flag only when the
//! outcome matters.
//!
//! ## Example
//!
//! ```rust
//! use gantry_camera::{Camera, CameraRig, RigConfigPatch};
//! use kurbo::{Point, Vec2};
//!
//! let mut camera = Camera::new(800.0, 600.0);
//! let mut rig = CameraRig::new();
//!
//! // Pan by a viewport-space displacement, then zoom in around a point
//! // 100 px right and 50 px below the viewport center.
//! rig.pan_by_view_port(&mut camera, Vec2::new(120.0, -40.0));
//! rig.zoom_by_at(&mut camera, 1.0, Point::new(100.0, 50.0));
//!
//! // Pin the vertical axis for the rest of the gesture.
//! rig.configure(RigConfigPatch::new().restrict_y_translation(true));
//! let y_before = camera.position().y;
//! rig.pan_by_view_port(&mut camera, Vec2::new(30.0, 75.0));
//! assert_eq!(camera.position().y, y_before);
//!
//! // Hand the transform to a renderer at device pixel ratio 2.
//! let device_transform = camera.transform(2.0, true);
//! assert!(device_transform.determinant() > 0.0);
//! ```
//!
//! One camera is expected to be driven from one logical thread of control.
//! When several rigs wrap the same camera, the last guarded mutation wins;
//! the crate provides no cross-rig coordination.
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

mod base;
mod rig;

pub use base::{Camera, CameraDebugInfo};
pub use rig::{CameraRig, RigConfig, RigConfigPatch};
