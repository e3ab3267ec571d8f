// Copyright 2026 the Gantry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=gantry_limits --heading-base-level=0

//! Gantry Limits: constraint primitives for camera state.
//!
//! This crate provides the pure predicate/clamp types the Gantry camera uses
//! to guard its mutations:
//! - [`Boundaries`]: per-axis optional min/max bounds on a world-space point.
//! - [`ZoomLimits`]: optional min/max bounds on a zoom factor.
//! - [`RotationLimits`]: an angular arc with a travel direction and a
//!   tie-breaking rule for clamping.
//! - [`normalize_angle`] / [`angle_span`]: angle helpers shared by the
//!   rotation limits and the camera itself.
//!
//! Everything here is a plain value type with no camera knowledge; the types
//! answer "is this state allowed?" and "what is the nearest allowed state?"
//! and nothing else.
//!
//! ## Example
//!
//! ```rust
//! use gantry_limits::{AxisLimits, Boundaries, RotationLimits, ZoomLimits};
//! use kurbo::Point;
//!
//! let boundaries = Boundaries::new(
//!     AxisLimits::new(Some(-100.0), Some(100.0)),
//!     AxisLimits::new(Some(-50.0), Some(50.0)),
//! );
//! assert!(!boundaries.contains(Point::new(150.0, 0.0)));
//! assert_eq!(boundaries.clamp(Point::new(150.0, 0.0)), Point::new(100.0, 0.0));
//!
//! let zoom = ZoomLimits::new(Some(0.5), Some(4.0));
//! assert!(zoom.contains(2.0));
//! assert_eq!(zoom.clamp(8.0), 4.0);
//!
//! // A quarter-circle arc walked counter-clockwise from 0 to π/2.
//! let rotation = RotationLimits::new(0.0, core::f64::consts::FRAC_PI_2, true);
//! assert!(rotation.contains(0.3));
//! assert!(!rotation.contains(core::f64::consts::PI));
//! ```
//!
//! Inverted `min`/`max` pairs are normalized by swapping rather than
//! rejected, so configuration built incrementally by UI code stays usable.
//!
//! This crate is `no_std`.

#![no_std]

mod angle;
mod boundaries;
mod rotation;
mod zoom;

pub use angle::{angle_span, normalize_angle};
pub use boundaries::{AxisLimits, Boundaries};
pub use rotation::{DEGENERATE_ARC_EPSILON, RotationLimits};
pub use zoom::ZoomLimits;
