// Copyright 2026 the Gantry Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=gantry_transform --heading-base-level=0

//! Gantry Transform: the camera affine codec.
//!
//! This crate converts between camera parameters and `kurbo::Affine`
//! transforms:
//! - [`camera_affine`] composes the canonical world → device-pixel transform
//!   from position, zoom, rotation, device pixel ratio, and viewport size.
//! - [`decompose_camera`] is its exact algebraic inverse, recovering a
//!   [`CameraPose`] from an externally supplied transform.
//! - [`decompose_trs`] / [`compose_trs`] are the generic
//!   translation-rotation-scale codec for arbitrary affine matrices,
//!   including reflection (negative determinant) inputs.
//!
//! The affine coefficient layout `[a, b, c, d, e, f]` maps a point as
//! `(x, y) → (a·x + c·y + e, b·x + d·y + f)`; matrix composition is plain
//! `Affine` multiplication, where `m1 * m2` applies `m2` first.
//!
//! ## Example
//!
//! ```rust
//! use gantry_transform::{compose_trs, decompose_trs, Trs};
//! use kurbo::{Affine, Vec2};
//!
//! let original = Affine::translate(Vec2::new(8.0, -3.0))
//!     * Affine::rotate(0.4)
//!     * Affine::scale_non_uniform(2.0, 0.5);
//!
//! let trs = decompose_trs(original).unwrap();
//! let rebuilt = compose_trs(trs);
//!
//! for (lhs, rhs) in original.as_coeffs().iter().zip(rebuilt.as_coeffs()) {
//!     assert!((lhs - rhs).abs() < 1e-9);
//! }
//! ```
//!
//! Singular matrices cannot be decomposed; both decompositions report
//! [`DecomposeError::Singular`] instead of defaulting. A valid camera
//! transform is never singular, so hitting the error indicates a programming
//! or data problem upstream.
//!
//! This crate is `no_std`.

#![no_std]

use core::f64::consts::PI;
use core::fmt;

use kurbo::{Affine, Point, Vec2};

/// Determinant magnitude below which a matrix is reported as singular.
pub const SINGULAR_EPSILON: f64 = 1e-10;

/// Camera parameters recovered from a transform by [`decompose_camera`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// World-space position of the viewport center.
    pub position: Point,
    /// Uniform zoom factor, strictly positive for non-singular input.
    pub zoom: f64,
    /// Rotation in radians, in `[-π, π]`.
    pub rotation: f64,
}

/// Translation-rotation-scale components of an affine matrix.
///
/// Recomposition order is translation ∘ rotation ∘ scale; see
/// [`compose_trs`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trs {
    /// Translation component.
    pub translation: Vec2,
    /// Rotation in radians, in `(-π, π]`.
    pub rotation: f64,
    /// Per-axis scale factors.
    pub scale: Vec2,
}

/// Failure to decompose an affine matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DecomposeError {
    /// The matrix determinant is too close to zero to invert.
    Singular {
        /// The offending determinant.
        determinant: f64,
    },
}

impl fmt::Display for DecomposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singular { determinant } => {
                write!(f, "matrix is singular (determinant {determinant:e})")
            }
        }
    }
}

impl core::error::Error for DecomposeError {}

/// Composes the canonical world → device-pixel camera transform.
///
/// Applied to a world-space point, the result scales by `dpr`, translates to
/// the viewport center, rotates by `-rotation`, scales by `zoom`, and
/// translates by `-position`, composed in that order so the translation by
/// `-position` acts on the point first.
#[must_use]
pub fn camera_affine(
    position: Point,
    zoom: f64,
    rotation: f64,
    dpr: f64,
    view_width: f64,
    view_height: f64,
) -> Affine {
    Affine::scale(dpr)
        * Affine::translate(Vec2::new(view_width / 2.0, view_height / 2.0))
        * Affine::rotate(-rotation)
        * Affine::scale(zoom)
        * Affine::translate(-position.to_vec2())
}

/// Recovers camera parameters from a transform produced by [`camera_affine`]
/// (or any transform of that shape).
///
/// The rotation is `-atan2(b, a)`, the zoom is `sqrt(a² + b²) / dpr`, and the
/// position is back-solved by undoing the centering, rotation, and zoom in
/// reverse order, then negating.
///
/// # Errors
///
/// Returns [`DecomposeError::Singular`] when `|det| < `[`SINGULAR_EPSILON`].
pub fn decompose_camera(
    matrix: Affine,
    dpr: f64,
    view_width: f64,
    view_height: f64,
) -> Result<CameraPose, DecomposeError> {
    let determinant = matrix.determinant();
    if determinant.abs() < SINGULAR_EPSILON {
        return Err(DecomposeError::Singular { determinant });
    }
    let [a, b, _, _, e, f] = matrix.as_coeffs();
    let rotation = -libm::atan2(b, a);
    let zoom = libm::sqrt(a * a + b * b) / dpr;

    let tx = e / dpr - view_width / 2.0;
    let ty = f / dpr - view_height / 2.0;
    let (sin_r, cos_r) = libm::sincos(rotation);
    let ux = cos_r * tx - sin_r * ty;
    let uy = sin_r * tx + cos_r * ty;

    Ok(CameraPose {
        position: Point::new(-ux / zoom, -uy / zoom),
        zoom,
        rotation,
    })
}

/// Decomposes an affine matrix into translation, rotation, and scale.
///
/// The translation is `(e, f)` and the rotation is `atan2(b, a)`; the scale
/// is what remains after the rotation is removed through its inverse. For a
/// reflection (negative determinant) the exposed scale has a negative
/// component; the sign is folded into a half-turn of the rotation (the scale
/// is negated as a whole and the rotation renormalized into `(-π, π]`),
/// which leaves the composed matrix unchanged. [`compose_trs`] therefore
/// reproduces the input within floating-point error for any matrix built
/// from translation, rotation, and scale.
///
/// # Errors
///
/// Returns [`DecomposeError::Singular`] when `|det| < `[`SINGULAR_EPSILON`].
pub fn decompose_trs(matrix: Affine) -> Result<Trs, DecomposeError> {
    let determinant = matrix.determinant();
    if determinant.abs() < SINGULAR_EPSILON {
        return Err(DecomposeError::Singular { determinant });
    }
    let [a, b, c, d, e, f] = matrix.as_coeffs();
    let mut rotation = libm::atan2(b, a);
    if rotation <= -PI {
        // atan2's closed lower edge; fold -π onto π.
        rotation = PI;
    }
    let (sin_r, cos_r) = libm::sincos(rotation);
    let mut scale_x = cos_r * a + sin_r * b;
    let mut scale_y = -sin_r * c + cos_r * d;
    if scale_x < 0.0 || scale_y < 0.0 {
        scale_x = -scale_x;
        scale_y = -scale_y;
        rotation = if rotation > 0.0 {
            rotation - PI
        } else {
            rotation + PI
        };
    }

    Ok(Trs {
        translation: Vec2::new(e, f),
        rotation,
        scale: Vec2::new(scale_x, scale_y),
    })
}

/// Composes a [`Trs`] back into an affine matrix.
#[must_use]
pub fn compose_trs(trs: Trs) -> Affine {
    Affine::translate(trs.translation)
        * Affine::rotate(trs.rotation)
        * Affine::scale_non_uniform(trs.scale.x, trs.scale.y)
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use kurbo::{Affine, Point, Vec2};

    use super::{
        CameraPose, DecomposeError, camera_affine, compose_trs, decompose_camera, decompose_trs,
    };

    fn assert_affine_close(lhs: Affine, rhs: Affine) {
        for (l, r) in lhs.as_coeffs().iter().zip(rhs.as_coeffs()) {
            assert!((l - r).abs() < 1e-9, "coefficient mismatch: {lhs:?} vs {rhs:?}");
        }
    }

    fn assert_pose_close(pose: CameraPose, position: Point, zoom: f64, rotation: f64) {
        assert!((pose.position.x - position.x).abs() < 1e-9, "{pose:?}");
        assert!((pose.position.y - position.y).abs() < 1e-9, "{pose:?}");
        assert!((pose.zoom - zoom).abs() < 1e-9, "{pose:?}");
        assert!((pose.rotation - rotation).abs() < 1e-9, "{pose:?}");
    }

    #[test]
    fn camera_affine_centers_the_camera_position() {
        let position = Point::new(42.0, -17.0);
        let matrix = camera_affine(position, 2.0, 0.3, 2.0, 800.0, 600.0);
        let mapped = matrix * position;
        assert!((mapped.x - 800.0).abs() < 1e-9);
        assert!((mapped.y - 600.0).abs() < 1e-9);
    }

    #[test]
    fn camera_affine_round_trips_through_decompose() {
        let position = Point::new(-12.5, 93.0);
        let matrix = camera_affine(position, 1.75, FRAC_PI_4, 1.5, 1024.0, 768.0);
        let pose = decompose_camera(matrix, 1.5, 1024.0, 768.0).unwrap();
        assert_pose_close(pose, position, 1.75, FRAC_PI_4);
    }

    #[test]
    fn decompose_camera_identity_pose() {
        let matrix = camera_affine(Point::ZERO, 1.0, 0.0, 1.0, 640.0, 480.0);
        let pose = decompose_camera(matrix, 1.0, 640.0, 480.0).unwrap();
        assert_pose_close(pose, Point::ZERO, 1.0, 0.0);
    }

    #[test]
    fn decompose_camera_rejects_singular_input() {
        let singular = Affine::new([0.0, 0.0, 0.0, 0.0, 5.0, 5.0]);
        assert!(matches!(
            decompose_camera(singular, 1.0, 800.0, 600.0),
            Err(DecomposeError::Singular { .. })
        ));
    }

    #[test]
    fn trs_round_trip_simple_cases() {
        let cases = [
            Affine::IDENTITY,
            Affine::translate(Vec2::new(10.0, -4.0)),
            Affine::rotate(1.1),
            Affine::scale_non_uniform(3.0, 0.25),
            Affine::translate(Vec2::new(-7.0, 2.0))
                * Affine::rotate(-2.8)
                * Affine::scale_non_uniform(0.5, 4.0),
        ];
        for case in cases {
            let trs = decompose_trs(case).unwrap();
            assert_affine_close(case, compose_trs(trs));
        }
    }

    #[test]
    fn trs_round_trip_negative_scale() {
        let cases = [
            Affine::scale_non_uniform(-2.0, 3.0),
            Affine::scale_non_uniform(2.0, -3.0),
            Affine::scale_non_uniform(-2.0, -3.0),
            Affine::translate(Vec2::new(5.0, -2.0))
                * Affine::rotate(0.7)
                * Affine::scale_non_uniform(1.5, -0.5),
            Affine::rotate(-FRAC_PI_2) * Affine::scale_non_uniform(-1.0, 1.0),
        ];
        for case in cases {
            let trs = decompose_trs(case).unwrap();
            assert_affine_close(case, compose_trs(trs));
        }
    }

    #[test]
    fn trs_rotation_stays_in_half_open_range() {
        let cases = [
            Affine::rotate(PI),
            Affine::rotate(-PI),
            Affine::scale_non_uniform(1.0, -1.0),
            Affine::rotate(3.0) * Affine::scale_non_uniform(1.0, -2.0),
        ];
        for case in cases {
            let trs = decompose_trs(case).unwrap();
            assert!(
                trs.rotation > -PI && trs.rotation <= PI,
                "rotation {} out of range",
                trs.rotation
            );
            assert_affine_close(case, compose_trs(trs));
        }
    }

    #[test]
    fn trs_translation_is_taken_verbatim() {
        let matrix = Affine::new([1.0, 0.0, 0.0, 1.0, 12.5, -0.25]);
        let trs = decompose_trs(matrix).unwrap();
        assert_eq!(trs.translation, Vec2::new(12.5, -0.25));
    }

    #[test]
    fn decompose_trs_rejects_singular_input() {
        // Rank-one matrix: both columns collinear.
        let singular = Affine::new([2.0, 4.0, 1.0, 2.0, 0.0, 0.0]);
        let result = decompose_trs(singular);
        assert!(matches!(result, Err(DecomposeError::Singular { .. })));
    }
}
