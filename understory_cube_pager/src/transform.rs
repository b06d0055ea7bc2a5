// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column-major 4×4 transform for cube faces.
//!
//! Only the operations the face layout needs are provided: translation,
//! rotation about the vertical axis, a perspective term, composition, and
//! projection of a point on the page plane.

use core::ops::Mul;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

/// A column-major 4×4 transform stored as `[[f64; 4]; 4]`.
///
/// Each inner array is one *column*, matching the layout of GPU uniform
/// buffers. Composition follows the
/// column-vector convention: `a * b` applies `b` first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3d {
    /// Four columns, each a 4-element array `[x, y, z, w]`.
    pub cols: [[f64; 4]; 4],
}

impl Transform3d {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a pure translation transform.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Creates a rotation around the vertical (Y) axis, in radians.
    ///
    /// Positive angles turn the +X axis toward −Z.
    #[inline]
    #[must_use]
    pub fn from_rotation_y(radians: f64) -> Self {
        let (s, c) = (radians.sin(), radians.cos());
        Self {
            cols: [
                [c, 0.0, -s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Creates a perspective projection with the eye `distance` units in front
    /// of the z = 0 plane.
    ///
    /// This is the identity with the `m34` term set to `-1 / distance`.
    /// Non-positive or non-finite distances yield the identity.
    #[inline]
    #[must_use]
    pub fn perspective(distance: f64) -> Self {
        let mut t = Self::IDENTITY;
        if distance > 0.0 && distance.is_finite() {
            t.cols[2][3] = -1.0 / distance;
        }
        t
    }

    /// Returns the perspective term `m34` (the `w` entry of the z column).
    #[inline]
    #[must_use]
    pub const fn m34(&self) -> f64 {
        self.cols[2][3]
    }

    /// Returns `true` if this is exactly the identity matrix.
    #[inline]
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Is every entry of this transform [finite]?
    ///
    /// [finite]: f64::is_finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|v| v.is_finite())
    }

    /// Maps a point on the z = 0 plane through this transform and projects it
    /// back onto that plane (homogeneous divide).
    ///
    /// Returns `None` when the point lands on or behind the eye (`w <= 0`).
    #[must_use]
    pub fn map_point(&self, p: Point) -> Option<Point> {
        let c = &self.cols;
        let x = c[0][0] * p.x + c[1][0] * p.y + c[3][0];
        let y = c[0][1] * p.x + c[1][1] * p.y + c[3][1];
        let w = c[0][3] * p.x + c[1][3] * p.y + c[3][3];
        if w <= 0.0 {
            return None;
        }
        Some(Point::new(x / w, y / w))
    }

    /// Returns the depth (z, before projection) a point on the z = 0 plane
    /// is moved to.
    #[must_use]
    pub fn depth_of(&self, p: Point) -> f64 {
        let c = &self.cols;
        c[0][2] * p.x + c[1][2] * p.y + c[3][2]
    }
}

impl Default for Transform3d {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform3d {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f64; 4]; 4];
        for (j, col) in out.iter_mut().enumerate() {
            for (i, v) in col.iter_mut().enumerate() {
                *v = a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2] + a[3][i] * b[j][3];
            }
        }
        Self { cols: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    #[test]
    fn identity_is_neutral() {
        let t = Transform3d::from_translation(1.0, 2.0, 3.0);
        assert_eq!(Transform3d::IDENTITY * t, t);
        assert_eq!(t * Transform3d::IDENTITY, t);
        assert!(Transform3d::default().is_identity());
    }

    #[test]
    fn translations_compose_additively() {
        let t = Transform3d::from_translation(0.0, 0.0, -50.0)
            * Transform3d::from_translation(0.0, 0.0, 50.0);
        assert!(t.is_identity());
    }

    #[test]
    fn rotation_y_quarter_turn_moves_depth_onto_x() {
        // A point pushed toward the viewer swings to the left under a -90° turn.
        let t = Transform3d::from_rotation_y(-FRAC_PI_2) * Transform3d::from_translation(0.0, 0.0, 10.0);
        let p = t.map_point(Point::ORIGIN).unwrap();
        assert!((p.x + 10.0).abs() < EPS, "x was {}", p.x);
        assert!(t.depth_of(Point::ORIGIN).abs() < EPS);
    }

    #[test]
    fn half_turn_mirrors_x() {
        let t = Transform3d::from_rotation_y(PI);
        let p = t.map_point(Point::new(5.0, 3.0)).unwrap();
        assert!((p.x + 5.0).abs() < EPS);
        assert!((p.y - 3.0).abs() < EPS);
    }

    #[test]
    fn perspective_shrinks_receding_points() {
        let t = Transform3d::perspective(500.0) * Transform3d::from_translation(0.0, 0.0, -100.0);
        assert!((t.m34() - (-1.0 / 500.0)).abs() < EPS);
        let p = t.map_point(Point::new(60.0, 0.0)).unwrap();
        // w = 1 + 100 / 500.
        assert!((p.x - 50.0).abs() < EPS, "x was {}", p.x);
    }

    #[test]
    fn degenerate_perspective_is_identity() {
        assert!(Transform3d::perspective(0.0).is_identity());
        assert!(Transform3d::perspective(f64::INFINITY).is_identity());
        assert!(Transform3d::perspective(-3.0).is_identity());
    }

    #[test]
    fn non_finite_entries_detected() {
        let mut t = Transform3d::IDENTITY;
        assert!(t.is_finite());
        t.cols[1][2] = f64::NAN;
        assert!(!t.is_finite());
    }
}
