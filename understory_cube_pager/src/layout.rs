// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cube-face geometry.
//!
//! Every resident page is placed over the viewport and turned about a vertical
//! axis that sits half a viewport width behind the screen. A page one slot
//! away from the scroll offset is turned a quarter turn, so adjacent pages
//! meet at the cube's edge.

use core::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{Point, Size};

use crate::offset::wrap_into;
use crate::{PageView, Transform3d};

/// Default eye distance for the face perspective (`m34 = -1/500`).
pub const DEFAULT_PERSPECTIVE: f64 = 500.0;

/// Rotation of the face in `slot` at `scroll_offset`, in radians within
/// `[0, 2π)`.
///
/// One page of scrolling turns a face by a quarter turn.
#[must_use]
pub fn face_angle(scroll_offset: f64, slot: isize) -> f64 {
    let turns = scroll_offset - slot as f64;
    wrap_into(turns * FRAC_PI_2, TAU)
}

/// Transform for the face in `slot`.
///
/// A face looking straight at the viewer gets the identity, without any
/// perspective term. Other faces are pushed half a viewport width away,
/// turned by the negated [`face_angle`], pulled back, and seen through a
/// perspective with the eye `perspective` units away.
///
/// ```rust
/// use understory_cube_pager::face_transform;
///
/// assert!(face_transform(2.0, 2, 320.0, 500.0).is_identity());
/// assert!(face_transform(2.5, 2, 320.0, 500.0).m34() != 0.0);
/// ```
#[must_use]
pub fn face_transform(
    scroll_offset: f64,
    slot: isize,
    viewport_width: f64,
    perspective: f64,
) -> Transform3d {
    let angle = face_angle(scroll_offset, slot);
    if angle == 0.0 {
        return Transform3d::IDENTITY;
    }
    let half = viewport_width / 2.0;
    Transform3d::perspective(perspective)
        * Transform3d::from_translation(0.0, 0.0, -half)
        * Transform3d::from_rotation_y(-angle)
        * Transform3d::from_translation(0.0, 0.0, half)
}

/// Center of every face: the viewport center, moved along with the surface's
/// content offset so faces stay fixed on screen while the surface scrolls.
#[must_use]
pub fn face_center(viewport: Size, content_offset_x: f64) -> Point {
    Point::new(
        viewport.width / 2.0 + content_offset_x,
        viewport.height / 2.0,
    )
}

/// Applies frame and transform to a page view, preserving the view's own
/// scroll position across the change.
pub(crate) fn place_face<V: PageView>(
    view: &mut V,
    bounds: Size,
    center: Point,
    transform: Transform3d,
) {
    let inner = view.inner_scroll_offset();
    view.set_frame(bounds, center);
    view.set_transform(transform);
    if let Some(inner) = inner {
        view.set_inner_scroll_offset(inner);
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, PI};

    use kurbo::{Point, Size};

    use super::{DEFAULT_PERSPECTIVE, face_angle, face_center, face_transform};

    const EPS: f64 = 1e-9;

    #[test]
    fn angle_is_a_quarter_turn_per_page() {
        assert_eq!(face_angle(1.0, 1), 0.0);
        assert!((face_angle(1.0, 0) - FRAC_PI_2).abs() < EPS);
        assert!((face_angle(0.0, 1) - 3.0 * FRAC_PI_2).abs() < EPS);
        assert!((face_angle(0.5, 0) - FRAC_PI_2 / 2.0).abs() < EPS);
        // Wrap-buffer slot before page 0.
        assert!((face_angle(0.0, -1) - FRAC_PI_2).abs() < EPS);
        // Four pages make a full turn.
        assert_eq!(face_angle(4.0, 0), 0.0);
        assert!((face_angle(-2.0, 0) - PI).abs() < EPS);
    }

    #[test]
    fn resting_face_is_flat() {
        assert!(face_transform(3.0, 3, 400.0, DEFAULT_PERSPECTIVE).is_identity());
    }

    #[test]
    fn previous_face_swings_to_the_left_edge() {
        let w = 400.0;
        // Page 0 while resting on page 1: turned fully away to the left.
        let t = face_transform(1.0, 0, w, DEFAULT_PERSPECTIVE);
        let c = t.map_point(Point::ORIGIN).unwrap();
        assert!(c.x < 0.0, "center x was {}", c.x);
        // Receding faces are foreshortened by the perspective.
        assert!(c.x > -w / 2.0);
        assert!((t.depth_of(Point::ORIGIN) + w / 2.0).abs() < EPS);
    }

    #[test]
    fn next_face_swings_to_the_right_edge() {
        let w = 400.0;
        let t = face_transform(0.0, 1, w, DEFAULT_PERSPECTIVE);
        let c = t.map_point(Point::ORIGIN).unwrap();
        assert!(c.x > 0.0 && c.x < w / 2.0, "center x was {}", c.x);
    }

    #[test]
    fn half_scrolled_faces_meet_at_the_edge() {
        let w = 300.0;
        let offset = 0.5;
        let left = face_transform(offset, 0, w, DEFAULT_PERSPECTIVE);
        let right = face_transform(offset, 1, w, DEFAULT_PERSPECTIVE);
        // The right edge of page 0 and the left edge of page 1 coincide.
        let a = left.map_point(Point::new(w / 2.0, 0.0)).unwrap();
        let b = right.map_point(Point::new(-w / 2.0, 0.0)).unwrap();
        assert!((a.x - b.x).abs() < 1e-6, "{a:?} vs {b:?}");
    }

    #[test]
    fn center_tracks_content_offset() {
        let c = face_center(Size::new(320.0, 480.0), 640.0);
        assert_eq!(c, Point::new(800.0, 240.0));
    }
}
