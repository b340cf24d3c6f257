//! Tangents between consecutive samples and the geometry joining them at turns.

use crate::geom::circle::{arc_angles, common_tangents, push_points_on_circle};
use crate::geom::utils::{orthogonal, turn_angle};
use crate::geom::CircleTangents;
use crate::math::{vector, Point, Segment};
use crate::MidPoint;

use core::f32::consts::{FRAC_PI_2, PI};

/// Angular tolerance under which two circles are considered to only have a single
/// common tangent.
pub const TANGENT_ANGLE_TOLERANCE: f32 = 1e-4;

/// Points to append to the left and right edges of an outline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurnPoints {
    pub left: Vec<Point>,
    pub right: Vec<Point>,
}

impl TurnPoints {
    pub fn new() -> Self {
        TurnPoints::default()
    }

    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// The edge of the requested side.
    pub fn side_mut(&mut self, left: bool) -> &mut Vec<Point> {
        if left {
            &mut self.left
        } else {
            &mut self.right
        }
    }
}

/// Tangents joining two circles.
///
/// When the circles have no external tangents (one contains the other), falls back
/// to segments offset from the line between the centers by each radius.
pub fn find_circle_tangents(
    start: Point,
    start_radius: f32,
    end: Point,
    end_radius: f32,
) -> CircleTangents<f32> {
    if let Some(tangents) = common_tangents(
        start,
        start_radius,
        end,
        end_radius,
        TANGENT_ANGLE_TOLERANCE,
    ) {
        return tangents;
    }

    let d = end - start;
    let length = d.length();
    let direction = if length > 0.0 && length.is_finite() {
        d / length
    } else {
        vector(1.0, 0.0)
    };
    let normal = orthogonal(direction);

    CircleTangents {
        left: Segment::new(start + normal * start_radius, end + normal * end_radius),
        right: Segment::new(start - normal * start_radius, end - normal * end_radius),
    }
}

/// Tangents of the tip circles of two consecutive samples.
#[inline]
pub fn find_line_tangents(start: &MidPoint, end: &MidPoint) -> CircleTangents<f32> {
    find_circle_tangents(
        start.screen_position,
        start.tip_size.radius,
        end.screen_position,
        end.tip_size.radius,
    )
}

/// Joins the edge coming in along `in_tangent` to the edge leaving along
/// `out_tangent`, around a turn at `turn_point`.
///
/// - If the tangents cross, only the crossing point is emitted.
/// - Otherwise, if the edge is on the side the turn bends away from, an arc of the
///   tip circle is emitted from the end of `in_tangent` to the start of
///   `out_tangent`, clockwise for left edges and counter-clockwise for right
///   edges. Arcs over half a turn are traced the short way round when the turn is
///   shallower than a quarter turn.
/// - Otherwise both tangent endpoints are emitted.
pub fn join_line_tangents(
    turn_point: Point,
    turn_radius: f32,
    in_tangent: &Segment,
    out_tangent: &Segment,
    turn_angle: f32,
    is_left_edge: bool,
    turn_vertices: u32,
    output: &mut Vec<Point>,
) {
    if let Some(p) = in_tangent.intersection_point(out_tangent) {
        output.push(p);
        return;
    }

    let needs_arc = (is_left_edge && turn_angle <= 0.0) || (!is_left_edge && turn_angle >= 0.0);
    if !needs_arc {
        output.push(in_tangent.to);
        output.push(out_tangent.from);
        return;
    }

    let (start, mut end) = arc_angles(turn_point, in_tangent.to, out_tangent.from, is_left_edge);
    if (end - start).abs() > PI && turn_angle.abs() < FRAC_PI_2 {
        if end < start {
            end += 2.0 * PI;
        } else {
            end -= 2.0 * PI;
        }
    }

    push_points_on_circle(turn_point, turn_radius, turn_vertices, start, end, output);
}

/// Joins the outline of a round tip around the turn at `middle`.
pub fn add_round_turn_points(
    start: &MidPoint,
    middle: &MidPoint,
    end: &MidPoint,
    turn_vertices: u32,
    output: &mut TurnPoints,
) {
    let in_tangents = find_line_tangents(start, middle);
    let out_tangents = find_line_tangents(middle, end);
    let angle = turn_angle(
        start.screen_position,
        middle.screen_position,
        end.screen_position,
    );

    for &is_left in &[true, false] {
        join_line_tangents(
            middle.screen_position,
            middle.tip_size.radius,
            &in_tangents.side(is_left),
            &out_tangents.side(is_left),
            angle,
            is_left,
            turn_vertices,
            output.side_mut(is_left),
        );
    }
}

/// Whether the tip circle of `inner` is entirely inside the tip circle of `outer`.
#[inline]
pub fn is_circle_within_circle(inner: &MidPoint, outer: &MidPoint) -> bool {
    inner.circle().is_within(&outer.circle())
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn assert_almost_eq(a: Point, b: Point) {
    if (a - b).length() > 1e-4 {
        panic!("assert almost equal: {:?} != {:?}", a, b);
    }
}

#[test]
fn line_tangents_fallback() {
    // Concentric circles have no external tangents.
    let a = MidPoint::with_radius(point(1.0, 1.0), 2.0);
    let b = MidPoint::with_radius(point(1.0, 1.0), 3.0);
    let tangents = find_line_tangents(&a, &b);
    assert_almost_eq(tangents.left.from, point(1.0, 3.0));
    assert_almost_eq(tangents.left.to, point(1.0, 4.0));
    assert_almost_eq(tangents.right.from, point(1.0, -1.0));
    assert_almost_eq(tangents.right.to, point(1.0, -2.0));

    // A circle inside the other uses the direction between the centers.
    let c = MidPoint::with_radius(point(0.0, 0.0), 5.0);
    let d = MidPoint::with_radius(point(0.0, 1.0), 1.0);
    let tangents = find_line_tangents(&c, &d);
    assert_almost_eq(tangents.left.from, point(-5.0, 0.0));
    assert_almost_eq(tangents.right.to, point(1.0, 1.0));
}

#[test]
fn line_tangents_regular() {
    let a = MidPoint::with_radius(point(0.0, 0.0), 2.0);
    let b = MidPoint::with_radius(point(10.0, 0.0), 2.0);
    let tangents = find_line_tangents(&a, &b);
    assert_almost_eq(tangents.left.from, point(0.0, 2.0));
    assert_almost_eq(tangents.left.to, point(10.0, 2.0));
    assert_almost_eq(tangents.right.from, point(0.0, -2.0));
    assert_almost_eq(tangents.right.to, point(10.0, -2.0));
}

#[test]
fn round_turn_left() {
    let a = MidPoint::with_radius(point(0.0, 0.0), 2.0);
    let b = MidPoint::with_radius(point(10.0, 0.0), 2.0);
    let c = MidPoint::with_radius(point(10.0, 10.0), 2.0);

    let mut output = TurnPoints::new();
    add_round_turn_points(&a, &b, &c, 20, &mut output);

    // The left edge is cut at the crossing of the tangents.
    assert_eq!(output.left.len(), 1);
    assert_almost_eq(output.left[0], point(8.0, 2.0));

    // The right edge goes around the corner.
    assert_eq!(output.right.len(), 5);
    assert_almost_eq(output.right[0], point(10.0, -2.0));
    assert_almost_eq(output.right[4], point(12.0, 0.0));
    for p in &output.right {
        assert!(((*p - point(10.0, 0.0)).length() - 2.0).abs() < 1e-4);
        assert!(p.x >= 10.0 - 1e-4 && p.y <= 1e-4);
    }
}

#[test]
fn round_turn_right() {
    let a = MidPoint::with_radius(point(0.0, 0.0), 2.0);
    let b = MidPoint::with_radius(point(10.0, 0.0), 2.0);
    let c = MidPoint::with_radius(point(10.0, -10.0), 2.0);

    let mut output = TurnPoints::new();
    add_round_turn_points(&a, &b, &c, 20, &mut output);

    assert_eq!(output.right.len(), 1);
    assert_almost_eq(output.right[0], point(8.0, -2.0));

    assert_eq!(output.left.len(), 5);
    assert_almost_eq(output.left[0], point(10.0, 2.0));
    assert_almost_eq(output.left[4], point(12.0, 0.0));
}

#[test]
fn straight_line_has_no_arc() {
    let a = MidPoint::with_radius(point(0.0, 0.0), 1.0);
    let b = MidPoint::with_radius(point(5.0, 0.0), 1.0);
    let c = MidPoint::with_radius(point(10.0, 0.0), 1.0);

    let mut output = TurnPoints::new();
    add_round_turn_points(&a, &b, &c, 20, &mut output);

    // The tangents of both sides are collinear and overlap at the middle sample.
    assert_eq!(output.left.len(), 1);
    assert_eq!(output.right.len(), 1);
    assert_almost_eq(output.left[0], point(5.0, 1.0));
    assert_almost_eq(output.right[0], point(5.0, -1.0));
}

#[test]
fn join_without_crossing_on_the_inner_side() {
    // Tangents that do not cross on the side the turn bends toward are joined by
    // their endpoints.
    let in_tangent = Segment::new(point(0.0, 2.0), point(10.0, 2.0));
    let out_tangent = Segment::new(point(8.0, 3.0), point(8.0, 10.0));
    let mut output = Vec::new();
    join_line_tangents(
        point(10.0, 0.0),
        2.0,
        &in_tangent,
        &out_tangent,
        FRAC_PI_2,
        true,
        20,
        &mut output,
    );

    assert_eq!(output, vec![point(10.0, 2.0), point(8.0, 3.0)]);
}

#[test]
fn circle_within_circle() {
    let big = MidPoint::with_radius(point(0.0, 0.0), 5.0);
    let small = MidPoint::with_radius(point(1.0, 0.0), 1.0);
    assert!(is_circle_within_circle(&small, &big));
    assert!(!is_circle_within_circle(&big, &small));
    assert!(is_circle_within_circle(&big, &big));
}
