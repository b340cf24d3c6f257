//! Points on circles, arcs and tangents between circles.

use crate::scalar::{cast, Scalar};
use crate::utils::vector_angle;
use crate::{Point, Segment, Vector};

use alloc::vec::Vec;

/// A circle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Circle<S> {
    pub center: Point<S>,
    pub radius: S,
}

impl<S: Scalar> Circle<S> {
    #[inline]
    pub fn new(center: Point<S>, radius: S) -> Self {
        Circle { center, radius }
    }

    /// The point of the circle at the given angle.
    #[inline]
    pub fn point_at_angle(&self, angle: S) -> Point<S> {
        point_on_circle(angle, self.radius, self.center)
    }

    /// Whether `self` is entirely inside of `outer`.
    ///
    /// Circles touching from the inside are considered contained.
    #[inline]
    pub fn is_within(&self, outer: &Circle<S>) -> bool {
        (outer.center - self.center).length() + self.radius <= outer.radius
    }
}

/// `center + radius * (cos(angle), sin(angle))`.
#[inline]
pub fn point_on_circle<S: Scalar>(angle: S, radius: S, center: Point<S>) -> Point<S> {
    center + Vector::new(angle.cos(), angle.sin()) * radius
}

/// Number of vertices used to approximate an arc spanning `angle` radians, given
/// the number of vertices of a full circle.
///
/// Never less than two.
pub fn arc_vertex_count<S: Scalar>(full_circle_vertices: u32, angle: S) -> usize {
    let fraction = angle.abs() / (S::TWO * S::PI());
    let count: S = (cast::<u32, S>(full_circle_vertices).unwrap_or(S::ZERO) * fraction).round();
    let count = cast::<S, usize>(count).unwrap_or(2);

    count.max(2)
}

/// Points tracing the arc of a circle from `start_angle` to `end_angle`.
///
/// The arc goes counter-clockwise if `end_angle > start_angle` and clockwise
/// otherwise. There are always at least two points and the first and last ones
/// are exactly at the start and end angles.
pub fn points_on_circle<S: Scalar>(
    center: Point<S>,
    radius: S,
    full_circle_vertices: u32,
    start_angle: S,
    end_angle: S,
) -> Vec<Point<S>> {
    let mut output = Vec::new();
    push_points_on_circle(
        center,
        radius,
        full_circle_vertices,
        start_angle,
        end_angle,
        &mut output,
    );

    output
}

/// Same as [`points_on_circle`], appending to an existing vector.
pub fn push_points_on_circle<S: Scalar>(
    center: Point<S>,
    radius: S,
    full_circle_vertices: u32,
    start_angle: S,
    end_angle: S,
    output: &mut Vec<Point<S>>,
) {
    let sweep = end_angle - start_angle;
    let count = arc_vertex_count(full_circle_vertices, sweep);
    let step = sweep / cast::<usize, S>(count - 1).unwrap_or(S::ONE);

    output.reserve(count);
    output.push(point_on_circle(start_angle, radius, center));
    for i in 1..(count - 1) {
        let angle = start_angle + step * cast::<usize, S>(i).unwrap_or(S::ZERO);
        output.push(point_on_circle(angle, radius, center));
    }
    output.push(point_on_circle(end_angle, radius, center));
}

/// Points tracing an arc between two points of a circle.
///
/// The arc starts at the angle of `from` and ends at the angle of `to` (relative
/// to `center`), turning in the requested direction, which may be the long way
/// around.
pub fn make_arc<S: Scalar>(
    center: Point<S>,
    radius: S,
    full_circle_vertices: u32,
    from: Point<S>,
    to: Point<S>,
    clockwise: bool,
) -> Vec<Point<S>> {
    let (start, end) = arc_angles(center, from, to, clockwise);

    points_on_circle(center, radius, full_circle_vertices, start, end)
}

/// Start and end angles of the arc from `from` to `to` around `center` in the
/// requested direction.
///
/// With `clockwise` the end angle is at most the start angle, otherwise it is at
/// least the start angle. The sweep is less than a full turn.
pub fn arc_angles<S: Scalar>(center: Point<S>, from: Point<S>, to: Point<S>, clockwise: bool) -> (S, S) {
    let two_pi = S::TWO * S::PI();
    let start = vector_angle(from - center);
    let mut end = vector_angle(to - center);

    if clockwise && end > start {
        end -= two_pi;
    } else if !clockwise && end < start {
        end += two_pi;
    }

    (start, end)
}

/// The two external tangents of a pair of circles.
///
/// Both segments go from the first circle to the second one. `left` is on the
/// left of the direction `center1 -> center2`, `right` on its right.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CircleTangents<S> {
    pub left: Segment<S>,
    pub right: Segment<S>,
}

impl<S: Scalar> CircleTangents<S> {
    /// The tangent on the requested side.
    #[inline]
    pub fn side(&self, left: bool) -> Segment<S> {
        if left {
            self.left
        } else {
            self.right
        }
    }
}

/// Computes the external tangents of two circles.
///
/// Returns `None` when:
///
/// - the centers coincide,
/// - one circle contains the other (`|center2 - center1| < |radius1 - radius2|`),
/// - the angle between the line of centers and the tangents' normals is within
///   `tolerance` of `0` or `π`, which is the case where the two tangents merge
///   into a single one.
pub fn common_tangents<S: Scalar>(
    center1: Point<S>,
    radius1: S,
    center2: Point<S>,
    radius2: S,
    tolerance: S,
) -> Option<CircleTangents<S>> {
    let d = center2 - center1;
    let distance = d.length();

    if distance == S::ZERO || distance < (radius1 - radius2).abs() {
        return None;
    }

    // The tangent points of each side are along the normal at angle
    // `direction ± delta` where `cos(delta) = (radius1 - radius2) / distance`.
    let theta = ((radius2 - radius1) / distance).min(S::ONE).max(-S::ONE).asin();
    let delta = S::FRAC_PI_2() + theta;

    if delta.abs() <= tolerance || (S::PI() - delta).abs() <= tolerance {
        return None;
    }

    let direction = vector_angle(d);
    let left_normal = Vector::new((direction + delta).cos(), (direction + delta).sin());
    let right_normal = Vector::new((direction - delta).cos(), (direction - delta).sin());

    Some(CircleTangents {
        left: Segment {
            from: center1 + left_normal * radius1,
            to: center2 + left_normal * radius2,
        },
        right: Segment {
            from: center1 + right_normal * radius1,
            to: center2 + right_normal * radius2,
        },
    })
}

#[cfg(test)]
use crate::point;

#[cfg(test)]
fn assert_on_circle(p: Point<f32>, center: Point<f32>, radius: f32) {
    let d = (p - center).length();
    if (d - radius).abs() > 1e-4 {
        panic!("{:?} is not on the circle {:?} r={} (distance {})", p, center, radius, d);
    }
}

#[test]
fn points_on_circle_minimum_count() {
    let center = point(1.0f32, 2.0);
    for &(start, end) in &[(0.0f32, 0.0f32), (0.0, 0.01), (1.0, -1.0), (0.0, 6.0), (-3.0, 3.0)] {
        for &verts in &[0, 1, 2, 16, 100] {
            let points = points_on_circle(center, 3.0, verts, start, end);
            assert!(points.len() >= 2);
            let first = points[0];
            let last = points[points.len() - 1];
            assert!((first - point_on_circle(start, 3.0, center)).length() < 1e-5);
            assert!((last - point_on_circle(end, 3.0, center)).length() < 1e-5);
            for p in &points {
                assert_on_circle(*p, center, 3.0);
            }
        }
    }
}

#[test]
fn points_on_circle_count_and_direction() {
    use core::f32::consts::PI;

    let center = point(0.0f32, 0.0);
    // A half circle with 20 vertices per circle.
    let points = points_on_circle(center, 1.0, 20, 0.0, PI);
    assert_eq!(points.len(), 10);
    // Counter-clockwise: the second point is above the x axis.
    assert!(points[1].y > 0.0);

    let points = points_on_circle(center, 1.0, 20, 0.0, -PI);
    assert_eq!(points.len(), 10);
    assert!(points[1].y < 0.0);
}

#[test]
fn arc_direction() {
    use core::f32::consts::PI;

    let center = point(0.0f32, 0.0);
    let (start, end) = arc_angles(center, point(0.0, -1.0), point(0.0, 1.0), true);
    assert!((start + PI / 2.0).abs() < 1e-6);
    assert!((end + 3.0 * PI / 2.0).abs() < 1e-5);

    // Clockwise from the bottom to the top goes through the left side.
    let arc = make_arc(center, 1.0, 20, point(0.0, -1.0), point(0.0, 1.0), true);
    assert!(arc[arc.len() / 2].x < -0.9);

    let arc = make_arc(center, 1.0, 20, point(0.0, -1.0), point(0.0, 1.0), false);
    assert!(arc[arc.len() / 2].x > 0.9);
}

#[test]
fn common_tangents_equal_radii() {
    let tangents = common_tangents(point(0.0f32, 0.0), 2.0, point(10.0, 0.0), 2.0, 1e-4).unwrap();

    assert!((tangents.left.from - point(0.0, 2.0)).length() < 1e-5);
    assert!((tangents.left.to - point(10.0, 2.0)).length() < 1e-5);
    assert!((tangents.right.from - point(0.0, -2.0)).length() < 1e-5);
    assert!((tangents.right.to - point(10.0, -2.0)).length() < 1e-5);
}

#[test]
fn common_tangents_different_radii() {
    let c1 = point(0.0f32, 0.0);
    let c2 = point(10.0, 5.0);
    let tangents = common_tangents(c1, 3.0, c2, 1.0, 1e-4).unwrap();

    for tangent in &[tangents.left, tangents.right] {
        assert_on_circle(tangent.from, c1, 3.0);
        assert_on_circle(tangent.to, c2, 1.0);
        // The tangent is perpendicular to the radius at both ends.
        let v = tangent.to_vector();
        assert!(v.dot(tangent.from - c1).abs() < 1e-3);
        assert!(v.dot(tangent.to - c2).abs() < 1e-3);
    }

    let direction = c2 - c1;
    assert!(crate::utils::determinant(direction, tangents.left.from - c1) > 0.0);
    assert!(crate::utils::determinant(direction, tangents.right.from - c1) < 0.0);
}

#[test]
fn common_tangents_failures() {
    let c = point(3.0f32, 4.0);
    // Identical circles.
    assert!(common_tangents(c, 2.0, c, 2.0, 1e-4).is_none());
    // Concentric circles.
    assert!(common_tangents(c, 2.0, c, 1.0, 1e-4).is_none());
    // One circle strictly inside the other.
    assert!(common_tangents(c, 5.0, point(4.0, 4.0), 1.0, 1e-4).is_none());
    assert!(common_tangents(point(4.0, 4.0), 1.0, c, 5.0, 1e-4).is_none());
    // Internally tangent circles only have a single common tangent.
    assert!(common_tangents(c, 5.0, point(5.0, 4.0), 3.0, 1e-4).is_none());
}

#[test]
fn circle_within_circle() {
    let outer = Circle::new(point(0.0f32, 0.0), 5.0);
    assert!(Circle::new(point(1.0, 1.0), 1.0).is_within(&outer));
    assert!(Circle::new(point(3.0, 0.0), 2.0).is_within(&outer));
    assert!(!Circle::new(point(4.0, 0.0), 2.0).is_within(&outer));
    assert!(!outer.is_within(&Circle::new(point(1.0, 1.0), 1.0)));
}
