//! Chisel tips.
//!
//! A chisel nib is modelled as two circles: the head at the sample position and
//! the tail `2 * radius` away in the direction of the stylus orientation. Both have
//! the minor radius of the tip.
//!
//! As the nib rotates, the head and the tail can swap edges between two samples,
//! or both end up on the same edge. A sliding window of three samples is not
//! enough to pair circles across such swaps, so each edge keeps track of the last
//! circle it went around and of the circles it skipped.

use crate::geom::circle::{points_on_circle, push_points_on_circle};
use crate::geom::utils::{determinant, orientation_about_turn, orthogonal, turn_angle, vector_angle};
use crate::geom::RelativePos;
use crate::math::{vector, Point, Segment, Vector};
use crate::tip_utils::{find_circle_tangents, join_line_tangents, TurnPoints};
use crate::MidPoint;

use arrayvec::ArrayVec;
use core::f32::consts::{FRAC_PI_2, PI};
use log::trace;

/// Distance under which a skipped circle is considered to be inside of an edge.
const OUTWARD_TOLERANCE: f32 = 1e-4;

/// One of the two circles of a chisel nib.
///
/// A negative radius marks an undefined circle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SidePoint {
    pub position: Point,
    pub radius: f32,
}

impl SidePoint {
    pub const UNDEFINED: Self = SidePoint {
        position: Point::new(0.0, 0.0),
        radius: -1.0,
    };

    #[inline]
    pub fn new(position: Point, radius: f32) -> Self {
        SidePoint { position, radius }
    }

    #[inline]
    pub fn is_defined(&self) -> bool {
        self.radius >= 0.0
    }
}

/// The head and tail circles of the nib of a sample.
fn nib(point: &MidPoint) -> [SidePoint; 2] {
    let radius = point.tip_size.radius_minor;
    [
        SidePoint::new(point.screen_position, radius),
        SidePoint::new(point.nib_tail(), radius),
    ]
}

fn nib_center(point: &MidPoint) -> Point {
    point.screen_position.lerp(point.nib_tail(), 0.5)
}

fn direction(from: Point, to: Point) -> Vector {
    let d = to - from;
    let length = d.length();
    if length > 0.0 && length.is_finite() {
        d / length
    } else {
        vector(1.0, 0.0)
    }
}

/// The circle reaching farthest along `normal`. The head wins ties.
fn extreme(circles: &[SidePoint], normal: Vector) -> SidePoint {
    let reach = |c: &SidePoint| c.position.to_vector().dot(normal) + c.radius;

    let mut best = circles[0];
    for c in &circles[1..] {
        if reach(c) > reach(&best) {
            best = *c;
        }
    }

    best
}

/// Whether `test` is on the left of the turn of nib centers.
///
/// Points on the turn itself are classified with respect to the outgoing
/// direction, then with `fallback`.
fn is_on_left(start: Point, middle: Point, end: Point, out_direction: Vector, test: Point, fallback: bool) -> bool {
    match orientation_about_turn(start, middle, end, test) {
        RelativePos::Left => true,
        RelativePos::Right => false,
        RelativePos::Collinear | RelativePos::Indeterminate => {
            let det = determinant(out_direction, test - middle);
            if det > 0.0 {
                true
            } else if det < 0.0 {
                false
            } else {
                fallback
            }
        }
    }
}

/// The state of one edge of a chisel stroke.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Side {
    is_left: bool,
    /// The last circle the edge went around.
    current: SidePoint,
    /// A circle of this side's extreme that the edge skipped because both nib
    /// circles went to the other side.
    pending: Option<SidePoint>,
}

impl Side {
    fn new(is_left: bool) -> Self {
        Side {
            is_left,
            current: SidePoint::UNDEFINED,
            pending: None,
        }
    }

    fn name(&self) -> &'static str {
        if self.is_left {
            "left"
        } else {
            "right"
        }
    }

    fn clear(&mut self) {
        self.current = SidePoint::UNDEFINED;
        self.pending = None;
    }

    fn outward_normal(&self, direction: Vector) -> Vector {
        let n = orthogonal(direction);
        if self.is_left {
            n
        } else {
            -n
        }
    }

    fn tangent(&self, from: SidePoint, to: SidePoint) -> Segment {
        find_circle_tangents(from.position, from.radius, to.position, to.radius).side(self.is_left)
    }

    /// Whether `circle` reaches past the edge going from the current circle to
    /// `next`.
    fn pokes_out(&self, circle: SidePoint, next: SidePoint) -> bool {
        let edge = self.tangent(self.current, next);
        let v = edge.to_vector();
        let length = v.length();
        if length == 0.0 || !length.is_finite() {
            return false;
        }

        let mut distance = determinant(v, circle.position - edge.from) / length;
        if !self.is_left {
            distance = -distance;
        }

        distance + circle.radius > OUTWARD_TOLERANCE
    }

    /// Joins the edge around `at`, coming from the current circle and leaving
    /// toward `next`.
    fn join(&self, at: SidePoint, next: SidePoint, turn_vertices: u32, output: &mut Vec<Point>) {
        let in_tangent = self.tangent(self.current, at);
        let out_tangent = self.tangent(at, next);
        let angle = turn_angle(self.current.position, at.position, next.position);

        join_line_tangents(
            at.position,
            at.radius,
            &in_tangent,
            &out_tangent,
            angle,
            self.is_left,
            turn_vertices,
            output,
        );
    }

    fn advance(&mut self, circle: SidePoint, look_ahead: SidePoint, turn_vertices: u32, output: &mut Vec<Point>) {
        if !self.current.is_defined() {
            self.current = circle;
            self.pending = None;
            return;
        }

        if let Some(pending) = self.pending.take() {
            if self.pokes_out(pending, circle) {
                trace!("chisel: the {} edge goes around a skipped circle", self.name());
                self.join(pending, circle, turn_vertices, output);
                self.current = pending;
            }
        }

        self.join(circle, look_ahead, turn_vertices, output);
        self.current = circle;
    }

    /// The points of the pending turn, if any, for an edge ending at `last`.
    fn pending_points(&self, last: SidePoint, turn_vertices: u32) -> Vec<Point> {
        let mut output = Vec::new();
        if let Some(pending) = self.pending {
            if self.current.is_defined() && self.pokes_out(pending, last) {
                self.join(pending, last, turn_vertices, &mut output);
            }
        }

        output
    }
}

/// Chisel tip.
#[derive(Clone, Debug, PartialEq)]
pub struct ChiselTip {
    left: Side,
    right: Side,
    /// Which edge the head went to at the previous turn.
    head_on_left: Option<bool>,
}

impl ChiselTip {
    pub fn new() -> Self {
        ChiselTip {
            left: Side::new(true),
            right: Side::new(false),
            head_on_left: None,
        }
    }

    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
        self.head_on_left = None;
    }

    /// The last circle each edge went around, left first.
    pub fn current_side_points(&self) -> (SidePoint, SidePoint) {
        (self.left.current, self.right.current)
    }

    pub fn add_turn_points(
        &mut self,
        start: &MidPoint,
        middle: &MidPoint,
        end: &MidPoint,
        turn_vertices: u32,
        output: &mut TurnPoints,
    ) {
        let start_nib = nib(start);
        let middle_nib = nib(middle);
        let end_nib = nib(end);
        let cs = nib_center(start);
        let cm = nib_center(middle);
        let ce = nib_center(end);
        let in_direction = direction(cs, cm);
        let out_direction = direction(cm, ce);

        for side in &mut [&mut self.left, &mut self.right] {
            if !side.current.is_defined() {
                side.current = extreme(&start_nib, side.outward_normal(in_direction));
            }
        }

        let head_left = is_on_left(cs, cm, ce, out_direction, middle_nib[0].position, true);
        let tail_left = is_on_left(cs, cm, ce, out_direction, middle_nib[1].position, false);

        if self.head_on_left == Some(!head_left) {
            trace!("chisel: the head moved to the {} edge", if head_left { "left" } else { "right" });
        }
        self.head_on_left = Some(head_left);

        let mut left_circles: ArrayVec<SidePoint, 2> = ArrayVec::new();
        let mut right_circles: ArrayVec<SidePoint, 2> = ArrayVec::new();
        for &(circle, on_left) in &[(middle_nib[0], head_left), (middle_nib[1], tail_left)] {
            if on_left {
                left_circles.push(circle);
            } else {
                right_circles.push(circle);
            }
        }

        if left_circles.len() == 1 {
            let left_look_ahead = extreme(&end_nib, self.left.outward_normal(out_direction));
            let right_look_ahead = extreme(&end_nib, self.right.outward_normal(out_direction));
            self.left.advance(left_circles[0], left_look_ahead, turn_vertices, &mut output.left);
            self.right.advance(right_circles[0], right_look_ahead, turn_vertices, &mut output.right);
            return;
        }

        let is_left = left_circles.len() == 2;
        let circles = if is_left { &left_circles } else { &right_circles };
        trace!("chisel: both nib circles on the {} edge", if is_left { "left" } else { "right" });

        let (side, other) = if is_left {
            (&mut self.left, &mut self.right)
        } else {
            (&mut self.right, &mut self.left)
        };

        let from = side.current.position;
        let (first, second) = if (circles[1].position - from).square_length()
            < (circles[0].position - from).square_length()
        {
            (circles[1], circles[0])
        } else {
            (circles[0], circles[1])
        };

        let look_ahead = extreme(&end_nib, side.outward_normal(out_direction));
        let edge = output.side_mut(is_left);
        side.advance(first, second, turn_vertices, edge);
        side.advance(second, look_ahead, turn_vertices, edge);

        other.pending = Some(extreme(circles, other.outward_normal(in_direction)));
    }

    /// Goes around the back of the first nib, from its rightmost circle to its
    /// leftmost circle.
    pub fn create_startcap(&self, first: &MidPoint, second: &MidPoint, turn_vertices: u32) -> Vec<Point> {
        let circles = nib(first);
        let d = direction(nib_center(first), nib_center(second));
        let n = orthogonal(d);
        let left = extreme(&circles, n);
        let right = extreme(&circles, -n);
        let a = vector_angle(d);

        let mut points = points_on_circle(right.position, right.radius, turn_vertices, a - FRAC_PI_2, a - PI);
        push_points_on_circle(left.position, left.radius, turn_vertices, a - PI, a - 3.0 * FRAC_PI_2, &mut points);
        points.dedup();

        points
    }

    /// Goes around the front of the last nib, from its leftmost circle to its
    /// rightmost circle.
    ///
    /// Turns that an edge skipped and did not get to go around yet are emitted
    /// before (left edge) or after (right edge) the cap.
    pub fn create_endcap(&self, previous: &MidPoint, last: &MidPoint, turn_vertices: u32) -> Vec<Point> {
        let circles = nib(last);
        let d = direction(nib_center(previous), nib_center(last));
        let n = orthogonal(d);
        let left = extreme(&circles, n);
        let right = extreme(&circles, -n);
        let a = vector_angle(d);

        let mut points = self.left.pending_points(left, turn_vertices);
        push_points_on_circle(left.position, left.radius, turn_vertices, a + FRAC_PI_2, a, &mut points);
        push_points_on_circle(right.position, right.radius, turn_vertices, a, a - FRAC_PI_2, &mut points);

        let mut right_pending = self.right.pending_points(right, turn_vertices);
        right_pending.reverse();
        points.extend(right_pending);
        points.dedup();

        points
    }

    /// The convex hull of the two circles of the nib.
    pub fn create_dot(&self, point: &MidPoint, turn_vertices: u32) -> Vec<Point> {
        let [head, tail] = nib(point);
        if head.position == tail.position {
            return super::full_circle(head.position, head.radius, turn_vertices);
        }

        let a = vector_angle(tail.position - head.position);
        let mut points = points_on_circle(head.position, head.radius, turn_vertices, a + FRAC_PI_2, a + 3.0 * FRAC_PI_2);
        push_points_on_circle(tail.position, tail.radius, turn_vertices, a - FRAC_PI_2, a + FRAC_PI_2, &mut points);
        points.dedup();

        points
    }
}

impl Default for ChiselTip {
    fn default() -> Self {
        ChiselTip::new()
    }
}

#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::{StylusState, TipSize};

#[cfg(test)]
fn chisel_sample(x: f32, y: f32, orientation: f32) -> MidPoint {
    MidPoint::new(
        point(x, y),
        TipSize::new(1.0, 0.5),
        0.0,
        StylusState::DEFAULT.with_orientation(orientation),
    )
}

#[cfg(test)]
fn is_on_circle(p: Point, center: Point, radius: f32) -> bool {
    ((p - center).length() - radius).abs() < 1e-3
}

#[test]
fn nib_circles() {
    let s = chisel_sample(1.0, 1.0, FRAC_PI_2);
    let [head, tail] = nib(&s);
    assert_eq!(head.position, point(1.0, 1.0));
    assert_eq!(head.radius, 0.5);
    assert!((tail.position - point(1.0, 3.0)).length() < 1e-5);
    assert!((nib_center(&s) - point(1.0, 2.0)).length() < 1e-5);
    assert!(!SidePoint::UNDEFINED.is_defined());
}

#[test]
fn both_circles_on_the_outer_side() {
    use core::f32::consts::FRAC_PI_4;

    let a = chisel_sample(0.0, 0.0, FRAC_PI_4);
    let b = chisel_sample(10.0, 0.0, FRAC_PI_4);
    let c = chisel_sample(10.0, 10.0, FRAC_PI_4);

    let mut tip = ChiselTip::new();
    let mut output = TurnPoints::new();
    tip.add_turn_points(&a, &b, &c, 24, &mut output);

    // The nib straddles the outside of the left turn, so the right edge goes
    // around both circles and the left edge waits.
    let [head, tail] = nib(&b);
    assert!(output.left.is_empty());
    assert!(!output.right.is_empty());
    assert!(output.right.iter().any(|p| is_on_circle(*p, head.position, 0.5)));
    assert!(output.right.iter().any(|p| is_on_circle(*p, tail.position, 0.5)));
    for p in &output.right {
        assert!(is_on_circle(*p, head.position, 0.5) || is_on_circle(*p, tail.position, 0.5));
    }

    let (left, right) = tip.current_side_points();
    assert_eq!(left, nib(&a)[1]);
    assert_eq!(right, tail);
    assert!(tip.left.pending.is_some());

    tip.clear();
    assert!(!tip.current_side_points().0.is_defined());
    assert!(tip.left.pending.is_none());
}

#[test]
fn opposite_sides() {
    let a = chisel_sample(0.0, 0.0, FRAC_PI_2);
    let b = chisel_sample(10.0, 0.0, FRAC_PI_2);
    let c = chisel_sample(20.0, 0.0, FRAC_PI_2);

    let mut tip = ChiselTip::new();
    let mut output = TurnPoints::new();
    tip.add_turn_points(&a, &b, &c, 24, &mut output);

    // A nib across the direction of travel: the tail is on the left.
    let (left, right) = tip.current_side_points();
    let [head, tail] = nib(&b);
    assert_eq!(left, tail);
    assert_eq!(right, head);

    assert_eq!(output.left.len(), 1);
    assert_eq!(output.right.len(), 1);
    assert!((output.left[0] - point(10.0, 2.5)).length() < 1e-4);
    assert!((output.right[0] - point(10.0, -0.5)).length() < 1e-4);
}

#[test]
fn skipped_circle_is_caught_up() {
    let mut side = Side::new(false);
    side.current = SidePoint::new(point(0.0, 0.0), 0.5);

    let next = SidePoint::new(point(10.0, 0.0), 0.5);
    assert!(side.pokes_out(SidePoint::new(point(5.0, -2.0), 0.5), next));
    assert!(!side.pokes_out(SidePoint::new(point(5.0, 1.0), 0.5), next));

    side.pending = Some(SidePoint::new(point(5.0, -2.0), 0.5));
    let mut output = Vec::new();
    side.advance(next, SidePoint::new(point(20.0, 0.0), 0.5), 24, &mut output);

    assert!(side.pending.is_none());
    assert_eq!(side.current, next);
    assert!(output.len() >= 3);
    let last = output[output.len() - 1];
    for p in &output[..output.len() - 1] {
        assert!(is_on_circle(*p, point(5.0, -2.0), 0.5));
    }
    assert!((last.y + 0.5).abs() < 1e-3);
    assert!(last.x > 10.0 && last.x < 10.2);
}

#[test]
fn chisel_dot_is_a_stadium() {
    let s = chisel_sample(0.0, 0.0, 0.0);
    let dot = ChiselTip::new().create_dot(&s, 24);

    assert!(dot.len() >= 4);
    let axis = Segment::new(point(0.0, 0.0), point(2.0, 0.0));
    for p in &dot {
        assert!((axis.distance_to_point(*p) - 0.5).abs() < 1e-4);
    }
    assert!(dot.iter().map(|p| p.x).fold(f32::MAX, f32::min) < -0.49);
    assert!(dot.iter().map(|p| p.x).fold(f32::MIN, f32::max) > 2.49);
}

#[test]
fn chisel_caps() {
    let a = chisel_sample(0.0, 0.0, FRAC_PI_2);
    let b = chisel_sample(10.0, 0.0, FRAC_PI_2);
    let tip = ChiselTip::new();

    // From the head (right) around the back to the tail (left).
    let start = tip.create_startcap(&a, &b, 24);
    assert!((start[0] - point(0.0, -0.5)).length() < 1e-4);
    assert!((start[start.len() - 1] - point(0.0, 2.5)).length() < 1e-4);
    for p in &start {
        assert!(p.x <= 1e-4);
    }

    // From the tail (left) around the front to the head (right).
    let end = tip.create_endcap(&a, &b, 24);
    assert!((end[0] - point(10.0, 2.5)).length() < 1e-4);
    assert!((end[end.len() - 1] - point(10.0, -0.5)).length() < 1e-4);
    for p in &end {
        assert!(p.x >= 10.0 - 1e-4);
    }
}
