use crate::math::{vector, Point};
use crate::tip_utils::{add_round_turn_points, find_line_tangents, TurnPoints};
use crate::MidPoint;

/// Square tip. Turns are rounded and caps are flat.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SquareTip;

impl SquareTip {
    #[inline]
    pub fn add_turn_points(
        &self,
        start: &MidPoint,
        middle: &MidPoint,
        end: &MidPoint,
        turn_vertices: u32,
        output: &mut TurnPoints,
    ) {
        add_round_turn_points(start, middle, end, turn_vertices, output);
    }

    /// The end cap of the line travelled backwards.
    pub fn create_startcap(&self, first: &MidPoint, second: &MidPoint, turn_vertices: u32) -> Vec<Point> {
        self.create_endcap(second, first, turn_vertices)
    }

    /// From the end of the left edge, out to the two corners of the square and back
    /// to the end of the right edge.
    pub fn create_endcap(&self, previous: &MidPoint, last: &MidPoint, _turn_vertices: u32) -> Vec<Point> {
        let tangents = find_line_tangents(previous, last);
        let d = last.screen_position - previous.screen_position;
        let length = d.length();
        let direction = if length > 0.0 && length.is_finite() {
            d / length
        } else {
            vector(1.0, 0.0)
        };
        let offset = direction * last.tip_size.radius;

        vec![
            tangents.left.to,
            tangents.left.to + offset,
            tangents.right.to + offset,
            tangents.right.to,
        ]
    }

    /// An axis-aligned square around the sample.
    pub fn create_dot(&self, point: &MidPoint, _turn_vertices: u32) -> Vec<Point> {
        let r = point.tip_size.radius;
        let c = point.screen_position;

        vec![
            c + vector(-r, -r),
            c + vector(r, -r),
            c + vector(r, r),
            c + vector(-r, r),
        ]
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn square_caps() {
    let a = MidPoint::with_radius(point(0.0, 0.0), 2.0);
    let b = MidPoint::with_radius(point(10.0, 0.0), 2.0);

    let end = SquareTip.create_endcap(&a, &b, 20);
    let expected = [
        point(10.0, 2.0),
        point(12.0, 2.0),
        point(12.0, -2.0),
        point(10.0, -2.0),
    ];
    assert_eq!(end.len(), 4);
    for (p, e) in end.iter().zip(expected.iter()) {
        assert!((*p - *e).length() < 1e-4, "{:?} != {:?}", p, e);
    }

    let start = SquareTip.create_startcap(&a, &b, 20);
    let expected = [
        point(0.0, -2.0),
        point(-2.0, -2.0),
        point(-2.0, 2.0),
        point(0.0, 2.0),
    ];
    assert_eq!(start.len(), 4);
    for (p, e) in start.iter().zip(expected.iter()) {
        assert!((*p - *e).length() < 1e-4, "{:?} != {:?}", p, e);
    }
}

#[test]
fn square_dot() {
    let a = MidPoint::with_radius(point(1.0, 1.0), 0.5);
    assert_eq!(
        SquareTip.create_dot(&a, 20),
        vec![
            point(0.5, 0.5),
            point(1.5, 0.5),
            point(1.5, 1.5),
            point(0.5, 1.5),
        ]
    );
}
