use crate::geom::circle::make_arc;
use crate::math::Point;
use crate::tip_utils::{add_round_turn_points, find_line_tangents, is_circle_within_circle, TurnPoints};
use crate::MidPoint;

/// Circular tip. Turns and caps are rounded.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RoundTip;

impl RoundTip {
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

    /// Half circle around the back of the first sample, from the start of the
    /// right edge to the start of the left edge.
    pub fn create_startcap(&self, first: &MidPoint, second: &MidPoint, turn_vertices: u32) -> Vec<Point> {
        let tangents = find_line_tangents(first, second);
        make_arc(
            first.screen_position,
            first.tip_size.radius,
            turn_vertices,
            tangents.right.from,
            tangents.left.from,
            true,
        )
    }

    /// Half circle around the front of the last sample, from the end of the left
    /// edge to the end of the right edge.
    pub fn create_endcap(&self, previous: &MidPoint, last: &MidPoint, turn_vertices: u32) -> Vec<Point> {
        let tangents = find_line_tangents(previous, last);
        make_arc(
            last.screen_position,
            last.tip_size.radius,
            turn_vertices,
            tangents.left.to,
            tangents.right.to,
            true,
        )
    }

    pub fn create_dot(&self, point: &MidPoint, turn_vertices: u32) -> Vec<Point> {
        super::full_circle(point.screen_position, point.tip_size.radius, turn_vertices)
    }

    /// A sample whose circle is inside of the previous one adds nothing.
    #[inline]
    pub fn should_drop_new_point(&self, previous: &MidPoint, new: &MidPoint) -> bool {
        is_circle_within_circle(new, previous)
    }

    /// A sample whose circle covers every previous one replaces the whole line.
    pub fn should_prune_before_new_point(&self, points: &[MidPoint], new: &MidPoint) -> bool {
        !points.is_empty() && points.iter().all(|p| is_circle_within_circle(p, new))
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn round_caps() {
    let a = MidPoint::with_radius(point(0.0, 0.0), 2.0);
    let b = MidPoint::with_radius(point(10.0, 0.0), 2.0);

    let start = RoundTip.create_startcap(&a, &b, 20);
    assert_eq!(start.len(), 10);
    assert!((start[0] - point(0.0, -2.0)).length() < 1e-4);
    assert!((start[9] - point(0.0, 2.0)).length() < 1e-4);
    // Around the back.
    for p in &start {
        assert!(p.x <= 1e-4);
    }

    let end = RoundTip.create_endcap(&a, &b, 20);
    assert_eq!(end.len(), 10);
    assert!((end[0] - point(10.0, 2.0)).length() < 1e-4);
    assert!((end[9] - point(10.0, -2.0)).length() < 1e-4);
    // Around the front.
    for p in &end {
        assert!(p.x >= 10.0 - 1e-4);
    }
}

#[test]
fn round_dot() {
    let a = MidPoint::with_radius(point(3.0, 4.0), 2.0);
    let dot = RoundTip.create_dot(&a, 20);
    assert_eq!(dot.len(), 19);
    for p in &dot {
        assert!(((*p - point(3.0, 4.0)).length() - 2.0).abs() < 1e-4);
    }
}

#[test]
fn round_drop_and_prune() {
    let a = MidPoint::with_radius(point(0.0, 0.0), 2.0);
    let inside = MidPoint::with_radius(point(0.5, 0.0), 1.0);
    let outside = MidPoint::with_radius(point(3.0, 0.0), 1.0);
    let huge = MidPoint::with_radius(point(1.0, 0.0), 10.0);

    assert!(RoundTip.should_drop_new_point(&a, &inside));
    assert!(!RoundTip.should_drop_new_point(&a, &outside));

    assert!(RoundTip.should_prune_before_new_point(&[a, outside], &huge));
    assert!(!RoundTip.should_prune_before_new_point(&[a, outside], &inside));
    assert!(!RoundTip.should_prune_before_new_point(&[], &huge));
}
