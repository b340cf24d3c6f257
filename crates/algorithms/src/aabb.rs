//! Bounding rectangle computation for point sets.

use crate::math::{point, Box2D, Point, Segment};

/// Computes the smallest axis-aligned rectangle that contains the points.
///
/// Returns an empty rectangle at the origin if there is no point.
pub fn bounding_box<Iter, Item>(points: Iter) -> Box2D
where
    Iter: IntoIterator<Item = Item>,
    Item: MinMax,
{
    try_bounding_box(points).unwrap_or_else(Box2D::zero)
}

/// Computes the smallest axis-aligned rectangle that contains the points, or `None`
/// if there is no point.
pub fn try_bounding_box<Iter, Item>(points: Iter) -> Option<Box2D>
where
    Iter: IntoIterator<Item = Item>,
    Item: MinMax,
{
    let mut min = point(f32::MAX, f32::MAX);
    let mut max = point(f32::MIN, f32::MIN);
    let mut empty = true;

    for item in points {
        item.min_max(&mut min, &mut max);
        empty = false;
    }

    if empty {
        return None;
    }

    Some(Box2D { min, max })
}

/// The smallest rectangle containing both rectangles, treating `None` as empty.
pub fn union(a: Option<Box2D>, b: Option<Box2D>) -> Option<Box2D> {
    match (a, b) {
        (Some(a), Some(b)) => Some(Box2D {
            min: Point::min(a.min, b.min),
            max: Point::max(a.max, b.max),
        }),
        (a, None) => a,
        (None, b) => b,
    }
}

#[doc(hidden)]
pub trait MinMax {
    fn min_max(&self, min: &mut Point, max: &mut Point);
}

impl MinMax for Point {
    fn min_max(&self, min: &mut Point, max: &mut Point) {
        *min = Point::min(*min, *self);
        *max = Point::max(*max, *self);
    }
}

impl<'l, T: MinMax> MinMax for &'l T {
    fn min_max(&self, min: &mut Point, max: &mut Point) {
        (*self).min_max(min, max);
    }
}

impl MinMax for Segment {
    fn min_max(&self, min: &mut Point, max: &mut Point) {
        self.from.min_max(min, max);
        self.to.min_max(min, max);
    }
}

#[test]
fn simple_bounding_box() {
    let points = [
        point(-10.0, -3.0),
        point(0.0, -12.0),
        point(3.0, 4.0),
        point(5.0, 3.0),
    ];

    assert_eq!(
        bounding_box(&points),
        Box2D {
            min: point(-10.0, -12.0),
            max: point(5.0, 4.0)
        },
    );

    assert_eq!(
        bounding_box(points.iter().copied()),
        Box2D {
            min: point(-10.0, -12.0),
            max: point(5.0, 4.0)
        },
    );
}

#[test]
fn empty_bounding_box() {
    let points: [Point; 0] = [];
    assert!(try_bounding_box(&points).is_none());
    assert_eq!(bounding_box(&points), Box2D::zero());
}

#[test]
fn single_point_bounding_box() {
    let b = bounding_box(&[point(1.0, 2.0)]);
    assert_eq!(b.min, point(1.0, 2.0));
    assert_eq!(b.max, point(1.0, 2.0));
}

#[test]
fn union_of_boxes() {
    let a = Box2D {
        min: point(0.0, 0.0),
        max: point(1.0, 1.0),
    };
    let b = Box2D {
        min: point(-1.0, 0.5),
        max: point(0.5, 3.0),
    };

    assert_eq!(
        union(Some(a), Some(b)),
        Some(Box2D {
            min: point(-1.0, 0.0),
            max: point(1.0, 3.0)
        })
    );
    assert_eq!(union(Some(a), None), Some(a));
    assert_eq!(union(None, Some(b)), Some(b));
    assert_eq!(union(None, None), None);
}

#[test]
fn segment_bounding_box() {
    let segments = [
        Segment::new(point(0.0, 0.0), point(2.0, -1.0)),
        Segment::new(point(1.0, 5.0), point(-3.0, 1.0)),
    ];

    assert_eq!(
        bounding_box(&segments),
        Box2D {
            min: point(-3.0, -1.0),
            max: point(2.0, 5.0)
        },
    );
}
