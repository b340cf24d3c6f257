use crate::scalar::Scalar;
use crate::traits::Transformation;
use crate::utils::{determinant, exponent, ldexp};
use crate::{point, Box2D, Point, Vector};

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Segment<S> {
    pub from: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> Segment<S> {
    #[inline]
    pub fn new(from: Point<S>, to: Point<S>) -> Self {
        Segment { from, to }
    }

    /// A zero-length segment.
    #[inline]
    pub fn point(p: Point<S>) -> Self {
        Segment { from: p, to: p }
    }

    /// Evaluate the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn eval(&self, t: S) -> Point<S> {
        self.from.lerp(self.to, t)
    }

    /// Returns the vector between this segment's `from` and `to` points.
    #[inline]
    pub fn to_vector(&self) -> Vector<S> {
        self.to - self.from
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.from == self.to
    }

    /// Computes the length of this segment.
    #[inline]
    pub fn length(&self) -> S {
        self.to_vector().length()
    }

    /// Returns an inverted version of this segment where the beginning and the end
    /// points are swapped.
    #[inline]
    pub fn flip(&self) -> Self {
        Segment {
            from: self.to,
            to: self.from,
        }
    }

    /// The middle of the segment, or its only point if it is degenerate.
    #[inline]
    pub fn mid_point(&self) -> Point<S> {
        if self.is_degenerate() {
            return self.from;
        }

        self.eval(S::HALF)
    }

    /// Return the smallest rectangle containing this segment.
    #[inline]
    pub fn bounding_box(&self) -> Box2D<S> {
        Box2D {
            min: point(self.from.x.min(self.to.x), self.from.y.min(self.to.y)),
            max: point(self.from.x.max(self.to.x), self.from.y.max(self.to.y)),
        }
    }

    /// Applies the transform to this segment and returns the results.
    #[inline]
    pub fn transformed<T: Transformation<S>>(&self, transform: &T) -> Self {
        Segment {
            from: transform.transform_point(self.from),
            to: transform.transform_point(self.to),
        }
    }

    /// The parameter of the point of the segment that is closest to `p`.
    ///
    /// Always between 0 and 1, and 0 for degenerate segments.
    pub fn nearest_point_t(&self, p: Point<S>) -> S {
        let v1 = self.to_vector();
        let v2 = p - self.from;
        let square_length = v1.dot(v1);
        if square_length == S::ZERO {
            return S::ZERO;
        }

        (v2.dot(v1) / square_length).max(S::ZERO).min(S::ONE)
    }

    /// Computes the closest point on this segment to `p`.
    #[inline]
    pub fn nearest_point(&self, p: Point<S>) -> Point<S> {
        self.eval(self.nearest_point_t(p))
    }

    /// Computes the distance between this segment and a point.
    #[inline]
    pub fn distance_to_point(&self, p: Point<S>) -> S {
        (self.nearest_point(p) - p).length()
    }

    /// Computes the intersection (if any) between this segment and another one.
    ///
    /// The result is a segment because collinear segments can overlap over an
    /// interval. Segments crossing at a single point, including touching at an
    /// endpoint, produce a zero-length segment at that point.
    ///
    /// Operands that would overflow or underflow the cross products are scaled by
    /// a power of two before solving, and the result is scaled back.
    pub fn intersection(&self, other: &Self) -> Option<Segment<S>> {
        if self == other || (self.from == other.to && self.to == other.from) {
            return Some(*self);
        }

        let max_coord = self
            .from
            .x
            .abs()
            .max(self.from.y.abs())
            .max(self.to.x.abs())
            .max(self.to.y.abs())
            .max(other.from.x.abs())
            .max(other.from.y.abs())
            .max(other.to.x.abs())
            .max(other.to.y.abs());

        if !max_coord.is_finite() {
            return None;
        }

        if !needs_rescale(max_coord) {
            return unscaled_intersection(self, other);
        }

        let exp = exponent(max_coord);
        let a = self.scaled(-exp);
        let b = other.scaled(-exp);

        unscaled_intersection(&a, &b).map(|result| result.scaled(exp))
    }

    /// A single point where the two segments meet.
    ///
    /// If the segments overlap, this is the middle of the overlap.
    #[inline]
    pub fn intersection_point(&self, other: &Self) -> Option<Point<S>> {
        self.intersection(other).map(|overlap| overlap.mid_point())
    }

    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }

    /// Whether `p` is exactly on the segment.
    pub fn contains_point(&self, p: Point<S>) -> bool {
        let v = self.to_vector();
        let w = p - self.from;
        if determinant(v, w) != S::ZERO {
            return false;
        }

        let d = w.dot(v);

        d >= S::ZERO && d <= v.dot(v)
    }

    fn scaled(&self, exp: i32) -> Self {
        Segment {
            from: point(ldexp(self.from.x, exp), ldexp(self.from.y, exp)),
            to: point(ldexp(self.to.x, exp), ldexp(self.to.y, exp)),
        }
    }

    #[inline]
    pub fn to_f32(&self) -> Segment<f32> {
        Segment {
            from: self.from.to_f32(),
            to: self.to.to_f32(),
        }
    }

    #[inline]
    pub fn to_f64(&self) -> Segment<f64> {
        Segment {
            from: self.from.to_f64(),
            to: self.to.to_f64(),
        }
    }
}

/// Whether coordinates of this magnitude can overflow or lose all of their
/// precision in the products of the intersection solve.
///
/// The bounds are derived from the scalar type: differences of coordinates are at
/// most `2 * max` and a determinant sums two products of differences, so `max`
/// must stay below `sqrt(MAX / 8)`. Below `sqrt(MIN_POSITIVE / EPSILON)`, the
/// products are subnormal.
fn needs_rescale<S: Scalar>(max_coord: S) -> bool {
    if max_coord == S::ZERO {
        return false;
    }

    let upper = (S::max_value() / S::EIGHT).sqrt();
    let lower = (S::min_positive_value() / S::epsilon()).sqrt();

    max_coord > upper || max_coord < lower
}

fn unscaled_intersection<S: Scalar>(a: &Segment<S>, b: &Segment<S>) -> Option<Segment<S>> {
    let u = a.to_vector();
    let v = b.to_vector();
    let zero = Vector::new(S::ZERO, S::ZERO);

    // Degenerate segments.
    if u == zero && v == zero {
        return if a.from == b.from {
            Some(Segment::point(a.from))
        } else {
            None
        };
    }
    if u == zero {
        return if b.contains_point(a.from) {
            Some(Segment::point(a.from))
        } else {
            None
        };
    }
    if v == zero {
        return if a.contains_point(b.from) {
            Some(Segment::point(b.from))
        } else {
            None
        };
    }

    let w = b.from - a.from;
    let det = determinant(u, v);

    if det == S::ZERO {
        if determinant(u, w) != S::ZERO {
            // Parallel.
            return None;
        }

        return collinear_overlap(a, b);
    }

    // An endpoint exactly on the other segment's line is the only possible
    // intersection. Return it as is instead of going through the division.
    for &(p, segment) in &[(b.from, a), (b.to, a), (a.from, b), (a.to, b)] {
        if determinant(segment.to_vector(), p - segment.from) == S::ZERO {
            return if segment.contains_point(p) {
                Some(Segment::point(p))
            } else {
                None
            };
        }
    }

    let t = determinant(w, v) / det;
    let s = determinant(w, u) / det;

    if t < S::ZERO || t > S::ONE || s < S::ZERO || s > S::ONE {
        return None;
    }

    Some(Segment::point(a.from + u * t))
}

fn collinear_overlap<S: Scalar>(a: &Segment<S>, b: &Segment<S>) -> Option<Segment<S>> {
    let u = a.to_vector();
    let square_length = u.dot(u);

    let mut start = ((b.from - a.from).dot(u) / square_length, b.from);
    let mut end = ((b.to - a.from).dot(u) / square_length, b.to);
    if start.0 > end.0 {
        core::mem::swap(&mut start, &mut end);
    }

    // Clamp the overlap to the first segment, keeping exact endpoints.
    if start.0 < S::ZERO {
        start = (S::ZERO, a.from);
    }
    if end.0 > S::ONE {
        end = (S::ONE, a.to);
    }

    if start.0 > end.0 {
        return None;
    }

    Some(Segment {
        from: start.1,
        to: end.1,
    })
}

#[cfg(test)]
fn fuzzy_eq_point(a: Point<f32>, b: Point<f32>, epsilon: f32) -> bool {
    f32::abs(a.x - b.x) <= epsilon && f32::abs(a.y - b.y) <= epsilon
}

#[test]
fn intersection_rotated() {
    use core::f32::consts::PI;
    let epsilon = 0.0001;
    let count: u32 = 100;

    for i in 0..count {
        for j in 0..count {
            if i % (count / 2) == j % (count / 2) {
                // avoid the colinear case.
                continue;
            }

            let angle1 = i as f32 / (count as f32) * 2.0 * PI;
            let angle2 = j as f32 / (count as f32) * 2.0 * PI;

            let l1 = Segment {
                from: point(10.0 * angle1.cos(), 10.0 * angle1.sin()),
                to: point(-10.0 * angle1.cos(), -10.0 * angle1.sin()),
            };

            let l2 = Segment {
                from: point(10.0 * angle2.cos(), 10.0 * angle2.sin()),
                to: point(-10.0 * angle2.cos(), -10.0 * angle2.sin()),
            };

            assert!(l1.intersects(&l2));
            assert!(fuzzy_eq_point(
                l1.intersection_point(&l2).unwrap(),
                point(0.0, 0.0),
                epsilon
            ));
        }
    }
}

#[test]
fn intersection_known_point() {
    let l1 = Segment::new(point(0.0f32, 0.0), point(10.0, 10.0));
    let l2 = Segment::new(point(0.0, 10.0), point(10.0, 0.0));
    let p = l1.intersection_point(&l2).unwrap();
    assert!(fuzzy_eq_point(p, point(5.0, 5.0), 1e-5));

    let l3 = Segment::new(point(1.0f32, 3.0), point(7.0, 3.0));
    let l4 = Segment::new(point(2.0, 0.0), point(2.0, 8.0));
    let p = l3.intersection(&l4).unwrap();
    assert!(p.is_degenerate());
    assert!(fuzzy_eq_point(p.from, point(2.0, 3.0), 1e-5));
}

#[test]
fn intersection_touching() {
    let l1 = Segment::new(point(0.0f32, 0.0), point(10.0, 10.0));
    let l2 = Segment::new(point(10.0, 10.0), point(10.0, 0.0));

    assert_eq!(l1.intersection_point(&l2), Some(point(10.0, 10.0)));

    // T junction.
    let l3 = Segment::new(point(0.0f32, 0.0), point(0.0, 10.0));
    let l4 = Segment::new(point(0.0, 5.0), point(10.0, 5.0));
    assert_eq!(l3.intersection_point(&l4), Some(point(0.0, 5.0)));
    assert_eq!(l4.intersection_point(&l3), Some(point(0.0, 5.0)));
}

#[test]
fn intersection_missing() {
    let l1 = Segment::new(point(0.0f32, 0.0), point(10.0, 0.0));
    let l2 = Segment::new(point(5.0, 1.0), point(5.0, 10.0));
    assert!(!l1.intersects(&l2));

    // The supporting line of l4 crosses l3 but not the segment itself.
    let l3 = Segment::new(point(0.0f32, 0.0), point(10.0, 0.0));
    let l4 = Segment::new(point(11.0, -1.0), point(12.0, -2.0));
    assert!(!l3.intersects(&l4));

    // An endpoint on the other segment's supporting line, outside of it.
    let l5 = Segment::new(point(20.0f32, 0.0), point(20.0, 5.0));
    assert!(!l1.intersects(&l5));
}

#[test]
fn intersection_parallel() {
    let l1 = Segment::new(point(0.0f32, 0.0), point(10.0, 0.0));
    let l2 = Segment::new(point(0.0, 1.0), point(10.0, 1.0));
    assert!(!l1.intersects(&l2));
    assert!(l1.intersection(&l2).is_none());

    let l3 = Segment::new(point(0.0f32, 0.0), point(3.0, 4.0));
    let l4 = Segment::new(point(1.0, 0.0), point(4.0, 4.0));
    assert!(!l3.intersects(&l4));
}

#[test]
fn intersection_overlap() {
    let l1 = Segment::new(point(0.0f32, 0.0), point(10.0, 0.0));
    let l2 = Segment::new(point(5.0, 0.0), point(15.0, 0.0));

    assert_eq!(
        l1.intersection(&l2),
        Some(Segment::new(point(5.0, 0.0), point(10.0, 0.0)))
    );
    assert_eq!(l1.intersection_point(&l2), Some(point(7.5, 0.0)));

    // Reversed direction.
    let l3 = Segment::new(point(15.0f32, 0.0), point(5.0, 0.0));
    assert_eq!(
        l1.intersection(&l3),
        Some(Segment::new(point(5.0, 0.0), point(10.0, 0.0)))
    );

    // Collinear, touching at one end.
    let l4 = Segment::new(point(10.0f32, 0.0), point(20.0, 0.0));
    assert_eq!(l1.intersection(&l4), Some(Segment::point(point(10.0, 0.0))));

    // Collinear, disjoint.
    let l5 = Segment::new(point(11.0f32, 0.0), point(20.0, 0.0));
    assert!(l1.intersection(&l5).is_none());

    // Identical and exactly reversed.
    assert_eq!(l1.intersection(&l1), Some(l1));
    assert_eq!(l1.intersection(&l1.flip()), Some(l1));
}

#[test]
fn intersection_degenerate() {
    let l1 = Segment::new(point(0.0f32, 0.0), point(10.0, 0.0));
    let p1 = Segment::point(point(3.0f32, 0.0));
    let p2 = Segment::point(point(3.0f32, 1.0));

    assert_eq!(l1.intersection(&p1), Some(p1));
    assert_eq!(p1.intersection(&l1), Some(p1));
    assert!(l1.intersection(&p2).is_none());
    assert_eq!(p1.intersection(&p1), Some(p1));
    assert!(p1.intersection(&p2).is_none());
}

#[test]
fn intersection_extreme_magnitudes() {
    for &scale in &[1e30f32, 1e-30, 1e18, 1.0] {
        let l1 = Segment::new(point(-2.0 * scale, scale), point(2.0 * scale, scale));
        let l2 = Segment::new(point(0.5 * scale, -3.0 * scale), point(0.5 * scale, 3.0 * scale));

        let p = l1.intersection_point(&l2).unwrap();
        assert!(((p.x - 0.5 * scale) / scale).abs() < 1e-5, "{:?} {}", p, scale);
        assert!(((p.y - scale) / scale).abs() < 1e-5, "{:?} {}", p, scale);

        let l3 = Segment::new(point(-scale, -scale), point(scale, scale));
        let l4 = Segment::new(point(-scale, scale), point(scale, -scale));
        let p = l3.intersection_point(&l4).unwrap();
        assert!((p.x / scale).abs() < 1e-5 && (p.y / scale).abs() < 1e-5, "{:?} {}", p, scale);

        let parallel = Segment::new(point(-scale, 0.0), point(scale, 2.0 * scale));
        assert!(!l3.intersects(&parallel));
    }
}

#[test]
fn intersection_f64() {
    let l1 = Segment::new(point(0.0f64, 0.0), point(1e200, 1e200));
    let l2 = Segment::new(point(0.0, 1e200), point(1e200, 0.0));
    let p = l1.intersection_point(&l2).unwrap();
    assert!((p.x / 5e199 - 1.0).abs() < 1e-9);
    assert!((p.y / 5e199 - 1.0).abs() < 1e-9);
}

#[test]
fn nearest_point() {
    let l = Segment::new(point(0.0f32, 0.0), point(10.0, 0.0));
    assert_eq!(l.nearest_point(point(5.0, 3.0)), point(5.0, 0.0));
    assert_eq!(l.nearest_point(point(-5.0, 3.0)), point(0.0, 0.0));
    assert_eq!(l.nearest_point(point(15.0, -3.0)), point(10.0, 0.0));
    assert_eq!(l.nearest_point_t(point(2.5, 1.0)), 0.25);
    assert_eq!(l.distance_to_point(point(5.0, 3.0)), 3.0);

    let p = Segment::point(point(1.0f32, 1.0));
    assert_eq!(p.nearest_point(point(5.0, 3.0)), point(1.0, 1.0));
}

#[test]
fn eval_and_bounds() {
    let l = Segment::new(point(4.0f32, 0.0), point(0.0, 8.0));
    assert_eq!(l.eval(0.0), point(4.0, 0.0));
    assert_eq!(l.eval(1.0), point(0.0, 8.0));
    assert_eq!(l.eval(0.5), point(2.0, 4.0));
    assert_eq!(l.bounding_box(), Box2D { min: point(0.0, 0.0), max: point(4.0, 8.0) });
}
