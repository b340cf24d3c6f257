//! Scalar and vector predicates shared by the rest of the crate.

use crate::scalar::Scalar;
use crate::{Point, Vector};

/// Where a point lies relative to an oriented line or turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum RelativePos {
    Left,
    Right,
    Collinear,
    /// The reference line or turn is degenerate.
    Indeterminate,
}

impl RelativePos {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            RelativePos::Left => RelativePos::Right,
            RelativePos::Right => RelativePos::Left,
            other => other,
        }
    }

    #[inline]
    pub fn is_left(self) -> bool {
        self == RelativePos::Left
    }

    #[inline]
    pub fn is_right(self) -> bool {
        self == RelativePos::Right
    }

    #[inline]
    fn from_sign<S: Scalar>(det: S) -> Self {
        if det > S::ZERO {
            RelativePos::Left
        } else if det < S::ZERO {
            RelativePos::Right
        } else {
            RelativePos::Collinear
        }
    }
}

/// `u.x * v.y - u.y * v.x`, which is `|u| |v| sin(θ)`.
#[inline]
pub fn determinant<S: Scalar>(u: Vector<S>, v: Vector<S>) -> S {
    u.x * v.y - u.y * v.x
}

/// Rotates `v` by 90 degrees counter-clockwise.
#[inline]
pub fn orthogonal<S: Scalar>(v: Vector<S>) -> Vector<S> {
    Vector::new(-v.y, v.x)
}

/// Normalizes an angle into `(-π, π]`.
pub fn normalize_angle<S: Scalar>(angle: S) -> S {
    let two_pi = S::TWO * S::PI();
    let mut a = angle % two_pi;
    if a <= -S::PI() {
        a += two_pi;
    } else if a > S::PI() {
        a -= two_pi;
    }

    a
}

/// The angle of `v` from the x axis, in `[-π, π]`.
#[inline]
pub fn vector_angle<S: Scalar>(v: Vector<S>) -> S {
    v.y.atan2(v.x)
}

/// Half-width of the band around a line in which `orientation` does not trust
/// the sign of the determinant.
///
/// This is `2 * machine_epsilon * max(|coordinate|)`, measured as a distance from
/// the line `p1 -> p2`.
pub fn orientation_tolerance<S: Scalar>(p1: Point<S>, p2: Point<S>, test: Point<S>) -> S {
    let max_coord = p1
        .x
        .abs()
        .max(p1.y.abs())
        .max(p2.x.abs())
        .max(p2.y.abs())
        .max(test.x.abs())
        .max(test.y.abs());

    S::TWO * S::epsilon() * max_coord
}

/// Which side of the oriented line `p1 -> p2` `test` lies on.
///
/// Returns `Indeterminate` if `p1 == p2`.
///
/// When the test point lies within [`orientation_tolerance`] of the line, the
/// determinant is dominated by rounding errors. In that case the base line is
/// nudged outwards by one ulp at each end and the determinant is evaluated again:
/// the point is only classified as left or right if both evaluations agree,
/// otherwise it is considered collinear. Near-degenerate inputs therefore get a
/// classification that does not depend on which way the rounding went.
pub fn orientation<S: Scalar>(p1: Point<S>, p2: Point<S>, test: Point<S>) -> RelativePos {
    if p1 == p2 {
        return RelativePos::Indeterminate;
    }

    let det = determinant(p2 - p1, test - p1);
    let length = (p2 - p1).length();
    let tolerance = orientation_tolerance(p1, p2, test);

    if det.abs() > tolerance * length {
        return RelativePos::from_sign(det);
    }

    if det == S::ZERO {
        return RelativePos::Collinear;
    }

    let nudged_p1 = Point::new(
        p1.x.next_after(p1.x + (p1.x - p2.x)),
        p1.y.next_after(p1.y + (p1.y - p2.y)),
    );
    let nudged_p2 = Point::new(
        p2.x.next_after(p2.x + (p2.x - p1.x)),
        p2.y.next_after(p2.y + (p2.y - p1.y)),
    );
    let nudged_det = determinant(nudged_p2 - nudged_p1, test - nudged_p1);

    let first = RelativePos::from_sign(det);
    if RelativePos::from_sign(nudged_det) == first {
        first
    } else {
        RelativePos::Collinear
    }
}

/// Signed angle in `(-π, π]` by which the direction changes at `p2` when
/// travelling `p1 -> p2 -> p3`.
///
/// Positive angles are counter-clockwise (left) turns. A degenerate input
/// (coincident points) has a turn angle of zero.
pub fn turn_angle<S: Scalar>(p1: Point<S>, p2: Point<S>, p3: Point<S>) -> S {
    let v_in = p2 - p1;
    let v_out = p3 - p2;
    let angle = determinant(v_in, v_out).atan2(v_in.dot(v_out));

    // atan2 can return exactly -π.
    if angle <= -S::PI() {
        S::PI()
    } else {
        angle
    }
}

/// Orientation of `test` relative to the turn formed by the two segments
/// `start -> middle` and `middle -> end`, each extended infinitely away from
/// `middle`.
///
/// For a left turn, the left region is the wedge between the two half-lines and
/// everything else is on the right; for a right turn it is the other way around.
/// Points on the half-lines are collinear.
///
/// Returns `Indeterminate` if the turn folds back onto itself or if both segments
/// are degenerate.
pub fn orientation_about_turn<S: Scalar>(
    start: Point<S>,
    middle: Point<S>,
    end: Point<S>,
    test: Point<S>,
) -> RelativePos {
    let v_in = middle - start;
    let v_out = end - middle;

    if start == middle && middle == end {
        return RelativePos::Indeterminate;
    }
    if start == middle {
        return orientation(middle, end, test);
    }
    if middle == end {
        return orientation(start, middle, test);
    }

    let turn = orientation(start, middle, end);
    if turn == RelativePos::Collinear && v_in.dot(v_out) < S::ZERO {
        return RelativePos::Indeterminate;
    }

    let o_in = orientation(start, middle, test);
    let o_out = orientation(middle, end, test);

    match turn {
        RelativePos::Left => {
            if o_in.is_left() && o_out.is_left() {
                RelativePos::Left
            } else if o_in.is_right() || o_out.is_right() {
                RelativePos::Right
            } else {
                RelativePos::Collinear
            }
        }
        RelativePos::Right => {
            if o_in.is_right() && o_out.is_right() {
                RelativePos::Right
            } else if o_in.is_left() || o_out.is_left() {
                RelativePos::Left
            } else {
                RelativePos::Collinear
            }
        }
        _ => o_in,
    }
}

/// Multiplies `x` by `2^exp`.
///
/// Powers of two are exact, so the factor is applied in steps that keep every
/// intermediate factor in the normal range.
pub(crate) fn ldexp<S: Scalar>(mut x: S, mut exp: i32) -> S {
    while exp > S::EXPONENT_STEP {
        x = x * S::TWO.powi(S::EXPONENT_STEP);
        exp -= S::EXPONENT_STEP;
    }
    while exp < -S::EXPONENT_STEP {
        x = x * S::TWO.powi(-S::EXPONENT_STEP);
        exp += S::EXPONENT_STEP;
    }

    x * S::TWO.powi(exp)
}

/// The exponent `e` such that `2^e <= |x| < 2^(e + 1)`.
pub(crate) fn exponent<S: Scalar>(x: S) -> i32 {
    let e = x.abs().log2().floor();
    num_traits::cast::<S, i32>(e).unwrap_or(0)
}

#[cfg(test)]
use crate::{point, vector};

#[test]
fn determinant_is_antisymmetric() {
    let vectors = [
        vector(1.0f32, 0.0),
        vector(0.0, 1.0),
        vector(-3.5, 2.25),
        vector(1e6, -7.0),
        vector(0.001, 0.002),
    ];
    for u in &vectors {
        for v in &vectors {
            assert_eq!(determinant(*u, *v), -determinant(*v, *u));
        }
    }

    assert_eq!(determinant(vector(1.0f32, 0.0), vector(0.0, 1.0)), 1.0);
}

#[test]
fn orthogonal_is_counter_clockwise() {
    assert_eq!(orthogonal(vector(1.0f32, 0.0)), vector(0.0, 1.0));
    assert_eq!(orthogonal(vector(0.0f32, 1.0)), vector(-1.0, 0.0));
}

#[test]
fn orientation_basic() {
    let a = point(0.0f32, 0.0);
    let b = point(10.0, 0.0);
    assert_eq!(orientation(a, b, point(5.0, 1.0)), RelativePos::Left);
    assert_eq!(orientation(a, b, point(5.0, -1.0)), RelativePos::Right);
    assert_eq!(orientation(a, b, point(20.0, 0.0)), RelativePos::Collinear);
    assert_eq!(orientation(a, a, point(5.0, 1.0)), RelativePos::Indeterminate);
}

#[test]
fn orientation_near_degenerate_is_stable() {
    let a = point(0.1f32, 0.1);
    let b = point(1000.3, 1000.3);
    let tests = [
        point(500.2f32, 500.2),
        point(333.3, 333.3),
        point(500.2, 500.20004),
        point(2000.7, 2000.7),
    ];

    for test in &tests {
        let first = orientation(a, b, *test);
        for _ in 0..10 {
            assert_eq!(orientation(a, b, *test), first);
        }
        // Points within a couple of ulps of the line are never classified as
        // being on both sides when the line is reversed.
        let reversed = orientation(b, a, *test);
        assert!(
            first == reversed.opposite() || first == RelativePos::Collinear || reversed == RelativePos::Collinear,
            "{:?} {:?}",
            first,
            reversed
        );
    }

    // Far enough from the line, the classification is the obvious one.
    assert_eq!(orientation(a, b, point(500.0, 501.0)), RelativePos::Left);
    assert_eq!(orientation(a, b, point(501.0, 500.0)), RelativePos::Right);
}

#[test]
fn orientation_f64() {
    let a = point(0.0f64, 0.0);
    let b = point(1.0, 1.0);
    assert_eq!(orientation(a, b, point(0.0, 1.0)), RelativePos::Left);
    assert_eq!(orientation(a, b, point(0.5, 0.5)), RelativePos::Collinear);
}

#[test]
fn turn_angle_range() {
    use core::f32::consts::{FRAC_PI_2, PI};

    let o = point(0.0f32, 0.0);
    let x = point(1.0, 0.0);

    assert_eq!(turn_angle(o, x, point(2.0, 0.0)), 0.0);
    assert!((turn_angle(o, x, point(1.0, 1.0)) - FRAC_PI_2).abs() < 1e-6);
    assert!((turn_angle(o, x, point(1.0, -1.0)) + FRAC_PI_2).abs() < 1e-6);
    // Folding back is a half turn, reported as +π.
    assert_eq!(turn_angle(o, x, o), PI);

    for i in 0..64 {
        let a = i as f32 * 0.1;
        let p3 = point(1.0 + a.cos(), a.sin());
        let t = turn_angle(o, x, p3);
        assert!(t > -PI && t <= PI);
    }
}

#[test]
fn normalize_angle_range() {
    use core::f32::consts::PI;

    assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
    assert!((normalize_angle(-PI) - PI).abs() < 1e-5);
    assert!((normalize_angle(0.5f32) - 0.5).abs() < 1e-6);
    assert!((normalize_angle(-2.0 * PI + 0.5) - 0.5).abs() < 1e-5);
}

#[test]
fn orientation_about_left_turn() {
    let start = point(0.0f32, 0.0);
    let middle = point(10.0, 0.0);
    let end = point(10.0, 10.0);

    // Inside the wedge.
    assert_eq!(orientation_about_turn(start, middle, end, point(5.0, 5.0)), RelativePos::Left);
    // Outside of the turn, on both sides of the wedge.
    assert_eq!(orientation_about_turn(start, middle, end, point(5.0, -5.0)), RelativePos::Right);
    assert_eq!(orientation_about_turn(start, middle, end, point(15.0, 5.0)), RelativePos::Right);
    assert_eq!(orientation_about_turn(start, middle, end, point(15.0, -5.0)), RelativePos::Right);
    // On the half-lines.
    assert_eq!(orientation_about_turn(start, middle, end, point(5.0, 0.0)), RelativePos::Collinear);
    assert_eq!(orientation_about_turn(start, middle, end, point(10.0, 5.0)), RelativePos::Collinear);
    // On the extension of the incoming segment, past the turn.
    assert_eq!(orientation_about_turn(start, middle, end, point(15.0, 0.0)), RelativePos::Right);
}

#[test]
fn orientation_about_right_turn() {
    let start = point(0.0f32, 0.0);
    let middle = point(10.0, 0.0);
    let end = point(10.0, -10.0);

    assert_eq!(orientation_about_turn(start, middle, end, point(5.0, -5.0)), RelativePos::Right);
    assert_eq!(orientation_about_turn(start, middle, end, point(5.0, 5.0)), RelativePos::Left);
    assert_eq!(orientation_about_turn(start, middle, end, point(15.0, -5.0)), RelativePos::Left);
}

#[test]
fn orientation_about_degenerate_turns() {
    let start = point(0.0f32, 0.0);
    let middle = point(10.0, 0.0);

    // Folding back on itself.
    assert_eq!(
        orientation_about_turn(start, middle, point(5.0, 0.0), point(5.0, 5.0)),
        RelativePos::Indeterminate
    );
    // Straight line.
    assert_eq!(
        orientation_about_turn(start, middle, point(20.0, 0.0), point(5.0, 5.0)),
        RelativePos::Left
    );
    // A single degenerate segment falls back to the other one.
    assert_eq!(
        orientation_about_turn(start, start, middle, point(5.0, -5.0)),
        RelativePos::Right
    );
    assert_eq!(
        orientation_about_turn(start, start, start, point(5.0, -5.0)),
        RelativePos::Indeterminate
    );
}

#[test]
fn ldexp_round_trip() {
    assert_eq!(ldexp(3.0f32, 4), 48.0);
    assert_eq!(ldexp(48.0f32, -4), 3.0);
    assert_eq!(ldexp(ldexp(1.5f32, 120), -120), 1.5);
    assert_eq!(ldexp(ldexp(1.5f32, -130), 130), 1.5);
    assert_eq!(exponent(1.0f32), 0);
    assert_eq!(exponent(3.0f32), 1);
    assert_eq!(exponent(0.25f32), -2);
    assert_eq!(exponent(1e30f32), 99);
}
