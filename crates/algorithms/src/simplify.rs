//! Polyline simplification with the Ramer-Douglas-Peucker algorithm.
//!
//! The input is traversed by index: anchors are looked up at both ends of each
//! sub-interval and the interval between them is scanned front to back.

use crate::math::{Point, Segment};

use alloc::vec;
use alloc::vec::Vec;

/// Simplifies the polyline `input`, appending the kept items to `output`.
///
/// `position` extracts the position of an item, which lets this run directly on
/// vertex types carrying extra data.
///
/// - Inputs of fewer than three items are copied through unchanged.
/// - The first and last items are always kept.
/// - Between two kept anchors, the item farthest from the segment joining them
///   is kept if its distance exceeds `epsilon`, and the two halves are simplified
///   in turn. Otherwise every item between the anchors is dropped.
/// - When several items are equally far, the earliest one is kept.
///
/// Distances are measured to the anchor segment, not to its supporting line, so
/// an item that doubles back past an anchor is kept even when it is collinear
/// with both anchors.
pub fn simplify<T, F>(input: &[T], epsilon: f32, output: &mut Vec<T>, position: F)
where
    T: Clone,
    F: Fn(&T) -> Point,
{
    if input.len() < 3 {
        output.extend_from_slice(input);
        return;
    }

    let last = input.len() - 1;
    let mut keep = vec![false; input.len()];
    keep[0] = true;
    keep[last] = true;

    // Sub-intervals left to process, as (first anchor, last anchor).
    let mut stack = vec![(0, last)];

    while let Some((first, end)) = stack.pop() {
        if end - first < 2 {
            continue;
        }

        let anchors = Segment::new(position(&input[first]), position(&input[end]));

        let mut max_distance = 0.0;
        let mut max_index = first;
        for (i, item) in input.iter().enumerate().take(end).skip(first + 1) {
            let distance = anchors.distance_to_point(position(item));
            if distance > max_distance {
                max_distance = distance;
                max_index = i;
            }
        }

        if max_distance > epsilon {
            keep[max_index] = true;
            stack.push((max_index, end));
            stack.push((first, max_index));
        }
    }

    output.reserve(keep.iter().filter(|k| **k).count());
    for (item, _) in input.iter().zip(keep.iter()).filter(|(_, k)| **k) {
        output.push(item.clone());
    }
}

/// Convenience wrapper around [`simplify`] for plain points.
pub fn simplify_points(input: &[Point], epsilon: f32) -> Vec<Point> {
    let mut output = Vec::with_capacity(input.len());
    simplify(input, epsilon, &mut output, |p| *p);

    output
}

#[cfg(test)]
use crate::math::point;

#[test]
fn short_inputs_are_copied() {
    let empty: [Point; 0] = [];
    assert!(simplify_points(&empty, 1.0).is_empty());

    let one = [point(1.0, 2.0)];
    assert_eq!(simplify_points(&one, 1.0), one.to_vec());

    let two = [point(1.0, 2.0), point(1.0, 2.0)];
    assert_eq!(simplify_points(&two, 1.0), two.to_vec());
}

#[test]
fn collinear_points_are_removed() {
    let input: Vec<Point> = (0..10).map(|i| point(i as f32, 0.0)).collect();
    assert_eq!(
        simplify_points(&input, 0.01),
        vec![point(0.0, 0.0), point(9.0, 0.0)]
    );
}

#[test]
fn corners_are_kept() {
    let input = [
        point(0.0, 0.0),
        point(5.0, 0.01),
        point(10.0, 0.0),
        point(10.0, 5.0),
        point(10.01, 10.0),
        point(10.0, 15.0),
    ];

    assert_eq!(
        simplify_points(&input, 0.1),
        vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 15.0)]
    );

    // Nothing is dropped with a tiny epsilon.
    assert_eq!(simplify_points(&input, 0.001), input.to_vec());
}

#[test]
fn backtracking_points_are_kept() {
    // The middle point is on the line through the anchors but 2 past the end of
    // the segment joining them.
    let input = [point(0.0, 0.0), point(12.0, 0.0), point(10.0, 0.0)];
    assert_eq!(simplify_points(&input, 1.0), input.to_vec());

    // Within epsilon, it goes.
    assert_eq!(
        simplify_points(&input, 3.0),
        vec![point(0.0, 0.0), point(10.0, 0.0)]
    );
}

#[test]
fn endpoints_are_preserved() {
    let input = [
        point(3.0, 3.0),
        point(4.0, 4.0),
        point(5.0, 5.1),
        point(6.0, 6.0),
        point(7.0, 7.0),
    ];

    for &epsilon in &[0.0, 0.05, 1.0, 100.0] {
        let output = simplify_points(&input, epsilon);
        assert!(output.len() >= 2);
        assert_eq!(output[0], input[0]);
        assert_eq!(output[output.len() - 1], input[4]);
    }
}

#[test]
fn simplification_is_idempotent() {
    let input: Vec<Point> = (0..40)
        .map(|i| {
            let x = i as f32 * 0.5;
            point(x, (x * 0.7).sin() * 3.0 + if i % 3 == 0 { 0.02 } else { 0.0 })
        })
        .collect();

    for &epsilon in &[0.01, 0.1, 0.5, 2.0] {
        let once = simplify_points(&input, epsilon);
        let twice = simplify_points(&once, epsilon);
        assert_eq!(once, twice);
        assert!(once.len() <= input.len());
    }
}

#[test]
fn ties_keep_the_earliest_point() {
    // Both middle points are at distance 1 from the base segment.
    let input = [
        point(0.0, 0.0),
        point(2.0, 1.0),
        point(4.0, 1.0),
        point(6.0, 0.0),
    ];

    // The first split happens at index 1. The remaining interval [1, 3] has its
    // middle point within epsilon of the segment from (2, 1) to (6, 0).
    let output = simplify_points(&input, 0.9);
    assert_eq!(output[1], point(2.0, 1.0));
}

#[test]
fn simplify_with_position_extractor() {
    #[derive(Clone, Debug, PartialEq)]
    struct Sample {
        position: Point,
        id: u32,
    }

    let input: Vec<Sample> = (0..5)
        .map(|i| Sample {
            position: point(i as f32, 0.0),
            id: i,
        })
        .collect();

    let mut output = Vec::new();
    simplify(&input, 0.1, &mut output, |s| s.position);

    assert_eq!(output.len(), 2);
    assert_eq!(output[0].id, 0);
    assert_eq!(output[1].id, 4);
}
