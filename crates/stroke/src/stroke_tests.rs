use crate::math::{point, vector, Point, Transform};
use crate::{FatLine, FatLineOptions, StylusState, TipSize, TipType};

use core::f32::consts::{FRAC_PI_2, FRAC_PI_4};

fn build_line(tip_size: TipSize, tip_type: TipType, points: &[Point]) -> FatLine {
    let mut line = FatLine::with_tip(tip_size, 20, tip_type);
    for (i, p) in points.iter().enumerate() {
        line.extrude(*p, i as f64, false, false).unwrap();
    }

    line
}

fn assert_near(a: Point, b: Point) {
    if (a - b).length() > 1e-3 {
        panic!("{:?} != {:?}", a, b);
    }
}

fn z_shape() -> [Point; 4] {
    [
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(20.0, 10.0),
    ]
}

#[test]
fn send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FatLine>();
}

#[test]
fn round_tip_z_shape() {
    let mut line = build_line(TipSize::circle(2.0), TipType::Round, &z_shape());
    line.build_end_cap();

    let start_cap = line.start_cap();
    assert_eq!(start_cap.len(), 10);
    assert_near(start_cap[0].position, point(0.0, -2.0));
    assert_near(start_cap[9].position, point(0.0, 2.0));

    let fwd = line.forward_line();
    let back = line.backward_line();
    assert_eq!(fwd.len(), 7);
    assert_eq!(back.len(), 7);

    // Left turn at (10, 0): the inner side meets at a point, the outer side is an arc.
    assert_near(fwd[1].position, point(8.0, 2.0));
    assert_near(back[1].position, point(10.0, -2.0));
    assert_near(back[5].position, point(12.0, 0.0));
    for v in &back[1..6] {
        assert!(((v.position - point(10.0, 0.0)).length() - 2.0).abs() < 1e-3);
    }

    // Right turn at (10, 10): the other way around.
    assert_near(fwd[2].position, point(8.0, 10.0));
    assert_near(fwd[6].position, point(10.0, 12.0));
    assert_near(back[6].position, point(12.0, 8.0));

    let end_cap = line.end_cap();
    assert_eq!(end_cap.len(), 10);
    assert_near(end_cap[0].position, point(20.0, 12.0));
    assert_near(end_cap[9].position, point(20.0, 8.0));

    // The shared vertices between the caps and the edges are merged.
    let outline = FatLine::outline_as_array(core::slice::from_ref(&line), &Transform::identity());
    assert_eq!(outline.len(), 32);
    assert_eq!(outline[0], start_cap[0].position);
}

#[test]
fn chisel_tip_z_shape() {
    let mut line = FatLine::new(
        FatLineOptions::DEFAULT
            .with_tip_size(TipSize::new(1.0, 0.5))
            .with_turn_vertices(24)
            .with_tip_type(TipType::Chisel),
    );
    line.set_stylus_state(StylusState::DEFAULT.with_orientation(FRAC_PI_4));

    let points = z_shape();
    for (i, p) in points[..3].iter().enumerate() {
        line.extrude(*p, i as f64, false, false).unwrap();
    }

    // The nib is the segment from each sample to its tail, sqrt(2) away along
    // the orientation.
    let tail = |p: Point| p + vector(1.0, 1.0) * core::f32::consts::SQRT_2;

    let start_cap = line.start_cap();
    assert_near(start_cap[0].position, point(0.0, -0.5));
    assert_near(start_cap[start_cap.len() - 1].position, tail(point(0.0, 0.0)) + vector(0.0, 0.5));

    // The whole nib of the first turn is on the outer (right) side.
    assert_eq!(line.forward_line().len(), 1);
    let back_len = line.backward_line().len();
    assert!(back_len > 1);
    assert_near(line.backward_line()[0].position, point(0.0, -0.5));
    for v in &line.backward_line()[1..] {
        let on_head = ((v.position - point(10.0, 0.0)).length() - 0.5).abs() < 1e-3;
        let on_tail = ((v.position - tail(point(10.0, 0.0))).length() - 0.5).abs() < 1e-3;
        assert!(on_head || on_tail, "{:?}", v.position);
    }

    line.extrude(points[3], 3.0, false, false).unwrap();
    assert_eq!(line.backward_line().len(), back_len);
    let fwd = line.forward_line();
    assert!(fwd.len() > 1);
    assert_near(fwd[fwd.len() - 1].position, tail(point(10.0, 10.0)) + vector(0.0, 0.5));

    line.build_end_cap();
    let end_cap = line.end_cap();
    assert_near(end_cap[0].position, tail(point(20.0, 10.0)) + vector(0.0, 0.5));
    assert_near(end_cap[end_cap.len() - 1].position, point(20.0, 9.5));

    let outline = FatLine::outline_as_array(&[line], &Transform::identity());
    assert!(outline.len() > 8);
    for p in &outline {
        assert!(p.x > -0.51 && p.x < 21.92, "{:?}", p);
        assert!(p.y > -0.51 && p.y < 11.92, "{:?}", p);
    }
}

#[test]
fn chisel_tip_flipping_orientation() {
    let mut line = FatLine::new(
        FatLineOptions::DEFAULT
            .with_tip_size(TipSize::new(1.0, 0.5))
            .with_turn_vertices(24)
            .with_tip_type(TipType::Chisel),
    );

    // The nib points up, then down, then up again: the head and the tail trade
    // edges at every turn.
    let samples = [
        point(0.0, 0.0),
        point(8.0, 1.0),
        point(16.0, -1.0),
        point(24.0, 2.0),
        point(32.0, 0.0),
        point(40.0, 1.0),
    ];
    for (i, p) in samples.iter().enumerate() {
        let orientation = if i % 2 == 0 { FRAC_PI_2 } else { -FRAC_PI_2 };
        line.set_stylus_state(StylusState::DEFAULT.with_orientation(orientation));
        line.extrude(*p, i as f64, false, false).unwrap();
    }
    line.build_end_cap();

    let expected_fwd = [
        point(0.0620, 2.4961),
        point(8.0311, 1.5),
        point(15.9689, 1.5),
        point(23.9380, 2.4961),
        point(24.0, 2.5),
        point(32.0, 2.5),
        point(32.0620, 2.4961),
    ];
    let expected_back = [
        point(-0.0620, -0.4961),
        point(7.9380, -1.4961),
        point(8.0, -1.5),
        point(16.0, -1.5),
        point(16.0620, -1.4961),
        point(24.0311, -0.5),
        point(31.9689, -0.5),
    ];

    let fwd = line.forward_line();
    let back = line.backward_line();
    assert_eq!(fwd.len(), expected_fwd.len());
    assert_eq!(back.len(), expected_back.len());
    for (v, p) in fwd.iter().zip(expected_fwd.iter()) {
        assert_near(v.position, *p);
    }
    for (v, p) in back.iter().zip(expected_back.iter()) {
        assert_near(v.position, *p);
    }

    let start_cap = line.start_cap();
    assert_eq!(start_cap.len(), 12);
    assert_near(start_cap[0].position, expected_back[0]);
    assert_near(start_cap[11].position, expected_fwd[0]);

    let end_cap = line.end_cap();
    assert_eq!(end_cap.len(), 12);
    assert_near(end_cap[0].position, point(40.0620, 1.4961));
    assert_near(end_cap[11].position, point(39.9380, -1.4961));
}

#[test]
fn square_tip_segment() {
    let mut line = build_line(TipSize::circle(1.0), TipType::Square, &[point(0.0, 0.0), point(10.0, 0.0)]);
    line.build_end_cap();

    let start_cap = line.start_cap();
    assert_eq!(start_cap.len(), 4);
    assert_near(start_cap[0].position, point(0.0, -1.0));
    assert_near(start_cap[1].position, point(-1.0, -1.0));
    assert_near(start_cap[2].position, point(-1.0, 1.0));
    assert_near(start_cap[3].position, point(0.0, 1.0));

    let end_cap = line.end_cap();
    assert_eq!(end_cap.len(), 4);
    assert_near(end_cap[0].position, point(10.0, 1.0));
    assert_near(end_cap[1].position, point(11.0, 1.0));
    assert_near(end_cap[2].position, point(11.0, -1.0));
    assert_near(end_cap[3].position, point(10.0, -1.0));

    let outline = FatLine::outline_as_array(&[line], &Transform::identity());
    assert_eq!(outline.len(), 8);
}

#[test]
fn joined_lines_outline() {
    let mut a = build_line(
        TipSize::circle(1.0),
        TipType::Round,
        &[point(0.0, 0.0), point(10.0, 0.0), point(20.0, 0.0)],
    );

    let mut b = FatLine::with_tip(TipSize::circle(1.0), 20, TipType::Round);
    b.join_to_line_end(&a).unwrap();
    b.extrude(point(20.0, 0.0), 2.0, false, false).unwrap();
    b.extrude(point(30.0, 0.0), 3.0, false, false).unwrap();
    b.build_end_cap();
    a.build_end_cap();

    let shift = Transform::translation(5.0, 5.0);
    let outline = FatLine::outline_as_array(&[a.clone(), b.clone()], &shift);

    // Start cap of the first line, one new point per forward edge, end cap of
    // the last line and the backward edges without the first point.
    assert_eq!(outline.len(), 24);
    assert_near(outline[0], a.start_cap()[0].position + vector(5.0, 5.0));
    assert_near(outline[10], point(15.0, 6.0));
    assert_near(outline[11], point(25.0, 6.0));
    assert_near(outline[outline.len() - 1], point(15.0, 4.0));

    // The end cap of the first line is not part of the outline.
    assert!(outline.iter().all(|q| (*q - point(26.0, 5.0)).length() > 0.5));

    assert!(FatLine::outline_as_array(&[], &shift).is_empty());
}

#[test]
fn edges_only_grow() {
    let mut line = FatLine::with_tip(TipSize::circle(0.5), 20, TipType::Round);

    let mut fwd = 0;
    let mut back = 0;
    for i in 0..100 {
        let angle = i as f32 * 0.3;
        let radius = 2.0 + 0.5 * i as f32;
        let p = point(angle.cos() * radius, angle.sin() * radius);
        line.extrude(p, i as f64, false, false).unwrap();

        assert!(line.forward_line().len() >= fwd);
        assert!(line.backward_line().len() >= back);
        fwd = line.forward_line().len();
        back = line.backward_line().len();
    }

    assert!(fwd > 90);
    assert!(back > 90);
    assert_eq!(line.mid_points().len(), 100);

    for v in line.forward_line().iter().chain(line.backward_line()) {
        assert!(v.position.x.is_finite() && v.position.y.is_finite());
    }
}
