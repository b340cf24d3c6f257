use crate::math::Point;
use crate::tip::{ChiselTip, RoundTip, SquareTip};
use crate::tip_utils::TurnPoints;
use crate::{MidPoint, TipType};

/// The geometry of a tip: how turns are joined, how the line is capped and which
/// samples are redundant.
///
/// One tip model lives in each [`FatLine`](crate::FatLine). Only chisel tips carry
/// state between samples.
#[derive(Clone, Debug, PartialEq)]
pub enum TipModel {
    Round(RoundTip),
    Square(SquareTip),
    Chisel(ChiselTip),
}

impl TipModel {
    pub fn new(tip_type: TipType) -> Self {
        match tip_type {
            TipType::Round => TipModel::Round(RoundTip),
            TipType::Square => TipModel::Square(SquareTip),
            TipType::Chisel => TipModel::Chisel(ChiselTip::new()),
        }
    }

    pub fn tip_type(&self) -> TipType {
        match self {
            TipModel::Round(..) => TipType::Round,
            TipModel::Square(..) => TipType::Square,
            TipModel::Chisel(..) => TipType::Chisel,
        }
    }

    /// Appends the points joining the edges around the turn at `middle` to
    /// `output`.
    pub fn add_turn_points(
        &mut self,
        start: &MidPoint,
        middle: &MidPoint,
        end: &MidPoint,
        turn_vertices: u32,
        output: &mut TurnPoints,
    ) {
        match self {
            TipModel::Round(tip) => tip.add_turn_points(start, middle, end, turn_vertices, output),
            TipModel::Square(tip) => tip.add_turn_points(start, middle, end, turn_vertices, output),
            TipModel::Chisel(tip) => tip.add_turn_points(start, middle, end, turn_vertices, output),
        }
    }

    /// The cap closing the beginning of the line, from the start of the right edge
    /// to the start of the left edge.
    pub fn create_startcap(&self, first: &MidPoint, second: &MidPoint, turn_vertices: u32) -> Vec<Point> {
        match self {
            TipModel::Round(tip) => tip.create_startcap(first, second, turn_vertices),
            TipModel::Square(tip) => tip.create_startcap(first, second, turn_vertices),
            TipModel::Chisel(tip) => tip.create_startcap(first, second, turn_vertices),
        }
    }

    /// The cap closing the end of the line, from the end of the left edge to the
    /// end of the right edge.
    pub fn create_endcap(&self, previous: &MidPoint, last: &MidPoint, turn_vertices: u32) -> Vec<Point> {
        match self {
            TipModel::Round(tip) => tip.create_endcap(previous, last, turn_vertices),
            TipModel::Square(tip) => tip.create_endcap(previous, last, turn_vertices),
            TipModel::Chisel(tip) => tip.create_endcap(previous, last, turn_vertices),
        }
    }

    /// The outline of a line made of a single sample.
    pub fn create_dot(&self, point: &MidPoint, turn_vertices: u32) -> Vec<Point> {
        match self {
            TipModel::Round(tip) => tip.create_dot(point, turn_vertices),
            TipModel::Square(tip) => tip.create_dot(point, turn_vertices),
            TipModel::Chisel(tip) => tip.create_dot(point, turn_vertices),
        }
    }

    /// Whether `new` adds nothing to a line ending with `previous`.
    pub fn should_drop_new_point(&self, previous: &MidPoint, new: &MidPoint) -> bool {
        match self {
            TipModel::Round(tip) => tip.should_drop_new_point(previous, new),
            TipModel::Square(..) | TipModel::Chisel(..) => false,
        }
    }

    /// Whether `new` covers the whole line so far, which should then be discarded.
    pub fn should_prune_before_new_point(&self, points: &[MidPoint], new: &MidPoint) -> bool {
        match self {
            TipModel::Round(tip) => tip.should_prune_before_new_point(points, new),
            TipModel::Square(..) | TipModel::Chisel(..) => false,
        }
    }

    /// Resets the state carried between samples.
    pub fn clear(&mut self) {
        if let TipModel::Chisel(tip) = self {
            tip.clear();
        }
    }
}

impl Default for TipModel {
    fn default() -> Self {
        TipModel::new(TipType::Round)
    }
}

#[test]
fn tip_type_round_trip() {
    for &tip_type in &[TipType::Round, TipType::Square, TipType::Chisel] {
        assert_eq!(TipModel::new(tip_type).tip_type(), tip_type);
    }
}

#[test]
fn only_round_tips_drop_and_prune() {
    use crate::math::point;

    let a = MidPoint::with_radius(point(0.0, 0.0), 2.0);
    let inside = MidPoint::with_radius(point(0.5, 0.0), 1.0);
    let huge = MidPoint::with_radius(point(0.0, 0.0), 10.0);

    assert!(TipModel::new(TipType::Round).should_drop_new_point(&a, &inside));
    assert!(TipModel::new(TipType::Round).should_prune_before_new_point(&[a], &huge));

    for &tip_type in &[TipType::Square, TipType::Chisel] {
        let tip = TipModel::new(tip_type);
        assert!(!tip.should_drop_new_point(&a, &inside));
        assert!(!tip.should_prune_before_new_point(&[a], &huge));
    }
}
