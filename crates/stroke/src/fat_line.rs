use crate::algorithms::aabb::{try_bounding_box, union};
use crate::algorithms::simplify::simplify;
use crate::math::{vector, Box2D, Point, Transform};
use crate::tip_utils::TurnPoints;
use crate::{
    FatLineOptions, MidPoint, StrokeError, StylusState, TipModel, TipSize, TipType, Vertex,
    VertexCallback,
};

use core::fmt;
use log::{debug, trace, warn};
use std::sync::Arc;

/// Distance to the previous sample forced samples are moved to when they are
/// closer than that.
const MIN_FORCED_DISTANCE: f32 = 0.001;

/// The end of a previous line this line continues from.
#[derive(Copy, Clone, Debug, PartialEq)]
struct LineJoin {
    /// The second-to-last sample of the previous line.
    mid_point: MidPoint,
    left: Vertex,
    right: Vertex,
}

/// Incrementally builds the outline of a stroke.
///
/// Samples are added with [`extrude`](FatLine::extrude). The outline is made of
/// four vertex sequences:
///
/// - the start cap, from the start of the backward edge to the start of the
///   forward edge,
/// - the forward edge, on the left of the direction of travel,
/// - the end cap, from the end of the forward edge to the end of the backward
///   edge,
/// - the backward edge, on the right of the direction of travel.
///
/// Once the line has two samples, both edges are non-empty. The start cap,
/// forward edge, end cap and reversed backward edge form a closed polygon.
///
/// A `FatLine` is `Send` and `Sync`, so a finished line can be meshed on another
/// thread. Mutation must be serialized by the caller.
#[derive(Clone)]
pub struct FatLine {
    options: FatLineOptions,
    stylus_state: StylusState,
    pts: Vec<MidPoint>,
    fwd: Vec<Vertex>,
    back: Vec<Vertex>,
    start_cap: Vec<Vertex>,
    end_cap: Vec<Vertex>,
    tip_model: TipModel,
    join: Option<LineJoin>,
    vertex_callback: Option<VertexCallback>,
    down_camera: Transform,
    turn_points: TurnPoints,
}

impl FatLine {
    pub fn new(options: FatLineOptions) -> Self {
        let mut options = options;
        if !options.tip_size.is_valid() {
            warn!("Invalid tip size {:?}, using the default one.", options.tip_size);
            options.tip_size = TipSize::DEFAULT;
        }

        FatLine {
            options,
            stylus_state: StylusState::DEFAULT,
            pts: Vec::new(),
            fwd: Vec::new(),
            back: Vec::new(),
            start_cap: Vec::new(),
            end_cap: Vec::new(),
            tip_model: TipModel::new(options.tip_type),
            join: None,
            vertex_callback: None,
            down_camera: Transform::identity(),
            turn_points: TurnPoints::new(),
        }
    }

    /// Shorthand for `FatLine::new` with the given tip and default values for the
    /// other options.
    pub fn with_tip(tip_size: TipSize, turn_vertices: u32, tip_type: TipType) -> Self {
        FatLine::new(
            FatLineOptions::DEFAULT
                .with_tip_size(tip_size)
                .with_turn_vertices(turn_vertices)
                .with_tip_type(tip_type),
        )
    }

    pub fn options(&self) -> &FatLineOptions {
        &self.options
    }

    pub fn tip_type(&self) -> TipType {
        self.options.tip_type
    }

    pub fn tip_model(&self) -> &TipModel {
        &self.tip_model
    }

    /// Replaces the tip model. Geometry that was already generated is kept.
    pub fn set_tip_type(&mut self, tip_type: TipType) {
        self.options.tip_type = tip_type;
        self.tip_model = TipModel::new(tip_type);
    }

    pub fn tip_size(&self) -> TipSize {
        self.options.tip_size
    }

    /// Sets the tip size of the following samples.
    pub fn set_tip_size(&mut self, tip_size: TipSize) -> Result<(), StrokeError> {
        if !tip_size.is_valid() {
            return Err(StrokeError::InvalidTipSize {
                radius: tip_size.radius,
                radius_minor: tip_size.radius_minor,
            });
        }

        self.options.tip_size = tip_size;

        Ok(())
    }

    pub fn set_turn_vertices(&mut self, turn_vertices: u32) {
        self.options.turn_vertices = turn_vertices;
    }

    pub fn set_min_screen_travel_threshold(&mut self, threshold: f32) {
        self.options.min_screen_travel_threshold = threshold;
    }

    /// Sets the stylus state of the following samples.
    pub fn set_stylus_state(&mut self, stylus_state: StylusState) {
        self.stylus_state = stylus_state;
    }

    pub fn stylus_state(&self) -> StylusState {
        self.stylus_state
    }

    /// Sets a function called on each vertex emitted from now on.
    pub fn set_vertex_callback<F>(&mut self, callback: F)
    where
        F: Fn(&mut Vertex) + Send + Sync + 'static,
    {
        self.vertex_callback = Some(Arc::new(callback));
    }

    pub fn clear_vertex_callback(&mut self) {
        self.vertex_callback = None;
    }

    /// Stores the screen to world transform for the consumers of the outline.
    ///
    /// The line itself only works in screen space.
    pub fn set_down_camera(&mut self, transform: Transform) {
        self.down_camera = transform;
    }

    pub fn down_camera(&self) -> &Transform {
        &self.down_camera
    }

    /// The left edge.
    pub fn forward_line(&self) -> &[Vertex] {
        &self.fwd
    }

    /// The right edge, in the direction of travel.
    pub fn backward_line(&self) -> &[Vertex] {
        &self.back
    }

    pub fn start_cap(&self) -> &[Vertex] {
        &self.start_cap
    }

    pub fn end_cap(&self) -> &[Vertex] {
        &self.end_cap
    }

    pub fn mid_points(&self) -> &[MidPoint] {
        &self.pts
    }

    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
            && self.fwd.is_empty()
            && self.back.is_empty()
            && self.start_cap.is_empty()
            && self.end_cap.is_empty()
    }

    /// Removes every sample and vertex. The options and the tip model are kept.
    pub fn clear_vertices(&mut self) {
        self.pts.clear();
        self.fwd.clear();
        self.back.clear();
        self.start_cap.clear();
        self.end_cap.clear();
        self.tip_model.clear();
        self.join = None;
    }

    /// Continues this line from the end of `previous` instead of starting it with
    /// a cap.
    ///
    /// The edges start where the edges of `previous` currently end, joined around
    /// the first sample of this line, which is expected to be the last sample of
    /// `previous`.
    pub fn join_to_line_end(&mut self, previous: &FatLine) -> Result<(), StrokeError> {
        if !self.is_empty() {
            return Err(StrokeError::LineNotEmpty);
        }

        let n = previous.pts.len();
        let (left, right) = match (previous.fwd.last(), previous.back.last()) {
            (Some(left), Some(right)) if n >= 2 => (*left, *right),
            _ => {
                return Err(StrokeError::NotEnoughPoints {
                    required: 2,
                    actual: n,
                })
            }
        };

        self.join = Some(LineJoin {
            mid_point: previous.pts[n - 2],
            left,
            right,
        });

        Ok(())
    }

    /// Uses the end cap of `other`, reversed, as the start cap of this line.
    ///
    /// The vertices are copied as they are. This line must be empty.
    pub fn set_start_cap_to_line_back(&mut self, other: &FatLine) -> Result<Option<Box2D>, StrokeError> {
        if !self.is_empty() {
            return Err(StrokeError::LineNotEmpty);
        }

        self.join = None;
        self.start_cap.extend(other.end_cap.iter().rev());
        debug!("Start cap copied from another line ({} vertices).", self.start_cap.len());

        Ok(vertex_bounds(&self.start_cap))
    }

    /// Adds a sample to the line.
    ///
    /// Returns the bounding box of the geometry that changed, or `None` if the
    /// sample was rejected:
    ///
    /// - samples closer than the minimum travel threshold to the previous one are
    ///   rejected, unless `force` is set, in which case they are moved away from
    ///   the previous sample if they are too close to it,
    /// - the tip model can drop samples that add nothing to the line,
    /// - the tip model can discard the line so far when the new sample covers it,
    ///   in which case the line starts over from the new sample.
    ///
    /// With `simplify`, the trailing vertices of both edges are simplified
    /// afterwards.
    pub fn extrude(
        &mut self,
        position: Point,
        time: f64,
        force: bool,
        simplify: bool,
    ) -> Result<Option<Box2D>, StrokeError> {
        if !position.x.is_finite() || !position.y.is_finite() {
            return Err(StrokeError::InvalidPosition {
                x: position.x,
                y: position.y,
            });
        }

        let mut position = position;
        if let Some(last) = self.pts.last() {
            let d = position - last.screen_position;
            let distance = d.length();
            if distance < self.options.min_screen_travel_threshold {
                if !force {
                    trace!("Rejected sample {:?} at distance {}.", position, distance);
                    return Ok(None);
                }

                if distance < MIN_FORCED_DISTANCE {
                    let direction = if distance > 0.0 {
                        d / distance
                    } else {
                        vector(1.0, 0.0)
                    };
                    position = last.screen_position + direction * MIN_FORCED_DISTANCE;
                    trace!("Forced sample moved to {:?}.", position);
                }
            }
        }

        let mid_point = MidPoint::new(position, self.options.tip_size, time, self.stylus_state);

        if let Some(last) = self.pts.last() {
            if self.tip_model.should_drop_new_point(last, &mid_point) {
                trace!("Dropped sample {:?}.", position);
                return Ok(None);
            }
        }

        if self.tip_model.should_prune_before_new_point(&self.pts, &mid_point) {
            trace!("Sample {:?} covers the line, starting over.", position);
            self.clear_vertices();
        }

        let fwd_start = self.fwd.len();
        let back_start = self.back.len();
        let mut bounds = try_bounding_box(&self.tip_model.create_dot(&mid_point, self.options.turn_vertices));

        self.pts.push(mid_point);

        match self.pts.len() {
            1 => {}
            2 => {
                if let Some(join) = self.join {
                    self.fwd.push(join.left);
                    self.back.push(join.right);
                    let (p0, p1) = (self.pts[0], self.pts[1]);
                    self.add_turn_points(&join.mid_point, &p0, &p1);
                } else {
                    if self.start_cap.is_empty() {
                        bounds = union(bounds, self.build_start_cap()?);
                    }

                    debug_assert!(!self.start_cap.is_empty());
                    match (self.start_cap.first(), self.start_cap.last()) {
                        (Some(first), Some(last)) => {
                            let (first, last) = (*first, *last);
                            self.back.push(first);
                            self.fwd.push(last);
                        }
                        _ => {
                            warn!("Empty start cap.");
                        }
                    }
                }
            }
            _ => {
                self.extend_line();
            }
        }

        bounds = union(bounds, vertex_bounds(&self.fwd[fwd_start..]));
        bounds = union(bounds, vertex_bounds(&self.back[back_start..]));

        if simplify {
            self.simplify(
                self.options.simplification_window,
                self.options.simplification_threshold,
            );
        }

        Ok(bounds)
    }

    /// Builds the start cap from the first two samples.
    ///
    /// This is done automatically by [`extrude`](FatLine::extrude).
    pub fn build_start_cap(&mut self) -> Result<Option<Box2D>, StrokeError> {
        if self.pts.len() < 2 {
            return Err(StrokeError::NotEnoughPoints {
                required: 2,
                actual: self.pts.len(),
            });
        }

        let points = self.tip_model.create_startcap(&self.pts[0], &self.pts[1], self.options.turn_vertices);
        self.start_cap = self.make_vertices(&points);
        debug!("Built a start cap of {} vertices.", self.start_cap.len());

        Ok(vertex_bounds(&self.start_cap))
    }

    /// Builds the end cap from the last two samples, or a dot if the line has a
    /// single sample.
    ///
    /// Returns `None` for empty lines.
    pub fn build_end_cap(&mut self) -> Option<Box2D> {
        let n = self.pts.len();
        let turn_vertices = self.options.turn_vertices;
        let points = match n {
            0 => {
                warn!("Can't build the end cap of an empty line.");
                return None;
            }
            1 => self.tip_model.create_dot(&self.pts[0], turn_vertices),
            _ => self.tip_model.create_endcap(&self.pts[n - 2], &self.pts[n - 1], turn_vertices),
        };

        self.end_cap = self.make_vertices(&points);
        debug!("Built an end cap of {} vertices.", self.end_cap.len());

        vertex_bounds(&self.end_cap)
    }

    /// Simplifies the last `n_verts` vertices of both edges.
    pub fn simplify(&mut self, n_verts: usize, threshold: f32) {
        let fwd_removed = simplify_tail(&mut self.fwd, n_verts, threshold);
        let back_removed = simplify_tail(&mut self.back, n_verts, threshold);
        if fwd_removed + back_removed > 0 {
            debug!(
                "Simplification removed {} forward and {} backward vertices.",
                fwd_removed, back_removed
            );
        }
    }

    /// A copy of the line, extended with the predicted samples and closed with an
    /// end cap.
    ///
    /// Predicted samples are forced in. The line itself is left untouched, so
    /// dropping the copy removes the prediction.
    pub fn predicted(&self, samples: &[(Point, f64)]) -> Result<FatLine, StrokeError> {
        let mut line = self.clone();
        for &(position, time) in samples {
            line.extrude(position, time, true, false)?;
        }
        line.build_end_cap();

        Ok(line)
    }

    /// The bounding box of every vertex of the line.
    pub fn bounds(&self) -> Option<Box2D> {
        try_bounding_box(
            self.start_cap
                .iter()
                .chain(self.fwd.iter())
                .chain(self.end_cap.iter())
                .chain(self.back.iter())
                .map(|v| v.position),
        )
    }

    fn extend_line(&mut self) {
        let n = self.pts.len();
        let (start, middle, end) = (self.pts[n - 3], self.pts[n - 2], self.pts[n - 1]);
        self.add_turn_points(&start, &middle, &end);
    }

    fn add_turn_points(&mut self, start: &MidPoint, middle: &MidPoint, end: &MidPoint) {
        let mut turn_points = core::mem::take(&mut self.turn_points);
        turn_points.clear();

        self.tip_model
            .add_turn_points(start, middle, end, self.options.turn_vertices, &mut turn_points);

        for p in &turn_points.left {
            let v = self.make_vertex(*p);
            self.fwd.push(v);
        }
        for p in &turn_points.right {
            let v = self.make_vertex(*p);
            self.back.push(v);
        }

        self.turn_points = turn_points;
    }

    fn make_vertex(&self, position: Point) -> Vertex {
        let mut vertex = Vertex::new(position);
        if let Some(callback) = &self.vertex_callback {
            callback(&mut vertex);
        }

        vertex
    }

    fn make_vertices(&self, points: &[Point]) -> Vec<Vertex> {
        points.iter().map(|p| self.make_vertex(*p)).collect()
    }
}

fn vertex_bounds(vertices: &[Vertex]) -> Option<Box2D> {
    try_bounding_box(vertices.iter().map(|v| v.position))
}

/// Simplifies the last `n_verts` vertices of `vertices` in place and returns how
/// many were removed.
fn simplify_tail(vertices: &mut Vec<Vertex>, n_verts: usize, threshold: f32) -> usize {
    if vertices.len() <= 1 {
        return 0;
    }

    let len = vertices.len();
    let tail = vertices.split_off(len - n_verts.min(len));
    simplify(&tail, threshold, vertices, |v| v.position);

    len - vertices.len()
}

impl fmt::Debug for FatLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FatLine")
            .field("options", &self.options)
            .field("stylus_state", &self.stylus_state)
            .field("pts", &self.pts)
            .field("fwd", &self.fwd)
            .field("back", &self.back)
            .field("start_cap", &self.start_cap)
            .field("end_cap", &self.end_cap)
            .field("tip_model", &self.tip_model)
            .field("join", &self.join)
            .field("has_vertex_callback", &self.vertex_callback.is_some())
            .field("down_camera", &self.down_camera)
            .finish()
    }
}

/// Fixed-width dump of every point sequence of the line.
impl fmt::Display for FatLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FatLine ({:?} tip, {} mid-points)", self.options.tip_type, self.pts.len())?;

        writeln!(f, "mid points:")?;
        for p in &self.pts {
            writeln!(
                f,
                "  {:>12.4} {:>12.4}  r {:>8.4} {:>8.4}  t {:>12.4}",
                p.screen_position.x, p.screen_position.y, p.tip_size.radius, p.tip_size.radius_minor, p.time
            )?;
        }

        for (name, vertices) in &[
            ("start cap", &self.start_cap),
            ("forward", &self.fwd),
            ("end cap", &self.end_cap),
            ("backward", &self.back),
        ] {
            writeln!(f, "{} ({}):", name, vertices.len())?;
            for v in vertices.iter() {
                writeln!(f, "  {:>12.4} {:>12.4}", v.position.x, v.position.y)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn round_line(radius: f32) -> FatLine {
    FatLine::with_tip(TipSize::circle(radius), 20, TipType::Round)
}

#[cfg(test)]
fn extrude_all(line: &mut FatLine, points: &[Point]) {
    for (i, p) in points.iter().enumerate() {
        line.extrude(*p, i as f64, false, false).unwrap();
    }
}

#[test]
fn first_sample_returns_the_dot_bounds() {
    let mut line = round_line(2.0);
    let bounds = line.extrude(point(1.0, 1.0), 0.0, false, false).unwrap().unwrap();
    // The dot is a polygon inscribed in the circle.
    assert!((bounds.min - point(-1.0, -1.0)).length() < 0.05);
    assert!((bounds.max - point(3.0, 3.0)).length() < 0.05);
    assert_eq!(bounds.max.x, 3.0);

    assert_eq!(line.mid_points().len(), 1);
    assert!(line.forward_line().is_empty());
    assert!(line.backward_line().is_empty());
    assert!(line.start_cap().is_empty());
}

#[test]
fn second_sample_builds_the_start_cap() {
    let mut line = round_line(2.0);
    line.extrude(point(0.0, 0.0), 0.0, false, false).unwrap();
    let bounds = line.extrude(point(10.0, 0.0), 1.0, false, false).unwrap().unwrap();

    let cap = line.start_cap();
    assert_eq!(cap.len(), 10);
    assert_eq!(line.forward_line(), &[cap[cap.len() - 1]]);
    assert_eq!(line.backward_line(), &[cap[0]]);

    // The new tip and the start cap.
    assert!(bounds.min.x < -1.9 && bounds.max.x > 11.9);
}

#[test]
fn threshold_rejection() {
    let mut line = round_line(1.0);
    line.extrude(point(0.0, 0.0), 0.0, false, false).unwrap();

    assert_eq!(line.extrude(point(0.1, 0.0), 1.0, false, false), Ok(None));
    assert_eq!(line.mid_points().len(), 1);

    // Forced samples are accepted.
    assert!(line.extrude(point(0.1, 0.0), 1.0, true, false).unwrap().is_some());
    assert_eq!(line.mid_points().len(), 2);

    // And moved away from the previous sample if they are on top of it.
    assert!(line.extrude(point(0.1, 0.0), 2.0, true, false).unwrap().is_some());
    let pts = line.mid_points();
    assert_eq!(pts.len(), 3);
    assert!(((pts[2].screen_position - pts[1].screen_position).length() - MIN_FORCED_DISTANCE).abs() < 1e-5);
}

#[test]
fn invalid_input() {
    let mut line = round_line(1.0);
    assert!(matches!(
        line.extrude(point(f32::NAN, 0.0), 0.0, false, false),
        Err(StrokeError::InvalidPosition { .. })
    ));
    assert!(matches!(
        line.extrude(point(0.0, f32::INFINITY), 0.0, true, false),
        Err(StrokeError::InvalidPosition { .. })
    ));
    assert!(line.mid_points().is_empty());

    assert_eq!(
        line.set_tip_size(TipSize::new(-1.0, 1.0)),
        Err(StrokeError::InvalidTipSize {
            radius: -1.0,
            radius_minor: 1.0
        })
    );
    assert_eq!(line.tip_size(), TipSize::circle(1.0));
    assert!(line.set_tip_size(TipSize::new(2.0, 0.5)).is_ok());
    assert_eq!(line.tip_size(), TipSize::new(2.0, 0.5));

    assert_eq!(
        line.build_start_cap(),
        Err(StrokeError::NotEnoughPoints {
            required: 2,
            actual: 0
        })
    );

    // Invalid options fall back to the default tip size.
    let line = FatLine::new(FatLineOptions::DEFAULT.with_tip_size(TipSize::new(f32::NAN, 1.0)));
    assert_eq!(line.tip_size(), TipSize::DEFAULT);
}

#[test]
fn dropped_samples() {
    let mut line = round_line(2.0);
    line.extrude(point(0.0, 0.0), 0.0, false, false).unwrap();
    line.set_tip_size(TipSize::circle(0.5)).unwrap();

    // Inside of the previous circle.
    assert_eq!(line.extrude(point(1.0, 0.0), 1.0, false, false), Ok(None));
    assert_eq!(line.mid_points().len(), 1);
}

#[test]
fn pruned_line() {
    let mut line = round_line(1.0);
    extrude_all(&mut line, &[point(0.0, 0.0), point(2.0, 0.0), point(4.0, 0.0)]);
    assert_eq!(line.mid_points().len(), 3);

    // A sample covering the whole line restarts it.
    line.set_tip_size(TipSize::circle(10.0)).unwrap();
    assert!(line.extrude(point(2.0, 1.0), 3.0, false, false).unwrap().is_some());
    assert_eq!(line.mid_points().len(), 1);
    assert_eq!(line.mid_points()[0].screen_position, point(2.0, 1.0));
    assert!(line.forward_line().is_empty());
    assert!(line.backward_line().is_empty());
    assert!(line.start_cap().is_empty());
}

#[test]
fn end_caps() {
    let mut line = round_line(1.0);
    assert!(line.build_end_cap().is_none());

    line.extrude(point(0.0, 0.0), 0.0, false, false).unwrap();
    assert!(line.build_end_cap().is_some());
    // A full circle.
    assert_eq!(line.end_cap().len(), 19);

    line.extrude(point(5.0, 0.0), 1.0, false, false).unwrap();
    line.build_end_cap();
    assert_eq!(line.end_cap().len(), 10);
    assert!((line.end_cap()[0].position - point(5.0, 1.0)).length() < 1e-4);
}

#[test]
fn simplify_straight_edges() {
    let mut line = round_line(1.0);
    let points: Vec<Point> = (0..11).map(|i| point(i as f32, 0.0)).collect();
    extrude_all(&mut line, &points);

    assert_eq!(line.forward_line().len(), 10);
    assert_eq!(line.backward_line().len(), 10);

    let first = line.forward_line()[0];
    let last = line.forward_line()[9];
    line.simplify(100, 0.01);
    assert_eq!(line.forward_line(), &[first, last]);
    assert_eq!(line.backward_line().len(), 2);

    // Only the window is simplified.
    let mut line = round_line(1.0);
    extrude_all(&mut line, &points);
    line.simplify(4, 0.01);
    assert_eq!(line.forward_line().len(), 8);

    // The same, while extruding.
    let mut line = FatLine::new(
        FatLineOptions::DEFAULT
            .with_tip_size(TipSize::circle(1.0))
            .with_simplification(100, 0.01),
    );
    for (i, p) in points.iter().enumerate() {
        line.extrude(*p, i as f64, false, true).unwrap();
    }
    assert_eq!(line.forward_line().len(), 2);
    assert_eq!(line.backward_line().len(), 2);
}

#[test]
fn join_to_previous_line() {
    let mut a = round_line(1.0);
    extrude_all(&mut a, &[point(0.0, 0.0), point(10.0, 0.0), point(20.0, 0.0)]);

    let mut b = round_line(1.0);
    b.join_to_line_end(&a).unwrap();
    extrude_all(&mut b, &[point(20.0, 0.0), point(30.0, 0.0)]);

    assert!(b.start_cap().is_empty());
    assert_eq!(b.forward_line()[0], *a.forward_line().last().unwrap());
    assert_eq!(b.backward_line()[0], *a.backward_line().last().unwrap());
    // Joined around the first sample of the new line.
    assert_eq!(b.forward_line().len(), 2);
    assert!((b.forward_line()[1].position - point(20.0, 1.0)).length() < 1e-4);
    assert!((b.backward_line()[1].position - point(20.0, -1.0)).length() < 1e-4);

    assert_eq!(b.join_to_line_end(&a), Err(StrokeError::LineNotEmpty));

    let mut single = round_line(1.0);
    extrude_all(&mut single, &[point(0.0, 0.0)]);
    assert_eq!(
        round_line(1.0).join_to_line_end(&single),
        Err(StrokeError::NotEnoughPoints {
            required: 2,
            actual: 1
        })
    );
}

#[test]
fn start_cap_from_other_line() {
    let mut a = round_line(1.0);
    extrude_all(&mut a, &[point(0.0, 0.0), point(10.0, 0.0)]);
    a.build_end_cap();

    let mut b = round_line(1.0);
    assert!(b.set_start_cap_to_line_back(&a).unwrap().is_some());
    let expected: Vec<Vertex> = a.end_cap().iter().rev().cloned().collect();
    assert_eq!(b.start_cap(), &expected[..]);

    extrude_all(&mut b, &[point(10.0, 0.0), point(20.0, 0.0)]);
    // The copied cap is kept.
    assert_eq!(b.start_cap(), &expected[..]);
    assert_eq!(b.forward_line(), &[expected[expected.len() - 1]]);
    assert_eq!(b.backward_line(), &[expected[0]]);

    assert_eq!(b.set_start_cap_to_line_back(&a), Err(StrokeError::LineNotEmpty));
}

#[test]
fn prediction_leaves_the_line_untouched() {
    let mut line = round_line(1.0);
    extrude_all(&mut line, &[point(0.0, 0.0), point(10.0, 0.0)]);

    let predicted = line
        .predicted(&[(point(20.0, 0.0), 2.0), (point(20.0, 0.0), 3.0)])
        .unwrap();

    assert_eq!(predicted.mid_points().len(), 4);
    assert!(!predicted.end_cap().is_empty());
    assert_eq!(predicted.forward_line().len(), 3);

    assert_eq!(line.mid_points().len(), 2);
    assert!(line.end_cap().is_empty());
    assert_eq!(line.forward_line().len(), 1);
}

#[test]
fn vertex_callback() {
    let mut line = round_line(1.0);
    line.set_vertex_callback(|v| v.color = [1.0, 0.0, 0.0, 1.0]);
    extrude_all(&mut line, &[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)]);
    line.build_end_cap();

    let red = [1.0, 0.0, 0.0, 1.0];
    for v in line
        .start_cap()
        .iter()
        .chain(line.forward_line())
        .chain(line.end_cap())
        .chain(line.backward_line())
    {
        assert_eq!(v.color, red);
    }

    line.clear_vertex_callback();
    line.clear_vertices();
    extrude_all(&mut line, &[point(0.0, 0.0), point(10.0, 0.0)]);
    assert_eq!(line.start_cap()[0].color, Vertex::DEFAULT_COLOR);
}

#[test]
fn settings() {
    let mut line = round_line(1.0);
    assert_eq!(line.tip_type(), TipType::Round);

    line.set_tip_type(TipType::Chisel);
    assert_eq!(line.tip_type(), TipType::Chisel);
    assert_eq!(line.tip_model().tip_type(), TipType::Chisel);

    line.set_turn_vertices(8);
    line.set_min_screen_travel_threshold(2.0);
    assert_eq!(line.options().turn_vertices, 8);
    assert_eq!(line.options().min_screen_travel_threshold, 2.0);

    let stylus = StylusState::DEFAULT.with_orientation(1.0);
    line.set_stylus_state(stylus);
    line.extrude(point(0.0, 0.0), 0.0, false, false).unwrap();
    assert_eq!(line.mid_points()[0].stylus_state, stylus);
    assert_eq!(line.extrude(point(1.0, 0.0), 1.0, false, false), Ok(None));

    let camera = Transform::scale(2.0, 2.0);
    line.set_down_camera(camera);
    assert_eq!(*line.down_camera(), camera);
}

#[test]
fn bounds_and_display() {
    let mut line = round_line(1.0);
    assert!(line.bounds().is_none());

    extrude_all(&mut line, &[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)]);
    line.build_end_cap();

    let bounds = line.bounds().unwrap();
    assert!((bounds.min - point(-1.0, -1.0)).length() < 0.05);
    assert!((bounds.max - point(11.0, 11.0)).length() < 0.05);

    let dump = line.to_string();
    assert!(dump.contains("mid points:"));
    assert!(dump.contains(&format!("forward ({}):", line.forward_line().len())));
    assert!(dump.contains(&format!("{:>12.4}", 10.0f32)));
}
