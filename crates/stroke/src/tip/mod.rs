//! The tip shapes a [`FatLine`](crate::FatLine) can be drawn with.

mod chisel;
mod round;
mod square;

pub use self::chisel::{ChiselTip, SidePoint};
pub use self::round::RoundTip;
pub use self::square::SquareTip;

use crate::geom::circle::points_on_circle;
use crate::math::Point;

use core::f32::consts::PI;

/// A closed polygon approximating a full circle, without repeating the first point.
fn full_circle(center: Point, radius: f32, turn_vertices: u32) -> Vec<Point> {
    let mut points = points_on_circle(center, radius, turn_vertices.max(4), 0.0, 2.0 * PI);
    points.pop();

    points
}
