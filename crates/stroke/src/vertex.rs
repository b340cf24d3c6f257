use crate::math::Point;

use std::sync::Arc;

/// An outline point.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Vertex {
    pub position: Point,
    /// Linear RGBA.
    pub color: [f32; 4],
}

impl Vertex {
    pub const DEFAULT_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    #[inline]
    pub fn new(position: Point) -> Self {
        Vertex {
            position,
            color: Self::DEFAULT_COLOR,
        }
    }
}

/// Called on every vertex a [`FatLine`](crate::FatLine) emits, to fill in per-vertex
/// metadata.
///
/// Shared so that clones of a line (predictions) use the same callback, and
/// `Send + Sync` so that a finished line can be handed to another thread.
pub type VertexCallback = Arc<dyn Fn(&mut Vertex) + Send + Sync>;
