use thiserror::Error;

/// Errors caused by calling [`FatLine`](crate::FatLine) methods out of order or
/// with invalid input.
///
/// Rejected samples (too close to the previous one, vetoed by the tip model) are
/// not errors. They are reported as `Ok(None)` by
/// [`FatLine::extrude`](crate::FatLine::extrude).
#[derive(Error, Copy, Clone, Debug, PartialEq)]
pub enum StrokeError {
    #[error("The line must be empty.")]
    LineNotEmpty,
    #[error("Expected at least {required} mid-points, got {actual}.")]
    NotEnoughPoints { required: usize, actual: usize },
    #[error("Invalid tip size (radius: {radius}, minor radius: {radius_minor}).")]
    InvalidTipSize { radius: f32, radius_minor: f32 },
    #[error("Invalid sample position ({x}, {y}).")]
    InvalidPosition { x: f32, y: f32 },
}
