#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_arguments)]

//! Incremental outline construction for ink strokes.
//!
//! This crate is reexported in [quill](https://docs.rs/quill/).
//!
//! # Overview
//!
//! A [`FatLine`] turns a stream of samples (position, tip size, time and stylus
//! state) into the outline of the stroke, one sample at a time:
//!
//! - the first two samples produce the start cap,
//! - each following sample joins the edges around the turn at the previous sample,
//! - [`FatLine::build_end_cap`] closes the line.
//!
//! The shape of the caps and of the turns depends on the [`TipType`].
//! [`FatLine::outline_as_array`] concatenates the edges and caps of one or
//! several lines into a single closed polygon.
//!
//! ```
//! use quill_stroke::{FatLine, FatLineOptions, TipSize, TipType};
//! use quill_stroke::math::{point, Transform};
//!
//! let mut line = FatLine::new(
//!     FatLineOptions::DEFAULT
//!         .with_tip_size(TipSize::circle(2.0))
//!         .with_tip_type(TipType::Round),
//! );
//!
//! for (i, p) in [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)].iter().enumerate() {
//!     line.extrude(*p, i as f64, false, false).unwrap();
//! }
//! line.build_end_cap();
//!
//! let outline = FatLine::outline_as_array(&[line], &Transform::identity());
//! assert!(outline.len() > 4);
//! ```
//!
//! # Logging
//!
//! Decisions about individual samples are logged with `trace!`, cap construction and
//! simplification with `debug!` and recovered invalid states with `warn!`, through
//! the [log](https://docs.rs/log) facade.

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub extern crate quill_algorithms as algorithms;

pub use crate::algorithms::geom;
pub use crate::algorithms::math;

mod error;
mod fat_line;
mod mid_point;
mod outline;
pub mod tip;
mod tip_model;
pub mod tip_utils;
mod vertex;

#[cfg(test)]
mod stroke_tests;

#[doc(inline)]
pub use crate::error::StrokeError;
#[doc(inline)]
pub use crate::fat_line::FatLine;
#[doc(inline)]
pub use crate::mid_point::{MidPoint, StylusState, TipSize};
#[doc(inline)]
pub use crate::tip_model::TipModel;
#[doc(inline)]
pub use crate::vertex::{Vertex, VertexCallback};

/// The shape of the tip a line is drawn with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum TipType {
    Round,
    Square,
    Chisel,
}

impl Default for TipType {
    fn default() -> Self {
        TipType::Round
    }
}

/// Parameters of a [`FatLine`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FatLineOptions {
    /// Screen-space radii of the tip.
    ///
    /// Default value: `TipSize::DEFAULT`.
    pub tip_size: TipSize,

    /// Number of vertices used for a full circle when generating round joins and
    /// caps.
    ///
    /// Default value: `FatLineOptions::DEFAULT_TURN_VERTICES`.
    pub turn_vertices: u32,

    /// Default value: `TipType::Round`.
    pub tip_type: TipType,

    /// Samples closer than this to the previous sample are rejected unless forced.
    ///
    /// Default value: `FatLineOptions::DEFAULT_MIN_SCREEN_TRAVEL_THRESHOLD`.
    pub min_screen_travel_threshold: f32,

    /// Number of trailing edge vertices simplified after each sample when
    /// simplification is requested.
    ///
    /// Default value: `FatLineOptions::DEFAULT_SIMPLIFICATION_WINDOW`.
    pub simplification_window: usize,

    /// Maximum distance between the simplified and the original edges.
    ///
    /// Default value: `FatLineOptions::DEFAULT_SIMPLIFICATION_THRESHOLD`.
    pub simplification_threshold: f32,
}

impl FatLineOptions {
    pub const DEFAULT_TURN_VERTICES: u32 = 20;
    pub const DEFAULT_MIN_SCREEN_TRAVEL_THRESHOLD: f32 = 0.5;
    pub const DEFAULT_SIMPLIFICATION_WINDOW: usize = 16;
    pub const DEFAULT_SIMPLIFICATION_THRESHOLD: f32 = 0.05;

    pub const DEFAULT: Self = FatLineOptions {
        tip_size: TipSize::DEFAULT,
        turn_vertices: Self::DEFAULT_TURN_VERTICES,
        tip_type: TipType::Round,
        min_screen_travel_threshold: Self::DEFAULT_MIN_SCREEN_TRAVEL_THRESHOLD,
        simplification_window: Self::DEFAULT_SIMPLIFICATION_WINDOW,
        simplification_threshold: Self::DEFAULT_SIMPLIFICATION_THRESHOLD,
    };

    #[inline]
    pub const fn with_tip_size(mut self, tip_size: TipSize) -> Self {
        self.tip_size = tip_size;
        self
    }

    #[inline]
    pub const fn with_turn_vertices(mut self, turn_vertices: u32) -> Self {
        self.turn_vertices = turn_vertices;
        self
    }

    #[inline]
    pub const fn with_tip_type(mut self, tip_type: TipType) -> Self {
        self.tip_type = tip_type;
        self
    }

    #[inline]
    pub const fn with_min_screen_travel_threshold(mut self, threshold: f32) -> Self {
        self.min_screen_travel_threshold = threshold;
        self
    }

    #[inline]
    pub const fn with_simplification(mut self, window: usize, threshold: f32) -> Self {
        self.simplification_window = window;
        self.simplification_threshold = threshold;
        self
    }
}

impl Default for FatLineOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}
