#![deny(bare_trait_objects)]

//! Incremental outline construction for ink strokes.
//!
//! # Crates
//!
//! This meta-crate (`quill`) reexports the following sub-crates for convenience:
//!
//! * **quill_stroke** - The [`FatLine`](stroke::FatLine) outliner and its tip models.
//! * **quill_algorithms** - Polyline simplification and bounding boxes.
//! * **quill_geom** - Orientation predicates, circle tangents and segment intersection.
//!
//! Each `quill_<name>` crate is reexported as a `<name>` module in `quill`. For example:
//!
//! ```ignore
//! extern crate quill_stroke;
//! use quill_stroke::FatLine;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate quill;
//! use quill::stroke::FatLine;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Logging
//!
//! The outliner logs through the [log](https://docs.rs/log) facade. Install any
//! logger implementation to see which samples are rejected, dropped or pruned.
//!
//! # Examples
//!
//! ## Outlining a chisel stroke
//!
//! ```
//! use quill::math::{point, Transform};
//! use quill::stroke::{FatLine, FatLineOptions, StylusState, TipSize, TipType};
//!
//! let mut line = FatLine::new(
//!     FatLineOptions::DEFAULT
//!         .with_tip_size(TipSize::new(4.0, 1.0))
//!         .with_tip_type(TipType::Chisel),
//! );
//! line.set_stylus_state(StylusState::DEFAULT.with_orientation(0.7));
//!
//! let samples = [
//!     point(0.0, 0.0),
//!     point(20.0, 5.0),
//!     point(40.0, 0.0),
//!     point(60.0, 10.0),
//! ];
//!
//! for (i, position) in samples.iter().enumerate() {
//!     // Returns the area of the outline that changed.
//!     let _dirty = line.extrude(*position, i as f64 * 0.016, false, true).unwrap();
//! }
//! line.build_end_cap();
//!
//! // A single closed polygon, ready to be filled.
//! let polygon = FatLine::outline_as_array(&[line], &Transform::identity());
//! assert!(polygon.len() > 4);
//! ```
//!
//! ## Continuing a stroke
//!
//! A long stroke can be split into several lines, for example to only re-mesh
//! the part that changed. The next line is joined to the end of the previous one
//! and the outline of the sequence is still a single polygon.
//!
//! ```
//! use quill::math::{point, Transform};
//! use quill::stroke::{FatLine, TipSize, TipType};
//!
//! let mut first = FatLine::with_tip(TipSize::circle(2.0), 20, TipType::Round);
//! for (i, x) in [0.0, 10.0, 20.0].iter().enumerate() {
//!     first.extrude(point(*x, 0.0), i as f64, false, false).unwrap();
//! }
//!
//! let mut second = FatLine::with_tip(TipSize::circle(2.0), 20, TipType::Round);
//! second.join_to_line_end(&first).unwrap();
//! // Starts from the last sample of the previous line.
//! for (i, p) in [point(20.0, 0.0), point(30.0, 5.0), point(40.0, 5.0)].iter().enumerate() {
//!     second.extrude(*p, i as f64, false, false).unwrap();
//! }
//! second.build_end_cap();
//!
//! let polygon = FatLine::outline_as_array(&[first, second], &Transform::identity());
//! assert!(polygon.len() > 4);
//! ```

pub extern crate quill_algorithms;
pub extern crate quill_stroke;

pub use quill_algorithms as algorithms;
pub use quill_stroke as stroke;

pub use quill_algorithms::geom;
pub use quill_algorithms::math;
