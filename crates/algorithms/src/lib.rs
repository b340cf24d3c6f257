#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]
#![no_std]

//! Polyline algorithms used by the stroke outliner.
//!
//! This crate is reexported in [quill](https://docs.rs/quill/).

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub extern crate quill_geom as geom;

pub mod aabb;
pub mod simplify;

pub mod math {
    //! f32 version of the quill_geom types used everywhere. The other quill crates
    //! reexport them.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f32>```.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for ```euclid::default::Vector2D<f32>```.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// Alias for ```euclid::default::Box2D<f32>```
    pub type Box2D = euclid::default::Box2D<f32>;

    /// Alias for ```euclid::default::Transform2D<f32>```
    pub type Transform = euclid::default::Transform2D<f32>;

    /// An angle in radians (f32).
    pub type Angle = euclid::Angle<f32>;

    /// Alias for ```quill_geom::Segment<f32>```.
    pub type Segment = crate::geom::Segment<f32>;

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }
}
