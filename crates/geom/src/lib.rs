#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Simple 2D geometric primitives for stroke outlining, on top of euclid.
//!
//! This crate is reexported in [quill](https://docs.rs/quill/).
//!
//! # Overview.
//!
//! This crate implements the maths the stroke outliner is built on:
//!
//! - signed areas, orientation tests and turn angles ([`utils`]),
//! - points on circles, arcs and the common tangents of two circles ([`circle`]),
//! - line segments and their intersection ([`Segment`]).
//!
//! # Robustness
//!
//! Stroke coordinates go through several transforms before reaching the outliner
//! and samples can be arbitrarily close to each other. The predicates in this crate
//! favor returning a stable, conservative answer over an exact one:
//!
//! - [`utils::orientation`] treats points within a few ulps of a line specially
//!   instead of trusting the sign of a noisy determinant.
//! - [`Segment::intersection`] rescales its operands by a power of two when their
//!   magnitude would overflow or underflow the cross products.
//! - [`circle::common_tangents`] reports degenerate configurations instead of
//!   producing NaNs.

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod circle;
mod segment;
pub mod utils;

#[doc(inline)]
pub use crate::circle::{Circle, CircleTangents};
#[doc(inline)]
pub use crate::segment::Segment;
#[doc(inline)]
pub use crate::utils::RelativePos;

pub use crate::scalar::Scalar;

mod scalar {
    pub(crate) use num_traits::cast::cast;
    pub(crate) use num_traits::{Float, FloatConst, NumCast};

    use core::fmt::{Debug, Display};
    use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};
    use float_next_after::NextAfter;

    pub trait Scalar:
        Float
        + NumCast
        + FloatConst
        + Sized
        + Display
        + Debug
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
    {
        const HALF: Self;
        const ZERO: Self;
        const ONE: Self;
        const TWO: Self;
        const EIGHT: Self;

        /// Largest power-of-two exponent that can be applied in a single multiplication
        /// without leaving the normal range.
        const EXPONENT_STEP: i32;

        /// The next representable value after `self` in the direction of `toward`.
        fn next_after(self, toward: Self) -> Self;
    }

    impl Scalar for f32 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const EIGHT: Self = 8.0;

        const EXPONENT_STEP: i32 = 60;

        #[inline]
        fn next_after(self, toward: Self) -> Self {
            NextAfter::next_after(self, toward)
        }
    }

    impl Scalar for f64 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const EIGHT: Self = 8.0;

        const EXPONENT_STEP: i32 = 500;

        #[inline]
        fn next_after(self, toward: Self) -> Self {
            NextAfter::next_after(self, toward)
        }
    }
}

/// Alias for `euclid::default::Point2D`.
pub use euclid::default::Point2D as Point;

/// Alias for `euclid::default::Vector2D`.
pub use euclid::default::Vector2D as Vector;

/// Alias for `euclid::default::Box2D`
pub use euclid::default::Box2D;

/// Alias for `euclid::default::Transform2D`
pub type Transform<S> = euclid::default::Transform2D<S>;

/// An angle in radians.
pub use euclid::Angle;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector<S>(x: S, y: S) -> Vector<S> {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point<S>(x: S, y: S) -> Point<S> {
    Point::new(x, y)
}

pub mod traits {
    use crate::{Point, Scalar, Transform, Vector};

    pub trait Transformation<S> {
        fn transform_point(&self, p: Point<S>) -> Point<S>;
        fn transform_vector(&self, v: Vector<S>) -> Vector<S>;
    }

    impl<S: Scalar> Transformation<S> for Transform<S> {
        fn transform_point(&self, p: Point<S>) -> Point<S> {
            self.transform_point(p)
        }

        fn transform_vector(&self, v: Vector<S>) -> Vector<S> {
            self.transform_vector(v)
        }
    }

    // Automatically implement Transformation for all &Transformation.
    impl<'l, S: Scalar, T: Transformation<S>> Transformation<S> for &'l T {
        #[inline]
        fn transform_point(&self, p: Point<S>) -> Point<S> {
            (*self).transform_point(p)
        }

        #[inline]
        fn transform_vector(&self, v: Vector<S>) -> Vector<S> {
            (*self).transform_vector(v)
        }
    }
}
