use crate::geom::Circle;
use crate::math::{vector, Point};

/// Screen-space radii of the tip.
///
/// Round and square tips only use `radius`. Chisel nibs are made of two circles of
/// radius `radius_minor`, `2 * radius` apart.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct TipSize {
    pub radius: f32,
    pub radius_minor: f32,
}

impl TipSize {
    pub const DEFAULT: Self = TipSize {
        radius: 1.0,
        radius_minor: 1.0,
    };

    #[inline]
    pub const fn new(radius: f32, radius_minor: f32) -> Self {
        TipSize {
            radius,
            radius_minor,
        }
    }

    /// A tip size with both radii set to `radius`.
    #[inline]
    pub const fn circle(radius: f32) -> Self {
        TipSize {
            radius,
            radius_minor: radius,
        }
    }

    /// Both radii are finite and not negative.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.radius.is_finite()
            && self.radius_minor.is_finite()
            && self.radius >= 0.0
            && self.radius_minor >= 0.0
    }
}

impl Default for TipSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Pressure, tilt and orientation of the stylus for a sample.
///
/// Angles are in radians. The orientation drives the direction of chisel nibs.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct StylusState {
    pub pressure: f32,
    pub tilt: f32,
    pub orientation: f32,
}

impl StylusState {
    pub const DEFAULT: Self = StylusState {
        pressure: 1.0,
        tilt: 0.0,
        orientation: 0.0,
    };

    #[inline]
    pub const fn with_orientation(mut self, orientation: f32) -> Self {
        self.orientation = orientation;
        self
    }
}

impl Default for StylusState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A sample accepted into a [`FatLine`](crate::FatLine).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct MidPoint {
    pub screen_position: Point,
    pub tip_size: TipSize,
    pub time: f64,
    pub stylus_state: StylusState,
}

impl MidPoint {
    #[inline]
    pub fn new(screen_position: Point, tip_size: TipSize, time: f64, stylus_state: StylusState) -> Self {
        MidPoint {
            screen_position,
            tip_size,
            time,
            stylus_state,
        }
    }

    /// A sample with a circular tip of the given radius and default stylus state.
    #[inline]
    pub fn with_radius(screen_position: Point, radius: f32) -> Self {
        MidPoint::new(screen_position, TipSize::circle(radius), 0.0, StylusState::DEFAULT)
    }

    #[inline]
    pub fn circle(&self) -> Circle<f32> {
        Circle::new(self.screen_position, self.tip_size.radius)
    }

    /// Position of the second circle of a chisel nib.
    #[inline]
    pub fn nib_tail(&self) -> Point {
        let angle = self.stylus_state.orientation;
        self.screen_position + vector(angle.cos(), angle.sin()) * (2.0 * self.tip_size.radius)
    }
}
