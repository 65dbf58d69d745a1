//! The [`Lab`] color primitive that the difference formula operates on.

use crate::ciede_2000;

/// A 64-bit floating point value that all color components are stored as.
///
/// Published ΔE2000 reference values carry more precision than an `f32`
/// holds, so components are always double precision.
pub type Component = f64;

/// A color specified in the CIE-Lab color space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lab {
    /// Lightness, nominally in `0..=100`.
    pub lightness: Component,
    /// The green to red axis, nominally in `-128..=128`.
    pub a: Component,
    /// The blue to yellow axis, nominally in `-128..=128`.
    pub b: Component,
}

impl Lab {
    /// Create a new CIE-Lab color. Components outside the nominal ranges
    /// are accepted and flow through the difference formula unchanged.
    pub fn new(lightness: Component, a: Component, b: Component) -> Self {
        Self { lightness, a, b }
    }

    /// The CIEDE2000 difference between this color and `other`.
    pub fn difference(&self, other: &Self) -> Component {
        ciede_2000(
            self.lightness,
            self.a,
            self.b,
            other.lightness,
            other.a,
            other.b,
        )
    }
}
