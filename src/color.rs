//! Conversions between normalized sRGB and the color spaces used for
//! distances, sorting and functional scheme construction.
//!
//! The conversions themselves are those of the [`palette`] crate, with
//! a D65 reference white.  [`Luv`] is the perceptual space: Euclidean
//! distance between two [`Luv`] values approximates the perceived
//! difference between the colors.

use palette::{white_point::D65, FromColor, LinSrgb, Srgb};
use crate::Color;

#[inline]
fn linear(c: Color) -> LinSrgb<f64> {
    Srgb::new(c.r, c.g, c.b).into_linear()
}

/// Out of gamut colors are clamped to the unit cube.
#[inline]
fn from_linear(lin: LinSrgb<f64>) -> Color {
    let (r, g, b) = Srgb::<f64>::from_linear(lin).into_components();
    Color { r: r.clamp(0., 1.), g: g.clamp(0., 1.), b: b.clamp(0., 1.) }
}

/// CIE L\*u\*v\* coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Luv {
    /// Lightness in \[0, 100\].
    pub l: f64,
    pub u: f64,
    pub v: f64,
}

impl Luv {
    pub fn from_rgb(c: Color) -> Luv {
        let luv: palette::Luv<D65, f64> = palette::Luv::from_color(linear(c));
        Luv { l: luv.l, u: luv.u, v: luv.v }
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_sq(&self, other: &Luv) -> f64 {
        let dl = self.l - other.l;
        let du = self.u - other.u;
        let dv = self.v - other.v;
        dl * dl + du * du + dv * dv
    }

    #[inline]
    pub fn distance(&self, other: &Luv) -> f64 { self.distance_sq(other).sqrt() }
}

/// CIE L\*a\*b\* coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub fn from_rgb(c: Color) -> Lab {
        let lab: palette::Lab<D65, f64> = palette::Lab::from_color(linear(c));
        Lab { l: lab.l, a: lab.a, b: lab.b }
    }

    pub fn to_rgb(&self) -> Color {
        let lab = palette::Lab::<D65, f64>::new(self.l, self.a, self.b);
        from_linear(LinSrgb::from_color(lab))
    }
}

/// CIE L\*C\*h°_ab: L\*a\*b\* in polar coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lch {
    /// Lightness in \[0, 100\].
    pub l: f64,
    /// Chroma, in practice in \[0, 100\] for colors inside sRGB.
    pub c: f64,
    /// Hue in degrees in \[0, 360).
    pub h: f64,
}

impl Lch {
    pub fn from_rgb(c: Color) -> Lch {
        let lch: palette::Lch<D65, f64> = palette::Lch::from_color(linear(c));
        Lch { l: lch.l, c: lch.chroma, h: lch.hue.into_positive_degrees() }
    }

    pub fn to_rgb(&self) -> Color {
        let lch = palette::Lch::<D65, f64>::new(self.l, self.c, self.h);
        from_linear(LinSrgb::from_color(lch))
    }
}

/// Hue, saturation, value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    /// Hue in degrees in \[0, 360\].
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub fn to_rgb(&self) -> Color {
        let hsv = palette::Hsv::<palette::encoding::Srgb, f64>::new(
            self.h, self.s, self.v);
        let (r, g, b) = Srgb::<f64>::from_color(hsv).into_components();
        Color { r: r.clamp(0., 1.), g: g.clamp(0., 1.), b: b.clamp(0., 1.) }
    }
}
