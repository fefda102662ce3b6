//! Color schemes: build them, extract them from images, sort,
//! resample and apply them.
//!
//! A [`Scheme`] is an ordered sequence of colors sampled along \[0, 1\]
//! and usable as a colormap.  Schemes are produced by
//!
//! - [`build()`]: from a breakpoint table, an indexed list of control
//!   points, three generator functions or a plain list of colors;
//! - [`extract()`] and [`extract_weighted`]: the dominant colors of an
//!   image, found by k-means clustering;
//!
//! and transformed by [`sort()`] and [`weighted_resample`].  [`remap()`]
//! redraws an image using only the colors of a scheme.
//!
//! Named schemes (matplotlib's `hot`, `terrain`,…) are available from
//! [`SchemeLibrary::builtin`].

use rgb::{RGB, RGBA, RGB8, RGB16, RGBA8, RGBA16};

pub mod build;
pub mod color;
mod error;
pub mod extract;
pub mod image;
mod palettes;
pub mod remap;
pub mod scheme;
pub mod sort;
pub mod weighted;

pub use build::{build, Breakpoint, BreakpointTable, ColorModel, ControlPoint,
                SchemeRequest, DEFAULT_LENGTH};
pub use error::{Result, SchemeError};
pub use extract::{extract, extract_weighted, swatch, ExtractOptions,
                  Extraction};
pub use image::PixelMatrix;
pub use remap::remap;
pub use scheme::{Scheme, SchemeLibrary, SchemeRecord};
pub use sort::{sort, SortField};
pub use weighted::{weighted_resample, WeightedScheme,
                   DEFAULT_WEIGHTED_LENGTH};

/// A color with red, green and blue components in \[0, 1\].
pub type Color = RGB<f64>;

/// Says whether all components of `c` lie in \[0, 1\].
#[inline]
pub(crate) fn is_normalized(c: &Color) -> bool {
    (0. ..= 1.).contains(&c.r) && (0. ..= 1.).contains(&c.g)
        && (0. ..= 1.).contains(&c.b)
}

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\].
    fn rgb(&self, t: f64) -> Color;

    /// Return an iterator yielding uniform sampling of `n` points
    /// between `a` and `b` (with the bounds `a` and `b` included in
    /// the list of points) together with colors.  It is not required
    /// that `a <= b`.  The colors are taken at `k / (n - 1)` so the
    /// first and last ones are exactly `self.rgb(0.)` and
    /// `self.rgb(1.)`.
    fn range(self, mut a: f64, mut b: f64, n: usize) -> Range<Self>
    where Self: Sized {
        if a == f64::INFINITY { a = f64::MAX; }
        else if a == f64::NEG_INFINITY { a = f64::MIN };
        if b == f64::NEG_INFINITY { b = f64::MIN; }
        else if b == f64::INFINITY { b = f64::MAX };
        if n == 0 {
            Range { range: self, a, b, flast: 0., last: 0,
                    i: 1, j: 0 } // Empty iterator
        } else {
            Range { range: self, a, b, flast: (n - 1) as f64,
                    last: n - 1, i: 0, j: n - 1 }
        }
    }

    /// Sample `n` colors uniformly on \[0, 1\].
    fn sample(self, n: usize) -> Vec<Color>
    where Self: Sized {
        self.range(0., 1., n).map(|(_, c)| c).collect()
    }
}

impl<R: ColorRange + ?Sized> ColorRange for &R {
    #[inline]
    fn rgb(&self, t: f64) -> Color { R::rgb(*self, t) }
}

/// An iterator yielding `f64` in a given range together with colors.
pub struct Range<R> {
    range: R,
    a: f64, // finite or NaN
    b: f64, // finite or NaN
    flast: f64, // `last` as a floating-point number
    last: usize,
    i: usize, // first position to be consumed (i ≤ j)
    j: usize, // last position to be consumed
}

impl<R: ColorRange> Range<R> {
    /// Return the float and color of the position `k` (assuming it
    /// is in the range `0 ..= self.last`).
    fn rgb(&self, k: usize) -> (f64, Color) {
        if k == 0 {
            (self.a, self.range.rgb(0.))
        } else if k == self.last {
            (self.b, self.range.rgb(1.))
        } else {
            let alpha = (self.last - k) as f64;
            let beta = k as f64;
            let t = beta / self.flast;
            let mut x = (alpha * self.a + beta * self.b) / self.flast;
            if x.is_infinite() {
                x = (1. - t) * self.a + t * self.b;
            }
            (x, self.range.rgb(t))
        }
    }

    fn remaining(&self) -> usize {
        if self.i <= self.j { self.j - self.i + 1 } else { 0 }
    }
}

impl<R: ColorRange> Iterator for Range<R> {
    type Item = (f64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.rgb(self.i);
            self.i += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining();
        (len, Some(len))
    }
}

impl<R: ColorRange> ExactSizeIterator for Range<R> {
    fn len(&self) -> usize { self.remaining() }
}

impl<R: ColorRange> DoubleEndedIterator for Range<R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.rgb(self.j);
            if self.j == 0 {
                self.i = 1
            } else {
                self.j -= 1;
            }
            Some(item)
        } else {
            None
        }
    }
}

/// Pixel encodings that can be exchanged with normalized [`Color`]s.
///
/// Alpha is discarded on the way in and set to opaque on the way out.
pub trait RGBColor: Sized {
    /// Return the red, green and blue components in \[0, 1\].
    fn to_rgb(&self) -> Color;

    /// Create a pixel from components in \[0, 1\].
    fn from_rgb(c: Color) -> Self;
}

#[inline]
fn to_u8(x: f64) -> u8 { (255. * x.clamp(0., 1.)).round() as u8 }

#[inline]
fn to_u16(x: f64) -> u16 { (65535. * x.clamp(0., 1.)).round() as u16 }

impl RGBColor for RGB<f64> {
    #[inline]
    fn to_rgb(&self) -> Color { *self }

    #[inline]
    fn from_rgb(c: Color) -> Self { c }
}

impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgb(&self) -> Color { Color { r: self.r, g: self.g, b: self.b } }

    #[inline]
    fn from_rgb(c: Color) -> Self { RGBA { r: c.r, g: c.g, b: c.b, a: 1. } }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgb(&self) -> Color {
        Color { r: self.r as f64 / 255., g: self.g as f64 / 255.,
                b: self.b as f64 / 255. }
    }

    #[inline]
    fn from_rgb(c: Color) -> Self {
        RGB8 { r: to_u8(c.r), g: to_u8(c.g), b: to_u8(c.b) }
    }
}

impl RGBColor for RGB16 {
    #[inline]
    fn to_rgb(&self) -> Color {
        Color { r: self.r as f64 / 65535., g: self.g as f64 / 65535.,
                b: self.b as f64 / 65535. }
    }

    #[inline]
    fn from_rgb(c: Color) -> Self {
        RGB16 { r: to_u16(c.r), g: to_u16(c.g), b: to_u16(c.b) }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgb(&self) -> Color { RGB8::new(self.r, self.g, self.b).to_rgb() }

    #[inline]
    fn from_rgb(c: Color) -> Self {
        RGBA8 { r: to_u8(c.r), g: to_u8(c.g), b: to_u8(c.b), a: 255 }
    }
}

impl RGBColor for RGBA16 {
    #[inline]
    fn to_rgb(&self) -> Color { RGB16::new(self.r, self.g, self.b).to_rgb() }

    #[inline]
    fn from_rgb(c: Color) -> Self {
        RGBA16 { r: to_u16(c.r), g: to_u16(c.g), b: to_u16(c.b), a: 65535 }
    }
}
