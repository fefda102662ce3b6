//! Decoded images as row-major grids of colors.

use crate::error::{invalid, Result};
use crate::{Color, RGBColor};

/// A row-major `width × height` grid of [`Color`]s.
///
/// Decoding and encoding image files is left to the caller; use
/// [`PixelMatrix::from_pixels`] and [`PixelMatrix::to_pixels`] to
/// exchange buffers of [`rgb`] pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelMatrix {
    width: usize,
    height: usize,
    pixels: Vec<Color>, // Invariant: length = width * height
}

impl PixelMatrix {
    pub fn new(width: usize, height: usize, pixels: Vec<Color>)
               -> Result<Self> {
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(invalid(format!(
                "pixel buffer length {} does not match dimensions {}x{}",
                pixels.len(), width, height)));
        }
        Ok(PixelMatrix { width, height, pixels })
    }

    /// Build a matrix whose pixel at column `x`, row `y` is `f(x, y)`.
    pub fn from_fn(width: usize, height: usize,
                   mut f: impl FnMut(usize, usize) -> Color) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0 .. height {
            for x in 0 .. width {
                pixels.push(f(x, y));
            }
        }
        PixelMatrix { width, height, pixels }
    }

    /// Convert a decoded buffer such as `&[RGB8]` or `&[RGBA8]`.
    pub fn from_pixels<P: RGBColor>(width: usize, height: usize, pixels: &[P])
                                    -> Result<Self> {
        Self::new(width, height, pixels.iter().map(P::to_rgb).collect())
    }

    /// Convert to a buffer suitable for an encoder.
    pub fn to_pixels<P: RGBColor>(&self) -> Vec<P> {
        self.pixels.iter().map(|&c| P::from_rgb(c)).collect()
    }

    #[inline]
    pub fn width(&self) -> usize { self.width }

    #[inline]
    pub fn height(&self) -> usize { self.height }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize { self.pixels.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.pixels.is_empty() }

    /// All pixels, row after row.
    #[inline]
    pub fn pixels(&self) -> &[Color] { &self.pixels }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        // `chunks` panics on 0.
        self.pixels.chunks(self.width.max(1))
    }

    /// Downsample by `factor` in both directions, each output pixel
    /// being the mean of a `factor × factor` block (truncated at the
    /// right and bottom edges).  Large images should be shrunk before
    /// color extraction.
    pub fn shrink(&self, factor: usize) -> Result<Self> {
        if factor == 0 {
            return Err(invalid("shrink factor must be at least 1"));
        }
        if factor == 1 {
            return Ok(self.clone());
        }
        let width = self.width.div_ceil(factor);
        let height = self.height.div_ceil(factor);
        Ok(Self::from_fn(width, height, |x, y| {
            let (mut r, mut g, mut b, mut n) = (0., 0., 0., 0.);
            for yy in y * factor .. ((y + 1) * factor).min(self.height) {
                let row = &self.pixels[yy * self.width .. (yy + 1) * self.width];
                for c in &row[x * factor .. ((x + 1) * factor).min(self.width)] {
                    r += c.r;
                    g += c.g;
                    b += c.b;
                    n += 1.;
                }
            }
            Color { r: r / n, g: g / n, b: b / n }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;

    #[test]
    fn dimensions_must_match() {
        assert!(PixelMatrix::new(2, 2, vec![Color::new(0., 0., 0.); 3]).is_err());
        let m = PixelMatrix::new(3, 1, vec![Color::new(0., 0., 0.); 3]).unwrap();
        assert_eq!((m.width(), m.height(), m.len()), (3, 1, 3));
    }

    #[test]
    fn row_major_layout() {
        let m = PixelMatrix::from_fn(3, 2, |x, y| {
            Color::new(x as f64 / 2., y as f64, 0.) });
        assert_eq!(m.get(2, 1), Some(Color::new(1., 1., 0.)));
        assert_eq!(m.pixels()[3], Color::new(0., 1., 0.));
        assert_eq!(m.get(3, 0), None);
        assert_eq!(m.rows().count(), 2);
    }

    #[test]
    fn rgb8_buffers() {
        let buf = [RGB8::new(255, 0, 0), RGB8::new(0, 0, 255)];
        let m = PixelMatrix::from_pixels(2, 1, &buf).unwrap();
        assert_eq!(m.pixels()[0], Color::new(1., 0., 0.));
        assert_eq!(m.to_pixels::<RGB8>(), buf.to_vec());
    }

    #[test]
    fn shrink_averages_blocks() {
        let m = PixelMatrix::from_fn(5, 4, |x, _| {
            if x < 2 { Color::new(1., 1., 1.) } else { Color::new(0., 0., 0.) } });
        let s = m.shrink(2).unwrap();
        assert_eq!((s.width(), s.height()), (3, 2));
        assert_eq!(s.get(0, 0), Some(Color::new(1., 1., 1.)));
        assert_eq!(s.get(1, 1), Some(Color::new(0., 0., 0.)));
        assert_eq!(s.get(2, 0), Some(Color::new(0., 0., 0.)));
        assert_eq!(m.shrink(1).unwrap(), m);
        assert!(m.shrink(0).is_err());
    }
}
