//! Recoloring images with a palette.

use rayon::prelude::*;
use crate::color::Luv;
use crate::error::Result;
use crate::{Color, PixelMatrix, Scheme};

/// Replace every pixel of `pixels` with the color of `palette` that is
/// perceptually nearest (Euclidean distance in CIE L\*u\*v\*).  Ties
/// go to the entry appearing first in the palette.
///
/// # Example
///
/// ```
/// use colorscheme_tools::{remap, Color, PixelMatrix, Scheme};
/// let black = Color::new(0., 0., 0.);
/// let white = Color::new(1., 1., 1.);
/// let bw = Scheme::new(vec![black, white]).unwrap();
/// let img = PixelMatrix::new(2, 1, vec![Color::new(0.1, 0.1, 0.2),
///                                       Color::new(0.9, 0.8, 0.9)]).unwrap();
/// assert_eq!(remap(&bw, &img).unwrap().pixels(), &[black, white]);
/// ```
pub fn remap(palette: &Scheme, pixels: &PixelMatrix) -> Result<PixelMatrix> {
    // A `Scheme` is never empty.
    let entries: Vec<(Luv, Color)> = palette.colors().iter()
        .map(|&c| (Luv::from_rgb(c), c))
        .collect();
    let out = pixels.pixels().par_iter()
        .map(|&c| nearest(&entries, &Luv::from_rgb(c)))
        .collect();
    tracing::debug!(palette = entries.len(), pixels = pixels.len(),
                    "Remapped image");
    PixelMatrix::new(pixels.width(), pixels.height(), out)
}

fn nearest(entries: &[(Luv, Color)], luv: &Luv) -> Color {
    let mut best = entries[0].1;
    let mut best_d = f64::INFINITY;
    for (e, c) in entries {
        let d = e.distance_sq(luv);
        if d < best_d {
            best = *c;
            best_d = d;
        }
    }
    best
}
