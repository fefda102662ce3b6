//! Dominant colors of an image by k-means clustering.

use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use crate::error::{invalid, Result};
use crate::sort::{sort, SortField};
use crate::{is_normalized, Color, PixelMatrix, Scheme, WeightedScheme};

/// Parameters of [`extract`] and [`extract_weighted`].
///
/// ```
/// use colorscheme_tools::ExtractOptions;
/// let opt = ExtractOptions::default().n(5).max_iterations(50).seed(7);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractOptions {
    n: usize,
    max_iterations: usize,
    tolerance: f64,
    seed: u64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions { n: 10, max_iterations: 10, tolerance: 0.01,
                         seed: 0x5eed }
    }
}

impl ExtractOptions {
    /// Number of colors to extract (default 10).
    pub fn n(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Maximum number of refinement passes (default 10).
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Stop as soon as the summed displacement of the centroids
    /// during a pass falls below `tolerance` (default 0.01).
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Seed of the generator picking the initial centroids.  The
    /// same seed and image always give the same result.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(invalid("the number of colors to extract must be positive"));
        }
        if self.max_iterations == 0 {
            return Err(invalid("at least one iteration is required"));
        }
        if !(self.tolerance > 0.) {
            return Err(invalid(format!(
                "the tolerance must be positive, got {}", self.tolerance)));
        }
        Ok(())
    }
}

/// Result of [`extract_weighted`].
#[derive(Clone, Debug, PartialEq)]
pub struct Extraction {
    /// The cluster centroids, in cluster order.
    pub scheme: Scheme,
    /// Share of the pixels nearest to each centroid.  Sums to 1.
    pub weights: Vec<f64>,
    /// Whether the tolerance was reached before the iteration cap.
    pub converged: bool,
    /// Number of refinement passes performed.
    pub iterations: usize,
}

impl Extraction {
    pub fn into_weighted(self) -> Result<WeightedScheme> {
        WeightedScheme::new(self.scheme, self.weights)
    }
}

/// Return the `options.n` most representative colors of `pixels`.
///
/// Large images should be reduced with [`PixelMatrix::shrink`] first.
pub fn extract(pixels: &PixelMatrix, options: &ExtractOptions) -> Result<Scheme> {
    Ok(extract_weighted(pixels, options)?.scheme)
}

/// Cluster the colors of `pixels` into `options.n` groups and return
/// the centroids along with the share of pixels belonging to each.
///
/// Initial centroids are distinct pixels drawn at random (with
/// repetition only when there are fewer pixels than clusters).  A
/// cluster left without pixels after a pass is moved onto a random
/// pixel.  Failing to reach the tolerance is not an error, see
/// [`Extraction::converged`].
pub fn extract_weighted(pixels: &PixelMatrix, options: &ExtractOptions)
                        -> Result<Extraction> {
    options.validate()?;
    if pixels.is_empty() {
        return Err(invalid("cannot extract colors from an empty image"));
    }
    let px = pixels.pixels();
    if let Some(i) = px.iter().position(|c| !is_normalized(c)) {
        return Err(invalid(format!(
            "pixel {} {:?} has components outside [0, 1]", i, px[i])));
    }
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut centroids = initial_centroids(px, options.n, &mut rng);
    let mut converged = false;
    let mut iterations = 0;
    while iterations < options.max_iterations {
        iterations += 1;
        let labels = assign(px, &centroids);
        let next = recenter(px, &labels, options.n, &mut rng);
        let movement: f64 = centroids.iter().zip(&next)
            .map(|(&c0, &c1)| distance_sq(c0, c1).sqrt())
            .sum();
        centroids = next;
        tracing::trace!(iteration = iterations, movement, "k-means pass");
        if movement < options.tolerance {
            converged = true;
            break;
        }
    }
    if !converged {
        tracing::debug!(iterations, tolerance = options.tolerance,
                        "k-means stopped before converging");
    }
    let mut counts = vec![0usize; options.n];
    for k in assign(px, &centroids) {
        counts[k] += 1;
    }
    let total = px.len() as f64;
    let weights = counts.iter().map(|&c| c as f64 / total).collect();
    tracing::debug!(n = options.n, pixels = px.len(), iterations, converged,
                    "Extracted colors");
    Ok(Extraction { scheme: Scheme::from_colors(centroids), weights,
                    converged, iterations })
}

/// Extract the colors of `pixels`, order them from dark to light and
/// render them with [`Scheme::to_image`].
pub fn swatch(pixels: &PixelMatrix, options: &ExtractOptions,
              nrows: usize, tilewidth: usize) -> Result<PixelMatrix> {
    let scheme = extract(pixels, options)?;
    sort(&scheme, SortField::Luminance, false).to_image(nrows, tilewidth)
}

#[inline]
fn distance_sq(c0: Color, c1: Color) -> f64 {
    let (dr, dg, db) = (c0.r - c1.r, c0.g - c1.g, c0.b - c1.b);
    dr * dr + dg * dg + db * db
}

fn initial_centroids(px: &[Color], n: usize, rng: &mut StdRng) -> Vec<Color> {
    let distinct = n.min(px.len());
    let mut centroids: Vec<Color> =
        rand::seq::index::sample(rng, px.len(), distinct).into_iter()
        .map(|i| px[i])
        .collect();
    while centroids.len() < n {
        centroids.push(px[rng.gen_range(0 .. px.len())]);
    }
    centroids
}

/// Index of the nearest centroid of each pixel, the lowest index
/// winning ties.
fn assign(px: &[Color], centroids: &[Color]) -> Vec<usize> {
    px.par_iter().map(|&c| {
        let mut best = 0;
        let mut best_d = f64::INFINITY;
        for (k, &m) in centroids.iter().enumerate() {
            let d = distance_sq(c, m);
            if d < best_d {
                best = k;
                best_d = d;
            }
        }
        best
    }).collect()
}

/// Mean color of each cluster.  Sequential so that the sums, hence
/// the result, do not depend on the number of threads.
fn recenter(px: &[Color], labels: &[usize], n: usize, rng: &mut StdRng)
            -> Vec<Color> {
    let mut sums = vec![(0., 0., 0., 0usize); n];
    for (c, &k) in px.iter().zip(labels) {
        let s = &mut sums[k];
        s.0 += c.r;
        s.1 += c.g;
        s.2 += c.b;
        s.3 += 1;
    }
    sums.into_iter().enumerate().map(|(k, (r, g, b, count))| {
        if count == 0 {
            let c = px[rng.gen_range(0 .. px.len())];
            tracing::trace!(cluster = k, "Reseeding empty cluster");
            c
        } else {
            let count = count as f64;
            Color { r: (r / count).clamp(0., 1.), g: (g / count).clamp(0., 1.),
                    b: (b / count).clamp(0., 1.) }
        }
    }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SchemeError;
    use pretty_assertions::assert_eq;

    const RED: Color = Color { r: 1., g: 0., b: 0. };
    const BLUE: Color = Color { r: 0., g: 0., b: 1. };

    fn halves() -> PixelMatrix {
        PixelMatrix::from_fn(10, 10, |x, _| if x < 5 { RED } else { BLUE })
    }

    fn gradient() -> PixelMatrix {
        PixelMatrix::from_fn(20, 20, |x, y| {
            Color::new(x as f64 / 19., y as f64 / 19., 0.5) })
    }

    #[test]
    fn two_color_image() {
        let opt = ExtractOptions::default().n(2);
        let e = extract_weighted(&halves(), &opt).unwrap();
        assert!(e.converged);
        let mut colors = e.scheme.colors().to_vec();
        colors.sort_by(|c0, c1| c0.r.total_cmp(&c1.r));
        assert_eq!(colors, vec![BLUE, RED]);
        assert_eq!(e.weights, vec![0.5, 0.5]);
    }

    #[test]
    fn deterministic() {
        let opt = ExtractOptions::default().n(4).seed(42);
        let e0 = extract_weighted(&gradient(), &opt).unwrap();
        let e1 = extract_weighted(&gradient(), &opt).unwrap();
        assert_eq!(e0, e1);
    }

    #[test]
    fn weights_sum_to_one() {
        let e = extract_weighted(&gradient(), &ExtractOptions::default())
            .unwrap();
        assert_eq!(e.scheme.len(), 10);
        assert_eq!(e.weights.len(), 10);
        assert!((e.weights.iter().sum::<f64>() - 1.).abs() < 1e-12);
        assert!(e.scheme.colors().iter().all(is_normalized));
    }

    #[test]
    fn iteration_cap() {
        let opt = ExtractOptions::default().n(3).max_iterations(1)
            .tolerance(1e-12);
        let e = extract_weighted(&gradient(), &opt).unwrap();
        assert!(!e.converged);
        assert_eq!(e.iterations, 1);
        // A uniform image is fixed from the start.
        let flat = PixelMatrix::from_fn(4, 4, |_, _| RED);
        let e = extract_weighted(&flat, &ExtractOptions::default().n(1))
            .unwrap();
        assert!(e.converged);
        assert_eq!(e.iterations, 1);
        assert_eq!(e.scheme.colors(), &[RED]);
    }

    #[test]
    fn more_clusters_than_pixels() {
        let tiny = PixelMatrix::new(2, 1, vec![RED, BLUE]).unwrap();
        let e = extract_weighted(&tiny, &ExtractOptions::default().n(5))
            .unwrap();
        assert_eq!(e.scheme.len(), 5);
        assert!(e.scheme.colors().iter().all(|&c| c == RED || c == BLUE));
        assert!((e.weights.iter().sum::<f64>() - 1.).abs() < 1e-12);
    }

    #[test]
    fn weighted_pipeline() {
        let e = extract_weighted(&halves(), &ExtractOptions::default().n(2))
            .unwrap();
        let w = e.into_weighted().unwrap();
        assert_eq!(w.resample(10).unwrap().len(), 10);
    }

    #[test]
    fn swatch_is_sorted() {
        let img = swatch(&halves(), &ExtractOptions::default().n(2), 3, 2)
            .unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
        // Blue is darker than red.
        assert_eq!(img.get(0, 0), Some(BLUE));
        assert_eq!(img.get(3, 2), Some(RED));
    }

    #[test]
    fn invalid_input() {
        let bad = |img: &PixelMatrix, opt: ExtractOptions| {
            matches!(extract(img, &opt), Err(SchemeError::InvalidInput(_))) };
        let empty = PixelMatrix::new(0, 0, vec![]).unwrap();
        assert!(bad(&empty, ExtractOptions::default()));
        assert!(bad(&halves(), ExtractOptions::default().n(0)));
        assert!(bad(&halves(), ExtractOptions::default().max_iterations(0)));
        assert!(bad(&halves(), ExtractOptions::default().tolerance(0.)));
        assert!(bad(&halves(), ExtractOptions::default().tolerance(f64::NAN)));
        let over = PixelMatrix::new(1, 1, vec![Color::new(2., 0., 0.)]).unwrap();
        assert!(bad(&over, ExtractOptions::default()));
    }
}
