//! Schemes in which each color takes room proportional to its weight.

use crate::error::{invalid, Result};
use crate::Scheme;

/// Length of a resampled scheme when the caller has no preference.
pub const DEFAULT_WEIGHTED_LENGTH: usize = 50;

/// A scheme together with the relative prominence of each color.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedScheme {
    scheme: Scheme,
    weights: Vec<f64>, // Invariant: same length as the scheme, sum = 1
}

impl WeightedScheme {
    /// Pair `scheme` with `weights`, one per color, non-negative and
    /// not all zero.  Weights are normalized to sum to 1.
    pub fn new(scheme: Scheme, weights: Vec<f64>) -> Result<Self> {
        let weights = normalize(&scheme, &weights)?;
        Ok(WeightedScheme { scheme, weights })
    }

    pub fn scheme(&self) -> &Scheme { &self.scheme }

    pub fn weights(&self) -> &[f64] { &self.weights }

    pub fn into_parts(self) -> (Scheme, Vec<f64>) { (self.scheme, self.weights) }

    /// See [`weighted_resample`].
    pub fn resample(&self, len: usize) -> Result<Scheme> {
        resample_normalized(&self.scheme, &self.weights, len)
    }
}

fn normalize(scheme: &Scheme, weights: &[f64]) -> Result<Vec<f64>> {
    if weights.len() != scheme.len() {
        return Err(invalid(format!(
            "{} weights given for a scheme of {} colors",
            weights.len(), scheme.len())));
    }
    if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.) {
        return Err(invalid(format!("weights must be non-negative, got {}", w)));
    }
    let total: f64 = weights.iter().sum();
    if total <= 0. || !total.is_finite() {
        return Err(invalid("weights must not all be zero"));
    }
    Ok(weights.iter().map(|w| w / total).collect())
}

/// Return a scheme of `len` colors in which each color of `scheme`
/// occupies a share of the slots proportional to its weight.
///
/// Slot `k` sits at position `k / (len - 1)` and receives the first
/// color whose cumulative weight reaches that position, so a position
/// on the boundary between two colors goes to the earlier one.
/// Colors are repeated, never blended.  Weights need not sum to 1.
///
/// # Example
///
/// ```
/// use colorscheme_tools::{weighted_resample, Color, Scheme};
/// let a = Color::new(1., 0., 0.);
/// let b = Color::new(0., 0., 1.);
/// let s = Scheme::new(vec![a, b]).unwrap();
/// let w = weighted_resample(&s, &[0.8, 0.2], 10).unwrap();
/// assert_eq!(w.colors(), &[a, a, a, a, a, a, a, a, b, b]);
/// ```
pub fn weighted_resample(scheme: &Scheme, weights: &[f64], len: usize)
                         -> Result<Scheme> {
    resample_normalized(scheme, &normalize(scheme, weights)?, len)
}

fn resample_normalized(scheme: &Scheme, weights: &[f64], len: usize)
                       -> Result<Scheme> {
    if len == 0 {
        return Err(invalid("the resampled scheme must have at least one color"));
    }
    let mut cumulative = Vec::with_capacity(weights.len());
    let mut sum = 0f64;
    for &w in weights {
        sum += w;
        cumulative.push(sum);
    }
    let colors = scheme.colors();
    let last = colors.len() - 1;
    let flast = (len - 1).max(1) as f64;
    let resampled = (0 .. len).map(|k| {
        let pos = k as f64 / flast;
        // Zero weights own no slot.  Rounding may leave the total just
        // under 1, hence the fallback to the last weighted color.
        let i = (0 ..= last)
            .find(|&i| weights[i] > 0. && cumulative[i] >= pos)
            .or_else(|| (0 ..= last).rev().find(|&i| weights[i] > 0.))
            .unwrap_or(last);
        colors[i]
    }).collect();
    Ok(scheme.with_colors(resampled))
}
