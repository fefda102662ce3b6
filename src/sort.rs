//! Perceptual ordering of schemes.

use std::cmp::Ordering;
use crate::color::Luv;
use crate::{Color, Scheme};

/// Coordinate of the CIE L\*u\*v\* space used to order colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
    /// Lightness L\*.
    #[default]
    Luminance,
    /// Chroma coordinate u\* (green–red).
    U,
    /// Chroma coordinate v\* (blue–yellow).
    V,
}

impl SortField {
    #[inline]
    fn of(self, luv: &Luv) -> f64 {
        match self {
            SortField::Luminance => luv.l,
            SortField::U => luv.u,
            SortField::V => luv.v,
        }
    }

    /// Compare two colors on this field.
    pub fn compare(self, c0: Color, c1: Color) -> Ordering {
        self.of(&Luv::from_rgb(c0)).total_cmp(&self.of(&Luv::from_rgb(c1)))
    }
}

/// Return a copy of `scheme` with its colors sorted on `field`,
/// in increasing order unless `descending`.
///
/// The sort is stable: colors with equal values on `field` keep their
/// relative order, in both directions.
pub fn sort(scheme: &Scheme, field: SortField, descending: bool) -> Scheme {
    let mut keyed: Vec<(f64, Color)> = scheme.colors().iter()
        .map(|&c| (field.of(&Luv::from_rgb(c)), c))
        .collect();
    if descending {
        keyed.sort_by(|(x, _), (y, _)| y.total_cmp(x));
    } else {
        keyed.sort_by(|(x, _), (y, _)| x.total_cmp(y));
    }
    scheme.with_colors(keyed.into_iter().map(|(_, c)| c).collect())
}
