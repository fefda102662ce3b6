//! Ordered color sequences and named collections of them.

use std::collections::BTreeMap;
use crate::error::{invalid, Result, SchemeError};
use crate::{is_normalized, palettes, Color, ColorRange, PixelMatrix};

/// An ordered, non-empty sequence of colors usable as a colormap.
///
/// The first color sits at position 0 and the last at position 1.
/// Schemes are never modified in place: transformations such as
/// [`crate::sort()`] return a new scheme.
#[derive(Clone, Debug, PartialEq)]
pub struct Scheme {
    colors: Vec<Color>, // Invariant: length ≥ 1, all colors normalized
    name: String,
    category: String,
    notes: String,
}

impl Scheme {
    /// Create a scheme from `colors`, which must be non-empty with
    /// all components in \[0, 1\].
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(invalid("a scheme needs at least one color"));
        }
        if let Some(i) = colors.iter().position(|c| !is_normalized(c)) {
            return Err(invalid(format!(
                "color {} {:?} has components outside [0, 1]", i, colors[i])));
        }
        Ok(Self::from_colors(colors))
    }

    /// The caller guarantees the invariant.
    pub(crate) fn from_colors(colors: Vec<Color>) -> Self {
        debug_assert!(!colors.is_empty());
        Scheme { colors, name: String::new(), category: String::new(),
                 notes: String::new() }
    }

    /// Same metadata as `self`, different colors.
    pub(crate) fn with_colors(&self, colors: Vec<Color>) -> Self {
        debug_assert!(!colors.is_empty());
        Scheme { colors, name: self.name.clone(),
                 category: self.category.clone(), notes: self.notes.clone() }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Returns the number of colors in the scheme (at least 1).
    pub fn len(&self) -> usize { self.colors.len() }

    pub fn colors(&self) -> &[Color] { &self.colors }

    /// Identifier used when the scheme is persisted.
    pub fn name(&self) -> &str { &self.name }

    pub fn category(&self) -> &str { &self.category }

    pub fn notes(&self) -> &str { &self.notes }

    /// Render the scheme as a swatch: `nrows` identical rows in which
    /// each color is repeated `tilewidth` times.
    pub fn to_image(&self, nrows: usize, tilewidth: usize) -> Result<PixelMatrix> {
        if nrows == 0 || tilewidth == 0 {
            return Err(invalid(format!(
                "swatch dimensions must be positive, got {} rows of \
                 tiles {} wide", nrows, tilewidth)));
        }
        Ok(PixelMatrix::from_fn(self.len() * tilewidth, nrows,
                                |x, _| self.colors[x / tilewidth]))
    }
}

/// Linear interpolation between adjacent colors.
impl ColorRange for Scheme {
    fn rgb(&self, t: f64) -> Color {
        let n = self.colors.len() - 1;
        let tn = t.clamp(0., 1.) * n as f64;
        let i = tn.trunc() as usize;
        if i >= n { return self.colors[n] }
        let s = tn.fract();
        let (c0, c1) = (self.colors[i], self.colors[i + 1]);
        Color { r: c0.r + s * (c1.r - c0.r),
                g: c0.g + s * (c1.g - c0.g),
                b: c0.b + s * (c1.b - c0.b) }
    }
}

/// The shape in which a scheme is persisted.
///
/// Writing it to disk is up to the caller; with the `serde` feature
/// the record can be handed to any serde format.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemeRecord {
    pub name: String,
    pub colors: Vec<[f64; 3]>,
    pub category: String,
    pub notes: String,
}

impl From<&Scheme> for SchemeRecord {
    fn from(s: &Scheme) -> Self {
        SchemeRecord {
            name: s.name.clone(),
            colors: s.colors.iter().map(|c| [c.r, c.g, c.b]).collect(),
            category: s.category.clone(),
            notes: s.notes.clone(),
        }
    }
}

impl TryFrom<SchemeRecord> for Scheme {
    type Error = SchemeError;

    fn try_from(r: SchemeRecord) -> Result<Self> {
        let colors = r.colors.iter().map(|&[r, g, b]| Color { r, g, b })
            .collect();
        Ok(Scheme::new(colors)?.named(r.name).with_category(r.category)
           .with_notes(r.notes))
    }
}

/// A lookup table of schemes by name.
///
/// Nothing global: build one (possibly starting from
/// [`SchemeLibrary::builtin`]) and pass it to whoever needs it.
#[derive(Clone, Debug, Default)]
pub struct SchemeLibrary {
    schemes: BTreeMap<String, Scheme>,
}

impl SchemeLibrary {
    pub fn new() -> Self { Self::default() }

    /// A library with the matplotlib schemes `autumn`, `bone`, `cool`,
    /// `copper`, `hot`, `gist_rainbow` and `terrain`, each sampled
    /// with [`crate::DEFAULT_LENGTH`] colors.
    pub fn builtin() -> Self {
        let mut lib = Self::new();
        for data in palettes::ALL.iter() {
            match data.build() {
                Ok(s) => { lib.insert(s); }
                Err(e) => tracing::warn!(scheme = data.name, error = %e,
                                         "Skipping built-in scheme"),
            }
        }
        lib
    }

    /// Add `scheme` under its [`Scheme::name`], returning the scheme
    /// previously registered with that name.
    pub fn insert(&mut self, scheme: Scheme) -> Option<Scheme> {
        self.schemes.insert(scheme.name.clone(), scheme)
    }

    pub fn get(&self, name: &str) -> Option<&Scheme> { self.schemes.get(name) }

    /// Names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemes.keys().map(|k| k.as_str())
    }

    /// Schemes whose category is `category`.
    pub fn in_category<'a>(&'a self, category: &'a str)
                           -> impl Iterator<Item = &'a Scheme> + 'a {
        self.schemes.values().filter(move |s| s.category == category)
    }

    pub fn len(&self) -> usize { self.schemes.len() }

    pub fn is_empty(&self) -> bool { self.schemes.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bw() -> Scheme {
        Scheme::new(vec![Color::new(0., 0., 0.), Color::new(1., 1., 1.)])
            .unwrap()
    }

    #[test]
    fn invariants() {
        assert!(Scheme::new(vec![]).is_err());
        assert!(Scheme::new(vec![Color::new(0., 1.5, 0.)]).is_err());
        assert!(Scheme::new(vec![Color::new(0., f64::NAN, 0.)]).is_err());
        assert_eq!(bw().len(), 2);
    }

    #[test]
    fn continuous_sampling() {
        let s = bw();
        assert_eq!(s.rgb(0.), Color::new(0., 0., 0.));
        assert_eq!(s.rgb(0.25), Color::new(0.25, 0.25, 0.25));
        assert_eq!(s.rgb(1.), Color::new(1., 1., 1.));
        assert_eq!(s.rgb(7.), Color::new(1., 1., 1.));
        let one = Scheme::new(vec![Color::new(0.5, 0., 0.)]).unwrap();
        assert_eq!(one.rgb(0.3), Color::new(0.5, 0., 0.));
    }

    #[test]
    fn swatch_image() {
        let img = bw().to_image(3, 2).unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
        assert_eq!(img.get(1, 2), Some(Color::new(0., 0., 0.)));
        assert_eq!(img.get(2, 0), Some(Color::new(1., 1., 1.)));
        assert!(bw().to_image(0, 2).is_err());
    }

    #[test]
    fn record_keeps_metadata() {
        let s = bw().named("the_lost_vermeer").with_category("dutch painters")
            .with_notes("it's not really lost");
        let r = SchemeRecord::from(&s);
        assert_eq!(r.colors, vec![[0., 0., 0.], [1., 1., 1.]]);
        assert_eq!(r.category, "dutch painters");
        assert_eq!(Scheme::try_from(r).unwrap(), s);
        let empty = SchemeRecord { name: "x".into(), colors: vec![],
                                   category: String::new(),
                                   notes: String::new() };
        assert!(Scheme::try_from(empty).is_err());
    }

    #[test]
    fn library_lookup() {
        let mut lib = SchemeLibrary::new();
        assert!(lib.insert(bw().named("bw").with_category("gray")).is_none());
        assert!(lib.insert(bw().named("bw")).is_some());
        assert_eq!(lib.len(), 1);
        assert_eq!(lib.get("bw").map(|s| s.category()), Some(""));
        assert!(lib.get("viridis").is_none());
    }

    #[test]
    fn builtin_library() {
        let lib = SchemeLibrary::builtin();
        let names: Vec<_> = lib.names().collect();
        assert_eq!(names, vec!["autumn", "bone", "cool", "copper",
                               "gist_rainbow", "hot", "terrain"]);
        assert!(lib.get("hot").unwrap().len() == crate::DEFAULT_LENGTH);
        assert_eq!(lib.in_category("sequential").count(), 5);
    }
}
