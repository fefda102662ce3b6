//! Construction of schemes from tabular or functional specifications.
//!
//! Four kinds of [`SchemeRequest`] are understood:
//!
//! - a [`BreakpointTable`]: per channel, a piecewise linear function
//!   of \[0, 1\] that may jump at breakpoints (matplotlib's
//!   “linear segmented” colormaps);
//! - a list of [`ControlPoint`]s: RGB colors placed along \[0, 1\]
//!   and linearly interpolated;
//! - three generator functions in a [`ColorModel`];
//! - a plain list of colors, evenly spread along \[0, 1\].
//!
//! All of them are sampled at `i / (length - 1)`, `i = 0,…, length - 1`
//! by the same routine, [`ColorRange::sample`].

use crate::color::{Hsv, Lch};
use crate::error::{invalid, malformed, Result};
use crate::{is_normalized, Color, ColorRange, Scheme};

/// Number of colors of a built scheme when the caller has no
/// preference.
pub const DEFAULT_LENGTH: usize = 100;

/// A point where a channel of a [`BreakpointTable`] changes slope,
/// and possibly jumps from `incoming` to `outgoing`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakpoint {
    /// Location in \[0, 1\].
    pub position: f64,
    /// Value reached when arriving from the left.
    pub incoming: f64,
    /// Value leaving to the right.
    pub outgoing: f64,
}

impl Breakpoint {
    pub const fn new(position: f64, incoming: f64, outgoing: f64) -> Self {
        Breakpoint { position, incoming, outgoing }
    }
}

impl From<(f64, f64, f64)> for Breakpoint {
    fn from((position, incoming, outgoing): (f64, f64, f64)) -> Self {
        Breakpoint { position, incoming, outgoing }
    }
}

/// Breakpoints of the red, green and blue channels.
///
/// For each channel, positions must be non-decreasing, start at 0
/// and end at 1.  Between two breakpoints `(p0, _, b)` and
/// `(p1, c, _)` the channel goes linearly from `b` to `c`.  The first
/// incoming value and the last outgoing value are not used.
#[derive(Clone, Debug, PartialEq)]
pub struct BreakpointTable {
    pub red: Vec<Breakpoint>,
    pub green: Vec<Breakpoint>,
    pub blue: Vec<Breakpoint>,
}

impl BreakpointTable {
    /// # Example
    ///
    /// ```
    /// use colorscheme_tools::BreakpointTable;
    /// // Red rises over the bottom half, green over the middle half
    /// // and blue over the top half.
    /// let table = BreakpointTable::new(
    ///     [(0.0, 0.0, 0.0), (0.5, 1.0, 1.0), (1.0, 1.0, 1.0)],
    ///     [(0.0, 0.0, 0.0), (0.25, 0.0, 0.0), (0.75, 1.0, 1.0), (1.0, 1.0, 1.0)],
    ///     [(0.0, 0.0, 0.0), (0.5, 0.0, 0.0), (1.0, 1.0, 1.0)]);
    /// assert_eq!(table.color_at(0.75).unwrap().r, 1.0);
    /// ```
    pub fn new<R, G, B>(red: R, green: G, blue: B) -> Self
    where R: IntoIterator<Item = (f64, f64, f64)>,
          G: IntoIterator<Item = (f64, f64, f64)>,
          B: IntoIterator<Item = (f64, f64, f64)> {
        BreakpointTable {
            red: red.into_iter().map(Breakpoint::from).collect(),
            green: green.into_iter().map(Breakpoint::from).collect(),
            blue: blue.into_iter().map(Breakpoint::from).collect(),
        }
    }

    /// Table with no discontinuities going through the given colors.
    pub fn from_control_points(points: &[ControlPoint]) -> Result<Self> {
        check_positions("control point list", points.iter().map(|p| p.position))?;
        if let Some(i) = points.iter().position(|p| !is_normalized(&p.color)) {
            return Err(malformed(format!(
                "control point {} has color {:?} outside [0, 1]",
                i, points[i].color)));
        }
        let channel = |f: fn(&Color) -> f64| -> Vec<Breakpoint> {
            points.iter().map(|p| {
                let x = f(&p.color);
                Breakpoint::new(p.position, x, x)
            }).collect()
        };
        Ok(BreakpointTable { red: channel(|c| c.r), green: channel(|c| c.g),
                             blue: channel(|c| c.b) })
    }

    /// Check the table is well formed.
    pub fn validate(&self) -> Result<()> {
        for (name, points) in self.channels() {
            check_positions(name, points.iter().map(|p| p.position))?;
            let last = points.len() - 1;
            for (i, p) in points.iter().enumerate() {
                let used_in = i > 0 && !(0. ..= 1.).contains(&p.incoming);
                let used_out = i < last && !(0. ..= 1.).contains(&p.outgoing);
                if used_in || used_out {
                    return Err(malformed(format!(
                        "{} breakpoint {} has values outside [0, 1]: {:?}",
                        name, i, p)));
                }
            }
        }
        Ok(())
    }

    /// The color at `t` ∈ \[0, 1\] (clamped).
    pub fn color_at(&self, t: f64) -> Result<Color> {
        Ok(Segments::new(self)?.rgb(t))
    }

    fn channels(&self) -> [(&'static str, &[Breakpoint]); 3] {
        [("red", &self.red), ("green", &self.green), ("blue", &self.blue)]
    }
}

/// Positions must be finite, non-decreasing, at least two, starting
/// at 0 and ending at 1.
fn check_positions(what: &str, positions: impl Iterator<Item = f64>)
                   -> Result<()> {
    let mut prev: Option<f64> = None;
    for (i, p) in positions.enumerate() {
        if !p.is_finite() {
            return Err(malformed(format!("{}: position {} is {}", what, i, p)));
        }
        match prev {
            None if p != 0. => return Err(malformed(format!(
                "{}: first position must be 0, got {}", what, p))),
            Some(q) if p < q => return Err(malformed(format!(
                "{}: position {} ({}) is smaller than the previous one ({})",
                what, i, p, q))),
            _ => (),
        }
        prev = Some(p);
    }
    match prev {
        Some(p) if p == 1. => Ok(()),
        Some(p) => Err(malformed(format!(
            "{}: last position must be 1, got {}", what, p))),
        None => Err(malformed(format!("{}: no positions", what))),
    }
}

/// Value of a validated channel at `t`.
fn segment_value(points: &[Breakpoint], t: f64) -> f64 {
    let t = t.clamp(0., 1.);
    // Repeated positions at 0 must not hide the first outgoing value.
    if t <= points[0].position {
        return points[0].outgoing;
    }
    // Segments are half-open so that a breakpoint hit exactly yields
    // its outgoing value.  Zero-width segments never match.
    for w in points.windows(2) {
        let (lo, hi) = (w[0], w[1]);
        if lo.position <= t && t < hi.position {
            let s = (t - lo.position) / (hi.position - lo.position);
            return (lo.outgoing + s * (hi.incoming - lo.outgoing)).clamp(0., 1.);
        }
    }
    // t == 1
    points[points.len() - 1].incoming
}

/// A validated [`BreakpointTable`].
struct Segments<'a> {
    red: &'a [Breakpoint],
    green: &'a [Breakpoint],
    blue: &'a [Breakpoint],
}

impl<'a> Segments<'a> {
    fn new(table: &'a BreakpointTable) -> Result<Self> {
        table.validate()?;
        Ok(Segments { red: &table.red, green: &table.green, blue: &table.blue })
    }
}

impl ColorRange for Segments<'_> {
    fn rgb(&self, t: f64) -> Color {
        Color { r: segment_value(self.red, t),
                g: segment_value(self.green, t),
                b: segment_value(self.blue, t) }
    }
}

/// An RGB color placed at `position` ∈ \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    pub position: f64,
    pub color: Color,
}

impl ControlPoint {
    pub const fn new(position: f64, color: Color) -> Self {
        ControlPoint { position, color }
    }
}

impl From<(f64, (f64, f64, f64))> for ControlPoint {
    fn from((position, (r, g, b)): (f64, (f64, f64, f64))) -> Self {
        ControlPoint { position, color: Color { r, g, b } }
    }
}

/// The color model in which generator functions express their values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorModel {
    /// Red, green, blue, each in \[0, 1\].
    #[default]
    Rgb,
    /// Hue in \[0, 360\], saturation and value in \[0, 1\].
    Hsv,
    /// CIE luminance and chroma in \[0, 100\], hue in \[0, 360\].
    Lchab,
}

struct ModelPolicy {
    ranges: [(f64, f64); 3],
    to_rgb: fn([f64; 3]) -> Color,
}

fn rgb_to_rgb([r, g, b]: [f64; 3]) -> Color { Color { r, g, b } }

fn hsv_to_rgb([h, s, v]: [f64; 3]) -> Color { Hsv { h, s, v }.to_rgb() }

fn lch_to_rgb([l, c, h]: [f64; 3]) -> Color { Lch { l, c, h }.to_rgb() }

static POLICIES: [ModelPolicy; 3] = [
    ModelPolicy { ranges: [(0., 1.), (0., 1.), (0., 1.)], to_rgb: rgb_to_rgb },
    ModelPolicy { ranges: [(0., 360.), (0., 1.), (0., 1.)], to_rgb: hsv_to_rgb },
    ModelPolicy { ranges: [(0., 100.), (0., 100.), (0., 360.)],
                  to_rgb: lch_to_rgb },
];

impl ColorModel {
    fn policy(self) -> &'static ModelPolicy {
        match self {
            ColorModel::Rgb => &POLICIES[0],
            ColorModel::Hsv => &POLICIES[1],
            ColorModel::Lchab => &POLICIES[2],
        }
    }

    /// Valid range of each of the three channels.
    pub fn ranges(self) -> [(f64, f64); 3] { self.policy().ranges }

    /// Clamp each channel to its range and convert to RGB.
    pub fn to_rgb(self, values: [f64; 3]) -> Color {
        let p = self.policy();
        let mut v = values;
        for (x, &(lo, hi)) in v.iter_mut().zip(&p.ranges) {
            *x = x.clamp(lo, hi);
        }
        (p.to_rgb)(v)
    }
}

/// Three generator functions in a color model.
struct Functions<'a> {
    channels: [&'a dyn Fn(f64) -> f64; 3],
    model: ColorModel,
}

impl ColorRange for Functions<'_> {
    fn rgb(&self, t: f64) -> Color {
        let [f1, f2, f3] = self.channels;
        self.model.to_rgb([f1(t), f2(t), f3(t)])
    }
}

/// What to build a [`Scheme`] from.
#[derive(Clone, Copy)]
pub enum SchemeRequest<'a> {
    Breakpoints(&'a BreakpointTable),
    ControlPoints(&'a [ControlPoint]),
    /// Each function maps a position in \[0, 1\] to a channel value of
    /// `model`.  Values outside the channel range are clamped.
    Functions {
        channels: [&'a dyn Fn(f64) -> f64; 3],
        model: ColorModel,
    },
    /// Colors evenly spaced along \[0, 1\].  A single color gives a
    /// constant scheme.
    ColorList(&'a [Color]),
}

impl SchemeRequest<'_> {
    fn kind(&self) -> &'static str {
        match self {
            SchemeRequest::Breakpoints(_) => "breakpoints",
            SchemeRequest::ControlPoints(_) => "control points",
            SchemeRequest::Functions { .. } => "functions",
            SchemeRequest::ColorList(_) => "color list",
        }
    }

    /// See [`build`].
    pub fn build(&self, length: usize) -> Result<Scheme> { build(self, length) }
}

fn list_control_points(colors: &[Color]) -> Result<Vec<ControlPoint>> {
    match colors {
        [] => Err(invalid("the color list is empty")),
        [c] => Ok(vec![ControlPoint::new(0., *c), ControlPoint::new(1., *c)]),
        _ => {
            let last = (colors.len() - 1) as f64;
            Ok(colors.iter().enumerate()
               .map(|(i, &c)| ControlPoint::new(i as f64 / last, c))
               .collect())
        }
    }
}

/// Build a scheme of `length` colors sampled from `request` at
/// `i / (length - 1)`.
///
/// Fails with [`crate::SchemeError::InvalidInput`] if `length < 2` and
/// with [`crate::SchemeError::MalformedSpec`] if a table or
/// control-point list is malformed.
pub fn build(request: &SchemeRequest<'_>, length: usize) -> Result<Scheme> {
    if length < 2 {
        return Err(invalid(format!(
            "a scheme must be sampled at 2 points at least, got {}", length)));
    }
    let colors = match *request {
        SchemeRequest::Breakpoints(table) => Segments::new(table)?.sample(length),
        SchemeRequest::ControlPoints(points) => {
            let table = BreakpointTable::from_control_points(points)?;
            Segments::new(&table)?.sample(length)
        }
        SchemeRequest::Functions { channels, model } => {
            Functions { channels, model }.sample(length)
        }
        SchemeRequest::ColorList(colors) => {
            if let Some(i) = colors.iter().position(|c| !is_normalized(c)) {
                return Err(invalid(format!(
                    "color {} {:?} has components outside [0, 1]",
                    i, colors[i])));
            }
            let table = BreakpointTable::from_control_points(
                &list_control_points(colors)?)?;
            Segments::new(&table)?.sample(length)
        }
    };
    if let Some(i) = colors.iter().position(|c| !is_normalized(c)) {
        return Err(invalid(format!(
            "sample {} of the {} is not a valid color: {:?}",
            i, request.kind(), colors[i])));
    }
    tracing::debug!(kind = request.kind(), length, "Built scheme");
    Ok(Scheme::from_colors(colors))
}

/// Shorthand for [`SchemeRequest::Breakpoints`].
pub fn from_breakpoints(table: &BreakpointTable, length: usize) -> Result<Scheme> {
    build(&SchemeRequest::Breakpoints(table), length)
}

/// Shorthand for [`SchemeRequest::ControlPoints`].
pub fn from_control_points(points: &[ControlPoint], length: usize)
                           -> Result<Scheme> {
    build(&SchemeRequest::ControlPoints(points), length)
}

/// Shorthand for [`SchemeRequest::Functions`].
///
/// # Example
///
/// ```
/// use std::f64::consts::PI;
/// use colorscheme_tools::{build::from_functions, ColorModel};
/// let s = from_functions(|n| (n * PI).sin(), |_| 0., |n| (n * PI).cos(),
///                        100, ColorModel::Rgb).unwrap();
/// assert_eq!(s.len(), 100);
/// ```
pub fn from_functions(red: impl Fn(f64) -> f64, green: impl Fn(f64) -> f64,
                      blue: impl Fn(f64) -> f64, length: usize,
                      model: ColorModel) -> Result<Scheme> {
    build(&SchemeRequest::Functions { channels: [&red, &green, &blue], model },
          length)
}

/// Shorthand for [`SchemeRequest::ColorList`].
pub fn from_color_list(colors: &[Color], length: usize) -> Result<Scheme> {
    build(&SchemeRequest::ColorList(colors), length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SchemeError;

    fn close(c0: Color, c1: Color) -> bool {
        (c0.r - c1.r).abs() < 1e-12 && (c0.g - c1.g).abs() < 1e-12
            && (c0.b - c1.b).abs() < 1e-12
    }

    fn cdict() -> BreakpointTable {
        BreakpointTable::new(
            [(0.0, 0.0, 0.0), (0.5, 1.0, 1.0), (1.0, 1.0, 1.0)],
            [(0.0, 0.0, 0.0), (0.25, 0.0, 0.0), (0.75, 1.0, 1.0),
             (1.0, 1.0, 1.0)],
            [(0.0, 0.0, 0.0), (0.5, 0.0, 0.0), (1.0, 1.0, 1.0)])
    }

    #[test]
    fn saturated_channel_is_held() {
        let c = cdict().color_at(0.75).unwrap();
        assert_eq!(c.r, 1.);
        assert_eq!(c.g, 1.);
        assert!((c.b - 0.5).abs() < 1e-15);
        let c = cdict().color_at(0.25).unwrap();
        assert!((c.r - 0.5).abs() < 1e-15);
        assert_eq!((c.g, c.b), (0., 0.));
    }

    #[test]
    fn discontinuity_uses_outgoing_value() {
        let t = BreakpointTable::new(
            [(0., 9., 0.2), (0.5, 0.4, 0.9), (1., 0.6, 9.)],
            [(0., 0., 0.), (1., 0., 0.)],
            [(0., 0., 0.), (1., 0., 0.)]);
        let s = from_breakpoints(&t, 5).unwrap();
        let red: Vec<f64> = s.colors().iter().map(|c| c.r).collect();
        assert_eq!(red[0], 0.2);
        assert!((red[1] - 0.3).abs() < 1e-12);
        assert_eq!(red[2], 0.9); // exactly at 0.5
        assert!((red[3] - 0.75).abs() < 1e-12);
        assert_eq!(red[4], 0.6);
    }

    #[test]
    fn repeated_first_position() {
        let t = BreakpointTable::new(
            [(0., 0., 0.1), (0., 0.5, 0.9), (1., 1., 1.)],
            [(0., 0., 0.), (1., 0., 0.)],
            [(0., 0., 0.), (1., 0., 0.)]);
        let red: Vec<f64> = from_breakpoints(&t, 5).unwrap().colors().iter()
            .map(|c| c.r).collect();
        assert_eq!(red[0], 0.1);
        assert!((red[2] - 0.95).abs() < 1e-12);
        let pts = [ControlPoint::from((0.0, (0.2, 0.2, 0.2))),
                   ControlPoint::from((0.0, (0.8, 0.8, 0.8))),
                   ControlPoint::from((1.0, (1.0, 1.0, 1.0)))];
        let s = from_control_points(&pts, 3).unwrap();
        assert_eq!(s.colors()[0], Color::new(0.2, 0.2, 0.2));
        assert!(close(s.colors()[1], Color::new(0.9, 0.9, 0.9)));
    }

    #[test]
    fn malformed_tables() {
        let ok = [(0., 0., 0.), (1., 1., 1.)];
        let bad = |red: &[(f64, f64, f64)]| {
            let t = BreakpointTable::new(red.iter().copied(), ok, ok);
            matches!(from_breakpoints(&t, 10), Err(SchemeError::MalformedSpec(_)))
        };
        assert!(bad(&[(0.1, 0., 0.), (1., 1., 1.)]));
        assert!(bad(&[(0., 0., 0.), (0.9, 1., 1.)]));
        assert!(bad(&[(0., 0., 0.), (0.6, 1., 1.), (0.4, 1., 1.), (1., 1., 1.)]));
        assert!(bad(&[(0., 0., 0.)]));
        assert!(bad(&[]));
        assert!(bad(&[(0., 0., 1.5), (1., 1., 1.)]));
        assert!(bad(&[(0., 0., 0.), (f64::NAN, 0., 0.), (1., 1., 1.)]));
        // Unused values are not checked.
        assert!(!bad(&[(0., -3., 0.), (1., 1., 7.)]));
    }

    #[test]
    fn control_points_midpoint() {
        let pts = [ControlPoint::from((0.0, (0.2, 0.2, 0.6))),
                   ControlPoint::from((1.0, (1.0, 1.0, 1.0)))];
        let s = from_control_points(&pts, 3).unwrap();
        let expected = [Color::new(0.2, 0.2, 0.6), Color::new(0.6, 0.6, 0.8),
                        Color::new(1., 1., 1.)];
        assert_eq!(s.len(), 3);
        for (&c, &e) in s.colors().iter().zip(&expected) {
            assert!(close(c, e), "{:?} ≉ {:?}", c, e);
        }
    }

    #[test]
    fn malformed_control_points() {
        let pts = [ControlPoint::from((0.0, (0.2, 0.2, 0.6))),
                   ControlPoint::from((0.9, (1.0, 1.0, 1.0)))];
        assert!(matches!(from_control_points(&pts, 3),
                         Err(SchemeError::MalformedSpec(_))));
        let pts = [ControlPoint::from((0.0, (0.2, 0.2, 0.6))),
                   ControlPoint::from((1.0, (1.0, 2.0, 1.0)))];
        assert!(matches!(from_control_points(&pts, 3),
                         Err(SchemeError::MalformedSpec(_))));
    }

    #[test]
    fn functions_are_clamped() {
        let s = from_functions(|t| 2. * t - 0.5, |_| -1., |t| t, 5,
                               ColorModel::Rgb).unwrap();
        let c = s.colors();
        assert_eq!(c[0], Color::new(0., 0., 0.));
        assert_eq!(c[2], Color::new(0.5, 0., 0.5));
        assert_eq!(c[4], Color::new(1., 0., 1.));
    }

    #[test]
    fn functions_in_other_models() {
        let s = from_functions(|t| 240. * t, |_| 1., |_| 1., 3,
                               ColorModel::Hsv).unwrap();
        assert!(close(s.colors()[0], Color::new(1., 0., 0.)));
        assert!(close(s.colors()[1], Color::new(0., 1., 0.)));
        assert!(close(s.colors()[2], Color::new(0., 0., 1.)));
        let s = from_functions(|_| 50., |_| 0., |t| 360. * t, 4,
                               ColorModel::Lchab).unwrap();
        for c in s.colors() {
            assert!((c.r - c.g).abs() < 1e-6 && (c.g - c.b).abs() < 1e-6,
                    "zero chroma must be gray: {:?}", c);
        }
        let s = from_functions(|_| 500., |_| 500., |_| 500., 2,
                               ColorModel::Lchab).unwrap();
        assert!(s.colors().iter().all(crate::is_normalized));
    }

    #[test]
    fn nan_from_a_function_is_rejected() {
        let r = from_functions(|_| f64::NAN, |_| 0., |_| 0., 3, ColorModel::Rgb);
        assert!(matches!(r, Err(SchemeError::InvalidInput(_))));
    }

    #[test]
    fn color_list() {
        let roygbiv = [Color::new(1., 0., 0.), Color::new(1., 0.5, 0.),
                       Color::new(1., 1., 0.), Color::new(0., 0.5, 0.),
                       Color::new(0., 0., 1.), Color::new(0.29, 0., 0.51),
                       Color::new(0.93, 0.51, 0.93)];
        let s = from_color_list(&roygbiv, 13).unwrap();
        assert_eq!(s.len(), 13);
        // With 13 samples, every second one falls on an input color.
        for (i, &c) in roygbiv.iter().enumerate() {
            assert!(close(s.colors()[2 * i], c), "{:?} ≉ {:?}",
                    s.colors()[2 * i], c);
        }
        let single = from_color_list(&roygbiv[.. 1], 4).unwrap();
        assert!(single.colors().iter().all(|&c| c == roygbiv[0]));
        assert!(matches!(from_color_list(&[], 4),
                         Err(SchemeError::InvalidInput(_))));
    }

    #[test]
    fn length_at_least_two() {
        for n in [0, 1] {
            assert!(matches!(from_breakpoints(&cdict(), n),
                             Err(SchemeError::InvalidInput(_))));
        }
        assert_eq!(from_breakpoints(&cdict(), 2).unwrap().len(), 2);
        assert_eq!(SchemeRequest::Breakpoints(&cdict()).build(DEFAULT_LENGTH)
                   .unwrap().len(), DEFAULT_LENGTH);
    }
}
