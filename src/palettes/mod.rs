// Matplotlib colormap data, see
// https://github.com/matplotlib/matplotlib/blob/main/lib/matplotlib/_cm.py

use std::ops::Deref;
use lazy_static::lazy_static;
use crate::build::{BreakpointTable, ControlPoint};
pub(crate) mod ty;
use ty::*;

fn indexed(points: &[(f64, (f64, f64, f64))]) -> SpecData {
    SpecData::Indexed(points.iter().copied().map(ControlPoint::from).collect())
}

lazy_static! {
  pub(crate) static ref AUTUMN: SchemeData = SchemeData {
    name: "autumn",
    category: "sequential",
    notes: "red through orange to yellow",
    spec: SpecData::Segments(BreakpointTable::new(
      [(0.0, 1.0, 1.0), (1.0, 1.0, 1.0)],
      [(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
      [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)])),
  };

  pub(crate) static ref BONE: SchemeData = SchemeData {
    name: "bone",
    category: "sequential",
    notes: "gray scale with a tinge of blue",
    spec: SpecData::Segments(BreakpointTable::new(
      [(0.0, 0.0, 0.0), (0.746032, 0.652778, 0.652778), (1.0, 1.0, 1.0)],
      [(0.0, 0.0, 0.0), (0.365079, 0.319444, 0.319444),
       (0.746032, 0.777778, 0.777778), (1.0, 1.0, 1.0)],
      [(0.0, 0.0, 0.0), (0.365079, 0.444444, 0.444444), (1.0, 1.0, 1.0)])),
  };

  pub(crate) static ref COOL: SchemeData = SchemeData {
    name: "cool",
    category: "sequential",
    notes: "cyan to magenta",
    spec: SpecData::Segments(BreakpointTable::new(
      [(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
      [(0.0, 1.0, 1.0), (1.0, 0.0, 0.0)],
      [(0.0, 1.0, 1.0), (1.0, 1.0, 1.0)])),
  };

  pub(crate) static ref COPPER: SchemeData = SchemeData {
    name: "copper",
    category: "sequential",
    notes: "black to light copper",
    spec: SpecData::Segments(BreakpointTable::new(
      [(0.0, 0.0, 0.0), (0.809524, 1.0, 1.0), (1.0, 1.0, 1.0)],
      [(0.0, 0.0, 0.0), (1.0, 0.7812, 0.7812)],
      [(0.0, 0.0, 0.0), (1.0, 0.4975, 0.4975)])),
  };

  pub(crate) static ref HOT: SchemeData = SchemeData {
    name: "hot",
    category: "sequential",
    notes: "black body: black, red, yellow, white",
    spec: SpecData::Segments(BreakpointTable::new(
      [(0.0, 0.0416, 0.0416), (0.365079, 1.0, 1.0), (1.0, 1.0, 1.0)],
      [(0.0, 0.0, 0.0), (0.365079, 0.0, 0.0), (0.746032, 1.0, 1.0),
       (1.0, 1.0, 1.0)],
      [(0.0, 0.0, 0.0), (0.746032, 0.0, 0.0), (1.0, 1.0, 1.0)])),
  };

  pub(crate) static ref GIST_RAINBOW: SchemeData = SchemeData {
    name: "gist_rainbow",
    category: "miscellaneous",
    notes: "",
    spec: indexed(&[
      (0.000, (1.00, 0.00, 0.16)),
      (0.030, (1.00, 0.00, 0.00)),
      (0.215, (1.00, 1.00, 0.00)),
      (0.400, (0.00, 1.00, 0.00)),
      (0.586, (0.00, 1.00, 1.00)),
      (0.770, (0.00, 0.00, 1.00)),
      (0.954, (1.00, 0.00, 1.00)),
      (1.000, (1.00, 0.00, 0.75))]),
  };

  pub(crate) static ref TERRAIN: SchemeData = SchemeData {
    name: "terrain",
    category: "miscellaneous",
    notes: "sea, lowlands, mountains and snow",
    spec: indexed(&[
      (0.00, (0.2, 0.2, 0.6)),
      (0.15, (0.0, 0.6, 1.0)),
      (0.25, (0.0, 0.8, 0.4)),
      (0.50, (1.0, 1.0, 0.6)),
      (0.75, (0.5, 0.36, 0.33)),
      (1.00, (1.0, 1.0, 1.0))]),
  };

  pub(crate) static ref ALL: [&'static SchemeData; 7] = [
    AUTUMN.deref(), BONE.deref(), COOL.deref(), COPPER.deref(), HOT.deref(),
    GIST_RAINBOW.deref(), TERRAIN.deref()];
}
