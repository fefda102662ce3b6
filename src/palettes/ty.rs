use crate::build::{self, BreakpointTable, ControlPoint};
use crate::error::Result;
use crate::Scheme;

/// The specification of a named scheme.
pub(crate) struct SchemeData {
    pub(crate) name: &'static str,
    pub(crate) category: &'static str,
    pub(crate) notes: &'static str,
    pub(crate) spec: SpecData,
}

/// How the colors of a [`SchemeData`] are given.
pub(crate) enum SpecData {
    /// Matplotlib “linear segmented” data.
    Segments(BreakpointTable),
    /// Matplotlib “indexed list” data.
    Indexed(Vec<ControlPoint>),
}

impl SchemeData {
    /// Sample the specification with [`build::DEFAULT_LENGTH`] colors.
    pub(crate) fn build(&self) -> Result<Scheme> {
        let scheme = match &self.spec {
            SpecData::Segments(table) => {
                build::from_breakpoints(table, build::DEFAULT_LENGTH)?
            }
            SpecData::Indexed(points) => {
                build::from_control_points(points, build::DEFAULT_LENGTH)?
            }
        };
        Ok(scheme.named(self.name).with_category(self.category)
           .with_notes(self.notes))
    }
}
