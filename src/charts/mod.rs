/// Chart handlers: pure functions from the immutable [`LaunchTable`] and the
/// current selection to renderer-independent chart specifications. Both the
/// egui frontend and the HTTP endpoint consume the same specs.
///
/// [`LaunchTable`]: crate::data::model::LaunchTable
pub mod pie;
pub mod scatter;

pub use pie::{success_pie, PieSlice, PieSpec};
pub use scatter::{payload_scatter, ScatterPoint, ScatterSpec};
