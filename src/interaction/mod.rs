//! Per-chart interaction state machines: progressive resolution and
//! drag-to-select.

mod resolution;
mod selection;

pub use resolution::{ResolutionBehavior, ResolutionController, ResolutionMode};
pub use selection::{
    PixelPoint, SelectedPoint, SelectedSeriesPoints, SelectionBehavior, SelectionEngine,
    SelectionOutcome, SelectionPhase, SelectionRange, points_in_rect,
};
