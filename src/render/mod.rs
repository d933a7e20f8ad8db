mod aligned;
mod frame;
mod null_renderer;
mod options;
pub mod palette;
mod primitives;

pub use aligned::{AlignedData, JoinedCell, SeriesColumns};
pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use options::{AxisOptions, RendererOptions, SeriesOptions, TooltipOptions, ValueFormat};
pub use primitives::{Color, RectPrimitive, SeriesDrawMode};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` (aligned columns plus
/// options) so drawing code stays isolated from loading, sampling and sync.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
