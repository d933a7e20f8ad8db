use crate::core::{AxisRange, PlotArea, Resolution, Viewport};
use crate::render::RectPrimitive;

/// Read-only chart snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluginContext {
    pub viewport: Option<Viewport>,
    pub plot_area: PlotArea,
    pub series_count: usize,
    pub point_count: usize,
    pub resolution: Resolution,
}

/// Scale change reported by the renderer after a zoom, pan or reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleChange {
    /// New visible x range.
    Zoomed(AxisRange),
    /// Back to the full data range.
    Reset,
}

/// Capability interface for renderer lifecycle hooks.
///
/// Every hook is optional. Plugins observe chart state and may contribute
/// overlay primitives, but never mutate the chart itself.
pub trait ChartPlugin {
    fn id(&self) -> &str;

    /// Called once the chart has data and a renderer frame.
    fn on_ready(&mut self, _context: &PluginContext) {}

    fn on_set_scale(&mut self, _context: &PluginContext, _change: ScaleChange) {}

    /// Appends overlay primitives (plot pixels) drawn above the series.
    fn on_draw(&mut self, _context: &PluginContext, _overlays: &mut Vec<RectPrimitive>) {}
}
