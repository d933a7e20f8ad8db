use tracing::{debug, trace};

use crate::core::{AxisRange, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::ScaleChange;
use crate::render::Renderer;

use super::ChartInstance;

/// Smallest visible x span, as a fraction of the full data span.
const MIN_ZOOM_SPAN_RATIO: f64 = 1e-6;

impl<R: Renderer> ChartInstance<R> {
    /// Shows `x` while keeping the current y range and broadcasts it.
    pub fn zoom_x(&mut self, x: AxisRange) -> ChartResult<()> {
        let current = self.require_viewport()?;
        self.apply_local_viewport(current.with_x(x));
        Ok(())
    }

    /// Shows `viewport` on both axes. Only the x range is shared with other
    /// charts.
    pub fn zoom_to(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.require_viewport()?;
        self.apply_local_viewport(viewport);
        Ok(())
    }

    /// Zooms the x axis by `factor` around the plot pixel `anchor_px`.
    pub fn zoom_around(&mut self, anchor_px: f64, factor: f64) -> ChartResult<()> {
        let current = self.require_viewport()?;
        let full_span = self.viewport.full().map_or(current.x.span(), |full| full.x.span());
        let (anchor, _) = current.pixel_to_data(anchor_px, 0.0, self.plot_area)?;
        let next = current.zoom_x_around(anchor, factor, full_span * MIN_ZOOM_SPAN_RATIO)?;
        self.apply_local_viewport(next);
        Ok(())
    }

    /// Pans the x axis by a pixel delta; positive deltas move the view left.
    pub fn pan_by_pixels(&mut self, delta_px: f64) -> ChartResult<()> {
        let current = self.require_viewport()?;
        let next = current.pan_x_by_pixels(delta_px, self.plot_area)?;
        self.apply_local_viewport(next);
        Ok(())
    }

    /// Returns to the full data range and broadcasts the reset.
    pub fn reset_zoom(&mut self) -> bool {
        if !self.viewport.reset_to_full() {
            return false;
        }
        self.viewport.finish_synced_update();
        debug!(chart = %self.id, "zoom reset");
        self.needs_render = true;
        self.dispatch_scale_change(ScaleChange::Reset);
        true
    }

    /// Entry point for scale changes made inside the renderer (wheel, drag
    /// zoom handled by the backend).
    ///
    /// While a synced range is still being applied, a report of that same
    /// range is its echo and is dropped.
    pub fn on_renderer_scale_change(&mut self, change: ScaleChange) -> ChartResult<()> {
        if self.viewport.is_currently_updating() {
            let current = self.viewport.current();
            let echo = match change {
                ScaleChange::Zoomed(x) => current.is_some_and(|viewport| viewport.x == x),
                ScaleChange::Reset => current == self.viewport.full(),
            };
            if echo {
                trace!(chart = %self.id, "renderer echoed the synced range");
                return Ok(());
            }
        }
        match change {
            ScaleChange::Zoomed(x) => self.zoom_x(x),
            ScaleChange::Reset => {
                self.reset_zoom();
                Ok(())
            }
        }
    }

    fn require_viewport(&self) -> ChartResult<Viewport> {
        self.viewport.current().ok_or_else(|| {
            ChartError::InvalidData(format!("chart `{}` has no data to zoom", self.id))
        })
    }

    fn apply_local_viewport(&mut self, viewport: Viewport) {
        trace!(
            chart = %self.id,
            x_min = viewport.x_min(),
            x_max = viewport.x_max(),
            "local viewport change"
        );
        // A local change is never the echo of a synced one.
        self.viewport.finish_synced_update();
        self.viewport.set_current(viewport);
        self.needs_render = true;
        self.dispatch_scale_change(ScaleChange::Zoomed(viewport.x));
    }

    /// Runs every plugin's `on_set_scale` hook with the current context.
    pub(super) fn dispatch_scale_change(&mut self, change: ScaleChange) {
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_set_scale(&context, change);
        }
    }
}
