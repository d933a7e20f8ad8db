use tracing::{trace, warn};

use crate::core::Millis;
use crate::error::ChartResult;
use crate::extensions::ScaleChange;
use crate::render::Renderer;

use super::render_frame_builder::{RenderFrameInputs, build_render_frame};
use super::{ChartInstance, LoadingState};

impl<R: Renderer> ChartInstance<R> {
    /// Advances host-clocked work: debounced resize, scheduled resolution
    /// upgrades and viewport changes written by zoom sync.
    ///
    /// Returns `true` when a frame was drawn.
    pub fn tick(&mut self, now: Millis) -> ChartResult<bool> {
        if !self.mounted {
            return Ok(false);
        }
        if let Some(area) = self.resize.poll(now) {
            if area != self.plot_area {
                trace!(chart = %self.id, width = area.width, height = area.height, "plot resized");
                self.plot_area = area;
                self.needs_render = true;
            }
        }
        if self.resolution.poll(now).is_some() {
            self.needs_render = true;
        }
        let viewport_moved = self
            .rendered_revision
            .is_some_and(|revision| revision != self.viewport.revision());
        if viewport_moved || self.viewport.is_currently_updating() {
            self.needs_render = true;
        }

        if self.needs_render {
            return self.render();
        }
        Ok(false)
    }

    /// Samples the loaded data for the active tier and draws one frame.
    ///
    /// Transform failures become the chart's error state instead of an `Err`.
    /// Returns `true` when a frame was drawn.
    pub fn render(&mut self) -> ChartResult<bool> {
        let synced = self.viewport.is_currently_updating();
        let (Some(data), Some(viewport), true) =
            (self.data.as_ref(), self.viewport.current(), self.mounted)
        else {
            self.needs_render = false;
            self.viewport.finish_synced_update();
            return Ok(false);
        };

        let plugin_ids = self
            .plugins
            .iter()
            .map(|plugin| plugin.id().to_owned())
            .collect();
        let built = build_render_frame(
            RenderFrameInputs {
                config: &self.config,
                data,
                viewport,
                plot_area: self.plot_area,
                resolution: self.resolution.tier(),
                visible_x: self.viewport.is_zoomed().then_some(viewport.x),
            },
            plugin_ids,
        );
        let mut frame = match built {
            Ok(frame) => frame,
            Err(err) => {
                let err = err.into_transform_failure();
                warn!(chart = %self.id, error = %err, "chart render failed");
                self.loading = LoadingState::from_error(&err);
                self.needs_render = false;
                self.viewport.finish_synced_update();
                return Ok(false);
            }
        };
        self.last_sampling = frame
            .options
            .series
            .iter()
            .map(|series| series.sampling)
            .collect();

        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            if synced {
                // Lets plugins observe the synced range; zoom sync skips it.
                plugin.on_set_scale(&context, ScaleChange::Zoomed(viewport.x));
            }
            if !self.ready_sent {
                plugin.on_ready(&context);
            }
            plugin.on_draw(&context, &mut frame.overlays);
        }
        self.ready_sent = true;

        self.renderer.render(&frame)?;
        self.rendered_revision = Some(self.viewport.revision());
        self.needs_render = false;
        self.viewport.finish_synced_update();
        trace!(
            chart = %self.id,
            resolution = %frame.options.resolution,
            overlays = frame.overlays.len(),
            "chart rendered"
        );
        Ok(true)
    }
}
