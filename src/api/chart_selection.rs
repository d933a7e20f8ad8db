use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::extensions::{ExportOptions, export_selected_data};
use crate::interaction::{PixelPoint, SelectionOutcome, SelectionRange};
use crate::render::Renderer;

use super::ChartInstance;

impl<R: Renderer> ChartInstance<R> {
    /// Flips drag-to-select mode and returns the new state.
    pub fn toggle_selection_mode(&mut self) -> bool {
        let enabled = self.selection.borrow_mut().toggle_selection_mode();
        if !enabled {
            self.viewport.set_interaction_locked(false);
        }
        self.needs_render = true;
        enabled
    }

    #[must_use]
    pub fn is_selection_mode(&self) -> bool {
        self.selection.borrow().is_enabled()
    }

    #[must_use]
    pub fn selection(&self) -> Option<SelectionRange> {
        self.selection.borrow().selection().cloned()
    }

    /// Starts a drag. Ambient zoom sync is ignored until the drag ends.
    pub fn selection_pointer_down(&mut self, x: f64, y: f64) -> bool {
        let started = self
            .selection
            .borrow_mut()
            .pointer_down(PixelPoint::new(x, y), self.plot_area);
        if started {
            self.viewport.set_interaction_locked(true);
            self.needs_render = true;
        }
        started
    }

    pub fn selection_pointer_move(&mut self, x: f64, y: f64) {
        let mut engine = self.selection.borrow_mut();
        if engine.is_selecting() {
            engine.pointer_move(PixelPoint::new(x, y), self.plot_area);
            self.needs_render = true;
        }
    }

    /// Ends a drag. Coordinates are mapped through the visible viewport.
    pub fn selection_pointer_up(&mut self, x: f64, y: f64) -> ChartResult<SelectionOutcome> {
        self.viewport.set_interaction_locked(false);
        let (Some(viewport), Some(data)) = (self.viewport.current(), self.data.as_ref()) else {
            self.selection.borrow_mut().clear();
            return Ok(SelectionOutcome::Ignored);
        };
        let outcome = self.selection.borrow_mut().pointer_up(
            PixelPoint::new(x, y),
            self.plot_area,
            viewport,
            data,
        )?;
        if outcome != SelectionOutcome::Ignored {
            self.needs_render = true;
        }
        Ok(outcome)
    }

    pub fn clear_selection(&mut self) {
        self.selection.borrow_mut().clear();
        self.needs_render = true;
    }

    /// Zooms to the padded selection, broadcasts the new x range and clears
    /// the selection. Returns `false` when nothing was applied.
    pub fn zoom_to_selection(&mut self) -> ChartResult<bool> {
        let target = self.selection.borrow_mut().take_zoom_target();
        let Some(target) = target else {
            return Ok(false);
        };
        debug!(
            chart = %self.id,
            x_min = target.x_min(),
            x_max = target.x_max(),
            "zoom to selection"
        );
        self.zoom_to(target)?;
        Ok(true)
    }

    /// Exports the committed selection as CSV or JSON text.
    pub fn export_selection(&self, options: &ExportOptions) -> ChartResult<String> {
        let engine = self.selection.borrow();
        let selection = engine
            .selection()
            .ok_or_else(|| ChartError::InvalidData("no selection to export".to_owned()))?;
        export_selected_data(&selection.selected_data_points, options)
    }
}
