use std::cell::RefCell;
use std::rc::Rc;

use crate::interaction::{SelectionEngine, SelectionPhase};
use crate::render::RectPrimitive;
use crate::render::palette::{SELECTION_BORDER, SELECTION_FILL};

use super::{ChartPlugin, PluginContext};

pub const SELECTION_OVERLAY_PLUGIN_ID: &str = "selection-overlay";

/// Draws the drag rectangle and the committed selection box.
#[derive(Debug)]
pub struct SelectionOverlayPlugin {
    engine: Rc<RefCell<SelectionEngine>>,
}

impl SelectionOverlayPlugin {
    #[must_use]
    pub fn new(engine: Rc<RefCell<SelectionEngine>>) -> Self {
        Self { engine }
    }
}

impl ChartPlugin for SelectionOverlayPlugin {
    fn id(&self) -> &str {
        SELECTION_OVERLAY_PLUGIN_ID
    }

    fn on_draw(&mut self, context: &PluginContext, overlays: &mut Vec<RectPrimitive>) {
        let engine = self.engine.borrow();
        let corners = match engine.phase() {
            SelectionPhase::Idle => None,
            SelectionPhase::Selecting { start, current } => {
                Some(((start.x, start.y), (current.x, current.y)))
            }
            // A committed selection follows the data when the view moves.
            SelectionPhase::Selected(range) => context.viewport.and_then(|viewport| {
                let a = viewport
                    .data_to_pixel(range.x_min, range.y_max, context.plot_area)
                    .ok()?;
                let b = viewport
                    .data_to_pixel(range.x_max, range.y_min, context.plot_area)
                    .ok()?;
                Some((a, b))
            }),
        };

        if let Some(((x0, y0), (x1, y1))) = corners {
            overlays.push(
                RectPrimitive::new(
                    x0.min(x1),
                    y0.min(y1),
                    (x1 - x0).abs(),
                    (y1 - y0).abs(),
                    SELECTION_FILL,
                )
                .with_border(SELECTION_BORDER),
            );
        }
    }
}
