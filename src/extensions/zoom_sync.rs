use tracing::trace;

use crate::core::ChartId;
use crate::sync::{Propagation, SharedViewport, ZoomSyncService};

use super::{ChartPlugin, PluginContext, ScaleChange};

pub const ZOOM_SYNC_PLUGIN_ID: &str = "zoom-sync";

/// Forwards local scale changes to the zoom-sync service.
///
/// Changes that arrived from the service itself are not re-broadcast.
#[derive(Debug)]
pub struct ZoomSyncPlugin {
    chart_id: ChartId,
    service: ZoomSyncService,
    viewport: SharedViewport,
    last_propagation: Option<Propagation>,
}

impl ZoomSyncPlugin {
    #[must_use]
    pub fn new(chart_id: ChartId, service: ZoomSyncService, viewport: SharedViewport) -> Self {
        Self {
            chart_id,
            service,
            viewport,
            last_propagation: None,
        }
    }

    #[must_use]
    pub fn last_propagation(&self) -> Option<Propagation> {
        self.last_propagation
    }
}

impl ChartPlugin for ZoomSyncPlugin {
    fn id(&self) -> &str {
        ZOOM_SYNC_PLUGIN_ID
    }

    fn on_set_scale(&mut self, _context: &PluginContext, change: ScaleChange) {
        if self.viewport.is_currently_updating() {
            trace!(chart = %self.chart_id, "scale change came from sync; not re-broadcast");
            return;
        }
        let propagation = match change {
            ScaleChange::Zoomed(x) => self.service.handle_zoom_change(&self.chart_id, x),
            ScaleChange::Reset => self.service.handle_reset(&self.chart_id),
        };
        self.last_propagation = Some(propagation);
    }
}
