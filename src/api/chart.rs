use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    CancellationToken, ChartId, Debouncer, Millis, PlotArea, PlotData, SamplingInfo, Viewport,
};
use crate::error::{ChartError, ChartErrorKind, ChartResult};
use crate::extensions::{
    ChartPlugin, PluginContext, SelectionOverlayPlugin, ZOOM_SYNC_PLUGIN_ID, ZoomSyncPlugin,
};
use crate::interaction::{ResolutionController, SelectionEngine};
use crate::render::Renderer;
use crate::sync::{SharedViewport, ZoomSyncService};

use super::{ChartConfiguration, DashboardConfig};

/// User-facing load state of one chart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadingState {
    pub is_loading: bool,
    /// Error-state message; `None` while healthy or empty.
    pub error: Option<String>,
    pub error_kind: Option<ChartErrorKind>,
    /// Sources had no rows or lacked the requested parameters.
    pub empty: bool,
}

impl LoadingState {
    pub(super) fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    /// Converts a chart pipeline error into user-facing state.
    pub(super) fn from_error(err: &ChartError) -> Self {
        match err.kind() {
            ChartErrorKind::DataUnavailable => Self {
                empty: true,
                ..Self::default()
            },
            ChartErrorKind::TransformFailure => Self {
                error: Some("failed to render chart".to_owned()),
                error_kind: Some(ChartErrorKind::TransformFailure),
                ..Self::default()
            },
            kind => Self {
                error: Some(err.to_string()),
                error_kind: Some(kind),
                ..Self::default()
            },
        }
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// One chart of the dashboard: load pipeline, viewport, selection, resolution
/// and plugins, drawing through `R`.
///
/// Every failure inside the pipeline is converted into `LoadingState`; sibling
/// charts and the shared zoom-sync registry never see it.
pub struct ChartInstance<R: Renderer> {
    pub(super) id: ChartId,
    pub(super) renderer: R,
    pub(super) config: ChartConfiguration,
    pub(super) settings: DashboardConfig,
    pub(super) plot_area: PlotArea,
    pub(super) resize: Debouncer<PlotArea>,
    pub(super) viewport: SharedViewport,
    pub(super) sync: Option<ZoomSyncService>,
    pub(super) resolution: ResolutionController,
    pub(super) selection: Rc<RefCell<SelectionEngine>>,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
    pub(super) data: Option<PlotData>,
    pub(super) loading: LoadingState,
    pub(super) generation: u64,
    pub(super) load_token: CancellationToken,
    pub(super) mounted: bool,
    pub(super) needs_render: bool,
    pub(super) ready_sent: bool,
    pub(super) rendered_revision: Option<u64>,
    pub(super) last_sampling: Vec<SamplingInfo>,
}

impl<R: Renderer> std::fmt::Debug for ChartInstance<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartInstance")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("plot_area", &self.plot_area)
            .field("loading", &self.loading)
            .field("resolution", &self.resolution.mode())
            .field("mounted", &self.mounted)
            .field("plugins", &self.plugin_count())
            .finish_non_exhaustive()
    }
}

impl<R: Renderer> ChartInstance<R> {
    pub fn new(
        id: ChartId,
        renderer: R,
        config: ChartConfiguration,
        settings: DashboardConfig,
    ) -> ChartResult<Self> {
        let settings = settings.validate()?;
        config.validate()?;
        if id.as_str().is_empty() {
            return Err(ChartError::InvalidConfig("chart id must not be empty".to_owned()));
        }

        let selection = Rc::new(RefCell::new(SelectionEngine::new(settings.selection)));
        let plugins: Vec<Box<dyn ChartPlugin>> = vec![Box::new(SelectionOverlayPlugin::new(
            Rc::clone(&selection),
        ))];

        Ok(Self {
            id,
            renderer,
            config,
            plot_area: settings.plot_size,
            resize: Debouncer::new(settings.resize_debounce_ms),
            viewport: SharedViewport::new(),
            sync: None,
            resolution: ResolutionController::new(settings.resolution),
            selection,
            plugins,
            data: None,
            loading: LoadingState::default(),
            generation: 0,
            load_token: CancellationToken::new(),
            mounted: false,
            needs_render: false,
            ready_sent: false,
            rendered_revision: None,
            last_sampling: Vec::new(),
            settings,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ChartId {
        &self.id
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfiguration {
        &self.config
    }

    #[must_use]
    pub fn settings(&self) -> DashboardConfig {
        self.settings
    }

    #[must_use]
    pub fn loading_state(&self) -> &LoadingState {
        &self.loading
    }

    /// Full-resolution data of the last successful load.
    #[must_use]
    pub fn plot_data(&self) -> Option<&PlotData> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot_area
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport.current()
    }

    /// Handle to the viewport storage the zoom-sync registry writes into.
    #[must_use]
    pub fn shared_viewport(&self) -> &SharedViewport {
        &self.viewport
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Per-series sampling counts of the last rendered frame.
    #[must_use]
    pub fn sampling_info(&self) -> &[SamplingInfo] {
        &self.last_sampling
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Attaches the chart to the session: registers with zoom sync and starts
    /// the resolution state machine.
    pub fn mount(&mut self, sync: &ZoomSyncService, now: Millis) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.resolution.reset(now);
        self.attach_sync(sync.clone());
        debug!(chart = %self.id, "chart mounted");
    }

    /// Detaches the chart. Pending timers are cancelled and in-flight loads
    /// can no longer mutate it.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.load_token.cancel();
        self.resolution.cancel();
        self.resize.cancel();
        self.detach_sync();
        self.selection.borrow_mut().clear();
        self.viewport.set_interaction_locked(false);
        self.loading.is_loading = false;
        debug!(chart = %self.id, "chart unmounted");
    }

    /// Requests a new plot size; applied after the resize quiet period.
    pub fn resize(&mut self, width: u32, height: u32, now: Millis) -> ChartResult<()> {
        let area = PlotArea::new(width, height).validate()?;
        self.resize.push(now, area);
        Ok(())
    }

    pub(super) fn attach_sync(&mut self, sync: ZoomSyncService) {
        let handle: Rc<SharedViewport> = Rc::new(self.viewport.clone());
        sync.register_chart(self.id.clone(), handle, self.config.axis_kind());
        self.plugins.retain(|plugin| plugin.id() != ZOOM_SYNC_PLUGIN_ID);
        self.plugins.push(Box::new(ZoomSyncPlugin::new(
            self.id.clone(),
            sync.clone(),
            self.viewport.clone(),
        )));
        self.sync = Some(sync);
    }

    pub(super) fn detach_sync(&mut self) {
        if let Some(sync) = self.sync.take() {
            sync.unregister_chart(&self.id);
        }
        self.plugins.retain(|plugin| plugin.id() != ZOOM_SYNC_PLUGIN_ID);
    }

    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.viewport.current(),
            plot_area: self.plot_area,
            series_count: self.data.as_ref().map_or(0, |data| data.series.len()),
            point_count: self.data.as_ref().map_or(0, PlotData::point_count),
            resolution: self.resolution.tier(),
        }
    }
}
