use std::rc::Rc;

use tracing::{debug, warn};

use crate::core::{ChartId, Millis, Resolution};
use crate::data::TimeSeriesStore;
use crate::error::{ChartError, ChartResult};
use crate::grid::{ChartLoadState, GridEvent, GridProgress, GridScheduler, PixelRect};
use crate::render::Renderer;
use crate::sync::ZoomSyncService;

use super::{ChartConfiguration, ChartInstance, DashboardConfig, LoadOutcome, LoadingState};

/// Chart to place in a grid slot.
pub struct GridChartSpec<R: Renderer> {
    pub id: ChartId,
    pub renderer: R,
    pub config: ChartConfiguration,
}

impl<R: Renderer> GridChartSpec<R> {
    #[must_use]
    pub fn new(id: ChartId, renderer: R, config: ChartConfiguration) -> Self {
        Self {
            id,
            renderer,
            config,
        }
    }
}

/// Dashboard grid: waterfall/lazy loading of many charts sharing one
/// zoom-sync registry and one storage collaborator.
pub struct ChartGrid<R: Renderer> {
    settings: DashboardConfig,
    scheduler: GridScheduler,
    charts: Vec<ChartInstance<R>>,
    store: Rc<dyn TimeSeriesStore>,
    sync: ZoomSyncService,
    global_resolution: Option<Resolution>,
}

impl<R: Renderer> std::fmt::Debug for ChartGrid<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartGrid")
            .field("scheduler", &self.scheduler)
            .field("charts", &self.charts)
            .field("sync", &self.sync)
            .field("global_resolution", &self.global_resolution)
            .finish_non_exhaustive()
    }
}

impl<R: Renderer> ChartGrid<R> {
    /// Mounts every chart and arms the eager stagger timers at `now`.
    pub fn new(
        settings: DashboardConfig,
        store: Rc<dyn TimeSeriesStore>,
        sync: ZoomSyncService,
        specs: Vec<GridChartSpec<R>>,
        now: Millis,
    ) -> ChartResult<Self> {
        let settings = settings.validate()?;
        let mut charts = Vec::with_capacity(specs.len());
        for spec in specs {
            if charts
                .iter()
                .any(|chart: &ChartInstance<R>| chart.id() == &spec.id)
            {
                return Err(ChartError::InvalidConfig(format!(
                    "duplicate chart id `{}` in grid",
                    spec.id
                )));
            }
            let mut chart = ChartInstance::new(spec.id, spec.renderer, spec.config, settings)?;
            chart.mount(&sync, now);
            charts.push(chart);
        }
        let scheduler = GridScheduler::new(settings.grid, charts.len(), now)?;
        debug!(charts = charts.len(), "chart grid created");
        Ok(Self {
            settings,
            scheduler,
            charts,
            store,
            sync,
            global_resolution: None,
        })
    }

    #[must_use]
    pub fn settings(&self) -> DashboardConfig {
        self.settings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    #[must_use]
    pub fn chart(&self, index: usize) -> Option<&ChartInstance<R>> {
        self.charts.get(index)
    }

    pub fn chart_mut(&mut self, index: usize) -> Option<&mut ChartInstance<R>> {
        self.charts.get_mut(index)
    }

    #[must_use]
    pub fn state(&self, index: usize) -> Option<&ChartLoadState> {
        self.scheduler.state(index)
    }

    #[must_use]
    pub fn scheduler(&self) -> &GridScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn progress(&self) -> GridProgress {
        self.scheduler.progress()
    }

    #[must_use]
    pub fn zoom_sync(&self) -> &ZoomSyncService {
        &self.sync
    }

    #[must_use]
    pub fn global_resolution(&self) -> Option<Resolution> {
        self.global_resolution
    }

    /// Observer called with `(index, loaded_count)` when a chart is revealed.
    pub fn on_load_complete(&mut self, callback: impl FnMut(usize, usize) + 'static) {
        self.scheduler.on_load_complete(callback);
    }

    /// Fires due scheduler timers, runs started loads and ticks every chart.
    pub fn tick(&mut self, now: Millis) -> Vec<GridEvent> {
        let events = self.scheduler.tick(now);
        let events = self.run_events(events, now);
        for chart in &mut self.charts {
            if let Err(err) = chart.tick(now) {
                warn!(chart = %chart.id, error = %err, "chart tick failed");
                chart.loading = LoadingState::from_error(&err);
            }
        }
        events
    }

    /// Feeds placeholder geometry; lazy charts that became visible start loading.
    pub fn observe_viewport(
        &mut self,
        placeholders: &[PixelRect],
        scroll_viewport: PixelRect,
        now: Millis,
    ) -> Vec<GridEvent> {
        let events = self
            .scheduler
            .observe_viewport(placeholders, scroll_viewport, now);
        self.run_events(events, now)
    }

    /// Manually re-attempts a failed chart.
    pub fn retry(&mut self, index: usize, now: Millis) -> Vec<GridEvent> {
        let events = self.scheduler.retry(index, now).into_iter().collect();
        self.run_events(events, now)
    }

    /// Applies (`Some`) or lifts (`None`) one resolution for every chart.
    pub fn set_global_resolution(&mut self, global: Option<Resolution>, now: Millis) {
        self.global_resolution = global;
        for chart in &mut self.charts {
            chart.set_global_resolution(global, now);
        }
        debug!(?global, "global resolution changed");
    }

    /// Replaces one chart's configuration; a changed chart reloads from scratch.
    pub fn set_configuration(
        &mut self,
        index: usize,
        config: ChartConfiguration,
        now: Millis,
    ) -> ChartResult<bool> {
        let chart = self.charts.get_mut(index).ok_or_else(|| {
            ChartError::InvalidData(format!("grid has no chart at index {index}"))
        })?;
        let changed = chart.set_configuration(config, now)?;
        if changed {
            if let Some(global) = self.global_resolution {
                chart.set_global_resolution(Some(global), now);
            }
            self.scheduler.reset_slot(index, now);
        }
        Ok(changed)
    }

    /// Unmounts every chart and cancels every scheduler timer.
    pub fn unmount(&mut self) {
        self.scheduler.cancel_all();
        for chart in &mut self.charts {
            chart.unmount();
        }
        debug!("chart grid unmounted");
    }

    fn run_events(&mut self, events: Vec<GridEvent>, now: Millis) -> Vec<GridEvent> {
        let mut out = Vec::with_capacity(events.len());
        for event in events {
            out.push(event);
            let GridEvent::StartLoading(index) = event else {
                continue;
            };
            let Some(chart) = self.charts.get_mut(index) else {
                continue;
            };
            let follow_up = match chart.load_from(self.store.as_ref(), now) {
                LoadOutcome::Loaded { .. } | LoadOutcome::Empty => {
                    self.scheduler.mark_loaded(index, now)
                }
                LoadOutcome::Failed => {
                    let message = chart
                        .loading_state()
                        .error
                        .clone()
                        .unwrap_or_else(|| "chart load failed".to_owned());
                    self.scheduler.mark_failed(index, message)
                }
                LoadOutcome::Stale => None,
            };
            out.extend(follow_up);
        }
        out
    }
}
