use tracing::{debug, warn};

use crate::core::{CancellationToken, Millis, PlotData, Viewport};
use crate::data::{DataFetcher, TimeSeriesStore};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{ChartConfiguration, ChartInstance, LoadingState};

/// Captured at load start; a completion carrying an outdated ticket is dropped.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    token: CancellationToken,
}

impl LoadTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// What a finished load did to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { series: usize, points: usize },
    /// No rows, or every requested parameter was missing.
    Empty,
    Failed,
    /// Superseded by a newer load, a configuration change or unmount.
    Stale,
}

impl LoadOutcome {
    /// `true` when the chart left its loading state normally.
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Loaded { .. } | Self::Empty)
    }
}

impl<R: Renderer> ChartInstance<R> {
    /// Starts a new load generation and invalidates any in-flight one.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_token.cancel();
        self.load_token = CancellationToken::new();
        self.generation = self.generation.wrapping_add(1);
        self.loading = LoadingState::loading();
        debug!(chart = %self.id, generation = self.generation, "chart load started");
        LoadTicket {
            generation: self.generation,
            token: self.load_token.clone(),
        }
    }

    /// Applies the result of the load identified by `ticket`.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        result: ChartResult<PlotData>,
        now: Millis,
    ) -> LoadOutcome {
        if ticket.token.is_cancelled() || ticket.generation != self.generation || !self.mounted {
            debug!(
                chart = %self.id,
                generation = ticket.generation,
                current = self.generation,
                "stale chart load discarded"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(data) if data.is_empty() => {
                self.clear_data();
                self.loading = LoadingState {
                    empty: true,
                    ..LoadingState::default()
                };
                debug!(chart = %self.id, "chart load returned no points");
                LoadOutcome::Empty
            }
            Ok(data) => {
                let outcome = LoadOutcome::Loaded {
                    series: data.series.len(),
                    points: data.point_count(),
                };
                self.viewport.set_full(Viewport::from_plot_data(&data));
                self.selection.borrow_mut().clear();
                self.data = Some(data);
                self.loading = LoadingState::default();
                self.ready_sent = false;
                self.needs_render = true;
                debug!(chart = %self.id, ?outcome, now, "chart load applied");
                outcome
            }
            Err(err) => {
                self.clear_data();
                self.loading = LoadingState::from_error(&err);
                if self.loading.empty {
                    debug!(chart = %self.id, error = %err, "chart data unavailable");
                    LoadOutcome::Empty
                } else {
                    warn!(chart = %self.id, error = %err, "chart load failed");
                    LoadOutcome::Failed
                }
            }
        }
    }

    /// Runs the whole fetch and merge pipeline against `store`.
    pub fn load_from(&mut self, store: &dyn TimeSeriesStore, now: Millis) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = DataFetcher::new(store).load(
            &self.config.selected_data_ids,
            &self.config.x_axis_parameter,
            &self.config.y_axis_parameters,
        );
        self.complete_load(&ticket, result, now)
    }

    /// Replaces the configuration. Returns `true` when it changed, in which
    /// case the chart is a new logical chart and must be reloaded.
    pub fn set_configuration(
        &mut self,
        config: ChartConfiguration,
        now: Millis,
    ) -> ChartResult<bool> {
        if config == self.config {
            return Ok(false);
        }
        config.validate()?;

        self.load_token.cancel();
        self.generation = self.generation.wrapping_add(1);
        let axis_changed = config.axis_kind() != self.config.axis_kind();
        self.config = config;
        self.clear_data();
        self.loading = LoadingState::default();
        self.selection.borrow_mut().clear();
        self.viewport.set_interaction_locked(false);
        self.resolution.reset(now);
        if axis_changed {
            if let Some(sync) = self.sync.clone() {
                self.detach_sync();
                self.attach_sync(sync);
            }
        }
        debug!(chart = %self.id, axis_changed, "chart configuration replaced");
        Ok(true)
    }

    fn clear_data(&mut self) {
        self.data = None;
        self.viewport.clear();
        self.last_sampling.clear();
        self.rendered_revision = None;
        self.ready_sent = false;
        self.needs_render = false;
    }
}
