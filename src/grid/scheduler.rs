use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{DelayedTask, Millis};
use crate::error::{ChartError, ChartResult};

use super::intersection::{PixelRect, is_intersecting};

fn default_eager_count() -> usize {
    4
}

fn default_stagger_step_ms() -> Millis {
    100
}

fn default_root_margin_px() -> f64 {
    100.0
}

fn default_threshold() -> f64 {
    0.1
}

fn default_min_loading_ms() -> Millis {
    500
}

/// Waterfall/lazy loading policy for a chart grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSchedulerConfig {
    /// Charts loaded without waiting for visibility, in reading order.
    #[serde(default = "default_eager_count")]
    pub eager_count: usize,
    /// Per-index delay between eager charts.
    #[serde(default = "default_stagger_step_ms")]
    pub stagger_step_ms: Millis,
    /// Pre-fetch margin around the scroll viewport for lazy charts.
    #[serde(default = "default_root_margin_px")]
    pub root_margin_px: f64,
    /// Visible fraction of a placeholder that grants eligibility.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Shortest time a chart shows its loading state.
    #[serde(default = "default_min_loading_ms")]
    pub min_loading_ms: Millis,
}

impl Default for GridSchedulerConfig {
    fn default() -> Self {
        Self {
            eager_count: default_eager_count(),
            stagger_step_ms: default_stagger_step_ms(),
            root_margin_px: default_root_margin_px(),
            threshold: default_threshold(),
            min_loading_ms: default_min_loading_ms(),
        }
    }
}

impl GridSchedulerConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.root_margin_px.is_finite() || self.root_margin_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "grid root margin must be finite and >= 0".to_owned(),
            ));
        }
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(ChartError::InvalidConfig(
                "grid intersection threshold must be in [0, 1]".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Stagger delay of an eager chart, `None` for lazy ones.
    #[must_use]
    pub fn stagger_delay(self, index: usize) -> Option<Millis> {
        (index < self.eager_count).then(|| self.stagger_step_ms.saturating_mul(index as Millis))
    }
}

/// Lifecycle of one grid slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum ChartLoadState {
    Pending,
    Loading,
    Loaded,
    Error(String),
}

/// Transitions the host must act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridEvent {
    /// Start the chart's data pipeline.
    StartLoading(usize),
    /// Minimum loading time elapsed; show the chart.
    Loaded(usize),
    Failed(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridProgress {
    pub total: usize,
    pub pending: usize,
    pub loading: usize,
    pub loaded: usize,
    pub failed: usize,
}

#[derive(Debug, Clone)]
struct Slot {
    state: ChartLoadState,
    eager: bool,
    has_started_loading: bool,
    loading_started_at: Option<Millis>,
    stagger: DelayedTask<()>,
    reveal: DelayedTask<()>,
}

impl Slot {
    fn new(eager: bool) -> Self {
        Self {
            state: ChartLoadState::Pending,
            eager,
            has_started_loading: false,
            loading_started_at: None,
            stagger: DelayedTask::new(),
            reveal: DelayedTask::new(),
        }
    }
}

type LoadCompleteCallback = Box<dyn FnMut(usize, usize)>;

/// Decides when each chart of a grid may start loading.
///
/// The first `eager_count` charts start after a per-index stagger; the rest
/// wait until their placeholder intersects the scroll viewport. Each slot
/// leaves `Pending` at most once until an explicit `retry`.
pub struct GridScheduler {
    config: GridSchedulerConfig,
    slots: Vec<Slot>,
    loaded_count: usize,
    load_complete: Vec<LoadCompleteCallback>,
}

impl std::fmt::Debug for GridScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridScheduler")
            .field("config", &self.config)
            .field("slots", &self.slots)
            .field("loaded_count", &self.loaded_count)
            .finish_non_exhaustive()
    }
}

impl GridScheduler {
    pub fn new(config: GridSchedulerConfig, chart_count: usize, now: Millis) -> ChartResult<Self> {
        let config = config.validate()?;
        let slots = (0..chart_count)
            .map(|index| {
                let mut slot = Slot::new(false);
                if let Some(delay) = config.stagger_delay(index) {
                    slot.eager = true;
                    slot.stagger.schedule(now, delay, ());
                }
                slot
            })
            .collect();
        debug!(
            chart_count,
            eager = config.eager_count.min(chart_count),
            "grid scheduler created"
        );
        Ok(Self {
            config,
            slots,
            loaded_count: 0,
            load_complete: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> GridSchedulerConfig {
        self.config
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn state(&self, index: usize) -> Option<&ChartLoadState> {
        self.slots.get(index).map(|slot| &slot.state)
    }

    #[must_use]
    pub fn is_eager(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|slot| slot.eager)
    }

    #[must_use]
    pub fn has_started_loading(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .is_some_and(|slot| slot.has_started_loading)
    }

    /// Registers an observer called with `(index, loaded_count)` whenever a
    /// chart reaches `Loaded`.
    pub fn on_load_complete(&mut self, callback: impl FnMut(usize, usize) + 'static) {
        self.load_complete.push(Box::new(callback));
    }

    #[must_use]
    pub fn progress(&self) -> GridProgress {
        let mut progress = GridProgress {
            total: self.slots.len(),
            ..GridProgress::default()
        };
        for slot in &self.slots {
            match slot.state {
                ChartLoadState::Pending => progress.pending += 1,
                ChartLoadState::Loading => progress.loading += 1,
                ChartLoadState::Loaded => progress.loaded += 1,
                ChartLoadState::Error(_) => progress.failed += 1,
            }
        }
        progress
    }

    /// Fires due stagger and reveal timers.
    pub fn tick(&mut self, now: Millis) -> Vec<GridEvent> {
        let mut events = Vec::new();
        for index in 0..self.slots.len() {
            if self.slots[index].stagger.poll(now).is_some() {
                events.extend(self.request_load(index, now));
            }
            if self.slots[index].reveal.poll(now).is_some() {
                events.extend(self.finish_loaded(index));
            }
        }
        events
    }

    /// Feeds one placeholder's geometry relative to the scroll viewport.
    ///
    /// Only lazy charts react; eager charts follow their stagger timer.
    pub fn observe_intersection(
        &mut self,
        index: usize,
        placeholder: PixelRect,
        scroll_viewport: PixelRect,
        now: Millis,
    ) -> Option<GridEvent> {
        let slot = self.slots.get(index)?;
        if slot.eager || slot.has_started_loading {
            return None;
        }
        let visible = is_intersecting(
            placeholder,
            scroll_viewport,
            self.config.root_margin_px,
            self.config.threshold,
        );
        if !visible {
            return None;
        }
        trace!(index, "lazy chart placeholder intersected viewport");
        self.request_load(index, now)
    }

    /// Observes every placeholder at once, in reading order.
    pub fn observe_viewport(
        &mut self,
        placeholders: &[PixelRect],
        scroll_viewport: PixelRect,
        now: Millis,
    ) -> Vec<GridEvent> {
        placeholders
            .iter()
            .enumerate()
            .filter_map(|(index, rect)| self.observe_intersection(index, *rect, scroll_viewport, now))
            .collect()
    }

    /// Moves `Pending -> Loading` once; repeated eligibility signals are no-ops.
    pub fn request_load(&mut self, index: usize, now: Millis) -> Option<GridEvent> {
        let slot = self.slots.get_mut(index)?;
        if slot.has_started_loading || slot.state != ChartLoadState::Pending {
            return None;
        }
        slot.has_started_loading = true;
        slot.stagger.cancel();
        slot.state = ChartLoadState::Loading;
        slot.loading_started_at = Some(now);
        debug!(index, now, "chart loading started");
        Some(GridEvent::StartLoading(index))
    }

    /// Reports a finished load; the slot flips to `Loaded` once the minimum
    /// loading time has elapsed.
    pub fn mark_loaded(&mut self, index: usize, now: Millis) -> Option<GridEvent> {
        let min_loading_ms = self.config.min_loading_ms;
        let slot = self.slots.get_mut(index)?;
        if slot.state != ChartLoadState::Loading {
            return None;
        }
        let started = slot.loading_started_at.unwrap_or(now);
        let elapsed = now.saturating_sub(started);
        if elapsed >= min_loading_ms {
            return self.finish_loaded(index);
        }
        let remaining = min_loading_ms - elapsed;
        trace!(index, remaining, "holding loading state");
        slot.reveal.schedule(now, remaining, ());
        None
    }

    /// Reports a failed load. No automatic retry is scheduled.
    pub fn mark_failed(&mut self, index: usize, message: impl Into<String>) -> Option<GridEvent> {
        let slot = self.slots.get_mut(index)?;
        if slot.state != ChartLoadState::Loading {
            return None;
        }
        let message = message.into();
        warn!(index, error = %message, "chart load failed");
        slot.reveal.cancel();
        slot.state = ChartLoadState::Error(message);
        Some(GridEvent::Failed(index))
    }

    /// Resets a failed slot's latch and re-attempts immediately.
    pub fn retry(&mut self, index: usize, now: Millis) -> Option<GridEvent> {
        let slot = self.slots.get_mut(index)?;
        if !matches!(slot.state, ChartLoadState::Error(_)) {
            return None;
        }
        slot.state = ChartLoadState::Pending;
        slot.has_started_loading = false;
        slot.loading_started_at = None;
        debug!(index, "retrying chart load");
        self.request_load(index, now)
    }

    /// Returns a slot to `Pending` for a new logical chart. Eager slots restart
    /// their stagger from `now`; lazy slots wait for the next intersection.
    pub fn reset_slot(&mut self, index: usize, now: Millis) {
        let config = self.config;
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        let was_loaded = slot.state == ChartLoadState::Loaded;
        *slot = Slot::new(slot.eager);
        if slot.eager {
            slot.stagger.schedule(now, config.stagger_delay(index).unwrap_or(0), ());
        }
        if was_loaded {
            self.loaded_count = self.loaded_count.saturating_sub(1);
        }
    }

    /// Cancels every pending timer, e.g. when the grid unmounts.
    pub fn cancel_all(&mut self) {
        for slot in &mut self.slots {
            slot.stagger.cancel();
            slot.reveal.cancel();
        }
    }

    fn finish_loaded(&mut self, index: usize) -> Option<GridEvent> {
        let slot = self.slots.get_mut(index)?;
        if slot.state != ChartLoadState::Loading {
            return None;
        }
        slot.reveal.cancel();
        slot.state = ChartLoadState::Loaded;
        self.loaded_count += 1;
        let loaded_count = self.loaded_count;
        debug!(index, loaded_count, total = self.slots.len(), "chart loaded");
        for callback in &mut self.load_complete {
            callback(index, loaded_count);
        }
        Some(GridEvent::Loaded(index))
    }
}
