use std::cell::{Cell, RefCell};
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{AxisRange, ChartId};

use super::AxisKind;

/// Whether a target accepted a propagated change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncApply {
    Applied,
    /// Target is mid-interaction; local state wins.
    Ignored,
}

/// Write side of a chart as seen by the zoom-sync registry.
pub trait ZoomSyncTarget {
    fn apply_synced_range(&self, x: AxisRange) -> SyncApply;
    fn apply_synced_reset(&self) -> SyncApply;
}

/// Outcome of one `handle_zoom_change` / `handle_reset` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Propagation {
    Broadcast { applied: usize, ignored: usize },
    /// Arrived while a propagation pass was running.
    Suppressed,
    UnknownChart,
}

/// Running counters, mostly useful to hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZoomSyncStats {
    pub zoom_broadcasts: u64,
    pub reset_broadcasts: u64,
    pub suppressed: u64,
}

struct Registration {
    handle: Rc<dyn ZoomSyncTarget>,
    axis_kind: AxisKind,
}

#[derive(Default)]
struct Registry {
    entries: RefCell<IndexMap<ChartId, Registration>>,
    propagating: Cell<bool>,
    stats: Cell<ZoomSyncStats>,
}

/// Clears the propagation flag even if a target panics.
struct PropagationGuard<'a>(&'a Cell<bool>);

impl<'a> PropagationGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for PropagationGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[derive(Clone, Copy)]
enum SyncSignal {
    Zoom(AxisRange),
    Reset,
}

/// Session-wide registry that keeps x-axis zoom aligned across charts.
///
/// Cloning yields another handle to the same registry. Propagation only
/// reaches charts whose axis kind matches the originator, converting time
/// units on the way. The registry runs on one thread; the propagation flag,
/// not a lock, prevents re-entrant ping-pong.
#[derive(Clone, Default)]
pub struct ZoomSyncService {
    registry: Rc<Registry>,
}

impl std::fmt::Debug for ZoomSyncService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoomSyncService")
            .field("charts", &self.len())
            .field("propagating", &self.is_currently_updating())
            .field("stats", &self.stats())
            .finish()
    }
}

impl ZoomSyncService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a chart. Returns `false` (and keeps the existing entry) when `id`
    /// is already registered.
    pub fn register_chart(
        &self,
        id: ChartId,
        handle: Rc<dyn ZoomSyncTarget>,
        axis_kind: AxisKind,
    ) -> bool {
        let mut entries = self.registry.entries.borrow_mut();
        if entries.contains_key(&id) {
            trace!(chart = %id, "chart already registered for zoom sync");
            return false;
        }
        debug!(chart = %id, ?axis_kind, "chart registered for zoom sync");
        entries.insert(id, Registration { handle, axis_kind });
        true
    }

    /// Removes a chart. Safe for ids that were never registered.
    pub fn unregister_chart(&self, id: &ChartId) -> bool {
        let removed = self.registry.entries.borrow_mut().shift_remove(id).is_some();
        if removed {
            debug!(chart = %id, "chart unregistered from zoom sync");
        }
        removed
    }

    #[must_use]
    pub fn is_registered(&self, id: &ChartId) -> bool {
        self.registry.entries.borrow().contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` while a propagation pass is writing into target charts.
    #[must_use]
    pub fn is_currently_updating(&self) -> bool {
        self.registry.propagating.get()
    }

    #[must_use]
    pub fn stats(&self) -> ZoomSyncStats {
        self.registry.stats.get()
    }

    /// Propagates `range` (in the originator's units) to every other chart
    /// sharing the originator's axis kind.
    pub fn handle_zoom_change(&self, id: &ChartId, range: AxisRange) -> Propagation {
        self.propagate(id, SyncSignal::Zoom(range))
    }

    /// Propagates a return-to-full-range signal like `handle_zoom_change`.
    pub fn handle_reset(&self, id: &ChartId) -> Propagation {
        self.propagate(id, SyncSignal::Reset)
    }

    fn propagate(&self, id: &ChartId, signal: SyncSignal) -> Propagation {
        if self.registry.propagating.get() {
            self.update_stats(|stats| stats.suppressed += 1);
            trace!(chart = %id, "re-entrant zoom sync suppressed");
            return Propagation::Suppressed;
        }

        // Targets may call back into the registry; no borrow is held past here.
        let targets: Vec<(ChartId, Rc<dyn ZoomSyncTarget>, Option<AxisRange>)> = {
            let entries = self.registry.entries.borrow();
            let Some(origin) = entries.get(id) else {
                warn!(chart = %id, "zoom sync requested by unregistered chart");
                return Propagation::UnknownChart;
            };
            let origin_kind = origin.axis_kind;
            entries
                .iter()
                .filter(|(target_id, entry)| {
                    *target_id != id && entry.axis_kind.shares_axis_with(origin_kind)
                })
                .map(|(target_id, entry)| {
                    let converted = match signal {
                        SyncSignal::Zoom(range) => {
                            origin_kind.convert_range(range, entry.axis_kind)
                        }
                        SyncSignal::Reset => None,
                    };
                    (target_id.clone(), Rc::clone(&entry.handle), converted)
                })
                .collect()
        };

        let _guard = PropagationGuard::enter(&self.registry.propagating);
        let mut applied = 0;
        let mut ignored = 0;
        for (target_id, handle, converted) in &targets {
            let outcome = match (&signal, converted) {
                (SyncSignal::Zoom(_), Some(range)) => handle.apply_synced_range(*range),
                (SyncSignal::Zoom(_), None) => continue,
                (SyncSignal::Reset, _) => handle.apply_synced_reset(),
            };
            match outcome {
                SyncApply::Applied => applied += 1,
                SyncApply::Ignored => {
                    ignored += 1;
                    debug!(chart = %target_id, "target ignored synced change");
                }
            }
        }

        match signal {
            SyncSignal::Zoom(range) => {
                self.update_stats(|stats| stats.zoom_broadcasts += 1);
                debug!(
                    chart = %id,
                    min = range.min,
                    max = range.max,
                    applied,
                    ignored,
                    "zoom broadcast"
                );
            }
            SyncSignal::Reset => {
                self.update_stats(|stats| stats.reset_broadcasts += 1);
                debug!(chart = %id, applied, ignored, "reset broadcast");
            }
        }
        Propagation::Broadcast { applied, ignored }
    }

    fn update_stats(&self, update: impl FnOnce(&mut ZoomSyncStats)) {
        let mut stats = self.registry.stats.get();
        update(&mut stats);
        self.registry.stats.set(stats);
    }
}
