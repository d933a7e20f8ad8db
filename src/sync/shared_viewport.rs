use std::cell::Cell;
use std::rc::Rc;

use tracing::trace;

use crate::core::{AxisRange, Viewport};

use super::{SyncApply, ZoomSyncTarget};

#[derive(Debug, Default)]
struct ViewportCell {
    current: Cell<Option<Viewport>>,
    full: Cell<Option<Viewport>>,
    /// x range received before the chart had data.
    pending_x: Cell<Option<AxisRange>>,
    currently_updating: Cell<bool>,
    interaction_locked: Cell<bool>,
    revision: Cell<u64>,
}

/// Viewport storage of one chart, shared with the zoom-sync registry.
///
/// Each chart keeps its own storage; the registry only writes through
/// `ZoomSyncTarget`. While `is_currently_updating` is set, the chart must not
/// re-broadcast the change it just received.
#[derive(Debug, Clone, Default)]
pub struct SharedViewport {
    cell: Rc<ViewportCell>,
}

impl SharedViewport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<Viewport> {
        self.cell.current.get()
    }

    #[must_use]
    pub fn full(&self) -> Option<Viewport> {
        self.cell.full.get()
    }

    /// Bumped on every mutation so renderers can detect stale frames.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.cell.revision.get()
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.current() != self.full()
    }

    /// Installs the full data extent after a load and shows it.
    ///
    /// A synced x range received while the chart had no data is applied now.
    pub fn set_full(&self, full: Option<Viewport>) {
        self.cell.full.set(full);
        let current = match (full, self.cell.pending_x.take()) {
            (Some(full), Some(x)) => Some(full.with_x(x)),
            (full, _) => full,
        };
        self.cell.current.set(current);
        self.bump();
    }

    /// Drops all state, e.g. on configuration change.
    pub fn clear(&self) {
        self.cell.full.set(None);
        self.cell.current.set(None);
        self.cell.pending_x.set(None);
        self.cell.currently_updating.set(false);
        self.bump();
    }

    pub fn set_current(&self, viewport: Viewport) {
        self.cell.current.set(Some(viewport));
        self.bump();
    }

    /// Returns to the full data range. Returns `false` without data.
    pub fn reset_to_full(&self) -> bool {
        let Some(full) = self.full() else {
            return false;
        };
        self.cell.current.set(Some(full));
        self.bump();
        true
    }

    #[must_use]
    pub fn is_currently_updating(&self) -> bool {
        self.cell.currently_updating.get()
    }

    /// Clears the received-from-sync flag once the chart applied the change.
    ///
    /// Returns whether the flag was set.
    pub fn finish_synced_update(&self) -> bool {
        self.cell.currently_updating.replace(false)
    }

    /// Locks out ambient sync while a local drag is in progress.
    pub fn set_interaction_locked(&self, locked: bool) {
        self.cell.interaction_locked.set(locked);
    }

    #[must_use]
    pub fn is_interaction_locked(&self) -> bool {
        self.cell.interaction_locked.get()
    }

    fn bump(&self) {
        self.cell.revision.set(self.cell.revision.get().wrapping_add(1));
    }
}

impl ZoomSyncTarget for SharedViewport {
    fn apply_synced_range(&self, x: AxisRange) -> SyncApply {
        if self.is_interaction_locked() {
            trace!("synced zoom ignored during local selection");
            return SyncApply::Ignored;
        }
        self.cell.currently_updating.set(true);
        match self.current() {
            Some(current) => self.cell.current.set(Some(current.with_x(x))),
            None => self.cell.pending_x.set(Some(x)),
        }
        self.bump();
        SyncApply::Applied
    }

    fn apply_synced_reset(&self) -> SyncApply {
        if self.is_interaction_locked() {
            trace!("synced reset ignored during local selection");
            return SyncApply::Ignored;
        }
        self.cell.currently_updating.set(true);
        self.cell.pending_x.set(None);
        if let Some(full) = self.full() {
            self.cell.current.set(Some(full));
        }
        self.bump();
        SyncApply::Applied
    }
}
