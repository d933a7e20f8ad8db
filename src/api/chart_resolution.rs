use crate::core::{Millis, Resolution};
use crate::interaction::ResolutionMode;
use crate::render::Renderer;

use super::ChartInstance;

impl<R: Renderer> ChartInstance<R> {
    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution.tier()
    }

    #[must_use]
    pub fn resolution_mode(&self) -> ResolutionMode {
        self.resolution.mode()
    }

    /// Pins `tier`, cancelling any scheduled upgrade. Ignored while a
    /// dashboard-wide override is active. Returns `true` when the tier changed.
    pub fn set_resolution(&mut self, tier: Resolution) -> bool {
        let changed = self.resolution.set_resolution(tier);
        if changed {
            self.needs_render = true;
        }
        changed
    }

    pub fn set_auto_upgrade(&mut self, enabled: bool, now: Millis) {
        self.resolution.set_auto_upgrade(enabled, now);
    }

    /// Mirrors a dashboard-wide tier (or lifts it with `None`).
    pub fn set_global_resolution(&mut self, global: Option<Resolution>, now: Millis) {
        let before = self.resolution.tier();
        self.resolution.set_global_resolution(global, now);
        if self.resolution.tier() != before {
            self.needs_render = true;
        }
    }
}
