use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{DelayedTask, Millis, Resolution};
use crate::error::{ChartError, ChartResult};

fn default_true() -> bool {
    true
}

fn default_upgrade_delay_ms() -> Millis {
    1_000
}

/// Host-configurable progressive upgrade policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionBehavior {
    /// Advance one tier after each quiet `upgrade_delay_ms` until `Full`.
    #[serde(default = "default_true")]
    pub auto_upgrade: bool,
    #[serde(default = "default_upgrade_delay_ms")]
    pub upgrade_delay_ms: Millis,
    /// Tier a chart starts at after mount or reconfiguration.
    #[serde(default)]
    pub initial: Resolution,
}

impl Default for ResolutionBehavior {
    fn default() -> Self {
        Self {
            auto_upgrade: true,
            upgrade_delay_ms: default_upgrade_delay_ms(),
            initial: Resolution::Preview,
        }
    }
}

impl ResolutionBehavior {
    pub fn validate(self) -> ChartResult<Self> {
        if self.auto_upgrade && self.upgrade_delay_ms == 0 {
            return Err(ChartError::InvalidConfig(
                "resolution upgrade delay must be > 0 when auto upgrade is enabled".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Who currently owns the active tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ResolutionMode {
    /// Progressive upgrade is running.
    Auto { tier: Resolution },
    /// Pinned by an explicit caller choice.
    Manual { tier: Resolution },
    /// Mirrors a dashboard-wide override; local scheduling is suppressed.
    Global { tier: Resolution },
}

impl ResolutionMode {
    #[must_use]
    pub fn tier(self) -> Resolution {
        match self {
            Self::Auto { tier } | Self::Manual { tier } | Self::Global { tier } => tier,
        }
    }
}

/// Per-chart resolution state machine.
///
/// Under `Auto` the visited tiers never decrease until `reset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionController {
    behavior: ResolutionBehavior,
    mode: ResolutionMode,
    upgrade: DelayedTask<Resolution>,
}

impl ResolutionController {
    #[must_use]
    pub fn new(behavior: ResolutionBehavior) -> Self {
        let tier = behavior.initial;
        Self {
            behavior,
            mode: if behavior.auto_upgrade {
                ResolutionMode::Auto { tier }
            } else {
                ResolutionMode::Manual { tier }
            },
            upgrade: DelayedTask::new(),
        }
    }

    #[must_use]
    pub fn behavior(&self) -> ResolutionBehavior {
        self.behavior
    }

    #[must_use]
    pub fn mode(&self) -> ResolutionMode {
        self.mode
    }

    #[must_use]
    pub fn tier(&self) -> Resolution {
        self.mode.tier()
    }

    /// Deadline of the scheduled upgrade, if any.
    #[must_use]
    pub fn pending_upgrade_at(&self) -> Option<Millis> {
        self.upgrade.deadline()
    }

    /// Restarts at the initial tier, e.g. after mount or a configuration change.
    ///
    /// A dashboard-wide override survives the reset.
    pub fn reset(&mut self, now: Millis) {
        self.upgrade.cancel();
        let tier = self.behavior.initial;
        self.mode = match self.mode {
            ResolutionMode::Global { tier } => ResolutionMode::Global { tier },
            _ if self.behavior.auto_upgrade => ResolutionMode::Auto { tier },
            _ => ResolutionMode::Manual { tier },
        };
        self.schedule_next(now);
        debug!(tier = %self.tier(), mode = ?self.mode, "resolution reset");
    }

    /// Pins `tier`, cancelling any scheduled upgrade.
    ///
    /// Ignored while a dashboard-wide override is active. Returns `true` when
    /// the active tier changed.
    pub fn set_resolution(&mut self, tier: Resolution) -> bool {
        if matches!(self.mode, ResolutionMode::Global { .. }) {
            debug!(requested = %tier, "manual resolution ignored under global override");
            return false;
        }
        self.upgrade.cancel();
        let previous = self.tier();
        self.mode = ResolutionMode::Manual { tier };
        debug!(from = %previous, to = %tier, "resolution pinned");
        previous != tier
    }

    /// Turns progressive upgrade on or off from the current tier.
    pub fn set_auto_upgrade(&mut self, enabled: bool, now: Millis) {
        self.behavior.auto_upgrade = enabled;
        if matches!(self.mode, ResolutionMode::Global { .. }) {
            return;
        }
        let tier = self.tier();
        if enabled {
            self.mode = ResolutionMode::Auto { tier };
            self.schedule_next(now);
        } else {
            self.upgrade.cancel();
            self.mode = ResolutionMode::Manual { tier };
        }
    }

    /// Applies (`Some`) or lifts (`None`) a dashboard-wide override.
    ///
    /// Returns `true` when the active tier changed.
    pub fn set_global_resolution(&mut self, global: Option<Resolution>, now: Millis) -> bool {
        let previous = self.tier();
        match global {
            Some(tier) => {
                self.upgrade.cancel();
                self.mode = ResolutionMode::Global { tier };
            }
            None => {
                if !matches!(self.mode, ResolutionMode::Global { .. }) {
                    return false;
                }
                self.mode = if self.behavior.auto_upgrade {
                    ResolutionMode::Auto { tier: previous }
                } else {
                    ResolutionMode::Manual { tier: previous }
                };
                self.schedule_next(now);
            }
        }
        previous != self.tier()
    }

    /// Fires a due upgrade. Returns the new tier when one was applied.
    pub fn poll(&mut self, now: Millis) -> Option<Resolution> {
        let next = self.upgrade.poll(now)?;
        let ResolutionMode::Auto { tier } = self.mode else {
            return None;
        };
        if next <= tier {
            return None;
        }
        self.mode = ResolutionMode::Auto { tier: next };
        debug!(from = %tier, to = %next, "resolution auto-upgraded");
        self.schedule_next(now);
        Some(next)
    }

    /// Drops any scheduled upgrade; used on unmount.
    pub fn cancel(&mut self) {
        self.upgrade.cancel();
    }

    fn schedule_next(&mut self, now: Millis) {
        if let ResolutionMode::Auto { tier } = self.mode {
            match tier.next() {
                Some(next) => self
                    .upgrade
                    .schedule(now, self.behavior.upgrade_delay_ms, next),
                None => {
                    self.upgrade.cancel();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ResolutionBehavior, ResolutionController, ResolutionMode};
    use crate::core::Resolution;

    #[test]
    fn auto_upgrade_walks_every_tier() {
        let mut controller = ResolutionController::new(ResolutionBehavior::default());
        controller.reset(0);

        assert_eq!(controller.poll(999), None);
        assert_eq!(controller.poll(1_000), Some(Resolution::Normal));
        assert_eq!(controller.poll(2_000), Some(Resolution::High));
        assert_eq!(controller.poll(3_000), Some(Resolution::Full));
        assert_eq!(controller.pending_upgrade_at(), None);
        assert_eq!(controller.poll(10_000), None);
    }

    #[test]
    fn manual_choice_cancels_pending_upgrade() {
        let mut controller = ResolutionController::new(ResolutionBehavior::default());
        controller.reset(0);
        assert!(controller.set_resolution(Resolution::High));
        assert_eq!(controller.pending_upgrade_at(), None);
        assert_eq!(controller.poll(5_000), None);
        assert_eq!(
            controller.mode(),
            ResolutionMode::Manual {
                tier: Resolution::High
            }
        );
    }

    #[test]
    fn global_override_suppresses_local_schedule() {
        let mut controller = ResolutionController::new(ResolutionBehavior::default());
        controller.reset(0);
        assert!(controller.set_global_resolution(Some(Resolution::Normal), 10));
        assert_eq!(controller.pending_upgrade_at(), None);
        assert!(!controller.set_resolution(Resolution::Full));
        assert_eq!(controller.tier(), Resolution::Normal);

        assert!(!controller.set_global_resolution(None, 100));
        assert_eq!(controller.pending_upgrade_at(), Some(1_100));
    }
}
