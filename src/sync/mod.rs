//! Cross-chart zoom synchronization.

mod axis;
mod service;
mod shared_viewport;

pub use axis::{AxisKind, TimeUnit};
pub use service::{Propagation, SyncApply, ZoomSyncService, ZoomSyncStats, ZoomSyncTarget};
pub use shared_viewport::SharedViewport;
