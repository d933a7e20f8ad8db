//! Staggered and viewport-driven loading for chart grids.

mod intersection;
mod scheduler;

pub use intersection::{PixelRect, intersection_ratio, is_intersecting};
pub use scheduler::{
    ChartLoadState, GridEvent, GridProgress, GridScheduler, GridSchedulerConfig,
};
