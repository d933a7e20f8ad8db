//! gridchart-rs: progressive chart-data pipeline for time-series dashboards.
//!
//! Loads raw rows through a storage collaborator, merges them onto a shared
//! axis, samples them per resolution tier and keeps many chart viewports in
//! sync across a lazily loaded grid. Drawing is delegated to a `Renderer`.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod extensions;
pub mod grid;
pub mod interaction;
pub mod render;
pub mod sync;
pub mod telemetry;

pub use api::{ChartConfiguration, ChartGrid, ChartInstance, DashboardConfig};
pub use error::{ChartError, ChartResult};
