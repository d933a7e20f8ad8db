//! Host-facing facades: chart instances, the dashboard grid and their
//! configuration contracts.

mod chart;
mod chart_loading;
mod chart_navigation;
mod chart_render;
mod chart_resolution;
mod chart_selection;
mod config;
mod grid;
mod json_contract;
mod plugin_registry;
mod render_frame_builder;

pub use chart::{ChartInstance, LoadingState};
pub use chart_loading::{LoadOutcome, LoadTicket};
pub use config::{ChartConfiguration, ChartType, DashboardConfig};
pub use grid::{ChartGrid, GridChartSpec};
pub use json_contract::{
    CHART_CONFIGURATION_JSON_SCHEMA_V1, ChartConfigurationJsonContractV1,
    DASHBOARD_CONFIG_JSON_SCHEMA_V1, DashboardConfigJsonContractV1,
};
pub use render_frame_builder::{RenderFrameInputs, build_render_frame, sample_plot_data};
