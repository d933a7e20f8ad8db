use serde::{Deserialize, Serialize};

use crate::core::{DataSourceId, Millis, ParameterId, PlotArea, XAxisParameter};
use crate::error::{ChartError, ChartResult};
use crate::grid::GridSchedulerConfig;
use crate::interaction::{ResolutionBehavior, SelectionBehavior};
use crate::render::SeriesDrawMode;
use crate::sync::{AxisKind, TimeUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Scatter,
}

impl ChartType {
    #[must_use]
    pub fn draw_mode(self) -> SeriesDrawMode {
        match self {
            Self::Line => SeriesDrawMode::Line,
            Self::Scatter => SeriesDrawMode::Points,
        }
    }
}

/// What one chart shows.
///
/// Treated as an immutable value: any change is a new logical chart and
/// triggers a full reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfiguration {
    pub title: String,
    #[serde(default)]
    pub chart_type: ChartType,
    pub x_axis_parameter: XAxisParameter,
    pub y_axis_parameters: Vec<ParameterId>,
    pub selected_data_ids: Vec<DataSourceId>,
}

impl ChartConfiguration {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        x_axis_parameter: XAxisParameter,
        y_axis_parameters: Vec<ParameterId>,
        selected_data_ids: Vec<DataSourceId>,
    ) -> Self {
        Self {
            title: title.into(),
            chart_type: ChartType::Line,
            x_axis_parameter,
            y_axis_parameters,
            selected_data_ids,
        }
    }

    #[must_use]
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    /// Zoom-sync partition of this chart. Timestamps are epoch milliseconds.
    #[must_use]
    pub fn axis_kind(&self) -> AxisKind {
        if self.x_axis_parameter.is_timestamp() {
            AxisKind::Time(TimeUnit::Milliseconds)
        } else {
            AxisKind::Parameter
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.y_axis_parameters.is_empty() {
            return Err(ChartError::InvalidConfig(
                "chart needs at least one y-axis parameter".to_owned(),
            ));
        }
        if self.selected_data_ids.is_empty() {
            return Err(ChartError::InvalidConfig(
                "chart needs at least one data source".to_owned(),
            ));
        }
        if let XAxisParameter::Parameter(x) = &self.x_axis_parameter {
            if self.y_axis_parameters.contains(x) {
                return Err(ChartError::InvalidConfig(format!(
                    "parameter `{x}` cannot be both x and y"
                )));
            }
        }
        Ok(())
    }
}

fn default_resize_debounce_ms() -> Millis {
    150
}

fn default_plot_size() -> PlotArea {
    PlotArea::new(800, 400)
}

/// Dashboard-wide tuning shared by every chart of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub grid: GridSchedulerConfig,
    #[serde(default)]
    pub resolution: ResolutionBehavior,
    #[serde(default)]
    pub selection: SelectionBehavior,
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: Millis,
    /// Plot size used until the host reports a measured one.
    #[serde(default = "default_plot_size")]
    pub plot_size: PlotArea,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            grid: GridSchedulerConfig::default(),
            resolution: ResolutionBehavior::default(),
            selection: SelectionBehavior::default(),
            resize_debounce_ms: default_resize_debounce_ms(),
            plot_size: default_plot_size(),
        }
    }
}

impl DashboardConfig {
    pub fn validate(self) -> ChartResult<Self> {
        self.grid.validate()?;
        self.resolution.validate()?;
        self.selection.validate()?;
        self.plot_size.validate()?;
        Ok(self)
    }
}
