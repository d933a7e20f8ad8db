use serde::{Deserialize, Serialize};

use crate::core::PlotArea;
use crate::error::{ChartError, ChartResult};

use super::{AlignedData, RectPrimitive, RendererOptions};

/// Everything a backend needs for one chart draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub options: RendererOptions,
    pub data: AlignedData,
    /// Plugin-provided overlays in plot pixels, drawn above the series.
    pub overlays: Vec<RectPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(options: RendererOptions, data: AlignedData) -> Self {
        Self {
            options,
            data,
            overlays: Vec::new(),
        }
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        PlotArea::new(self.options.width, self.options.height)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.plot_area().validate()?;
        self.data.validate()?;
        if self.data.series_count() != self.options.series.len() {
            return Err(ChartError::TransformFailure(format!(
                "{} data columns for {} series options",
                self.data.series_count(),
                self.options.series.len()
            )));
        }
        for series in &self.options.series {
            series.color.validate()?;
        }
        for overlay in &self.overlays {
            overlay.validate()?;
        }
        Ok(())
    }
}
