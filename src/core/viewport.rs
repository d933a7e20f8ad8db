use serde::{Deserialize, Serialize};

use crate::core::scale::LinearScale;
use crate::core::types::{AxisRange, PlotArea, PlotData};
use crate::error::{ChartError, ChartResult};

/// Visible data-space rectangle of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: AxisRange,
    pub y: AxisRange,
}

impl Viewport {
    #[must_use]
    pub fn new(x: AxisRange, y: AxisRange) -> Self {
        Self { x, y }
    }

    /// Full data extent of `data`, widened where a range is degenerate.
    ///
    /// Returns `None` when no finite sample exists.
    #[must_use]
    pub fn from_plot_data(data: &PlotData) -> Option<Self> {
        Some(Self {
            x: data.x_range?.non_degenerate(),
            y: data.y_range?.non_degenerate(),
        })
    }

    #[must_use]
    pub fn x_min(self) -> f64 {
        self.x.min
    }

    #[must_use]
    pub fn x_max(self) -> f64 {
        self.x.max
    }

    #[must_use]
    pub fn y_min(self) -> f64 {
        self.y.min
    }

    #[must_use]
    pub fn y_max(self) -> f64 {
        self.y.max
    }

    #[must_use]
    pub fn with_x(mut self, x: AxisRange) -> Self {
        self.x = x;
        self
    }

    /// Pads both axes by `ratio` of their span on each side.
    #[must_use]
    pub fn padded(self, ratio: f64) -> Self {
        Self {
            x: self.x.padded(ratio).non_degenerate(),
            y: self.y.padded(ratio).non_degenerate(),
        }
    }

    pub fn x_scale(self) -> ChartResult<LinearScale> {
        LinearScale::from_range(self.x)
    }

    pub fn y_scale(self) -> ChartResult<LinearScale> {
        Ok(LinearScale::from_range(self.y)?.inverted())
    }

    /// Maps a pixel position inside `area` to data space using the current scales.
    pub fn pixel_to_data(self, px: f64, py: f64, area: PlotArea) -> ChartResult<(f64, f64)> {
        let area = area.validate()?;
        let x = self.x_scale()?.pixel_to_domain(px, area.width)?;
        let y = self.y_scale()?.pixel_to_domain(py, area.height)?;
        Ok((x, y))
    }

    pub fn data_to_pixel(self, x: f64, y: f64, area: PlotArea) -> ChartResult<(f64, f64)> {
        let area = area.validate()?;
        let px = self.x_scale()?.domain_to_pixel(x, area.width)?;
        let py = self.y_scale()?.domain_to_pixel(y, area.height)?;
        Ok((px, py))
    }

    /// Zooms the x axis around `anchor` by `factor` (`> 1` zooms in).
    ///
    /// The resulting span never drops below `min_span`.
    pub fn zoom_x_around(self, anchor: f64, factor: f64, min_span: f64) -> ChartResult<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        if !anchor.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }
        if !min_span.is_finite() || min_span <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom min span must be finite and > 0".to_owned(),
            ));
        }

        let span = self.x.span();
        let target_span = (span / factor).max(min_span);
        let anchor_ratio = if span > 0.0 {
            ((anchor - self.x.min) / span).clamp(0.0, 1.0)
        } else {
            0.5
        };
        let min = anchor - anchor_ratio * target_span;
        Ok(self.with_x(AxisRange::new(min, min + target_span)?))
    }

    /// Translates the x axis by a pixel delta; positive deltas move the view left.
    pub fn pan_x_by_pixels(self, delta_px: f64, area: PlotArea) -> ChartResult<Self> {
        if !delta_px.is_finite() {
            return Err(ChartError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }
        let area = area.validate()?;
        let shift = self.x_scale()?.units_per_pixel(area.width)? * delta_px;
        Ok(self.with_x(AxisRange::new(self.x.min - shift, self.x.max - shift)?))
    }
}

#[cfg(test)]
mod tests {
    use super::Viewport;
    use crate::core::types::{AxisRange, PlotArea};

    fn viewport() -> Viewport {
        Viewport::new(
            AxisRange::new(0.0, 100.0).expect("x"),
            AxisRange::new(0.0, 10.0).expect("y"),
        )
    }

    #[test]
    fn zoom_keeps_anchor_ratio() {
        let zoomed = viewport().zoom_x_around(25.0, 2.0, 1e-6).expect("zoom");
        assert!((zoomed.x.min - 12.5).abs() <= 1e-9);
        assert!((zoomed.x.max - 62.5).abs() <= 1e-9);
    }

    #[test]
    fn pan_moves_by_scaled_pixels() {
        let panned = viewport()
            .pan_x_by_pixels(100.0, PlotArea::new(1000, 500))
            .expect("pan");
        assert!((panned.x.min + 10.0).abs() <= 1e-9);
        assert!((panned.x.max - 90.0).abs() <= 1e-9);
    }

    #[test]
    fn pixel_mapping_respects_inverted_y() {
        let (x, y) = viewport()
            .pixel_to_data(500.0, 0.0, PlotArea::new(1000, 500))
            .expect("map");
        assert!((x - 50.0).abs() <= 1e-9);
        assert!((y - 10.0).abs() <= 1e-9);
    }
}
