use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{AxisRange, PlotArea, PlotData, Viewport};
use crate::error::{ChartError, ChartResult};

fn default_min_selection_px() -> f64 {
    3.0
}

fn default_zoom_padding_ratio() -> f64 {
    0.1
}

fn default_true() -> bool {
    true
}

/// Host-configurable drag-to-select policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionBehavior {
    /// Drags narrower or shorter than this many pixels count as clicks.
    #[serde(default = "default_min_selection_px")]
    pub min_selection_px: f64,
    /// Padding added on each side of both axes when zooming to a selection.
    #[serde(default = "default_zoom_padding_ratio")]
    pub zoom_padding_ratio: f64,
    #[serde(default = "default_true")]
    pub zoom_to_selection: bool,
    /// Leave selection mode after one committed selection.
    #[serde(default)]
    pub auto_disable_after_select: bool,
}

impl Default for SelectionBehavior {
    fn default() -> Self {
        Self {
            min_selection_px: default_min_selection_px(),
            zoom_padding_ratio: default_zoom_padding_ratio(),
            zoom_to_selection: true,
            auto_disable_after_select: false,
        }
    }
}

impl SelectionBehavior {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.min_selection_px.is_finite() || self.min_selection_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "min selection size must be finite and >= 0".to_owned(),
            ));
        }
        if !self.zoom_padding_ratio.is_finite() || self.zoom_padding_ratio < 0.0 {
            return Err(ChartError::InvalidConfig(
                "selection zoom padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn clamped(self, area: PlotArea) -> Self {
        Self {
            x: self.x.clamp(0.0, f64::from(area.width)),
            y: self.y.clamp(0.0, f64::from(area.height)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedPoint {
    pub x: f64,
    pub y: f64,
}

/// Points of one series enclosed by a selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedSeriesPoints {
    pub name: String,
    pub points: Vec<SelectedPoint>,
}

/// Data-space rectangle chosen by a drag, with the enclosed samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub selected_data_points: Vec<SelectedSeriesPoints>,
}

impl SelectionRange {
    #[must_use]
    pub fn x_range(&self) -> AxisRange {
        AxisRange {
            min: self.x_min,
            max: self.x_max,
        }
    }

    #[must_use]
    pub fn y_range(&self) -> AxisRange {
        AxisRange {
            min: self.y_min,
            max: self.y_max,
        }
    }

    #[must_use]
    pub fn total_points(&self) -> usize {
        self.selected_data_points
            .iter()
            .map(|series| series.points.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionPhase {
    Idle,
    Selecting { start: PixelPoint, current: PixelPoint },
    Selected(SelectionRange),
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Selection mode is off or no drag was in progress.
    Ignored,
    /// Drag was below the minimum size and was treated as a click.
    Discarded,
    Committed,
}

/// Per-chart drag-to-select state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionEngine {
    behavior: SelectionBehavior,
    enabled: bool,
    phase: SelectionPhase,
}

impl SelectionEngine {
    #[must_use]
    pub fn new(behavior: SelectionBehavior) -> Self {
        Self {
            behavior,
            enabled: false,
            phase: SelectionPhase::Idle,
        }
    }

    #[must_use]
    pub fn behavior(&self) -> SelectionBehavior {
        self.behavior
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn phase(&self) -> &SelectionPhase {
        &self.phase
    }

    /// `true` while a drag is in progress.
    #[must_use]
    pub fn is_selecting(&self) -> bool {
        matches!(self.phase, SelectionPhase::Selecting { .. })
    }

    #[must_use]
    pub fn selection(&self) -> Option<&SelectionRange> {
        match &self.phase {
            SelectionPhase::Selected(range) => Some(range),
            _ => None,
        }
    }

    /// Flips drag-to-select mode. Leaving the mode clears any selection.
    pub fn toggle_selection_mode(&mut self) -> bool {
        self.enabled = !self.enabled;
        if !self.enabled {
            self.phase = SelectionPhase::Idle;
        }
        debug!(enabled = self.enabled, "selection mode toggled");
        self.enabled
    }

    pub fn clear(&mut self) {
        self.phase = SelectionPhase::Idle;
    }

    /// Starts a drag. Returns `false` when selection mode is off.
    pub fn pointer_down(&mut self, point: PixelPoint, area: PlotArea) -> bool {
        if !self.enabled || !point.x.is_finite() || !point.y.is_finite() {
            return false;
        }
        let point = point.clamped(area);
        self.phase = SelectionPhase::Selecting {
            start: point,
            current: point,
        };
        true
    }

    pub fn pointer_move(&mut self, point: PixelPoint, area: PlotArea) {
        if let SelectionPhase::Selecting { current, .. } = &mut self.phase {
            if point.x.is_finite() && point.y.is_finite() {
                *current = point.clamped(area);
            }
        }
    }

    /// Ends a drag and maps it to data space through the visible `viewport`.
    pub fn pointer_up(
        &mut self,
        point: PixelPoint,
        area: PlotArea,
        viewport: Viewport,
        data: &PlotData,
    ) -> ChartResult<SelectionOutcome> {
        self.pointer_move(point, area);
        let SelectionPhase::Selecting { start, current } = self.phase else {
            return Ok(SelectionOutcome::Ignored);
        };

        let width_px = (current.x - start.x).abs();
        let height_px = (current.y - start.y).abs();
        if width_px < self.behavior.min_selection_px || height_px < self.behavior.min_selection_px
        {
            trace!(width_px, height_px, "selection below minimum size discarded");
            self.phase = SelectionPhase::Idle;
            return Ok(SelectionOutcome::Discarded);
        }

        let (x_a, y_a) = viewport.pixel_to_data(start.x, start.y, area)?;
        let (x_b, y_b) = viewport.pixel_to_data(current.x, current.y, area)?;
        let x = AxisRange::new(x_a, x_b)?;
        let y = AxisRange::new(y_a, y_b)?;
        let range = SelectionRange {
            x_min: x.min,
            x_max: x.max,
            y_min: y.min,
            y_max: y.max,
            selected_data_points: points_in_rect(data, x, y),
        };
        debug!(
            x_min = range.x_min,
            x_max = range.x_max,
            y_min = range.y_min,
            y_max = range.y_max,
            points = range.total_points(),
            "selection committed"
        );

        self.phase = SelectionPhase::Selected(range);
        if self.behavior.auto_disable_after_select {
            self.enabled = false;
        }
        Ok(SelectionOutcome::Committed)
    }

    /// Padded viewport for the current selection, without clearing it.
    #[must_use]
    pub fn zoom_target(&self) -> Option<Viewport> {
        let range = self.selection()?;
        Some(Viewport::new(range.x_range(), range.y_range()).padded(self.behavior.zoom_padding_ratio))
    }

    /// Consumes the selection into a zoom target when zoom-to-selection is enabled.
    pub fn take_zoom_target(&mut self) -> Option<Viewport> {
        if !self.behavior.zoom_to_selection {
            return None;
        }
        let target = self.zoom_target()?;
        self.phase = SelectionPhase::Idle;
        Some(target)
    }
}

/// Samples of every series inside the data-space rectangle.
#[must_use]
pub fn points_in_rect(data: &PlotData, x: AxisRange, y: AxisRange) -> Vec<SelectedSeriesPoints> {
    data.series
        .iter()
        .map(|series| SelectedSeriesPoints {
            name: series.display_name(),
            points: series
                .x_values
                .iter()
                .zip(&series.y_values)
                .filter(|(px, py)| py.is_finite() && x.contains(**px) && y.contains(**py))
                .map(|(&px, &py)| SelectedPoint { x: px, y: py })
                .collect(),
        })
        .collect()
}
