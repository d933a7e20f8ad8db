use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::core::{AxisRange, Resolution, SamplingInfo};

use super::{Color, SeriesDrawMode};

/// How axis and tooltip values are printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueFormat {
    /// Epoch milliseconds printed as UTC `YYYY-MM-DD HH:MM:SS`.
    UtcDateTime,
    Decimal { precision: u8, unit: String },
}

impl ValueFormat {
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return "-".to_owned();
        }
        match self {
            Self::UtcDateTime => DateTime::from_timestamp_millis(value.round() as i64)
                .map(|time| time.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| format!("{value}")),
            Self::Decimal { precision, unit } => {
                let precision = usize::from(*precision);
                if unit.is_empty() {
                    format!("{value:.precision$}")
                } else {
                    format!("{value:.precision$} {unit}")
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    pub label: String,
    pub range: AxisRange,
    pub is_time: bool,
    pub format: ValueFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesOptions {
    pub label: String,
    pub color: Color,
    pub draw_mode: SeriesDrawMode,
    pub stroke_width: f64,
    pub point_size: f64,
    pub value_format: ValueFormat,
    pub sampling: SamplingInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipOptions {
    pub enabled: bool,
    /// Show every series at the hovered x, not only the nearest one.
    pub show_all_series: bool,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            show_all_series: true,
        }
    }
}

/// Renderer-native chart options for one draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x_axis: AxisOptions,
    pub y_axis: AxisOptions,
    pub series: Vec<SeriesOptions>,
    pub tooltip: TooltipOptions,
    pub resolution: Resolution,
    /// Ids of the plugins hooked into this chart, in dispatch order.
    pub plugins: Vec<String>,
}

impl RendererOptions {
    /// Human summary such as `1000 of 30000 points`; `None` when nothing was reduced.
    #[must_use]
    pub fn sampling_summary(&self) -> Option<String> {
        let (shown, total) = self
            .series
            .iter()
            .fold((0usize, 0usize), |(shown, total), series| {
                (
                    shown + series.sampling.sampled_count,
                    total + series.sampling.original_count,
                )
            });
        (shown < total).then(|| format!("{shown} of {total} points"))
    }

    /// Tooltip rows for the hovered `x` and each series' `y` (or `None`).
    #[must_use]
    pub fn tooltip_lines(&self, x: f64, ys: &[Option<f64>]) -> Vec<String> {
        let mut lines = vec![self.x_axis.format.format(x)];
        for (series, y) in self.series.iter().zip(ys) {
            let value = y.map_or_else(|| "-".to_owned(), |y| series.value_format.format(y));
            lines.push(format!("{}: {value}", series.label));
        }
        lines
    }
}
