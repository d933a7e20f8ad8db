use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Opaque identifier of an imported dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSourceId(String);

impl DataSourceId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DataSourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one numeric channel inside a data source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterId(String);

impl ParameterId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one mounted chart instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartId(String);

impl ChartId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the x axis of a chart is driven by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XAxisParameter {
    Timestamp,
    Parameter(ParameterId),
}

impl XAxisParameter {
    #[must_use]
    pub fn is_timestamp(&self) -> bool {
        matches!(self, Self::Timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub id: ParameterId,
    pub name: String,
    pub unit: String,
}

impl ParameterInfo {
    #[must_use]
    pub fn new(id: ParameterId, name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            unit: unit.into(),
        }
    }

    /// Descriptor used for the epoch-millisecond time axis.
    #[must_use]
    pub fn timestamp() -> Self {
        Self::new(ParameterId::new("timestamp"), "Time", "")
    }

    /// Axis/legend label, e.g. `Temperature (°C)`.
    #[must_use]
    pub fn label(&self) -> String {
        if self.unit.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.unit)
        }
    }
}

/// One `(x, y)` sample. `y == None` marks a missing sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub x: f64,
    pub y: Option<f64>,
}

impl RawPoint {
    #[must_use]
    pub fn new(x: f64, y: Option<f64>) -> Self {
        Self { x, y }
    }
}

/// Closed numeric interval on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Builds a range from two finite bounds, swapping them when reversed.
    pub fn new(a: f64, b: f64) -> ChartResult<Self> {
        if !a.is_finite() || !b.is_finite() {
            return Err(ChartError::InvalidData(
                "axis range bounds must be finite".to_owned(),
            ));
        }
        Ok(if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        })
    }

    /// Min/max over `values`, skipping `NaN` and infinities.
    ///
    /// Returns `None` when no finite value exists.
    #[must_use]
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            if value.is_finite() {
                min = min.min(value);
                max = max.max(value);
            }
        }
        (min <= max).then_some(Self { min, max })
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Union over optional ranges; `None` entries are skipped.
    #[must_use]
    pub fn union_all<I>(ranges: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<Self>>,
    {
        ranges
            .into_iter()
            .flatten()
            .reduce(|acc, range| acc.union(range))
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Expands both ends by `ratio * span`.
    #[must_use]
    pub fn padded(self, ratio: f64) -> Self {
        let pad = self.span() * ratio;
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Returns a range with non-zero span so it can back a linear scale.
    ///
    /// A degenerate range is widened by 5% of its magnitude, or by 1.0 around zero.
    #[must_use]
    pub fn non_degenerate(self) -> Self {
        if self.span() > 0.0 {
            return self;
        }
        let half = if self.min == 0.0 {
            1.0
        } else {
            self.min.abs() * 0.05
        };
        Self {
            min: self.min - half,
            max: self.max + half,
        }
    }

    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
        }
    }
}

/// Pixel size of a chart's plotting rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: u32,
    pub height: u32,
}

impl PlotArea {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// One plot-ready series. Missing samples are stored as `NaN` in `y_values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    pub source_id: DataSourceId,
    pub metadata_label: String,
    pub parameter_info: ParameterInfo,
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    pub x_range: Option<AxisRange>,
    pub y_range: Option<AxisRange>,
}

impl PlotSeries {
    /// Builds a series and computes its axis ranges.
    ///
    /// Fails when `x_values` and `y_values` differ in length.
    pub fn new(
        source_id: DataSourceId,
        metadata_label: impl Into<String>,
        parameter_info: ParameterInfo,
        x_values: Vec<f64>,
        y_values: Vec<f64>,
    ) -> ChartResult<Self> {
        if x_values.len() != y_values.len() {
            return Err(ChartError::InvalidData(format!(
                "series x/y length mismatch: {} vs {}",
                x_values.len(),
                y_values.len()
            )));
        }
        let x_range = AxisRange::from_values(x_values.iter().copied());
        let y_range = AxisRange::from_values(y_values.iter().copied());
        Ok(Self {
            source_id,
            metadata_label: metadata_label.into(),
            parameter_info,
            x_values,
            y_values,
            x_range,
            y_range,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x_values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_values.is_empty()
    }

    /// Legend name: `<source label> - <parameter name>`.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.metadata_label.is_empty() {
            self.parameter_info.name.clone()
        } else {
            format!("{} - {}", self.metadata_label, self.parameter_info.name)
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.x_values.len() != self.y_values.len() {
            return Err(ChartError::TransformFailure(format!(
                "series `{}` has {} x values but {} y values",
                self.display_name(),
                self.x_values.len(),
                self.y_values.len()
            )));
        }
        Ok(())
    }

    /// Copies the series with new sample arrays, recomputing ranges.
    pub fn with_samples(&self, x_values: Vec<f64>, y_values: Vec<f64>) -> ChartResult<Self> {
        Self::new(
            self.source_id.clone(),
            self.metadata_label.clone(),
            self.parameter_info.clone(),
            x_values,
            y_values,
        )
    }
}

/// Aggregate of all series for one chart, sharing one x-axis semantic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    pub x_parameter_info: ParameterInfo,
    pub is_time_axis: bool,
    pub series: Vec<PlotSeries>,
    pub x_range: Option<AxisRange>,
    /// Y range unified across every series so they share one scale.
    pub y_range: Option<AxisRange>,
}

impl PlotData {
    #[must_use]
    pub fn new(x_parameter_info: ParameterInfo, is_time_axis: bool, series: Vec<PlotSeries>) -> Self {
        let x_range = AxisRange::union_all(series.iter().map(|s| s.x_range));
        let y_range = AxisRange::union_all(series.iter().map(|s| s.y_range));
        Self {
            x_parameter_info,
            is_time_axis,
            series,
            x_range,
            y_range,
        }
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.iter().map(PlotSeries::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(PlotSeries::is_empty)
    }
}
