use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{DataSourceId, ParameterId, ParameterInfo, RawPoint, XAxisParameter};
use crate::error::{ChartError, ChartResult};

/// Columnar rows of one imported dataset.
///
/// `timestamps` are epoch milliseconds. Parameter columns may be shorter than
/// the timestamp column; consumers zip to the shorter length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceFrame {
    pub timestamps: Vec<f64>,
    pub columns: IndexMap<ParameterId, Vec<Option<f64>>>,
}

impl SourceFrame {
    #[must_use]
    pub fn new(timestamps: Vec<f64>) -> Self {
        Self {
            timestamps,
            columns: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_column(mut self, parameter: ParameterId, values: Vec<Option<f64>>) -> Self {
        self.columns.insert(parameter, values);
        self
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn column(&self, parameter: &ParameterId) -> Option<&[Option<f64>]> {
        self.columns.get(parameter).map(Vec::as_slice)
    }

    /// Pairs the x source with one y column, truncated to the shorter length.
    ///
    /// Rows without an x value are dropped since they cannot be placed on the
    /// axis. Returns `None` when a referenced column does not exist.
    #[must_use]
    pub fn points(&self, x: &XAxisParameter, y: &ParameterId) -> Option<Vec<RawPoint>> {
        let y_column = self.column(y)?;
        let points = match x {
            XAxisParameter::Timestamp => self
                .timestamps
                .iter()
                .zip(y_column)
                .map(|(&x, &y)| RawPoint::new(x, y))
                .collect(),
            XAxisParameter::Parameter(x_parameter) => self
                .column(x_parameter)?
                .iter()
                .zip(y_column)
                .filter_map(|(&x, &y)| x.map(|x| RawPoint::new(x, y)))
                .collect(),
        };
        Some(points)
    }
}

/// Storage collaborator consumed by the data fetcher.
///
/// Implementations are expected to be consistent for the duration of one load.
pub trait TimeSeriesStore {
    fn time_series(&self, source: &DataSourceId) -> ChartResult<SourceFrame>;

    fn parameter_info(
        &self,
        source: &DataSourceId,
        parameter: &ParameterId,
    ) -> ChartResult<Option<ParameterInfo>>;

    /// Human label of the dataset (plant/machine/time range).
    fn source_label(&self, source: &DataSourceId) -> ChartResult<String> {
        Ok(source.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
struct StoredSource {
    label: String,
    frame: SourceFrame,
    parameters: IndexMap<ParameterId, ParameterInfo>,
}

/// In-process store for hosts that already hold decoded datasets, and for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    sources: IndexMap<DataSourceId, StoredSource>,
    failures: IndexMap<DataSourceId, String>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_source(
        &mut self,
        id: DataSourceId,
        label: impl Into<String>,
        frame: SourceFrame,
        parameters: Vec<ParameterInfo>,
    ) {
        let parameters = parameters
            .into_iter()
            .map(|info| (info.id.clone(), info))
            .collect();
        self.sources.insert(
            id,
            StoredSource {
                label: label.into(),
                frame,
                parameters,
            },
        );
    }

    /// Makes every fetch of `id` fail with a load failure until cleared.
    pub fn set_failure(&mut self, id: DataSourceId, message: impl Into<String>) {
        self.failures.insert(id, message.into());
    }

    pub fn clear_failure(&mut self, id: &DataSourceId) -> bool {
        self.failures.shift_remove(id).is_some()
    }

    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    fn stored(&self, id: &DataSourceId) -> ChartResult<&StoredSource> {
        if let Some(message) = self.failures.get(id) {
            return Err(ChartError::LoadFailure(message.clone()));
        }
        self.sources
            .get(id)
            .ok_or_else(|| ChartError::DataUnavailable(format!("unknown data source `{id}`")))
    }
}

impl TimeSeriesStore for InMemoryStore {
    fn time_series(&self, source: &DataSourceId) -> ChartResult<SourceFrame> {
        Ok(self.stored(source)?.frame.clone())
    }

    fn parameter_info(
        &self,
        source: &DataSourceId,
        parameter: &ParameterId,
    ) -> ChartResult<Option<ParameterInfo>> {
        Ok(self.stored(source)?.parameters.get(parameter).cloned())
    }

    fn source_label(&self, source: &DataSourceId) -> ChartResult<String> {
        Ok(self.stored(source)?.label.clone())
    }
}
