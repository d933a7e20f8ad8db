use tracing::{debug, warn};

use crate::core::{
    DataSourceId, ParameterId, ParameterInfo, PlotData, SourceSeries, XAxisParameter,
    merge_series,
};
use crate::error::{ChartError, ChartResult};

use super::TimeSeriesStore;

/// Loads raw rows for a chart and merges them into `PlotData`.
///
/// No caching happens here; repeated loads hit the store again.
pub struct DataFetcher<'a> {
    store: &'a dyn TimeSeriesStore,
}

impl<'a> DataFetcher<'a> {
    #[must_use]
    pub fn new(store: &'a dyn TimeSeriesStore) -> Self {
        Self { store }
    }

    pub fn load(
        &self,
        data_source_ids: &[DataSourceId],
        x_axis: &XAxisParameter,
        y_parameters: &[ParameterId],
    ) -> ChartResult<PlotData> {
        if data_source_ids.is_empty() {
            return Err(ChartError::InvalidData(
                "at least one data source is required".to_owned(),
            ));
        }
        if y_parameters.is_empty() {
            return Err(ChartError::InvalidData(
                "at least one y-axis parameter is required".to_owned(),
            ));
        }

        let mut x_info: Option<ParameterInfo> = match x_axis {
            XAxisParameter::Timestamp => Some(ParameterInfo::timestamp()),
            XAxisParameter::Parameter(_) => None,
        };
        let mut sources = Vec::with_capacity(data_source_ids.len() * y_parameters.len());

        for source_id in data_source_ids {
            let frame = self.store.time_series(source_id).map_err(as_load_error)?;
            if frame.row_count() == 0 {
                return Err(ChartError::DataUnavailable(format!(
                    "data source `{source_id}` has no rows"
                )));
            }
            let label = self.store.source_label(source_id).map_err(as_load_error)?;

            if let XAxisParameter::Parameter(x_parameter) = x_axis {
                if x_info.is_none() {
                    x_info = Some(self.require_parameter(source_id, x_parameter)?);
                }
            }

            for y_parameter in y_parameters {
                let parameter_info = self.require_parameter(source_id, y_parameter)?;
                let points = frame.points(x_axis, y_parameter).ok_or_else(|| {
                    ChartError::DataUnavailable(format!(
                        "data source `{source_id}` has no column for `{y_parameter}`"
                    ))
                })?;
                sources.push(SourceSeries {
                    source_id: source_id.clone(),
                    source_label: label.clone(),
                    parameter_info,
                    points,
                });
            }
        }

        let x_info = x_info.unwrap_or_else(ParameterInfo::timestamp);
        let data = merge_series(x_info, x_axis.is_timestamp(), sources)?;
        debug!(
            sources = data_source_ids.len(),
            series = data.series.len(),
            points = data.point_count(),
            "loaded plot data"
        );
        Ok(data)
    }

    fn require_parameter(
        &self,
        source_id: &DataSourceId,
        parameter: &ParameterId,
    ) -> ChartResult<ParameterInfo> {
        self.store
            .parameter_info(source_id, parameter)
            .map_err(as_load_error)?
            .ok_or_else(|| {
                ChartError::DataUnavailable(format!(
                    "parameter `{parameter}` does not exist in data source `{source_id}`"
                ))
            })
    }
}

/// Storage errors other than "no data" are load failures.
fn as_load_error(err: ChartError) -> ChartError {
    match err {
        ChartError::DataUnavailable(_) | ChartError::LoadFailure(_) => err,
        other => {
            warn!(error = %other, "storage collaborator failed");
            ChartError::LoadFailure(other.to_string())
        }
    }
}
