use tracing::debug;

use crate::core::types::{DataSourceId, ParameterInfo, PlotData, PlotSeries, RawPoint};
use crate::error::ChartResult;

/// Raw points of one `(source, parameter)` pair awaiting merge.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSeries {
    pub source_id: DataSourceId,
    pub source_label: String,
    pub parameter_info: ParameterInfo,
    pub points: Vec<RawPoint>,
}

/// Merges fetched series into one `PlotData` sharing the x-axis semantic.
///
/// On a time axis, series are aligned on their timestamps without
/// interpolation: missing samples stay `NaN` and render as gaps. Out-of-order
/// timestamps are stably sorted first. Parameter (XY) axes keep row order.
pub fn merge_series(
    x_parameter_info: ParameterInfo,
    is_time_axis: bool,
    sources: Vec<SourceSeries>,
) -> ChartResult<PlotData> {
    let mut series = Vec::with_capacity(sources.len());
    for source in sources {
        let mut points = source.points;
        if is_time_axis && !points.windows(2).all(|pair| pair[0].x <= pair[1].x) {
            points.sort_by(|a, b| a.x.total_cmp(&b.x));
        }

        let missing = points.iter().filter(|point| point.y.is_none()).count();
        let (x_values, y_values): (Vec<f64>, Vec<f64>) = points
            .iter()
            .map(|point| (point.x, point.y.unwrap_or(f64::NAN)))
            .unzip();

        debug!(
            source = %source.source_id,
            parameter = %source.parameter_info.id,
            points = x_values.len(),
            missing,
            "merged series"
        );

        series.push(PlotSeries::new(
            source.source_id,
            source.source_label,
            source.parameter_info,
            x_values,
            y_values,
        )?);
    }

    Ok(PlotData::new(x_parameter_info, is_time_axis, series))
}

#[cfg(test)]
mod tests {
    use super::{SourceSeries, merge_series};
    use crate::core::types::{DataSourceId, ParameterId, ParameterInfo, RawPoint};

    fn source(label: &str, points: Vec<RawPoint>) -> SourceSeries {
        SourceSeries {
            source_id: DataSourceId::new(label),
            source_label: label.to_owned(),
            parameter_info: ParameterInfo::new(ParameterId::new("temp"), "Temperature", "C"),
            points,
        }
    }

    #[test]
    fn combined_y_range_spans_all_series() {
        let data = merge_series(
            ParameterInfo::timestamp(),
            true,
            vec![
                source("a", vec![RawPoint::new(0.0, Some(1.0)), RawPoint::new(1.0, Some(5.0))]),
                source("b", vec![RawPoint::new(0.0, Some(-3.0)), RawPoint::new(2.0, None)]),
            ],
        )
        .expect("merge");

        let y = data.y_range.expect("y range");
        assert_eq!((y.min, y.max), (-3.0, 5.0));
        assert!(data.series[1].y_values[1].is_nan());
    }

    #[test]
    fn time_axis_points_are_sorted() {
        let data = merge_series(
            ParameterInfo::timestamp(),
            true,
            vec![source(
                "a",
                vec![RawPoint::new(2.0, Some(2.0)), RawPoint::new(1.0, Some(1.0))],
            )],
        )
        .expect("merge");
        assert_eq!(data.series[0].x_values, vec![1.0, 2.0]);
    }
}
