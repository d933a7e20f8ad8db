use std::ops::Range;

use crate::core::types::{AxisRange, PlotSeries};
use crate::error::ChartResult;

/// Index range of samples whose x lies inside `window`, extended by one
/// neighbour on each side so a line enters and leaves the plot edges.
///
/// Expects `x_values` sorted ascending.
#[must_use]
pub fn sorted_window_indices(x_values: &[f64], window: AxisRange) -> Range<usize> {
    let start = x_values.partition_point(|&x| x < window.min);
    let end = x_values.partition_point(|&x| x <= window.max);
    start.saturating_sub(1)..(end + 1).min(x_values.len())
}

#[must_use]
pub fn is_sorted_ascending(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] <= pair[1])
}

/// Restricts a series to the samples visible inside `window`.
///
/// Sorted series keep one neighbour outside each edge; unsorted (XY) series
/// are filtered point by point.
pub fn series_in_x_window(series: &PlotSeries, window: AxisRange) -> ChartResult<PlotSeries> {
    if is_sorted_ascending(&series.x_values) {
        let range = sorted_window_indices(&series.x_values, window);
        return series.with_samples(
            series.x_values[range.clone()].to_vec(),
            series.y_values[range].to_vec(),
        );
    }

    let (x_values, y_values) = series
        .x_values
        .iter()
        .zip(&series.y_values)
        .filter(|(x, _)| window.contains(**x))
        .map(|(x, y)| (*x, *y))
        .unzip();
    series.with_samples(x_values, y_values)
}
