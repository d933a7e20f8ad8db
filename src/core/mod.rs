pub mod merge;
pub mod resolution;
pub mod sampling;
pub mod scale;
pub mod timing;
pub mod types;
pub mod viewport;
pub mod windowing;

pub use merge::{SourceSeries, merge_series};
pub use resolution::Resolution;
pub use sampling::{SampledSeries, SamplingInfo, sample_series, select_indices};
pub use scale::LinearScale;
pub use timing::{CancellationToken, Debouncer, DelayedTask, Millis};
pub use types::{
    AxisRange, ChartId, DataSourceId, ParameterId, ParameterInfo, PlotArea, PlotData, PlotSeries,
    RawPoint, XAxisParameter,
};
pub use viewport::Viewport;
pub use windowing::{is_sorted_ascending, series_in_x_window, sorted_window_indices};
