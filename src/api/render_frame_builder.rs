use indexmap::IndexSet;
use tracing::trace;

use crate::core::{
    AxisRange, PlotArea, PlotData, Resolution, SamplingInfo, Viewport, sample_series,
    series_in_x_window,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    AlignedData, AxisOptions, RenderFrame, RendererOptions, SeriesDrawMode, SeriesOptions,
    TooltipOptions, ValueFormat, palette,
};

use super::{ChartConfiguration, ChartType};

const LINE_STROKE_WIDTH: f64 = 1.5;
const SCATTER_POINT_SIZE: f64 = 4.0;
const VALUE_PRECISION: u8 = 2;

/// Sampled copy of `data` for one tier.
///
/// With `visible_x`, each series is first cut to the visible window so a
/// zoomed chart spends its budget on what is on screen.
pub fn sample_plot_data(
    data: &PlotData,
    tier: Resolution,
    visible_x: Option<AxisRange>,
) -> ChartResult<(PlotData, Vec<SamplingInfo>)> {
    let budget = tier.point_budget();
    let mut series = Vec::with_capacity(data.series.len());
    let mut infos = Vec::with_capacity(data.series.len());
    for source in &data.series {
        let sampled = match visible_x {
            Some(window) => {
                let visible = series_in_x_window(source, window)
                    .map_err(ChartError::into_transform_failure)?;
                sample_series(&visible, budget)?
            }
            None => sample_series(source, budget)?,
        };
        infos.push(sampled.info);
        series.push(sampled.series);
    }
    Ok((
        PlotData::new(data.x_parameter_info.clone(), data.is_time_axis, series),
        infos,
    ))
}

/// Inputs of one draw pass of a chart.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrameInputs<'a> {
    pub config: &'a ChartConfiguration,
    pub data: &'a PlotData,
    pub viewport: Viewport,
    pub plot_area: PlotArea,
    pub resolution: Resolution,
    /// Sample only inside this x window (set while zoomed).
    pub visible_x: Option<AxisRange>,
}

/// Turns plot data plus chart configuration into renderer-native options and
/// columnar data.
pub fn build_render_frame(
    inputs: RenderFrameInputs<'_>,
    plugin_ids: Vec<String>,
) -> ChartResult<RenderFrame> {
    let plot_area = inputs.plot_area.validate()?;
    let (sampled, infos) = sample_plot_data(inputs.data, inputs.resolution, inputs.visible_x)?;

    let draw_mode = inputs.config.chart_type.draw_mode();
    let series_options = sampled
        .series
        .iter()
        .zip(&infos)
        .enumerate()
        .map(|(index, (series, info))| SeriesOptions {
            label: series.display_name(),
            color: palette::series_color(index),
            draw_mode,
            stroke_width: match draw_mode {
                SeriesDrawMode::Line => LINE_STROKE_WIDTH,
                SeriesDrawMode::Points => 0.0,
            },
            point_size: match draw_mode {
                SeriesDrawMode::Line => 0.0,
                SeriesDrawMode::Points => SCATTER_POINT_SIZE,
            },
            value_format: ValueFormat::Decimal {
                precision: VALUE_PRECISION,
                unit: series.parameter_info.unit.clone(),
            },
            sampling: *info,
        })
        .collect();

    let x_info = &sampled.x_parameter_info;
    let x_axis = AxisOptions {
        label: x_info.label(),
        range: inputs.viewport.x,
        is_time: sampled.is_time_axis,
        format: if sampled.is_time_axis {
            ValueFormat::UtcDateTime
        } else {
            ValueFormat::Decimal {
                precision: VALUE_PRECISION,
                unit: x_info.unit.clone(),
            }
        },
    };

    let y_labels: IndexSet<String> = sampled
        .series
        .iter()
        .map(|series| series.parameter_info.label())
        .collect();
    let shared_unit = {
        let units: IndexSet<&str> = sampled
            .series
            .iter()
            .map(|series| series.parameter_info.unit.as_str())
            .collect();
        if units.len() == 1 {
            units.into_iter().next().unwrap_or_default().to_owned()
        } else {
            String::new()
        }
    };
    let y_axis = AxisOptions {
        label: y_labels.into_iter().collect::<Vec<_>>().join(", "),
        range: inputs.viewport.y,
        is_time: false,
        format: ValueFormat::Decimal {
            precision: VALUE_PRECISION,
            unit: shared_unit,
        },
    };

    let aligned = match (inputs.config.chart_type, sampled.is_time_axis) {
        (ChartType::Line, true) => AlignedData::joined(&sampled.series)?,
        _ => AlignedData::faceted(&sampled.series)?,
    };

    let options = RendererOptions {
        title: inputs.config.title.clone(),
        width: plot_area.width,
        height: plot_area.height,
        x_axis,
        y_axis,
        series: series_options,
        tooltip: TooltipOptions::default(),
        resolution: inputs.resolution,
        plugins: plugin_ids,
    };
    trace!(
        title = %options.title,
        series = options.series.len(),
        cells = aligned.cell_count(),
        resolution = %inputs.resolution,
        "render frame built"
    );

    let frame = RenderFrame::new(options, aligned);
    frame.validate().map_err(ChartError::into_transform_failure)?;
    Ok(frame)
}
