use criterion::{Criterion, criterion_group, criterion_main};
use gridchart_rs::api::{ChartConfiguration, RenderFrameInputs, build_render_frame};
use gridchart_rs::core::{
    DataSourceId, ParameterId, ParameterInfo, PlotArea, PlotData, PlotSeries, Resolution,
    Viewport, XAxisParameter, sample_series, select_indices,
};
use std::hint::black_box;

fn sensor_series(source: &str, rows: usize, offset: f64) -> PlotSeries {
    let x: Vec<f64> = (0..rows).map(|i| i as f64 * 1_000.0).collect();
    let y: Vec<f64> = (0..rows)
        .map(|i| {
            if i % 997 == 0 {
                f64::NAN
            } else {
                offset + (i as f64 * 0.013).sin() * 5.0 + (i as f64 * 0.17).cos()
            }
        })
        .collect();
    PlotSeries::new(
        DataSourceId::new(source),
        source,
        ParameterInfo::new(ParameterId::new("temp"), "Temperature", "C"),
        x,
        y,
    )
    .expect("valid generated series")
}

fn bench_select_indices_100k(c: &mut Criterion) {
    let series = sensor_series("machine-0", 100_000, 0.0);

    c.bench_function("select_indices_100k_to_2k", |b| {
        b.iter(|| {
            let _ = select_indices(
                black_box(&series.x_values),
                black_box(&series.y_values),
                black_box(2_000),
            );
        })
    });
}

fn bench_sample_series_tiers(c: &mut Criterion) {
    let series = sensor_series("machine-0", 100_000, 0.0);

    for tier in [Resolution::Preview, Resolution::High] {
        c.bench_function(&format!("sample_series_100k_{tier}"), |b| {
            b.iter(|| {
                let _ = sample_series(black_box(&series), black_box(tier.point_budget()))
                    .expect("sampling should succeed");
            })
        });
    }
}

fn bench_render_frame_3x30k(c: &mut Criterion) {
    let data = PlotData::new(
        ParameterInfo::timestamp(),
        true,
        (0..3)
            .map(|i| sensor_series(&format!("machine-{i}"), 30_000, f64::from(i) * 10.0))
            .collect(),
    );
    let config = ChartConfiguration::new(
        "Temperature",
        XAxisParameter::Timestamp,
        vec![ParameterId::new("temp")],
        (0..3)
            .map(|i| DataSourceId::new(format!("machine-{i}")))
            .collect(),
    );
    let viewport = Viewport::from_plot_data(&data).expect("viewport");

    c.bench_function("render_frame_3x30k_normal", |b| {
        b.iter(|| {
            let _ = build_render_frame(
                black_box(RenderFrameInputs {
                    config: &config,
                    data: &data,
                    viewport,
                    plot_area: PlotArea::new(1_600, 400),
                    resolution: Resolution::Normal,
                    visible_x: None,
                }),
                Vec::new(),
            )
            .expect("frame should build");
        })
    });
}

criterion_group!(
    benches,
    bench_select_indices_100k,
    bench_sample_series_tiers,
    bench_render_frame_3x30k
);
criterion_main!(benches);
