use approx::assert_relative_eq;
use gridchart_rs::api::{ChartConfiguration, ChartInstance, DashboardConfig};
use gridchart_rs::core::{
    AxisRange, ChartId, DataSourceId, ParameterId, ParameterInfo, PlotArea, PlotData, PlotSeries,
    Viewport, XAxisParameter,
};
use gridchart_rs::data::{InMemoryStore, SourceFrame};
use gridchart_rs::extensions::{ExportFormat, ExportOptions};
use gridchart_rs::interaction::{
    PixelPoint, SelectionBehavior, SelectionEngine, SelectionOutcome, SelectionPhase,
};
use gridchart_rs::render::NullRenderer;
use gridchart_rs::sync::ZoomSyncService;

fn range(min: f64, max: f64) -> AxisRange {
    AxisRange::new(min, max).expect("range")
}

fn store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    let timestamps: Vec<f64> = (0..2_000).map(|i| f64::from(i) * 1_000.0).collect();
    let values = (0..2_000)
        .map(|i| Some(f64::from(i % 100) / 10.0))
        .collect();
    store.insert_source(
        DataSourceId::new("line-3"),
        "Line 3",
        SourceFrame::new(timestamps).with_column(ParameterId::new("speed"), values),
        vec![ParameterInfo::new(ParameterId::new("speed"), "Speed", "rpm")],
    );
    store
}

fn chart_with(
    id: &str,
    settings: DashboardConfig,
    store: &InMemoryStore,
    sync: &ZoomSyncService,
) -> ChartInstance<NullRenderer> {
    let config = ChartConfiguration::new(
        "Speed",
        XAxisParameter::Timestamp,
        vec![ParameterId::new("speed")],
        vec![DataSourceId::new("line-3")],
    );
    let mut chart =
        ChartInstance::new(ChartId::new(id), NullRenderer::default(), config, settings)
            .expect("chart");
    chart.mount(sync, 0);
    assert!(chart.load_from(store, 0).is_settled());
    chart.render().expect("render");
    chart
}

fn chart(id: &str, store: &InMemoryStore, sync: &ZoomSyncService) -> ChartInstance<NullRenderer> {
    chart_with(id, DashboardConfig::default(), store, sync)
}

#[test]
fn drags_below_three_pixels_are_clicks() {
    let store = store();
    let sync = ZoomSyncService::new();
    let mut chart = chart("a", &store, &sync);
    chart.toggle_selection_mode();

    for (dx, dy) in [(0.0, 0.0), (2.0, 50.0), (50.0, 2.9)] {
        assert!(chart.selection_pointer_down(100.0, 100.0));
        let outcome = chart
            .selection_pointer_up(100.0 + dx, 100.0 + dy)
            .expect("pointer up");
        assert_eq!(outcome, SelectionOutcome::Discarded);
        assert!(chart.selection().is_none());
    }

    assert!(chart.selection_pointer_down(100.0, 100.0));
    let outcome = chart.selection_pointer_up(103.0, 103.0).expect("pointer up");
    assert_eq!(outcome, SelectionOutcome::Committed);
}

#[test]
fn pointer_events_are_ignored_outside_selection_mode() {
    let store = store();
    let sync = ZoomSyncService::new();
    let mut chart = chart("a", &store, &sync);

    assert!(!chart.selection_pointer_down(10.0, 10.0));
    assert_eq!(
        chart.selection_pointer_up(300.0, 300.0).expect("pointer up"),
        SelectionOutcome::Ignored
    );
}

#[test]
fn selection_maps_through_the_zoomed_viewport() {
    let store = store();
    let sync = ZoomSyncService::new();
    let mut chart = chart("a", &store, &sync);
    chart.zoom_x(range(0.0, 999_000.0)).expect("zoom");
    chart.toggle_selection_mode();

    let area = chart.plot_area();
    assert_eq!(area, PlotArea::new(800, 400));
    chart.selection_pointer_down(0.0, 0.0);
    chart.selection_pointer_move(200.0, 200.0);
    chart.selection_pointer_up(400.0, 400.0).expect("pointer up");

    let selection = chart.selection().expect("selection");
    assert_relative_eq!(selection.x_min, 0.0, epsilon = 1e-6);
    assert_relative_eq!(selection.x_max, 499_500.0, epsilon = 1e-6);
    let full_y = chart.plot_data().and_then(|data| data.y_range).expect("y");
    assert_relative_eq!(selection.y_min, full_y.min, epsilon = 1e-9);
    assert_relative_eq!(selection.y_max, full_y.max, epsilon = 1e-9);

    assert_eq!(selection.selected_data_points.len(), 1);
    let points = &selection.selected_data_points[0];
    assert_eq!(points.name, "Line 3 - Speed");
    assert!((499..=500).contains(&points.points.len()));
    assert!(points.points.iter().all(|point| point.x <= 499_500.0));
}

#[test]
fn zoom_to_selection_pads_propagates_and_clears() {
    let store = store();
    let sync = ZoomSyncService::new();
    let mut origin = chart("origin", &store, &sync);
    let mut follower = chart("follower", &store, &sync);
    origin.toggle_selection_mode();

    origin.selection_pointer_down(0.0, 0.0);
    origin.selection_pointer_up(400.0, 400.0).expect("pointer up");
    let selection = origin.selection().expect("selection");
    let span = selection.x_max - selection.x_min;

    assert!(origin.zoom_to_selection().expect("zoom"));
    assert!(origin.selection().is_none());

    let viewport = origin.viewport().expect("viewport");
    assert_relative_eq!(viewport.x.min, selection.x_min - span * 0.1, epsilon = 1e-6);
    assert_relative_eq!(viewport.x.max, selection.x_max + span * 0.1, epsilon = 1e-6);

    follower.tick(5).expect("tick");
    let followed = follower.viewport().expect("follower viewport");
    assert_eq!(followed.x, viewport.x);
    assert!(!origin.zoom_to_selection().expect("nothing left"));
}

#[test]
fn selection_overlay_is_drawn_while_dragging() {
    let store = store();
    let sync = ZoomSyncService::new();
    let mut chart = chart("a", &store, &sync);
    chart.toggle_selection_mode();
    chart.selection_pointer_down(100.0, 50.0);
    chart.selection_pointer_move(300.0, 250.0);

    assert!(chart.tick(1).expect("tick"));
    let frame = chart.renderer().last_frame.as_ref().expect("frame");
    assert_eq!(frame.overlays.len(), 1);
    let rect = frame.overlays[0];
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (100.0, 50.0, 200.0, 200.0));

    chart.clear_selection();
    chart.tick(2).expect("tick");
    let frame = chart.renderer().last_frame.as_ref().expect("frame");
    assert!(frame.overlays.is_empty());
}

#[test]
fn auto_disable_leaves_selection_mode_after_commit() {
    let store = store();
    let sync = ZoomSyncService::new();
    let settings = DashboardConfig {
        selection: SelectionBehavior {
            auto_disable_after_select: true,
            ..SelectionBehavior::default()
        },
        ..DashboardConfig::default()
    };
    let mut chart = chart_with("a", settings, &store, &sync);
    chart.toggle_selection_mode();
    chart.selection_pointer_down(10.0, 10.0);
    chart.selection_pointer_up(200.0, 200.0).expect("pointer up");

    assert!(!chart.is_selection_mode());
    assert!(chart.selection().is_some());
}

#[test]
fn toggling_mode_off_clears_selection() {
    let store = store();
    let sync = ZoomSyncService::new();
    let mut chart = chart("a", &store, &sync);
    chart.toggle_selection_mode();
    chart.selection_pointer_down(10.0, 10.0);
    chart.selection_pointer_up(200.0, 200.0).expect("pointer up");
    assert!(chart.selection().is_some());

    assert!(!chart.toggle_selection_mode());
    assert!(chart.selection().is_none());
}

#[test]
fn chart_exports_committed_selection() {
    let store = store();
    let sync = ZoomSyncService::new();
    let mut chart = chart("a", &store, &sync);
    let options = ExportOptions::default();
    assert!(chart.export_selection(&options).is_err());

    chart.toggle_selection_mode();
    chart.selection_pointer_down(0.0, 0.0);
    chart.selection_pointer_up(40.0, 400.0).expect("pointer up");
    let selected = chart.selection().expect("selection").total_points();

    let csv = chart.export_selection(&options).expect("csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Line 3 - Speed x,Line 3 - Speed y");
    assert_eq!(lines.len(), selected + 1);

    let json = chart
        .export_selection(&ExportOptions {
            format: ExportFormat::Json,
            ..ExportOptions::default()
        })
        .expect("json");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(parsed[0]["name"], "Line 3 - Speed");
}

#[test]
fn engine_collects_points_per_series() {
    let series = |label: &str, y: Vec<f64>| {
        let x = (0..y.len()).map(|i| i as f64).collect();
        PlotSeries::new(
            DataSourceId::new(label),
            label,
            ParameterInfo::new(ParameterId::new("v"), "V", ""),
            x,
            y,
        )
        .expect("series")
    };
    let data = PlotData::new(
        ParameterInfo::timestamp(),
        true,
        vec![
            series("a", vec![0.0, 5.0, 10.0, f64::NAN, 5.0]),
            series("b", vec![1.0, 1.0, 1.0, 1.0, 1.0]),
        ],
    );
    let viewport = Viewport::new(range(0.0, 4.0), range(0.0, 10.0));
    let area = PlotArea::new(400, 100);
    let mut engine = SelectionEngine::new(SelectionBehavior::default());
    engine.toggle_selection_mode();

    // Pixels for x in [1, 3] and y in [0, 6].
    assert!(engine.pointer_down(PixelPoint::new(100.0, 40.0), area));
    assert!(engine.is_selecting());
    let outcome = engine
        .pointer_up(PixelPoint::new(300.0, 100.0), area, viewport, &data)
        .expect("pointer up");
    assert_eq!(outcome, SelectionOutcome::Committed);

    let SelectionPhase::Selected(selected) = engine.phase() else {
        panic!("expected committed selection");
    };
    assert_eq!(selected.selected_data_points[0].points.len(), 1);
    assert_eq!(selected.selected_data_points[1].points.len(), 3);
    assert_eq!(selected.total_points(), 4);
}
