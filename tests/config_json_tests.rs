use gridchart_rs::api::{
    CHART_CONFIGURATION_JSON_SCHEMA_V1, ChartConfiguration, ChartConfigurationJsonContractV1,
    ChartType, DASHBOARD_CONFIG_JSON_SCHEMA_V1, DashboardConfig, DashboardConfigJsonContractV1,
};
use gridchart_rs::core::{DataSourceId, ParameterId, PlotArea, Resolution, XAxisParameter};

fn xy_chart() -> ChartConfiguration {
    ChartConfiguration::new(
        "Pressure vs flow",
        XAxisParameter::Parameter(ParameterId::new("flow")),
        vec![ParameterId::new("pressure")],
        vec![DataSourceId::new("pump-1"), DataSourceId::new("pump-2")],
    )
    .with_chart_type(ChartType::Scatter)
}

#[test]
fn dashboard_config_round_trips_through_the_envelope() {
    let mut config = DashboardConfig::default();
    config.grid.eager_count = 6;
    config.resolution.initial = Resolution::Normal;
    config.selection.auto_disable_after_select = true;
    config.plot_size = PlotArea::new(640, 320);

    let json = config.to_json_contract_v1_pretty().expect("serialize");
    let envelope: DashboardConfigJsonContractV1 = serde_json::from_str(&json).expect("envelope");
    assert_eq!(envelope.schema_version, DASHBOARD_CONFIG_JSON_SCHEMA_V1);

    let parsed = DashboardConfig::from_json_compat_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn bare_dashboard_config_fills_defaults() {
    let parsed = DashboardConfig::from_json_compat_str(
        r#"{"resize_debounce_ms": 300, "grid": {"eager_count": 2}}"#,
    )
    .expect("parse");

    assert_eq!(parsed.resize_debounce_ms, 300);
    assert_eq!(parsed.grid.eager_count, 2);
    assert_eq!(parsed.grid.stagger_step_ms, 100);
    assert_eq!(parsed.grid.min_loading_ms, 500);
    assert!(parsed.resolution.auto_upgrade);
    assert_eq!(parsed.selection.min_selection_px, 3.0);
    assert_eq!(parsed.plot_size, PlotArea::new(800, 400));

    assert_eq!(
        DashboardConfig::from_json_compat_str("{}").expect("empty object"),
        DashboardConfig::default()
    );
}

#[test]
fn dashboard_config_rejects_unknown_schema_and_invalid_values() {
    let future = r#"{"schema_version": 2, "config": {}}"#;
    assert!(DashboardConfig::from_json_compat_str(future).is_err());

    let zero_plot = r#"{"plot_size": {"width": 0, "height": 400}}"#;
    assert!(DashboardConfig::from_json_compat_str(zero_plot).is_err());

    assert!(DashboardConfig::from_json_compat_str("not json").is_err());
}

#[test]
fn chart_configuration_round_trips_through_the_envelope() {
    let chart = xy_chart();
    let json = chart.to_json_contract_v1_pretty().expect("serialize");
    let envelope: ChartConfigurationJsonContractV1 =
        serde_json::from_str(&json).expect("envelope");
    assert_eq!(envelope.schema_version, CHART_CONFIGURATION_JSON_SCHEMA_V1);
    assert_eq!(
        ChartConfiguration::from_json_compat_str(&json).expect("parse"),
        chart
    );
}

#[test]
fn bare_chart_configuration_defaults_to_line() {
    let parsed = ChartConfiguration::from_json_compat_str(
        r#"{
            "title": "Oven temperature",
            "x_axis_parameter": "timestamp",
            "y_axis_parameters": ["temp"],
            "selected_data_ids": ["oven-1"]
        }"#,
    )
    .expect("parse");

    assert_eq!(parsed.chart_type, ChartType::Line);
    assert!(parsed.x_axis_parameter.is_timestamp());
    assert_eq!(parsed.selected_data_ids, vec![DataSourceId::new("oven-1")]);
}

#[test]
fn chart_configuration_rejects_x_parameter_reused_as_y() {
    let input = r#"{
        "title": "Flow",
        "x_axis_parameter": {"parameter": "flow"},
        "y_axis_parameters": ["flow"],
        "selected_data_ids": ["pump-1"]
    }"#;
    assert!(ChartConfiguration::from_json_compat_str(input).is_err());

    let future = r#"{"schema_version": 9, "chart": {
        "title": "Flow",
        "x_axis_parameter": "timestamp",
        "y_axis_parameters": ["flow"],
        "selected_data_ids": ["pump-1"]
    }}"#;
    assert!(ChartConfiguration::from_json_compat_str(future).is_err());
}
