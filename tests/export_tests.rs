use gridchart_rs::extensions::{ExportFormat, ExportOptions, export_selected_data};
use gridchart_rs::interaction::{SelectedPoint, SelectedSeriesPoints};

fn series(name: &str, count: usize) -> SelectedSeriesPoints {
    SelectedSeriesPoints {
        name: name.to_owned(),
        points: (0..count)
            .map(|i| SelectedPoint {
                x: i as f64,
                y: i as f64 * 0.5,
            })
            .collect(),
    }
}

#[test]
fn csv_rows_run_to_longest_series() {
    let selection = vec![series("Temp", 50), series("Pressure", 30)];
    let csv = export_selected_data(&selection, &ExportOptions::default()).expect("csv");
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 51);
    assert_eq!(lines[0], "Temp x,Temp y,Pressure x,Pressure y");
    assert_eq!(lines[1], "0,0,0,0");
    assert_eq!(lines[3], "2,1,2,1");
    assert_eq!(lines[30], "29,14.5,29,14.5");
    assert_eq!(lines[31], "30,15,,");
    assert_eq!(lines[50], "49,24.5,,");
}

#[test]
fn headers_can_be_omitted() {
    let options = ExportOptions {
        include_headers: false,
        ..ExportOptions::default()
    };
    let csv = export_selected_data(&[series("Temp", 3)], &options).expect("csv");
    assert_eq!(csv, "0,0\n1,0.5\n2,1\n");
}

#[test]
fn series_names_override_by_position() {
    let options = ExportOptions {
        series_names: Some(vec!["Inlet, north".to_owned()]),
        ..ExportOptions::default()
    };
    let csv = export_selected_data(&[series("Temp", 1), series("Pressure", 1)], &options)
        .expect("csv");
    let header = csv.lines().next().expect("header");
    assert_eq!(header, "\"Inlet, north x\",\"Inlet, north y\",Pressure x,Pressure y");
}

#[test]
fn empty_selection_exports_header_only() {
    let csv = export_selected_data(&[series("Temp", 0)], &ExportOptions::default()).expect("csv");
    assert_eq!(csv, "Temp x,Temp y\n");
}

#[test]
fn json_export_lists_series_with_points() {
    let options = ExportOptions {
        format: ExportFormat::Json,
        ..ExportOptions::default()
    };
    let json = export_selected_data(&[series("Temp", 2), series("Pressure", 1)], &options)
        .expect("json");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    let entries = parsed.as_array().expect("array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "Temp");
    assert_eq!(entries[0]["points"][1]["x"], 1.0);
    assert_eq!(entries[0]["points"][1]["y"], 0.5);
    assert_eq!(entries[1]["points"].as_array().map(Vec::len), Some(1));
}

#[test]
fn export_options_deserialize_lowercase_format() {
    let options: ExportOptions = serde_json::from_str(
        r#"{"format":"json","include_headers":false,"series_names":null}"#,
    )
    .expect("options");
    assert_eq!(options.format, ExportFormat::Json);
    assert!(!options.include_headers);
}
