//! Text export of a committed selection.
//!
//! CSV layout: each series contributes an `x` and a `y` column. Rows run to
//! the longest series; shorter series are padded with empty cells.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::interaction::{SelectedPoint, SelectedSeriesPoints};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// CSV only: emit the header row.
    pub include_headers: bool,
    /// Overrides series names by position; missing entries keep the original.
    pub series_names: Option<Vec<String>>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_headers: true,
            series_names: None,
        }
    }
}

#[derive(Serialize)]
struct ExportedSeries<'a> {
    name: &'a str,
    points: &'a [SelectedPoint],
}

/// Renders `series` as CSV or JSON text. No file-system access happens here.
pub fn export_selected_data(
    series: &[SelectedSeriesPoints],
    options: &ExportOptions,
) -> ChartResult<String> {
    let names: Vec<&str> = series
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            options
                .series_names
                .as_ref()
                .and_then(|names| names.get(index))
                .map_or(entry.name.as_str(), String::as_str)
        })
        .collect();

    match options.format {
        ExportFormat::Csv => Ok(to_csv(series, &names, options.include_headers)),
        ExportFormat::Json => {
            let exported: Vec<ExportedSeries<'_>> = series
                .iter()
                .zip(&names)
                .map(|(entry, name)| ExportedSeries {
                    name,
                    points: &entry.points,
                })
                .collect();
            serde_json::to_string_pretty(&exported)
                .map_err(|err| ChartError::InvalidData(format!("selection export failed: {err}")))
        }
    }
}

fn to_csv(series: &[SelectedSeriesPoints], names: &[&str], include_headers: bool) -> String {
    let mut out = String::new();
    if include_headers {
        let header: Vec<String> = names
            .iter()
            .flat_map(|name| [csv_field(&format!("{name} x")), csv_field(&format!("{name} y"))])
            .collect();
        out.push_str(&header.join(","));
        out.push('\n');
    }

    let rows = series.iter().map(|s| s.points.len()).max().unwrap_or(0);
    for row in 0..rows {
        let mut cells = Vec::with_capacity(series.len() * 2);
        for entry in series {
            match entry.points.get(row) {
                Some(point) => {
                    cells.push(point.x.to_string());
                    cells.push(point.y.to_string());
                }
                None => {
                    cells.push(String::new());
                    cells.push(String::new());
                }
            }
        }
        let _ = writeln!(out, "{}", cells.join(","));
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::csv_field;

    #[test]
    fn fields_with_separators_are_quoted() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
