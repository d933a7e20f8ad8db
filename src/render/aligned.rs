use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::PlotSeries;
use crate::error::{ChartError, ChartResult};

/// x/y columns of one series, used when series cannot share an x column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesColumns {
    pub x: Vec<f64>,
    pub y: Vec<Option<f64>>,
}

/// One slot of a joined series column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinedCell {
    Value(f64),
    /// Missing sample in the source data; the drawn line breaks here.
    Gap,
    /// The series has no sample at this x; the line runs on to its next value.
    Absent,
}

impl JoinedCell {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(value),
            Self::Gap | Self::Absent => None,
        }
    }

    #[must_use]
    pub fn is_gap(self) -> bool {
        self == Self::Gap
    }
}

/// Columnar data handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum AlignedData {
    /// `[x, y1, y2, ...]` on the union of every series' x positions. Slots a
    /// series never sampled are `Absent`; only its own missing samples are
    /// `Gap`.
    Joined { x: Vec<f64>, ys: Vec<Vec<JoinedCell>> },
    /// Independent x/y columns per series (XY scatter).
    Faceted { series: Vec<SeriesColumns> },
}

impl AlignedData {
    /// Union-joins sorted time series onto one shared x column.
    ///
    /// When one series repeats an x value, the later sample wins.
    pub fn joined(series: &[PlotSeries]) -> ChartResult<Self> {
        let mut x: Vec<OrderedFloat<f64>> = series
            .iter()
            .flat_map(|s| s.x_values.iter().copied())
            .filter(|value| value.is_finite())
            .map(OrderedFloat)
            .collect();
        x.sort_unstable();
        x.dedup();

        let mut ys = Vec::with_capacity(series.len());
        for s in series {
            s.validate()?;
            let mut column = vec![JoinedCell::Absent; x.len()];
            for (&sx, &sy) in s.x_values.iter().zip(&s.y_values) {
                if !sx.is_finite() {
                    continue;
                }
                if let Ok(slot) = x.binary_search(&OrderedFloat(sx)) {
                    column[slot] = if sy.is_finite() {
                        JoinedCell::Value(sy)
                    } else {
                        JoinedCell::Gap
                    };
                }
            }
            ys.push(column);
        }

        Ok(Self::Joined {
            x: x.into_iter().map(OrderedFloat::into_inner).collect(),
            ys,
        })
    }

    /// Keeps each series' own x positions in row order.
    pub fn faceted(series: &[PlotSeries]) -> ChartResult<Self> {
        let series = series
            .iter()
            .map(|s| {
                s.validate()?;
                Ok(SeriesColumns {
                    x: s.x_values.clone(),
                    y: s
                        .y_values
                        .iter()
                        .map(|&y| y.is_finite().then_some(y))
                        .collect(),
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;
        Ok(Self::Faceted { series })
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        match self {
            Self::Joined { ys, .. } => ys.len(),
            Self::Faceted { series } => series.len(),
        }
    }

    /// Total number of row slots across all series.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        match self {
            Self::Joined { x, ys } => x.len() * ys.len(),
            Self::Faceted { series } => series.iter().map(|s| s.x.len()).sum(),
        }
    }

    /// Missing source samples across all series; alignment slots do not count.
    #[must_use]
    pub fn gap_count(&self) -> usize {
        match self {
            Self::Joined { ys, .. } => ys.iter().flatten().filter(|cell| cell.is_gap()).count(),
            Self::Faceted { series } => series
                .iter()
                .flat_map(|s| &s.y)
                .filter(|y| y.is_none())
                .count(),
        }
    }

    /// Checks every column against its x column.
    pub fn validate(&self) -> ChartResult<()> {
        let mismatch = match self {
            Self::Joined { x, ys } => ys.iter().any(|column| column.len() != x.len()),
            Self::Faceted { series } => series.iter().any(|s| s.x.len() != s.y.len()),
        };
        if mismatch {
            return Err(ChartError::TransformFailure(
                "aligned data columns differ in length".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AlignedData, JoinedCell};
    use crate::core::{DataSourceId, ParameterId, ParameterInfo, PlotSeries};

    fn series(x: Vec<f64>, y: Vec<f64>) -> PlotSeries {
        PlotSeries::new(
            DataSourceId::new("s"),
            "s",
            ParameterInfo::new(ParameterId::new("p"), "P", ""),
            x,
            y,
        )
        .expect("series")
    }

    #[test]
    fn unshared_x_is_absent_not_gap() {
        let joined = AlignedData::joined(&[
            series(vec![0.0, 2.0], vec![1.0, f64::NAN]),
            series(vec![1.0], vec![4.0]),
        ])
        .expect("joined");

        let AlignedData::Joined { ys, .. } = &joined else {
            panic!("expected joined layout");
        };
        assert_eq!(
            ys[0],
            vec![JoinedCell::Value(1.0), JoinedCell::Absent, JoinedCell::Gap]
        );
        assert_eq!(joined.gap_count(), 1);
    }
}
