//! Shape-preserving point reduction.
//!
//! Series longer than the budget are reduced with bucket min/max decimation:
//! the first and last samples are kept verbatim and the interior is split into
//! `(budget - 2) / 2` equal-width x buckets, each contributing its lowest and
//! highest sample in original order. Spikes therefore survive at every tier,
//! which nth-point striding cannot guarantee.
//!
//! A bucket that also holds missing samples keeps its first one as a gap
//! marker, so the drawn line still breaks there. When those extra markers
//! would overflow the budget, the pass is repeated with fewer buckets.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::types::{AxisRange, PlotSeries};
use crate::error::{ChartError, ChartResult};

/// Point counts before and after sampling, for UI disclosure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingInfo {
    pub original_count: usize,
    pub sampled_count: usize,
}

impl SamplingInfo {
    #[must_use]
    pub fn is_reduced(self) -> bool {
        self.sampled_count < self.original_count
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampledSeries {
    pub series: PlotSeries,
    pub info: SamplingInfo,
}

/// Reduces `series` to at most `budget` points (`None` = unlimited).
///
/// Series already within budget are returned unchanged, so sampling is
/// idempotent. Output length is bounded by `max(budget, 2)`.
pub fn sample_series(series: &PlotSeries, budget: Option<usize>) -> ChartResult<SampledSeries> {
    series
        .validate()
        .map_err(ChartError::into_transform_failure)?;

    let original_count = series.len();
    let within_budget = budget.is_none_or(|budget| original_count <= budget);
    if within_budget {
        return Ok(SampledSeries {
            series: series.clone(),
            info: SamplingInfo {
                original_count,
                sampled_count: original_count,
            },
        });
    }

    let budget = budget.unwrap_or(original_count);
    let indices = select_indices(&series.x_values, &series.y_values, budget);
    let x_values = indices.iter().map(|&i| series.x_values[i]).collect();
    let y_values = indices.iter().map(|&i| series.y_values[i]).collect();
    let sampled = series
        .with_samples(x_values, y_values)
        .map_err(ChartError::into_transform_failure)?;

    trace!(
        series = %series.display_name(),
        original_count,
        sampled_count = sampled.len(),
        budget,
        "sampled series"
    );

    Ok(SampledSeries {
        info: SamplingInfo {
            original_count,
            sampled_count: sampled.len(),
        },
        series: sampled,
    })
}

#[derive(Debug, Clone, Copy, Default)]
struct BucketExtremes {
    min: Option<(usize, f64)>,
    max: Option<(usize, f64)>,
    first_gap: Option<usize>,
}

impl BucketExtremes {
    fn observe(&mut self, index: usize, y: f64) {
        if !y.is_finite() {
            self.first_gap.get_or_insert(index);
            return;
        }
        if self.min.is_none_or(|(_, min)| y < min) {
            self.min = Some((index, y));
        }
        if self.max.is_none_or(|(_, max)| y > max) {
            self.max = Some((index, y));
        }
    }

    fn picks(self) -> SmallVec<[usize; 3]> {
        let mut picks: SmallVec<[usize; 3]> = SmallVec::new();
        if let (Some((min_i, _)), Some((max_i, _))) = (self.min, self.max) {
            picks.push(min_i.min(max_i));
            if min_i != max_i {
                picks.push(min_i.max(max_i));
            }
        }
        picks.extend(self.first_gap);
        picks.sort_unstable();
        picks
    }
}

/// Indices kept by min/max decimation, first and last always included.
///
/// Expects `x.len() == y.len()`. The result is never longer than
/// `max(budget, 2)`.
#[must_use]
pub fn select_indices(x: &[f64], y: &[f64], budget: usize) -> Vec<usize> {
    let len = x.len().min(y.len());
    if len <= budget.max(2) {
        return (0..len).collect();
    }

    let interior_budget = budget.saturating_sub(2);
    // Three picks per bucket always fit.
    let floor = interior_budget / 3;
    let mut bucket_count = interior_budget / 2;
    loop {
        let out = decimate(x, y, len, bucket_count);
        if out.len() <= budget.max(2) || bucket_count <= floor {
            return out;
        }
        let excess = out.len() - budget;
        bucket_count = bucket_count.saturating_sub(excess.div_ceil(2)).max(floor);
    }
}

fn decimate(x: &[f64], y: &[f64], len: usize, bucket_count: usize) -> Vec<usize> {
    let last = len - 1;
    let mut out = Vec::with_capacity(bucket_count * 2 + 2);
    out.push(0);

    if bucket_count > 0 {
        let interior = 1..last;
        // Fall back to index positions when x carries no usable extent.
        let key_range = AxisRange::from_values(interior.clone().map(|i| x[i]))
            .filter(|range| range.span() > 0.0);
        let (key_min, key_span) = match key_range {
            Some(range) => (range.min, range.span()),
            None => (1.0, (last - 1).max(1) as f64),
        };
        let key_of = |i: usize| if key_range.is_some() { x[i] } else { i as f64 };

        let mut buckets = vec![BucketExtremes::default(); bucket_count];
        for i in interior {
            let key = key_of(i);
            if !key.is_finite() {
                continue;
            }
            let position = ((key - key_min) / key_span * bucket_count as f64).floor();
            let bucket = (position.max(0.0) as usize).min(bucket_count - 1);
            buckets[bucket].observe(i, y[i]);
        }

        for bucket in buckets {
            out.extend(bucket.picks());
        }
    }

    out.push(last);
    out
}
