use gridchart_rs::core::{DataSourceId, ParameterId, ParameterInfo, PlotSeries, sample_series};
use proptest::prelude::*;

fn build_series(y: Vec<f64>) -> PlotSeries {
    let x = (0..y.len()).map(|i| i as f64 * 250.0).collect();
    PlotSeries::new(
        DataSourceId::new("source"),
        "source",
        ParameterInfo::new(ParameterId::new("value"), "Value", ""),
        x,
        y,
    )
    .expect("series")
}

fn sample_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        9 => -1_000.0f64..1_000.0,
        1 => Just(f64::NAN),
    ]
}

proptest! {
    #[test]
    fn sampling_is_idempotent(
        y in proptest::collection::vec(sample_value(), 0..2_000),
        budget in 2usize..600,
    ) {
        let series = build_series(y);
        let once = sample_series(&series, Some(budget)).expect("first pass");
        let twice = sample_series(&once.series, Some(budget)).expect("second pass");

        prop_assert_eq!(&once.series.x_values, &twice.series.x_values);
        let same_y = once
            .series
            .y_values
            .iter()
            .zip(&twice.series.y_values)
            .all(|(a, b)| a.to_bits() == b.to_bits());
        prop_assert!(same_y);
    }

    #[test]
    fn sampling_keeps_endpoints(
        y in proptest::collection::vec(sample_value(), 3..3_000),
        budget in 2usize..400,
    ) {
        let series = build_series(y);
        prop_assume!(series.len() > budget);
        let sampled = sample_series(&series, Some(budget)).expect("sample").series;

        prop_assert_eq!(sampled.x_values[0], series.x_values[0]);
        prop_assert_eq!(
            sampled.x_values[sampled.len() - 1],
            series.x_values[series.len() - 1]
        );
        prop_assert_eq!(sampled.y_values[0].to_bits(), series.y_values[0].to_bits());
        prop_assert_eq!(
            sampled.y_values[sampled.len() - 1].to_bits(),
            series.y_values[series.len() - 1].to_bits()
        );
    }

    #[test]
    fn sampling_never_upscales(
        y in proptest::collection::vec(sample_value(), 0..3_000),
        budget in 0usize..700,
    ) {
        let series = build_series(y);
        let sampled = sample_series(&series, Some(budget)).expect("sample");

        prop_assert!(sampled.series.len() <= budget.max(2));
        if series.len() <= budget {
            prop_assert_eq!(sampled.series.len(), series.len());
        }
        prop_assert_eq!(sampled.info.sampled_count, sampled.series.len());
        prop_assert_eq!(sampled.info.original_count, series.len());
    }

    #[test]
    fn sampled_x_stays_in_original_order(
        y in proptest::collection::vec(-50.0f64..50.0, 0..2_500),
        budget in 2usize..300,
    ) {
        let series = build_series(y);
        let sampled = sample_series(&series, Some(budget)).expect("sample").series;
        prop_assert!(sampled.x_values.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
