use approx::assert_relative_eq;
use gridchart_rs::core::{AxisRange, LinearScale, PlotArea, Viewport};

fn viewport() -> Viewport {
    Viewport::new(
        AxisRange::new(1_700_000_000_000.0, 1_700_000_600_000.0).expect("x"),
        AxisRange::new(-20.0, 80.0).expect("y"),
    )
}

#[test]
fn scale_round_trip_within_tolerance() {
    let scale = LinearScale::new(10.0, 110.0).expect("valid scale");

    let original = 42.5;
    let px = scale.domain_to_pixel(original, 1_000).expect("to pixel");
    let recovered = scale.pixel_to_domain(px, 1_000).expect("from pixel");

    assert_relative_eq!(recovered, original, epsilon = 1e-9);
}

#[test]
fn zero_extent_is_rejected() {
    let scale = LinearScale::new(0.0, 1.0).expect("valid scale");
    assert!(scale.domain_to_pixel(0.5, 0).is_err());
    assert!(LinearScale::new(f64::NAN, 1.0).is_err());
}

#[test]
fn y_axis_grows_upwards_in_pixel_space() {
    let area = PlotArea::new(600, 400);
    let (_, top) = viewport().data_to_pixel(1_700_000_000_000.0, 80.0, area).expect("top");
    let (_, bottom) = viewport().data_to_pixel(1_700_000_000_000.0, -20.0, area).expect("bottom");
    assert_relative_eq!(top, 0.0);
    assert_relative_eq!(bottom, 400.0);

    let (x, y) = viewport().pixel_to_data(300.0, 100.0, area).expect("data");
    assert_relative_eq!(x, 1_700_000_300_000.0);
    assert_relative_eq!(y, 55.0);
}

#[test]
fn zoom_around_keeps_anchor_fixed() {
    let anchor = 1_700_000_150_000.0;
    let zoomed = viewport().zoom_x_around(anchor, 4.0, 1.0).expect("zoom");

    assert_relative_eq!(zoomed.x.span(), 150_000.0, epsilon = 1e-3);
    let before = (anchor - viewport().x.min) / viewport().x.span();
    let after = (anchor - zoomed.x.min) / zoomed.x.span();
    assert_relative_eq!(before, after, epsilon = 1e-6);
    assert_eq!(zoomed.y, viewport().y);
}

#[test]
fn zoom_span_is_clamped_to_minimum() {
    let zoomed = viewport()
        .zoom_x_around(1_700_000_300_000.0, 1e12, 1_000.0)
        .expect("zoom");
    assert_relative_eq!(zoomed.x.span(), 1_000.0);
    assert!(viewport().zoom_x_around(0.0, 0.0, 1.0).is_err());
}

#[test]
fn pan_moves_by_pixel_equivalent() {
    let area = PlotArea::new(600, 400);
    let panned = viewport().pan_x_by_pixels(60.0, area).expect("pan");
    assert_relative_eq!(panned.x.min, 1_699_999_940_000.0);
    assert_relative_eq!(panned.x.span(), viewport().x.span());
}

#[test]
fn degenerate_ranges_are_widened() {
    let flat = AxisRange::new(5.0, 5.0).expect("flat").non_degenerate();
    assert!(flat.span() > 0.0);
    assert!(flat.contains(5.0));

    let around_zero = AxisRange::new(0.0, 0.0).expect("zero").non_degenerate();
    assert_eq!((around_zero.min, around_zero.max), (-1.0, 1.0));
}
