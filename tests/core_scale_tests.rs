use approx::assert_abs_diff_eq;
use line_chart_rs::core::{BandScale, LinearScale, extent, nice_domain, ticks};

#[test]
fn linear_scale_maps_and_inverts() {
    let scale = LinearScale::new((0.0, 20.0), (0.0, 200.0));

    assert_abs_diff_eq!(scale.apply(10.0), 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(scale.invert(150.0), 15.0, epsilon = 1e-9);
    assert_abs_diff_eq!(scale.slope(), 10.0, epsilon = 1e-12);
}

#[test]
fn linear_scale_supports_inverted_ranges() {
    let scale = LinearScale::new((0.0, 4.0), (300.0, 0.0));

    assert_eq!(scale.apply(0.0), 300.0);
    assert_eq!(scale.apply(4.0), 0.0);
    assert_abs_diff_eq!(scale.apply(1.0), 225.0, epsilon = 1e-9);
}

#[test]
fn degenerate_linear_domain_uses_unit_span() {
    let scale = LinearScale::new((5.0, 5.0), (0.0, 100.0));

    assert_eq!(scale.slope(), 100.0);
    assert_eq!(scale.apply(5.0), 0.0);
    assert!(scale.apply(6.0).is_finite());
}

#[test]
fn band_scale_slots_stay_inside_range_in_label_order() {
    let scale = BandScale::with_default_padding(["low", "medium", "high"], (0.0, 100.0));
    let step = 100.0 / (3.0 + 4.0 * 0.1);

    assert_abs_diff_eq!(scale.step(), step, epsilon = 1e-9);
    assert_abs_diff_eq!(scale.bandwidth(), step * 0.9, epsilon = 1e-9);
    assert_abs_diff_eq!(scale.position("low"), step * 0.15, epsilon = 1e-9);

    let centers: Vec<f64> = ["low", "medium", "high"]
        .iter()
        .map(|label| scale.center(label))
        .collect();
    assert!(centers.windows(2).all(|pair| pair[0] < pair[1]));
    for label in ["low", "medium", "high"] {
        assert!(scale.position(label) >= 0.0);
        assert!(scale.position(label) + scale.bandwidth() <= 100.0);
    }
}

#[test]
fn band_scale_centers_three_labels_over_three_hundred_pixels() {
    let labels = ["a", "b", "c"];
    let scale = BandScale::new(labels, (0.0, 300.0), 0.2);

    assert!(scale.bandwidth() > 0.0);
    let centers: Vec<f64> = labels.iter().map(|label| scale.center(label)).collect();
    assert!(centers.windows(2).all(|pair| pair[0] < pair[1]));
    for label in labels {
        assert!(scale.position(label) >= 0.0);
        assert!(scale.position(label) + scale.bandwidth() <= 300.0);
        assert!((0.0..=300.0).contains(&scale.center(label)));
    }

    assert_abs_diff_eq!(centers[1], 150.0, epsilon = 1e-9);
    assert_abs_diff_eq!(centers[0], 300.0 - centers[2], epsilon = 1e-9);
    assert_abs_diff_eq!(centers[1] - centers[0], scale.step() * 1.2, epsilon = 1e-9);
}

#[test]
fn band_scale_maps_unknown_labels_to_zero() {
    let scale = BandScale::with_default_padding(["a", "b"], (0.0, 50.0));

    assert_eq!(scale.position("missing"), 0.0);
    assert_eq!(scale.index_of("missing"), None);
}

#[test]
fn empty_band_scale_has_no_width() {
    let scale = BandScale::with_default_padding(Vec::<String>::new(), (0.0, 50.0));

    assert!(scale.is_empty());
    assert_eq!(scale.bandwidth(), 0.0);
}

#[test]
fn nice_domain_handles_degenerate_inputs() {
    assert_eq!(nice_domain((f64::NAN, 3.0)), (0.0, 1.0));
    assert_eq!(nice_domain((0.0, f64::INFINITY)), (0.0, 1.0));
    assert_eq!(nice_domain((5.0, 5.0)), (4.0, 6.0));
}

#[test]
fn nice_domain_snaps_outward_to_power_of_ten() {
    assert_eq!(nice_domain((1.0, 3.0)), (1.0, 3.0));
    assert_eq!(nice_domain((0.0, 20.0)), (0.0, 20.0));
    assert_eq!(nice_domain((3.0, 47.0)), (0.0, 50.0));
    assert_eq!(nice_domain((-12.0, 7.0)), (-20.0, 10.0));

    let (min, max) = nice_domain((0.12, 0.87));
    assert_abs_diff_eq!(min, 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(max, 0.9, epsilon = 1e-12);
}

#[test]
fn nice_domain_survives_spans_wider_than_f64() {
    let (min, max) = nice_domain((-1e308, 1e308));
    assert!(min.is_finite() && max.is_finite());
    assert!(min <= -1e308 && max >= 1e308);

    let (min, max) = nice_domain((0.0, f64::MAX));
    assert_eq!((min, max), (0.0, f64::MAX));

    let (min, max) = nice_domain((1e300, 1e300));
    assert!(min < 1e300 && max > 1e300);

    let (min, max) = nice_domain((f64::MAX, f64::MAX));
    assert!(min < max);
    assert_eq!(max, f64::MAX);
}

#[test]
fn linear_scale_and_ticks_stay_finite_over_overflowing_domain() {
    let domain = (-f64::MAX, f64::MAX);
    let scale = LinearScale::new(domain, (300.0, 0.0));

    assert_eq!(scale.apply(-f64::MAX), 300.0);
    assert_eq!(scale.apply(f64::MAX), 0.0);
    assert_abs_diff_eq!(scale.apply(0.0), 150.0, epsilon = 1e-9);
    assert_eq!(scale.invert(150.0), 0.0);

    let values = ticks(domain, 4);
    assert_eq!(values.len(), 5);
    assert!(values.iter().all(|value| value.is_finite()));
    assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(values[2], 0.0);
}

#[test]
fn ticks_include_both_endpoints() {
    let values = ticks((0.0, 50.0), 5);

    assert_eq!(values.as_slice(), &[0.0, 10.0, 20.0, 30.0, 40.0, 50.0]);
}

#[test]
fn ticks_do_not_round_to_friendly_steps() {
    let values = ticks((1.0, 3.0), 5);

    assert_eq!(values.len(), 6);
    assert_abs_diff_eq!(values[1], 1.4, epsilon = 1e-12);
    assert_eq!(values[5], 3.0);
}

#[test]
fn extent_ignores_non_finite_values() {
    assert_eq!(extent([2.0, f64::NAN, -4.0, f64::INFINITY, 9.0]), (-4.0, 9.0));
}
