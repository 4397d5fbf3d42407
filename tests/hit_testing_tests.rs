use line_chart_rs::api::{ChartConfig, ChartProps, LineChart, TooltipGapPolicy};
use line_chart_rs::core::{
    AxisTypeHint, ChartGeometry, Dimensions, GeometryInput, Margin, Row, ScreenMatrix, SeriesDef,
    Value, compute_geometry, hit_test, nearest_index, row,
};
use line_chart_rs::render::NullRenderer;

// Default margins (16, 16, 32, 48) leave a 200px wide plot.
const OUTER_WIDTH: f64 = 264.0;
const LEFT_MARGIN: f64 = 48.0;

fn rows(values: &[(f64, Value)]) -> Vec<Row> {
    values
        .iter()
        .map(|(t, v)| row([("t", Value::from(*t)), ("v", v.clone())]))
        .collect()
}

fn sample_rows() -> Vec<Row> {
    rows(&[
        (0.0, Value::from(1.0)),
        (10.0, Value::from(3.0)),
        (20.0, Value::from(2.0)),
    ])
}

fn geometry(rows: &[Row]) -> ChartGeometry {
    compute_geometry(GeometryInput {
        rows,
        x_key: "t",
        series: &[SeriesDef::new("v", "v")],
        dimensions: Dimensions::new(OUTER_WIDTH, 300.0, Margin::default()),
        axis_hint: AxisTypeHint::Auto,
    })
}

fn props(rows: Vec<Row>) -> ChartProps {
    ChartProps::new(rows, "t", vec![SeriesDef::new("v", "v").with_label("Value")])
        .with_config(ChartConfig::default().with_fixed_size(OUTER_WIDTH, 300.0))
}

#[test]
fn pointer_near_edges_resolves_first_and_last_rows() {
    let geometry = geometry(&sample_rows());

    assert_eq!(geometry.x_positions, vec![0.0, 100.0, 200.0]);
    assert_eq!(hit_test(&geometry, 3.0).map(|hit| hit.index), Some(0));
    assert_eq!(hit_test(&geometry, 197.0).map(|hit| hit.index), Some(2));
}

#[test]
fn hit_reports_first_series_pixel_and_value() {
    let geometry = geometry(&sample_rows());

    let hit = hit_test(&geometry, 96.0).expect("hit");
    assert_eq!(hit.index, 1);
    assert_eq!(hit.x, 100.0);
    assert_eq!(hit.y, 0.0);
    assert_eq!(hit.value, 3.0);
}

#[test]
fn equidistant_pointer_keeps_the_earliest_row() {
    assert_eq!(nearest_index(&[0.0, 100.0, 200.0], 50.0), Some(0));
    assert_eq!(nearest_index(&[], 50.0), None);
    assert_eq!(nearest_index(&[0.0, 100.0], f64::NAN), None);
}

#[test]
fn screen_matrix_inverse_undoes_responsive_scaling() {
    let ctm = ScreenMatrix::scale_translate(2.0, 2.0, 100.0, 40.0);

    let (x, y) = ctm.to_local(300.0, 140.0).expect("invertible");
    assert_eq!((x, y), (100.0, 50.0));
    assert_eq!(ScreenMatrix::scale_translate(0.0, 1.0, 0.0, 0.0).to_local(1.0, 1.0), None);
}

#[test]
fn pointer_move_is_a_no_op_before_a_ready_render() {
    let mut chart = LineChart::new(NullRenderer::default());

    let tooltip = chart.pointer_move(&props(sample_rows()), 60.0, 20.0, ScreenMatrix::identity());

    assert!(tooltip.is_none());
}

#[test]
fn pointer_move_builds_tooltip_from_screen_coordinates() {
    let props = props(sample_rows());
    let mut chart = LineChart::new(NullRenderer::default());
    chart.render(&props).expect("render");

    let tooltip = chart
        .pointer_move(&props, LEFT_MARGIN + 3.0, 20.0, ScreenMatrix::identity())
        .expect("tooltip")
        .clone();
    assert_eq!(tooltip.index, 0);
    assert_eq!(tooltip.x_label, "0");
    assert_eq!(tooltip.series_id, "v");
    assert_eq!(tooltip.series_label, "Value");
    assert_eq!(tooltip.value_label, "1");

    let scaled = ScreenMatrix::scale_translate(2.0, 2.0, 100.0, 0.0);
    let screen_x = 100.0 + 2.0 * (LEFT_MARGIN + 197.0);
    let tooltip = chart
        .pointer_move(&props, screen_x, 20.0, scaled)
        .expect("tooltip");
    assert_eq!(tooltip.index, 2);
}

#[test]
fn tooltip_updates_reuse_cached_geometry() {
    let props = props(sample_rows());
    let mut chart = LineChart::new(NullRenderer::default());
    chart.render(&props).expect("first render");

    chart.pointer_move(&props, LEFT_MARGIN + 100.0, 20.0, ScreenMatrix::identity());
    chart.render(&props).expect("overlay render");

    let stats = chart.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(chart.renderer().last_rect_count, 1);
}

#[test]
fn custom_formatters_label_the_tooltip() {
    let props = props(sample_rows())
        .with_x_formatter(|value| format!("day {value}"))
        .with_y_formatter(|value| format!("{value:.1} units"));
    let mut chart = LineChart::new(NullRenderer::default());
    chart.render(&props).expect("render");

    let tooltip = chart
        .pointer_move(&props, LEFT_MARGIN + 100.0, 20.0, ScreenMatrix::identity())
        .expect("tooltip");

    assert_eq!(tooltip.x_label, "day 10");
    assert_eq!(tooltip.value_label, "3.0 units");
}

#[test]
fn date_axis_tooltip_uses_short_date_label() {
    let rows = vec![
        row([("t", Value::from("2024-01-01")), ("v", Value::from(1.0))]),
        row([("t", Value::from("2024-03-15")), ("v", Value::from(2.0))]),
    ];
    let props = props(rows);
    let mut chart = LineChart::new(NullRenderer::default());
    chart.render(&props).expect("render");

    let tooltip = chart
        .pointer_move(&props, LEFT_MARGIN, 20.0, ScreenMatrix::identity())
        .expect("tooltip");

    assert_eq!(tooltip.x_label, "1/1/2024");
}

#[test]
fn gap_clears_tooltip_by_default() {
    let props = props(rows(&[
        (0.0, Value::from(1.0)),
        (10.0, Value::Null),
        (20.0, Value::from(2.0)),
    ]));
    let mut chart = LineChart::new(NullRenderer::default());
    chart.render(&props).expect("render");

    assert!(
        chart
            .pointer_move(&props, LEFT_MARGIN, 20.0, ScreenMatrix::identity())
            .is_some()
    );
    let tooltip = chart.pointer_move(&props, LEFT_MARGIN + 100.0, 20.0, ScreenMatrix::identity());

    assert!(tooltip.is_none());
}

#[test]
fn keep_previous_policy_retains_stale_tooltip_over_gaps() {
    let base = props(rows(&[
        (0.0, Value::from(1.0)),
        (10.0, Value::Null),
        (20.0, Value::from(2.0)),
    ]));
    let config = base
        .config
        .clone()
        .with_tooltip_gap_policy(TooltipGapPolicy::KeepPrevious);
    let props = base.with_config(config);
    let mut chart = LineChart::new(NullRenderer::default());
    chart.render(&props).expect("render");

    chart.pointer_move(&props, LEFT_MARGIN, 20.0, ScreenMatrix::identity());
    let tooltip = chart
        .pointer_move(&props, LEFT_MARGIN + 100.0, 20.0, ScreenMatrix::identity())
        .expect("kept tooltip");

    assert_eq!(tooltip.index, 0);
}

#[test]
fn singular_matrix_and_pointer_leave_clear_tooltip() {
    let props = props(sample_rows());
    let mut chart = LineChart::new(NullRenderer::default());
    chart.render(&props).expect("render");

    chart.pointer_move(&props, LEFT_MARGIN, 20.0, ScreenMatrix::identity());
    let singular = ScreenMatrix::scale_translate(0.0, 0.0, 0.0, 0.0);
    assert!(chart.pointer_move(&props, LEFT_MARGIN, 20.0, singular).is_none());

    chart.pointer_move(&props, LEFT_MARGIN, 20.0, ScreenMatrix::identity());
    chart.pointer_leave();
    assert!(chart.tooltip().is_none());
}
