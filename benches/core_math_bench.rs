use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use line_chart_rs::api::{ChartConfig, ChartProps, LineChart};
use line_chart_rs::core::{
    AxisTypeHint, Dimensions, GeometryInput, LinearScale, Margin, Row, SeriesDef, Value,
    compute_geometry, nearest_index, nice_domain, row, ticks,
};
use line_chart_rs::render::NullRenderer;

fn generated_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            let value = if i % 97 == 0 {
                Value::Null
            } else {
                Value::from(100.0 + (t * 0.05).sin() * 25.0)
            };
            row([("t", Value::from(t)), ("v", value)])
        })
        .collect()
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new((0.0, 10_000.0), (0.0, 1920.0));

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| scale.invert(scale.apply(black_box(4_321.123))))
    });
}

fn bench_nice_domain_and_ticks(c: &mut Criterion) {
    c.bench_function("nice_domain_and_ticks", |b| {
        b.iter(|| ticks(nice_domain(black_box((3.7, 9_876.5))), 5))
    });
}

fn bench_compute_geometry_10k(c: &mut Criterion) {
    let rows = generated_rows(10_000);
    let series = [SeriesDef::new("v", "v")];

    c.bench_function("compute_geometry_10k", |b| {
        b.iter(|| {
            compute_geometry(GeometryInput {
                rows: black_box(&rows),
                x_key: "t",
                series: &series,
                dimensions: Dimensions::new(1920.0, 1080.0, Margin::default()),
                axis_hint: AxisTypeHint::Auto,
            })
        })
    });
}

fn bench_nearest_index_10k(c: &mut Criterion) {
    let positions: Vec<f64> = (0..10_000).map(|i| i as f64 * 0.19).collect();

    c.bench_function("nearest_index_10k", |b| {
        b.iter(|| nearest_index(black_box(&positions), black_box(1_234.5)))
    });
}

fn bench_cached_render_2k(c: &mut Criterion) {
    let data = Arc::new(generated_rows(2_000));
    let props = ChartProps::new(data, "t", vec![SeriesDef::new("v", "v")])
        .with_config(ChartConfig::default().with_fixed_size(1600.0, 900.0));
    let mut chart = LineChart::new(NullRenderer::default());

    c.bench_function("cached_render_2k", |b| {
        b.iter(|| {
            let _ = chart.render(black_box(&props)).expect("render");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_nice_domain_and_ticks,
    bench_compute_geometry_10k,
    bench_nearest_index_10k,
    bench_cached_render_2k
);
criterion_main!(benches);
