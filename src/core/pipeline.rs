use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::axis::{AxisType, AxisTypeHint, resolve_axis_type};
use crate::core::line_series::{SeriesPath, project_series_path};
use crate::core::scale::{
    BandScale, DEFAULT_BAND_PADDING, DEFAULT_TICK_COUNT, LinearScale, extent, extent_strict,
    nice_domain, ticks,
};
use crate::core::types::{Dimensions, SeriesDef};
use crate::core::value::{Row, Value};

/// Upper bound on labelled ticks for categorical axes.
pub const MAX_CATEGORICAL_TICKS: usize = 6;

/// Everything the coordinate pipeline depends on.
#[derive(Debug, Clone, Copy)]
pub struct GeometryInput<'a> {
    pub rows: &'a [Row],
    pub x_key: &'a str,
    pub series: &'a [SeriesDef],
    pub dimensions: Dimensions,
    pub axis_hint: AxisTypeHint,
}

/// Horizontal scale chosen from the resolved axis type.
#[derive(Debug, Clone, PartialEq)]
pub enum XScale {
    Band(BandScale),
    Linear(LinearScale),
}

impl XScale {
    /// Numeric domain for linear axes; `None` for categorical ones.
    #[must_use]
    pub fn linear_domain(&self) -> Option<(f64, f64)> {
        match self {
            Self::Band(_) => None,
            Self::Linear(scale) => Some(scale.domain()),
        }
    }
}

/// One x-axis tick: its pixel position and the row whose x value labels it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XTick {
    pub position: f64,
    pub row_index: usize,
    /// Tick value in axis units; `None` on categorical axes.
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YTick {
    pub position: f64,
    pub value: f64,
}

/// Pixel-space geometry for one chart render pass.
///
/// All positions are plot-local: `(0, 0)` is the top-left corner of the inner
/// plot area, not of the outer box.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub dimensions: Dimensions,
    pub inner_width: f64,
    pub inner_height: f64,
    pub axis_type: AxisType,
    pub raw_x: Vec<Value>,
    pub x_positions: Vec<f64>,
    pub x_scale: XScale,
    pub x_ticks: Vec<XTick>,
    pub y_domain: (f64, f64),
    pub y_scale: LinearScale,
    pub y_ticks: Vec<YTick>,
    /// Raw y values per series (NaN where the row has no plottable value).
    pub series_values: Vec<Vec<f64>>,
    pub paths: Vec<SeriesPath>,
}

impl ChartGeometry {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.raw_x.len()
    }

    #[must_use]
    pub fn path(&self, series_id: &str) -> Option<&SeriesPath> {
        self.paths.iter().find(|path| path.series_id == series_id)
    }
}

/// Raw x values with the row index substituted for absent or null fields.
#[must_use]
pub fn raw_x_values(rows: &[Row], x_key: &str) -> Vec<Value> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| match row.get(x_key) {
            Some(value) if !value.is_null() => value.clone(),
            _ => Value::Number(index as f64),
        })
        .collect()
}

/// Finite numeric y value of `row[y_key]`, or NaN.
#[must_use]
pub fn series_value(row: &Row, y_key: &str) -> f64 {
    row.get(y_key)
        .and_then(Value::as_number)
        .filter(|value| value.is_finite())
        .unwrap_or(f64::NAN)
}

/// Runs the full coordinate pipeline: domains, scales, ticks and paths.
#[must_use]
pub fn compute_geometry(input: GeometryInput<'_>) -> ChartGeometry {
    let inner_width = input.dimensions.inner_width();
    let inner_height = input.dimensions.inner_height();

    let raw_x = raw_x_values(input.rows, input.x_key);
    let axis_type = resolve_axis_type(input.axis_hint, &raw_x);

    let series_values: Vec<Vec<f64>> = input
        .series
        .iter()
        .map(|def| {
            input
                .rows
                .iter()
                .map(|row| series_value(row, &def.y_key))
                .collect()
        })
        .collect();

    let y_domain = nice_domain(extent(series_values.iter().flatten().copied()));
    let y_scale = LinearScale::new(y_domain, (inner_height, 0.0));
    let y_ticks = ticks(y_domain, DEFAULT_TICK_COUNT)
        .into_iter()
        .map(|value| YTick {
            position: y_scale.apply(value),
            value,
        })
        .collect();

    let (x_scale, x_positions, x_ticks) = match axis_type {
        AxisType::Categorical => build_band_axis(&raw_x, inner_width),
        AxisType::Numeric | AxisType::Date => build_linear_axis(&raw_x, axis_type, inner_width),
    };

    let paths = input
        .series
        .iter()
        .zip(&series_values)
        .enumerate()
        .map(|(index, (def, values))| {
            project_series_path(
                &def.id,
                index,
                &x_positions,
                values.iter().map(|&value| y_scale.apply(value)),
            )
        })
        .collect();

    debug!(
        rows = input.rows.len(),
        series = input.series.len(),
        axis_type = ?axis_type,
        inner_width,
        inner_height,
        y_min = y_domain.0,
        y_max = y_domain.1,
        "computed chart geometry"
    );

    ChartGeometry {
        dimensions: input.dimensions,
        inner_width,
        inner_height,
        axis_type,
        raw_x,
        x_positions,
        x_scale,
        x_ticks,
        y_domain,
        y_scale,
        y_ticks,
        series_values,
        paths,
    }
}

fn build_band_axis(raw_x: &[Value], inner_width: f64) -> (XScale, Vec<f64>, Vec<XTick>) {
    let labels: Vec<String> = raw_x.iter().map(ToString::to_string).collect();
    let scale = BandScale::new(labels.iter().cloned(), (0.0, inner_width), DEFAULT_BAND_PADDING);
    let positions = labels.iter().map(|label| scale.center(label)).collect();

    let label_count = scale.len();
    let mut x_ticks = Vec::new();
    if label_count > 0 {
        let step = label_count.div_ceil(label_count.min(MAX_CATEGORICAL_TICKS));
        for label in scale.labels().step_by(step) {
            let row_index = labels
                .iter()
                .position(|candidate| candidate == label)
                .unwrap_or_default();
            x_ticks.push(XTick {
                position: scale.center(label),
                row_index,
                value: None,
            });
        }
    }

    (XScale::Band(scale), positions, x_ticks)
}

fn build_linear_axis(
    raw_x: &[Value],
    axis_type: AxisType,
    inner_width: f64,
) -> (XScale, Vec<f64>, Vec<XTick>) {
    let numbers: Vec<f64> = raw_x
        .iter()
        .map(|value| match axis_type {
            AxisType::Date => value.to_epoch_millis().unwrap_or(f64::NAN),
            _ => value.to_numeric(),
        })
        .collect();

    let domain = nice_domain(extent_strict(numbers.iter().copied()));
    let scale = LinearScale::new(domain, (0.0, inner_width));
    let positions = numbers.iter().map(|&value| scale.apply(value)).collect();

    let x_ticks = if numbers.is_empty() {
        Vec::new()
    } else {
        ticks(domain, DEFAULT_TICK_COUNT)
            .into_iter()
            .map(|value| XTick {
                position: scale.apply(value),
                row_index: nearest_row(&numbers, value),
                value: Some(value),
            })
            .collect()
    };

    (XScale::Linear(scale), positions, x_ticks)
}

fn nearest_row(numbers: &[f64], target: f64) -> usize {
    numbers
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_finite())
        .min_by_key(|(_, value)| OrderedFloat((*value - target).abs()))
        .map_or(0, |(index, _)| index)
}
